//! Division data: team records and the validated division table.

pub mod division;
pub mod team;
