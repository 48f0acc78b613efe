//! Elimination analysis: flow network construction, the analyzer, and the
//! certificates it produces.

pub mod analyzer;
pub mod certificate;
pub mod network;
pub mod observer;
