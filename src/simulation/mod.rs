//! Random division generation for testing and benchmarking.

pub mod random_division;
