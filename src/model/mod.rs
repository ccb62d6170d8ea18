//! External regression capability (fit / predict / evaluate)

pub mod regression;

pub use regression::*;
