//! Report module - run summary generation and export

pub mod summary;

pub use summary::*;
