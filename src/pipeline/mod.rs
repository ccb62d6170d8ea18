//! Pipeline module - the preparation steps in execution order

pub mod binning;
pub mod encoding;
pub mod error;
pub mod impute;
pub mod loader;
pub mod matrix;
pub mod schema;
pub mod split;

pub use binning::*;
pub use encoding::*;
pub use error::PrepError;
pub use impute::*;
pub use loader::*;
pub use matrix::*;
pub use schema::*;
pub use split::*;
