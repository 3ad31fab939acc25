//! Input/output helpers.
//!
//! - dataset JSON loading + validation (`dataset`)
//! - prediction JSON export (`export`)

pub mod dataset;
pub mod export;

pub use dataset::*;
pub use export::*;
