//! Built-in data.
//!
//! - `reference`: the JEE Main 2024 shift-wise marks/percentile table

pub mod reference;

pub use reference::*;
