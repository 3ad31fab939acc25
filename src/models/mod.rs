//! Polynomial model evaluation.
//!
//! Models are evaluated through small, pure functions so that the fitter, the
//! charts and the exporters all share one definition of the fitted curve.

pub mod model;

pub use model::*;
