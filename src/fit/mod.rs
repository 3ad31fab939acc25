//! Curve fitting and prediction.
//!
//! Responsibilities:
//!
//! - fit a least-squares polynomial to one category table
//! - evaluate it at the query score and sample the display curve
//! - predict one score against every category (parallel)

pub mod fitter;
pub mod predictor;

pub use fitter::*;
pub use predictor::*;
