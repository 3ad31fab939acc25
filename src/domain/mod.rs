//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - validated inputs (`CategoryTable`, `Dataset`, `PredictionRequest`)
//! - fit outputs (`PolyModel`, `FitQuality`, `PointResidual`)
//! - the per-request `PredictionResult`

pub mod types;

pub use types::*;
