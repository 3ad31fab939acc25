//! Evaluation of fitted polynomial models.
//!
//! The fitter and the presentation layers rely on three primitive operations:
//! - predict `percentile(x)` for a single score
//! - sample the curve on an evenly spaced grid (for charts and API output)
//! - express the polynomial in raw `x^k` coefficients (for reports/exports)

use crate::domain::{CurvePoint, PolyModel};

/// Predict the percentile at score `x`.
pub fn predict(model: &PolyModel, x: f64) -> f64 {
    model.basis.evaluate(&model.coefficients, x)
}

/// Evaluate the model at `n` evenly spaced scores in `[lo, hi]` (inclusive).
///
/// The first sample is exactly `lo` and the last exactly `hi`. `n < 2` yields
/// an empty curve.
pub fn sample_curve(model: &PolyModel, lo: f64, hi: f64, n: usize) -> Vec<CurvePoint> {
    if n < 2 {
        return Vec::new();
    }
    let step = (hi - lo) / (n as f64 - 1.0);
    (0..n)
        .map(|i| {
            let score = if i == n - 1 { hi } else { lo + step * i as f64 };
            CurvePoint {
                score,
                percentile: predict(model, score),
            }
        })
        .collect()
}

/// Coefficients of `x^0, x^1, …` for the fitted polynomial.
pub fn power_coefficients(model: &PolyModel) -> Vec<f64> {
    model.basis.power_coefficients(&model.coefficients)
}
