//! Polynomial feature basis.
//!
//! Scores live around `100..200`, so raw powers `x^3` reach `10^7` while the
//! intercept column stays at `1`. We instead expand the centered and scaled
//! variable
//!
//! ```text
//! u = (x - center) / scale
//! ```
//!
//! which maps the observed score range onto `[-1, 1]` and keeps the design
//! matrix well conditioned. A polynomial in `u` of degree `d` is still a
//! polynomial in `x` of degree `d`; [`PolyBasis::power_coefficients`] converts
//! back to the `x^k` form for reporting.

use serde::{Deserialize, Serialize};

/// Affine-normalized monomial basis `[1, u, u², …, u^d]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolyBasis {
    pub degree: usize,
    pub center: f64,
    pub scale: f64,
}

impl PolyBasis {
    /// Build a basis that maps `[min, max]` of `xs` onto `[-1, 1]`.
    ///
    /// Falls back to `scale = 1` when all values coincide (callers reject such
    /// inputs before fitting, but evaluation must never divide by zero).
    pub fn for_samples(xs: &[f64], degree: usize) -> Self {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &x in xs {
            lo = lo.min(x);
            hi = hi.max(x);
        }
        if !(lo.is_finite() && hi.is_finite()) {
            return Self {
                degree,
                center: 0.0,
                scale: 1.0,
            };
        }
        let half = (hi - lo) / 2.0;
        Self {
            degree,
            center: (hi + lo) / 2.0,
            scale: if half > 0.0 { half } else { 1.0 },
        }
    }

    /// Number of coefficients (`degree + 1`).
    pub fn n_terms(&self) -> usize {
        self.degree + 1
    }

    pub fn to_unit(&self, x: f64) -> f64 {
        (x - self.center) / self.scale
    }

    /// Fill a design row `[1, u, u², …]` for the score `x`.
    ///
    /// # Panics
    /// Panics if `out.len() != self.n_terms()`.
    pub fn fill_row(&self, x: f64, out: &mut [f64]) {
        assert_eq!(out.len(), self.n_terms(), "design row length mismatch");
        let u = self.to_unit(x);
        let mut pow = 1.0;
        for slot in out.iter_mut() {
            *slot = pow;
            pow *= u;
        }
    }

    /// Evaluate `Σ c_k u^k` at the score `x` (Horner's scheme).
    pub fn evaluate(&self, coefficients: &[f64], x: f64) -> f64 {
        let u = self.to_unit(x);
        coefficients.iter().rev().fold(0.0, |acc, &c| acc * u + c)
    }

    /// Convert coefficients on `u` into coefficients on raw `x`.
    ///
    /// Expands `c_k ((x - m) / s)^k` binomially; entry `j` of the result is the
    /// coefficient of `x^j`.
    pub fn power_coefficients(&self, coefficients: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; coefficients.len()];
        for (k, &c) in coefficients.iter().enumerate() {
            let lead = c / self.scale.powi(k as i32);
            let mut binom = 1.0;
            for (j, slot) in out.iter_mut().enumerate().take(k + 1) {
                *slot += lead * binom * (-self.center).powi((k - j) as i32);
                // C(k, j+1) = C(k, j) * (k - j) / (j + 1)
                binom = binom * (k - j) as f64 / (j + 1) as f64;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_maps_range_onto_unit_interval() {
        let basis = PolyBasis::for_samples(&[200.0, 150.0, 100.0], 3);
        assert_eq!(basis.center, 150.0);
        assert_eq!(basis.scale, 50.0);
        assert!((basis.to_unit(100.0) + 1.0).abs() < 1e-15);
        assert!((basis.to_unit(200.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn fill_row_produces_monomials() {
        let basis = PolyBasis::for_samples(&[0.0, 4.0], 3);
        let mut row = [0.0; 4];
        basis.fill_row(4.0, &mut row);
        assert_eq!(row, [1.0, 1.0, 1.0, 1.0]);
        basis.fill_row(0.0, &mut row);
        assert_eq!(row, [1.0, -1.0, 1.0, -1.0]);
    }

    #[test]
    fn power_coefficients_agree_with_unit_evaluation() {
        let basis = PolyBasis::for_samples(&[100.0, 200.0], 3);
        let coeffs = [95.04, 5.14, -0.22, -0.36];
        let power = basis.power_coefficients(&coeffs);
        for &x in &[0.0, 100.0, 137.5, 200.0, 300.0] {
            let direct = basis.evaluate(&coeffs, x);
            let expanded: f64 = power
                .iter()
                .enumerate()
                .map(|(j, c)| c * x.powi(j as i32))
                .sum();
            assert!(
                (direct - expanded).abs() < 1e-8,
                "x={x}: {direct} vs {expanded}"
            );
        }
    }

    #[test]
    fn degenerate_samples_keep_unit_scale() {
        let basis = PolyBasis::for_samples(&[5.0, 5.0], 2);
        assert_eq!(basis.scale, 1.0);
        assert!(basis.evaluate(&[1.0, 1.0, 1.0], 5.0).is_finite());
    }
}
