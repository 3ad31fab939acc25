//! Low-level polynomial fitting for a single category table.
//!
//! Given scores `x_i` and percentiles `y_i` we:
//! - expand every score into the normalized basis `[1, u, u², u³]`
//! - solve the ordinary least-squares problem for the coefficients
//! - report residuals and goodness of fit
//!
//! All table rows are used; there is no regularization and no hold-out set.

use nalgebra::{DMatrix, DVector};

use crate::domain::{CategoryTable, FitQuality, PointResidual, PolyModel};
use crate::error::PredictError;
use crate::math::{PolyBasis, solve_least_squares};
use crate::models::predict;

/// Best fit for a single table.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyFit {
    pub model: PolyModel,
    pub quality: FitQuality,
    /// One entry per table row, in table order.
    pub residuals: Vec<PointResidual>,
}

/// Fit a polynomial of the given degree to a category table.
pub fn fit_polynomial(table: &CategoryTable, degree: usize) -> Result<PolyFit, PredictError> {
    let xs = table.scores();
    let ys = table.percentiles();
    let n = xs.len();
    let p = degree + 1;

    if n < p {
        return Err(PredictError::invalid_table(
            table.name(),
            format!("{n} points cannot determine a degree-{degree} polynomial"),
        ));
    }

    let basis = PolyBasis::for_samples(xs, degree);
    let mut design = DMatrix::<f64>::zeros(n, p);
    let mut row = vec![0.0; p];
    for (i, &x) in xs.iter().enumerate() {
        basis.fill_row(x, &mut row);
        for (j, &v) in row.iter().enumerate() {
            design[(i, j)] = v;
        }
    }
    let target = DVector::from_column_slice(ys);

    let beta = solve_least_squares(&design, &target)
        .ok_or_else(|| PredictError::Fit(table.name().to_string()))?;

    let model = PolyModel {
        basis,
        coefficients: beta.iter().copied().collect(),
    };

    let residuals = compute_residuals(&model, table);
    let quality = fit_quality(&residuals, ys);
    if !quality.sse.is_finite() {
        return Err(PredictError::Fit(table.name().to_string()));
    }

    Ok(PolyFit {
        model,
        quality,
        residuals,
    })
}

fn compute_residuals(model: &PolyModel, table: &CategoryTable) -> Vec<PointResidual> {
    table
        .points()
        .map(|(score, observed)| {
            let fitted = predict(model, score);
            PointResidual {
                score,
                observed,
                fitted,
                residual: observed - fitted,
            }
        })
        .collect()
}

fn fit_quality(residuals: &[PointResidual], ys: &[f64]) -> FitQuality {
    let n = ys.len();
    let sse: f64 = residuals.iter().map(|r| r.residual * r.residual).sum();
    let mean = ys.iter().sum::<f64>() / n as f64;
    let sst: f64 = ys.iter().map(|y| (y - mean) * (y - mean)).sum();
    // A constant column is fitted exactly by the intercept.
    let r_squared = if sst > 0.0 { 1.0 - sse / sst } else { 1.0 };

    FitQuality {
        sse,
        rmse: (sse / n as f64).sqrt(),
        r_squared,
        n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn table(name: &str, xs: &[f64], ys: &[f64]) -> CategoryTable {
        CategoryTable::new(name, xs.to_vec(), ys.to_vec()).unwrap()
    }

    #[test]
    fn fit_recovers_exact_cubic() {
        // y = 1 - 2x + 0.5x^2 + 0.25x^3
        let f = |x: f64| 1.0 - 2.0 * x + 0.5 * x * x + 0.25 * x * x * x;
        let xs = [-3.0, -1.0, 0.0, 1.5, 2.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();

        let fit = fit_polynomial(&table("cubic", &xs, &ys), 3).unwrap();
        assert!(fit.quality.sse < 1e-16, "sse={}", fit.quality.sse);
        assert!((fit.quality.r_squared - 1.0).abs() < 1e-12);

        let power = crate::models::power_coefficients(&fit.model);
        for (got, want) in power.iter().zip([1.0, -2.0, 0.5, 0.25]) {
            assert!((got - want).abs() < 1e-9, "{power:?}");
        }
        assert!((predict(&fit.model, 10.0) - f(10.0)).abs() < 1e-8);
    }

    #[test]
    fn fit_interpolates_four_points() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [5.0, 1.0, 4.0, 2.0];
        let fit = fit_polynomial(&table("four", &xs, &ys), 3).unwrap();
        for r in &fit.residuals {
            assert!(r.residual.abs() < 1e-10, "{r:?}");
        }
    }

    #[test]
    fn fit_residuals_follow_table_order() {
        let xs = [200.0, 150.0, 100.0, 50.0, 0.0];
        let ys = [99.0, 95.0, 90.0, 70.0, 10.0];
        let fit = fit_polynomial(&table("order", &xs, &ys), 3).unwrap();
        let scores: Vec<f64> = fit.residuals.iter().map(|r| r.score).collect();
        assert_eq!(scores, xs.to_vec());
        assert_eq!(fit.quality.n, 5);
        assert!(fit.quality.rmse >= 0.0);
    }

    #[test]
    fn fit_rejects_degree_above_point_count() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 1.0, 4.0, 9.0];
        let err = fit_polynomial(&table("small", &xs, &ys), 4).unwrap_err();
        assert!(matches!(err, PredictError::InvalidTable { .. }));
    }

    #[test]
    fn fit_recovers_random_cubics() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..25 {
            let coeffs: Vec<f64> = (0..4).map(|_| rng.gen_range(-2.0..2.0)).collect();
            let f = |x: f64| coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c);

            let mut xs: Vec<f64> = Vec::new();
            while xs.len() < 11 {
                let x = (rng.gen_range(-50.0..50.0_f64) * 4.0).round() / 4.0;
                if !xs.contains(&x) {
                    xs.push(x);
                }
            }
            let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();

            let fit = fit_polynomial(&table("rand", &xs, &ys), 3).unwrap();
            for &x in &[-40.0, 0.0, 25.0] {
                let want = f(x);
                let got = predict(&fit.model, x);
                assert!(
                    (got - want).abs() <= 1e-6 * want.abs().max(1.0),
                    "x={x}: got {got}, want {want}"
                );
            }
        }
    }
}
