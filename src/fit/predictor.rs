//! Percentile prediction on top of the polynomial fitter.
//!
//! `predict` is a pure function of `(table, query score, resolution)`: it fits
//! the cubic, evaluates it at the query score and samples the curve across the
//! table's observed score range for plotting. Nothing is cached; callers that
//! need the same prediction twice simply compute it twice.

use rayon::prelude::*;

use crate::domain::{
    CUBIC_DEGREE, CategoryTable, Dataset, MAX_CURVE_RESOLUTION, PredictionResult,
};
use crate::error::PredictError;
use crate::fit::fitter::{PolyFit, fit_polynomial};
use crate::models::{predict as evaluate, sample_curve};

/// A prediction together with the fit that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedPrediction {
    pub result: PredictionResult,
    pub fit: PolyFit,
}

/// Predict the percentile for `query_score` from a category table.
///
/// The returned curve holds `curve_resolution` samples from the lowest to the
/// highest table score; it is not widened to include the query score.
pub fn predict(
    table: &CategoryTable,
    query_score: f64,
    curve_resolution: usize,
) -> Result<PredictionResult, PredictError> {
    predict_detailed(table, query_score, curve_resolution).map(|d| d.result)
}

/// Like [`predict`], but also returns the fitted model and its diagnostics.
pub fn predict_detailed(
    table: &CategoryTable,
    query_score: f64,
    curve_resolution: usize,
) -> Result<DetailedPrediction, PredictError> {
    if !query_score.is_finite() {
        return Err(PredictError::invalid_input(format!(
            "Score must be a finite number, got {query_score}."
        )));
    }
    if !(2..=MAX_CURVE_RESOLUTION).contains(&curve_resolution) {
        return Err(PredictError::invalid_input(format!(
            "Curve resolution must be between 2 and {MAX_CURVE_RESOLUTION}, got {curve_resolution}."
        )));
    }

    let fit = fit_polynomial(table, CUBIC_DEGREE)?;
    let percentile = evaluate(&fit.model, query_score);
    if !percentile.is_finite() {
        return Err(PredictError::Fit(table.name().to_string()));
    }

    let (lo, hi) = table.score_range();
    let curve = sample_curve(&fit.model, lo, hi, curve_resolution);

    let result = PredictionResult {
        category: table.name().to_string(),
        query_score,
        percentile,
        extrapolated: query_score < lo || query_score > hi,
        out_of_percentile_range: !(0.0..=100.0).contains(&percentile),
        curve,
    };

    tracing::debug!(
        category = table.name(),
        score = query_score,
        percentile,
        rmse = fit.quality.rmse,
        extrapolated = result.extrapolated,
        "prediction computed"
    );

    Ok(DetailedPrediction { result, fit })
}

/// Predict `query_score` against every category in the dataset.
///
/// Categories are fitted independently on the rayon pool; results keep the
/// dataset's declaration order.
pub fn compare(
    dataset: &Dataset,
    query_score: f64,
    curve_resolution: usize,
) -> Result<Vec<PredictionResult>, PredictError> {
    dataset
        .tables()
        .par_iter()
        .map(|table| predict(table, query_score, curve_resolution))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reference_dataset;

    fn sample_table() -> CategoryTable {
        CategoryTable::new(
            "Jan_27_Shift_1",
            vec![
                200.0, 190.0, 180.0, 170.0, 160.0, 150.0, 140.0, 130.0, 120.0, 110.0, 100.0,
            ],
            vec![
                99.50, 99.00, 98.00, 97.00, 96.00, 95.00, 94.00, 93.00, 92.00, 91.00, 90.00,
            ],
        )
        .unwrap()
    }

    #[test]
    fn predicts_training_point_closely() {
        let r = predict(&sample_table(), 150.0, 100).unwrap();
        assert_eq!(r.category, "Jan_27_Shift_1");
        assert_eq!(r.query_score, 150.0);
        assert!((r.percentile - 95.0).abs() < 0.1, "got {}", r.percentile);
        assert!(!r.extrapolated);
        assert!(!r.out_of_percentile_range);
    }

    #[test]
    fn prediction_is_deterministic() {
        let t = sample_table();
        let a = predict(&t, 163.0, 100).unwrap();
        let b = predict(&t, 163.0, 100).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn curve_spans_observed_range_only() {
        let r = predict(&sample_table(), 250.0, 100).unwrap();
        assert_eq!(r.curve.len(), 100);
        assert!((r.curve[0].score - 100.0).abs() < 1e-12);
        assert!((r.curve[99].score - 200.0).abs() < 1e-12);
        assert!(r.extrapolated);

        let short = predict(&sample_table(), 150.0, 7).unwrap();
        assert_eq!(short.curve.len(), 7);
    }

    #[test]
    fn curve_is_monotone_where_data_is() {
        let r = predict(&sample_table(), 150.0, 100).unwrap();
        assert!(
            r.curve
                .windows(2)
                .all(|w| w[1].percentile > w[0].percentile)
        );
    }

    #[test]
    fn residuals_stay_small_on_reference_data() {
        let ds = reference_dataset().unwrap();
        for table in ds.tables() {
            let d = predict_detailed(table, 150.0, 100).unwrap();
            for r in &d.fit.residuals {
                assert!(
                    r.residual.abs() < 0.25,
                    "{}: residual {} at {}",
                    table.name(),
                    r.residual,
                    r.score
                );
            }
            assert!(d.fit.quality.r_squared > 0.99);
        }
    }

    #[test]
    fn extrapolation_is_not_clamped() {
        let ds = reference_dataset().unwrap();
        let table = ds.get("Jan_30_Shift_2").unwrap();
        let r = predict(table, 300.0, 100).unwrap();
        assert!(r.percentile > 100.0, "got {}", r.percentile);
        assert!(r.out_of_percentile_range);
        assert!(r.extrapolated);
    }

    #[test]
    fn rejects_bad_query_and_resolution() {
        let t = sample_table();
        assert!(matches!(
            predict(&t, f64::NAN, 100),
            Err(PredictError::InvalidInput(_))
        ));
        assert!(matches!(
            predict(&t, 150.0, 1),
            Err(PredictError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_oversized_resolution() {
        let t = sample_table();
        for res in [MAX_CURVE_RESOLUTION + 1, 1_000_000_000, usize::MAX] {
            assert!(
                matches!(predict(&t, 150.0, res), Err(PredictError::InvalidInput(_))),
                "{res}"
            );
        }
        assert_eq!(
            predict(&t, 150.0, MAX_CURVE_RESOLUTION).unwrap().curve.len(),
            MAX_CURVE_RESOLUTION
        );
    }

    #[test]
    fn compare_covers_every_category_in_order() {
        let ds = reference_dataset().unwrap();
        let results = compare(&ds, 150.0, 10).unwrap();
        assert_eq!(results.len(), ds.len());
        for (r, t) in results.iter().zip(ds.tables()) {
            assert_eq!(r.category, t.name());
            assert!(r.percentile > 90.0 && r.percentile < 97.0, "{r:?}");
        }
    }
}
