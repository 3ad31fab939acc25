//! Chart rendering for predictions.
//!
//! Both renderers draw the same picture:
//! - the table's observed `(marks, percentile)` points
//! - the fitted curve
//! - a vertical reference line at the query marks
//! - a horizontal reference line at the predicted percentile
//!
//! [`ChartData`] holds the series and axis bounds so that the renderers stay
//! focused on drawing.

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;

use crate::domain::{CategoryTable, PredictionResult};

/// Render-ready series and bounds for one prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub points: Vec<(f64, f64)>,
    pub curve: Vec<(f64, f64)>,
    pub query_score: f64,
    pub predicted: f64,
    /// X bounds (marks), padded and widened to include the query.
    pub x_bounds: [f64; 2],
    /// Y bounds (percentile), padded and widened to include the prediction.
    pub y_bounds: [f64; 2],
}

impl ChartData {
    pub fn new(table: &CategoryTable, result: &PredictionResult) -> Self {
        let points: Vec<(f64, f64)> = table.points().collect();
        let curve: Vec<(f64, f64)> = result
            .curve
            .iter()
            .map(|p| (p.score, p.percentile))
            .collect();

        let (lo, hi) = table.score_range();
        let x_bounds = pad_range(lo.min(result.query_score), hi.max(result.query_score), 0.05, 1.0);

        let mut y_lo = result.percentile;
        let mut y_hi = result.percentile;
        for &(_, y) in points.iter().chain(curve.iter()) {
            y_lo = y_lo.min(y);
            y_hi = y_hi.max(y);
        }
        let y_bounds = pad_range(y_lo, y_hi, 0.05, 0.5);

        Self {
            title: format!("Shift: {}", table.label()),
            points,
            curve,
            query_score: result.query_score,
            predicted: result.percentile,
            x_bounds,
            y_bounds,
        }
    }
}

fn pad_range(min: f64, max: f64, frac: f64, min_pad: f64) -> [f64; 2] {
    let span = (max - min).abs();
    let pad = (span * frac).max(min_pad);
    [min - pad, max + pad]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reference_dataset;
    use crate::fit::predict;

    #[test]
    fn bounds_include_query_and_prediction() {
        let ds = reference_dataset().unwrap();
        let table = ds.get("Jan_30_Shift_2").unwrap();
        let result = predict(table, 300.0, 50).unwrap();
        let chart = ChartData::new(table, &result);

        assert_eq!(chart.title, "Shift: Jan 30 Shift 2");
        assert_eq!(chart.points.len(), 11);
        assert_eq!(chart.curve.len(), 50);
        assert!(chart.x_bounds[0] < 100.0 && chart.x_bounds[1] > 300.0);
        assert!(chart.y_bounds[1] > result.percentile);
        assert!(chart.y_bounds[0] < 88.0);
    }
}
