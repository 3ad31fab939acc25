//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - returned as JSON from the HTTP API
//! - exported to prediction files

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PredictError;
use crate::math::PolyBasis;

/// Degree of the polynomial fitted to every category.
pub const CUBIC_DEGREE: usize = 3;

/// Number of samples in a predicted curve unless configured otherwise.
pub const DEFAULT_CURVE_RESOLUTION: usize = 100;

/// Largest accepted curve resolution.
pub const MAX_CURVE_RESOLUTION: usize = 10_000;

/// Score pre-filled in the form before the first submission.
pub const DEFAULT_SCORE: f64 = 150.0;

/// One historical category: a named list of `(score, percentile)` pairs.
///
/// Constructed only through [`CategoryTable::new`], which enforces:
/// - equal-length score/percentile columns
/// - at least `CUBIC_DEGREE + 1` entries
/// - finite values
/// - unique scores
///
/// Entry order is preserved but carries no meaning beyond pairing by index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTable {
    name: String,
    scores: Vec<f64>,
    percentiles: Vec<f64>,
}

impl CategoryTable {
    pub fn new(
        name: impl Into<String>,
        scores: Vec<f64>,
        percentiles: Vec<f64>,
    ) -> Result<Self, PredictError> {
        let name: String = name.into();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(PredictError::invalid_table(name, "category name is empty"));
        }
        if scores.len() != percentiles.len() {
            return Err(PredictError::invalid_table(
                name,
                format!(
                    "{} scores but {} percentiles",
                    scores.len(),
                    percentiles.len()
                ),
            ));
        }
        if let Some(i) = scores
            .iter()
            .zip(percentiles.iter())
            .position(|(s, p)| !(s.is_finite() && p.is_finite()))
        {
            return Err(PredictError::invalid_table(
                name,
                format!("non-finite value at row {i}"),
            ));
        }

        let mut sorted = scores.clone();
        sorted.sort_by(f64::total_cmp);
        if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
            return Err(PredictError::invalid_table(
                name,
                format!("duplicate score {}", pair[0]),
            ));
        }

        let min_points = CUBIC_DEGREE + 1;
        if scores.len() < min_points {
            return Err(PredictError::invalid_table(
                name,
                format!(
                    "{} distinct scores; a degree-{CUBIC_DEGREE} fit needs at least {min_points}",
                    scores.len()
                ),
            ));
        }

        Ok(Self {
            name,
            scores,
            percentiles,
        })
    }

    /// Category identifier (e.g. `Jan_27_Shift_1`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable label (`Jan 27 Shift 1`).
    pub fn label(&self) -> String {
        self.name.replace('_', " ")
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn percentiles(&self) -> &[f64] {
        &self.percentiles
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// `(score, percentile)` pairs in table order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.scores.iter().copied().zip(self.percentiles.iter().copied())
    }

    /// Observed `(min, max)` score.
    pub fn score_range(&self) -> (f64, f64) {
        self.scores
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
                (lo.min(s), hi.max(s))
            })
    }
}

/// All categories known to the process.
///
/// Built once at startup and shared read-only afterwards. Iteration follows
/// declaration order.
#[derive(Debug, Clone)]
pub struct Dataset {
    tables: Vec<CategoryTable>,
    index: HashMap<String, usize>,
}

impl Dataset {
    pub fn from_tables(tables: Vec<CategoryTable>) -> Result<Self, PredictError> {
        if tables.is_empty() {
            return Err(PredictError::invalid_table("<dataset>", "no categories"));
        }
        let mut index = HashMap::with_capacity(tables.len());
        for (i, table) in tables.iter().enumerate() {
            if index.insert(table.name().to_string(), i).is_some() {
                return Err(PredictError::invalid_table(
                    table.name(),
                    "category declared more than once",
                ));
            }
        }
        Ok(Self { tables, index })
    }

    /// Look up a category by identifier.
    pub fn get(&self, name: &str) -> Result<&CategoryTable, PredictError> {
        self.index
            .get(name)
            .map(|&i| &self.tables[i])
            .ok_or_else(|| PredictError::UnknownCategory(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn tables(&self) -> &[CategoryTable] {
        &self.tables
    }

    /// The first declared category (the form's initial selection).
    pub fn default_category(&self) -> &CategoryTable {
        &self.tables[0]
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Inclusive range of scores accepted from users.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ScoreBounds {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 300.0,
        }
    }
}

impl ScoreBounds {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }
}

/// A validated prediction request.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub category: String,
    pub score: f64,
}

/// One sample of a fitted curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub score: f64,
    pub percentile: f64,
}

/// Outcome of a single prediction.
///
/// `percentile` is the raw polynomial value and is never clamped; the two flags
/// tell consumers when it should be read as an extrapolated estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub category: String,
    pub query_score: f64,
    pub percentile: f64,
    /// The query score lies outside the table's observed score range.
    pub extrapolated: bool,
    /// The predicted value lies outside `[0, 100]`.
    pub out_of_percentile_range: bool,
    pub curve: Vec<CurvePoint>,
}

/// A fitted polynomial in the normalized basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyModel {
    pub basis: PolyBasis,
    /// Coefficients on `[1, u, u², …]`.
    pub coefficients: Vec<f64>,
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub r_squared: f64,
    pub n: usize,
}

/// Fitted vs. observed percentile at one table entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointResidual {
    pub score: f64,
    pub observed: f64,
    pub fitted: f64,
    pub residual: f64,
}

/// A full run's configuration as understood by the app layer.
///
/// Derived from CLI flags and environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Optional JSON dataset replacing the built-in reference table.
    pub dataset: Option<PathBuf>,
    pub bounds: ScoreBounds,
    pub curve_resolution: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            bounds: ScoreBounds::default(),
            curve_resolution: DEFAULT_CURVE_RESOLUTION,
        }
    }
}
