//! Shared request pipeline used by both the CLI and the web front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! dataset -> request intake (validation) -> fit + predict
//!
//! The CLI and the HTTP handlers can then focus on presentation.

use crate::data::reference_dataset;
use crate::domain::{AppConfig, Dataset, PredictionRequest, PredictionResult, ScoreBounds};
use crate::error::{AppError, PredictError};
use crate::fit::{DetailedPrediction, compare, predict_detailed};
use crate::io::read_dataset_json;

/// Build the process-wide dataset: a JSON file if configured, else the
/// built-in reference table. Every table is validated here.
pub fn load_dataset(config: &AppConfig) -> Result<Dataset, AppError> {
    let dataset = match &config.dataset {
        Some(path) => read_dataset_json(path)?,
        None => reference_dataset()?,
    };
    let source = config
        .dataset
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());
    tracing::info!(%source, categories = dataset.len(), "dataset loaded");
    Ok(dataset)
}

/// Parse a user-supplied score.
pub fn parse_score(raw: &str) -> Result<f64, PredictError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PredictError::invalid_input("Please enter your marks."));
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(PredictError::invalid_input(format!(
            "Marks must be a number, got '{raw}'."
        ))),
    }
}

/// Validate an already-typed request against the dataset and score bounds.
pub fn build_request(
    dataset: &Dataset,
    bounds: &ScoreBounds,
    category: &str,
    score: f64,
) -> Result<PredictionRequest, PredictError> {
    let category = check_category(dataset, category)?;
    check_bounds(bounds, score)?;
    Ok(PredictionRequest {
        category: category.to_string(),
        score,
    })
}

/// Validate raw form/query input into a [`PredictionRequest`].
///
/// The category is checked first, then the score is parsed and range-checked.
pub fn intake(
    dataset: &Dataset,
    bounds: &ScoreBounds,
    category: &str,
    score: &str,
) -> Result<PredictionRequest, PredictError> {
    let category = check_category(dataset, category)?;
    let score = parse_score(score)?;
    check_bounds(bounds, score)?;
    Ok(PredictionRequest {
        category: category.to_string(),
        score,
    })
}

/// Fit and predict for a validated request.
pub fn run_prediction(
    dataset: &Dataset,
    request: &PredictionRequest,
    curve_resolution: usize,
) -> Result<DetailedPrediction, PredictError> {
    let table = dataset.get(&request.category)?;
    predict_detailed(table, request.score, curve_resolution)
}

/// Predict one score against every category.
pub fn run_compare(
    dataset: &Dataset,
    bounds: &ScoreBounds,
    score: f64,
    curve_resolution: usize,
) -> Result<Vec<PredictionResult>, PredictError> {
    check_bounds(bounds, score)?;
    compare(dataset, score, curve_resolution)
}

fn check_category<'a>(dataset: &Dataset, category: &'a str) -> Result<&'a str, PredictError> {
    let category = category.trim();
    if !dataset.contains(category) {
        return Err(PredictError::UnknownCategory(category.to_string()));
    }
    Ok(category)
}

fn check_bounds(bounds: &ScoreBounds, score: f64) -> Result<(), PredictError> {
    if !score.is_finite() {
        return Err(PredictError::invalid_input("Marks must be a finite number."));
    }
    if !bounds.contains(score) {
        return Err(PredictError::invalid_input(format!(
            "Marks must be between {} and {}, got {score}.",
            bounds.min, bounds.max
        )));
    }
    Ok(())
}
