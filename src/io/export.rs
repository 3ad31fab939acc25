//! Export a prediction to JSON.
//!
//! The export is the portable form of one prediction:
//! - the request (category, score) and predicted percentile
//! - the fitted model, both in the normalized basis and as raw `x^k` coefficients
//! - fit diagnostics and the sampled curve

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CategoryTable, FitQuality, PolyModel, PredictionResult};
use crate::error::AppError;
use crate::fit::DetailedPrediction;
use crate::models::power_coefficients;

/// Schema of an exported prediction file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub label: String,
    pub result: PredictionResult,
    pub model: PolyModel,
    /// Coefficients of `x^0 … x^3`.
    pub power_coefficients: Vec<f64>,
    pub fit_quality: FitQuality,
}

impl PredictionFile {
    pub fn new(table: &CategoryTable, prediction: &DetailedPrediction) -> Self {
        Self {
            tool: "pctl".to_string(),
            generated_at: Utc::now(),
            label: table.label(),
            result: prediction.result.clone(),
            model: prediction.fit.model.clone(),
            power_coefficients: power_coefficients(&prediction.fit.model),
            fit_quality: prediction.fit.quality,
        }
    }
}

/// Write a prediction JSON file.
pub fn write_prediction_json(
    path: &Path,
    table: &CategoryTable,
    prediction: &DetailedPrediction,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create prediction JSON '{}': {e}", path.display()),
        )
    })?;

    serde_json::to_writer_pretty(file, &PredictionFile::new(table, prediction))
        .map_err(|e| AppError::new(2, format!("Failed to write prediction JSON: {e}")))?;

    tracing::info!(path = %path.display(), "prediction exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reference_dataset;
    use crate::fit::predict_detailed;

    #[test]
    fn export_writes_readable_json() {
        let ds = reference_dataset().unwrap();
        let table = ds.get("Feb_1_Shift_2").unwrap();
        let prediction = predict_detailed(table, 175.0, 20).unwrap();

        let path = std::env::temp_dir().join(format!("pctl_export_{}.json", std::process::id()));
        write_prediction_json(&path, table, &prediction).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let file: PredictionFile = serde_json::from_str(&text).unwrap();

        assert_eq!(file.tool, "pctl");
        assert_eq!(file.label, "Feb 1 Shift 2");
        assert_eq!(file.result.category, "Feb_1_Shift_2");
        assert!((file.result.percentile - prediction.result.percentile).abs() < 1e-9);
        assert_eq!(file.power_coefficients.len(), 4);
        assert_eq!(file.result.curve.len(), 20);
    }
}
