//! Dataset JSON files.
//!
//! A dataset file replaces the built-in reference table:
//!
//! ```json
//! {
//!   "categories": [
//!     { "name": "Jan_27_Shift_1", "scores": [200, 190, ...], "percentiles": [99.5, 99.0, ...] }
//!   ]
//! }
//! ```
//!
//! Every table is validated on load with the same rules as the built-in data,
//! so a malformed file fails at startup rather than on the first request.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryTable, Dataset};
use crate::error::{AppError, PredictError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetFile {
    pub categories: Vec<CategoryRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub name: String,
    pub scores: Vec<f64>,
    pub percentiles: Vec<f64>,
}

impl DatasetFile {
    /// Validate the records and build an immutable [`Dataset`].
    pub fn into_dataset(self) -> Result<Dataset, PredictError> {
        let tables = self
            .categories
            .into_iter()
            .map(|r| CategoryTable::new(r.name, r.scores, r.percentiles))
            .collect::<Result<Vec<_>, _>>()?;
        Dataset::from_tables(tables)
    }
}

/// Parse and validate a dataset from JSON text.
pub fn dataset_from_json(text: &str) -> Result<Dataset, AppError> {
    let file: DatasetFile = serde_json::from_str(text)
        .map_err(|e| AppError::new(2, format!("Invalid dataset JSON: {e}")))?;
    Ok(file.into_dataset()?)
}

/// Read and validate a dataset JSON file.
pub fn read_dataset_json(path: &Path) -> Result<Dataset, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open dataset JSON '{}': {e}", path.display()),
        )
    })?;
    let parsed: DatasetFile = serde_json::from_reader(file).map_err(|e| {
        AppError::new(
            2,
            format!("Invalid dataset JSON '{}': {e}", path.display()),
        )
    })?;
    Ok(parsed.into_dataset()?)
}
