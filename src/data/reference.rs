//! JEE Main 2024 shift-wise reference table.
//!
//! Every shift shares the same marks axis; each column lists the percentile
//! observed at those marks. Shifts are declared in calendar order, which is
//! also the order the web form lists them in.

use crate::domain::{CategoryTable, Dataset};
use crate::error::PredictError;

/// Marks axis shared by all shifts (descending).
pub const REFERENCE_MARKS: [f64; 11] = [
    200.0, 190.0, 180.0, 170.0, 160.0, 150.0, 140.0, 130.0, 120.0, 110.0, 100.0,
];

/// Percentile columns keyed by shift, aligned with [`REFERENCE_MARKS`].
pub const REFERENCE_SHIFTS: [(&str, [f64; 11]); 18] = [
    ("Jan_27_Shift_1", [99.50, 99.00, 98.00, 97.00, 96.00, 95.00, 94.00, 93.00, 92.00, 91.00, 90.00]),
    ("Jan_27_Shift_2", [99.40, 98.80, 97.90, 96.90, 96.00, 94.80, 93.90, 92.80, 91.90, 91.00, 89.80]),
    ("Jan_29_Shift_1", [99.45, 99.00, 98.10, 97.20, 96.10, 95.00, 94.10, 93.00, 92.00, 91.00, 90.00]),
    ("Jan_29_Shift_2", [99.50, 98.90, 98.00, 97.00, 95.90, 94.70, 93.80, 92.90, 91.80, 90.90, 89.70]),
    ("Jan_30_Shift_1", [99.48, 98.95, 97.90, 96.80, 95.70, 94.60, 93.50, 92.30, 91.20, 90.00, 89.00]),
    ("Jan_30_Shift_2", [98.90, 97.80, 96.70, 95.60, 94.50, 93.40, 92.30, 91.20, 90.10, 89.00, 88.00]),
    ("Jan_31_Shift_1", [98.80, 97.70, 96.60, 95.50, 94.40, 93.30, 92.20, 91.10, 90.00, 88.90, 87.80]),
    ("Jan_31_Shift_2", [99.00, 98.00, 96.90, 95.80, 94.70, 93.60, 92.50, 91.40, 90.30, 89.20, 88.10]),
    ("Feb_1_Shift_1", [99.40, 98.80, 97.70, 96.60, 95.50, 94.40, 93.30, 92.20, 91.10, 90.00, 89.00]),
    ("Feb_1_Shift_2", [99.30, 98.70, 97.60, 96.50, 95.40, 94.30, 93.20, 92.10, 91.00, 90.00, 88.90]),
    ("Apr_4_Shift_1", [99.50, 99.00, 98.00, 97.00, 96.00, 95.00, 94.00, 93.00, 92.00, 91.00, 90.00]),
    ("Apr_4_Shift_2", [99.40, 98.90, 98.00, 97.00, 96.00, 95.00, 94.00, 93.00, 92.00, 91.00, 90.00]),
    ("Apr_5_Shift_1", [99.45, 99.00, 98.10, 97.20, 96.30, 95.40, 94.50, 93.60, 92.70, 91.80, 90.90]),
    ("Apr_5_Shift_2", [99.38, 98.85, 97.90, 96.95, 96.00, 95.05, 94.10, 93.15, 92.20, 91.25, 90.30]),
    ("Apr_6_Shift_1", [99.42, 98.90, 97.85, 96.80, 95.75, 94.70, 93.65, 92.60, 91.55, 90.50, 89.45]),
    ("Apr_6_Shift_2", [99.35, 98.80, 97.75, 96.70, 95.65, 94.60, 93.55, 92.50, 91.45, 90.40, 89.35]),
    ("Apr_8_Shift_1", [99.40, 98.85, 97.80, 96.75, 95.70, 94.65, 93.60, 92.55, 91.50, 90.45, 89.40]),
    ("Apr_8_Shift_2", [99.30, 98.75, 97.70, 96.65, 95.60, 94.55, 93.50, 92.45, 91.40, 90.35, 89.30]),
];

/// Build the built-in dataset, validating every table.
pub fn reference_dataset() -> Result<Dataset, PredictError> {
    let tables = REFERENCE_SHIFTS
        .iter()
        .map(|(name, percentiles)| {
            CategoryTable::new(*name, REFERENCE_MARKS.to_vec(), percentiles.to_vec())
        })
        .collect::<Result<Vec<_>, _>>()?;
    Dataset::from_tables(tables)
}
