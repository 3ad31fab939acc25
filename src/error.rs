//! Error types.
//!
//! Two layers:
//!
//! - [`PredictError`] is the taxonomy of the prediction core (unknown category,
//!   invalid user input, malformed tables, solver failures).
//! - [`AppError`] is the process-level error carried up to `main`, with the exit
//!   code the binary should terminate with.

use thiserror::Error;

/// Failures of the prediction core and its request intake.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// The requested category is not part of the dataset.
    #[error("Unknown category '{0}'.")]
    UnknownCategory(String),

    /// User-supplied input could not be accepted (unparseable or out of range).
    #[error("{0}")]
    InvalidInput(String),

    /// A category table violates the dataset invariants.
    ///
    /// This is a data/configuration defect rather than a user error.
    #[error("Invalid table '{category}': {reason}")]
    InvalidTable { category: String, reason: String },

    /// The least-squares solve did not produce a finite solution.
    #[error("Curve fit failed for '{0}'.")]
    Fit(String),
}

impl PredictError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        PredictError::InvalidInput(message.into())
    }

    pub fn invalid_table(category: impl Into<String>, reason: impl Into<String>) -> Self {
        PredictError::InvalidTable {
            category: category.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the caller (as opposed to data or numerics).
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PredictError::UnknownCategory(_) | PredictError::InvalidInput(_)
        )
    }

    /// Exit code used when the error terminates the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            PredictError::InvalidInput(_) | PredictError::InvalidTable { .. } => 2,
            PredictError::UnknownCategory(_) => 3,
            PredictError::Fit(_) => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
