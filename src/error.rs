//! Error types raised by the Hückel engine

use thiserror::Error;

/// Failures surfaced by detection, diagonalization and structure handling.
///
/// None of these are recovered from inside the engine; they propagate to
/// the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HuckelError {
    #[error("no π system detected")]
    NoConjugatedSystem,

    #[error("diagonalization failed: {reason}")]
    DiagonalizationFailure { reason: String },

    #[error("no structure editor attached to the calculator")]
    MissingEditorState,

    #[error("invalid structure: {0}")]
    InvalidStructure(String),

    #[error("charge {charge:+} cannot be applied to {electrons} π electrons")]
    InvalidCharge { charge: i32, electrons: i32 },
}

impl HuckelError {
    pub(crate) fn diagonalization(reason: impl Into<String>) -> Self {
        HuckelError::DiagonalizationFailure {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HuckelError>;
