//! summation::errors — configuration errors for summation strategies.
//!
//! Summation itself never fails; the only error surface is parsing a
//! strategy name supplied by configuration or by Python callers.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type SumResult<T> = Result<T, SumError>;

/// SumError — invalid summation configuration.
///
/// Variants
/// --------
/// - `UnknownStrategy { name }`
///   The strategy name is not one of the accepted spellings of
///   [`SummationKind`](crate::summation::kind::SummationKind).
#[derive(Debug, Clone, PartialEq)]
pub enum SumError {
    UnknownStrategy { name: String },
}

impl std::error::Error for SumError {}

impl std::fmt::Display for SumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SumError::UnknownStrategy { name } => write!(
                f,
                "Invalid summation strategy '{name}': expected 'plain' or 'kahan'."
            ),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SumError> for PyErr {
    fn from(err: SumError) -> PyErr {
        PyValueError::new_err(format!("SumError: {err}"))
    }
}
