//! special::errors — validation errors for accuracy audits.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for configuring an
//! [`AccuracyReport`](crate::special::accuracy::AccuracyReport) scan. The
//! evaluator itself is total and never produces these; they only arise
//! from malformed [`AuditOptions`](crate::special::accuracy::AuditOptions).
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of the violated constraint.
//! - With the `python-bindings` feature, every variant maps to
//!   `ValueError` with the `Display` message preserved.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type AuditResult<T> = Result<T, AuditError>;

/// AuditError — invalid configuration for an accuracy audit.
///
/// Variants
/// --------
/// - `NonFiniteBound(value)`
///   A grid endpoint is NaN or ±∞.
/// - `EmptyRange { lo, hi }`
///   The grid endpoints do not satisfy `lo < hi`.
/// - `TooFewSamples(samples)`
///   Fewer than two grid points were requested.
/// - `TooManySamples { samples, max }`
///   The grid would exceed the materialization limit `max`.
/// - `Unrepresentable(value)`
///   A grid point does not fit in the audited precision (e.g. `1e300`
///   for `f32`).
#[derive(Debug, Clone, PartialEq)]
pub enum AuditError {
    NonFiniteBound(f64),
    EmptyRange { lo: f64, hi: f64 },
    TooFewSamples(usize),
    TooManySamples { samples: usize, max: usize },
    Unrepresentable(f64),
}

impl std::error::Error for AuditError {}

impl std::fmt::Display for AuditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditError::NonFiniteBound(value) => {
                write!(f, "Invalid grid bound: {value}. Must be a finite number.")
            }
            AuditError::EmptyRange { lo, hi } => {
                write!(f, "Invalid grid range [{lo}, {hi}]. Must satisfy lo < hi.")
            }
            AuditError::TooFewSamples(samples) => {
                write!(f, "Invalid sample count: {samples}. Must be at least 2.")
            }
            AuditError::TooManySamples { samples, max } => {
                write!(f, "Invalid sample count: {samples}. Must be at most {max}.")
            }
            AuditError::Unrepresentable(value) => {
                write!(f, "Grid point {value} is not representable in the audited precision.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<AuditError> for PyErr {
    fn from(err: AuditError) -> PyErr {
        PyValueError::new_err(format!("AuditError: {err}"))
    }
}
