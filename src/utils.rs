//! Python-boundary helpers: turning Python objects into summable data and
//! validated configuration.
#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::summation::{SumError, SummationKind};

/// Borrowed or owned view of a 1-D sequence of floats coming from Python.
///
/// Contiguous `float64` and `float32` NumPy arrays are borrowed without a
/// copy; anything else that extracts as a sequence of floats is copied
/// once into a `Vec<f64>`.
#[cfg(feature = "python-bindings")]
pub enum PyValues<'py> {
    F64(PyReadonlyArray1<'py, f64>),
    F32(PyReadonlyArray1<'py, f32>),
    Owned(Vec<f64>),
}

#[cfg(feature = "python-bindings")]
impl PyValues<'_> {
    /// Reduce into an `f64` total with the selected strategy. `float32`
    /// input is widened element by element, never summed in `f32`.
    pub fn reduce(&self, kind: SummationKind, init: f64) -> f64 {
        match self {
            PyValues::F64(arr) => match arr.as_slice() {
                Ok(slice) => kind.reduce(slice.iter().copied(), init),
                Err(_) => kind.reduce(arr.as_array().iter().copied(), init),
            },
            PyValues::F32(arr) => match arr.as_slice() {
                Ok(slice) => kind.reduce(slice.iter().copied(), init),
                Err(_) => kind.reduce(arr.as_array().iter().copied(), init),
            },
            PyValues::Owned(values) => kind.reduce(values.iter().copied(), init),
        }
    }
}

/// Extract a 1-D float sequence (NumPy array, pandas Series, or any
/// sequence of numbers).
#[cfg(feature = "python-bindings")]
pub fn extract_values<'py>(raw: &Bound<'py, PyAny>) -> PyResult<PyValues<'py>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray1<f64>>() {
        return Ok(PyValues::F64(arr));
    }
    if let Ok(arr) = raw.extract::<PyReadonlyArray1<f32>>() {
        return Ok(PyValues::F32(arr));
    }
    if let Ok(obj) = raw.call_method0("to_numpy") {
        if let Ok(arr) = obj.extract::<PyReadonlyArray1<f64>>() {
            return Ok(PyValues::F64(arr));
        }
    }

    let values: Vec<f64> = raw.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of floats")
    })?;
    Ok(PyValues::Owned(values))
}

/// Parse an optional strategy name; `None` selects the default (Kahan).
#[cfg(feature = "python-bindings")]
pub fn extract_summation_kind(name: Option<&str>) -> Result<SummationKind, SumError> {
    name.map_or(Ok(SummationKind::default()), str::parse)
}
