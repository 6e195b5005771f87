//! sdca_numerics — scalar kernels for dual coordinate ascent solvers.
//!
//! Purpose
//! -------
//! Collect the two pieces of floating-point machinery that entropy-style SDCA
//! losses keep reaching for: the principal-branch Lambert W of an
//! exponential, `W₀(exp(x))`, and plain versus Kahan-compensated summation
//! behind one strategy trait. Python gets the same kernels through the
//! `_sdca_numerics` extension module.
//!
//! Key behaviors
//! -------------
//! - [`special`] solves `w + ln(w) = x` in `f32` and `f64` and audits the
//!   result against its error bound.
//! - [`summation`] reduces sequences with a strategy picked statically
//!   (`S: Summation`) or from a configuration string (`SummationKind`).
//! - With `python-bindings`, this file adds the `#[pyfunction]`s, the
//!   `AccuracyReport` class and a module initializer that publishes
//!   `special` and `summation` as importable submodules.
//!
//! Invariants & assumptions
//! ------------------------
//! - The Python layer holds no numerics of its own: each binding parses its
//!   arguments, calls one Rust entry point and translates errors.
//! - Evaluation never fails, so Python callers only see exceptions for bad
//!   audit grids, unknown strategy names, or unconvertible input data.
//!
//! Conventions
//! -----------
//! - Binding names match the Rust names (`lambert_w_exp`, `kahan_add`, ...);
//!   the single-precision evaluator is exposed as `lambert_w_exp_f32`.
//! - `AuditError` and `SumError` surface in Python as `ValueError` with the
//!   Rust `Display` text.
//!
//! Downstream usage
//! ----------------
//! - Rust solvers import from [`special`] / [`summation`] (or their
//!   `prelude`s) and build without any optional feature.
//! - Cargo features: `fast-seed` selects the bit-level seed logarithm,
//!   `obs_slog` enables structured audit logging, `python-bindings` builds
//!   the extension module.
//!
//! Testing notes
//! -------------
//! - Kernels are tested next to their code; `tests/` checks the public
//!   surface end to end, including an entropy dual-loss consumer.
//! - The bindings are tested from Python.

pub mod special;
pub mod summation;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    special::{
        AccuracyReport, AuditOptions, AuditResult, FastSeed, OMEGA, StdSeed, lambert_w_exp,
    },
    summation::kahan_add as kahan_step,
    utils::{extract_summation_kind, extract_values},
};

/// Evaluate `W₀(exp(x))` in double precision.
///
/// Total: NaN maps to NaN, `+inf` to `+inf`, `-inf` to `0`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "lambert_w_exp", text_signature = "(x, /)")]
pub fn py_lambert_w_exp(x: f64) -> f64 {
    lambert_w_exp(x)
}

/// Evaluate `W₀(exp(x))` in single precision.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "lambert_w_exp_f32", text_signature = "(x, /)")]
pub fn py_lambert_w_exp_f32(x: f32) -> f32 {
    lambert_w_exp(x)
}

/// AccuracyReport — Python-facing view of a `W₀(exp(x))` grid audit.
///
/// Purpose
/// -------
/// Carry the outcome of [`AccuracyReport::scan`] to Python and expose its
/// fields as read-only properties.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `AccuracyReport(lo=-50.0, hi=50.0, samples=10001, precision="f64", seed="std")`
/// or the equivalent `special.audit(...)` function:
/// - `lo`, `hi`: `f64`
///   Finite grid endpoints with `lo < hi`.
/// - `samples`: `usize`
///   Number of grid points, between 2 and `AuditOptions::MAX_SAMPLES`
///   (10 000 000); larger requests raise `ValueError` before allocating.
/// - `precision`: `"f64"` or `"f32"`.
/// - `seed`: `"std"` or `"fast"`; selects the seed logarithm backend.
///
/// Fields
/// ------
/// - `inner`: [`AccuracyReport`]
///   Rust-side report used by the accessors.
///
/// Notes
/// -----
/// - Native Rust code should call [`AccuracyReport::scan`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "AccuracyReport", module = "sdca_numerics.special", frozen)]
pub struct PyAccuracyReport {
    inner: AccuracyReport,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyAccuracyReport {
    #[new]
    #[pyo3(
        text_signature = "(lo=-50.0, hi=50.0, samples=10001, precision='f64', seed='std')",
        signature = (lo = -50.0, hi = 50.0, samples = 10_001, precision = "f64", seed = "std")
    )]
    pub fn new(
        py: Python<'_>, lo: f64, hi: f64, samples: usize, precision: &str, seed: &str,
    ) -> PyResult<PyAccuracyReport> {
        let opts = AuditOptions::new(lo, hi, samples)?;
        let scan: fn(&AuditOptions) -> AuditResult<AccuracyReport> = match (precision, seed) {
            ("f64", "std") => AccuracyReport::scan::<f64, StdSeed>,
            ("f64", "fast") => AccuracyReport::scan::<f64, FastSeed>,
            ("f32", "std") => AccuracyReport::scan::<f32, StdSeed>,
            ("f32", "fast") => AccuracyReport::scan::<f32, FastSeed>,
            ("f64" | "f32", other) => {
                return Err(PyValueError::new_err(format!(
                    "seed must be 'std' or 'fast', got '{other}'"
                )));
            }
            (other, _) => {
                return Err(PyValueError::new_err(format!(
                    "precision must be 'f64' or 'f32', got '{other}'"
                )));
            }
        };
        let inner = py.allow_threads(|| scan(&opts))?;
        Ok(PyAccuracyReport { inner })
    }

    #[getter]
    pub fn precision(&self) -> &'static str {
        self.inner.precision
    }

    #[getter]
    pub fn seed(&self) -> &'static str {
        self.inner.seed
    }

    #[getter]
    pub fn samples(&self) -> usize {
        self.inner.samples
    }

    /// Number of grid points outside the residual bound.
    #[getter]
    pub fn violations(&self) -> usize {
        self.inner.violations
    }

    /// Largest `|residual| / tolerance` over grid points with a normal result.
    #[getter]
    pub fn worst_ratio(&self) -> f64 {
        self.inner.worst_ratio
    }

    #[getter]
    pub fn worst_x(&self) -> f64 {
        self.inner.worst_x
    }

    #[getter]
    pub fn monotone(&self) -> bool {
        self.inner.monotone
    }

    #[getter]
    pub fn non_negative(&self) -> bool {
        self.inner.non_negative
    }

    #[getter]
    pub fn passed(&self) -> bool {
        self.inner.passed()
    }

    fn __repr__(&self) -> String {
        format!(
            "AccuracyReport(precision='{}', seed='{}', samples={}, violations={}, worst_ratio={:.3})",
            self.inner.precision,
            self.inner.seed,
            self.inner.samples,
            self.inner.violations,
            self.inner.worst_ratio
        )
    }
}

/// Run a grid audit; same arguments as the `AccuracyReport` constructor.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (lo = -50.0, hi = 50.0, samples = 10_001, precision = "f64", seed = "std"))]
pub fn audit(
    py: Python<'_>, lo: f64, hi: f64, samples: usize, precision: &str, seed: &str,
) -> PyResult<PyAccuracyReport> {
    PyAccuracyReport::new(py, lo, hi, samples, precision, seed)
}

/// Sum a 1-D float sequence into an `f64` total.
///
/// Parameters
/// ----------
/// - `data`: array-like of `float64` or `float32`; `float32` arrays are
///   widened per element and accumulated in `f64`.
/// - `init`: starting value of the accumulator.
/// - `strategy`: `"kahan"` (default) or `"plain"`, aliases accepted.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "sum",
    text_signature = "(data, /, init=0.0, strategy='kahan')",
    signature = (data, init = 0.0, strategy = None)
)]
pub fn py_sum<'py>(data: &Bound<'py, PyAny>, init: f64, strategy: Option<&str>) -> PyResult<f64> {
    let kind = extract_summation_kind(strategy)?;
    let values = extract_values(data)?;
    Ok(values.reduce(kind, init))
}

/// One compensated step; returns the updated `(sum, compensation)` pair.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(value, sum, compensation, /)")]
pub fn kahan_add(value: f64, sum: f64, compensation: f64) -> (f64, f64) {
    let (mut sum, mut compensation) = (sum, compensation);
    kahan_step(value, &mut sum, &mut compensation);
    (sum, compensation)
}

/// _sdca_numerics — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_sdca_numerics` module and register its `special` and
/// `summation` submodules.
///
/// Key behaviors
/// -------------
/// - Create both submodules and attach them to the parent module.
/// - Publish them under `sdca_numerics.special` / `sdca_numerics.summation`
///   in `sys.modules`, since extension submodules are not packages.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating submodules or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _sdca_numerics<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let special_mod = PyModule::new(py, "special")?;
    let summation_mod = PyModule::new(py, "summation")?;
    special(m, &special_mod)?;
    summation(m, &summation_mod)?;

    // `import sdca_numerics.special` resolves through sys.modules only.
    let modules = py.import("sys")?.getattr("modules")?;
    modules.set_item("sdca_numerics.special", special_mod)?;
    modules.set_item("sdca_numerics.summation", summation_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn special<'py>(parent: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_lambert_w_exp, m)?)?;
    m.add_function(wrap_pyfunction!(py_lambert_w_exp_f32, m)?)?;
    m.add_function(wrap_pyfunction!(audit, m)?)?;
    m.add_class::<PyAccuracyReport>()?;
    m.add("OMEGA", OMEGA)?;
    parent.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn summation<'py>(parent: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_sum, m)?)?;
    m.add_function(wrap_pyfunction!(kahan_add, m)?)?;
    parent.add_submodule(m)?;
    Ok(())
}
