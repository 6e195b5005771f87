//! special — the principal-branch Lambert W of an exponential, `W₀(exp(x))`.
//!
//! Purpose
//! -------
//! Provide a total, allocation-free evaluator of `W₀(exp(x))` for `f32` and
//! `f64` with a provable residual bound, plus the kernels and diagnostics
//! it is built from. Entropy-regularized proximal steps and dual-loss
//! computations in SDCA solvers reduce to solving `w + ln(w) = x`, so this is
//! the transcendental they lean on.
//!
//! Key behaviors
//! -------------
//! - [`lambert_w_exp`] / [`lambert_w_exp_with`]: piecewise seed selection
//!   per precision followed by fifth-order Householder refinement and one
//!   exact-`exp` correction.
//! - [`householder_step`] and [`exp_approx`]: the shared generic kernels.
//! - [`SeedMath`] with [`StdSeed`] and [`FastSeed`]: the seed logarithm,
//!   chosen at build time through [`DefaultSeed`] (`fast-seed` feature).
//! - [`accuracy`]: the error contract as predicates plus grid audits.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every input produces a result; there is no error path in evaluation.
//! - Results are non-negative and satisfy
//!   `|w + ln(w) − x| < 4·eps·max(1, |x|)` wherever `exp(x)` is normal.
//! - Results are non-decreasing in `x` up to rounding: neighboring inputs can
//!   step down by a few ulps, bounded by [`monotone_slack`].
//! - Interval boundaries are literal per-precision constants on
//!   [`LambertFloat`]; they are tuned crossover points, not derived values.
//!
//! Conventions
//! -----------
//! - Evaluation code is pure: no logging, no I/O, no global state, and safe
//!   to call from any number of threads.
//! - Errors ([`AuditError`]) exist only for audit configuration.
//!
//! Downstream usage
//! ----------------
//! - Solvers call [`lambert_w_exp`] directly inside their inner loops; the
//!   precision is inferred from the argument type.
//! - Test suites and diagnostics use [`satisfies_bound`] and
//!   [`AccuracyReport::scan`] rather than re-deriving the tolerance.
//!
//! Testing notes
//! -------------
//! - [`householder`] tests the contraction rate and `exp_approx` envelope.
//! - [`seed`] tests the fast logarithm against an `f64` reference.
//! - [`lambert`] tests known values, dense-grid residuals per backend,
//!   continuity across every interval boundary, and non-finite inputs.
//! - [`accuracy`] tests the predicates, option validation and full scans.

pub mod accuracy;
pub mod errors;
pub mod householder;
pub mod lambert;
pub mod seed;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::accuracy::{
    AccuracyReport, AuditOptions, monotone_slack, residual, satisfies_bound, tolerance,
};
pub use self::errors::{AuditError, AuditResult};
pub use self::householder::{exp_approx, householder_step};
pub use self::lambert::{LambertFloat, OMEGA, lambert_w_exp, lambert_w_exp_with};
pub use self::seed::{DefaultSeed, FastSeed, SeedMath, StdSeed};

#[cfg(feature = "obs_slog")]
pub use self::accuracy::term_logger;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use sdca_numerics::special::prelude::*;
//
// to import the evaluator surface in a single line.

pub mod prelude {
    pub use super::lambert::{LambertFloat, OMEGA, lambert_w_exp};
}
