//! special::accuracy — checking `W₀(exp(x))` against its error contract.
//!
//! Purpose
//! -------
//! Express the evaluator's accuracy guarantee as reusable predicates and
//! provide a grid scan that summarizes how close a precision/backend pair
//! comes to violating it. Used by the unit and integration tests and
//! exposed to Python as a diagnostic.
//!
//! Key behaviors
//! -------------
//! - [`tolerance`]: `4·eps·max(1, |x|)` for the precision of `x`.
//! - [`residual`]: `w + ln(w) − x`, always evaluated in `f64`.
//! - [`satisfies_bound`]: the contract for a single `(x, w)` pair, including
//!   the subnormal tail where only absolute accuracy is meaningful.
//! - [`monotone_slack`]: the largest decrease between neighboring inputs
//!   that two results honoring the bound can show.
//! - [`AccuracyReport::scan`]: evaluate a uniform grid and report violations,
//!   the worst residual-to-tolerance ratio, monotonicity and sign.
//!
//! Invariants & assumptions
//! ------------------------
//! - A result below the smallest normal number is compared with an
//!   independent reference `exp(x + 64)·exp(−64)` instead of the residual;
//!   `ln(w)` carries no relative information there. The shift keeps the
//!   reference computation in the normal range, so it does not share the
//!   evaluator's own subnormal `exp(x)`.
//! - Monotonicity holds up to rounding: a decrease of at most
//!   [`monotone_slack`] between consecutive grid points is not a violation.
//! - Residuals for `f32` results are computed after widening to `f64`, so
//!   evaluation noise does not mask or inflate the `f32` error.
//!
//! Conventions
//! -----------
//! - Grids are built with `ndarray::Array1::linspace` in `f64` and narrowed
//!   to the audited precision point by point.
//! - Scans never log. With the `obs_slog` feature a finished report can be
//!   written to an `slog::Logger` via [`AccuracyReport::log_summary`].

use ndarray::Array1;
use num_traits::NumCast;

use crate::special::{
    errors::{AuditError, AuditResult},
    lambert::{LambertFloat, lambert_w_exp_with},
    seed::SeedMath,
};

/// Residual tolerance `4·eps·max(1, |x|)` for the precision of `x`.
#[inline]
pub fn tolerance<T: LambertFloat>(x: T) -> f64 {
    let eps: f64 = T::UNIT_ROUNDOFF.into();
    let x: f64 = x.into();
    4.0 * eps * x.abs().max(1.0)
}

/// Residual `w + ln(w) − x` of the defining equation, in `f64`.
#[inline]
pub fn residual<T: LambertFloat>(x: T, w: T) -> f64 {
    let x: f64 = x.into();
    let w: f64 = w.into();
    w + w.ln() - x
}

// Shift applied before exponentiating in the subnormal tail; for f64 inputs
// in (-746, -708) adding it is exact (same binade).
const SUBNORMAL_SHIFT: f64 = 64.0;

/// Whether `w` honors the accuracy contract for `W₀(exp(x))`.
///
/// For normal `w` this is `|residual(x, w)| < tolerance(x)`. Below the
/// smallest normal number, `w` must lie within two subnormal spacings plus
/// `4·eps` relative of `exp(x + 64)·exp(−64)`: each side rounds once into the
/// subnormal range and carries at most one ulp of `exp` error.
///
/// Returns `false` for negative or NaN `w`.
pub fn satisfies_bound<T: LambertFloat>(x: T, w: T) -> bool {
    if w.is_nan() || w < T::zero() {
        return false;
    }
    if w < T::min_positive_value() {
        let min_normal: f64 = T::min_positive_value().into();
        let eps: f64 = T::UNIT_ROUNDOFF.into();
        let (x, w): (f64, f64) = (x.into(), w.into());
        let reference = (x + SUBNORMAL_SHIFT).exp() * (-SUBNORMAL_SHIFT).exp();
        return (w - reference).abs() <= 2.0 * min_normal * eps + 4.0 * eps * reference;
    }
    residual(x, w).abs() < tolerance(x)
}

/// Largest admissible drop from `w_prev` (the result at a smaller input) to
/// the result at `x`: twice the residual bound mapped into w-space through
/// `dw/dx = w/(1 + w)`.
///
/// Consecutive results may decrease by a few ulps where two independently
/// rounded evaluations straddle the exact, increasing curve.
#[inline]
pub fn monotone_slack<T: LambertFloat>(x: T, w_prev: T) -> f64 {
    let w: f64 = w_prev.into();
    2.0 * tolerance(x) * w / (1.0 + w)
}

/// AuditOptions — grid configuration for [`AccuracyReport::scan`].
///
/// Fields
/// ------
/// - `lo`, `hi`: `f64`
///   Finite grid endpoints with `lo < hi`.
/// - `samples`: `usize`
///   Number of equally spaced points, endpoints included; between 2 and
///   [`AuditOptions::MAX_SAMPLES`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuditOptions {
    pub lo: f64,
    pub hi: f64,
    pub samples: usize,
}

impl AuditOptions {
    /// Upper limit on grid size; the grid is materialized as one `f64` array.
    pub const MAX_SAMPLES: usize = 10_000_000;

    /// Validate and build grid options.
    ///
    /// # Errors
    /// - [`AuditError::NonFiniteBound`] if `lo` or `hi` is NaN or ±∞.
    /// - [`AuditError::EmptyRange`] if `lo >= hi`.
    /// - [`AuditError::TooFewSamples`] if `samples < 2`.
    /// - [`AuditError::TooManySamples`] if `samples > MAX_SAMPLES`.
    pub fn new(lo: f64, hi: f64, samples: usize) -> AuditResult<Self> {
        for bound in [lo, hi] {
            if !bound.is_finite() {
                return Err(AuditError::NonFiniteBound(bound));
            }
        }
        if lo >= hi {
            return Err(AuditError::EmptyRange { lo, hi });
        }
        if samples < 2 {
            return Err(AuditError::TooFewSamples(samples));
        }
        if samples > Self::MAX_SAMPLES {
            return Err(AuditError::TooManySamples { samples, max: Self::MAX_SAMPLES });
        }
        Ok(AuditOptions { lo, hi, samples })
    }
}

impl Default for AuditOptions {
    /// `[-50, 50]` sampled at 10 001 points.
    fn default() -> Self {
        AuditOptions { lo: -50.0, hi: 50.0, samples: 10_001 }
    }
}

/// AccuracyReport — outcome of an accuracy scan over a grid.
///
/// Fields
/// ------
/// - `precision`, `seed`: names of the audited float type and seed backend.
/// - `samples`: number of evaluated points.
/// - `violations`: points where [`satisfies_bound`] failed.
/// - `worst_ratio`: largest `|residual| / tolerance` over points with a
///   normal result (0 when there are none).
/// - `worst_x`: the grid point attaining `worst_ratio`.
/// - `monotone`: no output fell below its predecessor by more than
///   [`monotone_slack`].
/// - `non_negative`: every output was `≥ 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyReport {
    pub precision: &'static str,
    pub seed: &'static str,
    pub samples: usize,
    pub violations: usize,
    pub worst_ratio: f64,
    pub worst_x: f64,
    pub monotone: bool,
    pub non_negative: bool,
}

impl AccuracyReport {
    /// Evaluate `W₀(exp(x))` in precision `T` with seed backend `B` on the
    /// grid described by `opts`.
    ///
    /// # Errors
    /// - [`AuditError::Unrepresentable`] if a grid point does not fit in `T`.
    pub fn scan<T, B>(opts: &AuditOptions) -> AuditResult<Self>
    where
        T: LambertFloat,
        B: SeedMath,
    {
        let grid = Array1::linspace(opts.lo, opts.hi, opts.samples);

        let mut report = AccuracyReport {
            precision: T::PRECISION,
            seed: B::NAME,
            samples: grid.len(),
            violations: 0,
            worst_ratio: 0.0,
            worst_x: opts.lo,
            monotone: true,
            non_negative: true,
        };

        let mut prev: Option<T> = None;
        for &xf in grid.iter() {
            let x: T = <T as NumCast>::from(xf)
                .filter(|x| x.is_finite())
                .ok_or(AuditError::Unrepresentable(xf))?;
            let w = lambert_w_exp_with::<T, B>(x);

            if !satisfies_bound(x, w) {
                report.violations += 1;
            }
            if w.is_nan() || w < T::zero() {
                report.non_negative = false;
            }
            if w >= T::min_positive_value() {
                let ratio = residual(x, w).abs() / tolerance(x);
                if ratio > report.worst_ratio {
                    report.worst_ratio = ratio;
                    report.worst_x = x.into();
                }
            }
            if let Some(p) = prev {
                let (p64, w64): (f64, f64) = (p.into(), w.into());
                if p64 - w64 > monotone_slack(x, p) {
                    report.monotone = false;
                }
            }
            prev = Some(w);
        }
        Ok(report)
    }

    /// No violations, monotone up to rounding, and non-negative.
    pub fn passed(&self) -> bool {
        self.violations == 0 && self.monotone && self.non_negative
    }
}

#[cfg(feature = "obs_slog")]
impl AccuracyReport {
    /// Write the report as one structured record (`warn` on failure).
    pub fn log_summary(&self, logger: &slog::Logger) {
        if self.passed() {
            slog::info!(logger, "lambert_w_exp accuracy audit passed";
                "precision" => self.precision,
                "seed" => self.seed,
                "samples" => self.samples,
                "worst_ratio" => self.worst_ratio,
                "worst_x" => self.worst_x
            );
        } else {
            slog::warn!(logger, "lambert_w_exp accuracy audit failed";
                "precision" => self.precision,
                "seed" => self.seed,
                "samples" => self.samples,
                "violations" => self.violations,
                "worst_ratio" => self.worst_ratio,
                "worst_x" => self.worst_x,
                "monotone" => self.monotone,
                "non_negative" => self.non_negative
            );
        }
    }
}

/// Asynchronous terminal logger for audit summaries.
#[cfg(feature = "obs_slog")]
pub fn term_logger() -> slog::Logger {
    use slog::Drain;

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    slog::Logger::root(drain, slog::o!())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::special::{
        lambert::OMEGA,
        seed::{FastSeed, StdSeed},
    };
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `tolerance`, `residual` and `satisfies_bound` on hand-picked pairs.
    // - `monotone_slack` against rounding-level and genuine decreases.
    // - Validation branches of `AuditOptions::new`.
    // - End-to-end scans in both precisions and with both seed backends,
    //   including a grid finer than one output ulp.
    // - Detection of an f64 grid point that does not fit in f32.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check the tolerance formula and its `max(1, |x|)` floor.
    //
    // Given
    // -----
    // - x ∈ {0.25, −3, 1e6} in f64 and x = 2 in f32.
    //
    // Expect
    // ------
    // - 4·eps, 12·eps, 4e6·eps and 8·2⁻²³ respectively.
    fn tolerance_scales_with_magnitude() {
        assert_eq!(tolerance(0.25_f64), 4.0 * f64::EPSILON);
        assert_eq!(tolerance(-3.0_f64), 12.0 * f64::EPSILON);
        assert_eq!(tolerance(1e6_f64), 4e6 * f64::EPSILON);
        assert_eq!(tolerance(2.0_f32), 8.0 * f32::EPSILON as f64);
    }

    #[test]
    // Purpose
    // -------
    // Verify `satisfies_bound` accepts exact roots and rejects perturbed,
    // negative, and NaN outputs.
    //
    // Given
    // -----
    // - x = 1 + ln(1) = 1 with w = 1; the same x with w = 1 + 1e-10;
    //   w = −0.0 − 1 and NaN.
    //
    // Expect
    // ------
    // - Only the exact pair passes.
    fn satisfies_bound_accepts_roots_and_rejects_garbage() {
        assert!(satisfies_bound(1.0_f64, 1.0));
        assert_eq!(residual(1.0_f64, 1.0), 0.0);
        assert!(!satisfies_bound(1.0_f64, 1.0 + 1e-10));
        assert!(!satisfies_bound(1.0_f64, -1.0));
        assert!(!satisfies_bound(1.0_f64, f64::NAN));
    }

    #[test]
    // Purpose
    // -------
    // Exercise the subnormal branch of `satisfies_bound`.
    //
    // Given
    // -----
    // - x = −800 with w = 0 (exp underflows).
    // - x = −740 with w = exp(−740) (≈ 85 subnormal spacings), with w = 0,
    //   and with w four spacings too large.
    // - x = −95 in f32 with w = exp(−95) and with w = 0.
    //
    // Expect
    // ------
    // - Underflow to 0 and the rounded exponential pass; clamping a
    //   representable subnormal to 0 fails, and so does an output a few
    //   spacings off, which a check against the evaluator's own `exp(x)`
    //   could not distinguish from rounding.
    fn satisfies_bound_handles_subnormal_tail() {
        let tail = (-740.0_f64).exp();

        assert!(satisfies_bound(-800.0_f64, 0.0));
        assert!(satisfies_bound(-740.0_f64, tail));
        assert!(!satisfies_bound(-740.0_f64, 0.0));
        assert!(!satisfies_bound(-740.0_f64, f64::from_bits(tail.to_bits() + 4)));

        assert!(satisfies_bound(-95.0_f32, (-95.0_f32).exp()));
        assert!(!satisfies_bound(-95.0_f32, 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Check that the monotonicity slack admits rounding-level decreases and
    // nothing larger.
    //
    // Given
    // -----
    // - x = −4.823 (f32) with a previous result w ≈ 7.98e-3, where
    //   neighboring inputs are known to step down by one ulp of w.
    // - x = 0 and x = 1e6 (f64) with their exact results.
    //
    // Expect
    // ------
    // - A one-ulp drop is inside the slack; a 1e-6 drop is not.
    // - The slack equals twice the tolerance scaled by w/(1 + w).
    fn monotone_slack_admits_rounding_only() {
        let w_prev = 7.978_481e-3_f32;
        let one_ulp = (w_prev - f32::from_bits(w_prev.to_bits() - 1)) as f64;

        let slack = monotone_slack(-4.823_f32, w_prev);

        assert!(one_ulp <= slack, "ulp {one_ulp}, slack {slack}");
        assert!(1e-6 > slack);
        assert_relative_eq!(
            monotone_slack(0.0_f64, OMEGA),
            2.0 * tolerance(0.0_f64) * OMEGA / (1.0 + OMEGA),
            max_relative = f64::EPSILON
        );
        assert!(monotone_slack(1e6_f64, 1e6 - 1e6_f64.ln()) < 2.0 * tolerance(1e6_f64));
    }

    #[test]
    // Purpose
    // -------
    // Cover each error branch of `AuditOptions::new` plus the success path.
    //
    // Given
    // -----
    // - Non-finite bound, reversed range, single sample, an oversized grid,
    //   and a valid triple.
    //
    // Expect
    // ------
    // - The matching `AuditError` variant, then `Ok`.
    fn audit_options_validation() {
        match AuditOptions::new(f64::NEG_INFINITY, 1.0, 10) {
            Err(AuditError::NonFiniteBound(v)) => assert!(v.is_infinite()),
            other => panic!("expected NonFiniteBound, got {other:?}"),
        }
        match AuditOptions::new(2.0, 2.0, 10) {
            Err(AuditError::EmptyRange { lo, hi }) => assert_eq!((lo, hi), (2.0, 2.0)),
            other => panic!("expected EmptyRange, got {other:?}"),
        }
        match AuditOptions::new(-1.0, 1.0, 1) {
            Err(AuditError::TooFewSamples(n)) => assert_eq!(n, 1),
            other => panic!("expected TooFewSamples, got {other:?}"),
        }
        match AuditOptions::new(-1.0, 1.0, AuditOptions::MAX_SAMPLES + 1) {
            Err(AuditError::TooManySamples { samples, max }) => {
                assert_eq!((samples, max), (AuditOptions::MAX_SAMPLES + 1, AuditOptions::MAX_SAMPLES))
            }
            other => panic!("expected TooManySamples, got {other:?}"),
        }
        assert!(AuditOptions::new(-1.0, 1.0, usize::MAX).is_err());
        assert!(AuditOptions::new(-1.0, 1.0, AuditOptions::MAX_SAMPLES).is_ok());
        let opts = AuditOptions::new(-1.0, 1.0, 3).expect("valid options");
        assert_eq!(opts, AuditOptions { lo: -1.0, hi: 1.0, samples: 3 });
    }

    #[test]
    // Purpose
    // -------
    // Run full scans over every interval of both tables.
    //
    // Given
    // -----
    // - f64 on [−800, 60] and f32 on [−120, 40], each with both backends.
    //
    // Expect
    // ------
    // - Reports pass, carry the right names, and have worst ratio < 1.
    fn scan_passes_in_both_precisions() {
        let wide = AuditOptions::new(-800.0, 60.0, 86_001).expect("valid options");
        let narrow = AuditOptions::new(-120.0, 40.0, 16_001).expect("valid options");

        let reports = [
            AccuracyReport::scan::<f64, StdSeed>(&wide),
            AccuracyReport::scan::<f64, FastSeed>(&wide),
            AccuracyReport::scan::<f32, StdSeed>(&narrow),
            AccuracyReport::scan::<f32, FastSeed>(&narrow),
        ];

        for report in reports {
            let report = report.expect("grid fits the precision");
            assert!(report.passed(), "audit failed: {report:?}");
            assert!(report.worst_ratio < 1.0);
        }

        let named = AccuracyReport::scan::<f32, FastSeed>(&narrow).expect("grid fits");
        assert_eq!((named.precision, named.seed, named.samples), ("f32", "fast", 16_001));
    }

    #[test]
    // Purpose
    // -------
    // Scan a grid whose step is far below one f32 ulp of x, so consecutive
    // points hit rounding-level decreases of the output.
    //
    // Given
    // -----
    // - f32 on [−4.83, −4.78] with 200 001 points (every f32 in the window
    //   is visited, most of them repeatedly).
    //
    // Expect
    // ------
    // - No bound violations, and the report is monotone and passes: drops of
    //   one output ulp stay within `monotone_slack`.
    fn scan_tolerates_rounding_level_decreases() {
        let opts = AuditOptions::new(-4.83, -4.78, 200_001).expect("valid options");

        for report in [
            AccuracyReport::scan::<f32, StdSeed>(&opts),
            AccuracyReport::scan::<f32, FastSeed>(&opts),
        ] {
            let report = report.expect("grid fits the precision");
            assert_eq!(report.violations, 0);
            assert!(report.monotone, "rounding drop flagged: {report:?}");
            assert!(report.passed());
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure a grid outside the f32 range is reported instead of silently
    // producing infinities.
    //
    // Given
    // -----
    // - An f64 grid reaching 1e300.
    //
    // Expect
    // ------
    // - `AuditError::Unrepresentable` for the f32 scan; the f64 scan passes.
    fn scan_rejects_points_outside_precision() {
        let opts = AuditOptions::new(0.0, 1e300, 5).expect("valid options");

        match AccuracyReport::scan::<f32, StdSeed>(&opts) {
            Err(AuditError::Unrepresentable(v)) => assert!(v > f32::MAX as f64),
            other => panic!("expected Unrepresentable, got {other:?}"),
        }
        assert!(AccuracyReport::scan::<f64, StdSeed>(&opts).expect("fits").passed());
    }

    #[cfg(feature = "obs_slog")]
    #[test]
    // Purpose
    // -------
    // Smoke-test the structured summary against a discarding logger.
    fn log_summary_writes_without_panicking() {
        let logger = slog::Logger::root(slog::Discard, slog::o!());
        let report = AccuracyReport::scan::<f64, StdSeed>(&AuditOptions::default())
            .expect("default grid fits");
        report.log_summary(&logger);
    }
}
