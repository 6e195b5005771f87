//! Principal-branch Lambert W of an exponential argument, `W₀(exp(x))`.
//!
//! Purpose
//! -------
//! Evaluate `w = W₀(exp(x))`, the unique non-negative solution of
//! `w + ln(w) = x`, over the whole real line in `f32` and `f64` without
//! ever forming `exp(x)` where it would overflow.
//!
//! Key behaviors
//! -------------
//! - Partition the real line into precision-specific intervals and pick a
//!   seed per interval (closed form, `exp_approx(x)`, `x`, or `x − ln(x)`).
//! - Refine seeds with the fifth-order [`householder_step`], then apply one
//!   last step driven by the exact `exp(x − w)`.
//! - Short-circuit the extremes: underflow to `0`, `exp(x)` where
//!   `W₀(z) ≈ z`, and the identity `x` where `ln(x)` is below one ulp of `x`.
//!
//! Invariants & assumptions
//! ------------------------
//! - For `x` with `exp(x)` a normal number, the result satisfies
//!   `|w + ln(w) − x| < 4·eps·max(1, |x|)` with `eps = 2⁻⁵²` (`f64`) or
//!   `2⁻²³` (`f32`). Below that, the result is `exp(x)` rounded into the
//!   subnormal range, or exactly `0`.
//! - The output is non-negative and non-decreasing in `x` up to rounding:
//!   between neighboring inputs it can drop by a few ulps, never by more
//!   than [`monotone_slack`](crate::special::accuracy::monotone_slack),
//!   i.e. twice the error bound mapped into w-space.
//! - Non-finite inputs: NaN → NaN, +∞ → +∞, −∞ → 0.
//!
//! Conventions
//! -----------
//! - The interval boundaries are literal constants on [`LambertFloat`]; they
//!   mark where each approximation's error drops below the target ulp and
//!   are not derived from one another.
//! - The seed logarithm comes from a [`SeedMath`] backend; the final
//!   correction always uses the platform `exp`.

use std::fmt;

use num_traits::Float;

use crate::special::{
    householder::{exp_approx, householder_step},
    seed::{DefaultSeed, SeedMath},
};

/// Omega constant `Ω = W₀(1)`, the solution of `x·exp(x) = 1`
/// (OEIS A030178).
#[allow(clippy::excessive_precision)]
pub const OMEGA: f64 = 0.567_143_290_409_783_872_999_968_662_210_355_549_753_8;

/// Floating-point precisions supported by the `W₀(exp(x))` evaluator.
///
/// Each implementation carries its own interval table; the generic
/// [`householder_step`] and [`exp_approx`] kernels are shared.
///
/// Interval tables (`x` ranges, upper bound inclusive):
///
/// | `f64` | action |
/// |---|---|
/// | `(−∞, −746]` | `0` |
/// | `(−746, −36]` | `exp(x)` |
/// | `(−36, −20]` | seed `exp_approx(x)`, final step |
/// | `(−20, 0]` | seed `exp_approx(x)`, one fast-exp step, final step |
/// | `(0, 4]` | seed `x`, one step, final step |
/// | `(4, 2⁵⁹]` | seed `x − ln(x)`, one step, final step |
/// | `(2⁵⁹, +∞)` | `x` |
///
/// | `f32` | action |
/// |---|---|
/// | `(−∞, −104]` | `0` |
/// | `(−104, −18]` | `exp(x)` |
/// | `(−18, −1]` | seed `exp_approx(x)`, final step |
/// | `(−1, 8]` | seed `x`, one step, final step |
/// | `(8, 2²⁹]` | seed `x − ln(x)`, one step |
/// | `(2²⁹, +∞)` | `x` |
pub trait LambertFloat:
    Float + From<f32> + Into<f64> + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Short precision name (`"f64"` / `"f32"`).
    const PRECISION: &'static str;
    /// Unit roundoff used by the accuracy contract (`2⁻⁵²` or `2⁻²³`).
    const UNIT_ROUNDOFF: Self;
    /// At or below this, `exp(x)` underflows and the result is `0`.
    const UNDERFLOW_CUTOFF: Self;
    /// At or below this, `exp(x)` itself is returned.
    const EXP_DIRECT_BOUND: Self;
    /// `f64`: above it the fast-exp seed gets an extra refinement.
    /// `f32`: above it the seed switches from `exp_approx(x)` to `x`.
    const SEED_SPLIT: Self;
    /// Above this the seed is `x − ln(x)`.
    const ASYMPTOTIC_SEED_BOUND: Self;
    /// Above this `x + ln(x)` rounds to `x` and `x` is returned.
    const IDENTITY_CEILING: Self;

    /// Evaluate `W₀(exp(self))` with an explicit seed backend.
    fn lambert_w_exp_with<B: SeedMath>(self) -> Self;
}

impl LambertFloat for f64 {
    const PRECISION: &'static str = "f64";
    const UNIT_ROUNDOFF: f64 = f64::EPSILON;
    const UNDERFLOW_CUTOFF: f64 = -746.0;
    const EXP_DIRECT_BOUND: f64 = -36.0;
    const SEED_SPLIT: f64 = -20.0;
    const ASYMPTOTIC_SEED_BOUND: f64 = 4.0;
    const IDENTITY_CEILING: f64 = 576_460_752_303_423_488.0;

    #[inline]
    fn lambert_w_exp_with<B: SeedMath>(self) -> f64 {
        let x = self;
        let w = if x > 0.0 {
            if x <= Self::ASYMPTOTIC_SEED_BOUND {
                householder_step(x, 1.0)
            } else if x <= Self::IDENTITY_CEILING {
                // exp(x − w₀) = x for w₀ = x − ln(x)
                let w = x - f64::from(B::ln(x as f32));
                householder_step(w, x)
            } else {
                return x;
            }
        } else if x > Self::EXP_DIRECT_BOUND {
            let w = exp_approx(x);
            if x > Self::SEED_SPLIT { householder_step(w, exp_approx(x - w)) } else { w }
        } else if x > Self::UNDERFLOW_CUTOFF {
            return x.exp();
        } else if x.is_nan() {
            return x;
        } else {
            return 0.0;
        };
        householder_step(w, (x - w).exp())
    }
}

impl LambertFloat for f32 {
    const PRECISION: &'static str = "f32";
    const UNIT_ROUNDOFF: f32 = f32::EPSILON;
    const UNDERFLOW_CUTOFF: f32 = -104.0;
    const EXP_DIRECT_BOUND: f32 = -18.0;
    const SEED_SPLIT: f32 = -1.0;
    const ASYMPTOTIC_SEED_BOUND: f32 = 8.0;
    const IDENTITY_CEILING: f32 = 536_870_912.0;

    #[inline]
    fn lambert_w_exp_with<B: SeedMath>(self) -> f32 {
        let x = self;
        let w = if x > Self::SEED_SPLIT {
            if x <= Self::ASYMPTOTIC_SEED_BOUND {
                householder_step(x, 1.0)
            } else if x <= Self::IDENTITY_CEILING {
                return householder_step(x - B::ln(x), x);
            } else {
                return x;
            }
        } else if x > Self::EXP_DIRECT_BOUND {
            exp_approx(x)
        } else if x > Self::UNDERFLOW_CUTOFF {
            return x.exp();
        } else if x.is_nan() {
            return x;
        } else {
            return 0.0;
        };
        householder_step(w, (x - w).exp())
    }
}

/// Lambert W function of `exp(x)`, `w = W₀(exp(x))`.
///
/// Parameters
/// ----------
/// - `x`: `T`
///   Any `f32` or `f64`. Finite inputs are the intended domain.
///
/// Returns
/// -------
/// `T`
///   The non-negative `w` with `w + ln(w) = x`, accurate to
///   `4·eps·max(1, |x|)` in the residual wherever `exp(x)` is normal.
///
/// Panics
/// ------
/// - Never panics.
///
/// Notes
/// -----
/// - Uses the seed backend selected by the `fast-seed` feature; see
///   [`lambert_w_exp_with`] to pick one explicitly.
///
/// Examples
/// --------
/// ```rust
/// use sdca_numerics::special::{OMEGA, lambert_w_exp};
///
/// assert!((lambert_w_exp(0.0_f64) - OMEGA).abs() < 1e-15);
/// assert_eq!(lambert_w_exp(-800.0_f64), 0.0);
/// assert_eq!(lambert_w_exp(1e19_f64), 1e19);
/// ```
#[inline]
pub fn lambert_w_exp<T: LambertFloat>(x: T) -> T {
    x.lambert_w_exp_with::<DefaultSeed>()
}

/// [`lambert_w_exp`] with an explicit seed backend `B`.
#[inline]
pub fn lambert_w_exp_with<T: LambertFloat, B: SeedMath>(x: T) -> T {
    x.lambert_w_exp_with::<B>()
}
