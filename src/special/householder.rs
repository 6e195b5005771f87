//! Generic iteration kernels shared by both precisions of `W₀(exp(x))`.
//!
//! Provides the fifth-order Householder update for `w − z·exp(−w) = 0`
//! and the cheap `(1 + x/1024)^1024` exponential used to seed it. Both are
//! written once over `num_traits::Float` so the `f32` and `f64` evaluators
//! share the exact same operation sequence.
//!
//! # Provided items
//! - [`householder_step(w, y)`]: one update `w_n → w_{n+1}` given
//!   `y = z·exp(−w_n)`.
//! - [`exp_approx(x)`]: ten repeated squarings of `1 + x/1024`.
//!
//! # References
//! - A. Householder, *The numerical treatment of a single nonlinear
//!   equation*. McGraw-Hill, 1970.
//! - T. Fukushima, *Precise and fast computation of Lambert W-functions
//!   without transcendental function evaluations*. J. Comput. Appl. Math.
//!   244 (2013): 77–89.

use num_traits::Float;

#[inline(always)]
fn lit<T: From<f32>>(v: f32) -> T {
    T::from(v)
}

/// Householder's iteration of order 5 for `w − z·exp(−w) = 0`.
///
/// # Parameters
/// - `w`: current iterate `w_n`.
/// - `y`: `z·exp(−w_n)`; for `z = exp(x)` this is `exp(x − w_n)`.
///
/// # Returns
/// - `w_{n+1}`. An `ε`-accurate input yields an `O(ε⁵)`-accurate output.
///
/// # Notes
/// - The evaluation order of every product and sum is fixed; the evaluator's
///   interval tables were tuned against exactly this sequence.
#[inline]
pub fn householder_step<T: Float + From<f32>>(w: T, y: T) -> T {
    let f0 = w - y;
    let f1 = T::one() + y;
    let f11 = f1 * f1;
    let f0y = f0 * y;
    let f00y = f0 * f0y;
    w - lit::<T>(4.0) * f0 * (lit::<T>(6.0) * f1 * (f11 + f0y) + f00y)
        / (f11 * (lit::<T>(24.0) * f11 + lit::<T>(36.0) * f0y)
            + f00y * (lit::<T>(14.0) * y + f0 + lit::<T>(8.0)))
}

/// Fast approximation of `exp(x)` as `(1 + x/1024)^1024`.
///
/// Not accurate for `x > 1`. For `x ∈ [−5, 1]` the absolute error is about
/// `1e−3` (smaller near 0) and it shrinks as `x → −∞`; for `x ≤ −36` the
/// absolute difference to `exp` is below `2⁻⁵²`. Inputs below `−1024` are
/// meaningless (the base turns negative). Only ever used for seeding.
#[inline]
pub fn exp_approx<T: Float + From<f32>>(x: T) -> T {
    let mut y = T::one() + x / lit::<T>(1024.0);
    for _ in 0..10 {
        y = y * y;
    }
    y
}
