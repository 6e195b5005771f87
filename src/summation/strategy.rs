//! Summation strategies: plain accumulation and Kahan compensation.
//!
//! Both strategies are zero-sized values implementing [`Summation`], so a
//! solver can be generic over `S: Summation` and pay nothing for the
//! abstraction. Values may be of any primitive type that casts into the
//! accumulator type (`f32` data summed in `f64`, for instance).
//!
//! # Provided items
//! - [`kahan_add`]: one compensated step on a running `(sum, compensation)`.
//! - [`kahan_accumulate`] / [`kahan_accumulate_with_compensation`]:
//!   compensated reduction of a sequence.
//! - [`plain_accumulate`]: left fold with `+`.
//! - [`PlainSum`], [`KahanSum`]: the two [`Summation`] implementations.

use num_traits::{AsPrimitive, Float};

/// One Kahan step: fold `value` into `sum`, tracking the rounding error
/// lost so far in `compensation`.
///
/// After any number of steps `sum − compensation` is the exact running
/// total to within one rounding error of `sum`.
#[inline]
pub fn kahan_add<D, T>(value: D, sum: &mut T, compensation: &mut T)
where
    D: AsPrimitive<T>,
    T: Float + 'static,
{
    let y = value.as_() - *compensation;
    let t = *sum + y;
    *compensation = (t - *sum) - y;
    *sum = t;
}

/// Compensated reduction of `values` starting from `init`.
#[inline]
pub fn kahan_accumulate<I, T>(values: I, init: T) -> T
where
    I: IntoIterator,
    I::Item: AsPrimitive<T>,
    T: Float + 'static,
{
    kahan_accumulate_with_compensation(values, init).0
}

/// Compensated reduction that also returns the final compensation term.
///
/// # Returns
/// - `(sum, compensation)`; `sum − compensation` is a slightly better
///   estimate of the total than `sum` alone.
pub fn kahan_accumulate_with_compensation<I, T>(values: I, init: T) -> (T, T)
where
    I: IntoIterator,
    I::Item: AsPrimitive<T>,
    T: Float + 'static,
{
    let mut sum = init;
    let mut compensation = T::zero();
    for value in values {
        kahan_add(value, &mut sum, &mut compensation);
    }
    (sum, compensation)
}

/// Plain left fold `init + v₀ + v₁ + …`.
#[inline]
pub fn plain_accumulate<I, T>(values: I, init: T) -> T
where
    I: IntoIterator,
    I::Item: AsPrimitive<T>,
    T: Float + 'static,
{
    values.into_iter().fold(init, |acc, value| acc + value.as_())
}

/// Summation — a strategy for reducing sequences of floating-point values.
///
/// Purpose
/// -------
/// Let numerically sensitive reductions (dual losses, normalizers) trade
/// speed for accuracy by swapping a type parameter instead of editing call
/// sites.
///
/// Key behaviors
/// -------------
/// - `reduce(values, init)`: one-shot reduction of a sequence.
/// - `add(value, &mut sum, &mut compensation)`: incremental form for loops
///   that interleave summation with other work.
///
/// Invariants
/// ----------
/// - Both methods share one signature across implementations; callers that
///   only use `add` must still thread a compensation term, which plain
///   summation leaves untouched.
///
/// Notes
/// -----
/// - Methods are generic, so the trait is used through static dispatch
///   (`S: Summation`), not as a trait object.
pub trait Summation {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &'static str;

    /// Reduce `values` into a total starting from `init`.
    fn reduce<I, T>(&self, values: I, init: T) -> T
    where
        I: IntoIterator,
        I::Item: AsPrimitive<T>,
        T: Float + 'static;

    /// Add one value to a running `(sum, compensation)` pair.
    fn add<D, T>(&self, value: D, sum: &mut T, compensation: &mut T)
    where
        D: AsPrimitive<T>,
        T: Float + 'static;
}

/// Direct accumulation; error grows with length and condition number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainSum;

impl Summation for PlainSum {
    fn name(&self) -> &'static str {
        "plain"
    }

    #[inline]
    fn reduce<I, T>(&self, values: I, init: T) -> T
    where
        I: IntoIterator,
        I::Item: AsPrimitive<T>,
        T: Float + 'static,
    {
        plain_accumulate(values, init)
    }

    #[inline]
    fn add<D, T>(&self, value: D, sum: &mut T, _compensation: &mut T)
    where
        D: AsPrimitive<T>,
        T: Float + 'static,
    {
        *sum = *sum + value.as_();
    }
}

/// Kahan compensated accumulation; error independent of length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KahanSum;

impl Summation for KahanSum {
    fn name(&self) -> &'static str {
        "kahan"
    }

    #[inline]
    fn reduce<I, T>(&self, values: I, init: T) -> T
    where
        I: IntoIterator,
        I::Item: AsPrimitive<T>,
        T: Float + 'static,
    {
        kahan_accumulate(values, init)
    }

    #[inline]
    fn add<D, T>(&self, value: D, sum: &mut T, compensation: &mut T)
    where
        D: AsPrimitive<T>,
        T: Float + 'static,
    {
        kahan_add(value, sum, compensation);
    }
}
