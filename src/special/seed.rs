//! Seed transcendentals for `W₀(exp(x))`.
//!
//! The asymptotic seed `w₀ = x − ln(x)` only has to be accurate to a few
//! digits before the Householder step takes over, so its logarithm may come
//! from a cheaper routine than the platform `ln`. This module defines that
//! narrow capability and its two implementations; the backend is chosen at
//! build time through the `fast-seed` Cargo feature and never affects the
//! final correction pass, which always uses the platform `exp`.
//!
//! # Provided items
//! - [`SeedMath`]: the "approximate logarithm" capability.
//! - [`StdSeed`]: platform `f32::ln`.
//! - [`FastSeed`]: exponent extraction plus an odd `atanh` polynomial,
//!   relative error ≈ 1e−7 on positive normal inputs.
//! - [`DefaultSeed`]: alias resolved by the `fast-seed` feature.

/// Logarithm used while seeding the Householder iteration.
///
/// Implementors are zero-sized; the evaluator is monomorphized per backend
/// so switching backends costs nothing at the call site.
pub trait SeedMath {
    /// Short identifier used in diagnostics.
    const NAME: &'static str;

    /// Natural logarithm of a positive `f32`.
    fn ln(x: f32) -> f32;
}

/// Platform logarithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StdSeed;

impl SeedMath for StdSeed {
    const NAME: &'static str = "std";

    #[inline]
    fn ln(x: f32) -> f32 {
        x.ln()
    }
}

/// Bit-level logarithm: `x = m·2ᵉ` with `m ∈ [√½, √2)`, then
/// `ln(m) = 2·atanh(s)`, `s = (m − 1)/(m + 1)`, truncated after `s⁷`.
///
/// Zero, subnormal, negative and non-finite inputs fall back to `f32::ln`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FastSeed;

impl SeedMath for FastSeed {
    const NAME: &'static str = "fast";

    #[inline]
    fn ln(x: f32) -> f32 {
        if !(x.is_normal() && x > 0.0) {
            return x.ln();
        }

        let bits = x.to_bits();
        let mut e = ((bits >> 23) & 0xff) as i32 - 127;
        let mut m = f32::from_bits((bits & 0x007f_ffff) | 0x3f80_0000);
        if m > std::f32::consts::SQRT_2 {
            m *= 0.5;
            e += 1;
        }

        let s = (m - 1.0) / (m + 1.0);
        let s2 = s * s;
        let p = 2.0 * s * (1.0 + s2 * (1.0 / 3.0 + s2 * (0.2 + s2 * (1.0 / 7.0))));
        e as f32 * std::f32::consts::LN_2 + p
    }
}

/// Backend selected at build time.
#[cfg(not(feature = "fast-seed"))]
pub type DefaultSeed = StdSeed;

/// Backend selected at build time.
#[cfg(feature = "fast-seed")]
pub type DefaultSeed = FastSeed;

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `StdSeed` being a transparent wrapper around `f32::ln`.
    // - `FastSeed` accuracy over the whole range the evaluator seeds on.
    // - `FastSeed` fallback for inputs outside the positive normal range.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Confirm the standard backend is bit-identical to `f32::ln`.
    //
    // Given
    // -----
    // - A handful of positive inputs.
    //
    // Expect
    // ------
    // - Exact equality of bit patterns.
    fn std_seed_matches_platform_ln() {
        for x in [1e-3_f32, 0.5, 1.0, 4.0, 8.5, 1e6, 5.0e17] {
            assert_eq!(StdSeed::ln(x).to_bits(), x.ln().to_bits());
        }
    }

    #[test]
    // Purpose
    // -------
    // Bound the relative error of the fast logarithm on the seeding range.
    //
    // Given
    // -----
    // - A geometric grid on [4, 6e17] plus values straddling √2·2ᵉ.
    //
    // Expect
    // ------
    // - Relative error against an f64 reference below 1e-6.
    fn fast_seed_is_accurate_on_seed_range() {
        // Arrange
        let mut grid: Vec<f32> = Vec::new();
        let mut x = 4.0_f32;
        while x < 6.0e17 {
            grid.push(x);
            x *= 1.37;
        }
        grid.extend([5.6568537_f32, 5.656855, 11.313708, 1.4142135, 1.4142137]);

        // Act / Assert
        for x in grid {
            let reference = (x as f64).ln();
            let approx = FastSeed::ln(x) as f64;
            let rel = ((approx - reference) / reference).abs();
            assert!(rel < 1e-6, "FastSeed::ln({x}) = {approx}, reference {reference}, rel {rel}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that non-normal inputs defer to the platform logarithm.
    //
    // Given
    // -----
    // - 0, a subnormal, and +∞.
    //
    // Expect
    // ------
    // - Same results as `f32::ln`.
    fn fast_seed_falls_back_outside_normal_range() {
        assert_eq!(FastSeed::ln(0.0), f32::NEG_INFINITY);
        assert_eq!(FastSeed::ln(f32::INFINITY), f32::INFINITY);
        let sub = f32::MIN_POSITIVE / 4.0;
        assert_eq!(FastSeed::ln(sub), sub.ln());
    }
}
