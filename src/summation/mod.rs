//! summation — plain and compensated reduction strategies.
//!
//! Purpose
//! -------
//! Offer two interchangeable ways of accumulating floating-point sequences
//! behind one capability, so numerically sensitive reductions (dual losses,
//! log-sum-exp normalizers, thresholds) can choose speed or accuracy without
//! touching their call sites.
//!
//! Key behaviors
//! -------------
//! - [`Summation`]: `reduce(values, init)` and
//!   `add(value, &mut sum, &mut compensation)`, implemented by the
//!   zero-sized [`PlainSum`] and [`KahanSum`].
//! - Free functions [`kahan_add`], [`kahan_accumulate`],
//!   [`kahan_accumulate_with_compensation`] and [`plain_accumulate`] for
//!   callers that do not need the strategy abstraction.
//! - [`SummationKind`]: parseable configuration enum that dispatches once to
//!   a strategy.
//!
//! Invariants & assumptions
//! ------------------------
//! - With [`KahanSum`], the rounding error of the total does not grow with
//!   the sequence length; with [`PlainSum`] it grows with length and the
//!   condition number of the sum.
//! - Data and accumulator types may differ (`f32` data, `f64` totals); each
//!   value is cast with `as` semantics before it is added.
//!
//! Conventions
//! -----------
//! - Strategies are stateless and own no resources; state lives in the
//!   caller's `(sum, compensation)` pair.
//! - Hot loops should be generic over `S: Summation` (static dispatch).
//!
//! Testing notes
//! -------------
//! - [`strategy`] tests adversarial accuracy, agreement on well-conditioned
//!   input, incremental/one-shot equivalence and mixed precision.
//! - [`kind`] tests parsing and dispatch; [`errors`] tests messages.

pub mod errors;
pub mod kind;
pub mod strategy;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{SumError, SumResult};
pub use self::kind::SummationKind;
pub use self::strategy::{
    KahanSum, PlainSum, Summation, kahan_accumulate, kahan_accumulate_with_compensation,
    kahan_add, plain_accumulate,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::kind::SummationKind;
    pub use super::strategy::{KahanSum, PlainSum, Summation};
}
