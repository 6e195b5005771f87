//! Runtime selection of a summation strategy.
//!
//! [`SummationKind`] is the configuration-facing name of a strategy. Hot
//! loops should stay generic over [`Summation`]; the enum exists for
//! front-ends that read the choice from a string and dispatch once.

use std::str::FromStr;

use num_traits::{AsPrimitive, Float};

use crate::summation::{
    errors::{SumError, SumResult},
    strategy::{KahanSum, PlainSum, Summation},
};

/// Which summation strategy to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummationKind {
    /// Direct accumulation ([`PlainSum`]).
    Plain,
    /// Kahan compensated accumulation ([`KahanSum`]).
    #[default]
    Kahan,
}

impl SummationKind {
    /// Canonical name, matching [`Summation::name`] of the strategy.
    pub fn name(self) -> &'static str {
        match self {
            SummationKind::Plain => PlainSum.name(),
            SummationKind::Kahan => KahanSum.name(),
        }
    }

    /// Reduce `values` from `init` with the selected strategy.
    pub fn reduce<I, T>(self, values: I, init: T) -> T
    where
        I: IntoIterator,
        I::Item: AsPrimitive<T>,
        T: Float + 'static,
    {
        match self {
            SummationKind::Plain => PlainSum.reduce(values, init),
            SummationKind::Kahan => KahanSum.reduce(values, init),
        }
    }
}

impl FromStr for SummationKind {
    type Err = SumError;

    /// Accepts `plain`/`std`/`naive` and `kahan`/`compensated`, ignoring
    /// case and surrounding whitespace.
    fn from_str(s: &str) -> SumResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "std" | "naive" => Ok(SummationKind::Plain),
            "kahan" | "compensated" => Ok(SummationKind::Kahan),
            _ => Err(SumError::UnknownStrategy { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for SummationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
