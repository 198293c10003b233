//! Bounds normalization for filter criteria
//!
//! A bound is given either as a single scalar, read as an upper bound with an
//! implicit lower bound of zero, or as an explicit `(lower, upper)` pair.
//! [`BoundSpec::normalize`] turns both shapes into a canonical [`Bounds`].
//!
//! `lower <= upper` is deliberately not checked: an inverted pair simply
//! accepts nothing.
//!
//! # Examples
//!
//! ```
//! use seqsieve::operations::{BoundSpec, Bounds};
//!
//! # fn main() -> seqsieve::Result<()> {
//! assert_eq!(BoundSpec::from(30.0).normalize(), Bounds::new(0.0, 30.0));
//! assert_eq!(BoundSpec::from((20.0, 80.0)).normalize(), Bounds::new(20.0, 80.0));
//!
//! let parsed: BoundSpec = "20,80".parse()?;
//! assert_eq!(parsed.normalize(), Bounds::new(20.0, 80.0));
//! assert!("NOT_INT".parse::<BoundSpec>().is_err());
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SeqsieveError};
use std::fmt;
use std::str::FromStr;

/// Canonical inclusive `(lower, upper)` range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Inclusive lower bound
    pub lower: f64,
    /// Inclusive upper bound
    pub upper: f64,
}

impl Bounds {
    /// Create a bounds pair as given (no ordering check)
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Inclusive membership test: `lower <= value <= upper`
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lower, self.upper)
    }
}

/// A bound as supplied by the caller, before normalization
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundSpec {
    /// Single value, read as `(0, value)`
    Scalar(f64),
    /// Explicit `(lower, upper)` pair, kept as-is
    Pair(f64, f64),
}

impl BoundSpec {
    /// Convert to canonical `(lower, upper)` form
    pub fn normalize(self) -> Bounds {
        match self {
            BoundSpec::Scalar(upper) => Bounds::new(0.0, upper),
            BoundSpec::Pair(lower, upper) => Bounds::new(lower, upper),
        }
    }
}

/// Normalize anything convertible into a [`BoundSpec`]
pub fn normalize(bound: impl Into<BoundSpec>) -> Bounds {
    bound.into().normalize()
}

impl From<Bounds> for BoundSpec {
    fn from(bounds: Bounds) -> Self {
        BoundSpec::Pair(bounds.lower, bounds.upper)
    }
}

impl From<f64> for BoundSpec {
    fn from(value: f64) -> Self {
        BoundSpec::Scalar(value)
    }
}

impl From<(f64, f64)> for BoundSpec {
    fn from((lower, upper): (f64, f64)) -> Self {
        BoundSpec::Pair(lower, upper)
    }
}

macro_rules! impl_integer_bounds {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BoundSpec {
                fn from(value: $t) -> Self {
                    BoundSpec::Scalar(value as f64)
                }
            }

            impl From<($t, $t)> for BoundSpec {
                fn from((lower, upper): ($t, $t)) -> Self {
                    BoundSpec::Pair(lower as f64, upper as f64)
                }
            }
        )*
    };
}

impl_integer_bounds!(i32, u32, i64, u64, usize);

impl TryFrom<&[f64]> for BoundSpec {
    type Error = SeqsieveError;

    fn try_from(values: &[f64]) -> Result<Self> {
        match *values {
            [upper] => Ok(BoundSpec::Scalar(checked(upper)?)),
            [lower, upper] => Ok(BoundSpec::Pair(checked(lower)?, checked(upper)?)),
            _ => Err(SeqsieveError::InvalidBoundsType(format!(
                "expected a scalar or a (lower, upper) pair, got {} values",
                values.len()
            ))),
        }
    }
}

impl FromStr for BoundSpec {
    type Err = SeqsieveError;

    /// Parse `"30"`, `"20,80"`, `"20:80"` or `"(20, 80)"`
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);

        let values = inner
            .split([',', ':'])
            .map(|part| {
                part.trim().parse::<f64>().map_err(|_| {
                    SeqsieveError::InvalidBoundsType(format!(
                        "'{}' is neither a number nor a (lower, upper) pair",
                        s
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        BoundSpec::try_from(values.as_slice())
    }
}

impl TryFrom<&str> for BoundSpec {
    type Error = SeqsieveError;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

fn checked(value: f64) -> Result<f64> {
    if value.is_nan() {
        Err(SeqsieveError::InvalidBoundsType(
            "NaN is not a valid bound".to_string(),
        ))
    } else {
        Ok(value)
    }
}
