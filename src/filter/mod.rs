//! Read filtering by GC content, length and mean quality
//!
//! A read passes when all three hold:
//!
//! - `gc.lower <= gc% <= gc.upper`
//! - `length.lower <= length <= length.upper`
//! - `mean_quality >= quality_threshold`
//!
//! GC and length take a scalar (read as `(0, x)`) or a `(lower, upper)` pair;
//! the quality criterion is a single lower threshold.
//!
//! # Examples
//!
//! ```
//! use seqsieve::filter::{FilterConfig, FilterPipeline};
//! use seqsieve::FastqRecord;
//!
//! # fn main() -> seqsieve::Result<()> {
//! let config = FilterConfig::default()
//!     .with_gc_bounds(30)
//!     .with_length_bounds(50)
//!     .with_quality_threshold(30.0);
//!
//! let reads = vec![
//!     Ok(FastqRecord::new("at_rich".into(), b"AATTAATTGC".to_vec(), b"IIIIIIIIII".to_vec())),
//!     Ok(FastqRecord::new("gc_rich".into(), b"GGCCGGCCAT".to_vec(), b"IIIIIIIIII".to_vec())),
//! ];
//!
//! let (passed, report) = FilterPipeline::new(config).filter_records(reads)?;
//! assert_eq!(passed.len(), 1);
//! assert_eq!(passed[0].id, "at_rich");
//! assert_eq!(report.rejected, 1);
//! # Ok(())
//! # }
//! ```

pub mod pipeline;
pub mod predicate;

pub use pipeline::{filter_fastq, FilterPipeline, FilterReport};
pub use predicate::{Criterion, FilterPredicate, Verdict};

use crate::error::{Result, SeqsieveError};
use crate::operations::{BoundSpec, Bounds};

/// Default GC bounds: every read (0–100 %)
pub const DEFAULT_GC_BOUNDS: Bounds = Bounds::new(0.0, 100.0);

/// Default length bounds: `(0, 2^32)`
pub const DEFAULT_LENGTH_BOUNDS: Bounds = Bounds::new(0.0, 4_294_967_296.0);

/// Default mean-quality threshold: no filtering
pub const DEFAULT_QUALITY_THRESHOLD: f64 = 0.0;

/// What to do with a read whose GC content or mean quality is undefined
///
/// Affects only `DegenerateSequence` failures (no A/C/G/T base, or an empty
/// quality string). Malformed input and bad bounds always propagate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first degenerate read and return its error
    #[default]
    Strict,
    /// Drop degenerate reads, count them in `FilterReport::skipped`, log a warning
    Skip,
}

/// Filter criteria
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    /// Accepted GC percentage range
    pub gc_bounds: Bounds,
    /// Accepted read length range
    pub length_bounds: Bounds,
    /// Minimum mean Phred+33 quality (inclusive)
    pub quality_threshold: f64,
    /// Handling of degenerate reads
    pub policy: FailurePolicy,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            gc_bounds: DEFAULT_GC_BOUNDS,
            length_bounds: DEFAULT_LENGTH_BOUNDS,
            quality_threshold: DEFAULT_QUALITY_THRESHOLD,
            policy: FailurePolicy::Strict,
        }
    }
}

impl FilterConfig {
    /// Set GC bounds from a scalar or a pair
    pub fn with_gc_bounds(mut self, bounds: impl Into<BoundSpec>) -> Self {
        self.gc_bounds = bounds.into().normalize();
        self
    }

    /// Set length bounds from a scalar or a pair
    pub fn with_length_bounds(mut self, bounds: impl Into<BoundSpec>) -> Self {
        self.length_bounds = bounds.into().normalize();
        self
    }

    /// Set GC bounds from loosely typed input such as `"20,80"` or `&[20.0, 80.0]`
    ///
    /// # Errors
    ///
    /// `InvalidBoundsType` when the input is neither a scalar nor a pair.
    pub fn try_with_gc_bounds<B>(self, bounds: B) -> Result<Self>
    where
        B: TryInto<BoundSpec, Error = SeqsieveError>,
    {
        Ok(self.with_gc_bounds(bounds.try_into()?))
    }

    /// Set length bounds from loosely typed input; see [`try_with_gc_bounds`](Self::try_with_gc_bounds)
    pub fn try_with_length_bounds<B>(self, bounds: B) -> Result<Self>
    where
        B: TryInto<BoundSpec, Error = SeqsieveError>,
    {
        Ok(self.with_length_bounds(bounds.try_into()?))
    }

    /// Set the minimum mean quality
    pub fn with_quality_threshold(mut self, threshold: f64) -> Self {
        self.quality_threshold = threshold;
        self
    }

    /// Set the degenerate-read policy
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FilterConfig::default();
        assert_eq!(config.gc_bounds, Bounds::new(0.0, 100.0));
        assert_eq!(config.length_bounds, Bounds::new(0.0, (1u64 << 32) as f64));
        assert_eq!(config.quality_threshold, 0.0);
        assert_eq!(config.policy, FailurePolicy::Strict);
    }

    #[test]
    fn test_builders_normalize() {
        let config = FilterConfig::default()
            .with_gc_bounds(30)
            .with_length_bounds((10u32, 50u32))
            .with_quality_threshold(30.0)
            .with_policy(FailurePolicy::Skip);

        assert_eq!(config.gc_bounds, Bounds::new(0.0, 30.0));
        assert_eq!(config.length_bounds, Bounds::new(10.0, 50.0));
        assert_eq!(config.quality_threshold, 30.0);
        assert_eq!(config.policy, FailurePolicy::Skip);
    }

    #[test]
    fn test_try_builders() {
        let config = FilterConfig::default()
            .try_with_gc_bounds("20:80")
            .unwrap()
            .try_with_length_bounds([5.0, 10.0].as_slice())
            .unwrap();
        assert_eq!(config.gc_bounds, Bounds::new(20.0, 80.0));
        assert_eq!(config.length_bounds, Bounds::new(5.0, 10.0));

        assert!(matches!(
            FilterConfig::default().try_with_gc_bounds("NOT_INT"),
            Err(SeqsieveError::InvalidBoundsType(_))
        ));
    }
}
