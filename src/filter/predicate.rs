//! Per-read pass/fail decision

use crate::error::Result;
use crate::filter::FilterConfig;
use crate::operations::{measure, Bounds, ReadMetrics};
use crate::types::FastqRecord;
use std::fmt;

/// Filter criterion a read can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    /// GC percentage outside the GC bounds
    Gc,
    /// Length outside the length bounds
    Length,
    /// Mean quality below the threshold
    Quality,
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Criterion::Gc => "gc",
            Criterion::Length => "length",
            Criterion::Quality => "quality",
        })
    }
}

/// Outcome of checking a measured read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// All criteria hold
    Pass,
    /// First criterion that failed, checked in the order GC, length, quality
    Reject(Criterion),
}

impl Verdict {
    /// Whether the read passed
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// The three criteria of a [`FilterConfig`], ready to apply
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterPredicate {
    gc: Bounds,
    length: Bounds,
    quality_threshold: f64,
}

impl FilterPredicate {
    /// Build a predicate from a configuration
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            gc: config.gc_bounds,
            length: config.length_bounds,
            quality_threshold: config.quality_threshold,
        }
    }

    /// Measure GC content, length and mean quality of a read
    ///
    /// # Errors
    ///
    /// `DegenerateSequence` when GC or mean quality is undefined.
    pub fn measure(&self, sequence: &[u8], quality: &[u8]) -> Result<ReadMetrics> {
        measure(sequence, quality)
    }

    /// Check measured values against the criteria
    pub fn evaluate(&self, metrics: &ReadMetrics) -> Verdict {
        if !self.gc.contains(metrics.gc) {
            Verdict::Reject(Criterion::Gc)
        } else if !self.length.contains(metrics.length as f64) {
            Verdict::Reject(Criterion::Length)
        } else if metrics.mean_quality < self.quality_threshold {
            Verdict::Reject(Criterion::Quality)
        } else {
            Verdict::Pass
        }
    }

    /// Measure and check a raw read
    pub fn check(&self, sequence: &[u8], quality: &[u8]) -> Result<Verdict> {
        Ok(self.evaluate(&self.measure(sequence, quality)?))
    }

    /// Whether a raw read passes
    pub fn accepts(&self, sequence: &[u8], quality: &[u8]) -> Result<bool> {
        Ok(self.check(sequence, quality)?.passed())
    }

    /// Whether a FASTQ record passes
    pub fn accepts_record(&self, record: &FastqRecord) -> Result<bool> {
        self.accepts(&record.sequence, &record.quality)
    }
}

impl Default for FilterPredicate {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}
