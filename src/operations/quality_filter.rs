//! Phred+33 quality decoding and mean-quality filtering
//!
//! Each quality character encodes `score = byte - 33`. Only the Phred+33
//! offset is supported (Illumina 1.8+ and every current platform).
//!
//! # Examples
//!
//! ```
//! use seqsieve::operations::{mean_quality, passes_quality_filter};
//!
//! # fn main() -> seqsieve::Result<()> {
//! assert_eq!(mean_quality(b"IIII")?, 40.0);
//! assert_eq!(mean_quality(b"!!!!")?, 0.0);
//! assert!(passes_quality_filter(b"IIII", 30.0)?);
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SeqsieveError};

/// Phred+33 offset
pub const PHRED_OFFSET: u8 = 33;

/// Decode a single Phred+33 character into its quality score
///
/// Bytes below the offset decode to negative scores rather than wrapping.
#[inline]
pub fn phred_score(byte: u8) -> i32 {
    i32::from(byte) - i32::from(PHRED_OFFSET)
}

/// Decode a Phred+33 quality string into per-base scores
///
/// # Example
///
/// ```
/// use seqsieve::operations::phred_scores;
///
/// assert_eq!(phred_scores(b"!+5?I"), vec![0, 10, 20, 30, 40]);
/// ```
pub fn phred_scores(quality: &[u8]) -> Vec<i32> {
    quality.iter().map(|&b| phred_score(b)).collect()
}

/// Arithmetic mean of the decoded Phred+33 scores
///
/// # Errors
///
/// `DegenerateSequence` on an empty quality string, where the mean is
/// undefined.
pub fn mean_quality(quality: &[u8]) -> Result<f64> {
    if quality.is_empty() {
        return Err(SeqsieveError::DegenerateSequence(
            "empty quality string, mean quality is undefined".to_string(),
        ));
    }

    let sum: i64 = quality.iter().map(|&b| i64::from(phred_score(b))).sum();
    Ok(sum as f64 / quality.len() as f64)
}

/// Check whether the mean quality reaches `threshold` (inclusive)
///
/// # Errors
///
/// Same as [`mean_quality`].
pub fn passes_quality_filter(quality: &[u8], threshold: f64) -> Result<bool> {
    Ok(mean_quality(quality)? >= threshold)
}
