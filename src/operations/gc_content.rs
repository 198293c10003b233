//! GC content calculation with ARM NEON SIMD optimization
//!
//! # Architecture
//!
//! This module provides both NEON (ARM) and scalar (portable) implementations:
//! - NEON: Processes 16 bytes at a time with SIMD instructions
//! - Scalar: Sequential processing (x86_64 fallback)
//!
//! The public API automatically selects the best implementation for the platform.
//!
//! Counting is case-insensitive. Only A, C, G and T enter the denominator;
//! `U`, `N` and anything else are ignored, so GC content is
//! `100 * (G + C) / (A + T + G + C)`.

use crate::error::{Result, SeqsieveError};

/// GC content as a percentage (0.0 to 100.0)
pub type GCContent = f64;

/// Raw base counts behind a GC content value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GcCounts {
    /// Number of G and C bases (either case)
    pub gc: usize,
    /// Number of A, C, G and T bases (either case)
    pub acgt: usize,
}

impl GcCounts {
    /// GC percentage, or `None` when no A/C/G/T base was counted
    pub fn percent(&self) -> Option<GCContent> {
        if self.acgt == 0 {
            None
        } else {
            Some(100.0 * self.gc as f64 / self.acgt as f64)
        }
    }
}

/// Count G/C and A/C/G/T bases of a sequence
///
/// # Platform-Specific Optimization
///
/// - **ARM (aarch64)**: Uses NEON SIMD
/// - **x86_64**: Uses scalar fallback (portable)
///
/// # Example
///
/// ```
/// use seqsieve::operations::count_gc;
///
/// let counts = count_gc(b"GATTACAn");
/// assert_eq!(counts.gc, 2);
/// assert_eq!(counts.acgt, 7);
/// ```
pub fn count_gc(seq: &[u8]) -> GcCounts {
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { count_gc_neon(seq) }
    }

    #[cfg(not(target_arch = "aarch64"))]
    {
        count_gc_scalar(seq)
    }
}

/// Calculate GC content of a nucleotide sequence as a percentage
///
/// # Errors
///
/// `DegenerateSequence` when the sequence has no A/C/G/T base at all
/// (empty, all-`N`, pure `U` runs, ...), since the fraction is undefined.
///
/// # Example
///
/// ```
/// use seqsieve::operations::gc_fraction;
///
/// # fn main() -> seqsieve::Result<()> {
/// assert_eq!(gc_fraction(b"GGCC")?, 100.0);
/// assert_eq!(gc_fraction(b"AATT")?, 0.0);
/// assert_eq!(gc_fraction(b"atgc")?, 50.0);
/// assert!(gc_fraction(b"NNNN").is_err());
/// # Ok(())
/// # }
/// ```
pub fn gc_fraction(seq: &[u8]) -> Result<GCContent> {
    count_gc(seq).percent().ok_or_else(|| {
        SeqsieveError::DegenerateSequence(format!(
            "no A/C/G/T bases in {}-residue sequence, GC content is undefined",
            seq.len()
        ))
    })
}

/// NEON-optimized base counting
///
/// Case is folded by setting bit 0x20 on every byte; only `A`/`a` and the
/// other three letters land on the lowercase targets after folding.
///
/// # Safety
///
/// This function uses unsafe NEON intrinsics but is safe to call:
/// - Only called on aarch64 platforms (compile-time check)
/// - NEON is standard on all aarch64 CPUs
/// - Pointer operations are bounds-checked via chunks_exact
#[cfg(target_arch = "aarch64")]
pub unsafe fn count_gc_neon(seq: &[u8]) -> GcCounts {
    use std::arch::aarch64::*;

    let mut gc_count = 0usize;
    let mut total_count = 0usize;

    let case_bit = vdupq_n_u8(0x20);

    // Process 16 bytes at a time
    let chunks = seq.chunks_exact(16);
    let remainder = chunks.remainder();

    for chunk in chunks {
        let seq_vec = vorrq_u8(vld1q_u8(chunk.as_ptr()), case_bit);

        // Compare against g and c
        let g_mask = vceqq_u8(seq_vec, vdupq_n_u8(b'g'));
        let c_mask = vceqq_u8(seq_vec, vdupq_n_u8(b'c'));
        let gc_mask = vorrq_u8(g_mask, c_mask);

        let a_mask = vceqq_u8(seq_vec, vdupq_n_u8(b'a'));
        let t_mask = vceqq_u8(seq_vec, vdupq_n_u8(b't'));
        let acgt_mask = vorrq_u8(vorrq_u8(a_mask, t_mask), gc_mask);

        // 0xFF -> 0x01, then horizontal add (at most 16 per chunk)
        gc_count += vaddvq_u8(vshrq_n_u8(gc_mask, 7)) as usize;
        total_count += vaddvq_u8(vshrq_n_u8(acgt_mask, 7)) as usize;
    }

    let tail = count_gc_scalar(remainder);

    GcCounts {
        gc: gc_count + tail.gc,
        acgt: total_count + tail.acgt,
    }
}

/// Scalar fallback for non-ARM platforms
///
/// This provides a portable implementation for x86_64 and other architectures.
pub fn count_gc_scalar(seq: &[u8]) -> GcCounts {
    let mut counts = GcCounts::default();

    for &base in seq {
        match base {
            b'G' | b'C' | b'g' | b'c' => {
                counts.gc += 1;
                counts.acgt += 1;
            }
            b'A' | b'T' | b'a' | b't' => {
                counts.acgt += 1;
            }
            _ => {} // U, N and anything else stay out of the denominator
        }
    }

    counts
}
