//! Record-level operations
//!
//! Operations that work on complete `FastqRecord` structures: per-read
//! metrics for filtering and FASTQ → FASTA conversion.
//!
//! # Examples
//!
//! ```
//! use seqsieve::FastqRecord;
//! use seqsieve::operations::{record_metrics, to_fasta_record};
//!
//! # fn main() -> seqsieve::Result<()> {
//! let record = FastqRecord::new(
//!     "read1".to_string(),
//!     b"ATGCATGC".to_vec(),
//!     b"IIIIIIII".to_vec(),
//! )
//! .with_description("2:N:0:1");
//!
//! let metrics = record_metrics(&record)?;
//! assert_eq!(metrics.gc, 50.0);
//! assert_eq!(metrics.length, 8);
//! assert_eq!(metrics.mean_quality, 40.0);
//!
//! let fasta = to_fasta_record(&record);
//! assert_eq!(fasta.header(), "read1 2:N:0:1");
//! assert_eq!(fasta.sequence, b"ATGCATGC");
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::operations::gc_content::gc_fraction;
use crate::operations::quality_filter::mean_quality;
use crate::types::{FastaRecord, FastqRecord};

/// Measurements a read is filtered on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadMetrics {
    /// GC content in percent (0–100)
    pub gc: f64,
    /// Sequence length in residues
    pub length: usize,
    /// Mean Phred+33 quality
    pub mean_quality: f64,
}

/// Measure a raw sequence/quality pair
///
/// GC content is computed first, then length, then mean quality; the first
/// degenerate measurement is returned as the error.
///
/// # Errors
///
/// `DegenerateSequence` when the sequence has no A/C/G/T base or the quality
/// string is empty.
pub fn measure(sequence: &[u8], quality: &[u8]) -> Result<ReadMetrics> {
    let gc = gc_fraction(sequence)?;
    let length = sequence.len();
    let mean_quality = mean_quality(quality)?;

    Ok(ReadMetrics {
        gc,
        length,
        mean_quality,
    })
}

/// Measure a FASTQ record
///
/// See [`measure`].
pub fn record_metrics(record: &FastqRecord) -> Result<ReadMetrics> {
    measure(&record.sequence, &record.quality)
}

/// Convert a FASTQ record to FASTA, keeping id and description verbatim
pub fn to_fasta_record(record: &FastqRecord) -> FastaRecord {
    FastaRecord::from(record)
}
