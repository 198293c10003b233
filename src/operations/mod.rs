//! Read statistics, bounds handling and sequence manipulation primitives
//!
//! This module provides:
//! - Read statistics: GC content (NEON-optimized), Phred+33 mean quality
//! - Bounds normalization for the filter criteria
//! - Sequence manipulation primitives: complement, reverse, transcription,
//!   validation, amino-acid mass
//! - Record-level metrics and FASTQ → FASTA conversion
//!
//! # Organization
//!
//! - `gc_content`, `quality_filter`: per-read statistics
//! - `bounds`: scalar / pair bounds → canonical `(lower, upper)`
//! - `sequence`: core sequence transformations
//! - `record_ops`: operations on whole `FastqRecord`s

pub mod bounds;
pub mod gc_content;
pub mod quality_filter;
pub mod record_ops;
pub mod sequence;

pub use bounds::{normalize, BoundSpec, Bounds};
pub use gc_content::{count_gc, count_gc_scalar, gc_fraction, GCContent, GcCounts};
pub use quality_filter::{
    mean_quality, passes_quality_filter, phred_score, phred_scores, PHRED_OFFSET,
};
pub use record_ops::{measure, record_metrics, to_fasta_record, ReadMetrics};

// Sequence manipulation primitives
pub use sequence::{
    complement, complement_dna, complement_rna, contains_uracil, is_amino_acid, is_nucleic_acid,
    mass_dalton, residue_mass, reverse, reverse_complement, transcribe,
};
