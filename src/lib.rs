//! seqsieve: FASTQ read filtering and nucleic-acid sequence transformations
//!
//! # Overview
//!
//! seqsieve keeps the reads of a FASTQ file whose GC content, length and mean
//! Phred+33 quality fall inside given bounds, and writes them out as FASTA.
//! It also provides typed DNA / RNA / amino-acid sequences with complement,
//! reverse, reverse-complement, transcription and molecular-mass operations.
//!
//! ## Key Features
//!
//! - **Streaming**: FASTQ is parsed in constant-memory blocks, plain or gzip
//! - **Filtering**: scalar or `(lower, upper)` bounds for GC and length, a
//!   lower threshold for quality, over streams, slices (rayon) or mappings
//! - **Typed sequences**: closed [`Sequence`] enum plus per-kind newtypes
//! - **ARM-Native**: NEON GC counting on aarch64, scalar fallback elsewhere
//!
//! ## Quick Start
//!
//! ```no_run
//! use seqsieve::{filter_fastq, FilterConfig};
//!
//! # fn main() -> seqsieve::Result<()> {
//! let config = FilterConfig::default()
//!     .with_gc_bounds((20, 80))
//!     .with_length_bounds(150)
//!     .with_quality_threshold(30.0);
//!
//! let report = filter_fastq("reads.fq.gz", "passed.fa", &config)?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`filter`]: filter configuration, predicate and pipeline
//! - [`io`]: streaming FASTQ input, FASTA output, gzip handling
//! - [`operations`]: GC content, Phred quality, bounds and byte-level sequence primitives
//! - [`sequence`]: typed biological sequences
//! - [`tools`]: `SEQ... OPERATION` batch transformations

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod filter;
pub mod io;
pub mod operations;
pub mod sequence;
pub mod tools;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SeqsieveError};
pub use filter::{filter_fastq, FailurePolicy, FilterConfig, FilterPipeline, FilterReport};
pub use io::{FastaStream, FastaWriter, FastqStream};
pub use operations::{BoundSpec, Bounds};
pub use sequence::{
    AminoAcidSequence, BiologicalSequence, DnaSequence, NucleicAcid, RnaSequence, Sequence,
    SequenceKind,
};
pub use tools::{run_dna_rna_tools, Operation, ToolOutput, ToolReport};
pub use types::{FastaRecord, FastqRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
