//! Error types for seqsieve

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for seqsieve operations
pub type Result<T> = std::result::Result<T, SeqsieveError>;

/// Error types that can occur in seqsieve
#[derive(Debug, Error)]
pub enum SeqsieveError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid FASTQ format
    #[error("Invalid FASTQ format at line {line}: {msg}")]
    InvalidFastqFormat {
        /// Line number where error occurred
        line: usize,
        /// Error message
        msg: String,
    },

    /// Invalid FASTA format
    #[error("Invalid FASTA format at record {line}: {msg}")]
    InvalidFastaFormat {
        /// Record number where error occurred
        line: usize,
        /// Error message
        msg: String,
    },

    /// A bounds argument is neither a scalar nor a two-value pair
    #[error("Invalid bounds: {0}")]
    InvalidBoundsType(String),

    /// The named input source does not exist or cannot be opened
    #[error("Input source not found: {}", path.display())]
    MissingSource {
        /// Path that could not be opened
        path: PathBuf,
    },

    /// Zero-length (or base-free) input makes a mean or fraction undefined
    #[error("Degenerate sequence: {0}")]
    DegenerateSequence(String),

    /// Residue outside the alphabet required by a transformation
    #[error("Unknown residue '{residue}' at position {position}")]
    UnknownResidue {
        /// Offending residue
        residue: char,
        /// 0-based position in the sequence
        position: usize,
    },

    /// Transformation utility given an unrecognized operation token
    #[error("Unknown operation: '{0}'")]
    UnknownOperation(String),

    /// Operation exists but is not defined for this sequence kind
    #[error("Operation '{operation}' is not defined for {kind} sequences")]
    UnsupportedOperation {
        /// Operation name
        operation: &'static str,
        /// Sequence kind name
        kind: &'static str,
    },
}
