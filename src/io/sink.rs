//! Output destinations for filtered records
//!
//! `DataSink` is the write counterpart to `DataSource`: a local path whose
//! extension selects compression.
//!
//! # Example
//!
//! ```no_run
//! use seqsieve::io::DataSink;
//!
//! let sink = DataSink::from_path("passed.fa.gz");
//! assert!(sink.is_compressed());
//! ```

use std::path::{Path, PathBuf};

/// Output destination for streaming writes
#[derive(Debug, Clone)]
pub enum DataSink {
    /// Write to a local file path
    ///
    /// A `.gz` / `.gzip` extension selects gzip compression.
    Local(PathBuf),
}

impl DataSink {
    /// Create a sink from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::Local(path.as_ref().to_path_buf())
    }

    pub(crate) fn extension(&self) -> Option<&str> {
        match self {
            Self::Local(path) => path.extension().and_then(|s| s.to_str()),
        }
    }

    /// Check if this sink represents a compressed output
    pub fn is_compressed(&self) -> bool {
        matches!(self.extension(), Some("gz") | Some("gzip"))
    }
}
