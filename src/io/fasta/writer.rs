//! FASTA writer with gzip support
//!
//! Writes `>` and the record header followed by the sequence. The filter
//! pipeline writes each sequence on a single line; [`FastaWriter::with_line_width`]
//! turns on wrapping for other callers.

use crate::error::{Result, SeqsieveError};
use crate::io::compression::CompressedWriter;
use crate::io::sink::DataSink;
use crate::types::FastaRecord;
use std::io::Write;
use std::path::Path;

/// Line width meaning "never wrap"
pub const NO_WRAP: usize = usize::MAX;

/// FASTA writer
///
/// Compression follows the sink: `.gz` paths are gzip-compressed.
///
/// # Example
///
/// ```no_run
/// use seqsieve::io::FastaWriter;
/// use seqsieve::FastaRecord;
///
/// # fn main() -> seqsieve::Result<()> {
/// let mut writer = FastaWriter::create("passed.fa.gz")?;
///
/// let record = FastaRecord::new("read1".to_string(), b"GATTACA".to_vec())
///     .with_description("1:N:0:1");
/// writer.write_record(&record)?;
/// writer.finish()?;
/// # Ok(())
/// # }
/// ```
pub struct FastaWriter {
    writer: CompressedWriter,
    line_width: usize,
    records_written: usize,
}

impl FastaWriter {
    /// Create a FASTA writer for a sink (no wrapping)
    pub fn new(sink: DataSink) -> Result<Self> {
        Ok(Self {
            writer: CompressedWriter::new(sink)?,
            line_width: NO_WRAP,
            records_written: 0,
        })
    }

    /// Create a FASTA writer from a file path, truncating any existing file
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(DataSink::from_path(path))
    }

    /// Wrap sequence lines at `width` residues ([`NO_WRAP`] disables wrapping)
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.line_width = width.max(1);
        self
    }

    /// Write a single FASTA record
    ///
    /// # Errors
    ///
    /// `InvalidFastaFormat` for an empty id or empty sequence, `Io` for write
    /// failures.
    pub fn write_record(&mut self, record: &FastaRecord) -> Result<()> {
        if record.id.is_empty() {
            return Err(SeqsieveError::InvalidFastaFormat {
                line: self.records_written + 1,
                msg: "Sequence ID cannot be empty".to_string(),
            });
        }

        if record.sequence.is_empty() {
            return Err(SeqsieveError::InvalidFastaFormat {
                line: self.records_written + 1,
                msg: format!("Sequence of '{}' cannot be empty", record.id),
            });
        }

        writeln!(self.writer, ">{}", record.header())?;
        for line in record.sequence.chunks(self.line_width) {
            self.writer.write_all(line)?;
            self.writer.write_all(b"\n")?;
        }

        self.records_written += 1;
        Ok(())
    }

    /// Write every record of an iterator, stopping at the first error
    pub fn write_all<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<FastaRecord>>,
    {
        for record in records {
            self.write_record(&record?)?;
        }
        Ok(())
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush buffered data
    pub fn flush(&mut self) -> Result<()> {
        Ok(self.writer.flush()?)
    }

    /// Flush and finalize the output (writes the gzip trailer when compressed)
    pub fn finish(self) -> Result<()> {
        Ok(self.writer.finish()?)
    }
}
