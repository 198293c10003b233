//! FASTQ streaming parser
//!
//! Records are parsed in blocks of [`BLOCK_SIZE`] and handed out one at a
//! time, so memory stays constant regardless of file size. Each record is
//! the usual four lines: `@header`, sequence, `+[header]`, quality.
//!
//! The header is split at the first whitespace into `id` and `description`
//! (see [`FastqRecord::from_header`]).

use crate::error::{Result, SeqsieveError};
use crate::io::compression::{CompressedReader, DataSource};
use crate::types::FastqRecord;
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::Path;

/// Number of records parsed per block (10,000)
pub const BLOCK_SIZE: usize = 10_000;

/// FASTQ streaming parser with block-based buffering
///
/// # Example
///
/// ```no_run
/// use seqsieve::FastqStream;
///
/// # fn main() -> seqsieve::Result<()> {
/// let stream = FastqStream::from_path("reads.fq.gz")?;
///
/// for record in stream {
///     let record = record?;
///     println!("{}\t{}", record.id, record.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct FastqStream<R: BufRead> {
    reader: R,
    block_buffer: VecDeque<FastqRecord>,
    line1: String,
    line2: String,
    line3: String,
    line4: String,
    line_number: usize,
    finished: bool,
    pending_error: Option<SeqsieveError>,
}

impl<R: BufRead> FastqStream<R> {
    /// Create a new FASTQ stream from a buffered reader
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            block_buffer: VecDeque::with_capacity(BLOCK_SIZE),
            line1: String::with_capacity(256),
            line2: String::with_capacity(256),
            line3: String::with_capacity(256),
            line4: String::with_capacity(256),
            line_number: 0,
            finished: false,
            pending_error: None,
        }
    }
}

impl FastqStream<CompressedReader> {
    /// Create a FASTQ stream from a data source (plain or gzip)
    pub fn new(source: DataSource) -> Result<Self> {
        let compressed_reader = CompressedReader::new(source)?;
        Ok(Self::from_reader(compressed_reader))
    }

    /// Create a FASTQ stream from a file path
    ///
    /// # Errors
    ///
    /// `MissingSource` when the path does not exist.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(DataSource::from_path(path))
    }
}

impl<R: BufRead> FastqStream<R> {
    fn unexpected_eof(&self, after: &str) -> SeqsieveError {
        SeqsieveError::InvalidFastqFormat {
            line: self.line_number,
            msg: format!("Unexpected end of file after {}", after),
        }
    }

    fn read_record(&mut self) -> Result<Option<FastqRecord>> {
        self.line1.clear();
        self.line2.clear();
        self.line3.clear();
        self.line4.clear();

        // Blank lines between records (or trailing at EOF) are tolerated
        loop {
            if self.reader.read_line(&mut self.line1)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;
            if !self.line1.trim().is_empty() {
                break;
            }
            self.line1.clear();
        }

        if self.reader.read_line(&mut self.line2)? == 0 {
            return Err(self.unexpected_eof("header"));
        }
        self.line_number += 1;

        if self.reader.read_line(&mut self.line3)? == 0 {
            return Err(self.unexpected_eof("sequence"));
        }
        self.line_number += 1;

        if self.reader.read_line(&mut self.line4)? == 0 {
            return Err(self.unexpected_eof("separator"));
        }
        self.line_number += 1;

        if !self.line1.starts_with('@') {
            return Err(SeqsieveError::InvalidFastqFormat {
                line: self.line_number - 3,
                msg: format!(
                    "Expected '@' at start of header, got: {}",
                    self.line1.chars().next().unwrap_or(' ')
                ),
            });
        }

        if !self.line3.starts_with('+') {
            return Err(SeqsieveError::InvalidFastqFormat {
                line: self.line_number - 1,
                msg: format!(
                    "Expected '+' at start of separator, got: {}",
                    self.line3.chars().next().unwrap_or(' ')
                ),
            });
        }

        let sequence = self.line2.trim_end().as_bytes().to_vec();
        let quality = self.line4.trim_end().as_bytes().to_vec();

        if sequence.len() != quality.len() {
            return Err(SeqsieveError::InvalidFastqFormat {
                line: self.line_number,
                msg: format!(
                    "Sequence length ({}) != quality length ({})",
                    sequence.len(),
                    quality.len()
                ),
            });
        }

        let record = FastqRecord::from_header(&self.line1[1..], sequence, quality);
        if record.id.is_empty() {
            return Err(SeqsieveError::InvalidFastqFormat {
                line: self.line_number - 3,
                msg: "Empty read identifier".to_string(),
            });
        }

        Ok(Some(record))
    }

    /// Parse up to BLOCK_SIZE records. A parse error ends the stream but is
    /// only reported once the records read before it have been handed out.
    fn fill_block(&mut self) -> usize {
        self.block_buffer.clear();

        while self.block_buffer.len() < BLOCK_SIZE {
            match self.read_record() {
                Ok(Some(record)) => self.block_buffer.push_back(record),
                Ok(None) => {
                    self.finished = true;
                    break;
                }
                Err(e) => {
                    self.pending_error = Some(e);
                    self.finished = true;
                    break;
                }
            }
        }

        self.block_buffer.len()
    }
}

impl<R: BufRead> Iterator for FastqStream<R> {
    type Item = Result<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.block_buffer.is_empty() {
            if let Some(e) = self.pending_error.take() {
                return Some(Err(e));
            }
            if self.finished {
                return None;
            }
            if self.fill_block() == 0 {
                return self.pending_error.take().map(Err);
            }
        }

        self.block_buffer.pop_front().map(Ok)
    }
}
