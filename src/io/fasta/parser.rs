//! FASTA streaming parser
//!
//! Reads back what [`FastaWriter`](super::FastaWriter) produces, wrapped or
//! not. A record is a `>` header line followed by one or more sequence lines;
//! blank lines are ignored.
//!
//! ```text
//! >SRX079804:1:SRR292678:1:1101:703304:703304 2:N:0:1 BH:ok
//! TAATAATATAAATTGCTTCTGCTTCTAATTTATCAAGATGTGATAA
//! ```

use crate::error::{Result, SeqsieveError};
use crate::io::compression::{CompressedReader, DataSource};
use crate::types::FastaRecord;
use std::io::BufRead;
use std::path::Path;

/// FASTA streaming parser
///
/// # Example
///
/// ```no_run
/// use seqsieve::FastaStream;
///
/// let stream = FastaStream::from_path("passed.fa.gz")?;
/// for record in stream {
///     let record = record?;
///     println!("{}: {} bp", record.id, record.sequence.len());
/// }
/// # Ok::<(), seqsieve::SeqsieveError>(())
/// ```
pub struct FastaStream<R: BufRead> {
    reader: R,
    line_buffer: String,
    line_number: usize,
    /// Header of the next record, read while scanning the current one
    pending_header: Option<String>,
}

impl FastaStream<CompressedReader> {
    /// Create a FASTA stream from a data source (plain or gzip)
    pub fn new(source: DataSource) -> Result<Self> {
        Ok(Self::from_reader(CompressedReader::new(source)?))
    }

    /// Create a FASTA stream from a local file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(DataSource::from_path(path))
    }
}

impl<R: BufRead> FastaStream<R> {
    /// Create a FASTA stream from any buffered reader
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line_buffer: String::with_capacity(256),
            line_number: 0,
            pending_header: None,
        }
    }

    /// Next non-blank line, trimmed; `None` at EOF
    fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            self.line_buffer.clear();
            if self.reader.read_line(&mut self.line_buffer)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.line_buffer.trim();
            if !line.is_empty() {
                return Ok(Some(line.to_string()));
            }
        }
    }

    fn read_record(&mut self) -> Result<Option<FastaRecord>> {
        let header = match self.pending_header.take() {
            Some(header) => header,
            None => match self.next_line()? {
                Some(line) => line,
                None => return Ok(None),
            },
        };

        let header_line = self.line_number;
        let Some(header) = header.strip_prefix('>') else {
            return Err(SeqsieveError::InvalidFastaFormat {
                line: header_line,
                msg: format!("Expected '>' at start of header, got: {}", header),
            });
        };

        let mut record = FastaRecord::from_header(header, Vec::new());

        while let Some(line) = self.next_line()? {
            if line.starts_with('>') {
                self.pending_header = Some(line);
                break;
            }
            record.sequence.extend_from_slice(line.as_bytes());
        }

        if record.sequence.is_empty() {
            return Err(SeqsieveError::InvalidFastaFormat {
                line: header_line,
                msg: format!("Record '{}' has no sequence", record.id),
            });
        }

        Ok(Some(record))
    }
}

impl<R: BufRead> Iterator for FastaStream<R> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}
