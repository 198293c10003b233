//! Transparent gzip handling for FASTQ input and FASTA output
//!
//! Input compression is detected from content (gzip magic bytes `1f 8b`),
//! never from the file name. Output compression is chosen from the sink's
//! extension (`.gz` → gzip, anything else → plain).
//!
//! Multi-member gzip (including bgzip-produced files) is read with
//! `MultiGzDecoder`, so concatenated `.fq.gz` chunks stream as one file.

use crate::error::{Result, SeqsieveError};
use crate::io::DataSink;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// gzip magic bytes
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Buffer capacity for file readers and writers (128 KB)
pub const IO_BUFFER_SIZE: usize = 128 * 1024;

/// Where input records come from
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Local file path
    Local(PathBuf),
}

impl DataSource {
    /// Create a local file data source
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        DataSource::Local(path.as_ref().to_path_buf())
    }

    /// Path of a local source
    pub fn path(&self) -> &Path {
        match self {
            DataSource::Local(path) => path,
        }
    }

    /// Open the data source and return a buffered reader
    ///
    /// # Errors
    ///
    /// `MissingSource` when the file does not exist, `Io` for any other
    /// failure to open it.
    pub fn open(&self) -> Result<Box<dyn BufRead + Send>> {
        match self {
            DataSource::Local(path) => open_local_file(path),
        }
    }
}

fn open_local_file(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SeqsieveError::MissingSource {
            path: path.to_path_buf(),
        },
        _ => SeqsieveError::Io(e),
    })?;
    Ok(Box::new(BufReader::with_capacity(IO_BUFFER_SIZE, file)))
}

/// Check whether a buffer starts with the gzip magic bytes
#[inline]
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Reader that decompresses gzip input and passes plain input through
///
/// # Example
///
/// ```no_run
/// use seqsieve::io::compression::{CompressedReader, DataSource};
///
/// # fn main() -> seqsieve::Result<()> {
/// let source = DataSource::from_path("reads.fq.gz");
/// let reader = CompressedReader::new(source)?;
///
/// // Reader implements BufRead, use with FastqStream
/// # Ok(())
/// # }
/// ```
pub struct CompressedReader {
    inner: Box<dyn BufRead + Send>,
}

impl CompressedReader {
    /// Open a data source, sniffing the first bytes for gzip
    pub fn new(source: DataSource) -> Result<Self> {
        let reader = source.open()?;
        Self::from_buf_read(reader)
    }

    /// Wrap an already open reader, sniffing the first bytes for gzip
    pub fn from_buf_read(mut reader: Box<dyn BufRead + Send>) -> Result<Self> {
        let gzipped = is_gzip(reader.fill_buf()?);

        if gzipped {
            debug!("gzip input detected");
            let decoder = MultiGzDecoder::new(reader);
            Ok(Self {
                inner: Box::new(BufReader::with_capacity(IO_BUFFER_SIZE, decoder)),
            })
        } else {
            Ok(Self { inner: reader })
        }
    }
}

impl Read for CompressedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for CompressedReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }
}

/// Writer with optional gzip compression
///
/// Call [`finish`](Self::finish) explicitly: it is the only way to see errors
/// raised while finalizing the gzip trailer. `Drop` only makes a best-effort
/// flush.
///
/// # Example
///
/// ```no_run
/// use seqsieve::io::{DataSink, compression::CompressedWriter};
/// use std::io::Write;
///
/// # fn main() -> std::io::Result<()> {
/// let sink = DataSink::from_path("passed.fa.gz");
/// let mut writer = CompressedWriter::new(sink)?;
///
/// writer.write_all(b">read1\nACGT\n")?;
/// writer.finish()?;
/// # Ok(())
/// # }
/// ```
pub enum CompressedWriter {
    /// Uncompressed writer with buffering
    Plain(Option<BufWriter<Box<dyn Write>>>),

    /// Gzip compressed writer (flate2, default level)
    Gzip(Option<GzEncoder<BufWriter<Box<dyn Write>>>>),
}

impl CompressedWriter {
    /// Create a writer for a sink, gzip-compressing when the path ends in `.gz`
    pub fn new(sink: DataSink) -> io::Result<Self> {
        let compressed = sink.is_compressed();
        match sink {
            DataSink::Local(path) => {
                let file = File::create(&path)?;
                if compressed {
                    Self::new_gzip(Box::new(file))
                } else {
                    Self::new_plain(Box::new(file))
                }
            }
        }
    }

    /// Create a plain (uncompressed) writer
    pub fn new_plain(writer: Box<dyn Write>) -> io::Result<Self> {
        Ok(Self::Plain(Some(BufWriter::with_capacity(
            IO_BUFFER_SIZE,
            writer,
        ))))
    }

    /// Create a gzip compressed writer
    pub fn new_gzip(writer: Box<dyn Write>) -> io::Result<Self> {
        let encoder = GzEncoder::new(
            BufWriter::with_capacity(IO_BUFFER_SIZE, writer),
            Compression::default(),
        );
        Ok(Self::Gzip(Some(encoder)))
    }

    /// Flush buffered data without finalizing a compressed stream
    pub fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(Some(w)) => w.flush(),
            Self::Gzip(Some(w)) => w.flush(),
            _ => Ok(()),
        }
    }

    /// Flush everything and, for gzip, write the stream trailer
    pub fn finish(mut self) -> io::Result<()> {
        match &mut self {
            Self::Plain(w) => match w.take() {
                Some(mut writer) => writer.flush(),
                None => Ok(()),
            },
            Self::Gzip(w) => match w.take() {
                Some(encoder) => {
                    let mut inner = encoder.finish()?;
                    inner.flush()
                }
                None => Ok(()),
            },
        }
    }
}

impl Write for CompressedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(Some(w)) => w.write(buf),
            Self::Gzip(Some(w)) => w.write(buf),
            _ => Err(io::Error::new(
                io::ErrorKind::Other,
                "Cannot write to finished writer",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        CompressedWriter::flush(self)
    }
}

impl Drop for CompressedWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::{NamedTempFile, TempDir};

    fn gzip_bytes(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn read_all(reader: CompressedReader) -> Vec<u8> {
        let mut reader = reader;
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_is_gzip() {
        assert!(is_gzip(&[0x1f, 0x8b, 0x08]));
        assert!(!is_gzip(b"@read1"));
        assert!(!is_gzip(&[0x1f]));
        assert!(!is_gzip(&[]));
    }

    #[test]
    fn test_plain_passthrough() {
        let data = b"@r1\nACGT\n+\nIIII\n".to_vec();
        let reader =
            CompressedReader::from_buf_read(Box::new(Cursor::new(data.clone()))).unwrap();
        assert_eq!(read_all(reader), data);
    }

    #[test]
    fn test_gzip_detected_from_content() {
        let data = b"@r1\nACGT\n+\nIIII\n";
        let reader =
            CompressedReader::from_buf_read(Box::new(Cursor::new(gzip_bytes(data)))).unwrap();
        assert_eq!(read_all(reader), data);
    }

    #[test]
    fn test_multi_member_gzip() {
        let mut data = gzip_bytes(b"@r1\nACGT\n+\nIIII\n");
        data.extend(gzip_bytes(b"@r2\nGGCC\n+\n!!!!\n"));
        let reader = CompressedReader::from_buf_read(Box::new(Cursor::new(data))).unwrap();
        assert_eq!(
            read_all(reader),
            b"@r1\nACGT\n+\nIIII\n@r2\nGGCC\n+\n!!!!\n"
        );
    }

    #[test]
    fn test_empty_input() {
        let reader =
            CompressedReader::from_buf_read(Box::new(Cursor::new(Vec::new()))).unwrap();
        assert!(read_all(reader).is_empty());
    }

    #[test]
    fn test_missing_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.fq");
        let err = CompressedReader::new(DataSource::from_path(&path)).err().unwrap();
        assert!(matches!(err, SeqsieveError::MissingSource { path: p } if p == path));
    }

    #[test]
    fn test_gzip_round_trip_through_sink() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.fa.gz");

        let mut writer = CompressedWriter::new(DataSink::from_path(&path)).unwrap();
        assert!(matches!(writer, CompressedWriter::Gzip(_)));
        writer.write_all(b">r1\nACGT\n").unwrap();
        writer.finish().unwrap();

        let raw = std::fs::read(&path).unwrap();
        assert!(is_gzip(&raw));

        let reader = CompressedReader::new(DataSource::from_path(&path)).unwrap();
        assert_eq!(read_all(reader), b">r1\nACGT\n");
    }

    #[test]
    fn test_plain_sink() {
        let temp = NamedTempFile::new().unwrap();
        let mut writer = CompressedWriter::new(DataSink::from_path(temp.path())).unwrap();
        assert!(matches!(writer, CompressedWriter::Plain(_)));
        writer.write_all(b">r1\nACGT\n").unwrap();
        writer.finish().unwrap();

        assert_eq!(std::fs::read(temp.path()).unwrap(), b">r1\nACGT\n");
    }

    #[test]
    fn test_write_after_finish_via_take() {
        let mut writer = CompressedWriter::Plain(None);
        assert!(writer.write(b"x").is_err());
        assert!(writer.flush().is_ok());
    }
}
