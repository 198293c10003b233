//! I/O module: streaming FASTQ input, FASTA output, gzip handling
//!
//! Input is streamed in constant memory; compression is detected from
//! content on read and from the file extension on write.

pub mod compression;
mod fasta;
mod fastq;
pub mod sink;

pub use compression::{CompressedReader, CompressedWriter, DataSource};
pub use fasta::{FastaStream, FastaWriter, NO_WRAP};
pub use fastq::{FastqStream, BLOCK_SIZE};
pub use sink::DataSink;
