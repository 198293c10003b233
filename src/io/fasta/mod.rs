//! FASTA output and read-back
//!
//! ```no_run
//! use seqsieve::io::{FastaStream, FastaWriter};
//!
//! let mut writer = FastaWriter::create("copy.fa.gz")?;
//! writer.write_all(FastaStream::from_path("passed.fa")?)?;
//! writer.finish()?;
//! # Ok::<(), seqsieve::SeqsieveError>(())
//! ```

mod parser;
mod writer;

pub use parser::FastaStream;
pub use writer::{FastaWriter, NO_WRAP};
