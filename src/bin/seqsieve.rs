//! seqsieve CLI
//!
//! # Usage
//!
//! ```bash
//! # Keep reads with 20-80 % GC, at most 150 bp, mean quality >= 30
//! seqsieve filter reads.fq.gz -o passed.fa --gc-bounds 20,80 --length-bounds 150 --quality-threshold 30
//!
//! # Transform sequences
//! seqsieve transform ATGC aUcg reverse_complement
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG` or pass `-v` for per-read detail.

use clap::{Parser, Subcommand};
use log::{error, info, LevelFilter};
use seqsieve::filter::{FailurePolicy, FilterConfig, FilterPipeline};
use seqsieve::operations::BoundSpec;
use seqsieve::tools::{run_dna_rna_tools, ToolOutput};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "seqsieve", version, about)]
struct Cli {
    /// Log per-read decisions (debug level) unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter a FASTQ file (plain or gzip) into FASTA
    Filter {
        /// Input FASTQ file
        input: PathBuf,

        /// Output FASTA file (gzip-compressed when it ends in .gz)
        #[arg(short, long)]
        output: PathBuf,

        /// GC percentage bounds: "UPPER" or "LOWER,UPPER" [default: 0,100]
        #[arg(long, allow_hyphen_values = true)]
        gc_bounds: Option<BoundSpec>,

        /// Read length bounds: "UPPER" or "LOWER,UPPER" [default: 0,4294967296]
        #[arg(long, allow_hyphen_values = true)]
        length_bounds: Option<BoundSpec>,

        /// Minimum mean Phred+33 quality
        #[arg(long, default_value_t = seqsieve::filter::DEFAULT_QUALITY_THRESHOLD)]
        quality_threshold: f64,

        /// Drop reads with undefined GC or quality instead of failing
        #[arg(long)]
        skip_degenerate: bool,

        /// Evaluate reads on all cores
        #[arg(long)]
        parallel: bool,
    },

    /// Apply an operation to sequences: SEQ... OPERATION
    ///
    /// OPERATION is one of transcribe, reverse, complement, reverse_complement.
    Transform {
        /// Sequences followed by the operation name
        #[arg(required = true, num_args = 1..)]
        args: Vec<String>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(default)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run_filter(
    input: PathBuf,
    output: PathBuf,
    config: FilterConfig,
    parallel: bool,
) -> seqsieve::Result<()> {
    let report = FilterPipeline::new(config)
        .with_parallel(parallel)
        .filter_fastq(&input, &output)?;
    info!("wrote {} reads to {}", report.passed, output.display());
    Ok(())
}

fn run_transform(args: &[String]) {
    match run_dna_rna_tools(args).output {
        ToolOutput::Single(seq) => println!("{}", seq),
        ToolOutput::Many(seqs) => {
            for seq in seqs {
                println!("{}", seq);
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Filter {
            input,
            output,
            gc_bounds,
            length_bounds,
            quality_threshold,
            skip_degenerate,
            parallel,
        } => {
            let mut config = FilterConfig::default().with_quality_threshold(quality_threshold);
            if let Some(bounds) = gc_bounds {
                config = config.with_gc_bounds(bounds);
            }
            if let Some(bounds) = length_bounds {
                config = config.with_length_bounds(bounds);
            }
            if skip_degenerate {
                config = config.with_policy(FailurePolicy::Skip);
            }

            if let Err(e) = run_filter(input, output, config, parallel) {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
        Command::Transform { args } => run_transform(&args),
    }

    ExitCode::SUCCESS
}
