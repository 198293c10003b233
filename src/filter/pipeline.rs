//! Applying the filter to record streams, slices, mappings and files
//!
//! Every entry point keeps input order (or keys) and never modifies the
//! records it keeps. Reads are judged independently, so
//! [`FilterPipeline::filter_records_parallel`] and the `parallel` file mode
//! give exactly the same result as the sequential forms.

use crate::error::{Result, SeqsieveError};
use crate::filter::predicate::{Criterion, FilterPredicate, Verdict};
use crate::filter::{FailurePolicy, FilterConfig};
use crate::io::{FastaWriter, FastqStream, BLOCK_SIZE};
use crate::operations::to_fasta_record;
use crate::types::FastqRecord;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::Path;

/// Counts from one filtering run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Reads examined
    pub total: usize,
    /// Reads kept
    pub passed: usize,
    /// Reads that failed a criterion
    pub rejected: usize,
    /// Degenerate reads dropped under [`FailurePolicy::Skip`]
    pub skipped: usize,
}

impl FilterReport {
    /// Add the counts of another report
    pub fn merge(&mut self, other: &FilterReport) {
        self.total += other.total;
        self.passed += other.passed;
        self.rejected += other.rejected;
        self.skipped += other.skipped;
    }
}

impl fmt::Display for FilterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} reads: {} passed, {} rejected, {} skipped",
            self.total, self.passed, self.rejected, self.skipped
        )
    }
}

/// Judgement on one read once the failure policy has been applied
#[derive(Debug)]
enum Decision {
    Keep,
    Reject(Criterion),
    Skip(SeqsieveError),
}

/// Filter engine built from a [`FilterConfig`]
///
/// # Example
///
/// ```
/// use seqsieve::filter::{FilterConfig, FilterPipeline};
/// use std::collections::BTreeMap;
///
/// # fn main() -> seqsieve::Result<()> {
/// let mut reads = BTreeMap::new();
/// reads.insert("good", ("ACGTACGT".to_string(), "IIIIIIII".to_string()));
/// reads.insert("poor", ("ACGTACGT".to_string(), "########".to_string()));
///
/// let pipeline = FilterPipeline::new(FilterConfig::default().with_quality_threshold(30.0));
/// let (kept, report): (BTreeMap<_, _>, _) = pipeline.filter_mapping(&reads)?;
///
/// assert!(kept.contains_key("good"));
/// assert!(!kept.contains_key("poor"));
/// assert_eq!(report.passed, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FilterPipeline {
    config: FilterConfig,
    predicate: FilterPredicate,
    parallel: bool,
}

impl FilterPipeline {
    /// Create a sequential pipeline
    pub fn new(config: FilterConfig) -> Self {
        Self {
            predicate: FilterPredicate::new(&config),
            config,
            parallel: false,
        }
    }

    /// Judge each block of file records on the rayon thread pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Predicate in use
    pub fn predicate(&self) -> &FilterPredicate {
        &self.predicate
    }

    fn decide(&self, sequence: &[u8], quality: &[u8]) -> Result<Decision> {
        match self.predicate.check(sequence, quality) {
            Ok(Verdict::Pass) => Ok(Decision::Keep),
            Ok(Verdict::Reject(criterion)) => Ok(Decision::Reject(criterion)),
            Err(e @ SeqsieveError::DegenerateSequence(_))
                if self.config.policy == FailurePolicy::Skip =>
            {
                Ok(Decision::Skip(e))
            }
            Err(e) => Err(e),
        }
    }

    /// Count a decision and report whether the read is kept
    fn tally(&self, report: &mut FilterReport, id: &dyn fmt::Display, decision: Decision) -> bool {
        report.total += 1;
        match decision {
            Decision::Keep => {
                report.passed += 1;
                true
            }
            Decision::Reject(criterion) => {
                debug!("rejected {} ({})", id, criterion);
                report.rejected += 1;
                false
            }
            Decision::Skip(reason) => {
                warn!("skipped {}: {}", id, reason);
                report.skipped += 1;
                false
            }
        }
    }

    fn decide_block(&self, records: &[FastqRecord]) -> Vec<Result<Decision>> {
        if self.parallel {
            records
                .par_iter()
                .map(|r| self.decide(&r.sequence, &r.quality))
                .collect()
        } else {
            records
                .iter()
                .map(|r| self.decide(&r.sequence, &r.quality))
                .collect()
        }
    }

    /// Filter a stream of parsed records, keeping input order
    ///
    /// Accepts what [`FastqStream`] yields; a parse error in the stream is
    /// returned as-is.
    ///
    /// # Errors
    ///
    /// Stream errors, and `DegenerateSequence` under [`FailurePolicy::Strict`].
    pub fn filter_records<I>(&self, records: I) -> Result<(Vec<FastqRecord>, FilterReport)>
    where
        I: IntoIterator<Item = Result<FastqRecord>>,
    {
        let mut report = FilterReport::default();
        let mut kept = Vec::new();

        for record in records {
            let record = record?;
            let decision = self.decide(&record.sequence, &record.quality)?;
            if self.tally(&mut report, &record.id, decision) {
                kept.push(record);
            }
        }

        Ok((kept, report))
    }

    /// Filter an in-memory slice on the rayon thread pool
    ///
    /// Returns the same records, report and (under `Strict`) the same first
    /// error as the sequential form.
    pub fn filter_records_parallel(
        &self,
        records: &[FastqRecord],
    ) -> Result<(Vec<FastqRecord>, FilterReport)> {
        let decisions: Vec<Result<Decision>> = records
            .par_iter()
            .map(|r| self.decide(&r.sequence, &r.quality))
            .collect();

        let mut report = FilterReport::default();
        let mut kept = Vec::new();
        for (record, decision) in records.iter().zip(decisions) {
            if self.tally(&mut report, &record.id, decision?) {
                kept.push(record.clone());
            }
        }

        Ok((kept, report))
    }

    /// Filter a `name → (sequence, quality)` mapping, keeping keys
    ///
    /// The output container is chosen by the caller (`HashMap`, `BTreeMap`,
    /// `Vec<(K, _)>`, ...).
    pub fn filter_mapping<'a, K, I, M>(&self, entries: I) -> Result<(M, FilterReport)>
    where
        K: Clone + fmt::Display + 'a,
        I: IntoIterator<Item = (&'a K, &'a (String, String))>,
        M: FromIterator<(K, (String, String))>,
    {
        let mut report = FilterReport::default();

        let kept = entries
            .into_iter()
            .filter_map(|(name, value)| {
                let (sequence, quality) = value;
                match self.decide(sequence.as_bytes(), quality.as_bytes()) {
                    Ok(decision) => self
                        .tally(&mut report, name, decision)
                        .then(|| Ok((name.clone(), value.clone()))),
                    Err(e) => Some(Err(e)),
                }
            })
            .collect::<Result<M>>()?;

        Ok((kept, report))
    }

    /// Filter a FASTQ file (plain or gzip) into a FASTA file
    ///
    /// Output is gzip-compressed when `output` ends in `.gz`. Each kept read
    /// is written as `>` followed by its input header line, then its
    /// sequence on one line.
    ///
    /// # Errors
    ///
    /// `MissingSource` when `input` does not exist. Parse and write errors,
    /// and `DegenerateSequence` under [`FailurePolicy::Strict`]. Whatever the
    /// error, no output file is left behind.
    pub fn filter_fastq<P, Q>(&self, input: P, output: Q) -> Result<FilterReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let input = input.as_ref();
        let output = output.as_ref();

        let stream = FastqStream::from_path(input)?;
        let writer = FastaWriter::create(output)?;

        debug!(
            "filtering {} -> {} with gc {}, length {}, quality >= {}",
            input.display(),
            output.display(),
            self.config.gc_bounds,
            self.config.length_bounds,
            self.config.quality_threshold
        );

        match self.write_filtered(stream, writer) {
            Ok(report) => {
                info!("{}: {}", input.display(), report);
                Ok(report)
            }
            Err(e) => {
                // Writer is already dropped here, so the file is closed
                match fs::remove_file(output) {
                    Ok(()) => debug!("removed partial output {}", output.display()),
                    Err(rm) => warn!(
                        "could not remove partial output {}: {}",
                        output.display(),
                        rm
                    ),
                }
                Err(e)
            }
        }
    }

    fn write_filtered<I>(&self, records: I, mut writer: FastaWriter) -> Result<FilterReport>
    where
        I: IntoIterator<Item = Result<FastqRecord>>,
    {
        let mut report = FilterReport::default();
        let mut block = Vec::with_capacity(BLOCK_SIZE);
        for record in records {
            block.push(record?);
            if block.len() == BLOCK_SIZE {
                self.write_block(&block, &mut writer, &mut report)?;
                block.clear();
            }
        }
        self.write_block(&block, &mut writer, &mut report)?;
        writer.finish()?;
        Ok(report)
    }

    fn write_block(
        &self,
        block: &[FastqRecord],
        writer: &mut FastaWriter,
        report: &mut FilterReport,
    ) -> Result<()> {
        for (record, decision) in block.iter().zip(self.decide_block(block)) {
            if self.tally(report, &record.id, decision?) {
                writer.write_record(&to_fasta_record(record))?;
            }
        }
        Ok(())
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}

/// Filter a FASTQ file into a FASTA file
///
/// Shorthand for `FilterPipeline::new(*config).filter_fastq(input, output)`.
///
/// # Example
///
/// ```no_run
/// use seqsieve::filter::{filter_fastq, FilterConfig};
///
/// # fn main() -> seqsieve::Result<()> {
/// let config = FilterConfig::default()
///     .with_gc_bounds((20, 80))
///     .with_quality_threshold(30.0);
///
/// let report = filter_fastq("reads.fq.gz", "passed.fa", &config)?;
/// println!("{}", report);
/// # Ok(())
/// # }
/// ```
pub fn filter_fastq<P, Q>(input: P, output: Q, config: &FilterConfig) -> Result<FilterReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    FilterPipeline::new(*config).filter_fastq(input, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use tempfile::TempDir;

    fn read(id: &str, seq: &str, qual: &str) -> FastqRecord {
        FastqRecord::new(id.to_string(), seq.as_bytes().to_vec(), qual.as_bytes().to_vec())
    }

    fn reads() -> Vec<FastqRecord> {
        vec![
            read("at", "AATTAATTAA", "IIIIIIIIII"),
            read("gc", "GGCCGGCCGG", "IIIIIIIIII"),
            read("low_q", "ACGTACGTAC", "##########"),
            read("mid", "ACGTACGTAC", "5555555555"),
        ]
    }

    fn ids(records: &[FastqRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_filter_records_preserves_order() {
        let pipeline = FilterPipeline::new(
            FilterConfig::default()
                .with_gc_bounds((0, 60))
                .with_quality_threshold(20.0),
        );

        let (kept, report) = pipeline
            .filter_records(reads().into_iter().map(Ok))
            .unwrap();
        assert_eq!(ids(&kept), vec!["at", "mid"]);
        assert_eq!(
            report,
            FilterReport {
                total: 4,
                passed: 2,
                rejected: 2,
                skipped: 0
            }
        );
    }

    #[test]
    fn test_defaults_keep_everything() {
        let (kept, _) = FilterPipeline::default()
            .filter_records(reads().into_iter().map(Ok))
            .unwrap();
        assert_eq!(kept, reads());
    }

    #[test]
    fn test_quality_100_rejects_all() {
        let pipeline = FilterPipeline::new(FilterConfig::default().with_quality_threshold(100.0));
        let (kept, report) = pipeline.filter_records(reads().into_iter().map(Ok)).unwrap();
        assert!(kept.is_empty());
        assert_eq!(report.rejected, 4);
    }

    #[test]
    fn test_strict_policy_stops_on_degenerate_read() {
        let mut records = reads();
        records.insert(1, read("all_n", "NNNN", "IIII"));

        let result = FilterPipeline::default().filter_records(records.into_iter().map(Ok));
        assert!(matches!(result, Err(SeqsieveError::DegenerateSequence(_))));
    }

    #[test]
    fn test_skip_policy_counts_degenerate_reads() {
        let mut records = reads();
        records.insert(1, read("all_n", "NNNN", "IIII"));
        records.push(read("empty", "", ""));

        let pipeline = FilterPipeline::new(FilterConfig::default().with_policy(FailurePolicy::Skip));
        let (kept, report) = pipeline.filter_records(records.into_iter().map(Ok)).unwrap();

        assert_eq!(ids(&kept), vec!["at", "gc", "low_q", "mid"]);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.total, 6);
    }

    #[test]
    fn test_stream_errors_propagate_under_skip() {
        let pipeline = FilterPipeline::new(FilterConfig::default().with_policy(FailurePolicy::Skip));
        let records = vec![
            Ok(read("at", "AATT", "IIII")),
            Err(SeqsieveError::InvalidFastqFormat {
                line: 5,
                msg: "truncated".to_string(),
            }),
        ];
        assert!(matches!(
            pipeline.filter_records(records),
            Err(SeqsieveError::InvalidFastqFormat { line: 5, .. })
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut records = Vec::new();
        for i in 0..500 {
            records.extend(reads().into_iter().map(|mut r| {
                r.id = format!("{}_{}", r.id, i);
                r
            }));
        }
        let pipeline = FilterPipeline::new(
            FilterConfig::default()
                .with_gc_bounds((10, 90))
                .with_quality_threshold(10.0),
        );

        let sequential = pipeline
            .filter_records(records.clone().into_iter().map(Ok))
            .unwrap();
        let parallel = pipeline.filter_records_parallel(&records).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_parallel_returns_first_error_in_order() {
        let records = vec![
            read("ok", "ACGT", "IIII"),
            read("no_bases", "NNNN", "IIII"),
            read("no_quality", "ACGT", ""),
        ];
        match FilterPipeline::default().filter_records_parallel(&records) {
            Err(SeqsieveError::DegenerateSequence(msg)) => assert!(!msg.contains("quality")),
            other => panic!("expected DegenerateSequence, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_mapping_keeps_keys() {
        let mut reads = HashMap::new();
        reads.insert("r1".to_string(), ("AATTAATT".to_string(), "IIIIIIII".to_string()));
        reads.insert("r2".to_string(), ("GGCCGGCC".to_string(), "IIIIIIII".to_string()));
        reads.insert("r3".to_string(), ("ATATGCGC".to_string(), "IIIIIIII".to_string()));

        let pipeline = FilterPipeline::new(FilterConfig::default().with_gc_bounds(50));
        let (kept, report): (HashMap<_, _>, _) = pipeline.filter_mapping(&reads).unwrap();

        assert_eq!(kept.len(), 2);
        assert_eq!(kept["r1"], reads["r1"]);
        assert_eq!(kept["r3"], reads["r3"]);
        assert_eq!(report.rejected, 1);
    }

    #[test]
    fn test_filter_mapping_degenerate_policy() {
        let mut reads = BTreeMap::new();
        reads.insert(1, ("ACGT".to_string(), "IIII".to_string()));
        reads.insert(2, ("NNNN".to_string(), "IIII".to_string()));

        let strict: Result<(BTreeMap<_, _>, _)> = FilterPipeline::default().filter_mapping(&reads);
        assert!(matches!(strict, Err(SeqsieveError::DegenerateSequence(_))));

        let pipeline = FilterPipeline::new(FilterConfig::default().with_policy(FailurePolicy::Skip));
        let (kept, report): (Vec<_>, _) = pipeline.filter_mapping(&reads).unwrap();
        assert_eq!(kept, vec![(1, ("ACGT".to_string(), "IIII".to_string()))]);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_filter_fastq_missing_input_creates_no_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("absent.fq");
        let output = dir.path().join("out.fa");

        let err = filter_fastq(&input, &output, &FilterConfig::default()).unwrap_err();
        assert!(matches!(err, SeqsieveError::MissingSource { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_filter_fastq_malformed_input_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("truncated.fq");
        let output = dir.path().join("out.fa");
        std::fs::write(&input, "@r1\nACGT\n+\nIIII\n@r2\nACGT\n+\nII\n").unwrap();

        let err = filter_fastq(&input, &output, &FilterConfig::default()).unwrap_err();
        assert!(matches!(err, SeqsieveError::InvalidFastqFormat { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_filter_fastq_parallel_blocks() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("reads.fq");
        let mut text = String::new();
        for i in 0..(BLOCK_SIZE + 10) {
            let (seq, qual) = if i % 3 == 0 {
                ("GGGGCCCC", "IIIIIIII")
            } else {
                ("AATTGCAA", "IIIIIIII")
            };
            text.push_str(&format!("@read{} 1:N:0:1\n{}\n+\n{}\n", i, seq, qual));
        }
        std::fs::write(&input, text).unwrap();

        let config = FilterConfig::default().with_gc_bounds(50);
        let sequential_out = dir.path().join("seq.fa");
        let parallel_out = dir.path().join("par.fa");

        let sequential = FilterPipeline::new(config)
            .filter_fastq(&input, &sequential_out)
            .unwrap();
        let parallel = FilterPipeline::new(config)
            .with_parallel(true)
            .filter_fastq(&input, &parallel_out)
            .unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(sequential.total, BLOCK_SIZE + 10);
        assert_eq!(
            std::fs::read(&sequential_out).unwrap(),
            std::fs::read(&parallel_out).unwrap()
        );
    }

    #[test]
    fn test_report_merge_and_display() {
        let mut report = FilterReport {
            total: 3,
            passed: 1,
            rejected: 1,
            skipped: 1,
        };
        report.merge(&report.clone());
        assert_eq!(report.total, 6);
        assert_eq!(report.to_string(), "6 reads: 2 passed, 2 rejected, 2 skipped");
    }

    use proptest::prelude::*;

    fn arb_read() -> impl Strategy<Value = FastqRecord> {
        ("[A-Za-z0-9_]{1,12}", "[ACGTN]{1,60}").prop_flat_map(|(id, seq)| {
            let len = seq.len();
            proptest::collection::vec(33u8..=75, len).prop_map(move |qual| {
                FastqRecord::new(id.clone(), seq.clone().into_bytes(), qual)
            })
        })
    }

    proptest! {
        /// Re-filtering the survivors with the same bounds changes nothing
        #[test]
        fn test_filtering_is_idempotent(
            records in proptest::collection::vec(arb_read(), 0..40),
            gc_upper in 0.0f64..100.0,
            length_upper in 1usize..80,
            threshold in 0.0f64..42.0,
        ) {
            let pipeline = FilterPipeline::new(
                FilterConfig::default()
                    .with_gc_bounds(gc_upper)
                    .with_length_bounds(length_upper)
                    .with_quality_threshold(threshold)
                    .with_policy(FailurePolicy::Skip),
            );

            let (once, _) = pipeline.filter_records(records.into_iter().map(Ok)).unwrap();
            let (twice, report) = pipeline.filter_records(once.clone().into_iter().map(Ok)).unwrap();

            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(report.passed, once.len());
            prop_assert_eq!(report.skipped, 0);
        }

        /// Every survivor actually satisfies all three criteria
        #[test]
        fn test_survivors_satisfy_predicate(
            records in proptest::collection::vec(arb_read(), 0..40),
            threshold in 0.0f64..42.0,
        ) {
            let config = FilterConfig::default()
                .with_gc_bounds((20, 80))
                .with_quality_threshold(threshold)
                .with_policy(FailurePolicy::Skip);
            let (kept, _) = FilterPipeline::new(config)
                .filter_records(records.into_iter().map(Ok))
                .unwrap();

            let predicate = FilterPredicate::new(&config);
            for record in &kept {
                prop_assert!(predicate.accepts_record(record).unwrap());
            }
        }
    }
}
