//! Batch sequence transformation: `SEQ... OPERATION`
//!
//! [`run_dna_rna_tools`] takes sequences followed by one operation token,
//! classifies each sequence as DNA or RNA (RNA when it contains `U`/`u`),
//! and applies the operation to every sequence that passes
//! `is_correct_seq`. Bad input is never fatal: each skipped sequence (or an
//! unknown operation) is listed in [`ToolReport::skipped`].
//!
//! # Examples
//!
//! ```
//! use seqsieve::tools::{run_dna_rna_tools, ToolOutput};
//!
//! let report = run_dna_rna_tools(&["ATG", "transcribe"]);
//! assert_eq!(report.output, ToolOutput::Single("UAC".to_string()));
//!
//! let report = run_dna_rna_tools(&["ATG", "aUcg", "XYZ", "reverse"]);
//! assert_eq!(
//!     report.output,
//!     ToolOutput::Many(vec!["GTA".to_string(), "gcUa".to_string()])
//! );
//! assert_eq!(report.skipped.len(), 1);
//! ```

use crate::error::{Result, SeqsieveError};
use crate::sequence::{BiologicalSequence, Sequence};
use log::warn;
use std::fmt;
use std::str::FromStr;

/// Transformations available to the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// DNA → RNA base-pair mapping
    Transcribe,
    /// Residues in reverse order
    Reverse,
    /// Base-pair complement
    Complement,
    /// Complement, then reverse
    ReverseComplement,
}

impl Operation {
    /// Every operation, in token order
    pub const ALL: [Operation; 4] = [
        Operation::Transcribe,
        Operation::Reverse,
        Operation::Complement,
        Operation::ReverseComplement,
    ];

    /// Token naming the operation
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Transcribe => "transcribe",
            Operation::Reverse => "reverse",
            Operation::Complement => "complement",
            Operation::ReverseComplement => "reverse_complement",
        }
    }

    /// Apply the operation to a typed sequence
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` when the sequence kind does not support it
    /// (e.g. transcribing RNA), `UnknownResidue` from the pairing tables.
    pub fn apply(&self, sequence: &Sequence) -> Result<Sequence> {
        match self {
            Operation::Transcribe => sequence.transcribe(),
            Operation::Reverse => sequence.reverse(),
            Operation::Complement => sequence.complement(),
            Operation::ReverseComplement => sequence.reverse_complement(),
        }
    }
}

impl FromStr for Operation {
    type Err = SeqsieveError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| SeqsieveError::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why an input produced no output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Trailing token is not an operation (empty when no arguments were given)
    UnknownOperation(String),
    /// Sequence contains residues outside `{A, C, G, T, U}`
    InvalidSequence(String),
    /// Operation not defined for this sequence's kind
    Unsupported {
        /// Input sequence
        sequence: String,
        /// Requested operation
        operation: Operation,
    },
    /// Operation failed on an otherwise valid sequence (e.g. `T` in an RNA)
    Failed {
        /// Input sequence
        sequence: String,
        /// Error description
        message: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownOperation(token) => write!(f, "unknown operation '{}'", token),
            SkipReason::InvalidSequence(seq) => write!(f, "'{}' is not a nucleic acid", seq),
            SkipReason::Unsupported {
                sequence,
                operation,
            } => write!(f, "cannot {} '{}'", operation, sequence),
            SkipReason::Failed { sequence, message } => write!(f, "'{}': {}", sequence, message),
        }
    }
}

/// Transformed sequences
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutput {
    /// Exactly one sequence qualified
    Single(String),
    /// Zero or several sequences qualified, in input order
    Many(Vec<String>),
}

impl ToolOutput {
    fn from_results(mut results: Vec<String>) -> Self {
        match results.len() {
            1 => ToolOutput::Single(results.remove(0)),
            _ => ToolOutput::Many(results),
        }
    }

    /// Flatten into a list
    pub fn into_vec(self) -> Vec<String> {
        match self {
            ToolOutput::Single(seq) => vec![seq],
            ToolOutput::Many(seqs) => seqs,
        }
    }

    /// Number of output sequences
    pub fn len(&self) -> usize {
        match self {
            ToolOutput::Single(_) => 1,
            ToolOutput::Many(seqs) => seqs.len(),
        }
    }

    /// Whether nothing qualified
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of one tool run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReport {
    /// Transformed sequences
    pub output: ToolOutput,
    /// Inputs that produced nothing, in input order
    pub skipped: Vec<SkipReason>,
}

impl ToolReport {
    fn empty(reason: SkipReason) -> Self {
        warn!("{}", reason);
        Self {
            output: ToolOutput::Many(Vec::new()),
            skipped: vec![reason],
        }
    }
}

/// Apply one operation to many residue strings
///
/// Each input is typed via [`Sequence::nucleic_acid`], checked with
/// `is_correct_seq`, then transformed.
pub fn transform_all<S: AsRef<str>>(operation: Operation, sequences: &[S]) -> ToolReport {
    let mut results = Vec::with_capacity(sequences.len());
    let mut skipped = Vec::new();

    for raw in sequences {
        let raw = raw.as_ref();
        let sequence = Sequence::nucleic_acid(raw);

        if !sequence.is_correct_seq() {
            skipped.push(SkipReason::InvalidSequence(raw.to_string()));
            continue;
        }

        match operation.apply(&sequence) {
            Ok(transformed) => results.push(transformed.into_string()),
            Err(SeqsieveError::UnsupportedOperation { .. }) => {
                skipped.push(SkipReason::Unsupported {
                    sequence: raw.to_string(),
                    operation,
                })
            }
            Err(e) => skipped.push(SkipReason::Failed {
                sequence: raw.to_string(),
                message: e.to_string(),
            }),
        }
    }

    for reason in &skipped {
        warn!("skipped {}", reason);
    }

    ToolReport {
        output: ToolOutput::from_results(results),
        skipped,
    }
}

/// Run `SEQ... OPERATION`: the last argument names the operation
///
/// An empty argument list or an unknown operation yields empty output with a
/// single `UnknownOperation` skip.
pub fn run_dna_rna_tools<S: AsRef<str>>(args: &[S]) -> ToolReport {
    let Some((token, sequences)) = args.split_last() else {
        return ToolReport::empty(SkipReason::UnknownOperation(String::new()));
    };

    match token.as_ref().parse::<Operation>() {
        Ok(operation) => transform_all(operation, sequences),
        Err(_) => ToolReport::empty(SkipReason::UnknownOperation(token.as_ref().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(s: &str) -> ToolOutput {
        ToolOutput::Single(s.to_string())
    }

    #[test]
    fn test_operation_tokens() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
        assert!(matches!(
            "translate".parse::<Operation>(),
            Err(SeqsieveError::UnknownOperation(t)) if t == "translate"
        ));
    }

    #[test]
    fn test_each_operation_on_dna() {
        assert_eq!(run_dna_rna_tools(&["ATGc", "transcribe"]).output, single("UACg"));
        assert_eq!(run_dna_rna_tools(&["ATGc", "reverse"]).output, single("cGTA"));
        assert_eq!(run_dna_rna_tools(&["ATGc", "complement"]).output, single("TACg"));
        assert_eq!(
            run_dna_rna_tools(&["ATGc", "reverse_complement"]).output,
            single("gCAT")
        );
    }

    #[test]
    fn test_rna_uses_rna_pairing() {
        assert_eq!(run_dna_rna_tools(&["AUGC", "complement"]).output, single("UACG"));
    }

    #[test]
    fn test_many_outputs_keep_order() {
        let report = run_dna_rna_tools(&["AAA", "CCC", "GGG", "complement"]);
        assert_eq!(
            report.output,
            ToolOutput::Many(vec!["TTT".into(), "GGG".into(), "CCC".into()])
        );
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_invalid_sequences_are_skipped() {
        let report = run_dna_rna_tools(&["ATGX", "ATG", "complement"]);
        assert_eq!(report.output, single("TAC"));
        assert_eq!(report.skipped, vec![SkipReason::InvalidSequence("ATGX".into())]);

        let report = run_dna_rna_tools(&["ATGX", "reverse"]);
        assert_eq!(report.output, ToolOutput::Many(vec![]));
        assert!(report.output.is_empty());
    }

    #[test]
    fn test_transcribe_rna_is_unsupported() {
        let report = run_dna_rna_tools(&["AUG", "transcribe"]);
        assert!(report.output.is_empty());
        assert_eq!(
            report.skipped,
            vec![SkipReason::Unsupported {
                sequence: "AUG".into(),
                operation: Operation::Transcribe,
            }]
        );
    }

    #[test]
    fn test_mixed_t_and_u_passes_validation_but_fails_complement() {
        let report = run_dna_rna_tools(&["ATU", "complement"]);
        assert!(report.output.is_empty());
        assert!(matches!(report.skipped[0], SkipReason::Failed { .. }));

        // Reverse needs no pairing table
        assert_eq!(run_dna_rna_tools(&["ATU", "reverse"]).output, single("UTA"));
    }

    #[test]
    fn test_unknown_operation() {
        let report = run_dna_rna_tools(&["ATG", "translate"]);
        assert_eq!(report.output, ToolOutput::Many(vec![]));
        assert_eq!(report.skipped, vec![SkipReason::UnknownOperation("translate".into())]);
    }

    #[test]
    fn test_empty_arguments() {
        let args: [&str; 0] = [];
        let report = run_dna_rna_tools(&args);
        assert_eq!(report.output, ToolOutput::Many(vec![]));
        assert_eq!(report.skipped, vec![SkipReason::UnknownOperation(String::new())]);
    }

    #[test]
    fn test_operation_only() {
        let report = run_dna_rna_tools(&["reverse"]);
        assert_eq!(report.output, ToolOutput::Many(vec![]));
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_owned_arguments() {
        let args: Vec<String> = vec!["acgt".into(), "reverse_complement".into()];
        assert_eq!(run_dna_rna_tools(args.as_slice()).output.into_vec(), vec!["acgt"]);
    }
}
