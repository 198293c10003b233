//! Typed biological sequences
//!
//! A sequence is a residue string plus a fixed kind: DNA, RNA or amino acid.
//! Each kind has its own newtype ([`DnaSequence`], [`RnaSequence`],
//! [`AminoAcidSequence`]); [`Sequence`] is the closed enum over all three for
//! code that only learns the kind at runtime.
//!
//! Construction never validates. [`BiologicalSequence::is_correct_seq`] is a
//! total check callable on demand, while transformations
//! ([`NucleicAcid::complement`], [`DnaSequence::transcribe`],
//! [`AminoAcidSequence::get_mass_dalton`]) fail with `UnknownResidue` on
//! residues outside their tables.
//!
//! # Examples
//!
//! ```
//! use seqsieve::sequence::{BiologicalSequence, DnaSequence, NucleicAcid};
//!
//! # fn main() -> seqsieve::Result<()> {
//! let dna = DnaSequence::new("ATGc");
//! assert!(dna.is_correct_seq());
//! assert_eq!(dna.complement()?.as_str(), "TACg");
//! assert_eq!(dna.reverse_complement()?.as_str(), "gCAT");
//!
//! let rna = dna.transcribe()?;
//! assert_eq!(rna.as_str(), "UACg");
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SeqsieveError};
use crate::operations::sequence as ops;
use std::fmt;

/// Kind tag of a biological sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// Deoxyribonucleic acid
    Dna,
    /// Ribonucleic acid
    Rna,
    /// Protein (20 standard amino acids)
    AminoAcid,
}

impl SequenceKind {
    /// Short human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            SequenceKind::Dna => "DNA",
            SequenceKind::Rna => "RNA",
            SequenceKind::AminoAcid => "amino-acid",
        }
    }

    /// Guess the nucleic-acid kind from residues: RNA if any `U`/`u`, else DNA
    pub fn infer(residues: &str) -> Self {
        if ops::contains_uracil(residues.as_bytes()) {
            SequenceKind::Rna
        } else {
            SequenceKind::Dna
        }
    }

    /// Whether this is DNA or RNA
    pub fn is_nucleic_acid(&self) -> bool {
        matches!(self, SequenceKind::Dna | SequenceKind::Rna)
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Behaviour shared by every sequence kind
pub trait BiologicalSequence {
    /// Residues as a string slice
    fn as_str(&self) -> &str;

    /// Kind tag, fixed at construction
    fn kind(&self) -> SequenceKind;

    /// True iff every residue (case-insensitive) belongs to the kind's alphabet
    ///
    /// Never fails. For DNA and RNA the alphabet is `{A, T, C, G, U}`, so a
    /// sequence mixing T and U still passes.
    fn is_correct_seq(&self) -> bool;

    /// Number of residues
    fn len(&self) -> usize {
        self.as_str().chars().count()
    }

    /// Whether the sequence has no residues
    fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// Residue at `index`, if any
    fn get(&self, index: usize) -> Option<char> {
        self.as_str().chars().nth(index)
    }

    /// Kind-qualified rendering, e.g. `DNASequence ATGC`
    fn describe(&self) -> String {
        let label = match self.kind() {
            SequenceKind::Dna => "DNASequence",
            SequenceKind::Rna => "RNASequence",
            SequenceKind::AminoAcid => "AminoAcidSequence",
        };
        format!("{} {}", label, self.as_str())
    }
}

/// Operations defined for DNA and RNA
///
/// Results keep the receiver's concrete type.
pub trait NucleicAcid: BiologicalSequence + Sized {
    /// Wrap residues without validation
    fn from_residues(residues: String) -> Self;

    /// Whether complementation pairs A with U instead of T
    ///
    /// Defaults to "the residues contain `U`/`u`".
    fn uses_rna_pairing(&self) -> bool {
        ops::contains_uracil(self.as_str().as_bytes())
    }

    /// Complement each residue, with RNA pairing when [`uses_rna_pairing`](Self::uses_rna_pairing)
    fn complement(&self) -> Result<Self> {
        let residues = self.as_str().as_bytes();
        let bytes = if self.uses_rna_pairing() {
            ops::complement_rna(residues)?
        } else {
            ops::complement_dna(residues)?
        };
        Ok(Self::from_residues(residues_from_bytes(bytes)))
    }

    /// Residues in reverse order
    fn reverse(&self) -> Self {
        Self::from_residues(self.as_str().chars().rev().collect())
    }

    /// Complement, then reverse
    fn reverse_complement(&self) -> Result<Self> {
        Ok(self.complement()?.reverse())
    }
}

// Transformation tables only ever emit ASCII
fn residues_from_bytes(bytes: Vec<u8>) -> String {
    bytes.into_iter().map(char::from).collect()
}

macro_rules! sequence_newtype {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $check:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Wrap residues without validation
            pub fn new(residues: impl Into<String>) -> Self {
                Self(residues.into())
            }

            /// Consume the sequence and return its residues
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl BiologicalSequence for $name {
            fn as_str(&self) -> &str {
                &self.0
            }

            fn kind(&self) -> SequenceKind {
                $kind
            }

            fn is_correct_seq(&self) -> bool {
                $check(self.0.as_bytes())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(residues: &str) -> Self {
                Self::new(residues)
            }
        }

        impl From<String> for $name {
            fn from(residues: String) -> Self {
                Self::new(residues)
            }
        }
    };
}

sequence_newtype!(
    /// A DNA sequence
    DnaSequence,
    SequenceKind::Dna,
    ops::is_nucleic_acid
);

sequence_newtype!(
    /// An RNA sequence
    RnaSequence,
    SequenceKind::Rna,
    ops::is_nucleic_acid
);

sequence_newtype!(
    /// A protein sequence in one-letter amino-acid codes
    AminoAcidSequence,
    SequenceKind::AminoAcid,
    ops::is_amino_acid
);

impl NucleicAcid for DnaSequence {
    fn from_residues(residues: String) -> Self {
        Self(residues)
    }
}

impl NucleicAcid for RnaSequence {
    fn from_residues(residues: String) -> Self {
        Self(residues)
    }

    fn uses_rna_pairing(&self) -> bool {
        true
    }
}

impl DnaSequence {
    /// Map every residue to its RNA base-pair partner (A→U, T→A, C→G, G→C)
    ///
    /// # Errors
    ///
    /// `UnknownResidue` for anything other than A/C/G/T in either case.
    pub fn transcribe(&self) -> Result<RnaSequence> {
        let bytes = ops::transcribe(self.0.as_bytes())?;
        Ok(RnaSequence(residues_from_bytes(bytes)))
    }
}

impl AminoAcidSequence {
    /// Molecular mass in Daltons (sum of per-residue molar masses)
    ///
    /// # Errors
    ///
    /// `UnknownResidue` for anything outside the 20 uppercase one-letter codes.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqsieve::sequence::AminoAcidSequence;
    ///
    /// let peptide = AminoAcidSequence::new("MKV");
    /// let mass = peptide.get_mass_dalton().unwrap();
    /// assert!((mass - 412.55).abs() < 1e-9);
    /// ```
    pub fn get_mass_dalton(&self) -> Result<f64> {
        ops::mass_dalton(self.0.as_bytes())
    }
}

/// Closed set of sequence kinds, dispatched on the tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sequence {
    /// DNA
    Dna(DnaSequence),
    /// RNA
    Rna(RnaSequence),
    /// Protein
    AminoAcid(AminoAcidSequence),
}

impl Sequence {
    /// Build a sequence of the given kind (no validation)
    pub fn new(kind: SequenceKind, residues: impl Into<String>) -> Self {
        match kind {
            SequenceKind::Dna => Sequence::Dna(DnaSequence::new(residues)),
            SequenceKind::Rna => Sequence::Rna(RnaSequence::new(residues)),
            SequenceKind::AminoAcid => Sequence::AminoAcid(AminoAcidSequence::new(residues)),
        }
    }

    /// Build a DNA or RNA sequence, picking RNA when any `U`/`u` is present
    pub fn nucleic_acid(residues: impl Into<String>) -> Self {
        let residues = residues.into();
        let kind = SequenceKind::infer(&residues);
        Self::new(kind, residues)
    }

    fn unsupported(&self, operation: &'static str) -> SeqsieveError {
        SeqsieveError::UnsupportedOperation {
            operation,
            kind: self.kind().name(),
        }
    }

    /// Complement (DNA and RNA only)
    pub fn complement(&self) -> Result<Sequence> {
        match self {
            Sequence::Dna(seq) => seq.complement().map(Sequence::Dna),
            Sequence::Rna(seq) => seq.complement().map(Sequence::Rna),
            Sequence::AminoAcid(_) => Err(self.unsupported("complement")),
        }
    }

    /// Reverse (DNA and RNA only)
    pub fn reverse(&self) -> Result<Sequence> {
        match self {
            Sequence::Dna(seq) => Ok(Sequence::Dna(seq.reverse())),
            Sequence::Rna(seq) => Ok(Sequence::Rna(seq.reverse())),
            Sequence::AminoAcid(_) => Err(self.unsupported("reverse")),
        }
    }

    /// Reverse complement (DNA and RNA only)
    pub fn reverse_complement(&self) -> Result<Sequence> {
        match self {
            Sequence::Dna(seq) => seq.reverse_complement().map(Sequence::Dna),
            Sequence::Rna(seq) => seq.reverse_complement().map(Sequence::Rna),
            Sequence::AminoAcid(_) => Err(self.unsupported("reverse_complement")),
        }
    }

    /// Transcription (DNA only), yielding an RNA-tagged sequence
    pub fn transcribe(&self) -> Result<Sequence> {
        match self {
            Sequence::Dna(seq) => seq.transcribe().map(Sequence::Rna),
            _ => Err(self.unsupported("transcribe")),
        }
    }

    /// Molecular mass in Daltons (amino acids only)
    pub fn mass_dalton(&self) -> Result<f64> {
        match self {
            Sequence::AminoAcid(seq) => seq.get_mass_dalton(),
            _ => Err(self.unsupported("mass_dalton")),
        }
    }

    /// Consume the sequence and return its residues
    pub fn into_string(self) -> String {
        match self {
            Sequence::Dna(seq) => seq.into_string(),
            Sequence::Rna(seq) => seq.into_string(),
            Sequence::AminoAcid(seq) => seq.into_string(),
        }
    }
}

impl BiologicalSequence for Sequence {
    fn as_str(&self) -> &str {
        match self {
            Sequence::Dna(seq) => seq.as_str(),
            Sequence::Rna(seq) => seq.as_str(),
            Sequence::AminoAcid(seq) => seq.as_str(),
        }
    }

    fn kind(&self) -> SequenceKind {
        match self {
            Sequence::Dna(_) => SequenceKind::Dna,
            Sequence::Rna(_) => SequenceKind::Rna,
            Sequence::AminoAcid(_) => SequenceKind::AminoAcid,
        }
    }

    fn is_correct_seq(&self) -> bool {
        match self {
            Sequence::Dna(seq) => seq.is_correct_seq(),
            Sequence::Rna(seq) => seq.is_correct_seq(),
            Sequence::AminoAcid(seq) => seq.is_correct_seq(),
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DnaSequence> for Sequence {
    fn from(seq: DnaSequence) -> Self {
        Sequence::Dna(seq)
    }
}

impl From<RnaSequence> for Sequence {
    fn from(seq: RnaSequence) -> Self {
        Sequence::Rna(seq)
    }
}

impl From<AminoAcidSequence> for Sequence {
    fn from(seq: AminoAcidSequence) -> Self {
        Sequence::AminoAcid(seq)
    }
}
