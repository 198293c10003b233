//! Core sequence manipulation operations
//!
//! Provides fundamental nucleic-acid and amino-acid primitives over ASCII
//! residue bytes:
//! - Complement (DNA or RNA pairing, chosen from the sequence content)
//! - Reverse and reverse complement
//! - Transcription (DNA → RNA base-pair partner)
//! - Alphabet validation
//! - Amino-acid molar mass
//!
//! # Design Principles
//!
//! 1. **Validation never fails**: `is_nucleic_acid` / `is_amino_acid` return
//!    `bool` for any input
//! 2. **Transformations are partial**: complement, transcription and mass
//!    lookup fail with `UnknownResidue` on anything outside their table
//!    (no IUPAC pass-through)
//! 3. **Case preserved**: uppercase maps to uppercase, lowercase to lowercase
//!
//! # Examples
//!
//! ```
//! use seqsieve::operations::{complement, reverse, reverse_complement};
//!
//! # fn main() -> seqsieve::Result<()> {
//! let seq = b"ATGC";
//! assert_eq!(complement(seq)?, b"TACG");
//! assert_eq!(reverse(seq), b"CGTA");
//! assert_eq!(reverse_complement(seq)?, b"GCAT");
//!
//! // Any U switches to RNA pairing
//! assert_eq!(complement(b"AUGc")?, b"UACg");
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SeqsieveError};

/// Marker for "no mapping" in the lookup tables below
const NONE: u8 = 0;

const fn pairing_table(pairs: &[(u8, u8)]) -> [u8; 256] {
    let mut table = [NONE; 256];
    let mut i = 0;
    while i < pairs.len() {
        let (from, to) = pairs[i];
        table[from as usize] = to;
        table[from.to_ascii_lowercase() as usize] = to.to_ascii_lowercase();
        i += 1;
    }
    table
}

/// DNA pairing: A↔T, C↔G
const DNA_COMPLEMENT: [u8; 256] =
    pairing_table(&[(b'A', b'T'), (b'T', b'A'), (b'C', b'G'), (b'G', b'C')]);

/// RNA pairing: A↔U, C↔G
const RNA_COMPLEMENT: [u8; 256] =
    pairing_table(&[(b'A', b'U'), (b'U', b'A'), (b'C', b'G'), (b'G', b'C')]);

/// DNA → RNA base-pair partner: A→U, T→A, C→G, G→C
const DNA_TO_RNA: [u8; 256] =
    pairing_table(&[(b'A', b'U'), (b'T', b'A'), (b'C', b'G'), (b'G', b'C')]);

/// The 20 standard amino acids (one-letter codes)
pub const AMINO_ACIDS: &[u8; 20] = b"ARNDCEQGHILKMFPSTWYV";

/// Nucleic-acid residues accepted by [`is_nucleic_acid`] (T and U may co-occur)
pub const NUCLEOTIDES: &[u8; 5] = b"ATCGU";

fn map_with(table: &[u8; 256], seq: &[u8]) -> Result<Vec<u8>> {
    seq.iter()
        .enumerate()
        .map(|(position, &base)| match table[base as usize] {
            NONE => Err(SeqsieveError::UnknownResidue {
                residue: base as char,
                position,
            }),
            mapped => Ok(mapped),
        })
        .collect()
}

/// Check whether a sequence contains any uracil (`U`/`u`)
#[inline]
pub fn contains_uracil(seq: &[u8]) -> bool {
    seq.iter().any(|&b| b == b'U' || b == b'u')
}

/// Complement a nucleic-acid sequence without reversing
///
/// If the sequence contains any `U`/`u`, the RNA pairing table is used
/// (A↔U, C↔G); otherwise the DNA table (A↔T, C↔G).
///
/// # Errors
///
/// `UnknownResidue` for any residue outside the selected table, including a
/// `T` in a sequence that also contains `U`.
///
/// # Examples
///
/// ```
/// use seqsieve::operations::complement;
///
/// assert_eq!(complement(b"ATGC").unwrap(), b"TACG");
/// assert_eq!(complement(b"augc").unwrap(), b"uacg");
/// assert!(complement(b"ATGN").is_err());
/// ```
pub fn complement(seq: &[u8]) -> Result<Vec<u8>> {
    if contains_uracil(seq) {
        complement_rna(seq)
    } else {
        complement_dna(seq)
    }
}

/// Complement with the DNA pairing table (A↔T, C↔G) regardless of content
pub fn complement_dna(seq: &[u8]) -> Result<Vec<u8>> {
    map_with(&DNA_COMPLEMENT, seq)
}

/// Complement with the RNA pairing table (A↔U, C↔G) regardless of content
///
/// A `U`-free RNA such as `AAA` still pairs to `UUU` here, which keeps
/// complementation involutive for RNA.
pub fn complement_rna(seq: &[u8]) -> Result<Vec<u8>> {
    map_with(&RNA_COMPLEMENT, seq)
}

/// Reverse a sequence without complementing
///
/// # Examples
///
/// ```
/// use seqsieve::operations::reverse;
///
/// let rev = reverse(b"ATGC");
/// assert_eq!(rev, b"CGTA");
/// assert_eq!(reverse(&rev), b"ATGC");
/// ```
pub fn reverse(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().copied().collect()
}

/// Reverse complement a nucleic-acid sequence
///
/// Complements first, then reverses. Both pairing tables are symmetric, so
/// reversing first gives the same result.
///
/// # Examples
///
/// ```
/// use seqsieve::operations::reverse_complement;
///
/// assert_eq!(reverse_complement(b"ATGC").unwrap(), b"GCAT");
/// assert_eq!(reverse_complement(b"AUGC").unwrap(), b"GCAU");
/// ```
pub fn reverse_complement(seq: &[u8]) -> Result<Vec<u8>> {
    let mut out = complement(seq)?;
    out.reverse();
    Ok(out)
}

/// Transcribe a DNA sequence to its RNA base-pair partner
///
/// Maps A→U, T→A, C→G, G→C with case preserved. One-directional: there is
/// no inverse operation.
///
/// # Errors
///
/// `UnknownResidue` for anything that is not A/C/G/T (including `U`).
///
/// # Examples
///
/// ```
/// use seqsieve::operations::transcribe;
///
/// assert_eq!(transcribe(b"ATGc").unwrap(), b"UACg");
/// assert!(transcribe(b"AUG").is_err());
/// ```
pub fn transcribe(seq: &[u8]) -> Result<Vec<u8>> {
    map_with(&DNA_TO_RNA, seq)
}

/// Check if a sequence contains only nucleic-acid residues
///
/// Accepts A, T, C, G, U in either case. Mixing T and U is accepted.
///
/// # Examples
///
/// ```
/// use seqsieve::operations::is_nucleic_acid;
///
/// assert!(is_nucleic_acid(b"ATGC"));
/// assert!(is_nucleic_acid(b"augc"));
/// assert!(is_nucleic_acid(b"ATUG")); // T and U together
/// assert!(!is_nucleic_acid(b"ATGN"));
/// ```
pub fn is_nucleic_acid(seq: &[u8]) -> bool {
    seq.iter()
        .all(|&b| NUCLEOTIDES.contains(&b.to_ascii_uppercase()))
}

/// Check if a sequence contains only the 20 standard amino acids (any case)
pub fn is_amino_acid(seq: &[u8]) -> bool {
    seq.iter()
        .all(|&b| AMINO_ACIDS.contains(&b.to_ascii_uppercase()))
}

/// Molar mass of a residue in Daltons (uppercase one-letter code)
pub fn residue_mass(residue: u8) -> Option<f64> {
    let mass = match residue {
        b'A' => 89.09,  // Alanine
        b'R' => 174.20, // Arginine
        b'N' => 132.12, // Asparagine
        b'D' => 133.10, // Aspartic acid
        b'C' => 121.15, // Cysteine
        b'E' => 147.13, // Glutamic acid
        b'Q' => 146.14, // Glutamine
        b'G' => 75.07,  // Glycine
        b'H' => 155.16, // Histidine
        b'I' => 131.17, // Isoleucine
        b'L' => 131.17, // Leucine
        b'K' => 146.19, // Lysine
        b'M' => 149.21, // Methionine
        b'F' => 165.19, // Phenylalanine
        b'P' => 115.13, // Proline
        b'S' => 105.09, // Serine
        b'T' => 119.12, // Threonine
        b'W' => 204.23, // Tryptophan
        b'Y' => 181.19, // Tyrosine
        b'V' => 117.15, // Valine
        _ => return None,
    };
    Some(mass)
}

/// Sum of per-residue molar masses of an amino-acid sequence
///
/// Only uppercase one-letter codes are in the table.
///
/// # Errors
///
/// `UnknownResidue` on the first residue outside the table.
///
/// # Examples
///
/// ```
/// use seqsieve::operations::mass_dalton;
///
/// let mass = mass_dalton(b"GA").unwrap();
/// assert!((mass - 164.16).abs() < 1e-9);
/// ```
pub fn mass_dalton(seq: &[u8]) -> Result<f64> {
    seq.iter().enumerate().try_fold(0.0, |total, (position, &residue)| {
        residue_mass(residue)
            .map(|mass| total + mass)
            .ok_or_else(|| SeqsieveError::UnknownResidue {
                residue: residue as char,
                position,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement_dna() {
        assert_eq!(complement(b"ATGC").unwrap(), b"TACG");
        assert_eq!(complement(b"AtGc").unwrap(), b"TaCg");
    }

    #[test]
    fn test_complement_rna_table_selected_by_uracil() {
        assert_eq!(complement(b"AUGC").unwrap(), b"UACG");
        assert_eq!(complement(b"aaau").unwrap(), b"uuua");
    }

    #[test]
    fn test_complement_mixed_t_and_u_fails() {
        // RNA table is selected, which has no entry for T
        let err = complement(b"ATU").unwrap_err();
        assert!(matches!(
            err,
            SeqsieveError::UnknownResidue { residue: 'T', position: 1 }
        ));
    }

    #[test]
    fn test_complement_unknown_residue() {
        let err = complement(b"ACGX").unwrap_err();
        assert!(matches!(
            err,
            SeqsieveError::UnknownResidue { residue: 'X', position: 3 }
        ));
    }

    #[test]
    fn test_forced_tables() {
        assert_eq!(complement_rna(b"AAA").unwrap(), b"UUU");
        assert_eq!(complement_dna(b"AAA").unwrap(), b"TTT");
        assert!(complement_dna(b"AU").is_err());
    }

    #[test]
    fn test_complement_empty() {
        assert_eq!(complement(b"").unwrap(), b"");
    }

    #[test]
    fn test_reverse_complement_both_orders_agree() {
        let seq = b"AACGTTTGCa";
        let rc = reverse_complement(seq).unwrap();
        let rev_then_comp = complement(&reverse(seq)).unwrap();
        assert_eq!(rc, rev_then_comp);
        assert_eq!(rc, b"tGCAAACGTT");
    }

    #[test]
    fn test_transcribe() {
        assert_eq!(transcribe(b"ATGC").unwrap(), b"UACG");
        assert_eq!(transcribe(b"attgc").unwrap(), b"uaacg");
        assert!(transcribe(b"AUG").is_err());
    }

    #[test]
    fn test_is_nucleic_acid() {
        assert!(is_nucleic_acid(b""));
        assert!(is_nucleic_acid(b"ACGTU"));
        assert!(is_nucleic_acid(b"acgtu"));
        assert!(!is_nucleic_acid(b"ACG T"));
        assert!(!is_nucleic_acid(b"ACGN"));
    }

    #[test]
    fn test_is_amino_acid() {
        assert!(is_amino_acid(b"ARNDCEQGHILKMFPSTWYV"));
        assert!(is_amino_acid(b"mkv"));
        assert!(!is_amino_acid(b"MKX"));
        assert!(!is_amino_acid(b"MK*"));
    }

    #[test]
    fn test_mass_dalton() {
        let mass = mass_dalton(b"MKV").unwrap();
        assert!((mass - (149.21 + 146.19 + 117.15)).abs() < 1e-9);
        assert_eq!(mass_dalton(b"").unwrap(), 0.0);
    }

    #[test]
    fn test_mass_dalton_rejects_lowercase_and_unknown() {
        assert!(matches!(
            mass_dalton(b"Mk"),
            Err(SeqsieveError::UnknownResidue { residue: 'k', position: 1 })
        ));
        assert!(mass_dalton(b"MX").is_err());
    }

    // Property-based tests
    use proptest::prelude::*;

    proptest! {
        /// Complement is involutive on valid DNA
        #[test]
        fn test_complement_involutive_dna(seq in "[ACGTacgt]{0,200}") {
            let once = complement(seq.as_bytes()).unwrap();
            let twice = complement(&once).unwrap();
            prop_assert_eq!(twice, seq.as_bytes());
        }

        /// Content-selected pairing is involutive while both A and U are present
        #[test]
        fn test_complement_involutive_rna(seq in "[ACGUacgu]{0,200}AU") {
            let once = complement(seq.as_bytes()).unwrap();
            let twice = complement(&once).unwrap();
            prop_assert_eq!(twice, seq.as_bytes());
        }

        /// Reverse is involutive on anything
        #[test]
        fn test_reverse_involutive(seq in "[ACGTU]{0,200}") {
            prop_assert_eq!(reverse(&reverse(seq.as_bytes())), seq.as_bytes());
        }

        /// reverse_complement == reverse ∘ complement on DNA
        #[test]
        fn test_reverse_complement_composition(seq in "[ACGTacgt]{0,200}") {
            let rc = reverse_complement(seq.as_bytes()).unwrap();
            let expected = reverse(&complement(seq.as_bytes()).unwrap());
            prop_assert_eq!(rc, expected);
        }

        /// Transcription never produces T and always produces valid nucleic acid
        #[test]
        fn test_transcribe_output_is_rna(seq in "[ACGTacgt]{0,200}") {
            let rna = transcribe(seq.as_bytes()).unwrap();
            prop_assert_eq!(rna.len(), seq.len());
            prop_assert!(!rna.iter().any(|&b| b == b'T' || b == b't'));
            prop_assert!(is_nucleic_acid(&rna));
        }
    }
}
