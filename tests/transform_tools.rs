//! Typed sequences and the `SEQ... OPERATION` tool through the public API

use seqsieve::sequence::{
    AminoAcidSequence, BiologicalSequence, DnaSequence, NucleicAcid, RnaSequence, Sequence,
    SequenceKind,
};
use seqsieve::tools::{run_dna_rna_tools, transform_all, Operation, SkipReason, ToolOutput};
use seqsieve::SeqsieveError;

#[test]
fn test_dna_round_trip_through_rna() {
    let dna = DnaSequence::new("ATGCatgc");
    let rna = dna.transcribe().unwrap();
    assert_eq!(rna.as_str(), "UACGuacg");
    assert_eq!(rna.kind(), SequenceKind::Rna);

    // Transcribed strand pairs back onto the template
    assert_eq!(rna.complement().unwrap().as_str(), "AUGCaugc");
}

#[test]
fn test_rna_complement_is_involutive() {
    let rna = RnaSequence::new("GGCCAA");
    let once = rna.complement().unwrap();
    assert_eq!(once.as_str(), "CCGGUU");
    assert_eq!(once.complement().unwrap(), rna);
}

#[test]
fn test_reverse_complement_on_typed_sequences() {
    let dna = DnaSequence::new("AACG");
    assert_eq!(dna.reverse_complement().unwrap().as_str(), "CGTT");

    let rna = RnaSequence::new("AACG");
    assert_eq!(rna.reverse_complement().unwrap().as_str(), "CGUU");
}

#[test]
fn test_sequence_enum_dispatch() {
    let dna = Sequence::nucleic_acid("ACGT");
    let rna = Sequence::nucleic_acid("ACGU");
    let protein = Sequence::new(SequenceKind::AminoAcid, "MKV");

    assert_eq!(dna.kind(), SequenceKind::Dna);
    assert_eq!(rna.kind(), SequenceKind::Rna);
    assert_eq!(dna.describe(), "DNASequence ACGT");
    assert_eq!(protein.to_string(), "MKV");

    assert!(matches!(
        rna.transcribe(),
        Err(SeqsieveError::UnsupportedOperation { .. })
    ));
    assert!(matches!(
        protein.complement(),
        Err(SeqsieveError::UnsupportedOperation { .. })
    ));
    assert!(matches!(
        dna.mass_dalton(),
        Err(SeqsieveError::UnsupportedOperation { .. })
    ));
    assert!((protein.mass_dalton().unwrap() - 412.55).abs() < 1e-9);
}

#[test]
fn test_amino_acid_validation_and_mass() {
    let peptide = AminoAcidSequence::new("ACDEFGHIKLMNPQRSTVWY");
    assert!(peptide.is_correct_seq());
    assert_eq!(peptide.len(), 20);
    assert!(peptide.get_mass_dalton().unwrap() > 2000.0);

    let bad = AminoAcidSequence::new("MKB");
    assert!(!bad.is_correct_seq());
    assert!(matches!(
        bad.get_mass_dalton(),
        Err(SeqsieveError::UnknownResidue {
            residue: 'B',
            position: 2
        })
    ));
}

#[test]
fn test_tool_mixed_batch() {
    let report = run_dna_rna_tools(&["ATG", "aUcg", "hello", "reverse_complement"]);

    assert_eq!(
        report.output,
        ToolOutput::Many(vec!["CAT".to_string(), "cgAu".to_string()])
    );
    assert_eq!(
        report.skipped,
        vec![SkipReason::InvalidSequence("hello".to_string())]
    );
}

#[test]
fn test_tool_single_output_is_unwrapped() {
    let report = run_dna_rna_tools(&["GATTACA", "reverse"]);
    assert_eq!(report.output, ToolOutput::Single("ACATTAG".to_string()));
    assert_eq!(report.output.len(), 1);
}

#[test]
fn test_tool_unknown_operation() {
    let report = run_dna_rna_tools(&["ATG", "GGG", "fold"]);
    assert!(report.output.is_empty());
    assert_eq!(
        report.skipped,
        vec![SkipReason::UnknownOperation("fold".to_string())]
    );
}

#[test]
fn test_transform_all_matches_tool() {
    let sequences = ["ACGT", "UUAG", "ccgg"];
    for op in Operation::ALL {
        let mut args: Vec<&str> = sequences.to_vec();
        args.push(op.name());
        assert_eq!(transform_all(op, &sequences), run_dna_rna_tools(&args));
    }
}

#[test]
fn test_operation_apply_keeps_kind() {
    let rna = Sequence::nucleic_acid("AUGC");
    let out = Operation::Reverse.apply(&rna).unwrap();
    assert_eq!(out.kind(), SequenceKind::Rna);
    assert_eq!(out.as_str(), "CGUA");

    let out = Operation::Transcribe
        .apply(&Sequence::nucleic_acid("TTT"))
        .unwrap();
    assert_eq!(out.kind(), SequenceKind::Rna);
    assert_eq!(out.as_str(), "AAA");
}
