#![allow(dead_code)]

use pepforge::alignment::{AlignedSequence, Alignment};
use pepforge::config::ScoringParams;
use pepforge::scorer::PolymerContextRegistry;
use std::io::Write;
use tempfile::NamedTempFile;

/// Small source in the aligner's text-matrix layout.
pub const PEPTIDE_SOURCE: &str = "\
# custom matrix for PEPTIDE1
0x41 0x41 10   # A x A
0x41 0x0f 5    # A x Ahp
0x0f 0x41 5    # Ahp x A
0x0f 0x0f 8    # Ahp x Ahp
0x41 0x43 -1   # A x C
0x43 0x0f -3   # C x Ahp
";

pub fn write_source(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

pub fn params() -> ScoringParams {
    ScoringParams {
        default_score: -10.0,
        self_score: 10.0,
        ..Default::default()
    }
}

/// Registry with a single custom context.
pub fn registry_with(polymer_type: &str, source: &str) -> PolymerContextRegistry {
    let registry = PolymerContextRegistry::new(params());
    registry.register(polymer_type, source).unwrap();
    registry
}

/// Rows given as byte strings, ids seq0, seq1, ...
pub fn alignment(rows: &[&[u8]]) -> Alignment {
    let sequences = rows
        .iter()
        .enumerate()
        .map(|(i, r)| AlignedSequence::new(format!("seq{}", i), r.to_vec()))
        .collect();
    Alignment::new(sequences, b'-').unwrap()
}
