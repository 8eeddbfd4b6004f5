mod common;

use pepforge::error::PepForgeError;
use pepforge::scorer::{
    build_matrix, parse_score_source, DistanceMatrix, MatrixBuildParams, ScoredPair, MATRIX_DIM,
};

fn built(text: &str) -> pepforge::scorer::SubstitutionMatrix {
    let source = parse_score_source(text).unwrap();
    build_matrix(&source, &common::params(), "test").unwrap()
}

#[test]
fn test_builder_mirrors_one_triangle() {
    let m = built("0x41 0x0f 5\n0x43 0x41 -1\n");
    assert_eq!(m.score(0x41, 0x0f), 5.0);
    assert_eq!(m.score(0x0f, 0x41), 5.0);
    assert_eq!(m.score(0x41, 0x43), -1.0);
    assert_eq!(m.score(0x43, 0x41), -1.0);
}

#[test]
fn test_builder_unlisted_pair_uses_default() {
    let m = built("0x41 0x0f 5\n0x43 0x41 -1\n");
    // Both symbols are scored, but the pair itself is absent.
    assert_eq!(m.score(0x0f, 0x43), -10.0);
}

#[test]
fn test_builder_self_score_fills_missing_diagonal() {
    let m = built("0x41 0x0f 5\n0x41 0x41 3\n");
    assert_eq!(m.score(0x41, 0x41), 3.0);
    assert_eq!(m.score(0x0f, 0x0f), 10.0);
}

#[test]
fn test_builder_unscored_symbol_falls_back_to_default_even_on_diagonal() {
    let m = built("0x41 0x0f 5\n");
    assert!(!m.is_scored(0x50));
    assert_eq!(m.score(0x50, 0x50), -10.0);
    assert_eq!(m.score(0x50, 0x41), -10.0);
    assert_eq!(m.score(0x41, 0x50), -10.0);
}

#[test]
fn test_builder_self_equal_to_default_by_configuration() {
    let source = parse_score_source("0x41 0x0f 5\n").unwrap();
    let m = MatrixBuildParams::builder()
        .pairs(source.pairs())
        .default_score(0.0)
        .self_score(0.0)
        .build()
        .build_matrix()
        .unwrap();
    assert_eq!(m.score(0x41, 0x41), 0.0);
}

#[test]
fn test_builder_revalidates_conflicts() {
    // Bypasses the parser's de-duplication.
    let pairs = vec![
        ScoredPair::new(0x1b, 0x0f, -1.0),
        ScoredPair::new(0x0f, 0x1b, 5.0),
    ];
    let err = MatrixBuildParams::builder()
        .pairs(pairs)
        .build()
        .build_matrix()
        .unwrap_err();
    assert!(matches!(
        err,
        PepForgeError::ConflictingEntry {
            symbol_a: 0x0f,
            symbol_b: 0x1b,
            ..
        }
    ));
}

#[test]
fn test_builder_tolerates_repeated_identical_pairs() {
    let pairs = vec![
        ScoredPair::new(0x1b, 0x0f, -1.0),
        ScoredPair::new(0x0f, 0x1b, -1.0),
    ];
    let m = MatrixBuildParams::builder()
        .pairs(pairs)
        .label("dup")
        .build()
        .build_matrix()
        .unwrap();
    assert_eq!(m.pair_count(), 1);
    assert_eq!(m.label(), "dup");
}

#[test]
fn test_builder_covers_full_byte_space() {
    let m = built("0x00 0xff 2\n");
    assert_eq!(m.dimension(), MATRIX_DIM);
    assert_eq!(m.score(0x00, 0xff), 2.0);
    assert_eq!(m.score(0xff, 0x00), 2.0);
    assert_eq!(m.score(0xff, 0xff), 10.0);
    assert_eq!(m.scored_symbols(), vec![0x00, 0xff]);
}

#[test]
fn test_builder_reports_unscored_symbols() {
    let m = built(common::PEPTIDE_SOURCE);
    let used = [0x41u8, 0x0f, 0x55, 0x55, 0x02];
    assert_eq!(m.unscored_in(used.iter()), vec![0x02, 0x55]);
}
