mod common;

use pepforge::error::PepForgeError;
use pepforge::scorer::{load_score_source, parse_score_source, ScoreEntryParser};
use rstest::rstest;
use std::io::Cursor;

#[test]
fn test_loader_parses_commented_source() {
    let source = parse_score_source(common::PEPTIDE_SOURCE).unwrap();

    // A/Ahp appears twice with the same score and folds into one entry.
    assert_eq!(source.len(), 5);
    assert_eq!(source.duplicates(), 1);
    assert_eq!(source.lines_read(), 7);
    assert_eq!(source.symbols(), vec![0x0f, 0x41, 0x43]);
    assert_eq!(source.symbol_range(), Some((0x0f, 0x43)));

    let first = &source.entries()[0];
    assert_eq!(first.line, 2);
    assert_eq!(first.comment.as_deref(), Some("A x A"));
}

#[test]
fn test_loader_consistent_duplicate_is_order_independent() {
    let text = "0x1b 0x0f -1\n0x30 0x31 2\n0x0f 0x1b -1\n";
    let source = parse_score_source(text).unwrap();
    assert_eq!(source.len(), 2);
    assert_eq!(source.duplicates(), 1);
}

#[test]
fn test_loader_conflicting_duplicate_fails() {
    let text = "0x1b 0x0f -1\n0x30 0x31 2\n0x0f 0x1b 5\n";
    match parse_score_source(text) {
        Err(PepForgeError::ConflictingEntry {
            symbol_a,
            symbol_b,
            first,
            second,
        }) => {
            assert_eq!((symbol_a, symbol_b), (0x0f, 0x1b));
            assert_eq!(first, -1.0);
            assert_eq!(second, 5.0);
        }
        other => panic!("expected ConflictingEntry, got {:?}", other),
    }
}

#[test]
fn test_loader_large_scores_keep_their_difference() {
    // Equal once rounded to single precision.
    let text = "0x41 0x0f 16777217\n0x0f 0x41 16777216\n";
    match parse_score_source(text) {
        Err(PepForgeError::ConflictingEntry { first, second, .. }) => {
            assert_eq!(first, 16_777_217.0);
            assert_eq!(second, 16_777_216.0);
        }
        other => panic!("expected ConflictingEntry, got {:?}", other),
    }
}

#[test]
fn test_loader_reports_malformed_line_number() {
    let text = "0x41 0x41 10\n\n# comment only\nzz 0x0f 3\n";
    match parse_score_source(text) {
        Err(PepForgeError::MalformedEntry { line, content, .. }) => {
            assert_eq!(line, 4);
            assert_eq!(content, "zz 0x0f 3");
        }
        other => panic!("expected MalformedEntry, got {:?}", other),
    }
}

#[rstest]
#[case("0x41 0x0f abc")]
#[case("0x41 0x0f")]
#[case("0x41 0x0f 3 7")]
#[case("0x141 0x0f 3")]
#[case("0x41 -0x0f 3")]
#[case("0x41 0x0f NaN")]
#[case("0x41 0x0f inf")]
fn test_loader_rejects_bad_entries(#[case] line: &str) {
    let err = parse_score_source(line).unwrap_err();
    assert!(
        matches!(err, PepForgeError::MalformedEntry { line: 1, .. }),
        "unexpected error for '{}': {:?}",
        line,
        err
    );
}

#[rstest]
#[case("0x41 0x0f 3", 3.0)]
#[case("41 0F -2.5", -2.5)]
#[case("  0x41\t0x0f   +4  ", 4.0)]
#[case("0X41 0x0f 0", 0.0)]
fn test_loader_accepts_number_forms(#[case] line: &str, #[case] score: f64) {
    let source = parse_score_source(line).unwrap();
    let pair = source.entries()[0].pair;
    assert_eq!((pair.symbol_a, pair.symbol_b), (0x41, 0x0f));
    assert_eq!(pair.score, score);
}

#[test]
fn test_loader_blank_and_comment_lines_only() {
    let source = parse_score_source("\n   \n# nothing here\n#0x41 0x41 1\n").unwrap();
    assert!(source.is_empty());
    assert_eq!(source.symbol_range(), None);
}

#[test]
fn test_loader_decimal_radix() {
    let parser = ScoreEntryParser::new().with_radix(10).unwrap();
    let source = parser.parse_str("65 15 5\n").unwrap();
    assert_eq!(source.entries()[0].pair.symbol_a, 0x41);
    assert_eq!(source.entries()[0].pair.symbol_b, 0x0f);
}

#[test]
fn test_loader_reads_latin1_comments_from_reader() {
    // 0xe9 is not valid UTF-8 on its own; only the comment carries it.
    let mut bytes = b"0x41 0x0f 5 # caf".to_vec();
    bytes.push(0xe9);
    bytes.push(b'\n');
    let source = ScoreEntryParser::new()
        .parse_reader(Cursor::new(bytes))
        .unwrap();
    assert_eq!(source.len(), 1);
}

#[test]
fn test_loader_from_file() {
    let file = common::write_source(common::PEPTIDE_SOURCE);
    let source = load_score_source(file.path(), 16).unwrap();
    assert_eq!(source.len(), 5);
}

#[test]
fn test_loader_missing_file_is_io_error() {
    let err = load_score_source("/definitely/not/here.txt", 16).unwrap_err();
    assert!(matches!(err, PepForgeError::Io(_)));
}
