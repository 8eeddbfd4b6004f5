use pepforge::encoding::{
    is_natural, parse_monomers, SymbolEncoder, SymbolMap, RESERVED_SYMBOLS,
};
use pepforge::error::PepForgeError;
use rstest::rstest;

#[test]
fn test_encoding_assigns_stable_codes() {
    let mut enc = SymbolEncoder::new("PEPTIDE1");
    let first = enc.encode_sequence("A[Ahp]C[NH2]").unwrap();
    assert_eq!(first.len(), 4);
    assert_eq!(first[0], b'A');
    assert_eq!(first[2], b'C');

    let again = enc.encode_sequence("[NH2][Ahp]").unwrap();
    assert_eq!(again, vec![first[3], first[1]]);
    assert_eq!(enc.len(), 2);
    assert_eq!(enc.decode_sequence(&first), "A[Ahp]C[NH2]");
}

#[test]
fn test_encoding_never_hands_out_reserved_or_natural_bytes() {
    let mut enc = SymbolEncoder::new("PEPTIDE1");
    let mut assigned = Vec::new();
    for i in 0.. {
        match enc.symbol_for(&format!("[m{}]", i)) {
            Ok(s) => assigned.push(s),
            Err(PepForgeError::SymbolSpaceExhausted(name)) => {
                assert_eq!(name, format!("[m{}]", i));
                break;
            }
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }
    // 256 bytes minus 8 reserved minus 20 residues in both cases.
    assert_eq!(assigned.len(), 208);
    for s in assigned {
        assert!(!RESERVED_SYMBOLS.contains(&s), "reserved {:#04x}", s);
        assert!(!is_natural(s.to_ascii_uppercase()), "natural {:#04x}", s);
    }
}

#[test]
fn test_encoding_map_restores_assignments() {
    let mut enc = SymbolEncoder::new("PEPTIDE2");
    let codes = enc.encode_sequence("[Ahp]G[Sar]").unwrap();

    let json = serde_json::to_string(&enc.to_map()).unwrap();
    let map: SymbolMap = serde_json::from_str(&json).unwrap();
    assert_eq!(map.polymer_type, "PEPTIDE2");
    assert_eq!(map.symbols.len(), 2);

    let mut restored = SymbolEncoder::from_map(&map).unwrap();
    assert_eq!(restored.decode_symbol(codes[0]), Some("[Ahp]"));
    assert_eq!(restored.encode_sequence("[Sar]").unwrap(), vec![codes[2]]);

    // A new monomer must not collide with a restored one.
    let fresh = restored.symbol_for("[Nle]").unwrap();
    assert!(fresh != codes[0] && fresh != codes[2]);
}

#[test]
fn test_encoding_rejects_bad_map_symbol() {
    let mut map = SymbolMap {
        polymer_type: "PEPTIDE1".into(),
        symbols: Default::default(),
    };
    map.symbols.insert("0xzz".into(), "[Ahp]".into());
    assert!(matches!(
        SymbolEncoder::from_map(&map),
        Err(PepForgeError::Validation(_))
    ));
}

fn map_of(entries: &[(&str, &str)]) -> SymbolMap {
    SymbolMap {
        polymer_type: "PEPTIDE1".into(),
        symbols: entries
            .iter()
            .map(|(hex, name)| (hex.to_string(), name.to_string()))
            .collect(),
    }
}

#[rstest]
#[case(&[("0x41", "[Ahp]")])]
#[case(&[("0x61", "[Ahp]")])]
#[case(&[("0x2d", "[Ahp]")])]
#[case(&[("0x00", "[Ahp]")])]
#[case(&[("0x01", "[Ahp]"), ("0x1", "[Sar]")])]
#[case(&[("0x01", "[Ahp]"), ("0x02", "[Ahp]")])]
fn test_encoding_rejects_inconsistent_map(#[case] entries: &[(&str, &str)]) {
    assert!(matches!(
        SymbolEncoder::from_map(&map_of(entries)),
        Err(PepForgeError::Validation(_))
    ));
}

#[test]
fn test_encoding_accepts_hand_written_map() {
    let enc = SymbolEncoder::from_map(&map_of(&[("0x01", "[Ahp]"), ("0X9a", "[Sar]")])).unwrap();
    assert_eq!(enc.decode_sequence(&[0x01, b'G', 0x9a]), "[Ahp]G[Sar]");
}

#[test]
fn test_encoding_whole_sequence_is_one_symbol() {
    let mut enc = SymbolEncoder::new("CHEM1");
    let a = enc.encode_whole("[*]CC(=O)O[*]").unwrap();
    let b = enc.encode_whole("[*]CC(=O)O[*]").unwrap();
    assert_eq!(a, b);
    assert_eq!(enc.decode_symbol(a), Some("[*]CC(=O)O[*]"));
}

#[rstest]
#[case("A[Ahp")]
#[case("A]hp")]
#[case("A[[Ahp]")]
fn test_encoding_malformed_brackets(#[case] seq: &str) {
    let mut enc = SymbolEncoder::new("PEPTIDE1");
    assert!(matches!(
        enc.encode_sequence(seq),
        Err(PepForgeError::MalformedSequence(_))
    ));
    assert!(matches!(
        parse_monomers(seq),
        Err(PepForgeError::MalformedSequence(_))
    ));
}

#[test]
fn test_encoding_parse_monomers_keeps_nesting() {
    let monomers = parse_monomers("A[Ahp]C[[N]H2]").unwrap();
    assert_eq!(monomers, vec!["[Ahp]", "[[N]H2]"]);
    assert!(parse_monomers("ACDE").unwrap().is_empty());
}
