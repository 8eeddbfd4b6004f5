use super::types::Symbol;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum_macros::{Display, EnumIter, EnumString};

/// Width of the one-byte symbol space.
pub const MATRIX_DIM: usize = 256;

/// Pair-score lookup shared by natural and custom matrices.
///
/// `score` is total: every pair of bytes resolves to a number.
pub trait DistanceMatrix: Send + Sync {
    fn score(&self, a: Symbol, b: Symbol) -> f64;

    /// Number of symbols along one side of the backing table.
    fn dimension(&self) -> usize;
}

/// Dense, symmetric 256x256 score table for one polymer context.
#[derive(Debug, Clone)]
pub struct SubstitutionMatrix {
    pub(crate) label: String,
    // Access: scores[a * MATRIX_DIM + b]
    pub(crate) scores: Vec<f64>,
    pub(crate) scored: [bool; MATRIX_DIM],
    pub(crate) default_score: f64,
    pub(crate) self_score: f64,
    pub(crate) pair_count: usize,
}

impl SubstitutionMatrix {
    #[inline(always)]
    pub fn idx(a: Symbol, b: Symbol) -> usize {
        (a as usize) * MATRIX_DIM + (b as usize)
    }

    #[inline(always)]
    pub fn score(&self, a: Symbol, b: Symbol) -> f64 {
        if !self.scored[a as usize] || !self.scored[b as usize] {
            return self.default_score;
        }
        self.scores[Self::idx(a, b)]
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn default_score(&self) -> f64 {
        self.default_score
    }

    pub fn self_score(&self) -> f64 {
        self.self_score
    }

    /// Distinct unordered pairs taken from the source.
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// True when the source mentions `symbol` in at least one entry.
    pub fn is_scored(&self, symbol: Symbol) -> bool {
        self.scored[symbol as usize]
    }

    pub fn scored_symbols(&self) -> Vec<Symbol> {
        (0..=255u8).filter(|&s| self.scored[s as usize]).collect()
    }

    /// Symbols in `symbols` that the source never mentions.
    pub fn unscored_in<'a>(&'a self, symbols: impl IntoIterator<Item = &'a Symbol>) -> Vec<Symbol> {
        let mut missing: Vec<Symbol> = symbols
            .into_iter()
            .copied()
            .filter(|&s| !self.is_scored(s))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }
}

impl DistanceMatrix for SubstitutionMatrix {
    fn score(&self, a: Symbol, b: Symbol) -> f64 {
        SubstitutionMatrix::score(self, a, b)
    }

    fn dimension(&self) -> usize {
        MATRIX_DIM
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Blosum62,
    Pam40,
    Pam120,
    Pam200,
    Pam250,
}

/// Standard amino-acid matrix provided by `bio::scores`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceMatrix {
    pub kind: ReferenceKind,
    pub default_score: f64,
}

// A-Z and '*' (upper case only).
const REFERENCE_ALPHABET_DIM: usize = 27;

impl ReferenceMatrix {
    pub fn new(kind: ReferenceKind, default_score: f64) -> Self {
        Self {
            kind,
            default_score,
        }
    }

    #[inline(always)]
    fn in_alphabet(s: Symbol) -> bool {
        s.is_ascii_uppercase() || s == b'*'
    }

    pub fn score(&self, a: Symbol, b: Symbol) -> f64 {
        if !Self::in_alphabet(a) || !Self::in_alphabet(b) {
            return self.default_score;
        }
        let raw = match self.kind {
            ReferenceKind::Blosum62 => bio::scores::blosum62(a, b),
            ReferenceKind::Pam40 => bio::scores::pam40(a, b),
            ReferenceKind::Pam120 => bio::scores::pam120(a, b),
            ReferenceKind::Pam200 => bio::scores::pam200(a, b),
            ReferenceKind::Pam250 => bio::scores::pam250(a, b),
        };
        f64::from(raw)
    }
}

impl DistanceMatrix for ReferenceMatrix {
    fn score(&self, a: Symbol, b: Symbol) -> f64 {
        ReferenceMatrix::score(self, a, b)
    }

    fn dimension(&self) -> usize {
        REFERENCE_ALPHABET_DIM
    }
}

/// What a polymer context scores with: a natural reference matrix or a custom built table.
#[derive(Debug, Clone)]
pub enum DistanceMatrixAdapter {
    Reference(ReferenceMatrix),
    Custom(Arc<SubstitutionMatrix>),
}

impl DistanceMatrixAdapter {
    pub fn as_custom(&self) -> Option<&SubstitutionMatrix> {
        match self {
            Self::Custom(m) => Some(m.as_ref()),
            Self::Reference(_) => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Reference(r) => r.kind.to_string(),
            Self::Custom(m) => format!("custom:{}", m.label()),
        }
    }
}

impl From<SubstitutionMatrix> for DistanceMatrixAdapter {
    fn from(m: SubstitutionMatrix) -> Self {
        Self::Custom(Arc::new(m))
    }
}

impl From<ReferenceMatrix> for DistanceMatrixAdapter {
    fn from(r: ReferenceMatrix) -> Self {
        Self::Reference(r)
    }
}

impl DistanceMatrix for DistanceMatrixAdapter {
    #[inline(always)]
    fn score(&self, a: Symbol, b: Symbol) -> f64 {
        match self {
            Self::Reference(r) => r.score(a, b),
            Self::Custom(m) => m.score(a, b),
        }
    }

    fn dimension(&self) -> usize {
        match self {
            Self::Reference(r) => r.dimension(),
            Self::Custom(m) => m.dimension(),
        }
    }
}
