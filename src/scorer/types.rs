use serde::{Deserialize, Serialize};

/// One-byte monomer code. Only meaningful together with its polymer context.
pub type Symbol = u8;

/// A scored, unordered symbol pair from one substitution-score source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredPair {
    pub symbol_a: Symbol,
    pub symbol_b: Symbol,
    pub score: f64,
}

impl ScoredPair {
    pub fn new(symbol_a: Symbol, symbol_b: Symbol, score: f64) -> Self {
        Self {
            symbol_a,
            symbol_b,
            score,
        }
    }

    /// Order-independent key: (min, max).
    #[inline(always)]
    pub fn key(&self) -> (Symbol, Symbol) {
        if self.symbol_a <= self.symbol_b {
            (self.symbol_a, self.symbol_b)
        } else {
            (self.symbol_b, self.symbol_a)
        }
    }
}
