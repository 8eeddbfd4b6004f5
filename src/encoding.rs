//! Byte-code assignment for non-natural monomers.
//!
//! The external aligner only understands one byte per residue, so every
//! bracketed monomer (`[Ahp]`, `[NH2]`, ...) of a polymer context gets the next
//! free byte. Codes are local to one encoder; two encoders may hand out the
//! same byte for different monomers, which is why scoring never merges contexts.

use crate::error::{PepForgeError, PfResult};
use crate::scorer::types::Symbol;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

pub const NATURAL_AMINO_ACIDS: &[u8; 20] = b"GAVLIMPFWSTNQYCKRHDE";

/// Bytes the aligner's text mode treats specially.
pub const RESERVED_SYMBOLS: [Symbol; 8] = [0x3E, 0x3D, 0x3C, 0x2D, 0x20, 0x0D, 0x0A, 0x00];

pub fn is_natural(b: Symbol) -> bool {
    NATURAL_AMINO_ACIDS.contains(&b)
}

/// Bytes a monomer may be assigned: not reserved, not a residue letter in either case.
pub fn is_assignable(b: Symbol) -> bool {
    !RESERVED_SYMBOLS.contains(&b) && !is_natural(b.to_ascii_uppercase())
}

enum Piece {
    Residue(char),
    /// Bracketed monomer, outer brackets included.
    Monomer(String),
}

// Nested brackets (e.g. SMILES) stay inside their outer monomer.
fn split_pieces(sequence: &str) -> PfResult<Vec<Piece>> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    for ch in sequence.chars() {
        match ch {
            '[' => {
                depth += 1;
                current.push(ch);
            }
            ']' if depth == 0 => {
                return Err(PepForgeError::MalformedSequence(format!(
                    "unmatched ']' in '{}'",
                    sequence
                )));
            }
            ']' => {
                depth -= 1;
                current.push(ch);
                if depth == 0 {
                    pieces.push(Piece::Monomer(std::mem::take(&mut current)));
                }
            }
            _ if depth > 0 => current.push(ch),
            _ => pieces.push(Piece::Residue(ch)),
        }
    }

    if depth != 0 {
        return Err(PepForgeError::MalformedSequence(format!(
            "unclosed '[' in '{}'",
            sequence
        )));
    }
    Ok(pieces)
}

/// Bracketed monomers of `sequence`, in order, outer brackets included.
pub fn parse_monomers(sequence: &str) -> PfResult<Vec<String>> {
    Ok(split_pieces(sequence)?
        .into_iter()
        .filter_map(|piece| match piece {
            Piece::Monomer(m) => Some(m),
            Piece::Residue(_) => None,
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMap {
    pub polymer_type: String,
    /// Hex symbol (`0x..`) -> bracketed monomer.
    pub symbols: BTreeMap<String, String>,
}

pub struct SymbolEncoder {
    polymer_type: String,
    available: Vec<Symbol>,
    next: usize,
    encode: HashMap<String, Symbol>,
    decode: HashMap<Symbol, String>,
}

impl SymbolEncoder {
    pub fn new(polymer_type: impl Into<String>) -> Self {
        let available = (0..=255u8).filter(|&b| is_assignable(b)).collect();
        Self {
            polymer_type: polymer_type.into(),
            available,
            next: 0,
            encode: HashMap::new(),
            decode: HashMap::new(),
        }
    }

    pub fn polymer_type(&self) -> &str {
        &self.polymer_type
    }

    pub fn len(&self) -> usize {
        self.encode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encode.is_empty()
    }

    /// Symbol for `monomer`, assigning the next free byte on first sight.
    pub fn symbol_for(&mut self, monomer: &str) -> PfResult<Symbol> {
        if let Some(&s) = self.encode.get(monomer) {
            return Ok(s);
        }
        while self
            .available
            .get(self.next)
            .is_some_and(|s| self.decode.contains_key(s))
        {
            self.next += 1;
        }
        let s = *self
            .available
            .get(self.next)
            .ok_or_else(|| PepForgeError::SymbolSpaceExhausted(monomer.to_string()))?;
        self.next += 1;
        self.encode.insert(monomer.to_string(), s);
        self.decode.insert(s, monomer.to_string());
        Ok(s)
    }

    /// Natural residues map to themselves; `[...]` monomers get assigned bytes.
    pub fn encode_sequence(&mut self, sequence: &str) -> PfResult<Vec<Symbol>> {
        let pieces = split_pieces(sequence)?;
        let mut out = Vec::with_capacity(pieces.len());
        for piece in pieces {
            match piece {
                Piece::Monomer(token) => out.push(self.symbol_for(&token)?),
                Piece::Residue(ch) => {
                    let b = u8::try_from(u32::from(ch)).map_err(|_| {
                        PepForgeError::MalformedSequence(format!(
                            "'{}' is neither a one-byte residue nor inside brackets",
                            ch
                        ))
                    })?;
                    out.push(b);
                }
            }
        }
        Ok(out)
    }

    /// Whole sequence as one monomer (chemical polymers).
    pub fn encode_whole(&mut self, sequence: &str) -> PfResult<Symbol> {
        self.symbol_for(sequence)
    }

    pub fn decode_symbol(&self, symbol: Symbol) -> Option<&str> {
        self.decode.get(&symbol).map(String::as_str)
    }

    /// Assigned monomers expand back to `[name]`; any other byte is kept as a character.
    pub fn decode_sequence(&self, symbols: &[Symbol]) -> String {
        symbols
            .iter()
            .map(|&b| match self.decode.get(&b) {
                Some(name) => name.clone(),
                None => char::from(b).to_string(),
            })
            .collect()
    }

    pub fn to_map(&self) -> SymbolMap {
        SymbolMap {
            polymer_type: self.polymer_type.clone(),
            symbols: self
                .decode
                .iter()
                .map(|(&s, name)| (format!("{:#04x}", s), name.clone()))
                .collect(),
        }
    }

    /// Rebuilds an encoder from a saved map; new monomers take the first free slots.
    /// Rejects bytes `new` would never assign and monomers or bytes listed twice.
    pub fn from_map(map: &SymbolMap) -> PfResult<Self> {
        let mut enc = Self::new(map.polymer_type.clone());
        for (hex, name) in &map.symbols {
            let digits = hex.trim_start_matches("0x").trim_start_matches("0X");
            let s = u8::from_str_radix(digits, 16).map_err(|_| {
                PepForgeError::Validation(format!("'{}' is not a hex symbol", hex))
            })?;
            if !is_assignable(s) {
                return Err(PepForgeError::Validation(format!(
                    "symbol {} for '{}' is reserved or a natural residue",
                    hex, name
                )));
            }
            if let Some(other) = enc.decode.get(&s) {
                return Err(PepForgeError::Validation(format!(
                    "symbol {:#04x} is given to both '{}' and '{}'",
                    s, other, name
                )));
            }
            if enc.encode.contains_key(name) {
                return Err(PepForgeError::Validation(format!(
                    "monomer '{}' has more than one symbol",
                    name
                )));
            }
            enc.encode.insert(name.clone(), s);
            enc.decode.insert(s, name.clone());
        }
        debug!(
            "Restored {} symbols for polymer '{}'",
            enc.encode.len(),
            enc.polymer_type
        );
        Ok(enc)
    }
}
