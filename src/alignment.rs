use crate::error::{PepForgeError, PfResult};
use crate::scorer::types::Symbol;
use tracing::debug;

pub const DEFAULT_GAP_SYMBOL: Symbol = b'-';

/// One row of an alignment: byte-coded symbols, gap symbol included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSequence {
    pub id: String,
    pub symbols: Vec<Symbol>,
}

impl AlignedSequence {
    pub fn new(id: impl Into<String>, symbols: impl Into<Vec<Symbol>>) -> Self {
        Self {
            id: id.into(),
            symbols: symbols.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Equal-length aligned sequences sharing one gap symbol.
#[derive(Debug, Clone)]
pub struct Alignment {
    sequences: Vec<AlignedSequence>,
    gap: Symbol,
    length: usize,
}

impl Alignment {
    /// Fails with `LengthMismatch` on the first row whose length differs from the first row.
    pub fn new(sequences: Vec<AlignedSequence>, gap: Symbol) -> PfResult<Self> {
        let length = sequences.first().map_or(0, AlignedSequence::len);
        if let Some(bad) = sequences.iter().find(|s| s.len() != length) {
            return Err(PepForgeError::LengthMismatch {
                id: bad.id.clone(),
                expected: length,
                found: bad.len(),
            });
        }
        Ok(Self {
            sequences,
            gap,
            length,
        })
    }

    /// Reads aligner output in FASTA layout. Records may span several lines;
    /// empty lines, trailing spaces and a trailing `\r` are ignored. Bytes are taken as-is (Latin-1).
    pub fn from_fasta(input: &[u8], gap: Symbol) -> PfResult<Self> {
        let mut sequences = Vec::new();
        let mut current: Option<AlignedSequence> = None;

        for (idx, raw) in input.split(|&b| b == b'\n').enumerate() {
            let mut line = raw.strip_suffix(b"\r").unwrap_or(raw);
            // Only spaces are padding: other low control bytes can be assigned symbols.
            while let [rest @ .., b' '] = line {
                line = rest;
            }
            if line.is_empty() {
                continue;
            }
            if let Some(header) = line.strip_prefix(b">") {
                if let Some(done) = current.take() {
                    sequences.push(done);
                }
                let id = String::from_utf8_lossy(header).trim().to_string();
                current = Some(AlignedSequence::new(id, Vec::new()));
            } else {
                match current.as_mut() {
                    Some(seq) => seq.symbols.extend_from_slice(line),
                    None => {
                        return Err(PepForgeError::Validation(format!(
                            "FASTA line {} has sequence data before any '>' header",
                            idx + 1
                        )))
                    }
                }
            }
        }
        if let Some(done) = current {
            sequences.push(done);
        }

        debug!("Read {} aligned sequences from FASTA", sequences.len());
        Self::new(sequences, gap)
    }

    pub fn sequences(&self) -> &[AlignedSequence] {
        &self.sequences
    }

    pub fn gap(&self) -> Symbol {
        self.gap
    }

    pub fn number_of_sequences(&self) -> usize {
        self.sequences.len()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline(always)]
    pub fn symbol(&self, row: usize, column: usize) -> Symbol {
        self.sequences[row].symbols[column]
    }

    pub fn column(&self, column: usize) -> Option<Vec<Symbol>> {
        if column >= self.length {
            return None;
        }
        Some(self.sequences.iter().map(|s| s.symbols[column]).collect())
    }

    /// Share of non-gap cells, as a percentage.
    pub fn percentage_non_gaps(&self) -> f64 {
        let cells = self.length * self.sequences.len();
        if cells == 0 {
            return 0.0;
        }
        let non_gaps = self
            .sequences
            .iter()
            .flat_map(|s| s.symbols.iter())
            .filter(|&&b| b != self.gap)
            .count();
        100.0 * non_gaps as f64 / cells as f64
    }

    /// Share of columns that are gap-free and fully identical, as a percentage.
    pub fn percentage_conserved_columns(&self) -> f64 {
        if self.length == 0 || self.sequences.is_empty() {
            return 0.0;
        }
        let conserved = (0..self.length)
            .filter(|&c| {
                let first = self.symbol(0, c);
                first != self.gap && self.sequences.iter().all(|s| s.symbols[c] == first)
            })
            .count();
        100.0 * conserved as f64 / self.length as f64
    }
}
