use super::types::{ScoredPair, Symbol};
use crate::error::{PepForgeError, PfResult};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub const COMMENT_DELIMITER: char = '#';
pub const DEFAULT_SYMBOL_RADIX: u32 = 16;

/// One accepted line of a score source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEntry {
    pub line: usize,
    pub pair: ScoredPair,
    /// Trailing commentary, kept for diagnostics only.
    pub comment: Option<String>,
}

/// Parsed, de-duplicated content of one custom substitution-score source.
#[derive(Debug, Clone, Default)]
pub struct ScoreSource {
    entries: Vec<SourceEntry>,
    lines_read: usize,
    duplicates: usize,
}

impl ScoreSource {
    pub fn entries(&self) -> &[SourceEntry] {
        &self.entries
    }

    pub fn pairs(&self) -> Vec<ScoredPair> {
        self.entries.iter().map(|e| e.pair).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Number of repeated (consistent) pairs that were folded away.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Sorted, distinct symbols referenced by at least one entry.
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut seen = [false; 256];
        for e in &self.entries {
            seen[e.pair.symbol_a as usize] = true;
            seen[e.pair.symbol_b as usize] = true;
        }
        (0..=255u8).filter(|&s| seen[s as usize]).collect()
    }

    /// Lowest and highest symbol actually used, if any.
    pub fn symbol_range(&self) -> Option<(Symbol, Symbol)> {
        let symbols = self.symbols();
        Some((*symbols.first()?, *symbols.last()?))
    }
}

pub struct ScoreEntryParser {
    radix: u32,
}

impl Default for ScoreEntryParser {
    fn default() -> Self {
        Self {
            radix: DEFAULT_SYMBOL_RADIX,
        }
    }
}

impl ScoreEntryParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_radix(mut self, radix: u32) -> PfResult<Self> {
        if !(2..=36).contains(&radix) {
            return Err(PepForgeError::Config(format!(
                "Symbol radix must be within 2..=36, got {}",
                radix
            )));
        }
        self.radix = radix;
        Ok(self)
    }

    pub fn parse_str(&self, text: &str) -> PfResult<ScoreSource> {
        let mut source = ScoreSource::default();
        let mut seen: HashMap<(Symbol, Symbol), f64> = HashMap::new();

        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            source.lines_read = line_no;

            let (body, comment) = match raw_line.split_once(COMMENT_DELIMITER) {
                Some((body, comment)) => (body, Some(comment.trim())),
                None => (raw_line, None),
            };
            let body = body.trim();
            if body.is_empty() {
                continue;
            }

            let pair = self.parse_entry(line_no, raw_line, body)?;

            match seen.get(&pair.key()) {
                Some(&existing) if existing == pair.score => {
                    source.duplicates += 1;
                    continue;
                }
                Some(&existing) => {
                    let (symbol_a, symbol_b) = pair.key();
                    return Err(PepForgeError::ConflictingEntry {
                        symbol_a,
                        symbol_b,
                        first: existing,
                        second: pair.score,
                    });
                }
                None => {
                    seen.insert(pair.key(), pair.score);
                }
            }

            source.entries.push(SourceEntry {
                line: line_no,
                pair,
                comment: comment.filter(|c| !c.is_empty()).map(str::to_string),
            });
        }

        debug!(
            "Parsed score source: {} pairs from {} lines ({} consistent duplicates), symbol range {:?}",
            source.entries.len(),
            source.lines_read,
            source.duplicates,
            source.symbol_range()
        );

        Ok(source)
    }

    pub fn parse_reader<R: Read>(&self, mut reader: R) -> PfResult<ScoreSource> {
        // Sources may carry Latin-1 commentary; only the numeric part needs to be valid text.
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        self.parse_str(&String::from_utf8_lossy(&buf))
    }

    fn parse_entry(&self, line: usize, raw: &str, body: &str) -> PfResult<ScoredPair> {
        let malformed = |reason: String| PepForgeError::MalformedEntry {
            line,
            content: raw.trim().to_string(),
            reason,
        };

        let tokens: Vec<&str> = body.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(malformed(format!(
                "expected '<symbolA> <symbolB> <score>', found {} tokens",
                tokens.len()
            )));
        }

        let symbol_a = self
            .parse_symbol(tokens[0])
            .ok_or_else(|| malformed(format!("'{}' is not a byte-valued symbol", tokens[0])))?;
        let symbol_b = self
            .parse_symbol(tokens[1])
            .ok_or_else(|| malformed(format!("'{}' is not a byte-valued symbol", tokens[1])))?;

        let score = tokens[2]
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .ok_or_else(|| malformed(format!("'{}' is not a numeric score", tokens[2])))?;

        Ok(ScoredPair::new(symbol_a, symbol_b, score))
    }

    fn parse_symbol(&self, token: &str) -> Option<Symbol> {
        let digits = if self.radix == 16 {
            token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token)
        } else {
            token
        };
        if digits.is_empty() || digits.starts_with('+') || digits.starts_with('-') {
            return None;
        }
        u8::from_str_radix(digits, self.radix).ok()
    }
}

/// Parses a score source held in memory, hexadecimal symbols.
pub fn parse_score_source(text: &str) -> PfResult<ScoreSource> {
    ScoreEntryParser::new().parse_str(text)
}

pub fn load_score_source<P: AsRef<Path>>(path: P, radix: u32) -> PfResult<ScoreSource> {
    let path = path.as_ref();
    debug!("Loading score source from: {:?}", path);
    let bytes = fs::read(path)?;
    ScoreEntryParser::new()
        .with_radix(radix)?
        .parse_reader(bytes.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_tokens_accept_optional_hex_prefix() {
        let parser = ScoreEntryParser::new();
        assert_eq!(parser.parse_symbol("0x1b"), Some(0x1b));
        assert_eq!(parser.parse_symbol("1B"), Some(0x1b));
        assert_eq!(parser.parse_symbol("0xff"), Some(0xff));
        assert_eq!(parser.parse_symbol("0x100"), None);
        assert_eq!(parser.parse_symbol("zz"), None);
        assert_eq!(parser.parse_symbol("0x"), None);
        assert_eq!(parser.parse_symbol("+1"), None);
    }

    #[test]
    fn decimal_radix_does_not_strip_prefix() {
        let parser = ScoreEntryParser::new().with_radix(10).unwrap();
        assert_eq!(parser.parse_symbol("65"), Some(65));
        assert_eq!(parser.parse_symbol("0x41"), None);
        assert_eq!(parser.parse_symbol("256"), None);
    }

    #[test]
    fn rejects_out_of_range_radix() {
        assert!(ScoreEntryParser::new().with_radix(1).is_err());
        assert!(ScoreEntryParser::new().with_radix(37).is_err());
    }
}
