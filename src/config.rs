use crate::alignment::DEFAULT_GAP_SYMBOL;
use crate::error::{PepForgeError, PfResult};
use crate::scorer::builder::{DEFAULT_SCORE, SELF_SCORE};
use crate::scorer::engine::Aggregate;
use crate::scorer::gaps::GapPolicy;
use crate::scorer::loader::DEFAULT_SYMBOL_RADIX;
use clap::parser::ValueSource;
use clap::{ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    // === MATRIX ===
    /// Score for pairs the source does not list, and for symbols it never mentions
    #[arg(long, default_value_t = DEFAULT_SCORE, allow_negative_numbers = true)]
    pub default_score: f64,

    /// Self-pair score for mentioned symbols without an explicit diagonal entry
    #[arg(long, default_value_t = SELF_SCORE, allow_negative_numbers = true)]
    pub self_score: f64,

    /// Numeric base of symbol tokens in score sources
    #[arg(long, default_value_t = DEFAULT_SYMBOL_RADIX)]
    pub symbol_radix: u32,

    // === GAPS ===
    /// Gap vs residue score (gap-open when --gap-extend is set)
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    pub gap_penalty: f64,

    /// Switches to run-length gap scoring with this extension score
    #[arg(long, allow_negative_numbers = true)]
    pub gap_extend: Option<f64>,

    /// Gap vs gap score
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub gap_gap_score: f64,

    #[arg(long, default_value_t = DEFAULT_GAP_SYMBOL as char)]
    pub gap_symbol: char,

    // === AGGREGATE ===
    #[arg(long, default_value_t = Aggregate::SumOfPairs)]
    pub aggregate: Aggregate,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            default_score: DEFAULT_SCORE,
            self_score: SELF_SCORE,
            symbol_radix: DEFAULT_SYMBOL_RADIX,
            gap_penalty: -10.0,
            gap_extend: None,
            gap_gap_score: 1.0,
            gap_symbol: DEFAULT_GAP_SYMBOL as char,
            aggregate: Aggregate::SumOfPairs,
        }
    }
}

impl ScoringParams {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PfResult<Self> {
        let content = fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&content)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> PfResult<()> {
        self.gap_byte()?;
        if !(2..=36).contains(&self.symbol_radix) {
            return Err(PepForgeError::Config(format!(
                "symbol_radix must be within 2..=36, got {}",
                self.symbol_radix
            )));
        }
        let scores = [
            ("default_score", Some(self.default_score)),
            ("self_score", Some(self.self_score)),
            ("gap_penalty", Some(self.gap_penalty)),
            ("gap_extend", self.gap_extend),
            ("gap_gap_score", Some(self.gap_gap_score)),
        ];
        for (name, value) in scores {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(PepForgeError::Config(format!("{} must be finite", name)));
                }
            }
        }
        Ok(())
    }

    /// Gap symbol as a byte. Only single-byte (Latin-1) characters are accepted.
    pub fn gap_byte(&self) -> PfResult<u8> {
        u8::try_from(u32::from(self.gap_symbol)).map_err(|_| {
            PepForgeError::Config(format!(
                "gap_symbol '{}' does not fit in one byte",
                self.gap_symbol
            ))
        })
    }

    pub fn gap_policy(&self) -> GapPolicy {
        match self.gap_extend {
            Some(extend) => GapPolicy::Affine {
                open: self.gap_penalty,
                extend,
                gap_gap: self.gap_gap_score,
            },
            None => GapPolicy::Fixed {
                penalty: self.gap_penalty,
                gap_gap: self.gap_gap_score,
            },
        }
    }

    /// Copies only the arguments the user actually typed on the command line.
    pub fn merge_from_cli(&mut self, cli: &ScoringParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(default_score, "default_score");
        update_if_present!(self_score, "self_score");
        update_if_present!(symbol_radix, "symbol_radix");
        update_if_present!(gap_penalty, "gap_penalty");
        update_if_present!(gap_extend, "gap_extend");
        update_if_present!(gap_gap_score, "gap_gap_score");
        update_if_present!(gap_symbol, "gap_symbol");
        update_if_present!(aggregate, "aggregate");
    }
}
