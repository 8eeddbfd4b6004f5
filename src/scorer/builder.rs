use super::loader::ScoreSource;
use super::matrix::{SubstitutionMatrix, MATRIX_DIM};
use super::types::ScoredPair;
use crate::config::ScoringParams;
use crate::error::{PepForgeError, PfResult};
use tracing::debug;
use typed_builder::TypedBuilder;

pub const DEFAULT_SCORE: f64 = -10.0;
pub const SELF_SCORE: f64 = 10.0;

#[derive(TypedBuilder)]
pub struct MatrixBuildParams {
    pub pairs: Vec<ScoredPair>,
    #[builder(default = DEFAULT_SCORE)]
    pub default_score: f64,
    #[builder(default = SELF_SCORE)]
    pub self_score: f64,
    #[builder(default, setter(into))]
    pub label: String,
}

impl MatrixBuildParams {
    pub fn from_source(source: &ScoreSource, params: &ScoringParams, label: &str) -> Self {
        MatrixBuildParams::builder()
            .pairs(source.pairs())
            .default_score(params.default_score)
            .self_score(params.self_score)
            .label(label)
            .build()
    }

    pub fn build_matrix(self) -> PfResult<SubstitutionMatrix> {
        let mut scores = vec![self.default_score; MATRIX_DIM * MATRIX_DIM];
        // Cells written by an input pair during this build.
        let mut explicit = vec![false; MATRIX_DIM * MATRIX_DIM];
        let mut scored = [false; MATRIX_DIM];
        let mut pair_count = 0;

        // 1. Input pairs, mirrored
        for pair in &self.pairs {
            let ab = SubstitutionMatrix::idx(pair.symbol_a, pair.symbol_b);
            let ba = SubstitutionMatrix::idx(pair.symbol_b, pair.symbol_a);

            if explicit[ab] {
                if scores[ab] != pair.score {
                    let (symbol_a, symbol_b) = pair.key();
                    return Err(PepForgeError::ConflictingEntry {
                        symbol_a,
                        symbol_b,
                        first: scores[ab],
                        second: pair.score,
                    });
                }
                continue;
            }

            scores[ab] = pair.score;
            scores[ba] = pair.score;
            explicit[ab] = true;
            explicit[ba] = true;
            scored[pair.symbol_a as usize] = true;
            scored[pair.symbol_b as usize] = true;
            pair_count += 1;
        }

        // 2. Diagonal for self-pairs the source omitted
        let mut filled_diagonal = 0;
        for s in 0..MATRIX_DIM {
            let d = s * MATRIX_DIM + s;
            if !explicit[d] {
                scores[d] = self.self_score;
                filled_diagonal += 1;
            }
        }

        debug!(
            "Built matrix '{}': {} pairs, {} scored symbols, {} implicit self-scores",
            self.label,
            pair_count,
            scored.iter().filter(|&&s| s).count(),
            filled_diagonal
        );

        Ok(SubstitutionMatrix {
            label: self.label,
            scores,
            scored,
            default_score: self.default_score,
            self_score: self.self_score,
            pair_count,
        })
    }
}

/// Builds a matrix straight from a parsed source.
pub fn build_matrix(
    source: &ScoreSource,
    params: &ScoringParams,
    label: &str,
) -> PfResult<SubstitutionMatrix> {
    MatrixBuildParams::from_source(source, params, label).build_matrix()
}
