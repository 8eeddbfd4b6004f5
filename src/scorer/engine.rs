use super::gaps::GapPolicy;
use super::matrix::{DistanceMatrix, DistanceMatrixAdapter};
use super::registry::PolymerContextRegistry;
use super::selector::ContextSelector;
use super::types::Symbol;
use crate::alignment::Alignment;
use crate::error::{PepForgeError, PfResult};
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    /// Every unordered pair of rows, every column.
    #[default]
    SumOfPairs,
    /// Every row against the column's most frequent symbol. Gap runs are
    /// tracked per row and for the centre across adjacent columns.
    Star,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlignmentScore {
    pub aggregate: Aggregate,
    pub total: f64,
    /// `total / sequences / columns`; `None` for fewer than two rows or no columns.
    pub normalized: Option<f64>,
    pub column_scores: Vec<f64>,
    /// Contribution of each polymer context, keyed by polymer type.
    pub per_context: BTreeMap<String, f64>,
    pub sequences: usize,
    pub columns: usize,
}

pub struct ScoringEngine<'a> {
    registry: &'a PolymerContextRegistry,
    gap_policy: GapPolicy,
    aggregate: Aggregate,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(registry: &'a PolymerContextRegistry, gap_policy: GapPolicy) -> Self {
        Self {
            registry,
            gap_policy,
            aggregate: Aggregate::SumOfPairs,
        }
    }

    pub fn with_aggregate(mut self, aggregate: Aggregate) -> Self {
        self.aggregate = aggregate;
        self
    }

    pub fn gap_policy(&self) -> GapPolicy {
        self.gap_policy
    }

    pub fn score_alignment(
        &self,
        alignment: &Alignment,
        selector: &dyn ContextSelector,
    ) -> PfResult<AlignmentScore> {
        let (contexts, matrices) = self.resolve_columns(alignment, selector)?;

        let column_scores: Vec<f64> = (0..alignment.len())
            .into_par_iter()
            .map(|c| match self.aggregate {
                Aggregate::SumOfPairs => self.sum_of_pairs_column(alignment, &matrices[c], c),
                Aggregate::Star => self.star_column(alignment, &matrices[c], c),
            })
            .collect();

        // Sequential sums keep totals independent of thread scheduling.
        let total: f64 = column_scores.iter().sum();
        let mut per_context: BTreeMap<String, f64> = BTreeMap::new();
        for (name, score) in contexts.iter().zip(&column_scores) {
            *per_context.entry(name.to_string()).or_default() += score;
        }

        let sequences = alignment.number_of_sequences();
        let columns = alignment.len();
        let normalized = if sequences > 1 && columns > 0 {
            Some(total / sequences as f64 / columns as f64)
        } else {
            None
        };

        debug!(
            "Scored alignment ({} x {}) with {}: total {:.3}",
            sequences, columns, self.aggregate, total
        );

        Ok(AlignmentScore {
            aggregate: self.aggregate,
            total,
            normalized,
            column_scores,
            per_context,
            sequences,
            columns,
        })
    }

    /// Resolves every column to its polymer type and matrix before any scoring.
    fn resolve_columns<'s>(
        &self,
        alignment: &Alignment,
        selector: &'s dyn ContextSelector,
    ) -> PfResult<(Vec<&'s str>, Vec<DistanceMatrixAdapter>)> {
        let mut cache: HashMap<&str, DistanceMatrixAdapter> = HashMap::new();
        let mut contexts = Vec::with_capacity(alignment.len());
        let mut matrices = Vec::with_capacity(alignment.len());

        for column in 0..alignment.len() {
            let name = selector
                .context_for(column)
                .ok_or(PepForgeError::ColumnContextUnresolved {
                    column,
                    polymer_type: None,
                })?;
            if !cache.contains_key(name) {
                let matrix = self.registry.resolve(name).map_err(|_| {
                    PepForgeError::ColumnContextUnresolved {
                        column,
                        polymer_type: Some(name.to_string()),
                    }
                })?;
                cache.insert(name, matrix);
            }
            contexts.push(name);
            matrices.push(cache[name].clone());
        }
        Ok((contexts, matrices))
    }

    #[inline(always)]
    fn is_gap(&self, alignment: &Alignment, row: usize, column: usize) -> bool {
        alignment.symbol(row, column) == alignment.gap()
    }

    fn sum_of_pairs_column(
        &self,
        alignment: &Alignment,
        matrix: &DistanceMatrixAdapter,
        c: usize,
    ) -> f64 {
        let rows = alignment.number_of_sequences();
        let mut score = 0.0f64;

        for (i, j) in (0..rows).tuple_combinations() {
            let i_gap = self.is_gap(alignment, i, c);
            let j_gap = self.is_gap(alignment, j, c);
            let i_prev = c > 0 && self.is_gap(alignment, i, c - 1);
            let j_prev = c > 0 && self.is_gap(alignment, j, c - 1);

            let pair = match self.gap_policy.score(i_gap, j_gap, i_prev, j_prev) {
                Some(gap_score) => gap_score,
                None => matrix.score(alignment.symbol(i, c), alignment.symbol(j, c)),
            };
            score += pair;
        }
        score
    }

    fn star_column(&self, alignment: &Alignment, matrix: &DistanceMatrixAdapter, c: usize) -> f64 {
        let rows = alignment.number_of_sequences();
        let gap = alignment.gap();
        let centre_of = |col: usize| most_frequent((0..rows).map(|r| alignment.symbol(r, col)));
        let Some(centre) = centre_of(c) else {
            return 0.0;
        };
        let centre_gap = centre == gap;
        // The centre's gap run continues when the previous column's centre was a gap too.
        let centre_prev = c > 0 && centre_of(c - 1) == Some(gap);

        let mut score = 0.0f64;
        for r in 0..rows {
            let symbol = alignment.symbol(r, c);
            let row_prev = c > 0 && self.is_gap(alignment, r, c - 1);
            let pair = match self
                .gap_policy
                .score(symbol == gap, centre_gap, row_prev, centre_prev)
            {
                Some(gap_score) => gap_score,
                None => matrix.score(symbol, centre),
            };
            score += pair;
        }
        score
    }
}

/// Most frequent symbol; ties go to the one seen first.
fn most_frequent(symbols: impl Iterator<Item = Symbol>) -> Option<Symbol> {
    let mut counts = [0usize; 256];
    let mut order = Vec::new();
    for s in symbols {
        if counts[s as usize] == 0 {
            order.push(s);
        }
        counts[s as usize] += 1;
    }
    let mut best: Option<Symbol> = None;
    for s in order {
        if best.map_or(true, |b| counts[s as usize] > counts[b as usize]) {
            best = Some(s);
        }
    }
    best
}

/// Scores `alignment` against the registry with the default sum-of-pairs aggregate.
pub fn score_alignment(
    alignment: &Alignment,
    selector: &dyn ContextSelector,
    registry: &PolymerContextRegistry,
    gap_policy: GapPolicy,
) -> PfResult<AlignmentScore> {
    ScoringEngine::new(registry, gap_policy).score_alignment(alignment, selector)
}
