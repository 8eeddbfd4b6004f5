use super::builder::build_matrix;
use super::loader::{load_score_source, ScoreEntryParser};
use super::matrix::{DistanceMatrixAdapter, ReferenceMatrix, SubstitutionMatrix};
use crate::config::ScoringParams;
use crate::error::{PepForgeError, PfResult};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// Polymer type -> scoring matrix. Matrices are never merged across types:
/// the same byte may name different monomers in different contexts.
pub struct PolymerContextRegistry {
    params: ScoringParams,
    contexts: RwLock<HashMap<String, DistanceMatrixAdapter>>,
}

impl Default for PolymerContextRegistry {
    fn default() -> Self {
        Self::new(ScoringParams::default())
    }
}

impl PolymerContextRegistry {
    pub fn new(params: ScoringParams) -> Self {
        Self {
            params,
            contexts: RwLock::new(HashMap::new()),
        }
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    fn build(&self, polymer_type: &str, source: &str) -> PfResult<SubstitutionMatrix> {
        let parsed = ScoreEntryParser::new()
            .with_radix(self.params.symbol_radix)?
            .parse_str(source)?;
        build_matrix(&parsed, &self.params, polymer_type)
    }

    /// Parses and builds `source` for a new polymer type.
    /// Fails with `AlreadyRegistered` if the type is present; see [`Self::replace`].
    pub fn register(&self, polymer_type: &str, source: &str) -> PfResult<Arc<SubstitutionMatrix>> {
        if self.contains(polymer_type) {
            return Err(PepForgeError::AlreadyRegistered(polymer_type.to_string()));
        }
        let matrix = Arc::new(self.build(polymer_type, source)?);
        self.insert_new(polymer_type, DistanceMatrixAdapter::Custom(matrix.clone()))?;
        Ok(matrix)
    }

    pub fn register_file<P: AsRef<Path>>(
        &self,
        polymer_type: &str,
        path: P,
    ) -> PfResult<Arc<SubstitutionMatrix>> {
        if self.contains(polymer_type) {
            return Err(PepForgeError::AlreadyRegistered(polymer_type.to_string()));
        }
        let parsed = load_score_source(path, self.params.symbol_radix)?;
        let matrix = Arc::new(build_matrix(&parsed, &self.params, polymer_type)?);
        self.insert_new(polymer_type, DistanceMatrixAdapter::Custom(matrix.clone()))?;
        Ok(matrix)
    }

    /// Registers a natural amino-acid matrix for a polymer type.
    pub fn register_reference(&self, polymer_type: &str, matrix: ReferenceMatrix) -> PfResult<()> {
        self.insert_new(polymer_type, DistanceMatrixAdapter::Reference(matrix))
    }

    /// Builds every `(polymer_type, source)` in parallel and installs them together.
    /// Nothing is installed if any source fails.
    pub fn register_all(&self, sources: &[(String, String)]) -> PfResult<()> {
        let built: Vec<(String, SubstitutionMatrix)> = sources
            .par_iter()
            .map(|(name, text)| -> PfResult<(String, SubstitutionMatrix)> {
                Ok((name.clone(), self.build(name, text)?))
            })
            .collect::<PfResult<_>>()?;

        let mut guard = self.contexts.write().unwrap_or_else(PoisonError::into_inner);
        let mut batch: HashSet<&str> = HashSet::new();
        for (name, _) in &built {
            if guard.contains_key(name) || !batch.insert(name.as_str()) {
                return Err(PepForgeError::AlreadyRegistered(name.clone()));
            }
        }
        for (name, matrix) in built {
            info!("Registered polymer context '{}' ({} pairs)", name, matrix.pair_count());
            guard.insert(name, DistanceMatrixAdapter::Custom(Arc::new(matrix)));
        }
        Ok(())
    }

    /// Explicit last-write-wins replacement. Returns the previous matrix, if any.
    /// Scorers holding the previous matrix keep using it unchanged.
    pub fn replace(
        &self,
        polymer_type: &str,
        source: &str,
    ) -> PfResult<Option<DistanceMatrixAdapter>> {
        let matrix = self.build(polymer_type, source)?;
        Ok(self.replace_with(polymer_type, matrix.into()))
    }

    pub fn replace_with(
        &self,
        polymer_type: &str,
        matrix: DistanceMatrixAdapter,
    ) -> Option<DistanceMatrixAdapter> {
        let mut guard = self.contexts.write().unwrap_or_else(PoisonError::into_inner);
        let previous = guard.insert(polymer_type.to_string(), matrix);
        if previous.is_some() {
            warn!("Replaced scoring matrix for polymer context '{}'", polymer_type);
        } else {
            info!("Registered polymer context '{}'", polymer_type);
        }
        previous
    }

    pub fn resolve(&self, polymer_type: &str) -> PfResult<DistanceMatrixAdapter> {
        self.contexts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(polymer_type)
            .cloned()
            .ok_or_else(|| PepForgeError::UnknownPolymerType(polymer_type.to_string()))
    }

    pub fn contains(&self, polymer_type: &str) -> bool {
        self.contexts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(polymer_type)
    }

    pub fn polymer_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .contexts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.contexts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert_new(&self, polymer_type: &str, matrix: DistanceMatrixAdapter) -> PfResult<()> {
        let mut guard = self.contexts.write().unwrap_or_else(PoisonError::into_inner);
        // Re-checked under the write lock: a concurrent register may have won.
        if guard.contains_key(polymer_type) {
            return Err(PepForgeError::AlreadyRegistered(polymer_type.to_string()));
        }
        info!(
            "Registered polymer context '{}' ({})",
            polymer_type,
            matrix.describe()
        );
        guard.insert(polymer_type.to_string(), matrix);
        Ok(())
    }
}
