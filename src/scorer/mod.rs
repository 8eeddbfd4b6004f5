pub mod builder;
pub mod engine;
pub mod gaps;
pub mod loader;
pub mod matrix;
pub mod registry;
pub mod selector;
pub mod types;

pub use self::builder::{build_matrix, MatrixBuildParams};
pub use self::engine::{score_alignment, Aggregate, AlignmentScore, ScoringEngine};
pub use self::gaps::GapPolicy;
pub use self::loader::{load_score_source, parse_score_source, ScoreEntryParser, ScoreSource};
pub use self::matrix::{
    DistanceMatrix, DistanceMatrixAdapter, ReferenceKind, ReferenceMatrix, SubstitutionMatrix,
    MATRIX_DIM,
};
pub use self::registry::PolymerContextRegistry;
pub use self::selector::{ColumnContexts, ContextSelector, SegmentedContexts, UniformContext};
pub use self::types::{ScoredPair, Symbol};
