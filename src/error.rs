use thiserror::Error;

#[derive(Error, Debug)]
pub enum PepForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Malformed score entry on line {line} ('{content}'): {reason}")]
    MalformedEntry {
        line: usize,
        content: String,
        reason: String,
    },

    #[error(
        "Conflicting scores for pair ({symbol_a:#04x}, {symbol_b:#04x}): {first} vs {second}"
    )]
    ConflictingEntry {
        symbol_a: u8,
        symbol_b: u8,
        first: f64,
        second: f64,
    },

    #[error("Unknown polymer type: '{0}'")]
    UnknownPolymerType(String),

    #[error("Polymer type '{0}' is already registered (use replace to overwrite)")]
    AlreadyRegistered(String),

    #[error("Column {column} has no registered scoring context ({})", .polymer_type.as_deref().unwrap_or("no context selected"))]
    ColumnContextUnresolved {
        column: usize,
        polymer_type: Option<String>,
    },

    #[error("Sequence '{id}' has length {found}, expected {expected}")]
    LengthMismatch {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("Malformed sequence: {0}")]
    MalformedSequence(String),

    #[error("No free symbol left for monomer '{0}'")]
    SymbolSpaceExhausted(String),
}

pub type PfResult<T> = Result<T, PepForgeError>;
