use std::ops::Range;

/// Maps an alignment column to the polymer type whose matrix scores it.
///
/// Column-to-context assignment comes from the caller; nothing here infers
/// it from the symbols themselves.
pub trait ContextSelector: Sync {
    fn context_for(&self, column: usize) -> Option<&str>;
}

/// Every column belongs to one polymer type.
#[derive(Debug, Clone)]
pub struct UniformContext(pub String);

impl UniformContext {
    pub fn new(polymer_type: impl Into<String>) -> Self {
        Self(polymer_type.into())
    }
}

impl ContextSelector for UniformContext {
    fn context_for(&self, _column: usize) -> Option<&str> {
        Some(&self.0)
    }
}

/// One polymer-type tag per column.
#[derive(Debug, Clone, Default)]
pub struct ColumnContexts(pub Vec<String>);

impl ContextSelector for ColumnContexts {
    fn context_for(&self, column: usize) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }
}

/// Half-open column ranges tagged with a polymer type. First match wins;
/// columns outside every range are unresolved.
#[derive(Debug, Clone, Default)]
pub struct SegmentedContexts {
    segments: Vec<(Range<usize>, String)>,
}

impl SegmentedContexts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segment(mut self, columns: Range<usize>, polymer_type: impl Into<String>) -> Self {
        self.segments.push((columns, polymer_type.into()));
        self
    }

    pub fn segments(&self) -> &[(Range<usize>, String)] {
        &self.segments
    }
}

impl ContextSelector for SegmentedContexts {
    fn context_for(&self, column: usize) -> Option<&str> {
        self.segments
            .iter()
            .find(|(range, _)| range.contains(&column))
            .map(|(_, name)| name.as_str())
    }
}
