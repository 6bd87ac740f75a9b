use thiserror::Error;

/// Rejected tolerance for the tolerance-based detector.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ToleranceError {
    /// The tolerance is negative, NaN, or infinite.
    #[error("tolerance must be a finite, non-negative number (got {0})")]
    Invalid(f64),
}

/// A collapse that would leave a line or ring with too few vertices to be valid.
///
/// `part` is the component index inside a Multi* container (0 for a single
/// geometry); `ring` is 0 for a polygon's exterior and `i + 1` for interior `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollapseError {
    #[error("line string {part} collapses to {vertices} coordinate(s); at least 2 are required")]
    DegenerateLineString { part: usize, vertices: usize },

    #[error("ring {ring} of polygon {part} collapses to {vertices} distinct vertex(es); at least 3 are required")]
    DegenerateRing { part: usize, ring: usize, vertices: usize },
}

impl CollapseError {
    /// Re-label the error with the component index of its enclosing container.
    pub(crate) fn in_part(self, index: usize) -> Self {
        match self {
            Self::DegenerateLineString { vertices, .. } => Self::DegenerateLineString { part: index, vertices },
            Self::DegenerateRing { ring, vertices, .. } => Self::DegenerateRing { part: index, ring, vertices },
        }
    }
}
