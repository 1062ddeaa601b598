//! Error types for index construction.

use std::fmt;

/// Kind of index that failed a range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Square identity (`0..64`).
    Square,
    /// Piece identity (`0..32`).
    Piece,
    /// Attack board index (`0..4`).
    AttackBoard,
    /// Docking station index (`0..12`).
    Station,
    /// Main board level (`0..3`).
    Level,
}

impl IndexKind {
    /// Exclusive upper bound for this kind of index.
    #[must_use]
    pub const fn limit(self) -> usize {
        match self {
            IndexKind::Square => 64,
            IndexKind::Piece => 32,
            IndexKind::AttackBoard => 4,
            IndexKind::Station => 12,
            IndexKind::Level => 3,
        }
    }
}

/// An index was outside the fixed range for its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexError {
    /// Which kind of index was being built.
    pub kind: IndexKind,
    /// The rejected value.
    pub value: usize,
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} index {} out of range (must be < {})",
            self.kind,
            self.value,
            self.kind.limit()
        )
    }
}

impl std::error::Error for IndexError {}

/// Result type for index construction.
pub type IndexResult<T> = Result<T, IndexError>;
