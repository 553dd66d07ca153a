//! Formula evaluation errors.
//!
//! The `Display` text of each variant is exactly what a failed cell shows.

use thiserror::Error;

use super::CellRef;

/// Reasons a formula cell can end up in the error state.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum FormulaError {
    /// A token looked like a reference (or was malformed) and no live cell answers to it.
    #[error("ERROR: invalid cell reference")]
    InvalidReference { reference: String },

    /// The formula reads a cell that is already on the active evaluation path.
    #[error("ERROR: Circular Dependency")]
    CircularDependency { cell: CellRef },

    /// The formula reads its own cell.
    #[error("ERROR: Self Reference")]
    SelfReference { cell: CellRef },

    /// Operands produced both a non-empty string and a non-zero sum.
    #[error("ERROR: incompatible types")]
    IncompatibleTypes,

    #[error("ERROR: dependency chain too deep")]
    ChainTooDeep { limit: usize },
}

impl FormulaError {
    pub fn invalid_reference(reference: impl Into<String>) -> FormulaError {
        FormulaError::InvalidReference {
            reference: reference.into(),
        }
    }
}
