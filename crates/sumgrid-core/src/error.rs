//! Error types for Sumgrid core.

use thiserror::Error;

use sumgrid_engine::engine::FormulaError;

/// Errors that can occur outside of cell evaluation.
///
/// Formula failures normally stay inside the cell that produced them.
/// [`SheetError::Formula`] carries one out when a caller asks for a value,
/// as `Sheet::number` does.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Formula error: {0}")]
    Formula(#[from] FormulaError),
}

pub type Result<T> = std::result::Result<T, SheetError>;
