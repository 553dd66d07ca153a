//! Spreadsheet engine API.
//!
//! This module provides the cell model the sheet is built from:
//!
//! - [`Cell`], [`CellValue`], [`CellKind`] - Data structures for cell storage
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`CellInput`] - Classification of raw input text
//! - [`Formula`], [`Operand`] - Tokenized `+`-joined operand lists
//! - [`Accumulator`] - Additive evaluation and result resolution
//! - [`FormulaError`] - Why a formula cell failed
//! - [`format_number`] - Format values for display

mod cell;
mod cell_ref;
mod error;
mod eval;
mod format;
mod formula;

pub use cell::{Cell, CellInput, CellKind, CellValue, VisitState};
pub use cell_ref::CellRef;
pub use error::FormulaError;
pub use eval::{Accumulator, Resolved};
pub use format::format_number;
pub use formula::{Formula, Operand, parse_number};
