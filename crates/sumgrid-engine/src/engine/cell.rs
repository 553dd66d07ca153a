//! Cell data structures for the spreadsheet grid.
//!
//! This module provides the core data types for representing cells:
//! - [`CellValue`] - What a cell currently holds (number, text or error)
//! - [`CellKind`] - The observable tag of a cell
//! - [`CellInput`] - Classification of raw user input
//! - [`Cell`] - A cell with its value, formula, and dependency bookkeeping

use indexmap::IndexSet;

use super::cell_ref::CellRef;
use super::error::FormulaError;
use super::format::format_number;
use super::formula::{Formula, parse_number};

/// The value a cell currently holds.
///
/// Text and errors own their payload, so overwriting a value releases the
/// previous one.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum CellValue {
    /// Freshly allocated, nothing assigned yet.
    #[default]
    Unset,
    Number(f64),
    Text(String),
    Error(FormulaError),
}

impl CellValue {
    /// Render for display. Numbers use `precision` decimal places.
    pub fn render(&self, precision: usize) -> String {
        match self {
            CellValue::Unset => String::new(),
            CellValue::Number(n) => format_number(*n, precision),
            CellValue::Text(s) => s.clone(),
            CellValue::Error(e) => e.to_string(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&FormulaError> {
        match self {
            CellValue::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// The tag of a cell as seen from outside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Number,
    Text,
    /// A formula that has not been evaluated yet. Only visible mid-recalculation.
    Formula,
    Error,
}

/// Transient mark used to detect cycles during evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VisitState {
    #[default]
    Unvisited,
    Visiting,
}

/// Parsed user input.
#[derive(Clone, Debug, PartialEq)]
pub enum CellInput {
    /// Starts with '=': the operand list, or why it could not be parsed.
    Formula(Result<Formula, FormulaError>),
    Number(f64),
    Text(String),
}

impl CellInput {
    /// Classify user input.
    /// - First character is '=' -> Formula (without the '=')
    /// - Number syntax up to the last character (leading whitespace allowed) -> Number
    /// - Otherwise -> Text, kept verbatim
    pub fn parse(input: &str) -> CellInput {
        if let Some(body) = input.strip_prefix('=') {
            return CellInput::Formula(Formula::parse(body));
        }
        if let Some(n) = parse_number(input.trim_start()) {
            return CellInput::Number(n);
        }
        CellInput::Text(input.to_string())
    }
}

/// A cell in the spreadsheet grid.
#[derive(Clone, Debug)]
pub struct Cell {
    pub value: CellValue,
    /// Operand list the value is computed from, if this is a formula cell.
    pub formula: Option<Formula>,
    /// Exact text last supplied by the caller.
    pub raw_input: String,
    /// Cells whose formula reads this one, in registration order.
    pub dependents: IndexSet<CellRef>,
    pub visit: VisitState,
    /// Queued for re-evaluation in the current recalculation pass.
    pub dirty: bool,
}

impl Cell {
    pub fn new_empty() -> Cell {
        Cell {
            value: CellValue::Unset,
            formula: None,
            raw_input: String::new(),
            dependents: IndexSet::new(),
            visit: VisitState::Unvisited,
            dirty: false,
        }
    }

    pub fn kind(&self) -> Option<CellKind> {
        match &self.value {
            CellValue::Number(_) => Some(CellKind::Number),
            CellValue::Text(_) => Some(CellKind::Text),
            CellValue::Error(_) => Some(CellKind::Error),
            CellValue::Unset if self.formula.is_some() => Some(CellKind::Formula),
            CellValue::Unset => None,
        }
    }

    pub fn is_formula(&self) -> bool {
        self.formula.is_some()
    }

    pub fn is_visiting(&self) -> bool {
        self.visit == VisitState::Visiting
    }

    /// Register `dependent` as a reader of this cell. Returns false if it was already known.
    pub fn add_dependent(&mut self, dependent: CellRef) -> bool {
        self.dependents.insert(dependent)
    }

    pub fn remove_dependent(&mut self, dependent: &CellRef) -> bool {
        self.dependents.shift_remove(dependent)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new_empty()
    }
}
