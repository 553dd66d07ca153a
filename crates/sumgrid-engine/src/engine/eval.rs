//! Accumulation of operand values and result resolution.
//!
//! Numbers are summed, text is concatenated in encounter order. Mixing a
//! non-zero sum with non-empty text is rejected rather than coerced.

use super::{CellValue, FormulaError};

/// Outcome of a successful formula evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    Number(f64),
    Text(String),
}

impl From<Resolved> for CellValue {
    fn from(resolved: Resolved) -> Self {
        match resolved {
            Resolved::Number(n) => CellValue::Number(n),
            Resolved::Text(s) => CellValue::Text(s),
        }
    }
}

/// Running totals for one pass over an operand list.
#[derive(Clone, Debug, Default)]
pub struct Accumulator {
    sum: f64,
    text: String,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_number(&mut self, n: f64) {
        self.sum += n;
    }

    pub fn add_text(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn resolve(self) -> Result<Resolved, FormulaError> {
        match (self.text.is_empty(), self.sum == 0.0) {
            (false, false) => Err(FormulaError::IncompatibleTypes),
            (false, true) => Ok(Resolved::Text(self.text)),
            (true, _) => Ok(Resolved::Number(self.sum)),
        }
    }
}
