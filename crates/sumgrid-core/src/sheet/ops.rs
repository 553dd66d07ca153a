use sumgrid_engine::engine::{Cell, CellInput, CellKind, CellRef, CellValue, VisitState};
use tracing::{debug, warn};

use super::Sheet;
use super::state::display_text;
use crate::display::DisplaySink;
use crate::error::Result;

impl<D: DisplaySink> Sheet<D> {
    /// Set cell contents from input text and recompute everything that reads it.
    ///
    /// Text starting with `=` is a formula, text that is entirely a number is
    /// a number, anything else is stored verbatim.
    pub fn set_cell_value(&mut self, row: usize, col: usize, text: &str) {
        let at = CellRef::new(row, col);
        debug!("set {at} = {text:?}");

        let previous = {
            let cell = self.store.find_or_create(at);
            cell.raw_input = text.to_string();
            cell.dirty = false;
            cell.formula.take()
        };
        // The old formula's edges go away; the new one registers its own.
        if let Some(old) = previous {
            for source in old.references() {
                self.store.unlink(&source, &at);
            }
        }

        match CellInput::parse(text) {
            CellInput::Number(n) => self.commit(at, CellValue::Number(n)),
            CellInput::Text(s) => self.commit(at, CellValue::Text(s)),
            CellInput::Formula(Err(e)) => {
                warn!("malformed formula in {at}: {text:?}");
                self.commit(at, CellValue::Error(e));
            }
            CellInput::Formula(Ok(formula)) => {
                if let Some(cell) = self.store.find_mut(&at) {
                    cell.formula = Some(formula);
                    cell.value = CellValue::Unset;
                    cell.dirty = true;
                }
            }
        }

        self.recalculate(at);
    }

    /// The text last supplied for a cell, or `None` if the cell does not exist.
    pub fn get_textual_value(&self, row: usize, col: usize) -> Option<String> {
        self.cell(row, col).map(|cell| cell.raw_input.clone())
    }

    /// Remove a cell.
    ///
    /// The display is told the cell is now blank. Formulas that read the
    /// cell are re-evaluated and report an invalid reference until the
    /// coordinate is set again.
    pub fn clear_cell(&mut self, row: usize, col: usize) {
        let at = CellRef::new(row, col);
        let Some(cell) = self.store.remove(&at) else {
            return;
        };
        debug!("clear {at}");

        if let Some(formula) = &cell.formula {
            for source in formula.references() {
                self.store.unlink(&source, &at);
            }
        }
        self.sink.update(at, "");

        let readers = cell
            .dependents
            .iter()
            .copied()
            .filter(|dependent| *dependent != at)
            .collect();
        self.recalculate_from(at, readers);
    }

    /// Release every cell. Safe to call on an empty sheet.
    pub fn destroy(&mut self) {
        debug!("destroy: dropping {} cell(s)", self.store.len());
        self.store.clear();
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.store.find(&CellRef::new(row, col))
    }

    pub fn value(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.cell(row, col).map(|cell| &cell.value)
    }

    pub fn kind(&self, row: usize, col: usize) -> Option<CellKind> {
        self.cell(row, col).and_then(Cell::kind)
    }

    /// The text the display currently shows for a cell.
    pub fn display_text(&self, row: usize, col: usize) -> Option<String> {
        self.cell(row, col).map(|cell| display_text(cell, self.config.precision))
    }

    /// Numeric value of a cell, `None` for an absent or non-numeric cell.
    ///
    /// A cell in error reports that error.
    pub fn number(&self, row: usize, col: usize) -> Result<Option<f64>> {
        match self.value(row, col) {
            Some(CellValue::Error(e)) => Err(e.clone().into()),
            value => Ok(value.and_then(CellValue::as_number)),
        }
    }

    /// Cells whose formula reads this one, in registration order.
    pub fn dependents_of(&self, row: usize, col: usize) -> Vec<CellRef> {
        self.cell(row, col)
            .map(|cell| cell.dependents.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// True when no cell is mid-evaluation or waiting to be re-evaluated.
    pub fn is_settled(&self) -> bool {
        self.store
            .iter()
            .all(|(_, cell)| cell.visit == VisitState::Unvisited && !cell.dirty)
    }
}

#[cfg(test)]
mod tests {
    use crate::display::RecordingSink;
    use crate::{Sheet, SheetError};
    use sumgrid_engine::engine::{CellKind, CellRef, CellValue, FormulaError};

    #[test]
    fn test_set_number_and_text() {
        let mut sheet = Sheet::with_sink(RecordingSink::new());
        sheet.set_cell_value(0, 0, "5");
        sheet.set_cell_value(0, 1, "hello");

        assert_eq!(sheet.value(0, 0), Some(&CellValue::Number(5.0)));
        assert_eq!(sheet.kind(0, 1), Some(CellKind::Text));
        // Literals are displayed as typed.
        assert_eq!(sheet.sink().last(CellRef::new(0, 0)), Some("5"));
        assert_eq!(sheet.sink().last(CellRef::new(0, 1)), Some("hello"));
    }

    #[test]
    fn test_reset_mutates_in_place() {
        let mut sheet = Sheet::new();
        sheet.set_cell_value(2, 3, "1");
        sheet.set_cell_value(2, 3, "two");
        sheet.set_cell_value(2, 3, "=4");
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.value(2, 3), Some(&CellValue::Number(4.0)));
    }

    #[test]
    fn test_get_textual_value_missing() {
        let sheet = Sheet::new();
        assert_eq!(sheet.get_textual_value(0, 0), None);
    }

    #[test]
    fn test_formula_change_drops_old_edges() {
        let mut sheet = Sheet::new();
        sheet.set_cell_value(0, 0, "1");
        sheet.set_cell_value(0, 1, "2");
        sheet.set_cell_value(0, 2, "=A1");
        assert_eq!(sheet.dependents_of(0, 0), vec![CellRef::new(0, 2)]);

        sheet.set_cell_value(0, 2, "=B1");
        assert!(sheet.dependents_of(0, 0).is_empty());
        assert_eq!(sheet.dependents_of(0, 1), vec![CellRef::new(0, 2)]);

        sheet.set_cell_value(0, 2, "plain");
        assert!(sheet.dependents_of(0, 1).is_empty());
    }

    #[test]
    fn test_clear_cell_notifies_and_errors_readers() {
        let mut sheet = Sheet::with_sink(RecordingSink::new());
        sheet.set_cell_value(0, 0, "1");
        sheet.set_cell_value(1, 0, "=A1+1");

        sheet.clear_cell(0, 0);
        assert!(sheet.cell(0, 0).is_none());
        assert_eq!(sheet.sink().last(CellRef::new(0, 0)), Some(""));
        assert_eq!(
            sheet.value(1, 0),
            Some(&CellValue::Error(FormulaError::invalid_reference("A1")))
        );

        // The reader is still wired to the coordinate.
        sheet.set_cell_value(0, 0, "5");
        assert_eq!(sheet.value(1, 0), Some(&CellValue::Number(6.0)));
    }

    #[test]
    fn test_clear_formula_cell_prunes_its_edges() {
        let mut sheet = Sheet::new();
        sheet.set_cell_value(0, 0, "1");
        sheet.set_cell_value(0, 1, "=A1");
        sheet.clear_cell(0, 1);
        assert!(sheet.dependents_of(0, 0).is_empty());

        // Nothing left to notify and nothing dangling to dereference.
        sheet.set_cell_value(0, 0, "2");
        assert!(sheet.cell(0, 1).is_none());
    }

    #[test]
    fn test_clear_missing_cell_is_noop() {
        let mut sheet = Sheet::with_sink(RecordingSink::new());
        sheet.clear_cell(4, 4);
        assert!(sheet.sink().updates().is_empty());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut sheet = Sheet::new();
        sheet.set_cell_value(0, 0, "1");
        sheet.set_cell_value(0, 1, "=A1");
        sheet.destroy();
        assert!(sheet.is_empty());
        sheet.destroy();
        assert!(sheet.is_empty());
        assert_eq!(sheet.get_textual_value(0, 0), None);
    }

    #[test]
    fn test_number_query() {
        let mut sheet = Sheet::new();
        sheet.set_cell_value(0, 0, "2.5");
        sheet.set_cell_value(0, 1, "text");
        sheet.set_cell_value(0, 2, "=Z99");

        assert_eq!(sheet.number(0, 0).unwrap(), Some(2.5));
        assert_eq!(sheet.number(0, 1).unwrap(), None);
        assert_eq!(sheet.number(5, 5).unwrap(), None);
        assert!(matches!(
            sheet.number(0, 2),
            Err(SheetError::Formula(FormulaError::InvalidReference { .. }))
        ));
    }

    #[test]
    fn test_precision_from_config() {
        let config = crate::SheetConfig {
            precision: 3,
            ..Default::default()
        };
        let mut sheet = Sheet::with_config(config, RecordingSink::new());
        sheet.set_cell_value(0, 0, "=1+0.5");
        assert_eq!(sheet.display_text(0, 0).as_deref(), Some("1.500"));
    }
}
