//! Formula evaluation.
//!
//! Evaluation walks the operand list left to right. Propagation hands
//! cells over in dependency order, so a referenced formula is normally
//! settled already. One that is still pending sits on a cycle and is
//! evaluated on the spot. Each cell on the active path carries the
//! `Visiting` mark; reaching a marked cell again is a cycle.

use sumgrid_engine::engine::{
    Accumulator, CellRef, CellValue, Formula, FormulaError, Operand, Resolved, VisitState,
};
use tracing::{trace, warn};

use super::Sheet;
use crate::display::DisplaySink;

impl<D: DisplaySink> Sheet<D> {
    /// Evaluate the formula held by `at` and store the outcome in the cell.
    pub(crate) fn evaluate_cell(&mut self, at: CellRef) {
        if let Err(e) = self.pull(at, 0) {
            trace!("{at} settled as {e}");
        }
    }

    /// Evaluate `at` at nesting `depth` and store the outcome.
    ///
    /// On failure the cell holds the error; the error is also returned so a
    /// reading formula can take it over unchanged. Cells without a formula
    /// have nothing to compute.
    fn pull(&mut self, at: CellRef, depth: usize) -> Result<(), FormulaError> {
        let Some(formula) = self.store.find(&at).and_then(|cell| cell.formula.clone()) else {
            if let Some(cell) = self.store.find_mut(&at) {
                cell.dirty = false;
            }
            return Ok(());
        };

        let outcome = self.evaluate(at, &formula, depth);
        let value = match &outcome {
            Ok(resolved) => CellValue::from(resolved.clone()),
            Err(e) => CellValue::Error(e.clone()),
        };
        self.commit(at, value);
        outcome.map(|_| ())
    }

    fn evaluate(
        &mut self,
        at: CellRef,
        formula: &Formula,
        depth: usize,
    ) -> Result<Resolved, FormulaError> {
        trace!("evaluating {at} = {}", formula.source());
        for source in formula.references() {
            self.store.link(source, at);
        }

        self.set_visit(at, VisitState::Visiting);
        let outcome = self.sum_operands(at, formula, depth);
        self.set_visit(at, VisitState::Unvisited);
        outcome
    }

    fn sum_operands(
        &mut self,
        at: CellRef,
        formula: &Formula,
        depth: usize,
    ) -> Result<Resolved, FormulaError> {
        let mut acc = Accumulator::new();
        for operand in formula.operands() {
            let source = match operand {
                Operand::Literal(n) => {
                    acc.add_number(*n);
                    continue;
                }
                Operand::Reference(source) => *source,
            };

            if source == at {
                warn!("{at} references itself");
                return Err(FormulaError::SelfReference { cell: at });
            }

            let (visiting, pending) = match self.store.find(&source) {
                Some(cell) if cell.dirty || cell.value != CellValue::Unset => {
                    (cell.is_visiting(), cell.dirty)
                }
                _ => return Err(FormulaError::invalid_reference(source.to_string())),
            };
            if visiting {
                warn!("circular dependency: {at} reads {source} while it is being evaluated");
                return Err(FormulaError::CircularDependency { cell: source });
            }
            if pending {
                // Only reached inside a cycle; acyclic precedents are evaluated first.
                let limit = self.config.max_depth;
                if depth >= limit {
                    warn!("{at} would nest deeper than {limit} to evaluate {source}");
                    return Err(FormulaError::ChainTooDeep { limit });
                }
                self.pull(source, depth + 1)?;
            }

            match self.store.find(&source).map(|cell| &cell.value) {
                Some(CellValue::Number(n)) => acc.add_number(*n),
                Some(CellValue::Text(s)) => acc.add_text(s),
                Some(CellValue::Error(e)) => return Err(e.clone()),
                Some(CellValue::Unset) | None => {
                    return Err(FormulaError::invalid_reference(source.to_string()));
                }
            }
        }
        acc.resolve()
    }

    fn set_visit(&mut self, at: CellRef, state: VisitState) {
        if let Some(cell) = self.store.find_mut(&at) {
            cell.visit = state;
        }
    }
}
