//! Change propagation.
//!
//! A change first marks every transitive dependent dirty, then evaluates
//! the dirty cells in dependency order (Kahn's algorithm over the dirty
//! subgraph). Each dependent sees fully updated inputs and runs once per
//! pass regardless of the order edges were registered in. Cells left over
//! when no dirty cell is ready sit on or behind a cycle; they are taken in
//! discovery order and the evaluator's visiting marks report the cycle.

use std::collections::{HashMap, HashSet, VecDeque};
use sumgrid_engine::engine::{CellRef, CellValue, FormulaError};
use tracing::{debug, warn};

use super::Sheet;
use crate::display::DisplaySink;

impl<D: DisplaySink> Sheet<D> {
    /// Re-evaluate `origin` (if it holds a pending formula) and everything downstream of it.
    pub(crate) fn recalculate(&mut self, origin: CellRef) {
        let direct = self.dependents_list(&origin);
        self.recalculate_from(origin, direct);
    }

    /// Like [`Sheet::recalculate`] with an explicit first wave of dependents,
    /// for changes whose origin is no longer in the store.
    pub(crate) fn recalculate_from(&mut self, origin: CellRef, direct: Vec<CellRef>) {
        let mut pending = self.mark_dependents_dirty(origin, direct);
        debug!("recalculating {origin}: {} dependent(s)", pending.len());

        if self.store.find(&origin).is_some_and(|cell| cell.dirty) {
            pending.insert(0, origin);
        }
        for at in self.evaluation_order(&pending) {
            if self.store.find(&at).is_some_and(|cell| cell.dirty) {
                self.evaluate_cell(at);
            }
        }
    }

    /// Order `pending` so every cell comes after the pending cells it reads.
    ///
    /// Cells that never become ready are appended in their original order,
    /// each one releasing its readers as it goes.
    fn evaluation_order(&self, pending: &[CellRef]) -> Vec<CellRef> {
        let members: HashSet<CellRef> = pending.iter().copied().collect();
        let mut waiting_on: HashMap<CellRef, usize> = HashMap::new();
        let mut readers: HashMap<CellRef, Vec<CellRef>> = HashMap::new();
        for &at in pending {
            let sources = self
                .store
                .find(&at)
                .and_then(|cell| cell.formula.as_ref())
                .map(|formula| formula.references())
                .unwrap_or_default();
            let mut count = 0;
            for source in sources {
                if source != at && members.contains(&source) {
                    readers.entry(source).or_default().push(at);
                    count += 1;
                }
            }
            waiting_on.insert(at, count);
        }

        let mut order = Vec::with_capacity(pending.len());
        let mut ready: VecDeque<CellRef> = pending
            .iter()
            .copied()
            .filter(|at| waiting_on.get(at) == Some(&0))
            .collect();
        let mut stalled = pending.iter().copied();
        while order.len() < pending.len() {
            let next = match ready.pop_front() {
                Some(at) => at,
                None => match stalled.find(|at| waiting_on.contains_key(at)) {
                    Some(at) => at,
                    None => break,
                },
            };
            if waiting_on.remove(&next).is_none() {
                continue;
            }
            order.push(next);
            for reader in readers.get(&next).into_iter().flatten() {
                if let Some(count) = waiting_on.get_mut(reader) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        ready.push_back(*reader);
                    }
                }
            }
        }
        order
    }

    /// Walk dependents breadth-first in registration order, marking formula
    /// cells dirty. Returns them in discovery order.
    fn mark_dependents_dirty(&mut self, origin: CellRef, direct: Vec<CellRef>) -> Vec<CellRef> {
        let mut order = Vec::new();
        let mut visited = HashSet::from([origin]);
        let mut queue = VecDeque::from([(origin, direct)]);

        while let Some((changed, dependents)) = queue.pop_front() {
            for dependent in dependents {
                if dependent == changed {
                    self.flag_self_reference(dependent);
                    continue;
                }
                let Some(cell) = self.store.find_mut(&dependent) else {
                    warn!("pruning stale edge {changed} -> {dependent}");
                    self.store.unlink(&changed, &dependent);
                    continue;
                };
                if !cell.is_formula() {
                    warn!("pruning stale edge {changed} -> {dependent}");
                    self.store.unlink(&changed, &dependent);
                    continue;
                }
                if !visited.insert(dependent) {
                    continue;
                }
                cell.dirty = true;
                order.push(dependent);
                let next = self.dependents_list(&dependent);
                queue.push_back((dependent, next));
            }
        }
        order
    }

    /// A cell listed among its own dependents reads itself. It is put in the
    /// error state and never re-evaluated from the walk.
    fn flag_self_reference(&mut self, at: CellRef) {
        warn!("{at} lists itself as a dependent");
        let error = FormulaError::SelfReference { cell: at };
        let Some(cell) = self.store.find_mut(&at) else {
            return;
        };
        if cell.value.as_error() == Some(&error) {
            cell.dirty = false;
        } else {
            self.commit(at, CellValue::Error(error));
        }
    }

    fn dependents_list(&self, at: &CellRef) -> Vec<CellRef> {
        self.store
            .find(at)
            .map(|cell| cell.dependents.iter().copied().collect())
            .unwrap_or_default()
    }
}
