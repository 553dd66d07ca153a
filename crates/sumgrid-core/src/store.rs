//! Sparse cell storage and the dependency index.
//!
//! Cells live in a hash map keyed by coordinate. Dependency edges are
//! coordinates too: a cell's `dependents` set names the formula cells that
//! read it, and a lookup that misses is treated as "no such cell".
//!
//! Formulas may reference coordinates that hold no cell yet. Those edges
//! wait in `awaiting` and are adopted when the cell is first created.

use indexmap::IndexSet;
use std::collections::HashMap;
use sumgrid_engine::engine::{Cell, CellRef};

#[derive(Debug, Default)]
pub struct CellStore {
    cells: HashMap<CellRef, Cell>,
    /// Missing coordinate -> formula cells that reference it.
    awaiting: HashMap<CellRef, IndexSet<CellRef>>,
}

impl CellStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, at: &CellRef) -> Option<&Cell> {
        self.cells.get(at)
    }

    pub fn find_mut(&mut self, at: &CellRef) -> Option<&mut Cell> {
        self.cells.get_mut(at)
    }

    pub fn contains(&self, at: &CellRef) -> bool {
        self.cells.contains_key(at)
    }

    /// Return the cell at `at`, allocating an empty one if needed.
    ///
    /// A new cell inherits every formula that was waiting for it.
    pub fn find_or_create(&mut self, at: CellRef) -> &mut Cell {
        let awaiting = &mut self.awaiting;
        self.cells.entry(at).or_insert_with(|| {
            let mut cell = Cell::new_empty();
            if let Some(waiting) = awaiting.remove(&at) {
                cell.dependents = waiting;
            }
            cell
        })
    }

    /// Detach the cell at `at`.
    ///
    /// Its readers keep referencing the coordinate, so they move to the
    /// awaiting list and are re-linked if the coordinate comes back.
    pub fn remove(&mut self, at: &CellRef) -> Option<Cell> {
        let cell = self.cells.remove(at)?;
        if !cell.dependents.is_empty() {
            self.awaiting
                .entry(*at)
                .or_default()
                .extend(cell.dependents.iter().copied());
        }
        Some(cell)
    }

    /// Record that `dependent` reads `source`. Idempotent.
    pub fn link(&mut self, source: CellRef, dependent: CellRef) {
        match self.cells.get_mut(&source) {
            Some(cell) => {
                cell.add_dependent(dependent);
            }
            None => {
                self.awaiting.entry(source).or_default().insert(dependent);
            }
        }
    }

    /// Forget that `dependent` reads `source`, wherever the edge is kept.
    pub fn unlink(&mut self, source: &CellRef, dependent: &CellRef) {
        if let Some(cell) = self.cells.get_mut(source) {
            cell.remove_dependent(dependent);
        }
        if let Some(waiting) = self.awaiting.get_mut(source) {
            waiting.shift_remove(dependent);
            if waiting.is_empty() {
                self.awaiting.remove(source);
            }
        }
    }

    /// Formula cells waiting for `at` to be created.
    pub fn awaiting(&self, at: &CellRef) -> Vec<CellRef> {
        self.awaiting
            .get(at)
            .map(|waiting| waiting.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellRef, &Cell)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.awaiting.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumgrid_engine::engine::CellValue;

    fn a1() -> CellRef {
        CellRef::new(0, 0)
    }

    fn b1() -> CellRef {
        CellRef::new(0, 1)
    }

    #[test]
    fn test_find_or_create_reuses_cell() {
        let mut store = CellStore::new();
        store.find_or_create(a1()).value = CellValue::Number(1.0);
        store.find_or_create(a1());
        assert_eq!(store.len(), 1);
        assert_eq!(store.find(&a1()).unwrap().value, CellValue::Number(1.0));
    }

    #[test]
    fn test_find_does_not_allocate() {
        let store = CellStore::new();
        assert!(store.find(&a1()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_link_is_idempotent() {
        let mut store = CellStore::new();
        store.find_or_create(a1());
        store.link(a1(), b1());
        store.link(a1(), b1());
        assert_eq!(store.find(&a1()).unwrap().dependents.len(), 1);
    }

    #[test]
    fn test_link_to_missing_cell_waits_for_creation() {
        let mut store = CellStore::new();
        store.link(a1(), b1());
        assert!(!store.contains(&a1()));
        assert_eq!(store.awaiting(&a1()), vec![b1()]);

        let cell = store.find_or_create(a1());
        assert!(cell.dependents.contains(&b1()));
        assert!(store.awaiting(&a1()).is_empty());
    }

    #[test]
    fn test_unlink_covers_both_edge_kinds() {
        let mut store = CellStore::new();
        store.find_or_create(a1());
        store.link(a1(), b1());
        store.link(CellRef::new(9, 9), b1());

        store.unlink(&a1(), &b1());
        store.unlink(&CellRef::new(9, 9), &b1());

        assert!(store.find(&a1()).unwrap().dependents.is_empty());
        assert!(store.awaiting(&CellRef::new(9, 9)).is_empty());
    }

    #[test]
    fn test_remove_parks_dependents() {
        let mut store = CellStore::new();
        store.find_or_create(a1());
        store.link(a1(), b1());

        let removed = store.remove(&a1()).unwrap();
        assert!(removed.dependents.contains(&b1()));
        assert!(!store.contains(&a1()));
        assert_eq!(store.awaiting(&a1()), vec![b1()]);
        assert!(store.remove(&a1()).is_none());
    }

    #[test]
    fn test_clear() {
        let mut store = CellStore::new();
        store.find_or_create(a1());
        store.link(CellRef::new(3, 3), a1());
        store.clear();
        assert!(store.is_empty());
        assert!(store.awaiting(&CellRef::new(3, 3)).is_empty());
    }
}
