use sumgrid_engine::engine::{Cell, CellRef, CellValue};

use crate::config::SheetConfig;
use crate::display::{DisplaySink, NullSink};
use crate::store::CellStore;

/// UI-agnostic spreadsheet model.
///
/// Owns every cell and reports visible changes to a [`DisplaySink`].
/// Dropping the sheet releases all cells.
pub struct Sheet<D: DisplaySink = NullSink> {
    pub(crate) store: CellStore,
    pub(crate) sink: D,
    pub(crate) config: SheetConfig,
}

impl Sheet<NullSink> {
    /// Create an empty sheet that discards display updates.
    pub fn new() -> Self {
        Self::with_sink(NullSink)
    }
}

impl Default for Sheet<NullSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DisplaySink> Sheet<D> {
    pub fn with_sink(sink: D) -> Self {
        Self::with_config(SheetConfig::default(), sink)
    }

    pub fn with_config(config: SheetConfig, sink: D) -> Self {
        Sheet {
            store: CellStore::new(),
            sink,
            config,
        }
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut D {
        &mut self.sink
    }

    pub fn into_sink(self) -> D {
        self.sink
    }

    /// Store a computed value and tell the display about it.
    pub(crate) fn commit(&mut self, at: CellRef, value: CellValue) {
        let precision = self.config.precision;
        let Some(cell) = self.store.find_mut(&at) else {
            return;
        };
        cell.value = value;
        cell.dirty = false;
        let text = display_text(cell, precision);
        self.sink.update(at, &text);
    }
}

/// Text the display shows for a cell.
///
/// Literal input is shown as typed; computed values are rendered.
pub(crate) fn display_text(cell: &Cell, precision: usize) -> String {
    if !cell.is_formula() && matches!(cell.value, CellValue::Number(_) | CellValue::Text(_)) {
        return cell.raw_input.clone();
    }
    cell.value.render(precision)
}
