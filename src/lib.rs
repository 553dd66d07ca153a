//! sumgrid - sparse spreadsheet model with additive formulas.
//!
//! ```
//! use sumgrid::{RecordingSink, Sheet};
//!
//! let mut sheet = Sheet::with_sink(RecordingSink::new());
//! sheet.set_cell_value(0, 0, "5");
//! sheet.set_cell_value(0, 1, "7");
//! sheet.set_cell_value(1, 0, "=A1+B1");
//! assert_eq!(sheet.display_text(1, 0).as_deref(), Some("12.0"));
//! ```

pub use sumgrid_core::{
    CellKind, CellRef, CellStore, CellValue, DisplaySink, FormulaError, NullSink, RecordingSink,
    Result, SharedSheet, Sheet, SheetConfig, SheetError,
};
pub use sumgrid_engine::engine::{Cell, CellInput, Formula, Operand, VisitState};
