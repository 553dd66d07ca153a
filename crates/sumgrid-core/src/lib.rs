//! sumgrid-core - UI-agnostic sheet model.

pub mod config;
pub mod display;
pub mod error;
pub mod sheet;
pub mod shared;
pub mod store;

pub use config::SheetConfig;
pub use display::{DisplaySink, NullSink, RecordingSink};
pub use error::{Result, SheetError};
pub use sheet::Sheet;
pub use shared::SharedSheet;
pub use store::CellStore;

pub use sumgrid_engine::engine::{CellKind, CellRef, CellValue, FormulaError};
