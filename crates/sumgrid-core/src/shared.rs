//! A sheet that can be handed to several owners.
//!
//! Evaluation walks the dependency graph while mutating it, so every
//! operation, reads included, goes through one lock.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::display::{DisplaySink, NullSink};
use crate::sheet::Sheet;

pub struct SharedSheet<D: DisplaySink = NullSink> {
    inner: Arc<Mutex<Sheet<D>>>,
}

impl<D: DisplaySink> SharedSheet<D> {
    pub fn new(sheet: Sheet<D>) -> Self {
        SharedSheet {
            inner: Arc::new(Mutex::new(sheet)),
        }
    }

    pub fn set_cell_value(&self, row: usize, col: usize, text: &str) {
        self.inner.lock().set_cell_value(row, col, text);
    }

    pub fn get_textual_value(&self, row: usize, col: usize) -> Option<String> {
        self.inner.lock().get_textual_value(row, col)
    }

    pub fn clear_cell(&self, row: usize, col: usize) {
        self.inner.lock().clear_cell(row, col);
    }

    pub fn destroy(&self) {
        self.inner.lock().destroy();
    }

    /// Run `f` with exclusive access to the sheet.
    pub fn with<R>(&self, f: impl FnOnce(&mut Sheet<D>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<D: DisplaySink> Clone for SharedSheet<D> {
    fn clone(&self) -> Self {
        SharedSheet {
            inner: Arc::clone(&self.inner),
        }
    }
}
