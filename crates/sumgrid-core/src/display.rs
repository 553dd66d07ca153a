//! Display notifications.
//!
//! The sheet never renders anything itself. Whenever the visible text of a
//! cell changes it calls [`DisplaySink::update`] and forgets about it.

use sumgrid_engine::engine::CellRef;

/// Receiver of "cell now displays this text" notifications.
pub trait DisplaySink {
    fn update(&mut self, at: CellRef, text: &str);
}

/// Discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn update(&mut self, _at: CellRef, _text: &str) {}
}

impl<F> DisplaySink for F
where
    F: FnMut(CellRef, &str),
{
    fn update(&mut self, at: CellRef, text: &str) {
        self(at, text)
    }
}

/// Keeps every notification in arrival order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    updates: Vec<(CellRef, String)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> &[(CellRef, String)] {
        &self.updates
    }

    /// Most recent text shown for `at`.
    pub fn last(&self, at: CellRef) -> Option<&str> {
        self.updates
            .iter()
            .rev()
            .find(|(r, _)| *r == at)
            .map(|(_, text)| text.as_str())
    }

    /// How many times `at` was notified.
    pub fn count(&self, at: CellRef) -> usize {
        self.updates.iter().filter(|(r, _)| *r == at).count()
    }

    pub fn clear(&mut self) {
        self.updates.clear();
    }
}

impl DisplaySink for RecordingSink {
    fn update(&mut self, at: CellRef, text: &str) {
        self.updates.push((at, text.to_string()));
    }
}
