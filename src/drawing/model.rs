use crate::drawing::entry::DrawingEntry;

/// Ordered log of committed drawing entries; later entries paint on top.
///
/// The log only grows at the tail, shrinks at the tail, or empties. Entries are never
/// edited or reordered in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawingModel {
    entries: Vec<DrawingEntry>,
}

impl DrawingModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a log from previously persisted entries, keeping their order.
    pub fn from_entries(entries: Vec<DrawingEntry>) -> Self {
        Self { entries }
    }

    pub fn append(&mut self, entry: DrawingEntry) {
        tracing::debug!(tool = %entry.kind(), index = self.entries.len(), "append drawing");
        self.entries.push(entry);
    }

    /// Remove the most recent entry; returns it, or `None` when the log is empty.
    pub fn undo_last(&mut self) -> Option<DrawingEntry> {
        let popped = self.entries.pop();
        if let Some(entry) = &popped {
            tracing::debug!(tool = %entry.kind(), remaining = self.entries.len(), "undo drawing");
        }
        popped
    }

    pub fn clear(&mut self) {
        tracing::debug!(removed = self.entries.len(), "clear drawings");
        self.entries.clear();
    }

    /// Owned copy of the log; later mutations of the model do not show through it.
    pub fn snapshot(&self) -> Vec<DrawingEntry> {
        self.entries.clone()
    }

    pub fn entries(&self) -> &[DrawingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/drawing/model.rs"]
mod tests;
