//! Snapshot-based undo/redo stack.
//!
//! Each entry is a full copy of the element list, captured immediately
//! before a mutating action is applied. The entry under the cursor
//! therefore trails the live scene until the first undo or redo brings
//! the two back in step. Recording while the cursor sits behind the tip
//! discards the entries ahead of it.

use crate::element::Element;

/// One recorded scene state.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub elements: Vec<Element>,
}

/// Linear undo/redo stack over [`HistoryEntry`] snapshots.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    /// Index of the current entry, `None` until the first record.
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a snapshot, dropping any entries ahead of the cursor.
    pub fn record(&mut self, elements: Vec<Element>) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(HistoryEntry { elements });
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step the cursor back one entry and return the snapshot to restore.
    ///
    /// Returns `None` when the cursor is already at the oldest entry, so
    /// the state that preceded the first record is never reachable.
    pub fn undo(&mut self) -> Option<&[Element]> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        Some(&self.entries[cursor - 1].elements)
    }

    /// Step the cursor forward one entry and return the snapshot to restore.
    pub fn redo(&mut self) -> Option<&[Element]> {
        let next = match self.cursor {
            Some(c) => c + 1,
            None => 0,
        };
        let entry = self.entries.get(next)?;
        self.cursor = Some(next);
        Some(&entry.elements)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        match self.cursor {
            Some(c) => c + 1 < self.entries.len(),
            None => !self.entries.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use crate::style::Style;

    /// Snapshot with `n` elements, so entries can be told apart by length.
    fn snapshot(n: usize) -> Vec<Element> {
        (0..n)
            .map(|i| {
                let x = i as f64 * 10.0;
                Element::new(ElementKind::Rectangle, x, 0.0, x + 5.0, 5.0, Style::default())
            })
            .collect()
    }

    #[test]
    fn test_starts_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_advances_cursor() {
        let mut history = History::new();
        history.record(snapshot(0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));
        history.record(snapshot(1));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn test_single_record_cannot_be_undone() {
        let mut history = History::new();
        history.record(snapshot(0));
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_undo_returns_entry_below_cursor() {
        let mut history = History::new();
        history.record(snapshot(0));
        history.record(snapshot(1));
        // The most recent snapshot is never what undo restores.
        let restored = history.undo().unwrap();
        assert_eq!(restored.len(), 0);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_undo_walks_back_then_stops() {
        let mut history = History::new();
        history.record(snapshot(0));
        history.record(snapshot(1));
        history.record(snapshot(2));

        assert_eq!(history.undo().unwrap().len(), 1);
        assert_eq!(history.undo().unwrap().len(), 0);
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_redo_walks_forward_then_stops() {
        let mut history = History::new();
        history.record(snapshot(0));
        history.record(snapshot(1));
        history.record(snapshot(2));
        history.undo();
        history.undo();

        assert_eq!(history.redo().unwrap().len(), 1);
        assert_eq!(history.redo().unwrap().len(), 2);
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), Some(2));
    }

    #[test]
    fn test_redo_at_tip_is_noop() {
        let mut history = History::new();
        history.record(snapshot(0));
        history.record(snapshot(1));
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn test_record_truncates_redo_branch() {
        let mut history = History::new();
        history.record(snapshot(0));
        history.record(snapshot(1));
        history.record(snapshot(2));
        history.undo();
        history.undo();
        assert_eq!(history.cursor(), Some(0));

        history.record(snapshot(5));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
        assert!(history.redo().is_none());
        assert_eq!(history.undo().unwrap().len(), 0);
    }

    #[test]
    fn test_enablement_tracks_cursor() {
        let mut history = History::new();
        history.record(snapshot(0));
        history.record(snapshot(1));
        assert!(history.can_undo());
        assert!(!history.can_redo());

        history.undo();
        assert!(!history.can_undo());
        assert!(history.can_redo());

        history.redo();
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }
}
