//! Linear undo/redo history of full-state snapshots

use std::sync::Arc;

/// Default maximum number of entries kept
pub const DEFAULT_HISTORY_DEPTH: usize = 200;

/// Bounded, linear snapshot history.
///
/// Entries are shared (`Arc`) so restoring a snapshot never copies it. Pushing
/// after an undo discards every entry past the current index.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<Arc<T>>,
    index: usize,
    max_depth: usize,
}

impl<T> History<T> {
    /// Create a history whose only entry is `initial`
    pub fn new(initial: T) -> Self {
        Self::with_depth(initial, DEFAULT_HISTORY_DEPTH)
    }

    /// Create with custom maximum depth (at least one entry is always kept)
    pub fn with_depth(initial: T, max_depth: usize) -> Self {
        Self {
            entries: vec![Arc::new(initial)],
            index: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// Append `entry` after the current index, dropping any redo tail
    pub fn push(&mut self, entry: T) {
        self.entries.truncate(self.index + 1);
        self.entries.push(Arc::new(entry));

        // Trim if exceeds max depth
        if self.entries.len() > self.max_depth {
            self.entries.remove(0);
        }
        self.index = self.entries.len() - 1;
    }

    /// Step back one entry and return it
    pub fn undo(&mut self) -> Option<Arc<T>> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Step forward one entry and return it
    pub fn redo(&mut self) -> Option<Arc<T>> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn current(&self) -> Arc<T> {
        Arc::clone(&self.entries[self.index])
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Overwrite the current entry in place without adding history
    pub fn replace_current(&mut self, entry: T) {
        self.entries[self.index] = Arc::new(entry);
    }

    /// Rewrite every entry with `f`. Entries for which `f` returns `None` are kept as is.
    pub fn map_entries<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> Option<T>,
    {
        for entry in self.entries.iter_mut() {
            if let Some(updated) = f(entry) {
                *entry = Arc::new(updated);
            }
        }
    }

    /// Drop everything and start over from `initial`
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(Arc::new(initial));
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo() {
        let mut history = History::new(0);
        history.push(1);
        history.push(2);

        assert_eq!(*history.undo().unwrap(), 1);
        assert_eq!(*history.undo().unwrap(), 0);
        assert!(history.undo().is_none());
        assert_eq!(*history.redo().unwrap(), 1);
        assert_eq!(*history.redo().unwrap(), 2);
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_push_truncates_redo_tail() {
        let mut history = History::new("a");
        history.push("b");
        history.push("c");
        history.undo();
        history.undo();
        history.push("d");

        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert_eq!(*history.current(), "d");
    }

    #[test]
    fn test_max_depth_evicts_oldest() {
        let mut history = History::with_depth(0, 3);
        for i in 1..=5 {
            history.push(i);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert_eq!(*history.undo().unwrap(), 4);
        assert_eq!(*history.undo().unwrap(), 3);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_replace_and_map() {
        let mut history = History::new(1);
        history.push(2);
        history.replace_current(20);
        assert_eq!(*history.current(), 20);

        history.map_entries(|v| (*v < 10).then(|| v * 100));
        assert_eq!(*history.undo().unwrap(), 100);
        assert_eq!(*history.redo().unwrap(), 20);
    }
}
