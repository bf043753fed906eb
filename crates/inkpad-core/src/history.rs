//! Snapshot-based undo/redo history.

use crate::shapes::Shape;

/// Linear history of full shape-collection snapshots.
///
/// Always holds at least one entry, and `index` always points at the entry
/// matching the live collection after the last completed mutation.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Vec<Shape>>,
    index: usize,
    /// Maximum number of entries to keep (`None` = unbounded).
    limit: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(None)
    }
}

impl History {
    /// Create a history holding a single empty snapshot.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            entries: vec![Vec::new()],
            index: 0,
            limit: limit.map(|l| l.max(1)),
        }
    }

    /// Record a copy of `shapes` as the newest entry, discarding any redo tail.
    pub fn record(&mut self, shapes: &[Shape]) {
        self.entries.truncate(self.index + 1);
        self.entries.push(shapes.to_vec());

        if let Some(limit) = self.limit {
            if self.entries.len() > limit {
                let excess = self.entries.len() - limit;
                self.entries.drain(..excess);
            }
        }

        self.index = self.entries.len() - 1;
        log::debug!("history: recorded entry {} of {}", self.index, self.entries.len());
    }

    /// Step back one entry and return a copy of it, or `None` at the start.
    pub fn undo(&mut self) -> Option<Vec<Shape>> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        log::debug!("history: undo to entry {}", self.index);
        Some(self.entries[self.index].clone())
    }

    /// Step forward one entry and return a copy of it, or `None` at the end.
    pub fn redo(&mut self) -> Option<Vec<Shape>> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        log::debug!("history: redo to entry {}", self.index);
        Some(self.entries[self.index].clone())
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Index of the entry matching the live state.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history has at least its initial entry.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The entry at the current index.
    pub fn current(&self) -> &[Shape] {
        &self.entries[self.index]
    }
}
