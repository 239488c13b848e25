//! Bounded snapshot history with undo and revert-to-original

use std::collections::VecDeque;

use retouch_config::DEFAULT_HISTORY_CAPACITY;
use tracing::debug;

use crate::surface::Rgba8;

/// An immutable full copy of the raster buffer at a point in time
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    width: u32,
    height: u32,
    pixels: Box<[Rgba8]>,
}

impl HistorySnapshot {
    pub(crate) fn new(width: u32, height: u32, pixels: Box<[Rgba8]>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }
}

/// Result of [`HistoryStack::undo`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UndoOutcome<'a> {
    /// Stepped back one entry; the snapshot is the new current state
    Stepped(&'a HistorySnapshot),
    /// Undo at the first entry: all edits were discarded and the history
    /// collapsed to the loaded original
    RevertedToOriginal(&'a HistorySnapshot),
}

impl<'a> UndoOutcome<'a> {
    /// The snapshot the live buffer must be restored from
    pub fn snapshot(&self) -> &'a HistorySnapshot {
        match *self {
            UndoOutcome::Stepped(snapshot) | UndoOutcome::RevertedToOriginal(snapshot) => snapshot,
        }
    }
}

/// Bounded linear history of full-buffer snapshots
///
/// `cursor` always designates the snapshot matching the displayed state.
/// Pushing while the cursor is not at the end discards the redo branch;
/// pushing past `capacity` evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    snapshots: VecDeque<HistorySnapshot>,
    cursor: usize,
    capacity: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryStack {
    /// Create an empty history. A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Clear to a single entry (new document)
    pub fn reset(&mut self, initial: HistorySnapshot) {
        self.snapshots.clear();
        self.snapshots.push_back(initial);
        self.cursor = 0;
    }

    /// Append a snapshot after the cursor and make it current
    pub fn push(&mut self, snapshot: HistorySnapshot) {
        if !self.snapshots.is_empty() && self.cursor + 1 < self.snapshots.len() {
            let discarded = self.snapshots.len() - self.cursor - 1;
            self.snapshots.truncate(self.cursor + 1);
            debug!("History: discarded {} redo entries", discarded);
        }

        self.snapshots.push_back(snapshot);
        self.cursor = self.snapshots.len() - 1;

        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
            self.cursor = self.cursor.saturating_sub(1);
            debug!("History: evicted oldest entry (capacity {})", self.capacity);
        }
    }

    /// Replace the current entry, keeping the cursor where it is
    ///
    /// Used to seal a stroke: its entry is pushed when the stroke starts and
    /// overwritten with the finished pixels when it ends.
    /// Returns false if the history is empty.
    pub fn commit(&mut self, snapshot: HistorySnapshot) -> bool {
        match self.snapshots.get_mut(self.cursor) {
            Some(current) => {
                *current = snapshot;
                true
            }
            None => false,
        }
    }

    /// Step back one entry, or revert to the original at the first entry
    ///
    /// Returns None only when the history is empty.
    pub fn undo(&mut self) -> Option<UndoOutcome<'_>> {
        if self.snapshots.is_empty() {
            debug!("Undo: no entries available");
            return None;
        }

        if self.cursor > 0 {
            self.cursor -= 1;
            debug!("Undo: stepped back to entry {}", self.cursor);
            return Some(UndoOutcome::Stepped(&self.snapshots[self.cursor]));
        }

        self.revert_to_original().map(UndoOutcome::RevertedToOriginal)
    }

    /// Collapse the history to its first entry and return it
    pub fn revert_to_original(&mut self) -> Option<&HistorySnapshot> {
        if self.snapshots.is_empty() {
            return None;
        }
        self.snapshots.truncate(1);
        self.cursor = 0;
        debug!("History: reverted to original");
        self.snapshots.front()
    }

    /// Undo is available whenever there is something to revert to
    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    /// The snapshot matching the displayed state
    pub fn current(&self) -> Option<&HistorySnapshot> {
        self.snapshots.get(self.cursor)
    }

    /// The oldest retained snapshot
    pub fn original(&self) -> Option<&HistorySnapshot> {
        self.snapshots.front()
    }

    /// Retained snapshots, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistorySnapshot> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RasterBuffer;

    /// 1x1 snapshot tagged with `value` in the red channel
    fn snap(value: u8) -> HistorySnapshot {
        let mut buffer = RasterBuffer::new(1, 1);
        buffer.set_pixel(0, 0, [value, 0, 0, 255]);
        buffer.snapshot()
    }

    fn tag(snapshot: &HistorySnapshot) -> u8 {
        snapshot.pixels()[0][0]
    }

    fn tags(history: &HistoryStack) -> Vec<u8> {
        history.snapshots.iter().map(tag).collect()
    }

    #[test]
    fn test_empty_history() {
        let mut history = HistoryStack::new(20);
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert!(history.current().is_none());
        assert!(!history.commit(snap(1)));
    }

    #[test]
    fn test_reset_single_entry() {
        let mut history = HistoryStack::new(20);
        history.push(snap(1));
        history.push(snap(2));
        history.reset(snap(9));

        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(tag(history.current().unwrap()), 9);
        assert!(history.can_undo());
    }

    #[test]
    fn test_push_advances_cursor() {
        let mut history = HistoryStack::new(20);
        history.reset(snap(0));
        history.push(snap(1));
        history.push(snap(2));

        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(tag(history.current().unwrap()), 2);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let capacity = 20;
        let mut history = HistoryStack::new(capacity);
        for i in 0..(capacity + 5) {
            history.push(snap(i as u8));
        }

        assert_eq!(history.len(), capacity);
        assert_eq!(history.cursor(), capacity - 1);
        // Oldest 5 evicted
        assert_eq!(tag(history.original().unwrap()), 5);
        assert_eq!(tag(history.current().unwrap()), (capacity + 4) as u8);
    }

    #[test]
    fn test_undo_truncates_redo_branch() {
        let mut history = HistoryStack::new(20);
        history.push(snap(b'A'));
        history.push(snap(b'B'));

        let outcome = history.undo().unwrap();
        assert!(matches!(outcome, UndoOutcome::Stepped(_)));
        assert_eq!(tag(outcome.snapshot()), b'A');

        history.push(snap(b'C'));
        assert_eq!(tags(&history), vec![b'A', b'C']);
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_undo_at_start_reverts_to_original() {
        let mut history = HistoryStack::new(20);
        history.reset(snap(7));
        history.push(snap(8));
        history.push(snap(9));

        // Walk back to the start
        history.undo();
        history.undo();
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.len(), 3);

        let outcome = history.undo().unwrap();
        assert!(matches!(outcome, UndoOutcome::RevertedToOriginal(_)));
        assert_eq!(tag(outcome.snapshot()), 7);
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_undo_with_only_original_keeps_it() {
        let mut history = HistoryStack::new(20);
        history.reset(snap(3));

        let outcome = history.undo().unwrap();
        assert_eq!(tag(outcome.snapshot()), 3);
        assert_eq!(tags(&history), vec![3]);
    }

    #[test]
    fn test_commit_replaces_current() {
        let mut history = HistoryStack::new(20);
        history.reset(snap(0));
        history.push(snap(0));
        assert!(history.commit(snap(5)));

        assert_eq!(tags(&history), vec![0, 5]);
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut history = HistoryStack::new(0);
        history.push(snap(1));
        history.push(snap(2));
        assert_eq!(history.capacity(), 1);
        assert_eq!(tags(&history), vec![2]);
    }
}
