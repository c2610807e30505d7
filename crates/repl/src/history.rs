//! Recall history for previously executed lines.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Number of lines kept when no limit is configured.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Bounded list of executed lines with an Up/Down recall cursor.
///
/// The cursor is `None` between recalls. Recording is switched off while any
/// [`HistorySuspension`] is alive, which lets a script replay many lines as
/// one compound operation.
#[derive(Debug)]
pub struct CommandHistory {
    entries: VecDeque<String>,
    capacity: usize,
    cursor: Option<usize>,
    suspension_depth: Arc<AtomicUsize>,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl CommandHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_LIMIT)),
            capacity,
            cursor: None,
            suspension_depth: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Records `line` as the newest entry, evicting the oldest beyond
    /// capacity, and resets the recall cursor. Ignored while suspended.
    pub fn add_command(&mut self, line: &str) {
        if self.is_suspended() {
            return;
        }

        self.entries.push_back(line.to_string());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = None;
    }

    /// Moves the cursor one entry back in time.
    ///
    /// The first call after a reset returns the newest entry. Once the oldest
    /// entry is reached, further calls keep returning it. Returns `""` when
    /// nothing has been recorded.
    pub fn previous_command(&mut self) -> &str {
        if self.entries.is_empty() {
            return "";
        }

        let index = match self.cursor {
            None => self.entries.len() - 1,
            Some(index) => index.saturating_sub(1),
        };
        self.cursor = Some(index);
        &self.entries[index]
    }

    /// Moves the cursor one entry forward in time.
    ///
    /// Moving past the newest entry (or calling without a prior recall)
    /// returns `""` and resets the cursor so the next
    /// [`previous_command`](Self::previous_command) restarts from the newest.
    pub fn next_command(&mut self) -> &str {
        match self.cursor {
            Some(index) if index + 1 < self.entries.len() => {
                self.cursor = Some(index + 1);
                &self.entries[index + 1]
            }
            _ => {
                self.cursor = None;
                ""
            }
        }
    }

    /// Stops recording until the returned guard is dropped.
    ///
    /// Guards nest: recording resumes when the last one is released.
    pub fn suspend(&self) -> HistorySuspension {
        self.suspension_depth.fetch_add(1, Ordering::SeqCst);
        HistorySuspension {
            depth: Arc::clone(&self.suspension_depth),
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspension_depth() > 0
    }

    pub fn suspension_depth(&self) -> usize {
        self.suspension_depth.load(Ordering::SeqCst)
    }

    /// Entries from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Keeps history recording suspended while alive.
#[must_use = "history recording resumes as soon as the suspension is dropped"]
#[derive(Debug)]
pub struct HistorySuspension {
    depth: Arc<AtomicUsize>,
}

impl Drop for HistorySuspension {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::SeqCst);
    }
}
