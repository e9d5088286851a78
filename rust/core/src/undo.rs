// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded undo history for structural table edits.

use std::collections::VecDeque;

/// Default number of snapshots kept
pub const DEFAULT_UNDO_DEPTH: usize = 20;

/// Last-in first-out snapshot stack that drops its oldest entry when full
#[derive(Debug, Clone)]
pub struct UndoStack<T> {
    entries: VecDeque<T>,
    max_len: usize,
}

impl<T> Default for UndoStack<T> {
    fn default() -> Self {
        Self::with_depth(DEFAULT_UNDO_DEPTH)
    }
}

impl<T> UndoStack<T> {
    /// Create a stack holding at most `max_len` snapshots
    pub fn with_depth(max_len: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_len.min(64)),
            max_len,
        }
    }

    /// Record a snapshot
    pub fn push(&mut self, snapshot: T) {
        if self.max_len == 0 {
            return;
        }
        self.entries.push_back(snapshot);
        while self.entries.len() > self.max_len {
            self.entries.pop_front();
        }
    }

    /// Take the most recent snapshot
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
