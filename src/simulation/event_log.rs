//! Rolling log of notable tank events, kept for the on-screen log panel.
//!
//! This is a display aid only. Simulation state never reads from it.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Entries kept by [`EventLog::default`].
pub const DEFAULT_CAPACITY: usize = 20;

/// One line of the tank log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Simulation clock at the time of the event.
    pub time: f32,
    /// Text shown to the player.
    pub description: String,
    /// What happened; the log panel colors entries by kind.
    pub kind: EventKind,
}

/// Kinds of logged events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A fish ate.
    Feeding,
    /// A fish spawned an offspring.
    Reproduction,
    /// A fish was eaten.
    Predation,
    /// A level started or was cleared.
    Level,
    /// The run was lost.
    Defeat,
}

/// Bounded log; the oldest entry is dropped once the log is full.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<LoggedEvent>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventLog {
    /// Creates an empty log holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entry.
    pub fn log(&mut self, time: f32, description: String, kind: EventKind) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LoggedEvent {
            time,
            description,
            kind,
        });
    }

    /// Entries in the order they were logged, oldest first.
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.entries
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&LoggedEvent> {
        self.entries.back()
    }

    /// Number of retained entries of `kind`.
    pub fn count_of(&self, kind: EventKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
