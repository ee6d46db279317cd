use std::collections::VecDeque;
use std::fmt;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// number of entries kept by default
pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct HistoryEntry {
    #[tabled(rename = "equation")]
    pub equation: String,
    #[tabled(rename = "result")]
    pub result: String,
}

/// Bounded recent-history list, newest first. Entries are only prepended and evicted.
#[derive(Debug, Clone)]
pub struct HistoryRecorder {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryRecorder {
    fn default() -> Self {
        HistoryRecorder::with_capacity(DEFAULT_CAPACITY)
    }
}

impl HistoryRecorder {
    pub fn new() -> HistoryRecorder {
        HistoryRecorder::default()
    }

    /// a capacity of 0 is raised to 1
    pub fn with_capacity(capacity: usize) -> HistoryRecorder {
        let capacity = capacity.max(1);
        HistoryRecorder {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// prepends an entry, dropping the oldest one past the bound
    pub fn record(&mut self, equation: &str, result: &str) {
        self.entries.push_front(HistoryEntry {
            equation: equation.to_string(),
            result: result.to_string(),
        });
        self.entries.truncate(self.capacity);
    }

    /// newest first
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
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

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Display for HistoryRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new(self.entries.iter());
        table.with(Style::modern_rounded());
        write!(f, "{}", table)
    }
}
