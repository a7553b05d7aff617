//! B-tree statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics tracked by a [`BTree`](crate::BTree).
///
/// Counters are atomic so that read-only operations (`search`) can bump
/// them through a shared reference.
///
/// # Memory Ordering
/// All operations use `Ordering::Relaxed`: counters are independent and
/// only need atomicity, not ordering against each other.
///
/// # Example
/// ```
/// use interchange_index::TreeStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = TreeStats::new();
/// stats.inserts.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.inserts.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug)]
pub struct TreeStats {
    /// Number of values inserted.
    pub inserts: AtomicU64,

    /// Number of searches run (any operator).
    pub searches: AtomicU64,

    /// Number of node splits, root splits included.
    pub splits: AtomicU64,

    /// Number of times the tree grew in height.
    pub root_growths: AtomicU64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            inserts: AtomicU64::new(0),
            searches: AtomicU64::new(0),
            splits: AtomicU64::new(0),
            root_growths: AtomicU64::new(0),
        }
    }

    /// Average number of splits per insert (0.0 when nothing was inserted).
    pub fn splits_per_insert(&self) -> f64 {
        self.snapshot().splits_per_insert()
    }

    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> TreeStatsSnapshot {
        TreeStatsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            searches: self.searches.load(Ordering::Relaxed),
            splits: self.splits.load(Ordering::Relaxed),
            root_growths: self.root_growths.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.inserts.store(0, Ordering::Relaxed);
        self.searches.store(0, Ordering::Relaxed);
        self.splits.store(0, Ordering::Relaxed);
        self.root_growths.store(0, Ordering::Relaxed);
    }

    pub(crate) fn record_insert(&self, splits: u64, grew: bool) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
        if splits > 0 {
            self.splits.fetch_add(splits, Ordering::Relaxed);
        }
        if grew {
            self.root_growths.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_search(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for TreeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of [`TreeStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeStatsSnapshot {
    pub inserts: u64,
    pub searches: u64,
    pub splits: u64,
    pub root_growths: u64,
}

impl TreeStatsSnapshot {
    /// Average number of splits per insert (0.0 when nothing was inserted).
    pub fn splits_per_insert(&self) -> f64 {
        if self.inserts == 0 {
            0.0
        } else {
            self.splits as f64 / self.inserts as f64
        }
    }
}

impl fmt::Display for TreeStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, searches: {}, splits: {}, root_growths: {} }}",
            self.inserts, self.searches, self.splits, self.root_growths
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = TreeStats::new();
        assert_eq!(stats.snapshot(), TreeStatsSnapshot::default());
        assert_eq!(stats.splits_per_insert(), 0.0);
    }

    #[test]
    fn test_stats_record() {
        let stats = TreeStats::new();
        stats.record_insert(0, false);
        stats.record_insert(2, true);
        stats.record_insert(0, false);
        stats.record_insert(0, false);
        stats.record_search();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.inserts, 4);
        assert_eq!(snapshot.splits, 2);
        assert_eq!(snapshot.root_growths, 1);
        assert_eq!(snapshot.searches, 1);
        assert_eq!(snapshot.splits_per_insert(), 0.5);
    }

    #[test]
    fn test_stats_reset() {
        let stats = TreeStats::new();
        stats.record_insert(1, true);

        stats.reset();

        assert_eq!(stats.inserts.load(Ordering::Relaxed), 0);
        assert_eq!(stats.root_growths.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_stats_display() {
        let stats = TreeStats::new();
        stats.record_insert(3, true);
        stats.record_search();

        let display = format!("{}", stats.snapshot());

        assert!(display.contains("inserts: 1"));
        assert!(display.contains("splits: 3"));
        assert!(display.contains("root_growths: 1"));
    }
}
