use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::aggregator::{MonthBucket, MonthKey};

/// Which month cards of the history are open. Every change produces a new snapshot, a snapshot
/// handed to rendering never changes underneath it. Months missing from the map are collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryViewState {
    #[serde(default)]
    expanded: BTreeMap<MonthKey, bool>,
}

impl HistoryViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `month`, leaving every other month as it was.
    pub fn toggle_month(&self, month: MonthKey) -> Self {
        let mut expanded = self.expanded.clone();
        let value = expanded.entry(month).or_insert(false);
        *value = !*value;
        Self { expanded }
    }

    pub fn is_expanded(&self, month: MonthKey) -> bool {
        self.expanded.get(&month).copied().unwrap_or(false)
    }

    /// Snapshot with each of `buckets` open. Other stored months keep their value.
    pub fn with_all_expanded<'a>(&self, buckets: impl IntoIterator<Item = &'a MonthBucket>) -> Self {
        let mut expanded = self.expanded.clone();
        for bucket in buckets {
            expanded.insert(bucket.key, true);
        }
        Self { expanded }
    }
}

/// Count line shown under a month name.
pub fn summary_for(bucket: &MonthBucket) -> String {
    let count = bucket.len();
    format!(
        "You improved {count} day{}",
        if count == 1 { "" } else { "s" }
    )
}
