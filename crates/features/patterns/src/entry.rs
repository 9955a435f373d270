use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Most values kept per (field type, domain).
pub const MAX_VALUES_PER_ENTRY: usize = 10;
/// Shorter values are never learned. Counted in characters, not bytes.
pub const MIN_VALUE_CHARS: usize = 2;

/// Ranked values seen for one (field type, domain) pair.
///
/// `values` is ordered by descending `count`. Re-ranking is a stable sort, so equal counts keep
/// their relative order and a new value starts behind every value it ties with.
/// Persisted as `{"values": [..], "count": {"value": n}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternEntry {
    values: Vec<String>,
    count: BTreeMap<String, u32>,
}

/// Result of counting one value into an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// The value is kept at `rank` (0 is the suggestion) with `count` observations.
    Ranked { count: u32, rank: usize },
    /// The value ranked last in a full entry and was dropped with its counter.
    Evicted,
}

impl PatternEntry {
    /// Counts one observation of `value`, re-ranks, and drops the last value past the limit.
    pub fn record(&mut self, value: &str) -> Recorded {
        let count = self.count.entry(value.to_owned()).or_insert(0);
        if *count == 0 {
            self.values.push(value.to_owned());
        }
        *count = count.saturating_add(1);

        let counts = &self.count;
        self.values.sort_by_key(|v| std::cmp::Reverse(counts.get(v).copied().unwrap_or(0)));

        if self.values.len() > MAX_VALUES_PER_ENTRY
            && let Some(dropped) = self.values.pop()
        {
            self.count.remove(&dropped);
            if dropped == value {
                return Recorded::Evicted;
            }
        }

        self.values
            .iter()
            .position(|v| v == value)
            .map_or(Recorded::Evicted, |rank| Recorded::Ranked {
                count: self.count_of(value),
                rank,
            })
    }

    /// The suggestion for this entry.
    #[must_use]
    pub fn top(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    #[must_use]
    pub fn count_of(&self, value: &str) -> u32 {
        self.count.get(value).copied().unwrap_or(0)
    }

    /// Values with their counts, best first.
    pub fn ranked(&self) -> impl Iterator<Item = (&str, u32)> {
        self.values.iter().map(|v| (v.as_str(), self.count_of(v)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
