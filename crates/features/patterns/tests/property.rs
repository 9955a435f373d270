use proptest::prelude::*;
use sfa_domain::{DomainKey, FieldType};
use sfa_patterns::{MAX_VALUES_PER_ENTRY, PatternEntry, PatternTable};
use std::cmp::Reverse;
use std::collections::HashMap;

fn domain() -> impl Strategy<Value = DomainKey> {
    prop_oneof![
        Just(DomainKey::wildcard()),
        "[a-c]\\.example".prop_map(|host| DomainKey::site(&host).unwrap()),
    ]
}

fn field_type() -> impl Strategy<Value = FieldType> {
    prop::sample::select(FieldType::ALL.to_vec())
}

/// Small vocabulary so values repeat and compete for rank.
fn value() -> impl Strategy<Value = String> {
    (0u8..16).prop_map(|n| format!("value-{n:02}"))
}

/// Reference ranking: append new values, stable-sort by count, drop the tail past the limit.
#[derive(Default)]
struct Ranking {
    values: Vec<String>,
    counts: HashMap<String, u32>,
}

impl Ranking {
    fn record(&mut self, value: &str) {
        let count = self.counts.entry(value.to_owned()).or_insert(0);
        if *count == 0 {
            self.values.push(value.to_owned());
        }
        *count += 1;

        let counts = &self.counts;
        self.values.sort_by_key(|v| Reverse(counts[v]));
        if self.values.len() > MAX_VALUES_PER_ENTRY {
            let dropped = self.values.pop().unwrap();
            self.counts.remove(&dropped);
        }
    }
}

proptest! {
    #[test]
    fn entries_stay_bounded_and_ranked(
        ops in prop::collection::vec((field_type(), domain(), value()), 1..200)
    ) {
        let mut table = PatternTable::new();
        for (field_type, domain, value) in &ops {
            table.record(*field_type, domain, value);
        }

        for field_type in table.field_types() {
            for (_, entry) in table.buckets(field_type) {
                prop_assert!(entry.len() <= MAX_VALUES_PER_ENTRY);
                let counts: Vec<u32> = entry.ranked().map(|(_, c)| c).collect();
                prop_assert!(counts.windows(2).all(|w| w[0] >= w[1]), "{counts:?}");
                prop_assert!(counts.iter().all(|c| *c >= 1));
            }
        }
    }

    #[test]
    fn ranking_keeps_ties_in_their_current_order(
        values in prop::collection::vec(value(), 1..150)
    ) {
        let mut entry = PatternEntry::default();
        let mut expected = Ranking::default();
        for v in &values {
            entry.record(v);
            expected.record(v);
            prop_assert_eq!(entry.values(), expected.values.as_slice());
            for kept in &expected.values {
                prop_assert_eq!(entry.count_of(kept), expected.counts[kept]);
            }
        }
    }

    #[test]
    fn suggestion_is_the_highest_count(
        values in prop::collection::vec(value(), 1..60),
        host in "[a-c]\\.example",
    ) {
        let site = DomainKey::site(&host).unwrap();
        let mut table = PatternTable::new();
        for v in &values {
            table.record(FieldType::Email, &site, v);
        }

        let entry = table.entry(FieldType::Email, &site).unwrap();
        let top = table.top(FieldType::Email, &site).unwrap();
        let best = entry.ranked().map(|(_, c)| c).max().unwrap();
        prop_assert_eq!(entry.count_of(top), best);
    }

    #[test]
    fn site_data_never_leaks_into_wildcard(
        values in prop::collection::vec(value(), 1..30),
    ) {
        let site = DomainKey::site("a.example").unwrap();
        let mut table = PatternTable::new();
        for v in &values {
            table.record(FieldType::City, &site, v);
        }

        prop_assert!(table.entry(FieldType::City, &DomainKey::wildcard()).is_none());
        prop_assert_eq!(table.top(FieldType::City, &DomainKey::site("b.example").unwrap()), None);
    }
}
