use crate::entry::{PatternEntry, Recorded};
use serde::{Deserialize, Serialize};
use sfa_domain::{DomainKey, FieldType};
use std::collections::{BTreeMap, BTreeSet};

/// Every learned value, by field type and then by domain key.
///
/// Serialized as `{"email": {"site.com": {..}, "*": {..}}, ..}`. The site buckets and the
/// `*` bucket of a field type are ranked independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternTable(BTreeMap<FieldType, BTreeMap<DomainKey, PatternEntry>>);

/// Counters shown by the host popup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternStats {
    /// Field types with at least one bucket.
    pub field_types: usize,
    /// Distinct domain keys across all field types, `*` included.
    pub sites: usize,
}

impl PatternTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts `value` into the (`field_type`, `domain`) bucket, creating it if needed.
    pub fn record(&mut self, field_type: FieldType, domain: &DomainKey, value: &str) -> Recorded {
        self.0.entry(field_type).or_default().entry(domain.clone()).or_default().record(value)
    }

    /// Best value for the exact bucket, else the best of the field type's `*` bucket.
    #[must_use]
    pub fn top(&self, field_type: FieldType, domain: &DomainKey) -> Option<&str> {
        let buckets = self.0.get(&field_type)?;
        buckets
            .get(domain)
            .and_then(PatternEntry::top)
            .or_else(|| buckets.get(&DomainKey::wildcard()).and_then(PatternEntry::top))
    }

    #[must_use]
    pub fn entry(&self, field_type: FieldType, domain: &DomainKey) -> Option<&PatternEntry> {
        self.0.get(&field_type)?.get(domain)
    }

    pub fn buckets(
        &self,
        field_type: FieldType,
    ) -> impl Iterator<Item = (&DomainKey, &PatternEntry)> {
        self.0.get(&field_type).into_iter().flatten()
    }

    pub fn field_types(&self) -> impl Iterator<Item = FieldType> + '_ {
        self.0.keys().copied()
    }

    #[must_use]
    pub fn stats(&self) -> PatternStats {
        let sites: BTreeSet<&DomainKey> = self.0.values().flat_map(BTreeMap::keys).collect();
        PatternStats { field_types: self.0.len(), sites: sites.len() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
