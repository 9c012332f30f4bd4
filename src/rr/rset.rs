use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    ops::{Deref, DerefMut},
};

use serde::Serialize;

use super::record::RecordConfig;

/// Identity used to match desired and current records when diffing.
///
/// Two records with the same key are the same record for diffing purposes;
/// differences in target, TTL or metadata are updates. Keys order by type,
/// then name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub record_type: String,
    pub name: String,
}

impl RecordKey {
    pub fn new(record_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.record_type)
    }
}

/// An ordered list of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Records(Vec<RecordConfig>);

impl Records {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition the records by [`RecordKey`].
    ///
    /// Records within a group keep their relative order. The order of the
    /// groups themselves is unspecified; use [`Records::grouped_ordered`] for
    /// anything shown to a person.
    pub fn grouped(&self) -> HashMap<RecordKey, Vec<&RecordConfig>> {
        let mut groups: HashMap<RecordKey, Vec<&RecordConfig>> = HashMap::new();
        for record in &self.0 {
            groups.entry(record.key()).or_default().push(record);
        }
        groups
    }

    /// Like [`Records::grouped`], with groups sorted by type, then name.
    pub fn grouped_ordered(&self) -> BTreeMap<RecordKey, Vec<&RecordConfig>> {
        let mut groups: BTreeMap<RecordKey, Vec<&RecordConfig>> = BTreeMap::new();
        for record in &self.0 {
            groups.entry(record.key()).or_default().push(record);
        }
        groups
    }

    /// Owned version of [`Records::grouped`].
    pub fn into_grouped(self) -> HashMap<RecordKey, Records> {
        let mut groups: HashMap<RecordKey, Records> = HashMap::new();
        for record in self.0 {
            groups.entry(record.key()).or_default().0.push(record);
        }
        groups
    }

    pub fn into_inner(self) -> Vec<RecordConfig> {
        self.0
    }
}

impl Deref for Records {
    type Target = Vec<RecordConfig>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Records {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<RecordConfig>> for Records {
    fn from(value: Vec<RecordConfig>) -> Self {
        Records(value)
    }
}

impl FromIterator<RecordConfig> for Records {
    fn from_iter<T: IntoIterator<Item = RecordConfig>>(iter: T) -> Self {
        Records(iter.into_iter().collect())
    }
}

impl IntoIterator for Records {
    type Item = RecordConfig;
    type IntoIter = std::vec::IntoIter<RecordConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'r> IntoIterator for &'r Records {
    type Item = &'r RecordConfig;
    type IntoIter = std::slice::Iter<'r, RecordConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rr::RecordName;

    fn record(rtype: &str, short: &str, target: &str) -> RecordConfig {
        RecordConfig::new(rtype, RecordName::new(short, "example.com").unwrap(), target)
    }

    fn sample() -> Records {
        Records::from(vec![
            record("A", "www", "192.0.2.1"),
            record("MX", "@", "mx1.example.com."),
            record("A", "www", "192.0.2.2"),
            record("A", "@", "192.0.2.10"),
            record("MX", "@", "mx2.example.com."),
            record("A", "www", "192.0.2.3"),
        ])
    }

    #[test]
    fn test_grouped_counts() {
        let records = sample();
        let groups = records.grouped();

        assert_eq!(groups.len(), 3);
        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn test_grouped_preserves_order() {
        let records = sample();
        let groups = records.grouped();

        let www: Vec<&str> = groups[&RecordKey::new("A", "www")]
            .iter()
            .map(|r| r.target())
            .collect();
        assert_eq!(www, ["192.0.2.1", "192.0.2.2", "192.0.2.3"]);

        let mx: Vec<&str> = groups[&RecordKey::new("MX", "@")]
            .iter()
            .map(|r| r.target())
            .collect();
        assert_eq!(mx, ["mx1.example.com.", "mx2.example.com."]);
    }

    #[test]
    fn test_grouped_ordered_sorts_keys() {
        let records = sample();
        let keys: Vec<RecordKey> = records.grouped_ordered().into_keys().collect();
        assert_eq!(
            keys,
            [
                RecordKey::new("A", "@"),
                RecordKey::new("A", "www"),
                RecordKey::new("MX", "@"),
            ]
        );
    }

    #[test]
    fn test_into_grouped() {
        let groups = sample().into_grouped();
        assert_eq!(groups[&RecordKey::new("A", "www")].len(), 3);
        assert_eq!(groups[&RecordKey::new("A", "@")].len(), 1);
    }

    #[test]
    fn test_empty() {
        assert!(Records::new().grouped().is_empty());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(RecordKey::new("MX", "@").to_string(), "@ MX");
    }
}
