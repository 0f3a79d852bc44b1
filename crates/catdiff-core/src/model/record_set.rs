//! Snapshot of a catalog keyed by record id

use crate::errors::{CatalogError, Result};
use crate::model::record::{Fields, Record, RecordId};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

/// What to do when a snapshot contains the same id twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Fail with `CatalogError::DuplicateIdentifier`
    #[default]
    #[serde(rename = "reject")]
    Reject,
    /// Keep the later row's fields at the position of the first occurrence
    #[serde(rename = "last-wins", alias = "last-write-wins")]
    LastWriteWins,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "reject" => Ok(DuplicatePolicy::Reject),
            "last-wins" | "last-write-wins" => Ok(DuplicatePolicy::LastWriteWins),
            other => Err(format!(
                "unknown duplicate policy '{}', expected 'reject' or 'last-wins'",
                other
            )),
        }
    }
}

/// A complete catalog snapshot
///
/// Iterates in insertion order, which the diff uses as its emission order.
/// Lookup by id is a hash probe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: IndexMap<RecordId, Fields>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from records in order, applying `policy` to repeated ids
    ///
    /// # Errors
    ///
    /// `DuplicateIdentifier` if an id repeats and `policy` is `Reject`.
    pub fn from_records<I>(records: I, policy: DuplicatePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut set = Self::new();
        for record in records {
            set.insert(record, policy)?;
        }
        Ok(set)
    }

    /// Append a record while the set is being built
    ///
    /// # Errors
    ///
    /// `DuplicateIdentifier` if the id is already present and `policy` is `Reject`.
    pub fn insert(&mut self, record: Record, policy: DuplicatePolicy) -> Result<()> {
        let (id, fields) = record.into_parts();
        match self.records.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(fields);
            }
            Entry::Occupied(mut slot) => match policy {
                DuplicatePolicy::Reject => {
                    return Err(CatalogError::DuplicateIdentifier {
                        id: slot.key().to_string(),
                    });
                }
                DuplicatePolicy::LastWriteWins => {
                    tracing::debug!(record_id = %slot.key(), "duplicate id replaced by later row");
                    slot.insert(fields);
                }
            },
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Field mapping for `id`, if present
    pub fn get(&self, id: &str) -> Option<&Fields> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Records in insertion order
    pub fn iter(&self) -> indexmap::map::Iter<'_, RecordId, Fields> {
        self.records.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.records.keys()
    }

    /// SHA-256 over a canonical JSON encoding of the set, hex encoded
    ///
    /// Covers ids, field names and values in iteration order, so two sets
    /// share a digest only when they are identical including order.
    pub fn digest(&self) -> String {
        let canonical: Vec<(&str, Vec<(&str, &str)>)> = self
            .records
            .iter()
            .map(|(id, fields)| {
                (
                    id.as_str(),
                    fields
                        .iter()
                        .map(|(k, v)| (k.as_str(), v.as_str()))
                        .collect(),
                )
            })
            .collect();
        let encoded = serde_json::to_string(&canonical).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(encoded.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = (&'a RecordId, &'a Fields);
    type IntoIter = indexmap::map::Iter<'a, RecordId, Fields>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> Record {
        let fields: Fields = [("id", id), ("name", name)]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Record::new(id, fields)
    }

    #[test]
    fn test_iteration_preserves_input_order() {
        let set = RecordSet::from_records(
            vec![record("3", "C"), record("1", "A"), record("2", "B")],
            DuplicatePolicy::Reject,
        )
        .unwrap();
        let ids: Vec<&str> = set.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_reject_duplicate() {
        let err = RecordSet::from_records(
            vec![record("1", "A"), record("1", "B")],
            DuplicatePolicy::Reject,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateIdentifier {
                id: "1".to_string()
            }
        );
    }

    #[test]
    fn test_last_write_wins_keeps_first_position() {
        let set = RecordSet::from_records(
            vec![record("1", "A"), record("2", "B"), record("1", "A2")],
            DuplicatePolicy::LastWriteWins,
        )
        .unwrap();
        let ids: Vec<&str> = set.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(set.get("1").unwrap()["name"], "A2");
    }

    #[test]
    fn test_digest_is_order_sensitive() {
        let ab = RecordSet::from_records(
            vec![record("1", "A"), record("2", "B")],
            DuplicatePolicy::Reject,
        )
        .unwrap();
        let ba = RecordSet::from_records(
            vec![record("2", "B"), record("1", "A")],
            DuplicatePolicy::Reject,
        )
        .unwrap();
        assert_eq!(ab.digest(), ab.clone().digest());
        assert_ne!(ab.digest(), ba.digest());
        assert_eq!(ab.digest().len(), 64);
    }

    #[test]
    fn test_duplicate_policy_serde_names() {
        let reject: DuplicatePolicy = serde_json::from_str("\"reject\"").unwrap();
        let last: DuplicatePolicy = serde_json::from_str("\"last-wins\"").unwrap();
        assert_eq!(reject, DuplicatePolicy::Reject);
        assert_eq!(last, DuplicatePolicy::LastWriteWins);
    }

    #[test]
    fn test_duplicate_policy_from_str() {
        assert_eq!(
            "reject".parse::<DuplicatePolicy>(),
            Ok(DuplicatePolicy::Reject)
        );
        assert_eq!(
            "last-wins".parse::<DuplicatePolicy>(),
            Ok(DuplicatePolicy::LastWriteWins)
        );
        assert!("first-wins".parse::<DuplicatePolicy>().is_err());
    }
}
