use crate::errors::{CatalogError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Ordered mapping of field name to field value, in source column order
pub type Fields = IndexMap<String, String>;

/// Opaque record identifier
///
/// Compared by exact string equality; no trimming, case folding or numeric
/// coercion is applied, so `"01"` and `"1"` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Lets `IndexMap<RecordId, _>` be queried with a plain `&str`.
impl Borrow<str> for RecordId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single catalog entity: its id plus every column of its source row
///
/// The id column itself stays in `fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    fields: Fields,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Build a record from a row, taking the id from `id_column`
    ///
    /// With no id column configured the value of the first field is used.
    ///
    /// # Errors
    ///
    /// - `MissingIdColumn` if `id_column` names a field the row lacks
    /// - `EmptyRecord` if no column is configured and the row is empty
    pub fn from_fields(fields: Fields, id_column: Option<&str>) -> Result<Self> {
        let id = match id_column {
            Some(column) => fields
                .get(column)
                .ok_or_else(|| CatalogError::MissingIdColumn {
                    column: column.to_string(),
                })?
                .clone(),
            None => fields
                .get_index(0)
                .map(|(_, value)| value.clone())
                .ok_or(CatalogError::EmptyRecord)?,
        };
        Ok(Self::new(id, fields))
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn into_parts(self) -> (RecordId, Fields) {
        (self.id, self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_fields_defaults_to_first_column() {
        let record = Record::from_fields(row(&[("sku", "A-1"), ("id", "7")]), None).unwrap();
        assert_eq!(record.id().as_str(), "A-1");
    }

    #[test]
    fn test_from_fields_uses_named_column() {
        let record =
            Record::from_fields(row(&[("sku", "A-1"), ("id", "7")]), Some("id")).unwrap();
        assert_eq!(record.id().as_str(), "7");
        assert_eq!(record.fields().len(), 2);
    }

    #[test]
    fn test_from_fields_missing_column() {
        let err = Record::from_fields(row(&[("sku", "A-1")]), Some("id")).unwrap_err();
        assert_eq!(
            err,
            CatalogError::MissingIdColumn {
                column: "id".to_string()
            }
        );
    }

    #[test]
    fn test_from_fields_empty_row() {
        let err = Record::from_fields(Fields::new(), None).unwrap_err();
        assert_eq!(err, CatalogError::EmptyRecord);
    }

    #[test]
    fn test_record_id_is_not_coerced() {
        assert_ne!(RecordId::from("01"), RecordId::from("1"));
        assert_ne!(RecordId::from("1 "), RecordId::from("1"));
    }
}
