//! Change operations emitted by the differ

use crate::model::record::{Fields, RecordId};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The three kinds of downstream change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationKind {
    Create,
    Update,
    Delete,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Create => "CREATE",
            OperationKind::Update => "UPDATE",
            OperationKind::Delete => "DELETE",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One instruction for reconciling a downstream system
///
/// Borrows the id and payload from the record sets being diffed. DELETE has
/// no payload field at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    Create { id: &'a RecordId, fields: &'a Fields },
    Update { id: &'a RecordId, fields: &'a Fields },
    Delete { id: &'a RecordId },
}

impl<'a> Operation<'a> {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Create { .. } => OperationKind::Create,
            Operation::Update { .. } => OperationKind::Update,
            Operation::Delete { .. } => OperationKind::Delete,
        }
    }

    pub fn id(&self) -> &'a RecordId {
        match self {
            Operation::Create { id, .. }
            | Operation::Update { id, .. }
            | Operation::Delete { id } => id,
        }
    }

    /// Full field mapping for CREATE and UPDATE, `None` for DELETE
    pub fn payload(&self) -> Option<&'a Fields> {
        match self {
            Operation::Create { fields, .. } | Operation::Update { fields, .. } => Some(fields),
            Operation::Delete { .. } => None,
        }
    }

    pub fn to_owned_operation(&self) -> OwnedOperation {
        match *self {
            Operation::Create { id, fields } => OwnedOperation::Create {
                id: id.clone(),
                fields: fields.clone(),
            },
            Operation::Update { id, fields } => OwnedOperation::Update {
                id: id.clone(),
                fields: fields.clone(),
            },
            Operation::Delete { id } => OwnedOperation::Delete { id: id.clone() },
        }
    }
}

/// Wire shape shared by borrowed and owned operations:
/// `{"op": "UPDATE", "id": "2", "payload": {...}}`, payload `null` for DELETE.
#[derive(Serialize)]
struct OperationRecord<'a> {
    op: OperationKind,
    id: &'a RecordId,
    payload: Option<&'a Fields>,
}

impl Serialize for Operation<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OperationRecord {
            op: self.kind(),
            id: self.id(),
            payload: self.payload(),
        }
        .serialize(serializer)
    }
}

/// Owned counterpart of [`Operation`], for sinks that keep what they receive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedOperation {
    Create { id: RecordId, fields: Fields },
    Update { id: RecordId, fields: Fields },
    Delete { id: RecordId },
}

impl OwnedOperation {
    pub fn as_operation(&self) -> Operation<'_> {
        match self {
            OwnedOperation::Create { id, fields } => Operation::Create { id, fields },
            OwnedOperation::Update { id, fields } => Operation::Update { id, fields },
            OwnedOperation::Delete { id } => Operation::Delete { id },
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.as_operation().kind()
    }

    pub fn id(&self) -> &RecordId {
        match self {
            OwnedOperation::Create { id, .. }
            | OwnedOperation::Update { id, .. }
            | OwnedOperation::Delete { id } => id,
        }
    }

    pub fn payload(&self) -> Option<&Fields> {
        match self {
            OwnedOperation::Create { fields, .. } | OwnedOperation::Update { fields, .. } => {
                Some(fields)
            }
            OwnedOperation::Delete { .. } => None,
        }
    }
}

impl From<Operation<'_>> for OwnedOperation {
    fn from(op: Operation<'_>) -> Self {
        op.to_owned_operation()
    }
}

impl Serialize for OwnedOperation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_operation().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, &str)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_delete_has_no_payload() {
        let id = RecordId::from("1");
        let op = Operation::Delete { id: &id };
        assert_eq!(op.kind(), OperationKind::Delete);
        assert!(op.payload().is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let id = RecordId::from("2");
        let f = fields(&[("id", "2"), ("name", "B2")]);
        let update = serde_json::to_value(Operation::Update { id: &id, fields: &f }).unwrap();
        assert_eq!(
            update,
            json!({"op": "UPDATE", "id": "2", "payload": {"id": "2", "name": "B2"}})
        );

        let delete = serde_json::to_value(Operation::Delete { id: &id }).unwrap();
        assert_eq!(delete, json!({"op": "DELETE", "id": "2", "payload": null}));
    }

    #[test]
    fn test_payload_keeps_column_order() {
        let id = RecordId::from("9");
        let f = fields(&[("zeta", "z"), ("alpha", "a"), ("id", "9")]);
        let text = serde_json::to_string(&Operation::Create { id: &id, fields: &f }).unwrap();
        assert_eq!(
            text,
            r#"{"op":"CREATE","id":"9","payload":{"zeta":"z","alpha":"a","id":"9"}}"#
        );
    }

    #[test]
    fn test_owned_round_trip_through_borrowed() {
        let id = RecordId::from("3");
        let f = fields(&[("id", "3")]);
        let op = Operation::Create { id: &id, fields: &f };
        let owned = OwnedOperation::from(op);
        assert_eq!(owned.as_operation(), op);
        assert_eq!(owned.kind(), OperationKind::Create);
        assert_eq!(owned.payload(), Some(&f));
    }
}
