pub mod operation;
pub mod record;
pub mod record_set;

pub use operation::{Operation, OperationKind, OwnedOperation};
pub use record::{Fields, Record, RecordId};
pub use record_set::{DuplicatePolicy, RecordSet};
