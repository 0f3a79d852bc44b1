use catdiff_core::{DuplicatePolicy, Fields, Operation, OperationKind, Record, RecordSet};

/// Build an ordered field map from `(name, value)` pairs
#[allow(dead_code)]
pub fn fields(pairs: &[(&str, &str)]) -> Fields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A product row with `id` and `name` columns, id column first
#[allow(dead_code)]
pub fn product(id: &str, name: &str) -> Record {
    Record::new(id, fields(&[("id", id), ("name", name)]))
}

/// Build a set of products from `(id, name)` pairs, rejecting duplicates
#[allow(dead_code)]
pub fn products(rows: &[(&str, &str)]) -> RecordSet {
    RecordSet::from_records(
        rows.iter().map(|(id, name)| product(id, name)),
        DuplicatePolicy::Reject,
    )
    .unwrap()
}

/// Flatten an operation stream into `(kind, id, payload)` triples
#[allow(dead_code)]
pub fn triples<'a, I>(ops: I) -> Vec<(OperationKind, String, Option<Fields>)>
where
    I: IntoIterator<Item = Operation<'a>>,
{
    ops.into_iter()
        .map(|op| (op.kind(), op.id().to_string(), op.payload().cloned()))
        .collect()
}
