use catdiff_core::errors::{CatalogError, ExError, ExErrorKind};
use catdiff_core::{DuplicatePolicy, RecordSet};
use catdiff_core_types::RequestId;

mod common;

#[test]
fn test_duplicate_identifier_verifiable_by_kind() {
    let err = RecordSet::from_records(
        vec![common::product("p-1", "A"), common::product("p-1", "B")],
        DuplicatePolicy::Reject,
    )
    .unwrap_err();

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::DuplicateIdentifier);
    assert_eq!(ex_err.code(), "ERR_DUPLICATE_IDENTIFIER");
    assert_eq!(ex_err.record_id(), Some("p-1"));
    assert_eq!(ex_err.op(), Some("record_set_insert"));
}

#[test]
fn test_missing_id_column_maps_to_missing_field() {
    let err = CatalogError::MissingIdColumn {
        column: "sku".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MissingField);
    assert_eq!(ex_err.code(), "ERR_MISSING_FIELD");
    assert!(ex_err.message().contains("sku"));
}

#[test]
fn test_empty_record_maps_to_invalid_input() {
    let ex_err: ExError = CatalogError::EmptyRecord.into();
    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::DuplicateIdentifier, "ERR_DUPLICATE_IDENTIFIER"),
        (ExErrorKind::MissingField, "ERR_MISSING_FIELD"),
        (ExErrorKind::MalformedRow, "ERR_MALFORMED_ROW"),
        (ExErrorKind::InvalidConfig, "ERR_INVALID_CONFIG"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_request_id_is_carried_and_displayed() {
    let request_id = RequestId::from_string("run-1".to_string());
    let err = ExError::new(ExErrorKind::Io)
        .with_op("load_record_set")
        .with_message("No such file or directory")
        .with_request_id(request_id.clone());

    assert_eq!(err.request_id(), Some(&request_id));
    assert!(err.to_string().ends_with("(request_id: run-1)"));
}

#[test]
fn test_display_mentions_record_id() {
    let ex_err: ExError = CatalogError::DuplicateIdentifier {
        id: "42".to_string(),
    }
    .into();

    let text = ex_err.to_string();
    assert!(text.starts_with("[ERR_DUPLICATE_IDENTIFIER]"));
    assert!(text.contains("(record_id: 42)"));
}
