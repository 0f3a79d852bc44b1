// Integration tests for operation sinks
// Covers the JSON lines and text renderings, drain counts and early stop

use catdiff_core::errors::{ExError, ExErrorKind};
use catdiff_core::{diff, Operation, OperationKind};
use catdiff_store::{
    drain, load_record_set, read_record_set, sink_for, JsonLinesSink, LoaderOptions,
    OperationSink, OutputFormat, TextSink, VecSink,
};
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn reference_sets() -> (catdiff_core::RecordSet, catdiff_core::RecordSet) {
    let options = LoaderOptions::default();
    let before = read_record_set("id,name\n1,A\n2,B\n".as_bytes(), &options).unwrap();
    let after = read_record_set("id,name\n2,B2\n3,C\n".as_bytes(), &options).unwrap();
    (before, after)
}

#[test]
fn test_json_lines_rendering() {
    // Given: The reference before/after pair
    let (before, after) = reference_sets();

    // When: We drain the diff into a JSON lines sink
    let mut sink = JsonLinesSink::new(Vec::new());
    let counts = drain(diff(&before, &after), &mut sink).unwrap();

    // Then: One object per line, DELETE with a null payload, field order kept
    let out = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(
        out,
        "{\"op\":\"DELETE\",\"id\":\"1\",\"payload\":null}\n\
         {\"op\":\"UPDATE\",\"id\":\"2\",\"payload\":{\"id\":\"2\",\"name\":\"B2\"}}\n\
         {\"op\":\"CREATE\",\"id\":\"3\",\"payload\":{\"id\":\"3\",\"name\":\"C\"}}\n"
    );
    assert_eq!(counts.deletes, 1);
    assert_eq!(counts.updates, 1);
    assert_eq!(counts.creates, 1);
}

#[test]
fn test_text_rendering() {
    // Given: The reference pair
    let (before, after) = reference_sets();

    // When: We drain into a text sink
    let mut sink = TextSink::new(Vec::new());
    drain(diff(&before, &after), &mut sink).unwrap();

    // Then: Tab separated kind, id and payload
    let out = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "DELETE\t1\tnull",
            "UPDATE\t2\t{\"id\":\"2\",\"name\":\"B2\"}",
            "CREATE\t3\t{\"id\":\"3\",\"name\":\"C\"}",
        ]
    );
}

#[test]
fn test_sink_for_selects_rendering() {
    // Given: The reference pair
    let (before, after) = reference_sets();

    // When: We drain through boxed sinks of each format
    let mut jsonl = Vec::new();
    {
        let mut sink = sink_for(OutputFormat::Jsonl, &mut jsonl);
        drain(diff(&before, &after), &mut sink).unwrap();
    }
    let mut text = Vec::new();
    {
        let mut sink = sink_for(OutputFormat::Text, &mut text);
        drain(diff(&before, &after), &mut sink).unwrap();
    }

    // Then: Each writer received its own rendering
    assert!(String::from_utf8(jsonl).unwrap().starts_with("{\"op\":\"DELETE\""));
    assert!(String::from_utf8(text).unwrap().starts_with("DELETE\t1\t"));
}

#[test]
fn test_vec_sink_collects_fixture_diff() {
    // Given: The inventory fixtures keyed by sku
    let options = LoaderOptions::default();
    let before =
        load_record_set(&fixtures_dir().join("product_inventory_before.csv"), &options).unwrap();
    let after =
        load_record_set(&fixtures_dir().join("product_inventory_after.csv"), &options).unwrap();

    // When: We collect the diff
    let mut sink = VecSink::new();
    drain(diff(&before, &after), &mut sink).unwrap();

    // Then: before-derived operations first, creates last
    let ops: Vec<(OperationKind, &str)> = sink
        .operations()
        .iter()
        .map(|op| (op.kind(), op.id().as_str()))
        .collect();
    assert_eq!(
        ops,
        vec![
            (OperationKind::Delete, "P-100"),
            (OperationKind::Update, "P-200"),
            (OperationKind::Update, "P-300"),
            (OperationKind::Create, "P-400"),
        ]
    );

    // And: Unchanged P-300 still carries the after payload
    let p300 = &sink.operations()[2];
    assert_eq!(p300.payload().unwrap()["stock"], "0");
}

struct FailingSink {
    accepted: usize,
    limit: usize,
    finished: bool,
}

impl OperationSink for FailingSink {
    fn emit(&mut self, op: &Operation<'_>) -> catdiff_store::Result<()> {
        if self.accepted == self.limit {
            return Err(ExError::new(ExErrorKind::Io)
                .with_op("failing_emit")
                .with_record_id(op.id().as_str())
                .with_message("downstream unavailable"));
        }
        self.accepted += 1;
        Ok(())
    }

    fn finish(&mut self) -> catdiff_store::Result<()> {
        self.finished = true;
        Ok(())
    }
}

#[test]
fn test_drain_stops_at_first_sink_error() {
    // Given: A sink that accepts one operation then fails
    let (before, after) = reference_sets();
    let mut sink = FailingSink {
        accepted: 0,
        limit: 1,
        finished: false,
    };

    // When: We drain into it
    let err = drain(diff(&before, &after), &mut sink).unwrap_err();

    // Then: The error names the operation that failed and finish is skipped
    assert_eq!(err.kind(), ExErrorKind::Io);
    assert_eq!(err.record_id(), Some("2"));
    assert_eq!(sink.accepted, 1);
    assert!(!sink.finished);
}

#[test]
fn test_drain_empty_stream_still_finishes() {
    // Given: Two empty sets
    let empty = catdiff_core::RecordSet::new();
    let mut sink = FailingSink {
        accepted: 0,
        limit: 0,
        finished: false,
    };

    // When: We drain
    let counts = drain(diff(&empty, &empty), &mut sink).unwrap();

    // Then: Nothing emitted, sink finished
    assert_eq!(counts.total(), 0);
    assert!(sink.finished);
}
