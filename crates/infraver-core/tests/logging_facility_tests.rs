//! Logging facility tests
//!
//! Assert on operation boundaries through the in-memory capture layer.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use infraver_core::errors::InfraverError;
use infraver_core::logging_facility::test_capture::init_test_capture;
use infraver_core::{classify_changes, log_op_end, log_op_error, log_op_start, parse_resources};
use infraver_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    assert_eq!(capture.events_for(op_name, EVENT_START).len(), 1);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.events_for(op_name, EVENT_END);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].duration_ms(), Some(42));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = InfraverError::InvalidUtf8 {
        path: "infra/main.tf".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events = capture.events_for(op_name, EVENT_END_ERROR);
    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].error_code(), Some("ERR_INVALID_ENCODING"));
    assert_eq!(error_events[0].error_kind(), Some("InvalidEncoding"));
}

#[test]
fn test_classify_changes_emits_boundaries() {
    let capture = init_test_capture();
    let existing = parse_resources("resource \"logtest_type\" \"a\" {\n  k = 1\n}\n");
    let new = parse_resources("resource \"logtest_type\" \"b\" {\n  k = 1\n}\n");

    classify_changes(&existing, &new);

    capture.assert_event_exists("classify_changes", EVENT_START);
    let minor_ends = capture
        .events_for("classify_changes", EVENT_END)
        .into_iter()
        .filter(|e| e.field("trigger") == Some("new_resource_instance"))
        .count();
    assert!(minor_ends >= 1);
}
