#![allow(clippy::unwrap_used, clippy::expect_used)]

use ecohub_core::errors::EcoHubError;
use ecohub_core::logging_facility::init_test_capture;
use ecohub_core::types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use ecohub_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "logging_start_unique_1";

    log_op_start!(op_name, entity = "Challenge");

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event(), Some(EVENT_START));
    assert_eq!(events[0].field("entity"), Some("Challenge"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "logging_end_unique_2";

    log_op_end!(op_name, duration_ms = 42u64);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "logging_error_unique_3";

    let err = EcoHubError::RecordNotFound {
        entity: "Review".to_string(),
        id: "9".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10u64);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field("err.code"), Some("ERR_NOT_FOUND"));
    assert_eq!(events[0].field("err.kind"), Some("NotFound"));
}

#[test]
fn test_boundary_pair_single_start_end() {
    let capture = init_test_capture();
    let op_name = "logging_boundary_unique_4";

    log_op_start!(op_name, record_id = 1u64);
    log_op_end!(op_name, duration_ms = 1u64, record_id = 1u64);

    capture.assert_event_exists(op_name, EVENT_START);
    capture.assert_event_exists(op_name, EVENT_END);
    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].field("record_id"), Some("1"));
}
