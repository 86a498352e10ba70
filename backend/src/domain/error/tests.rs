//! Tests for the domain error payload.

use super::*;
use crate::domain::sale_schema::insert_sale_params;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn traced_error() -> Error {
    Error::storage_failure("database error")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "operation": "insert" }))
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("login required"), ErrorCode::Unauthorized)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::storage_failure("database error"), ErrorCode::StorageFailure)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_messages_fall_back_to_generic_text(#[case] message: &str) {
    let error = Error::storage_failure(message);
    assert_eq!(error.message(), GENERIC_ERROR_MESSAGE);
}

#[rstest]
fn serialises_camel_case_fields(traced_error: Error) {
    let value = serde_json::to_value(&traced_error).expect("serialise error");
    assert_eq!(value["code"], "storage_failure");
    assert_eq!(value["message"], "database error");
    assert_eq!(value["traceId"], TRACE_ID);
    assert_eq!(value["details"]["operation"], "insert");
}

#[rstest]
fn omits_absent_optional_fields() {
    let value = serde_json::to_value(Error::not_found("missing")).expect("serialise error");
    let object = value.as_object().expect("object payload");
    assert!(!object.contains_key("traceId"));
    assert!(!object.contains_key("details"));
}

#[rstest]
fn deserialises_round_trip(traced_error: Error) {
    let raw = serde_json::to_string(&traced_error).expect("serialise error");
    let decoded: Error = serde_json::from_str(&raw).expect("deserialise error");
    assert_eq!(decoded, traced_error);
}

#[rstest]
fn validation_errors_carry_issues_and_field_errors() {
    let validation = insert_sale_params(&json!({})).expect_err("total is required");
    let error = Error::from(validation);

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let issues = error.validation_issues().expect("issues present");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["path"], json!(["total"]));
    let details = error.details().expect("details present");
    assert_eq!(details["fieldErrors"]["total"][0], "Required");
}

#[tokio::test]
async fn captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid trace id");
    let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::not_found("sale missing").to_string(), "sale missing");
}
