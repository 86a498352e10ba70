//! Request decoding helpers shared by the sale and session handlers.
//!
//! Bodies are read as raw bytes so malformed JSON becomes a domain
//! `invalid_request` error with the same shape as schema failures, instead of
//! Actix's plain-text extractor rejection.

use serde_json::{Value, json};

use crate::domain::{Error, LoginValidationError};

/// Machine-readable codes for request decoding failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MalformedJson,
    EmptyUsername,
    EmptyPassword,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MalformedJson => "malformed_json",
            Self::EmptyUsername => "empty_username",
            Self::EmptyPassword => "empty_password",
        }
    }
}

/// Decode a JSON request body. An empty body decodes as `{}` so schema
/// validation reports the missing fields.
pub(crate) fn parse_json_body(bytes: &[u8]) -> Result<Value, Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|err| {
        Error::invalid_request("request body must be valid JSON").with_details(json!({
            "code": ErrorCode::MalformedJson.as_str(),
            "line": err.line(),
            "column": err.column(),
        }))
    })
}

pub(crate) fn login_validation_error(err: LoginValidationError) -> Error {
    let code = match err {
        LoginValidationError::EmptyUsername => ErrorCode::EmptyUsername,
        LoginValidationError::EmptyPassword => ErrorCode::EmptyPassword,
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": code.as_str(),
    }))
}
