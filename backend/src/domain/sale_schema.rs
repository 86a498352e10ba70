//! Request validators derived from the `sale` table definition.
//!
//! [`SALE_TABLE`] describes each column once. The three validators pick the
//! columns a caller may supply:
//!
//! - [`insert_sale_params`]: `total` only; `id` and `userId` are server-assigned.
//! - [`update_sale_params`]: `id` and `total`; `userId` is server-assigned.
//! - [`sale_id_schema`]: `id` only.
//!
//! Unknown keys are stripped. Every failure is reported as a
//! [`ValidationIssue`] so callers can render per-field messages.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::sale::{SALE_ID_MAX, SaleId, SaleIdValidationError};
use super::user::USER_ID_MAX;

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Bounded text column.
    Varchar { max_length: usize },
    /// 32-bit signed integer column.
    Integer,
}

/// Who supplies a column's value on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    /// The service generates the value when the row is created.
    Generated,
    /// The client supplies the value.
    Client,
    /// The value is stamped from the authenticated session.
    Session,
}

/// A single column of the `sale` table as seen by request payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Payload key (camelCase).
    pub key: &'static str,
    /// Storage type and bounds.
    pub column_type: ColumnType,
    /// Origin of the value on insert.
    pub source: ColumnSource,
}

/// `sale.id`: generated primary key.
pub const ID_COLUMN: Column = Column {
    key: "id",
    column_type: ColumnType::Varchar {
        max_length: SALE_ID_MAX,
    },
    source: ColumnSource::Generated,
};

/// `sale.total`: client-supplied integer amount.
pub const TOTAL_COLUMN: Column = Column {
    key: "total",
    column_type: ColumnType::Integer,
    source: ColumnSource::Client,
};

/// `sale.user_id`: owner stamped from the session.
pub const USER_ID_COLUMN: Column = Column {
    key: "userId",
    column_type: ColumnType::Varchar {
        max_length: USER_ID_MAX,
    },
    source: ColumnSource::Session,
};

/// Table definition every validator is derived from.
pub const SALE_TABLE: [Column; 3] = [ID_COLUMN, TOTAL_COLUMN, USER_ID_COLUMN];

/// Machine-readable reason for a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// The value is missing, `null` or blank.
    Required,
    /// The value has the wrong JSON type.
    InvalidType,
    /// The value cannot be coerced to an integer in range.
    InvalidNumber,
    /// The value exceeds the column length.
    TooLong,
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Path to the offending value; empty for the payload itself.
    pub path: Vec<String>,
    pub code: IssueCode,
    pub message: String,
}

impl ValidationIssue {
    fn field(key: &str, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: vec![key.to_owned()],
            code,
            message: message.into(),
        }
    }

    fn root(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            code,
            message: message.into(),
        }
    }
}

/// Structured validation failure listing every issue found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// All issues in the order they were found.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Messages keyed by field name.
    ///
    /// # Examples
    /// ```
    /// use sales_backend::domain::sale_schema::insert_sale_params;
    /// use serde_json::json;
    ///
    /// let err = insert_sale_params(&json!({ "total": "abc" })).unwrap_err();
    /// assert_eq!(err.field_errors()["total"].len(), 1);
    /// ```
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        let mut errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for issue in self.issues.iter().filter(|issue| !issue.path.is_empty()) {
            errors
                .entry(issue.path.join("."))
                .or_default()
                .push(issue.message.clone());
        }
        errors
    }

    /// Messages about the payload as a whole.
    pub fn form_errors(&self) -> Vec<String> {
        self.issues
            .iter()
            .filter(|issue| issue.path.is_empty())
            .map(|issue| issue.message.clone())
            .collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed")?;
        for (index, issue) in self.issues.iter().enumerate() {
            let separator = if index == 0 { ": " } else { "; " };
            if issue.path.is_empty() {
                write!(f, "{separator}{}", issue.message)?;
            } else {
                write!(f, "{separator}{}: {}", issue.path.join("."), issue.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Validated payload for creating a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSaleParams {
    pub total: i32,
}

/// Validated payload for a full-record sale update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSaleParams {
    pub id: SaleId,
    pub total: i32,
}

/// Validate an insert payload.
///
/// # Examples
/// ```
/// use sales_backend::domain::sale_schema::insert_sale_params;
/// use serde_json::json;
///
/// let params = insert_sale_params(&json!({ "total": "42" })).expect("coerced");
/// assert_eq!(params.total, 42);
/// ```
pub fn insert_sale_params(raw: &Value) -> Result<NewSaleParams, ValidationError> {
    let object = payload_object(raw)?;
    let mut issues = Vec::new();
    let total = read_integer(object, &TOTAL_COLUMN, &mut issues);
    match total {
        Some(total) if issues.is_empty() => Ok(NewSaleParams { total }),
        _ => Err(ValidationError::new(issues)),
    }
}

/// Validate an update payload.
pub fn update_sale_params(raw: &Value) -> Result<UpdateSaleParams, ValidationError> {
    let object = payload_object(raw)?;
    let mut issues = Vec::new();
    let id = read_sale_id(object, &mut issues);
    let total = read_integer(object, &TOTAL_COLUMN, &mut issues);
    match (id, total) {
        (Some(id), Some(total)) if issues.is_empty() => Ok(UpdateSaleParams { id, total }),
        _ => Err(ValidationError::new(issues)),
    }
}

/// Validate a payload carrying only a sale id.
pub fn sale_id_schema(raw: &Value) -> Result<SaleId, ValidationError> {
    let object = payload_object(raw)?;
    let mut issues = Vec::new();
    match read_sale_id(object, &mut issues) {
        Some(id) if issues.is_empty() => Ok(id),
        _ => Err(ValidationError::new(issues)),
    }
}

/// Validate an optional raw id, as read from a query string.
pub fn parse_sale_id(raw: Option<&str>) -> Result<SaleId, ValidationError> {
    let value = raw.map_or(Value::Null, |id| Value::String(id.to_owned()));
    let mut object = Map::new();
    object.insert(ID_COLUMN.key.to_owned(), value);
    sale_id_schema(&Value::Object(object))
}

fn payload_object(raw: &Value) -> Result<&Map<String, Value>, ValidationError> {
    raw.as_object().ok_or_else(|| {
        ValidationError::new(vec![ValidationIssue::root(
            IssueCode::InvalidType,
            format!("Expected object, received {}", type_name(raw)),
        )])
    })
}

fn read_sale_id(object: &Map<String, Value>, issues: &mut Vec<ValidationIssue>) -> Option<SaleId> {
    let raw = read_varchar(object, &ID_COLUMN, issues)?;
    match SaleId::new(raw) {
        Ok(id) => Some(id),
        Err(SaleIdValidationError::EmptyId) => {
            issues.push(ValidationIssue::field(
                ID_COLUMN.key,
                IssueCode::Required,
                "Required",
            ));
            None
        }
        Err(err @ SaleIdValidationError::IdTooLong { .. }) => {
            issues.push(ValidationIssue::field(
                ID_COLUMN.key,
                IssueCode::TooLong,
                err.to_string(),
            ));
            None
        }
    }
}

fn read_varchar(
    object: &Map<String, Value>,
    column: &Column,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    let ColumnType::Varchar { max_length } = column.column_type else {
        return None;
    };
    match object.get(column.key) {
        None | Some(Value::Null) => {
            issues.push(ValidationIssue::field(
                column.key,
                IssueCode::Required,
                "Required",
            ));
            None
        }
        Some(Value::String(text)) if text.chars().count() > max_length => {
            issues.push(ValidationIssue::field(
                column.key,
                IssueCode::TooLong,
                format!("String must contain at most {max_length} character(s)"),
            ));
            None
        }
        Some(Value::String(text)) => Some(text.clone()),
        Some(other) => {
            issues.push(ValidationIssue::field(
                column.key,
                IssueCode::InvalidType,
                format!("Expected string, received {}", type_name(other)),
            ));
            None
        }
    }
}

fn read_integer(
    object: &Map<String, Value>,
    column: &Column,
    issues: &mut Vec<ValidationIssue>,
) -> Option<i32> {
    let outcome = match object.get(column.key) {
        None | Some(Value::Null) => Err((IssueCode::Required, "Required".to_owned())),
        Some(Value::Number(number)) => coerce_number(number),
        Some(Value::String(text)) => coerce_text(text),
        Some(other) => Err((
            IssueCode::InvalidType,
            format!("Expected number, received {}", type_name(other)),
        )),
    };
    match outcome {
        Ok(value) => Some(value),
        Err((code, message)) => {
            issues.push(ValidationIssue::field(column.key, code, message));
            None
        }
    }
}

type Coercion = Result<i32, (IssueCode, String)>;

fn invalid_number() -> (IssueCode, String) {
    (
        IssueCode::InvalidNumber,
        "Expected an integer between -2147483648 and 2147483647".to_owned(),
    )
}

fn coerce_number(number: &serde_json::Number) -> Coercion {
    if let Some(value) = number.as_i64() {
        return i32::try_from(value).map_err(|_| invalid_number());
    }
    number.as_f64().map_or_else(|| Err(invalid_number()), coerce_float)
}

fn coerce_text(text: &str) -> Coercion {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err((IssueCode::Required, "Required".to_owned()));
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return i32::try_from(value).map_err(|_| invalid_number());
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| invalid_number())
        .and_then(coerce_float)
}

fn coerce_float(value: f64) -> Coercion {
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    if value.is_finite() && value.fract() == 0.0 && in_range {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "value is integral and within i32 range"
        )]
        Ok(value as i32)
    } else {
        Err(invalid_number())
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({ "total": 42 }), 42)]
    #[case(json!({ "total": "42" }), 42)]
    #[case(json!({ "total": " -7 " }), -7)]
    #[case(json!({ "total": 100.0 }), 100)]
    #[case(json!({ "total": "1e3" }), 1000)]
    fn insert_coerces_total(#[case] raw: Value, #[case] expected: i32) {
        let params = insert_sale_params(&raw).expect("valid payload");
        assert_eq!(params.total, expected);
    }

    #[rstest]
    #[case(json!({}), IssueCode::Required)]
    #[case(json!({ "total": null }), IssueCode::Required)]
    #[case(json!({ "total": "   " }), IssueCode::Required)]
    #[case(json!({ "total": "abc" }), IssueCode::InvalidNumber)]
    #[case(json!({ "total": 1.5 }), IssueCode::InvalidNumber)]
    #[case(json!({ "total": 3_000_000_000_i64 }), IssueCode::InvalidNumber)]
    #[case(json!({ "total": true }), IssueCode::InvalidType)]
    #[case(json!({ "total": [1] }), IssueCode::InvalidType)]
    fn insert_rejects_bad_totals(#[case] raw: Value, #[case] expected: IssueCode) {
        let err = insert_sale_params(&raw).expect_err("invalid payload");
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].code, expected);
        assert_eq!(err.issues()[0].path, vec!["total".to_owned()]);
    }

    #[rstest]
    fn insert_strips_server_assigned_keys() {
        let params = insert_sale_params(&json!({
            "id": "client-chosen",
            "userId": "someone-else",
            "total": 5,
            "extra": "ignored",
        }))
        .expect("valid payload");
        assert_eq!(params, NewSaleParams { total: 5 });
    }

    #[rstest]
    fn insert_rejects_non_object_payloads() {
        let err = insert_sale_params(&json!([1, 2])).expect_err("array payload");
        assert_eq!(err.form_errors(), vec!["Expected object, received array"]);
        assert!(err.field_errors().is_empty());
    }

    #[rstest]
    fn update_requires_id_and_total() {
        let err = update_sale_params(&json!({})).expect_err("empty payload");
        let fields = err.field_errors();
        assert_eq!(fields["id"], vec!["Required"]);
        assert_eq!(fields["total"], vec!["Required"]);
    }

    #[rstest]
    fn update_strips_owner() {
        let params = update_sale_params(&json!({
            "id": "sale-1",
            "total": "9",
            "userId": "intruder",
        }))
        .expect("valid payload");
        assert_eq!(params.id.as_ref(), "sale-1");
        assert_eq!(params.total, 9);
    }

    #[rstest]
    #[case(json!({ "id": 12 }), IssueCode::InvalidType)]
    #[case(json!({ "id": "" }), IssueCode::Required)]
    #[case(json!({ "id": "x".repeat(SALE_ID_MAX + 1) }), IssueCode::TooLong)]
    fn id_schema_rejects_bad_ids(#[case] raw: Value, #[case] expected: IssueCode) {
        let err = sale_id_schema(&raw).expect_err("invalid id");
        assert_eq!(err.issues()[0].code, expected);
    }

    #[rstest]
    fn parse_sale_id_reports_missing_query_value() {
        let err = parse_sale_id(None).expect_err("missing id");
        assert_eq!(err.field_errors()["id"], vec!["Required"]);
        assert_eq!(
            parse_sale_id(Some("missing-id")).expect("valid id").as_ref(),
            "missing-id"
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    fn blank_and_missing_ids_share_one_message(#[case] raw: Option<&str>) {
        let err = parse_sale_id(raw).expect_err("no usable id");
        assert_eq!(err.issues()[0].code, IssueCode::Required);
        assert_eq!(err.field_errors()["id"], vec!["Required"]);
    }

    #[rstest]
    fn display_lists_every_issue() {
        let err = update_sale_params(&json!({ "total": "x" })).expect_err("invalid");
        let message = err.to_string();
        assert!(message.starts_with("validation failed: id: Required"));
        assert!(message.contains("total: Expected an integer"));
    }

    #[rstest]
    fn table_definition_lists_every_column_once() {
        let keys: Vec<_> = SALE_TABLE.iter().map(|column| column.key).collect();
        assert_eq!(keys, vec!["id", "total", "userId"]);
        let client_supplied: Vec<_> = SALE_TABLE
            .iter()
            .filter(|column| column.source == ColumnSource::Client)
            .map(|column| column.key)
            .collect();
        assert_eq!(client_supplied, vec!["total"]);
    }
}
