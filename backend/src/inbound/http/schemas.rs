//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. The wrappers here mirror their wire
//! shape and register under the domain type's name through `#[schema(as)]`.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body or query failed validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No authenticated session.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The sale does not exist or belongs to someone else.
    #[schema(rename = "not_found")]
    NotFound,
    /// The sale store failed.
    #[schema(rename = "storage_failure")]
    StorageFailure,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "validation failed: total: Required")]
    message: String,
    /// Request trace identifier, echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Validation issues (`issues`, `fieldErrors`) or other context.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Sale`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Sale)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SaleSchema {
    #[schema(max_length = 191, example = "0f8fad5b-d9cb-469f-a165-70867728950e")]
    id: String,
    #[schema(example = 100)]
    total: i32,
    /// Owner, stamped from the session.
    #[schema(max_length = 256, example = "123e4567-e89b-12d3-a456-426614174000")]
    user_id: String,
}

/// Request body for creating a sale.
///
/// `total` may also be sent as a numeric string. `id` and `userId` are
/// ignored.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InsertSaleSchema {
    #[schema(value_type = i32, example = 100)]
    total: serde_json::Value,
}

/// Request body for a full-record sale update.
///
/// The `id` in the body must be present but the query `id` selects the row.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UpdateSaleSchema {
    #[schema(max_length = 191)]
    id: String,
    #[schema(value_type = i32, example = 150)]
    total: serde_json::Value,
}
