//! Sale API handlers.
//!
//! ```text
//! GET    /api/sale            list the session user's sales
//! GET    /api/sale?id=...     one sale
//! POST   /api/sale            {"total":100}
//! PUT    /api/sale?id=...     {"id":"...","total":150}
//! DELETE /api/sale?id=...
//! ```
//!
//! Every handler requires a session. Update and delete misses answer `200`
//! with an empty body rather than `404`.

use actix_web::http::header::{self, EntityTag};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};
use utoipa::IntoParams;

use crate::domain::ports::SALE_LISTING_PATH;
use crate::domain::sale_schema::{insert_sale_params, parse_sale_id, update_sale_params};
use crate::domain::{Error, Sale, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::{NO_STORE, PRIVATE_NO_CACHE_MUST_REVALIDATE};
use crate::inbound::http::schemas::{ErrorSchema, InsertSaleSchema, SaleSchema, UpdateSaleSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_json_body;

const FINGERPRINT_HEX_LEN: usize = 16;

/// Query string accepted by the sale endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SaleIdQuery {
    /// Sale id. Optional for `GET`, required for `PUT` and `DELETE`.
    pub id: Option<String>,
}

/// Per-user, per-generation validator for the listing.
///
/// The user component is hashed so the raw id never appears in a header.
pub(crate) fn listing_etag(user_id: &UserId, generation: u64) -> EntityTag {
    let digest = Sha256::digest(user_id.as_ref().as_bytes());
    let fingerprint: String = hex::encode(digest)
        .chars()
        .take(FINGERPRINT_HEX_LEN)
        .collect();
    EntityTag::new_weak(format!("sale-{fingerprint}-{generation:x}"))
}

fn if_none_match_hits(req: &HttpRequest, etag: &EntityTag) -> bool {
    match req.get_header::<header::IfNoneMatch>() {
        Some(header::IfNoneMatch::Any) => true,
        Some(header::IfNoneMatch::Items(tags)) => tags.iter().any(|tag| tag.weak_eq(etag)),
        None => false,
    }
}

fn json_or_empty(sale: Option<Sale>) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    builder.insert_header((header::CACHE_CONTROL, NO_STORE));
    match sale {
        Some(sale) => builder.json(sale),
        None => builder.finish(),
    }
}

/// List the session user's sales, or fetch one by `id`.
///
/// The listing carries a weak `ETag` that changes whenever a sale mutation
/// revalidates `/sale`; a matching `If-None-Match` yields `304`.
#[utoipa::path(
    get,
    path = "/api/sale",
    params(SaleIdQuery),
    responses(
        (status = 200, description = "Sales owned by the session user, or the requested sale", body = [SaleSchema],
            headers(("ETag" = String, description = "Listing validator"))),
        (status = 304, description = "Listing unchanged since the supplied ETag"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such sale for this user", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["sales"],
    operation_id = "getSales"
)]
#[get("/sale")]
pub async fn get_sales(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SaleIdQuery>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;

    if let Some(raw) = query.id.as_deref() {
        let id = parse_sale_id(Some(raw))?;
        let sale = state
            .sales_query
            .get_sale_by_id(&user_id, &id)
            .await?
            .ok_or_else(|| Error::not_found(format!("sale {id} not found")))?;
        return Ok(HttpResponse::Ok()
            .insert_header((header::CACHE_CONTROL, PRIVATE_NO_CACHE_MUST_REVALIDATE))
            .json(sale));
    }

    // Read the generation before the rows so a concurrent mutation can only
    // make the validator stale, never the body.
    let etag = listing_etag(&user_id, state.revalidation.generation(SALE_LISTING_PATH));
    if if_none_match_hits(&req, &etag) {
        debug!(etag = %etag, "sale listing not modified");
        return Ok(HttpResponse::NotModified()
            .insert_header((header::CACHE_CONTROL, PRIVATE_NO_CACHE_MUST_REVALIDATE))
            .insert_header(header::ETag(etag))
            .finish());
    }

    let sales = state.sales_query.get_sales(&user_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, PRIVATE_NO_CACHE_MUST_REVALIDATE))
        .insert_header(header::ETag(etag))
        .json(sales))
}

/// Create a sale owned by the session user.
#[utoipa::path(
    post,
    path = "/api/sale",
    request_body = InsertSaleSchema,
    responses(
        (status = 201, description = "Created sale", body = SaleSchema),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["sales"],
    operation_id = "createSale"
)]
#[post("/sale")]
pub async fn create_sale(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let params = insert_sale_params(&parse_json_body(&body)?)?;
    let sale = state.sales.create_sale(&user_id, params).await?;
    state.revalidation.revalidate(SALE_LISTING_PATH);
    info!(sale_id = %sale.id, "sale created");
    Ok(HttpResponse::Created()
        .insert_header((header::CACHE_CONTROL, NO_STORE))
        .json(sale))
}

/// Replace the total of the sale selected by the query `id`.
#[utoipa::path(
    put,
    path = "/api/sale",
    params(SaleIdQuery),
    request_body = UpdateSaleSchema,
    responses(
        (status = 200, description = "Updated sale, or an empty body when nothing matched", body = SaleSchema),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["sales"],
    operation_id = "updateSale"
)]
#[put("/sale")]
pub async fn update_sale(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SaleIdQuery>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let id = parse_sale_id(query.id.as_deref())?;
    let params = update_sale_params(&parse_json_body(&body)?)?;
    let updated = state.sales.update_sale(&user_id, &id, params).await?;
    state.revalidation.revalidate(SALE_LISTING_PATH);
    info!(sale_id = %id, matched = updated.is_some(), "sale update handled");
    Ok(json_or_empty(updated))
}

/// Delete the sale selected by the query `id`.
#[utoipa::path(
    delete,
    path = "/api/sale",
    params(SaleIdQuery),
    responses(
        (status = 200, description = "Deleted sale, or an empty body when nothing matched", body = SaleSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["sales"],
    operation_id = "deleteSale"
)]
#[delete("/sale")]
pub async fn delete_sale(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SaleIdQuery>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let id = parse_sale_id(query.id.as_deref())?;
    let deleted = state.sales.delete_sale(&user_id, &id).await?;
    state.revalidation.revalidate(SALE_LISTING_PATH);
    info!(sale_id = %id, matched = deleted.is_some(), "sale delete handled");
    Ok(json_or_empty(deleted))
}

#[cfg(test)]
#[path = "sales_tests.rs"]
mod tests;
