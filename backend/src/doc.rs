//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the session and sale endpoints, the health checks,
//! and schema wrappers for the domain types so the domain stays free of
//! utoipa derives. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for tooling.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, InsertSaleSchema, SaleSchema, UpdateSaleSchema,
};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Sales backend API",
        description = "Owner-scoped sale records behind a cookie session, plus health checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::sales::get_sales,
        crate::inbound::http::sales::create_sale,
        crate::inbound::http::sales::update_sale,
        crate::inbound::http::sales::delete_sale,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SaleSchema,
        InsertSaleSchema,
        UpdateSaleSchema,
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest
    )),
    tags(
        (name = "sales", description = "Sale records owned by the session user"),
        (name = "session", description = "Sign in and sign out"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
