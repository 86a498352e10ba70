//! In-process sales app shared by the integration suites.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::Value;

use sales_backend::Trace;
use sales_backend::domain::SaleService;
use sales_backend::domain::ports::FixtureLoginService;
use sales_backend::inbound::http::sales::{create_sale, delete_sale, get_sales, update_sale};
use sales_backend::inbound::http::session_config::{
    SESSION_COOKIE_NAME, SessionSettings, session_middleware,
};
use sales_backend::inbound::http::state::HttpState;
use sales_backend::inbound::http::users::{login, logout};
use sales_backend::outbound::cache::RevalidationRegistry;
use sales_backend::outbound::persistence::InMemorySaleRepository;

/// Handler state over a fresh in-memory store and the fixture login.
pub fn memory_state() -> HttpState {
    let sales = Arc::new(SaleService::new(Arc::new(InMemorySaleRepository::new())));
    HttpState::new(
        Arc::new(FixtureLoginService),
        sales.clone(),
        sales,
        Arc::new(RevalidationRegistry::new()),
    )
}

/// The `/api` scope as the server mounts it.
pub fn sales_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    App::new().app_data(web::Data::new(state)).wrap(Trace).service(
        web::scope("/api")
            .wrap(session_middleware(&session))
            .service(login)
            .service(logout)
            .service(get_sales)
            .service(create_sale)
            .service(update_sale)
            .service(delete_sale),
    )
}

/// Sign in with the fixture credentials and return the session cookie.
pub async fn sign_in<S, B>(app: &S) -> Cookie<'static>
where
    S: actix_web::dev::Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(serde_json::json!({ "username": "admin", "password": "password" }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "fixture login should succeed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
        .expect("session cookie")
}

/// Decode a JSON response body.
pub async fn body_json<B>(res: ServiceResponse<B>) -> Value
where
    B: MessageBody,
{
    let bytes = test::read_body(res).await;
    serde_json::from_slice(&bytes).expect("json body")
}
