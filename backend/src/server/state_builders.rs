//! Builders for the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use sales_backend::domain::SaleService;
use sales_backend::domain::ports::{
    FixtureLoginService, LoginService, SaleCommand, SaleQuery, SaleRepository,
};
use sales_backend::inbound::http::state::HttpState;
use sales_backend::outbound::cache::RevalidationRegistry;
use sales_backend::outbound::persistence::{
    DbPool, DieselSaleRepository, InMemorySaleRepository,
};

use super::ServerConfig;

fn sale_ports<R>(repository: R) -> (Arc<dyn SaleCommand>, Arc<dyn SaleQuery>)
where
    R: SaleRepository + 'static,
{
    let service = Arc::new(SaleService::new(Arc::new(repository)));
    (service.clone(), service)
}

/// Diesel-backed sale ports when a pool exists, in-memory ones otherwise.
fn build_sale_ports(pool: Option<&DbPool>) -> (Arc<dyn SaleCommand>, Arc<dyn SaleQuery>) {
    match pool {
        Some(pool) => {
            info!("sales stored in PostgreSQL");
            sale_ports(DieselSaleRepository::new(pool.clone()))
        }
        None => {
            warn!("no database configured; sales are kept in memory and lost on restart");
            sale_ports(InMemorySaleRepository::new())
        }
    }
}

pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let login: Arc<dyn LoginService> = Arc::new(FixtureLoginService);
    let (sales, sales_query) = build_sale_ports(config.db_pool.as_ref());
    web::Data::new(HttpState::new(
        login,
        sales,
        sales_query,
        Arc::new(RevalidationRegistry::new()),
    ))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use sales_backend::domain::UserId;
    use sales_backend::domain::sale_schema::NewSaleParams;

    #[rstest]
    #[tokio::test]
    async fn in_memory_ports_share_one_store() {
        let (sales, sales_query) = build_sale_ports(None);
        let owner = UserId::new("seller-1").expect("valid user");

        let created = sales
            .create_sale(&owner, NewSaleParams { total: 11 })
            .await
            .expect("create");
        let listed = sales_query.get_sales(&owner).await.expect("list");

        assert_eq!(listed, vec![created]);
    }
}
