//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on ports, so
//! tests can swap any of them for a double.

use std::sync::Arc;

use crate::domain::ports::{ListingRevalidation, LoginService, SaleCommand, SaleQuery};

/// Ports consumed by the HTTP handlers and server actions.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub sales: Arc<dyn SaleCommand>,
    pub sales_query: Arc<dyn SaleQuery>,
    pub revalidation: Arc<dyn ListingRevalidation>,
}

impl HttpState {
    pub fn new(
        login: Arc<dyn LoginService>,
        sales: Arc<dyn SaleCommand>,
        sales_query: Arc<dyn SaleQuery>,
        revalidation: Arc<dyn ListingRevalidation>,
    ) -> Self {
        Self {
            login,
            sales,
            sales_query,
            revalidation,
        }
    }
}
