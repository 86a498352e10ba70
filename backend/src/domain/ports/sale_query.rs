//! Driving port for reading a user's sales.

use async_trait::async_trait;

use crate::domain::{Error, Sale, SaleId, UserId};

/// Owner-scoped sale reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SaleQuery: Send + Sync {
    /// Every sale owned by `user`.
    async fn get_sales(&self, user: &UserId) -> Result<Vec<Sale>, Error>;

    /// The sale `id` when owned by `user`.
    async fn get_sale_by_id(&self, user: &UserId, id: &SaleId) -> Result<Option<Sale>, Error>;
}
