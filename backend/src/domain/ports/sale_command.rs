//! Driving port for sale mutations.
//!
//! HTTP handlers and server actions call [`SaleCommand`] with the session
//! user passed explicitly; nothing here reads ambient request state.

use async_trait::async_trait;

use crate::domain::sale_schema::{NewSaleParams, UpdateSaleParams};
use crate::domain::{Error, Sale, SaleId, UserId};

/// Create, update and delete sales owned by a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SaleCommand: Send + Sync {
    /// Store a new sale for `user` and return it.
    async fn create_sale(&self, user: &UserId, params: NewSaleParams) -> Result<Sale, Error>;

    /// Replace the mutable columns of `id`.
    ///
    /// `params.id` is ignored in favour of `id`. Returns `Ok(None)` when the
    /// user owns no sale with that id.
    async fn update_sale(
        &self,
        user: &UserId,
        id: &SaleId,
        params: UpdateSaleParams,
    ) -> Result<Option<Sale>, Error>;

    /// Delete `id`, returning the removed sale or `Ok(None)` on a miss.
    async fn delete_sale(&self, user: &UserId, id: &SaleId) -> Result<Option<Sale>, Error>;
}
