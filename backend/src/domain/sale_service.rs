//! Sale data access service.
//!
//! Implements [`SaleCommand`] and [`SaleQuery`] over a [`SaleRepository`].
//! The session user is always an explicit argument and every repository
//! call is scoped to it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{SaleCommand, SaleQuery, SaleRepository, SaleRepositoryError};
use crate::domain::sale_schema::{NewSaleParams, UpdateSaleParams};
use crate::domain::{Error, Sale, SaleChanges, SaleId, UserId};

/// Log the adapter failure and return a sanitised storage error.
fn map_repository_error(operation: &'static str, err: SaleRepositoryError) -> Error {
    error!(operation, error = %err, "sale repository failure");
    let message = match err {
        SaleRepositoryError::Connection { .. } => "sale storage is unavailable",
        SaleRepositoryError::Query { .. } => "sale storage rejected the operation",
    };
    Error::storage_failure(message)
}

/// Owner-scoped sale operations.
#[derive(Clone)]
pub struct SaleService<R> {
    sale_repo: Arc<R>,
}

impl<R> SaleService<R> {
    pub fn new(sale_repo: Arc<R>) -> Self {
        Self { sale_repo }
    }
}

#[async_trait]
impl<R> SaleCommand for SaleService<R>
where
    R: SaleRepository,
{
    async fn create_sale(&self, user: &UserId, params: NewSaleParams) -> Result<Sale, Error> {
        let sale = Sale::create(user.clone(), params.total);
        let stored = self
            .sale_repo
            .insert(&sale)
            .await
            .map_err(|err| map_repository_error("create_sale", err))?;
        debug!(sale_id = %stored.id, "sale created");
        Ok(stored)
    }

    async fn update_sale(
        &self,
        user: &UserId,
        id: &SaleId,
        params: UpdateSaleParams,
    ) -> Result<Option<Sale>, Error> {
        let changes = SaleChanges {
            total: params.total,
        };
        let updated = self
            .sale_repo
            .update(id, user, &changes)
            .await
            .map_err(|err| map_repository_error("update_sale", err))?;
        if updated.is_none() {
            debug!(sale_id = %id, "update matched no sale owned by the caller");
        }
        Ok(updated)
    }

    async fn delete_sale(&self, user: &UserId, id: &SaleId) -> Result<Option<Sale>, Error> {
        let deleted = self
            .sale_repo
            .delete(id, user)
            .await
            .map_err(|err| map_repository_error("delete_sale", err))?;
        if deleted.is_none() {
            debug!(sale_id = %id, "delete matched no sale owned by the caller");
        }
        Ok(deleted)
    }
}

#[async_trait]
impl<R> SaleQuery for SaleService<R>
where
    R: SaleRepository,
{
    async fn get_sales(&self, user: &UserId) -> Result<Vec<Sale>, Error> {
        self.sale_repo
            .list_for_user(user)
            .await
            .map_err(|err| map_repository_error("get_sales", err))
    }

    async fn get_sale_by_id(&self, user: &UserId, id: &SaleId) -> Result<Option<Sale>, Error> {
        self.sale_repo
            .find_for_user(id, user)
            .await
            .map_err(|err| map_repository_error("get_sale_by_id", err))
    }
}

#[cfg(test)]
#[path = "sale_service_tests.rs"]
mod tests;
