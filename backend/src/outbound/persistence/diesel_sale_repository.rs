//! PostgreSQL-backed [`SaleRepository`].
//!
//! Each operation is one statement. Update and delete use `RETURNING` so the
//! affected row comes back without a second round trip, and every filter
//! includes the owner.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SaleRepository, SaleRepositoryError};
use crate::domain::{Sale, SaleChanges, SaleId, UserId};

use super::diesel_error_mapping::{map_corrupt_row, map_diesel_error, map_pool_error};
use super::models::{NewSaleRow, SaleRow, SaleUpdate};
use super::pool::DbPool;
use super::schema::sale;

/// Diesel implementation of the sale repository port.
#[derive(Clone)]
pub struct DieselSaleRepository {
    pool: DbPool,
}

impl DieselSaleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_domain(row: SaleRow) -> Result<Sale, SaleRepositoryError> {
    Sale::try_from(row).map_err(map_corrupt_row)
}

fn to_domain_opt(row: Option<SaleRow>) -> Result<Option<Sale>, SaleRepositoryError> {
    row.map(to_domain).transpose()
}

#[async_trait]
impl SaleRepository for DieselSaleRepository {
    async fn insert(&self, new_sale: &Sale) -> Result<Sale, SaleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(sale::table)
            .values(NewSaleRow::from(new_sale))
            .returning(SaleRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_domain(row)
    }

    async fn update(
        &self,
        id: &SaleId,
        owner: &UserId,
        changes: &SaleChanges,
    ) -> Result<Option<Sale>, SaleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(
            sale::table
                .filter(sale::id.eq(id.as_ref()))
                .filter(sale::user_id.eq(owner.as_ref())),
        )
        .set(SaleUpdate {
            total: changes.total,
        })
        .returning(SaleRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        to_domain_opt(row)
    }

    async fn delete(
        &self,
        id: &SaleId,
        owner: &UserId,
    ) -> Result<Option<Sale>, SaleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::delete(
            sale::table
                .filter(sale::id.eq(id.as_ref()))
                .filter(sale::user_id.eq(owner.as_ref())),
        )
        .returning(SaleRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        to_domain_opt(row)
    }

    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<Sale>, SaleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SaleRow> = sale::table
            .filter(sale::user_id.eq(owner.as_ref()))
            .select(SaleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_domain).collect()
    }

    async fn find_for_user(
        &self,
        id: &SaleId,
        owner: &UserId,
    ) -> Result<Option<Sale>, SaleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = sale::table
            .filter(sale::id.eq(id.as_ref()))
            .filter(sale::user_id.eq(owner.as_ref()))
            .select(SaleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        to_domain_opt(row)
    }
}
