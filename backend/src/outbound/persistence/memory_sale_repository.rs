//! Process-local [`SaleRepository`] used when no database is configured.
//!
//! Rows keep insertion order so listings are stable across requests. The
//! lock is held only for the duration of one operation, which gives the same
//! single-statement atomicity the PostgreSQL adapter has.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{SaleRepository, SaleRepositoryError};
use crate::domain::{Sale, SaleChanges, SaleId, UserId};

/// In-memory sale storage.
#[derive(Debug, Default)]
pub struct InMemorySaleRepository {
    rows: Mutex<Vec<Sale>>,
}

impl InMemorySaleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> Result<MutexGuard<'_, Vec<Sale>>, SaleRepositoryError> {
        self.rows
            .lock()
            .map_err(|_| SaleRepositoryError::connection("in-memory sale store is poisoned"))
    }
}

fn owned_by(row: &Sale, id: &SaleId, owner: &UserId) -> bool {
    row.id == *id && row.user_id == *owner
}

#[async_trait]
impl SaleRepository for InMemorySaleRepository {
    async fn insert(&self, sale: &Sale) -> Result<Sale, SaleRepositoryError> {
        let mut rows = self.rows()?;
        if rows.iter().any(|row| row.id == sale.id) {
            return Err(SaleRepositoryError::query("sale id already exists"));
        }
        rows.push(sale.clone());
        Ok(sale.clone())
    }

    async fn update(
        &self,
        id: &SaleId,
        owner: &UserId,
        changes: &SaleChanges,
    ) -> Result<Option<Sale>, SaleRepositoryError> {
        let mut rows = self.rows()?;
        Ok(rows.iter_mut().find(|row| owned_by(row, id, owner)).map(|row| {
            *row = row.with_changes(changes);
            row.clone()
        }))
    }

    async fn delete(
        &self,
        id: &SaleId,
        owner: &UserId,
    ) -> Result<Option<Sale>, SaleRepositoryError> {
        let mut rows = self.rows()?;
        Ok(rows
            .iter()
            .position(|row| owned_by(row, id, owner))
            .map(|index| rows.remove(index)))
    }

    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<Sale>, SaleRepositoryError> {
        let rows = self.rows()?;
        Ok(rows
            .iter()
            .filter(|row| &row.user_id == owner)
            .cloned()
            .collect())
    }

    async fn find_for_user(
        &self,
        id: &SaleId,
        owner: &UserId,
    ) -> Result<Option<Sale>, SaleRepositoryError> {
        let rows = self.rows()?;
        Ok(rows
            .iter()
            .find(|row| owned_by(row, id, owner))
            .cloned())
    }
}
