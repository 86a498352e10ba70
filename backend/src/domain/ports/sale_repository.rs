//! Driven port for sale persistence.
//!
//! Every read and mutation is scoped to an owner: adapters must filter on
//! `id AND user_id` so a caller can never observe or modify another user's
//! rows. Each mutation maps to a single statement returning the affected row.

use async_trait::async_trait;

use crate::domain::{Sale, SaleChanges, SaleId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by sale repository adapters.
    pub enum SaleRepositoryError {
        /// A connection could not be checked out or established.
        Connection { message: String } =>
            "sale repository connection failed: {message}",
        /// The statement failed during execution.
        Query { message: String } =>
            "sale repository query failed: {message}",
    }
}

/// Owner-scoped storage for [`Sale`] rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// Insert `sale` and return the stored row.
    async fn insert(&self, sale: &Sale) -> Result<Sale, SaleRepositoryError>;

    /// Apply `changes` to the row matching `id` and `owner`.
    ///
    /// Returns `None` when no row matched.
    async fn update(
        &self,
        id: &SaleId,
        owner: &UserId,
        changes: &SaleChanges,
    ) -> Result<Option<Sale>, SaleRepositoryError>;

    /// Delete the row matching `id` and `owner`, returning it.
    ///
    /// Returns `None` when no row matched.
    async fn delete(&self, id: &SaleId, owner: &UserId)
    -> Result<Option<Sale>, SaleRepositoryError>;

    /// All rows owned by `owner`.
    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<Sale>, SaleRepositoryError>;

    /// The row matching `id` and `owner`, if any.
    async fn find_for_user(
        &self,
        id: &SaleId,
        owner: &UserId,
    ) -> Result<Option<Sale>, SaleRepositoryError>;
}

/// Stateless repository for tests that do not exercise storage.
///
/// Inserts echo the given row; every lookup misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSaleRepository;

#[async_trait]
impl SaleRepository for FixtureSaleRepository {
    async fn insert(&self, sale: &Sale) -> Result<Sale, SaleRepositoryError> {
        Ok(sale.clone())
    }

    async fn update(
        &self,
        _id: &SaleId,
        _owner: &UserId,
        _changes: &SaleChanges,
    ) -> Result<Option<Sale>, SaleRepositoryError> {
        Ok(None)
    }

    async fn delete(
        &self,
        _id: &SaleId,
        _owner: &UserId,
    ) -> Result<Option<Sale>, SaleRepositoryError> {
        Ok(None)
    }

    async fn list_for_user(&self, _owner: &UserId) -> Result<Vec<Sale>, SaleRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_for_user(
        &self,
        _id: &SaleId,
        _owner: &UserId,
    ) -> Result<Option<Sale>, SaleRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn owner() -> UserId {
        UserId::new("owner-1").expect("valid user id")
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_insert_echoes_row(owner: UserId) {
        let sale = Sale::create(owner, 12);
        let stored = FixtureSaleRepository
            .insert(&sale)
            .await
            .expect("fixture insert");
        assert_eq!(stored, sale);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_lookups_miss(owner: UserId) {
        let id = SaleId::generate();
        let repo = FixtureSaleRepository;
        assert!(repo.list_for_user(&owner).await.expect("list").is_empty());
        assert!(repo.find_for_user(&id, &owner).await.expect("find").is_none());
        assert!(repo.delete(&id, &owner).await.expect("delete").is_none());
        assert!(
            repo.update(&id, &owner, &SaleChanges { total: 1 })
                .await
                .expect("update")
                .is_none()
        );
    }

    #[rstest]
    fn errors_render_context() {
        let err = SaleRepositoryError::connection("pool timed out");
        assert_eq!(
            err.to_string(),
            "sale repository connection failed: pool timed out"
        );
    }
}
