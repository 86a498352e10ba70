//! Headless client state for the sale screen.
//!
//! Nothing here renders. [`optimistic`] folds pending mutations over the last
//! confirmed listing, [`form`] drives the create/edit modal through a
//! [`SaleBackend`], and [`list`] turns rows into view models.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Sale, SaleId};

pub mod form;
pub mod list;
pub mod optimistic;

pub use form::{FormAction, FormError, FormPhase, SaleForm, Submission, Toast, ToastVariant};
pub use list::{EMPTY_STATE_DESCRIPTION, EMPTY_STATE_TITLE, SaleListView, SaleRowView, render};
pub use optimistic::{MutationTicket, OptimisticSales, PendingOperation, RowState, SaleRow};

/// Server round trips the form depends on.
///
/// Mutations follow server-action semantics: `None` on success and
/// `Some(message)` on failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SaleBackend: Send + Sync {
    async fn create(&self, values: &Value) -> Option<String>;

    /// `values` carries the sale `id` alongside the edited fields.
    async fn update(&self, values: &Value) -> Option<String>;

    async fn delete(&self, id: &SaleId) -> Option<String>;

    /// Fresh confirmed listing, used after a successful mutation.
    async fn list(&self) -> Result<Vec<Sale>, String>;
}
