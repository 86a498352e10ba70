//! Server actions for the sale form.
//!
//! Actions mirror the HTTP mutations but report failure as a plain message:
//! `None` means success, `Some(message)` is what the form shows. Every
//! successful mutation revalidates the `/sale` listing.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::client::SaleBackend;
use crate::domain::ports::{ListingRevalidation, SALE_LISTING_PATH, SaleCommand, SaleQuery};
use crate::domain::sale_schema::{insert_sale_params, parse_sale_id, update_sale_params};
use crate::domain::{Error, GENERIC_ERROR_MESSAGE, Sale, SaleId, UserId};
use crate::inbound::http::state::HttpState;

/// Flatten an error into the message an action returns.
fn action_message(err: &Error) -> String {
    let message = err.message().trim();
    if message.is_empty() {
        GENERIC_ERROR_MESSAGE.to_owned()
    } else {
        message.to_owned()
    }
}

/// Validating, revalidating wrappers around [`SaleCommand`].
#[derive(Clone)]
pub struct SaleActions {
    sales: Arc<dyn SaleCommand>,
    revalidation: Arc<dyn ListingRevalidation>,
}

impl SaleActions {
    pub fn new(sales: Arc<dyn SaleCommand>, revalidation: Arc<dyn ListingRevalidation>) -> Self {
        Self {
            sales,
            revalidation,
        }
    }

    pub fn from_state(state: &HttpState) -> Self {
        Self::new(Arc::clone(&state.sales), Arc::clone(&state.revalidation))
    }

    pub async fn create_sale_action(&self, user: &UserId, input: &Value) -> Option<String> {
        let outcome = self.create(user, input).await;
        self.conclude("create", outcome)
    }

    /// `input` must carry the sale `id`; it selects the row to update.
    pub async fn update_sale_action(&self, user: &UserId, input: &Value) -> Option<String> {
        let outcome = self.update(user, input).await;
        self.conclude("update", outcome)
    }

    pub async fn delete_sale_action(&self, user: &UserId, id: &str) -> Option<String> {
        let outcome = self.delete(user, id).await;
        self.conclude("delete", outcome)
    }

    async fn create(&self, user: &UserId, input: &Value) -> Result<(), Error> {
        let params = insert_sale_params(input)?;
        self.sales.create_sale(user, params).await?;
        Ok(())
    }

    async fn update(&self, user: &UserId, input: &Value) -> Result<(), Error> {
        let params = update_sale_params(input)?;
        let id = params.id.clone();
        self.sales.update_sale(user, &id, params).await?;
        Ok(())
    }

    async fn delete(&self, user: &UserId, id: &str) -> Result<(), Error> {
        let id = parse_sale_id(Some(id))?;
        self.sales.delete_sale(user, &id).await?;
        Ok(())
    }

    fn conclude(&self, action: &'static str, outcome: Result<(), Error>) -> Option<String> {
        match outcome {
            Ok(()) => {
                self.revalidation.revalidate(SALE_LISTING_PATH);
                None
            }
            Err(err) => {
                warn!(action, code = ?err.code(), error = %err, "sale action failed");
                Some(action_message(&err))
            }
        }
    }
}

/// [`SaleBackend`] bound to one signed-in user.
///
/// Lets the headless form drive the server actions in-process.
#[derive(Clone)]
pub struct UserSaleBackend {
    actions: SaleActions,
    query: Arc<dyn SaleQuery>,
    user: UserId,
}

impl UserSaleBackend {
    pub fn new(actions: SaleActions, query: Arc<dyn SaleQuery>, user: UserId) -> Self {
        Self {
            actions,
            query,
            user,
        }
    }

    pub fn from_state(state: &HttpState, user: UserId) -> Self {
        Self::new(
            SaleActions::from_state(state),
            Arc::clone(&state.sales_query),
            user,
        )
    }
}

#[async_trait]
impl SaleBackend for UserSaleBackend {
    async fn create(&self, values: &Value) -> Option<String> {
        self.actions.create_sale_action(&self.user, values).await
    }

    async fn update(&self, values: &Value) -> Option<String> {
        self.actions.update_sale_action(&self.user, values).await
    }

    async fn delete(&self, id: &SaleId) -> Option<String> {
        self.actions.delete_sale_action(&self.user, id.as_ref()).await
    }

    async fn list(&self) -> Result<Vec<Sale>, String> {
        self.query
            .get_sales(&self.user)
            .await
            .map_err(|err| action_message(&err))
    }
}
