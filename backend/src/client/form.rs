//! Create/edit modal state machine.
//!
//! [`SaleForm`] owns the optimistic listing and walks each mutation through
//! `Idle -> Pending -> Settled`. Submissions are split into
//! [`SaleForm::begin_submit`], [`SaleForm::send`] and [`SaleForm::finish`] so
//! a caller can render the pending state while the round trip runs;
//! [`SaleForm::submit`] chains the three.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::sale_schema::{ValidationError, insert_sale_params};
use crate::domain::{Sale, SaleId};

use super::SaleBackend;
use super::list::{SaleListView, render};
use super::optimistic::{MutationTicket, OptimisticSales, PendingOperation, RowState, SaleRow};

const FALLBACK_FAILURE_DESCRIPTION: &str = "Error";

/// Mutation kinds the form can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Create,
    Update,
    Delete,
}

impl FormAction {
    pub fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// Notification emitted when a mutation settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    fn success(action: FormAction) -> Self {
        Self {
            title: "Success".to_owned(),
            description: format!("Sale {}d!", action.verb()),
            variant: ToastVariant::Default,
        }
    }

    fn failure(action: FormAction, message: &str) -> Self {
        let description = if message.is_empty() {
            FALLBACK_FAILURE_DESCRIPTION
        } else {
            message
        };
        Self {
            title: format!("Failed to {}", action.verb()),
            description: description.to_owned(),
            variant: ToastVariant::Destructive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Pending(FormAction),
    Settled(FormAction),
}

/// Reasons a submission is refused before anything is sent.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("another sale mutation is still pending")]
    Busy,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("sale {0} is not in the list")]
    UnknownSale(SaleId),
    #[error("sale {0} has a pending mutation")]
    RowPending(SaleId),
    #[error("no sale is open for editing")]
    NotEditing,
}

#[derive(Debug, Clone, PartialEq)]
enum Payload {
    Create(Value),
    Update(Value),
    Delete(SaleId),
}

/// A mutation that has been applied optimistically and awaits its answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    action: FormAction,
    ticket: MutationTicket,
    payload: Payload,
}

impl Submission {
    pub fn action(&self) -> FormAction {
        self.action
    }

    pub fn ticket(&self) -> MutationTicket {
        self.ticket
    }
}

/// Modal form plus the optimistic listing it mutates.
pub struct SaleForm {
    backend: Arc<dyn SaleBackend>,
    sales: OptimisticSales,
    phase: FormPhase,
    modal_open: bool,
    editing: Option<Sale>,
    values: Map<String, Value>,
    field_errors: BTreeMap<String, Vec<String>>,
    form_errors: Vec<String>,
}

impl SaleForm {
    pub fn new(backend: Arc<dyn SaleBackend>, confirmed: Vec<Sale>) -> Self {
        Self {
            backend,
            sales: OptimisticSales::new(confirmed),
            phase: FormPhase::Idle,
            modal_open: false,
            editing: None,
            values: Map::new(),
            field_errors: BTreeMap::new(),
            form_errors: Vec::new(),
        }
    }

    pub fn rows(&self) -> Vec<SaleRow> {
        self.sales.rows()
    }

    pub fn view(&self) -> SaleListView {
        render(&self.rows())
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn modal_title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Sale"
        } else {
            "Create Sale"
        }
    }

    pub fn editing(&self) -> Option<&Sale> {
        self.editing.as_ref()
    }

    /// Values shown in the modal's inputs.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn field_errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.field_errors
    }

    /// Errors about the submission as a whole rather than one input.
    pub fn form_errors(&self) -> &[String] {
        &self.form_errors
    }

    pub fn open_create(&mut self) {
        self.editing = None;
        self.values.clear();
        self.clear_errors();
        self.modal_open = true;
    }

    /// Open the modal on a confirmed row.
    pub fn open_edit(&mut self, id: &SaleId) -> Result<(), FormError> {
        let row = self
            .sales
            .rows()
            .into_iter()
            .find(|row| row.id.as_ref() == Some(id))
            .ok_or_else(|| FormError::UnknownSale(id.clone()))?;
        if row.state != RowState::Confirmed {
            return Err(FormError::RowPending(id.clone()));
        }
        let sale = row
            .as_sale()
            .ok_or_else(|| FormError::UnknownSale(id.clone()))?;
        self.values = sale_values(&sale);
        self.editing = Some(sale);
        self.clear_errors();
        self.modal_open = true;
        Ok(())
    }

    pub fn close(&mut self) {
        self.modal_open = false;
    }

    /// Validate `input`, close the modal and apply the create or update
    /// optimistically.
    ///
    /// The entered object always becomes [`Self::values`]. Validation
    /// failures populate [`Self::field_errors`] and leave the modal open;
    /// nothing is queued.
    pub fn begin_submit(&mut self, input: Value) -> Result<Submission, FormError> {
        self.ensure_idle()?;
        self.clear_errors();
        let validated = insert_sale_params(&input);
        if let Value::Object(entered) = input {
            self.values = entered;
        }
        let params = match validated {
            Ok(params) => params,
            Err(err) => {
                self.field_errors = err.field_errors();
                self.form_errors = err.form_errors();
                return Err(err.into());
            }
        };
        self.modal_open = false;

        let (action, operation, payload) = match &self.editing {
            Some(sale) => (
                FormAction::Update,
                PendingOperation::Update {
                    id: sale.id.clone(),
                    values: params,
                },
                Payload::Update(json!({ "id": sale.id, "total": params.total })),
            ),
            None => (
                FormAction::Create,
                PendingOperation::Create { values: params },
                Payload::Create(json!({ "total": params.total })),
            ),
        };
        Ok(self.start(action, operation, payload))
    }

    /// Close the modal and mark the edited sale for deletion.
    pub fn begin_delete(&mut self) -> Result<Submission, FormError> {
        self.ensure_idle()?;
        let id = self
            .editing
            .as_ref()
            .map(|sale| sale.id.clone())
            .ok_or(FormError::NotEditing)?;
        self.modal_open = false;
        Ok(self.start(
            FormAction::Delete,
            PendingOperation::Delete { id: id.clone() },
            Payload::Delete(id),
        ))
    }

    /// Run the backend call for `submission`.
    pub async fn send(&self, submission: &Submission) -> Option<String> {
        match &submission.payload {
            Payload::Create(values) => self.backend.create(values).await,
            Payload::Update(values) => self.backend.update(values).await,
            Payload::Delete(id) => self.backend.delete(id).await,
        }
    }

    /// Settle `submission` with the backend's answer.
    ///
    /// Success refreshes the confirmed listing and resets the form. Failure
    /// rolls the optimistic change back and reopens the modal with what the
    /// user entered.
    pub async fn finish(&mut self, submission: Submission, error: Option<String>) -> Toast {
        let action = submission.action;
        self.phase = FormPhase::Settled(action);
        if let Some(message) = error {
            self.sales.discard(submission.ticket);
            if action == FormAction::Delete {
                if let Some(sale) = &self.editing {
                    self.values = sale_values(sale);
                }
            }
            self.modal_open = true;
            debug!(action = action.verb(), "sale mutation failed");
            return Toast::failure(action, &message);
        }

        self.sales.settle(submission.ticket);
        match self.backend.list().await {
            Ok(confirmed) => self.sales.rebase(confirmed),
            Err(message) => warn!(error = %message, "sale listing refresh failed"),
        }
        self.editing = None;
        self.values.clear();
        Toast::success(action)
    }

    pub async fn submit(&mut self, input: Value) -> Result<Toast, FormError> {
        let submission = self.begin_submit(input)?;
        let error = self.send(&submission).await;
        Ok(self.finish(submission, error).await)
    }

    pub async fn delete(&mut self) -> Result<Toast, FormError> {
        let submission = self.begin_delete()?;
        let error = self.send(&submission).await;
        Ok(self.finish(submission, error).await)
    }

    fn clear_errors(&mut self) {
        self.field_errors.clear();
        self.form_errors.clear();
    }

    fn ensure_idle(&self) -> Result<(), FormError> {
        match self.phase {
            FormPhase::Pending(_) => Err(FormError::Busy),
            FormPhase::Idle | FormPhase::Settled(_) => Ok(()),
        }
    }

    fn start(
        &mut self,
        action: FormAction,
        operation: PendingOperation,
        payload: Payload,
    ) -> Submission {
        let ticket = self.sales.apply(operation);
        self.phase = FormPhase::Pending(action);
        Submission {
            action,
            ticket,
            payload,
        }
    }
}

fn sale_values(sale: &Sale) -> Map<String, Value> {
    let mut values = Map::new();
    values.insert("id".to_owned(), Value::String(sale.id.to_string()));
    values.insert("total".to_owned(), Value::from(sale.total));
    values
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
