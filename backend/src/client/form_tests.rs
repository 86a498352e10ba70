//! Tests for the sale form state machine.

use super::*;
use crate::client::MockSaleBackend;
use crate::domain::UserId;
use rstest::{fixture, rstest};

fn sale(id: &str, total: i32) -> Sale {
    Sale {
        id: SaleId::new(id).expect("valid id"),
        total,
        user_id: UserId::new("owner").expect("valid user"),
    }
}

fn id(raw: &str) -> SaleId {
    SaleId::new(raw).expect("valid id")
}

#[fixture]
fn backend() -> MockSaleBackend {
    MockSaleBackend::new()
}

fn form(backend: MockSaleBackend, confirmed: Vec<Sale>) -> SaleForm {
    SaleForm::new(Arc::new(backend), confirmed)
}

#[rstest]
#[tokio::test]
async fn successful_create_refreshes_and_toasts(mut backend: MockSaleBackend) {
    backend
        .expect_create()
        .withf(|values| values == &json!({ "total": 5 }))
        .times(1)
        .returning(|_| None);
    backend
        .expect_list()
        .times(1)
        .returning(|| Ok(vec![sale("new", 5)]));
    let mut form = form(backend, Vec::new());
    form.open_create();

    let toast = form
        .submit(json!({ "total": "5" }))
        .await
        .expect("submission accepted");

    assert_eq!(
        toast,
        Toast {
            title: "Success".into(),
            description: "Sale created!".into(),
            variant: ToastVariant::Default,
        }
    );
    assert_eq!(form.phase(), FormPhase::Settled(FormAction::Create));
    assert!(!form.is_modal_open());
    let rows = form.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.first().map(|row| row.state), Some(RowState::Confirmed));
}

#[rstest]
#[tokio::test]
async fn invalid_input_sends_nothing(mut backend: MockSaleBackend) {
    backend.expect_create().never();
    let mut form = form(backend, Vec::new());
    form.open_create();

    let err = form
        .submit(json!({ "total": "" }))
        .await
        .expect_err("blank total");

    assert!(matches!(err, FormError::Invalid(_)));
    assert_eq!(
        form.field_errors().get("total"),
        Some(&vec!["Required".to_owned()])
    );
    assert!(form.is_modal_open());
    assert_eq!(form.phase(), FormPhase::Idle);
    assert!(form.rows().is_empty());
}

#[rstest]
fn rejected_edit_keeps_what_was_typed(backend: MockSaleBackend) {
    let mut form = form(backend, vec![sale("s-1", 4)]);
    form.open_edit(&id("s-1")).expect("confirmed row");

    form.begin_submit(json!({ "total": "four" }))
        .expect_err("non-numeric total");

    assert_eq!(form.values().get("total"), Some(&json!("four")));
    assert!(form.is_modal_open());
    assert_eq!(form.rows().first().map(|row| row.total), Some(4));
}

#[rstest]
#[tokio::test]
async fn failed_create_rolls_back_and_reopens(mut backend: MockSaleBackend) {
    backend
        .expect_create()
        .returning(|_| Some("sale storage is unavailable".to_owned()));
    backend.expect_list().never();
    let mut form = form(backend, Vec::new());
    form.open_create();

    let toast = form
        .submit(json!({ "total": "12" }))
        .await
        .expect("submission accepted");

    assert_eq!(toast.title, "Failed to create");
    assert_eq!(toast.description, "sale storage is unavailable");
    assert_eq!(toast.variant, ToastVariant::Destructive);
    assert!(form.is_modal_open());
    assert_eq!(form.values().get("total"), Some(&json!("12")));
    assert!(form.rows().is_empty());
}

#[rstest]
fn empty_failure_message_falls_back() {
    let toast = Toast::failure(FormAction::Update, "");
    assert_eq!(toast.description, "Error");
    assert_eq!(toast.title, "Failed to update");
}

#[rstest]
fn second_submission_while_pending_is_rejected(backend: MockSaleBackend) {
    let mut form = form(backend, Vec::new());
    form.open_create();
    let first = form
        .begin_submit(json!({ "total": 1 }))
        .expect("first submission");

    let err = form
        .begin_submit(json!({ "total": 2 }))
        .expect_err("busy");

    assert!(matches!(err, FormError::Busy));
    assert_eq!(form.phase(), FormPhase::Pending(first.action()));
    let rows = form.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.first().map(|row| row.state), Some(RowState::PendingCreate));
}

#[rstest]
#[tokio::test]
async fn editing_sends_the_row_id(mut backend: MockSaleBackend) {
    backend
        .expect_update()
        .withf(|values| values == &json!({ "id": "s-1", "total": 9 }))
        .times(1)
        .returning(|_| None);
    backend
        .expect_list()
        .returning(|| Ok(vec![sale("s-1", 9)]));
    let mut form = form(backend, vec![sale("s-1", 4)]);
    form.open_edit(&id("s-1")).expect("confirmed row");
    assert_eq!(form.modal_title(), "Edit Sale");
    assert_eq!(form.values().get("total"), Some(&json!(4)));

    let toast = form
        .submit(json!({ "id": "s-1", "total": "9" }))
        .await
        .expect("submission accepted");

    assert_eq!(toast.description, "Sale updated!");
    assert!(form.editing().is_none());
    assert_eq!(form.rows().first().map(|row| row.total), Some(9));
}

#[rstest]
fn pending_rows_cannot_be_edited(backend: MockSaleBackend) {
    let mut form = form(backend, vec![sale("s-1", 4)]);
    form.open_edit(&id("s-1")).expect("confirmed row");
    form.begin_submit(json!({ "total": 5 }))
        .expect("update queued");

    let err = form.open_edit(&id("s-1")).expect_err("row pending");
    assert!(matches!(err, FormError::RowPending(_)));
    let err = form.open_edit(&id("nope")).expect_err("unknown row");
    assert!(matches!(err, FormError::UnknownSale(_)));
}

#[rstest]
#[tokio::test]
async fn delete_marks_row_then_confirms(mut backend: MockSaleBackend) {
    backend
        .expect_delete()
        .withf(|sale_id| sale_id.as_ref() == "s-1")
        .times(1)
        .returning(|_| None);
    backend.expect_list().returning(|| Ok(Vec::new()));
    let mut form = form(backend, vec![sale("s-1", 4)]);
    form.open_edit(&id("s-1")).expect("confirmed row");

    let submission = form.begin_delete().expect("delete queued");
    assert_eq!(
        form.rows().first().map(|row| row.state),
        Some(RowState::PendingDelete)
    );
    assert!(!form.is_modal_open());

    let error = form.send(&submission).await;
    let toast = form.finish(submission, error).await;
    assert_eq!(toast.description, "Sale deleted!");
    assert!(form.rows().is_empty());
}

#[rstest]
#[tokio::test]
async fn failed_delete_restores_row_and_values(mut backend: MockSaleBackend) {
    backend
        .expect_delete()
        .returning(|_| Some("Error, please try again.".to_owned()));
    let mut form = form(backend, vec![sale("s-1", 4)]);
    form.open_edit(&id("s-1")).expect("confirmed row");

    let toast = form.delete().await.expect("delete queued");

    assert_eq!(toast.title, "Failed to delete");
    assert!(form.is_modal_open());
    assert_eq!(form.values().get("id"), Some(&json!("s-1")));
    assert_eq!(
        form.rows().first().map(|row| row.state),
        Some(RowState::Confirmed)
    );
}

#[rstest]
fn delete_needs_an_open_sale(backend: MockSaleBackend) {
    let mut form = form(backend, Vec::new());
    form.open_create();
    assert_eq!(form.modal_title(), "Create Sale");
    assert!(matches!(form.begin_delete(), Err(FormError::NotEditing)));
}

#[rstest]
#[tokio::test]
async fn refresh_failure_keeps_provisional_row(mut backend: MockSaleBackend) {
    backend.expect_create().returning(|_| None);
    backend
        .expect_list()
        .returning(|| Err("listing unavailable".to_owned()));
    let mut form = form(backend, Vec::new());
    form.open_create();

    let toast = form
        .submit(json!({ "total": 3 }))
        .await
        .expect("submission accepted");

    assert_eq!(toast.variant, ToastVariant::Default);
    assert_eq!(
        form.rows().first().map(|row| row.state),
        Some(RowState::PendingCreate)
    );
}
