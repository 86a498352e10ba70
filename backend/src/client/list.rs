//! View models for the sale list.

use crate::domain::SaleId;

use super::optimistic::{RowState, SaleRow};

pub const EMPTY_STATE_TITLE: &str = "No sale";
pub const EMPTY_STATE_DESCRIPTION: &str = "Get started by creating a new sale.";

/// One rendered list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRowView {
    pub id: Option<SaleId>,
    pub total_text: String,
    /// Awaiting create or update confirmation.
    pub pending: bool,
    /// Awaiting delete confirmation.
    pub deleting: bool,
    /// Whether the edit action is enabled. Only confirmed rows can be edited.
    pub editable: bool,
}

impl From<&SaleRow> for SaleRowView {
    fn from(row: &SaleRow) -> Self {
        Self {
            id: row.id.clone(),
            total_text: row.total.to_string(),
            pending: matches!(row.state, RowState::PendingCreate | RowState::PendingUpdate),
            deleting: row.state == RowState::PendingDelete,
            editable: !row.state.is_pending(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleListView {
    Empty {
        title: &'static str,
        description: &'static str,
    },
    Rows(Vec<SaleRowView>),
}

/// Render visible rows, falling back to the empty state.
pub fn render(rows: &[SaleRow]) -> SaleListView {
    if rows.is_empty() {
        return SaleListView::Empty {
            title: EMPTY_STATE_TITLE,
            description: EMPTY_STATE_DESCRIPTION,
        };
    }
    SaleListView::Rows(rows.iter().map(SaleRowView::from).collect())
}
