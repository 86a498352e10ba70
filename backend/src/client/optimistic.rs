//! Optimistic view of the sale listing.
//!
//! [`OptimisticSales`] keeps the last server-confirmed listing and an ordered
//! queue of in-flight mutations. The visible rows are recomputed by folding
//! the queue over the confirmed listing, so nothing is ever patched in place
//! and transitional rows are marked by [`RowState`] rather than by fake ids.
//!
//! A mutation moves through three steps:
//!
//! 1. [`OptimisticSales::apply`] queues it and returns a [`MutationTicket`].
//! 2. On success [`OptimisticSales::settle`] marks it done; the provisional
//!    row stays visible until the refreshed listing arrives. On failure
//!    [`OptimisticSales::discard`] rolls it back immediately.
//! 3. [`OptimisticSales::rebase`] installs the refreshed listing and drops
//!    every settled mutation.

use crate::domain::sale_schema::NewSaleParams;
use crate::domain::{Sale, SaleId, UserId};

/// Handle for one queued mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MutationTicket(u64);

impl MutationTicket {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A mutation awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingOperation {
    Create { values: NewSaleParams },
    Update { id: SaleId, values: NewSaleParams },
    Delete { id: SaleId },
}

/// Where a visible row stands relative to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Confirmed,
    PendingCreate,
    PendingUpdate,
    PendingDelete,
}

impl RowState {
    pub fn is_pending(self) -> bool {
        !matches!(self, Self::Confirmed)
    }
}

/// One visible row. Rows awaiting creation have no id or owner yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRow {
    pub id: Option<SaleId>,
    pub total: i32,
    pub user_id: Option<UserId>,
    pub state: RowState,
}

impl SaleRow {
    fn confirmed(sale: &Sale) -> Self {
        Self {
            id: Some(sale.id.clone()),
            total: sale.total,
            user_id: Some(sale.user_id.clone()),
            state: RowState::Confirmed,
        }
    }

    /// The row as a stored sale, when it has an id and an owner.
    pub fn as_sale(&self) -> Option<Sale> {
        Some(Sale {
            id: self.id.clone()?,
            total: self.total,
            user_id: self.user_id.clone()?,
        })
    }
}

#[derive(Debug, Clone)]
struct PendingEntry {
    ticket: MutationTicket,
    operation: PendingOperation,
    settled: bool,
}

/// Confirmed listing plus queued mutations.
#[derive(Debug, Clone, Default)]
pub struct OptimisticSales {
    confirmed: Vec<Sale>,
    pending: Vec<PendingEntry>,
    next_ticket: u64,
}

impl OptimisticSales {
    pub fn new(confirmed: Vec<Sale>) -> Self {
        Self {
            confirmed,
            ..Self::default()
        }
    }

    pub fn confirmed(&self) -> &[Sale] {
        &self.confirmed
    }

    /// Queue `operation` and return its ticket.
    pub fn apply(&mut self, operation: PendingOperation) -> MutationTicket {
        let ticket = MutationTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.pending.push(PendingEntry {
            ticket,
            operation,
            settled: false,
        });
        ticket
    }

    /// Visible rows: the confirmed listing with every queued mutation folded
    /// over it in order.
    ///
    /// # Examples
    /// ```
    /// use sales_backend::client::{OptimisticSales, PendingOperation, RowState};
    /// use sales_backend::domain::sale_schema::NewSaleParams;
    ///
    /// let mut sales = OptimisticSales::default();
    /// sales.apply(PendingOperation::Create { values: NewSaleParams { total: 5 } });
    /// let rows = sales.rows();
    /// assert_eq!(rows.len(), 1);
    /// assert_eq!(rows[0].state, RowState::PendingCreate);
    /// ```
    pub fn rows(&self) -> Vec<SaleRow> {
        let mut rows: Vec<SaleRow> = self.confirmed.iter().map(SaleRow::confirmed).collect();
        for entry in &self.pending {
            fold(&mut rows, &entry.operation);
        }
        rows
    }

    /// Mark a mutation as confirmed by the server. Returns `false` for an
    /// unknown ticket.
    pub fn settle(&mut self, ticket: MutationTicket) -> bool {
        match self.pending.iter_mut().find(|entry| entry.ticket == ticket) {
            Some(entry) => {
                entry.settled = true;
                true
            }
            None => false,
        }
    }

    /// Roll back a mutation the server rejected.
    pub fn discard(&mut self, ticket: MutationTicket) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.ticket != ticket);
        self.pending.len() != before
    }

    /// Install a refreshed listing and forget settled mutations.
    pub fn rebase(&mut self, confirmed: Vec<Sale>) {
        self.confirmed = confirmed;
        self.pending.retain(|entry| !entry.settled);
    }

    /// Whether any mutation still awaits a server answer.
    pub fn has_unsettled(&self) -> bool {
        self.pending.iter().any(|entry| !entry.settled)
    }
}

fn fold(rows: &mut Vec<SaleRow>, operation: &PendingOperation) {
    match operation {
        PendingOperation::Create { values } => rows.push(SaleRow {
            id: None,
            total: values.total,
            user_id: None,
            state: RowState::PendingCreate,
        }),
        PendingOperation::Update { id, values } => {
            if let Some(row) = find_row(rows, id) {
                row.total = values.total;
                if row.state != RowState::PendingDelete {
                    row.state = RowState::PendingUpdate;
                }
            }
        }
        PendingOperation::Delete { id } => {
            if let Some(row) = find_row(rows, id) {
                row.state = RowState::PendingDelete;
            }
        }
    }
}

fn find_row<'a>(rows: &'a mut [SaleRow], id: &SaleId) -> Option<&'a mut SaleRow> {
    rows.iter_mut().find(|row| row.id.as_ref() == Some(id))
}
