//! Internal Diesel row structs. Never exposed outside the persistence layer.

use diesel::prelude::*;

use crate::domain::{Sale, SaleId, UserId};

use super::schema::sale;

/// Row read back from the `sale` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sale)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SaleRow {
    pub id: String,
    pub total: i32,
    pub user_id: String,
}

impl TryFrom<SaleRow> for Sale {
    type Error = String;

    fn try_from(row: SaleRow) -> Result<Self, Self::Error> {
        let id = SaleId::new(row.id).map_err(|err| format!("stored sale id: {err}"))?;
        let user_id =
            UserId::new(row.user_id).map_err(|err| format!("stored sale owner: {err}"))?;
        Ok(Self {
            id,
            total: row.total,
            user_id,
        })
    }
}

/// Insertable form of a new sale.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sale)]
pub(crate) struct NewSaleRow<'a> {
    pub id: &'a str,
    pub total: i32,
    pub user_id: &'a str,
}

impl<'a> From<&'a Sale> for NewSaleRow<'a> {
    fn from(value: &'a Sale) -> Self {
        Self {
            id: value.id.as_ref(),
            total: value.total,
            user_id: value.user_id.as_ref(),
        }
    }
}

/// Mutable columns written by an update. `id` and `user_id` are excluded.
#[derive(Debug, Clone, Copy, AsChangeset)]
#[diesel(table_name = sale)]
pub(crate) struct SaleUpdate {
    pub total: i32,
}
