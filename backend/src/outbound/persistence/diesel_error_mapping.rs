//! Translation of pool and Diesel failures into [`SaleRepositoryError`].
//!
//! Driver messages can carry hostnames or SQL fragments, so they are logged
//! at debug level here and replaced by fixed text in the returned error.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::SaleRepositoryError;

use super::pool::PoolError;

pub(crate) fn map_pool_error(error: PoolError) -> SaleRepositoryError {
    debug!(error = %error, "sale pool checkout failed");
    match error {
        PoolError::Checkout { .. } => {
            SaleRepositoryError::connection("no database connection available")
        }
        PoolError::Build { .. } => SaleRepositoryError::connection("database pool unavailable"),
    }
}

pub(crate) fn map_diesel_error(error: DieselError) -> SaleRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "sale statement failed");
        }
        other => debug!(error = %other, "sale statement failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            SaleRepositoryError::connection("database connection closed")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            SaleRepositoryError::query("sale id already exists")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _)
        | DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, _) => {
            SaleRepositoryError::query("sale row violates a table constraint")
        }
        DieselError::NotFound => SaleRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => SaleRepositoryError::query("database query error"),
        _ => SaleRepositoryError::query("database error"),
    }
}

/// A stored row failed domain validation.
pub(crate) fn map_corrupt_row(message: String) -> SaleRepositoryError {
    debug!(%message, "sale row failed validation");
    SaleRepositoryError::query("stored sale row is invalid")
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PoolError::checkout("timed out after 30s"))]
    #[case(PoolError::build("connection refused to db.internal"))]
    fn pool_errors_become_connection_errors(#[case] error: PoolError) {
        let mapped = map_pool_error(error);
        let SaleRepositoryError::Connection { message } = mapped else {
            panic!("expected connection error");
        };
        assert!(!message.contains("db.internal"));
    }

    #[rstest]
    fn not_found_becomes_query_error() {
        assert_eq!(
            map_diesel_error(DieselError::NotFound),
            SaleRepositoryError::query("record not found")
        );
    }

    #[rstest]
    fn other_diesel_errors_hide_details() {
        let mapped = map_diesel_error(DieselError::RollbackTransaction);
        assert_eq!(mapped, SaleRepositoryError::query("database error"));
    }

    #[rstest]
    fn corrupt_rows_are_query_errors() {
        let mapped = map_corrupt_row("stored sale id: sale id must not be empty".to_owned());
        assert_eq!(mapped, SaleRepositoryError::query("stored sale row is invalid"));
    }
}
