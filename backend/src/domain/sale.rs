//! Sale entity and identifier.
//!
//! A sale is owned by exactly one user. The owner is always stamped from the
//! authenticated session; clients never supply it.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Maximum length of a sale identifier, matching the `id` column.
pub const SALE_ID_MAX: usize = 191;

/// Validation errors returned by [`SaleId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleIdValidationError {
    EmptyId,
    IdTooLong { max: usize },
}

impl fmt::Display for SaleIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "sale id must not be empty"),
            Self::IdTooLong { max } => write!(f, "sale id must be at most {max} characters"),
        }
    }
}

impl std::error::Error for SaleIdValidationError {}

/// Opaque primary key of a [`Sale`].
///
/// Identifiers generated by the service are UUID v4 strings, but any
/// non-empty value up to [`SALE_ID_MAX`] characters is accepted when reading
/// requests.
///
/// # Examples
/// ```
/// use sales_backend::domain::SaleId;
///
/// let generated = SaleId::generate();
/// assert_eq!(generated.as_ref().len(), 36);
/// assert!(SaleId::new("missing-id").is_ok());
/// assert!(SaleId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SaleId(String);

impl SaleId {
    /// Validate and construct a [`SaleId`].
    pub fn new(id: impl Into<String>) -> Result<Self, SaleIdValidationError> {
        Self::from_owned(id.into())
    }

    /// Generate a fresh identifier for a new sale.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    fn from_owned(id: String) -> Result<Self, SaleIdValidationError> {
        if id.is_empty() {
            return Err(SaleIdValidationError::EmptyId);
        }
        if id.chars().count() > SALE_ID_MAX {
            return Err(SaleIdValidationError::IdTooLong { max: SALE_ID_MAX });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for SaleId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<SaleId> for String {
    fn from(value: SaleId) -> Self {
        value.0
    }
}

impl TryFrom<String> for SaleId {
    type Error = SaleIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Persisted sale record.
///
/// Serialises as `{ "id": ..., "total": ..., "userId": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: SaleId,
    pub total: i32,
    pub user_id: UserId,
}

impl Sale {
    /// Build a new sale for `user_id` with a freshly generated id.
    pub fn create(user_id: UserId, total: i32) -> Self {
        Self {
            id: SaleId::generate(),
            total,
            user_id,
        }
    }

    /// Return a copy with `changes` applied. The id and owner never change.
    pub fn with_changes(&self, changes: &SaleChanges) -> Self {
        Self {
            id: self.id.clone(),
            total: changes.total,
            user_id: self.user_id.clone(),
        }
    }
}

/// Mutable columns of a sale, written by a full-record update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleChanges {
    pub total: i32,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn owner() -> UserId {
        UserId::new("owner-1").expect("valid user id")
    }

    #[rstest]
    fn generated_ids_are_unique_uuids() {
        let first = SaleId::generate();
        let second = SaleId::generate();
        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_ref()).is_ok());
    }

    #[rstest]
    #[case("", SaleIdValidationError::EmptyId)]
    fn rejects_empty_ids(#[case] raw: &str, #[case] expected: SaleIdValidationError) {
        assert_eq!(SaleId::new(raw).expect_err("invalid id"), expected);
    }

    #[rstest]
    fn rejects_ids_longer_than_column() {
        let raw = "s".repeat(SALE_ID_MAX + 1);
        assert_eq!(
            SaleId::new(raw).expect_err("too long"),
            SaleIdValidationError::IdTooLong { max: SALE_ID_MAX }
        );
    }

    #[rstest]
    fn serialises_with_camel_case_owner() {
        let sale = Sale {
            id: SaleId::new("sale-1").expect("valid id"),
            total: 100,
            user_id: owner(),
        };
        let value = serde_json::to_value(&sale).expect("serialise sale");
        assert_eq!(
            value,
            json!({ "id": "sale-1", "total": 100, "userId": "owner-1" })
        );
    }

    #[rstest]
    fn with_changes_keeps_identity() {
        let sale = Sale::create(owner(), 10);
        let updated = sale.with_changes(&SaleChanges { total: 25 });
        assert_eq!(updated.id, sale.id);
        assert_eq!(updated.user_id, sale.user_id);
        assert_eq!(updated.total, 25);
    }
}
