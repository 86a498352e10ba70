//! Domain types, validation and services for sales.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: the single tagged error every adapter maps.
//! - [`Sale`], [`SaleId`], [`SaleChanges`]: the sale record and its parts.
//! - [`UserId`]: the session user owning sales.
//! - [`sale_schema`]: request validators derived from the table definition.
//! - [`SaleService`]: owner-scoped data access implementing the sale ports.

pub mod auth;
pub mod error;
pub mod ports;
pub mod sale;
pub mod sale_schema;
pub mod sale_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, GENERIC_ERROR_MESSAGE};
pub use self::sale::{SALE_ID_MAX, Sale, SaleChanges, SaleId, SaleIdValidationError};
pub use self::sale_schema::{NewSaleParams, UpdateSaleParams, ValidationError, ValidationIssue};
pub use self::sale_service::SaleService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USER_ID_MAX, UserId, UserValidationError};
