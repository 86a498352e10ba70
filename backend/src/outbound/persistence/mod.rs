//! Sale persistence adapters.
//!
//! - [`DieselSaleRepository`]: PostgreSQL via Diesel, `diesel-async` and a
//!   `bb8` pool.
//! - [`InMemorySaleRepository`]: process-local storage used when no database
//!   URL is configured.
//!
//! Diesel row structs and the `table!` definitions stay private to this
//! module; only domain types cross the port.
//!
//! ```ignore
//! use sales_backend::outbound::persistence::{DbPool, DieselSaleRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/sales")).await?;
//! let repo = DieselSaleRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_sale_repository;
mod memory_sale_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_sale_repository::DieselSaleRepository;
pub use memory_sale_repository::InMemorySaleRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
