//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: sale repositories (PostgreSQL via Diesel, or in-memory)
//! - **cache**: listing revalidation counters
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod cache;
pub mod persistence;
