//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! HTTP handlers live under [`http`]; [`actions`] exposes the same mutations
//! as in-process server actions for the sale form.

pub mod actions;
pub mod http;
