//! # wh-core
//!
//! Core types shared across the warehouse tracker crates.
//!
//! - Entity structs for items, users, and item history records
//! - Action and role enums
//! - Cross-cutting error type
//! - Field-level snapshot diffing
//! - History filter parsing and validation
//! - Response projections for items and history
//! - Generic CSV export over serializable rows

pub mod diff;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod export;
pub mod filter;
pub mod responses;
