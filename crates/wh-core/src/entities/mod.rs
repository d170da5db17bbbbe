//! Entity structs for the warehouse domain.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize` and `Deserialize` for JSON output.

mod audit;
mod item;
mod user;

pub use audit::{AuditRecord, Snapshot};
pub use item::{Item, NewItem};
pub use user::User;
