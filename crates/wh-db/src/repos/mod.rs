//! Repository methods, one file per table, implemented on `WhService`.

pub mod history;
pub mod item;
pub mod user;
