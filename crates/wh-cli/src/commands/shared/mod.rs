pub mod actor;
pub mod filter;
pub mod limit;
