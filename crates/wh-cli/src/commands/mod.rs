pub mod dispatch;
pub mod history;
pub mod item;
pub mod shared;
pub mod user;
