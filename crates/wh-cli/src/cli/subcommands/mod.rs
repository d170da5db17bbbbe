mod history;
mod item;
mod user;

pub use history::{HistoryCommands, HistoryFilterArgs};
pub use item::ItemCommands;
pub use user::UserCommands;
