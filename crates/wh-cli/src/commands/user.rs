use serde::Serialize;
use wh_core::entities::User;
use wh_core::enums::Role;
use wh_core::responses::format_timestamp;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::actor::acting_name;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct UserResponse {
    id: String,
    name: String,
    role: Role,
    created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            role: user.role,
            created_at: format_timestamp(&user.created_at),
        }
    }
}

/// Handle `whc user`.
pub async fn handle(
    action: &UserCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UserCommands::Login { name, role } => {
            let role = Role::parse(role.trim())?;
            let user = ctx.service.get_or_create_user(name.trim(), role).await?;
            output(&UserResponse::from(&user), flags.format)
        }
        UserCommands::Whoami => {
            let name = acting_name(ctx)?;
            let user = ctx.service.get_user_by_name(name).await?;
            output(&UserResponse::from(&user), flags.format)
        }
    }
}
