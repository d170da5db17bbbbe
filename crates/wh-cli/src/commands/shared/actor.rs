use wh_core::entities::User;
use wh_core::enums::Role;

use crate::context::AppContext;

/// What a command is about to do to items.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Permission {
    Write,
    Delete,
}

impl Permission {
    const fn verb(self) -> &'static str {
        match self {
            Self::Write => "modify",
            Self::Delete => "delete",
        }
    }
}

/// Check that `role` grants `permission`.
pub fn check_role(role: Role, permission: Permission) -> anyhow::Result<()> {
    let allowed = match permission {
        Permission::Write => role.can_write(),
        Permission::Delete => role.can_delete(),
    };
    if !allowed {
        anyhow::bail!("role '{role}' may not {} items", permission.verb());
    }
    Ok(())
}

/// Name of the acting user, from `--as` or `general.default_actor`.
pub fn acting_name(ctx: &AppContext) -> anyhow::Result<&str> {
    ctx.acting_as.as_deref().ok_or_else(|| {
        anyhow::anyhow!("No acting user. Pass --as <name> or set general.default_actor.")
    })
}

/// Resolve the acting user and check it may perform `permission`.
pub async fn require_permission(
    ctx: &AppContext,
    permission: Permission,
) -> anyhow::Result<User> {
    let name = acting_name(ctx)?;

    let user = ctx.service.get_user_by_name(name).await.map_err(|error| {
        anyhow::anyhow!("cannot act as '{name}': {error}. Run 'whc user login' first.")
    })?;

    check_role(user.role, permission)?;
    tracing::debug!(user_id = %user.id, role = %user.role, "acting user resolved");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use wh_core::enums::Role;

    use super::{Permission, check_role};

    #[test]
    fn managers_write_but_do_not_delete() {
        assert!(check_role(Role::Manager, Permission::Write).is_ok());
        let err = check_role(Role::Manager, Permission::Delete).expect_err("should fail");
        assert_eq!(err.to_string(), "role 'manager' may not delete items");
    }

    #[test]
    fn admins_do_everything() {
        assert!(check_role(Role::Admin, Permission::Write).is_ok());
        assert!(check_role(Role::Admin, Permission::Delete).is_ok());
    }

    #[test]
    fn viewers_only_read() {
        assert!(check_role(Role::Viewer, Permission::Write).is_err());
        assert!(check_role(Role::Viewer, Permission::Delete).is_err());
    }
}
