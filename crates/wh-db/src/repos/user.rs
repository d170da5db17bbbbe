//! User repository: lookup and get-or-create login.

use chrono::{SubsecRound, Utc};
use uuid::Uuid;

use wh_core::entities::User;
use wh_core::enums::Role;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, parse_datetime, parse_enum, parse_uuid};
use crate::service::WhService;

const USER_COLS: &str = "id, name, role, created_at, updated_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: parse_uuid(&row.get::<String>(0)?)?,
        name: row.get::<String>(1)?,
        role: parse_enum(&row.get::<String>(2)?)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl WhService {
    /// Return the user named `name`, creating it with `role` if absent.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a malformed name and
    /// `DatabaseError::Conflict` if the user exists with a different role.
    pub async fn get_or_create_user(&self, name: &str, role: Role) -> Result<User, DatabaseError> {
        User::validate_name(name)?;

        let now = Utc::now().trunc_subsecs(3);
        let id = Uuid::new_v4();

        // A concurrent login with the same name lands on the existing row.
        let inserted = {
            let _guard = self.lock().await;
            self.db()
                .conn()
                .execute(
                    "INSERT INTO users (id, name, role, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(name) DO NOTHING",
                    libsql::params![
                        id.to_string(),
                        name,
                        role.as_str(),
                        format_datetime(&now),
                        format_datetime(&now)
                    ],
                )
                .await
                .inspect_err(|e| {
                    tracing::error!(operation = "create_user", error = %e, "insert failed");
                })?
        };

        let user = self.get_user_by_name(name).await?;
        if inserted > 0 {
            tracing::info!(user_id = %user.id, role = %role, "user created");
        } else if user.role != role {
            return Err(DatabaseError::Conflict(format!(
                "user '{name}' already exists with role '{}'",
                user.role
            )));
        }
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no user has this name.
    pub async fn get_user_by_name(&self, name: &str) -> Result<User, DatabaseError> {
        self.find_user_by_name(name)
            .await?
            .ok_or_else(|| DatabaseError::not_found("user", name))
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no user has this id.
    pub async fn get_user(&self, id: Uuid) -> Result<User, DatabaseError> {
        let _guard = self.lock().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {USER_COLS} FROM users WHERE id = ?1"),
                [id.to_string()],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("user", id))?;
        row_to_user(&row)
    }

    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>, DatabaseError> {
        let _guard = self.lock().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {USER_COLS} FROM users WHERE name = ?1"),
                [name],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}
