//! Item repository: CRUD inside attributed transactions.
//!
//! History rows are written by the `items` triggers, never by this code.

use chrono::{SubsecRound, Utc};
use uuid::Uuid;

use wh_core::entities::{Item, NewItem};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, parse_datetime, parse_uuid};
use crate::service::WhService;
use crate::updates::item::ItemUpdate;

const ITEM_COLS: &str = "id, name, description, quantity, price, created_at, updated_at";

fn row_to_item(row: &libsql::Row) -> Result<Item, DatabaseError> {
    Ok(Item {
        id: parse_uuid(&row.get::<String>(0)?)?,
        name: row.get::<String>(1)?,
        description: row.get::<String>(2)?,
        quantity: row.get::<i64>(3)?,
        price: row.get::<i64>(4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

async fn fetch_item(conn: &libsql::Connection, id: Uuid) -> Result<Option<Item>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {ITEM_COLS} FROM items WHERE id = ?1"),
            [id.to_string()],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_item(&row)?)),
        None => Ok(None),
    }
}

impl WhService {
    /// Create an item attributed to `actor`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for bad input (before any database
    /// access), `DatabaseError::Attribution` if `actor` cannot be bound, or
    /// `DatabaseError::Timeout` if the deadline expires.
    pub async fn create_item(
        &self,
        input: &NewItem,
        actor: Option<Uuid>,
    ) -> Result<Item, DatabaseError> {
        input.validate()?;

        let now = Utc::now().trunc_subsecs(3);
        let item = Item {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            description: input.description.clone(),
            quantity: input.quantity,
            price: input.price,
            created_at: now,
            updated_at: now,
        };

        let mtx = self.begin_attributed("create_item", actor).await?;
        let result = self
            .with_deadline(async {
                mtx.execute(
                    &format!("INSERT INTO items ({ITEM_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
                    libsql::params![
                        item.id.to_string(),
                        item.name.as_str(),
                        item.description.as_str(),
                        item.quantity,
                        item.price,
                        format_datetime(&now),
                        format_datetime(&now)
                    ],
                )
                .await?;
                Ok(())
            })
            .await;
        self.finish("create_item", mtx, result).await?;

        tracing::info!(item_id = %item.id, "item created");
        Ok(item)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the item does not exist.
    pub async fn get_item(&self, id: Uuid) -> Result<Item, DatabaseError> {
        let _guard = self.lock().await;
        fetch_item(self.db().conn(), id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("item", id))
    }

    /// Whether a live item with this id exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn item_exists(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let _guard = self.lock().await;
        Ok(fetch_item(self.db().conn(), id).await?.is_some())
    }

    /// All live items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_items(&self) -> Result<Vec<Item>, DatabaseError> {
        let _guard = self.lock().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {ITEM_COLS} FROM items ORDER BY created_at DESC, rowid DESC"),
                (),
            )
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_item(&row)?);
        }
        Ok(items)
    }

    /// Apply a partial update attributed to `actor`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an empty or invalid update,
    /// `DatabaseError::NotFound` for an unknown id, and the attribution and
    /// deadline errors of [`WhService::create_item`].
    pub async fn update_item(
        &self,
        id: Uuid,
        update: &ItemUpdate,
        actor: Option<Uuid>,
    ) -> Result<Item, DatabaseError> {
        update.validate()?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref name) = update.name {
            params.push(name.trim().into());
            sets.push(format!("name = ?{}", params.len()));
        }
        if let Some(ref description) = update.description {
            params.push(description.as_str().into());
            sets.push(format!("description = ?{}", params.len()));
        }
        if let Some(quantity) = update.quantity {
            params.push(quantity.into());
            sets.push(format!("quantity = ?{}", params.len()));
        }
        if let Some(price) = update.price {
            params.push(price.into());
            sets.push(format!("price = ?{}", params.len()));
        }

        params.push(format_datetime(&Utc::now()).into());
        sets.push(format!("updated_at = ?{}", params.len()));

        params.push(id.to_string().into());
        let sql = format!(
            "UPDATE items SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );

        let mtx = self.begin_attributed("update_item", actor).await?;
        let result = self
            .with_deadline(async {
                let changed = mtx
                    .execute(&sql, libsql::params_from_iter(params.clone()))
                    .await?;
                if changed == 0 {
                    return Err(DatabaseError::not_found("item", id));
                }
                fetch_item(&mtx, id)
                    .await?
                    .ok_or(DatabaseError::NoResult)
            })
            .await;
        let item = self.finish("update_item", mtx, result).await?;

        tracing::info!(item_id = %id, "item updated");
        Ok(item)
    }

    /// Delete an item, attributed to `actor`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown id, and the
    /// attribution and deadline errors of [`WhService::create_item`].
    pub async fn delete_item(&self, id: Uuid, actor: Option<Uuid>) -> Result<(), DatabaseError> {
        let mtx = self.begin_attributed("delete_item", actor).await?;
        let result = self
            .with_deadline(async {
                let changed = mtx
                    .execute("DELETE FROM items WHERE id = ?1", [id.to_string()])
                    .await?;
                if changed == 0 {
                    return Err(DatabaseError::not_found("item", id));
                }
                Ok(())
            })
            .await;
        self.finish("delete_item", mtx, result).await?;

        tracing::info!(item_id = %id, "item deleted");
        Ok(())
    }
}
