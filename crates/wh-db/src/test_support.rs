//! Shared test utilities for wh-db unit tests.

pub(crate) mod helpers {
    use std::time::Duration;

    use wh_core::entities::{NewItem, User};
    use wh_core::enums::Role;

    use crate::WhDb;
    use crate::service::WhService;

    /// Create an in-memory `WhService` with no mutation deadline.
    pub async fn test_service() -> WhService {
        let db = WhDb::open_local(":memory:").await.unwrap();
        WhService::from_db(db, None)
    }

    /// Create an in-memory `WhService` with a mutation deadline.
    pub async fn test_service_with_timeout(timeout: Duration) -> WhService {
        let db = WhDb::open_local(":memory:").await.unwrap();
        WhService::from_db(db, Some(timeout))
    }

    /// Create an admin user with the given name.
    pub async fn seed_user(svc: &WhService, name: &str) -> User {
        svc.get_or_create_user(name, Role::Admin).await.unwrap()
    }

    pub fn new_item(name: &str, quantity: i64, price: i64) -> NewItem {
        NewItem {
            name: name.to_string(),
            description: String::new(),
            quantity,
            price,
        }
    }

    /// Count rows in `table`. Table names are test constants only.
    pub async fn count_rows(svc: &WhService, table: &str) -> i64 {
        let mut rows = svc
            .db()
            .conn()
            .query(&format!("SELECT COUNT(*) FROM {table}"), ())
            .await
            .unwrap();
        rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
    }
}
