//! # Products Table Bootstrap
//!
//! Creates `inventorydb.products` when it is missing, for development
//! databases and tests. This is not a migration system: there are no
//! versions, and an existing table is never altered.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ inventorydb.products                                         │
//! │ ──────────────────────────────────────────────────────────── │
//! │ productId       INTEGER PRIMARY KEY AUTOINCREMENT            │
//! │ manufacturer    TEXT                                         │
//! │ sku             TEXT                                         │
//! │ upc             TEXT                                         │
//! │ pricePerUnit    DECIMAL(13,2)                                │
//! │ quantityOnHand  INTEGER                                      │
//! │ productName     TEXT                                         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! AUTOINCREMENT keeps ids of deleted rows from being handed out again.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS inventorydb.products (
    productId       INTEGER PRIMARY KEY AUTOINCREMENT,
    manufacturer    TEXT NOT NULL DEFAULT '',
    sku             TEXT NOT NULL DEFAULT '',
    upc             TEXT NOT NULL DEFAULT '',
    pricePerUnit    DECIMAL(13,2) NOT NULL DEFAULT 0,
    quantityOnHand  INTEGER NOT NULL DEFAULT 0,
    productName     TEXT NOT NULL DEFAULT ''
)
"#;

/// Creates the products table if needed.
pub async fn ensure_products_table(pool: &SqlitePool) -> DbResult<()> {
    sqlx::query(CREATE_PRODUCTS_TABLE).execute(pool).await?;
    info!("Products table ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.ensure_schema().await.unwrap();
        db.ensure_schema().await.unwrap();

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM inventorydb.sqlite_master WHERE type = 'table' AND name = 'products'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(tables, 1);
    }

    #[tokio::test]
    async fn test_without_bootstrap_reads_fail_as_infrastructure() {
        let db = Database::new(DbConfig::in_memory().create_schema(false))
            .await
            .unwrap();
        let err = db.products().list().await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Infrastructure);
    }
}
