//! # Database Pool Management
//!
//! Connection pool creation and configuration.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  DbConfig::new(path) / DbConfig::from_env()                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └──┬──┘ └──┬──┘ └──┬──┘ └──┬──┘       │                           │
//! │  │     └───────┴───┬───┴───────┘          │                           │
//! │  │   ATTACH '<path>' AS inventorydb       │  (on every new connection)│
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database { pool, cache: Arc<ProductCache> }                           │
//! │       │                                                                 │
//! │       └── products() → ProductRepository (shares pool + cache)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why ATTACH?
//! The product statements address the table as `inventorydb.products`. Each
//! connection opens a private in-memory main database and attaches the
//! inventory file under the schema name `inventorydb`, so those statements
//! (and the unqualified `products` used by insert/update) resolve to it.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::cache::ProductCache;
use crate::error::{DbError, DbResult};
use crate::repository::product::ProductRepository;
use crate::schema;

/// Schema name the inventory database is attached under.
pub const INVENTORY_SCHEMA: &str = "inventorydb";

const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/inventory/inventory.db")
///     .max_connections(8)
///     .create_schema(false);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite file holding the products table.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// How long to wait for a free connection.
    /// Default: 30 seconds
    pub acquire_timeout: Duration,

    /// Idle timeout before closing a connection. `None` keeps connections
    /// open indefinitely.
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// Whether to create the products table if it is missing.
    /// Default: true
    pub create_schema: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            create_schema: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection acquire timeout.
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Sets whether to create the products table on connect.
    pub fn create_schema(mut self, create: bool) -> Self {
        self.create_schema = create;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// An attached `:memory:` database belongs to a single connection, so
    /// the pool is pinned to one connection that is never recycled.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: None,
            create_schema: true,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning a `Database` is cheap and shares both the pool and the product
/// cache, so every handle observes the same cached entries. Build one per
/// process and pass it to whatever needs product access.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    cache: Arc<ProductCache>,
}

impl Database {
    /// Creates the connection pool and, if enabled, the products table.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let in_memory = config.is_in_memory();
        let attach_target = config.database_path.to_string_lossy().into_owned();
        let attach_sql = format!("ATTACH DATABASE ? AS {INVENTORY_SCHEMA}");

        // Private in-memory main database; the real data lives in the
        // attached schema.
        let connect_options = SqliteConnectOptions::new()
            .shared_cache(false)
            .create_if_missing(true)
            .foreign_keys(true);

        debug!("Connection options configured");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout);

        if in_memory {
            pool_options = pool_options.max_lifetime(None);
        }

        let pool = pool_options
            .after_connect(move |conn, _meta| {
                let attach_sql = attach_sql.clone();
                let attach_target = attach_target.clone();
                Box::pin(async move {
                    sqlx::query(&attach_sql)
                        .bind(attach_target)
                        .execute(&mut *conn)
                        .await?;

                    if !in_memory {
                        // WAL: readers don't block the writer
                        let pragma = format!("PRAGMA {INVENTORY_SCHEMA}.journal_mode = WAL");
                        sqlx::query(&pragma).execute(&mut *conn).await?;
                    }
                    Ok(())
                })
            })
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database {
            pool,
            cache: Arc::new(ProductCache::new()),
        };

        if config.create_schema {
            db.ensure_schema().await?;
        }

        Ok(db)
    }

    /// Creates the products table if it does not exist. Idempotent.
    pub async fn ensure_schema(&self) -> DbResult<()> {
        schema::ensure_products_table(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the product cache shared by every repository handle.
    pub fn cache(&self) -> &Arc<ProductCache> {
        &self.cache
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let widget = db.products().get_by_id(42).await?;
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone(), Arc::clone(&self.cache))
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_handles_share_one_cache() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let clone = db.clone();
        assert!(Arc::ptr_eq(db.cache(), clone.cache()));
        assert!(Arc::ptr_eq(db.products().cache(), clone.products().cache()));
    }

    #[tokio::test]
    async fn test_closed_pool_is_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/inventory.db")
            .max_connections(10)
            .min_connections(2)
            .create_schema(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.create_schema);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }
}
