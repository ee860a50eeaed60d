//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation        Deadline   Cache                                      │
//! │  ───────────────  ────────   ─────────────────────────────────────      │
//! │  get_by_id        15s        hit → served; miss + row → fill            │
//! │  list             15s        -                                          │
//! │  top_ten / top    3s         -                                          │
//! │  search           3s         - (projection is lower-cased)              │
//! │  insert           15s        put(new id)                                │
//! │  update           15s        put on a matched row, remove otherwise     │
//! │  delete           15s        remove                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is retried. A timeout or driver error is returned once.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{debug, warn};

use inventory_core::validation::validate_product;
use inventory_core::{Product, ProductFilter};

use crate::cache::ProductCache;
use crate::deadline::Deadline;
use crate::error::{DbError, DbResult};
use crate::repository::search::ProductSearch;

/// Number of rows returned by [`ProductRepository::top_ten`].
pub const TOP_PRODUCTS_LIMIT: u32 = 10;

const SELECT_BY_ID: &str = "SELECT productId, manufacturer, sku, upc, pricePerUnit, \
     quantityOnHand, productName FROM inventorydb.products WHERE productId = ?";

const SELECT_ALL: &str = "SELECT productId, manufacturer, sku, upc, pricePerUnit, \
     quantityOnHand, productName FROM inventorydb.products";

const SELECT_TOP: &str = "SELECT productId, manufacturer, sku, upc, pricePerUnit, \
     quantityOnHand, productName FROM inventorydb.products \
     ORDER BY quantityOnHand DESC LIMIT ?";

const INSERT: &str = "INSERT INTO products \
     (manufacturer, sku, upc, pricePerUnit, quantityOnHand, productName) \
     VALUES (?, ?, ?, ?, ?, ?)";

const UPDATE: &str = "UPDATE products SET manufacturer = ?, sku = ?, upc = ?, \
     pricePerUnit = CAST(? AS DECIMAL (13,2)), quantityOnHand = ?, productName = ? \
     WHERE productId = ?";

const DELETE: &str = "DELETE FROM inventorydb.products WHERE productId = ?";

const COUNT: &str = "SELECT COUNT(*) FROM inventorydb.products";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let id = repo.insert(&Product::new("Acme", "A1", "000", Money::from_cents(999), 5, "Widget")).await?;
/// let widget = repo.get_by_id(id).await?;           // Some(..), cached from now on
/// let hits = repo.search(&ProductFilter::new().by_name("widg")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
    cache: Arc<ProductCache>,
}

impl ProductRepository {
    /// Creates a repository over `pool` that records point lookups and
    /// writes in `cache`.
    pub fn new(pool: SqlitePool, cache: Arc<ProductCache>) -> Self {
        ProductRepository { pool, cache }
    }

    pub fn cache(&self) -> &Arc<ProductCache> {
        &self.cache
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found (from cache or database)
    /// * `Ok(None)` - No such product
    /// * `Err(DbError)` - Timeout or database failure
    pub async fn get_by_id(&self, product_id: i64) -> DbResult<Option<Product>> {
        if let Some(product) = self.cache.get(product_id) {
            debug!(product_id, "Product served from cache");
            return Ok(Some(product));
        }

        // Taken before the read so a write that lands meanwhile wins.
        let ticket = self.cache.ticket();
        let deadline = Deadline::standard("get_by_id");
        let product = deadline
            .run(
                sqlx::query_as::<_, Product>(SELECT_BY_ID)
                    .bind(product_id)
                    .fetch_optional(&self.pool),
            )
            .await?;

        match &product {
            Some(found) => {
                if !self.cache.fill(product_id, found.clone(), ticket) {
                    debug!(product_id, "Product changed during read; not cached");
                }
            }
            None => debug!(product_id, "Product not found"),
        }

        Ok(product)
    }

    /// Like [`get_by_id`](Self::get_by_id) but reports absence as
    /// [`DbError::NotFound`].
    pub async fn require_by_id(&self, product_id: i64) -> DbResult<Product> {
        self.get_by_id(product_id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", product_id))
    }

    /// Lists every product in the table's natural row order.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let deadline = Deadline::standard("list");
        let products = deadline
            .run(sqlx::query_as::<_, Product>(SELECT_ALL).fetch_all(&self.pool))
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Returns the ten products with the most units on hand.
    pub async fn top_ten(&self) -> DbResult<Vec<Product>> {
        self.top(TOP_PRODUCTS_LIMIT).await
    }

    /// Returns up to `limit` products ordered by `quantityOnHand` descending.
    /// Ties come back in whatever order the database picks.
    pub async fn top(&self, limit: u32) -> DbResult<Vec<Product>> {
        let deadline = Deadline::light_read("top");
        let products = deadline
            .run(
                sqlx::query_as::<_, Product>(SELECT_TOP)
                    .bind(limit)
                    .fetch_all(&self.pool),
            )
            .await?;

        debug!(limit, count = products.len(), "Fetched top products");
        Ok(products)
    }

    /// Searches by case-insensitive substring on name, manufacturer and sku.
    ///
    /// Returned manufacturer, sku and name are lower-cased. Only an empty
    /// fragment is left out of the predicate; whitespace is matched as
    /// given. An empty filter matches every product.
    pub async fn search(&self, filter: &ProductFilter) -> DbResult<Vec<Product>> {
        let search = ProductSearch::from_filter(filter);
        debug!(
            name = %filter.name_filter,
            manufacturer = %filter.manufacturer_filter,
            sku = %filter.sku_filter,
            "Searching products"
        );

        let deadline = Deadline::light_read("search");
        let mut query = search.to_query();
        let products = deadline
            .run(query.build_query_as::<Product>().fetch_all(&self.pool))
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Inserts a product and returns its generated ID.
    ///
    /// `product.product_id` is ignored. A successful call always yields a
    /// positive id; a write that produced none is reported as
    /// [`DbError::MissingInsertId`].
    pub async fn insert(&self, product: &Product) -> DbResult<i64> {
        validate_product(product)?;
        debug!(sku = %product.sku, "Inserting product");

        let deadline = Deadline::standard("insert");
        let result = deadline
            .run(
                sqlx::query(INSERT)
                    .bind(product.manufacturer.as_str())
                    .bind(product.sku.as_str())
                    .bind(product.upc.as_str())
                    .bind(product.price_per_unit.to_decimal_string())
                    .bind(product.quantity_on_hand)
                    .bind(product.product_name.as_str())
                    .execute(&self.pool),
            )
            .await?;

        let product_id = result.last_insert_rowid();
        if result.rows_affected() == 0 || product_id <= 0 {
            return Err(DbError::MissingInsertId { table: "products" });
        }

        self.cache.put(product_id, product.clone().with_id(product_id));
        debug!(product_id, "Inserted product");
        Ok(product_id)
    }

    /// Overwrites every mutable field of the row with `product.product_id`.
    ///
    /// Succeeds without effect when no such row exists.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        validate_product(product)?;
        debug!(product_id = product.product_id, "Updating product");

        let deadline = Deadline::standard("update");
        let result = deadline
            .run(
                sqlx::query(UPDATE)
                    .bind(product.manufacturer.as_str())
                    .bind(product.sku.as_str())
                    .bind(product.upc.as_str())
                    .bind(product.price_per_unit.to_decimal_string())
                    .bind(product.quantity_on_hand)
                    .bind(product.product_name.as_str())
                    .bind(product.product_id)
                    .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            // Don't let a miss seed the cache with a row that doesn't exist.
            self.cache.remove(product.product_id);
            warn!(product_id = product.product_id, "Update matched no product");
        } else {
            self.cache.put(product.product_id, product.clone());
        }

        Ok(())
    }

    /// Deletes a product. Succeeds when the product is already gone.
    pub async fn delete(&self, product_id: i64) -> DbResult<()> {
        debug!(product_id, "Deleting product");

        let deadline = Deadline::standard("delete");
        let result = deadline
            .run(sqlx::query(DELETE).bind(product_id).execute(&self.pool))
            .await?;

        self.cache.remove(product_id);
        if result.rows_affected() == 0 {
            warn!(product_id, "Delete matched no product");
        }

        Ok(())
    }

    /// Counts all products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let deadline = Deadline::standard("count");
        let count = deadline
            .run(sqlx::query_scalar::<_, i64>(COUNT).fetch_one(&self.pool))
            .await?;
        Ok(count)
    }
}
