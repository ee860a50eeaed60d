//! End-to-end behaviour of the product repository through the public API.

use std::path::PathBuf;
use std::process;

use inventory_core::{Money, Product, ProductFilter};
use inventory_db::{Database, DbConfig, ErrorKind, TOP_PRODUCTS_LIMIT};

async fn memory_db() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("Failed to init test DB")
}

fn product(name: &str, manufacturer: &str, sku: &str, qty: i64) -> Product {
    Product::new(manufacturer, sku, "012345678905", Money::from_cents(499), qty, name)
}

/// Removes the database file and its WAL companions when dropped.
struct TempDbFile(PathBuf);

impl TempDbFile {
    fn new(tag: &str) -> Self {
        TempDbFile(std::env::temp_dir().join(format!("inventory-{tag}-{}.db", process::id())))
    }
}

impl Drop for TempDbFile {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut path = self.0.clone().into_os_string();
            path.push(suffix);
            let _ = std::fs::remove_file(path);
        }
    }
}

#[tokio::test]
async fn crud_lifecycle() {
    let db = memory_db().await;
    let repo = db.products();

    let id = repo
        .insert(&product("Widget", "Acme", "A1", 5))
        .await
        .unwrap();

    let stored = repo.require_by_id(id).await.unwrap();
    assert_eq!(stored.product_name, "Widget");
    assert_eq!(stored.price_per_unit, Money::from_cents(499));

    let mut changed = stored.clone();
    changed.quantity_on_hand = 42;
    changed.price_per_unit = Money::parse_decimal("5.25").unwrap();
    repo.update(&changed).await.unwrap();
    assert_eq!(repo.get_by_id(id).await.unwrap(), Some(changed));

    repo.delete(id).await.unwrap();
    assert_eq!(repo.get_by_id(id).await.unwrap(), None);
    assert_eq!(repo.require_by_id(id).await.unwrap_err().kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn ids_are_distinct_and_positive() {
    let db = memory_db().await;
    let repo = db.products();

    let mut ids = Vec::new();
    for i in 0..20 {
        let sku = format!("S{i}");
        ids.push(repo.insert(&product("Thing", "Maker", &sku, i)).await.unwrap());
    }

    assert!(ids.iter().all(|id| *id > 0));
    let mut unique = ids.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

#[tokio::test]
async fn deleted_ids_are_not_reused() {
    let db = memory_db().await;
    let repo = db.products();

    let first = repo.insert(&product("A", "M", "1", 1)).await.unwrap();
    repo.delete(first).await.unwrap();
    let second = repo.insert(&product("B", "M", "2", 1)).await.unwrap();
    assert!(second > first);
}

#[tokio::test]
async fn top_ten_returns_the_highest_stock() {
    let db = memory_db().await;
    let repo = db.products();

    for qty in [5, 80, 12, 0, 33, 7, 99, 41, 18, 60, 3, 27, 71] {
        repo.insert(&product(&format!("Q{qty}"), "M", "S", qty))
            .await
            .unwrap();
    }

    let quantities: Vec<i64> = repo
        .top_ten()
        .await
        .unwrap()
        .iter()
        .map(|p| p.quantity_on_hand)
        .collect();

    assert_eq!(quantities.len(), TOP_PRODUCTS_LIMIT as usize);
    assert_eq!(quantities, vec![99, 80, 71, 60, 41, 33, 27, 18, 12, 7]);
}

#[tokio::test]
async fn search_combines_filters_with_and() {
    let db = memory_db().await;
    let repo = db.products();

    repo.insert(&product("Blue Widget", "Acme", "AC-100", 1)).await.unwrap();
    repo.insert(&product("Red Widget", "Globex", "GX-200", 1)).await.unwrap();
    repo.insert(&product("Blue Gizmo", "Acme", "AC-300", 1)).await.unwrap();

    let widgets = repo
        .search(&ProductFilter::new().by_name("WIDGET"))
        .await
        .unwrap();
    assert_eq!(widgets.len(), 2);

    let acme_widgets = repo
        .search(&ProductFilter::new().by_name("widget").by_manufacturer("acme"))
        .await
        .unwrap();
    assert_eq!(acme_widgets.len(), 1);
    assert_eq!(acme_widgets[0].product_name, "blue widget");
    assert_eq!(acme_widgets[0].sku, "ac-100");

    let none = repo
        .search(&ProductFilter::new().by_sku("zz-999"))
        .await
        .unwrap();
    assert!(none.is_empty());

    assert_eq!(repo.search(&ProductFilter::default()).await.unwrap().len(), 3);
}

#[tokio::test]
async fn search_filter_is_bound_not_spliced() {
    let db = memory_db().await;
    let repo = db.products();
    repo.insert(&product("Widget", "Acme", "A1", 1)).await.unwrap();

    let hostile = ProductFilter::new().by_name("x' OR '1'='1");
    assert!(repo.search(&hostile).await.unwrap().is_empty());
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn long_filters_are_searched_not_rejected() {
    let db = memory_db().await;
    let repo = db.products();
    let name = "w".repeat(300);
    let id = repo.insert(&product(&name, "Acme", "A1", 1)).await.unwrap();

    let hits = repo
        .search(&ProductFilter::new().by_name(name.to_uppercase()))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].product_id, id);
}

#[tokio::test]
async fn repository_handles_share_the_cache() {
    let db = memory_db().await;
    let writer = db.products();
    let reader = db.clone().products();

    let id = writer.insert(&product("Widget", "Acme", "A1", 1)).await.unwrap();
    assert!(reader.cache().contains(id));

    writer.delete(id).await.unwrap();
    assert!(!reader.cache().contains(id));
    assert_eq!(reader.get_by_id(id).await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reads_and_writes() {
    let db = memory_db().await;
    let repo = db.products();

    let id = repo.insert(&product("Widget", "Acme", "A1", 0)).await.unwrap();

    let mut tasks = Vec::new();
    for qty in 1..=8 {
        let writer = db.products();
        tasks.push(tokio::spawn(async move {
            let mut next = product("Widget", "Acme", "A1", qty);
            next.product_id = id;
            writer.update(&next).await.unwrap();
        }));

        let reader = db.products();
        tasks.push(tokio::spawn(async move {
            let seen = reader.get_by_id(id).await.unwrap().unwrap();
            // Never a mix of two writes.
            assert_eq!(seen.product_name, "Widget");
            assert!((0..=8).contains(&seen.quantity_on_hand));
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    db.cache().clear();
    let stored = repo.require_by_id(id).await.unwrap();
    assert!((1..=8).contains(&stored.quantity_on_hand));
}

#[tokio::test]
async fn file_database_is_shared_across_connections() {
    let file = TempDbFile::new("shared");
    let config = DbConfig::new(&file.0).max_connections(4);

    let db = Database::new(config.clone()).await.unwrap();
    let id = db
        .products()
        .insert(&product("Widget", "Acme", "A1", 3))
        .await
        .unwrap();
    db.close().await;

    // Fresh pool, fresh cache: the row must come from the file.
    let reopened = Database::new(config).await.unwrap();
    assert!(reopened.cache().is_empty());
    let stored = reopened.products().require_by_id(id).await.unwrap();
    assert_eq!(stored.quantity_on_hand, 3);
    reopened.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_get_never_resurrects_a_deleted_product() {
    let file = TempDbFile::new("get-delete");
    let db = Database::new(DbConfig::new(&file.0).max_connections(8))
        .await
        .unwrap();
    let repo = db.products();

    for round in 0..200 {
        let id = repo
            .insert(&product("Widget", "Acme", &format!("R{round}"), 1))
            .await
            .unwrap();
        db.cache().clear();

        let reader = db.products();
        let get = tokio::spawn(async move { reader.get_by_id(id).await });
        let deleter = db.products();
        let delete = tokio::spawn(async move { deleter.delete(id).await });

        get.await.unwrap().unwrap();
        delete.await.unwrap().unwrap();

        assert!(!db.cache().contains(id), "deleted id {id} left in cache");
        assert_eq!(repo.get_by_id(id).await.unwrap(), None);
    }

    db.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_get_never_caches_a_stale_row() {
    let file = TempDbFile::new("get-update");
    let db = Database::new(DbConfig::new(&file.0).max_connections(8))
        .await
        .unwrap();
    let repo = db.products();
    let id = repo.insert(&product("Widget", "Acme", "A1", 0)).await.unwrap();

    for round in 1..=200 {
        db.cache().clear();

        let reader = db.products();
        let get = tokio::spawn(async move { reader.get_by_id(id).await });
        let writer = db.products();
        let update = tokio::spawn(async move {
            let mut next = product("Widget", "Acme", "A1", round);
            next.product_id = id;
            writer.update(&next).await
        });

        get.await.unwrap().unwrap();
        update.await.unwrap().unwrap();

        // Whatever the cache holds must be the row the update wrote.
        if let Some(cached) = db.cache().get(id) {
            assert_eq!(cached.quantity_on_hand, round, "stale entry in round {round}");
        }
    }

    db.cache().clear();
    assert_eq!(repo.require_by_id(id).await.unwrap().quantity_on_hand, 200);
    db.close().await;
}
