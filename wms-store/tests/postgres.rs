//! End-to-end checks against a real PostgreSQL server.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p wms-store -- --ignored

use sqlx::PgPool;
use wms_core::{Product, Shelf, ShelfBlock, Warehouse};
use wms_store::{
    create_pool_with_options, migrations, PgSession, ProductService, ShelfBlockService,
    ShelfService, StoreError, WarehouseService,
};

async fn pool() -> PgPool {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("wms_store=debug")
        .with_test_writer()
        .try_init();

    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool_with_options(&url, 4)
        .await
        .expect("pool creation failed");
    migrations::up(&pool).await.expect("migrations failed");
    pool
}

fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}

fn warehouse(id: &str) -> Warehouse {
    Warehouse {
        id: id.into(),
        name: "Main".into(),
        latitude: 12.97,
        longitude: 77.59,
    }
}

fn shelf_block(id: &str, warehouse_id: &str) -> ShelfBlock {
    ShelfBlock {
        id: id.into(),
        aisle: "1".into(),
        rack: "1".into(),
        storage_type: "regular".into(),
        warehouse_id: warehouse_id.into(),
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn warehouse_round_trip_keeps_coordinates() {
    let session = PgSession::new(pool().await);
    let warehouses = WarehouseService::new(session);
    let w = warehouse(&unique("W"));

    warehouses.create(&w).await.unwrap();
    assert_eq!(warehouses.get_by_id(&w.id).await.unwrap(), w);

    let moved = Warehouse {
        name: "Annex".into(),
        latitude: -33.86,
        longitude: 151.21,
        ..w.clone()
    };
    warehouses.update(&moved).await.unwrap();
    assert_eq!(warehouses.get_by_id(&w.id).await.unwrap(), moved);

    warehouses.delete_by_id(&w.id).await.unwrap();
    let err = warehouses.get_by_id(&w.id).await.unwrap_err();
    assert!(matches!(err, StoreError::WarehouseDoesNotExist(_)));
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_missing_warehouse_creates_nothing() {
    let session = PgSession::new(pool().await);
    let warehouses = WarehouseService::new(session);
    let id = unique("missing");

    let err = warehouses.update(&warehouse(&id)).await.unwrap_err();
    assert!(matches!(err, StoreError::WarehouseDoesNotExist(ref got) if *got == id));
    assert!(warehouses.get_by_id(&id).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore = "requires database"]
async fn shelf_block_requires_existing_warehouse() {
    let session = PgSession::new(pool().await);
    let blocks = ShelfBlockService::new(session);
    let block = shelf_block(&unique("B"), "does-not-exist");

    let err = blocks.create(&block).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidWarehouse(ref id) if id == "does-not-exist"));

    let err = blocks.get_by_id(&block.id).await.unwrap_err();
    assert!(matches!(err, StoreError::ShelfBlockDoesNotExist(_)));
}

#[tokio::test]
#[ignore = "requires database"]
async fn hierarchy_cascades_on_warehouse_delete() {
    let session = PgSession::new(pool().await);
    let warehouses = WarehouseService::new(session.clone());
    let blocks = ShelfBlockService::new(session.clone());
    let shelves = ShelfService::new(session);

    let w = warehouse(&unique("W"));
    let b = shelf_block(&unique("B"), &w.id);
    let s = Shelf {
        id: unique("S"),
        label: "A-1".into(),
        section: "north".into(),
        level: "2".into(),
        shelf_block_id: b.id.clone(),
    };

    warehouses.create(&w).await.unwrap();
    blocks.create(&b).await.unwrap();
    shelves.create(&s).await.unwrap();
    assert_eq!(blocks.get_by_id(&b.id).await.unwrap(), b);
    assert_eq!(shelves.get_by_id(&s.id).await.unwrap(), s);

    warehouses.delete_by_id(&w.id).await.unwrap();
    assert!(blocks.get_by_id(&b.id).await.unwrap_err().is_not_found());
    assert!(shelves.get_by_id(&s.id).await.unwrap_err().is_not_found());

    let err = shelves.create(&s).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidShelfBlock(ref id) if *id == b.id));
}

#[tokio::test]
#[ignore = "requires database"]
async fn product_lifecycle() {
    let session = PgSession::new(pool().await);
    let products = ProductService::new(session);
    let sku = unique("SKU");
    let product = Product::new(sku.clone(), "Milk", 56.0, "1L", 7.5, 7.5, 20.0, 1.03, true);

    products.create(&product).await.unwrap();
    assert_eq!(products.get_by_id(&sku).await.unwrap(), product);

    let err = products.create(&product).await.unwrap_err();
    assert!(err.as_database().is_some(), "duplicate sku is an infrastructure error");

    products.delete_by_id(&sku).await.unwrap();
    for _ in 0..2 {
        let err = products.delete_by_id(&sku).await.unwrap_err();
        assert!(matches!(err, StoreError::ProductDoesNotExist(_)));
    }
}
