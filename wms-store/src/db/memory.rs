//! In-memory session for tests and local development.
//!
//! [`MemorySession`] stands in for the PostgreSQL pool behind the same
//! [`Session`]/[`Transaction`] seam, and [`MemoryQueries`] implements every
//! queries trait over its [`MemoryTx`].
//!
//! # Semantics
//!
//! - `begin` snapshots the committed tables; a transaction reads its own
//!   writes and nothing committed after it began
//! - writes are logged and replayed onto the committed tables at `commit`;
//!   a replay failure (e.g. a concurrent insert of the same key) fails the
//!   commit and publishes nothing
//! - primary keys are unique and parent references are enforced with
//!   `ON DELETE CASCADE`, reporting the same error kinds as PostgreSQL
//! - dropping an unfinished transaction discards it
//!
//! Commit/rollback counters and fault switches let tests observe and
//! disturb the transaction discipline of the services.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::error::{DatabaseError, ErrorKind};
use tokio::sync::Mutex;
use wms_core::{Product, Shelf, ShelfBlock, Warehouse};

use super::repos::{ProductQueries, ShelfBlockQueries, ShelfQueries, WarehouseQueries};
use super::session::{Session, Transaction};

/// Committed (or staged) contents of the four tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tables {
    warehouses: BTreeMap<String, Warehouse>,
    shelf_blocks: BTreeMap<String, ShelfBlock>,
    shelves: BTreeMap<String, Shelf>,
    products: BTreeMap<String, Product>,
}

impl Tables {
    pub fn warehouse(&self, id: &str) -> Option<&Warehouse> {
        self.warehouses.get(id)
    }

    pub fn shelf_block(&self, id: &str) -> Option<&ShelfBlock> {
        self.shelf_blocks.get(id)
    }

    pub fn shelf(&self, id: &str) -> Option<&Shelf> {
        self.shelves.get(id)
    }

    pub fn product(&self, sku: &str) -> Option<&Product> {
        self.products.get(sku)
    }

    /// Total row count across all tables.
    pub fn len(&self) -> usize {
        self.warehouses.len() + self.shelf_blocks.len() + self.shelves.len() + self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn apply(&mut self, write: &Write) -> Result<u64, sqlx::Error> {
        match write {
            Write::InsertWarehouse(w) => insert_row(&mut self.warehouses, "warehouse", &w.id, w),
            Write::UpdateWarehouse(w) => Ok(replace_row(&mut self.warehouses, &w.id, w)),
            Write::DeleteWarehouse(id) => Ok(self.delete_warehouse(id)),

            Write::InsertShelfBlock(b) => {
                self.require_warehouse(&b.warehouse_id)?;
                insert_row(&mut self.shelf_blocks, "shelf_block", &b.id, b)
            }
            Write::UpdateShelfBlock(b) => {
                if !self.shelf_blocks.contains_key(&b.id) {
                    return Ok(0);
                }
                self.require_warehouse(&b.warehouse_id)?;
                Ok(replace_row(&mut self.shelf_blocks, &b.id, b))
            }
            Write::DeleteShelfBlock(id) => Ok(self.delete_shelf_block(id)),

            Write::InsertShelf(s) => {
                self.require_shelf_block(&s.shelf_block_id)?;
                insert_row(&mut self.shelves, "shelf", &s.id, s)
            }
            Write::UpdateShelf(s) => {
                if !self.shelves.contains_key(&s.id) {
                    return Ok(0);
                }
                self.require_shelf_block(&s.shelf_block_id)?;
                Ok(replace_row(&mut self.shelves, &s.id, s))
            }
            Write::DeleteShelf(id) => Ok(u64::from(self.shelves.remove(id).is_some())),

            Write::InsertProduct(p) => insert_row(&mut self.products, "product", &p.sku, p),
            Write::UpdateProduct(p) => Ok(replace_row(&mut self.products, &p.sku, p)),
            Write::DeleteProduct(sku) => Ok(u64::from(self.products.remove(sku).is_some())),
        }
    }

    fn require_warehouse(&self, id: &str) -> Result<(), sqlx::Error> {
        if self.warehouses.contains_key(id) {
            Ok(())
        } else {
            Err(ConstraintError::foreign_key("shelf_block_warehouse_id_fkey", id))
        }
    }

    fn require_shelf_block(&self, id: &str) -> Result<(), sqlx::Error> {
        if self.shelf_blocks.contains_key(id) {
            Ok(())
        } else {
            Err(ConstraintError::foreign_key("shelf_shelf_block_fkey", id))
        }
    }

    fn delete_warehouse(&mut self, id: &str) -> u64 {
        if self.warehouses.remove(id).is_none() {
            return 0;
        }
        let children: Vec<String> = self
            .shelf_blocks
            .values()
            .filter(|b| b.warehouse_id == id)
            .map(|b| b.id.clone())
            .collect();
        for child in children {
            self.delete_shelf_block(&child);
        }
        1
    }

    fn delete_shelf_block(&mut self, id: &str) -> u64 {
        if self.shelf_blocks.remove(id).is_none() {
            return 0;
        }
        self.shelves.retain(|_, shelf| shelf.shelf_block_id != id);
        1
    }
}

fn insert_row<T: Clone>(
    table: &mut BTreeMap<String, T>,
    name: &str,
    key: &str,
    row: &T,
) -> Result<u64, sqlx::Error> {
    if table.contains_key(key) {
        return Err(ConstraintError::unique(name, key));
    }
    table.insert(key.to_owned(), row.clone());
    Ok(1)
}

fn replace_row<T: Clone>(table: &mut BTreeMap<String, T>, key: &str, row: &T) -> u64 {
    match table.get_mut(key) {
        Some(slot) => {
            *slot = row.clone();
            1
        }
        None => 0,
    }
}

#[derive(Debug, Clone)]
enum Write {
    InsertWarehouse(Warehouse),
    UpdateWarehouse(Warehouse),
    DeleteWarehouse(String),
    InsertShelfBlock(ShelfBlock),
    UpdateShelfBlock(ShelfBlock),
    DeleteShelfBlock(String),
    InsertShelf(Shelf),
    UpdateShelf(Shelf),
    DeleteShelf(String),
    InsertProduct(Product),
    UpdateProduct(Product),
    DeleteProduct(String),
}

/// Constraint violation reported through `sqlx::Error::Database`, so callers
/// see the same error kinds PostgreSQL would produce.
#[derive(Debug)]
struct ConstraintError {
    message: String,
    constraint: String,
    foreign_key: bool,
}

impl ConstraintError {
    fn unique(table: &str, key: &str) -> sqlx::Error {
        let constraint = format!("{table}_pkey");
        sqlx::Error::Database(Box::new(Self {
            message: format!(
                "duplicate key value violates unique constraint \"{constraint}\": ({key}) already exists"
            ),
            constraint,
            foreign_key: false,
        }))
    }

    fn foreign_key(constraint: &str, key: &str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(Self {
            message: format!(
                "insert or update violates foreign key constraint \"{constraint}\": ({key}) is not present"
            ),
            constraint: constraint.to_owned(),
            foreign_key: true,
        }))
    }
}

impl fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConstraintError {}

impl DatabaseError for ConstraintError {
    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(if self.foreign_key { "23503" } else { "23505" }))
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        Some(&self.constraint)
    }

    fn kind(&self) -> ErrorKind {
        if self.foreign_key {
            ErrorKind::ForeignKeyViolation
        } else {
            ErrorKind::UniqueViolation
        }
    }
}

fn injected_failure(what: &str) -> sqlx::Error {
    sqlx::Error::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionReset,
        format!("injected {what} failure"),
    ))
}

#[derive(Debug, Default)]
struct SessionState {
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
    open: AtomicUsize,
    fail_statements: AtomicBool,
    fail_commits: AtomicBool,
}

/// In-memory stand-in for a pooled PostgreSQL handle.
///
/// Cheap to clone; clones share tables, counters and fault switches.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    committed: Arc<Mutex<Tables>>,
    state: Arc<SessionState>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the committed tables.
    pub async fn snapshot(&self) -> Tables {
        self.committed.lock().await.clone()
    }

    /// Successful commits so far.
    pub fn commits(&self) -> usize {
        self.state.commits.load(Ordering::SeqCst)
    }

    /// Explicit rollbacks so far.
    pub fn rollbacks(&self) -> usize {
        self.state.rollbacks.load(Ordering::SeqCst)
    }

    /// Transactions begun and not yet dropped.
    pub fn open_transactions(&self) -> usize {
        self.state.open.load(Ordering::SeqCst)
    }

    /// Make every subsequent statement fail with a connection error.
    pub fn fail_statements(&self, fail: bool) {
        self.state.fail_statements.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent commit fail with a connection error.
    pub fn fail_commits(&self, fail: bool) {
        self.state.fail_commits.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Session for MemorySession {
    type Tx = MemoryTx;

    async fn begin(&self) -> Result<MemoryTx, sqlx::Error> {
        let view = self.committed.lock().await.clone();
        self.state.open.fetch_add(1, Ordering::SeqCst);
        Ok(MemoryTx {
            view,
            log: Vec::new(),
            committed: Arc::clone(&self.committed),
            state: Arc::clone(&self.state),
        })
    }
}

/// Transaction on a [`MemorySession`].
pub struct MemoryTx {
    view: Tables,
    log: Vec<Write>,
    committed: Arc<Mutex<Tables>>,
    state: Arc<SessionState>,
}

impl MemoryTx {
    fn read(&self) -> Result<&Tables, sqlx::Error> {
        if self.state.fail_statements.load(Ordering::SeqCst) {
            return Err(injected_failure("statement"));
        }
        Ok(&self.view)
    }

    fn execute(&mut self, write: Write) -> Result<u64, sqlx::Error> {
        if self.state.fail_statements.load(Ordering::SeqCst) {
            return Err(injected_failure("statement"));
        }
        let affected = self.view.apply(&write)?;
        self.log.push(write);
        Ok(affected)
    }
}

impl Drop for MemoryTx {
    fn drop(&mut self) {
        self.state.open.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transaction for MemoryTx {
    async fn commit(mut self) -> Result<(), sqlx::Error> {
        if self.state.fail_commits.load(Ordering::SeqCst) {
            return Err(injected_failure("commit"));
        }

        let log = std::mem::take(&mut self.log);
        let mut committed = self.committed.lock().await;
        let mut next = committed.clone();
        for write in &log {
            next.apply(write)?;
        }
        *committed = next;
        self.state.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self) -> Result<(), sqlx::Error> {
        self.state.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory implementation of every queries trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryQueries;

#[async_trait]
impl WarehouseQueries<MemoryTx> for MemoryQueries {
    async fn get_warehouse(&self, tx: &mut MemoryTx, id: &str) -> Result<Option<Warehouse>, sqlx::Error> {
        Ok(tx.read()?.warehouse(id).cloned())
    }

    async fn insert_warehouse(&self, tx: &mut MemoryTx, warehouse: &Warehouse) -> Result<(), sqlx::Error> {
        tx.execute(Write::InsertWarehouse(warehouse.clone()))?;
        Ok(())
    }

    async fn update_warehouse(&self, tx: &mut MemoryTx, warehouse: &Warehouse) -> Result<u64, sqlx::Error> {
        tx.execute(Write::UpdateWarehouse(warehouse.clone()))
    }

    async fn delete_warehouse(&self, tx: &mut MemoryTx, id: &str) -> Result<u64, sqlx::Error> {
        tx.execute(Write::DeleteWarehouse(id.to_owned()))
    }
}

#[async_trait]
impl ShelfBlockQueries<MemoryTx> for MemoryQueries {
    async fn get_shelf_block(&self, tx: &mut MemoryTx, id: &str) -> Result<Option<ShelfBlock>, sqlx::Error> {
        Ok(tx.read()?.shelf_block(id).cloned())
    }

    async fn insert_shelf_block(&self, tx: &mut MemoryTx, block: &ShelfBlock) -> Result<(), sqlx::Error> {
        tx.execute(Write::InsertShelfBlock(block.clone()))?;
        Ok(())
    }

    async fn update_shelf_block(&self, tx: &mut MemoryTx, block: &ShelfBlock) -> Result<u64, sqlx::Error> {
        tx.execute(Write::UpdateShelfBlock(block.clone()))
    }

    async fn delete_shelf_block(&self, tx: &mut MemoryTx, id: &str) -> Result<u64, sqlx::Error> {
        tx.execute(Write::DeleteShelfBlock(id.to_owned()))
    }

    async fn warehouse_exists(&self, tx: &mut MemoryTx, warehouse_id: &str) -> Result<bool, sqlx::Error> {
        Ok(tx.read()?.warehouse(warehouse_id).is_some())
    }
}

#[async_trait]
impl ShelfQueries<MemoryTx> for MemoryQueries {
    async fn get_shelf(&self, tx: &mut MemoryTx, id: &str) -> Result<Option<Shelf>, sqlx::Error> {
        Ok(tx.read()?.shelf(id).cloned())
    }

    async fn insert_shelf(&self, tx: &mut MemoryTx, shelf: &Shelf) -> Result<(), sqlx::Error> {
        tx.execute(Write::InsertShelf(shelf.clone()))?;
        Ok(())
    }

    async fn update_shelf(&self, tx: &mut MemoryTx, shelf: &Shelf) -> Result<u64, sqlx::Error> {
        tx.execute(Write::UpdateShelf(shelf.clone()))
    }

    async fn delete_shelf(&self, tx: &mut MemoryTx, id: &str) -> Result<u64, sqlx::Error> {
        tx.execute(Write::DeleteShelf(id.to_owned()))
    }

    async fn shelf_block_exists(&self, tx: &mut MemoryTx, shelf_block_id: &str) -> Result<bool, sqlx::Error> {
        Ok(tx.read()?.shelf_block(shelf_block_id).is_some())
    }
}

#[async_trait]
impl ProductQueries<MemoryTx> for MemoryQueries {
    async fn get_product(&self, tx: &mut MemoryTx, sku: &str) -> Result<Option<Product>, sqlx::Error> {
        Ok(tx.read()?.product(sku).cloned())
    }

    async fn insert_product(&self, tx: &mut MemoryTx, product: &Product) -> Result<(), sqlx::Error> {
        tx.execute(Write::InsertProduct(product.clone()))?;
        Ok(())
    }

    async fn update_product(&self, tx: &mut MemoryTx, product: &Product) -> Result<u64, sqlx::Error> {
        tx.execute(Write::UpdateProduct(product.clone()))
    }

    async fn delete_product(&self, tx: &mut MemoryTx, sku: &str) -> Result<u64, sqlx::Error> {
        tx.execute(Write::DeleteProduct(sku.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouse(id: &str) -> Warehouse {
        Warehouse {
            id: id.into(),
            name: "Main".into(),
            latitude: 12.97,
            longitude: 77.59,
        }
    }

    fn block(id: &str, warehouse_id: &str) -> ShelfBlock {
        ShelfBlock {
            id: id.into(),
            aisle: "1".into(),
            rack: "1".into(),
            storage_type: "regular".into(),
            warehouse_id: warehouse_id.into(),
        }
    }

    #[tokio::test]
    async fn uncommitted_writes_are_invisible_to_other_transactions() {
        let session = MemorySession::new();
        let mut writer = session.begin().await.unwrap();
        MemoryQueries.insert_warehouse(&mut writer, &warehouse("W1")).await.unwrap();

        let mut reader = session.begin().await.unwrap();
        assert!(MemoryQueries.get_warehouse(&mut reader, "W1").await.unwrap().is_none());
        assert!(MemoryQueries.get_warehouse(&mut writer, "W1").await.unwrap().is_some());

        writer.commit().await.unwrap();
        reader.rollback().await.unwrap();
        assert!(session.snapshot().await.warehouse("W1").is_some());
    }

    #[tokio::test]
    async fn rollback_and_drop_discard_writes() {
        let session = MemorySession::new();

        let mut tx = session.begin().await.unwrap();
        MemoryQueries.insert_warehouse(&mut tx, &warehouse("W1")).await.unwrap();
        tx.rollback().await.unwrap();

        let mut tx = session.begin().await.unwrap();
        MemoryQueries.insert_warehouse(&mut tx, &warehouse("W2")).await.unwrap();
        assert_eq!(session.open_transactions(), 1);
        drop(tx);

        assert_eq!(session.open_transactions(), 0);
        assert!(session.snapshot().await.is_empty());
        assert_eq!(session.rollbacks(), 1);
        assert_eq!(session.commits(), 0);
    }

    #[tokio::test]
    async fn duplicate_key_is_a_unique_violation() {
        let session = MemorySession::new();
        let mut tx = session.begin().await.unwrap();
        MemoryQueries.insert_warehouse(&mut tx, &warehouse("W1")).await.unwrap();

        let err = MemoryQueries
            .insert_warehouse(&mut tx, &warehouse("W1"))
            .await
            .unwrap_err();
        match err {
            sqlx::Error::Database(db) => {
                assert!(db.is_unique_violation());
                assert_eq!(db.constraint(), Some("warehouse_pkey"));
            }
            other => panic!("expected database error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_parent_is_a_foreign_key_violation() {
        let session = MemorySession::new();
        let mut tx = session.begin().await.unwrap();

        let err = MemoryQueries
            .insert_shelf_block(&mut tx, &block("B1", "nope"))
            .await
            .unwrap_err();
        assert!(crate::error::is_foreign_key_violation(&err));
    }

    #[tokio::test]
    async fn deleting_a_warehouse_cascades() {
        let session = MemorySession::new();
        let mut tx = session.begin().await.unwrap();
        MemoryQueries.insert_warehouse(&mut tx, &warehouse("W1")).await.unwrap();
        MemoryQueries.insert_shelf_block(&mut tx, &block("B1", "W1")).await.unwrap();
        MemoryQueries
            .insert_shelf(
                &mut tx,
                &Shelf {
                    id: "S1".into(),
                    label: "A".into(),
                    section: "1".into(),
                    level: "1".into(),
                    shelf_block_id: "B1".into(),
                },
            )
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let mut tx = session.begin().await.unwrap();
        assert_eq!(MemoryQueries.delete_warehouse(&mut tx, "W1").await.unwrap(), 1);
        tx.commit().await.unwrap();

        assert!(session.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn conflicting_commit_publishes_nothing() {
        let session = MemorySession::new();
        let mut first = session.begin().await.unwrap();
        let mut second = session.begin().await.unwrap();

        MemoryQueries.insert_warehouse(&mut first, &warehouse("W1")).await.unwrap();
        MemoryQueries.insert_warehouse(&mut second, &warehouse("W1")).await.unwrap();
        MemoryQueries.insert_warehouse(&mut second, &warehouse("W2")).await.unwrap();

        first.commit().await.unwrap();
        assert!(second.commit().await.is_err());

        let tables = session.snapshot().await;
        assert!(tables.warehouse("W2").is_none());
        assert_eq!(session.commits(), 1);
    }

    #[tokio::test]
    async fn injected_statement_failure() {
        let session = MemorySession::new();
        session.fail_statements(true);
        let mut tx = session.begin().await.unwrap();

        let err = MemoryQueries.get_warehouse(&mut tx, "W1").await.unwrap_err();
        assert!(matches!(err, sqlx::Error::Io(_)));
    }
}
