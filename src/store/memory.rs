//! In-memory store
//!
//! Tables live behind one `tokio::sync::RwLock` so a write sees a
//! consistent view of all three. Foreign-key restrictions mirror the
//! PostgreSQL schema.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ClienteRepository, OrdenRepository, ProductoRepository, StoreHealth};
use crate::error::{StoreError, StoreResult};
use crate::models::{Cliente, NewCliente, NewOrden, NewProducto, Orden, OrdenRecord, Producto};

#[derive(Default)]
struct Tables {
    clientes: BTreeMap<i64, Cliente>,
    productos: BTreeMap<i64, Producto>,
    ordenes: BTreeMap<i64, OrdenRecord>,
    next_cliente_id: i64,
    next_producto_id: i64,
    next_orden_id: i64,
}

impl Tables {
    fn new() -> Self {
        Self {
            next_cliente_id: 1,
            next_producto_id: 1,
            next_orden_id: 1,
            ..Default::default()
        }
    }

    /// Join one record with its references; `None` if either is gone
    fn resolve(&self, record: &OrdenRecord) -> Option<Orden> {
        let cliente = self.clientes.get(&record.cliente_id)?.clone();
        let producto = self.productos.get(&record.producto_id)?.clone();
        Some(record.clone().into_orden(cliente, producto))
    }

    fn references_ok(&self, cliente_id: i64, producto_id: i64) -> bool {
        self.clientes.contains_key(&cliente_id) && self.productos.contains_key(&producto_id)
    }
}

/// Process-local store used by tests and when no database is configured
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClienteRepository for MemoryStore {
    async fn find_all(&self) -> StoreResult<Vec<Cliente>> {
        Ok(self.tables.read().await.clientes.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Cliente>> {
        Ok(self.tables.read().await.clientes.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Cliente>> {
        let tables = self.tables.read().await;
        Ok(tables.clientes.values().find(|c| c.email == email).cloned())
    }

    async fn insert(&self, cliente: NewCliente) -> StoreResult<Cliente> {
        let mut tables = self.tables.write().await;
        let id = tables.next_cliente_id;
        tables.next_cliente_id += 1;
        let cliente = cliente.with_id(id);
        tables.clientes.insert(id, cliente.clone());
        Ok(cliente)
    }

    async fn update(&self, cliente: &Cliente) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(row) = tables.clientes.get_mut(&cliente.id) {
            *row = cliente.clone();
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.ordenes.values().any(|o| o.cliente_id == id) {
            return Err(StoreError::ReferentialConflict { table: "clientes" });
        }
        tables.clientes.remove(&id);
        Ok(())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.clientes.len() as i64)
    }
}

#[async_trait]
impl ProductoRepository for MemoryStore {
    async fn find_all(&self) -> StoreResult<Vec<Producto>> {
        Ok(self.tables.read().await.productos.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Producto>> {
        Ok(self.tables.read().await.productos.get(&id).cloned())
    }

    async fn insert(&self, producto: NewProducto) -> StoreResult<Producto> {
        let mut tables = self.tables.write().await;
        let id = tables.next_producto_id;
        tables.next_producto_id += 1;
        let producto = producto.with_id(id);
        tables.productos.insert(id, producto.clone());
        Ok(producto)
    }

    async fn update(&self, producto: &Producto) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(row) = tables.productos.get_mut(&producto.id) {
            *row = producto.clone();
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.ordenes.values().any(|o| o.producto_id == id) {
            return Err(StoreError::ReferentialConflict { table: "productos" });
        }
        tables.productos.remove(&id);
        Ok(())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.productos.len() as i64)
    }
}

#[async_trait]
impl OrdenRepository for MemoryStore {
    async fn find_all(&self) -> StoreResult<Vec<Orden>> {
        let tables = self.tables.read().await;
        Ok(tables.ordenes.values().filter_map(|r| tables.resolve(r)).collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Orden>> {
        let tables = self.tables.read().await;
        Ok(tables.ordenes.get(&id).and_then(|r| tables.resolve(r)))
    }

    async fn find_by_cliente_id(&self, cliente_id: i64) -> StoreResult<Vec<Orden>> {
        let tables = self.tables.read().await;
        Ok(tables
            .ordenes
            .values()
            .filter(|r| r.cliente_id == cliente_id)
            .filter_map(|r| tables.resolve(r))
            .collect())
    }

    async fn insert(&self, orden: NewOrden) -> StoreResult<OrdenRecord> {
        let mut tables = self.tables.write().await;
        if !tables.references_ok(orden.cliente_id, orden.producto_id) {
            return Err(StoreError::ReferentialConflict { table: "ordenes" });
        }
        let id = tables.next_orden_id;
        tables.next_orden_id += 1;
        let record = orden.with_id(id);
        tables.ordenes.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, orden: &OrdenRecord) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.references_ok(orden.cliente_id, orden.producto_id) {
            return Err(StoreError::ReferentialConflict { table: "ordenes" });
        }
        if let Some(row) = tables.ordenes.get_mut(&orden.id) {
            *row = orden.clone();
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        self.tables.write().await.ordenes.remove(&id);
        Ok(())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.ordenes.len() as i64)
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
