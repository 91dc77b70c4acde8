//! Entity store
//!
//! Repository traits abstract data access so services can run against
//! PostgreSQL in production and against [`MemoryStore`] in tests.

pub mod memory;
pub mod postgres;
pub mod schema;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::StoreResult;
use crate::models::{Cliente, NewCliente, NewOrden, NewProducto, Orden, OrdenRecord, Producto};

pub use memory::MemoryStore;
pub use postgres::PgStore;

// ============================================================================
// Cliente Repository
// ============================================================================

#[async_trait]
pub trait ClienteRepository: Send + Sync {
    /// All clientes, ordered by id
    async fn find_all(&self) -> StoreResult<Vec<Cliente>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Cliente>>;

    /// Exact (case-sensitive) email lookup
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Cliente>>;

    async fn insert(&self, cliente: NewCliente) -> StoreResult<Cliente>;

    /// Overwrite every field of the row with `cliente.id`
    async fn update(&self, cliente: &Cliente) -> StoreResult<()>;

    /// No-op when the row is absent. Fails with
    /// [`StoreError::ReferentialConflict`](crate::error::StoreError) while
    /// an orden references it.
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;

    async fn count(&self) -> StoreResult<i64>;
}

// ============================================================================
// Producto Repository
// ============================================================================

#[async_trait]
pub trait ProductoRepository: Send + Sync {
    async fn find_all(&self) -> StoreResult<Vec<Producto>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Producto>>;

    async fn insert(&self, producto: NewProducto) -> StoreResult<Producto>;

    async fn update(&self, producto: &Producto) -> StoreResult<()>;

    /// Same restriction as [`ClienteRepository::delete_by_id`]
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;

    async fn count(&self) -> StoreResult<i64>;
}

// ============================================================================
// Orden Repository
// ============================================================================

/// Reads return [`Orden`] with the referenced cliente and producto
/// embedded; writes take the flat [`OrdenRecord`] shape.
#[async_trait]
pub trait OrdenRepository: Send + Sync {
    async fn find_all(&self) -> StoreResult<Vec<Orden>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Orden>>;

    /// Ordenes placed by one cliente, ordered by id
    async fn find_by_cliente_id(&self, cliente_id: i64) -> StoreResult<Vec<Orden>>;

    /// Fails with a referential conflict when either reference is dangling
    async fn insert(&self, orden: NewOrden) -> StoreResult<OrdenRecord>;

    async fn update(&self, orden: &OrdenRecord) -> StoreResult<()>;

    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;

    async fn count(&self) -> StoreResult<i64>;
}

/// Liveness probe of the backing store
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;
}

/// The three repositories over one shared backend
#[derive(Clone)]
pub struct Repositories {
    pub clientes: Arc<dyn ClienteRepository>,
    pub productos: Arc<dyn ProductoRepository>,
    pub ordenes: Arc<dyn OrdenRepository>,
    pub health: Arc<dyn StoreHealth>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self::from_store(Arc::new(PgStore::new(pool)))
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }

    fn from_store<S>(store: Arc<S>) -> Self
    where
        S: ClienteRepository + ProductoRepository + OrdenRepository + StoreHealth + 'static,
    {
        Self {
            clientes: store.clone(),
            productos: store.clone(),
            ordenes: store.clone(),
            health: store,
        }
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.health.ping().await
    }
}
