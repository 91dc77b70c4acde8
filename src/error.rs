//! Store and service error types
//!
//! Services return [`ServiceError`]; the HTTP layer maps each variant to a
//! status code in `gateway::error`.

use thiserror::Error;

use crate::models::EstadoError;

/// Errors raised by an entity store implementation
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A write or delete on `table` would break an orden reference
    #[error("Referential integrity violation on {table}")]
    ReferentialConflict { table: &'static str },
}

impl StoreError {
    pub fn is_referential_conflict(&self) -> bool {
        matches!(self, StoreError::ReferentialConflict { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Business rule failures
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    ClienteNotFound(String),

    #[error("{0}")]
    ProductoNotFound(String),

    #[error("{0}")]
    OrdenNotFound(String),

    #[error("El email ya está en uso")]
    DuplicateEmail,

    #[error(transparent)]
    InvalidEstado(#[from] EstadoError),

    #[error("El precio es obligatorio")]
    MissingPrecio,

    /// `precio * cantidad` overflows or does not fit the stored total
    #[error("El total de la orden excede el máximo permitido")]
    TotalOutOfRange,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn cliente_not_found() -> Self {
        ServiceError::ClienteNotFound("Cliente no encontrado".to_string())
    }

    pub fn producto_not_found() -> Self {
        ServiceError::ProductoNotFound("Producto no encontrado".to_string())
    }

    pub fn orden_not_found() -> Self {
        ServiceError::OrdenNotFound("Orden no encontrada".to_string())
    }
}
