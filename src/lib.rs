//! growby - order-management REST service
//!
//! Clientes place ordenes for productos; each orden's total is computed
//! from the producto's precio.
//!
//! # Modules
//!
//! - [`models`] - Cliente, Producto (+ Estado) and Orden
//! - [`dto`] - Validated request payloads
//! - [`store`] - Repository traits, PostgreSQL and in-memory stores
//! - [`service`] - Business rules per resource
//! - [`error`] - Store and service error types
//! - [`gateway`] - axum router, handlers and OpenAPI docs
//! - [`config`] / [`logging`] / [`db`] - Runtime setup

pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod service;
pub mod store;

// Convenient re-exports at crate root
pub use error::{ServiceError, StoreError};
pub use gateway::{router, state::AppState};
pub use models::{Cliente, Estado, Orden, Producto};
pub use store::Repositories;
