use std::sync::Arc;

use crate::service::{ClienteService, OrdenService, ProductoService};
use crate::store::Repositories;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    pub clientes: Arc<ClienteService>,
    pub productos: Arc<ProductoService>,
    pub ordenes: Arc<OrdenService>,
    /// Kept for the health probe
    pub repos: Repositories,
}

impl AppState {
    /// Wire every service over one set of repositories
    pub fn new(repos: Repositories) -> Self {
        Self {
            clientes: Arc::new(ClienteService::new(repos.clientes.clone())),
            productos: Arc::new(ProductoService::new(repos.productos.clone())),
            ordenes: Arc::new(OrdenService::new(
                repos.ordenes.clone(),
                repos.clientes.clone(),
                repos.productos.clone(),
            )),
            repos,
        }
    }
}
