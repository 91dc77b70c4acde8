use std::sync::Arc;

use crate::dto::ClienteDto;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Cliente, NewCliente};
use crate::store::ClienteRepository;

pub struct ClienteService {
    clientes: Arc<dyn ClienteRepository>,
}

impl ClienteService {
    pub fn new(clientes: Arc<dyn ClienteRepository>) -> Self {
        Self { clientes }
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<Cliente>> {
        Ok(self.clientes.find_all().await?)
    }

    /// `None` is not an error; the caller decides how to report it
    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<Cliente>> {
        Ok(self.clientes.find_by_id(id).await?)
    }

    /// Create a cliente with an email no other cliente uses
    pub async fn save(&self, dto: ClienteDto) -> ServiceResult<Cliente> {
        if self.clientes.find_by_email(&dto.email).await?.is_some() {
            tracing::warn!(email = %dto.email, "Rejected cliente: email already in use");
            return Err(ServiceError::DuplicateEmail);
        }

        let cliente = self
            .clientes
            .insert(NewCliente {
                nombre: dto.nombre,
                email: dto.email,
                telefono: dto.telefono,
            })
            .await?;
        tracing::info!(id = cliente.id, "Cliente created");
        Ok(cliente)
    }

    /// Overwrite nombre, email and telefono. The email may be kept, but not
    /// taken from another cliente.
    pub async fn update(&self, id: i64, dto: ClienteDto) -> ServiceResult<Cliente> {
        let mut cliente = self
            .clientes
            .find_by_id(id)
            .await?
            .ok_or_else(ServiceError::cliente_not_found)?;

        if let Some(owner) = self.clientes.find_by_email(&dto.email).await? {
            if owner.id != id {
                tracing::warn!(id, owner = owner.id, "Rejected cliente update: email already in use");
                return Err(ServiceError::DuplicateEmail);
            }
        }

        cliente.nombre = dto.nombre;
        cliente.email = dto.email;
        cliente.telefono = dto.telefono;
        self.clientes.update(&cliente).await?;
        tracing::info!(id, "Cliente updated");
        Ok(cliente)
    }

    /// Referential conflicts propagate as `ServiceError::Store`
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.clientes.delete_by_id(id).await?;
        tracing::info!(id, "Cliente deleted");
        Ok(())
    }

    pub async fn count_all(&self) -> ServiceResult<i64> {
        Ok(self.clientes.count().await?)
    }
}
