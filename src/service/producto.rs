use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::dto::ProductoDto;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Estado, EstadoError, NewProducto, Producto};
use crate::store::ProductoRepository;

pub struct ProductoService {
    productos: Arc<dyn ProductoRepository>,
}

impl ProductoService {
    pub fn new(productos: Arc<dyn ProductoRepository>) -> Self {
        Self { productos }
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<Producto>> {
        Ok(self.productos.find_all().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<Producto>> {
        Ok(self.productos.find_by_id(id).await?)
    }

    /// Create a producto. Estado is accepted in any letter case;
    /// `fecha_creacion` is stamped now.
    pub async fn save(&self, dto: ProductoDto) -> ServiceResult<Producto> {
        let estado = Estado::normalize(dto.estado.as_deref())?;
        let producto = self
            .productos
            .insert(NewProducto {
                nombre: dto.nombre,
                descripcion: dto.descripcion,
                precio: precio(dto.precio)?,
                fecha_creacion: Utc::now(),
                estado,
            })
            .await?;
        tracing::info!(id = producto.id, estado = %producto.estado, "Producto created");
        Ok(producto)
    }

    /// Overwrite nombre, descripcion, precio and estado. Estado must be
    /// spelled exactly `ACTIVO` or `INACTIVO` here; `fecha_creacion` is kept.
    pub async fn update(&self, id: i64, dto: ProductoDto) -> ServiceResult<Producto> {
        let mut producto = self
            .productos
            .find_by_id(id)
            .await?
            .ok_or_else(ServiceError::producto_not_found)?;

        let estado: Estado = dto.estado.as_deref().ok_or(EstadoError::Missing)?.parse()?;

        producto.nombre = dto.nombre;
        producto.descripcion = dto.descripcion;
        producto.precio = precio(dto.precio)?;
        producto.estado = estado;
        self.productos.update(&producto).await?;
        tracing::info!(id, "Producto updated");
        Ok(producto)
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.productos.delete_by_id(id).await?;
        tracing::info!(id, "Producto deleted");
        Ok(())
    }

    pub async fn count_all(&self) -> ServiceResult<i64> {
        Ok(self.productos.count().await?)
    }
}

// Validated DTOs always carry a precio; this only guards direct callers
fn precio(value: Option<Decimal>) -> ServiceResult<Decimal> {
    value.ok_or(ServiceError::MissingPrecio)
}
