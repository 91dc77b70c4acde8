use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::dto::OrdenDto;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Cliente, NewOrden, Orden, OrdenRecord, Producto, fits_amount_column};
use crate::store::{ClienteRepository, OrdenRepository, ProductoRepository};

/// `precio * cantidad`, exact. Fails when the product overflows or does
/// not fit the `total` column.
pub fn compute_total(precio: Decimal, cantidad: i32) -> ServiceResult<Decimal> {
    precio
        .checked_mul(Decimal::from(cantidad))
        .filter(|total| fits_amount_column(*total))
        .ok_or(ServiceError::TotalOutOfRange)
}

pub struct OrdenService {
    ordenes: Arc<dyn OrdenRepository>,
    clientes: Arc<dyn ClienteRepository>,
    productos: Arc<dyn ProductoRepository>,
}

impl OrdenService {
    pub fn new(
        ordenes: Arc<dyn OrdenRepository>,
        clientes: Arc<dyn ClienteRepository>,
        productos: Arc<dyn ProductoRepository>,
    ) -> Self {
        Self {
            ordenes,
            clientes,
            productos,
        }
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<Orden>> {
        Ok(self.ordenes.find_all().await?)
    }

    pub async fn find_by_cliente_id(&self, cliente_id: i64) -> ServiceResult<Vec<Orden>> {
        Ok(self.ordenes.find_by_cliente_id(cliente_id).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<Orden>> {
        Ok(self.ordenes.find_by_id(id).await?)
    }

    /// Producto is resolved before cliente, so a request where both are
    /// missing reports the producto.
    async fn resolve(&self, dto: &OrdenDto) -> ServiceResult<(Cliente, Producto)> {
        let producto = self
            .productos
            .find_by_id(dto.producto_id)
            .await?
            .ok_or_else(ServiceError::producto_not_found)?;
        let cliente = self
            .clientes
            .find_by_id(dto.cliente_id)
            .await?
            .ok_or_else(ServiceError::cliente_not_found)?;
        Ok((cliente, producto))
    }

    /// Place an orden stamped now, priced at the producto's current precio
    pub async fn save(&self, dto: OrdenDto) -> ServiceResult<Orden> {
        let (cliente, producto) = self.resolve(&dto).await?;
        let total = compute_total(producto.precio, dto.cantidad)?;

        let record = self
            .ordenes
            .insert(NewOrden {
                cantidad: dto.cantidad,
                fecha_orden: Utc::now(),
                total,
                cliente_id: cliente.id,
                producto_id: producto.id,
            })
            .await?;
        tracing::info!(
            id = record.id,
            cliente_id = cliente.id,
            producto_id = producto.id,
            %total,
            "Orden created"
        );
        Ok(record.into_orden(cliente, producto))
    }

    /// Re-resolve both references and recompute the total. `fechaOrden`
    /// from the payload is kept when given, otherwise reset to now.
    pub async fn update(&self, id: i64, dto: OrdenDto) -> ServiceResult<Orden> {
        if self.ordenes.find_by_id(id).await?.is_none() {
            return Err(ServiceError::orden_not_found());
        }
        let (cliente, producto) = self.resolve(&dto).await?;
        let total = compute_total(producto.precio, dto.cantidad)?;

        let record = OrdenRecord {
            id,
            cantidad: dto.cantidad,
            fecha_orden: dto.fecha_orden.unwrap_or_else(Utc::now),
            total,
            cliente_id: cliente.id,
            producto_id: producto.id,
        };
        self.ordenes.update(&record).await?;
        tracing::info!(id, total = %record.total, "Orden updated");
        Ok(record.into_orden(cliente, producto))
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.ordenes.delete_by_id(id).await?;
        tracing::info!(id, "Orden deleted");
        Ok(())
    }

    pub async fn count_all(&self) -> ServiceResult<i64> {
        Ok(self.ordenes.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{DateTime, TimeZone};

    use super::*;
    use crate::models::{Estado, NewCliente, NewProducto};
    use crate::store::Repositories;

    struct Fixture {
        svc: OrdenService,
        repos: Repositories,
        cliente: Cliente,
        producto: Producto,
    }

    async fn insert_producto(repos: &Repositories, nombre: &str, precio: &str) -> Producto {
        repos
            .productos
            .insert(NewProducto {
                nombre: nombre.to_string(),
                descripcion: None,
                precio: Decimal::from_str(precio).unwrap(),
                fecha_creacion: Utc::now(),
                estado: Estado::Activo,
            })
            .await
            .unwrap()
    }

    async fn fixture(precio: &str) -> Fixture {
        let repos = Repositories::in_memory();
        let cliente = repos
            .clientes
            .insert(NewCliente {
                nombre: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                telefono: None,
            })
            .await
            .unwrap();
        let producto = insert_producto(&repos, "Mouse", precio).await;
        let svc = OrdenService::new(
            repos.ordenes.clone(),
            repos.clientes.clone(),
            repos.productos.clone(),
        );
        Fixture {
            svc,
            repos,
            cliente,
            producto,
        }
    }

    fn dto(cantidad: i32, cliente_id: i64, producto_id: i64) -> OrdenDto {
        OrdenDto {
            cantidad,
            fecha_orden: None,
            cliente_id,
            producto_id,
        }
    }

    #[test]
    fn test_compute_total_is_exact() {
        let total = compute_total(Decimal::from_str("30.00").unwrap(), 2).unwrap();
        assert_eq!(total.to_string(), "60.00");

        let total = compute_total(Decimal::from_str("0.10").unwrap(), 3).unwrap();
        assert_eq!(total, Decimal::from_str("0.30").unwrap());

        let total = compute_total(Decimal::from_str("19.99").unwrap(), 7).unwrap();
        assert_eq!(total.to_string(), "139.93");
    }

    #[test]
    fn test_compute_total_out_of_range() {
        // overflows the decimal itself
        let err = compute_total(Decimal::from_str("50000000000000000000000000000").unwrap(), 2)
            .unwrap_err();
        assert!(matches!(err, ServiceError::TotalOutOfRange));
        assert!(compute_total(Decimal::MAX, i32::MAX).is_err());

        // fits a decimal but not NUMERIC(19, 2)
        let largest = Decimal::from_str("99999999999999999.99").unwrap();
        assert_eq!(compute_total(largest, 1).unwrap(), largest);
        assert!(matches!(
            compute_total(largest, 2),
            Err(ServiceError::TotalOutOfRange)
        ));
    }

    #[tokio::test]
    async fn test_save_computes_total_and_embeds_references() {
        let f = fixture("30.00").await;
        let orden = f.svc.save(dto(2, f.cliente.id, f.producto.id)).await.unwrap();

        assert_eq!(orden.total.to_string(), "60.00");
        assert_eq!(orden.cliente, f.cliente);
        assert_eq!(orden.producto, f.producto);
        assert_eq!(f.svc.count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_unknown_producto_checked_first() {
        let f = fixture("30.00").await;

        let err = f.svc.save(dto(1, 99, 99)).await.unwrap_err();
        assert!(matches!(err, ServiceError::ProductoNotFound(_)));
        assert_eq!(err.to_string(), "Producto no encontrado");

        let err = f.svc.save(dto(1, 99, f.producto.id)).await.unwrap_err();
        assert!(matches!(err, ServiceError::ClienteNotFound(_)));
        assert_eq!(err.to_string(), "Cliente no encontrado");

        assert_eq!(f.svc.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_orden() {
        let f = fixture("30.00").await;
        let err = f
            .svc
            .update(1, dto(1, f.cliente.id, f.producto.id))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::OrdenNotFound(_)));
        assert_eq!(err.to_string(), "Orden no encontrada");
    }

    #[tokio::test]
    async fn test_update_recomputes_total_and_honours_fecha() {
        let f = fixture("12.50").await;
        let orden = f.svc.save(dto(1, f.cliente.id, f.producto.id)).await.unwrap();
        assert_eq!(orden.total.to_string(), "12.50");

        let fecha: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let mut payload = dto(4, f.cliente.id, f.producto.id);
        payload.fecha_orden = Some(fecha);

        let updated = f.svc.update(orden.id, payload).await.unwrap();
        assert_eq!(updated.total.to_string(), "50.00");
        assert_eq!(updated.fecha_orden, fecha);

        let stored = f.svc.get_by_id(orden.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_update_without_fecha_resets_to_now() {
        let f = fixture("1.00").await;
        let orden = f.svc.save(dto(1, f.cliente.id, f.producto.id)).await.unwrap();
        let before = Utc::now();

        let updated = f
            .svc
            .update(orden.id, dto(2, f.cliente.id, f.producto.id))
            .await
            .unwrap();
        assert!(updated.fecha_orden >= before);
    }

    #[tokio::test]
    async fn test_find_by_cliente_and_delete() {
        let f = fixture("5.00").await;
        let a = f.svc.save(dto(1, f.cliente.id, f.producto.id)).await.unwrap();
        f.svc.save(dto(3, f.cliente.id, f.producto.id)).await.unwrap();

        assert_eq!(f.svc.find_by_cliente_id(f.cliente.id).await.unwrap().len(), 2);
        assert!(f.svc.find_by_cliente_id(42).await.unwrap().is_empty());

        f.svc.delete(a.id).await.unwrap();
        f.svc.delete(a.id).await.unwrap();
        assert_eq!(f.svc.find_all().await.unwrap().len(), 1);
        assert!(f.svc.get_by_id(a.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_rejects_total_out_of_range() {
        let f = fixture("50000000000000000000000000000").await;
        let err = f.svc.save(dto(2, f.cliente.id, f.producto.id)).await.unwrap_err();
        assert!(matches!(err, ServiceError::TotalOutOfRange));
        assert_eq!(f.svc.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_rejects_total_out_of_range() {
        let f = fixture("99999999999999999.99").await;
        let orden = f.svc.save(dto(1, f.cliente.id, f.producto.id)).await.unwrap();

        let err = f
            .svc
            .update(orden.id, dto(3, f.cliente.id, f.producto.id))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::TotalOutOfRange));

        let stored = f.svc.get_by_id(orden.id).await.unwrap().unwrap();
        assert_eq!(stored.cantidad, 1);
        assert_eq!(stored.total, orden.total);
    }

    #[tokio::test]
    async fn test_update_reports_missing_references() {
        let f = fixture("30.00").await;
        let orden = f.svc.save(dto(1, f.cliente.id, f.producto.id)).await.unwrap();

        let err = f
            .svc
            .update(orden.id, dto(1, f.cliente.id, 99))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ProductoNotFound(_)));
        assert_eq!(err.to_string(), "Producto no encontrado");

        let err = f
            .svc
            .update(orden.id, dto(1, 99, f.producto.id))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ClienteNotFound(_)));
        assert_eq!(err.to_string(), "Cliente no encontrado");

        // both missing: producto reported first
        let err = f.svc.update(orden.id, dto(1, 99, 99)).await.unwrap_err();
        assert!(matches!(err, ServiceError::ProductoNotFound(_)));

        let stored = f.svc.get_by_id(orden.id).await.unwrap().unwrap();
        assert_eq!(stored, orden);
    }

    #[tokio::test]
    async fn test_update_moves_to_other_producto_and_reprices() {
        let f = fixture("30.00").await;
        let teclado = insert_producto(&f.repos, "Teclado", "45.50").await;
        let orden = f.svc.save(dto(2, f.cliente.id, f.producto.id)).await.unwrap();
        assert_eq!(orden.total.to_string(), "60.00");

        let updated = f
            .svc
            .update(orden.id, dto(2, f.cliente.id, teclado.id))
            .await
            .unwrap();
        assert_eq!(updated.producto, teclado);
        assert_eq!(updated.total.to_string(), "91.00");

        let stored = f.svc.get_by_id(orden.id).await.unwrap().unwrap();
        assert_eq!(stored.producto.id, teclado.id);
        assert_eq!(stored.total.to_string(), "91.00");
    }
}
