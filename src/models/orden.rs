use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Cliente, Producto};

/// Purchase of `cantidad` units of one producto by one cliente.
///
/// The read model embeds the referenced cliente and producto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Orden {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 2)]
    pub cantidad: i32,
    pub fecha_orden: DateTime<Utc>,
    /// `producto.precio * cantidad`
    #[schema(value_type = String, example = "60.00")]
    pub total: Decimal,
    pub cliente: Cliente,
    pub producto: Producto,
}

/// Row shape of an orden: references by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdenRecord {
    pub id: i64,
    pub cantidad: i32,
    pub fecha_orden: DateTime<Utc>,
    pub total: Decimal,
    pub cliente_id: i64,
    pub producto_id: i64,
}

impl OrdenRecord {
    /// Attach the resolved references
    pub fn into_orden(self, cliente: Cliente, producto: Producto) -> Orden {
        Orden {
            id: self.id,
            cantidad: self.cantidad,
            fecha_orden: self.fecha_orden,
            total: self.total,
            cliente,
            producto,
        }
    }
}

/// Orden row before the store assigns an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrden {
    pub cantidad: i32,
    pub fecha_orden: DateTime<Utc>,
    pub total: Decimal,
    pub cliente_id: i64,
    pub producto_id: i64,
}

impl NewOrden {
    pub fn with_id(self, id: i64) -> OrdenRecord {
        OrdenRecord {
            id,
            cantidad: self.cantidad,
            fecha_orden: self.fecha_orden,
            total: self.total,
            cliente_id: self.cliente_id,
            producto_id: self.producto_id,
        }
    }
}
