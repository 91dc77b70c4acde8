//! Producto entity and its two-valued estado

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Producto availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Estado {
    Activo,
    Inactivo,
}

/// Rejected estado input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EstadoError {
    #[error("El estado no puede ser nulo")]
    Missing,

    #[error("Estado no válido: {0}")]
    Invalid(String),
}

impl Estado {
    /// Stored and serialized name
    pub fn as_str(self) -> &'static str {
        match self {
            Estado::Activo => "ACTIVO",
            Estado::Inactivo => "INACTIVO",
        }
    }

    /// Case-insensitive parse, applied when a producto is created.
    ///
    /// `"activo"`, `"Activo"` and `"ACTIVO"` all map to [`Estado::Activo`].
    /// Surrounding whitespace is not trimmed.
    pub fn normalize(raw: Option<&str>) -> Result<Self, EstadoError> {
        let raw = raw.ok_or(EstadoError::Missing)?;
        match raw.to_uppercase().as_str() {
            "ACTIVO" => Ok(Estado::Activo),
            "INACTIVO" => Ok(Estado::Inactivo),
            _ => Err(EstadoError::Invalid(raw.to_string())),
        }
    }
}

/// Exact-match parse (`ACTIVO` / `INACTIVO` only), applied on update.
impl FromStr for Estado {
    type Err = EstadoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVO" => Ok(Estado::Activo),
            "INACTIVO" => Ok(Estado::Inactivo),
            other => Err(EstadoError::Invalid(other.to_string())),
        }
    }
}

impl fmt::Display for Estado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sellable item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Teclado mecánico")]
    pub nombre: String,
    pub descripcion: Option<String>,
    /// Unit price, always positive
    #[schema(value_type = String, example = "30.00")]
    pub precio: Decimal,
    pub fecha_creacion: DateTime<Utc>,
    pub estado: Estado,
}

/// Producto fields before the store assigns an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProducto {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Decimal,
    pub fecha_creacion: DateTime<Utc>,
    pub estado: Estado,
}

impl NewProducto {
    pub fn with_id(self, id: i64) -> Producto {
        Producto {
            id,
            nombre: self.nombre,
            descripcion: self.descripcion,
            precio: self.precio,
            fecha_creacion: self.fecha_creacion,
            estado: self.estado,
        }
    }
}
