//! Request payloads
//!
//! Field constraints are declared with `validator` and checked by the
//! `ValidatedJson` extractor before a handler runs. Messages are the
//! user-facing texts returned in the 400 field map.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::fits_amount_column;

/// Missing and `null` both become the type's default, so a required field
/// fails its validation rule instead of JSON decoding.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Rejects empty and whitespace-only strings
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Positive and storable as `NUMERIC(19, 2)`
fn precio_in_range(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || value.is_zero() {
        return Err(ValidationError::new("positive")
            .with_message(Cow::Borrowed("El precio debe ser positivo")));
    }
    if !fits_amount_column(*value) {
        return Err(ValidationError::new("max")
            .with_message(Cow::Borrowed("El precio excede el máximo permitido")));
    }
    Ok(())
}

/// Cliente create / update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ClienteDto {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "not_blank", message = "El nombre es obligatorio"))]
    #[schema(example = "Ana Torres")]
    pub nombre: String,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(
        custom(function = "not_blank", message = "El email es obligatorio"),
        email(message = "Email no válido")
    )]
    #[schema(example = "ana@example.com")]
    pub email: String,

    #[serde(default)]
    pub telefono: Option<String>,
}

/// Producto create / update payload
///
/// `estado` stays a string here: create normalizes it case-insensitively,
/// update requires the exact `ACTIVO` / `INACTIVO` spelling.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductoDto {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(
        custom(function = "not_blank", message = "El nombre es obligatorio"),
        length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres")
    )]
    #[schema(example = "Teclado mecánico")]
    pub nombre: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "La descripción no puede superar 500 caracteres"))]
    pub descripcion: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "El precio es obligatorio"),
        custom(function = "precio_in_range")
    )]
    #[schema(value_type = Option<String>, example = "30.00")]
    pub precio: Option<Decimal>,

    #[serde(default)]
    #[validate(
        required(message = "El estado es obligatorio"),
        length(min = 1, message = "El estado es obligatorio")
    )]
    #[schema(example = "ACTIVO")]
    pub estado: Option<String>,
}

/// Orden create / update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdenDto {
    /// Missing or `null` reads as 0
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(range(min = 1, message = "La cantidad debe ser al menos 1"))]
    #[schema(example = 2)]
    pub cantidad: i32,

    /// Only honoured on update; create always stamps the current time
    #[serde(default)]
    pub fecha_orden: Option<DateTime<Utc>>,

    #[schema(example = 1)]
    pub cliente_id: i64,

    #[schema(example = 1)]
    pub producto_id: i64,
}
