//! Producto endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::super::error::ApiError;
use super::super::extract::ValidatedJson;
use super::super::state::AppState;
use crate::dto::ProductoDto;
use crate::models::Producto;

/// List all productos
#[utoipa::path(
    get,
    path = "/api/productos",
    responses((status = 200, description = "All productos", body = [Producto])),
    tag = "Productos"
)]
pub async fn list_productos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Producto>>, ApiError> {
    Ok(Json(state.productos.find_all().await?))
}

/// Create a producto
///
/// `estado` is matched case-insensitively against ACTIVO / INACTIVO.
#[utoipa::path(
    post,
    path = "/api/productos",
    request_body = ProductoDto,
    responses(
        (status = 201, description = "Producto created", body = Producto),
        (status = 400, description = "Validation failed or estado not recognised")
    ),
    tag = "Productos"
)]
pub async fn create_producto(
    State(state): State<Arc<AppState>>,
    ValidatedJson(dto): ValidatedJson<ProductoDto>,
) -> Result<(StatusCode, Json<Producto>), ApiError> {
    let producto = state.productos.save(dto).await?;
    Ok((StatusCode::CREATED, Json(producto)))
}

/// Get a producto by id
#[utoipa::path(
    get,
    path = "/api/productos/{id}",
    params(("id" = i64, Path, description = "Producto id")),
    responses(
        (status = 200, description = "Producto found", body = Producto),
        (status = 404, description = "No producto with this id")
    ),
    tag = "Productos"
)]
pub async fn get_producto(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Producto>, ApiError> {
    state
        .productos
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// Replace a producto's fields
///
/// `estado` must be exactly ACTIVO or INACTIVO.
#[utoipa::path(
    put,
    path = "/api/productos/{id}",
    params(("id" = i64, Path, description = "Producto id")),
    request_body = ProductoDto,
    responses(
        (status = 200, description = "Producto updated", body = Producto),
        (status = 400, description = "Validation failed or estado not recognised"),
        (status = 404, description = "Producto no encontrado", body = String, content_type = "text/plain")
    ),
    tag = "Productos"
)]
pub async fn update_producto(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<ProductoDto>,
) -> Result<Json<Producto>, ApiError> {
    Ok(Json(state.productos.update(id, dto).await?))
}

/// Delete a producto without ordenes
#[utoipa::path(
    delete,
    path = "/api/productos/{id}",
    params(("id" = i64, Path, description = "Producto id")),
    responses(
        (status = 204, description = "Producto deleted"),
        (status = 400, description = "Producto still referenced by ordenes", body = String, content_type = "text/plain")
    ),
    tag = "Productos"
)]
pub async fn delete_producto(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.productos.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Number of productos
#[utoipa::path(
    get,
    path = "/api/productos/count",
    responses((status = 200, description = "Producto count", body = i64)),
    tag = "Productos"
)]
pub async fn count_productos(State(state): State<Arc<AppState>>) -> Result<Json<i64>, ApiError> {
    Ok(Json(state.productos.count_all().await?))
}
