//! Orden endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::super::error::ApiError;
use super::super::extract::ValidatedJson;
use super::super::state::AppState;
use crate::dto::OrdenDto;
use crate::models::Orden;

/// List all ordenes
#[utoipa::path(
    get,
    path = "/api/ordenes",
    responses((status = 200, description = "All ordenes", body = [Orden])),
    tag = "Ordenes"
)]
pub async fn list_ordenes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Orden>>, ApiError> {
    Ok(Json(state.ordenes.find_all().await?))
}

/// Ordenes placed by one cliente
#[utoipa::path(
    get,
    path = "/api/ordenes/cliente/{clienteId}",
    params(("clienteId" = i64, Path, description = "Cliente id")),
    responses((status = 200, description = "Ordenes of the cliente, possibly empty", body = [Orden])),
    tag = "Ordenes"
)]
pub async fn list_ordenes_by_cliente(
    State(state): State<Arc<AppState>>,
    Path(cliente_id): Path<i64>,
) -> Result<Json<Vec<Orden>>, ApiError> {
    Ok(Json(state.ordenes.find_by_cliente_id(cliente_id).await?))
}

/// Place an orden
///
/// `total` is computed as `producto.precio * cantidad`; `fechaOrden` is set
/// to the current time.
#[utoipa::path(
    post,
    path = "/api/ordenes",
    request_body = OrdenDto,
    responses(
        (status = 201, description = "Orden created", body = Orden),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Producto no encontrado / Cliente no encontrado", body = String, content_type = "text/plain")
    ),
    tag = "Ordenes"
)]
pub async fn create_orden(
    State(state): State<Arc<AppState>>,
    ValidatedJson(dto): ValidatedJson<OrdenDto>,
) -> Result<(StatusCode, Json<Orden>), ApiError> {
    let orden = state.ordenes.save(dto).await?;
    Ok((StatusCode::CREATED, Json(orden)))
}

/// Get an orden by id
#[utoipa::path(
    get,
    path = "/api/ordenes/{id}",
    params(("id" = i64, Path, description = "Orden id")),
    responses(
        (status = 200, description = "Orden found", body = Orden),
        (status = 404, description = "No orden with this id")
    ),
    tag = "Ordenes"
)]
pub async fn get_orden(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Orden>, ApiError> {
    state
        .ordenes
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// Replace an orden, recomputing its total
#[utoipa::path(
    put,
    path = "/api/ordenes/{id}",
    params(("id" = i64, Path, description = "Orden id")),
    request_body = OrdenDto,
    responses(
        (status = 200, description = "Orden updated", body = Orden),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Orden no encontrada / Producto no encontrado / Cliente no encontrado", body = String, content_type = "text/plain")
    ),
    tag = "Ordenes"
)]
pub async fn update_orden(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<OrdenDto>,
) -> Result<Json<Orden>, ApiError> {
    Ok(Json(state.ordenes.update(id, dto).await?))
}

/// Delete an orden
#[utoipa::path(
    delete,
    path = "/api/ordenes/{id}",
    params(("id" = i64, Path, description = "Orden id")),
    responses((status = 204, description = "Orden deleted")),
    tag = "Ordenes"
)]
pub async fn delete_orden(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.ordenes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Number of ordenes
#[utoipa::path(
    get,
    path = "/api/ordenes/count",
    responses((status = 200, description = "Orden count", body = i64)),
    tag = "Ordenes"
)]
pub async fn count_ordenes(State(state): State<Arc<AppState>>) -> Result<Json<i64>, ApiError> {
    Ok(Json(state.ordenes.count_all().await?))
}
