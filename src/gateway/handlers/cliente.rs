//! Cliente endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::super::error::ApiError;
use super::super::extract::ValidatedJson;
use super::super::state::AppState;
use crate::dto::ClienteDto;
use crate::models::Cliente;

pub const CLIENTE_DELETED: &str = "Cliente eliminado con éxito.";

/// List all clientes
#[utoipa::path(
    get,
    path = "/api/clientes",
    responses((status = 200, description = "All clientes", body = [Cliente])),
    tag = "Clientes"
)]
pub async fn list_clientes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Cliente>>, ApiError> {
    Ok(Json(state.clientes.find_all().await?))
}

/// Create a cliente
#[utoipa::path(
    post,
    path = "/api/clientes",
    request_body = ClienteDto,
    responses(
        (status = 201, description = "Cliente created", body = Cliente),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "El email ya está en uso", body = String, content_type = "text/plain")
    ),
    tag = "Clientes"
)]
pub async fn create_cliente(
    State(state): State<Arc<AppState>>,
    ValidatedJson(dto): ValidatedJson<ClienteDto>,
) -> Result<(StatusCode, Json<Cliente>), ApiError> {
    let cliente = state.clientes.save(dto).await?;
    Ok((StatusCode::CREATED, Json(cliente)))
}

/// Get a cliente by id
#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    params(("id" = i64, Path, description = "Cliente id")),
    responses(
        (status = 200, description = "Cliente found", body = Cliente),
        (status = 404, description = "No cliente with this id")
    ),
    tag = "Clientes"
)]
pub async fn get_cliente(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Cliente>, ApiError> {
    state
        .clientes
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// Replace a cliente's fields
#[utoipa::path(
    put,
    path = "/api/clientes/{id}",
    params(("id" = i64, Path, description = "Cliente id")),
    request_body = ClienteDto,
    responses(
        (status = 200, description = "Cliente updated", body = Cliente),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Cliente no encontrado / El email ya está en uso", body = String, content_type = "text/plain")
    ),
    tag = "Clientes"
)]
pub async fn update_cliente(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<ClienteDto>,
) -> Result<Json<Cliente>, ApiError> {
    Ok(Json(state.clientes.update(id, dto).await?))
}

/// Delete a cliente without ordenes
#[utoipa::path(
    delete,
    path = "/api/clientes/{id}",
    params(("id" = i64, Path, description = "Cliente id")),
    responses(
        (status = 200, description = "Cliente eliminado con éxito.", body = String, content_type = "text/plain"),
        (status = 400, description = "Cliente still referenced by ordenes", body = String, content_type = "text/plain")
    ),
    tag = "Clientes"
)]
pub async fn delete_cliente(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, &'static str), ApiError> {
    state.clientes.delete(id).await?;
    Ok((StatusCode::OK, CLIENTE_DELETED))
}

/// Number of clientes
#[utoipa::path(
    get,
    path = "/api/clientes/count",
    responses((status = 200, description = "Cliente count", body = i64)),
    tag = "Clientes"
)]
pub async fn count_clientes(State(state): State<Arc<AppState>>) -> Result<Json<i64>, ApiError> {
    Ok(Json(state.clientes.count_all().await?))
}
