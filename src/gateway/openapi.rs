//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::dto::{ClienteDto, OrdenDto, ProductoDto};
use crate::gateway::handlers::{HealthResponse, cliente, health, orden, producto};
use crate::models::{Cliente, Estado, Orden, Producto};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Growby Orders API",
        version = "1.0.0",
        description = "Clientes, productos and ordenes with computed totals."
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        health::health_check,
        cliente::list_clientes,
        cliente::create_cliente,
        cliente::get_cliente,
        cliente::update_cliente,
        cliente::delete_cliente,
        cliente::count_clientes,
        producto::list_productos,
        producto::create_producto,
        producto::get_producto,
        producto::update_producto,
        producto::delete_producto,
        producto::count_productos,
        orden::list_ordenes,
        orden::list_ordenes_by_cliente,
        orden::create_orden,
        orden::get_orden,
        orden::update_orden,
        orden::delete_orden,
        orden::count_ordenes,
    ),
    components(
        schemas(
            HealthResponse,
            Cliente,
            Producto,
            Estado,
            Orden,
            ClienteDto,
            ProductoDto,
            OrdenDto,
        )
    ),
    tags(
        (name = "Clientes", description = "Customer records"),
        (name = "Productos", description = "Sellable items"),
        (name = "Ordenes", description = "Purchases with computed totals"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;
