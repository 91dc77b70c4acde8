pub mod error;
pub mod extract;
pub mod handlers;
pub mod openapi;
pub mod state;

use axum::{Router, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::GatewayConfig;
use handlers::{cliente, health, orden, producto};
use state::AppState;

/// Build the complete router: resource routes, Swagger UI and request tracing
pub fn router(state: Arc<AppState>) -> Router {
    let clientes = Router::new()
        .route(
            "/api/clientes",
            get(cliente::list_clientes).post(cliente::create_cliente),
        )
        .route("/api/clientes/count", get(cliente::count_clientes))
        .route(
            "/api/clientes/{id}",
            get(cliente::get_cliente)
                .put(cliente::update_cliente)
                .delete(cliente::delete_cliente),
        );

    let productos = Router::new()
        .route(
            "/api/productos",
            get(producto::list_productos).post(producto::create_producto),
        )
        .route("/api/productos/count", get(producto::count_productos))
        .route(
            "/api/productos/{id}",
            get(producto::get_producto)
                .put(producto::update_producto)
                .delete(producto::delete_producto),
        );

    let ordenes = Router::new()
        .route(
            "/api/ordenes",
            get(orden::list_ordenes).post(orden::create_orden),
        )
        .route("/api/ordenes/count", get(orden::count_ordenes))
        .route(
            "/api/ordenes/cliente/{clienteId}",
            get(orden::list_ordenes_by_cliente),
        )
        .route(
            "/api/ordenes/{id}",
            get(orden::get_orden)
                .put(orden::update_orden)
                .delete(orden::delete_orden),
        );

    Router::new()
        .route("/api/health", get(health::health_check))
        .merge(clientes)
        .merge(productos)
        .merge(ordenes)
        .with_state(state)
        // OpenAPI / Swagger UI (stateless, added after with_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP gateway and serve until the process stops
pub async fn run_server(config: &GatewayConfig, state: Arc<AppState>) -> std::io::Result<()> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await.inspect_err(|e| {
        tracing::error!(
            "❌ Failed to bind to {}: {} (port {} may already be in use)",
            addr,
            e,
            config.port
        );
    })?;

    tracing::info!("🚀 Gateway listening on http://{}", addr);
    tracing::info!("📖 API Docs: http://{}/docs", addr);

    axum::serve(listener, app).await
}
