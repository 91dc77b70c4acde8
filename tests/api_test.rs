//! End-to-end HTTP tests against the router over the in-memory store

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use growby::{AppState, Repositories, router};

fn app() -> Router {
    router(Arc::new(AppState::new(Repositories::in_memory())))
}

/// Send one request; returns status, content-type and raw body
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String, String) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn create_cliente(app: &Router, email: &str) -> Value {
    let (status, _, body) = send(
        app,
        Method::POST,
        "/api/clientes",
        Some(json!({"nombre": "Ana", "email": email, "telefono": "555-0101"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    serde_json::from_str(&body).unwrap()
}

async fn create_producto(app: &Router, precio: &str) -> Value {
    let (status, _, body) = send(
        app,
        Method::POST,
        "/api/productos",
        Some(json!({"nombre": "Teclado", "descripcion": "Mecánico", "precio": precio, "estado": "activo"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn test_create_orden_computes_total() {
    let app = app();
    let cliente = create_cliente(&app, "ana@example.com").await;
    let producto = create_producto(&app, "30.00").await;
    assert_eq!(producto["estado"], "ACTIVO");

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/ordenes",
        Some(json!({"cantidad": 2, "clienteId": cliente["id"], "productoId": producto["id"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let orden: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(orden["total"], "60.00");
    assert_eq!(orden["cantidad"], 2);
    assert_eq!(orden["cliente"]["email"], "ana@example.com");
    assert_eq!(orden["producto"]["precio"], "30.00");
    assert!(orden["fechaOrden"].is_string());

    let (status, _, body) = send(&app, Method::GET, "/api/ordenes/count", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "1");
}

#[tokio::test]
async fn test_update_cliente_with_foreign_email_is_404() {
    let app = app();
    create_cliente(&app, "uno@example.com").await;
    create_cliente(&app, "dos@example.com").await;

    let (status, content_type, body) = send(
        &app,
        Method::PUT,
        "/api/clientes/1",
        Some(json!({"nombre": "Uno", "email": "dos@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body, "El email ya está en uso");
}

#[tokio::test]
async fn test_create_cliente_duplicate_email_is_404() {
    let app = app();
    create_cliente(&app, "ana@example.com").await;

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/clientes",
        Some(json!({"nombre": "Otra", "email": "ana@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "El email ya está en uso");
}

#[tokio::test]
async fn test_delete_referenced_cliente_is_400() {
    let app = app();
    let cliente = create_cliente(&app, "ana@example.com").await;
    let producto = create_producto(&app, "10.00").await;
    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/ordenes",
        Some(json!({"cantidad": 1, "clienteId": cliente["id"], "productoId": producto["id"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, body) = send(&app, Method::DELETE, "/api/clientes/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "No se puede eliminar el cliente porque tiene órdenes asociadas.");

    let (status, _, body) = send(&app, Method::DELETE, "/api/productos/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "No se puede eliminar el producto porque tiene órdenes asociadas.");

    // Removing the orden releases both
    let (status, _, _) = send(&app, Method::DELETE, "/api/ordenes/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _, body) = send(&app, Method::DELETE, "/api/clientes/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Cliente eliminado con éxito.");
    let (status, _, _) = send(&app, Method::DELETE, "/api/productos/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_validation_failure_returns_field_map() {
    let app = app();
    let (status, content_type, body) = send(
        &app,
        Method::POST,
        "/api/clientes",
        Some(json!({"nombre": " ", "email": "no-es-email"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(content_type.starts_with("application/json"));

    let fields: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(fields["nombre"], "El nombre es obligatorio");
    assert_eq!(fields["email"], "Email no válido");

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/productos",
        Some(json!({"nombre": "Mouse", "precio": "-1", "estado": "ACTIVO"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(fields["precio"], "El precio debe ser positivo");

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/ordenes",
        Some(json!({"cantidad": 0, "clienteId": 1, "productoId": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(fields["cantidad"], "La cantidad debe ser al menos 1");
}

#[tokio::test]
async fn test_missing_or_null_fields_return_field_map() {
    let app = app();
    let cases = [
        ("/api/clientes", json!({"email": "a@b.com"}), "nombre", "El nombre es obligatorio"),
        ("/api/clientes", json!({"nombre": "A", "email": null}), "email", "El email es obligatorio"),
        (
            "/api/productos",
            json!({"nombre": null, "precio": "1.00", "estado": "ACTIVO"}),
            "nombre",
            "El nombre es obligatorio",
        ),
        (
            "/api/ordenes",
            json!({"clienteId": 1, "productoId": 1}),
            "cantidad",
            "La cantidad debe ser al menos 1",
        ),
        (
            "/api/ordenes",
            json!({"cantidad": null, "clienteId": 1, "productoId": 1}),
            "cantidad",
            "La cantidad debe ser al menos 1",
        ),
    ];

    for (uri, payload, field, message) in cases {
        let (status, content_type, body) = send(&app, Method::POST, uri, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}: {body}");
        assert!(content_type.starts_with("application/json"), "{uri}");
        let fields: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(fields[field], message, "{uri}: {body}");
        assert!(fields.get("body").is_none(), "{uri}: {body}");
    }
}

#[tokio::test]
async fn test_amounts_beyond_column_range_are_400() {
    let app = app();
    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/productos",
        Some(json!({"nombre": "Mouse", "precio": "50000000000000000000000000000", "estado": "ACTIVO"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(fields["precio"], "El precio excede el máximo permitido");

    let cliente = create_cliente(&app, "ana@example.com").await;
    let producto = create_producto(&app, "99999999999999999.99").await;
    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/ordenes",
        Some(json!({"cantidad": 2, "clienteId": cliente["id"], "productoId": producto["id"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(fields["total"], "El total de la orden excede el máximo permitido");

    let (_, _, body) = send(&app, Method::GET, "/api/ordenes/count", None).await;
    assert_eq!(body, "0");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/clientes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let fields: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(fields["body"].is_string());
}

#[tokio::test]
async fn test_missing_records_are_404() {
    let app = app();
    for uri in ["/api/clientes/9", "/api/productos/9", "/api/ordenes/9"] {
        let (status, _, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body.is_empty(), "{uri}");
    }

    let (status, _, body) = send(
        &app,
        Method::PUT,
        "/api/productos/9",
        Some(json!({"nombre": "Mouse", "precio": "1.00", "estado": "ACTIVO"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Producto no encontrado");

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/ordenes",
        Some(json!({"cantidad": 1, "clienteId": 9, "productoId": 9})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Producto no encontrado");
}

#[tokio::test]
async fn test_producto_estado_rules() {
    let app = app();

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/productos",
        Some(json!({"nombre": "Mouse", "precio": "5.00", "estado": "AGOTADO"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Estado no válido: AGOTADO");

    create_producto(&app, "5.00").await;
    let (status, _, body) = send(
        &app,
        Method::PUT,
        "/api/productos/1",
        Some(json!({"nombre": "Mouse", "precio": "6.00", "estado": "inactivo"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Estado no válido: inactivo");

    let (status, _, body) = send(
        &app,
        Method::PUT,
        "/api/productos/1",
        Some(json!({"nombre": "Mouse", "precio": "6.00", "estado": "INACTIVO"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let producto: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(producto["estado"], "INACTIVO");
    assert_eq!(producto["precio"], "6.00");
}

#[tokio::test]
async fn test_ordenes_by_cliente_and_update() {
    let app = app();
    let ana = create_cliente(&app, "ana@example.com").await;
    let luis = create_cliente(&app, "luis@example.com").await;
    let producto = create_producto(&app, "2.50").await;

    for cliente in [&ana, &ana, &luis] {
        let (status, _, _) = send(
            &app,
            Method::POST,
            "/api/ordenes",
            Some(json!({"cantidad": 1, "clienteId": cliente["id"], "productoId": producto["id"]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, _, body) = send(&app, Method::GET, "/api/ordenes/cliente/1", None).await;
    let list: Vec<Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(list.len(), 2);

    let (status, _, body) = send(
        &app,
        Method::PUT,
        "/api/ordenes/3",
        Some(json!({
            "cantidad": 4,
            "fechaOrden": "2024-05-01T10:00:00Z",
            "clienteId": ana["id"],
            "productoId": producto["id"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let orden: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(orden["total"], "10.00");
    assert_eq!(orden["fechaOrden"], "2024-05-01T10:00:00Z");

    let (_, _, body) = send(&app, Method::GET, "/api/ordenes/cliente/1", None).await;
    let list: Vec<Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(list.len(), 3);

    let (status, _, body) = send(
        &app,
        Method::PUT,
        "/api/ordenes/99",
        Some(json!({"cantidad": 1, "clienteId": 1, "productoId": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Orden no encontrada");
}

#[tokio::test]
async fn test_health_and_docs() {
    let app = app();
    let (status, _, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert!(health["timestampMs"].as_i64().unwrap() > 0);

    let (status, _, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/api/ordenes/cliente/{clienteId}"));
}
