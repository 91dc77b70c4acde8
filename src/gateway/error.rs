//! HTTP error mapping
//!
//! Every failure leaving a handler is an [`ApiError`]: a kind, which fixes
//! the status code, plus a body.

use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use validator::ValidationErrors;

use crate::error::{ServiceError, StoreError};

pub const CLIENTE_CONFLICT: &str = "No se puede eliminar el cliente porque tiene órdenes asociadas.";
pub const PRODUCTO_CONFLICT: &str =
    "No se puede eliminar el producto porque tiene órdenes asociadas.";
pub const ORDEN_CONFLICT: &str = "La orden referencia un cliente o producto inexistente.";
pub const INTERNAL_ERROR: &str = "Error interno del servidor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    NotFound,
    /// Kept on 404 for compatibility with existing clients
    DuplicateEmail,
    InvalidEstado,
    Validation,
    ReferentialConflict,
    Internal,
}

impl ApiErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::InvalidEstado => "INVALID_ESTADO",
            Self::Validation => "VALIDATION",
            Self::ReferentialConflict => "REFERENTIAL_CONFLICT",
            Self::Internal => "INTERNAL",
        }
    }

    pub fn http_status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::DuplicateEmail => StatusCode::NOT_FOUND,
            Self::InvalidEstado => StatusCode::BAD_REQUEST,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::ReferentialConflict => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorBody {
    Empty,
    /// Rendered as `text/plain`
    Message(String),
    /// Field name to first failure message, rendered as JSON
    Fields(BTreeMap<String, String>),
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub body: ApiErrorBody,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            body: ApiErrorBody::Message(message.into()),
        }
    }

    /// Bare 404, used when a lookup by id finds nothing
    pub fn not_found() -> Self {
        Self {
            kind: ApiErrorKind::NotFound,
            body: ApiErrorBody::Empty,
        }
    }

    pub fn fields(fields: BTreeMap<String, String>) -> Self {
        Self {
            kind: ApiErrorKind::Validation,
            body: ApiErrorBody::Fields(fields),
        }
    }

    pub fn field(name: &str, message: impl Into<String>) -> Self {
        Self::fields(BTreeMap::from([(name.to_string(), message.into())]))
    }

    pub fn status(&self) -> StatusCode {
        self.kind.http_status()
    }
}

/// First message of every failing field
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let first = errs.first()?;
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            Some((field.to_string(), message))
        })
        .collect()
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::fields(field_messages(&errors))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ReferentialConflict { table } => {
                let message = match table {
                    "clientes" => CLIENTE_CONFLICT,
                    "productos" => PRODUCTO_CONFLICT,
                    _ => ORDEN_CONFLICT,
                };
                Self::new(ApiErrorKind::ReferentialConflict, message)
            }
            StoreError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                Self::new(ApiErrorKind::Internal, INTERNAL_ERROR)
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::DuplicateEmail => {
                Self::new(ApiErrorKind::DuplicateEmail, ServiceError::DuplicateEmail.to_string())
            }
            ServiceError::InvalidEstado(e) => Self::new(ApiErrorKind::InvalidEstado, e.to_string()),
            ServiceError::MissingPrecio => {
                Self::field("precio", ServiceError::MissingPrecio.to_string())
            }
            ServiceError::TotalOutOfRange => {
                Self::field("total", ServiceError::TotalOutOfRange.to_string())
            }
            ServiceError::ClienteNotFound(msg)
            | ServiceError::ProductoNotFound(msg)
            | ServiceError::OrdenNotFound(msg) => Self::new(ApiErrorKind::NotFound, msg),
            ServiceError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.body {
            ApiErrorBody::Empty => status.into_response(),
            ApiErrorBody::Message(message) => (status, message).into_response(),
            ApiErrorBody::Fields(fields) => (status, Json(fields)).into_response(),
        }
    }
}
