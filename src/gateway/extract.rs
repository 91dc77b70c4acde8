//! Validated JSON extractor
//!
//! Decodes the body and runs `validator` rules before the handler sees the
//! payload, so handlers only ever receive well-formed DTOs.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::error::ApiError;

#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // 1. Decode; malformed bodies are reported under the "body" key
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::field("body", e.body_text()))?;

        // 2. Field rules
        value.validate()?;

        Ok(ValidatedJson(value))
    }
}
