//! JSON extractor that runs `validator` rules before the handler sees the payload.

use crate::errors::ErrorResponse;
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Deserializes the body like `axum::Json`, then applies the payload type's
/// `Validate` impl. Rejections carry a per-field breakdown in the error
/// envelope's `details`.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| e.into_response())?;

        if let Err(errors) = data.validate() {
            let details = errors
                .field_errors()
                .iter()
                .map(|(field, field_errors)| {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|err| {
                            err.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| err.code.to_string())
                        })
                        .collect();
                    (field.to_string(), serde_json::json!(messages))
                })
                .collect::<serde_json::Map<_, _>>();

            let body = ErrorResponse {
                error: "BadRequest".to_string(),
                message: "Request validation failed".to_string(),
                details: Some(serde_json::Value::Object(details)),
            };

            return Err((StatusCode::BAD_REQUEST, axum::Json(body)).into_response());
        }

        Ok(ValidatedJson(data))
    }
}
