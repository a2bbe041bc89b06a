//! Extractors whose rejections render as `{ "error": ... }` bodies.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::DeserializeOwned;

use super::HttpError;

/// Deserializes the body as JSON or as a form depending on `Content-Type`.
/// Any other (or missing) content type yields `T::default()`.
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if content_type.starts_with("application/json") {
            let Json(payload) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    HttpError::new(StatusCode::BAD_REQUEST, rejection.body_text())
                })?;
            return Ok(Self(payload));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(payload) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    HttpError::new(StatusCode::BAD_REQUEST, rejection.body_text())
                })?;
            return Ok(Self(payload));
        }

        Ok(Self(T::default()))
    }
}

/// Query string extractor rejecting malformed parameters with a JSON error.
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| HttpError::new(StatusCode::BAD_REQUEST, rejection.body_text()))?;
        Ok(Self(params))
    }
}
