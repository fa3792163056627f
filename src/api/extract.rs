//! Request extractors with [`ApiError`] rejections.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use crate::error::ApiError;

/// JSON request body.
///
/// Behaves like [`axum::Json`] but rejects with [`ApiError::MalformedBody`],
/// so parse failures share the API's error shape. The rejection happens
/// before the handler body runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "rejected request body");
                Err(ApiError::MalformedBody {
                    status: rejection.status(),
                    message: rejection.body_text(),
                })
            }
        }
    }
}
