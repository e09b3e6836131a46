//! Validating extractors
//!
//! Axum's own `Json` and `Path` rejections are plain-text responses. These
//! wrappers turn them into validation errors so every client failure comes
//! back as the same envelope.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::validation::parse_id;
use crate::shared::{SharedError, Validator};

/// JSON body whose parse failures are reported on the `body` field
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(SharedError::validation("body", rejection.body_text()).into()),
        }
    }
}

/// Extract and validate a single `{id}` path segment
pub struct ValidId(pub Uuid);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| SharedError::validation("id", "is required"))?;

        let id = parse_id(&id).map_err(|message| SharedError::validation("id", message))?;
        Ok(Self(id))
    }
}

/// Extract and validate a `{id}/.../{targetId}` path pair
pub struct ValidIdPair(pub Uuid, pub Uuid);

impl<S> FromRequestParts<S> for ValidIdPair
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((first, second)): Path<(String, String)> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| SharedError::validation("id", "is required"))?;

        let mut v = Validator::new();
        let first = v.id("id", &first);
        let second = v.id("targetId", &second);
        v.finish()?;
        Ok(Self(first, second))
    }
}
