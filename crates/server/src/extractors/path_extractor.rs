use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use utils::AppError;

/// `Path<T>` whose rejection is a JSON `AppError` instead of axum's
/// plain-text body. An id that does not parse names no resource, so it
/// comes back as a 404.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathExtractor<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathExtractor<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;

        Ok(PathExtractor(value))
    }
}
