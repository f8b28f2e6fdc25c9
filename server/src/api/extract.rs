use axum::{
    async_trait,
    body::HttpBody,
    extract::{FromRequest, FromRequestParts, Path as AxumPath},
    http::{request::Parts, Request},
    BoxError, Form as AxumForm,
};
use serde::de::DeserializeOwned;

use super::Error;
use crate::forms::FormData;

/// Path parameters that fail to deserialize (e.g. a non-integer id) are
/// treated as an unknown page.
pub struct Path<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AxumPath(t) = AxumPath::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(%e, "Invalid URL path");
                Error::PageNotFound
            })?;
        Ok(Self(t))
    }
}

/// A url-encoded form body, keeping repeated keys.
pub struct Form(pub FormData);

#[async_trait]
impl<S, B> FromRequest<S, B> for Form
where
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let AxumForm(pairs) = AxumForm::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|e| Error::BadRequest(e.to_string()))?;
        Ok(Self(FormData::new(pairs)))
    }
}
