use axum::http::Uri;

use super::{
    view::{Flash, View, HOME},
    Error,
};

pub async fn home() -> View<()> {
    View::new(HOME, ())
}

/// The home page, as shown after a successful submission.
pub fn home_with(flash: Flash) -> View<()> {
    View::new(HOME, ()).flash(flash)
}

pub async fn not_found(uri: Uri) -> Error {
    tracing::debug!(%uri, "No route");
    Error::PageNotFound
}
