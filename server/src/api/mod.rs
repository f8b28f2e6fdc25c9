mod artists;
pub mod error;
pub mod extract;
mod pages;
mod shows;
mod venues;
pub mod view;

use axum::{
    routing::{get, post},
    Router,
};
pub use error::Error;
use sea_orm::DbConn;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState(pub DbConn);

pub fn router(conn: DbConn) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/venues", get(venues::venues))
        .route("/venues/search", post(venues::search))
        .route(
            "/venues/create",
            get(venues::create_form).post(venues::create),
        )
        .route("/venues/:id", get(venues::venue).delete(venues::delete))
        .route(
            "/venues/:id/edit",
            get(venues::edit_form).post(venues::edit),
        )
        .route("/artists", get(artists::artists))
        .route("/artists/search", post(artists::search))
        .route(
            "/artists/create",
            get(artists::create_form).post(artists::create),
        )
        .route("/artists/:id", get(artists::artist).delete(artists::delete))
        .route(
            "/artists/:id/edit",
            get(artists::edit_form).post(artists::edit),
        )
        .route("/shows", get(shows::shows))
        .route("/shows/create", get(shows::create_form).post(shows::create))
        .fallback(pages::not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(AppState(conn))
}
