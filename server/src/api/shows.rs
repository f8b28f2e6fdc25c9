use axum::extract::State;
use serde_json::{json, Value};

use super::{
    extract::Form,
    pages::home_with,
    view::{Flash, View},
    AppState, Error,
};
use crate::{
    forms::{ShowForm, ShowFormDefaults, SHOW_FIELDS},
    queries,
};
use base::util::utc_now;

pub async fn shows(State(AppState(db)): State<AppState>) -> Result<View<Value>, Error> {
    let shows = queries::shows::listing(&db, utc_now()).await?;
    Ok(View::new("pages/shows.html", json!({ "shows": shows })))
}

pub async fn create_form() -> View<Value> {
    View::new(
        "forms/new_show.html",
        json!({ "form": { "fields": SHOW_FIELDS, "values": ShowFormDefaults::at(utc_now()) } }),
    )
}

pub async fn create(
    State(AppState(db)): State<AppState>,
    Form(data): Form,
) -> Result<View<()>, Error> {
    let form = ShowForm::parse(&data)?;
    queries::shows::create(&db, form).await.map_err(|e| {
        Error::write(e, "An error occurred. Show could not be listed.".to_string())
    })?;
    Ok(home_with(Flash::info("Show was successfully listed!")))
}
