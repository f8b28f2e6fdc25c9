use axum::{extract::State, response::Redirect};
use serde_json::{json, Value};

use super::{
    extract::{Form, Path},
    pages::home_with,
    view::{redirect, Flash, View},
    AppState, Error,
};
use crate::{
    forms::{VenueForm, VENUE_FIELDS},
    queries,
};
use base::util::utc_now;

pub async fn venues(State(AppState(db)): State<AppState>) -> Result<View<Value>, Error> {
    let areas = queries::venues::areas(&db, utc_now()).await?;
    Ok(View::new("pages/venues.html", json!({ "areas": areas })))
}

pub async fn search(
    State(AppState(db)): State<AppState>,
    Form(data): Form,
) -> Result<View<Value>, Error> {
    let term = data.get("search_term").unwrap_or_default();
    let results = queries::venues::search(&db, term, utc_now()).await?;
    Ok(View::new(
        "pages/search_venues.html",
        json!({ "results": results, "search_term": term }),
    ))
}

pub async fn venue(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<View<Value>, Error> {
    let venue = queries::venues::detail(&db, id, utc_now()).await?;
    Ok(View::new("pages/show_venue.html", json!({ "venue": venue })))
}

pub async fn create_form() -> View<Value> {
    View::new(
        "forms/new_venue.html",
        json!({ "form": { "fields": VENUE_FIELDS, "values": VenueForm::default() } }),
    )
}

pub async fn create(
    State(AppState(db)): State<AppState>,
    Form(data): Form,
) -> Result<View<()>, Error> {
    let form = VenueForm::parse(&data)?;
    let name = form.name.to_owned();
    queries::venues::create(&db, form).await.map_err(|e| {
        Error::write(
            e,
            format!("An error occurred. Venue \"{}\" could not be listed.", name),
        )
    })?;
    Ok(home_with(Flash::info(format!(
        "Venue \"{}\" was successfully listed!",
        name
    ))))
}

pub async fn edit_form(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<View<Value>, Error> {
    let (venue, genres) = queries::venues::editable(&db, id).await?;
    let values = VenueForm::populated(&venue, genres);
    Ok(View::new(
        "forms/edit_venue.html",
        json!({ "form": { "fields": VENUE_FIELDS, "values": values }, "venue": venue }),
    ))
}

pub async fn edit(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
    Form(data): Form,
) -> Result<Redirect, Error> {
    queries::venues::get(&db, id).await?;
    let form = VenueForm::parse(&data)?;
    queries::venues::update(&db, id, form).await.map_err(|e| {
        Error::write(
            e,
            format!("An error occurred. Venue <ID: {}> could not be updated.", id),
        )
    })?;
    Ok(redirect(
        &format!("/venues/{}", id),
        Flash::info(format!("Venue <ID: {}> was successfully updated!", id)),
    ))
}

pub async fn delete(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, Error> {
    let venue = queries::venues::get(&db, id).await?;
    queries::venues::delete(&db, id).await.map_err(|e| {
        Error::write(
            e,
            format!(
                "An error occurred. Venue \"{}\" could not be deleted.",
                venue.name
            ),
        )
    })?;
    Ok(redirect(
        "/",
        Flash::info(format!("Venue \"{}\" was successfully deleted!", venue.name)),
    ))
}
