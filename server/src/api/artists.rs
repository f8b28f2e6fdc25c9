use axum::{extract::State, response::Redirect};
use serde_json::{json, Value};

use super::{
    extract::{Form, Path},
    pages::home_with,
    view::{redirect, Flash, View},
    AppState, Error,
};
use crate::{
    forms::{ArtistForm, ARTIST_FIELDS},
    queries,
};
use base::util::utc_now;

pub async fn artists(State(AppState(db)): State<AppState>) -> Result<View<Value>, Error> {
    let artists = queries::artists::list(&db).await?;
    Ok(View::new("pages/artists.html", json!({ "artists": artists })))
}

pub async fn search(
    State(AppState(db)): State<AppState>,
    Form(data): Form,
) -> Result<View<Value>, Error> {
    let term = data.get("search_term").unwrap_or_default();
    let results = queries::artists::search(&db, term, utc_now()).await?;
    Ok(View::new(
        "pages/search_artists.html",
        json!({ "results": results, "search_term": term }),
    ))
}

pub async fn artist(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<View<Value>, Error> {
    let artist = queries::artists::detail(&db, id, utc_now()).await?;
    Ok(View::new("pages/show_artist.html", json!({ "artist": artist })))
}

pub async fn create_form() -> View<Value> {
    View::new(
        "forms/new_artist.html",
        json!({ "form": { "fields": ARTIST_FIELDS, "values": ArtistForm::default() } }),
    )
}

pub async fn create(
    State(AppState(db)): State<AppState>,
    Form(data): Form,
) -> Result<View<()>, Error> {
    let form = ArtistForm::parse(&data)?;
    let name = form.name.to_owned();
    queries::artists::create(&db, form).await.map_err(|e| {
        Error::write(
            e,
            format!("An error occurred. Artist \"{}\" could not be listed.", name),
        )
    })?;
    Ok(home_with(Flash::info(format!(
        "Artist \"{}\" was successfully listed!",
        name
    ))))
}

pub async fn edit_form(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<View<Value>, Error> {
    let (artist, genres) = queries::artists::editable(&db, id).await?;
    let values = ArtistForm::populated(&artist, genres);
    Ok(View::new(
        "forms/edit_artist.html",
        json!({ "form": { "fields": ARTIST_FIELDS, "values": values }, "artist": artist }),
    ))
}

pub async fn edit(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
    Form(data): Form,
) -> Result<Redirect, Error> {
    queries::artists::get(&db, id).await?;
    let form = ArtistForm::parse(&data)?;
    queries::artists::update(&db, id, form).await.map_err(|e| {
        Error::write(
            e,
            format!("An error occurred. Artist <ID: {}> could not be updated.", id),
        )
    })?;
    Ok(redirect(
        &format!("/artists/{}", id),
        Flash::info(format!("Artist <ID: {}> was successfully updated!", id)),
    ))
}

pub async fn delete(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, Error> {
    let artist = queries::artists::get(&db, id).await?;
    queries::artists::delete(&db, id).await.map_err(|e| {
        Error::write(
            e,
            format!(
                "An error occurred. Artist \"{}\" could not be deleted.",
                artist.name
            ),
        )
    })?;
    Ok(redirect(
        "/",
        Flash::info(format!("Artist \"{}\" was successfully deleted!", artist.name)),
    ))
}
