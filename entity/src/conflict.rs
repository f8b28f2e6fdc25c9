use lazy_static::lazy_static;
use sea_orm::sea_query::OnConflict;

use crate::*;

lazy_static! {
    pub static ref GENRE_CONFLICT: OnConflict = OnConflict::column(GenreColumn::Name)
        .do_nothing()
        .to_owned();
    pub static ref VENUE_GENRE_CONFLICT: OnConflict =
        OnConflict::columns([VenueGenreColumn::VenueId, VenueGenreColumn::GenreId])
            .do_nothing()
            .to_owned();
    pub static ref ARTIST_GENRE_CONFLICT: OnConflict =
        OnConflict::columns([ArtistGenreColumn::ArtistId, ArtistGenreColumn::GenreId])
            .do_nothing()
            .to_owned();
}
