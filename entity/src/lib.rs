mod artist;
mod artist_genre;
pub mod conflict;
mod genre;
mod show;
mod venue;
mod venue_genre;

use std::fmt::Display;

pub use artist::ActiveModel as ArtistActive;
pub use artist::Column as ArtistColumn;
pub use artist::Entity as ArtistEntity;
pub use artist::Model as Artist;
pub use artist_genre::ActiveModel as ArtistGenreActive;
pub use artist_genre::Column as ArtistGenreColumn;
pub use artist_genre::Entity as ArtistGenreEntity;
pub use artist_genre::Model as ArtistGenre;
pub use genre::ActiveModel as GenreActive;
pub use genre::Column as GenreColumn;
pub use genre::Entity as GenreEntity;
pub use genre::Model as Genre;
pub use show::ActiveModel as ShowActive;
pub use show::Column as ShowColumn;
pub use show::Entity as ShowEntity;
pub use show::Model as Show;
pub use show::Relation as ShowRelation;
pub use venue::ActiveModel as VenueActive;
pub use venue::Column as VenueColumn;
pub use venue::Entity as VenueEntity;
pub use venue::Model as Venue;
pub use venue_genre::ActiveModel as VenueGenreActive;
pub use venue_genre::Column as VenueGenreColumn;
pub use venue_genre::Entity as VenueGenreEntity;
pub use venue_genre::Model as VenueGenre;

/// The kinds of records stored in the directory, used when reporting
/// missing or conflicting rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Venue,
    Artist,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Venue => write!(f, "Venue"),
            RecordKind::Artist => write!(f, "Artist"),
        }
    }
}
