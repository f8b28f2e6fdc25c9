//! Fixtures shared by the database and router tests.

use sea_orm::{ActiveModelTrait, ActiveValue, ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use time::OffsetDateTime;

/// A fresh in-memory database with every migration applied. The pool is
/// pinned to a single connection since each sqlite memory connection is its
/// own database.
pub async fn database() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn venue(db: &DatabaseConnection, name: &str, city: &str, state: &str) -> entity::Venue {
    entity::VenueActive {
        id: ActiveValue::NotSet,
        name: ActiveValue::Set(name.to_string()),
        city: ActiveValue::Set(city.to_string()),
        state: ActiveValue::Set(state.to_string()),
        address: ActiveValue::Set("1015 Folsom Street".to_string()),
        phone: ActiveValue::Set(None),
        image_link: ActiveValue::Set(Some(format!("https://images.example.com/{}", name))),
        facebook_link: ActiveValue::Set(None),
        website: ActiveValue::Set(None),
        seeking_talent: ActiveValue::Set(false),
        seeking_description: ActiveValue::Set(None),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn artist(db: &DatabaseConnection, name: &str) -> entity::Artist {
    entity::ArtistActive {
        id: ActiveValue::NotSet,
        name: ActiveValue::Set(name.to_string()),
        city: ActiveValue::Set("San Francisco".to_string()),
        state: ActiveValue::Set("CA".to_string()),
        phone: ActiveValue::Set(None),
        image_link: ActiveValue::Set(None),
        facebook_link: ActiveValue::Set(None),
        website: ActiveValue::Set(None),
        seeking_venue: ActiveValue::Set(false),
        seeking_description: ActiveValue::Set(None),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn show(
    db: &DatabaseConnection,
    venue_id: i32,
    artist_id: i32,
    start_time: OffsetDateTime,
) -> entity::Show {
    entity::ShowActive {
        id: ActiveValue::NotSet,
        start_time: ActiveValue::Set(start_time),
        venue_id: ActiveValue::Set(venue_id),
        artist_id: ActiveValue::Set(artist_id),
    }
    .insert(db)
    .await
    .unwrap()
}
