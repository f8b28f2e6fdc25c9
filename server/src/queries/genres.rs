use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

use base::util::dedup;
use entity::conflict::{ARTIST_GENRE_CONFLICT, GENRE_CONFLICT, VENUE_GENRE_CONFLICT};

/// Looks a genre up by its exact name, creating it when missing. The insert
/// leans on the unique constraint of the name column, so concurrent callers
/// converge on a single row.
pub async fn get_or_create<C>(db: &C, name: &str) -> Result<entity::Genre, DbErr>
where
    C: ConnectionTrait,
{
    entity::GenreEntity::insert(entity::GenreActive {
        id: ActiveValue::NotSet,
        name: ActiveValue::Set(name.to_owned()),
    })
    .on_conflict(GENRE_CONFLICT.to_owned())
    .exec_without_returning(db)
    .await?;
    entity::GenreEntity::find()
        .filter(entity::GenreColumn::Name.eq(name))
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Genre {}", name)))
}

pub async fn resolve<C>(db: &C, names: &[String]) -> Result<Vec<entity::Genre>, DbErr>
where
    C: ConnectionTrait,
{
    let mut genres = Vec::new();
    for name in dedup(names.to_vec()) {
        genres.push(get_or_create(db, &name).await?);
    }
    Ok(genres)
}

/// Replaces the genre set of a venue wholesale.
pub async fn set_venue_genres<C>(
    db: &C,
    venue_id: i32,
    genres: &[entity::Genre],
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    entity::VenueGenreEntity::delete_many()
        .filter(entity::VenueGenreColumn::VenueId.eq(venue_id))
        .exec(db)
        .await?;
    if genres.is_empty() {
        return Ok(());
    }
    entity::VenueGenreEntity::insert_many(genres.iter().map(|g| entity::VenueGenreActive {
        venue_id: ActiveValue::Set(venue_id),
        genre_id: ActiveValue::Set(g.id),
    }))
    .on_conflict(VENUE_GENRE_CONFLICT.to_owned())
    .exec_without_returning(db)
    .await?;
    Ok(())
}

/// Replaces the genre set of an artist wholesale.
pub async fn set_artist_genres<C>(
    db: &C,
    artist_id: i32,
    genres: &[entity::Genre],
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    entity::ArtistGenreEntity::delete_many()
        .filter(entity::ArtistGenreColumn::ArtistId.eq(artist_id))
        .exec(db)
        .await?;
    if genres.is_empty() {
        return Ok(());
    }
    entity::ArtistGenreEntity::insert_many(genres.iter().map(|g| entity::ArtistGenreActive {
        artist_id: ActiveValue::Set(artist_id),
        genre_id: ActiveValue::Set(g.id),
    }))
    .on_conflict(ARTIST_GENRE_CONFLICT.to_owned())
    .exec_without_returning(db)
    .await?;
    Ok(())
}

pub async fn venue_genre_names<C>(db: &C, venue: &entity::Venue) -> Result<Vec<String>, DbErr>
where
    C: ConnectionTrait,
{
    Ok(venue
        .find_related(entity::GenreEntity)
        .order_by_asc(entity::GenreColumn::Name)
        .all(db)
        .await?
        .into_iter()
        .map(|g| g.name)
        .collect())
}

pub async fn artist_genre_names<C>(db: &C, artist: &entity::Artist) -> Result<Vec<String>, DbErr>
where
    C: ConnectionTrait,
{
    Ok(artist
        .find_related(entity::GenreEntity)
        .order_by_asc(entity::GenreColumn::Name)
        .all(db)
        .await?
        .into_iter()
        .map(|g| g.name)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::PaginatorTrait;

    use crate::test_support;

    #[tokio::test]
    async fn get_or_create_reuses_existing_genre() {
        let db = test_support::database().await;
        let first = get_or_create(&db, "Jazz").await.unwrap();
        let second = get_or_create(&db, "Jazz").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(entity::GenreEntity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn genre_names_are_case_sensitive() {
        let db = test_support::database().await;
        let upper = get_or_create(&db, "Jazz").await.unwrap();
        let lower = get_or_create(&db, "jazz").await.unwrap();
        assert_ne!(upper.id, lower.id);
    }

    #[tokio::test]
    async fn resolve_deduplicates_names() {
        let db = test_support::database().await;
        let names = vec!["Jazz".to_string(), "Blues".to_string(), "Jazz".to_string()];
        let genres = resolve(&db, &names).await.unwrap();
        let names: Vec<_> = genres.into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Blues", "Jazz"]);
    }

    #[tokio::test]
    async fn genre_set_is_replaced() {
        let db = test_support::database().await;
        let venue = test_support::venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let first = resolve(&db, &["Jazz".to_string(), "Reggae".to_string()])
            .await
            .unwrap();
        set_venue_genres(&db, venue.id, &first).await.unwrap();
        let second = resolve(&db, &["Folk".to_string()]).await.unwrap();
        set_venue_genres(&db, venue.id, &second).await.unwrap();

        assert_eq!(venue_genre_names(&db, &venue).await.unwrap(), vec!["Folk"]);
        // replaced genres stay behind
        assert_eq!(entity::GenreEntity::find().count(&db).await.unwrap(), 3);
    }
}
