use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use serde::Serialize;
use time::OffsetDateTime;

use super::{
    genres, name_matches,
    shows::{self, ArtistShow, Schedule},
    QueryError, SearchResults,
};
use crate::forms::ArtistForm;
use entity::RecordKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct ArtistEntry {
    pub id: i32,
    pub name: String,
}

pub async fn list<C>(db: &C) -> Result<Vec<ArtistEntry>, DbErr>
where
    C: ConnectionTrait,
{
    entity::ArtistEntity::find()
        .select_only()
        .column(entity::ArtistColumn::Id)
        .column(entity::ArtistColumn::Name)
        .order_by_asc(entity::ArtistColumn::Name)
        .into_model::<ArtistEntry>()
        .all(db)
        .await
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

pub async fn search<C>(
    db: &C,
    term: &str,
    now: OffsetDateTime,
) -> Result<SearchResults<ArtistSummary>, DbErr>
where
    C: ConnectionTrait,
{
    let counts = shows::upcoming_counts(db, entity::ShowColumn::ArtistId, now).await?;
    let artists = entity::ArtistEntity::find()
        .order_by_asc(entity::ArtistColumn::Name)
        .all(db)
        .await?;
    Ok(artists
        .into_iter()
        .filter(|a| name_matches(&a.name, term))
        .map(|a| ArtistSummary {
            num_upcoming_shows: counts.get(&a.id).copied().unwrap_or_default(),
            id: a.id,
            name: a.name,
        })
        .collect::<Vec<_>>()
        .into())
}

#[derive(Debug, Clone, Serialize)]
pub struct Detail {
    #[serde(flatten)]
    pub artist: entity::Artist,
    pub genres: Vec<String>,
    #[serde(flatten)]
    pub schedule: Schedule<ArtistShow>,
}

pub async fn get<C>(db: &C, id: i32) -> Result<entity::Artist, QueryError>
where
    C: ConnectionTrait,
{
    entity::ArtistEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(QueryError::NotFound(RecordKind::Artist, id))
}

pub async fn detail<C>(db: &C, id: i32, now: OffsetDateTime) -> Result<Detail, QueryError>
where
    C: ConnectionTrait,
{
    let artist = get(db, id).await?;
    Ok(Detail {
        genres: genres::artist_genre_names(db, &artist).await?,
        schedule: shows::artist_schedule(db, id, now).await?,
        artist,
    })
}

pub async fn editable<C>(db: &C, id: i32) -> Result<(entity::Artist, Vec<String>), QueryError>
where
    C: ConnectionTrait,
{
    let artist = get(db, id).await?;
    let genres = genres::artist_genre_names(db, &artist).await?;
    Ok((artist, genres))
}

fn into_active(id: ActiveValue<i32>, form: ArtistForm) -> (entity::ArtistActive, Vec<String>) {
    (
        entity::ArtistActive {
            id,
            name: ActiveValue::Set(form.name),
            city: ActiveValue::Set(form.city),
            state: ActiveValue::Set(form.state),
            phone: ActiveValue::Set(form.phone),
            image_link: ActiveValue::Set(form.image_link),
            facebook_link: ActiveValue::Set(form.facebook_link),
            website: ActiveValue::Set(form.website),
            seeking_venue: ActiveValue::Set(form.seeking_venue),
            seeking_description: ActiveValue::Set(form.seeking_description),
        },
        form.genres,
    )
}

pub async fn create<C>(db: &C, form: ArtistForm) -> Result<entity::Artist, QueryError>
where
    C: TransactionTrait,
{
    let artist = db
        .transaction::<_, entity::Artist, QueryError>(move |txn| {
            Box::pin(async move {
                let (active, names) = into_active(ActiveValue::NotSet, form);
                let artist = active.insert(txn).await?;
                let genres = genres::resolve(txn, &names).await?;
                genres::set_artist_genres(txn, artist.id, &genres).await?;
                Ok(artist)
            })
        })
        .await?;
    tracing::info!(id = artist.id, name = %artist.name, "Artist created");
    Ok(artist)
}

pub async fn update<C>(db: &C, id: i32, form: ArtistForm) -> Result<entity::Artist, QueryError>
where
    C: TransactionTrait,
{
    let artist = db
        .transaction::<_, entity::Artist, QueryError>(move |txn| {
            Box::pin(async move {
                get(txn, id).await?;
                let (active, names) = into_active(ActiveValue::Unchanged(id), form);
                let artist = active.update(txn).await?;
                let genres = genres::resolve(txn, &names).await?;
                genres::set_artist_genres(txn, id, &genres).await?;
                Ok(artist)
            })
        })
        .await?;
    tracing::info!(id, "Artist updated");
    Ok(artist)
}

pub async fn delete<C>(db: &C, id: i32) -> Result<entity::Artist, QueryError>
where
    C: TransactionTrait,
{
    let artist = db
        .transaction::<_, entity::Artist, QueryError>(move |txn| {
            Box::pin(async move {
                let artist = get(txn, id).await?;
                entity::ShowEntity::delete_many()
                    .filter(entity::ShowColumn::ArtistId.eq(id))
                    .exec(txn)
                    .await?;
                entity::ArtistGenreEntity::delete_many()
                    .filter(entity::ArtistGenreColumn::ArtistId.eq(id))
                    .exec(txn)
                    .await?;
                entity::ArtistEntity::delete_by_id(id).exec(txn).await?;
                Ok(artist)
            })
        })
        .await?;
    tracing::info!(id, name = %artist.name, "Artist deleted");
    Ok(artist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::PaginatorTrait;
    use time::macros::datetime;

    use crate::test_support;

    fn form(name: &str, genres: &[&str]) -> ArtistForm {
        ArtistForm {
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            seeking_venue: true,
            seeking_description: Some("Looking for shows".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let db = test_support::database().await;
        test_support::artist(&db, "The Wild Sax Band").await;
        test_support::artist(&db, "Guns N Petals").await;
        test_support::artist(&db, "Matt Quevedo").await;

        let names: Vec<_> = list(&db).await.unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]);
    }

    #[tokio::test]
    async fn search_counts_upcoming_shows() {
        let db = test_support::database().await;
        let venue = test_support::venue(&db, "Park Square", "San Francisco", "CA").await;
        let sax = test_support::artist(&db, "The Wild Sax Band").await;
        test_support::artist(&db, "Guns N Petals").await;
        test_support::show(&db, venue.id, sax.id, datetime!(2035-04-01 20:00 UTC)).await;
        test_support::show(&db, venue.id, sax.id, datetime!(2035-04-08 20:00 UTC)).await;

        let results = search(&db, "A", datetime!(2024-01-01 00:00 UTC)).await.unwrap();
        assert_eq!(results.count, 2);
        assert_eq!(results.data[1].name, "The Wild Sax Band");
        assert_eq!(results.data[1].num_upcoming_shows, 2);
        assert_eq!(results.data[0].num_upcoming_shows, 0);
    }

    #[tokio::test]
    async fn search_folds_non_ascii_names() {
        let db = test_support::database().await;
        test_support::artist(&db, "BJÖRK").await;
        test_support::artist(&db, "Sigur Rós").await;
        let now = datetime!(2024-01-01 00:00 UTC);

        let results = search(&db, "björk", now).await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "BJÖRK");
        assert_eq!(search(&db, "RÓS", now).await.unwrap().count, 1);
    }

    #[tokio::test]
    async fn detail_counts_match_shows() {
        let db = test_support::database().await;
        let venue = test_support::venue(&db, "Park Square", "San Francisco", "CA").await;
        let artist = create(&db, form("Matt Quevedo", &["Jazz"])).await.unwrap();
        test_support::show(&db, venue.id, artist.id, datetime!(2019-06-15 23:00 UTC)).await;
        test_support::show(&db, venue.id, artist.id, datetime!(2035-04-01 20:00 UTC)).await;

        let detail = detail(&db, artist.id, datetime!(2024-01-01 00:00 UTC))
            .await
            .unwrap();
        assert_eq!(detail.genres, vec!["Jazz"]);
        assert_eq!(detail.schedule.past_shows_count, 1);
        assert_eq!(detail.schedule.upcoming_shows_count, 1);
        assert_eq!(detail.schedule.upcoming_shows[0].venue_name, "Park Square");
    }

    #[tokio::test]
    async fn update_replaces_genres() {
        let db = test_support::database().await;
        let artist = create(&db, form("Matt Quevedo", &["Jazz"])).await.unwrap();
        update(&db, artist.id, form("Matt Quevedo", &["Blues", "Soul"]))
            .await
            .unwrap();

        let (_, genres) = editable(&db, artist.id).await.unwrap();
        assert_eq!(genres, vec!["Blues", "Soul"]);
    }

    #[tokio::test]
    async fn delete_removes_shows() {
        let db = test_support::database().await;
        let venue = test_support::venue(&db, "Park Square", "San Francisco", "CA").await;
        let artist = create(&db, form("Matt Quevedo", &["Jazz"])).await.unwrap();
        test_support::show(&db, venue.id, artist.id, datetime!(2035-04-01 20:00 UTC)).await;

        delete(&db, artist.id).await.unwrap();
        assert_eq!(entity::ShowEntity::find().count(&db).await.unwrap(), 0);
        assert_eq!(entity::ArtistGenreEntity::find().count(&db).await.unwrap(), 0);
        assert!(matches!(
            detail(&db, artist.id, datetime!(2024-01-01 00:00 UTC)).await,
            Err(QueryError::NotFound(RecordKind::Artist, _))
        ));
    }
}
