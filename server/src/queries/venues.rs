use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use time::OffsetDateTime;

use super::{
    genres, name_matches,
    shows::{self, Schedule, VenueShow},
    QueryError, SearchResults,
};
use crate::forms::VenueForm;
use entity::RecordKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

impl VenueSummary {
    fn new(venue: entity::Venue, counts: &HashMap<i32, i64>) -> Self {
        Self {
            num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or_default(),
            id: venue.id,
            name: venue.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Every venue grouped by (city, state), groups in lexicographic order and
/// venues within a group by name.
pub async fn areas<C>(db: &C, now: OffsetDateTime) -> Result<Vec<Area>, DbErr>
where
    C: ConnectionTrait,
{
    let counts = shows::upcoming_counts(db, entity::ShowColumn::VenueId, now).await?;
    let venues = entity::VenueEntity::find()
        .order_by_asc(entity::VenueColumn::City)
        .order_by_asc(entity::VenueColumn::State)
        .order_by_asc(entity::VenueColumn::Name)
        .all(db)
        .await?;

    let mut grouped: BTreeMap<(String, String), Vec<VenueSummary>> = BTreeMap::new();
    for venue in venues {
        grouped
            .entry((venue.city.to_owned(), venue.state.to_owned()))
            .or_default()
            .push(VenueSummary::new(venue, &counts));
    }
    Ok(grouped
        .into_iter()
        .map(|((city, state), venues)| Area {
            city,
            state,
            venues,
        })
        .collect())
}

/// Case-insensitive substring match on the venue name.
pub async fn search<C>(
    db: &C,
    term: &str,
    now: OffsetDateTime,
) -> Result<SearchResults<VenueSummary>, DbErr>
where
    C: ConnectionTrait,
{
    let counts = shows::upcoming_counts(db, entity::ShowColumn::VenueId, now).await?;
    let venues = entity::VenueEntity::find()
        .order_by_asc(entity::VenueColumn::Name)
        .all(db)
        .await?;
    Ok(venues
        .into_iter()
        .filter(|v| name_matches(&v.name, term))
        .map(|v| VenueSummary::new(v, &counts))
        .collect::<Vec<_>>()
        .into())
}

#[derive(Debug, Clone, Serialize)]
pub struct Detail {
    #[serde(flatten)]
    pub venue: entity::Venue,
    pub genres: Vec<String>,
    #[serde(flatten)]
    pub schedule: Schedule<VenueShow>,
}

pub async fn get<C>(db: &C, id: i32) -> Result<entity::Venue, QueryError>
where
    C: ConnectionTrait,
{
    entity::VenueEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(QueryError::NotFound(RecordKind::Venue, id))
}

pub async fn detail<C>(db: &C, id: i32, now: OffsetDateTime) -> Result<Detail, QueryError>
where
    C: ConnectionTrait,
{
    let venue = get(db, id).await?;
    let genres = genres::venue_genre_names(db, &venue).await?;
    let schedule = shows::venue_schedule(db, id, now).await?;
    Ok(Detail {
        venue,
        genres,
        schedule,
    })
}

/// The venue together with its genre names, as shown on the edit form.
pub async fn editable<C>(db: &C, id: i32) -> Result<(entity::Venue, Vec<String>), QueryError>
where
    C: ConnectionTrait,
{
    let venue = get(db, id).await?;
    let genres = genres::venue_genre_names(db, &venue).await?;
    Ok((venue, genres))
}

fn into_active(id: ActiveValue<i32>, form: VenueForm) -> (entity::VenueActive, Vec<String>) {
    let active = entity::VenueActive {
        id,
        name: ActiveValue::Set(form.name),
        city: ActiveValue::Set(form.city),
        state: ActiveValue::Set(form.state),
        address: ActiveValue::Set(form.address),
        phone: ActiveValue::Set(form.phone),
        image_link: ActiveValue::Set(form.image_link),
        facebook_link: ActiveValue::Set(form.facebook_link),
        website: ActiveValue::Set(form.website),
        seeking_talent: ActiveValue::Set(form.seeking_talent),
        seeking_description: ActiveValue::Set(form.seeking_description),
    };
    (active, form.genres)
}

pub async fn create<C>(db: &C, form: VenueForm) -> Result<entity::Venue, QueryError>
where
    C: TransactionTrait,
{
    let venue = db
        .transaction::<_, entity::Venue, QueryError>(move |txn| {
            Box::pin(async move {
                let (active, names) = into_active(ActiveValue::NotSet, form);
                let venue = active.insert(txn).await?;
                let genres = genres::resolve(txn, &names).await?;
                genres::set_venue_genres(txn, venue.id, &genres).await?;
                Ok(venue)
            })
        })
        .await?;
    tracing::info!(id = venue.id, name = %venue.name, "Venue created");
    Ok(venue)
}

/// Overwrites every mutable field and replaces the genre set.
pub async fn update<C>(db: &C, id: i32, form: VenueForm) -> Result<entity::Venue, QueryError>
where
    C: TransactionTrait,
{
    let venue = db
        .transaction::<_, entity::Venue, QueryError>(move |txn| {
            Box::pin(async move {
                get(txn, id).await?;
                let (active, names) = into_active(ActiveValue::Unchanged(id), form);
                let venue = active.update(txn).await?;
                let genres = genres::resolve(txn, &names).await?;
                genres::set_venue_genres(txn, id, &genres).await?;
                Ok(venue)
            })
        })
        .await?;
    tracing::info!(id, "Venue updated");
    Ok(venue)
}

/// Removes the venue along with its shows and genre links.
pub async fn delete<C>(db: &C, id: i32) -> Result<entity::Venue, QueryError>
where
    C: TransactionTrait,
{
    let venue = db
        .transaction::<_, entity::Venue, QueryError>(move |txn| {
            Box::pin(async move {
                let venue = get(txn, id).await?;
                let shows = entity::ShowEntity::delete_many()
                    .filter(entity::ShowColumn::VenueId.eq(id))
                    .exec(txn)
                    .await?;
                tracing::debug!(id, shows = shows.rows_affected, "Deleted venue shows");
                entity::VenueGenreEntity::delete_many()
                    .filter(entity::VenueGenreColumn::VenueId.eq(id))
                    .exec(txn)
                    .await?;
                entity::VenueEntity::delete_by_id(id).exec(txn).await?;
                Ok(venue)
            })
        })
        .await?;
    tracing::info!(id, name = %venue.name, "Venue deleted");
    Ok(venue)
}
