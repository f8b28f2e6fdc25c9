use sea_orm::{
    sea_query::{Expr, SimpleExpr},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    TransactionTrait,
};
use serde::Serialize;
use std::collections::HashMap;
use time::OffsetDateTime;

use super::QueryError;
use crate::forms::ShowForm;
use entity::RecordKind;

/// Which side of `now` a show falls on. A show starting exactly at `now`
/// is neither past nor upcoming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Past,
    Upcoming,
}

impl Timeframe {
    fn condition(self, now: OffsetDateTime) -> SimpleExpr {
        match self {
            Timeframe::Past => entity::ShowColumn::StartTime.lt(now),
            Timeframe::Upcoming => entity::ShowColumn::StartTime.gt(now),
        }
    }
}

#[derive(FromQueryResult)]
struct ShowCount {
    owner_id: i32,
    count: i64,
}

/// Number of upcoming shows keyed by the id stored in `owner`
/// (either the venue or the artist column).
pub async fn upcoming_counts<C>(
    db: &C,
    owner: entity::ShowColumn,
    now: OffsetDateTime,
) -> Result<HashMap<i32, i64>, DbErr>
where
    C: ConnectionTrait,
{
    Ok(entity::ShowEntity::find()
        .select_only()
        .column_as(owner, "owner_id")
        .column_as(Expr::col(entity::ShowColumn::Id).count(), "count")
        .filter(Timeframe::Upcoming.condition(now))
        .group_by(owner)
        .into_model::<ShowCount>()
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.owner_id, c.count))
        .collect())
}

/// A show as listed on a venue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct VenueShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
}

/// A show as listed on an artist page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct ArtistShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct ListedShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
}

/// Shows of a single venue or artist, split around `now`. Past shows are
/// the most recent first, upcoming ones the soonest first.
#[derive(Debug, Clone, Serialize)]
pub struct Schedule<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<T> Schedule<T> {
    /// Both lists are expected in ascending start time.
    fn new(mut past_shows: Vec<T>, upcoming_shows: Vec<T>) -> Self {
        past_shows.reverse();
        Self {
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

async fn venue_shows<C>(
    db: &C,
    venue_id: i32,
    timeframe: Timeframe,
    now: OffsetDateTime,
) -> Result<Vec<VenueShow>, DbErr>
where
    C: ConnectionTrait,
{
    entity::ShowEntity::find()
        .select_only()
        .column(entity::ShowColumn::ArtistId)
        .column_as(entity::ArtistColumn::Name, "artist_name")
        .column_as(entity::ArtistColumn::ImageLink, "artist_image_link")
        .column(entity::ShowColumn::StartTime)
        .join(JoinType::InnerJoin, entity::ShowRelation::Artist.def())
        .filter(entity::ShowColumn::VenueId.eq(venue_id))
        .filter(timeframe.condition(now))
        .order_by_asc(entity::ShowColumn::StartTime)
        .into_model::<VenueShow>()
        .all(db)
        .await
}

async fn artist_shows<C>(
    db: &C,
    artist_id: i32,
    timeframe: Timeframe,
    now: OffsetDateTime,
) -> Result<Vec<ArtistShow>, DbErr>
where
    C: ConnectionTrait,
{
    entity::ShowEntity::find()
        .select_only()
        .column(entity::ShowColumn::VenueId)
        .column_as(entity::VenueColumn::Name, "venue_name")
        .column_as(entity::VenueColumn::ImageLink, "venue_image_link")
        .column(entity::ShowColumn::StartTime)
        .join(JoinType::InnerJoin, entity::ShowRelation::Venue.def())
        .filter(entity::ShowColumn::ArtistId.eq(artist_id))
        .filter(timeframe.condition(now))
        .order_by_asc(entity::ShowColumn::StartTime)
        .into_model::<ArtistShow>()
        .all(db)
        .await
}

pub async fn venue_schedule<C>(
    db: &C,
    venue_id: i32,
    now: OffsetDateTime,
) -> Result<Schedule<VenueShow>, DbErr>
where
    C: ConnectionTrait,
{
    let past = venue_shows(db, venue_id, Timeframe::Past, now).await?;
    let upcoming = venue_shows(db, venue_id, Timeframe::Upcoming, now).await?;
    Ok(Schedule::new(past, upcoming))
}

pub async fn artist_schedule<C>(
    db: &C,
    artist_id: i32,
    now: OffsetDateTime,
) -> Result<Schedule<ArtistShow>, DbErr>
where
    C: ConnectionTrait,
{
    let past = artist_shows(db, artist_id, Timeframe::Past, now).await?;
    let upcoming = artist_shows(db, artist_id, Timeframe::Upcoming, now).await?;
    Ok(Schedule::new(past, upcoming))
}

#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub past: Vec<ListedShow>,
    pub upcoming: Vec<ListedShow>,
}

async fn listed<C>(
    db: &C,
    timeframe: Timeframe,
    now: OffsetDateTime,
) -> Result<Vec<ListedShow>, DbErr>
where
    C: ConnectionTrait,
{
    entity::ShowEntity::find()
        .select_only()
        .column(entity::ShowColumn::VenueId)
        .column_as(entity::VenueColumn::Name, "venue_name")
        .column(entity::ShowColumn::ArtistId)
        .column_as(entity::ArtistColumn::Name, "artist_name")
        .column_as(entity::ArtistColumn::ImageLink, "artist_image_link")
        .column(entity::ShowColumn::StartTime)
        .join(JoinType::InnerJoin, entity::ShowRelation::Venue.def())
        .join(JoinType::InnerJoin, entity::ShowRelation::Artist.def())
        .filter(timeframe.condition(now))
        .order_by_asc(entity::ShowColumn::StartTime)
        .order_by_asc(entity::ArtistColumn::Name)
        .order_by_asc(entity::VenueColumn::Name)
        .into_model::<ListedShow>()
        .all(db)
        .await
}

pub async fn listing<C>(db: &C, now: OffsetDateTime) -> Result<Listing, DbErr>
where
    C: ConnectionTrait,
{
    Ok(Listing {
        past: listed(db, Timeframe::Past, now).await?,
        upcoming: listed(db, Timeframe::Upcoming, now).await?,
    })
}

/// Inserts a show once both ends of it are known to exist.
pub async fn create<C>(db: &C, form: ShowForm) -> Result<entity::Show, QueryError>
where
    C: TransactionTrait,
{
    let show = db
        .transaction::<_, entity::Show, QueryError>(move |txn| {
            Box::pin(async move {
                if entity::ArtistEntity::find_by_id(form.artist_id)
                    .one(txn)
                    .await?
                    .is_none()
                {
                    return Err(QueryError::MissingReference(
                        RecordKind::Artist,
                        form.artist_id,
                    ));
                }
                if entity::VenueEntity::find_by_id(form.venue_id)
                    .one(txn)
                    .await?
                    .is_none()
                {
                    return Err(QueryError::MissingReference(
                        RecordKind::Venue,
                        form.venue_id,
                    ));
                }
                let show = entity::ShowActive {
                    id: ActiveValue::NotSet,
                    start_time: ActiveValue::Set(form.start_time),
                    venue_id: ActiveValue::Set(form.venue_id),
                    artist_id: ActiveValue::Set(form.artist_id),
                }
                .insert(txn)
                .await?;
                Ok(show)
            })
        })
        .await?;
    tracing::info!(id = show.id, "Show created");
    Ok(show)
}
