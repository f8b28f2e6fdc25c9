use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Venue")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "String(Some(120))")]
    pub city: String,
    #[sea_orm(column_type = "String(Some(120))")]
    pub state: String,
    #[sea_orm(column_type = "String(Some(120))")]
    pub address: String,
    #[sea_orm(column_type = "String(Some(120))")]
    pub phone: Option<String>,
    #[sea_orm(column_type = "String(Some(500))")]
    pub image_link: Option<String>,
    #[sea_orm(column_type = "String(Some(120))")]
    pub facebook_link: Option<String>,
    #[sea_orm(column_type = "String(Some(120))")]
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::show::Entity")]
    Show,
}

impl Related<super::show::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Show.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::venue_genre::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::venue_genre::Relation::Venue.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
