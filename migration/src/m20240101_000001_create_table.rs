use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

use entity::{
    ArtistEntity, ArtistGenreEntity, GenreEntity, ShowEntity, VenueEntity, VenueGenreEntity,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

macro_rules! create_table {
    ($manager: expr, $schema: expr, $entity: expr) => {
        $manager
            .create_table($schema.create_table_from_entity($entity).if_not_exists().to_owned())
            .await?;
    };
}

macro_rules! drop_table {
    ($manager: expr, $entity: expr) => {
        $manager
            .drop_table(Table::drop().table($entity).if_exists().to_owned())
            .await?;
    };
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        // Referenced tables first, the foreign keys are part of the
        // generated statements.
        create_table!(manager, schema, VenueEntity);
        create_table!(manager, schema, ArtistEntity);
        create_table!(manager, schema, GenreEntity);
        create_table!(manager, schema, ShowEntity);
        create_table!(manager, schema, VenueGenreEntity);
        create_table!(manager, schema, ArtistGenreEntity);
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table!(manager, ArtistGenreEntity);
        drop_table!(manager, VenueGenreEntity);
        drop_table!(manager, ShowEntity);
        drop_table!(manager, GenreEntity);
        drop_table!(manager, ArtistEntity);
        drop_table!(manager, VenueEntity);
        Ok(())
    }
}
