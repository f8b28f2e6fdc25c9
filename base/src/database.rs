use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use thiserror::Error;

use super::setting::Settings;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("No database url configured")]
    MissingUrl,

    #[error("Error while connecting to the database: {0}")]
    Database(#[from] DbErr),
}

pub fn connect_options(settings: &Settings) -> Result<ConnectOptions, DatabaseError> {
    if settings.db.is_empty() {
        return Err(DatabaseError::MissingUrl);
    }
    let pool = &settings.pool;
    let mut opt = ConnectOptions::new(settings.db.to_owned());
    opt.max_connections(pool.max_connections)
        .min_connections(pool.min_connections)
        .connect_timeout(Duration::from_secs(pool.connect_timeout))
        .acquire_timeout(Duration::from_secs(pool.connect_timeout))
        .idle_timeout(Duration::from_secs(pool.idle_timeout))
        .sqlx_logging(settings.debug);
    Ok(opt)
}

pub async fn open_database(settings: &Settings) -> Result<DatabaseConnection, DatabaseError> {
    let opt = connect_options(settings)?;
    tracing::trace! {url = %settings.db, "Connecting to database"};
    Database::connect(opt)
        .await
        .map_err(DatabaseError::Database)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_is_rejected() {
        let settings = Settings::default();
        assert!(matches!(
            connect_options(&settings),
            Err(DatabaseError::MissingUrl)
        ));
    }

    #[test]
    fn pool_settings_are_applied() {
        let mut settings = Settings {
            db: "sqlite::memory:".to_string(),
            ..Settings::default()
        };
        settings.pool.max_connections = 3;
        let opt = connect_options(&settings).unwrap();
        assert_eq!(opt.get_max_connections(), Some(3));
        assert_eq!(opt.get_url(), "sqlite::memory:");
    }
}
