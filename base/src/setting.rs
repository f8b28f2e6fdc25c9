use directories::ProjectDirs;
use eyre::{eyre, Result};
use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::{util, CLI_NAME};

static DEFAULT_DB_FILE: &str = "fyyur.db";

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub db: String,
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub pool: Pool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    8
}

fn default_idle_timeout() -> u64 {
    300
}

impl Default for Pool {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout: default_connect_timeout(),
            idle_timeout: default_idle_timeout(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "github", CLI_NAME).ok_or(eyre!("Could not locate program directories"))
}

pub fn load(path: Option<PathBuf>) -> Result<Settings> {
    let path = match path {
        Some(path) => path,
        None => project_dirs()?.config_dir().join(PathBuf::from("config.toml")),
    };
    tracing::info! {?path, "Loading config file"};
    let content = fs::read_to_string(path).unwrap_or_else(|_| "".to_string());
    let set = parse(content.as_str())?;
    tracing::trace! {settings = ?set, "Loaded settings"};
    Ok(set)
}

pub fn parse(content: &str) -> Result<Settings> {
    let set: Settings = toml::from_str(content).map_err(|e| eyre!(e))?;
    generate_default(set)
}

pub fn generate_default(mut set: Settings) -> Result<Settings> {
    if set.db == String::default() {
        let data_dir = project_dirs()?.data_dir().to_path_buf();
        util::mkdirp(&data_dir)?;
        set.db = format!(
            "sqlite://{}?mode=rwc",
            util::path_to_str(&data_dir.join(DEFAULT_DB_FILE))?
        );
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_are_kept() {
        let set = parse(
            r#"
            db = "postgres://fyyur@localhost:5432/fyyur"
            debug = true

            [pool]
            max_connections = 4
            "#,
        )
        .unwrap();
        assert_eq!(set.db, "postgres://fyyur@localhost:5432/fyyur");
        assert!(set.debug);
        assert_eq!(set.pool.max_connections, 4);
        assert_eq!(set.pool.min_connections, default_min_connections());
        assert_eq!(set.pool.idle_timeout, default_idle_timeout());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse("db = ").is_err());
    }
}
