mod api;
mod forms;
mod queries;
#[cfg(test)]
mod test_support;

use clap::{Parser, Subcommand};
use eyre::{eyre, Result, WrapErr};
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    prelude::*,
};

use base::{
    database::open_database,
    setting::{generate_default, load, Settings},
    CLI_NAME,
};

#[derive(Parser)]
#[command(name = CLI_NAME, author, version, about, long_about = None)]
#[command(next_line_help = true)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(short, long, name = "ADDRESS", default_value_t = String::from("127.0.0.1:5000"))]
    listen_address: String,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Prints the default settings
    DefaultConfig,
    /// Applies pending migrations and exits
    Migrate,
    /// Applies pending migrations and serves the site
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    color_eyre::install()?;
    let tracing_builder = tracing_subscriber::registry().with(fmt::layer());
    if std::env::var(base::FYYUR_LOGLEVEL).is_ok() {
        tracing_builder.with(EnvFilter::from_env(base::FYYUR_LOGLEVEL))
    } else {
        tracing_builder.with(EnvFilter::default().add_directive(LevelFilter::INFO.into()))
    }
    .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::DefaultConfig => {
            let default = generate_default(Settings::default())?;
            let str = toml::to_string(&default)?;
            println!("{}", str);
            Ok(())
        }
        Command::Migrate => {
            let settings = load(cli.config)?;
            let db = open_database(&settings).await?;
            migration::Migrator::up(&db, None).await?;
            tracing::info!("Migrations applied");
            Ok(())
        }
        Command::Serve => {
            tracing::info!(version = base::VERSION, "Starting {}", CLI_NAME);
            let settings = load(cli.config)?;
            let db = open_database(&settings).await?;
            migration::Migrator::up(&db, None).await?;

            let addr: SocketAddr = cli
                .listen_address
                .parse()
                .wrap_err(eyre!("Invalid listen address"))?;
            tracing::info! {%addr, "Listening"};
            axum::Server::bind(&addr)
                .serve(api::router(db).into_make_service())
                .await?;
            Ok(())
        }
    }
}
