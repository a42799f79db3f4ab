mod ratings;

use clap::{Parser, Subcommand};

use crate::ratings::RatingsCommands;

#[derive(Debug, Parser)]
#[command(name = "stockrate-cli")]
#[command(about = "Stock rating ingestion command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Import and inspect rating records
    Ratings {
        #[command(subcommand)]
        command: RatingsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Db { command }) => run_db(command).await?,
        Some(Commands::Ratings { command }) => match command {
            RatingsCommands::Import { file, dry_run } => {
                ratings::run_ratings_import(&file, dry_run).await?;
            }
            RatingsCommands::List { limit } => {
                let pool = connect().await?;
                ratings::run_ratings_list(&pool, limit).await?;
            }
        },
        None => println!("stockrate-cli ready; run with --help to list commands"),
    }

    Ok(())
}

async fn run_db(command: DbCommands) -> anyhow::Result<()> {
    let pool = connect().await?;
    match command {
        DbCommands::Ping => {
            stockrate_db::ping(&pool).await?;
            println!("database: ok");
        }
        DbCommands::Migrate => {
            let applied = stockrate_db::run_migrations(&pool).await?;
            tracing::info!(applied, "migrations applied");
            println!("applied {applied} migration(s)");
        }
    }
    Ok(())
}

/// Load config from the environment and open a pool against it.
pub(crate) async fn connect() -> anyhow::Result<sqlx::PgPool> {
    let config = stockrate_core::load_app_config()?;
    let pool_config = stockrate_db::PoolConfig::from_app_config(&config);
    let pool = stockrate_db::connect_pool(&config.database_url, pool_config).await?;
    Ok(pool)
}
