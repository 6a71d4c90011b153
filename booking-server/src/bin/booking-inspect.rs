//! Booking Inspect - read-only data inspection for operators.
//!
//! Connects straight to the store, prints findings as pretty JSON on stdout
//! and progress on stderr.

use booking_server::DatabaseConfig;
use booking_server::inspect::{self, InspectSession};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the inspection tool.
#[derive(Parser, Debug)]
#[command(name = "booking-inspect")]
#[command(about = "Inspect booking platform collections")]
#[command(version)]
struct Cli {
    /// SurrealDB connection string (mem:// / rocksdb://path / ws://host:port)
    #[arg(long, env = "DATABASE_URL", default_value = "rocksdb://./data/booking.db")]
    database_url: String,

    #[arg(long, env = "DB_NAMESPACE", default_value = "booking")]
    namespace: String,

    #[arg(long, env = "DB_DATABASE", default_value = "main")]
    database: String,

    #[arg(long, env = "DB_USERNAME")]
    username: Option<String>,

    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tables with record counts
    Collections,

    /// Dump records of a collection, optionally filtered by field equality
    Dump {
        /// Collection name (legacy names are resolved)
        collection: String,

        /// Field to match; repeat together with --equals
        #[arg(long)]
        field: Vec<String>,

        /// Value for the preceding --field
        #[arg(long)]
        equals: Vec<String>,

        /// Maximum number of records
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },

    /// Show a restaurant profile and its spaces
    Restaurant {
        /// Restaurant profile id
        id: String,
    },
}

impl Cli {
    fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            namespace: self.namespace.clone(),
            database: self.database.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.database_config();
    info!(url = %config.url, namespace = %config.namespace, database = %config.database, "Opening inspection session");

    // reject mismatched --field/--equals before connecting
    let matches = match &cli.command {
        Command::Dump { field, equals, .. } => inspect::parse_matches(field, equals)?,
        _ => Vec::new(),
    };

    let session = InspectSession::open(&config).await?;

    match cli.command {
        Command::Collections => {
            let tables = session.run(inspect::collections).await?;
            print_json(&tables)?;
        }
        Command::Dump {
            collection, limit, ..
        } => {
            let report = session
                .run(|repo| inspect::dump(repo, collection, matches, limit))
                .await?;
            info!(table = %report.table, rows = report.rows.len(), "Dump complete");
            print_json(&report)?;
        }
        Command::Restaurant { id } => {
            let report = session.run(|repo| inspect::restaurant(repo, id)).await?;
            print_json(&report)?;
        }
    }

    Ok(())
}
