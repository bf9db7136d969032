mod commands;
mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use appoutlet::ApplicationService;
use appoutlet_flathub::{FlathubClient, FlathubSynchronizer};
use appoutlet_store::ApplicationDatabase;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "appoutlet")]
#[command(about = "Synchronize and browse applications from external catalogs")]
struct Cli {
    /// Path to the application database
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Synchronize applications from Flathub into the local database
    Sync,
    /// List stored applications
    List,
    /// Show full details of an application
    Show {
        /// Application ID (e.g. org.gimp.GIMP)
        id: String,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Register one view of an application
    View {
        /// Application ID (e.g. org.gimp.GIMP)
        id: String,
    },
    /// Show when Flathub was last synchronized
    Status,
}

fn init_tracing(verbose: bool) {
    // Prefix match: also covers the appoutlet_* crates.
    let default_directive = if verbose {
        "appoutlet=debug"
    } else {
        "appoutlet=info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("could not determine data directory")?;
    Ok(base.join("appoutlet"))
}

fn db_path(cli_override: Option<PathBuf>) -> Result<PathBuf> {
    match cli_override {
        Some(path) => Ok(path),
        None => Ok(data_dir()?.join("applications.db")),
    }
}

fn open_database(path: &Path) -> Result<ApplicationDatabase> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create data directory: {}", parent.display()))?;
    }

    ApplicationDatabase::open(path)
        .with_context(|| format!("failed to open database: {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let database = Arc::new(open_database(&db_path(cli.database)?)?);

    match cli.command {
        Command::Sync => {
            let flathub = config::load_config().synchronization.flathub;
            let client =
                FlathubClient::with_timeout(flathub.api_base_url.clone(), flathub.timeout())
                    .context("failed to create Flathub client")?;
            let synchronizer = FlathubSynchronizer::new(
                client,
                Arc::clone(&database),
                flathub.settings(),
            );
            commands::sync::run(&synchronizer, &database).await
        }
        Command::List => {
            let service = ApplicationService::new(database);
            commands::list::run(&service).await
        }
        Command::Show { id, json } => {
            let service = ApplicationService::new(database);
            commands::show::run(&service, &id, json).await
        }
        Command::View { id } => {
            let service = ApplicationService::new(database);
            commands::view::run(&service, &id).await
        }
        Command::Status => commands::status::run(&database),
    }
}
