use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pastebin_core::{PasteError, PasteService, PastebinConfig};
use pastebin_store::RedbStore;
use tracing::{debug, error};

mod commands;

#[derive(Parser)]
#[command(
    name = "pastebin",
    about = "Store and retrieve text pastes by short id",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to pastebin.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Database file, overriding [store].path from the config
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store new text and print its id.
    ///
    /// Content is read from --file, or from stdin when no file is given.
    Create {
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Mark the paste as private
        #[arg(long)]
        private: bool,
    },
    /// Print a stored paste
    Show {
        id: String,
        /// Print only the content, without the header line
        #[arg(long)]
        raw: bool,
    },
    /// Replace the content of an existing paste
    Edit {
        id: String,
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pastebin=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PastebinConfig::from_file(path)?,
        None => PastebinConfig::default(),
    };
    if let Some(db) = cli.db {
        config.store.path = db;
    }

    match run(cli.command, &config) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => match e.downcast_ref::<PasteError>() {
            Some(paste_err) => {
                error!(error = %paste_err, "paste operation failed");
                eprintln!("{}", paste_err.user_message());
                Ok(ExitCode::FAILURE)
            }
            None => Err(e),
        },
    }
}

fn run(command: Commands, config: &PastebinConfig) -> anyhow::Result<()> {
    let store = RedbStore::open(&config.store.path).map_err(PasteError::from)?;
    debug!(path = ?config.store.path, "store ready");
    let service = PasteService::from_config(store, config);
    let mut stdout = std::io::stdout().lock();

    match command {
        Commands::Create { file, private } => {
            let content = commands::paste::read_content(file.as_deref())?;
            commands::paste::create(&service, content, private, &mut stdout)
        }
        Commands::Show { id, raw } => commands::paste::show(&service, &id, raw, &mut stdout),
        Commands::Edit { id, file } => {
            let content = commands::paste::read_content(file.as_deref())?;
            commands::paste::edit(&service, &id, content, &mut stdout)
        }
    }
}
