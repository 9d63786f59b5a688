//! tango - vocabulary flashcards with review history

pub mod cli;
pub mod domain;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_add, handle_list, handle_records, handle_review, handle_rm, handle_show,
        handle_tags, handle_update,
    },
};

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows the `-v` count.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        clap_complete::generate(
            args.shell,
            &mut Cli::command(),
            "tango",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let config = Config::load()?;
    let db_path = config.database_path(cli.db.as_ref());
    tracing::debug!(db = %db_path.display(), "using database");

    match &cli.command {
        Command::Add(args) => handle_add(args, &db_path),
        Command::List(args) => handle_list(args, &db_path, &config),
        Command::Show(args) => handle_show(args, &db_path),
        Command::Update(args) => handle_update(args, &db_path),
        Command::Rm(args) => handle_rm(args, &db_path),
        Command::Review(args) => handle_review(args, &db_path),
        Command::Records(args) => handle_records(args, &db_path),
        Command::Tags(args) => handle_tags(args, &db_path),
        Command::Completions(_) => Ok(()),
    }
}
