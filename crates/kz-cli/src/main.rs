//! CLI frontend for the Kartenzieher deck drawer.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kz",
    about = "Kartenzieher: draw from tabletop RPG decks",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine activity to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw from a deck and print the result
    Draw {
        /// Deck name (the file `<dir>/<name>.json`)
        deck: String,

        /// Number of results to draw (1-20)
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// RNG seed for reproducible draws
        #[arg(short, long)]
        seed: Option<u64>,

        /// Word substituted for the player placeholder
        #[arg(long)]
        player: Option<String>,

        /// Directory containing deck files
        #[arg(short, long, default_value = "decks")]
        dir: PathBuf,
    },

    /// List available decks and their pools
    Decks {
        /// Directory containing deck files
        #[arg(short, long, default_value = "decks")]
        dir: PathBuf,
    },

    /// Load every deck and report the ones that cannot be drawn from
    Check {
        /// Directory containing deck files
        #[arg(short, long, default_value = "decks")]
        dir: PathBuf,
    },

    /// Start an interactive drawing session
    Shell {
        /// RNG seed for reproducible draws
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of draws kept in the history
        #[arg(long, default_value = "50")]
        history_limit: usize,

        /// Snapshot file to merge in before the session starts
        #[arg(short, long)]
        import: Option<PathBuf>,

        /// Directory containing deck files
        #[arg(short, long, default_value = "decks")]
        dir: PathBuf,
    },

    /// Export all decks in a directory as a snapshot
    Export {
        /// Output file, or a directory to write a dated snapshot into (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory containing deck files
        #[arg(short, long, default_value = "decks")]
        dir: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("kz_core=debug,kz_session=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Draw {
            deck,
            count,
            seed,
            player,
            dir,
        } => commands::draw::run(&dir, &deck, count, seed, player.as_deref()),
        Commands::Decks { dir } => commands::decks::run(&dir),
        Commands::Check { dir } => commands::check::run(&dir),
        Commands::Shell {
            seed,
            history_limit,
            import,
            dir,
        } => commands::shell::run(&dir, seed, history_limit, import.as_deref()),
        Commands::Export { output, dir } => commands::export::run(&dir, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
