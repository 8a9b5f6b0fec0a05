//! Account and leaderboard maintenance for the score store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tui_2048::config::{GameConfig, StoreLocation, DEFAULT_STORE_PATH};
use tui_2048::store::JsonFileStore;

#[derive(Parser, Debug)]
#[command(name = "tui-2048-scores", about = "Manage tui-2048 accounts and scores")]
struct Cli {
    /// Score store to operate on (defaults to TUI_2048_STORE).
    #[arg(long)]
    store: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every account ranked by high score.
    Leaderboard,
    /// Create an account and log it in.
    Signup {
        username: String,
        password: String,
        confirm: String,
    },
    Login {
        username: String,
        password: String,
    },
    Logout,
    /// Show who is logged in.
    Whoami,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = cli.store.unwrap_or_else(|| match GameConfig::from_env().store {
        StoreLocation::File(path) => path,
        StoreLocation::Memory => PathBuf::from(DEFAULT_STORE_PATH),
    });
    let mut store = JsonFileStore::open(&path)
        .with_context(|| format!("failed to open score store {}", path.display()))?;

    match cli.command {
        Command::Leaderboard => {
            println!("{:>4}  {:<20} {:>10}", "RANK", "PLAYER", "SCORE");
            for entry in store.leaderboard() {
                let marker = if entry.is_current { " *" } else { "" };
                println!(
                    "{:>4}  {:<20} {:>10}{marker}",
                    entry.rank, entry.username, entry.high_score
                );
            }
        }
        Command::Signup {
            username,
            password,
            confirm,
        } => {
            let player = store.sign_up(&username, &password, &confirm)?;
            println!("created and logged in as {player}");
        }
        Command::Login { username, password } => {
            let player = store.log_in(&username, &password)?;
            println!("logged in as {player}");
        }
        Command::Logout => {
            store.log_out()?;
            println!("logged out");
        }
        Command::Whoami => println!("{}", store.current_player()),
    }

    Ok(())
}
