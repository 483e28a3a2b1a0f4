//! # Svensk Kassa CLI Library
//!
//! Command-line front end for the cash-drawer calculator.
//!
//! ## Module Organization
//! ```text
//! kassa_cli/
//! ├── lib.rs          ◄─── You are here (argument parsing, startup, dispatch)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Flags > env > config.toml > defaults
//! │   └── db.rs       ◄─── Database wrapper, hands out loaded controllers
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── session.rs  ◄─── show/set/title/date/comment/reset
//! │   └── transfer.rs ◄─── export/import/report
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! stdout carries command output only; logs and errors go to stderr.

pub mod commands;
pub mod error;
pub mod state;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use kassa_core::{Clock, SessionController, SlotStore};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{ConfigOverrides, ConfigState, DbState};

const DEFAULT_LOG_FILTER: &str = "warn,kassa=info,sqlx=warn";

#[derive(Debug, clap::Parser)]
#[command(name = "kassa", version, about = "Svensk Kassa: count the cash drawer")]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// SQLite file holding the session (overrides KASSA_DB_PATH and config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Config file to read instead of the platform default
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print errors as JSON (`{"code": ..., "message": ...}`) on stderr
    #[arg(long, global = true)]
    json_errors: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, clap::Subcommand)]
pub enum Command {
    /// Show every denomination row and the totals (default)
    Show,

    /// List the coins and notes that can be counted
    Denominations,

    /// Set the count for one denomination
    ///
    /// The count is read like a form field: "3", "3 st" and "+3" are 3;
    /// text without leading digits is 0; negative counts become 0.
    Set {
        /// Face value in kronor, e.g. 500
        value: String,

        /// Number of coins or notes
        #[arg(allow_hyphen_values = true)]
        count: String,
    },

    /// Set the session title
    Title {
        /// New title; empty clears it
        #[arg(default_value = "")]
        text: String,
    },

    /// Set the session date
    Date {
        /// Date as YYYY-MM-DD
        date: String,
    },

    /// Set the session comment
    Comment {
        /// New comment; empty clears it
        #[arg(default_value = "")]
        text: String,
    },

    /// Clear all counts, title and comment; date becomes today
    Reset,

    /// Write the session as a JSON export file
    Export {
        /// Output file or directory (default: export dir + suggested name)
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Replace the session with a JSON export file
    Import {
        /// File previously written by `kassa export`
        file: PathBuf,
    },

    /// Print the plain-text report (the "copy" action)
    Report {
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Runs the command and maps the outcome to a process exit code.
    pub async fn run(self) -> ExitCode {
        init_tracing(self.verbose);

        let json_errors = self.json_errors;
        match self.execute().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                if json_errors {
                    eprintln!("{}", err.to_json());
                } else {
                    eprintln!("{err}");
                }
                ExitCode::FAILURE
            }
        }
    }

    async fn execute(self) -> Result<(), ApiError> {
        let config = ConfigState::load(ConfigOverrides {
            database_path: self.db,
            config_file: self.config,
        })?;

        let db = DbState::open(&config).await?;
        let mut controller = db.controller().await;

        let command = self.command.unwrap_or(Command::Show);
        let stdout = std::io::stdout();
        let result = dispatch(command, &mut controller, &config, &mut stdout.lock()).await;

        db.close().await;
        result
    }
}

/// Runs one command against a loaded controller.
pub async fn dispatch<S: SlotStore, C: Clock>(
    command: Command,
    controller: &mut SessionController<S, C>,
    config: &ConfigState,
    out: &mut impl Write,
) -> Result<(), ApiError> {
    debug!(?command, "Dispatching command");

    match command {
        Command::Show => commands::session::show(controller, out),
        Command::Denominations => commands::session::denominations(controller, out),
        Command::Set { value, count } => {
            commands::session::set(controller, &value, &count, out).await
        }
        Command::Title { text } => commands::session::title(controller, &text).await,
        Command::Date { date } => commands::session::date(controller, &date).await,
        Command::Comment { text } => commands::session::comment(controller, &text).await,
        Command::Reset => commands::session::reset(controller, out).await,
        Command::Export { out: target } => {
            commands::transfer::export(controller, target.as_deref(), &config.export_dir, out)
                .map(|path| info!(path = %path.display(), "Export complete"))
        }
        Command::Import { file } => commands::transfer::import(controller, &file, out).await,
        Command::Report { output } => {
            commands::transfer::report(controller, output.as_deref(), out)
        }
    }
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - Default: `warn,kassa=info,sqlx=warn`
/// - `RUST_LOG=kassa_db=debug` - Show slot reads/writes
/// - `-v` / `-vv` / `-vvv` - Raise everything to info/debug/trace
fn init_tracing(verbosity: u8) {
    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let level = match verbosity {
        0 => None,
        1 => Some(tracing::Level::INFO),
        2 => Some(tracing::Level::DEBUG),
        _ => Some(tracing::Level::TRACE),
    };
    if let Some(level) = level {
        filter = filter.add_directive(level.into());
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
