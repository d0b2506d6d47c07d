// auditdesk - daily audit checklist runner

mod exit_codes;
mod run;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_CONFIG, EXIT_ERROR, EXIT_LEDGER_IO, EXIT_STORE, EXIT_SUCCESS, EXIT_USAGE};
use settings::{FormatArg, Settings};

#[derive(Parser)]
#[command(name = "auditdesk")]
#[command(about = "Daily audit checklist: reconcile, keep history, emit reports")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Debug logging
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Errors only
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the checklist for a reference date, merge it into the history
    /// ledger and write the daily and cumulative reports
    #[command(after_help = "\
Examples:
  auditdesk run
  auditdesk run --settings auditdesk.toml
  auditdesk run --db banco_exp.sqlite --out-dir reports --date 2025-06-10
  auditdesk run --format csv --json")]
    Run {
        /// Settings file (paths and company/layout grid)
        #[arg(long, env = "AUDITDESK_SETTINGS")]
        settings: Option<PathBuf>,

        /// SQLite record store (overrides settings)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Directory for the ledger and reports (overrides settings)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Reference date YYYY-MM-DD (default: previous business day)
        #[arg(long)]
        date: Option<String>,

        /// Ledger file format (overrides settings)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Print the day's checklist rows as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Validate a settings file without running
    Validate {
        /// Path to the settings file
        settings: PathBuf,
    },

    /// Create the record store tables if they do not exist
    InitDb {
        /// Path to the SQLite file
        path: PathBuf,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nledger columns: 10",
    )
}

fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("AUDITDESK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Run { settings, db, out_dir, date, format, json } => run::cmd_run(run::RunArgs {
            settings,
            db,
            out_dir,
            date,
            format,
            json,
        }),
        Commands::Validate { settings } => cmd_validate(settings),
        Commands::InitDb { path } => cmd_init_db(path),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn cmd_validate(path: PathBuf) -> Result<(), CliError> {
    let settings = Settings::load(&path).map_err(CliError::config)?;
    eprintln!(
        "settings OK: {} companies x {} layouts, closed on {}",
        settings.checklist.companies.len(),
        settings.checklist.layouts.len(),
        settings.checklist.closed_weekday,
    );
    Ok(())
}

fn cmd_init_db(path: PathBuf) -> Result<(), CliError> {
    auditdesk_store::SqliteStore::create(&path).map_err(|e| CliError::store(e.to_string()))?;
    tracing::info!(path = %path.display(), "store schema ready");
    Ok(())
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self { code: EXIT_STORE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_LEDGER_IO, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
