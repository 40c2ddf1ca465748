//! Oficina — workshop and participant administration CLI.
//!
//! # Usage
//!
//! ```text
//! oficina workshops list|show|create|update|delete
//! oficina participants list|register|update|delete
//! oficina roster show <workshop>
//! oficina roster edit <workshop> [--add RA]... [--remove RA]... [--toggle RA]... [--dry-run]
//! oficina roster set <workshop> [RA]... [--dry-run]
//! oficina certificates download <workshop> [--out DIR] [--dry-run]
//! oficina config show|set-url <url>
//! oficina account check --email <email> --password <password> [--confirm <password>]
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use commands::{
    account::AccountCommand, certificates::CertificatesCommand, config::ConfigCommand,
    participants::ParticipantsCommand, roster::RosterCommand, workshops::WorkshopsCommand,
};
use oficina_core::types::EventType;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "oficina",
    version,
    about = "Manage workshops, participants and workshop rosters",
    long_about = None,
)]
struct Cli {
    /// Workshop service base URL; overrides ~/.oficina/config.yaml.
    #[arg(long, global = true, env = "OFICINA_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// Log more (-v: info, -vv: debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List, create, edit and delete workshops.
    Workshops {
        #[command(subcommand)]
        command: WorkshopsCommand,
    },

    /// List, register, edit and delete participants.
    Participants {
        #[command(subcommand)]
        command: ParticipantsCommand,
    },

    /// Inspect and change which participants attend a workshop.
    Roster {
        #[command(subcommand)]
        command: RosterCommand,
    },

    /// Download generated certificates.
    Certificates {
        #[command(subcommand)]
        command: CertificatesCommand,
    },

    /// Show or change local client settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Check instructor credentials against the account rules.
    Account {
        #[command(subcommand)]
        command: AccountCommand,
    },
}

// ---------------------------------------------------------------------------
// Shared EventType argument — parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `EventType` from CLI args.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventTypeArg(pub EventType);

impl FromStr for EventTypeArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "presencial" | "in-person" => Ok(Self(EventType::InPerson)),
            "online" => Ok(Self(EventType::Online)),
            other => Err(format!(
                "unknown event type '{other}'; expected: presencial, online"
            )),
        }
    }
}

impl fmt::Display for EventTypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<EventTypeArg> for EventType {
    fn from(e: EventTypeArg) -> Self {
        e.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let api_url = cli.api_url.as_deref();
    match cli.command {
        Commands::Workshops { command } => commands::workshops::run(command, api_url),
        Commands::Participants { command } => commands::participants::run(command, api_url),
        Commands::Roster { command } => commands::roster::run(command, api_url),
        Commands::Certificates { command } => commands::certificates::run(command, api_url),
        Commands::Config { command } => commands::config::run(command),
        Commands::Account { command } => commands::account::run(command),
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
