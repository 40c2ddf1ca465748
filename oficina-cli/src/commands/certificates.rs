//! `oficina certificates download <workshop>`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use oficina_client::certificates::{self, WriteResult};

use super::connect;
use super::workshops::fetch;

/// Fetch generated certificates.
#[derive(Subcommand, Debug)]
pub enum CertificatesCommand {
    /// Save a workshop's certificate archive as certificados_<title>.zip.
    Download(DownloadArgs),
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Workshop id.
    pub workshop: i64,

    /// Directory to save the archive in.
    #[arg(long, short = 'o', default_value = ".")]
    pub out: PathBuf,

    /// Download and compare, but do not write.
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(cmd: CertificatesCommand, api_url: Option<&str>) -> Result<()> {
    let api = connect(api_url)?;
    match cmd {
        CertificatesCommand::Download(args) => {
            let workshop = fetch(&api, args.workshop)?;
            let result = certificates::download(&api, &workshop, &args.out, args.dry_run)
                .with_context(|| {
                    format!("failed to download certificates for workshop #{}", workshop.id)
                })?;
            print_result(&result);
            Ok(())
        }
    }
}

fn print_result(result: &WriteResult) {
    let path = result.path().display();
    match result {
        WriteResult::Written { sha256, .. } => {
            let short = sha256.get(..12).unwrap_or(sha256);
            println!("{} {path} ({short})", "✓ wrote".green());
        }
        WriteResult::Unchanged { .. } => println!("{} {path}", "= unchanged".dimmed()),
        WriteResult::WouldWrite { .. } => {
            println!("{} {path}", "[dry-run] would write".yellow());
        }
    }
}
