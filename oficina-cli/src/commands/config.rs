//! `oficina config show|set-url`

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use oficina_core::config;

use super::print_json;

/// Local client settings in ~/.oficina/config.yaml.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective settings.
    Show(ShowArgs),

    /// Store the workshop service base URL.
    SetUrl(SetUrlArgs),
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SetUrlArgs {
    /// Base URL, e.g. http://localhost:8080.
    pub url: String,
}

pub fn run(cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show(args) => show(args),
        ConfigCommand::SetUrl(args) => set_url(args),
    }
}

fn show(args: ShowArgs) -> Result<()> {
    let settings = config::load().context("failed to load ~/.oficina/config.yaml")?;

    if args.json {
        return print_json(&settings);
    }
    println!("api_url:      {}", settings.api_url);
    println!("timeout_secs: {}", settings.timeout_secs);
    Ok(())
}

fn set_url(args: SetUrlArgs) -> Result<()> {
    let settings = config::set_api_url(&args.url)
        .with_context(|| format!("failed to store API URL '{}'", args.url))?;
    println!("✓ API URL set to {}", settings.api_url);
    Ok(())
}
