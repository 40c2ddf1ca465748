//! Subcommand implementations and the helpers they share.

pub mod account;
pub mod certificates;
pub mod config;
pub mod participants;
pub mod roster;
pub mod workshops;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use oficina_client::HttpApi;
use oficina_core::config as client_config;

/// Build the HTTP client from `~/.oficina/config.yaml`, with `api_url`
/// (flag or `OFICINA_API_URL`) taking precedence over the file.
pub fn connect(api_url: Option<&str>) -> Result<HttpApi> {
    let mut config = client_config::load().context("failed to load ~/.oficina/config.yaml")?;
    if let Some(url) = api_url {
        config.api_url = client_config::normalize_api_url(url)?;
    }
    tracing::debug!(api_url = %config.api_url, "using workshop service");
    Ok(HttpApi::from_config(&config))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("failed to serialize JSON output")?
    );
    Ok(())
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush().context("failed to flush stdout")?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read answer from stdin")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
