//! Error types for oficina-core.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from reading or writing the local config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, read-only filesystem, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.oficina/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// The API URL is not an absolute http(s) URL.
    #[error("invalid API URL '{url}': expected http:// or https://")]
    InvalidUrl { url: String },
}

/// Field-level validation failures, keyed by form field name.
///
/// Every failing field is reported, not just the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {}", render_fields(.fields))]
pub struct ValidationError {
    pub fields: BTreeMap<&'static str, String>,
}

impl ValidationError {
    /// Message for `field`, if it failed.
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

fn render_fields(fields: &BTreeMap<&'static str, String>) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}
