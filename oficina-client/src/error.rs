//! Error types for oficina-client.

use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to the workshop service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, refused, timeout, TLS…).
    #[error("{method} {url} failed: {message}")]
    Transport {
        method: &'static str,
        url: String,
        message: String,
    },

    /// The service answered with a non-2xx status.
    #[error("{method} {url} returned HTTP {status}{}", render_message(.message))]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        /// `message` field of the JSON error body, or the raw body text.
        message: Option<String>,
    },

    /// The configured base URL cannot have endpoint paths appended.
    #[error("invalid service URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// A 2xx response whose body could not be decoded.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// Local file I/O while saving a download.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// HTTP status of a [`ApiError::Status`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` for `409 Conflict`, which the roster endpoint uses for capacity rejections.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

fn render_message(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {m}"),
        None => String::new(),
    }
}

/// Outcome of a rejected roster submission.
///
/// Exactly two kinds: the service refused the selection because of the
/// workshop's capacity, or the request itself failed. In both cases nothing
/// changed remotely and the caller's selection can be resubmitted as is.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("selection exceeds workshop capacity: {attempted} selected / {max} allowed")]
    CapacityExceeded { attempted: usize, max: u32 },

    #[error("roster update failed: {0}")]
    RequestFailed(#[source] ApiError),
}

/// Convenience constructor for [`ApiError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ApiError {
    ApiError::Io {
        path: path.into(),
        source,
    }
}
