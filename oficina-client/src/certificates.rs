//! Certificate archive download.
//!
//! ## `save_archive` protocol
//!
//! 1. Download the zip for the workshop (done by the caller).
//! 2. SHA-256 hash the downloaded bytes.
//! 3. Hash the file already on disk, if any → skip if identical.
//! 4. Write to `<path>.oficina.tmp`.
//! 5. Rename to final path (atomic on POSIX).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use oficina_core::types::Workshop;

use crate::api::WorkshopApi;
use crate::error::{io_err, ApiError};

/// Outcome of saving a certificate archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// Archive was written (content changed or did not previously exist).
    Written { path: PathBuf, sha256: String },
    /// Archive on disk already has the downloaded content.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the archive *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

/// `certificados_<titulo>.zip`, with path separators and control characters
/// in the title replaced by `_`.
pub fn archive_file_name(workshop: &Workshop) -> String {
    let title: String = workshop
        .title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let title = if title.is_empty() || title.chars().all(|c| c == '.') {
        workshop.id.to_string()
    } else {
        title
    };
    format!("certificados_{title}.zip")
}

/// Download the certificates of `workshop` into `out_dir`.
pub fn download<A: WorkshopApi + ?Sized>(
    api: &A,
    workshop: &Workshop,
    out_dir: &Path,
    dry_run: bool,
) -> Result<WriteResult, ApiError> {
    let bytes = api.download_certificates(workshop.id)?;
    tracing::debug!(workshop = %workshop.id, bytes = bytes.len(), "certificates downloaded");
    let path = out_dir.join(archive_file_name(workshop));
    save_archive(&path, &bytes, dry_run)
}

/// Hash-gated atomic write of `bytes` to `path`.
pub fn save_archive(path: &Path, bytes: &[u8], dry_run: bool) -> Result<WriteResult, ApiError> {
    let digest = sha256_hex(bytes);

    if let Some(existing) = read_existing(path)? {
        if sha256_hex(&existing) == digest {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    let tmp = PathBuf::from(format!("{}.oficina.tmp", path.display()));
    std::fs::write(&tmp, bytes).map_err(|e| io_err(&tmp, e))?;

    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
        sha256: digest,
    })
}

fn read_existing(path: &Path) -> Result<Option<Vec<u8>>, ApiError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
