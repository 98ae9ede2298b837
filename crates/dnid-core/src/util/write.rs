//! Change-aware file writes.
//!
//! Generated artifacts are rewritten only when content differs; a no-op
//! run leaves every modification timestamp untouched.

use std::{fs, io::ErrorKind, path::Path};

use anyhow::{Context, Result};

/// Text variant of [`write_bytes_if_changed`].
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    write_bytes_if_changed(path, content.as_bytes())
}

/// Write `payload` to `path` only when it differs from the current file
/// content, creating missing parent directories. Returns whether a write
/// happened. No partial-write guarantee beyond "last write wins".
pub fn write_bytes_if_changed(path: &Path, payload: &[u8]) -> Result<bool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let current = match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    if current.as_deref() == Some(payload) {
        return Ok(false);
    }

    fs::write(path, payload).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}
