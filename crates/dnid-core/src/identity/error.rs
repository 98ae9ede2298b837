use std::path::PathBuf;

use thiserror::Error;

/// User-visible failures from identity lookup and validation.
///
/// The CLI downcasts to this type to turn a failure into a clean one-line
/// diagnostic and a policy exit code; everything else propagates with its
/// full context chain.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity '{name}' not found at {}", .path.display())]
    NotFound { name: String, path: PathBuf },

    /// One or more required keys are absent (or present without a usable
    /// string value). `missing` holds every offending key so a single run
    /// reports them all.
    #[error("identity '{name}' missing required keys: {}", .missing.join(", "))]
    Validation { name: String, missing: Vec<String> },
}
