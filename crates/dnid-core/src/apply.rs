use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::identity::load::load_identity;
use crate::launchd::descriptor::update_daemon_descriptor;
use crate::render::header::render_header;
use crate::render::xcconfig::render_xcconfig;
use crate::util::write::write_if_changed;

/// Filesystem layout the pipeline reads from and writes into.
///
/// Paths are explicit so the whole pipeline runs unchanged against a
/// temporary directory in tests.
#[derive(Debug, Clone)]
pub struct ApplyConfig {
    /// Directory of `<name>.json` identity files.
    pub identity_dir: PathBuf,
    /// Generated build-settings artifact.
    pub xcconfig_path: PathBuf,
    /// Generated identity constants header.
    pub header_path: PathBuf,
    /// Existing launchd descriptor to update in place.
    pub daemon_descriptor_path: PathBuf,
    /// Marker recording the active identity name.
    pub active_marker_path: PathBuf,
}

impl ApplyConfig {
    /// Conventional layout under a repository root.
    pub fn for_root(root: &Path) -> Self {
        let identity_dir = root.join("config").join("identities");
        Self {
            xcconfig_path: root
                .join("dnshield")
                .join("Configurations")
                .join("Identity.xcconfig"),
            header_path: root.join("dnshield").join("Common").join("DNIdentity.h"),
            daemon_descriptor_path: root
                .join("resources")
                .join("package")
                .join("LaunchDaemons")
                .join("com.dnshield.daemon.plist"),
            active_marker_path: identity_dir.join(".active"),
            identity_dir,
        }
    }
}

/// Result of one apply run.
#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    /// Resolved identity name (after defaulting).
    pub identity: String,
    pub xcconfig_changed: bool,
    pub header_changed: bool,
    pub descriptor_changed: bool,
}

impl ApplyOutcome {
    /// Whether any tracked artifact changed on disk. The active marker is
    /// bookkeeping and does not count.
    pub fn changed(&self) -> bool {
        self.xcconfig_changed || self.header_changed || self.descriptor_changed
    }
}

/// Run the full pipeline: load and validate the named identity, render the
/// artifacts, and write each one only when its content differs.
///
/// The three artifact updates are independent of each other; a re-run over
/// unchanged inputs touches nothing.
pub fn apply(config: &ApplyConfig, name: &str) -> Result<ApplyOutcome> {
    let identity = load_identity(&config.identity_dir, name)?;

    let xcconfig_changed = write_if_changed(&config.xcconfig_path, &render_xcconfig(&identity))?;
    let header_changed = write_if_changed(&config.header_path, &render_header(&identity))?;
    let descriptor_changed = update_daemon_descriptor(&config.daemon_descriptor_path, &identity)?;

    write_if_changed(
        &config.active_marker_path,
        &format!("{}\n", identity.identity),
    )?;

    Ok(ApplyOutcome {
        identity: identity.identity,
        xcconfig_changed,
        header_changed,
        descriptor_changed,
    })
}
