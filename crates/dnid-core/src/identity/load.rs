use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::identity::error::IdentityError;
use crate::identity::model::{
    IdentityRecord, ProvisioningProfiles, SYSTEM_EXTENSION_SUFFIX, XPC_SUFFIX,
};

/// Required top-level keys of an identity file, in the order they are
/// reported when absent.
pub const REQUIRED_KEYS: &[&str] = &[
    "display_name",
    "bundle_prefix",
    "domain_name",
    "app_bundle_id",
    "extension_bundle_id",
    "daemon_bundle_id",
    "preference_domain",
    "app_group",
    "mach_service_name",
    "team_id",
    "developer_id_application",
    "developer_id_installer",
];

/// Load and validate the identity named `name` from `identity_dir`.
///
/// Fails with [`IdentityError::NotFound`] when `<identity_dir>/<name>.json`
/// does not exist, and with [`IdentityError::Validation`] naming **every**
/// missing required key in one message. JSON that does not parse as an
/// object propagates with file context instead.
///
/// On success the returned record is fully defaulted: optional extension
/// fields absent from the file are derived from the required ones.
pub fn load_identity(identity_dir: &Path, name: &str) -> Result<IdentityRecord> {
    let path = identity_dir.join(format!("{name}.json"));
    if !path.is_file() {
        return Err(IdentityError::NotFound {
            name: name.to_string(),
            path,
        }
        .into());
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read identity file {}", path.display()))?;
    let data: Map<String, Value> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse identity file {}", path.display()))?;

    Ok(build_record(name, &data)?)
}

/// Fetch a required string value, recording the key when it is absent or
/// not a string. Returns an empty placeholder in the failure case; the
/// caller bails before the placeholder can reach a built record.
fn require(data: &Map<String, Value>, key: &str, missing: &mut Vec<String>) -> String {
    match data.get(key).and_then(Value::as_str) {
        Some(value) => value.to_string(),
        None => {
            missing.push(key.to_string());
            String::new()
        }
    }
}

fn optional(data: &Map<String, Value>, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Validate required keys and assemble the defaulted, immutable record.
///
/// Validation collects every offending key (top-level and nested
/// provisioning-profile keys alike) before failing, so one run surfaces
/// the complete list.
fn build_record(name: &str, data: &Map<String, Value>) -> Result<IdentityRecord, IdentityError> {
    let mut missing = Vec::new();

    let display_name = require(data, "display_name", &mut missing);
    let bundle_prefix = require(data, "bundle_prefix", &mut missing);
    let domain_name = require(data, "domain_name", &mut missing);
    let app_bundle_id = require(data, "app_bundle_id", &mut missing);
    let extension_bundle_id = require(data, "extension_bundle_id", &mut missing);
    let daemon_bundle_id = require(data, "daemon_bundle_id", &mut missing);
    let preference_domain = require(data, "preference_domain", &mut missing);
    let app_group = require(data, "app_group", &mut missing);
    let mach_service_name = require(data, "mach_service_name", &mut missing);
    let team_id = require(data, "team_id", &mut missing);
    let developer_id_application = require(data, "developer_id_application", &mut missing);
    let developer_id_installer = require(data, "developer_id_installer", &mut missing);

    let profiles = data.get("provisioning_profiles").and_then(Value::as_object);
    let mut profile = |key: &str| -> String {
        match profiles.and_then(|p| p.get(key)).and_then(Value::as_str) {
            Some(value) => value.to_string(),
            None => {
                missing.push(format!("provisioning_profiles.{key}"));
                String::new()
            }
        }
    };
    let profile_app = profile("app");
    let profile_extension = profile("extension");

    if !missing.is_empty() {
        return Err(IdentityError::Validation {
            name: name.to_string(),
            missing,
        });
    }

    let identity = optional(data, "identity").unwrap_or_else(|| name.to_string());
    let extension_code_sign_identity = optional(data, "extension_code_sign_identity")
        .unwrap_or_else(|| developer_id_application.clone());
    let extension_product_name =
        optional(data, "extension_product_name").unwrap_or_else(|| extension_bundle_id.clone());
    let extension_system_extension_id = optional(data, "extension_system_extension_id")
        .unwrap_or_else(|| format!("{extension_bundle_id}{SYSTEM_EXTENSION_SUFFIX}"));
    let extension_xpc_identifier = optional(data, "extension_xpc_identifier")
        .unwrap_or_else(|| format!("{extension_bundle_id}{XPC_SUFFIX}"));

    Ok(IdentityRecord {
        identity,
        display_name,
        bundle_prefix,
        domain_name,
        team_id,
        app_bundle_id,
        extension_bundle_id,
        daemon_bundle_id,
        preference_domain,
        app_group,
        mach_service_name,
        extension_product_name,
        extension_system_extension_id,
        extension_xpc_identifier,
        developer_id_application,
        extension_code_sign_identity,
        developer_id_installer,
        provisioning_profiles: ProvisioningProfiles {
            app: profile_app,
            extension: profile_extension,
        },
    })
}
