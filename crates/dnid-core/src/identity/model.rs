use serde::{Deserialize, Serialize};

/// Suffix appended to the extension bundle identifier when no explicit
/// system-extension identifier is configured.
pub const SYSTEM_EXTENSION_SUFFIX: &str = ".systemextension";

/// Suffix appended to the extension bundle identifier when no explicit
/// XPC identifier is configured.
pub const XPC_SUFFIX: &str = ".xpc";

/// Provisioning profile references for the two signed targets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProvisioningProfiles {
    pub app: String,
    pub extension: String,
}

/// A validated signing identity.
///
/// Constructed once per run by `identity::load` and never mutated
/// afterwards; every renderer reads the same frozen record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityRecord {
    /// Name the identity was looked up under, unless overridden in the file.
    pub identity: String,
    pub display_name: String,
    pub bundle_prefix: String,
    pub domain_name: String,
    pub team_id: String,

    pub app_bundle_id: String,
    pub extension_bundle_id: String,
    pub daemon_bundle_id: String,
    pub preference_domain: String,
    pub app_group: String,
    pub mach_service_name: String,

    /// Defaults to `extension_bundle_id`.
    pub extension_product_name: String,
    /// Defaults to `extension_bundle_id` + `.systemextension`.
    pub extension_system_extension_id: String,
    /// Defaults to `extension_bundle_id` + `.xpc`.
    pub extension_xpc_identifier: String,

    pub developer_id_application: String,
    /// Defaults to `developer_id_application`.
    pub extension_code_sign_identity: String,
    pub developer_id_installer: String,

    pub provisioning_profiles: ProvisioningProfiles,
}
