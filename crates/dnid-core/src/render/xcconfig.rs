use crate::identity::model::IdentityRecord;
use crate::render::GENERATED_NOTICE;

/// Render the build-settings artifact: fixed-order `KEY = value` lines,
/// grouped with blank separators (identity basics, bundle identifiers,
/// signing identities, provisioning profiles).
///
/// Values are inserted verbatim; quoting rules, if any, belong to the
/// consuming build system.
pub fn render_xcconfig(identity: &IdentityRecord) -> String {
    let profiles = &identity.provisioning_profiles;
    let lines = [
        GENERATED_NOTICE.to_string(),
        format!("DN_IDENTITY_NAME = {}", identity.identity),
        format!("DN_DISPLAY_NAME = {}", identity.display_name),
        format!("DN_BUNDLE_PREFIX = {}", identity.bundle_prefix),
        format!("DN_DOMAIN_NAME = {}", identity.domain_name),
        format!("DN_TEAM_ID = {}", identity.team_id),
        String::new(),
        format!("DN_APP_BUNDLE_ID = {}", identity.app_bundle_id),
        format!("DN_EXTENSION_BUNDLE_ID = {}", identity.extension_bundle_id),
        format!("DN_DAEMON_BUNDLE_ID = {}", identity.daemon_bundle_id),
        format!("DN_PREFERENCE_DOMAIN = {}", identity.preference_domain),
        format!("DN_APP_GROUP_IDENTIFIER = {}", identity.app_group),
        format!("DN_MACH_SERVICE_NAME = {}", identity.mach_service_name),
        format!("DN_EXTENSION_PRODUCT_NAME = {}", identity.extension_product_name),
        format!(
            "DN_EXTENSION_SYSTEM_EXTENSION_ID = {}",
            identity.extension_system_extension_id
        ),
        format!(
            "DN_EXTENSION_XPC_IDENTIFIER = {}",
            identity.extension_xpc_identifier
        ),
        String::new(),
        format!(
            "DN_APP_CODE_SIGN_IDENTITY = {}",
            identity.developer_id_application
        ),
        format!(
            "DN_EXTENSION_CODE_SIGN_IDENTITY = {}",
            identity.extension_code_sign_identity
        ),
        format!(
            "DN_INSTALLER_CODE_SIGN_IDENTITY = {}",
            identity.developer_id_installer
        ),
        String::new(),
        format!("DN_APP_PROVISIONING_PROFILE = {}", profiles.app),
        format!("DN_EXTENSION_PROVISIONING_PROFILE = {}", profiles.extension),
        String::new(),
    ];
    lines.join("\n")
}
