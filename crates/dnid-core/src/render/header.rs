use crate::identity::model::IdentityRecord;
use crate::render::GENERATED_NOTICE;

/// Escape a value for embedding inside a double-quoted literal.
///
/// Backslashes are doubled before quotes are escaped; reversing the two
/// steps would corrupt values containing `\"`.
pub fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render the identity constants header consumed by application sources.
///
/// Output is byte-identical for identical records; the change-aware writer
/// relies on that to keep no-op runs from touching the file.
pub fn render_header(identity: &IdentityRecord) -> String {
    let define =
        |symbol: &str, value: &str| format!("#define {symbol} @\"{}\"", escape_literal(value));

    let lines = [
        GENERATED_NOTICE.to_string(),
        String::new(),
        "#pragma once".to_string(),
        String::new(),
        define("DN_IDENTITY_NAME", &identity.identity),
        define("DN_IDENTITY_DISPLAY_NAME", &identity.display_name),
        define("DN_IDENTITY_BUNDLE_PREFIX", &identity.bundle_prefix),
        define("DN_IDENTITY_DOMAIN_NAME", &identity.domain_name),
        String::new(),
        define("DN_IDENTITY_APP_BUNDLE_ID", &identity.app_bundle_id),
        define("DN_IDENTITY_EXTENSION_BUNDLE_ID", &identity.extension_bundle_id),
        define("DN_IDENTITY_DAEMON_BUNDLE_ID", &identity.daemon_bundle_id),
        define("DN_IDENTITY_PREFERENCE_DOMAIN", &identity.preference_domain),
        define("DN_IDENTITY_APP_GROUP", &identity.app_group),
        define("DN_IDENTITY_MACH_SERVICE", &identity.mach_service_name),
        define(
            "DN_IDENTITY_EXTENSION_PRODUCT_NAME",
            &identity.extension_product_name,
        ),
        define(
            "DN_IDENTITY_EXTENSION_SYSTEM_EXTENSION_ID",
            &identity.extension_system_extension_id,
        ),
        define(
            "DN_IDENTITY_EXTENSION_XPC_IDENTIFIER",
            &identity.extension_xpc_identifier,
        ),
        String::new(),
        define("DN_IDENTITY_TEAM_IDENTIFIER", &identity.team_id),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
