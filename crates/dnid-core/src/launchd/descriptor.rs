use std::{fs, io::Cursor, path::Path};

use anyhow::{Context, Result};
use plist::Value;
use thiserror::Error;

use crate::identity::model::IdentityRecord;
use crate::util::write::write_bytes_if_changed;

/// An existing service descriptor that cannot be decoded as the expected
/// document shape. Propagated as-is; the tool never repairs or recreates
/// a descriptor.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("malformed service descriptor {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: plist::Error,
    },

    #[error("service descriptor {path} is not a dictionary")]
    NotADictionary { path: String },
}

/// Rewrite the daemon's launchd descriptor to match `identity`.
///
/// An absent descriptor is not an error and is never created; the update
/// only applies to a file that already exists. When present, exactly three
/// keys are replaced — `Label`, `MachServices` (wholesale, not merged) and
/// `AssociatedBundleIdentifiers` — and every other key in the document is
/// preserved. The document is re-encoded in binary form and written only
/// when the encoded bytes differ.
pub fn update_daemon_descriptor(path: &Path, identity: &IdentityRecord) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    let bytes = fs::read(path)
        .with_context(|| format!("failed to read service descriptor {}", path.display()))?;
    let value = Value::from_reader(Cursor::new(bytes)).map_err(|source| {
        DescriptorError::Malformed {
            path: path.display().to_string(),
            source,
        }
    })?;
    let mut document = value
        .into_dictionary()
        .ok_or_else(|| DescriptorError::NotADictionary {
            path: path.display().to_string(),
        })?;

    document.insert(
        "Label".to_string(),
        Value::String(identity.daemon_bundle_id.clone()),
    );

    let mut services = plist::Dictionary::new();
    services.insert(identity.mach_service_name.clone(), Value::Boolean(true));
    document.insert("MachServices".to_string(), Value::Dictionary(services));

    document.insert(
        "AssociatedBundleIdentifiers".to_string(),
        Value::Array(vec![
            Value::String(identity.app_bundle_id.clone()),
            Value::String(identity.extension_bundle_id.clone()),
        ]),
    );

    let mut encoded = Vec::new();
    Value::Dictionary(document)
        .to_writer_binary(&mut encoded)
        .with_context(|| format!("failed to encode service descriptor {}", path.display()))?;

    write_bytes_if_changed(path, &encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::model::ProvisioningProfiles;
    use tempfile::TempDir;

    fn sample_record() -> IdentityRecord {
        IdentityRecord {
            identity: "default".into(),
            display_name: "DNShield".into(),
            bundle_prefix: "com.example".into(),
            domain_name: "dnshield".into(),
            team_id: "ABCDE12345".into(),
            app_bundle_id: "com.example.dnshield.app".into(),
            extension_bundle_id: "com.example.dnshield.extension".into(),
            daemon_bundle_id: "com.example.dnshield.daemon".into(),
            preference_domain: "com.example.dnshield.app".into(),
            app_group: "group.com.example.dnshield".into(),
            mach_service_name: "com.example.dnshield.daemon.xpc".into(),
            extension_product_name: "com.example.dnshield.extension".into(),
            extension_system_extension_id: "com.example.dnshield.extension.systemextension".into(),
            extension_xpc_identifier: "com.example.dnshield.extension.xpc".into(),
            developer_id_application: "Developer ID Application: Example Corp".into(),
            extension_code_sign_identity: "Developer ID Application: Example Corp".into(),
            developer_id_installer: "Developer ID Installer: Example Corp".into(),
            provisioning_profiles: ProvisioningProfiles {
                app: "P1".into(),
                extension: "P2".into(),
            },
        }
    }

    /// A descriptor as it ships in the package sources: stale identity
    /// values plus unrelated launchd keys that must survive the update.
    fn seed_descriptor(path: &Path) {
        let mut services = plist::Dictionary::new();
        services.insert("com.old.daemon.xpc".to_string(), Value::Boolean(true));

        let mut root = plist::Dictionary::new();
        root.insert("Label".to_string(), Value::String("com.old.daemon".into()));
        root.insert("MachServices".to_string(), Value::Dictionary(services));
        root.insert("RunAtLoad".to_string(), Value::Boolean(true));
        root.insert(
            "ProgramArguments".to_string(),
            Value::Array(vec![Value::String("/usr/local/bin/dnshieldd".into())]),
        );

        Value::Dictionary(root).to_file_binary(path).unwrap();
    }

    fn read_dictionary(path: &Path) -> plist::Dictionary {
        Value::from_file(path).unwrap().into_dictionary().unwrap()
    }

    #[test]
    fn absent_descriptor_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("com.dnshield.daemon.plist");

        let changed = update_daemon_descriptor(&path, &sample_record()).unwrap();

        assert!(!changed);
        assert!(!path.exists(), "no artifact may be created where none existed");
    }

    #[test]
    fn rewrites_the_three_owned_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("com.dnshield.daemon.plist");
        seed_descriptor(&path);

        let changed = update_daemon_descriptor(&path, &sample_record()).unwrap();
        assert!(changed);

        let doc = read_dictionary(&path);
        assert_eq!(
            doc.get("Label").and_then(Value::as_string),
            Some("com.example.dnshield.daemon")
        );

        let services = doc
            .get("MachServices")
            .and_then(Value::as_dictionary)
            .unwrap();
        assert_eq!(services.len(), 1, "prior mapping replaced wholesale");
        assert_eq!(
            services
                .get("com.example.dnshield.daemon.xpc")
                .and_then(Value::as_boolean),
            Some(true)
        );

        let associated: Vec<&str> = doc
            .get("AssociatedBundleIdentifiers")
            .and_then(Value::as_array)
            .unwrap()
            .iter()
            .filter_map(Value::as_string)
            .collect();
        assert_eq!(
            associated,
            vec!["com.example.dnshield.app", "com.example.dnshield.extension"]
        );
    }

    #[test]
    fn unrelated_keys_are_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("com.dnshield.daemon.plist");
        seed_descriptor(&path);

        update_daemon_descriptor(&path, &sample_record()).unwrap();

        let doc = read_dictionary(&path);
        assert_eq!(doc.get("RunAtLoad").and_then(Value::as_boolean), Some(true));
        let args: Vec<&str> = doc
            .get("ProgramArguments")
            .and_then(Value::as_array)
            .unwrap()
            .iter()
            .filter_map(Value::as_string)
            .collect();
        assert_eq!(args, vec!["/usr/local/bin/dnshieldd"]);
    }

    #[test]
    fn second_update_reports_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("com.dnshield.daemon.plist");
        seed_descriptor(&path);

        assert!(update_daemon_descriptor(&path, &sample_record()).unwrap());
        assert!(!update_daemon_descriptor(&path, &sample_record()).unwrap());
    }

    #[test]
    fn xml_descriptor_is_accepted_and_rewritten_binary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("com.dnshield.daemon.plist");

        let mut root = plist::Dictionary::new();
        root.insert("Label".to_string(), Value::String("com.old.daemon".into()));
        Value::Dictionary(root).to_file_xml(&path).unwrap();

        assert!(update_daemon_descriptor(&path, &sample_record()).unwrap());

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"bplist00"));
    }

    #[test]
    fn undecodable_descriptor_fails_loudly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("com.dnshield.daemon.plist");
        std::fs::write(&path, b"definitely not a plist").unwrap();

        let err = update_daemon_descriptor(&path, &sample_record()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DescriptorError>(),
            Some(DescriptorError::Malformed { .. })
        ));
    }

    #[test]
    fn non_dictionary_descriptor_fails_loudly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("com.dnshield.daemon.plist");
        Value::Array(vec![Value::String("nope".into())])
            .to_file_xml(&path)
            .unwrap();

        let err = update_daemon_descriptor(&path, &sample_record()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DescriptorError>(),
            Some(DescriptorError::NotADictionary { .. })
        ));
    }
}
