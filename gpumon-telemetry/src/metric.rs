use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// UUID label key in the current namespace
pub const UUID_LABEL_KEY: &str = "UUID";

/// UUID label key in the legacy namespace
pub const LEGACY_UUID_LABEL_KEY: &str = "uuid";

/// Label key under which the device UUID is reported.
///
/// The legacy namespace differs from the current one only in this casing;
/// no other part of the record changes with the toggle.
pub fn uuid_label_key(use_old_namespace: bool) -> &'static str {
    if use_old_namespace {
        LEGACY_UUID_LABEL_KEY
    } else {
        UUID_LABEL_KEY
    }
}

/// One converted metric record, ready for an exporter.
///
/// Created fresh on every collection pass and handed off immediately;
/// nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    /// Display name of the counter this value belongs to
    pub name: String,
    /// Stringified field value
    pub value: String,

    /// Label key for the device UUID, namespace dependent
    pub uuid_key: String,
    /// GPU index as a decimal string
    pub gpu: String,
    /// Device UUID
    pub gpu_uuid: String,
    /// Device node label, `nvidia<index>`
    pub gpu_device: String,

    /// MIG profile label, present only for instance entities
    pub mig_profile: Option<String>,
    /// Driver-visible MIG instance id, present only for instance entities
    pub gpu_instance_id: Option<String>,

    /// Open extension point for additional labels
    pub attributes: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_label_key_mapping() {
        assert_eq!(uuid_label_key(false), "UUID");
        assert_eq!(uuid_label_key(true), "uuid");
    }
}
