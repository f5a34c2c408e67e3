// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Provider configuration.
//!
//! Supports both programmatic and YAML file configuration.
//!
//! # Example YAML
//!
//! ```yaml
//! max_service_slots: 8
//! freeze_after_bootstrap: true
//! types:
//!   - name: uavcan.protocol.NodeStatus
//!     kind: message
//!     id: 550
//!     signature: "0x0f0868d0c1a7c6f1"
//!   - name: uavcan.protocol.GetDataTypeInfo
//!     kind: service
//!     id: 2
//!     signature: 1342713297312637400
//! ```

use crate::error::{Error, Result};
use crate::kind::{DataTypeDescriptor, DataTypeId, DataTypeKind, DataTypeSignature};
use crate::node::{LocalNode, DEFAULT_SERVICE_SLOTS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Slots the provider itself needs (one per service).
const PROVIDER_SLOTS: usize = 2;

/// Provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// RPC service slots available on the local node.
    #[serde(default = "default_service_slots")]
    pub max_service_slots: usize,

    /// Freeze the registry once the catalog is registered.
    #[serde(default = "default_true")]
    pub freeze_after_bootstrap: bool,

    /// Type catalog, registered in file order.
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

fn default_service_slots() -> usize {
    DEFAULT_SERVICE_SLOTS
}

fn default_true() -> bool {
    true
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            max_service_slots: DEFAULT_SERVICE_SLOTS,
            freeze_after_bootstrap: true,
            types: Vec::new(),
        }
    }
}

impl ProviderConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Duplicate ids and names are left to registration, which reports them
    /// with the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.max_service_slots < PROVIDER_SLOTS {
            return Err(Error::Config(format!(
                "max_service_slots must be at least {} (got {})",
                PROVIDER_SLOTS, self.max_service_slots
            )));
        }

        for (i, entry) in self.types.iter().enumerate() {
            entry
                .to_descriptor()
                .map_err(|e| Error::Config(format!("type entry {}: {}", i, e)))?;
        }

        Ok(())
    }

    /// Descriptors for the catalog, in file order.
    pub fn descriptors(&self) -> Result<Vec<DataTypeDescriptor>> {
        self.types.iter().map(TypeEntry::to_descriptor).collect()
    }

    /// Node bookkeeping sized from this configuration.
    pub fn local_node(&self) -> LocalNode {
        LocalNode::new(self.max_service_slots)
    }

    /// Add a catalog entry.
    pub fn add_type(&mut self, entry: TypeEntry) {
        self.types.push(entry);
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeEntry {
    /// Dotted full name (e.g. "uavcan.protocol.NodeStatus").
    pub name: String,

    pub kind: DataTypeKind,

    /// Data type id in [0, 1023].
    pub id: u16,

    pub signature: SignatureValue,
}

impl TypeEntry {
    pub fn new(name: impl Into<String>, kind: DataTypeKind, id: u16, signature: u64) -> Self {
        Self {
            name: name.into(),
            kind,
            id,
            signature: SignatureValue::Int(signature),
        }
    }

    pub fn to_descriptor(&self) -> Result<DataTypeDescriptor> {
        DataTypeDescriptor::new(
            self.kind,
            DataTypeId::new(self.id)?,
            self.name.clone(),
            DataTypeSignature(self.signature.value()?),
        )
    }
}

/// Signature as written in the file: an integer or a "0x"-prefixed string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignatureValue {
    Int(u64),
    Text(String),
}

impl SignatureValue {
    pub fn value(&self) -> Result<u64> {
        match self {
            SignatureValue::Int(v) => Ok(*v),
            SignatureValue::Text(text) => {
                let text = text.trim();
                let parsed = match text
                    .strip_prefix("0x")
                    .or_else(|| text.strip_prefix("0X"))
                {
                    Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
                    None => text.replace('_', "").parse::<u64>(),
                };
                parsed.map_err(|e| Error::Config(format!("invalid signature '{}': {}", text, e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
max_service_slots: 4
types:
  - name: uavcan.protocol.NodeStatus
    kind: message
    id: 550
    signature: "0x0f08_68d0_c1a7_c6f1"
  - name: uavcan.protocol.GetDataTypeInfo
    kind: service
    id: 2
    signature: 12345
"#;

    #[test]
    fn parse_sample() {
        let config = ProviderConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.max_service_slots, 4);
        assert!(config.freeze_after_bootstrap);

        let descs = config.descriptors().unwrap();
        assert_eq!(descs.len(), 2);
        assert_eq!(descs[0].full_name(), "uavcan.protocol.NodeStatus");
        assert_eq!(descs[0].kind(), DataTypeKind::Message);
        assert_eq!(descs[0].signature(), DataTypeSignature(0x0F08_68D0_C1A7_C6F1));
        assert_eq!(descs[1].id().get(), 2);
        assert_eq!(descs[1].signature(), DataTypeSignature(12345));
    }

    #[test]
    fn defaults_apply() {
        let config = ProviderConfig::from_yaml_str("types: []").unwrap();
        assert_eq!(config.max_service_slots, DEFAULT_SERVICE_SLOTS);
        assert!(config.freeze_after_bootstrap);
        assert!(config.types.is_empty());
    }

    #[test]
    fn id_out_of_range_rejected() {
        let yaml = r#"
types:
  - name: a.B
    kind: message
    id: 1024
    signature: 1
"#;
        let err = ProviderConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("1024")));
    }

    #[test]
    fn bad_signature_rejected() {
        let yaml = r#"
types:
  - name: a.B
    kind: message
    id: 1
    signature: "0xZZ"
"#;
        assert!(matches!(
            ProviderConfig::from_yaml_str(yaml),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn unknown_kind_rejected() {
        let yaml = r#"
types:
  - name: a.B
    kind: topic
    id: 1
    signature: 1
"#;
        assert!(matches!(
            ProviderConfig::from_yaml_str(yaml),
            Err(Error::Yaml(_))
        ));
    }

    #[test]
    fn too_few_slots_rejected() {
        let config = ProviderConfig {
            max_service_slots: 1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = ProviderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.types.len(), 2);
        assert_eq!(config.local_node().free_service_slots(), 4);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ProviderConfig::from_file("/nonexistent/dtinfo.yaml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn programmatic_config() {
        let mut config = ProviderConfig::default();
        config.add_type(TypeEntry::new("a.B", DataTypeKind::Message, 9, 77));
        config.validate().unwrap();
        assert_eq!(config.descriptors().unwrap()[0].signature().get(), 77);
    }
}
