// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for the data type info provider.
//!
//! Only operational failures live here. An unknown type or a malformed kind
//! in a query is answered with a well-formed response, never with an `Error`.

use crate::codec::CodecError;
use crate::kind::DataTypeKind;
use thiserror::Error;

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the registry, the service and the configuration layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A descriptor with the same (kind, id) is already registered
    #[error("duplicate data type id: {kind:?} {id}")]
    DuplicateId { kind: DataTypeKind, id: u16 },

    /// A descriptor with the same full name is already registered
    #[error("duplicate data type name: {0}")]
    DuplicateName(String),

    /// Data type id outside of [0, 1023]
    #[error("invalid data type id: {0}")]
    InvalidId(u16),

    /// Full name is empty or longer than the wire limit
    #[error("invalid data type name: '{0}'")]
    InvalidName(String),

    /// Registration attempted after bring-up completed
    #[error("data type registry is frozen")]
    RegistryFrozen,

    /// The RPC transport has no free service slot
    #[error("RPC transport resources exhausted")]
    ResourceExhausted,

    /// The RPC transport already has a server bound for this service id
    #[error("service {0} already bound on the RPC transport")]
    ServiceAlreadyBound(u16),

    /// Request addressed to a service this provider does not answer
    #[error("unsupported service id: {0}")]
    UnsupportedService(u16),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = Error::DuplicateId {
            kind: DataTypeKind::Message,
            id: 550,
        };
        assert!(err.to_string().contains("550"));
        assert!(err.to_string().contains("Message"));

        let err = Error::DuplicateName("uavcan.protocol.NodeStatus".to_string());
        assert!(err.to_string().contains("uavcan.protocol.NodeStatus"));

        assert!(Error::ResourceExhausted.to_string().contains("exhausted"));
    }

    #[test]
    fn codec_error_converts() {
        let err: Error = CodecError::InvalidUtf8.into();
        assert!(matches!(err, Error::Codec(CodecError::InvalidUtf8)));
    }
}
