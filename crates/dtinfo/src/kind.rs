// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Data type identity: kind, id, signature and the registered descriptor.
//!
//! A type is addressed on the bus by its (kind, id) pair or by its dotted
//! full name. The signature is a precomputed 64-bit fingerprint of the field
//! layout, supplied by generated code and never derived here.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a full type name on the wire (bytes).
pub const MAX_NAME_LEN: usize = 80;

/// Broadcast message type or request/response service type.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataTypeKind {
    Service = 0,
    Message = 1,
}

impl DataTypeKind {
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(DataTypeKind::Service),
            1 => Some(DataTypeKind::Message),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Kind field as carried on the wire.
///
/// Requests may carry any tag; only 0 and 1 name a kind. An out-of-range tag
/// is a malformed kind and matches no registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KindTag(pub u8);

impl KindTag {
    /// Tag echoed when no kind applies (name lookup miss).
    pub const NONE: KindTag = KindTag(0);

    pub fn kind(self) -> Option<DataTypeKind> {
        DataTypeKind::from_u8(self.0)
    }

    pub fn is_malformed(self) -> bool {
        self.kind().is_none()
    }
}

impl From<DataTypeKind> for KindTag {
    fn from(kind: DataTypeKind) -> Self {
        KindTag(kind.as_u8())
    }
}

/// Data type id in [0, 1023], meaningful only together with a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataTypeId(u16);

impl DataTypeId {
    pub const MAX: u16 = 1023;

    /// Number of distinct ids per kind.
    pub const COUNT: usize = Self::MAX as usize + 1;

    pub const FIRST: DataTypeId = DataTypeId(0);
    pub const LAST: DataTypeId = DataTypeId(Self::MAX);

    /// Compile-time constructor for well-known ids. Panics if out of range.
    pub const fn from_const(raw: u16) -> Self {
        assert!(raw <= Self::MAX, "data type id out of range");
        DataTypeId(raw)
    }

    pub fn new(raw: u16) -> Result<Self> {
        Self::try_from_raw(raw).ok_or(Error::InvalidId(raw))
    }

    pub fn try_from_raw(raw: u16) -> Option<Self> {
        (raw <= Self::MAX).then_some(DataTypeId(raw))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DataTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque 64-bit layout fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DataTypeSignature(pub u64);

impl DataTypeSignature {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DataTypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Immutable description of one registered data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTypeDescriptor {
    kind: DataTypeKind,
    id: DataTypeId,
    full_name: String,
    signature: DataTypeSignature,
}

impl DataTypeDescriptor {
    /// Build a descriptor, validating the full name.
    pub fn new(
        kind: DataTypeKind,
        id: DataTypeId,
        full_name: impl Into<String>,
        signature: DataTypeSignature,
    ) -> Result<Self> {
        let full_name = full_name.into();
        if full_name.is_empty() || full_name.len() > MAX_NAME_LEN {
            return Err(Error::InvalidName(full_name));
        }
        Ok(Self {
            kind,
            id,
            full_name,
            signature,
        })
    }

    pub fn kind(&self) -> DataTypeKind {
        self.kind
    }

    pub fn id(&self) -> DataTypeId {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn signature(&self) -> DataTypeSignature {
        self.signature
    }
}

impl fmt::Display for DataTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:?} {}, sig {})",
            self.full_name, self.kind, self.id, self.signature
        )
    }
}
