// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-wide catalog of known data types.
//!
//! The registry is created once at node startup, filled during bring-up
//! (see [`crate::bootstrap`]), then frozen and only read from. It is indexed
//! both by (kind, id) and by full name; both keys are unique.

use crate::error::{Error, Result};
use crate::id_set::IdSet;
use crate::kind::{DataTypeDescriptor, DataTypeId, DataTypeKind};
use std::collections::{BTreeMap, HashMap};

/// Dual-indexed store of [`DataTypeDescriptor`]s.
#[derive(Debug, Default)]
pub struct GlobalDataTypeRegistry {
    /// Ordered by kind then ascending id.
    by_id: BTreeMap<(DataTypeKind, DataTypeId), DataTypeDescriptor>,
    by_name: HashMap<String, (DataTypeKind, DataTypeId)>,
    frozen: bool,
}

impl GlobalDataTypeRegistry {
    /// Create an empty, unfrozen registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor.
    ///
    /// Fails with `DuplicateId` if (kind, id) is taken, `DuplicateName` if
    /// the full name is taken, and `RegistryFrozen` once bring-up is over.
    /// The registry is left unchanged on failure.
    pub fn register(&mut self, descriptor: DataTypeDescriptor) -> Result<()> {
        if self.frozen {
            return Err(Error::RegistryFrozen);
        }

        let key = (descriptor.kind(), descriptor.id());
        if self.by_id.contains_key(&key) {
            return Err(Error::DuplicateId {
                kind: key.0,
                id: key.1.get(),
            });
        }
        if self.by_name.contains_key(descriptor.full_name()) {
            return Err(Error::DuplicateName(descriptor.full_name().to_string()));
        }

        log::debug!("[registry] registered {}", descriptor);
        self.by_name.insert(descriptor.full_name().to_string(), key);
        self.by_id.insert(key, descriptor);
        Ok(())
    }

    pub fn find_by_id(&self, kind: DataTypeKind, id: DataTypeId) -> Option<&DataTypeDescriptor> {
        self.by_id.get(&(kind, id))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&DataTypeDescriptor> {
        self.by_name.get(name).and_then(|key| self.by_id.get(key))
    }

    /// Registered ids of `kind`, ascending.
    pub fn ids_of(&self, kind: DataTypeKind) -> impl Iterator<Item = DataTypeId> + '_ {
        self.of_kind(kind).map(DataTypeDescriptor::id)
    }

    /// Registered ids of `kind` as a bit set.
    pub fn id_mask(&self, kind: DataTypeKind) -> IdSet {
        self.ids_of(kind).collect()
    }

    /// Descriptors of `kind`, ascending by id.
    pub fn of_kind(&self, kind: DataTypeKind) -> impl Iterator<Item = &DataTypeDescriptor> + '_ {
        self.by_id
            .range((kind, DataTypeId::FIRST)..=(kind, DataTypeId::LAST))
            .map(|(_, desc)| desc)
    }

    /// All descriptors, services first, each kind ascending by id.
    pub fn iter(&self) -> impl Iterator<Item = &DataTypeDescriptor> + '_ {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// End the registration phase. Further `register` calls fail.
    pub fn freeze(&mut self) {
        if !self.frozen {
            log::info!("[registry] frozen with {} data types", self.by_id.len());
        }
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Drop every entry and unfreeze.
    ///
    /// For test harnesses only; not compiled into normal builds. Any lookup
    /// result held elsewhere no longer describes the registry.
    #[cfg(any(test, feature = "test-support"))]
    #[doc(hidden)]
    pub fn reset(&mut self) {
        log::debug!("[registry] reset ({} entries dropped)", self.by_id.len());
        self.by_id.clear();
        self.by_name.clear();
        self.frozen = false;
    }
}
