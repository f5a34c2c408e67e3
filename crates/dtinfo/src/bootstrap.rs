// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Explicit, ordered registration of the type catalog.
//!
//! Registration happens once at startup, before any provider serves
//! requests. The first failing descriptor aborts the run; descriptors
//! registered before it stay in the registry.

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::kind::DataTypeDescriptor;
use crate::registry::GlobalDataTypeRegistry;

/// Ordered list of descriptors to register.
#[derive(Debug, Default)]
pub struct Bootstrap {
    descriptors: Vec<DataTypeDescriptor>,
    freeze: bool,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a parsed configuration.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        Ok(Self::new()
            .with_all(config.descriptors()?)
            .freeze(config.freeze_after_bootstrap))
    }

    pub fn with(mut self, descriptor: DataTypeDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    pub fn with_all<I>(mut self, descriptors: I) -> Self
    where
        I: IntoIterator<Item = DataTypeDescriptor>,
    {
        self.descriptors.extend(descriptors);
        self
    }

    /// Freeze the registry after a successful run.
    pub fn freeze(mut self, freeze: bool) -> Self {
        self.freeze = freeze;
        self
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Register every descriptor in order. Returns the number registered.
    pub fn run(self, registry: &mut GlobalDataTypeRegistry) -> Result<usize> {
        let count = register_all(registry, self.descriptors)?;
        if self.freeze {
            registry.freeze();
        }
        Ok(count)
    }
}

/// Register `descriptors` in iteration order, stopping at the first error.
pub fn register_all<I>(registry: &mut GlobalDataTypeRegistry, descriptors: I) -> Result<usize>
where
    I: IntoIterator<Item = DataTypeDescriptor>,
{
    let mut count = 0;
    for descriptor in descriptors {
        let label = descriptor.to_string();
        if let Err(e) = registry.register(descriptor) {
            log::error!("[bootstrap] registration of {} failed: {}", label, e);
            return Err(e);
        }
        count += 1;
    }
    log::info!(
        "[bootstrap] registered {} data types ({} total)",
        count,
        registry.len()
    );
    Ok(count)
}
