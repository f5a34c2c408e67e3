// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-process node bookkeeping.
//!
//! `LocalNode` tracks which data types the node publishes, subscribes to and
//! serves, and owns a fixed number of RPC service slots. It implements both
//! [`UsageTracker`] and [`ServiceBinder`], so a provider started on it shows
//! its own services as `SERVING`.

use crate::error::{Error, Result};
use crate::kind::{DataTypeId, DataTypeKind};
use crate::transport::{RequestHandler, ServiceBinder, ServiceSlot};
use crate::usage::UsageTracker;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashSet};

/// Default number of service slots on a node.
pub const DEFAULT_SERVICE_SLOTS: usize = 8;

type TypeKey = (DataTypeKind, DataTypeId);

/// Publisher/subscriber/server state of the local node.
pub struct LocalNode {
    max_service_slots: usize,
    publishing: RwLock<HashSet<TypeKey>>,
    subscribed: RwLock<HashSet<TypeKey>>,
    /// Bound service ids, ascending.
    serving: RwLock<BTreeSet<DataTypeId>>,
}

impl LocalNode {
    pub fn new(max_service_slots: usize) -> Self {
        Self {
            max_service_slots,
            publishing: RwLock::new(HashSet::new()),
            subscribed: RwLock::new(HashSet::new()),
            serving: RwLock::new(BTreeSet::new()),
        }
    }

    pub fn start_publishing(&self, kind: DataTypeKind, id: DataTypeId) {
        if self.publishing.write().insert((kind, id)) {
            log::debug!("[node] publishing {:?} {}", kind, id);
        }
    }

    pub fn stop_publishing(&self, kind: DataTypeKind, id: DataTypeId) {
        if self.publishing.write().remove(&(kind, id)) {
            log::debug!("[node] stopped publishing {:?} {}", kind, id);
        }
    }

    pub fn subscribe(&self, kind: DataTypeKind, id: DataTypeId) {
        if self.subscribed.write().insert((kind, id)) {
            log::debug!("[node] subscribed to {:?} {}", kind, id);
        }
    }

    pub fn unsubscribe(&self, kind: DataTypeKind, id: DataTypeId) {
        if self.subscribed.write().remove(&(kind, id)) {
            log::debug!("[node] unsubscribed from {:?} {}", kind, id);
        }
    }

    /// Service ids currently bound, ascending.
    pub fn bound_services(&self) -> Vec<DataTypeId> {
        self.serving.read().iter().copied().collect()
    }

    pub fn free_service_slots(&self) -> usize {
        self.max_service_slots.saturating_sub(self.serving.read().len())
    }

    /// Hand a request to `handler` as the transport would.
    ///
    /// Fails with `UnsupportedService` if no slot is bound for `service_id`.
    pub fn deliver<H>(&self, handler: &H, service_id: u16, payload: &[u8]) -> Result<Vec<u8>>
    where
        H: RequestHandler + ?Sized,
    {
        let bound = DataTypeId::try_from_raw(service_id)
            .is_some_and(|id| self.serving.read().contains(&id));
        if !bound {
            return Err(Error::UnsupportedService(service_id));
        }
        handler.handle(service_id, payload)
    }
}

impl Default for LocalNode {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_SLOTS)
    }
}

impl UsageTracker for LocalNode {
    fn is_publishing(&self, kind: DataTypeKind, id: DataTypeId) -> bool {
        self.publishing.read().contains(&(kind, id))
    }

    fn is_subscribed(&self, kind: DataTypeKind, id: DataTypeId) -> bool {
        self.subscribed.read().contains(&(kind, id))
    }

    fn is_serving(&self, kind: DataTypeKind, id: DataTypeId) -> bool {
        kind == DataTypeKind::Service && self.serving.read().contains(&id)
    }
}

impl ServiceBinder for LocalNode {
    fn bind(&self, service_id: DataTypeId) -> Result<ServiceSlot> {
        let mut serving = self.serving.write();
        if serving.contains(&service_id) {
            log::warn!("[node] service {} already bound", service_id);
            return Err(Error::ServiceAlreadyBound(service_id.get()));
        }
        if serving.len() >= self.max_service_slots {
            log::warn!(
                "[node] no free service slot for service {} ({} in use)",
                service_id,
                serving.len()
            );
            return Err(Error::ResourceExhausted);
        }
        serving.insert(service_id);
        log::debug!("[node] bound service {}", service_id);
        Ok(ServiceSlot::new(service_id))
    }

    fn release(&self, slot: ServiceSlot) {
        if self.serving.write().remove(&slot.service_id()) {
            log::debug!("[node] released service {}", slot.service_id());
        }
    }
}
