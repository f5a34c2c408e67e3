// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binding between service handlers and the node's RPC transport.
//!
//! The transport itself (framing, addressing, retransmission) lives outside
//! this crate. It only has to hand out service slots and deliver request
//! payloads to a [`RequestHandler`].

use crate::error::Result;
use crate::kind::DataTypeId;

/// A service id claimed on the RPC transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceSlot {
    service_id: DataTypeId,
}

impl ServiceSlot {
    pub fn new(service_id: DataTypeId) -> Self {
        Self { service_id }
    }

    pub fn service_id(&self) -> DataTypeId {
        self.service_id
    }
}

/// Allocates service slots on the RPC transport.
pub trait ServiceBinder {
    /// Claim the slot for `service_id`.
    ///
    /// Returns `Error::ResourceExhausted` when the transport has no room left.
    fn bind(&self, service_id: DataTypeId) -> Result<ServiceSlot>;

    /// Give a slot back.
    fn release(&self, slot: ServiceSlot);
}

/// Handler for inbound service requests.
///
/// Called once per request, synchronously and to completion.
pub trait RequestHandler {
    /// Handle the payload of a request addressed to `service_id` and return
    /// the encoded response payload.
    fn handle(&self, service_id: u16, payload: &[u8]) -> Result<Vec<u8>>;
}

/// A function-based request handler.
impl<F> RequestHandler for F
where
    F: Fn(u16, &[u8]) -> Result<Vec<u8>>,
{
    fn handle(&self, service_id: u16, payload: &[u8]) -> Result<Vec<u8>> {
        self(service_id, payload)
    }
}
