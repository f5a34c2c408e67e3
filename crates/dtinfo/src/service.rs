// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Data type info provider.
//!
//! Answers two queries from other nodes on the bus:
//!
//! - **GetDataTypeInfo**: look a type up by name or by (kind, id) and report
//!   its signature and what the local node is doing with it.
//! - **ComputeAggregateTypeSignature**: fold the signatures of the types both
//!   nodes know into one value, so peers can check wire compatibility without
//!   exchanging schemas.
//!
//! Unknown types and malformed kinds produce ordinary responses. Only
//! transport failures and undecodable payloads are errors.

use crate::codec::{WireDecode, WireEncode};
use crate::error::{Error, Result};
use crate::id_set::IdSet;
use crate::kind::{DataTypeDescriptor, DataTypeId, KindTag};
use crate::messages::{
    AggregateSignatureRequest, AggregateSignatureResponse, TypeInfoRequest, TypeInfoResponse,
    COMPUTE_AGGREGATE_TYPE_SIGNATURE_ID, GET_DATA_TYPE_INFO_ID,
};
use crate::registry::GlobalDataTypeRegistry;
use crate::signature::SignatureAggregator;
use crate::transport::{RequestHandler, ServiceBinder, ServiceSlot};
use crate::usage::UsageTracker;
use std::sync::atomic::{AtomicU64, Ordering};

const INFO_SERVICE: DataTypeId = DataTypeId::from_const(GET_DATA_TYPE_INFO_ID);
const AGGREGATE_SERVICE: DataTypeId =
    DataTypeId::from_const(COMPUTE_AGGREGATE_TYPE_SIGNATURE_ID);

/// Serves type info and aggregate signature queries for the local node.
///
/// Borrows the registry and the usage tracker; both outlive the service.
pub struct TypeInfoService<'a, U: UsageTracker + ?Sized> {
    registry: &'a GlobalDataTypeRegistry,
    usage: &'a U,
    slots: Vec<ServiceSlot>,
    requests_served: AtomicU64,
}

impl<'a, U: UsageTracker + ?Sized> TypeInfoService<'a, U> {
    pub fn new(registry: &'a GlobalDataTypeRegistry, usage: &'a U) -> Self {
        Self {
            registry,
            usage,
            slots: Vec::with_capacity(2),
            requests_served: AtomicU64::new(0),
        }
    }

    /// Claim the transport slots for both services.
    ///
    /// Allocation failures are returned as is. If the second slot cannot be
    /// claimed, the first one is released before returning.
    pub fn start<B: ServiceBinder + ?Sized>(&mut self, binder: &B) -> Result<()> {
        if !self.slots.is_empty() {
            return Ok(());
        }

        let info = binder.bind(INFO_SERVICE)?;
        let aggregate = match binder.bind(AGGREGATE_SERVICE) {
            Ok(slot) => slot,
            Err(e) => {
                binder.release(info);
                return Err(e);
            }
        };
        self.slots.push(info);
        self.slots.push(aggregate);

        log::info!(
            "[provider] started: services {} and {} ({} data types registered)",
            GET_DATA_TYPE_INFO_ID,
            COMPUTE_AGGREGATE_TYPE_SIGNATURE_ID,
            self.registry.len()
        );
        Ok(())
    }

    /// Release the transport slots.
    pub fn stop<B: ServiceBinder + ?Sized>(&mut self, binder: &B) {
        for slot in self.slots.drain(..) {
            binder.release(slot);
        }
        log::info!("[provider] stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Number of requests handled through [`dispatch`](Self::dispatch).
    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }

    /// Answer a type info query.
    pub fn handle_type_info(&self, req: &TypeInfoRequest) -> TypeInfoResponse {
        let by_name = !req.name.is_empty();
        let found = if by_name {
            self.registry.find_by_name(&req.name)
        } else {
            self.find_by_tag(req.kind, req.id)
        };

        match found {
            Some(desc) => self.describe(desc),
            // Echo the key that was actually used for the lookup.
            None if by_name => {
                log::debug!("[provider] type info: unknown name '{}'", req.name);
                TypeInfoResponse {
                    name: req.name.clone(),
                    id: 0,
                    kind: KindTag::NONE,
                    ..TypeInfoResponse::default()
                }
            }
            None => {
                log::debug!(
                    "[provider] type info: unknown id {} (kind tag {})",
                    req.id,
                    req.kind.0
                );
                TypeInfoResponse {
                    id: req.id,
                    kind: req.kind,
                    ..TypeInfoResponse::default()
                }
            }
        }
    }

    /// Answer an aggregate signature query.
    pub fn handle_aggregate_signature(
        &self,
        req: &AggregateSignatureRequest,
    ) -> AggregateSignatureResponse {
        let Some(kind) = req.kind.kind() else {
            log::warn!(
                "[provider] aggregate signature: malformed kind tag {}",
                req.kind.0
            );
            return AggregateSignatureResponse::default();
        };

        // Descriptors come back ascending by id, which is the fold order.
        let mut mutual = IdSet::new();
        let mut aggregator = SignatureAggregator::new();
        for desc in self
            .registry
            .of_kind(kind)
            .filter(|desc| req.known_ids.contains(desc.id()))
        {
            mutual.insert(desc.id());
            aggregator.push(desc.signature().get());
        }

        let aggregate_signature = aggregator.finish();
        log::debug!(
            "[provider] aggregate signature for {:?}: {} mutual types -> {:#018x}",
            kind,
            aggregator.count(),
            aggregate_signature
        );

        AggregateSignatureResponse {
            aggregate_signature,
            mutually_known_ids: mutual,
        }
    }

    /// Decode a request for `service_id`, answer it and encode the response.
    pub fn dispatch(&self, service_id: u16, payload: &[u8]) -> Result<Vec<u8>> {
        let response = match service_id {
            GET_DATA_TYPE_INFO_ID => {
                let (req, _) = TypeInfoRequest::decode(payload).map_err(|e| {
                    log::warn!("[provider] undecodable type info request: {}", e);
                    Error::from(e)
                })?;
                self.handle_type_info(&req).to_bytes()?
            }
            COMPUTE_AGGREGATE_TYPE_SIGNATURE_ID => {
                let (req, _) = AggregateSignatureRequest::decode(payload).map_err(|e| {
                    log::warn!("[provider] undecodable aggregate signature request: {}", e);
                    Error::from(e)
                })?;
                self.handle_aggregate_signature(&req).to_bytes()?
            }
            other => return Err(Error::UnsupportedService(other)),
        };
        self.requests_served.fetch_add(1, Ordering::Relaxed);
        Ok(response)
    }

    fn find_by_tag(&self, kind: KindTag, id: u16) -> Option<&'a DataTypeDescriptor> {
        let kind = kind.kind()?;
        let id = DataTypeId::try_from_raw(id)?;
        self.registry.find_by_id(kind, id)
    }

    fn describe(&self, desc: &DataTypeDescriptor) -> TypeInfoResponse {
        let mask = self.usage.usage_mask(desc.kind(), desc.id());
        log::debug!("[provider] type info: {} mask={:?}", desc, mask);
        TypeInfoResponse {
            signature: desc.signature().get(),
            id: desc.id().get(),
            kind: desc.kind().into(),
            mask,
            name: desc.full_name().to_string(),
        }
    }
}

impl<U: UsageTracker + ?Sized> RequestHandler for TypeInfoService<'_, U> {
    fn handle(&self, service_id: u16, payload: &[u8]) -> Result<Vec<u8>> {
        self.dispatch(service_id, payload)
    }
}
