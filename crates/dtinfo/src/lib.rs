// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # dtinfo
//!
//! Data type information provider for UAVCAN-style nodes.
//!
//! A node keeps a registry of the data types it knows (kind, 10-bit id, full
//! name, 64-bit signature) and answers two RPC services on behalf of it:
//!
//! - `GetDataTypeInfo` (service id 2): signature and local usage of one type,
//!   looked up by name or by (kind, id).
//! - `ComputeAggregateTypeSignature` (service id 3): a single 64-bit fold of
//!   the signatures of every type both peers know, for compatibility checks.
//!
//! ## Quick Start
//!
//! ```rust
//! use dtinfo::{
//!     Bootstrap, DataTypeDescriptor, DataTypeId, DataTypeKind, DataTypeSignature,
//!     GlobalDataTypeRegistry, LocalNode, TypeInfoService,
//! };
//!
//! let mut registry = GlobalDataTypeRegistry::new();
//! Bootstrap::new()
//!     .with(DataTypeDescriptor::new(
//!         DataTypeKind::Message,
//!         DataTypeId::new(550)?,
//!         "uavcan.protocol.NodeStatus",
//!         DataTypeSignature(0x0F08_68D0_C1A7_C6F1),
//!     )?)
//!     .freeze(true)
//!     .run(&mut registry)?;
//!
//! let node = LocalNode::default();
//! let mut provider = TypeInfoService::new(&registry, &node);
//! provider.start(&node)?;
//! assert!(provider.is_running());
//! # Ok::<(), dtinfo::Error>(())
//! ```

pub mod bootstrap;
pub mod codec;
pub mod config;
pub mod error;
pub mod id_set;
pub mod kind;
pub mod messages;
pub mod node;
pub mod registry;
pub mod service;
pub mod signature;
pub mod transport;
pub mod usage;

pub use bootstrap::{register_all, Bootstrap};
pub use codec::{CodecError, WireDecode, WireEncode};
pub use config::{ProviderConfig, SignatureValue, TypeEntry};
pub use error::{Error, Result};
pub use id_set::IdSet;
pub use kind::{DataTypeDescriptor, DataTypeId, DataTypeKind, DataTypeSignature, KindTag};
pub use messages::{
    AggregateSignatureRequest, AggregateSignatureResponse, TypeInfoRequest, TypeInfoResponse,
    COMPUTE_AGGREGATE_TYPE_SIGNATURE_ID, COMPUTE_AGGREGATE_TYPE_SIGNATURE_NAME,
    GET_DATA_TYPE_INFO_ID, GET_DATA_TYPE_INFO_NAME,
};
pub use node::LocalNode;
pub use registry::GlobalDataTypeRegistry;
pub use service::TypeInfoService;
pub use transport::{RequestHandler, ServiceBinder, ServiceSlot};
pub use usage::{TypeUsageMask, UsageTracker};
