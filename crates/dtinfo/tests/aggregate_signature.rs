// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Aggregate signature properties: independent of registration order, limited
// to mutually known ids, and consistent between two peers.

#![allow(clippy::unreadable_literal)]

use dtinfo::signature::{compute, crc64_we, extend};
use dtinfo::{
    register_all, AggregateSignatureRequest, DataTypeDescriptor, DataTypeId, DataTypeKind,
    DataTypeSignature, GlobalDataTypeRegistry, IdSet, LocalNode, TypeInfoService,
};

const TYPES: &[(u16, &str, u64)] = &[
    (341, "uavcan.protocol.NodeStatus", 0x0F08_68D0_C1A7_C6F1),
    (1, "uavcan.protocol.GlobalTimeSync", 0x20271116A793C2DB),
    (1010, "uavcan.protocol.Panic", 0x8B79B4101811C1D7),
    (20, "uavcan.equipment.ahrs.Solution", 0x72A63A3C6F41FA9B),
];

fn descriptors() -> Vec<DataTypeDescriptor> {
    TYPES
        .iter()
        .map(|&(id, name, sig)| {
            DataTypeDescriptor::new(
                DataTypeKind::Message,
                DataTypeId::new(id).unwrap(),
                name,
                DataTypeSignature(sig),
            )
            .unwrap()
        })
        .collect()
}

fn aggregate(registry: &GlobalDataTypeRegistry, known: IdSet) -> (u64, IdSet) {
    let node = LocalNode::default();
    let svc = TypeInfoService::new(registry, &node);
    let req = AggregateSignatureRequest::new(DataTypeKind::Message, known);
    let resp = svc.handle_aggregate_signature(&req);
    (resp.aggregate_signature, resp.mutually_known_ids)
}

#[test]
fn crc_check_value() {
    assert_eq!(crc64_we(b"123456789"), 0x62EC59E3F1A4F00A);
}

#[test]
fn registration_order_does_not_matter() {
    let mut forward = GlobalDataTypeRegistry::new();
    register_all(&mut forward, descriptors()).unwrap();

    let mut backward = GlobalDataTypeRegistry::new();
    register_all(&mut backward, descriptors().into_iter().rev()).unwrap();

    assert_eq!(
        aggregate(&forward, IdSet::full()),
        aggregate(&backward, IdSet::full())
    );
}

#[test]
fn fold_runs_in_ascending_id_order() {
    let mut registry = GlobalDataTypeRegistry::new();
    register_all(&mut registry, descriptors()).unwrap();

    let mut sorted: Vec<_> = TYPES.to_vec();
    sorted.sort_by_key(|t| t.0);
    let expected = sorted.iter().fold(0, |acc, t| extend(acc, t.2));

    let (sig, ids) = aggregate(&registry, IdSet::full());
    assert_eq!(sig, expected);
    assert_eq!(ids.len(), TYPES.len());
}

#[test]
fn peers_agree_on_mutual_subset() {
    let mut local = GlobalDataTypeRegistry::new();
    register_all(&mut local, descriptors()).unwrap();

    // Remote knows only two of the four types, plus one the local node lacks.
    let mut remote = GlobalDataTypeRegistry::new();
    let subset: Vec<_> = descriptors()
        .into_iter()
        .filter(|d| d.id().get() == 1 || d.id().get() == 341)
        .collect();
    register_all(&mut remote, subset).unwrap();
    register_all(
        &mut remote,
        vec![DataTypeDescriptor::new(
            DataTypeKind::Message,
            DataTypeId::new(77).unwrap(),
            "vendor.Private",
            DataTypeSignature(5),
        )
        .unwrap()],
    )
    .unwrap();

    let (local_sig, mutual) = aggregate(&local, remote.id_mask(DataTypeKind::Message));
    assert_eq!(mutual.len(), 2);

    let remote_sig = compute(&mutual, |id| {
        remote
            .find_by_id(DataTypeKind::Message, id)
            .map(|d| d.signature().get())
            .unwrap_or_default()
    });
    assert_eq!(local_sig, remote_sig);
}

#[test]
fn no_mutual_types_gives_zero() {
    let mut registry = GlobalDataTypeRegistry::new();
    register_all(&mut registry, descriptors()).unwrap();

    let mut known = IdSet::new();
    known.insert(DataTypeId::new(500).unwrap());
    let (sig, ids) = aggregate(&registry, known);
    assert_eq!(sig, 0);
    assert!(ids.is_empty());
}
