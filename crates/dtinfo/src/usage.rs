// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Live usage of a data type on the local node.

use crate::kind::{DataTypeId, DataTypeKind};

bitflags::bitflags! {
    /// Relationship of the local node to a data type, as reported in a
    /// type info response. Bit values are part of the wire format.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeUsageMask: u8 {
        const KNOWN = 1 << 0;
        const SUBSCRIBED = 1 << 1;
        const PUBLISHING = 1 << 2;
        const SERVING = 1 << 3;
    }
}

/// Query interface onto the node's publisher/subscriber/server bookkeeping.
///
/// Answers must reflect the state at call time; the provider never caches
/// them between requests.
pub trait UsageTracker {
    fn is_publishing(&self, kind: DataTypeKind, id: DataTypeId) -> bool;

    fn is_subscribed(&self, kind: DataTypeKind, id: DataTypeId) -> bool;

    fn is_serving(&self, kind: DataTypeKind, id: DataTypeId) -> bool;

    /// Usage bits for a known type. Always contains `KNOWN`.
    fn usage_mask(&self, kind: DataTypeKind, id: DataTypeId) -> TypeUsageMask {
        let mut mask = TypeUsageMask::KNOWN;
        mask.set(TypeUsageMask::PUBLISHING, self.is_publishing(kind, id));
        mask.set(TypeUsageMask::SUBSCRIBED, self.is_subscribed(kind, id));
        mask.set(TypeUsageMask::SERVING, self.is_serving(kind, id));
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PublishesEverything;

    impl UsageTracker for PublishesEverything {
        fn is_publishing(&self, _kind: DataTypeKind, _id: DataTypeId) -> bool {
            true
        }

        fn is_subscribed(&self, _kind: DataTypeKind, _id: DataTypeId) -> bool {
            false
        }

        fn is_serving(&self, kind: DataTypeKind, _id: DataTypeId) -> bool {
            kind == DataTypeKind::Service
        }
    }

    #[test]
    fn mask_bit_values() {
        assert_eq!(TypeUsageMask::KNOWN.bits(), 1);
        assert_eq!(TypeUsageMask::SUBSCRIBED.bits(), 2);
        assert_eq!(TypeUsageMask::PUBLISHING.bits(), 4);
        assert_eq!(TypeUsageMask::SERVING.bits(), 8);
    }

    #[test]
    fn usage_mask_combines_bits() {
        let id = DataTypeId::new(1).unwrap();
        let tracker = PublishesEverything;

        assert_eq!(
            tracker.usage_mask(DataTypeKind::Message, id),
            TypeUsageMask::KNOWN | TypeUsageMask::PUBLISHING
        );
        assert_eq!(
            tracker.usage_mask(DataTypeKind::Service, id),
            TypeUsageMask::KNOWN | TypeUsageMask::PUBLISHING | TypeUsageMask::SERVING
        );
    }
}
