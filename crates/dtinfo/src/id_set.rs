// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed 1024-bit set of data type ids.
//!
//! Used for the caller's `known_ids` and the provider's `mutually_known_ids`.
//! Iteration always yields ids in ascending order, which the aggregate
//! signature fold depends on.

use crate::kind::DataTypeId;
use bitvec::prelude::*;
use std::fmt;

/// Number of bytes in the wire form of an [`IdSet`].
pub const ID_SET_BYTES: usize = DataTypeId::COUNT / 8;

const WORDS: usize = DataTypeId::COUNT / 64;

/// One bit per possible data type id.
#[derive(Clone, Copy)]
pub struct IdSet {
    bits: BitArray<[u64; WORDS], Lsb0>,
}

impl IdSet {
    /// Empty set.
    pub fn new() -> Self {
        Self {
            bits: BitArray::new([0; WORDS]),
        }
    }

    /// Set containing every id in [0, 1023].
    pub fn full() -> Self {
        let mut set = Self::new();
        set.bits.fill(true);
        set
    }

    pub fn insert(&mut self, id: DataTypeId) {
        self.bits.set(id.index(), true);
    }

    pub fn remove(&mut self, id: DataTypeId) {
        self.bits.set(id.index(), false);
    }

    pub fn contains(&self, id: DataTypeId) -> bool {
        self.bits[id.index()]
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = DataTypeId> + '_ {
        self.bits
            .iter_ones()
            .filter_map(|idx| DataTypeId::try_from_raw(idx as u16))
    }

    /// Wire form: bit `i` lives in byte `i / 8` at position `i % 8`.
    pub fn to_bytes(&self) -> [u8; ID_SET_BYTES] {
        let mut out = [0u8; ID_SET_BYTES];
        for idx in self.bits.iter_ones() {
            out[idx / 8] |= 1 << (idx % 8);
        }
        out
    }

    pub fn from_bytes(bytes: &[u8; ID_SET_BYTES]) -> Self {
        let mut set = Self::new();
        for (byte_idx, byte) in bytes.iter().enumerate() {
            for bit in 0..8 {
                if byte & (1 << bit) != 0 {
                    set.bits.set(byte_idx * 8 + bit, true);
                }
            }
        }
        set
    }
}

impl Default for IdSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for IdSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits.as_raw_slice() == other.bits.as_raw_slice()
    }
}

impl Eq for IdSet {}

impl fmt::Debug for IdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(DataTypeId::get)).finish()
    }
}

impl FromIterator<DataTypeId> for IdSet {
    fn from_iter<I: IntoIterator<Item = DataTypeId>>(iter: I) -> Self {
        let mut set = IdSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}
