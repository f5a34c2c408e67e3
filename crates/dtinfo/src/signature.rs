// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Aggregate data type signature.
//!
//! Two nodes that share a set of types must derive the same aggregate value
//! without exchanging the per-type signatures, so the fold runs over ids in
//! ascending order and the mixing step is a fixed CRC-64 extension.
//!
//! # Parameters (CRC-64/WE)
//!
//! | Parameter | Value |
//! |-----------|-------|
//! | Polynomial | 0x42F0E1EBA9EA3693 |
//! | Init | 0xFFFFFFFFFFFFFFFF |
//! | RefIn | false |
//! | RefOut | false |
//! | XorOut | 0xFFFFFFFFFFFFFFFF |
//!
//! # Example
//!
//! ```
//! use dtinfo::signature::extend;
//!
//! // Extending the empty fold yields the signature itself.
//! assert_eq!(extend(0, 0x0123_4567_89AB_CDEF), 0x0123_4567_89AB_CDEF);
//! ```

use crate::id_set::IdSet;
use crate::kind::DataTypeId;

/// CRC-64/WE polynomial.
const POLY: u64 = 0x42F0_E1EB_A9EA_3693;

const MASK: u64 = u64::MAX;

/// Precomputed lookup table for CRC-64/WE, built at compile time.
const CRC_TABLE: [u64; 256] = {
    let mut table = [0u64; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u64) << 56;
        let mut j = 0;
        while j < 8 {
            if crc & (1 << 63) != 0 {
                crc = (crc << 1) ^ POLY;
            } else {
                crc <<= 1;
            }
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
};

#[inline]
fn crc64_update(crc: u64, data: &[u8]) -> u64 {
    let mut crc = crc;
    for &byte in data {
        let index = ((crc >> 56) ^ u64::from(byte)) as usize;
        crc = (crc << 8) ^ CRC_TABLE[index];
    }
    crc
}

/// CRC-64/WE of `data`.
#[inline]
#[must_use]
pub fn crc64_we(data: &[u8]) -> u64 {
    crc64_update(MASK, data) ^ MASK
}

/// Resume a CRC from `value` and feed the 8 bytes of `x`, least significant first.
#[inline]
fn mixin64(value: u64, x: u64) -> u64 {
    crc64_update(value ^ MASK, &x.to_le_bytes()) ^ MASK
}

/// Fold `next` into `accumulator`.
///
/// A zero accumulator is the empty fold and yields `next` unchanged. This
/// keys on the value, not on a separate first-element flag, so a running fold
/// that is exactly zero (a leading zero signature) also passes `next` through.
/// That keeps `compute` equal to the left fold of `extend` from 0 for every
/// input, including zero signatures.
#[inline]
#[must_use]
pub fn extend(accumulator: u64, next: u64) -> u64 {
    if accumulator == 0 {
        return next;
    }
    mixin64(mixin64(accumulator, next), accumulator)
}

/// Fold the signatures of `ids` in ascending id order, starting from zero.
///
/// An empty set yields 0.
pub fn compute<F>(ids: &IdSet, signature_of: F) -> u64
where
    F: FnMut(DataTypeId) -> u64,
{
    let mut agg = SignatureAggregator::new();
    for sig in ids.iter().map(signature_of) {
        agg.push(sig);
    }
    agg.finish()
}

/// Incremental form of [`compute`]. Callers must push in ascending id order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureAggregator {
    value: u64,
    count: usize,
}

impl SignatureAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, signature: u64) {
        self.value = extend(self.value, signature);
        self.count += 1;
    }

    /// Number of signatures folded so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn finish(self) -> u64 {
        self.value
    }
}
