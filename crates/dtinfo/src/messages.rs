// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Request and response payloads of the two provider services.
//!
//! Wire layouts (little-endian, byte-aligned):
//!
//! ```text
//! TypeInfoRequest              u16 id | u8 kind | u8 name_len | name
//! TypeInfoResponse             u64 signature | u16 id | u8 kind | u8 mask | u8 name_len | name
//! AggregateSignatureRequest    u8 kind | 128 bytes known_ids
//! AggregateSignatureResponse   u64 aggregate_signature | 128 bytes mutually_known_ids
//! ```

use crate::codec::{CodecResult, Cursor, CursorMut, WireDecode, WireEncode};
use crate::id_set::{IdSet, ID_SET_BYTES};
use crate::kind::{DataTypeKind, KindTag, MAX_NAME_LEN};
use crate::usage::TypeUsageMask;

/// Service id of the type info query.
pub const GET_DATA_TYPE_INFO_ID: u16 = 2;
pub const GET_DATA_TYPE_INFO_NAME: &str = "uavcan.protocol.GetDataTypeInfo";

/// Service id of the aggregate signature query.
pub const COMPUTE_AGGREGATE_TYPE_SIGNATURE_ID: u16 = 3;
pub const COMPUTE_AGGREGATE_TYPE_SIGNATURE_NAME: &str =
    "uavcan.protocol.ComputeAggregateTypeSignature";

/// "Do you know this type, and what are you doing with it?"
///
/// A non-empty `name` is the only lookup key; `id` and `kind` are then
/// ignored for lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeInfoRequest {
    pub id: u16,
    pub kind: KindTag,
    pub name: String,
}

impl TypeInfoRequest {
    pub fn by_id(kind: impl Into<KindTag>, id: u16) -> Self {
        Self {
            id,
            kind: kind.into(),
            name: String::new(),
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeInfoResponse {
    pub signature: u64,
    pub id: u16,
    pub kind: KindTag,
    pub mask: TypeUsageMask,
    pub name: String,
}

impl TypeInfoResponse {
    pub fn is_known(&self) -> bool {
        self.mask.contains(TypeUsageMask::KNOWN)
    }
}

/// Caller's locally known ids of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSignatureRequest {
    pub kind: KindTag,
    pub known_ids: IdSet,
}

impl AggregateSignatureRequest {
    pub fn new(kind: impl Into<KindTag>, known_ids: IdSet) -> Self {
        Self {
            kind: kind.into(),
            known_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregateSignatureResponse {
    pub aggregate_signature: u64,
    pub mutually_known_ids: IdSet,
}

const TYPE_INFO_REQUEST_FIXED: usize = 2 + 1 + 1;
const TYPE_INFO_RESPONSE_FIXED: usize = 8 + 2 + 1 + 1 + 1;
const AGGREGATE_REQUEST_SIZE: usize = 1 + ID_SET_BYTES;
const AGGREGATE_RESPONSE_SIZE: usize = 8 + ID_SET_BYTES;

impl WireEncode for TypeInfoRequest {
    fn encode(&self, buf: &mut [u8]) -> CodecResult<usize> {
        let mut w = CursorMut::new(buf);
        w.write_u16(self.id)?;
        w.write_u8(self.kind.0)?;
        w.write_name(&self.name)?;
        Ok(w.offset())
    }

    fn max_encoded_size(&self) -> usize {
        TYPE_INFO_REQUEST_FIXED + MAX_NAME_LEN
    }
}

impl WireDecode for TypeInfoRequest {
    fn decode(src: &[u8]) -> CodecResult<(Self, usize)> {
        let mut r = Cursor::new(src);
        let id = r.read_u16()?;
        let kind = KindTag(r.read_u8()?);
        let name = r.read_name()?;
        Ok((Self { id, kind, name }, r.offset()))
    }
}

impl WireEncode for TypeInfoResponse {
    fn encode(&self, buf: &mut [u8]) -> CodecResult<usize> {
        let mut w = CursorMut::new(buf);
        w.write_u64(self.signature)?;
        w.write_u16(self.id)?;
        w.write_u8(self.kind.0)?;
        w.write_u8(self.mask.bits())?;
        w.write_name(&self.name)?;
        Ok(w.offset())
    }

    fn max_encoded_size(&self) -> usize {
        TYPE_INFO_RESPONSE_FIXED + MAX_NAME_LEN
    }
}

impl WireDecode for TypeInfoResponse {
    fn decode(src: &[u8]) -> CodecResult<(Self, usize)> {
        let mut r = Cursor::new(src);
        let signature = r.read_u64()?;
        let id = r.read_u16()?;
        let kind = KindTag(r.read_u8()?);
        let mask = TypeUsageMask::from_bits_retain(r.read_u8()?);
        let name = r.read_name()?;
        Ok((
            Self {
                signature,
                id,
                kind,
                mask,
                name,
            },
            r.offset(),
        ))
    }
}

impl WireEncode for AggregateSignatureRequest {
    fn encode(&self, buf: &mut [u8]) -> CodecResult<usize> {
        let mut w = CursorMut::new(buf);
        w.write_u8(self.kind.0)?;
        w.write_id_set(&self.known_ids)?;
        Ok(w.offset())
    }

    fn max_encoded_size(&self) -> usize {
        AGGREGATE_REQUEST_SIZE
    }
}

impl WireDecode for AggregateSignatureRequest {
    fn decode(src: &[u8]) -> CodecResult<(Self, usize)> {
        let mut r = Cursor::new(src);
        let kind = KindTag(r.read_u8()?);
        let known_ids = r.read_id_set()?;
        Ok((Self { kind, known_ids }, r.offset()))
    }
}

impl WireEncode for AggregateSignatureResponse {
    fn encode(&self, buf: &mut [u8]) -> CodecResult<usize> {
        let mut w = CursorMut::new(buf);
        w.write_u64(self.aggregate_signature)?;
        w.write_id_set(&self.mutually_known_ids)?;
        Ok(w.offset())
    }

    fn max_encoded_size(&self) -> usize {
        AGGREGATE_RESPONSE_SIZE
    }
}

impl WireDecode for AggregateSignatureResponse {
    fn decode(src: &[u8]) -> CodecResult<(Self, usize)> {
        let mut r = Cursor::new(src);
        let aggregate_signature = r.read_u64()?;
        let mutually_known_ids = r.read_id_set()?;
        Ok((
            Self {
                aggregate_signature,
                mutually_known_ids,
            },
            r.offset(),
        ))
    }
}

impl From<DataTypeKind> for AggregateSignatureRequest {
    /// Request claiming every id of `kind` as known.
    fn from(kind: DataTypeKind) -> Self {
        Self::new(kind, IdSet::full())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;
    use crate::kind::DataTypeId;

    #[test]
    fn type_info_request_layout() {
        let req = TypeInfoRequest {
            id: 0x0226,
            kind: KindTag(1),
            name: "a.B".to_string(),
        };
        let bytes = req.to_bytes().unwrap();
        assert_eq!(bytes, vec![0x26, 0x02, 1, 3, b'a', b'.', b'B']);

        let (decoded, used) = TypeInfoRequest::decode(&bytes).unwrap();
        assert_eq!(used, bytes.len());
        assert_eq!(decoded, req);
    }

    #[test]
    fn type_info_response_layout() {
        let resp = TypeInfoResponse {
            signature: 0x0102_0304_0506_0708,
            id: 550,
            kind: KindTag(1),
            mask: TypeUsageMask::KNOWN | TypeUsageMask::SERVING,
            name: String::new(),
        };
        let bytes = resp.to_bytes().unwrap();
        assert_eq!(bytes.len(), TYPE_INFO_RESPONSE_FIXED);
        assert_eq!(&bytes[..8], &[8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(bytes[11], 0b1001);

        let (decoded, _) = TypeInfoResponse::decode(&bytes).unwrap();
        assert_eq!(decoded, resp);
        assert!(decoded.is_known());
    }

    #[test]
    fn malformed_kind_survives_the_wire() {
        let req = AggregateSignatureRequest::new(KindTag(0xFF), IdSet::full());
        let bytes = req.to_bytes().unwrap();
        assert_eq!(bytes.len(), AGGREGATE_REQUEST_SIZE);
        assert_eq!(bytes[0], 0xFF);
        assert!(bytes[1..].iter().all(|b| *b == 0xFF));

        let (decoded, _) = AggregateSignatureRequest::decode(&bytes).unwrap();
        assert!(decoded.kind.is_malformed());
        assert_eq!(decoded.known_ids.len(), 1024);
    }

    #[test]
    fn aggregate_response_layout() {
        let mut ids = IdSet::new();
        ids.insert(DataTypeId::new(8).unwrap());
        let resp = AggregateSignatureResponse {
            aggregate_signature: 42,
            mutually_known_ids: ids,
        };
        let bytes = resp.to_bytes().unwrap();
        assert_eq!(bytes.len(), AGGREGATE_RESPONSE_SIZE);
        assert_eq!(bytes[8 + 1], 0b0000_0001);

        let (decoded, _) = AggregateSignatureResponse::decode(&bytes).unwrap();
        assert_eq!(decoded, resp);
    }

    #[test]
    fn truncated_payloads_fail() {
        assert!(matches!(
            TypeInfoRequest::decode(&[1]),
            Err(CodecError::UnexpectedEof { .. })
        ));
        assert!(matches!(
            AggregateSignatureRequest::decode(&[1, 0, 0]),
            Err(CodecError::UnexpectedEof { offset: 1 })
        ));
    }

    #[test]
    fn encode_into_short_buffer_fails() {
        let req = TypeInfoRequest::by_name("uavcan.protocol.NodeStatus");
        let mut buf = [0u8; 8];
        assert_eq!(req.encode(&mut buf), Err(CodecError::BufferTooSmall));
    }
}
