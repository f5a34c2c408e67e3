// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte cursors and encode/decode traits for provider payloads.
//!
//! All multi-byte fields are little-endian and byte-aligned.

use crate::id_set::{IdSet, ID_SET_BYTES};
use crate::kind::MAX_NAME_LEN;
use thiserror::Error;

/// Payload encoding/decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Output buffer cannot hold the encoded value
    #[error("buffer too small")]
    BufferTooSmall,
    /// Input ended before the value was complete
    #[error("unexpected end of payload at {offset}")]
    UnexpectedEof { offset: usize },
    /// Name field longer than the wire limit
    #[error("name too long: {0} bytes (max {MAX_NAME_LEN})")]
    NameTooLong(usize),
    /// Name field is not valid UTF-8
    #[error("name is not valid UTF-8")]
    InvalidUtf8,
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Encode into a caller-provided buffer.
pub trait WireEncode {
    /// Write the value at the start of `buf`, returning the bytes written.
    fn encode(&self, buf: &mut [u8]) -> CodecResult<usize>;

    /// Upper bound on the encoded size.
    fn max_encoded_size(&self) -> usize;

    fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let mut buf = vec![0u8; self.max_encoded_size()];
        let len = self.encode(&mut buf)?;
        buf.truncate(len);
        Ok(buf)
    }
}

/// Decode from the start of a payload.
pub trait WireDecode: Sized {
    /// Returns the value and the number of bytes consumed.
    fn decode(src: &[u8]) -> CodecResult<(Self, usize)>;
}

macro_rules! impl_write_le {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) -> CodecResult<()> {
            self.put(&value.to_le_bytes())
        }
    };
}

macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> CodecResult<$type> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.take($size)?);
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Write cursor over a fixed buffer.
pub struct CursorMut<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> CursorMut<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn put(&mut self, bytes: &[u8]) -> CodecResult<()> {
        let end = self.offset + bytes.len();
        if end > self.buffer.len() {
            return Err(CodecError::BufferTooSmall);
        }
        self.buffer[self.offset..end].copy_from_slice(bytes);
        self.offset = end;
        Ok(())
    }

    impl_write_le!(write_u8, u8);
    impl_write_le!(write_u16, u16);
    impl_write_le!(write_u64, u64);

    /// Length-prefixed name (u8 length, then UTF-8 bytes).
    pub fn write_name(&mut self, name: &str) -> CodecResult<()> {
        if name.len() > MAX_NAME_LEN {
            return Err(CodecError::NameTooLong(name.len()));
        }
        self.write_u8(name.len() as u8)?;
        self.put(name.as_bytes())
    }

    pub fn write_id_set(&mut self, set: &IdSet) -> CodecResult<()> {
        self.put(&set.to_bytes())
    }
}

/// Read cursor over a payload.
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn take(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        let end = self.offset + len;
        if end > self.buffer.len() {
            return Err(CodecError::UnexpectedEof {
                offset: self.offset,
            });
        }
        let slice = &self.buffer[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_u16, u16, 2);
    impl_read_le!(read_u64, u64, 8);

    pub fn read_name(&mut self) -> CodecResult<String> {
        let len = self.read_u8()? as usize;
        if len > MAX_NAME_LEN {
            return Err(CodecError::NameTooLong(len));
        }
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| CodecError::InvalidUtf8)
    }

    pub fn read_id_set(&mut self) -> CodecResult<IdSet> {
        let mut bytes = [0u8; ID_SET_BYTES];
        bytes.copy_from_slice(self.take(ID_SET_BYTES)?);
        Ok(IdSet::from_bytes(&bytes))
    }
}
