//! VarInt / VarLong: LEB128-style variable-length integers.
//!
//! Two call shapes exist for the same logical algorithm:
//!
//! - the buffer variant (`Encode`/`Decode`) reads/writes through a cursor
//!   already positioned inside a fully-sized packet buffer;
//! - the stream variant (`encode_stream`/`decode_stream`) reads/writes a
//!   byte at a time directly on the transport, because it's used exactly
//!   where the overall packet length isn't known yet: the outermost length
//!   prefix and the compression-envelope header (see [`crate::framing`]).

use std::io::{Read, Write};

use byteorder::WriteBytesExt;

use crate::error::ProtocolError;
use crate::{Decode, Encode};

/// A signed 32-bit integer encoded as a variable-length LEB128-style value,
/// 1 to 5 bytes wide.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, PartialOrd, Ord, Hash)]
pub struct VarInt(pub i32);

/// A signed 64-bit integer encoded as a variable-length LEB128-style value,
/// 1 to 10 bytes wide.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, PartialOrd, Ord, Hash)]
pub struct VarLong(pub i64);

impl VarInt {
    pub const MAX_BYTES: usize = 5;

    /// The number of bytes this value would occupy on the wire.
    pub fn decoded_len(value: i32) -> usize {
        varint_len(value as u32 as u64, Self::MAX_BYTES)
    }

    pub fn encode_stream(self, w: &mut impl Write) -> Result<(), ProtocolError> {
        encode_varnum(self.0 as u32 as u64, w)
    }

    pub fn decode_stream(r: &mut impl Read) -> Result<Self, ProtocolError> {
        decode_varnum(r, Self::MAX_BYTES).map(|v| Self(v as u32 as i32))
    }
}

impl VarLong {
    pub const MAX_BYTES: usize = 10;

    pub fn decoded_len(value: i64) -> usize {
        varint_len(value as u64, Self::MAX_BYTES)
    }

    pub fn encode_stream(self, w: &mut impl Write) -> Result<(), ProtocolError> {
        encode_varnum(self.0 as u64, w)
    }

    pub fn decode_stream(r: &mut impl Read) -> Result<Self, ProtocolError> {
        decode_varnum(r, Self::MAX_BYTES).map(|v| Self(v as i64))
    }
}

impl From<i32> for VarInt {
    fn from(v: i32) -> Self {
        Self(v)
    }
}
impl From<VarInt> for i32 {
    fn from(v: VarInt) -> Self {
        v.0
    }
}
impl From<i64> for VarLong {
    fn from(v: i64) -> Self {
        Self(v)
    }
}
impl From<VarLong> for i64 {
    fn from(v: VarLong) -> Self {
        v.0
    }
}

impl Encode for VarInt {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        encode_varnum(self.0 as u32 as u64, &mut w)?;
        Ok(())
    }

    fn encode_len(&self) -> usize {
        Self::decoded_len(self.0)
    }
}

impl<'a> Decode<'a> for VarInt {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        decode_varnum_slice(r, Self::MAX_BYTES).map(|v| Self(v as u32 as i32))
    }
}

impl Encode for VarLong {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        encode_varnum(self.0 as u64, &mut w)?;
        Ok(())
    }

    fn encode_len(&self) -> usize {
        Self::decoded_len(self.0)
    }
}

impl<'a> Decode<'a> for VarLong {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        decode_varnum_slice(r, Self::MAX_BYTES).map(|v| Self(v as i64))
    }
}

/// Pure function mapping a raw varint payload to its on-wire byte length.
/// Comparisons against powers of 128, critical for pre-sizing
/// compression-envelope headers before the bytes themselves are written.
fn varint_len(mut value: u64, max_bytes: usize) -> usize {
    let mut len = 1;
    loop {
        value >>= 7;
        if value == 0 {
            break;
        }
        len += 1;
    }
    len.min(max_bytes)
}

fn encode_varnum(mut value: u64, w: &mut impl Write) -> Result<(), ProtocolError> {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        w.write_u8(byte).map_err(ProtocolError::Io)?;
        if value == 0 {
            break;
        }
    }
    Ok(())
}

fn decode_varnum(r: &mut impl Read, max_bytes: usize) -> Result<u64, ProtocolError> {
    let mut value: u64 = 0;
    for i in 0..max_bytes {
        let byte = crate::stream::read_u8(r)?;
        value |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(ProtocolError::VarIntTooWide { max_bytes })
}

fn decode_varnum_slice(r: &mut &[u8], max_bytes: usize) -> anyhow::Result<u64> {
    let mut value: u64 = 0;
    for i in 0..max_bytes {
        if r.is_empty() {
            return Err(ProtocolError::VarIntIncomplete.into());
        }
        let byte = r[0];
        *r = &r[1..];
        value |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(ProtocolError::VarIntTooWide { max_bytes }.into())
}
