//! Fixed-width integers, floats, strings, and raw byte runs.
//!
//! Big-endian is the default wire representation for every primitive type
//! in this protocol; `byteorder` handles the width-specific conversions so
//! there are no byte-at-a-time loops in the hot path. Little-endian
//! variants exist only for interoperation and are named accordingly
//! ([`LittleEndian`]).

use std::io::Write;

use byteorder::{ReadBytesExt, WriteBytesExt, BE};

use crate::error::ProtocolError;
use crate::varint::VarLong;
use crate::{Decode, Encode};

macro_rules! impl_int {
    ($ty:ty, $write:ident, $read:ident, $len:expr) => {
        impl Encode for $ty {
            fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
                w.$write::<BE>(*self)?;
                Ok(())
            }

            fn encode_len(&self) -> usize {
                $len
            }
        }

        impl<'a> Decode<'a> for $ty {
            fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
                Ok(r.$read::<BE>()?)
            }
        }
    };
}

impl_int!(u16, write_u16, read_u16, 2);
impl_int!(i16, write_i16, read_i16, 2);
impl_int!(u32, write_u32, read_u32, 4);
impl_int!(i32, write_i32, read_i32, 4);
impl_int!(u64, write_u64, read_u64, 8);
impl_int!(i64, write_i64, read_i64, 8);
impl_int!(u128, write_u128, read_u128, 16);
impl_int!(i128, write_i128, read_i128, 16);

impl Encode for u8 {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        w.write_u8(*self)?;
        Ok(())
    }

    fn encode_len(&self) -> usize {
        1
    }
}

impl<'a> Decode<'a> for u8 {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(r.read_u8()?)
    }
}

impl Encode for i8 {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        w.write_i8(*self)?;
        Ok(())
    }

    fn encode_len(&self) -> usize {
        1
    }
}

impl<'a> Decode<'a> for i8 {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(r.read_i8()?)
    }
}

impl Encode for bool {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        w.write_u8(u8::from(*self))?;
        Ok(())
    }

    fn encode_len(&self) -> usize {
        1
    }
}

impl<'a> Decode<'a> for bool {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(r.read_u8()? != 0)
    }
}

/// Bitwise reinterpretation through the same-width unsigned integer, then
/// endian conversion. The original C source cast the float directly to an
/// integer (`(uint32_t) f`), which truncates the value instead of
/// reinterpreting its bits; `to_bits`/`from_bits` is the correct operation.
impl Encode for f32 {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        w.write_u32::<BE>(self.to_bits())?;
        Ok(())
    }

    fn encode_len(&self) -> usize {
        4
    }
}

impl<'a> Decode<'a> for f32 {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(f32::from_bits(r.read_u32::<BE>()?))
    }
}

impl Encode for f64 {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        w.write_u64::<BE>(self.to_bits())?;
        Ok(())
    }

    fn encode_len(&self) -> usize {
        8
    }
}

impl<'a> Decode<'a> for f64 {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(f64::from_bits(r.read_u64::<BE>()?))
    }
}

/// A little-endian wrapper for the handful of fields (none in the core
/// compound types, but available for generated packet bodies) that need
/// the non-default byte order.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct LittleEndian<T>(pub T);

macro_rules! impl_le {
    ($ty:ty, $write:ident, $read:ident, $len:expr) => {
        impl Encode for LittleEndian<$ty> {
            fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
                w.$write::<byteorder::LE>(self.0)?;
                Ok(())
            }

            fn encode_len(&self) -> usize {
                $len
            }
        }

        impl<'a> Decode<'a> for LittleEndian<$ty> {
            fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
                Ok(Self(r.$read::<byteorder::LE>()?))
            }
        }
    };
}

impl_le!(u16, write_u16, read_u16, 2);
impl_le!(i16, write_i16, read_i16, 2);
impl_le!(u32, write_u32, read_u32, 4);
impl_le!(i32, write_i32, read_i32, 4);
impl_le!(u64, write_u64, read_u64, 8);
impl_le!(i64, write_i64, read_i64, 8);

/// Maximum string length the decoder will accept, in bytes. Not part of the
/// wire format; a sanity bound so a corrupt length prefix can't trigger an
/// unbounded allocation.
pub const MAX_STRING_LEN: usize = 32_767 * 4;

/// Length-prefixed UTF-8 string. The prefix is a [`VarLong`] byte count per
/// the wire format this protocol uses; no terminator is written. Decoding
/// produces an owned, non-null-terminated `String` -- the original C
/// source's `length + 1`-byte allocation with a trailing NUL is a C-string
/// affordance with no equivalent need in Rust.
impl Encode for str {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        VarLong(self.len() as i64).encode(&mut w)?;
        w.write_all(self.as_bytes())?;
        Ok(())
    }

    fn encode_len(&self) -> usize {
        VarLong::decoded_len(self.len() as i64) + self.len()
    }
}

impl Encode for String {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.as_str().encode(w)
    }

    fn encode_len(&self) -> usize {
        self.as_str().encode_len()
    }
}

impl<'a> Decode<'a> for String {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let len = VarLong::decode(r)?.0;
        anyhow::ensure!(len >= 0, "negative string length {len}");
        let len = len as usize;
        anyhow::ensure!(
            len <= MAX_STRING_LEN,
            "string of {len} bytes exceeds the {MAX_STRING_LEN}-byte limit"
        );
        anyhow::ensure!(r.len() >= len, "string truncated: wanted {len} bytes, have {}", r.len());
        let (bytes, rest) = r.split_at(len);
        *r = rest;
        Ok(std::str::from_utf8(bytes).map_err(ProtocolError::Utf8)?.to_owned())
    }
}

/// An opaque run of bytes whose length is never self-describing on the
/// wire -- the caller (typically the framing layer, which already knows
/// the remaining packet length) supplies it out of band.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct RawBytes(pub Vec<u8>);

impl Encode for RawBytes {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        w.write_all(&self.0)?;
        Ok(())
    }

    fn encode_len(&self) -> usize {
        self.0.len()
    }
}

impl RawBytes {
    /// Reads exactly `len` bytes. Not a [`Decode`] impl since the length
    /// must come from the caller, not the wire.
    pub fn decode(r: &mut &[u8], len: usize) -> anyhow::Result<Self> {
        anyhow::ensure!(r.len() >= len, "raw byte run truncated: wanted {len}, have {}", r.len());
        let (bytes, rest) = r.split_at(len);
        let data = bytes.to_vec();
        *r = rest;
        Ok(Self(data))
    }
}
