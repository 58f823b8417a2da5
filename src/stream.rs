//! The stream layer: read-exactly / write-exactly over a byte transport.
//!
//! The codec above this layer never talks to sockets directly; it only
//! needs the two primitives here. Both retry internally on short
//! reads/writes (this is exactly what `std::io::Read::read_exact` and
//! `std::io::Write::write_all` already guarantee) and only surface a hard
//! transport failure to the caller. No ownership of the transport is
//! claimed -- callers pass `&mut impl Read` / `&mut impl Write` for the
//! lifetime of a single call.

use std::io::{Read, Write};

use crate::error::ProtocolError;

/// Reads exactly `dst.len()` bytes from `src`, retrying on short reads.
pub fn read_exact(src: &mut impl Read, dst: &mut [u8]) -> Result<(), ProtocolError> {
    src.read_exact(dst).map_err(ProtocolError::Io)
}

/// Writes all of `src` to `dst`, retrying on short writes.
pub fn write_exact(dst: &mut impl Write, src: &[u8]) -> Result<(), ProtocolError> {
    dst.write_all(src).map_err(ProtocolError::Io)
}

/// Reads a single byte from `src`.
///
/// Used by the stream-variant VarInt decoder, which must read one byte at a
/// time because the overall packet length isn't known yet.
pub fn read_u8(src: &mut impl Read) -> Result<u8, ProtocolError> {
    let mut byte = [0u8; 1];
    read_exact(src, &mut byte)?;
    Ok(byte[0])
}
