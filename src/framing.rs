//! Packet framing: the length-prefixed, optionally zlib-compressed envelope
//! that wraps every packet on the wire, and the receive/send algorithms
//! that produce and consume it.
//!
//! Grounded directly in the original receive/send implementations. Two bugs
//! in that reference are fixed here rather than reproduced, both noted
//! where the equivalent code would have had them:
//! - the send path's compression buffer was sized with `sizeof(char*)`
//!   instead of `sizeof(char)`, over-allocating by a pointer-width factor;
//!   not applicable once compression is implemented against `Vec<u8>`.
//! - neither `compress()`'s nor `uncompress()`'s zlib status code was
//!   checked, so truncated or corrupt compressed data could silently
//!   produce a short buffer instead of an error; here both paths verify the
//!   decompressed length matches what the envelope claims.

use std::io::{Read, Write};

use crate::connection::ConnectionContext;
use crate::dispatch::HandlerTable;
use crate::error::ProtocolError;
use crate::varint::VarInt;
use crate::{CompressionThreshold, Decode, MAX_PACKET_SIZE};

/// Reads one framed packet from `src` and returns its payload: the packet
/// id's `VarInt` followed by the packet body, with the length prefix and
/// any compression envelope already stripped.
pub fn receive_packet(
    src: &mut impl Read,
    threshold: CompressionThreshold,
) -> Result<Vec<u8>, ProtocolError> {
    let length = VarInt::decode_stream(src)?.0;
    if length < 0 {
        return Err(ProtocolError::Decompress(format!("negative packet length {length}")));
    }
    let length = length as usize;
    check_packet_size(length)?;

    let payload = if threshold.is_enabled() {
        let uncompressed_size = VarInt::decode_stream(src)?.0;
        if uncompressed_size < 0 {
            return Err(ProtocolError::Decompress(format!(
                "negative uncompressed size {uncompressed_size}"
            )));
        }
        let uncompressed_size = uncompressed_size as usize;
        let compressed_size = length
            .checked_sub(VarInt::decoded_len(uncompressed_size as i32))
            .ok_or_else(|| ProtocolError::Decompress("envelope length shorter than its own header".into()))?;

        if uncompressed_size == 0 {
            let mut raw = vec![0u8; compressed_size];
            src.read_exact(&mut raw).map_err(ProtocolError::Io)?;
            raw
        } else {
            check_packet_size(uncompressed_size)?;
            let mut compressed = vec![0u8; compressed_size];
            src.read_exact(&mut compressed).map_err(ProtocolError::Io)?;
            let decompressed = decompress(&compressed, uncompressed_size)?;
            tracing::trace!(compressed_size, uncompressed_size, "decompressed packet");
            decompressed
        }
    } else {
        let mut raw = vec![0u8; length];
        src.read_exact(&mut raw).map_err(ProtocolError::Io)?;
        raw
    };

    Ok(payload)
}

/// Writes `payload` (the packet id's `VarInt` followed by its body) to
/// `dst` as one framed packet, compressing it first if `threshold` is
/// enabled and the payload is large enough to warrant it.
pub fn send_packet(
    dst: &mut impl Write,
    payload: &[u8],
    threshold: CompressionThreshold,
) -> Result<(), ProtocolError> {
    check_packet_size(payload.len())?;

    if threshold.is_enabled() {
        if payload.len() as i32 > threshold.0 {
            let compressed = compress(payload)?;
            let uncompressed_len_prefix_size = VarInt::decoded_len(payload.len() as i32);
            VarInt((compressed.len() + uncompressed_len_prefix_size) as i32).encode_stream(dst)?;
            VarInt(payload.len() as i32).encode_stream(dst)?;
            dst.write_all(&compressed).map_err(ProtocolError::Io)?;
            tracing::trace!(
                uncompressed = payload.len(),
                compressed = compressed.len(),
                "compressed packet"
            );
        } else {
            VarInt((payload.len() + VarInt::decoded_len(0)) as i32).encode_stream(dst)?;
            VarInt(0).encode_stream(dst)?;
            dst.write_all(payload).map_err(ProtocolError::Io)?;
        }
    } else {
        VarInt(payload.len() as i32).encode_stream(dst)?;
        dst.write_all(payload).map_err(ProtocolError::Io)?;
    }

    Ok(())
}

/// Receives one packet and dispatches it through `table`, using `ctx` for
/// the protocol state/source axes and its compression threshold.
pub fn receive_and_dispatch(
    src: &mut impl Read,
    ctx: &ConnectionContext,
    table: &HandlerTable,
) -> Result<(), ProtocolError> {
    let payload = receive_packet(src, ctx.compression_threshold)?;
    let mut body: &[u8] = &payload;
    let id = VarInt::decode(&mut body).map_err(ProtocolError::Other)?.0 as u32;
    table
        .dispatch(ctx.state, ctx.source, id, body)
        .map_err(ProtocolError::Other)
}

fn check_packet_size(len: usize) -> Result<(), ProtocolError> {
    if len > MAX_PACKET_SIZE as usize {
        return Err(ProtocolError::PacketTooLarge { len, max: MAX_PACKET_SIZE as usize });
    }
    Ok(())
}

#[cfg(feature = "compression")]
fn compress(data: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    use std::io::Write as _;

    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(|e| ProtocolError::Compress(e.to_string()))?;
    encoder.finish().map_err(|e| ProtocolError::Compress(e.to_string()))
}

#[cfg(feature = "compression")]
fn decompress(data: &[u8], expected_len: usize) -> Result<Vec<u8>, ProtocolError> {
    use flate2::read::ZlibDecoder;

    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::with_capacity(expected_len);
    decoder.read_to_end(&mut out).map_err(|e| ProtocolError::Decompress(e.to_string()))?;
    if out.len() != expected_len {
        return Err(ProtocolError::Decompress(format!(
            "decompressed to {} bytes, envelope claimed {expected_len}",
            out.len()
        )));
    }
    Ok(out)
}

#[cfg(not(feature = "compression"))]
fn compress(_data: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    Err(ProtocolError::Compress("compression support not built into this crate".into()))
}

#[cfg(not(feature = "compression"))]
fn decompress(_data: &[u8], _expected_len: usize) -> Result<Vec<u8>, ProtocolError> {
    Err(ProtocolError::Decompress("compression support not built into this crate".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncompressed_empty_body_id_zero() {
        let payload = [0x00u8];
        let mut out = Vec::new();
        send_packet(&mut out, &payload, CompressionThreshold::DISABLED).unwrap();
        assert_eq!(out, vec![0x01, 0x00]);

        let mut r: &[u8] = &out;
        let received = receive_packet(&mut r, CompressionThreshold::DISABLED).unwrap();
        assert_eq!(received, payload);
    }

    #[test]
    fn uncompressed_send_matches_literal_bytes() {
        let payload = [0x05u8, b'h', b'i'];
        let mut out = Vec::new();
        send_packet(&mut out, &payload, CompressionThreshold::DISABLED).unwrap();
        assert_eq!(out, vec![0x03, 0x05, b'h', b'i']);
    }

    #[test]
    fn compression_enabled_below_threshold_is_sent_raw_with_zero_marker() {
        let mut payload = vec![0x01u8];
        payload.extend(std::iter::repeat(0x00u8).take(9));
        let mut out = Vec::new();
        send_packet(&mut out, &payload, CompressionThreshold(64)).unwrap();
        assert_eq!(
            out,
            vec![0x0B, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );

        let mut r: &[u8] = &out;
        let received = receive_packet(&mut r, CompressionThreshold(64)).unwrap();
        assert_eq!(received, payload);
    }

    #[test]
    fn compression_enabled_above_threshold_produces_a_valid_zlib_stream() {
        let mut payload = vec![0x01u8];
        payload.extend(std::iter::repeat(0x41u8).take(9));
        let mut out = Vec::new();
        send_packet(&mut out, &payload, CompressionThreshold(4)).unwrap();

        let mut cursor: &[u8] = &out;
        let outer_len = VarInt::decode_stream(&mut cursor).unwrap().0 as usize;
        assert_eq!(outer_len, cursor.len());
        let uncompressed_len = VarInt::decode_stream(&mut cursor).unwrap().0 as usize;
        assert_eq!(uncompressed_len, 10);
        assert_eq!(outer_len, VarInt::decoded_len(10) + cursor.len());

        let decompressed = decompress(cursor, uncompressed_len).unwrap();
        assert_eq!(decompressed, payload);

        let mut r: &[u8] = &out;
        let received = receive_packet(&mut r, CompressionThreshold(4)).unwrap();
        assert_eq!(received, payload);
    }

    #[test]
    fn dispatch_invokes_the_registered_handler_exactly_once_for_login_state() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        use crate::connection::ConnectionConfig;
        use crate::dispatch::{HandlerTable, PacketSource, PacketState};

        let payload = [0x02u8, 0xAA, 0xBB];
        let mut wire = Vec::new();
        send_packet(&mut wire, &payload, CompressionThreshold::DISABLED).unwrap();

        let mut ctx = ConnectionConfig::new("localhost", 25565, "Notch").build();
        assert_eq!(ctx.state, PacketState::Handshaking);
        ctx.set_state(PacketState::Login);

        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let mut table = HandlerTable::new();
        table.set(
            PacketState::Login,
            PacketSource::Server,
            0x02,
            Box::new(move |body| {
                assert_eq!(body, &[0xAA, 0xBB]);
                counted.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );

        let mut r: &[u8] = &wire;
        receive_and_dispatch(&mut r, &ctx, &table).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn packet_length_prefix_wider_than_five_bytes_is_rejected() {
        let wire = [0xFFu8, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F];
        let mut r: &[u8] = &wire;
        assert!(receive_packet(&mut r, CompressionThreshold::DISABLED).is_err());
    }

    #[test]
    fn uncompressed_round_trip() {
        let payload = vec![0x10, 1, 2, 3, 4, 5];
        let mut wire = Vec::new();
        send_packet(&mut wire, &payload, CompressionThreshold::DISABLED).unwrap();
        let mut r: &[u8] = &wire;
        let received = receive_packet(&mut r, CompressionThreshold::DISABLED).unwrap();
        assert_eq!(received, payload);
    }

    #[test]
    fn below_threshold_packet_is_sent_uncompressed_with_zero_marker() {
        let payload = vec![0x01, 0xAA];
        let mut wire = Vec::new();
        send_packet(&mut wire, &payload, CompressionThreshold(256)).unwrap();
        // VarInt(len) VarInt(0) <payload>
        assert_eq!(wire[0] as usize, payload.len() + 1);
        assert_eq!(wire[1], 0x00);
        assert_eq!(&wire[2..], &payload[..]);

        let mut r: &[u8] = &wire;
        let received = receive_packet(&mut r, CompressionThreshold(256)).unwrap();
        assert_eq!(received, payload);
    }

    #[test]
    fn above_threshold_packet_round_trips_through_compression() {
        let payload: Vec<u8> = (0..512).map(|i| (i % 4) as u8).collect();
        let mut wire = Vec::new();
        send_packet(&mut wire, &payload, CompressionThreshold(64)).unwrap();
        assert!(wire.len() < payload.len(), "repetitive payload should compress smaller");

        let mut r: &[u8] = &wire;
        let received = receive_packet(&mut r, CompressionThreshold(64)).unwrap();
        assert_eq!(received, payload);
    }

    #[test]
    fn oversized_packet_is_rejected_on_send() {
        let huge = vec![0u8; MAX_PACKET_SIZE as usize + 1];
        let mut out = Vec::new();
        assert!(send_packet(&mut out, &huge, CompressionThreshold::DISABLED).is_err());
    }

    #[test]
    fn corrupted_compressed_body_is_an_error_not_a_short_read() {
        let payload: Vec<u8> = (0..512).map(|i| (i % 4) as u8).collect();
        let mut wire = Vec::new();
        send_packet(&mut wire, &payload, CompressionThreshold(64)).unwrap();
        let last = wire.len() - 1;
        wire[last] ^= 0xFF;
        let mut r: &[u8] = &wire;
        assert!(receive_packet(&mut r, CompressionThreshold(64)).is_err());
    }

    #[test]
    fn truncated_stream_is_an_error() {
        let wire = [0x05u8, 1, 2]; // claims 5 bytes follow, only 2 present
        let mut r: &[u8] = &wire;
        assert!(receive_packet(&mut r, CompressionThreshold::DISABLED).is_err());
    }

    #[test]
    fn receive_and_dispatch_routes_to_the_registered_handler() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        use crate::connection::ConnectionConfig;
        use crate::dispatch::{HandlerTable, PacketSource, PacketState};

        let payload = [0x20u8, 1, 2, 3];
        let mut wire = Vec::new();
        send_packet(&mut wire, &payload, CompressionThreshold::DISABLED).unwrap();

        let mut ctx = ConnectionConfig::new("localhost", 25565, "Notch").build();
        ctx.set_state(PacketState::Play);

        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);
        let mut table = HandlerTable::new();
        table.set(
            PacketState::Play,
            PacketSource::Server,
            0x20,
            Box::new(move |body| {
                assert_eq!(body, &[1, 2, 3]);
                flag.store(true, Ordering::SeqCst);
                Ok(())
            }),
        );

        let mut r: &[u8] = &wire;
        receive_and_dispatch(&mut r, &ctx, &table).unwrap();
        assert!(called.load(Ordering::SeqCst));
    }
}
