//! Codec and framing library for the Minecraft: Java Edition network protocol
//! (wire-compatible with protocol revisions around 1.16.x).
//!
//! This crate covers the client-side core: turning a bidirectional byte
//! transport into a sequence of typed, dispatched packets and back. It does
//! not generate per-packet bodies or handlers, parse NBT, enumerate particle
//! types, or implement encryption -- those are treated as external
//! collaborators (see [`nbt`] and [`particle_type`] for the stub interfaces
//! this crate assumes).

mod buffer;
pub mod compound;
pub mod connection;
pub mod dispatch;
pub mod error;
pub mod framing;
pub mod nbt;
pub mod particle_type;
mod position;
pub mod primitive;
mod stream;
mod uuid_codec;
pub mod varint;

pub use buffer::PacketBuffer;
pub use connection::{ClientProfile, ConnectionConfig, ConnectionContext, ServerAddr};
pub use dispatch::{blank_handler, Handler, HandlerTable, PacketSource, PacketState};
pub use error::ProtocolError;
pub use position::Position;
pub use varint::{VarInt, VarLong};

use std::io::Write;

/// The maximum number of bytes in a single framed Minecraft packet.
pub const MAX_PACKET_SIZE: i32 = 2097152;

/// The Minecraft protocol version this crate targets.
pub const PROTOCOL_VERSION: i32 = 735;

/// The stringified name of the Minecraft version this crate targets.
pub const MINECRAFT_VERSION: &str = "1.16.5";

/// How large an encoded packet must be before the encoder compresses it.
///
/// A non-positive value disables compression entirely. A positive value is
/// the minimum *uncompressed* payload size (id + body) that triggers
/// compression; smaller payloads are still wrapped in the compression
/// envelope but sent raw (see [`framing`]).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CompressionThreshold(pub i32);

impl CompressionThreshold {
    /// No compression.
    pub const DISABLED: Self = Self(-1);

    pub fn is_enabled(self) -> bool {
        self.0 > 0
    }
}

impl Default for CompressionThreshold {
    fn default() -> Self {
        Self::DISABLED
    }
}

impl From<i32> for CompressionThreshold {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Types that can be written to the wire.
///
/// Implementations encode only the value's own bytes; the caller is
/// responsible for any surrounding length prefix or packet id.
pub trait Encode {
    fn encode(&self, w: impl Write) -> anyhow::Result<()>;

    /// Number of bytes [`Encode::encode`] would write for this value.
    fn encode_len(&self) -> usize {
        let mut buf = Vec::new();
        // Fallback for types that don't override this; used only by
        // compound types where an exact closed-form length isn't worth
        // maintaining separately from the encoder.
        self.encode(&mut buf).expect("encode into a Vec is infallible");
        buf.len()
    }
}

/// Types that can be read back from the wire.
///
/// Implementations are expected to consume exactly the bytes that the
/// matching [`Encode`] impl would have written, shrinking the slice from the
/// front as they read.
pub trait Decode<'a>: Sized {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self>;
}

/// A Minecraft protocol packet.
///
/// On the wire a packet is a [`VarInt`] id followed by the packet body. The
/// [`Encode`]/[`Decode`] impls on `Self` only ever cover the body.
pub trait Packet: std::fmt::Debug {
    const ID: dispatch::PacketId;
    const NAME: &'static str;
    const SIDE: PacketSide;
    const STATE: dispatch::PacketState;

    fn encode_with_id(&self, mut w: impl Write) -> anyhow::Result<()>
    where
        Self: Encode,
    {
        VarInt(Self::ID as i32).encode(&mut w)?;
        self.encode(w)
    }
}

/// The side a packet is intended for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PacketSide {
    /// Server -> client.
    Clientbound,
    /// Client -> server.
    Serverbound,
}
