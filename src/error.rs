//! Crate-wide error type.
//!
//! Codec functions for individual types (`Encode`/`Decode` impls) return
//! `anyhow::Result`, matching the teacher crate's own convention of using
//! `anyhow` for ad hoc propagation inside a single encode/decode call tree.
//! [`ProtocolError`] is the structured error surfaced at the public
//! boundaries -- the stream layer, the framing layer, and the dispatch
//! table -- where a caller needs to distinguish *kinds* of failure well
//! enough to decide whether to drop the connection.

#[derive(thiserror::Error, Debug)]
pub enum ProtocolError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("varint exceeded maximum width of {max_bytes} bytes")]
    VarIntTooWide { max_bytes: usize },

    #[error("varint truncated: stream ended before a terminating byte")]
    VarIntIncomplete,

    #[error("zlib decompression failed: {0}")]
    Decompress(String),

    #[error("zlib compression failed: {0}")]
    Compress(String),

    #[error("packet of {len} bytes exceeds the maximum of {max} bytes")]
    PacketTooLarge { len: usize, max: usize },

    #[error("invalid utf-8 in string field: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("nbt compound present but this crate does not parse nbt")]
    NbtUnsupported,

    #[error("buffer overrun: cursor {index} + {n} exceeds size {size}")]
    BufferOverrun {
        index: usize,
        n: usize,
        size: usize,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;
