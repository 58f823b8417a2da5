//! `PacketBuffer`: a fixed-size, cursor-addressed byte region used to stage
//! a single packet's bytes between the stream layer and the codec layers.
//!
//! The original buffered-stream type stored the bound transport inline as
//! a field and exposed `read`/`write` as raw `memcpy`s with no bounds
//! checking ("buffer overflow is possible", "segmentation fault is
//! possible", by its own documentation). Neither translates safely: a
//! stored transport would have to be an owned trait object for no benefit,
//! and unchecked copies have no place outside `unsafe` Rust. This version
//! takes the transport as an explicit parameter to [`PacketBuffer::init`]
//! and [`PacketBuffer::flush`] and bounds-checks every `read`/`write`,
//! returning [`ProtocolError::BufferOverrun`] instead of corrupting memory.

use std::io::{Read, Write};

use bytes::BytesMut;

use crate::error::ProtocolError;

/// A cursor-addressed byte region of a fixed `size`, used to stage one
/// packet's worth of bytes.
#[derive(Clone, Debug, Default)]
pub struct PacketBuffer {
    data: BytesMut,
    index: usize,
}

impl PacketBuffer {
    /// Allocates a zero-filled buffer of exactly `size` bytes, cursor at 0.
    pub fn allocate(size: usize) -> Self {
        let mut data = BytesMut::with_capacity(size);
        data.resize(size, 0);
        Self { data, index: 0 }
    }

    /// Adopts an already-populated byte vector as the buffer's contents,
    /// cursor reset to 0.
    pub fn set(&mut self, data: Vec<u8>) {
        self.data = BytesMut::from(&data[..]);
        self.index = 0;
    }

    /// Wraps an already-populated byte vector in a new buffer.
    pub fn bind(data: Vec<u8>) -> Self {
        Self { data: BytesMut::from(&data[..]), index: 0 }
    }

    /// Resets the cursor to the start without touching the contents.
    pub fn rewind(&mut self) {
        self.index = 0;
    }

    /// Fills the entire buffer by reading `self.size()` bytes from `src`,
    /// resetting the cursor to 0.
    pub fn init(&mut self, src: &mut impl Read) -> Result<(), ProtocolError> {
        src.read_exact(&mut self.data).map_err(ProtocolError::Io)?;
        self.index = 0;
        Ok(())
    }

    /// Writes the entire buffer's contents to `dst`. Does not touch the
    /// cursor.
    pub fn flush(&self, dst: &mut impl Write) -> Result<(), ProtocolError> {
        dst.write_all(&self.data).map_err(ProtocolError::Io)
    }

    /// Releases the buffer's storage. Present for symmetry with
    /// [`PacketBuffer::allocate`]; dropping the value does the same thing.
    pub fn free(self) {
        drop(self);
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Copies `src` into the buffer at the cursor, advancing it by
    /// `src.len()`.
    pub fn write(&mut self, src: &[u8]) -> Result<(), ProtocolError> {
        let end = self.index.checked_add(src.len()).ok_or(ProtocolError::BufferOverrun {
            index: self.index,
            n: src.len(),
            size: self.data.len(),
        })?;
        if end > self.data.len() {
            return Err(ProtocolError::BufferOverrun { index: self.index, n: src.len(), size: self.data.len() });
        }
        self.data[self.index..end].copy_from_slice(src);
        self.index = end;
        Ok(())
    }

    /// Returns a slice of `count` bytes starting at the cursor, advancing
    /// it by `count`.
    pub fn read(&mut self, count: usize) -> Result<&[u8], ProtocolError> {
        let end = self.index.checked_add(count).ok_or(ProtocolError::BufferOverrun {
            index: self.index,
            n: count,
            size: self.data.len(),
        })?;
        if end > self.data.len() {
            return Err(ProtocolError::BufferOverrun { index: self.index, n: count, size: self.data.len() });
        }
        let slice = &self.data[self.index..end];
        self.index = end;
        Ok(slice)
    }

    /// The unread remainder of the buffer, from the cursor to the end.
    pub fn current(&self) -> &[u8] {
        &self.data[self.index..]
    }

    /// Advances the cursor by `count` bytes without copying, for skipping
    /// fields the caller doesn't need.
    pub fn increment(&mut self, count: usize) -> Result<(), ProtocolError> {
        let end = self.index.checked_add(count).ok_or(ProtocolError::BufferOverrun {
            index: self.index,
            n: count,
            size: self.data.len(),
        })?;
        if end > self.data.len() {
            return Err(ProtocolError::BufferOverrun { index: self.index, n: count, size: self.data.len() });
        }
        self.index = end;
        Ok(())
    }
}

impl Write for PacketBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        PacketBuffer::write(self, buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::WriteZero, e))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
