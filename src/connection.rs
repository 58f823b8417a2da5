//! Connection-level context: the handful of facts about a single client
//! connection that the framing layer needs on every packet, plus the
//! builder used to assemble it.
//!
//! Grounded in the original context struct, which bundled the server
//! address, the client's identity, the buffer, the protocol state/source,
//! and the compression threshold into one value passed to every packet
//! handler. The buffer is not carried here -- it's scoped to a single
//! receive/send call in this crate (see [`crate::framing`]) rather than
//! living for the connection's lifetime.

use uuid::Uuid;

use crate::dispatch::{PacketSource, PacketState};
use crate::CompressionThreshold;

/// The remote server's address, as the client knows it before DNS
/// resolution or socket connection happens.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ServerAddr {
    pub host: String,
    pub port: u16,
}

impl ServerAddr {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }
}

/// The identity this client presents to the server.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ClientProfile {
    pub username: String,
    /// Known only once login succeeds; absent before then.
    pub uuid: Option<Uuid>,
}

impl ClientProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into(), uuid: None }
    }
}

/// Builder for a [`ConnectionContext`].
#[derive(Clone, Debug, Default)]
pub struct ConnectionConfig {
    server_host: String,
    server_port: u16,
    username: String,
    compression_threshold: CompressionThreshold,
}

impl ConnectionConfig {
    pub fn new(server_host: impl Into<String>, server_port: u16, username: impl Into<String>) -> Self {
        Self {
            server_host: server_host.into(),
            server_port,
            username: username.into(),
            compression_threshold: CompressionThreshold::DISABLED,
        }
    }

    pub fn compression_threshold(mut self, threshold: impl Into<CompressionThreshold>) -> Self {
        self.compression_threshold = threshold.into();
        self
    }

    pub fn build(self) -> ConnectionContext {
        ConnectionContext {
            server: ServerAddr::new(self.server_host, self.server_port),
            client: ClientProfile::new(self.username),
            state: PacketState::Handshaking,
            source: PacketSource::Server,
            compression_threshold: self.compression_threshold,
        }
    }
}

/// Everything the framing layer needs to know about a connection besides
/// the transport itself.
#[derive(Clone, Debug)]
pub struct ConnectionContext {
    pub server: ServerAddr,
    pub client: ClientProfile,
    /// Every connection starts in [`PacketState::Handshaking`] and only
    /// ever moves forward; [`crate::framing`] never transitions it back.
    pub state: PacketState,
    /// Which side this context decodes packets *from*. A client-side
    /// context receiving packets always reads as [`PacketSource::Server`].
    pub source: PacketSource,
    pub compression_threshold: CompressionThreshold,
}

impl ConnectionContext {
    pub fn set_state(&mut self, state: PacketState) {
        tracing::debug!(?state, "connection state transition");
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_starts_handshaking_with_compression_disabled() {
        let ctx = ConnectionConfig::new("play.example.com", 25565, "Notch").build();
        assert_eq!(ctx.state, PacketState::Handshaking);
        assert!(!ctx.compression_threshold.is_enabled());
        assert_eq!(ctx.client.username, "Notch");
        assert_eq!(ctx.server.port, 25565);
        assert!(ctx.client.uuid.is_none());
    }

    #[test]
    fn builder_can_enable_compression() {
        let ctx = ConnectionConfig::new("localhost", 25565, "Notch")
            .compression_threshold(256)
            .build();
        assert!(ctx.compression_threshold.is_enabled());
        assert_eq!(ctx.compression_threshold.0, 256);
    }

    #[test]
    fn set_state_transitions_forward() {
        let mut ctx = ConnectionConfig::new("localhost", 25565, "Notch").build();
        ctx.set_state(PacketState::Login);
        assert_eq!(ctx.state, PacketState::Login);
    }
}
