//! Packet dispatch: routing a decoded `(state, source, id)` triple to the
//! handler registered for it.
//!
//! The protocol has four connection states, each with its own packet id
//! space for each direction. A single global `match` on `(state, source,
//! id)` doesn't scale to how this crate's packet space is produced --
//! consumers register handlers per triple into a [`HandlerTable`] instead.

use std::collections::HashMap;
use std::fmt;

/// The connection's protocol state. The state, not just the packet id,
/// determines which packet body a given id decodes to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PacketState {
    Handshaking,
    Status,
    Login,
    Play,
}

/// Which side originated a packet, from the receiver's point of view.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PacketSource {
    /// Sent by the server, handled by the client.
    Server,
    /// Sent by the client, handled by the server.
    Client,
}

/// A registered callback for one `(state, source, id)` triple.
///
/// Receives the packet body -- the bytes following the id's `VarInt`, with
/// the length prefix and any compression envelope already stripped -- and
/// decodes/acts on it however the caller needs.
pub type Handler = Box<dyn Fn(&[u8]) -> anyhow::Result<()> + Send + Sync>;

/// The in-memory width for a packet id. The wire representation is always
/// a `VarInt`; across protocol revisions the id has been declared as
/// narrow as `uint8_t` and as wide as a plain `int`, so the canonical
/// in-memory type here is unsigned and wide enough for any observed id.
pub type PacketId = u32;

/// The default handler installed for any triple nobody has registered a
/// handler for. Logs at `trace` level and otherwise drops the packet.
pub fn blank_handler() -> Handler {
    Box::new(|body: &[u8]| {
        tracing::trace!(len = body.len(), "unhandled packet");
        Ok(())
    })
}

/// A 3-axis lookup table from `(state, source, packet id)` to [`Handler`].
///
/// Looking up an id with no registered handler is not itself an error --
/// [`HandlerTable::get`] returns `None`, and callers that want to ignore
/// unregistered packets instead of erroring can fall back to
/// [`blank_handler`].
#[derive(Default)]
pub struct HandlerTable {
    handlers: HashMap<(PacketState, PacketSource, PacketId), Handler>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    pub fn set(&mut self, state: PacketState, source: PacketSource, id: PacketId, handler: Handler) {
        self.handlers.insert((state, source, id), handler);
    }

    pub fn get(&self, state: PacketState, source: PacketSource, id: PacketId) -> Option<&Handler> {
        self.handlers.get(&(state, source, id))
    }

    pub fn remove(&mut self, state: PacketState, source: PacketSource, id: PacketId) -> Option<Handler> {
        self.handlers.remove(&(state, source, id))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Dispatches `body` to the handler registered for this triple, falling
    /// back to [`blank_handler`] if none is registered.
    pub fn dispatch(
        &self,
        state: PacketState,
        source: PacketSource,
        id: PacketId,
        body: &[u8],
    ) -> anyhow::Result<()> {
        tracing::debug!(id, ?state, ?source, len = body.len(), "dispatching packet");
        match self.get(state, source, id) {
            Some(handler) => handler(body),
            None => blank_handler()(body),
        }
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable").field("len", &self.handlers.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn unregistered_triple_falls_back_to_blank_handler() {
        let table = HandlerTable::new();
        assert!(table.dispatch(PacketState::Play, PacketSource::Server, 0x20, &[1, 2, 3]).is_ok());
    }

    #[test]
    fn registered_handler_is_invoked_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut table = HandlerTable::new();
        let counted = Arc::clone(&calls);
        table.set(
            PacketState::Play,
            PacketSource::Server,
            0x20,
            Box::new(move |_| {
                counted.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );
        table.dispatch(PacketState::Play, PacketSource::Server, 0x20, &[]).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn same_id_is_distinct_across_state_and_source_axes() {
        let mut table = HandlerTable::new();
        table.set(PacketState::Play, PacketSource::Server, 0x00, Box::new(|_| Ok(())));
        assert!(table.get(PacketState::Play, PacketSource::Server, 0x00).is_some());
        assert!(table.get(PacketState::Play, PacketSource::Client, 0x00).is_none());
        assert!(table.get(PacketState::Status, PacketSource::Server, 0x00).is_none());
    }

    #[test]
    fn remove_clears_a_single_triple() {
        let mut table = HandlerTable::new();
        table.set(PacketState::Login, PacketSource::Client, 0x00, Box::new(|_| Ok(())));
        assert_eq!(table.len(), 1);
        assert!(table.remove(PacketState::Login, PacketSource::Client, 0x00).is_some());
        assert!(table.is_empty());
    }

    #[test]
    fn handler_errors_propagate_through_dispatch() {
        let mut table = HandlerTable::new();
        table.set(
            PacketState::Play,
            PacketSource::Server,
            0x01,
            Box::new(|_| anyhow::bail!("malformed body")),
        );
        assert!(table.dispatch(PacketState::Play, PacketSource::Server, 0x01, &[]).is_err());
    }
}
