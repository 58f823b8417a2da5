//! Chat component: an arbitrary JSON document, sent as a length-prefixed
//! string. This crate does not model the chat component schema itself --
//! that's a large, frequently-changing tree of text formatting and click
//! events best left to a dedicated text-component crate -- it only
//! round-trips the JSON value.

use std::io::Write;

use crate::{Decode, Encode};

#[derive(Clone, PartialEq, Debug)]
pub struct Chat(pub serde_json::Value);

impl Encode for Chat {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.0.to_string().encode(w)
    }
}

impl<'a> Decode<'a> for Chat {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let raw = String::decode(r)?;
        Ok(Self(serde_json::from_str(&raw)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_plain_text_component() {
        let chat = Chat(serde_json::json!({ "text": "hello" }));
        let mut buf = Vec::new();
        chat.encode(&mut buf).unwrap();
        let mut r: &[u8] = &buf;
        assert_eq!(Chat::decode(&mut r).unwrap(), chat);
    }

    #[test]
    fn invalid_json_is_rejected() {
        let mut buf = Vec::new();
        "not json".to_string().encode(&mut buf).unwrap();
        let mut r: &[u8] = &buf;
        assert!(Chat::decode(&mut r).is_err());
    }
}
