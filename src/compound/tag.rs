//! A named tag grouping a set of registry entry ids (block tags, item
//! tags, and so on).

use std::io::Write;

use crate::varint::VarInt;
use crate::{Decode, Encode};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Tag {
    pub name: String,
    pub entries: Vec<i32>,
}

impl Encode for Tag {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.name.encode(&mut w)?;
        VarInt(self.entries.len() as i32).encode(&mut w)?;
        for entry in &self.entries {
            VarInt(*entry).encode(&mut w)?;
        }
        Ok(())
    }
}

impl<'a> Decode<'a> for Tag {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let name = String::decode(r)?;
        let count = VarInt::decode(r)?.0;
        anyhow::ensure!(count >= 0, "negative tag entry count {count}");
        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            entries.push(VarInt::decode(r)?.0);
        }
        Ok(Self { name, entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_with_entries() {
        let tag = Tag { name: "minecraft:planks".to_string(), entries: vec![1, 2, 3, 4] };
        let mut buf = Vec::new();
        tag.encode(&mut buf).unwrap();
        let mut r: &[u8] = &buf;
        assert_eq!(Tag::decode(&mut r).unwrap(), tag);
    }

    #[test]
    fn empty_tag_round_trips() {
        let tag = Tag { name: "minecraft:empty".to_string(), entries: vec![] };
        let mut buf = Vec::new();
        tag.encode(&mut buf).unwrap();
        let mut r: &[u8] = &buf;
        assert_eq!(Tag::decode(&mut r).unwrap(), tag);
    }
}
