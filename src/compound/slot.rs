//! Container slot: an optional item stack, with an optional NBT tag
//! attached when present.

use std::io::Write;

use byteorder::WriteBytesExt;

use crate::error::ProtocolError;
use crate::nbt::{NbtCompound, TAG_COMPOUND, TAG_END};
use crate::varint::VarInt;
use crate::{Decode, Encode};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Slot {
    pub item_id: i32,
    pub item_count: i8,
    pub nbt: Option<NbtCompound>,
}

impl Encode for Option<Slot> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        match self {
            None => {
                w.write_u8(0)?;
            }
            Some(slot) => {
                w.write_u8(1)?;
                VarInt(slot.item_id).encode(&mut w)?;
                w.write_i8(slot.item_count)?;
                match &slot.nbt {
                    Some(nbt) => {
                        w.write_u8(TAG_COMPOUND)?;
                        w.write_all(&nbt.0)?;
                    }
                    None => {
                        w.write_u8(TAG_END)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl<'a> Decode<'a> for Option<Slot> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let present = bool::decode(r)?;
        if !present {
            return Ok(None);
        }
        let item_id = VarInt::decode(r)?.0;
        let item_count = i8::decode(r)?;
        let tag = u8::decode(r)?;
        let nbt = match tag {
            TAG_END => None,
            TAG_COMPOUND => return Err(ProtocolError::NbtUnsupported.into()),
            other => anyhow::bail!("slot nbt tag byte {other:#x} is neither TAG_END nor TAG_COMPOUND"),
        };
        Ok(Some(Slot { item_id, item_count, nbt }))
    }
}
