//! Entity equipment: a list of (slot, item) pairs, terminated on the wire
//! not by a count but by the absence of a continuation bit on the last
//! slot byte.
//!
//! The reference implementation's decoder was left commented out; the
//! logic below is the direct mirror of its own encoder, which is the only
//! sound way to derive it -- the encoder sets the high bit of every slot
//! byte except the last, so the decoder's stopping condition is exactly
//! "the slot byte just read had the high bit clear".

use std::io::Write;

use byteorder::WriteBytesExt;

use crate::compound::slot::Slot;
use crate::{Decode, Encode};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Boots,
    Leggings,
    Chestplate,
    Helmet,
}

impl EquipmentSlot {
    fn to_raw(self) -> u8 {
        match self {
            Self::MainHand => 0,
            Self::OffHand => 1,
            Self::Boots => 2,
            Self::Leggings => 3,
            Self::Chestplate => 4,
            Self::Helmet => 5,
        }
    }

    fn from_raw(raw: u8) -> anyhow::Result<Self> {
        Ok(match raw {
            0 => Self::MainHand,
            1 => Self::OffHand,
            2 => Self::Boots,
            3 => Self::Leggings,
            4 => Self::Chestplate,
            5 => Self::Helmet,
            other => anyhow::bail!("unknown equipment slot {other}"),
        })
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct EquippedItem {
    pub slot: EquipmentSlot,
    pub item: Option<Slot>,
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct EntityEquipment {
    pub equipments: Vec<EquippedItem>,
}

impl Encode for EntityEquipment {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        anyhow::ensure!(!self.equipments.is_empty(), "entity equipment must carry at least one slot");
        let (last, rest) = self.equipments.split_last().unwrap();
        for equipped in rest {
            w.write_u8(0x80 | equipped.slot.to_raw())?;
            equipped.item.encode(&mut w)?;
        }
        w.write_u8(last.slot.to_raw())?;
        last.item.encode(&mut w)?;
        Ok(())
    }
}

impl<'a> Decode<'a> for EntityEquipment {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let mut equipments = Vec::new();
        loop {
            let raw = u8::decode(r)?;
            let slot = EquipmentSlot::from_raw(raw & 0x7F)?;
            let item = Option::<Slot>::decode(r)?;
            let has_more = raw & 0x80 != 0;
            equipments.push(EquippedItem { slot, item });
            if !has_more {
                break;
            }
        }
        Ok(Self { equipments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_slot_round_trips() {
        let eq = EntityEquipment {
            equipments: vec![EquippedItem { slot: EquipmentSlot::MainHand, item: None }],
        };
        let mut buf = Vec::new();
        eq.encode(&mut buf).unwrap();
        assert_eq!(buf, vec![0x00, 0x00]); // slot 0, no continuation; empty slot
        let mut r: &[u8] = &buf;
        assert_eq!(EntityEquipment::decode(&mut r).unwrap(), eq);
    }

    #[test]
    fn multiple_slots_round_trip_with_continuation_bits() {
        let eq = EntityEquipment {
            equipments: vec![
                EquippedItem { slot: EquipmentSlot::MainHand, item: None },
                EquippedItem { slot: EquipmentSlot::Helmet, item: Some(Slot { item_id: 7, item_count: 1, nbt: None }) },
            ],
        };
        let mut buf = Vec::new();
        eq.encode(&mut buf).unwrap();
        assert_eq!(buf[0], 0x80); // first slot has continuation bit set
        assert_eq!(buf[2], 0x05); // last slot (helmet=5) has no continuation bit
        let mut r: &[u8] = &buf;
        assert_eq!(EntityEquipment::decode(&mut r).unwrap(), eq);
    }

    #[test]
    fn empty_list_is_rejected_on_encode() {
        let eq = EntityEquipment::default();
        let mut buf = Vec::new();
        assert!(eq.encode(&mut buf).is_err());
    }
}
