//! Entity metadata: a heterogeneous, self-describing list of (index, type,
//! value) entries terminated by an index byte of `0xFF`.
//!
//! Both directions were left as commented-out sketches in the reference
//! implementation rather than wired up. The sketch is complete enough to
//! build from directly: each entry's type tag selects one of eighteen wire
//! shapes, encoded here as [`MetadataValue`]. Tag ids follow the protocol
//! revision this crate targets.

use std::io::Write;

use byteorder::WriteBytesExt;
use uuid::Uuid;

use crate::compound::particle::Particle;
use crate::compound::slot::Slot;
use crate::compound::text::Chat;
use crate::error::ProtocolError;
use crate::particle_type::ParticleType;
use crate::position::Position;
use crate::varint::VarInt;
use crate::{Decode, Encode};

const TAG_BYTE: i32 = 0;
const TAG_VARINT: i32 = 1;
const TAG_FLOAT: i32 = 2;
const TAG_STRING: i32 = 3;
const TAG_CHAT: i32 = 4;
const TAG_OPT_CHAT: i32 = 5;
const TAG_SLOT: i32 = 6;
const TAG_BOOLEAN: i32 = 7;
const TAG_ROTATION: i32 = 8;
const TAG_POSITION: i32 = 9;
const TAG_OPT_POSITION: i32 = 10;
const TAG_DIRECTION: i32 = 11;
const TAG_OPT_UUID: i32 = 12;
const TAG_BLOCK_ID: i32 = 13;
const TAG_NBT: i32 = 14;
const TAG_PARTICLE: i32 = 15;
const TAG_VILLAGER_DATA: i32 = 16;
const TAG_OPT_VARINT: i32 = 17;
const TAG_POSE: i32 = 18;

/// The terminator index; no real entry may use it.
const TERMINATOR: u8 = 0xFF;

#[derive(Clone, PartialEq, Debug)]
pub enum MetadataValue {
    Byte(u8),
    Boolean(bool),
    VarInt(i32),
    Direction(i32),
    BlockId(i32),
    Pose(i32),
    Float(f32),
    String(String),
    Chat(Chat),
    OptChat(Option<Chat>),
    Slot(Option<Slot>),
    Rotation([f32; 3]),
    Position(Position),
    OptPosition(Option<Position>),
    OptUuid(Option<Uuid>),
    Nbt(crate::nbt::NbtCompound),
    Particle { particle_type: i32, body: Particle },
    VillagerData([i32; 3]),
    OptVarInt(Option<i32>),
}

impl MetadataValue {
    fn tag(&self) -> i32 {
        match self {
            Self::Byte(_) => TAG_BYTE,
            Self::Boolean(_) => TAG_BOOLEAN,
            Self::VarInt(_) => TAG_VARINT,
            Self::Direction(_) => TAG_DIRECTION,
            Self::BlockId(_) => TAG_BLOCK_ID,
            Self::Pose(_) => TAG_POSE,
            Self::Float(_) => TAG_FLOAT,
            Self::String(_) => TAG_STRING,
            Self::Chat(_) => TAG_CHAT,
            Self::OptChat(_) => TAG_OPT_CHAT,
            Self::Slot(_) => TAG_SLOT,
            Self::Rotation(_) => TAG_ROTATION,
            Self::Position(_) => TAG_POSITION,
            Self::OptPosition(_) => TAG_OPT_POSITION,
            Self::OptUuid(_) => TAG_OPT_UUID,
            Self::Nbt(_) => TAG_NBT,
            Self::Particle { .. } => TAG_PARTICLE,
            Self::VillagerData(_) => TAG_VILLAGER_DATA,
            Self::OptVarInt(_) => TAG_OPT_VARINT,
        }
    }

    fn encode_body(&self, mut w: impl Write) -> anyhow::Result<()> {
        match self {
            Self::Byte(v) => v.encode(&mut w)?,
            Self::Boolean(v) => v.encode(&mut w)?,
            Self::VarInt(v) | Self::Direction(v) | Self::BlockId(v) | Self::Pose(v) => {
                VarInt(*v).encode(&mut w)?
            }
            Self::Float(v) => v.encode(&mut w)?,
            Self::String(v) => v.encode(&mut w)?,
            Self::Chat(v) => v.encode(&mut w)?,
            Self::OptChat(v) => match v {
                None => w.write_u8(0)?,
                Some(chat) => {
                    w.write_u8(1)?;
                    chat.encode(&mut w)?;
                }
            },
            Self::Slot(v) => v.encode(&mut w)?,
            Self::Rotation(v) => {
                for axis in v {
                    axis.encode(&mut w)?;
                }
            }
            Self::Position(v) => v.encode(&mut w)?,
            Self::OptPosition(v) => match v {
                None => w.write_u8(0)?,
                Some(pos) => {
                    w.write_u8(1)?;
                    pos.encode(&mut w)?;
                }
            },
            Self::OptUuid(v) => match v {
                None => w.write_u8(0)?,
                Some(uuid) => {
                    w.write_u8(1)?;
                    uuid.encode(&mut w)?;
                }
            },
            Self::Nbt(v) => w.write_all(&v.0)?,
            Self::Particle { particle_type, body } => {
                VarInt(*particle_type).encode(&mut w)?;
                body.encode(&mut w)?;
            }
            Self::VillagerData(v) => {
                for field in v {
                    VarInt(*field).encode(&mut w)?;
                }
            }
            Self::OptVarInt(v) => match v {
                None => w.write_u8(0)?,
                Some(value) => {
                    w.write_u8(1)?;
                    VarInt(*value).encode(&mut w)?;
                }
            },
        }
        Ok(())
    }

    fn decode_body(tag: i32, r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(match tag {
            TAG_BYTE => Self::Byte(u8::decode(r)?),
            TAG_BOOLEAN => Self::Boolean(bool::decode(r)?),
            TAG_VARINT => Self::VarInt(VarInt::decode(r)?.0),
            TAG_DIRECTION => Self::Direction(VarInt::decode(r)?.0),
            TAG_BLOCK_ID => Self::BlockId(VarInt::decode(r)?.0),
            TAG_POSE => Self::Pose(VarInt::decode(r)?.0),
            TAG_FLOAT => Self::Float(f32::decode(r)?),
            TAG_STRING => Self::String(String::decode(r)?),
            TAG_CHAT => Self::Chat(Chat::decode(r)?),
            TAG_OPT_CHAT => {
                Self::OptChat(if bool::decode(r)? { Some(Chat::decode(r)?) } else { None })
            }
            TAG_SLOT => Self::Slot(Option::<Slot>::decode(r)?),
            TAG_ROTATION => Self::Rotation([f32::decode(r)?, f32::decode(r)?, f32::decode(r)?]),
            TAG_POSITION => Self::Position(Position::decode(r)?),
            TAG_OPT_POSITION => {
                Self::OptPosition(if bool::decode(r)? { Some(Position::decode(r)?) } else { None })
            }
            TAG_OPT_UUID => Self::OptUuid(if bool::decode(r)? { Some(Uuid::decode(r)?) } else { None }),
            TAG_NBT => return Err(ProtocolError::NbtUnsupported.into()),
            TAG_PARTICLE => {
                let particle_type = VarInt::decode(r)?.0;
                let body = Particle::decode(r, ParticleType::from_id(particle_type))?;
                Self::Particle { particle_type, body }
            }
            TAG_VILLAGER_DATA => Self::VillagerData([
                VarInt::decode(r)?.0,
                VarInt::decode(r)?.0,
                VarInt::decode(r)?.0,
            ]),
            TAG_OPT_VARINT => {
                Self::OptVarInt(if bool::decode(r)? { Some(VarInt::decode(r)?.0) } else { None })
            }
            other => anyhow::bail!("unknown entity metadata tag {other}"),
        })
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct MetadataEntry {
    pub index: u8,
    pub value: MetadataValue,
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct EntityMetadata {
    pub entries: Vec<MetadataEntry>,
}

impl Encode for EntityMetadata {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        for entry in &self.entries {
            anyhow::ensure!(entry.index != TERMINATOR, "metadata index {TERMINATOR:#x} is reserved as the terminator");
            w.write_u8(entry.index)?;
            VarInt(entry.value.tag()).encode(&mut w)?;
            entry.value.encode_body(&mut w)?;
        }
        w.write_u8(TERMINATOR)?;
        Ok(())
    }
}

impl<'a> Decode<'a> for EntityMetadata {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let mut entries = Vec::new();
        loop {
            let index = u8::decode(r)?;
            if index == TERMINATOR {
                break;
            }
            let tag = VarInt::decode(r)?.0;
            let value = MetadataValue::decode_body(tag, r)?;
            entries.push(MetadataEntry { index, value });
        }
        Ok(Self { entries })
    }
}
