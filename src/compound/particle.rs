//! Particle effect data. The body shape is driven entirely by the particle
//! id, decoded ahead of time by the caller (see [`crate::particle_type::ParticleType`]) --
//! unlike every other compound type here, decoding a [`Particle`] needs
//! that id as an out-of-band parameter rather than reading it from the
//! wire itself.

use std::io::Write;

use crate::compound::slot::Slot;
use crate::particle_type::ParticleType;
use crate::{Decode, Encode};

#[derive(Clone, PartialEq, Debug)]
pub enum Particle {
    Block { block_state: i32 },
    FallingDust { block_state: i32 },
    Dust { red: f32, green: f32, blue: f32, scale: f32 },
    Item { item: Option<Slot> },
    /// Every particle id outside the four shapes above carries no body.
    Other,
}

impl Encode for Particle {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        match self {
            Particle::Block { block_state } | Particle::FallingDust { block_state } => {
                crate::varint::VarInt(*block_state).encode(&mut w)?;
            }
            Particle::Dust { red, green, blue, scale } => {
                red.encode(&mut w)?;
                green.encode(&mut w)?;
                blue.encode(&mut w)?;
                scale.encode(&mut w)?;
            }
            Particle::Item { item } => {
                item.encode(&mut w)?;
            }
            Particle::Other => {}
        }
        Ok(())
    }
}

impl Particle {
    /// Decodes a particle body given its already-known type.
    pub fn decode<'a>(r: &mut &'a [u8], particle_type: ParticleType) -> anyhow::Result<Self> {
        Ok(match particle_type {
            ParticleType::Block => Particle::Block { block_state: crate::varint::VarInt::decode(r)?.0 },
            ParticleType::FallingDust => {
                Particle::FallingDust { block_state: crate::varint::VarInt::decode(r)?.0 }
            }
            ParticleType::Dust => Particle::Dust {
                red: f32::decode(r)?,
                green: f32::decode(r)?,
                blue: f32::decode(r)?,
                scale: f32::decode(r)?,
            },
            ParticleType::Item => Particle::Item { item: Option::<Slot>::decode(r)? },
            ParticleType::Other(_) => Particle::Other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(p: Particle, ty: ParticleType) {
        let mut buf = Vec::new();
        p.encode(&mut buf).unwrap();
        let mut r: &[u8] = &buf;
        assert_eq!(Particle::decode(&mut r, ty).unwrap(), p);
        assert!(r.is_empty());
    }

    #[test]
    fn block_round_trips() {
        round_trip(Particle::Block { block_state: 7 }, ParticleType::Block);
    }

    #[test]
    fn falling_dust_round_trips() {
        round_trip(Particle::FallingDust { block_state: 99 }, ParticleType::FallingDust);
    }

    #[test]
    fn dust_round_trips() {
        round_trip(
            Particle::Dust { red: 1.0, green: 0.5, blue: 0.0, scale: 2.0 },
            ParticleType::Dust,
        );
    }

    #[test]
    fn item_round_trips() {
        round_trip(Particle::Item { item: None }, ParticleType::Item);
    }

    #[test]
    fn other_particle_carries_no_bytes() {
        let mut buf = Vec::new();
        Particle::Other.encode(&mut buf).unwrap();
        assert!(buf.is_empty());
        let mut r: &[u8] = &buf;
        assert_eq!(Particle::decode(&mut r, ParticleType::Other(50)).unwrap(), Particle::Other);
    }
}
