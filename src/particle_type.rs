//! Stub particle type enumeration.
//!
//! The real protocol has on the order of sixty particle types, almost all
//! of which carry no extra data beyond their id. Enumerating them fully is
//! generated-data busywork out of scope for this crate; what [`Particle`]
//! (see [`crate::compound::particle`]) actually branches on is which of four
//! *shapes* of body a given id carries, so that's what's represented here.

/// Which of the four particle data shapes a particle id carries.
///
/// `Other` covers every particle id with no additional fields -- the
/// overwhelming majority of the real enumeration.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ParticleType {
    Block,
    FallingDust,
    Dust,
    Item,
    Other(i32),
}

impl ParticleType {
    /// Maps a particle id to its data shape, per the protocol version this
    /// crate targets.
    pub fn from_id(id: i32) -> Self {
        match id {
            3 => Self::Block,
            14 => Self::Dust,
            23 => Self::FallingDust,
            35 => Self::Item,
            other => Self::Other(other),
        }
    }

    pub fn id(self) -> i32 {
        match self {
            Self::Block => 3,
            Self::Dust => 14,
            Self::FallingDust => 23,
            Self::Item => 35,
            Self::Other(id) => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_known_ids() {
        for id in [3, 14, 23, 35] {
            assert_eq!(ParticleType::from_id(id).id(), id);
        }
    }

    #[test]
    fn unknown_id_is_preserved_verbatim() {
        assert_eq!(ParticleType::from_id(99).id(), 99);
    }
}
