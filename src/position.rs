//! `Position`: a 64-bit bit-packed world coordinate (26/12/26 bits,
//! x/y/z, each two's-complement signed within its own width).

use std::io::Write;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{Decode, Encode};

const X_BITS: u32 = 26;
const Y_BITS: u32 = 12;
const Z_BITS: u32 = 26;

const X_MASK: u64 = (1 << X_BITS) - 1;
const Y_MASK: u64 = (1 << Y_BITS) - 1;
const Z_MASK: u64 = (1 << Z_BITS) - 1;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    fn pack(self) -> u64 {
        ((self.x as u64 & X_MASK) << (Y_BITS + Z_BITS))
            | ((self.z as u64 & Z_MASK) << Y_BITS)
            | (self.y as u64 & Y_MASK)
    }

    fn unpack(packed: u64) -> Self {
        let x = sign_extend(packed >> (Y_BITS + Z_BITS), X_BITS);
        let z = sign_extend((packed >> Y_BITS) & Z_MASK, Z_BITS);
        let y = sign_extend(packed & Y_MASK, Y_BITS);
        Self { x, y, z }
    }
}

fn sign_extend(value: u64, bits: u32) -> i32 {
    let sign_bit = 1u64 << (bits - 1);
    let value = value & ((1u64 << bits) - 1);
    if value & sign_bit != 0 {
        (value as i64 - (1i64 << bits)) as i32
    } else {
        value as i32
    }
}

impl Encode for Position {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        w.write_u64::<BigEndian>(self.pack())?;
        Ok(())
    }

    fn encode_len(&self) -> usize {
        8
    }
}

impl<'a> Decode<'a> for Position {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let packed = r.read_u64::<BigEndian>()?;
        Ok(Self::unpack(packed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(p: Position) {
        let mut buf = Vec::new();
        p.encode(&mut buf).unwrap();
        let mut r: &[u8] = &buf;
        assert_eq!(Position::decode(&mut r).unwrap(), p);
    }

    #[test]
    fn zero_round_trips() {
        round_trip(Position::new(0, 0, 0));
    }

    #[test]
    fn negative_round_trips() {
        round_trip(Position::new(-1, -1, -1));
    }

    #[test]
    fn extremes_round_trip() {
        round_trip(Position::new(-33_554_432, -2048, -33_554_432));
        round_trip(Position::new(33_554_431, 2047, 33_554_431));
    }

    #[test]
    fn fields_sign_extend_independently() {
        round_trip(Position::new(-33_554_432, 2047, 100));
        round_trip(Position::new(100, -2048, -33_554_432));
        round_trip(Position::new(33_554_431, 0, -1));
    }

    proptest::proptest! {
        #[test]
        fn arbitrary_in_range_round_trips(
            x in -33_554_432i32..33_554_432i32,
            y in -2048i32..2048i32,
            z in -33_554_432i32..33_554_432i32,
        ) {
            round_trip(Position::new(x, y, z));
        }
    }
}
