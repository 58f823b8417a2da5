//! UUID codec: two big-endian u64s, most-significant half first.

use std::io::Write;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use uuid::Uuid;

use crate::{Decode, Encode};

impl Encode for Uuid {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        let (msb, lsb) = uuid_halves(*self);
        w.write_u64::<BigEndian>(msb)?;
        w.write_u64::<BigEndian>(lsb)?;
        Ok(())
    }

    fn encode_len(&self) -> usize {
        16
    }
}

impl<'a> Decode<'a> for Uuid {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let msb = r.read_u64::<BigEndian>()?;
        let lsb = r.read_u64::<BigEndian>()?;
        Ok(uuid_from_halves(msb, lsb))
    }
}

fn uuid_halves(uuid: Uuid) -> (u64, u64) {
    let bytes = uuid.as_bytes();
    let msb = u64::from_be_bytes(bytes[0..8].try_into().unwrap());
    let lsb = u64::from_be_bytes(bytes[8..16].try_into().unwrap());
    (msb, lsb)
}

fn uuid_from_halves(msb: u64, lsb: u64) -> Uuid {
    let mut bytes = [0u8; 16];
    bytes[0..8].copy_from_slice(&msb.to_be_bytes());
    bytes[8..16].copy_from_slice(&lsb.to_be_bytes());
    Uuid::from_bytes(bytes)
}
