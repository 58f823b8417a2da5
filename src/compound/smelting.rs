//! Smelting recipe: a named group of ingredient slots, one of which is
//! consumed to produce `result`.

use std::io::Write;

use crate::compound::slot::Slot;
use crate::varint::VarInt;
use crate::{Decode, Encode};

#[derive(Clone, PartialEq, Debug, Default)]
pub struct Smelting {
    pub group: String,
    pub ingredients: Vec<Option<Slot>>,
    pub result: Option<Slot>,
    pub experience: f32,
    pub cook_time: i32,
}

impl Encode for Smelting {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.group.encode(&mut w)?;
        VarInt(self.ingredients.len() as i32).encode(&mut w)?;
        for ingredient in &self.ingredients {
            ingredient.encode(&mut w)?;
        }
        self.result.encode(&mut w)?;
        self.experience.encode(&mut w)?;
        VarInt(self.cook_time).encode(&mut w)?;
        Ok(())
    }
}

impl<'a> Decode<'a> for Smelting {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let group = String::decode(r)?;
        let count = VarInt::decode(r)?.0;
        anyhow::ensure!(count >= 0, "negative ingredient count {count}");
        let mut ingredients = Vec::with_capacity(count as usize);
        for _ in 0..count {
            ingredients.push(Option::<Slot>::decode(r)?);
        }
        let result = Option::<Slot>::decode(r)?;
        let experience = f32::decode(r)?;
        let cook_time = VarInt::decode(r)?.0;
        Ok(Self { group, ingredients, result, experience, cook_time })
    }
}
