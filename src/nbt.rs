//! Stub NBT interface.
//!
//! Parsing the NBT tag grammar is out of scope for this crate (the original
//! reference implementation left it as an explicit `todo`, stubbing the
//! type as `void*`). What this crate does implement is the one thing the
//! compound codecs actually need: recognizing the `TAG_END` /
//! `TAG_COMPOUND` discriminator byte that precedes a [`crate::compound::Slot`]'s
//! optional item tag, so that a slot with no NBT data round-trips exactly
//! while a slot carrying a real compound surfaces a clear, typed error
//! instead of silently desynchronizing the buffer cursor.
//!
//! A caller that has already serialized a compound with an external NBT
//! library can still hand its bytes to the encoder: [`NbtCompound`] is an
//! opaque, pre-encoded byte blob on the way out. There is no matching way
//! to decode one back, because finding where the blob ends requires
//! walking the grammar this crate doesn't implement.

/// `TAG_End`, Minecraft's NBT tag type byte for "no further data".
pub const TAG_END: u8 = 0x00;

/// `TAG_Compound`, the tag type byte for a named sequence of nested tags.
pub const TAG_COMPOUND: u8 = 0x0A;

/// An opaque, already-encoded NBT compound payload (not including its own
/// leading `TAG_Compound` byte, which the caller embedding it writes).
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct NbtCompound(pub Vec<u8>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_constants_match_the_nbt_spec() {
        assert_eq!(TAG_END, 0);
        assert_eq!(TAG_COMPOUND, 10);
    }

    #[test]
    fn opaque_blob_is_just_bytes() {
        let blob = NbtCompound(vec![1, 2, 3]);
        assert_eq!(blob.0.len(), 3);
    }
}
