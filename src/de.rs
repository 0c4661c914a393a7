//! Serde deserialization out of [`Tag`] trees.
//!
//! [`TagDeserializer`] drives any `T: Deserialize` from an owned [`Tag`]. The
//! crate-root functions [`from_reader`](crate::from_reader) and
//! [`from_slice`](crate::from_slice) decode a document first and deserialize
//! its root compound.
//!
//! Integer tags deserialize into any Rust integer type they fit in, so a
//! `u8` serialized as `Short` reads back as `u8`. `Byte` also deserializes as
//! `bool` (zero is `false`). Array tags deserialize as sequences; a
//! `ByteArray` is handed to byte-buffer visitors directly.
//!
//! ## Examples
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_nbt::{from_tag, nbt};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Pos {
//!     x: i32,
//!     y: u8,
//!     on_ground: bool,
//! }
//!
//! let tag = nbt!({ "x": 3, "y": 64i16, "on_ground": 1i8 });
//! let pos: Pos = from_tag(tag).unwrap();
//! assert_eq!(pos, Pos { x: 3, y: 64, on_ground: true });
//! ```

use crate::{Compound, Error, Result, Tag};
use serde::de::value::SeqDeserializer as ArrayDeserializer;
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};

/// Deserializes Rust values from an owned [`Tag`].
pub struct TagDeserializer {
    tag: Tag,
}

impl TagDeserializer {
    pub fn new(tag: Tag) -> Self {
        TagDeserializer { tag }
    }
}

fn visit_array<'de, V, I, T>(items: I, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
    I: Iterator<Item = T>,
    T: IntoDeserializer<'de, Error>,
{
    let mut seq = ArrayDeserializer::<I, Error>::new(items);
    let value = visitor.visit_seq(&mut seq)?;
    seq.end()?;
    Ok(value)
}

impl<'de> de::Deserializer<'de> for TagDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::End => visitor.visit_unit(),
            Tag::Byte(v) => visitor.visit_i8(v),
            Tag::Short(v) => visitor.visit_i16(v),
            Tag::Int(v) => visitor.visit_i32(v),
            Tag::Long(v) => visitor.visit_i64(v),
            Tag::Float(v) => visitor.visit_f32(v),
            Tag::Double(v) => visitor.visit_f64(v),
            Tag::ByteArray(bytes) => visitor.visit_byte_buf(bytes),
            Tag::String(s) => visitor.visit_string(s),
            Tag::List(list) => visitor.visit_seq(SeqDeserializer::new(list)),
            Tag::Compound(compound) => visitor.visit_map(MapDeserializer::new(compound)),
            Tag::IntArray(ints) => visit_array(ints.into_iter(), visitor),
            Tag::LongArray(longs) => visit_array(longs.into_iter(), visitor),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::Byte(v) => visitor.visit_bool(v != 0),
            other => TagDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::End => visitor.visit_none(),
            other => visitor.visit_some(TagDeserializer::new(other)),
        }
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::ByteArray(bytes) => visit_array(bytes.into_iter(), visitor),
            other => TagDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::Compound(compound) if compound.is_empty() => visitor.visit_unit(),
            other => TagDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::String(variant) => visitor.visit_enum(EnumDeserializer::new(variant, None)),
            Tag::Compound(compound) if compound.len() == 1 => {
                let (variant, value) = compound
                    .into_iter()
                    .next()
                    .ok_or_else(|| Error::custom("empty enum compound"))?;
                visitor.visit_enum(EnumDeserializer::new(variant, Some(value)))
            }
            other => Err(Error::type_mismatch(
                "TAG_String or single-entry TAG_Compound",
                other.type_id().name(),
            )),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit map struct identifier
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Tag>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Tag>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(tag) => seed.deserialize(TagDeserializer::new(tag)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Tag>,
    value: Option<Tag>,
}

impl MapDeserializer {
    fn new(compound: Compound) -> Self {
        MapDeserializer {
            iter: compound.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((name, value)) => {
                self.value = Some(value);
                seed.deserialize(name.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(TagDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Tag>,
}

impl EnumDeserializer {
    fn new(variant: String, value: Option<Tag>) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let value = self.value;
        seed.deserialize(self.variant.into_deserializer())
            .map(|variant| (variant, VariantDeserializer { value }))
    }
}

struct VariantDeserializer {
    value: Option<Tag>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None | Some(Tag::End) => Ok(()),
            Some(other) => Err(Error::type_mismatch("unit variant", other.type_id().name())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(TagDeserializer::new(value)),
            None => Err(Error::type_mismatch("newtype variant", "TAG_String")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Tag::List(list)) => visitor.visit_seq(SeqDeserializer::new(list)),
            Some(other) => Err(Error::type_mismatch("TAG_List", other.type_id().name())),
            None => Err(Error::type_mismatch("TAG_List", "TAG_String")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Tag::Compound(compound)) => visitor.visit_map(MapDeserializer::new(compound)),
            Some(other) => Err(Error::type_mismatch("TAG_Compound", other.type_id().name())),
            None => Err(Error::type_mismatch("TAG_Compound", "TAG_String")),
        }
    }
}

/// Deserializes a value out of a [`Tag`].
pub fn from_tag<T: de::DeserializeOwned>(tag: Tag) -> Result<T> {
    T::deserialize(TagDeserializer::new(tag))
}
