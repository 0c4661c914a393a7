//! Serde serialization into [`Tag`] trees.
//!
//! [`TagSerializer`] turns any `T: Serialize` into a [`Tag`]. The crate-root
//! functions [`to_writer`](crate::to_writer) and [`to_vec`](crate::to_vec)
//! build on it to write a value as a whole NBT document.
//!
//! ## Type Mapping
//!
//! | Rust | Tag |
//! |---|---|
//! | `bool` | `Byte` (0 or 1) |
//! | `i8` / `i16` / `i32` / `i64` | `Byte` / `Short` / `Int` / `Long` |
//! | `u8` / `u16` / `u32` | widened to `Short` / `Int` / `Long` |
//! | `u64` | `Long` if it fits, otherwise an error |
//! | `f32` / `f64` | `Float` / `Double` |
//! | `char`, `&str`, `String` | `String` |
//! | bytes (`serialize_bytes`) | `ByteArray` |
//! | sequences and tuples | `List` (elements must share one type) |
//! | maps and structs | `Compound` (keys must be strings) |
//! | `None` | omitted when it is a map or struct field; an error inside a sequence |
//! | `()` | an error |
//! | unit variant | `String` holding the variant name |
//! | other variants | `Compound` with one entry named after the variant |
//!
//! ## Examples
//!
//! ```rust
//! use serde::Serialize;
//! use serde_nbt::{to_tag, Tag};
//!
//! #[derive(Serialize)]
//! struct Player {
//!     name: String,
//!     health: f32,
//!     nickname: Option<String>,
//! }
//!
//! let player = Player { name: "Steve".into(), health: 20.0, nickname: None };
//! let tag = to_tag(&player).unwrap();
//!
//! let compound = tag.as_compound().unwrap();
//! assert_eq!(compound.get("health"), Some(&Tag::Float(20.0)));
//! assert!(!compound.contains_key("nickname"));
//! ```

use crate::{Compound, Error, Result, Tag, TypeId};
use serde::{ser, Serialize};

/// Serializes Rust values into [`Tag`]s.
pub struct TagSerializer;

pub struct SerializeList {
    elements: Vec<Tag>,
    variant: Option<&'static str>,
}

pub struct SerializeCompound {
    compound: Compound,
    next_name: Option<String>,
    variant: Option<&'static str>,
}

impl ser::Serializer for TagSerializer {
    type Ok = Tag;
    type Error = Error;

    type SerializeSeq = SerializeList;
    type SerializeTuple = SerializeList;
    type SerializeTupleStruct = SerializeList;
    type SerializeTupleVariant = SerializeList;
    type SerializeMap = SerializeCompound;
    type SerializeStruct = SerializeCompound;
    type SerializeStructVariant = SerializeCompound;

    fn serialize_bool(self, v: bool) -> Result<Tag> {
        Ok(Tag::Byte(i8::from(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Tag> {
        Ok(Tag::Byte(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Tag> {
        Ok(Tag::Short(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Tag> {
        Ok(Tag::Int(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Tag> {
        Ok(Tag::Long(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Tag> {
        Ok(Tag::Short(i16::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Tag> {
        Ok(Tag::Int(i32::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Tag> {
        Ok(Tag::Long(i64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Tag> {
        i64::try_from(v).map(Tag::Long).map_err(|_| {
            Error::unsupported_value_type(format!("integer {} does not fit in {}", v, TypeId::Long))
        })
    }

    fn serialize_f32(self, v: f32) -> Result<Tag> {
        Ok(Tag::Float(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Tag> {
        Ok(Tag::Double(v))
    }

    fn serialize_char(self, v: char) -> Result<Tag> {
        Ok(Tag::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Tag> {
        Ok(Tag::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Tag> {
        Ok(Tag::ByteArray(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Tag> {
        Ok(Tag::End)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Tag>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Tag> {
        Err(Error::unsupported_value_type("unit has no NBT representation"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Tag> {
        Ok(Tag::Compound(Compound::new()))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Tag> {
        Ok(Tag::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Tag>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Tag>
    where
        T: ?Sized + Serialize,
    {
        Ok(wrap_variant(variant, to_tag(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeList> {
        Ok(SerializeList::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeList> {
        Ok(SerializeList::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeList> {
        Ok(SerializeList::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeList> {
        Ok(SerializeList::new(len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeCompound> {
        Ok(SerializeCompound::new(len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeCompound> {
        Ok(SerializeCompound::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeCompound> {
        Ok(SerializeCompound::new(len, Some(variant)))
    }
}

impl SerializeList {
    fn new(len: usize, variant: Option<&'static str>) -> Self {
        SerializeList {
            elements: Vec::with_capacity(len.min(4096)),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let tag = to_tag(value)?;
        if tag.type_id() == TypeId::End {
            return Err(Error::unsupported_value_type(format!(
                "element {} of a sequence is None",
                self.elements.len()
            )));
        }
        if let Some(first) = self.elements.first() {
            if first.type_id() != tag.type_id() {
                return Err(Error::unsupported_value_type(format!(
                    "list of {} cannot hold a {}",
                    first.type_id(),
                    tag.type_id()
                )));
            }
        }
        self.elements.push(tag);
        Ok(())
    }

    fn finish(self) -> Tag {
        let list = Tag::List(self.elements);
        match self.variant {
            Some(variant) => wrap_variant(variant, list),
            None => list,
        }
    }
}

impl SerializeCompound {
    fn new(len: usize, variant: Option<&'static str>) -> Self {
        SerializeCompound {
            compound: Compound::with_capacity(len.min(4096)),
            next_name: None,
            variant,
        }
    }

    /// `None` values are left out of the compound.
    fn insert<T: ?Sized + Serialize>(&mut self, name: String, value: &T) -> Result<()> {
        let tag = to_tag(value)?;
        if !tag.is_end() {
            self.compound.insert(name, tag);
        }
        Ok(())
    }

    fn finish(self) -> Tag {
        let compound = Tag::Compound(self.compound);
        match self.variant {
            Some(variant) => wrap_variant(variant, compound),
            None => compound,
        }
    }
}

impl ser::SerializeSeq for SerializeList {
    type Ok = Tag;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Tag> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeList {
    type Ok = Tag;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Tag> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeList {
    type Ok = Tag;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Tag> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeList {
    type Ok = Tag;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Tag> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeCompound {
    type Ok = Tag;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_tag(key)? {
            Tag::String(name) => {
                self.next_name = Some(name);
                Ok(())
            }
            other => Err(Error::unsupported_value_type(format!(
                "compound names must be strings, found {}",
                other.type_id()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let name = self
            .next_name
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.insert(name, value)
    }

    fn end(self) -> Result<Tag> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeCompound {
    type Ok = Tag;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Tag> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeCompound {
    type Ok = Tag;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Tag> {
        Ok(self.finish())
    }
}

fn wrap_variant(variant: &'static str, value: Tag) -> Tag {
    let mut compound = Compound::with_capacity(1);
    compound.insert(variant, value);
    Tag::Compound(compound)
}

/// Converts a value into a [`Tag`].
///
/// # Examples
///
/// ```rust
/// use serde_nbt::{to_tag, Tag};
///
/// assert_eq!(to_tag(&7u8).unwrap(), Tag::Short(7));
/// assert_eq!(
///     to_tag(&vec![1i64, 2]).unwrap(),
///     Tag::List(vec![Tag::Long(1), Tag::Long(2)])
/// );
/// ```
pub fn to_tag<T: Serialize + ?Sized>(value: &T) -> Result<Tag> {
    value.serialize(TagSerializer)
}

/// Converts a value into a [`Compound`], for use as a document root.
///
/// # Errors
///
/// [`Error::TypeMismatch`] if the value does not serialize to a compound.
pub fn to_compound<T: Serialize + ?Sized>(value: &T) -> Result<Compound> {
    match to_tag(value)? {
        Tag::Compound(compound) => Ok(compound),
        other => Err(Error::type_mismatch(
            TypeId::Compound.name(),
            other.type_id().name(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    enum Shape {
        Point,
        Circle(f64),
        Segment(i32, i32),
        Rect { w: i16, h: i16 },
    }

    #[test]
    fn test_scalars() {
        assert_eq!(to_tag(&true).unwrap(), Tag::Byte(1));
        assert_eq!(to_tag(&-5i8).unwrap(), Tag::Byte(-5));
        assert_eq!(to_tag(&40_000u16).unwrap(), Tag::Int(40_000));
        assert_eq!(to_tag(&u32::MAX).unwrap(), Tag::Long(i64::from(u32::MAX)));
        assert_eq!(to_tag(&'c').unwrap(), Tag::from("c"));
        assert_eq!(to_tag(&2.5f64).unwrap(), Tag::Double(2.5));
    }

    #[test]
    fn test_u64_overflow_is_unsupported() {
        assert_eq!(to_tag(&(i64::MAX as u64)).unwrap(), Tag::Long(i64::MAX));
        assert!(matches!(
            to_tag(&u64::MAX),
            Err(Error::UnsupportedValueType(_))
        ));
    }

    #[test]
    fn test_heterogeneous_tuple_is_unsupported() {
        assert!(matches!(
            to_tag(&(1i32, "two")),
            Err(Error::UnsupportedValueType(_))
        ));
        assert_eq!(
            to_tag(&(1i32, 2i32)).unwrap(),
            Tag::List(vec![Tag::Int(1), Tag::Int(2)])
        );
    }

    #[test]
    fn test_none_and_unit_inside_sequences() {
        assert_eq!(
            to_tag(&vec![None::<i32>, Some(1)]).unwrap_err(),
            Error::unsupported_value_type("element 0 of a sequence is None")
        );
        assert!(matches!(
            to_tag(&vec![(), ()]),
            Err(Error::UnsupportedValueType(_))
        ));
        assert!(matches!(to_tag(&()), Err(Error::UnsupportedValueType(_))));
        assert_eq!(
            to_tag(&vec![Some(1i32), Some(2)]).unwrap(),
            Tag::List(vec![Tag::Int(1), Tag::Int(2)])
        );
    }

    #[test]
    fn test_none_fields_are_omitted() {
        let mut map = BTreeMap::new();
        map.insert("kept", Some(1i8));
        map.insert("dropped", None);
        let compound = to_compound(&map).unwrap();
        assert_eq!(compound.len(), 1);
        assert_eq!(compound.get("kept"), Some(&Tag::Byte(1)));
    }

    #[test]
    fn test_map_keys_must_be_strings() {
        let mut by_id = BTreeMap::new();
        by_id.insert(1, "one");
        assert!(matches!(
            to_tag(&by_id),
            Err(Error::UnsupportedValueType(_))
        ));

        let mut by_name = BTreeMap::new();
        by_name.insert("one", 1i32);
        let compound = to_compound(&by_name).unwrap();
        assert_eq!(compound.get("one"), Some(&Tag::Int(1)));
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(to_tag(&Shape::Point).unwrap(), Tag::from("Point"));

        let circle = to_compound(&Shape::Circle(1.5)).unwrap();
        assert_eq!(circle.get("Circle"), Some(&Tag::Double(1.5)));

        let segment = to_compound(&Shape::Segment(1, 2)).unwrap();
        assert_eq!(
            segment.get("Segment"),
            Some(&Tag::List(vec![Tag::Int(1), Tag::Int(2)]))
        );

        let rect = to_compound(&Shape::Rect { w: 3, h: 4 }).unwrap();
        let inner = rect.get("Rect").and_then(Tag::as_compound).unwrap();
        assert_eq!(inner.get("w"), Some(&Tag::Short(3)));
    }

    #[test]
    fn test_to_compound_rejects_scalars() {
        assert_eq!(
            to_compound(&5i32).unwrap_err(),
            Error::type_mismatch("TAG_Compound", "TAG_Int")
        );
    }

    #[test]
    fn test_tag_serializes_to_itself() {
        let mut compound = Compound::new();
        compound.insert("bytes", Tag::ByteArray(vec![1, 2]));
        compound.insert("list", Tag::List(vec![Tag::from("a")]));
        let tag = Tag::Compound(compound);
        assert_eq!(to_tag(&tag).unwrap(), tag);
    }
}
