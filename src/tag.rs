//! Dynamic value representation for NBT data.
//!
//! This module provides the [`Tag`] enum, a tagged union over every payload
//! shape the format can carry, the one-byte [`TypeId`] discriminator, and the
//! [`Document`] wrapper for a named root compound.
//!
//! ## Core Types
//!
//! - [`TypeId`]: the closed enumeration of wire type ids (End=0 .. LongArray=12)
//! - [`Tag`]: a value of one of those types (scalars, arrays, string, list, compound)
//! - [`Document`]: one root [`Compound`] plus its (possibly empty) name
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_nbt::{Compound, Tag};
//!
//! let byte = Tag::Byte(1);
//! let int = Tag::from(42i32);
//! let text = Tag::from("hello");
//!
//! let mut compound = Compound::new();
//! compound.insert("health", Tag::Float(20.0));
//! let root = Tag::from(compound);
//! assert!(root.is_compound());
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use serde_nbt::Tag;
//! use std::convert::TryFrom;
//!
//! let value = Tag::Int(42);
//! assert_eq!(value.as_i64(), Some(42));
//!
//! let num: i32 = i32::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```

use crate::Compound;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One-byte discriminator identifying the payload shape of a tag.
///
/// The numeric values are fixed by the wire format.
///
/// # Examples
///
/// ```rust
/// use serde_nbt::TypeId;
///
/// assert_eq!(TypeId::from_u8(10), Some(TypeId::Compound));
/// assert_eq!(TypeId::Compound.as_u8(), 10);
/// assert_eq!(TypeId::from_u8(0xFF), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeId {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl TypeId {
    /// Every type id, in wire order.
    pub const ALL: [TypeId; 13] = [
        TypeId::End,
        TypeId::Byte,
        TypeId::Short,
        TypeId::Int,
        TypeId::Long,
        TypeId::Float,
        TypeId::Double,
        TypeId::ByteArray,
        TypeId::String,
        TypeId::List,
        TypeId::Compound,
        TypeId::IntArray,
        TypeId::LongArray,
    ];

    /// Maps a wire byte to a type id, or `None` if it is outside the enumeration.
    #[inline]
    #[must_use]
    pub const fn from_u8(id: u8) -> Option<TypeId> {
        match id {
            0 => Some(TypeId::End),
            1 => Some(TypeId::Byte),
            2 => Some(TypeId::Short),
            3 => Some(TypeId::Int),
            4 => Some(TypeId::Long),
            5 => Some(TypeId::Float),
            6 => Some(TypeId::Double),
            7 => Some(TypeId::ByteArray),
            8 => Some(TypeId::String),
            9 => Some(TypeId::List),
            10 => Some(TypeId::Compound),
            11 => Some(TypeId::IntArray),
            12 => Some(TypeId::LongArray),
            _ => None,
        }
    }

    /// The wire byte of this type id.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// The conventional `TAG_*` name, used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TypeId::End => "TAG_End",
            TypeId::Byte => "TAG_Byte",
            TypeId::Short => "TAG_Short",
            TypeId::Int => "TAG_Int",
            TypeId::Long => "TAG_Long",
            TypeId::Float => "TAG_Float",
            TypeId::Double => "TAG_Double",
            TypeId::ByteArray => "TAG_Byte_Array",
            TypeId::String => "TAG_String",
            TypeId::List => "TAG_List",
            TypeId::Compound => "TAG_Compound",
            TypeId::IntArray => "TAG_Int_Array",
            TypeId::LongArray => "TAG_Long_Array",
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically-typed NBT value.
///
/// List elements and compound entries are themselves `Tag`s, so a whole
/// document is one tree of this type. `End` never appears as a named compound
/// entry; it only shows up as the placeholder element of legacy lists whose
/// element type is End.
///
/// # Examples
///
/// ```rust
/// use serde_nbt::{Tag, TypeId};
///
/// let list = Tag::List(vec![Tag::Short(1), Tag::Short(2)]);
/// assert_eq!(list.type_id(), TypeId::List);
/// assert_eq!(list.as_list().map(|l| l.len()), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Tag {
    #[default]
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(String),
    List(Vec<Tag>),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    /// The wire type id of this value.
    #[inline]
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        match self {
            Tag::End => TypeId::End,
            Tag::Byte(_) => TypeId::Byte,
            Tag::Short(_) => TypeId::Short,
            Tag::Int(_) => TypeId::Int,
            Tag::Long(_) => TypeId::Long,
            Tag::Float(_) => TypeId::Float,
            Tag::Double(_) => TypeId::Double,
            Tag::ByteArray(_) => TypeId::ByteArray,
            Tag::String(_) => TypeId::String,
            Tag::List(_) => TypeId::List,
            Tag::Compound(_) => TypeId::Compound,
            Tag::IntArray(_) => TypeId::IntArray,
            Tag::LongArray(_) => TypeId::LongArray,
        }
    }

    /// Returns `true` for the End placeholder.
    #[inline]
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self, Tag::End)
    }

    /// Returns `true` for any of the four integer scalars.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Tag::Byte(_) | Tag::Short(_) | Tag::Int(_) | Tag::Long(_))
    }

    /// Returns `true` for `Float` and `Double`.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Tag::Float(_) | Tag::Double(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Tag::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Tag::List(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_compound(&self) -> bool {
        matches!(self, Tag::Compound(_))
    }

    /// Widens any integer scalar to `i64`. Returns `None` for other tags.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_nbt::Tag;
    ///
    /// assert_eq!(Tag::Byte(-3).as_i64(), Some(-3));
    /// assert_eq!(Tag::Long(1 << 40).as_i64(), Some(1 << 40));
    /// assert_eq!(Tag::Float(1.0).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Tag::Byte(v) => Some(i64::from(*v)),
            Tag::Short(v) => Some(i64::from(*v)),
            Tag::Int(v) => Some(i64::from(*v)),
            Tag::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Widens `Float` or `Double` to `f64`. Returns `None` for other tags.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Tag::Float(v) => Some(f64::from(*v)),
            Tag::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_byte_array(&self) -> Option<&[u8]> {
        match self {
            Tag::ByteArray(bytes) => Some(bytes),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            Tag::IntArray(ints) => Some(ints),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_long_array(&self) -> Option<&[i64]> {
        match self {
            Tag::LongArray(longs) => Some(longs),
            _ => None,
        }
    }

    /// If the value is a list, returns a reference to its elements.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Tag>> {
        match self {
            Tag::List(list) => Some(list),
            _ => None,
        }
    }

    /// If the value is a compound, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Tag::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Tag::Compound(compound) => Some(compound),
            _ => None,
        }
    }
}

fn write_joined<T, F>(f: &mut fmt::Formatter<'_>, items: &[T], mut each: F) -> fmt::Result
where
    F: FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
{
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        each(f, item)?;
    }
    Ok(())
}

/// Renders the value in the stringified-NBT style (`42b`, `[I;1,2]`, `{a:1}`).
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::End => f.write_str("END"),
            Tag::Byte(v) => write!(f, "{}b", v),
            Tag::Short(v) => write!(f, "{}s", v),
            Tag::Int(v) => write!(f, "{}", v),
            Tag::Long(v) => write!(f, "{}L", v),
            Tag::Float(v) => write!(f, "{}f", v),
            Tag::Double(v) => write!(f, "{}d", v),
            Tag::ByteArray(bytes) => {
                f.write_str("[B;")?;
                write_joined(f, bytes, |f, b| write!(f, "{}b", *b as i8))?;
                f.write_str("]")
            }
            Tag::String(s) => write!(f, "{:?}", s),
            Tag::List(list) => {
                f.write_str("[")?;
                write_joined(f, list, |f, tag| write!(f, "{}", tag))?;
                f.write_str("]")
            }
            Tag::Compound(compound) => {
                f.write_str("{")?;
                for (i, (name, tag)) in compound.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{:?}:{}", name, tag)?;
                }
                f.write_str("}")
            }
            Tag::IntArray(ints) => {
                f.write_str("[I;")?;
                write_joined(f, ints, |f, v| write!(f, "{}", v))?;
                f.write_str("]")
            }
            Tag::LongArray(longs) => {
                f.write_str("[L;")?;
                write_joined(f, longs, |f, v| write!(f, "{}L", v))?;
                f.write_str("]")
            }
        }
    }
}

/// A decoded or to-be-encoded NBT document: a root compound and its name.
///
/// Unnamed documents use the empty string; on the wire both are written as a
/// zero-length name.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Document {
    pub name: String,
    pub root: Compound,
}

impl Document {
    /// Creates a document from a root name and compound.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_nbt::{Compound, Document};
    ///
    /// let doc = Document::new("Level", Compound::new());
    /// assert_eq!(doc.name, "Level");
    /// ```
    pub fn new(name: impl Into<String>, root: Compound) -> Self {
        Document {
            name: name.into(),
            root,
        }
    }

    /// Creates a document with an empty root name.
    pub fn unnamed(root: Compound) -> Self {
        Document {
            name: String::new(),
            root,
        }
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Tag::End => serializer.serialize_none(),
            Tag::Byte(v) => serializer.serialize_i8(*v),
            Tag::Short(v) => serializer.serialize_i16(*v),
            Tag::Int(v) => serializer.serialize_i32(*v),
            Tag::Long(v) => serializer.serialize_i64(*v),
            Tag::Float(v) => serializer.serialize_f32(*v),
            Tag::Double(v) => serializer.serialize_f64(*v),
            Tag::ByteArray(bytes) => serializer.serialize_bytes(bytes),
            Tag::String(s) => serializer.serialize_str(s),
            Tag::List(list) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for element in list {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Tag::Compound(compound) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(compound.len()))?;
                for (k, v) in compound.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Tag::IntArray(ints) => ints.serialize(serializer),
            Tag::LongArray(longs) => longs.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct TagVisitor;

        impl<'de> Visitor<'de> for TagVisitor {
            type Value = Tag;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any value representable as an NBT tag")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Tag::Byte(i8::from(value)))
            }

            fn visit_i8<E>(self, value: i8) -> Result<Self::Value, E> {
                Ok(Tag::Byte(value))
            }

            fn visit_i16<E>(self, value: i16) -> Result<Self::Value, E> {
                Ok(Tag::Short(value))
            }

            fn visit_i32<E>(self, value: i32) -> Result<Self::Value, E> {
                Ok(Tag::Int(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Tag::Long(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(Tag::Long)
                    .map_err(|_| E::custom(format!("integer {} does not fit in TAG_Long", value)))
            }

            fn visit_f32<E>(self, value: f32) -> Result<Self::Value, E> {
                Ok(Tag::Float(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Tag::Double(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Tag::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Tag::String(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E> {
                Ok(Tag::ByteArray(value.to_vec()))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Self::Value, E> {
                Ok(Tag::ByteArray(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Tag::End)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Tag::End)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Tag::List(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut compound = Compound::new();
                while let Some((key, value)) = map.next_entry::<String, Tag>()? {
                    compound.insert(key, value);
                }
                Ok(Tag::Compound(compound))
            }
        }

        deserializer.deserialize_any(TagVisitor)
    }
}

macro_rules! impl_try_from_tag {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl TryFrom<Tag> for $ty {
                type Error = crate::Error;

                fn try_from(value: Tag) -> crate::Result<Self> {
                    match value {
                        Tag::$variant(v) => Ok(v),
                        other => Err(crate::Error::type_mismatch(
                            TypeId::$variant.name(),
                            other.type_id().name(),
                        )),
                    }
                }
            }
        )*
    };
}

impl_try_from_tag! {
    Byte => i8,
    Short => i16,
    Int => i32,
    Long => i64,
    Float => f32,
    Double => f64,
    String => String,
    Compound => Compound,
}

impl From<bool> for Tag {
    fn from(value: bool) -> Self {
        Tag::Byte(i8::from(value))
    }
}

impl From<i8> for Tag {
    fn from(value: i8) -> Self {
        Tag::Byte(value)
    }
}

impl From<i16> for Tag {
    fn from(value: i16) -> Self {
        Tag::Short(value)
    }
}

impl From<i32> for Tag {
    fn from(value: i32) -> Self {
        Tag::Int(value)
    }
}

impl From<i64> for Tag {
    fn from(value: i64) -> Self {
        Tag::Long(value)
    }
}

impl From<f32> for Tag {
    fn from(value: f32) -> Self {
        Tag::Float(value)
    }
}

impl From<f64> for Tag {
    fn from(value: f64) -> Self {
        Tag::Double(value)
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Tag::String(value)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::String(value.to_string())
    }
}

impl From<Vec<u8>> for Tag {
    fn from(value: Vec<u8>) -> Self {
        Tag::ByteArray(value)
    }
}

impl From<Vec<i32>> for Tag {
    fn from(value: Vec<i32>) -> Self {
        Tag::IntArray(value)
    }
}

impl From<Vec<i64>> for Tag {
    fn from(value: Vec<i64>) -> Self {
        Tag::LongArray(value)
    }
}

impl From<Vec<Tag>> for Tag {
    fn from(value: Vec<Tag>) -> Self {
        Tag::List(value)
    }
}

impl From<Compound> for Tag {
    fn from(value: Compound) -> Self {
        Tag::Compound(value)
    }
}
