//! Error types for NBT encoding and decoding.
//!
//! Every failure is local to one decode or encode call and is reported through
//! the single [`Error`] enum. Decoding errors carry the absolute byte offset at
//! which the problem was detected, so corrupt files can be inspected with a hex
//! dump.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: the byte source or sink failed
//! - **Truncation**: fewer bytes were available than a read required
//! - **Framing Errors**: wrong root type, unknown type ids, bad lengths
//! - **Resource Limits**: nesting depth or buffer capacity exceeded
//! - **Value Errors**: a value has no NBT representation, or a tag does not
//!   match the Rust type it is deserialized into
//!
//! ## Examples
//!
//! ```rust
//! use serde_nbt::{decode_slice, Error};
//!
//! // Documents must start with the Compound type id (0x0A).
//! let result = decode_slice(&[0x03, 0x00, 0x00]);
//! assert!(matches!(result, Err(Error::MalformedDocument { found: 3, .. })));
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Represents all possible errors that can occur while reading or writing NBT.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The underlying byte source or sink failed
    #[error("IO error: {0}")]
    Io(String),

    /// Fewer bytes were available than a primitive, array or string read requires
    #[error("Unexpected end of input at offset {offset}: needed {needed} bytes, {available} available")]
    UnexpectedEof {
        offset: u64,
        needed: usize,
        available: usize,
    },

    /// The first type id of a document is not Compound (10)
    #[error("Malformed document at offset {offset}: expected compound type id 10, found {found}")]
    MalformedDocument { offset: u64, found: u8 },

    /// A type id byte outside the defined enumeration
    #[error("Unknown type id {id} at offset {offset}")]
    UnknownTypeId { offset: u64, id: u8 },

    /// A length field is negative, above the configured ceiling, or cannot be framed
    #[error("Invalid {context} length {length} at offset {offset}")]
    InvalidLength {
        offset: u64,
        length: i64,
        context: &'static str,
    },

    /// A value whose shape does not map to any NBT type id
    #[error("Unsupported value type: {0}")]
    UnsupportedValueType(String),

    /// A single read needs more contiguous bytes than the working buffer holds
    #[error("Read of {requested} contiguous bytes exceeds buffer capacity {capacity}")]
    BufferTooSmall { requested: usize, capacity: usize },

    /// Compound or list nesting is deeper than the configured maximum
    #[error("Nesting depth exceeds maximum of {max_depth} at offset {offset}")]
    DepthLimitExceeded { offset: u64, max_depth: usize },

    /// A tag does not have the shape the target Rust type expects
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a truncation error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_nbt::Error;
    ///
    /// let err = Error::unexpected_eof(12, 4, 1);
    /// assert!(err.to_string().contains("offset 12"));
    /// ```
    pub fn unexpected_eof(offset: u64, needed: usize, available: usize) -> Self {
        Error::UnexpectedEof {
            offset,
            needed,
            available,
        }
    }

    /// Creates an error for a document whose root is not a compound.
    pub fn malformed_document(offset: u64, found: u8) -> Self {
        Error::MalformedDocument { offset, found }
    }

    /// Creates an error for a type id outside the enumeration.
    pub fn unknown_type_id(offset: u64, id: u8) -> Self {
        Error::UnknownTypeId { offset, id }
    }

    /// Creates an invalid length error. `context` names what the length belongs
    /// to, e.g. `"list"` or `"byte array"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_nbt::Error;
    ///
    /// let err = Error::invalid_length(3, -1, "int array");
    /// assert!(err.to_string().contains("int array length -1"));
    /// ```
    pub fn invalid_length(offset: u64, length: i64, context: &'static str) -> Self {
        Error::InvalidLength {
            offset,
            length,
            context,
        }
    }

    /// Creates an error for values that cannot be represented in NBT.
    pub fn unsupported_value_type<T: fmt::Display>(msg: T) -> Self {
        Error::UnsupportedValueType(msg.to_string())
    }

    /// Creates a type mismatch error for the Serde bridge.
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
