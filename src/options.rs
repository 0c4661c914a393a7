//! Configuration options for NBT decoding and encoding.
//!
//! [`NbtOptions`] controls the streaming buffer and the sanity ceilings that
//! protect a decoder from corrupted or hostile input:
//!
//! - `buffer_capacity`: size of the streaming cursor's working buffer
//! - `max_length`: largest accepted element count for arrays and lists
//! - `max_depth`: deepest accepted compound/list nesting
//! - `max_end_placeholders`: how many End placeholders one document may
//!   decode to. End-typed lists carry no payload, so their length field is
//!   not backed by input bytes.
//!
//! ## Examples
//!
//! ```rust
//! use serde_nbt::{decode_with_options, NbtOptions};
//!
//! let options = NbtOptions::new()
//!     .with_buffer_capacity(512)
//!     .with_max_depth(64);
//!
//! let bytes: &[u8] = &[0x0A, 0x00, 0x00, 0x00];
//! let doc = decode_with_options(bytes, &options).unwrap();
//! assert!(doc.root.is_empty());
//! ```

/// Default working buffer size of the streaming cursor, in bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// Default ceiling on array and list lengths (16 Mi elements).
pub const DEFAULT_MAX_LENGTH: usize = 16 * 1024 * 1024;

/// Default ceiling on compound/list nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Default per-document budget of End placeholders.
pub const DEFAULT_MAX_END_PLACEHOLDERS: usize = 4096;

/// Configuration for decoders and encoders.
///
/// # Examples
///
/// ```rust
/// use serde_nbt::NbtOptions;
///
/// let options = NbtOptions::default();
/// assert_eq!(options.buffer_capacity, 4096);
///
/// let strict = NbtOptions::new().with_max_length(1024);
/// assert_eq!(strict.max_length, 1024);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NbtOptions {
    /// Working buffer size of the streaming cursor. The widest primitive read
    /// is 8 bytes, so capacities below 8 fail on `Long`/`Double` reads.
    pub buffer_capacity: usize,
    /// Largest element count accepted from an array or list length field.
    pub max_length: usize,
    /// Deepest compound/list nesting accepted while decoding or encoding.
    pub max_depth: usize,
    /// Total End placeholders accepted from End-typed lists in one document.
    pub max_end_placeholders: usize,
}

impl Default for NbtOptions {
    fn default() -> Self {
        NbtOptions {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            max_length: DEFAULT_MAX_LENGTH,
            max_depth: DEFAULT_MAX_DEPTH,
            max_end_placeholders: DEFAULT_MAX_END_PLACEHOLDERS,
        }
    }
}

impl NbtOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the streaming buffer capacity in bytes.
    #[must_use]
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Sets the maximum array/list length.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the per-document End placeholder budget.
    #[must_use]
    pub fn with_max_end_placeholders(mut self, max_end_placeholders: usize) -> Self {
        self.max_end_placeholders = max_end_placeholders;
        self
    }
}
