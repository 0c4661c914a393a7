//! Byte cursor with on-demand refill.
//!
//! [`ByteCursor`] guarantees that a requested number of contiguous bytes is
//! present in its working window before a read proceeds. It runs in one of two
//! modes:
//!
//! - **bounded**: wraps a byte slice already in memory. Nothing is ever
//!   refilled; asking for more bytes than remain fails immediately.
//! - **streaming**: wraps any [`Read`] source behind a fixed-capacity buffer.
//!   When the window runs short, the unread tail is shifted to the front of
//!   the buffer and the rest is filled from the source, looping over short
//!   reads until enough bytes arrived or the source reports end of data.
//!
//! All multi-byte scalars are big-endian. A scalar read needs its full width
//! contiguously, so the buffer capacity must be at least 8 bytes to read
//! `Long` and `Double` values; byte runs (strings, array payloads) are copied
//! in chunks and are not limited by the capacity.
//!
//! ```rust
//! use serde_nbt::cursor::ByteCursor;
//!
//! let mut cursor = ByteCursor::from_slice(&[0x00, 0x2A, 0xFF]);
//! assert_eq!(cursor.read_i16().unwrap(), 42);
//! assert_eq!(cursor.read_i8().unwrap(), -1);
//! assert!(cursor.at_end().unwrap());
//! ```

use crate::options::DEFAULT_BUFFER_CAPACITY;
use crate::{Error, Result};
use byteorder::{BigEndian, ByteOrder};
use std::io::{self, Read};

enum Window<'a> {
    Borrowed(&'a [u8]),
    Owned(Box<[u8]>),
}

impl Window<'_> {
    #[inline]
    fn bytes(&self) -> &[u8] {
        match self {
            Window::Borrowed(bytes) => bytes,
            Window::Owned(buf) => buf,
        }
    }
}

/// A read cursor over either an in-memory slice or a refillable buffer.
pub struct ByteCursor<'a, R = io::Empty> {
    window: Window<'a>,
    source: Option<R>,
    /// Next unread byte in the window.
    pos: usize,
    /// End of valid bytes in the window.
    limit: usize,
    /// Absolute offset of `window[0]` in the whole input.
    base: u64,
    exhausted: bool,
}

impl<'a> ByteCursor<'a, io::Empty> {
    /// Creates a bounded cursor over `bytes`.
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        ByteCursor {
            window: Window::Borrowed(bytes),
            source: None,
            pos: 0,
            limit: bytes.len(),
            base: 0,
            exhausted: true,
        }
    }
}

impl<R: Read> ByteCursor<'static, R> {
    /// Creates a streaming cursor with the default 4096-byte buffer.
    pub fn new(source: R) -> Self {
        Self::with_capacity(source, DEFAULT_BUFFER_CAPACITY)
    }

    /// Creates a streaming cursor with a `capacity`-byte buffer (at least 1).
    pub fn with_capacity(source: R, capacity: usize) -> Self {
        ByteCursor {
            window: Window::Owned(vec![0u8; capacity.max(1)].into_boxed_slice()),
            source: Some(source),
            pos: 0,
            limit: 0,
            base: 0,
            exhausted: false,
        }
    }
}

impl<'a, R: Read> ByteCursor<'a, R> {
    /// Absolute offset of the next unread byte.
    #[inline]
    pub fn position(&self) -> u64 {
        self.base + self.pos as u64
    }

    /// Number of unread bytes currently in the window.
    #[inline]
    pub fn available(&self) -> usize {
        self.limit - self.pos
    }

    /// Size of the working window. For bounded cursors this is the slice length.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.window.bytes().len()
    }

    /// Returns `true` for cursors over an in-memory slice.
    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.source.is_none()
    }

    /// Makes sure at least `n` unread bytes are contiguous in the window.
    ///
    /// # Errors
    ///
    /// - [`Error::UnexpectedEof`] if the input ends first
    /// - [`Error::BufferTooSmall`] if `n` exceeds the streaming buffer capacity
    /// - [`Error::Io`] if the source fails
    pub fn ensure_available(&mut self, n: usize) -> Result<()> {
        if self.available() >= n {
            return Ok(());
        }
        if self.is_bounded() {
            return Err(Error::unexpected_eof(self.position(), n, self.available()));
        }
        let capacity = self.capacity();
        if n > capacity {
            return Err(Error::BufferTooSmall {
                requested: n,
                capacity,
            });
        }
        self.refill(n)?;
        if self.available() < n {
            return Err(Error::unexpected_eof(self.position(), n, self.available()));
        }
        Ok(())
    }

    /// Returns `true` when no unread bytes remain and the source is exhausted.
    ///
    /// May read from the source to find out.
    pub fn at_end(&mut self) -> Result<bool> {
        if self.available() > 0 {
            return Ok(false);
        }
        if !self.is_bounded() {
            self.refill(1)?;
        }
        Ok(self.available() == 0)
    }

    /// Shifts the unread tail to the buffer start, then reads until `n` bytes
    /// are available or the source is exhausted.
    fn refill(&mut self, n: usize) -> Result<()> {
        let (Window::Owned(buf), Some(source)) = (&mut self.window, self.source.as_mut()) else {
            return Ok(());
        };

        if self.pos > 0 {
            buf.copy_within(self.pos..self.limit, 0);
            self.base += self.pos as u64;
            self.limit -= self.pos;
            self.pos = 0;
        }

        while self.limit < n && !self.exhausted {
            match source.read(&mut buf[self.limit..]) {
                Ok(0) => self.exhausted = true,
                Ok(read) => self.limit += read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    #[inline]
    fn take(&mut self, n: usize) -> Result<&[u8]> {
        self.ensure_available(n)?;
        let start = self.pos;
        self.pos += n;
        Ok(&self.window.bytes()[start..start + n])
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(self.take(2)?))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(self.take(4)?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(BigEndian::read_i64(self.take(8)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(BigEndian::read_f32(self.take(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(BigEndian::read_f64(self.take(8)?))
    }

    /// Appends the next `len` bytes to `out`, refilling as often as needed.
    pub fn read_bytes_into(&mut self, len: usize, out: &mut Vec<u8>) -> Result<()> {
        if self.is_bounded() && self.available() < len {
            return Err(Error::unexpected_eof(self.position(), len, self.available()));
        }

        let mut remaining = len;
        while remaining > 0 {
            if self.available() == 0 {
                match self.ensure_available(1) {
                    Ok(()) => {}
                    Err(Error::UnexpectedEof { offset, .. }) => {
                        return Err(Error::unexpected_eof(offset, remaining, 0));
                    }
                    Err(e) => return Err(e),
                }
            }
            let chunk = remaining.min(self.available());
            out.extend_from_slice(&self.window.bytes()[self.pos..self.pos + chunk]);
            self.pos += chunk;
            remaining -= chunk;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out at most `step` bytes per read call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_bounded_reads_big_endian() {
        let bytes = [
            0x12, 0x34, 0x00, 0x00, 0x00, 0x2A, 0x3F, 0xC0, 0x00, 0x00, 0x7F, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0xFF, 0xFF,
        ];
        let mut cursor = ByteCursor::from_slice(&bytes);
        assert_eq!(cursor.read_i16().unwrap(), 0x1234);
        assert_eq!(cursor.read_i32().unwrap(), 42);
        assert_eq!(cursor.read_f32().unwrap(), 1.5);
        assert_eq!(cursor.read_i64().unwrap(), i64::MAX);
        assert_eq!(cursor.position(), 18);
        assert!(cursor.at_end().unwrap());
    }

    #[test]
    fn test_bounded_short_read_fails_immediately() {
        let mut cursor = ByteCursor::from_slice(&[0x00, 0x01]);
        let err = cursor.read_i32().unwrap_err();
        assert_eq!(err, Error::unexpected_eof(0, 4, 2));
    }

    #[test]
    fn test_streaming_refill_across_short_reads() {
        let data: Vec<u8> = (0u8..=20).collect();
        let mut cursor = ByteCursor::with_capacity(Trickle { data: &data, step: 1 }, 8);

        assert_eq!(cursor.read_u8().unwrap(), 0);
        // Needs a shift of the unread tail plus several single-byte reads.
        assert_eq!(cursor.read_i64().unwrap(), 0x0102030405060708);
        assert_eq!(cursor.position(), 9);

        let mut rest = Vec::new();
        cursor.read_bytes_into(12, &mut rest).unwrap();
        assert_eq!(rest, (9u8..=20).collect::<Vec<_>>());
        assert!(cursor.at_end().unwrap());
    }

    #[test]
    fn test_read_wider_than_buffer_is_rejected() {
        let data = [0u8; 16];
        let mut cursor = ByteCursor::with_capacity(&data[..], 4);
        assert_eq!(
            cursor.read_i64().unwrap_err(),
            Error::BufferTooSmall {
                requested: 8,
                capacity: 4
            }
        );
    }

    #[test]
    fn test_byte_run_longer_than_buffer() {
        let data: Vec<u8> = (0..100u8).collect();
        let mut cursor = ByteCursor::with_capacity(Trickle { data: &data, step: 7 }, 8);
        let mut out = Vec::new();
        cursor.read_bytes_into(100, &mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_streaming_truncation_reports_offset() {
        let data = [0x00, 0x00, 0x01];
        let mut cursor = ByteCursor::new(&data[..]);
        let err = cursor.read_i32().unwrap_err();
        assert_eq!(err, Error::unexpected_eof(0, 4, 3));

        let mut cursor = ByteCursor::new(&data[..]);
        let mut out = Vec::new();
        let err = cursor.read_bytes_into(5, &mut out).unwrap_err();
        assert_eq!(err, Error::unexpected_eof(3, 2, 0));
    }

    #[test]
    fn test_interrupted_reads_are_reissued() {
        struct Flaky {
            interrupted: bool,
        }

        impl Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
                }
                buf[0] = 7;
                Ok(1)
            }
        }

        let mut cursor = ByteCursor::new(Flaky { interrupted: false });
        assert_eq!(cursor.read_u8().unwrap(), 7);
    }

    #[test]
    fn test_source_failure_propagates() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
            }
        }

        let mut cursor = ByteCursor::new(Broken);
        assert!(matches!(cursor.read_u8(), Err(Error::Io(_))));
    }
}
