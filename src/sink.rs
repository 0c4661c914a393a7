//! Buffered big-endian output.
//!
//! ```rust
//! use serde_nbt::sink::ByteSink;
//!
//! let mut sink = ByteSink::new(Vec::new());
//! sink.write_u8(0x0A).unwrap();
//! sink.write_i32(42).unwrap();
//! assert_eq!(sink.finish().unwrap(), vec![0x0A, 0, 0, 0, 42]);
//! ```

use crate::Result;
use byteorder::{BigEndian, WriteBytesExt};
use std::io::{BufWriter, Write};

/// A [`BufWriter`] with big-endian scalar writes.
///
/// Dropping a sink without calling [`finish`](ByteSink::finish) still flushes,
/// but any error from that final flush is lost.
pub struct ByteSink<W: Write> {
    inner: BufWriter<W>,
    written: u64,
}

impl<W: Write> ByteSink<W> {
    pub fn new(writer: W) -> Self {
        ByteSink {
            inner: BufWriter::new(writer),
            written: 0,
        }
    }

    pub fn with_capacity(capacity: usize, writer: W) -> Self {
        ByteSink {
            inner: BufWriter::with_capacity(capacity, writer),
            written: 0,
        }
    }

    /// Total bytes accepted so far, flushed or not.
    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.inner.write_u8(value)?;
        self.written += 1;
        Ok(())
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.inner.write_i8(value)?;
        self.written += 1;
        Ok(())
    }

    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.inner.write_i16::<BigEndian>(value)?;
        self.written += 2;
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.inner.write_u16::<BigEndian>(value)?;
        self.written += 2;
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.inner.write_i32::<BigEndian>(value)?;
        self.written += 4;
        Ok(())
    }

    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.inner.write_i64::<BigEndian>(value)?;
        self.written += 8;
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.inner.write_f32::<BigEndian>(value)?;
        self.written += 4;
        Ok(())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.inner.write_f64::<BigEndian>(value)?;
        self.written += 8;
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Flushes the buffer and returns the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.inner.into_inner().map_err(|e| e.into_error().into())
    }
}
