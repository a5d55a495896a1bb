//! Positioned byte cursor with little-endian primitive access.
//!
//! A cursor is either *fixed* (wrapping an existing buffer for parsing) or
//! *appending* (starting empty and growing as fields are written). Every
//! read checks bounds before touching memory.

use crate::error::{CodecError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Fixed,
    Append,
}

/// Byte buffer plus position.
#[derive(Debug, Clone)]
pub struct ByteCursor {
    buf: Vec<u8>,
    pos: usize,
    mode: Mode,
    depth: usize,
    max_depth: usize,
}

/// Nesting limit used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 16;

macro_rules! primitive {
    ($($read:ident / $write:ident => $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Read a little-endian `", stringify!($ty), "`.")]
            pub fn $read(&mut self) -> Result<$ty> {
                let bytes = self.take(std::mem::size_of::<$ty>())?;
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                Ok(<$ty>::from_le_bytes(raw))
            }

            #[doc = concat!("Write a little-endian `", stringify!($ty), "`.")]
            pub fn $write(&mut self, value: $ty) -> Result<()> {
                self.put(&value.to_le_bytes())
            }
        )*
    };
}

impl ByteCursor {
    /// Wrap an existing buffer for parsing, positioned at 0.
    pub fn fixed(buf: Vec<u8>) -> Self {
        Self {
            buf,
            pos: 0,
            mode: Mode::Fixed,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Start an empty, growable buffer for serialization.
    pub fn append() -> Self {
        Self {
            buf: Vec::new(),
            pos: 0,
            mode: Mode::Append,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the nesting limit consulted by recursive records.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Nesting levels `descend` allows before failing.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Current position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total buffer length.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when the underlying buffer holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes left between the position and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// True once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Move to an absolute position inside the buffer.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.buf.len() {
            return Err(CodecError::out_of_bounds(self.pos, pos - self.pos, self.remaining()));
        }
        self.pos = pos;
        Ok(())
    }

    primitive! {
        read_u8 / write_u8 => u8,
        read_i8 / write_i8 => i8,
        read_u16 / write_u16 => u16,
        read_i16 / write_i16 => i16,
        read_u32 / write_u32 => u32,
        read_i32 / write_i32 => i32,
        read_f32 / write_f32 => f32,
        read_f64 / write_f64 => f64,
    }

    /// Read exactly `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        self.take(n).map(<[u8]>::to_vec)
    }

    /// Read everything from the position to the end of the buffer.
    pub fn read_rest(&mut self) -> Vec<u8> {
        let rest = self.buf[self.pos.min(self.buf.len())..].to_vec();
        self.pos = self.buf.len();
        rest
    }

    /// Write raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.put(bytes)
    }

    /// Consume the cursor, returning the buffer truncated to the position.
    pub fn finish(mut self) -> Vec<u8> {
        self.buf.truncate(self.pos);
        self.buf
    }

    /// Run `f` one nesting level deeper, failing once the depth limit is exceeded.
    pub fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.max_depth {
            return Err(CodecError::RecursionLimit {
                offset: self.pos,
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    fn take(&mut self, n: usize) -> Result<&[u8]> {
        if n > self.remaining() {
            return Err(CodecError::out_of_bounds(self.pos, n, self.remaining()));
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.buf[start..self.pos])
    }

    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            if self.mode == Mode::Fixed {
                return Err(CodecError::out_of_bounds(
                    self.pos,
                    bytes.len(),
                    self.remaining(),
                ));
            }
            self.buf.resize(end, 0);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_reads() {
        let mut cur = ByteCursor::fixed(vec![0x34, 0x12, 0xff, 0x01, 0x00, 0x00, 0x80]);
        assert_eq!(cur.read_u16().unwrap(), 0x1234);
        assert_eq!(cur.read_i8().unwrap(), -1);
        assert_eq!(cur.read_u32().unwrap(), 0x8000_0001);
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn test_short_read_leaves_position() {
        let mut cur = ByteCursor::fixed(vec![1, 2, 3]);
        let err = cur.read_u32().unwrap_err();
        assert!(matches!(
            err,
            CodecError::OutOfBounds {
                offset: 0,
                need: 4,
                have: 3
            }
        ));
        assert_eq!(cur.position(), 0);
    }

    #[test]
    fn test_append_grows_and_finish_trims() {
        let mut cur = ByteCursor::append();
        cur.write_u32(7).unwrap();
        cur.write_f64(1.5).unwrap();
        cur.write_bytes(b"ab").unwrap();
        cur.seek(4).unwrap();
        assert_eq!(cur.finish(), vec![7, 0, 0, 0]);
    }

    #[test]
    fn test_fixed_refuses_growth() {
        let mut cur = ByteCursor::fixed(vec![0; 2]);
        assert!(cur.write_u32(1).is_err());
        cur.write_u16(0xbeef).unwrap();
        assert_eq!(cur.finish(), vec![0xef, 0xbe]);
    }

    #[test]
    fn test_descend_limit() {
        let mut cur = ByteCursor::fixed(vec![]).with_max_depth(2);
        assert_eq!(cur.max_depth(), 2);
        let ok = cur.descend(|c| c.descend(|_| Ok(1)));
        assert_eq!(ok.unwrap(), 1);
        let err = cur.descend(|c| c.descend(|c| c.descend(|_| Ok(()))));
        assert!(matches!(err, Err(CodecError::RecursionLimit { limit: 2, .. })));

        // depth unwinds after a failure
        let mut cur = cur.with_max_depth(1);
        assert!(cur.descend(|_| Ok(())).is_ok());
        let err = cur.descend(|c| c.descend(|_| Ok(())));
        assert!(matches!(err, Err(CodecError::RecursionLimit { limit: 1, .. })));
    }

    #[test]
    fn test_read_rest() {
        let mut cur = ByteCursor::fixed(vec![1, 2, 3, 4]);
        cur.read_u8().unwrap();
        assert_eq!(cur.read_rest(), vec![2, 3, 4]);
        assert_eq!(cur.remaining(), 0);
    }
}
