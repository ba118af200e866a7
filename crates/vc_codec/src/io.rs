//! Fixed-width reads and writes.
//!
//! Numbers are big-endian. Type names use the modified UTF-8 of the JVM
//! data streams: a `u16` byte length, then every UTF-16 unit as one to three
//! bytes, with `U+0000` written as two bytes.
//!
//! Both traits are implemented for every [`Write`]/[`Read`], including
//! [`Encoder`](crate::Encoder) and [`Decoder`](crate::Decoder), so user
//! codecs call them directly.
//!
//! # Examples
//!
//! ```
//! use vc_codec::io::{ReadBytes, WriteBytes};
//!
//! let mut buf = Vec::new();
//! buf.write_i32(-2).unwrap();
//! buf.write_utf("demo.Point").unwrap();
//!
//! let mut input = &buf[..];
//! assert_eq!(input.read_i32().unwrap(), -2);
//! assert_eq!(input.read_utf().unwrap(), "demo.Point");
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use std::io::{Read, Write};

use crate::error::{Result, SerialError};
use crate::varint;

// -----------------------------------------------------------------------------
// WriteBytes

/// Big-endian and packed writes.
pub trait WriteBytes: Write {
    #[inline]
    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_all(&[value])?;
        Ok(())
    }

    #[inline]
    fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(value as u8)
    }

    #[inline]
    fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_u8(value as u8)
    }

    #[inline]
    fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_all(&value.to_be_bytes())?;
        Ok(())
    }

    #[inline]
    fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_all(&value.to_be_bytes())?;
        Ok(())
    }

    #[inline]
    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_all(&value.to_be_bytes())?;
        Ok(())
    }

    #[inline]
    fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_all(&value.to_be_bytes())?;
        Ok(())
    }

    #[inline]
    fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_all(&value.to_bits().to_be_bytes())?;
        Ok(())
    }

    #[inline]
    fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_all(&value.to_bits().to_be_bytes())?;
        Ok(())
    }

    /// See [`varint::pack_u32`].
    #[inline]
    fn pack_u32(&mut self, value: u32) -> Result<()> {
        varint::pack_u32(self, value)
    }

    /// See [`varint::pack_u64`].
    #[inline]
    fn pack_u64(&mut self, value: u64) -> Result<()> {
        varint::pack_u64(self, value)
    }

    /// Packs a length or count.
    ///
    /// Values above `u32::MAX` cannot be represented by the format.
    #[inline]
    fn pack_len(&mut self, len: usize) -> Result<()> {
        let len = u32::try_from(len).map_err(|_| SerialError::LengthOverflow(len))?;
        self.pack_u32(len)
    }

    /// Writes a modified UTF-8 string with a `u16` length prefix.
    fn write_utf(&mut self, text: &str) -> Result<()> {
        let mut bytes = Vec::with_capacity(text.len());
        for unit in text.encode_utf16() {
            match unit {
                0x0001..=0x007F => bytes.push(unit as u8),
                0x0000 | 0x0080..=0x07FF => {
                    bytes.push(0xC0 | (unit >> 6) as u8);
                    bytes.push(0x80 | (unit & 0x3F) as u8);
                }
                _ => {
                    bytes.push(0xE0 | (unit >> 12) as u8);
                    bytes.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                    bytes.push(0x80 | (unit & 0x3F) as u8);
                }
            }
        }
        let len = u16::try_from(bytes.len()).map_err(|_| SerialError::InvalidString)?;
        self.write_u16(len)?;
        self.write_all(&bytes)?;
        Ok(())
    }
}

impl<W: Write + ?Sized> WriteBytes for W {}

// -----------------------------------------------------------------------------
// ReadBytes

/// Big-endian and packed reads, the counterpart of [`WriteBytes`].
pub trait ReadBytes: Read {
    #[inline]
    fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    #[inline]
    fn read_bool(&mut self) -> Result<bool> {
        self.read_u8().map(|b| b != 0)
    }

    #[inline]
    fn read_i8(&mut self) -> Result<i8> {
        self.read_u8().map(|b| b as i8)
    }

    #[inline]
    fn read_i16(&mut self) -> Result<i16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(i16::from_be_bytes(buf))
    }

    #[inline]
    fn read_u16(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    #[inline]
    fn read_i32(&mut self) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(i32::from_be_bytes(buf))
    }

    #[inline]
    fn read_i64(&mut self) -> Result<i64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(i64::from_be_bytes(buf))
    }

    #[inline]
    fn read_f32(&mut self) -> Result<f32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(f32::from_bits(u32::from_be_bytes(buf)))
    }

    #[inline]
    fn read_f64(&mut self) -> Result<f64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(f64::from_bits(u64::from_be_bytes(buf)))
    }

    /// See [`varint::unpack_u32`].
    #[inline]
    fn unpack_u32(&mut self) -> Result<u32> {
        varint::unpack_u32(self)
    }

    /// See [`varint::unpack_u64`].
    #[inline]
    fn unpack_u64(&mut self) -> Result<u64> {
        varint::unpack_u64(self)
    }

    /// Reads `len` raw bytes.
    ///
    /// The buffer grows as data arrives, so a corrupt length fails on the
    /// missing input instead of allocating up front.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let read = self.take(len as u64).read_to_end(&mut buf)?;
        if read != len {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }
        Ok(buf)
    }

    /// Reads a modified UTF-8 string with a `u16` length prefix.
    fn read_utf(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.read_bytes(len)?;
        let mut units = Vec::with_capacity(len);
        let mut idx = 0;
        while idx < bytes.len() {
            let b0 = bytes[idx] as u16;
            let (unit, width) = match b0 >> 4 {
                0..=7 => (b0, 1),
                12 | 13 => {
                    let b1 = continuation(&bytes, idx + 1)?;
                    (((b0 & 0x1F) << 6) | b1, 2)
                }
                14 => {
                    let b1 = continuation(&bytes, idx + 1)?;
                    let b2 = continuation(&bytes, idx + 2)?;
                    (((b0 & 0x0F) << 12) | (b1 << 6) | b2, 3)
                }
                _ => return Err(SerialError::InvalidString),
            };
            units.push(unit);
            idx += width;
        }
        String::from_utf16(&units).map_err(|_| SerialError::InvalidString)
    }
}

impl<R: Read + ?Sized> ReadBytes for R {}

#[inline]
fn continuation(bytes: &[u8], idx: usize) -> Result<u16> {
    match bytes.get(idx) {
        Some(b) if b & 0xC0 == 0x80 => Ok((b & 0x3F) as u16),
        _ => Err(SerialError::InvalidString),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn big_endian() {
        let mut buf = Vec::new();
        buf.write_i16(0x0102).unwrap();
        buf.write_i64(-1).unwrap();
        buf.write_f64(1.5).unwrap();
        assert_eq!(&buf[..2], &[0x01, 0x02]);
        assert_eq!(&buf[2..10], &[0xFF; 8]);

        let mut input = &buf[..];
        assert_eq!(input.read_i16().unwrap(), 0x0102);
        assert_eq!(input.read_i64().unwrap(), -1);
        assert_eq!(input.read_f64().unwrap(), 1.5);
        assert!(input.read_u8().is_err());
    }

    #[test]
    fn modified_utf8() {
        let mut buf = Vec::new();
        buf.write_utf("a\0é€").unwrap();
        // 'a' = 1 byte, NUL = 2 bytes, 'é' = 2 bytes, '€' = 3 bytes.
        assert_eq!(&buf[..2], &[0, 8]);
        assert_eq!(&buf[3..5], &[0xC0, 0x80]);
        assert_eq!((&buf[..]).read_utf().unwrap(), "a\0é€");
    }

    #[test]
    fn supplementary_chars_use_surrogates() {
        let mut buf = Vec::new();
        buf.write_utf("🦀").unwrap();
        // Two surrogate units of three bytes each.
        assert_eq!(&buf[..2], &[0, 6]);
        assert_eq!((&buf[..]).read_utf().unwrap(), "🦀");
    }

    #[test]
    fn rejects_broken_utf() {
        let data = [0u8, 2, 0xC3, 0x41];
        assert!(matches!((&data[..]).read_utf(), Err(SerialError::InvalidString)));
        let short = [0u8, 4, b'a'];
        assert!(matches!((&short[..]).read_utf(), Err(SerialError::Io(_))));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn lengths_above_u32_are_rejected() {
        let mut buf = Vec::new();
        let len = u32::MAX as usize + 1;
        assert!(matches!(buf.pack_len(len), Err(SerialError::LengthOverflow(l)) if l == len));
        assert!(buf.is_empty());
        buf.pack_len(u32::MAX as usize).unwrap();
        assert_eq!(buf.len(), 5);
    }
}
