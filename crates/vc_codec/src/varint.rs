//! Packed unsigned integers.
//!
//! A value is written as big-endian 7-bit groups, most significant first.
//! Every group but the last has the high bit clear, the last one has it set.
//! `0` takes one byte (`0x80`), `u32` values take at most 5 bytes and `u64`
//! values at most 10.
//!
//! # Examples
//!
//! ```
//! use vc_codec::varint;
//!
//! let mut buf = Vec::new();
//! varint::pack_u32(&mut buf, 300).unwrap();
//! assert_eq!(buf, [0x02, 0xAC]);
//!
//! let mut input = &buf[..];
//! assert_eq!(varint::unpack_u32(&mut input).unwrap(), 300);
//! ```

use std::io::{Read, Write};

use crate::error::{Result, SerialError};

const MAX_GROUPS_U32: usize = 5;
const MAX_GROUPS_U64: usize = 10;

/// Number of bytes [`pack_u64`] writes for `value`.
#[inline]
pub const fn packed_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    if bits == 0 { 1 } else { bits.div_ceil(7) }
}

/// Writes `value` as a packed integer.
pub fn pack_u64<W: Write + ?Sized>(out: &mut W, value: u64) -> Result<()> {
    let mut buf = [0u8; MAX_GROUPS_U64];
    let len = packed_len(value);
    for (idx, slot) in buf[..len].iter_mut().enumerate() {
        let shift = 7 * (len - 1 - idx);
        *slot = ((value >> shift) & 0x7F) as u8;
    }
    buf[len - 1] |= 0x80;
    out.write_all(&buf[..len])?;
    Ok(())
}

/// Writes `value` as a packed integer.
#[inline]
pub fn pack_u32<W: Write + ?Sized>(out: &mut W, value: u32) -> Result<()> {
    pack_u64(out, value as u64)
}

fn unpack<R: Read + ?Sized>(input: &mut R, max_groups: usize) -> Result<u64> {
    let mut ret = 0u64;
    for _ in 0..max_groups {
        let mut byte = [0u8; 1];
        input.read_exact(&mut byte)?;
        ret = (ret << 7) | (byte[0] & 0x7F) as u64;
        if byte[0] & 0x80 != 0 {
            return Ok(ret);
        }
    }
    Err(SerialError::MalformedVarint)
}

/// Reads a packed `u64`.
#[inline]
pub fn unpack_u64<R: Read + ?Sized>(input: &mut R) -> Result<u64> {
    unpack(input, MAX_GROUPS_U64)
}

/// Reads a packed `u32`.
///
/// Five groups carry 35 bits, a value above `u32::MAX` is malformed.
#[inline]
pub fn unpack_u32<R: Read + ?Sized>(input: &mut R) -> Result<u32> {
    let value = unpack(input, MAX_GROUPS_U32)?;
    u32::try_from(value).map_err(|_| SerialError::MalformedVarint)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn packed(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        pack_u64(&mut buf, value).unwrap();
        buf
    }

    #[test]
    fn zero_is_one_byte() {
        assert_eq!(packed(0), [0x80]);
        assert_eq!(packed(127), [0xFF]);
        assert_eq!(packed(128), [0x01, 0x80]);
    }

    #[test]
    fn lengths() {
        assert_eq!(packed_len(0), 1);
        assert_eq!(packed_len(127), 1);
        assert_eq!(packed_len(128), 2);
        assert_eq!(packed_len(u32::MAX as u64), 5);
        assert_eq!(packed_len(u64::MAX), 10);
        for value in [0, 1, 1 << 20, u32::MAX as u64, u64::MAX] {
            assert_eq!(packed(value).len(), packed_len(value));
        }
    }

    #[test]
    fn round_trip_edges() {
        for value in [0u64, 1, 127, 128, 16_383, 16_384, u32::MAX as u64, u64::MAX] {
            let buf = packed(value);
            assert_eq!(unpack_u64(&mut &buf[..]).unwrap(), value);
        }
        let mut buf = Vec::new();
        pack_u32(&mut buf, u32::MAX).unwrap();
        assert_eq!(unpack_u32(&mut &buf[..]).unwrap(), u32::MAX);
    }

    #[test]
    fn malformed() {
        let never_ends = [0x01u8; 11];
        assert!(matches!(
            unpack_u64(&mut &never_ends[..]),
            Err(SerialError::MalformedVarint)
        ));
        assert!(matches!(
            unpack_u32(&mut &never_ends[..]),
            Err(SerialError::MalformedVarint)
        ));
        let truncated = [0x01u8];
        assert!(matches!(unpack_u32(&mut &truncated[..]), Err(SerialError::Io(_))));
    }

    #[test]
    fn u32_overflow_is_malformed() {
        let two_pow_32 = packed(1 << 32);
        assert_eq!(two_pow_32, [0x10, 0x00, 0x00, 0x00, 0x80]);
        assert!(matches!(
            unpack_u32(&mut &two_pow_32[..]),
            Err(SerialError::MalformedVarint)
        ));
        assert_eq!(unpack_u64(&mut &two_pow_32[..]).unwrap(), 1 << 32);
    }
}
