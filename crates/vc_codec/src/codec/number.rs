//! Scalars.
//!
//! Small values get a header of their own, larger ones the narrowest payload
//! that holds them. Integers outside the one-byte range use a *framed*
//! encoding: the header carries the sign and the number of magnitude bytes
//! that follow, most significant first.

use std::io::{Read, Write};

use vc_reflect::{Obj, Value};

use crate::decoder::Decoder;
use crate::error::Result;
use crate::header::*;
use crate::io::{ReadBytes, WriteBytes};

/// Magnitude bytes needed for a non-zero `abs`.
#[inline]
fn width(abs: u64) -> u8 {
    (64 - abs.leading_zeros() as u8).div_ceil(8)
}

/// `first_negative` is the header of a negative one-byte magnitude, its
/// positive counterpart follows it and wider frames come in pairs after.
fn write_framed<W: Write + ?Sized>(out: &mut W, first_negative: u8, abs: u64, neg: bool) -> Result<()> {
    let width = width(abs);
    out.write_u8(first_negative + (width - 1) * 2 + !neg as u8)?;
    for shift in (0..width).rev() {
        out.write_u8((abs >> (shift * 8)) as u8)?;
    }
    Ok(())
}

fn read_framed<R: Read + ?Sized>(input: &mut R, first_negative: u8, tag: u8) -> Result<(u64, bool)> {
    let rel = tag - first_negative;
    let mut abs = 0u64;
    for _ in 0..rel / 2 + 1 {
        abs = (abs << 8) | input.read_u8()? as u64;
    }
    Ok((abs, rel % 2 == 0))
}

// -----------------------------------------------------------------------------
// Integers

pub(crate) fn write_int<W: Write + ?Sized>(out: &mut W, v: i32) -> Result<()> {
    match v {
        -9..=16 => out.write_u8((INT_M9 as i32 + v + 9) as u8),
        i32::MIN => out.write_u8(INT_MIN_VALUE),
        i32::MAX => out.write_u8(INT_MAX_VALUE),
        _ => {
            let abs = v.unsigned_abs();
            if abs >> 24 != 0 {
                out.write_u8(INT)?;
                out.write_i32(v)
            } else {
                write_framed(out, INT_MF1, abs as u64, v < 0)
            }
        }
    }
}

pub(crate) fn decode_int(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let v = match tag {
        INT_M9..=INT_16 => tag as i32 - INT_M9 as i32 - 9,
        INT_MIN_VALUE => i32::MIN,
        INT_MAX_VALUE => i32::MAX,
        INT_MF1..=INT_F3 => {
            let (abs, neg) = read_framed(dec, INT_MF1, tag)?;
            if neg { -(abs as i32) } else { abs as i32 }
        }
        _ => dec.read_i32()?,
    };
    Ok(Some(Obj::from(v)))
}

pub(crate) fn write_long<W: Write + ?Sized>(out: &mut W, v: i64) -> Result<()> {
    match v {
        -9..=16 => out.write_u8((LONG_M9 as i64 + v + 9) as u8),
        i64::MIN => out.write_u8(LONG_MIN_VALUE),
        i64::MAX => out.write_u8(LONG_MAX_VALUE),
        _ => {
            let abs = v.unsigned_abs();
            if abs >> 56 != 0 {
                out.write_u8(LONG)?;
                out.write_i64(v)
            } else {
                write_framed(out, LONG_MF1, abs, v < 0)
            }
        }
    }
}

pub(crate) fn decode_long(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let v = match tag {
        LONG_M9..=LONG_16 => tag as i64 - LONG_M9 as i64 - 9,
        LONG_MIN_VALUE => i64::MIN,
        LONG_MAX_VALUE => i64::MAX,
        LONG_MF1..=LONG_F7 => {
            let (abs, neg) = read_framed(dec, LONG_MF1, tag)?;
            if neg { -(abs as i64) } else { abs as i64 }
        }
        _ => dec.read_i64()?,
    };
    Ok(Some(Obj::from(v)))
}

// -----------------------------------------------------------------------------
// Narrow integers

pub(crate) fn write_byte<W: Write + ?Sized>(out: &mut W, v: i8) -> Result<()> {
    match v {
        -1 => out.write_u8(BYTE_M1),
        0 => out.write_u8(BYTE_0),
        1 => out.write_u8(BYTE_1),
        _ => {
            out.write_u8(BYTE)?;
            out.write_i8(v)
        }
    }
}

pub(crate) fn decode_byte(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let v = match tag {
        BYTE_M1 => -1,
        BYTE_0 => 0,
        BYTE_1 => 1,
        _ => dec.read_i8()?,
    };
    Ok(Some(Obj::from(v)))
}

pub(crate) fn write_char<W: Write + ?Sized>(out: &mut W, v: u16) -> Result<()> {
    match v {
        0 => out.write_u8(CHAR_0),
        1 => out.write_u8(CHAR_1),
        2..=255 => {
            out.write_u8(CHAR_255)?;
            out.write_u8(v as u8)
        }
        _ => {
            out.write_u8(CHAR)?;
            out.write_u16(v)
        }
    }
}

pub(crate) fn decode_char(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let v = match tag {
        CHAR_0 => 0,
        CHAR_1 => 1,
        CHAR_255 => dec.read_u8()? as u16,
        _ => dec.read_u16()?,
    };
    Ok(Some(Obj::char_unit(v)))
}

pub(crate) fn write_short<W: Write + ?Sized>(out: &mut W, v: i16) -> Result<()> {
    match v {
        -1 => out.write_u8(SHORT_M1),
        0 => out.write_u8(SHORT_0),
        1 => out.write_u8(SHORT_1),
        2..=254 => {
            out.write_u8(SHORT_255)?;
            out.write_u8(v as u8)
        }
        -254..=-2 => {
            out.write_u8(SHORT_M255)?;
            out.write_u8(-v as u8)
        }
        _ => {
            out.write_u8(SHORT)?;
            out.write_i16(v)
        }
    }
}

pub(crate) fn decode_short(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let v = match tag {
        SHORT_M1 => -1,
        SHORT_0 => 0,
        SHORT_1 => 1,
        SHORT_255 => dec.read_u8()? as i16,
        SHORT_M255 => -(dec.read_u8()? as i16),
        _ => dec.read_i16()?,
    };
    Ok(Some(Obj::from(v)))
}

// -----------------------------------------------------------------------------
// Floating point
//
// Only whole values take the compact forms. Negative zero and NaN payloads
// always use the full width so the exact bits survive.

pub(crate) fn write_float<W: Write + ?Sized>(out: &mut W, v: f32) -> Result<()> {
    if v.to_bits() == 0 {
        out.write_u8(FLOAT_0)
    } else if v == 1.0 {
        out.write_u8(FLOAT_1)
    } else if v == -1.0 {
        out.write_u8(FLOAT_M1)
    } else if v > 0.0 && v as u8 as f32 == v {
        out.write_u8(FLOAT_255)?;
        out.write_u8(v as u8)
    } else if v != 0.0 && v as i16 as f32 == v {
        out.write_u8(FLOAT_SHORT)?;
        out.write_i16(v as i16)
    } else {
        out.write_u8(FLOAT)?;
        out.write_f32(v)
    }
}

pub(crate) fn decode_float(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let v = match tag {
        FLOAT_M1 => -1.0,
        FLOAT_0 => 0.0,
        FLOAT_1 => 1.0,
        FLOAT_255 => dec.read_u8()? as f32,
        FLOAT_SHORT => dec.read_i16()? as f32,
        _ => dec.read_f32()?,
    };
    Ok(Some(Obj::from(v)))
}

pub(crate) fn write_double<W: Write + ?Sized>(out: &mut W, v: f64) -> Result<()> {
    if v.to_bits() == 0 {
        out.write_u8(DOUBLE_0)
    } else if v == 1.0 {
        out.write_u8(DOUBLE_1)
    } else if v == -1.0 {
        out.write_u8(DOUBLE_M1)
    } else if v > 0.0 && v as u8 as f64 == v {
        out.write_u8(DOUBLE_255)?;
        out.write_u8(v as u8)
    } else if v != 0.0 && v as i16 as f64 == v {
        out.write_u8(DOUBLE_SHORT)?;
        out.write_i16(v as i16)
    } else if v != 0.0 && v as i32 as f64 == v {
        out.write_u8(DOUBLE_INT)?;
        out.write_i32(v as i32)
    } else {
        out.write_u8(DOUBLE)?;
        out.write_f64(v)
    }
}

pub(crate) fn decode_double(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let v = match tag {
        DOUBLE_M1 => -1.0,
        DOUBLE_0 => 0.0,
        DOUBLE_1 => 1.0,
        DOUBLE_255 => dec.read_u8()? as f64,
        DOUBLE_SHORT => dec.read_i16()? as f64,
        DOUBLE_INT => dec.read_i32()? as f64,
        _ => dec.read_f64()?,
    };
    Ok(Some(Obj::from(v)))
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::Serializer;
    use vc_reflect::Object;

    fn back(bytes: &[u8]) -> Obj {
        Serializer::default().from_bytes(bytes).unwrap().unwrap()
    }

    fn int_bytes(v: i32) -> Vec<u8> {
        let mut buf = Vec::new();
        write_int(&mut buf, v).unwrap();
        buf
    }

    fn int_back(bytes: &[u8]) -> i32 {
        back(bytes).as_int().unwrap()
    }

    #[test]
    fn small_ints_take_one_byte() {
        for v in -9..=16 {
            let bytes = int_bytes(v);
            assert_eq!(bytes.len(), 1);
            assert_eq!(int_back(&bytes), v);
        }
        assert_eq!(int_bytes(0), [INT_0]);
        assert_eq!(int_bytes(i32::MIN), [INT_MIN_VALUE]);
        assert_eq!(int_bytes(i32::MAX), [INT_MAX_VALUE]);
    }

    #[test]
    fn framed_ints() {
        assert_eq!(int_bytes(17), [INT_F1, 17]);
        assert_eq!(int_bytes(-10), [INT_MF1, 10]);
        assert_eq!(int_bytes(300), [INT_F2, 0x01, 0x2C]);
        assert_eq!(int_bytes(-0x12_3456), [INT_MF3, 0x12, 0x34, 0x56]);
        assert_eq!(int_bytes(0x0100_0000), [INT, 0x01, 0, 0, 0]);
        for v in [17, -10, 255, 256, -65_535, 0xFF_FFFF, -0xFF_FFFF, 0x0100_0000, -0x7FFF_FFFF] {
            assert_eq!(int_back(&int_bytes(v)), v);
        }
    }

    #[test]
    fn framed_longs() {
        let mut buf = Vec::new();
        write_long(&mut buf, -(1 << 40)).unwrap();
        assert_eq!(buf[0], LONG_MF6);
        assert_eq!(buf.len(), 7);

        for v in [0, 16, -9, 17, -(1 << 40), (1 << 55) + 3, 1 << 56, i64::MIN, i64::MAX] {
            let mut buf = Vec::new();
            write_long(&mut buf, v).unwrap();
            assert_eq!(back(&buf).as_long(), Some(v));
        }
    }

    #[test]
    fn short_ranges() {
        let cases: [(i16, &[u8]); 5] = [
            (-1, &[SHORT_M1]),
            (254, &[SHORT_255, 254]),
            (255, &[SHORT, 0, 255]),
            (-254, &[SHORT_M255, 254]),
            (-255, &[SHORT, 0xFF, 0x01]),
        ];
        for (v, expected) in cases {
            let mut buf = Vec::new();
            write_short(&mut buf, v).unwrap();
            assert_eq!(buf, expected);
            assert!(matches!(back(&buf).object(), Object::Short(s) if *s == v));
        }
    }

    #[test]
    fn float_forms() {
        let header_of = |v: f64| {
            let mut buf = Vec::new();
            write_double(&mut buf, v).unwrap();
            buf[0]
        };
        assert_eq!(header_of(0.0), DOUBLE_0);
        assert_eq!(header_of(255.0), DOUBLE_255);
        assert_eq!(header_of(-3.0), DOUBLE_SHORT);
        assert_eq!(header_of(70_000.0), DOUBLE_INT);
        assert_eq!(header_of(0.5), DOUBLE);
        assert_eq!(header_of(-0.0), DOUBLE);
        assert_eq!(header_of(f64::NAN), DOUBLE);

        let mut buf = Vec::new();
        write_float(&mut buf, -0.0).unwrap();
        let zero = back(&buf);
        assert!(matches!(zero.object(), Object::Float(f) if f.to_bits() == (-0.0f32).to_bits()));
    }
}
