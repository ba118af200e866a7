//! Primitive arrays.
//!
//! Every array is its header, a packed length and the elements. Integer
//! arrays pick one element width for the whole array from its minimum and
//! maximum, byte arrays of a single repeated value store that value once.

use alloc::vec::Vec;
use std::io::Write;

use vc_reflect::{Obj, Object, Value};

use crate::decoder::Decoder;
use crate::error::Result;
use crate::header::*;
use crate::io::{ReadBytes, WriteBytes};

fn read_len(dec: &mut Decoder<'_>) -> Result<usize> {
    Ok(dec.unpack_u32()? as usize)
}

/// Reads `len` elements with `f`.
fn read_elements<T>(
    dec: &mut Decoder<'_>,
    len: usize,
    mut f: impl FnMut(&mut Decoder<'_>) -> Result<T>,
) -> Result<Vec<T>> {
    let mut items = Vec::with_capacity(len.min(super::PREALLOCATE));
    for _ in 0..len {
        items.push(f(dec)?);
    }
    Ok(items)
}

// -----------------------------------------------------------------------------
// Bytes and booleans

pub(crate) fn write_bytes<W: Write + ?Sized>(out: &mut W, bytes: &[u8]) -> Result<()> {
    match bytes.split_first() {
        Some((first, rest))
            if bytes.len() <= super::FILL_LIMIT && rest.iter().all(|b| b == first) =>
        {
            out.write_u8(ARRAY_BYTE_ALL_EQUAL)?;
            out.pack_len(bytes.len())?;
            out.write_u8(*first)
        }
        _ => {
            out.write_u8(ARRAY_BYTE)?;
            out.pack_len(bytes.len())?;
            out.write_all(bytes)?;
            Ok(())
        }
    }
}

pub(crate) fn decode_bytes(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let len = read_len(dec)?;
    let bytes = if tag == ARRAY_BYTE_ALL_EQUAL {
        super::check_fill(len)?;
        let fill = dec.read_u8()?;
        alloc::vec![fill; len]
    } else {
        dec.read_bytes(len)?
    };
    Ok(Some(Obj::from(bytes)))
}

/// Eight flags per byte, the first flag in the lowest bit.
pub(crate) fn write_booleans<W: Write + ?Sized>(out: &mut W, flags: &[bool]) -> Result<()> {
    out.write_u8(ARRAY_BOOLEAN)?;
    out.pack_len(flags.len())?;
    let mut packed = Vec::with_capacity(flags.len().div_ceil(8));
    for chunk in flags.chunks(8) {
        let byte = chunk
            .iter()
            .enumerate()
            .fold(0u8, |acc, (bit, flag)| acc | ((*flag as u8) << bit));
        packed.push(byte);
    }
    out.write_all(&packed)?;
    Ok(())
}

pub(crate) fn decode_booleans(dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    let len = read_len(dec)?;
    let packed = dec.read_bytes(len.div_ceil(8))?;
    let flags: Vec<bool> = (0..len).map(|i| packed[i / 8] & (1 << (i % 8)) != 0).collect();
    Ok(Some(Obj::from(flags)))
}

// -----------------------------------------------------------------------------
// Fixed element arrays

pub(crate) fn write_shorts<W: Write + ?Sized>(out: &mut W, items: &[i16]) -> Result<()> {
    out.write_u8(ARRAY_SHORT)?;
    out.pack_len(items.len())?;
    items.iter().try_for_each(|v| out.write_i16(*v))
}

pub(crate) fn decode_shorts(dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    let len = read_len(dec)?;
    let items = read_elements(dec, len, |d| d.read_i16())?;
    Ok(Some(Obj::from(items)))
}

pub(crate) fn write_chars<W: Write + ?Sized>(out: &mut W, items: &[u16]) -> Result<()> {
    out.write_u8(ARRAY_CHAR)?;
    out.pack_len(items.len())?;
    items.iter().try_for_each(|v| out.pack_u32(*v as u32))
}

pub(crate) fn decode_chars(dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    let len = read_len(dec)?;
    let items = read_elements(dec, len, |d| Ok(d.unpack_u32()? as u16))?;
    Ok(Some(Obj::new(Object::CharArray(items.into_boxed_slice()))))
}

pub(crate) fn write_floats<W: Write + ?Sized>(out: &mut W, items: &[f32]) -> Result<()> {
    out.write_u8(ARRAY_FLOAT)?;
    out.pack_len(items.len())?;
    items.iter().try_for_each(|v| out.write_f32(*v))
}

pub(crate) fn decode_floats(dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    let len = read_len(dec)?;
    let items = read_elements(dec, len, |d| d.read_f32())?;
    Ok(Some(Obj::from(items)))
}

pub(crate) fn write_doubles<W: Write + ?Sized>(out: &mut W, items: &[f64]) -> Result<()> {
    out.write_u8(ARRAY_DOUBLE)?;
    out.pack_len(items.len())?;
    items.iter().try_for_each(|v| out.write_f64(*v))
}

pub(crate) fn decode_doubles(dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    let len = read_len(dec)?;
    let items = read_elements(dec, len, |d| d.read_f64())?;
    Ok(Some(Obj::from(items)))
}

// -----------------------------------------------------------------------------
// Integer arrays

pub(crate) fn write_ints<W: Write + ?Sized>(out: &mut W, items: &[i32]) -> Result<()> {
    let min = items.iter().copied().min().unwrap_or(0);
    let max = items.iter().copied().max().unwrap_or(0);

    if min >= i8::MIN as i32 && max <= i8::MAX as i32 {
        out.write_u8(ARRAY_INT_BYTE)?;
        out.pack_len(items.len())?;
        items.iter().try_for_each(|v| out.write_i8(*v as i8))
    } else if min >= i16::MIN as i32 && max <= i16::MAX as i32 {
        out.write_u8(ARRAY_INT_SHORT)?;
        out.pack_len(items.len())?;
        items.iter().try_for_each(|v| out.write_i16(*v as i16))
    } else if min >= 0 {
        out.write_u8(ARRAY_INT_PACKED)?;
        out.pack_len(items.len())?;
        items.iter().try_for_each(|v| out.pack_u32(*v as u32))
    } else {
        out.write_u8(ARRAY_INT)?;
        out.pack_len(items.len())?;
        items.iter().try_for_each(|v| out.write_i32(*v))
    }
}

pub(crate) fn decode_ints(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let len = read_len(dec)?;
    let items = match tag {
        ARRAY_INT_BYTE => read_elements(dec, len, |d| Ok(d.read_i8()? as i32))?,
        ARRAY_INT_SHORT => read_elements(dec, len, |d| Ok(d.read_i16()? as i32))?,
        ARRAY_INT_PACKED => read_elements(dec, len, |d| Ok(d.unpack_u32()? as i32))?,
        _ => read_elements(dec, len, |d| d.read_i32())?,
    };
    Ok(Some(Obj::from(items)))
}

pub(crate) fn write_longs<W: Write + ?Sized>(out: &mut W, items: &[i64]) -> Result<()> {
    let min = items.iter().copied().min().unwrap_or(0);
    let max = items.iter().copied().max().unwrap_or(0);

    if min >= i8::MIN as i64 && max <= i8::MAX as i64 {
        out.write_u8(ARRAY_LONG_BYTE)?;
        out.pack_len(items.len())?;
        items.iter().try_for_each(|v| out.write_i8(*v as i8))
    } else if min >= i16::MIN as i64 && max <= i16::MAX as i64 {
        out.write_u8(ARRAY_LONG_SHORT)?;
        out.pack_len(items.len())?;
        items.iter().try_for_each(|v| out.write_i16(*v as i16))
    } else if min >= 0 {
        out.write_u8(ARRAY_LONG_PACKED)?;
        out.pack_len(items.len())?;
        items.iter().try_for_each(|v| out.pack_u64(*v as u64))
    } else if min >= i32::MIN as i64 && max <= i32::MAX as i64 {
        out.write_u8(ARRAY_LONG_INT)?;
        out.pack_len(items.len())?;
        items.iter().try_for_each(|v| out.write_i32(*v as i32))
    } else {
        out.write_u8(ARRAY_LONG)?;
        out.pack_len(items.len())?;
        items.iter().try_for_each(|v| out.write_i64(*v))
    }
}

pub(crate) fn decode_longs(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let len = read_len(dec)?;
    let items = match tag {
        ARRAY_LONG_BYTE => read_elements(dec, len, |d| Ok(d.read_i8()? as i64))?,
        ARRAY_LONG_SHORT => read_elements(dec, len, |d| Ok(d.read_i16()? as i64))?,
        ARRAY_LONG_PACKED => read_elements(dec, len, |d| Ok(d.unpack_u64()? as i64))?,
        ARRAY_LONG_INT => read_elements(dec, len, |d| Ok(d.read_i32()? as i64))?,
        _ => read_elements(dec, len, |d| d.read_i64())?,
    };
    Ok(Some(Obj::from(items)))
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::Serializer;

    fn back(bytes: &[u8]) -> Obj {
        Serializer::default().from_bytes(bytes).unwrap().unwrap()
    }

    #[test]
    fn all_equal_bytes() {
        let mut buf = Vec::new();
        write_bytes(&mut buf, &[7; 100]).unwrap();
        assert_eq!(buf, [ARRAY_BYTE_ALL_EQUAL, 0xE4, 7]);
        assert!(matches!(back(&buf).object(), Object::ByteArray(b) if b.len() == 100));

        let mut empty = Vec::new();
        write_bytes(&mut empty, &[]).unwrap();
        assert_eq!(empty, [ARRAY_BYTE, 0x80]);
    }

    #[test]
    fn repeated_bytes_are_bounded() {
        let long_len = crate::codec::FILL_LIMIT + 1;
        let mut long = Vec::new();
        write_bytes(&mut long, &vec![7; long_len]).unwrap();
        assert_eq!(long[0], ARRAY_BYTE);
        assert!(matches!(back(&long).object(), Object::ByteArray(b) if b.len() == long_len));

        let mut forged = vec![ARRAY_BYTE_ALL_EQUAL];
        crate::varint::pack_u32(&mut forged, 0x7FFF_FFFF).unwrap();
        forged.push(7);
        assert!(matches!(
            Serializer::default().from_bytes(&forged),
            Err(crate::error::SerialError::FillLimit { .. })
        ));
    }

    #[test]
    fn booleans_pack_lowest_bit_first() {
        let flags = [true, false, false, true, false, false, false, false, true];
        let mut buf = Vec::new();
        write_booleans(&mut buf, &flags).unwrap();
        assert_eq!(buf, [ARRAY_BOOLEAN, 0x89, 0b0000_1001, 0b0000_0001]);
        assert!(matches!(back(&buf).object(), Object::BooleanArray(b) if b[..] == flags));
    }

    #[test]
    fn int_width_is_chosen_per_array() {
        let header_of = |items: &[i32]| {
            let mut buf = Vec::new();
            write_ints(&mut buf, items).unwrap();
            buf[0]
        };
        assert_eq!(header_of(&[]), ARRAY_INT_BYTE);
        assert_eq!(header_of(&[1, 2, 3, 4]), ARRAY_INT_BYTE);
        assert_eq!(header_of(&[1, -300]), ARRAY_INT_SHORT);
        assert_eq!(header_of(&[1, 70_000]), ARRAY_INT_PACKED);
        assert_eq!(header_of(&[-1, 70_000]), ARRAY_INT);

        for items in [vec![], vec![1, -300], vec![0, i32::MAX], vec![i32::MIN, 5]] {
            let mut buf = Vec::new();
            write_ints(&mut buf, &items).unwrap();
            assert!(matches!(back(&buf).object(), Object::IntArray(b) if b[..] == items[..]));
        }
    }

    #[test]
    fn long_width_is_chosen_per_array() {
        let cases: [(&[i64], u8); 5] = [
            (&[3, -3], ARRAY_LONG_BYTE),
            (&[3, -3000], ARRAY_LONG_SHORT),
            (&[3, 1 << 40], ARRAY_LONG_PACKED),
            (&[-3, 1 << 20], ARRAY_LONG_INT),
            (&[-3, 1 << 40], ARRAY_LONG),
        ];
        for (items, expected) in cases {
            let mut buf = Vec::new();
            write_longs(&mut buf, items).unwrap();
            assert_eq!(buf[0], expected);
            assert!(matches!(back(&buf).object(), Object::LongArray(b) if b[..] == *items));
        }
    }
}
