//! Value types with a fixed layout: big numbers, class references, dates
//! and UUIDs.

use std::io::Write;

use vc_reflect::object::{BigDecimal, BigInteger, Uuid};
use vc_reflect::{Obj, Value};

use crate::decoder::Decoder;
use crate::error::Result;
use crate::header::{BIGDECIMAL, BIGINTEGER, CLASS, DATE, UUID};
use crate::io::{ReadBytes, WriteBytes};

fn write_magnitude<W: Write + ?Sized>(out: &mut W, value: &BigInteger) -> Result<()> {
    let bytes = value.to_bytes_be();
    out.pack_len(bytes.len())?;
    out.write_all(bytes)?;
    Ok(())
}

fn read_magnitude(dec: &mut Decoder<'_>) -> Result<BigInteger> {
    let len = dec.unpack_u32()? as usize;
    let bytes = dec.read_bytes(len)?;
    Ok(BigInteger::from_bytes_be(&bytes))
}

pub(crate) fn write_big_integer<W: Write + ?Sized>(out: &mut W, value: &BigInteger) -> Result<()> {
    out.write_u8(BIGINTEGER)?;
    write_magnitude(out, value)
}

pub(crate) fn decode_big_integer(dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    Ok(Some(Obj::from(read_magnitude(dec)?)))
}

/// The unscaled value, then the scale as a packed two's complement `u32`.
pub(crate) fn write_big_decimal<W: Write + ?Sized>(out: &mut W, value: &BigDecimal) -> Result<()> {
    out.write_u8(BIGDECIMAL)?;
    write_magnitude(out, &value.unscaled)?;
    out.pack_u32(value.scale as u32)
}

pub(crate) fn decode_big_decimal(dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    let unscaled = read_magnitude(dec)?;
    let scale = dec.unpack_u32()? as i32;
    Ok(Some(Obj::from(BigDecimal::new(unscaled, scale))))
}

pub(crate) fn write_class<W: Write + ?Sized>(out: &mut W, name: &str) -> Result<()> {
    out.write_u8(CLASS)?;
    out.write_utf(name)
}

/// The name must denote a type this process knows.
pub(crate) fn decode_class(dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    let name = dec.read_utf()?;
    super::resolve_type_name(dec.serializer(), &name)?;
    Ok(Some(Obj::class(name)))
}

pub(crate) fn write_date<W: Write + ?Sized>(out: &mut W, millis: i64) -> Result<()> {
    out.write_u8(DATE)?;
    out.write_i64(millis)
}

pub(crate) fn decode_date(dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    Ok(Some(Obj::date(dec.read_i64()?)))
}

/// Most significant half first.
pub(crate) fn write_uuid<W: Write + ?Sized>(out: &mut W, uuid: &Uuid) -> Result<()> {
    let bits = uuid.as_u128();
    out.write_u8(UUID)?;
    out.write_i64((bits >> 64) as i64)?;
    out.write_i64(bits as i64)
}

pub(crate) fn decode_uuid(dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    let msb = dec.read_i64()? as u64 as u128;
    let lsb = dec.read_i64()? as u64 as u128;
    Ok(Some(Obj::from(Uuid::from_u128((msb << 64) | lsb))))
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::Serializer;
    use crate::error::SerialError;
    use vc_reflect::Object;

    #[test]
    fn negative_scale_round_trips() {
        let value = BigDecimal::new(BigInteger::from(-12_345_i64), -3);
        let mut buf = Vec::new();
        write_big_decimal(&mut buf, &value).unwrap();
        let back = Serializer::default().from_bytes(&buf).unwrap().unwrap();
        assert!(matches!(back.object(), Object::BigDecimal(d) if *d == value));
    }

    #[test]
    fn uuid_halves() {
        let uuid = Uuid::from_u128(0x0102_0304_0506_0708_090A_0B0C_0D0E_0F10);
        let mut buf = Vec::new();
        write_uuid(&mut buf, &uuid).unwrap();
        assert_eq!(&buf[1..3], &[0x01, 0x02]);
        assert_eq!(buf[16], 0x10);
        let back = Serializer::default().from_bytes(&buf).unwrap().unwrap();
        assert!(matches!(back.object(), Object::Uuid(u) if *u == uuid));
    }

    #[test]
    fn unknown_class_names_fail() {
        let serializer = Serializer::default();
        let mut buf = Vec::new();
        write_class(&mut buf, "ArrayList").unwrap();
        let back = serializer.from_bytes(&buf).unwrap().unwrap();
        assert!(matches!(back.object(), Object::Class(name) if name == "ArrayList"));

        let mut buf = Vec::new();
        write_class(&mut buf, "demo.Nowhere").unwrap();
        let err = serializer.from_bytes(&buf).unwrap_err();
        assert!(matches!(err, SerialError::TypeNotFound { type_name } if type_name == "demo.Nowhere"));
    }
}
