//! Strings.
//!
//! Text is written as UTF-16 code units, each one a packed integer, so short
//! ASCII strings cost one byte per character. The length counts code units
//! and is folded into the header up to ten.

use alloc::string::String;
use alloc::vec::Vec;
use std::io::Write;

use vc_reflect::{Obj, Value};

use crate::decoder::Decoder;
use crate::error::{Result, SerialError};
use crate::header::{STRING, STRING_0, STRING_10};
use crate::io::{ReadBytes, WriteBytes};

pub(crate) fn write_string<W: Write + ?Sized>(out: &mut W, text: &str) -> Result<()> {
    let units: Vec<u16> = text.encode_utf16().collect();
    let len = units.len();
    if len <= (STRING_10 - STRING_0) as usize {
        out.write_u8(STRING_0 + len as u8)?;
    } else {
        out.write_u8(STRING)?;
        out.pack_len(len)?;
    }
    for unit in units {
        out.pack_u32(unit as u32)?;
    }
    Ok(())
}

pub(crate) fn decode_string(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let len = match tag {
        STRING => dec.unpack_u32()? as usize,
        _ => (tag - STRING_0) as usize,
    };
    let mut units = Vec::with_capacity(len.min(super::PREALLOCATE));
    for _ in 0..len {
        let unit = u16::try_from(dec.unpack_u32()?).map_err(|_| SerialError::InvalidString)?;
        units.push(unit);
    }
    let text = String::from_utf16(&units).map_err(|_| SerialError::InvalidString)?;
    Ok(Some(Obj::from(text)))
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::Serializer;

    fn bytes(text: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        write_string(&mut buf, text).unwrap();
        buf
    }

    #[test]
    fn length_in_header() {
        assert_eq!(bytes(""), [STRING_0]);
        assert_eq!(bytes("ab"), [STRING_0 + 2, 0xE1, 0xE2]);
        assert_eq!(bytes("0123456789")[0], STRING_10);

        let long = bytes("01234567890");
        assert_eq!(&long[..2], &[STRING, 0x8B]);
    }

    #[test]
    fn wide_chars() {
        let serializer = Serializer::default();
        for text in ["Hello World", "żółw", "🦀 crab", ""] {
            let back = serializer.from_bytes(&bytes(text)).unwrap().unwrap();
            assert_eq!(back.as_str(), Some(text));
        }
    }

    #[test]
    fn lone_surrogate_is_rejected() {
        let data = [STRING_0 + 1, 0x03, 0x30, 0x80];
        let err = Serializer::default().from_bytes(&data).unwrap_err();
        assert!(matches!(err, SerialError::InvalidString));
    }
}
