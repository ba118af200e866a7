use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use super::{BigDecimal, BigInteger, Obj, Object, Uuid};

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl From<$ty> for Object {
            #[inline]
            fn from(value: $ty) -> Self {
                Object::$variant(value.into())
            }
        }

        impl From<$ty> for Obj {
            #[inline]
            fn from(value: $ty) -> Self {
                Obj::new(Object::from(value))
            }
        }
    )*};
}

impl_from! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    &str => String,
    BigInteger => BigInteger,
    BigDecimal => BigDecimal,
    Uuid => Uuid,
    Vec<bool> => BooleanArray,
    Vec<u8> => ByteArray,
    Vec<i16> => ShortArray,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
    Vec<f32> => FloatArray,
    Vec<f64> => DoubleArray,
    Box<[bool]> => BooleanArray,
    Box<[u8]> => ByteArray,
    Box<[i16]> => ShortArray,
    Box<[i32]> => IntArray,
    Box<[i64]> => LongArray,
    Box<[f32]> => FloatArray,
    Box<[f64]> => DoubleArray,
}

// `u16` is ambiguous between a short and a code unit, so chars convert from
// `char` and arrays of units through `Object::CharArray` directly.
impl From<char> for Obj {
    /// Characters outside the Basic Multilingual Plane keep only their
    /// leading surrogate.
    #[inline]
    fn from(value: char) -> Self {
        let mut units = [0_u16; 2];
        Obj::char_unit(value.encode_utf16(&mut units)[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_variants() {
        assert!(matches!(Obj::from(3_i8).object(), Object::Byte(3)));
        assert!(matches!(Obj::from(3_i64).object(), Object::Long(3)));
        assert!(matches!(Obj::from('x').object(), Object::Char(0x78)));
        assert_eq!(Obj::from("s").as_str(), Some("s"));
        assert!(matches!(
            Obj::from(alloc::vec![1_u8, 2]).object(),
            Object::ByteArray(b) if &b[..] == [1, 2]
        ));
    }
}
