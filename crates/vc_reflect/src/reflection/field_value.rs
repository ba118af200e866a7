use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::object::{BigDecimal, BigInteger, Obj, Object, Uuid, Value};
use crate::reflection::FieldError;

// -----------------------------------------------------------------------------
// FieldValue

/// Conversion between a Rust field type and a [`Value`].
///
/// Derived [`Reflect`](crate::Reflect) implementations go through this trait
/// for every field.
///
/// # Examples
///
/// ```
/// use vc_reflect::{FieldError, FieldValue, Obj};
///
/// assert_eq!(i32::from_value(&Some(Obj::from(5))), Ok(5));
/// assert!(matches!(i32::from_value(&None), Err(FieldError::Null { .. })));
///
/// let text: Option<String> = FieldValue::from_value(&None).unwrap();
/// assert_eq!(text, None);
/// ```
pub trait FieldValue: Sized {
    /// The wire name of the type, recorded in [`FieldInfo`](crate::info::FieldInfo).
    const TYPE_NAME: &'static str;

    /// Primitive fields cannot hold null.
    const PRIMITIVE: bool = false;

    fn to_value(&self) -> Value;

    fn from_value(value: &Value) -> Result<Self, FieldError>;
}

#[inline]
fn mismatch(expected: &'static str, obj: &Obj) -> FieldError {
    FieldError::TypeMismatch {
        expected,
        found: obj.kind_name(),
    }
}

#[inline]
fn non_null<'a>(expected: &'static str, value: &'a Value) -> Result<&'a Obj, FieldError> {
    value.as_ref().ok_or(FieldError::Null { expected })
}

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident, $name:literal;)*) => {$(
        impl FieldValue for $ty {
            const TYPE_NAME: &'static str = $name;
            const PRIMITIVE: bool = true;

            #[inline]
            fn to_value(&self) -> Value {
                Some(Obj::new(Object::$variant(*self)))
            }

            fn from_value(value: &Value) -> Result<Self, FieldError> {
                let obj = non_null($name, value)?;
                match obj.object() {
                    Object::$variant(v) => Ok(*v),
                    _ => Err(mismatch($name, obj)),
                }
            }
        }
    )*};
}

impl_scalar! {
    bool => Bool, "bool";
    i8 => Byte, "i8";
    i16 => Short, "i16";
    u16 => Char, "char";
    i32 => Int, "i32";
    i64 => Long, "i64";
    f32 => Float, "f32";
    f64 => Double, "f64";
}

macro_rules! impl_array {
    ($($elem:ty => $variant:ident, $name:literal;)*) => {$(
        impl FieldValue for Vec<$elem> {
            const TYPE_NAME: &'static str = $name;

            #[inline]
            fn to_value(&self) -> Value {
                Some(Obj::new(Object::$variant(self.clone().into_boxed_slice())))
            }

            fn from_value(value: &Value) -> Result<Self, FieldError> {
                let obj = non_null($name, value)?;
                match obj.object() {
                    Object::$variant(v) => Ok(v.to_vec()),
                    _ => Err(mismatch($name, obj)),
                }
            }
        }
    )*};
}

impl_array! {
    bool => BooleanArray, "[bool]";
    u8 => ByteArray, "[u8]";
    i16 => ShortArray, "[i16]";
    u16 => CharArray, "[char]";
    i32 => IntArray, "[i32]";
    i64 => LongArray, "[i64]";
    f32 => FloatArray, "[f32]";
    f64 => DoubleArray, "[f64]";
}

macro_rules! impl_cloned {
    ($($ty:ty => $variant:ident, $name:literal;)*) => {$(
        impl FieldValue for $ty {
            const TYPE_NAME: &'static str = $name;

            #[inline]
            fn to_value(&self) -> Value {
                Some(Obj::new(Object::$variant(self.clone())))
            }

            fn from_value(value: &Value) -> Result<Self, FieldError> {
                let obj = non_null($name, value)?;
                match obj.object() {
                    Object::$variant(v) => Ok(v.clone()),
                    _ => Err(mismatch($name, obj)),
                }
            }
        }
    )*};
}

impl_cloned! {
    String => String, "String";
    Uuid => Uuid, "Uuid";
    BigInteger => BigInteger, "BigInteger";
    BigDecimal => BigDecimal, "BigDecimal";
}

/// Any object, the handle is shared rather than copied.
impl FieldValue for Obj {
    const TYPE_NAME: &'static str = "Object";

    #[inline]
    fn to_value(&self) -> Value {
        Some(self.clone())
    }

    #[inline]
    fn from_value(value: &Value) -> Result<Self, FieldError> {
        non_null(Self::TYPE_NAME, value).cloned()
    }
}

/// A nullable field.
impl<T: FieldValue> FieldValue for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    #[inline]
    fn to_value(&self) -> Value {
        self.as_ref().and_then(T::to_value)
    }

    #[inline]
    fn from_value(value: &Value) -> Result<Self, FieldError> {
        match value {
            None => Ok(None),
            Some(_) => T::from_value(value).map(Some),
        }
    }
}

impl FieldValue for Cow<'static, str> {
    const TYPE_NAME: &'static str = "String";

    #[inline]
    fn to_value(&self) -> Value {
        Some(Obj::from(String::from(&**self)))
    }

    #[inline]
    fn from_value(value: &Value) -> Result<Self, FieldError> {
        String::from_value(value).map(Cow::Owned)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn scalars_reject_other_kinds() {
        let err = i64::from_value(&Some(Obj::from(1_i32))).unwrap_err();
        assert_eq!(
            err,
            FieldError::TypeMismatch {
                expected: "i64",
                found: Cow::Borrowed("i32"),
            }
        );
        assert_eq!(u16::from_value(&Some(Obj::from('a'))), Ok(97));
    }

    #[test]
    fn arrays_copy_out() {
        let value = vec![1_i32, 2, 3].to_value();
        assert_eq!(Vec::<i32>::from_value(&value), Ok(vec![1, 2, 3]));
        assert!(!Vec::<i32>::PRIMITIVE);
        assert!(matches!(Vec::<u8>::from_value(&None), Err(FieldError::Null { .. })));
    }

    #[test]
    fn nullable_fields() {
        assert_eq!(Option::<i32>::from_value(&None), Ok(None));
        assert_eq!(Option::<i32>::from_value(&Some(Obj::from(3))), Ok(Some(3)));
        assert_eq!(Option::<String>::TYPE_NAME, "String");
        assert!(!Option::<i32>::PRIMITIVE);

        let shared = Obj::from("x");
        let back = Value::from_value(&Some(shared.clone())).unwrap().unwrap();
        assert!(Obj::ptr_eq(&shared, &back));
    }
}
