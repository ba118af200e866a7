use alloc::borrow::Cow;
use alloc::string::String;
use core::{error, fmt};

/// A failure to read or assign a field through [`Reflect`](crate::Reflect).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FieldError {
    /// The field id is out of range.
    NoSuchField(usize),
    /// Null was assigned to a field that cannot hold it.
    Null { expected: &'static str },
    /// The value has the wrong kind for the field.
    TypeMismatch {
        expected: &'static str,
        found: Cow<'static, str>,
    },
    /// Rejected by a custom hook, see [`Externalize`](crate::Externalize).
    Invalid(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchField(id) => write!(f, "no field with id {id}"),
            Self::Null { expected } => {
                write!(f, "null assigned to a non-nullable `{expected}` field")
            }
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected `{expected}`, found `{found}`")
            }
            Self::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl error::Error for FieldError {}
