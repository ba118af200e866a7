use alloc::borrow::Cow;
use alloc::string::String;
use std::io;

use thiserror::Error;
use vc_reflect::FieldError;

// -----------------------------------------------------------------------------
// SerialError

/// A failure while writing or reading a stream.
///
/// Nothing is retried and no partially decoded object is returned, the
/// stream is assumed untrustworthy once an error was produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerialError {
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    #[error("Zero Header, data corrupted")]
    ZeroHeader,

    #[error("Wrong header, data were probably written with a foreign serialization format")]
    ForeignFormat,

    #[error("Unknown serialization header: {0}")]
    UnknownHeader(u8),

    #[error("Packed integer has too many groups or overflows its type")]
    MalformedVarint,

    #[error("Length {0} does not fit in a packed u32")]
    LengthOverflow(usize),

    #[error("Repeated-value array of length {len} exceeds the limit of {limit}")]
    FillLimit { len: usize, limit: usize },

    #[error("Invalid string data")]
    InvalidString,

    #[error("Could not serialize unknown object: {type_name}")]
    UnsupportedType { type_name: Cow<'static, str> },

    #[error("Type `{type_name}` is not registered")]
    TypeNotFound { type_name: String },

    #[error("No class info with id {0}")]
    UnknownClassId(u32),

    #[error("Wrong stream class info order, expected id {expected}, found {found}")]
    ClassInfoOrder { expected: u32, found: u32 },

    #[error("Type `{type_name}` has no field `{field}`")]
    FieldMismatch { type_name: String, field: String },

    #[error("Type `{type_name}` does not match the shape written to the stream")]
    KindMismatch { type_name: String },

    #[error("Field assignment failed: {0}")]
    Field(#[from] FieldError),

    #[error("Expected a structural record, found header {header}")]
    NotAStruct { header: u8 },

    #[error("Type `{type_name}` uses a foreign object stream encoding")]
    ForeignEncoding { type_name: String },

    #[error("Unknown singleton {0}, data corrupted")]
    UnknownSingleton(u32),

    #[error("No user deserializer defined for user header {0}")]
    UnknownUserHeader(u32),

    #[error("Back-reference {0} points outside the object stack")]
    BackReference(u32),

    #[error("Enum `{type_name}` has no constant with ordinal {ordinal}")]
    UnknownEnumOrdinal { type_name: String, ordinal: u32 },

    #[error("{0}")]
    User(String),
}

/// Shorthand of `Result<T, SerialError>`.
pub type Result<T, E = SerialError> = core::result::Result<T, E>;

// -----------------------------------------------------------------------------
// ConfigError

/// A rejected [`SerializerBuilder`](crate::SerializerBuilder) setting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Type `{type_name}` already has an encoder registered")]
    DuplicateEncoder { type_name: &'static str },

    #[error("Deserializer for user header {0} is already registered")]
    DuplicateDecoder(u32),

    #[error("The user ids of encoders and decoders differ")]
    MismatchedUserCodecs,

    #[error("Class `{type_name}` is in the catalog but its type is not registered")]
    TypeNotRegistered { type_name: String },
}
