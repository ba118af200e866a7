//! Built-in codecs.
//!
//! Encoding dispatches on the [`Object`] variant. Decoding is table driven:
//! [`DECODERS`] holds one function per header byte, headers of one family
//! share a function that tells them apart by the header it is given.

// -----------------------------------------------------------------------------
// Modules

mod array;
mod collection;
mod number;
mod string;
mod value;

// -----------------------------------------------------------------------------
// Encode

use vc_reflect::{Obj, Object, Value};

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{Result, SerialError};
use crate::header::*;
use crate::io::{ReadBytes, WriteBytes};
use crate::serializer::Serializer;
use crate::{pojo, user};

/// Elements reserved up front when a length comes from the stream, a larger
/// container grows as its elements arrive.
const PREALLOCATE: usize = 1024;

/// Longest array written as a single repeated value.
///
/// Such arrays cost a few bytes regardless of their length, longer ones are
/// written element by element and rejected when read.
pub(crate) const FILL_LIMIT: usize = 1 << 16;

/// Writes `obj` with its built-in codec, or through the structural path.
pub(crate) fn encode(enc: &mut Encoder<'_>, obj: &Obj) -> Result<()> {
    match obj.object() {
        Object::Bool(v) => enc.write_u8(if *v { BOOLEAN_TRUE } else { BOOLEAN_FALSE }),
        Object::Byte(v) => number::write_byte(enc, *v),
        Object::Short(v) => number::write_short(enc, *v),
        Object::Char(v) => number::write_char(enc, *v),
        Object::Int(v) => number::write_int(enc, *v),
        Object::Long(v) => number::write_long(enc, *v),
        Object::Float(v) => number::write_float(enc, *v),
        Object::Double(v) => number::write_double(enc, *v),
        Object::String(v) => string::write_string(enc, v),
        Object::BigInteger(v) => value::write_big_integer(enc, v),
        Object::BigDecimal(v) => value::write_big_decimal(enc, v),
        Object::Class(v) => value::write_class(enc, v),
        Object::Date(v) => value::write_date(enc, *v),
        Object::Uuid(v) => value::write_uuid(enc, v),
        Object::BooleanArray(v) => array::write_booleans(enc, v),
        Object::ByteArray(v) => array::write_bytes(enc, v),
        Object::ShortArray(v) => array::write_shorts(enc, v),
        Object::CharArray(v) => array::write_chars(enc, v),
        Object::IntArray(v) => array::write_ints(enc, v),
        Object::LongArray(v) => array::write_longs(enc, v),
        Object::FloatArray(v) => array::write_floats(enc, v),
        Object::DoubleArray(v) => array::write_doubles(enc, v),
        Object::ObjectArray(v) => collection::write_object_array(enc, v),
        Object::List(v) => collection::write_list(enc, v),
        Object::Set(v) => collection::write_set(enc, v),
        Object::Map(v) => collection::write_map(enc, v),
        Object::Struct(cell) => pojo::encode(enc, cell),
        Object::Opaque(v) => Err(SerialError::UnsupportedType {
            type_name: v.type_name().into(),
        }),
    }
}

// -----------------------------------------------------------------------------
// Type names

/// Names of the built-in kinds, as used for class references and object
/// array components.
const BUILTIN_NAMES: &[&str] = &[
    "Object", "bool", "i8", "i16", "char", "i32", "i64", "f32", "f64", "String",
    "BigInteger", "BigDecimal", "Class", "Date", "Uuid",
    "[bool]", "[u8]", "[i16]", "[char]", "[i32]", "[i64]", "[f32]", "[f64]", "[Object]",
    "ArrayList", "LinkedList", "HashSet", "LinkedHashSet", "TreeSet",
    "HashMap", "LinkedHashMap", "TreeMap", "Properties",
];

/// Fails with [`SerialError::TypeNotFound`] unless `name` is a built-in
/// kind or a registered type.
pub(crate) fn resolve_type_name(serializer: &Serializer, name: &str) -> Result<()> {
    if BUILTIN_NAMES.contains(&name) || serializer.type_registry().read().contains_name(name) {
        Ok(())
    } else {
        Err(SerialError::TypeNotFound {
            type_name: name.into(),
        })
    }
}

/// Fails with [`SerialError::FillLimit`] when a repeated-value array read
/// from the stream is longer than [`FILL_LIMIT`].
fn check_fill(len: usize) -> Result<()> {
    if len > FILL_LIMIT {
        return Err(SerialError::FillLimit {
            len,
            limit: FILL_LIMIT,
        });
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Decode

type HeaderDecoder = fn(&mut Decoder<'_>, u8) -> Result<Value>;

/// The decoder of every header byte.
pub(crate) static DECODERS: [HeaderDecoder; 256] = decoders();

const fn fill(table: &mut [HeaderDecoder; 256], first: u8, last: u8, f: HeaderDecoder) {
    let mut tag = first as usize;
    while tag <= last as usize {
        table[tag] = f;
        tag += 1;
    }
}

const fn decoders() -> [HeaderDecoder; 256] {
    let mut table: [HeaderDecoder; 256] = [decode_unknown; 256];
    table[ZERO_FAIL as usize] = decode_zero;
    table[NULL as usize] = decode_null;
    fill(&mut table, BOOLEAN_TRUE, BOOLEAN_FALSE, decode_bool);
    fill(&mut table, INT_M9, INT, number::decode_int);
    fill(&mut table, LONG_M9, LONG, number::decode_long);
    fill(&mut table, BYTE_M1, BYTE, number::decode_byte);
    fill(&mut table, CHAR_0, CHAR, number::decode_char);
    fill(&mut table, SHORT_M1, SHORT, number::decode_short);
    fill(&mut table, FLOAT_M1, FLOAT, number::decode_float);
    fill(&mut table, DOUBLE_M1, DOUBLE, number::decode_double);
    fill(&mut table, ARRAY_BYTE, ARRAY_BYTE_ALL_EQUAL, array::decode_bytes);
    table[ARRAY_BOOLEAN as usize] = array::decode_booleans;
    table[ARRAY_SHORT as usize] = array::decode_shorts;
    table[ARRAY_CHAR as usize] = array::decode_chars;
    table[ARRAY_FLOAT as usize] = array::decode_floats;
    table[ARRAY_DOUBLE as usize] = array::decode_doubles;
    fill(&mut table, ARRAY_INT_BYTE, ARRAY_INT, array::decode_ints);
    fill(&mut table, ARRAY_LONG_BYTE, ARRAY_LONG, array::decode_longs);
    fill(&mut table, STRING_0, STRING, string::decode_string);
    table[BIGDECIMAL as usize] = value::decode_big_decimal;
    table[BIGINTEGER as usize] = value::decode_big_integer;
    table[CLASS as usize] = value::decode_class;
    table[DATE as usize] = value::decode_date;
    table[UUID as usize] = value::decode_uuid;
    table[USER_DESER as usize] = decode_user;
    table[SINGLETON as usize] = decode_singleton;
    fill(&mut table, ARRAY_OBJECT, ARRAY_OBJECT_NO_REFS, collection::decode_object_array);
    table[ARRAYLIST as usize] = collection::decode_list;
    fill(&mut table, TREEMAP, LINKEDHASHMAP, collection::decode_map);
    fill(&mut table, TREESET, LINKEDHASHSET, collection::decode_set);
    table[LINKEDLIST as usize] = collection::decode_list;
    table[PROPERTIES as usize] = collection::decode_map;
    table[JAVA_SERIALIZATION as usize] = decode_foreign;
    table[POJO_RESOLVER as usize] = pojo::decode;
    table[OBJECT_STACK as usize] = decode_back_reference;
    table[POJO as usize] = pojo::decode;
    table[POJO_CLASSINFO as usize] = pojo::decode_class_info;
    table
}

fn decode_unknown(_dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    Err(SerialError::UnknownHeader(tag))
}

fn decode_zero(_dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    log::error!("zero header in stream, data corrupted");
    Err(SerialError::ZeroHeader)
}

fn decode_foreign(_dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    log::error!("stream was written with a foreign serialization format");
    Err(SerialError::ForeignFormat)
}

fn decode_null(_dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    Ok(None)
}

fn decode_bool(_dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    Ok(Some(Obj::from(tag == BOOLEAN_TRUE)))
}

fn decode_back_reference(dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    let idx = dec.unpack_u32()?;
    dec.stack().get(idx as usize).map(Some)
}

fn decode_singleton(dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    let idx = dec.unpack_u32()?;
    match dec.serializer().singleton(idx) {
        Some(obj) => Ok(Some(obj.clone())),
        None => Err(SerialError::UnknownSingleton(idx)),
    }
}

/// The slot is reserved before the user decoder runs, values it reads come
/// after the user value on the stack, as they did when writing.
fn decode_user(dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    let id = dec.unpack_u32()?;
    let serializer = dec.serializer();
    let decode: &user::DecodeFn = serializer
        .user_codecs()
        .decoder(id)
        .ok_or(SerialError::UnknownUserHeader(id))?;
    let slot = dec.stack().reserve();
    let obj = decode(dec)?;
    dec.stack().fill(slot, obj.clone());
    Ok(Some(obj))
}
