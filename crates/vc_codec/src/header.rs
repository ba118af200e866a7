//! Header bytes.
//!
//! Every record of a stream starts with one header byte that selects how the
//! rest of the record is decoded. The values are part of the wire format and
//! never change.
//!
//! - `1..=3`: null and booleans.
//! - `4..=38`: `i32`, one byte for `-9..=16`, framed widths, full width.
//! - `39..=81`: `i64`, the same layout as `i32`.
//! - `82..=108`: `i8`, `char`, `i16`, `f32` and `f64`.
//! - `109..=124`: primitive arrays.
//! - `125..=136`: strings.
//! - `137..=142`: value types and user codecs.
//! - `159..=171`: singletons, object arrays and collections.
//! - `172..=176`: foreign streams, back-references and structural records.
//!
//! # Examples
//!
//! ```
//! use vc_codec::header;
//!
//! assert_eq!(header::INT_M9 + 9, header::INT_0);
//! assert_eq!(header::name(header::OBJECT_STACK), "OBJECT_STACK");
//! assert_eq!(header::name(200), "UNKNOWN");
//! ```

/// Never written, guards against reading zeroed or uninitialized buffers.
pub const ZERO_FAIL: u8 = 0;
pub const NULL: u8 = 1;
pub const BOOLEAN_TRUE: u8 = 2;
pub const BOOLEAN_FALSE: u8 = 3;
pub const INT_M9: u8 = 4;
pub const INT_M8: u8 = 5;
pub const INT_M7: u8 = 6;
pub const INT_M6: u8 = 7;
pub const INT_M5: u8 = 8;
pub const INT_M4: u8 = 9;
pub const INT_M3: u8 = 10;
pub const INT_M2: u8 = 11;
pub const INT_M1: u8 = 12;
pub const INT_0: u8 = 13;
pub const INT_1: u8 = 14;
pub const INT_2: u8 = 15;
pub const INT_3: u8 = 16;
pub const INT_4: u8 = 17;
pub const INT_5: u8 = 18;
pub const INT_6: u8 = 19;
pub const INT_7: u8 = 20;
pub const INT_8: u8 = 21;
pub const INT_9: u8 = 22;
pub const INT_10: u8 = 23;
pub const INT_11: u8 = 24;
pub const INT_12: u8 = 25;
pub const INT_13: u8 = 26;
pub const INT_14: u8 = 27;
pub const INT_15: u8 = 28;
pub const INT_16: u8 = 29;
pub const INT_MIN_VALUE: u8 = 30;
pub const INT_MAX_VALUE: u8 = 31;
pub const INT_MF1: u8 = 32;
pub const INT_F1: u8 = 33;
pub const INT_MF2: u8 = 34;
pub const INT_F2: u8 = 35;
pub const INT_MF3: u8 = 36;
pub const INT_F3: u8 = 37;
pub const INT: u8 = 38;
pub const LONG_M9: u8 = 39;
pub const LONG_M8: u8 = 40;
pub const LONG_M7: u8 = 41;
pub const LONG_M6: u8 = 42;
pub const LONG_M5: u8 = 43;
pub const LONG_M4: u8 = 44;
pub const LONG_M3: u8 = 45;
pub const LONG_M2: u8 = 46;
pub const LONG_M1: u8 = 47;
pub const LONG_0: u8 = 48;
pub const LONG_1: u8 = 49;
pub const LONG_2: u8 = 50;
pub const LONG_3: u8 = 51;
pub const LONG_4: u8 = 52;
pub const LONG_5: u8 = 53;
pub const LONG_6: u8 = 54;
pub const LONG_7: u8 = 55;
pub const LONG_8: u8 = 56;
pub const LONG_9: u8 = 57;
pub const LONG_10: u8 = 58;
pub const LONG_11: u8 = 59;
pub const LONG_12: u8 = 60;
pub const LONG_13: u8 = 61;
pub const LONG_14: u8 = 62;
pub const LONG_15: u8 = 63;
pub const LONG_16: u8 = 64;
pub const LONG_MIN_VALUE: u8 = 65;
pub const LONG_MAX_VALUE: u8 = 66;
pub const LONG_MF1: u8 = 67;
pub const LONG_F1: u8 = 68;
pub const LONG_MF2: u8 = 69;
pub const LONG_F2: u8 = 70;
pub const LONG_MF3: u8 = 71;
pub const LONG_F3: u8 = 72;
pub const LONG_MF4: u8 = 73;
pub const LONG_F4: u8 = 74;
pub const LONG_MF5: u8 = 75;
pub const LONG_F5: u8 = 76;
pub const LONG_MF6: u8 = 77;
pub const LONG_F6: u8 = 78;
pub const LONG_MF7: u8 = 79;
pub const LONG_F7: u8 = 80;
pub const LONG: u8 = 81;
pub const BYTE_M1: u8 = 82;
pub const BYTE_0: u8 = 83;
pub const BYTE_1: u8 = 84;
pub const BYTE: u8 = 85;
pub const CHAR_0: u8 = 86;
pub const CHAR_1: u8 = 87;
pub const CHAR_255: u8 = 88;
pub const CHAR: u8 = 89;
pub const SHORT_M1: u8 = 90;
pub const SHORT_0: u8 = 91;
pub const SHORT_1: u8 = 92;
pub const SHORT_255: u8 = 93;
pub const SHORT_M255: u8 = 94;
pub const SHORT: u8 = 95;
pub const FLOAT_M1: u8 = 96;
pub const FLOAT_0: u8 = 97;
pub const FLOAT_1: u8 = 98;
pub const FLOAT_255: u8 = 99;
pub const FLOAT_SHORT: u8 = 100;
pub const FLOAT: u8 = 101;
pub const DOUBLE_M1: u8 = 102;
pub const DOUBLE_0: u8 = 103;
pub const DOUBLE_1: u8 = 104;
pub const DOUBLE_255: u8 = 105;
pub const DOUBLE_SHORT: u8 = 106;
pub const DOUBLE_INT: u8 = 107;
pub const DOUBLE: u8 = 108;
pub const ARRAY_BYTE: u8 = 109;
pub const ARRAY_BYTE_ALL_EQUAL: u8 = 110;
pub const ARRAY_BOOLEAN: u8 = 111;
pub const ARRAY_SHORT: u8 = 112;
pub const ARRAY_CHAR: u8 = 113;
pub const ARRAY_FLOAT: u8 = 114;
pub const ARRAY_DOUBLE: u8 = 115;
pub const ARRAY_INT_BYTE: u8 = 116;
pub const ARRAY_INT_SHORT: u8 = 117;
pub const ARRAY_INT_PACKED: u8 = 118;
pub const ARRAY_INT: u8 = 119;
pub const ARRAY_LONG_BYTE: u8 = 120;
pub const ARRAY_LONG_SHORT: u8 = 121;
pub const ARRAY_LONG_PACKED: u8 = 122;
pub const ARRAY_LONG_INT: u8 = 123;
pub const ARRAY_LONG: u8 = 124;
pub const STRING_0: u8 = 125;
pub const STRING_1: u8 = 126;
pub const STRING_2: u8 = 127;
pub const STRING_3: u8 = 128;
pub const STRING_4: u8 = 129;
pub const STRING_5: u8 = 130;
pub const STRING_6: u8 = 131;
pub const STRING_7: u8 = 132;
pub const STRING_8: u8 = 133;
pub const STRING_9: u8 = 134;
pub const STRING_10: u8 = 135;
pub const STRING: u8 = 136;
pub const BIGDECIMAL: u8 = 137;
pub const BIGINTEGER: u8 = 138;
pub const CLASS: u8 = 139;
pub const DATE: u8 = 140;
pub const UUID: u8 = 141;
/// A user codec record, followed by the packed user id.
pub const USER_DESER: u8 = 142;
/// Followed by the packed index into the singleton table.
pub const SINGLETON: u8 = 159;
pub const ARRAY_OBJECT: u8 = 160;
pub const ARRAY_OBJECT_ALL_NULL: u8 = 161;
/// Decode only, the elements are read without reference tracking.
pub const ARRAY_OBJECT_NO_REFS: u8 = 162;
pub const ARRAYLIST: u8 = 163;
pub const TREEMAP: u8 = 164;
pub const HASHMAP: u8 = 165;
pub const LINKEDHASHMAP: u8 = 166;
pub const TREESET: u8 = 167;
pub const HASHSET: u8 = 168;
pub const LINKEDHASHSET: u8 = 169;
pub const LINKEDLIST: u8 = 170;
pub const PROPERTIES: u8 = 171;
/// The first byte of a stream written by a foreign object stream format, always rejected.
pub const JAVA_SERIALIZATION: u8 = 172;
/// A structural record whose class id refers to the configured catalog.
pub const POJO_RESOLVER: u8 = 173;
/// A back-reference, followed by the packed position of an earlier object.
pub const OBJECT_STACK: u8 = 174;
/// A structural record whose class id refers to the stream-local catalog.
pub const POJO: u8 = 175;
/// Embeds a class info into the stream-local catalog, the `POJO` record follows.
pub const POJO_CLASSINFO: u8 = 176;

/// The constant name of a header, `"UNKNOWN"` for unassigned values.
pub const fn name(header: u8) -> &'static str {
    match header {
        ZERO_FAIL => "ZERO_FAIL",
        NULL => "NULL",
        BOOLEAN_TRUE => "BOOLEAN_TRUE",
        BOOLEAN_FALSE => "BOOLEAN_FALSE",
        INT_M9 => "INT_M9",
        INT_M8 => "INT_M8",
        INT_M7 => "INT_M7",
        INT_M6 => "INT_M6",
        INT_M5 => "INT_M5",
        INT_M4 => "INT_M4",
        INT_M3 => "INT_M3",
        INT_M2 => "INT_M2",
        INT_M1 => "INT_M1",
        INT_0 => "INT_0",
        INT_1 => "INT_1",
        INT_2 => "INT_2",
        INT_3 => "INT_3",
        INT_4 => "INT_4",
        INT_5 => "INT_5",
        INT_6 => "INT_6",
        INT_7 => "INT_7",
        INT_8 => "INT_8",
        INT_9 => "INT_9",
        INT_10 => "INT_10",
        INT_11 => "INT_11",
        INT_12 => "INT_12",
        INT_13 => "INT_13",
        INT_14 => "INT_14",
        INT_15 => "INT_15",
        INT_16 => "INT_16",
        INT_MIN_VALUE => "INT_MIN_VALUE",
        INT_MAX_VALUE => "INT_MAX_VALUE",
        INT_MF1 => "INT_MF1",
        INT_F1 => "INT_F1",
        INT_MF2 => "INT_MF2",
        INT_F2 => "INT_F2",
        INT_MF3 => "INT_MF3",
        INT_F3 => "INT_F3",
        INT => "INT",
        LONG_M9 => "LONG_M9",
        LONG_M8 => "LONG_M8",
        LONG_M7 => "LONG_M7",
        LONG_M6 => "LONG_M6",
        LONG_M5 => "LONG_M5",
        LONG_M4 => "LONG_M4",
        LONG_M3 => "LONG_M3",
        LONG_M2 => "LONG_M2",
        LONG_M1 => "LONG_M1",
        LONG_0 => "LONG_0",
        LONG_1 => "LONG_1",
        LONG_2 => "LONG_2",
        LONG_3 => "LONG_3",
        LONG_4 => "LONG_4",
        LONG_5 => "LONG_5",
        LONG_6 => "LONG_6",
        LONG_7 => "LONG_7",
        LONG_8 => "LONG_8",
        LONG_9 => "LONG_9",
        LONG_10 => "LONG_10",
        LONG_11 => "LONG_11",
        LONG_12 => "LONG_12",
        LONG_13 => "LONG_13",
        LONG_14 => "LONG_14",
        LONG_15 => "LONG_15",
        LONG_16 => "LONG_16",
        LONG_MIN_VALUE => "LONG_MIN_VALUE",
        LONG_MAX_VALUE => "LONG_MAX_VALUE",
        LONG_MF1 => "LONG_MF1",
        LONG_F1 => "LONG_F1",
        LONG_MF2 => "LONG_MF2",
        LONG_F2 => "LONG_F2",
        LONG_MF3 => "LONG_MF3",
        LONG_F3 => "LONG_F3",
        LONG_MF4 => "LONG_MF4",
        LONG_F4 => "LONG_F4",
        LONG_MF5 => "LONG_MF5",
        LONG_F5 => "LONG_F5",
        LONG_MF6 => "LONG_MF6",
        LONG_F6 => "LONG_F6",
        LONG_MF7 => "LONG_MF7",
        LONG_F7 => "LONG_F7",
        LONG => "LONG",
        BYTE_M1 => "BYTE_M1",
        BYTE_0 => "BYTE_0",
        BYTE_1 => "BYTE_1",
        BYTE => "BYTE",
        CHAR_0 => "CHAR_0",
        CHAR_1 => "CHAR_1",
        CHAR_255 => "CHAR_255",
        CHAR => "CHAR",
        SHORT_M1 => "SHORT_M1",
        SHORT_0 => "SHORT_0",
        SHORT_1 => "SHORT_1",
        SHORT_255 => "SHORT_255",
        SHORT_M255 => "SHORT_M255",
        SHORT => "SHORT",
        FLOAT_M1 => "FLOAT_M1",
        FLOAT_0 => "FLOAT_0",
        FLOAT_1 => "FLOAT_1",
        FLOAT_255 => "FLOAT_255",
        FLOAT_SHORT => "FLOAT_SHORT",
        FLOAT => "FLOAT",
        DOUBLE_M1 => "DOUBLE_M1",
        DOUBLE_0 => "DOUBLE_0",
        DOUBLE_1 => "DOUBLE_1",
        DOUBLE_255 => "DOUBLE_255",
        DOUBLE_SHORT => "DOUBLE_SHORT",
        DOUBLE_INT => "DOUBLE_INT",
        DOUBLE => "DOUBLE",
        ARRAY_BYTE => "ARRAY_BYTE",
        ARRAY_BYTE_ALL_EQUAL => "ARRAY_BYTE_ALL_EQUAL",
        ARRAY_BOOLEAN => "ARRAY_BOOLEAN",
        ARRAY_SHORT => "ARRAY_SHORT",
        ARRAY_CHAR => "ARRAY_CHAR",
        ARRAY_FLOAT => "ARRAY_FLOAT",
        ARRAY_DOUBLE => "ARRAY_DOUBLE",
        ARRAY_INT_BYTE => "ARRAY_INT_BYTE",
        ARRAY_INT_SHORT => "ARRAY_INT_SHORT",
        ARRAY_INT_PACKED => "ARRAY_INT_PACKED",
        ARRAY_INT => "ARRAY_INT",
        ARRAY_LONG_BYTE => "ARRAY_LONG_BYTE",
        ARRAY_LONG_SHORT => "ARRAY_LONG_SHORT",
        ARRAY_LONG_PACKED => "ARRAY_LONG_PACKED",
        ARRAY_LONG_INT => "ARRAY_LONG_INT",
        ARRAY_LONG => "ARRAY_LONG",
        STRING_0 => "STRING_0",
        STRING_1 => "STRING_1",
        STRING_2 => "STRING_2",
        STRING_3 => "STRING_3",
        STRING_4 => "STRING_4",
        STRING_5 => "STRING_5",
        STRING_6 => "STRING_6",
        STRING_7 => "STRING_7",
        STRING_8 => "STRING_8",
        STRING_9 => "STRING_9",
        STRING_10 => "STRING_10",
        STRING => "STRING",
        BIGDECIMAL => "BIGDECIMAL",
        BIGINTEGER => "BIGINTEGER",
        CLASS => "CLASS",
        DATE => "DATE",
        UUID => "UUID",
        USER_DESER => "USER_DESER",
        SINGLETON => "SINGLETON",
        ARRAY_OBJECT => "ARRAY_OBJECT",
        ARRAY_OBJECT_ALL_NULL => "ARRAY_OBJECT_ALL_NULL",
        ARRAY_OBJECT_NO_REFS => "ARRAY_OBJECT_NO_REFS",
        ARRAYLIST => "ARRAYLIST",
        TREEMAP => "TREEMAP",
        HASHMAP => "HASHMAP",
        LINKEDHASHMAP => "LINKEDHASHMAP",
        TREESET => "TREESET",
        HASHSET => "HASHSET",
        LINKEDHASHSET => "LINKEDHASHSET",
        LINKEDLIST => "LINKEDLIST",
        PROPERTIES => "PROPERTIES",
        JAVA_SERIALIZATION => "JAVA_SERIALIZATION",
        POJO_RESOLVER => "POJO_RESOLVER",
        OBJECT_STACK => "OBJECT_STACK",
        POJO => "POJO",
        POJO_CLASSINFO => "POJO_CLASSINFO",
        _ => "UNKNOWN",
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framed_layout() {
        // Negative widths sit right below the positive ones.
        assert_eq!(INT_MF1 + 1, INT_F1);
        assert_eq!(INT_F1 + 2, INT_F2);
        assert_eq!(INT_F3 + 1, INT);
        assert_eq!(LONG_MF1 + 1, LONG_F1);
        assert_eq!(LONG_F7 + 1, LONG);
        assert_eq!(STRING_0 + 10, STRING_10);
    }

    #[test]
    fn names() {
        assert_eq!(name(ZERO_FAIL), "ZERO_FAIL");
        assert_eq!(name(INT_M9), "INT_M9");
        assert_eq!(name(LONG_16), "LONG_16");
        assert_eq!(name(POJO_CLASSINFO), "POJO_CLASSINFO");
        assert_eq!(name(150), "UNKNOWN");
    }
}
