//! Object arrays, lists, sets and maps.
//!
//! A container is published on the decode stack before its elements are
//! read, so elements can refer back to it.

use alloc::vec::Vec;

use vc_reflect::object::{ListKind, ListObj, MapKind, MapObj, ObjectArray, SetKind, SetObj};
use vc_reflect::{Obj, Object, Value};

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::Result;
use crate::header::*;
use crate::io::{ReadBytes, WriteBytes};

// -----------------------------------------------------------------------------
// Object arrays

/// `ARRAY_OBJECT_ALL_NULL` when no element is set, `ARRAY_OBJECT` otherwise.
pub(crate) fn write_object_array(enc: &mut Encoder<'_>, array: &ObjectArray) -> Result<()> {
    let items = array.snapshot();
    if items.len() <= super::FILL_LIMIT && items.iter().all(Option::is_none) {
        enc.write_u8(ARRAY_OBJECT_ALL_NULL)?;
        enc.pack_len(items.len())?;
        return enc.write_utf(array.component());
    }
    enc.write_u8(ARRAY_OBJECT)?;
    enc.pack_len(items.len())?;
    enc.write_utf(array.component())?;
    items.iter().try_for_each(|item| enc.write_value(item))
}

pub(crate) fn decode_object_array(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let len = dec.unpack_u32()? as usize;
    let component = dec.read_utf()?;
    super::resolve_type_name(dec.serializer(), &component)?;

    match tag {
        ARRAY_OBJECT_ALL_NULL => {
            super::check_fill(len)?;
            let array = ObjectArray::new(component, len);
            Ok(Some(Obj::new(Object::ObjectArray(array))))
        }
        ARRAY_OBJECT_NO_REFS => {
            let items = dec.untracked(|dec| {
                let mut items = Vec::with_capacity(len.min(super::PREALLOCATE));
                for _ in 0..len {
                    items.push(dec.read_value()?);
                }
                Ok(items)
            })?;
            let array = ObjectArray::from_items(component, items);
            Ok(Some(Obj::new(Object::ObjectArray(array))))
        }
        _ => {
            let items = Vec::with_capacity(len.min(super::PREALLOCATE));
            let obj = Obj::new(Object::ObjectArray(ObjectArray::from_items(component, items)));
            dec.stack().push(obj.clone());
            if let Object::ObjectArray(array) = obj.object() {
                for _ in 0..len {
                    let item = dec.read_value()?;
                    array.push(item);
                }
            }
            Ok(Some(obj))
        }
    }
}

// -----------------------------------------------------------------------------
// Lists and sets

pub(crate) fn write_list(enc: &mut Encoder<'_>, list: &ListObj) -> Result<()> {
    enc.write_u8(match list.kind() {
        ListKind::ArrayList => ARRAYLIST,
        ListKind::LinkedList => LINKEDLIST,
    })?;
    let items = list.snapshot();
    enc.pack_len(items.len())?;
    items.iter().try_for_each(|item| enc.write_value(item))
}

pub(crate) fn decode_list(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let kind = match tag {
        LINKEDLIST => ListKind::LinkedList,
        _ => ListKind::ArrayList,
    };
    let len = dec.unpack_u32()? as usize;
    let obj = Obj::new(Object::List(ListObj::with_capacity(
        kind,
        len.min(super::PREALLOCATE),
    )));
    dec.stack().push(obj.clone());
    if let Object::List(list) = obj.object() {
        for _ in 0..len {
            list.push(dec.read_value()?);
        }
    }
    Ok(Some(obj))
}

pub(crate) fn write_set(enc: &mut Encoder<'_>, set: &SetObj) -> Result<()> {
    let items = set.snapshot();
    enc.write_u8(match set.kind() {
        SetKind::HashSet => HASHSET,
        SetKind::LinkedHashSet => LINKEDHASHSET,
        SetKind::TreeSet => TREESET,
    })?;
    enc.pack_len(items.len())?;
    if set.kind().is_sorted() {
        enc.write_u8(NULL)?;
    }
    items.iter().try_for_each(|item| enc.write_value(item))
}

pub(crate) fn decode_set(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let kind = match tag {
        TREESET => SetKind::TreeSet,
        LINKEDHASHSET => SetKind::LinkedHashSet,
        _ => SetKind::HashSet,
    };
    let len = dec.unpack_u32()? as usize;
    let obj = Obj::new(Object::Set(SetObj::with_capacity(
        kind,
        len.min(super::PREALLOCATE),
    )));
    dec.stack().push(obj.clone());
    if kind.is_sorted() {
        read_comparator(dec)?;
    }
    if let Object::Set(set) = obj.object() {
        for _ in 0..len {
            set.insert(dec.read_value()?);
        }
    }
    Ok(Some(obj))
}

// -----------------------------------------------------------------------------
// Maps

pub(crate) fn write_map(enc: &mut Encoder<'_>, map: &MapObj) -> Result<()> {
    let entries = map.snapshot();
    enc.write_u8(match map.kind() {
        MapKind::HashMap => HASHMAP,
        MapKind::LinkedHashMap => LINKEDHASHMAP,
        MapKind::TreeMap => TREEMAP,
        MapKind::Properties => PROPERTIES,
    })?;
    enc.pack_len(entries.len())?;
    if map.kind().is_sorted() {
        enc.write_u8(NULL)?;
    }
    for (key, value) in &entries {
        enc.write_value(key)?;
        enc.write_value(value)?;
    }
    Ok(())
}

pub(crate) fn decode_map(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let kind = match tag {
        TREEMAP => MapKind::TreeMap,
        LINKEDHASHMAP => MapKind::LinkedHashMap,
        PROPERTIES => MapKind::Properties,
        _ => MapKind::HashMap,
    };
    let len = dec.unpack_u32()? as usize;
    let obj = Obj::new(Object::Map(MapObj::with_capacity(
        kind,
        len.min(super::PREALLOCATE),
    )));
    dec.stack().push(obj.clone());
    if kind.is_sorted() {
        read_comparator(dec)?;
    }
    if let Object::Map(map) = obj.object() {
        for _ in 0..len {
            let key = dec.read_value()?;
            let value = dec.read_value()?;
            map.insert(key, value);
        }
    }
    Ok(Some(obj))
}

/// Sorted containers always use natural order here.
fn read_comparator(dec: &mut Decoder<'_>) -> Result<()> {
    if let Some(comparator) = dec.read_value()? {
        log::warn!(
            "discarding comparator `{}` of a sorted collection, natural order is used",
            comparator.kind_name()
        );
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::codec::FILL_LIMIT;
    use crate::error::SerialError;
    use crate::{Serializer, varint};

    fn array_prefix(tag: u8, len: u32) -> Vec<u8> {
        let mut bytes = vec![tag];
        varint::pack_u32(&mut bytes, len).unwrap();
        bytes.extend_from_slice(&[0, 6]);
        bytes.extend_from_slice(b"Object");
        bytes
    }

    #[test]
    fn tree_map_keeps_comparator_slot() {
        let map = MapObj::new(MapKind::TreeMap);
        map.insert(Some(Obj::from(2)), Some(Obj::from("two")));
        map.insert(Some(Obj::from(1)), Some(Obj::from("one")));
        let value = Some(Obj::new(Object::Map(map)));

        let serializer = Serializer::default();
        let bytes = serializer.to_bytes(&value).unwrap();
        assert_eq!(&bytes[..3], &[TREEMAP, 0x82, NULL]);
        assert_eq!(bytes[3], INT_1);

        let back = serializer.from_bytes(&bytes).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn comparator_is_discarded() {
        let bytes = [TREESET, 0x81, STRING_0, INT_5];
        let back = Serializer::default().from_bytes(&bytes).unwrap().unwrap();
        let Object::Set(set) = back.object() else {
            panic!("expected a set");
        };
        assert_eq!(set.kind(), SetKind::TreeSet);
        assert_eq!(set.items()[0], Some(Obj::from(5)));
    }

    #[test]
    fn all_null_array_keeps_length() {
        let array = ObjectArray::new("String", 3);
        let serializer = Serializer::default();
        let bytes = serializer
            .to_bytes(&Some(Obj::new(Object::ObjectArray(array))))
            .unwrap();
        assert_eq!(bytes[0], ARRAY_OBJECT_ALL_NULL);
        let back = serializer.from_bytes(&bytes).unwrap().unwrap();
        let Object::ObjectArray(array) = back.object() else {
            panic!("expected an array");
        };
        assert_eq!(array.len(), 3);
        assert_eq!(array.component(), "String");
    }

    #[test]
    fn no_refs_array_uses_its_own_stack() {
        // Element 1 refers to element 0 through position 0 of a fresh stack.
        let mut bytes = vec![ARRAY_OBJECT_NO_REFS, 0x82];
        bytes.extend_from_slice(&[0, 6]);
        bytes.extend_from_slice(b"Object");
        bytes.extend_from_slice(&[STRING_0 + 1, 0xE1, OBJECT_STACK, 0x80]);

        let back = Serializer::default().from_bytes(&bytes).unwrap().unwrap();
        let Object::ObjectArray(array) = back.object() else {
            panic!("expected an array");
        };
        let first = array.get(0).flatten().unwrap();
        let second = array.get(1).flatten().unwrap();
        assert!(Obj::ptr_eq(&first, &second));
        assert_eq!(first.as_str(), Some("a"));
    }

    #[test]
    fn stream_lengths_are_not_trusted() {
        let serializer = Serializer::default();
        let truncated = array_prefix(ARRAY_OBJECT, 0x7FFF_FFFF);
        assert!(matches!(serializer.from_bytes(&truncated), Err(SerialError::Io(_))));

        let all_null = array_prefix(ARRAY_OBJECT_ALL_NULL, 0x7FFF_FFFF);
        assert!(matches!(
            serializer.from_bytes(&all_null),
            Err(SerialError::FillLimit { len: 0x7FFF_FFFF, .. })
        ));
    }

    #[test]
    fn long_null_arrays_are_written_per_element() {
        let array = ObjectArray::new("Object", FILL_LIMIT + 1);
        let serializer = Serializer::default();
        let bytes = serializer
            .to_bytes(&Some(Obj::new(Object::ObjectArray(array))))
            .unwrap();
        assert_eq!(bytes[0], ARRAY_OBJECT);
        let back = serializer.from_bytes(&bytes).unwrap().unwrap();
        let Object::ObjectArray(array) = back.object() else {
            panic!("expected an array");
        };
        assert_eq!(array.len(), FILL_LIMIT + 1);
        assert!(array.items().iter().all(Option::is_none));
    }
}
