//! The structural path.
//!
//! A value without a built-in or user codec is written through its
//! [`Reflect`] implementation:
//!
//! ```text
//! [POJO_CLASSINFO id classinfo]      once per stream, only when not in the catalog
//! POJO | POJO_RESOLVER  class-id
//!     enum:            ordinal
//!     externalizable:  count value*
//!     otherwise:       count field-id* value*
//! ```
//!
//! Field ids index the class info known to both sides: the catalog entry for
//! `POJO_RESOLVER`, the embedded one for `POJO`. The reader maps them to its
//! own fields by name, so a catalog persisted by an older build still reads.

use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;
use core::cell::RefCell;
use std::io::{Read, Write};

use bitflags::bitflags;
use vc_reflect::info::{ClassInfo, FieldInfo};
use vc_reflect::registry::TypeMeta;
use vc_reflect::{Obj, Object, Reflect, Value};

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{Result, SerialError};
use crate::header;
use crate::io::{ReadBytes, WriteBytes};
use crate::serializer::Serializer;

bitflags! {
    /// The flag byte of a class info record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct ClassFlags: u8 {
        /// Written with a foreign object stream, no field list follows.
        const OBJECT_STREAM = 1 << 1;
        /// Writes its own payload.
        const EXTERNALIZABLE = 1 << 2;
    }
}

// -----------------------------------------------------------------------------
// Class info records

/// Writes the shape of a class as embedded in a stream.
pub fn write_class_info<W: Write + ?Sized>(out: &mut W, info: &ClassInfo) -> Result<()> {
    out.write_utf(info.name())?;
    out.write_bool(info.is_enum())?;

    let mut flags = ClassFlags::empty();
    flags.set(ClassFlags::OBJECT_STREAM, info.is_object_stream());
    flags.set(ClassFlags::EXTERNALIZABLE, info.is_externalizable());
    out.write_u8(flags.bits())?;

    if !info.is_object_stream() {
        out.pack_len(info.field_len())?;
        for field in info.fields() {
            out.write_utf(field.name())?;
            out.write_bool(field.is_primitive())?;
            out.write_utf(field.type_name())?;
        }
    }
    Ok(())
}

/// Reads a shape written by [`write_class_info`].
pub fn read_class_info<R: Read + ?Sized>(input: &mut R) -> Result<ClassInfo> {
    let name = input.read_utf()?;
    let is_enum = input.read_bool()?;
    let flags = ClassFlags::from_bits_truncate(input.read_u8()?);

    let mut fields = Vec::new();
    if !flags.contains(ClassFlags::OBJECT_STREAM) {
        let count = input.unpack_u32()?;
        for _ in 0..count {
            let name = input.read_utf()?;
            let primitive = input.read_bool()?;
            let type_name = input.read_utf()?;
            fields.push(FieldInfo::from_parts(name, type_name, primitive));
        }
    }
    Ok(ClassInfo::from_parts(
        name,
        fields,
        is_enum,
        flags.contains(ClassFlags::EXTERNALIZABLE),
        flags.contains(ClassFlags::OBJECT_STREAM),
    ))
}

// -----------------------------------------------------------------------------
// Encode

enum Payload {
    Ordinal(u32),
    External(Vec<Value>),
    Fields(Vec<Value>),
}

fn kind_mismatch(info: &ClassInfo) -> SerialError {
    SerialError::KindMismatch {
        type_name: info.name().into(),
    }
}

/// Reads everything needed from the value, the borrow ends before any
/// nested value is written.
fn collect(value: &dyn Reflect) -> Result<(TypeMeta, Payload)> {
    let meta = value.type_meta();
    let info = meta.class_info();
    let payload = if info.is_enum() {
        Payload::Ordinal(value.ordinal().ok_or_else(|| kind_mismatch(info))?)
    } else if info.is_externalizable() {
        let external = value.as_external().ok_or_else(|| kind_mismatch(info))?;
        Payload::External(external.write_external())
    } else if info.is_object_stream() {
        return Err(SerialError::ForeignEncoding {
            type_name: info.name().into(),
        });
    } else {
        let values = (0..info.field_len())
            .map(|id| value.field_at(id))
            .collect::<Result<Vec<_>, _>>()?;
        Payload::Fields(values)
    };
    Ok((meta, payload))
}

pub(crate) fn encode(enc: &mut Encoder<'_>, cell: &RefCell<Box<dyn Reflect>>) -> Result<()> {
    let (meta, payload) = collect(&**cell.borrow())?;
    let info = meta.class_info();
    let serializer = enc.serializer();

    let (record, class_id, wire) = match serializer.catalog().id_for(info.name()) {
        Some(id) => {
            let wire = serializer
                .catalog()
                .class_info(id)
                .ok_or(SerialError::UnknownClassId(id))?;
            if wire.is_enum() != info.is_enum()
                || wire.is_externalizable() != info.is_externalizable()
            {
                return Err(kind_mismatch(info));
            }
            (header::POJO_RESOLVER, id, wire)
        }
        None => match enc.local_class_id(info) {
            Some(id) => (header::POJO, id, info),
            None => {
                serializer.notify_unknown(&meta);
                serializer.type_registry().ensure(meta);
                let id = enc.push_local_class(info);
                log::debug!("embedding class `{}` as stream class {id}", info.name());
                enc.write_u8(header::POJO_CLASSINFO)?;
                enc.pack_u32(id)?;
                write_class_info(enc, info)?;
                (header::POJO, id, info)
            }
        },
    };

    enc.write_u8(record)?;
    enc.pack_u32(class_id)?;
    match payload {
        Payload::Ordinal(ordinal) => enc.pack_u32(ordinal),
        Payload::External(values) => {
            enc.pack_len(values.len())?;
            values.iter().try_for_each(|value| enc.write_value(value))
        }
        Payload::Fields(values) => {
            enc.pack_len(values.len())?;
            for field in info.fields() {
                let wire_id = wire
                    .index_of(field.name())
                    .ok_or_else(|| SerialError::FieldMismatch {
                        type_name: wire.name().into(),
                        field: field.name().into(),
                    })?;
                enc.pack_len(wire_id)?;
            }
            values.iter().try_for_each(|value| enc.write_value(value))
        }
    }
}

// -----------------------------------------------------------------------------
// Binding

/// A stream class matched against a registered type.
pub(crate) struct Binding {
    meta: TypeMeta,
    wire: ClassInfo,
    // Local field id for each wire field id.
    slots: Vec<Option<usize>>,
}

impl Binding {
    pub fn bind(serializer: &Serializer, wire: ClassInfo) -> Result<Self> {
        if wire.is_object_stream() {
            return Err(SerialError::ForeignEncoding {
                type_name: wire.name().into(),
            });
        }
        let meta = serializer
            .type_registry()
            .get_with_name(wire.name())
            .ok_or_else(|| SerialError::TypeNotFound {
                type_name: wire.name().into(),
            })?;
        let local = meta.class_info();
        if local.is_enum() != wire.is_enum() || local.is_externalizable() != wire.is_externalizable()
        {
            return Err(kind_mismatch(&wire));
        }
        let slots = wire
            .fields()
            .iter()
            .map(|field| local.index_of(field.name()))
            .collect();
        Ok(Self { meta, wire, slots })
    }

    fn local_id(&self, wire_id: u32) -> Result<usize> {
        match self.slots.get(wire_id as usize) {
            Some(Some(id)) => Ok(*id),
            Some(None) => Err(SerialError::FieldMismatch {
                type_name: self.wire.name().into(),
                field: self.wire.fields()[wire_id as usize].name().into(),
            }),
            None => Err(SerialError::FieldMismatch {
                type_name: self.wire.name().into(),
                field: format!("#{wire_id}"),
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// Decode

/// `POJO_CLASSINFO`: a stream class followed by the record that uses it.
pub(crate) fn decode_class_info(dec: &mut Decoder<'_>, _tag: u8) -> Result<Value> {
    let id = dec.unpack_u32()?;
    let expected = dec.local_class_count();
    if id != expected {
        return Err(SerialError::ClassInfoOrder {
            expected,
            found: id,
        });
    }
    let info = read_class_info(dec)?;
    let binding = Binding::bind(dec.serializer(), info)?;
    dec.push_local_class(binding);

    match dec.read_u8()? {
        next @ (header::POJO | header::POJO_RESOLVER | header::POJO_CLASSINFO) => {
            dec.read_with_header(next)
        }
        other => Err(SerialError::NotAStruct { header: other }),
    }
}

/// `POJO` and `POJO_RESOLVER`.
pub(crate) fn decode(dec: &mut Decoder<'_>, tag: u8) -> Result<Value> {
    let class_id = dec.unpack_u32()?;
    let binding = if tag == header::POJO {
        dec.local_class(class_id)?
    } else {
        dec.catalog_class(class_id)?
    };
    let meta = binding.meta;

    if binding.wire.is_enum() {
        let ordinal = dec.unpack_u32()?;
        let value = meta
            .from_ordinal(ordinal)
            .ok_or_else(|| SerialError::UnknownEnumOrdinal {
                type_name: meta.name().into(),
                ordinal,
            })?;
        return Ok(Some(Obj::from_boxed_reflect(value)));
    }

    let bare = meta.instantiate().ok_or_else(|| kind_mismatch(&binding.wire))?;
    let obj = Obj::from_boxed_reflect(bare);
    dec.stack().push(obj.clone());
    let Object::Struct(cell) = obj.object() else {
        return Err(kind_mismatch(&binding.wire));
    };

    let count = dec.unpack_u32()?;
    if binding.wire.is_externalizable() {
        let mut values = Vec::new();
        for _ in 0..count {
            values.push(dec.read_value()?);
        }
        let mut value = cell.borrow_mut();
        let external = value
            .as_external_mut()
            .ok_or_else(|| kind_mismatch(&binding.wire))?;
        external.read_external(values)?;
    } else {
        let mut ids = Vec::new();
        for _ in 0..count {
            ids.push(binding.local_id(dec.unpack_u32()?)?);
        }
        for id in ids {
            // Read first, a nested value may refer back to this object.
            let value = dec.read_value()?;
            cell.borrow_mut().set_field_at(id, value)?;
        }
    }
    Ok(Some(obj))
}
