use alloc::boxed::Box;
use alloc::vec::Vec;
use std::io::{self, Write};

use vc_reflect::info::ClassInfo;
use vc_reflect::{Obj, Value};

use crate::codec;
use crate::error::Result;
use crate::header;
use crate::io::WriteBytes;
use crate::serializer::Serializer;
use crate::tracker::ReferenceTracker;
use crate::user::user_type_id;

/// The state of one [`Serializer::serialize`] call.
///
/// User encoders receive it to write nested values with
/// [`write_value`](Encoder::write_value) and raw data through [`WriteBytes`].
///
/// # Examples
///
/// ```
/// use vc_codec::{Encoder, Serializer, io::WriteBytes};
/// use vc_reflect::Obj;
///
/// struct Meters(f64);
///
/// let serializer = Serializer::builder()
///     .register_encoder::<Meters>(7, |enc: &mut Encoder<'_>, m: &Meters| enc.write_f64(m.0))
///     .unwrap()
///     .register_decoder(7, |dec| {
///         use vc_codec::io::ReadBytes;
///         Ok(Obj::opaque(Meters(dec.read_f64()?)))
///     })
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let bytes = serializer.to_bytes(&Some(Obj::opaque(Meters(2.5)))).unwrap();
/// let back = serializer.from_bytes(&bytes).unwrap().unwrap();
/// let vc_reflect::Object::Opaque(m) = back.object() else { panic!() };
/// assert_eq!(m.downcast_ref::<Meters>().unwrap().0, 2.5);
/// ```
pub struct Encoder<'a> {
    out: &'a mut dyn Write,
    serializer: &'a Serializer,
    tracker: Box<dyn ReferenceTracker>,
    local: Vec<&'static ClassInfo>,
}

impl<'a> Encoder<'a> {
    pub(crate) fn new(out: &'a mut dyn Write, serializer: &'a Serializer) -> Self {
        Self {
            out,
            serializer,
            tracker: serializer.strategy().tracker(),
            local: Vec::new(),
        }
    }

    /// The configuration this call runs with.
    #[inline]
    pub fn serializer(&self) -> &'a Serializer {
        self.serializer
    }

    /// Writes a nullable reference.
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Some(obj) => self.write_obj(obj),
            None => self.write_u8(header::NULL),
        }
    }

    /// Writes an object, or a back-reference if it was written before.
    pub fn write_obj(&mut self, obj: &Obj) -> Result<()> {
        if let Some(idx) = self.tracker.index_of(obj) {
            self.write_u8(header::OBJECT_STACK)?;
            return self.pack_u32(idx);
        }
        self.tracker.add(obj);

        let serializer = self.serializer;
        if let Some(idx) = serializer.singleton_index(obj) {
            self.write_u8(header::SINGLETON)?;
            return self.pack_u32(idx);
        }

        if let Some(type_id) = user_type_id(obj)
            && let Some(user) = serializer.user_codecs().encoder(type_id)
        {
            self.write_u8(header::USER_DESER)?;
            self.pack_u32(user.id)?;
            return (user.encode)(self, obj);
        }

        codec::encode(self, obj)
    }

    /// The stream-local id of a class already embedded in this stream.
    pub(crate) fn local_class_id(&self, info: &ClassInfo) -> Option<u32> {
        self.local
            .iter()
            .position(|known| known.name() == info.name())
            .map(|idx| idx as u32)
    }

    /// Records a class embedded in this stream, returns its local id.
    pub(crate) fn push_local_class(&mut self, info: &'static ClassInfo) -> u32 {
        self.local.push(info);
        (self.local.len() - 1) as u32
    }
}

impl Write for Encoder<'_> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.out.write_all(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
