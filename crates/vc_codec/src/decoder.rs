use alloc::rc::Rc;
use alloc::vec::Vec;
use core::mem;
use std::io::{self, Read};

use vc_reflect::{Obj, Value};
use vc_utils::hash::{FixedHashState, HashMap};

use crate::codec;
use crate::error::{Result, SerialError};
use crate::header;
use crate::io::ReadBytes;
use crate::pojo::Binding;
use crate::serializer::Serializer;
use crate::tracker::DecodeStack;

/// The state of one [`Serializer::deserialize`] call.
///
/// User decoders receive it to read nested values with
/// [`read_value`](Decoder::read_value) and raw data through [`ReadBytes`].
pub struct Decoder<'a> {
    input: &'a mut dyn Read,
    serializer: &'a Serializer,
    stack: DecodeStack,
    local: Vec<Rc<Binding>>,
    resolved: HashMap<u32, Rc<Binding>>,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(input: &'a mut dyn Read, serializer: &'a Serializer) -> Self {
        Self {
            input,
            serializer,
            stack: DecodeStack::new(),
            local: Vec::new(),
            resolved: HashMap::with_hasher(FixedHashState),
        }
    }

    /// The configuration this call runs with.
    #[inline]
    pub fn serializer(&self) -> &'a Serializer {
        self.serializer
    }

    /// Reads a nullable reference.
    pub fn read_value(&mut self) -> Result<Value> {
        let tag = self.read_u8()?;
        self.read_with_header(tag)
    }

    /// Reads a reference that must not be null.
    pub fn read_obj(&mut self) -> Result<Obj> {
        self.read_value()?.ok_or_else(|| SerialError::User("unexpected null".into()))
    }

    /// Decodes the record introduced by the header `tag`.
    ///
    /// Containers publish themselves on the stack before their elements, any
    /// other new object is published here once it is complete.
    pub(crate) fn read_with_header(&mut self, tag: u8) -> Result<Value> {
        let before = self.stack.len();
        let value = codec::DECODERS[tag as usize](self, tag)?;
        if tag != header::OBJECT_STACK
            && self.stack.len() == before
            && let Some(obj) = &value
        {
            self.stack.push(obj.clone());
        }
        Ok(value)
    }

    #[inline]
    pub(crate) fn stack(&mut self) -> &mut DecodeStack {
        &mut self.stack
    }

    /// Runs `f` with an empty object stack, back-references inside refer
    /// only to objects read by `f`.
    pub(crate) fn untracked<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let outer = mem::take(&mut self.stack);
        let result = f(self);
        self.stack = outer;
        result
    }

    #[inline]
    pub(crate) fn local_class_count(&self) -> u32 {
        self.local.len() as u32
    }

    #[inline]
    pub(crate) fn push_local_class(&mut self, binding: Binding) {
        self.local.push(Rc::new(binding));
    }

    pub(crate) fn local_class(&self, id: u32) -> Result<Rc<Binding>> {
        self.local
            .get(id as usize)
            .cloned()
            .ok_or(SerialError::UnknownClassId(id))
    }

    /// The binding of a catalog class, bound on first use.
    pub(crate) fn catalog_class(&mut self, id: u32) -> Result<Rc<Binding>> {
        if let Some(binding) = self.resolved.get(&id) {
            return Ok(binding.clone());
        }
        let serializer = self.serializer;
        let info = serializer
            .catalog()
            .class_info(id)
            .ok_or(SerialError::UnknownClassId(id))?;
        let binding = Rc::new(Binding::bind(serializer, info.clone())?);
        self.resolved.insert(id, binding.clone());
        Ok(binding)
    }
}

impl Read for Decoder<'_> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }

    #[inline]
    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.input.read_exact(buf)
    }
}
