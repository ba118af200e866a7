//! User codecs.
//!
//! A user codec takes over a structural or opaque type entirely. Its values
//! are written as `USER_DESER` + packed user id + whatever the encoder
//! writes, and the decoder registered for the same id reads them back.

use alloc::boxed::Box;
use core::any::{Any, TypeId};

use vc_reflect::{Obj, Object};
use vc_utils::TypeIdMap;
use vc_utils::hash::{HashMap, HashSet};

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{ConfigError, Result, SerialError};

pub(crate) type EncodeFn = Box<dyn Fn(&mut Encoder<'_>, &Obj) -> Result<()>>;
pub(crate) type DecodeFn = Box<dyn Fn(&mut Decoder<'_>) -> Result<Obj>>;

pub(crate) struct UserEncoder {
    pub id: u32,
    pub encode: EncodeFn,
}

/// The type a user encoder is looked up by.
///
/// Only structs and opaque values can have user codecs, built-in kinds
/// always use their own encoding.
pub(crate) fn user_type_id(obj: &Obj) -> Option<TypeId> {
    match obj.object() {
        Object::Struct(cell) => Some((**cell.borrow()).ty_id()),
        Object::Opaque(opaque) => Some(opaque.value_type_id()),
        _ => None,
    }
}

/// Runs `f` on the `T` inside `obj`.
pub(crate) fn with_user_value<T: Any>(obj: &Obj, f: impl FnOnce(&T) -> Result<()>) -> Result<()> {
    let mismatch = || SerialError::UnsupportedType {
        type_name: obj.kind_name(),
    };
    match obj.object() {
        Object::Opaque(opaque) => f(opaque.downcast_ref::<T>().ok_or_else(mismatch)?),
        Object::Struct(cell) => {
            let value = cell.borrow();
            match (**value).downcast_ref::<T>() {
                Some(value) => f(value),
                None => Err(mismatch()),
            }
        }
        _ => Err(mismatch()),
    }
}

// -----------------------------------------------------------------------------
// UserCodecs

#[derive(Default)]
pub(crate) struct UserCodecs {
    encoders: TypeIdMap<UserEncoder>,
    decoders: HashMap<u32, DecodeFn>,
}

impl UserCodecs {
    pub fn add_encoder<T: Any>(&mut self, id: u32, encode: EncodeFn) -> Result<(), ConfigError> {
        if self
            .encoders
            .try_insert(TypeId::of::<T>(), || UserEncoder { id, encode })
        {
            Ok(())
        } else {
            Err(ConfigError::DuplicateEncoder {
                type_name: core::any::type_name::<T>(),
            })
        }
    }

    pub fn add_decoder(&mut self, id: u32, decode: DecodeFn) -> Result<(), ConfigError> {
        if self.decoders.contains_key(&id) {
            return Err(ConfigError::DuplicateDecoder(id));
        }
        self.decoders.insert(id, decode);
        Ok(())
    }

    /// Every encoder id must have a decoder and the other way around.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let encoder_ids: HashSet<u32> = self.encoders.values().map(|e| e.id).collect();
        let decoder_ids: HashSet<u32> = self.decoders.keys().copied().collect();
        if encoder_ids == decoder_ids {
            Ok(())
        } else {
            Err(ConfigError::MismatchedUserCodecs)
        }
    }

    #[inline]
    pub fn encoder(&self, type_id: TypeId) -> Option<&UserEncoder> {
        self.encoders.get(&type_id)
    }

    #[inline]
    pub fn decoder(&self, id: u32) -> Option<&DecodeFn> {
        self.decoders.get(&id)
    }
}

