use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use crate::info::{ClassInfo, Typed};
use crate::{FromOrdinal, Instantiate, Reflect};

// -----------------------------------------------------------------------------
// Construct

/// How a decoder obtains a fresh instance of a type.
#[derive(Clone, Copy)]
pub enum Construct {
    /// A structure built from field defaults, see [`Instantiate`].
    Bare(fn() -> Box<dyn Reflect>),
    /// An enum constant looked up by ordinal, see [`FromOrdinal`].
    Ordinal(fn(u32) -> Option<Box<dyn Reflect>>),
}

// -----------------------------------------------------------------------------
// TypeMeta

/// Runtime storage for type metadata, registered into the
/// [`TypeRegistry`](crate::registry::TypeRegistry).
///
/// `TypeMeta` is `Copy`, so a lookup can release the registry lock before
/// the meta is used.
///
/// An instance is usually generated by [`#[derive(Reflect)]`](crate::derive::Reflect),
/// which implements [`GetTypeMeta`].
///
/// # Example
///
/// ```
/// use vc_reflect::{derive::Reflect, registry::GetTypeMeta};
///
/// #[derive(Reflect)]
/// #[reflect(name = "demo.Light")]
/// enum Light {
///     Red,
///     Green,
/// }
///
/// let meta = Light::get_type_meta();
/// assert_eq!(meta.name(), "demo.Light");
/// let green = meta.from_ordinal(1).unwrap();
/// assert_eq!(green.ordinal(), Some(1));
/// assert!(meta.from_ordinal(2).is_none());
/// assert!(meta.instantiate().is_none());
/// ```
#[derive(Clone, Copy)]
pub struct TypeMeta {
    type_id: TypeId,
    type_path: &'static str,
    class_info: &'static ClassInfo,
    construct: Construct,
}

impl TypeMeta {
    /// The meta of a structure.
    pub fn structure<T: Reflect + Typed + Instantiate>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>(),
            class_info: <T as Typed>::class_info(),
            construct: Construct::Bare(|| Box::new(T::instantiate_bare())),
        }
    }

    /// The meta of a fieldless enum.
    pub fn enumeration<T: Reflect + Typed + FromOrdinal>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>(),
            class_info: <T as Typed>::class_info(),
            construct: Construct::Ordinal(|ordinal| {
                T::from_ordinal(ordinal).map(|v| Box::new(v) as Box<dyn Reflect>)
            }),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The Rust type path, for diagnostics.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// The wire name, see [`ClassInfo::name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        self.class_info.name()
    }

    #[inline]
    pub fn class_info(&self) -> &'static ClassInfo {
        self.class_info
    }

    #[inline]
    pub fn construct(&self) -> Construct {
        self.construct
    }

    /// A bare instance, `None` for enums.
    #[inline]
    pub fn instantiate(&self) -> Option<Box<dyn Reflect>> {
        match self.construct {
            Construct::Bare(f) => Some(f()),
            Construct::Ordinal(_) => None,
        }
    }

    /// An enum constant, `None` for structures and unknown ordinals.
    #[inline]
    pub fn from_ordinal(&self, ordinal: u32) -> Option<Box<dyn Reflect>> {
        match self.construct {
            Construct::Bare(_) => None,
            Construct::Ordinal(f) => f(ordinal),
        }
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("name", &self.name())
            .field("type_path", &self.type_path)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// A trait which allows a type to generate its [`TypeMeta`]
/// for registration into the [`TypeRegistry`].
///
/// This trait is automatically implemented for items using
/// [`#[derive(Reflect)]`](crate::derive::Reflect).
///
/// [`TypeRegistry`]: crate::registry::TypeRegistry
pub trait GetTypeMeta: Typed {
    /// Returns the **default** [`TypeMeta`] for this type.
    fn get_type_meta() -> TypeMeta;
}
