use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::ClassInfo;
use crate::object::Value;
use crate::reflection::FieldError;
use crate::registry::TypeMeta;

// -----------------------------------------------------------------------------
// Reflect

/// Structural access to a serializable value.
///
/// A `Reflect` value exposes its fields by id, the position of the field in
/// its [`ClassInfo`]. The engine reads every field through [`field_at`] when
/// encoding and writes them back through [`set_field_at`] after building a
/// bare instance when decoding.
///
/// # Recommendations
///
/// It's strongly recommended to use [the derive macro for `Reflect`] rather than
/// manually implementing this trait.
///
/// ```
/// use vc_reflect::{Obj, Reflect, derive::Reflect};
///
/// #[derive(Reflect, Default)]
/// struct Person {
///     name: String,
///     age: i32,
///     friend: Option<Obj>,
/// }
///
/// let mut p = Person::default();
/// p.set_field_at(1, Some(Obj::from(42))).unwrap();
/// assert_eq!(p.age, 42);
///
/// // `i32` is primitive, null is rejected.
/// assert!(p.set_field_at(1, None).is_err());
/// assert!(p.field_at(3).is_err());
/// ```
///
/// # Type Identification
///
/// [`Any::type_id`] on `Box<dyn Reflect>` returns the container's type ID,
/// not the inner value's. Use [`Reflect::ty_id`] instead.
///
/// [the derive macro for `Reflect`]: crate::derive::Reflect
/// [`field_at`]: Reflect::field_at
/// [`set_field_at`]: Reflect::set_field_at
pub trait Reflect: Any {
    /// Returns the [`ClassInfo`] of the underlying type.
    fn class_info(&self) -> &'static ClassInfo;

    /// Returns the registration record of the underlying type.
    fn type_meta(&self) -> TypeMeta;

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Reads the field with the given id.
    fn field_at(&self, id: usize) -> Result<Value, FieldError>;

    /// Assigns the field with the given id.
    ///
    /// No user code runs, the field is written directly.
    fn set_field_at(&mut self, id: usize, value: Value) -> Result<(), FieldError>;

    /// The declaration index of an enum constant.
    #[inline]
    fn ordinal(&self) -> Option<u32> {
        None
    }

    /// The custom payload hooks of an externalizable type.
    #[inline]
    fn as_external(&self) -> Option<&dyn Externalize> {
        None
    }

    /// Mutable counterpart of [`Reflect::as_external`].
    #[inline]
    fn as_external_mut(&mut self) -> Option<&mut dyn Externalize> {
        None
    }

    /// Returns a "partial equality" comparison result.
    ///
    /// If the underlying type does not opt into equality, returns `None` and
    /// callers fall back to comparing fields (or identity when sharing
    /// values while encoding).
    ///
    /// If the type implements [`PartialEq`], consider marking it with the
    /// `#[reflect(PartialEq)]` attribute.
    ///
    /// ```
    /// use vc_reflect::derive::Reflect;
    ///
    /// #[derive(Reflect, PartialEq)]
    /// #[reflect(PartialEq)]
    /// struct A { /* ... */ }
    /// ```
    #[inline]
    fn reflect_partial_eq(&self, _other: &dyn Reflect) -> Option<bool> {
        None
    }

    /// Returns a hash of the value, may differ from [`core::hash::Hash`].
    ///
    /// Use [`reflect_hasher`](crate::reflect_hasher) so the result of the
    /// program running multiple times is the same for the same data.
    ///
    /// ```
    /// use vc_reflect::derive::Reflect;
    ///
    /// #[derive(Reflect, PartialEq, Hash)]
    /// #[reflect(PartialEq, Hash)]
    /// struct A { /* ... */ }
    /// ```
    #[inline]
    fn reflect_hash(&self) -> Option<u64> {
        None
    }

    /// Debug formatter for the value.
    ///
    /// Writes the class name followed by the readable fields.
    fn reflect_debug(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let info = self.class_info();
        if let Some(ordinal) = self.ordinal() {
            return write!(f, "{}#{ordinal}", info.name());
        }
        let mut debug = f.debug_struct(info.name());
        for (id, field) in info.fields().iter().enumerate() {
            match self.field_at(id) {
                Ok(value) => debug.field(field.name(), &value),
                Err(_) => debug.field(field.name(), &"<unreadable>"),
            };
        }
        debug.finish()
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Externalize

/// A type that writes its own payload instead of exposing fields.
///
/// The values returned by [`write_external`] are encoded in order, each with
/// full reference tracking, and handed back to [`read_external`] on a bare
/// instance when decoding.
///
/// # Examples
///
/// ```
/// use vc_reflect::{Externalize, FieldError, FieldValue, Obj, Value, derive::Reflect};
///
/// #[derive(Reflect, Default)]
/// #[reflect(externalizable)]
/// struct Celsius {
///     #[reflect(skip)]
///     milli: i64,
/// }
///
/// impl Externalize for Celsius {
///     fn write_external(&self) -> Vec<Value> {
///         vec![Some(Obj::from(self.milli))]
///     }
///
///     fn read_external(&mut self, values: Vec<Value>) -> Result<(), FieldError> {
///         let value = values.into_iter().next().flatten();
///         self.milli = i64::from_value(&value)?;
///         Ok(())
///     }
/// }
/// ```
///
/// [`write_external`]: Externalize::write_external
/// [`read_external`]: Externalize::read_external
pub trait Externalize {
    /// The values that make up the payload.
    fn write_external(&self) -> Vec<Value>;

    /// Restore the state from the payload values.
    fn read_external(&mut self, values: Vec<Value>) -> Result<(), FieldError>;
}

// -----------------------------------------------------------------------------
// Construction

/// Builds a value without running any user constructor.
///
/// Every field starts from its [`Default`], the decoder then assigns the
/// fields found in the stream. Implemented by
/// [`#[derive(Reflect)]`](crate::derive::Reflect) for structs.
pub trait Instantiate: Sized {
    fn instantiate_bare() -> Self;
}

/// Reconstitutes an enum constant from its declaration index.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect) for
/// fieldless enums.
pub trait FromOrdinal: Sized {
    fn from_ordinal(ordinal: u32) -> Option<Self>;
}
