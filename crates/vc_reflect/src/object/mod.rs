//! The object graph the engine reads and writes.
//!
//! Every non-null value is an [`Obj`], a shared handle to an [`Object`].
//! Two handles are *the same object* when they point to the same allocation
//! ([`Obj::ptr_eq`]), this is what back-references preserve across a
//! round-trip. A null reference is `None` in a [`Value`].
//!
//! # Examples
//!
//! ```
//! use vc_reflect::object::{ListKind, ListObj, Obj, Object};
//!
//! let shared = Obj::from("shared");
//! let list = Obj::new(Object::List(ListObj::new(ListKind::ArrayList)));
//! if let Object::List(items) = list.object() {
//!     items.push(Some(shared.clone()));
//!     items.push(Some(shared.clone()));
//! }
//!
//! let Object::List(items) = list.object() else { unreachable!() };
//! let first = items.get(0).flatten().unwrap();
//! let second = items.get(1).flatten().unwrap();
//! assert!(Obj::ptr_eq(&first, &second));
//! ```

// -----------------------------------------------------------------------------
// Modules

mod big;
mod collections;
mod compare;
mod convert;

// -----------------------------------------------------------------------------
// Exports

pub use big::{BigDecimal, BigInteger};
pub use collections::{ListKind, ListObj, MapKind, MapObj, ObjectArray, SetKind, SetObj};
pub use compare::{dedup_eq, dedup_hash, natural_cmp, value_eq, value_hash};

pub use uuid::Uuid;

// -----------------------------------------------------------------------------
// Object

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::any::{Any, TypeId};
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;
use core::ops::Deref;

use crate::Reflect;

/// A type name as it appears on the wire.
pub type TypeName = Cow<'static, str>;

/// A nullable object reference.
pub type Value = Option<Obj>;

/// A node of the object graph.
///
/// Containers use interior mutability so a decoder can publish a container
/// before its elements exist, which is how cycles are rebuilt.
pub enum Object {
    Bool(bool),
    Byte(i8),
    Short(i16),
    /// A UTF-16 code unit.
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    BigInteger(BigInteger),
    BigDecimal(BigDecimal),
    /// A reference to a type, by wire name.
    Class(TypeName),
    /// Milliseconds since the Unix epoch.
    Date(i64),
    Uuid(Uuid),
    BooleanArray(Box<[bool]>),
    ByteArray(Box<[u8]>),
    ShortArray(Box<[i16]>),
    CharArray(Box<[u16]>),
    IntArray(Box<[i32]>),
    LongArray(Box<[i64]>),
    FloatArray(Box<[f32]>),
    DoubleArray(Box<[f64]>),
    ObjectArray(ObjectArray),
    List(ListObj),
    Set(SetObj),
    Map(MapObj),
    /// A structurally introspected value, see [`Reflect`].
    Struct(RefCell<Box<dyn Reflect>>),
    Opaque(Opaque),
}

impl Object {
    /// A short name of the variant, or the type name for structs and
    /// opaque values.
    ///
    /// Used in error messages.
    pub fn kind_name(&self) -> Cow<'static, str> {
        let name = match self {
            Object::Bool(_) => "bool",
            Object::Byte(_) => "i8",
            Object::Short(_) => "i16",
            Object::Char(_) => "char",
            Object::Int(_) => "i32",
            Object::Long(_) => "i64",
            Object::Float(_) => "f32",
            Object::Double(_) => "f64",
            Object::String(_) => "String",
            Object::BigInteger(_) => "BigInteger",
            Object::BigDecimal(_) => "BigDecimal",
            Object::Class(_) => "Class",
            Object::Date(_) => "Date",
            Object::Uuid(_) => "Uuid",
            Object::BooleanArray(_) => "[bool]",
            Object::ByteArray(_) => "[u8]",
            Object::ShortArray(_) => "[i16]",
            Object::CharArray(_) => "[char]",
            Object::IntArray(_) => "[i32]",
            Object::LongArray(_) => "[i64]",
            Object::FloatArray(_) => "[f32]",
            Object::DoubleArray(_) => "[f64]",
            Object::ObjectArray(_) => "[Object]",
            Object::List(list) => list.kind().name(),
            Object::Set(set) => set.kind().name(),
            Object::Map(map) => map.kind().name(),
            Object::Struct(cell) => {
                return match cell.try_borrow() {
                    Ok(value) => Cow::Owned(String::from(value.class_info().name())),
                    Err(_) => Cow::Borrowed("Struct"),
                };
            }
            Object::Opaque(opaque) => opaque.type_name(),
        };
        Cow::Borrowed(name)
    }

    /// Returns the `i32` payload of an `Int`.
    #[inline]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Object::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the `i64` payload of a `Long`.
    #[inline]
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Object::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text of a `String`.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Object::String(v) => Some(v),
            _ => None,
        }
    }

    /// Borrows the reflected value of a `Struct`.
    ///
    /// # Panics
    ///
    /// Panics if the struct is currently borrowed mutably.
    #[inline]
    pub fn as_struct(&self) -> Option<Ref<'_, Box<dyn Reflect>>> {
        match self {
            Object::Struct(cell) => Some(cell.borrow()),
            _ => None,
        }
    }

    /// Mutably borrows the reflected value of a `Struct`.
    ///
    /// # Panics
    ///
    /// Panics if the struct is currently borrowed.
    #[inline]
    pub fn as_struct_mut(&self) -> Option<RefMut<'_, Box<dyn Reflect>>> {
        match self {
            Object::Struct(cell) => Some(cell.borrow_mut()),
            _ => None,
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Bool(v) => write!(f, "{v}"),
            Object::Byte(v) => write!(f, "{v}i8"),
            Object::Short(v) => write!(f, "{v}i16"),
            Object::Char(v) => match char::from_u32(*v as u32) {
                Some(c) => write!(f, "{c:?}"),
                None => write!(f, "'\\u{{{v:x}}}'"),
            },
            Object::Int(v) => write!(f, "{v}"),
            Object::Long(v) => write!(f, "{v}i64"),
            Object::Float(v) => write!(f, "{v}f32"),
            Object::Double(v) => write!(f, "{v}f64"),
            Object::String(v) => write!(f, "{v:?}"),
            Object::BigInteger(v) => write!(f, "{v}"),
            Object::BigDecimal(v) => write!(f, "{v}"),
            Object::Class(v) => write!(f, "class {v}"),
            Object::Date(v) => write!(f, "Date({v})"),
            Object::Uuid(v) => write!(f, "{v}"),
            Object::BooleanArray(v) => f.debug_list().entries(v.iter()).finish(),
            Object::ByteArray(v) => f.debug_list().entries(v.iter()).finish(),
            Object::ShortArray(v) => f.debug_list().entries(v.iter()).finish(),
            Object::CharArray(v) => f.debug_list().entries(v.iter()).finish(),
            Object::IntArray(v) => f.debug_list().entries(v.iter()).finish(),
            Object::LongArray(v) => f.debug_list().entries(v.iter()).finish(),
            Object::FloatArray(v) => f.debug_list().entries(v.iter()).finish(),
            Object::DoubleArray(v) => f.debug_list().entries(v.iter()).finish(),
            Object::ObjectArray(v) => fmt::Debug::fmt(v, f),
            Object::List(v) => fmt::Debug::fmt(v, f),
            Object::Set(v) => fmt::Debug::fmt(v, f),
            Object::Map(v) => fmt::Debug::fmt(v, f),
            Object::Struct(cell) => match cell.try_borrow_mut() {
                Ok(value) => value.reflect_debug(f),
                Err(_) => f.write_str(collections::ELIDED),
            },
            Object::Opaque(v) => fmt::Debug::fmt(v, f),
        }
    }
}

// -----------------------------------------------------------------------------
// Opaque

/// A foreign runtime value with no structural shape.
///
/// Opaque values can only be written as singletons or through a user codec.
pub struct Opaque {
    type_name: &'static str,
    value: Box<dyn Any>,
}

impl Opaque {
    /// Wrap `value`, remembering its Rust type name.
    #[inline]
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            type_name: core::any::type_name::<T>(),
            value: Box::new(value),
        }
    }

    /// The Rust type name of the wrapped value.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The [`TypeId`] of the wrapped value.
    #[inline]
    pub fn value_type_id(&self) -> TypeId {
        (*self.value).type_id()
    }

    /// The wrapped value.
    #[inline]
    pub fn value(&self) -> &dyn Any {
        &*self.value
    }

    /// Downcast the wrapped value.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({})", self.type_name)
    }
}

// -----------------------------------------------------------------------------
// Obj

/// A shared handle to an [`Object`].
///
/// `Clone` copies the handle, both copies refer to the same object.
/// `PartialEq` compares content, use [`Obj::ptr_eq`] for identity.
#[derive(Clone)]
pub struct Obj(Rc<Object>);

impl Obj {
    /// Allocate a new object.
    #[inline]
    pub fn new(object: Object) -> Self {
        Self(Rc::new(object))
    }

    /// Wrap a reflected value.
    #[inline]
    pub fn from_reflect<T: Reflect>(value: T) -> Self {
        Self::new(Object::Struct(RefCell::new(Box::new(value))))
    }

    /// Wrap a boxed reflected value.
    #[inline]
    pub fn from_boxed_reflect(value: Box<dyn Reflect>) -> Self {
        Self::new(Object::Struct(RefCell::new(value)))
    }

    /// Wrap a foreign value, see [`Opaque`].
    #[inline]
    pub fn opaque<T: Any>(value: T) -> Self {
        Self::new(Object::Opaque(Opaque::new(value)))
    }

    /// A `Char` from a UTF-16 code unit.
    #[inline]
    pub fn char_unit(unit: u16) -> Self {
        Self::new(Object::Char(unit))
    }

    /// A `Date` from milliseconds since the Unix epoch.
    #[inline]
    pub fn date(millis: i64) -> Self {
        Self::new(Object::Date(millis))
    }

    /// A `Class` reference.
    #[inline]
    pub fn class(name: impl Into<TypeName>) -> Self {
        Self::new(Object::Class(name.into()))
    }

    /// Returns `true` if both handles refer to the same object.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.0, &other.0)
    }

    /// The address of the object, stable while any handle is alive.
    #[inline]
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    /// The referenced object.
    #[inline]
    pub fn object(&self) -> &Object {
        &self.0
    }

    /// Run `f` on the struct if it is a `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_reflect::{Obj, derive::Reflect};
    ///
    /// #[derive(Reflect)]
    /// struct Counter {
    ///     hits: i64,
    /// }
    ///
    /// let obj = Obj::from_reflect(Counter { hits: 7 });
    /// assert_eq!(obj.with_struct(|c: &Counter| c.hits), Some(7));
    /// assert_eq!(Obj::from(7).with_struct(|c: &Counter| c.hits), None);
    /// ```
    pub fn with_struct<T: Reflect, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let value = self.0.as_struct()?;
        (**value).downcast_ref::<T>().map(f)
    }

    /// Mutable counterpart of [`Obj::with_struct`].
    pub fn with_struct_mut<T: Reflect, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut value = self.0.as_struct_mut()?;
        (**value).downcast_mut::<T>().map(f)
    }
}

impl Deref for Obj {
    type Target = Object;

    #[inline]
    fn deref(&self) -> &Object {
        &self.0
    }
}

impl fmt::Debug for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
