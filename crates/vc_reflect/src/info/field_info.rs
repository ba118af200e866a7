use alloc::borrow::Cow;

use crate::FieldValue;
use crate::object::TypeName;

// -----------------------------------------------------------------------------
// FieldOrigin

/// Where a field of a [`ClassInfo`](crate::info::ClassInfo) is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldOrigin {
    /// Declared by the type, the index counts own fields only.
    Own(usize),
    /// Declared by the embedded parent, the index is a field id of the parent.
    Inherited(usize),
}

impl Default for FieldOrigin {
    #[inline]
    fn default() -> Self {
        FieldOrigin::Own(0)
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// Information for a single field.
///
/// # Examples
///
/// ```
/// use vc_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct Foo {
///     count: i32,
///     label: Option<String>,
/// }
///
/// let info = Foo::class_info();
/// let count = info.field_at(0).unwrap();
/// assert_eq!(count.name(), "count");
/// assert_eq!(count.type_name(), "i32");
/// assert!(count.is_primitive());
///
/// let label = info.field_at(1).unwrap();
/// assert_eq!(label.type_name(), "String");
/// assert!(!label.is_primitive());
/// ```
///
/// Equality ignores [`FieldOrigin`], which is local to the declaring type.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldInfo {
    name: TypeName,
    type_name: TypeName,
    primitive: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    origin: FieldOrigin,
}

impl PartialEq for FieldInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.type_name == other.type_name
            && self.primitive == other.primitive
    }
}

impl Eq for FieldInfo {}

impl FieldInfo {
    /// Creates a field of type `T` declared by the type itself.
    #[inline]
    pub fn new<T: FieldValue>(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            type_name: Cow::Borrowed(T::TYPE_NAME),
            primitive: T::PRIMITIVE,
            origin: FieldOrigin::Own(0),
        }
    }

    /// Creates a field from its wire description, as read from a stream or
    /// a persisted catalog.
    #[inline]
    pub fn from_parts(
        name: impl Into<TypeName>,
        type_name: impl Into<TypeName>,
        primitive: bool,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            primitive,
            origin: FieldOrigin::Own(0),
        }
    }

    /// Returns a copy with the given origin.
    #[inline]
    pub fn with_origin(mut self, origin: FieldOrigin) -> Self {
        self.origin = origin;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wire name of the declared field type.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Primitive fields cannot hold null.
    #[inline]
    pub fn is_primitive(&self) -> bool {
        self.primitive
    }

    #[inline]
    pub fn origin(&self) -> FieldOrigin {
        self.origin
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{FieldInfo, FieldOrigin};

    #[test]
    fn origin_defaults_to_first_own_field() {
        assert_eq!(FieldOrigin::default(), FieldOrigin::Own(0));
        let field = FieldInfo::from_parts("id", "i64", true);
        assert_eq!(field.origin(), FieldOrigin::default());
        let inherited = field.clone().with_origin(FieldOrigin::Inherited(2));
        assert_eq!(inherited, field);
    }
}
