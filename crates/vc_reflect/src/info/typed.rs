use std::sync::OnceLock;

use crate::info::ClassInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to the [`ClassInfo`] of a type.
///
/// Automatically implemented by [`#[derive(Reflect)]`](crate::derive::Reflect),
/// allowing access to type information without an instance of the type.
///
/// # Examples
///
/// ```
/// use vc_reflect::{derive::Reflect, info::{ClassInfo, Typed}};
///
/// #[derive(Reflect)]
/// #[reflect(name = "demo.A")]
/// struct A { /* ... */ }
///
/// let info: &'static ClassInfo = <A as Typed>::class_info();
/// assert_eq!(info.name(), "demo.A");
/// ```
///
/// # Manually Impl
///
/// It is not recommended to implement manually. If it's necessary, use
/// [`ClassInfoCell`] to build the info once:
///
/// ```
/// use vc_reflect::info::{ClassInfo, ClassInfoCell, FieldInfo, Typed};
///
/// struct Manual {
///     foo: i64,
/// }
///
/// impl Typed for Manual {
///     fn class_info() -> &'static ClassInfo {
///         static CELL: ClassInfoCell = ClassInfoCell::new();
///         CELL.get_or_init(|| {
///             ClassInfo::structure("demo.Manual").with_fields([FieldInfo::new::<i64>("foo")])
///         })
///     }
/// }
///
/// assert_eq!(Manual::class_info().field_len(), 1);
/// ```
pub trait Typed: 'static {
    /// Returns the compile-time info for the underlying type.
    fn class_info() -> &'static ClassInfo;
}

// -----------------------------------------------------------------------------
// ClassInfoCell

/// Container for static storage of a [`ClassInfo`].
///
/// Internally, there is an [`OnceLock`], almost no additional expenses.
/// Only usable for non-generic types, a `static` inside a generic function
/// is shared by every instantiation.
pub struct ClassInfoCell(OnceLock<ClassInfo>);

impl ClassInfoCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> ClassInfo) -> &ClassInfo {
        self.0.get_or_init(f)
    }
}

impl Default for ClassInfoCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
