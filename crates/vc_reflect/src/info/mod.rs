//! Structural type information.
//!
//! ## Menu
//!
//! - [`ClassInfo`]: The shape of a serializable type: wire name, ordered fields and flags.
//!     - [`is_enum`](ClassInfo::is_enum): Values are written as an ordinal.
//!     - [`is_externalizable`](ClassInfo::is_externalizable): Values write their own payload,
//!       see [`Externalize`](crate::Externalize).
//!     - [`is_object_stream`](ClassInfo::is_object_stream): Values use a foreign encoding
//!       that cannot be decoded here.
//!
//! - [`FieldInfo`]: A field name, its wire type name and whether it is primitive.
//!     - [`FieldOrigin`]: Whether the field is declared by the type itself or inherited
//!       from an embedded parent.
//!
//! - [`Typed`]: A trait for obtaining the `ClassInfo` of a type without an instance.
//!
//! - [`ClassInfoCell`]: Static storage used to implement [`Typed`].
//!
//! Field ids are positions in [`ClassInfo::fields`]. They are stable for a
//! given type and are what the wire format refers to.

// -----------------------------------------------------------------------------
// Modules

mod class_info;
mod field_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use class_info::ClassInfo;
pub use field_info::{FieldInfo, FieldOrigin};
pub use typed::{ClassInfoCell, Typed};
