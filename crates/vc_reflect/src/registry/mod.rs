//! Provide type registry for decoding by wire name.
//!
//! ## Menu
//!
//! - [`TypeMeta`]: A `Copy` record of a type: its [`ClassInfo`] and how to construct it.
//!     - [`Construct`]: Bare instantiation for structures, ordinal lookup for enums.
//! - [`GetTypeMeta`]: A trait provide a function to create a `TypeMeta` from a type.
//! - [`TypeRegistry`]: A container for storaging and querying `TypeMeta`s.
//! - [`TypeRegistryArc`]: A `TypeRegistry` shared behind an `RwLock`.
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`] .
//!
//! We use [`inventory`] crate to implement static registration,
//! not all platforms support it (although major platforms do).
//!
//! The good news is that if it is not supported,
//! this function will directly return false without causing any errors.
//!
//! [`ClassInfo`]: crate::info::ClassInfo
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod type_meta;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use type_meta::{Construct, GetTypeMeta, TypeMeta};
pub use type_registry::{TypeRegistry, TypeRegistryArc};
