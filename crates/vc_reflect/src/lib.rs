//! Object model and structural introspection for the `vc_codec` engine.
//!
//! - [`object`]: the identity-carrying object graph ([`Obj`], [`Value`], [`Object`]).
//! - [`info`]: the on-wire shape of a structural type ([`ClassInfo`](info::ClassInfo)).
//! - [`Reflect`]: field access by id, bare instantiation and enum ordinals.
//! - [`registry`]: the process-wide name to type lookup used when decoding.
//!
//! # Examples
//!
//! ```
//! use vc_reflect::{Obj, Reflect, derive::Reflect, info::Typed};
//!
//! #[derive(Reflect)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let info = <Point as Typed>::class_info();
//! assert_eq!(info.field_len(), 2);
//! assert_eq!(info.index_of("y"), Some(1));
//!
//! let p = Point { x: 3, y: 4 };
//! let x = p.field_at(0).unwrap();
//! assert_eq!(x, Some(Obj::from(3)));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Derive output names `::vc_reflect`, which has to resolve inside this crate
// too (unit tests and doc tests).
extern crate self as vc_reflect;

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod info;
pub mod object;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use object::{Obj, Object, Value};
pub use reflection::{Externalize, FieldError, FieldValue, FromOrdinal, Instantiate};
pub use reflection::{Reflect, reflect_hasher};
pub use vc_reflect_derive as derive;
