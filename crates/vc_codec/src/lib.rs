//! A compact binary format for object graphs.
//!
//! A [`Serializer`] turns a [`Value`](vc_reflect::Value) and everything
//! reachable from it into bytes and back. Values whose type the format knows
//! are written with a dedicated header byte, small numbers and short strings
//! fit in the header itself. Shared references and cycles survive a
//! round-trip, structs are written field by field through
//! [`Reflect`](vc_reflect::Reflect).
//!
//! ## Menu
//!
//! - [`Serializer`]: The engine, `serialize`, `deserialize` and `clone_value`.
//!     - [`SerializerBuilder`]: Singletons, the class catalog, user codecs and
//!       the reference strategy.
//! - [`Encoder`] / [`Decoder`]: The per-call state, handed to user codecs.
//! - [`header`]: The header byte table.
//! - [`varint`]: Packed unsigned integers.
//! - [`io`]: Fixed-width big-endian primitives and modified UTF-8.
//! - [`tracker`]: Reference tracking strategies and the decode stack.
//! - [`catalog`]: Class ids known ahead of time by both sides.
//!
//! # Examples
//!
//! ```
//! use vc_codec::Serializer;
//! use vc_reflect::{Obj, Object, derive::Reflect};
//!
//! #[derive(Reflect)]
//! #[reflect(name = "demo.Node")]
//! struct Node {
//!     label: String,
//!     next: Option<Obj>,
//! }
//!
//! let serializer = Serializer::builder()
//!     .register_type::<Node>()
//!     .build()
//!     .unwrap();
//!
//! let node = Obj::from_reflect(Node { label: "a".into(), next: None });
//! node.with_struct_mut(|n: &mut Node| n.next = Some(node.clone()));
//!
//! let copy = serializer.clone_value(&Some(node)).unwrap().unwrap();
//! let next = copy.with_struct(|n: &Node| n.next.clone()).unwrap().unwrap();
//! assert!(Obj::ptr_eq(&copy, &next));
//! assert!(matches!(copy.object(), Object::Struct(_)));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod codec;
mod decoder;
mod encoder;
mod error;
mod pojo;
mod serializer;
mod user;

pub mod catalog;
pub mod header;
pub mod io;
pub mod tracker;
pub mod varint;

// -----------------------------------------------------------------------------
// Exports

pub use builder::SerializerBuilder;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{ConfigError, Result, SerialError};
pub use pojo::{read_class_info, write_class_info};
pub use serializer::Serializer;
pub use tracker::ReferenceStrategy;
