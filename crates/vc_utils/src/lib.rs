//! Small containers shared by the serialization crates.
//!
//! - [`hash`]: fixed-seed hashers and the `hashbrown` based [`HashMap`]/[`HashSet`]
//!   aliases used for reference tracking and type lookup.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId).
//!
//! [`HashMap`]: hash::HashMap
//! [`HashSet`]: hash::HashSet
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
