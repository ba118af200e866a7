// -----------------------------------------------------------------------------
// Modules

mod error;
mod field_value;
mod reflect;

// -----------------------------------------------------------------------------
// Exports

pub use error::FieldError;
pub use field_value::FieldValue;
pub use reflect::{Externalize, FromOrdinal, Instantiate, Reflect};

/// A Fixed Hasher for [`Reflect::reflect_hash`] implementation.
///
/// # Examples
///
/// ```
/// use core::hash::{Hash, Hasher};
/// fn fixed_hash<T: Hash>(val: &T) -> u64 {
///     let mut hasher = vc_reflect::reflect_hasher();
///     val.hash(&mut hasher);
///     hasher.finish()
/// }
/// assert_eq!(fixed_hash(&1), fixed_hash(&1));
/// ```
///
/// See more infomation in [`FixedHashState`](vc_utils::hash::FixedHashState) .
#[inline(always)]
pub fn reflect_hasher() -> vc_utils::hash::FixedHasher {
    core::hash::BuildHasher::build_hasher(&vc_utils::hash::FixedHashState)
}
