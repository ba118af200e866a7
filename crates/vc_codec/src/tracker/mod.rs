//! Reference tracking.
//!
//! Every object written to a stream gets the next position of a call-scoped
//! sequence. A later occurrence of the same object is written as a
//! back-reference to that position (`OBJECT_STACK` + packed index), which is
//! what keeps shared references shared and makes cycles finite.
//!
//! ## Menu
//!
//! - [`ReferenceStrategy`]: Which notion of "the same object" the encoder uses.
//! - [`ReferenceTracker`]: The encode-side contract, one implementation per strategy.
//!     - [`NoTracker`]: Records nothing, cycles recurse forever.
//!     - [`LinearTracker`]: Identity comparison over a growable array.
//!     - [`IdentityTracker`]: Identity map, the default.
//!     - [`EqualityTracker`]: Equality map, also merges distinct but equal values.
//! - [`DecodeStack`]: The decode side, a position-indexed list whatever the writer used.

// -----------------------------------------------------------------------------
// Modules

mod linear;
mod map;
mod stack;

// -----------------------------------------------------------------------------
// Exports

pub use linear::{LinearTracker, NoTracker};
pub use map::{EqualityTracker, IdentityTracker};
pub use stack::DecodeStack;

// -----------------------------------------------------------------------------
// ReferenceStrategy

use alloc::boxed::Box;

use vc_reflect::Obj;

/// How the encoder decides that an object was already written.
///
/// Fixed for the lifetime of a [`Serializer`](crate::Serializer). Streams
/// written with any strategy decode the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReferenceStrategy {
    /// Nothing is tracked.
    ///
    /// Shared references are duplicated and a cyclic graph overflows the
    /// stack. Only use it for data known to be a tree.
    Disabled,
    /// Identity lookup by scanning an array, fast for a handful of objects.
    Linear,
    /// Identity lookup through a hash map.
    #[default]
    IdentityMap,
    /// Lookup by content, see [`dedup_eq`](vc_reflect::object::dedup_eq).
    ///
    /// Distinct but equal values are written once and come back as one
    /// object. Every written object is hashed.
    EqualityMap,
}

impl ReferenceStrategy {
    /// A fresh tracker for one top-level call.
    pub fn tracker(self) -> Box<dyn ReferenceTracker> {
        match self {
            ReferenceStrategy::Disabled => Box::new(NoTracker),
            ReferenceStrategy::Linear => Box::new(LinearTracker::new()),
            ReferenceStrategy::IdentityMap => Box::new(IdentityTracker::new()),
            ReferenceStrategy::EqualityMap => Box::new(EqualityTracker::new()),
        }
    }
}

// -----------------------------------------------------------------------------
// ReferenceTracker

/// The objects written so far in one stream.
///
/// Positions are assigned in [`add`](ReferenceTracker::add) order, starting
/// at zero, and match the positions the decoder assigns.
pub trait ReferenceTracker {
    /// The position of `obj` if it was added before.
    fn index_of(&self, obj: &Obj) -> Option<u32>;

    /// Records `obj` at the next position.
    fn add(&mut self, obj: &Obj);

    /// The number of recorded objects.
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The object recorded at `idx`.
    fn get(&self, idx: usize) -> Option<&Obj>;
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use vc_reflect::Obj;

    fn exercise(strategy: ReferenceStrategy) -> (Option<u32>, Option<u32>, usize) {
        let mut tracker = strategy.tracker();
        let a = Obj::from(10000);
        let b = Obj::from(10000);
        tracker.add(&a);
        (tracker.index_of(&a), tracker.index_of(&b), tracker.len())
    }

    #[test]
    fn strategies_differ_in_sameness() {
        assert_eq!(exercise(ReferenceStrategy::Disabled), (None, None, 0));
        assert_eq!(exercise(ReferenceStrategy::Linear), (Some(0), None, 1));
        assert_eq!(exercise(ReferenceStrategy::IdentityMap), (Some(0), None, 1));
        assert_eq!(exercise(ReferenceStrategy::EqualityMap), (Some(0), Some(0), 1));
    }

    #[test]
    fn positions_are_sequential() {
        for strategy in [
            ReferenceStrategy::Linear,
            ReferenceStrategy::IdentityMap,
            ReferenceStrategy::EqualityMap,
        ] {
            let mut tracker = strategy.tracker();
            let objs = [Obj::from("a"), Obj::from(1), Obj::from(2.5)];
            for obj in &objs {
                tracker.add(obj);
            }
            for (idx, obj) in objs.iter().enumerate() {
                assert_eq!(tracker.index_of(obj), Some(idx as u32));
                assert!(Obj::ptr_eq(tracker.get(idx).unwrap(), obj));
            }
            assert!(tracker.get(3).is_none());
        }
    }
}
