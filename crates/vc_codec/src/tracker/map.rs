use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use vc_reflect::Obj;
use vc_reflect::object::{dedup_eq, dedup_hash};
use vc_utils::hash::{FixedHashState, HashMap};

use super::ReferenceTracker;

// -----------------------------------------------------------------------------
// IdentityTracker

/// Identity lookup through a map keyed by object address.
#[derive(Debug)]
pub struct IdentityTracker {
    objects: Vec<Obj>,
    // Addresses stay valid because `objects` holds every handle.
    index: HashMap<usize, u32>,
}

impl IdentityTracker {
    #[inline]
    pub const fn new() -> Self {
        Self {
            objects: Vec::new(),
            index: HashMap::with_hasher(FixedHashState),
        }
    }
}

impl Default for IdentityTracker {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceTracker for IdentityTracker {
    #[inline]
    fn index_of(&self, obj: &Obj) -> Option<u32> {
        self.index.get(&obj.addr()).copied()
    }

    fn add(&mut self, obj: &Obj) {
        let idx = self.objects.len() as u32;
        self.index.entry(obj.addr()).or_insert(idx);
        self.objects.push(obj.clone());
    }

    #[inline]
    fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    fn get(&self, idx: usize) -> Option<&Obj> {
        self.objects.get(idx)
    }
}

// -----------------------------------------------------------------------------
// EqualityTracker

/// An [`Obj`] hashed and compared with the dedup rules.
struct DedupKey(Obj);

impl PartialEq for DedupKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        dedup_eq(&self.0, &other.0)
    }
}

impl Eq for DedupKey {}

impl Hash for DedupKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(dedup_hash(&self.0));
    }
}

/// Lookup by content.
///
/// Values that are [`dedup_eq`] share one position, so the second of two
/// equal strings is written as a back-reference to the first.
pub struct EqualityTracker {
    objects: Vec<Obj>,
    index: HashMap<DedupKey, u32>,
}

impl EqualityTracker {
    #[inline]
    pub const fn new() -> Self {
        Self {
            objects: Vec::new(),
            index: HashMap::with_hasher(FixedHashState),
        }
    }
}

impl Default for EqualityTracker {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceTracker for EqualityTracker {
    fn index_of(&self, obj: &Obj) -> Option<u32> {
        self.index.get(&DedupKey(obj.clone())).copied()
    }

    fn add(&mut self, obj: &Obj) {
        let idx = self.objects.len() as u32;
        self.index.entry(DedupKey(obj.clone())).or_insert(idx);
        self.objects.push(obj.clone());
    }

    #[inline]
    fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    fn get(&self, idx: usize) -> Option<&Obj> {
        self.objects.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_reflect::object::{ListKind, ListObj, Object};

    #[test]
    fn equal_lists_share_a_position() {
        let list = |v: i32| {
            let l = ListObj::new(ListKind::ArrayList);
            l.push(Some(Obj::from(v)));
            Obj::new(Object::List(l))
        };
        let mut tracker = EqualityTracker::new();
        tracker.add(&list(1));
        assert_eq!(tracker.index_of(&list(1)), Some(0));
        assert_eq!(tracker.index_of(&list(2)), None);
    }

    #[test]
    fn identity_ignores_content() {
        let mut tracker = IdentityTracker::new();
        let a = Obj::from("x");
        tracker.add(&a);
        assert_eq!(tracker.index_of(&a.clone()), Some(0));
        assert_eq!(tracker.index_of(&Obj::from("x")), None);
    }
}
