use alloc::vec::Vec;

use vc_reflect::Obj;

use super::ReferenceTracker;

// -----------------------------------------------------------------------------
// NoTracker

/// A tracker that never records anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTracker;

impl ReferenceTracker for NoTracker {
    #[inline]
    fn index_of(&self, _obj: &Obj) -> Option<u32> {
        None
    }

    #[inline]
    fn add(&mut self, _obj: &Obj) {}

    #[inline]
    fn len(&self) -> usize {
        0
    }

    #[inline]
    fn get(&self, _idx: usize) -> Option<&Obj> {
        None
    }
}

// -----------------------------------------------------------------------------
// LinearTracker

/// Identity lookup by scanning every recorded object.
///
/// `O(n)` per lookup. The handles are kept, so an address is never reused by
/// a temporary allocated later in the same call.
#[derive(Debug, Default)]
pub struct LinearTracker {
    objects: Vec<Obj>,
}

impl LinearTracker {
    #[inline]
    pub const fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }
}

impl ReferenceTracker for LinearTracker {
    fn index_of(&self, obj: &Obj) -> Option<u32> {
        self.objects
            .iter()
            .position(|o| Obj::ptr_eq(o, obj))
            .map(|idx| idx as u32)
    }

    #[inline]
    fn add(&mut self, obj: &Obj) {
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
