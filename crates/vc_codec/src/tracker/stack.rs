use alloc::vec::Vec;

use vc_reflect::Obj;

use crate::error::{Result, SerialError};

/// The objects produced so far while decoding, by position.
///
/// A slot can be reserved before its object exists, so a value decoded by a
/// user codec keeps the position the encoder gave it even though its nested
/// values are decoded first.
///
/// # Examples
///
/// ```
/// use vc_codec::tracker::DecodeStack;
/// use vc_reflect::Obj;
///
/// let mut stack = DecodeStack::new();
/// let slot = stack.reserve();
/// stack.push(Obj::from(1));
/// assert!(stack.get(slot).is_err());
///
/// stack.fill(slot, Obj::from("outer"));
/// assert_eq!(stack.get(slot).unwrap().as_str(), Some("outer"));
/// assert_eq!(stack.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct DecodeStack {
    slots: Vec<Option<Obj>>,
}

impl DecodeStack {
    #[inline]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Appends a decoded object.
    #[inline]
    pub fn push(&mut self, obj: Obj) {
        self.slots.push(Some(obj));
    }

    /// Appends an empty slot and returns its position.
    #[inline]
    pub fn reserve(&mut self) -> usize {
        self.slots.push(None);
        self.slots.len() - 1
    }

    /// Stores the object of a reserved slot.
    #[inline]
    pub fn fill(&mut self, idx: usize, obj: Obj) {
        if let Some(slot) = self.slots.get_mut(idx) {
            *slot = Some(obj);
        }
    }

    /// The object at `idx`.
    ///
    /// A position out of range, or a slot still waiting for its object, is
    /// a [`SerialError::BackReference`].
    pub fn get(&self, idx: usize) -> Result<Obj> {
        match self.slots.get(idx) {
            Some(Some(obj)) => Ok(obj.clone()),
            _ => Err(SerialError::BackReference(idx as u32)),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
