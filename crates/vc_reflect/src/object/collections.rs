use alloc::vec::Vec;
use core::cell::{Ref, RefCell};
use core::cmp::Ordering;
use core::fmt;

use vc_utils::hash::hashbrown::HashTable;

use super::compare::{natural_cmp, value_eq, value_hash};
use super::{TypeName, Value};

// -----------------------------------------------------------------------------
// Kinds

/// The concrete flavour of a [`ListObj`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    ArrayList,
    LinkedList,
}

impl ListKind {
    pub const fn name(self) -> &'static str {
        match self {
            ListKind::ArrayList => "ArrayList",
            ListKind::LinkedList => "LinkedList",
        }
    }
}

/// The concrete flavour of a [`SetObj`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetKind {
    HashSet,
    LinkedHashSet,
    /// Kept in natural order, see [`natural_cmp`].
    TreeSet,
}

impl SetKind {
    pub const fn name(self) -> &'static str {
        match self {
            SetKind::HashSet => "HashSet",
            SetKind::LinkedHashSet => "LinkedHashSet",
            SetKind::TreeSet => "TreeSet",
        }
    }

    #[inline]
    pub const fn is_sorted(self) -> bool {
        matches!(self, SetKind::TreeSet)
    }
}

/// The concrete flavour of a [`MapObj`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    HashMap,
    LinkedHashMap,
    /// Kept in natural key order, see [`natural_cmp`].
    TreeMap,
    /// A string-to-string table. Keys and values are not checked.
    Properties,
}

impl MapKind {
    pub const fn name(self) -> &'static str {
        match self {
            MapKind::HashMap => "HashMap",
            MapKind::LinkedHashMap => "LinkedHashMap",
            MapKind::TreeMap => "TreeMap",
            MapKind::Properties => "Properties",
        }
    }

    #[inline]
    pub const fn is_sorted(self) -> bool {
        matches!(self, MapKind::TreeMap)
    }
}

/// Index at which `value` keeps `items` in natural order.
///
/// Values without a natural order relative to the last item go last.
fn sorted_position<T>(items: &[T], key_of: fn(&T) -> &Value, value: &Value) -> usize {
    let not_less = |item: &T| natural_cmp(value, key_of(item)) != Some(Ordering::Less);
    match items.last() {
        Some(last) if !not_less(last) => items.partition_point(not_less),
        _ => items.len(),
    }
}

/// Printed in place of a container or struct that is already being
/// formatted, or is mutably borrowed.
pub(crate) const ELIDED: &str = "<...>";

// -----------------------------------------------------------------------------
// ObjectArray

/// An array of references with a declared component type.
///
/// The length only changes through [`push`](Self::push) while a decoder fills
/// the array.
pub struct ObjectArray {
    component: TypeName,
    items: RefCell<Vec<Value>>,
}

impl ObjectArray {
    /// An array of `len` nulls.
    pub fn new(component: impl Into<TypeName>, len: usize) -> Self {
        let mut items = Vec::with_capacity(len);
        items.resize(len, None);
        Self {
            component: component.into(),
            items: RefCell::new(items),
        }
    }

    pub fn from_items(component: impl Into<TypeName>, items: Vec<Value>) -> Self {
        Self {
            component: component.into(),
            items: RefCell::new(items),
        }
    }

    /// The wire name of the component type.
    #[inline]
    pub fn component(&self) -> &str {
        &self.component
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// The element at `idx`, `None` when out of bounds.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<Value> {
        self.items.borrow().get(idx).cloned()
    }

    /// Append an element, growing the array by one.
    ///
    /// Used while an array is filled from a stream.
    #[inline]
    pub fn push(&self, value: Value) {
        self.items.borrow_mut().push(value);
    }

    /// Replace the element at `idx`, returns `false` when out of bounds.
    pub fn set(&self, idx: usize, value: Value) -> bool {
        match self.items.borrow_mut().get_mut(idx) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn items(&self) -> Ref<'_, Vec<Value>> {
        self.items.borrow()
    }

    /// A copy of the elements, detached from the array.
    #[inline]
    pub fn snapshot(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }
}

impl fmt::Debug for ObjectArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.component)?;
        match self.items.try_borrow_mut() {
            Ok(items) => f.debug_list().entries(items.iter()).finish(),
            Err(_) => f.write_str(ELIDED),
        }
    }
}

// -----------------------------------------------------------------------------
// ListObj

/// An ordered sequence that may contain duplicates and nulls.
pub struct ListObj {
    kind: ListKind,
    items: RefCell<Vec<Value>>,
}

impl ListObj {
    #[inline]
    pub fn new(kind: ListKind) -> Self {
        Self::from_items(kind, Vec::new())
    }

    #[inline]
    pub fn with_capacity(kind: ListKind, capacity: usize) -> Self {
        Self::from_items(kind, Vec::with_capacity(capacity))
    }

    #[inline]
    pub fn from_items(kind: ListKind, items: Vec<Value>) -> Self {
        Self {
            kind,
            items: RefCell::new(items),
        }
    }

    #[inline]
    pub fn kind(&self) -> ListKind {
        self.kind
    }

    #[inline]
    pub fn push(&self, value: Value) {
        self.items.borrow_mut().push(value);
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<Value> {
        self.items.borrow().get(idx).cloned()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    #[inline]
    pub fn items(&self) -> Ref<'_, Vec<Value>> {
        self.items.borrow()
    }

    #[inline]
    pub fn snapshot(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }
}

impl fmt::Debug for ListObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())?;
        match self.items.try_borrow_mut() {
            Ok(items) => f.debug_list().entries(items.iter()).finish(),
            Err(_) => f.write_str(ELIDED),
        }
    }
}

// -----------------------------------------------------------------------------
// Entries

/// Insertion-ordered entries of a set or map with a content-hash index over
/// their keys.
///
/// The index stores `(hash, position)` pairs. Lookups compare keys with
/// [`value_eq`], so a key may refer back to the collection holding it.
struct Entries<T> {
    items: Vec<T>,
    index: HashTable<(u64, usize)>,
}

impl<T> Entries<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            index: HashTable::with_capacity(capacity),
        }
    }

    /// Position of the entry whose key equals `key`.
    fn find(&self, hash: u64, key: &Value, key_of: fn(&T) -> &Value) -> Option<usize> {
        self.index
            .find(hash, |&(_, pos)| value_eq(key_of(&self.items[pos]), key))
            .map(|&(_, pos)| pos)
    }

    /// Adds an entry whose key is absent.
    fn insert(&mut self, hash: u64, item: T, sorted: bool, key_of: fn(&T) -> &Value) {
        let pos = if sorted {
            sorted_position(&self.items, key_of, key_of(&item))
        } else {
            self.items.len()
        };
        if pos < self.items.len() {
            for (_, shifted) in self.index.iter_mut() {
                if *shifted >= pos {
                    *shifted += 1;
                }
            }
        }
        self.items.insert(pos, item);
        self.index.insert_unique(hash, (hash, pos), |&(hash, _)| hash);
    }
}

fn set_key(value: &Value) -> &Value {
    value
}

fn map_key(entry: &(Value, Value)) -> &Value {
    &entry.0
}

// -----------------------------------------------------------------------------
// SetObj

/// A collection of distinct values under content equality.
///
/// Values are indexed by [`value_hash`], hash flavours keep insertion order,
/// which is also their wire order.
pub struct SetObj {
    kind: SetKind,
    entries: RefCell<Entries<Value>>,
}

impl SetObj {
    #[inline]
    pub fn new(kind: SetKind) -> Self {
        Self::with_capacity(kind, 0)
    }

    #[inline]
    pub fn with_capacity(kind: SetKind, capacity: usize) -> Self {
        Self {
            kind,
            entries: RefCell::new(Entries::with_capacity(capacity)),
        }
    }

    #[inline]
    pub fn kind(&self) -> SetKind {
        self.kind
    }

    /// Add `value`, returns `false` if an equal value is already present.
    pub fn insert(&self, value: Value) -> bool {
        let hash = value_hash(&value);
        if self.entries.borrow().find(hash, &value, set_key).is_some() {
            return false;
        }
        self.entries
            .borrow_mut()
            .insert(hash, value, self.kind.is_sorted(), set_key);
        true
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.entries
            .borrow()
            .find(value_hash(value), value, set_key)
            .is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.borrow().items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().items.is_empty()
    }

    #[inline]
    pub fn items(&self) -> Ref<'_, Vec<Value>> {
        Ref::map(self.entries.borrow(), |entries| &entries.items)
    }

    #[inline]
    pub fn snapshot(&self) -> Vec<Value> {
        self.entries.borrow().items.clone()
    }
}

impl fmt::Debug for SetObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())?;
        match self.entries.try_borrow_mut() {
            Ok(entries) => f.debug_set().entries(entries.items.iter()).finish(),
            Err(_) => f.write_str(ELIDED),
        }
    }
}

// -----------------------------------------------------------------------------
// MapObj

/// An association of distinct keys to values.
///
/// Keys are indexed by [`value_hash`], hash flavours keep insertion order,
/// which is also their wire order.
pub struct MapObj {
    kind: MapKind,
    entries: RefCell<Entries<(Value, Value)>>,
}

impl MapObj {
    #[inline]
    pub fn new(kind: MapKind) -> Self {
        Self::with_capacity(kind, 0)
    }

    #[inline]
    pub fn with_capacity(kind: MapKind, capacity: usize) -> Self {
        Self {
            kind,
            entries: RefCell::new(Entries::with_capacity(capacity)),
        }
    }

    #[inline]
    pub fn kind(&self) -> MapKind {
        self.kind
    }

    fn position(&self, key: &Value) -> Option<usize> {
        self.entries.borrow().find(value_hash(key), key, map_key)
    }

    /// Associate `value` with `key`, returning the previous value.
    ///
    /// The outer `Option` is `None` when the key was absent.
    pub fn insert(&self, key: Value, value: Value) -> Option<Value> {
        let hash = value_hash(&key);
        let found = self.entries.borrow().find(hash, &key, map_key);
        let mut entries = self.entries.borrow_mut();
        if let Some(pos) = found {
            return Some(core::mem::replace(&mut entries.items[pos].1, value));
        }
        entries.insert(hash, (key, value), self.kind.is_sorted(), map_key);
        None
    }

    /// The value for `key`, the outer `Option` is `None` when absent.
    pub fn get(&self, key: &Value) -> Option<Value> {
        let pos = self.position(key)?;
        Some(self.entries.borrow().items[pos].1.clone())
    }

    #[inline]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.position(key).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.borrow().items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().items.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> Ref<'_, Vec<(Value, Value)>> {
        Ref::map(self.entries.borrow(), |entries| &entries.items)
    }

    #[inline]
    pub fn snapshot(&self) -> Vec<(Value, Value)> {
        self.entries.borrow().items.clone()
    }
}

impl fmt::Debug for MapObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())?;
        match self.entries.try_borrow_mut() {
            Ok(entries) => f
                .debug_map()
                .entries(entries.items.iter().map(|(k, v)| (k, v)))
                .finish(),
            Err(_) => f.write_str(ELIDED),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Obj, Object};
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn set_dedups_by_content() {
        let set = SetObj::new(SetKind::LinkedHashSet);
        assert!(set.insert(Some(Obj::from("a"))));
        assert!(set.insert(None));
        assert!(!set.insert(Some(Obj::from("a"))));
        assert!(!set.insert(None));
        assert!(set.insert(Some(Obj::from(1))));
        assert_eq!(set.len(), 3);
        assert_eq!(set.items()[0], Some(Obj::from("a")));
    }

    #[test]
    fn tree_set_keeps_natural_order() {
        let set = SetObj::new(SetKind::TreeSet);
        for v in [5, -1, 3, 5, 0] {
            set.insert(Some(Obj::from(v)));
        }
        let ints: Vec<i32> = set
            .items()
            .iter()
            .map(|v| v.as_ref().and_then(|o| o.as_int()).unwrap())
            .collect();
        assert_eq!(ints, vec![-1, 0, 3, 5]);
    }

    #[test]
    fn map_replaces_equal_keys() {
        let map = MapObj::new(MapKind::TreeMap);
        assert_eq!(map.insert(Some(Obj::from("b")), Some(Obj::from(2))), None);
        assert_eq!(map.insert(Some(Obj::from("a")), Some(Obj::from(1))), None);
        let old = map.insert(Some(Obj::from("b")), Some(Obj::from(3)));
        assert_eq!(old, Some(Some(Obj::from(2))));
        assert_eq!(map.len(), 2);
        assert_eq!(map.entries()[0].0, Some(Obj::from("a")));
        assert_eq!(map.get(&Some(Obj::from("b"))), Some(Some(Obj::from(3))));
        assert_eq!(map.get(&Some(Obj::from("z"))), None);
    }

    #[test]
    fn object_array_bounds() {
        let array = ObjectArray::new("String", 2);
        assert!(array.set(1, Some(Obj::from("x"))));
        assert!(!array.set(2, None));
        assert_eq!(array.get(0), Some(None));
        assert_eq!(array.get(2), None);
        assert_eq!(array.component(), "String");
    }

    #[test]
    fn large_maps_find_keys_by_content() {
        let map = MapObj::with_capacity(MapKind::HashMap, 16);
        let set = SetObj::new(SetKind::HashSet);
        for i in 0..10_000i32 {
            assert_eq!(map.insert(Some(Obj::from(i.to_string())), Some(Obj::from(i))), None);
            assert!(set.insert(Some(Obj::from(i))));
        }
        assert_eq!(map.len(), 10_000);
        assert_eq!(set.len(), 10_000);
        assert_eq!(map.get(&Some(Obj::from("9999"))), Some(Some(Obj::from(9999))));
        assert_eq!(map.entries()[42].0, Some(Obj::from("42")));
        assert!(set.contains(&Some(Obj::from(1234))));
        assert!(!set.insert(Some(Obj::from(1234))));
        assert!(!map.contains_key(&Some(Obj::from(10_000))));
    }

    #[test]
    fn tree_map_lookups_follow_middle_inserts() {
        let map = MapObj::new(MapKind::TreeMap);
        for v in [10, 0, 5, 7, -3, 5] {
            map.insert(Some(Obj::from(v)), Some(Obj::from(v * 2)));
        }
        let keys: Vec<i32> = map
            .entries()
            .iter()
            .map(|(k, _)| k.as_ref().and_then(|o| o.as_int()).unwrap())
            .collect();
        assert_eq!(keys, vec![-3, 0, 5, 7, 10]);
        for v in [-3, 0, 5, 7, 10] {
            assert_eq!(map.get(&Some(Obj::from(v))), Some(Some(Obj::from(v * 2))));
        }
    }

    #[test]
    fn self_referencing_containers_format() {
        let list = Obj::new(Object::List(ListObj::new(ListKind::ArrayList)));
        let map = Obj::new(Object::Map(MapObj::new(MapKind::LinkedHashMap)));
        let Object::List(inner) = &*list else { unreachable!() };
        inner.push(Some(list.clone()));
        inner.push(Some(map.clone()));
        let Object::Map(entries) = &*map else { unreachable!() };
        entries.insert(Some(Obj::from("up")), Some(list.clone()));

        let text = format!("{list:?}");
        assert!(text.starts_with("ArrayList["));
        assert!(text.contains(ELIDED));
        assert!(text.contains("\"up\""));
        // Formatting released every borrow.
        assert_eq!(inner.len(), 2);
        assert_eq!(entries.insert(Some(Obj::from("k")), None), None);
    }
}
