//! Equality, hashing and natural ordering over object graphs.
//!
//! Two notions of equality exist:
//!
//! - *content* equality, used by sets, maps and `Obj: PartialEq`. Values are
//!   equal when they hold equal data, structs compare field by field.
//! - *dedup* equality, used to share equal values while encoding. It only
//!   merges structs that opted in with a `PartialEq` implementation and never
//!   merges opaque values.
//!
//! Both tolerate cycles: a pair of containers already under comparison is
//! assumed equal.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::hash::{BuildHasher, Hash, Hasher};

use vc_utils::hash::FixedHashState;

use super::{Obj, Object, Value};
use crate::Reflect;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Content,
    Dedup,
}

// -----------------------------------------------------------------------------
// Equality

/// Content equality of two references, see the [module docs](self).
#[inline]
pub fn value_eq(a: &Value, b: &Value) -> bool {
    Comparer::new(Mode::Content).value(a, b)
}

/// Dedup equality of two objects, see the [module docs](self).
#[inline]
pub fn dedup_eq(a: &Obj, b: &Obj) -> bool {
    Comparer::new(Mode::Dedup).obj(a, b)
}

struct Comparer {
    mode: Mode,
    active: Vec<(usize, usize)>,
}

impl Comparer {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            active: Vec::new(),
        }
    }

    fn value(&mut self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => self.obj(a, b),
            _ => false,
        }
    }

    fn values(&mut self, a: &[Value], b: &[Value]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(a, b)| self.value(a, b))
    }

    /// Unordered comparison, `b` elements are matched at most once.
    fn unordered(&mut self, a: &[Value], b: &[Value]) -> bool {
        if a.len() != b.len() {
            return false;
        }
        let mut used = alloc::vec![false; b.len()];
        'outer: for item in a {
            for (idx, other) in b.iter().enumerate() {
                if !used[idx] && self.value(item, other) {
                    used[idx] = true;
                    continue 'outer;
                }
            }
            return false;
        }
        true
    }

    fn entries(&mut self, a: &[(Value, Value)], b: &[(Value, Value)]) -> bool {
        if a.len() != b.len() {
            return false;
        }
        let mut used = alloc::vec![false; b.len()];
        'outer: for (key, value) in a {
            for (idx, (other_key, other_value)) in b.iter().enumerate() {
                if !used[idx] && self.value(key, other_key) {
                    if !self.value(value, other_value) {
                        return false;
                    }
                    used[idx] = true;
                    continue 'outer;
                }
            }
            return false;
        }
        true
    }

    /// Run `f` unless this pair is already being compared higher up.
    fn guarded(&mut self, a: &Obj, b: &Obj, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let pair = (a.addr(), b.addr());
        if self.active.contains(&pair) {
            return true;
        }
        self.active.push(pair);
        let result = f(self);
        self.active.pop();
        result
    }

    fn obj(&mut self, a: &Obj, b: &Obj) -> bool {
        if Obj::ptr_eq(a, b) {
            return true;
        }
        match (a.object(), b.object()) {
            (Object::Bool(x), Object::Bool(y)) => x == y,
            (Object::Byte(x), Object::Byte(y)) => x == y,
            (Object::Short(x), Object::Short(y)) => x == y,
            (Object::Char(x), Object::Char(y)) => x == y,
            (Object::Int(x), Object::Int(y)) => x == y,
            (Object::Long(x), Object::Long(y)) => x == y,
            (Object::Float(x), Object::Float(y)) => x.to_bits() == y.to_bits(),
            (Object::Double(x), Object::Double(y)) => x.to_bits() == y.to_bits(),
            (Object::String(x), Object::String(y)) => x == y,
            (Object::BigInteger(x), Object::BigInteger(y)) => x == y,
            (Object::BigDecimal(x), Object::BigDecimal(y)) => x == y,
            (Object::Class(x), Object::Class(y)) => x == y,
            (Object::Date(x), Object::Date(y)) => x == y,
            (Object::Uuid(x), Object::Uuid(y)) => x == y,
            (Object::BooleanArray(x), Object::BooleanArray(y)) => x == y,
            (Object::ByteArray(x), Object::ByteArray(y)) => x == y,
            (Object::ShortArray(x), Object::ShortArray(y)) => x == y,
            (Object::CharArray(x), Object::CharArray(y)) => x == y,
            (Object::IntArray(x), Object::IntArray(y)) => x == y,
            (Object::LongArray(x), Object::LongArray(y)) => x == y,
            (Object::FloatArray(x), Object::FloatArray(y)) => {
                x.len() == y.len() && x.iter().zip(y.iter()).all(|(x, y)| x.to_bits() == y.to_bits())
            }
            (Object::DoubleArray(x), Object::DoubleArray(y)) => {
                x.len() == y.len() && x.iter().zip(y.iter()).all(|(x, y)| x.to_bits() == y.to_bits())
            }
            (Object::ObjectArray(x), Object::ObjectArray(y)) => {
                if x.component() != y.component() {
                    return false;
                }
                let (x, y) = (x.snapshot(), y.snapshot());
                self.guarded(a, b, |this| this.values(&x, &y))
            }
            (Object::List(x), Object::List(y)) => {
                let (x, y) = (x.snapshot(), y.snapshot());
                self.guarded(a, b, |this| this.values(&x, &y))
            }
            (Object::Set(x), Object::Set(y)) => {
                let (x, y) = (x.snapshot(), y.snapshot());
                self.guarded(a, b, |this| this.unordered(&x, &y))
            }
            (Object::Map(x), Object::Map(y)) => {
                let (x, y) = (x.snapshot(), y.snapshot());
                self.guarded(a, b, |this| this.entries(&x, &y))
            }
            (Object::Struct(x), Object::Struct(y)) => {
                let (Ok(x), Ok(y)) = (x.try_borrow(), y.try_borrow()) else {
                    return false;
                };
                if let Some(eq) = x.reflect_partial_eq(&**y) {
                    return eq;
                }
                if self.mode == Mode::Dedup {
                    // Enum constants are shared, other structs keep identity.
                    return match (x.ordinal(), y.ordinal()) {
                        (Some(ox), Some(oy)) => {
                            ox == oy && x.class_info().name() == y.class_info().name()
                        }
                        _ => false,
                    };
                }
                let (x, y): (&dyn Reflect, &dyn Reflect) = (&**x, &**y);
                self.guarded(a, b, |this| this.fields(x, y))
            }
            // Opaque values and mismatched kinds.
            _ => false,
        }
    }

    fn fields(&mut self, x: &dyn Reflect, y: &dyn Reflect) -> bool {
        let (xi, yi) = (x.class_info(), y.class_info());
        if xi.name() != yi.name() || x.ordinal() != y.ordinal() {
            return false;
        }
        if xi.field_len() != yi.field_len() {
            return false;
        }
        for idx in 0..xi.field_len() {
            match (x.field_at(idx), y.field_at(idx)) {
                (Ok(fx), Ok(fy)) => {
                    if !self.value(&fx, &fy) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

// -----------------------------------------------------------------------------
// Hashing

/// Content hash of a reference, consistent with [`value_eq`].
#[inline]
pub fn value_hash(value: &Value) -> u64 {
    let mut hasher = FixedHashState.build_hasher();
    HashWalker::new(Mode::Content).value(value, &mut hasher);
    hasher.finish()
}

/// Dedup hash of an object, consistent with [`dedup_eq`].
#[inline]
pub fn dedup_hash(obj: &Obj) -> u64 {
    let mut hasher = FixedHashState.build_hasher();
    HashWalker::new(Mode::Dedup).obj(obj, &mut hasher);
    hasher.finish()
}

struct HashWalker {
    mode: Mode,
    active: Vec<usize>,
}

impl HashWalker {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            active: Vec::new(),
        }
    }

    fn value(&mut self, value: &Value, state: &mut impl Hasher) {
        match value {
            None => state.write_u8(0),
            Some(obj) => {
                state.write_u8(1);
                self.obj(obj, state);
            }
        }
    }

    /// Order-independent combination of element hashes.
    fn unordered<'a>(&mut self, items: impl Iterator<Item = &'a Value>, state: &mut impl Hasher) {
        let mut sum = 0_u64;
        for item in items {
            let mut inner = FixedHashState.build_hasher();
            self.value(item, &mut inner);
            sum = sum.wrapping_add(inner.finish());
        }
        state.write_u64(sum);
    }

    fn obj(&mut self, obj: &Obj, state: &mut impl Hasher) {
        let object = obj.object();
        core::mem::discriminant(object).hash(state);
        match object {
            Object::Bool(v) => v.hash(state),
            Object::Byte(v) => v.hash(state),
            Object::Short(v) => v.hash(state),
            Object::Char(v) => v.hash(state),
            Object::Int(v) => v.hash(state),
            Object::Long(v) => v.hash(state),
            Object::Float(v) => v.to_bits().hash(state),
            Object::Double(v) => v.to_bits().hash(state),
            Object::String(v) => v.hash(state),
            Object::BigInteger(v) => v.hash(state),
            Object::BigDecimal(v) => v.hash(state),
            Object::Class(v) => v.hash(state),
            Object::Date(v) => v.hash(state),
            Object::Uuid(v) => v.hash(state),
            Object::BooleanArray(v) => v.hash(state),
            Object::ByteArray(v) => v.hash(state),
            Object::ShortArray(v) => v.hash(state),
            Object::CharArray(v) => v.hash(state),
            Object::IntArray(v) => v.hash(state),
            Object::LongArray(v) => v.hash(state),
            Object::FloatArray(v) => v.iter().for_each(|x| x.to_bits().hash(state)),
            Object::DoubleArray(v) => v.iter().for_each(|x| x.to_bits().hash(state)),
            Object::ObjectArray(_) | Object::List(_) | Object::Set(_) | Object::Map(_) => {
                if self.active.contains(&obj.addr()) {
                    return;
                }
                self.active.push(obj.addr());
                match object {
                    Object::ObjectArray(array) => {
                        array.component().hash(state);
                        for item in array.snapshot().iter() {
                            self.value(item, state);
                        }
                    }
                    Object::List(list) => {
                        for item in list.snapshot().iter() {
                            self.value(item, state);
                        }
                    }
                    Object::Set(set) => self.unordered(set.snapshot().iter(), state),
                    Object::Map(map) => {
                        let entries = map.snapshot();
                        self.unordered(entries.iter().map(|(k, _)| k), state);
                        let mut sum = 0_u64;
                        for (key, value) in entries.iter() {
                            let mut inner = FixedHashState.build_hasher();
                            self.value(key, &mut inner);
                            self.value(value, &mut inner);
                            sum = sum.wrapping_add(inner.finish());
                        }
                        state.write_u64(sum);
                    }
                    _ => {}
                }
                self.active.pop();
            }
            Object::Struct(cell) => {
                let Ok(value) = cell.try_borrow() else {
                    obj.addr().hash(state);
                    return;
                };
                if let Some(hash) = value.reflect_hash() {
                    state.write_u64(hash);
                    return;
                }
                let opted_in = value.reflect_partial_eq(&**value).is_some();
                match (self.mode, opted_in) {
                    // Custom equality without a custom hash: the class is all
                    // that is known to be shared by equal values.
                    (_, true) => value.class_info().name().hash(state),
                    (Mode::Dedup, false) => match value.ordinal() {
                        Some(ordinal) => {
                            value.class_info().name().hash(state);
                            ordinal.hash(state);
                        }
                        None => obj.addr().hash(state),
                    },
                    (Mode::Content, false) => {
                        if self.active.contains(&obj.addr()) {
                            return;
                        }
                        self.active.push(obj.addr());
                        let info = value.class_info();
                        info.name().hash(state);
                        value.ordinal().hash(state);
                        for idx in 0..info.field_len() {
                            if let Ok(field) = value.field_at(idx) {
                                self.value(&field, state);
                            }
                        }
                        self.active.pop();
                    }
                }
            }
            Object::Opaque(_) => obj.addr().hash(state),
        }
    }
}

impl PartialEq for Obj {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Comparer::new(Mode::Content).obj(self, other)
    }
}

impl Hash for Obj {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        HashWalker::new(Mode::Content).obj(self, state);
    }
}

// -----------------------------------------------------------------------------
// Natural order

/// Natural order of two references, `None` when they are not comparable.
///
/// Numbers compare within their own kind, strings by UTF-16 code units,
/// UUIDs by their signed halves and enum constants of one type by ordinal.
/// Nulls are not comparable.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use vc_reflect::Obj;
/// use vc_reflect::object::natural_cmp;
///
/// let (a, b) = (Some(Obj::from("a")), Some(Obj::from("b")));
/// assert_eq!(natural_cmp(&a, &b), Some(Ordering::Less));
/// assert_eq!(natural_cmp(&a, &Some(Obj::from(1))), None);
/// assert_eq!(natural_cmp(&None, &a), None);
/// ```
pub fn natural_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    let (a, b) = (a.as_ref()?, b.as_ref()?);
    match (a.object(), b.object()) {
        (Object::Bool(x), Object::Bool(y)) => Some(x.cmp(y)),
        (Object::Byte(x), Object::Byte(y)) => Some(x.cmp(y)),
        (Object::Short(x), Object::Short(y)) => Some(x.cmp(y)),
        (Object::Char(x), Object::Char(y)) => Some(x.cmp(y)),
        (Object::Int(x), Object::Int(y)) => Some(x.cmp(y)),
        (Object::Long(x), Object::Long(y)) => Some(x.cmp(y)),
        (Object::Float(x), Object::Float(y)) => Some(x.total_cmp(y)),
        (Object::Double(x), Object::Double(y)) => Some(x.total_cmp(y)),
        (Object::String(x), Object::String(y)) => Some(x.encode_utf16().cmp(y.encode_utf16())),
        (Object::BigInteger(x), Object::BigInteger(y)) => Some(x.cmp(y)),
        (Object::BigDecimal(x), Object::BigDecimal(y)) => {
            let (xv, yv) = (x.unscaled.to_i128()?, y.unscaled.to_i128()?);
            let scale = x.scale.max(y.scale);
            let lift = |v: i128, s: i32| -> Option<i128> {
                let exp = u32::try_from(scale - s).ok()?;
                v.checked_mul(10_i128.checked_pow(exp)?)
            };
            Some(lift(xv, x.scale)?.cmp(&lift(yv, y.scale)?))
        }
        (Object::Date(x), Object::Date(y)) => Some(x.cmp(y)),
        (Object::Uuid(x), Object::Uuid(y)) => {
            let (x, y) = (x.as_u64_pair(), y.as_u64_pair());
            let signed = |(hi, lo): (u64, u64)| (hi as i64, lo as i64);
            Some(signed(x).cmp(&signed(y)))
        }
        (Object::Struct(x), Object::Struct(y)) => {
            let (x, y) = (x.try_borrow().ok()?, y.try_borrow().ok()?);
            if x.class_info().name() != y.class_info().name() {
                return None;
            }
            Some(x.ordinal()?.cmp(&y.ordinal()?))
        }
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ListKind, ListObj, MapKind, MapObj, SetKind, SetObj};
    use alloc::vec;

    fn list(items: Vec<Value>) -> Obj {
        Obj::new(Object::List(ListObj::from_items(ListKind::ArrayList, items)))
    }

    #[test]
    fn floats_compare_by_bits() {
        let nan = Obj::from(f64::NAN);
        assert_eq!(nan, Obj::from(f64::NAN));
        assert_ne!(Obj::from(0.0_f64), Obj::from(-0.0_f64));
    }

    #[test]
    fn sets_and_maps_ignore_order() {
        let a = SetObj::new(SetKind::HashSet);
        let b = SetObj::new(SetKind::HashSet);
        for v in [1, 2, 3] {
            a.insert(Some(Obj::from(v)));
        }
        for v in [3, 1, 2] {
            b.insert(Some(Obj::from(v)));
        }
        let (a, b) = (Obj::new(Object::Set(a)), Obj::new(Object::Set(b)));
        assert_eq!(a, b);
        assert_eq!(value_hash(&Some(a)), value_hash(&Some(b)));

        let m1 = MapObj::new(MapKind::HashMap);
        let m2 = MapObj::new(MapKind::HashMap);
        m1.insert(Some(Obj::from("k")), Some(Obj::from(1)));
        m1.insert(Some(Obj::from("j")), None);
        m2.insert(Some(Obj::from("j")), None);
        m2.insert(Some(Obj::from("k")), Some(Obj::from(1)));
        assert_eq!(Obj::new(Object::Map(m1)), Obj::new(Object::Map(m2)));
    }

    #[test]
    fn cyclic_lists_terminate() {
        let a = list(vec![]);
        let b = list(vec![]);
        if let (Object::List(x), Object::List(y)) = (a.object(), b.object()) {
            x.push(Some(a.clone()));
            y.push(Some(b.clone()));
        }
        assert_eq!(a, b);
        assert_eq!(value_hash(&Some(a.clone())), value_hash(&Some(b.clone())));
        assert!(dedup_eq(&a, &b));
    }

    #[test]
    fn opaque_never_dedups() {
        let a = Obj::opaque(5_u8);
        let b = Obj::opaque(5_u8);
        assert!(!dedup_eq(&a, &b));
        assert!(dedup_eq(&a, &a.clone()));
        assert!(dedup_eq(&Obj::from("s"), &Obj::from("s")));
    }

    #[test]
    fn strings_order_by_utf16() {
        // U+FF61 sorts before U+1F600 in UTF-8 but after it in UTF-16.
        let a = Some(Obj::from("\u{FF61}"));
        let b = Some(Obj::from("\u{1F600}"));
        assert_eq!(natural_cmp(&a, &b), Some(Ordering::Greater));
    }
}
