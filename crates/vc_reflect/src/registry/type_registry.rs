use core::any::TypeId;
use core::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use vc_utils::TypeIdMap;
use vc_utils::hash::{FixedHashState, HashMap};

use crate::registry::{GetTypeMeta, TypeMeta};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of [reflected] types, keyed by wire name.
///
/// This struct is the central store of the types a decoder may construct.
/// [Registering] a type generates a new [`TypeMeta`] entry using the type's
/// [`GetTypeMeta`] implementation (which is automatically implemented when
/// using [`#[derive(Reflect)]`](crate::derive::Reflect)).
///
/// # Example
///
/// ```
/// use vc_reflect::{derive::Reflect, registry::TypeRegistry};
///
/// #[derive(Reflect)]
/// #[reflect(name = "demo.Foo")]
/// struct Foo {
///     name: Option<String>,
///     value: i32,
/// }
///
/// let mut registry = TypeRegistry::empty();
/// registry.register::<Foo>();
/// registry.register::<Foo>(); // no-op
///
/// let meta = registry.get_with_name("demo.Foo").unwrap();
/// let bare = meta.instantiate().unwrap();
/// assert_eq!(bare.field_at(1).unwrap(), Some(vc_reflect::Obj::from(0)));
/// assert_eq!(registry.len(), 1);
/// ```
///
/// [reflected]: crate::Reflect
/// [Registering]: TypeRegistry::register
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    name_to_id: HashMap<&'static str, TypeId>,
    auto_registered: bool,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::empty`] .
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl TypeRegistry {
    /// Create a empty [`TypeRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            name_to_id: HashMap::with_hasher(FixedHashState),
            auto_registered: false,
        }
    }

    /// Try add or do nothing.
    ///
    /// - If the [`TypeId`] already exists, the function does nothing and returns `false`.
    /// - Otherwise the meta is inserted and the function returns `true`.
    ///
    /// Two types sharing one wire name cannot both be looked up by name, the
    /// first one keeps the name and a warning is logged.
    pub fn register_meta(&mut self, type_meta: TypeMeta) -> bool {
        let name_to_id = &mut self.name_to_id;
        self.type_meta_table.try_insert(type_meta.type_id(), || {
            let name = type_meta.name();
            match name_to_id.get(name) {
                Some(_) => log::warn!(
                    "type `{}` uses the wire name `{name}` already taken by another type",
                    type_meta.type_path(),
                ),
                None => {
                    name_to_id.insert(name, type_meta.type_id());
                }
            }
            type_meta
        })
    }

    /// Attempts to register the type `T` if it has not yet been registered already.
    ///
    /// Returns `true` if the type was newly inserted.
    #[inline]
    pub fn register<T: GetTypeMeta>(&mut self) -> bool {
        if self.type_meta_table.contains(&TypeId::of::<T>()) {
            return false;
        }
        self.register_meta(T::get_type_meta())
    }

    /// Automatically registers all types annotated with `#[reflect(auto_register)]`
    /// or declared via `impl_auto_register!`.
    ///
    /// This method is equivalent to calling [`register`](Self::register) for each qualifying type.
    /// Repeated calls are cheap and will not insert duplicates.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if automatic registration succeeded on the current platform; otherwise, `false`.
    ///
    /// ## Feature Dependency
    ///
    /// This method requires the `auto_register` feature. When disabled, it always do nothing and
    /// returns `false`.
    ///
    /// ## Platform Support
    ///
    /// Supported platforms include Linux, macOS, Windows, iOS, Android, and Web, enabled by
    /// the `inventory` crate. On unsupported platforms, this method becomes a no-op.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use vc_reflect::{derive::Reflect, registry::TypeRegistry};
    /// #[derive(Reflect, Default)]
    /// #[reflect(name = "demo.Foo", auto_register)]
    /// struct Foo {
    ///     value: i32,
    /// }
    ///
    /// let mut type_registry = TypeRegistry::empty();
    /// assert!(type_registry.auto_register());
    /// assert!(type_registry.contains_name("demo.Foo"));
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;
            // Reduce the cost of duplicate registrations.
            if self.auto_registered {
                return true;
            }
            auto_register::__register_types(self);
            self.auto_registered
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    #[cfg(feature = "auto_register")]
    #[inline]
    pub(crate) fn mark_auto_registered(&mut self) {
        self.auto_registered = true;
    }

    /// Whether the type with given [`TypeId`] has been registered in this registry.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    /// Whether a type with the given wire name has been registered.
    #[inline]
    pub fn contains_name(&self, name: &str) -> bool {
        self.name_to_id.contains_key(name)
    }

    /// Returns the [`TypeMeta`] of the type with the given [`TypeId`].
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Returns the [`TypeMeta`] of the type with the given wire name.
    pub fn get_with_name(&self, name: &str) -> Option<&TypeMeta> {
        // Manual inline
        match self.name_to_id.get(name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_meta_table.is_empty()
    }

    /// Returns an iterator over the [`TypeMeta`]s of the registered types.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.name_to_id.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A shared, concurrently readable [`TypeRegistry`].
///
/// Lock poisoning is ignored, a registry is never left half-updated.
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    /// The wrapped [`TypeRegistry`].
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Copies the meta for `name` out of the lock.
    #[inline]
    pub fn get_with_name(&self, name: &str) -> Option<TypeMeta> {
        self.read().get_with_name(name).copied()
    }

    /// Registers `meta` unless its type is already present.
    ///
    /// Takes the read lock first, so a registered type never waits for writers.
    pub fn ensure(&self, meta: TypeMeta) -> bool {
        if self.read().contains(meta.type_id()) {
            return false;
        }
        self.write().register_meta(meta)
    }
}

impl fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.read(), f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::Reflect;

    mod first {
        use crate::derive::Reflect;

        #[derive(Reflect)]
        #[reflect(name = "demo.Same")]
        pub struct Same {
            pub a: i32,
        }
    }

    mod second {
        use crate::derive::Reflect;

        #[derive(Reflect)]
        #[reflect(name = "demo.Same")]
        pub struct Same {
            pub b: i64,
        }
    }

    #[derive(Reflect)]
    #[reflect(name = "demo.Other")]
    struct Other;

    #[test]
    fn first_name_wins() {
        let mut registry = TypeRegistry::empty();
        assert!(registry.register::<first::Same>());
        assert!(registry.register::<second::Same>());
        assert!(!registry.register::<first::Same>());
        assert_eq!(registry.len(), 2);

        let meta = registry.get_with_name("demo.Same").unwrap();
        assert_eq!(meta.type_id(), TypeId::of::<first::Same>());
    }

    #[test]
    fn shared_registry() {
        let shared = TypeRegistryArc::default();
        let meta = <Other as GetTypeMeta>::get_type_meta();
        assert!(shared.ensure(meta));
        assert!(!shared.ensure(meta));
        assert!(shared.get_with_name("demo.Other").is_some());
        assert!(shared.get_with_name("demo.Missing").is_none());
    }
}
