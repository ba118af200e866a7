//! Pre-registered class shapes.
//!
//! A catalog maps the wire name of a structural type to a small id agreed on
//! by writer and reader. A value whose type is in the catalog is written as
//! `POJO_RESOLVER` + id and its [`ClassInfo`] never enters the stream.
//!
//! Ids are positions in the registration list, so the list is part of the
//! wire format: appending is safe, reordering or inserting invalidates every
//! stream written with the types after the change.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use vc_reflect::info::ClassInfo;
use vc_utils::hash::{FixedHashState, HashMap};

/// Lookup between class ids and class shapes.
pub trait ClassCatalog {
    /// The shape registered under `id`.
    fn class_info(&self, id: u32) -> Option<&ClassInfo>;

    /// The id of the type named `name`.
    fn id_for(&self, name: &str) -> Option<u32>;
}

// -----------------------------------------------------------------------------
// NoCatalog

/// A catalog that knows nothing, every structural type is embedded in the
/// stream that first uses it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCatalog;

impl ClassCatalog for NoCatalog {
    #[inline]
    fn class_info(&self, _id: u32) -> Option<&ClassInfo> {
        None
    }

    #[inline]
    fn id_for(&self, _name: &str) -> Option<u32> {
        None
    }
}

// -----------------------------------------------------------------------------
// ArrayCatalog

/// A catalog built from an ordered list of shapes.
///
/// # Examples
///
/// ```
/// use vc_codec::catalog::{ArrayCatalog, ClassCatalog};
/// use vc_reflect::info::ClassInfo;
///
/// let catalog = ArrayCatalog::new(vec![
///     ClassInfo::structure("demo.A"),
///     ClassInfo::structure("demo.B"),
/// ]);
/// assert_eq!(catalog.id_for("demo.B"), Some(1));
/// assert_eq!(catalog.class_info(0).unwrap().name(), "demo.A");
/// assert!(catalog.id_for("demo.C").is_none());
/// ```
pub struct ArrayCatalog {
    infos: Vec<ClassInfo>,
    ids: HashMap<String, u32>,
}

impl ArrayCatalog {
    /// A catalog over `infos`, ids are their positions.
    ///
    /// When a name appears twice the first position is used for writing.
    pub fn new(infos: Vec<ClassInfo>) -> Self {
        let mut ids = HashMap::with_capacity_and_hasher(infos.len(), FixedHashState);
        for (idx, info) in infos.iter().enumerate() {
            ids.entry(info.name().into()).or_insert(idx as u32);
        }
        Self { infos, ids }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    #[inline]
    pub fn infos(&self) -> &[ClassInfo] {
        &self.infos
    }
}

impl ClassCatalog for ArrayCatalog {
    #[inline]
    fn class_info(&self, id: u32) -> Option<&ClassInfo> {
        self.infos.get(id as usize)
    }

    #[inline]
    fn id_for(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }
}

impl fmt::Debug for ArrayCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.infos.iter().map(ClassInfo::name))
            .finish()
    }
}
