use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The `Cargo.toml` of the crate that is expanding a proc-macro.
///
/// Derive output has to name runtime crates by a path that is valid from the
/// caller, which may depend on `vc_reflect` directly or only on the
/// `vc_serial` facade.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. `name` listed in `dependencies` resolves to `::name`.
/// 2. A `vc_*` crate reached through the `vc_serial` facade resolves to
///    `::vc_serial::*` (e.g. `vc_reflect` -> `::vc_serial::reflect`).
/// 3. Steps 1-2 are repeated for `dev-dependencies`.
/// 4. Anything else falls back to `::name`.
///
/// A crate that expands its own derive needs `extern crate self as name;`
/// in its root so that `::name` also works from inside the crate.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "vc_serial";
const MEMBER_PREFIX: &str = "vc_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be set by cargo when expanding a proc-macro");
        let mut path = PathBuf::from(dir);
        path.push("Cargo.toml");
        assert!(path.exists(), "no Cargo.toml at {}", path.display());
        path
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("cannot read {}", path.display()))
            .into_boxed_str();
        Document::parse(text).unwrap_or_else(|_| panic!("cannot parse {}", path.display()))
    }

    fn path_of(text: &str) -> syn::Path {
        syn::parse_str(text).unwrap_or_else(|_| panic!("`{text}` is not a valid path"))
    }

    fn search(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::path_of(&format!("::{name}")));
        }
        let module = name.strip_prefix(MEMBER_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            return Some(Self::path_of(&format!("::{FACADE_NAME}::{module}")));
        }
        None
    }

    /// Resolve the path of crate `name` as seen from the calling crate.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(path) = Self::search(deps, name)
            {
                return path;
            }
        }
        Self::path_of(&format!("::{name}"))
    }

    /// Run `func` with the caller's parsed manifest.
    ///
    /// Manifests are cached per path and re-read when the file's modified
    /// time changes, call this once per macro invocation.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static CACHE: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time =
            Self::modified_time(&path).expect("Cargo.toml should have a modified time");

        {
            let cache = CACHE.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = cache.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        CACHE
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use toml_edit::{Document, Item};

    use super::Manifest;

    fn deps(text: &str) -> Document<String> {
        Document::parse(String::from(text)).unwrap()
    }

    #[test]
    fn direct_dependency() {
        let doc = deps("[dependencies]\nvc_reflect = \"0.0.1\"\n");
        let Some(Item::Table(table)) = doc.get("dependencies") else {
            panic!("missing table");
        };
        let path = Manifest::search(table, "vc_reflect").unwrap();
        assert_eq!(quote_path(&path), "::vc_reflect");
    }

    #[test]
    fn through_facade() {
        let doc = deps("[dependencies]\nvc_serial = \"0.0.1\"\n");
        let Some(Item::Table(table)) = doc.get("dependencies") else {
            panic!("missing table");
        };
        let path = Manifest::search(table, "vc_reflect").unwrap();
        assert_eq!(quote_path(&path), "::vc_serial::reflect");
        assert!(Manifest::search(table, "serde").is_none());
    }

    fn quote_path(path: &syn::Path) -> String {
        let mut out = String::new();
        if path.leading_colon.is_some() {
            out.push_str("::");
        }
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        out.push_str(&segments.join("::"));
        out
    }
}
