//! Maps import specifiers to project files or allow-listed libraries.

use std::collections::BTreeMap;
use uigen_vfs::{FileMap, PathResolver, VfsPath};

/// Bare-specifier prefix under which project modules appear in the import map.
pub const LOCAL_MODULE_PREFIX: &str = "@vfs";

/// Outcome of resolving one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A file in the project
    Local(VfsPath),
    /// An allow-listed library or an absolute URL, kept as written
    External(String),
    /// Nothing matched
    Unresolved,
}

/// Resolves specifiers against a file map and a library allow-list.
///
/// Order: exact allow-list entry, then `http(s)://` URL, then local path
/// (relative, absolute or aliased) with extension inference. Anything else
/// is unresolved, including packages outside the allow-list.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use uigen_preview::resolver::{ModuleResolver, Resolution};
/// use uigen_vfs::{FileMap, PathResolver, VfsPath};
///
/// let mut files = FileMap::new();
/// files.insert("/components/Card.jsx".to_string(), String::new());
/// let mut libraries = BTreeMap::new();
/// libraries.insert("react".to_string(), "https://esm.sh/react".to_string());
///
/// let resolver = ModuleResolver::new(PathResolver::new(), &libraries, &files);
/// let importer = VfsPath::new("/App.jsx");
///
/// assert_eq!(
///     resolver.resolve("@/components/Card", &importer),
///     Resolution::Local(VfsPath::new("/components/Card.jsx"))
/// );
/// assert_eq!(resolver.resolve("react", &importer), Resolution::External("react".to_string()));
/// assert_eq!(resolver.resolve("lodash", &importer), Resolution::Unresolved);
/// ```
#[derive(Debug, Clone)]
pub struct ModuleResolver<'a> {
    paths: PathResolver,
    libraries: &'a BTreeMap<String, String>,
    files: &'a FileMap,
}

impl<'a> ModuleResolver<'a> {
    /// Creates a resolver over `files` with the given allow-list.
    #[must_use]
    pub const fn new(
        paths: PathResolver,
        libraries: &'a BTreeMap<String, String>,
        files: &'a FileMap,
    ) -> Self {
        Self {
            paths,
            libraries,
            files,
        }
    }

    /// Resolves `specifier` as written in `importer`.
    #[must_use]
    pub fn resolve(&self, specifier: &str, importer: &VfsPath) -> Resolution {
        if self.libraries.contains_key(specifier) || is_url(specifier) {
            return Resolution::External(specifier.to_string());
        }
        if !self.paths.is_local(specifier) {
            return Resolution::Unresolved;
        }

        let from_dir = importer.parent().unwrap_or_else(VfsPath::root);
        self.paths
            .resolve_existing(specifier, &from_dir, |candidate| {
                self.files.contains_key(candidate)
            })
            .map_or(Resolution::Unresolved, Resolution::Local)
    }
}

/// Import-map key for a project module.
///
/// # Examples
///
/// ```
/// use uigen_preview::resolver::local_specifier;
/// use uigen_vfs::VfsPath;
///
/// assert_eq!(local_specifier(&VfsPath::new("/components/Card.jsx")), "@vfs/components/Card.jsx");
/// ```
#[must_use]
pub fn local_specifier(path: &VfsPath) -> String {
    format!("{LOCAL_MODULE_PREFIX}{path}")
}

fn is_url(specifier: &str) -> bool {
    specifier.starts_with("https://") || specifier.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (BTreeMap<String, String>, FileMap) {
        let libraries: BTreeMap<String, String> = [("react", "u1"), ("react-dom/client", "u2")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let files: FileMap = [
            "/App.jsx",
            "/components/Button.tsx",
            "/components/forms/index.js",
            "/lib/utils.ts",
            "/styles.css",
        ]
        .into_iter()
        .map(|p| (p.to_string(), String::new()))
        .collect();
        (libraries, files)
    }

    #[test]
    fn test_relative_from_nested_importer() {
        let (libraries, files) = fixture();
        let resolver = ModuleResolver::new(PathResolver::new(), &libraries, &files);
        let importer = VfsPath::new("/components/forms/index.js");
        assert_eq!(
            resolver.resolve("../Button", &importer),
            Resolution::Local(VfsPath::new("/components/Button.tsx"))
        );
        assert_eq!(
            resolver.resolve("../../lib/utils", &importer),
            Resolution::Local(VfsPath::new("/lib/utils.ts"))
        );
    }

    #[test]
    fn test_directory_index() {
        let (libraries, files) = fixture();
        let resolver = ModuleResolver::new(PathResolver::new(), &libraries, &files);
        assert_eq!(
            resolver.resolve("./components/forms", &VfsPath::new("/App.jsx")),
            Resolution::Local(VfsPath::new("/components/forms/index.js"))
        );
    }

    #[test]
    fn test_literal_extension() {
        let (libraries, files) = fixture();
        let resolver = ModuleResolver::new(PathResolver::new(), &libraries, &files);
        assert_eq!(
            resolver.resolve("./styles.css", &VfsPath::new("/App.jsx")),
            Resolution::Local(VfsPath::new("/styles.css"))
        );
    }

    #[test]
    fn test_external_and_unresolved() {
        let (libraries, files) = fixture();
        let resolver = ModuleResolver::new(PathResolver::new(), &libraries, &files);
        let importer = VfsPath::new("/App.jsx");
        assert_eq!(
            resolver.resolve("react-dom/client", &importer),
            Resolution::External("react-dom/client".to_string())
        );
        assert_eq!(
            resolver.resolve("https://cdn.example.com/x.js", &importer),
            Resolution::External("https://cdn.example.com/x.js".to_string())
        );
        assert_eq!(resolver.resolve("react-dom", &importer), Resolution::Unresolved);
        assert_eq!(resolver.resolve("./Missing", &importer), Resolution::Unresolved);
    }
}
