//! Path normalization and import-specifier resolution.
//!
//! Every path inside the virtual filesystem is absolute, rooted at `/`, uses
//! forward slashes and contains no `.` or `..` segments. [`VfsPath`] enforces
//! that shape by construction: any input is normalized rather than rejected,
//! and `..` can never climb above the root.
//!
//! [`PathResolver`] builds on that to turn import specifiers written inside a
//! module (`./Button`, `../lib/utils.ts`, `@/components/Card`) into absolute
//! virtual paths, optionally probing a file set for the missing extension.
//!
//! # Examples
//!
//! ```
//! use uigen_vfs::{PathResolver, VfsPath};
//!
//! let path = VfsPath::new("components/../lib/./utils.js");
//! assert_eq!(path.as_str(), "/lib/utils.js");
//!
//! let resolver = PathResolver::new();
//! let from = VfsPath::new("/components");
//! let resolved = resolver.resolve("@/lib/utils", &from).unwrap();
//! assert_eq!(resolved.as_str(), "/lib/utils");
//! ```

use std::fmt;

/// Extensions tried, in order, when an import omits one.
pub const INFERRED_EXTENSIONS: [&str; 4] = [".jsx", ".tsx", ".js", ".ts"];

/// Default alias prefix that maps onto the virtual root.
pub const DEFAULT_ALIAS_PREFIX: &str = "@/";

/// A normalized absolute path inside the virtual filesystem.
///
/// Construction never fails. Relative input is interpreted against the root,
/// empty and `.` segments are dropped, and `..` removes the previous segment
/// (or is ignored at the root).
///
/// # Examples
///
/// ```
/// use uigen_vfs::VfsPath;
///
/// assert_eq!(VfsPath::new("/src//App.jsx").as_str(), "/src/App.jsx");
/// assert_eq!(VfsPath::new("../../etc").as_str(), "/etc");
/// assert!(VfsPath::new("").is_root());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VfsPath(String);

impl VfsPath {
    /// Normalizes `path` into an absolute virtual path.
    #[must_use]
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(normalize(path.as_ref()))
    }

    /// Returns the root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for `/`.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Iterates over the path segments, root excluded.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_vfs::VfsPath;
    ///
    /// let path = VfsPath::new("/src/components/Button.jsx");
    /// let segments: Vec<_> = path.segments().collect();
    /// assert_eq!(segments, ["src", "components", "Button.jsx"]);
    /// ```
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }

    /// Returns the parent directory, or `None` for the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_vfs::VfsPath;
    ///
    /// assert_eq!(VfsPath::new("/a/b.js").parent().unwrap().as_str(), "/a");
    /// assert_eq!(VfsPath::new("/a").parent().unwrap().as_str(), "/");
    /// assert!(VfsPath::root().parent().is_none());
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        self.0.rfind('/').map(|pos| {
            if pos == 0 {
                Self::root()
            } else {
                Self(self.0[..pos].to_string())
            }
        })
    }

    /// Returns the final segment, or `None` for the root.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.0.rsplit('/').next()
    }

    /// Returns the extension of the final segment without the dot.
    ///
    /// Dotfiles such as `/.env` have no extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_vfs::VfsPath;
    ///
    /// assert_eq!(VfsPath::new("/App.tsx").extension(), Some("tsx"));
    /// assert_eq!(VfsPath::new("/.env").extension(), None);
    /// assert_eq!(VfsPath::new("/Makefile").extension(), None);
    /// ```
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(0) | None => None,
            Some(pos) => Some(&name[pos + 1..]),
        }
    }

    /// Appends a single child segment.
    #[must_use]
    pub fn join_segment(&self, segment: &str) -> Self {
        if self.is_root() {
            Self::new(format!("/{segment}"))
        } else {
            Self::new(format!("{}/{segment}", self.0))
        }
    }

    /// Resolves `relative` against this path, treating `self` as a directory.
    ///
    /// An absolute `relative` replaces the base entirely.
    #[must_use]
    pub fn join(&self, relative: &str) -> Self {
        if relative.starts_with('/') {
            Self::new(relative)
        } else {
            Self::new(format!("{}/{relative}", self.0))
        }
    }

    /// Returns `true` if `self` equals `ancestor` or lies beneath it.
    ///
    /// Comparison is segment-wise, so `/app` is not an ancestor of `/apple`.
    #[must_use]
    pub fn starts_with(&self, ancestor: &Self) -> bool {
        if ancestor.is_root() {
            return true;
        }
        self.0 == ancestor.0
            || self
                .0
                .strip_prefix(&ancestor.0)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Replaces the `from` prefix of this path with `to`.
    ///
    /// Returns `None` when `self` does not lie under `from`.
    #[must_use]
    pub fn rebase(&self, from: &Self, to: &Self) -> Option<Self> {
        if !self.starts_with(from) {
            return None;
        }
        let rest = if from.is_root() {
            self.0.as_str()
        } else {
            &self.0[from.0.len()..]
        };
        Some(to.join(rest.trim_start_matches('/')))
    }
}

impl fmt::Display for VfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VfsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VfsPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for VfsPath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

fn normalize(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }
    format!("/{}", stack.join("/"))
}

/// Resolves module specifiers against the virtual root.
///
/// A specifier is *local* when it is absolute (`/x`), relative (`./x`,
/// `../x`, `.`, `..`) or starts with the configured alias prefix. Anything
/// else is a bare package specifier, which this resolver leaves to its caller.
///
/// # Examples
///
/// ```
/// use uigen_vfs::{PathResolver, VfsPath};
///
/// let resolver = PathResolver::new();
/// let from = VfsPath::new("/components/forms");
///
/// assert_eq!(resolver.resolve("../Button", &from).unwrap().as_str(), "/components/Button");
/// assert_eq!(resolver.resolve("/App", &from).unwrap().as_str(), "/App");
/// assert!(resolver.resolve("react", &from).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    alias_prefix: Option<String>,
}

impl PathResolver {
    /// Creates a resolver using the default `@/` alias.
    #[must_use]
    pub fn new() -> Self {
        Self::with_alias(DEFAULT_ALIAS_PREFIX)
    }

    /// Creates a resolver whose alias prefix maps onto the root.
    #[must_use]
    pub fn with_alias(prefix: impl Into<String>) -> Self {
        Self {
            alias_prefix: Some(prefix.into()),
        }
    }

    /// Creates a resolver with no alias.
    #[must_use]
    pub const fn without_alias() -> Self {
        Self { alias_prefix: None }
    }

    /// Returns the alias prefix, if any.
    #[must_use]
    pub fn alias_prefix(&self) -> Option<&str> {
        self.alias_prefix.as_deref()
    }

    /// Returns `true` if `specifier` addresses a file in the virtual tree.
    #[must_use]
    pub fn is_local(&self, specifier: &str) -> bool {
        specifier.starts_with('/')
            || specifier == "."
            || specifier == ".."
            || specifier.starts_with("./")
            || specifier.starts_with("../")
            || self
                .alias_prefix
                .as_deref()
                .is_some_and(|alias| specifier.starts_with(alias))
    }

    /// Rewrites a local specifier into a normalized absolute path.
    ///
    /// `from_dir` is the directory of the importing module. Returns `None`
    /// for bare package specifiers.
    #[must_use]
    pub fn resolve(&self, specifier: &str, from_dir: &VfsPath) -> Option<VfsPath> {
        if let Some(rest) = self
            .alias_prefix
            .as_deref()
            .and_then(|alias| specifier.strip_prefix(alias))
        {
            return Some(VfsPath::new(rest));
        }
        if specifier.starts_with('/') {
            return Some(VfsPath::new(specifier));
        }
        if self.is_local(specifier) {
            return Some(from_dir.join(specifier));
        }
        None
    }

    /// Resolves `specifier` and then probes `exists` for the concrete file.
    ///
    /// Candidates are tried in order: the literal path, the path with each of
    /// [`INFERRED_EXTENSIONS`], then `<path>/index` with each extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_vfs::{PathResolver, VfsPath};
    ///
    /// let files = ["/components/Card.tsx", "/hooks/index.js"];
    /// let exists = |p: &str| files.contains(&p);
    /// let resolver = PathResolver::new();
    /// let root = VfsPath::root();
    ///
    /// let card = resolver.resolve_existing("@/components/Card", &root, exists);
    /// assert_eq!(card.unwrap().as_str(), "/components/Card.tsx");
    ///
    /// let hooks = resolver.resolve_existing("./hooks", &root, exists);
    /// assert_eq!(hooks.unwrap().as_str(), "/hooks/index.js");
    /// ```
    pub fn resolve_existing<F>(&self, specifier: &str, from_dir: &VfsPath, exists: F) -> Option<VfsPath>
    where
        F: Fn(&str) -> bool,
    {
        let base = self.resolve(specifier, from_dir)?;
        infer_extension(&base, exists)
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds the first existing file among the extension candidates of `base`.
pub fn infer_extension<F>(base: &VfsPath, exists: F) -> Option<VfsPath>
where
    F: Fn(&str) -> bool,
{
    if !base.is_root() && exists(base.as_str()) {
        return Some(base.clone());
    }

    let direct = INFERRED_EXTENSIONS
        .iter()
        .filter(|_| !base.is_root())
        .map(|ext| format!("{base}{ext}"));
    let index = INFERRED_EXTENSIONS
        .iter()
        .map(|ext| base.join_segment(&format!("index{ext}")).as_str().to_string());

    direct
        .chain(index)
        .find(|candidate| exists(candidate))
        .map(VfsPath::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_segments() {
        assert_eq!(VfsPath::new("/a/./b//c/").as_str(), "/a/b/c");
        assert_eq!(VfsPath::new("a/b").as_str(), "/a/b");
        assert_eq!(VfsPath::new("/a/b/../c").as_str(), "/a/c");
    }

    #[test]
    fn test_normalize_cannot_escape_root() {
        assert_eq!(VfsPath::new("/../../x").as_str(), "/x");
        assert_eq!(VfsPath::new("..").as_str(), "/");
    }

    #[test]
    fn test_root_helpers() {
        let root = VfsPath::root();
        assert!(root.is_root());
        assert!(root.parent().is_none());
        assert!(root.file_name().is_none());
        assert_eq!(root.segments().count(), 0);
    }

    #[test]
    fn test_file_name_and_extension() {
        let path = VfsPath::new("/src/App.test.jsx");
        assert_eq!(path.file_name(), Some("App.test.jsx"));
        assert_eq!(path.extension(), Some("jsx"));
    }

    #[test]
    fn test_starts_with_is_segment_wise() {
        let app = VfsPath::new("/app");
        assert!(VfsPath::new("/app/main.js").starts_with(&app));
        assert!(VfsPath::new("/app").starts_with(&app));
        assert!(!VfsPath::new("/apple").starts_with(&app));
        assert!(VfsPath::new("/anything").starts_with(&VfsPath::root()));
    }

    #[test]
    fn test_rebase() {
        let path = VfsPath::new("/old/sub/file.js");
        let rebased = path
            .rebase(&VfsPath::new("/old"), &VfsPath::new("/new/place"))
            .unwrap();
        assert_eq!(rebased.as_str(), "/new/place/sub/file.js");
        assert!(path.rebase(&VfsPath::new("/other"), &VfsPath::root()).is_none());
    }

    #[test]
    fn test_resolve_relative_and_alias() {
        let resolver = PathResolver::new();
        let from = VfsPath::new("/components");
        assert_eq!(resolver.resolve("./Button", &from).unwrap().as_str(), "/components/Button");
        assert_eq!(resolver.resolve("../../../x", &from).unwrap().as_str(), "/x");
        assert_eq!(resolver.resolve("@/lib/a", &from).unwrap().as_str(), "/lib/a");
        assert_eq!(resolver.resolve(".", &from).unwrap().as_str(), "/components");
    }

    #[test]
    fn test_resolve_bare_is_none() {
        let resolver = PathResolver::new();
        assert!(resolver.resolve("react", &VfsPath::root()).is_none());
        assert!(resolver.resolve("react-dom/client", &VfsPath::root()).is_none());
    }

    #[test]
    fn test_custom_alias() {
        let resolver = PathResolver::with_alias("~/");
        assert!(resolver.is_local("~/utils"));
        assert!(!resolver.is_local("@/utils"));
        assert_eq!(
            resolver.resolve("~/utils", &VfsPath::root()).unwrap().as_str(),
            "/utils"
        );
    }

    #[test]
    fn test_without_alias_treats_alias_as_bare() {
        let resolver = PathResolver::without_alias();
        assert!(resolver.resolve("@/utils", &VfsPath::root()).is_none());
    }

    #[test]
    fn test_infer_extension_order() {
        let files = ["/a.js", "/a.jsx", "/a/index.tsx"];
        let found = infer_extension(&VfsPath::new("/a"), |p| files.contains(&p)).unwrap();
        assert_eq!(found.as_str(), "/a.jsx");

        let files = ["/a/index.tsx", "/a/index.js"];
        let found = infer_extension(&VfsPath::new("/a"), |p| files.contains(&p)).unwrap();
        assert_eq!(found.as_str(), "/a/index.tsx");
    }

    #[test]
    fn test_infer_extension_literal_first() {
        let files = ["/styles.css"];
        let found = infer_extension(&VfsPath::new("/styles.css"), |p| files.contains(&p));
        assert_eq!(found.unwrap().as_str(), "/styles.css");
    }

    #[test]
    fn test_infer_extension_missing() {
        assert!(infer_extension(&VfsPath::new("/nope"), |_| false).is_none());
    }

    #[test]
    fn test_infer_extension_root_index() {
        let files = ["/index.jsx"];
        let found = infer_extension(&VfsPath::root(), |p| files.contains(&p));
        assert_eq!(found.unwrap().as_str(), "/index.jsx");
    }
}
