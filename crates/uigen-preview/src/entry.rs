//! Entry-point discovery and the preview state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use uigen_vfs::{FileMap, VfsPath};

/// Entry candidates, highest priority first.
pub const ENTRY_CANDIDATES: [&str; 6] = [
    "/App.jsx",
    "/App.tsx",
    "/index.jsx",
    "/index.tsx",
    "/src/App.jsx",
    "/src/App.tsx",
];

/// Picks the module the preview mounts.
///
/// The fixed candidates win in order; otherwise the first `.jsx`/`.tsx` file
/// in path order is used.
///
/// # Examples
///
/// ```
/// use uigen_preview::find_entry;
/// use uigen_vfs::FileMap;
///
/// let mut files = FileMap::new();
/// files.insert("/src/App.tsx".to_string(), String::new());
/// files.insert("/index.jsx".to_string(), String::new());
/// assert_eq!(find_entry(&files), Some("/index.jsx"));
///
/// files.insert("/App.jsx".to_string(), String::new());
/// assert_eq!(find_entry(&files), Some("/App.jsx"));
/// ```
#[must_use]
pub fn find_entry(files: &FileMap) -> Option<&str> {
    ENTRY_CANDIDATES
        .iter()
        .find_map(|candidate| files.get_key_value(*candidate).map(|(key, _)| key.as_str()))
        .or_else(|| {
            files
                .keys()
                .find(|path| matches!(VfsPath::new(path).extension(), Some("jsx" | "tsx")))
                .map(String::as_str)
        })
}

/// What the preview surface is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreviewState {
    /// The project has no files yet
    Welcome,
    /// Files exist but none can be mounted
    NoEntry,
    /// A document was produced, possibly with non-fatal errors
    Compiled,
    /// The entry module itself failed to compile
    CompileError,
}

impl PreviewState {
    /// Returns `true` if a runnable document was produced.
    #[must_use]
    pub const fn is_compiled(self) -> bool {
        matches!(self, Self::Compiled)
    }

    /// Kebab-case name, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::NoEntry => "no-entry",
            Self::Compiled => "compiled",
            Self::CompileError => "compile-error",
        }
    }
}

impl fmt::Display for PreviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> FileMap {
        paths
            .iter()
            .map(|p| ((*p).to_string(), String::new()))
            .collect()
    }

    #[test]
    fn test_priority_order() {
        let all = files(&ENTRY_CANDIDATES);
        assert_eq!(find_entry(&all), Some("/App.jsx"));

        for (i, expected) in ENTRY_CANDIDATES.iter().enumerate() {
            let subset = files(&ENTRY_CANDIDATES[i..]);
            assert_eq!(find_entry(&subset), Some(*expected));
        }
    }

    #[test]
    fn test_fallback_first_component() {
        let set = files(&["/readme.md", "/widgets/Zed.tsx", "/components/Card.jsx"]);
        assert_eq!(find_entry(&set), Some("/components/Card.jsx"));
    }

    #[test]
    fn test_no_component() {
        assert_eq!(find_entry(&files(&["/readme.md", "/util.js"])), None);
        assert_eq!(find_entry(&FileMap::new()), None);
    }

    #[test]
    fn test_state_serialization() {
        assert_eq!(
            serde_json::to_string(&PreviewState::CompileError).unwrap(),
            "\"compile-error\""
        );
        assert_eq!(PreviewState::NoEntry.to_string(), "no-entry");
    }
}
