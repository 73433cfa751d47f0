//! Preview settings.

use crate::error::{PreviewError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uigen_vfs::DEFAULT_ALIAS_PREFIX;

/// Libraries the mount code and the JSX runtime import; they must be in the
/// allow-list.
pub const REQUIRED_LIBRARIES: [&str; 3] = ["react", "react/jsx-runtime", "react-dom/client"];

const REACT_VERSION: &str = "19.1.0";
const LUCIDE_VERSION: &str = "0.468.0";

/// Settings for the preview compiler.
///
/// Deserializes from the `[preview]` section of the configuration file;
/// every field has a default.
///
/// # Examples
///
/// ```
/// use uigen_preview::PreviewConfig;
///
/// let config = PreviewConfig::default();
/// assert_eq!(config.alias_prefix, "@/");
/// assert!(config.libraries.contains_key("react"));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Import prefix mapped to the project root
    pub alias_prefix: String,

    /// Tailwind script URL injected into the document; empty disables it
    pub tailwind_cdn: String,

    /// Document title
    pub title: String,

    /// Allow-listed packages: bare specifier to ES module URL
    pub libraries: BTreeMap<String, String>,
}

impl PreviewConfig {
    /// Checks that the settings can produce a working document.
    ///
    /// # Errors
    ///
    /// Returns `PreviewError::Config` if the alias prefix is empty or does
    /// not end in `/`, or if a library the mount code needs is missing.
    pub fn validate(&self) -> Result<()> {
        if self.alias_prefix.is_empty() {
            return Err(PreviewError::Config {
                message: "alias_prefix must not be empty".to_string(),
            });
        }
        if !self.alias_prefix.ends_with('/') {
            return Err(PreviewError::Config {
                message: format!("alias_prefix must end with '/': {}", self.alias_prefix),
            });
        }
        for required in REQUIRED_LIBRARIES {
            if !self.libraries.contains_key(required) {
                return Err(PreviewError::Config {
                    message: format!("libraries must include '{required}'"),
                });
            }
        }
        Ok(())
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        let esm = |path: &str| format!("https://esm.sh/{path}");
        let libraries = [
            ("react", esm(&format!("react@{REACT_VERSION}"))),
            ("react/jsx-runtime", esm(&format!("react@{REACT_VERSION}/jsx-runtime"))),
            ("react-dom", esm(&format!("react-dom@{REACT_VERSION}?external=react"))),
            (
                "react-dom/client",
                esm(&format!("react-dom@{REACT_VERSION}/client?external=react")),
            ),
            ("lucide-react", esm(&format!("lucide-react@{LUCIDE_VERSION}?external=react"))),
        ]
        .into_iter()
        .map(|(name, url)| (name.to_string(), url))
        .collect();

        Self {
            alias_prefix: DEFAULT_ALIAS_PREFIX.to_string(),
            tailwind_cdn: "https://cdn.tailwindcss.com".to_string(),
            title: "UIGen Preview".to_string(),
            libraries,
        }
    }
}
