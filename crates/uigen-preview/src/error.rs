//! Error types for preview compilation.
//!
//! Most of these never escape [`PreviewCompiler::compile`]: they are
//! rendered into the artifact's error list instead. Only template and
//! configuration failures surface as `Err`.
//!
//! [`PreviewCompiler::compile`]: crate::PreviewCompiler::compile

use thiserror::Error;

/// Errors that can occur while building a preview.
///
/// # Examples
///
/// ```
/// use uigen_preview::PreviewError;
///
/// let error = PreviewError::Resolution {
///     specifier: "./Missing".to_string(),
///     importer: "/App.jsx".to_string(),
/// };
///
/// assert!(error.is_per_file());
/// assert_eq!(error.to_string(), "Cannot resolve import './Missing' in /App.jsx");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    /// A source file failed to parse or transform
    #[error("Failed to compile {path}: {message}")]
    Transform {
        /// File that failed
        path: String,
        /// Parser or transformer diagnostics
        message: String,
    },

    /// An import specifier matched nothing
    #[error("Cannot resolve import '{specifier}' in {importer}")]
    Resolution {
        /// Specifier as written
        specifier: String,
        /// Importing file
        importer: String,
    },

    /// An import resolved to a file the preview cannot load as a module
    #[error("Unsupported module type: {path} (imported by {importer})")]
    UnsupportedModule {
        /// Resolved file
        path: String,
        /// Importing file
        importer: String,
    },

    /// A `.json` module did not parse
    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson {
        /// JSON file
        path: String,
        /// Parser message
        message: String,
    },

    /// Document template registration or rendering failed
    #[error("Template error: {message}")]
    Template {
        /// Handlebars message
        message: String,
    },

    /// Preview settings are unusable
    #[error("Invalid preview configuration: {message}")]
    Config {
        /// What is wrong
        message: String,
    },
}

impl PreviewError {
    /// Returns `true` for failures scoped to a single project file.
    #[must_use]
    pub const fn is_per_file(&self) -> bool {
        matches!(
            self,
            Self::Transform { .. }
                | Self::Resolution { .. }
                | Self::UnsupportedModule { .. }
                | Self::InvalidJson { .. }
        )
    }

    /// Returns `true` if a template failed.
    #[must_use]
    pub const fn is_template(&self) -> bool {
        matches!(self, Self::Template { .. })
    }

    /// Returns `true` if the configuration was rejected.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Type alias for preview results.
pub type Result<T> = std::result::Result<T, PreviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let transform = PreviewError::Transform {
            path: "/App.jsx".to_string(),
            message: "Unexpected token".to_string(),
        };
        assert!(transform.is_per_file());
        assert!(!transform.is_template());
        assert_eq!(
            transform.to_string(),
            "Failed to compile /App.jsx: Unexpected token"
        );

        let config = PreviewError::Config {
            message: "alias".to_string(),
        };
        assert!(config.is_config());
        assert!(!config.is_per_file());
    }
}
