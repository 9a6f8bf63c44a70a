//! Error types for the style object model.

use std::path::PathBuf;

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or querying a style object model.
///
/// Resolution itself never fails on user-authored content: cycles, missing
/// ancestors and empty fallback chains degrade to ordinary values. These
/// variants cover caller contract violations and I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON input.
    #[error("Invalid {context} JSON: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The property registry has no entry for a standard property.
    #[error("Unknown style property '{property}'")]
    UnknownProperty { property: String },

    /// A snapshot references a style source that was never defined.
    #[error("Unknown style source '{id}'")]
    UnknownStyleSource { id: String },

    /// A snapshot references a breakpoint that was never defined.
    #[error("Unknown breakpoint '{id}'")]
    UnknownBreakpoint { id: String },
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a JSON error.
    pub fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    /// Create an unknown property error.
    pub fn unknown_property(property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            property: property.into(),
        }
    }
}
