//! Stylesheet error types.

use std::path::PathBuf;

/// Error type for stylesheet loading and parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StylesheetError {
    /// YAML parse error, including unknown attributes.
    #[error("Failed to parse stylesheet{}: {message}", location(.path))]
    Parse {
        /// Optional source file path.
        path: Option<PathBuf>,
        /// Error message from the YAML parser.
        message: String,
    },

    /// The stylesheet names a style the renderer does not use.
    #[error("Unknown style '{style}'{}", location(.path))]
    UnknownStyle {
        style: String,
        path: Option<PathBuf>,
    },

    /// Invalid color value.
    #[error("Invalid color '{value}' for style '{style}'{}", location(.path))]
    InvalidColor {
        style: String,
        value: String,
        path: Option<PathBuf>,
    },

    /// The stylesheet file could not be read.
    #[error("Failed to load stylesheet: {message}")]
    Load { message: String },
}

impl StylesheetError {
    pub(crate) fn with_path(self, source: PathBuf) -> Self {
        match self {
            StylesheetError::Parse { message, .. } => StylesheetError::Parse {
                path: Some(source),
                message,
            },
            StylesheetError::UnknownStyle { style, .. } => StylesheetError::UnknownStyle {
                style,
                path: Some(source),
            },
            StylesheetError::InvalidColor { style, value, .. } => StylesheetError::InvalidColor {
                style,
                value,
                path: Some(source),
            },
            other => other,
        }
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}
