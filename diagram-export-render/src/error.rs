//! Typed error types for diagram-export-render.

use std::path::PathBuf;

use diagram_export_config::ConfigError;
use thiserror::Error;

/// A single diagram that could not be rendered.
///
/// Network errors, timeouts, bad statuses, empty bodies and file write
/// errors all collapse into this one kind. It is recorded per entry and
/// never aborts a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {message}")]
pub struct RenderFailure {
    /// Entry name.
    pub name: String,
    /// Underlying error text.
    pub message: String,
}

impl RenderFailure {
    pub fn new(name: impl Into<String>, message: impl ToString) -> Self {
        Self {
            name: name.into(),
            message: message.to_string(),
        }
    }
}

/// Errors that stop a batch before any entry is attempted.
#[derive(Debug, Error)]
pub enum ExportError {
    /// An entry name is unsafe or duplicated.
    #[error(transparent)]
    InvalidEntry(#[from] ConfigError),

    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
