//! Typed error variants for the diagram-export-config crate.
//!
//! Covers config file I/O, YAML parsing, semantic validation and the
//! diagram entry checks that run before any network or disk activity.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading configuration or preparing diagram entries.
///
/// The binary maps every variant to a usage-error exit code, so callers can
/// tell "the run never started" apart from per-diagram render failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config or manifest file could not be read.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A config or manifest file contained invalid YAML.
    #[error("YAML parse error in {origin}: {source}")]
    Parse {
        /// File path, or `<inline>` for string input.
        origin: String,
        /// Underlying parser error.
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A field value failed semantic validation.
    #[error("Config validation error: {0}")]
    Validation(String),

    /// A diagram name cannot be used as an output filename stem.
    #[error("Unsafe diagram name '{name}': {reason}")]
    UnsafeName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Two entries in the same run share a name.
    #[error("Duplicate diagram name '{0}'")]
    DuplicateName(String),

    /// A name passed to `--only` matches no entry.
    #[error("Unknown diagram name '{0}'")]
    UnknownName(String),

    /// No output directory was configured anywhere.
    #[error(
        "No output directory configured: pass --output-dir, set `output_dir` in the \
         config file, or set {}",
        crate::config::OUTPUT_DIR_ENV
    )]
    MissingOutputDir,
}
