//! Configuration and diagram entry model for diagram-export.
//!
//! Holds the YAML-backed [`ExportConfig`], the [`DiagramEntry`] record fed to
//! the exporter, manifest loading, and [`ConfigError`].

pub mod config;
pub mod defaults;
pub mod entry;
pub mod error;
pub mod manifest;

pub use config::{ExportConfig, OUTPUT_DIR_ENV};
pub use entry::{DiagramEntry, select_entries, validate_entries, validate_name};
pub use error::ConfigError;
pub use manifest::DiagramManifest;
