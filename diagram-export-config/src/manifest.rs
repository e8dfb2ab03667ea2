//! YAML manifests listing diagram entries.
//!
//! ```yaml
//! diagrams:
//!   - name: 01_example
//!     source: |
//!       stateDiagram-v2
//!       [*] --> IDLE
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entry::{DiagramEntry, validate_entries};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiagramManifest {
    #[serde(default)]
    pub diagrams: Vec<DiagramEntry>,
}

impl DiagramManifest {
    /// Read and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Parse and validate a manifest from YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, "<inline>")
    }

    fn parse(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        let manifest: Self =
            serde_yaml_ng::from_str(contents).map_err(|source| ConfigError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        validate_entries(&manifest.diagrams)?;
        log::debug!(
            "Manifest {} lists {} diagrams",
            origin,
            manifest.diagrams.len()
        );
        Ok(manifest)
    }

    pub fn into_entries(self) -> Vec<DiagramEntry> {
        self.diagrams
    }
}
