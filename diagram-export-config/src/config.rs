//! Export configuration loaded from `~/.config/diagram-export/config.yaml`.
//!
//! Every field has a default, so a missing file (or an empty one) yields a
//! usable configuration apart from the output directory, which must always be
//! supplied explicitly by the caller.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::ConfigError;

/// Environment variable consulted when neither the CLI nor the config file
/// names an output directory.
pub const OUTPUT_DIR_ENV: &str = "DIAGRAM_EXPORT_OUTPUT_DIR";

/// Image formats the rendering endpoint can return.
const IMAGE_TYPES: &[&str] = &["png", "jpeg", "webp"];

/// Settings for a single export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory that receives `<name>.<image_type>` files.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Base URL of the rendering endpoint; the encoded payload is appended as
    /// the next path segment.
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// Value of the `type` query parameter and the output file extension.
    #[serde(default = "defaults::image_type")]
    pub image_type: String,

    /// Value of the `bgColor` query parameter.
    #[serde(default = "defaults::background_color")]
    pub background_color: String,

    /// `User-Agent` header sent with every request.
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "defaults::timeout_secs")]
    pub timeout_secs: u64,

    /// Number of diagrams rendered concurrently. 1 means strictly sequential.
    #[serde(default = "defaults::jobs")]
    pub jobs: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            endpoint: defaults::endpoint(),
            image_type: defaults::image_type(),
            background_color: defaults::background_color(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout_secs(),
            jobs: defaults::jobs(),
        }
    }
}

impl ExportConfig {
    /// Load the config from the default location, falling back to defaults
    /// when no file exists. The file is never created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load the config from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Parse a config from YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, "<inline>")
    }

    fn parse(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a map.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(contents).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Directory holding the config file.
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("diagram-export")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // XDG layout on every Unix, including macOS: ~/.config/diagram-export
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("diagram-export")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Default config file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check every field for semantic validity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.endpoint).map_err(|e| {
            ConfigError::Validation(format!("endpoint '{}' is not a valid URL: {e}", self.endpoint))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "endpoint scheme '{}' is not supported; use http or https",
                parsed.scheme()
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ConfigError::Validation(format!(
                "endpoint '{}' must not carry a query string or fragment",
                self.endpoint
            )));
        }

        if !IMAGE_TYPES.contains(&self.image_type.as_str()) {
            return Err(ConfigError::Validation(format!(
                "image_type '{}' is not one of: {}",
                self.image_type,
                IMAGE_TYPES.join(", ")
            )));
        }
        if self.background_color.trim().is_empty() {
            return Err(ConfigError::Validation(
                "background_color must not be empty".to_string(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user_agent must not be empty".to_string(),
            ));
        }

        let timeout_range = defaults::MIN_TIMEOUT_SECS..=defaults::MAX_TIMEOUT_SECS;
        if !timeout_range.contains(&self.timeout_secs) {
            return Err(ConfigError::Validation(format!(
                "timeout_secs {} is outside {}..={}",
                self.timeout_secs,
                defaults::MIN_TIMEOUT_SECS,
                defaults::MAX_TIMEOUT_SECS
            )));
        }
        if self.jobs == 0 || self.jobs > defaults::MAX_JOBS {
            return Err(ConfigError::Validation(format!(
                "jobs {} is outside 1..={}",
                self.jobs,
                defaults::MAX_JOBS
            )));
        }

        Ok(())
    }

    /// Resolve the output directory: explicit override, then `output_dir`,
    /// then the [`OUTPUT_DIR_ENV`] environment variable.
    pub fn resolve_output_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf, ConfigError> {
        self.resolve_output_dir_with(override_dir, std::env::var_os(OUTPUT_DIR_ENV))
    }

    /// Same as [`Self::resolve_output_dir`] with the environment value passed in.
    pub fn resolve_output_dir_with(
        &self,
        override_dir: Option<&Path>,
        env_value: Option<OsString>,
    ) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.output_dir {
            return Ok(dir.clone());
        }
        match env_value {
            Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
            _ => Err(ConfigError::MissingOutputDir),
        }
    }
}
