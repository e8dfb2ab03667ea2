//! Diagram entries and the checks that make them safe to render.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A named diagram definition.
///
/// The name doubles as the output filename stem, so it has to be a single
/// path component; see [`validate_name`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramEntry {
    pub name: String,
    pub source: String,
}

impl DiagramEntry {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Source with surrounding whitespace removed, as sent to the renderer.
    pub fn trimmed_source(&self) -> &str {
        self.source.trim()
    }

    /// Output file name for the given image extension, e.g. `foo.png`.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.name, extension)
    }
}

/// Reject names that could not be used as a file stem inside the output
/// directory.
pub fn validate_name(name: &str) -> Result<(), ConfigError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.trim() != name {
        Some("name has leading or trailing whitespace")
    } else if name == "." || name == ".." {
        Some("name is a relative directory reference")
    } else if name.contains(['/', '\\']) {
        Some("name contains a path separator")
    } else if name.contains('\0') {
        Some("name contains a NUL byte")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConfigError::UnsafeName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Validate every name and reject duplicates.
pub fn validate_entries(entries: &[DiagramEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for entry in entries {
        validate_name(&entry.name)?;
        if !seen.insert(entry.name.as_str()) {
            return Err(ConfigError::DuplicateName(entry.name.clone()));
        }
    }
    Ok(())
}

/// Keep only the entries named in `only`, preserving the original order.
///
/// An empty `only` keeps everything. A name that matches no entry is an error.
pub fn select_entries(
    entries: Vec<DiagramEntry>,
    only: &[String],
) -> Result<Vec<DiagramEntry>, ConfigError> {
    if only.is_empty() {
        return Ok(entries);
    }

    if let Some(unknown) = only
        .iter()
        .find(|name| !entries.iter().any(|entry| &entry.name == *name))
    {
        return Err(ConfigError::UnknownName(unknown.clone()));
    }

    Ok(entries
        .into_iter()
        .filter(|entry| only.contains(&entry.name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(names: &[&str]) -> Vec<DiagramEntry> {
        names
            .iter()
            .map(|name| DiagramEntry::new(*name, "graph TD; A-->B"))
            .collect()
    }

    #[test]
    fn test_trimmed_source() {
        let entry = DiagramEntry::new("a", "\n  stateDiagram-v2\n  [*] --> IDLE\n\n");
        assert_eq!(entry.trimmed_source(), "stateDiagram-v2\n  [*] --> IDLE");
    }

    #[test]
    fn test_file_name() {
        let entry = DiagramEntry::new("03_exu_state_machine", "");
        assert_eq!(entry.file_name("png"), "03_exu_state_machine.png");
    }

    #[test]
    fn test_valid_names() {
        for name in ["01_lw_main_timing", "icache-miss", "a.b", "日本語"] {
            assert!(validate_name(name).is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn test_unsafe_names() {
        for name in ["", " padded", "..", ".", "../escape", "a/b", "a\\b", "nul\0"] {
            let err = validate_name(name).unwrap_err();
            assert!(
                matches!(err, ConfigError::UnsafeName { .. }),
                "{name:?} should be unsafe, got {err:?}"
            );
        }
    }

    #[test]
    fn test_duplicate_names() {
        let err = validate_entries(&entries(&["a", "b", "a"])).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName(ref n) if n == "a"));
        assert!(validate_entries(&entries(&["a", "b"])).is_ok());
    }

    #[test]
    fn test_select_keeps_original_order() {
        let only = vec!["c".to_string(), "a".to_string()];
        let selected = select_entries(entries(&["a", "b", "c"]), &only).expect("select");
        let names: Vec<_> = selected.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_select_empty_keeps_all() {
        let selected = select_entries(entries(&["a", "b"]), &[]).expect("select");
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_select_unknown_name() {
        let only = vec!["zzz".to_string()];
        let err = select_entries(entries(&["a"]), &only).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownName(ref n) if n == "zzz"));
    }
}
