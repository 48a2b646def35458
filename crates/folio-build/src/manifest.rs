//! Build manifest (`build-info.json`).

use crate::error::{BuildError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name of the manifest inside the build directory.
pub const MANIFEST_FILE: &str = "build-info.json";

/// Value of the manifest's `build_tool` field.
pub const BUILD_TOOL: &str = "folio";

/// Completion record of a build run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildManifest {
    /// Local time the manifest was created, ISO-8601
    pub build_time: String,
    pub build_tool: String,
    pub version: String,
}

impl BuildManifest {
    /// A manifest stamped with the current local time.
    pub fn now() -> Self {
        Self {
            build_time: chrono::Local::now()
                .to_rfc3339_opts(chrono::SecondsFormat::Micros, false),
            build_tool: BUILD_TOOL.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Write the manifest as pretty JSON into `dir`, replacing any previous one.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        let path = dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).map_err(|source| BuildError::Manifest { path, source })
    }

    /// Read the manifest from `dir`.
    pub fn read_from(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        let json = fs::read_to_string(&path).map_err(|source| BuildError::Manifest { path, source })?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_has_exactly_three_keys() {
        let temp = TempDir::new().unwrap();
        BuildManifest::now().write_to(temp.path()).unwrap();

        let raw = fs::read_to_string(temp.path().join(MANIFEST_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, ["build_time", "build_tool", "version"]);
        assert_eq!(object["build_tool"], "folio");
        assert!(raw.contains("\n  \"build_tool\""));
    }

    #[test]
    fn test_build_time_is_iso8601() {
        let manifest = BuildManifest::now();
        assert!(chrono::DateTime::parse_from_rfc3339(&manifest.build_time).is_ok());
    }

    #[test]
    fn test_write_overwrites_and_reads_back() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(MANIFEST_FILE), "stale").unwrap();

        let manifest = BuildManifest::now();
        manifest.write_to(temp.path()).unwrap();
        assert_eq!(BuildManifest::read_from(temp.path()).unwrap(), manifest);
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        let err = BuildManifest::now()
            .write_to(&temp.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, BuildError::Manifest { .. }));
    }
}
