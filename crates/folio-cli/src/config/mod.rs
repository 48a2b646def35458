//! Project configuration with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and
//! `folio.config.json`. Priority: CLI > Environment > File > Defaults

mod defaults;
mod loading;
mod overrides;
mod tests;
mod validation;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CliError, Result};

pub use defaults::*;
pub use loading::{env_key_to_field, CONFIG_FILE, ENV_PREFIX};
pub use overrides::ConfigOverrides;

/// Folio configuration - loaded from folio.config.json, `FOLIO_*` variables
/// and CLI args.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FolioConfig {
    /// Directory holding the site sources
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Build output directory (removed and recreated on every build)
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Dev server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Dev server port
    #[schemars(range(min = 1, max = 65535))]
    #[serde(default = "default_port")]
    pub port: u16,

    /// Open the browser when the dev server starts
    #[serde(default = "default_true")]
    pub open: bool,

    /// Watch the sources and reload connected browsers on change
    #[serde(default = "default_true")]
    pub live_reload: bool,

    /// Minimum milliseconds between two reloads
    #[schemars(range(min = 1))]
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Serve the root document for unknown paths instead of a 404
    #[serde(default = "default_true")]
    pub spa_fallback: bool,

    /// Path components the watcher ignores (hidden directories always are)
    #[serde(default = "default_watch_ignore")]
    pub watch_ignore: Vec<String>,

    /// Document served for `/` and, with `spaFallback`, for unknown paths
    #[serde(default = "default_root_document")]
    pub root_document: String,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            build_dir: default_build_dir(),
            host: default_host(),
            port: default_port(),
            open: true,
            live_reload: true,
            debounce_ms: default_debounce_ms(),
            spa_fallback: true,
            watch_ignore: default_watch_ignore(),
            root_document: default_root_document(),
        }
    }
}

impl FolioConfig {
    /// Generate JSON Schema for folio.config.json.
    pub fn json_schema() -> Result<serde_json::Value> {
        let schema = schemars::schema_for!(FolioConfig);
        serde_json::to_value(schema).map_err(CliError::from)
    }
}
