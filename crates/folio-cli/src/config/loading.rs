use crate::config::{ConfigOverrides, FolioConfig};
use crate::error::{ConfigError, Result};
use figment::{
    providers::{Env, Format as _, Json, Serialized},
    Figment,
};
use std::path::Path;

/// Config file looked up in the project root when no path is given.
pub const CONFIG_FILE: &str = "folio.config.json";

/// Prefix of the environment variables read into the configuration.
pub const ENV_PREFIX: &str = "FOLIO_";

impl FolioConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// An explicit `config_path` must exist; the default `folio.config.json`
    /// in `project_root` is optional. Relative paths in the result are left
    /// as given and resolved by the caller against `project_root`.
    pub fn load(
        overrides: &ConfigOverrides,
        project_root: &Path,
        config_path: Option<&Path>,
    ) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    project_root.join(path)
                };
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path).into());
                }
                Some(path)
            }
            None => {
                let default_path = project_root.join(CONFIG_FILE);
                default_path.is_file().then_some(default_path)
            }
        };

        if let Some(path) = config_file {
            tracing::debug!("Loading config from {}", path.display());
            figment = figment.merge(Json::file(path));
        }

        // FOLIO_BUILD_DIR -> buildDir, FOLIO_PORT -> port, ...
        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| env_key_to_field(key.as_str()).into())
                .lowercase(false),
        );

        if !overrides.is_empty() {
            figment = figment.merge(Serialized::defaults(overrides));
        }

        let config: Self = figment.extract().map_err(|e| ConfigError::Invalid {
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }
}

/// Convert an environment key (without prefix) into a camelCase field name.
///
/// `BUILD_DIR` becomes `buildDir`, `PORT` becomes `port`.
pub fn env_key_to_field(key: &str) -> String {
    let mut field = String::with_capacity(key.len());
    let mut upper_next = false;

    for c in key.chars() {
        if c == '_' {
            upper_next = !field.is_empty();
        } else if upper_next {
            field.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            field.push(c.to_ascii_lowercase());
        }
    }

    field
}
