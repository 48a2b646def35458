use crate::config::FolioConfig;
use crate::error::{ConfigError, Result};
use std::path::{Component, Path};

impl FolioConfig {
    /// Validate values that deserialize fine but cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port".to_string(),
                value: "0".to_string(),
                hint: "Use a port between 1 and 65535".to_string(),
            }
            .into());
        }

        if self.debounce_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "debounceMs".to_string(),
                value: "0".to_string(),
                hint: "The reload window must be at least 1 ms".to_string(),
            }
            .into());
        }

        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "host".to_string(),
                value: self.host.clone(),
                hint: "Use a host name or address such as localhost or 0.0.0.0".to_string(),
            }
            .into());
        }

        validate_root_document(&self.root_document)
    }
}

/// The root document must be a plain file name inside the served directory.
pub fn validate_root_document(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if !plain {
        return Err(ConfigError::InvalidValue {
            field: "rootDocument".to_string(),
            value: name.to_string(),
            hint: "Use a file name like index.html, without directories".to_string(),
        }
        .into());
    }

    Ok(())
}
