#[cfg(test)]
mod tests {
    use crate::config::validation::validate_root_document;
    use crate::config::*;
    use crate::error::ConfigError;
    use serial_test::serial;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn clear_env() {
        for key in ["FOLIO_PORT", "FOLIO_BUILD_DIR", "FOLIO_LIVE_RELOAD", "FOLIO_HOST"] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_defaults() {
        let config = FolioConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("."));
        assert_eq!(config.build_dir, PathBuf::from("dist"));
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8000);
        assert_eq!(config.debounce_ms, 500);
        assert!(config.open && config.live_reload && config.spa_fallback);
        assert_eq!(config.watch_ignore, ["node_modules", "dist"]);
        assert_eq!(config.root_document, "index.html");
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let value = serde_json::to_value(FolioConfig::default()).unwrap();
        assert!(value.get("buildDir").is_some());
        assert!(value.get("liveReload").is_some());
        assert!(value.get("build_dir").is_none());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<FolioConfig, _> = serde_json::from_str(r#"{"outDir": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        assert!(FolioConfig::default().validate().is_ok());
        assert!(FolioConfig {
            port: 0,
            ..FolioConfig::default()
        }
        .validate()
        .is_err());
        assert!(FolioConfig {
            debounce_ms: 0,
            ..FolioConfig::default()
        }
        .validate()
        .is_err());
        assert!(FolioConfig {
            host: "  ".into(),
            ..FolioConfig::default()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_root_document_must_be_plain_name() {
        assert!(validate_root_document("index.html").is_ok());
        assert!(validate_root_document("app.html").is_ok());
        assert!(validate_root_document("pages/index.html").is_err());
        assert!(validate_root_document("../index.html").is_err());
        assert!(validate_root_document("/index.html").is_err());
        assert!(validate_root_document("").is_err());
    }

    #[test]
    fn test_env_key_to_field() {
        assert_eq!(env_key_to_field("PORT"), "port");
        assert_eq!(env_key_to_field("BUILD_DIR"), "buildDir");
        assert_eq!(env_key_to_field("LIVE_RELOAD"), "liveReload");
        assert_eq!(env_key_to_field("SPA_FALLBACK"), "spaFallback");
    }

    #[test]
    fn test_overrides_from_args() {
        let dev = crate::cli::DevArgs {
            port: Some(9000),
            no_browser: true,
            ..Default::default()
        };
        let overrides = ConfigOverrides::from(&dev);
        assert_eq!(overrides.port, Some(9000));
        assert_eq!(overrides.open, Some(false));
        assert_eq!(overrides.live_reload, None);

        let value = serde_json::to_value(&overrides).unwrap();
        assert_eq!(value, serde_json::json!({"port": 9000, "open": false}));

        assert!(ConfigOverrides::from(&crate::cli::BuildArgs::default()).is_empty());
    }

    #[test]
    #[serial]
    fn test_load_without_file_uses_defaults() {
        clear_env();
        let temp = TempDir::new().unwrap();

        let config = FolioConfig::load(&ConfigOverrides::default(), temp.path(), None).unwrap();
        assert_eq!(config, FolioConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_priority() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            r#"{"port": 3000, "buildDir": "public", "host": "127.0.0.1"}"#,
        )
        .unwrap();

        // File over defaults
        let config = FolioConfig::load(&ConfigOverrides::default(), temp.path(), None).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.build_dir, PathBuf::from("public"));

        // Env over file
        std::env::set_var("FOLIO_PORT", "4000");
        std::env::set_var("FOLIO_BUILD_DIR", "out");
        let config = FolioConfig::load(&ConfigOverrides::default(), temp.path(), None).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.build_dir, PathBuf::from("out"));
        assert_eq!(config.host, "127.0.0.1");

        // CLI over env
        let overrides = ConfigOverrides {
            port: Some(5000),
            ..Default::default()
        };
        let config = FolioConfig::load(&overrides, temp.path(), None).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.build_dir, PathBuf::from("out"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_rejects_invalid_file() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), r#"{"port": "eighty"}"#).unwrap();

        let err = FolioConfig::load(&ConfigOverrides::default(), temp.path(), None).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CliError::Config(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_load_explicit_missing_file() {
        clear_env();
        let temp = TempDir::new().unwrap();

        let err = FolioConfig::load(
            &ConfigOverrides::default(),
            temp.path(),
            Some(std::path::Path::new("custom.json")),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            crate::error::CliError::Config(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_json_schema() {
        let schema = FolioConfig::json_schema().unwrap();
        let text = schema.to_string();
        assert!(text.contains("debounceMs"));
        assert!(text.contains("rootDocument"));
    }
}
