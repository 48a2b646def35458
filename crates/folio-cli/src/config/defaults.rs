use std::path::PathBuf;

pub fn default_source_dir() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_build_dir() -> PathBuf {
    PathBuf::from("dist")
}

pub fn default_host() -> String {
    "localhost".to_string()
}

pub fn default_port() -> u16 {
    8000
}

pub fn default_debounce_ms() -> u64 {
    500
}

pub fn default_watch_ignore() -> Vec<String> {
    vec!["node_modules".to_string(), "dist".to_string()]
}

pub fn default_root_document() -> String {
    "index.html".to_string()
}

pub(crate) fn default_true() -> bool {
    true
}
