use serde::Serialize;
use std::path::PathBuf;

use crate::cli::{BuildArgs, DevArgs};

/// Values given on the command line.
///
/// Only fields that were actually passed are serialized, so merging this on
/// top of the other sources leaves everything else untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_reload: Option<bool>,
}

impl ConfigOverrides {
    /// True when nothing was given on the command line.
    pub fn is_empty(&self) -> bool {
        self.source_dir.is_none()
            && self.build_dir.is_none()
            && self.host.is_none()
            && self.port.is_none()
            && self.open.is_none()
            && self.live_reload.is_none()
    }
}

impl From<&BuildArgs> for ConfigOverrides {
    fn from(args: &BuildArgs) -> Self {
        Self {
            source_dir: args.source.clone(),
            build_dir: args.build.clone(),
            ..Self::default()
        }
    }
}

impl From<&DevArgs> for ConfigOverrides {
    fn from(args: &DevArgs) -> Self {
        Self {
            host: args.host.clone(),
            port: args.port,
            // Flags can only switch these off
            open: args.no_browser.then_some(false),
            live_reload: args.no_reload.then_some(false),
            ..Self::default()
        }
    }
}
