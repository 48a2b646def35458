//! Status command implementation.

use crate::cli::StatusArgs;
use crate::commands::utils::{self, KEY_FILES};
use crate::config::{ConfigOverrides, FolioConfig};
use crate::error::Result;
use crate::ui;
use folio_build::{BuildManifest, MANIFEST_FILE};

/// Execute the status command.
///
/// Reports which key site files exist and whether there is build output.
/// Missing files are warnings, not errors.
pub async fn execute(args: StatusArgs) -> Result<()> {
    let root = utils::project_root(args.cwd.as_deref())?;
    let config = FolioConfig::load(&ConfigOverrides::default(), &root, None)?;
    let source_dir = utils::resolve_path(&config.source_dir, &root);
    let build_dir = utils::resolve_path(&config.build_dir, &root);

    ui::info(&format!("Project status for {}", root.display()));

    for file in KEY_FILES {
        if source_dir.join(file).is_file() {
            ui::success(&format!("{} exists", file));
        } else {
            ui::warning(&format!("{} is missing", file));
        }
    }

    if !build_dir.is_dir() {
        ui::warning(&format!(
            "No build output in {} (run `folio build`)",
            build_dir.display()
        ));
        return Ok(());
    }

    match BuildManifest::read_from(&build_dir) {
        Ok(manifest) => ui::success(&format!(
            "Build output in {} (built {} by {} {})",
            build_dir.display(),
            manifest.build_time,
            manifest.build_tool,
            manifest.version
        )),
        Err(e) => {
            tracing::debug!("Could not read manifest: {}", e);
            ui::warning(&format!(
                "{} exists but has no readable {}",
                build_dir.display(),
                MANIFEST_FILE
            ));
        }
    }

    Ok(())
}
