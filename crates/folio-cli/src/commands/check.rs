//! Check command implementation.
//!
//! Validates the site sources without building: required files, HTML
//! structure and accessibility basics, and that every stylesheet and script
//! parses.

use crate::cli::CheckArgs;
use crate::commands::utils::{self, KEY_FILES};
use crate::config::{ConfigOverrides, FolioConfig};
use crate::error::{CliError, Result};
use crate::ui;
use folio_build::{discover, scan_elements, Asset, AssetKind, MarkupElement, SCRIPT_DIR, STYLESHEET_DIR};
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::path::Path;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One problem found in the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    /// Path relative to the site directory
    pub file: String,
    pub message: String,
}

impl Finding {
    fn error(file: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            file: file.to_string(),
            message: message.into(),
        }
    }

    fn warning(file: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            file: file.to_string(),
            message: message.into(),
        }
    }
}

/// Execute the check command.
///
/// # Errors
///
/// [`CliError::CheckFailed`] with the number of errors (warnings count too
/// with `--strict`).
pub async fn execute(args: CheckArgs) -> Result<()> {
    let root = utils::project_root(args.cwd.as_deref())?;
    let config = FolioConfig::load(&ConfigOverrides::default(), &root, None)?;
    let source_dir = utils::resolve_path(&config.source_dir, &root);

    ui::info(&format!("Checking {}", source_dir.display()));
    let findings = check_site(&source_dir)?;

    for finding in &findings {
        let line = format!("{}: {}", finding.file, finding.message);
        match finding.severity {
            Severity::Error => ui::error(&line),
            Severity::Warning => ui::warning(&line),
        }
    }

    let errors = findings
        .iter()
        .filter(|f| args.strict || f.severity == Severity::Error)
        .count();

    if errors > 0 {
        return Err(CliError::CheckFailed(errors));
    }

    let warnings = findings.len();
    if warnings > 0 {
        ui::success(&format!("Site check passed with {} warning(s)", warnings));
    } else {
        ui::success("Site check passed");
    }
    Ok(())
}

/// Run every check over the site in `source_dir`.
pub fn check_site(source_dir: &Path) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();

    for file in KEY_FILES {
        if !source_dir.join(file).is_file() {
            findings.push(Finding::error(file, "required file is missing"));
        }
    }

    for path in discover(source_dir, AssetKind::Markup)? {
        check_asset(source_dir, &path, AssetKind::Markup, &mut findings, check_markup)?;
    }
    for path in discover(&source_dir.join(STYLESHEET_DIR), AssetKind::Stylesheet)? {
        check_asset(source_dir, &path, AssetKind::Stylesheet, &mut findings, check_stylesheet)?;
    }
    for path in discover(&source_dir.join(SCRIPT_DIR), AssetKind::Script)? {
        check_asset(source_dir, &path, AssetKind::Script, &mut findings, check_script)?;
    }

    Ok(findings)
}

fn check_asset(
    source_dir: &Path,
    path: &Path,
    kind: AssetKind,
    findings: &mut Vec<Finding>,
    check: fn(&str, &str, &mut Vec<Finding>),
) -> Result<()> {
    let asset = Asset::read(path, kind)?;
    let name = path
        .strip_prefix(source_dir)
        .unwrap_or(path)
        .display()
        .to_string();

    match std::str::from_utf8(&asset.content) {
        Ok(source) => check(&name, source, findings),
        Err(_) => findings.push(Finding::error(
            &name,
            format!("{} is not valid UTF-8", asset.kind.label()),
        )),
    }
    Ok(())
}

/// HTML must tokenize and carry a title, a charset, a viewport and alt text
/// on every image.
fn check_markup(name: &str, source: &str, findings: &mut Vec<Finding>) {
    let elements = match scan_elements(source) {
        Ok(elements) => elements,
        Err(e) => {
            findings.push(Finding::error(name, format!("malformed HTML: {}", e)));
            return;
        }
    };

    let has = |predicate: fn(&MarkupElement) -> bool| elements.iter().any(predicate);

    if !has(|e| e.name == "title") {
        findings.push(Finding::error(name, "missing <title>"));
    }
    if !has(|e| e.name == "meta" && e.has_attribute("charset")) {
        findings.push(Finding::error(name, "missing <meta charset>"));
    }
    if !has(|e| e.name == "meta" && e.attribute("name") == Some("viewport")) {
        findings.push(Finding::error(name, "missing <meta name=\"viewport\">"));
    }

    for img in elements.iter().filter(|e| e.name == "img") {
        if !img.has_attribute("alt") {
            let src = img.attribute("src").unwrap_or("?");
            findings.push(Finding::error(
                name,
                format!("<img src=\"{}\"> has no alt text", src),
            ));
        }
    }

    if !has(|e| e.name == "html" && e.has_attribute("lang")) {
        findings.push(Finding::warning(name, "<html> has no lang attribute"));
    }
    if !has(|e| e.name == "meta" && e.attribute("name") == Some("description")) {
        findings.push(Finding::warning(name, "missing <meta name=\"description\">"));
    }
}

fn check_stylesheet(name: &str, source: &str, findings: &mut Vec<Finding>) {
    if let Err(e) = StyleSheet::parse(source, ParserOptions::default()) {
        findings.push(Finding::error(name, format!("invalid CSS: {}", e)));
    }
}

fn check_script(name: &str, source: &str, findings: &mut Vec<Finding>) {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, SourceType::cjs()).parse();

    if let Some(error) = parsed.errors.first() {
        findings.push(Finding::error(name, format!("invalid JavaScript: {}", error)));
    } else if parsed.panicked {
        findings.push(Finding::error(name, "invalid JavaScript"));
    }
}
