//! Formatting utilities for sizes, durations and the build summary.

use super::colors_enabled;
use console::Term;
use folio_build::{savings_percent, BuildReport, FileOutcome, FileReport};
use owo_colors::OwoColorize;
use std::path::Path;
use std::time::Duration;

/// Format a byte count with the most appropriate unit.
///
/// ```
/// use folio_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format a duration as `ms`, seconds, or `Xm Ys`.
///
/// ```
/// use std::time::Duration;
/// use folio_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// One summary line for a file, without colors.
pub(crate) fn describe_outcome(file: &FileReport) -> String {
    match &file.outcome {
        FileOutcome::Minified { original, minified } => format!(
            "{} → {} ({:.1}% saved)",
            format_size(*original),
            format_size(*minified),
            savings_percent(*original, *minified)
        ),
        FileOutcome::Copied { bytes } => format!("{} copied", format_size(*bytes)),
        FileOutcome::Fallback { reason } => format!("written unminified: {}", reason),
        FileOutcome::Failed { reason } => format!("failed: {}", reason),
    }
}

/// Print the per-file table and totals of a build to stderr.
///
/// Source paths are shown relative to `source_root` when possible.
pub fn print_build_summary(report: &BuildReport, source_root: &Path, elapsed: Duration) {
    let width = (Term::stderr().size().1 as usize).clamp(20, 80);
    let color = colors_enabled();

    if color {
        eprintln!("\n{}", "Build Summary".bold().underline());
    } else {
        eprintln!("\nBuild Summary");
    }
    eprintln!("{}", "─".repeat(width));

    for file in &report.files {
        let name = file
            .source
            .strip_prefix(source_root)
            .unwrap_or(&file.source)
            .display()
            .to_string();
        let detail = describe_outcome(file);
        let stage = format!("[{}]", file.stage.label());

        if !color {
            eprintln!("  ▸ {} {} {}", stage, name, detail);
            continue;
        }
        match file.outcome {
            FileOutcome::Failed { .. } => {
                eprintln!("  {} {} {} {}", "▸".red(), stage.dimmed(), name.bold(), detail.red())
            }
            FileOutcome::Fallback { .. } => eprintln!(
                "  {} {} {} {}",
                "▸".yellow(),
                stage.dimmed(),
                name.bold(),
                detail.yellow()
            ),
            _ => eprintln!(
                "  {} {} {} {}",
                "▸".blue(),
                stage.dimmed(),
                name.bright_white().bold(),
                detail.dimmed()
            ),
        }
    }

    eprintln!("{}", "─".repeat(width));

    let original = report.total_original();
    let minified = report.total_minified();
    let totals = format!(
        "{} files ({}), {} → {} minified ({:.1}% saved) in {}",
        report.written(),
        format_size(report.output_bytes()),
        format_size(original),
        format_size(minified),
        savings_percent(original, minified),
        format_duration(elapsed)
    );
    if color {
        eprintln!("  {} {}", "Total:".bold(), totals.green());
    } else {
        eprintln!("  Total: {}", totals);
    }
}
