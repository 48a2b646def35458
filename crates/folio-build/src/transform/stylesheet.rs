//! CSS minification through lightningcss.

use super::Transform;
use crate::error::TransformError;
use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions, StyleSheet},
};
use std::path::Path;

/// Stylesheet minifier.
///
/// Parses the stylesheet, merges and shortens rules, and prints it without
/// comments or insignificant whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct StylesheetMinifier;

impl StylesheetMinifier {
    pub fn new() -> Self {
        Self
    }
}

impl Transform for StylesheetMinifier {
    fn name(&self) -> &'static str {
        "css"
    }

    fn transform(&self, path: &Path, source: &str) -> Result<String, TransformError> {
        let mut stylesheet = StyleSheet::parse(
            source,
            ParserOptions {
                filename: path.to_string_lossy().to_string(),
                ..Default::default()
            },
        )
        .map_err(|e| TransformError::Stylesheet(e.to_string()))?;

        stylesheet
            .minify(MinifyOptions::default())
            .map_err(|e| TransformError::Stylesheet(e.to_string()))?;

        let result = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| TransformError::Stylesheet(e.to_string()))?;

        Ok(result.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_comments_and_whitespace() {
        let source = "/* layout */\n.a {\n  color: red;\n}\n";
        let out = StylesheetMinifier::new()
            .transform(Path::new("style.css"), source)
            .unwrap();
        assert_eq!(out, ".a{color:red}");
    }

    #[test]
    fn test_output_is_smaller() {
        let source = "body {\n    margin: 0px;\n    padding: 0px;\n}\n\n/* headings */\nh1 {\n    font-weight: bold;\n}\n";
        let out = StylesheetMinifier::new()
            .transform(Path::new("style.css"), source)
            .unwrap();
        assert!(out.len() < source.len());
        assert!(!out.contains("headings"));
        assert!(!out.contains('\n'));
    }
}
