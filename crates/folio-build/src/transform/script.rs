//! JavaScript minification through oxc.

use super::Transform;
use crate::error::TransformError;
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{CompressOptions, MangleOptions, Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::path::Path;

/// Script minifier.
///
/// Site scripts are classic browser scripts, so they are parsed as such and
/// top-level names are left alone.
#[derive(Debug, Clone, Copy)]
pub struct ScriptMinifier {
    mangle: bool,
}

impl Default for ScriptMinifier {
    fn default() -> Self {
        Self { mangle: true }
    }
}

impl ScriptMinifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable renaming of local identifiers.
    pub fn with_mangle(mut self, mangle: bool) -> Self {
        self.mangle = mangle;
        self
    }
}

impl Transform for ScriptMinifier {
    fn name(&self) -> &'static str {
        "js"
    }

    fn transform(&self, _path: &Path, source: &str) -> Result<String, TransformError> {
        let allocator = Allocator::default();
        let parsed = Parser::new(&allocator, source, SourceType::cjs()).parse();

        if parsed.panicked || !parsed.errors.is_empty() {
            let messages: Vec<String> = parsed.errors.iter().map(|e| e.to_string()).collect();
            return Err(TransformError::Script(if messages.is_empty() {
                "parser aborted".to_string()
            } else {
                messages.join(", ")
            }));
        }

        let mut program = parsed.program;
        let options = MinifierOptions {
            mangle: self.mangle.then(MangleOptions::default),
            compress: Some(CompressOptions::default()),
            ..MinifierOptions::default()
        };
        let minified = Minifier::new(options).minify(&allocator, &mut program);

        let code = Codegen::new()
            .with_options(CodegenOptions::minify())
            .with_scoping(minified.scoping)
            .build(&program)
            .code;

        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minifies_valid_script() {
        let source = "// greet the visitor\nfunction greet(name) {\n    var message = 'Hello, ' + name;\n    console.log(message);\n}\n\ngreet('world');\n";
        let out = ScriptMinifier::new()
            .transform(Path::new("main.js"), source)
            .unwrap();
        assert!(out.len() < source.len());
        assert!(out.contains("console.log"));
        assert!(!out.contains("greet the visitor"));
    }

    #[test]
    fn test_rejects_syntax_error() {
        let err = ScriptMinifier::new()
            .transform(Path::new("broken.js"), "const = ;")
            .unwrap_err();
        assert!(matches!(err, TransformError::Script(_)));
    }
}
