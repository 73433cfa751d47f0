//! JSX and TypeScript lowering with the oxc toolchain.
//!
//! Output keeps ES module syntax. JSX is compiled for the automatic runtime,
//! so transformed files import from `react/jsx-runtime`.

use crate::error::{PreviewError, Result};
use oxc_allocator::Allocator;
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use oxc_transformer::{TransformOptions, Transformer};
use std::path::Path;

/// Transforms one source module into browser-ready JavaScript.
///
/// The file extension of `path` selects the dialect (`.js`, `.jsx`, `.ts`,
/// `.tsx`).
///
/// # Errors
///
/// Returns `PreviewError::Transform` with every diagnostic joined by `; `
/// when parsing, semantic analysis or transformation fails.
///
/// # Examples
///
/// ```
/// use uigen_preview::transform::transform_module;
///
/// let js = transform_module("/App.tsx", "const n: number = 1;\nexport default () => <p>{n}</p>;")?;
/// assert!(js.contains("react/jsx-runtime"));
/// assert!(!js.contains(": number"));
/// # Ok::<(), uigen_preview::PreviewError>(())
/// ```
pub fn transform_module(path: &str, source: &str) -> Result<String> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(path).unwrap_or_default();

    let parsed = Parser::new(&allocator, source, source_type).parse();
    if !parsed.errors.is_empty() {
        return Err(failure(path, parsed.errors.iter().map(ToString::to_string)));
    }
    let mut program = parsed.program;

    let semantic = SemanticBuilder::new().build(&program);
    if !semantic.errors.is_empty() {
        return Err(failure(path, semantic.errors.iter().map(ToString::to_string)));
    }
    let scoping = semantic.semantic.into_scoping();

    let options = TransformOptions::default();
    let transformed = Transformer::new(&allocator, Path::new(path), &options)
        .build_with_scoping(scoping, &mut program);
    if !transformed.errors.is_empty() {
        return Err(failure(path, transformed.errors.iter().map(ToString::to_string)));
    }

    Ok(Codegen::new().build(&program).code)
}

/// Wraps a JSON document as a module whose default export is the value.
///
/// # Errors
///
/// Returns `PreviewError::InvalidJson` when `source` is not valid JSON.
pub fn json_module(path: &str, source: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(source).map_err(|e| PreviewError::InvalidJson {
            path: path.to_string(),
            message: e.to_string(),
        })?;
    Ok(format!("export default {value};\n"))
}

/// A module that throws `message` as soon as it is evaluated.
#[must_use]
pub fn throwing_module(message: &str) -> String {
    let literal = serde_json::Value::String(message.to_string());
    format!("throw new Error({literal});\n")
}

fn failure(path: &str, messages: impl Iterator<Item = String>) -> PreviewError {
    PreviewError::Transform {
        path: path.to_string(),
        message: messages.collect::<Vec<_>>().join("; "),
    }
}
