//! Import and re-export discovery over the oxc AST.
//!
//! Modules are parsed as TypeScript modules and only real module syntax is
//! reported, so text that looks like an import inside a string, template or
//! comment is left alone. The reported forms are:
//!
//! ```text
//! import Default from "x"                 import "x"
//! import { a, b as c } from "x"           import type { T } from "x"
//! import * as ns from "x"                 export { a } from "x"
//! import Default, { a } from "x"          export * from "x"
//! import Default, * as ns from "x"        export * as ns from "x"
//! import("x")
//! ```
//!
//! Dynamic imports are reported only when the argument is a string literal.

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Expression, ImportDeclarationSpecifier, ImportExpression, Statement, StringLiteral,
};
use oxc_ast_visit::{Visit, walk};
use oxc_parser::Parser;
use oxc_span::{SourceType, Span};
use std::ops::Range;

/// Syntactic form of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// `import ... from "x"`
    Static,
    /// `import "x"`
    SideEffect,
    /// `export ... from "x"`
    ReExport,
    /// `import("x")`
    Dynamic,
}

/// A name introduced by a static import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportBinding {
    /// `import Local from`
    Default(String),
    /// `import { imported as local } from`
    Named {
        /// Exported name in the source module
        imported: String,
        /// Local name
        local: String,
    },
    /// `import * as local from`
    Namespace(String),
}

impl ImportBinding {
    /// The local identifier this binding declares.
    #[must_use]
    pub fn local(&self) -> &str {
        match self {
            Self::Default(local) | Self::Namespace(local) | Self::Named { local, .. } => local,
        }
    }
}

/// One import or re-export found in a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    /// Form of the statement
    pub kind: ImportKind,
    /// Specifier without quotes
    pub specifier: String,
    /// Names declared by a static import (empty for other kinds)
    pub bindings: Vec<ImportBinding>,
    /// `import type` / `export type`
    pub type_only: bool,
    /// Byte range of the whole statement
    pub span: Range<usize>,
    /// Byte range of the specifier text inside the quotes
    pub specifier_span: Range<usize>,
}

/// A replacement of `span` in a source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Byte range to replace
    pub span: Range<usize>,
    /// Replacement text
    pub replacement: String,
}

impl ImportStatement {
    /// Edit pointing the statement at `specifier` instead.
    #[must_use]
    pub fn replace_specifier(&self, specifier: &str) -> Edit {
        Edit {
            span: self.specifier_span.clone(),
            replacement: specifier.to_string(),
        }
    }

    /// Edit deleting the statement.
    #[must_use]
    pub fn remove(&self) -> Edit {
        self.replace_with(String::new())
    }

    /// Edit replacing the whole statement.
    #[must_use]
    pub fn replace_with(&self, replacement: impl Into<String>) -> Edit {
        Edit {
            span: self.span.clone(),
            replacement: replacement.into(),
        }
    }

    /// Edit replacing a static import with inert local declarations.
    ///
    /// Each imported name becomes a component that renders nothing, and a
    /// namespace becomes an empty object, so the rest of the module still
    /// links.
    #[must_use]
    pub fn stub_bindings(&self) -> Edit {
        let declarations: Vec<String> = self
            .bindings
            .iter()
            .map(|binding| match binding {
                ImportBinding::Namespace(local) => format!("const {local} = {{}};"),
                other => format!("const {} = () => null;", other.local()),
            })
            .collect();
        self.replace_with(declarations.join(" "))
    }

    /// Edit replacing a static import with empty local declarations.
    ///
    /// Used for stylesheets, which load through the document instead: default
    /// and namespace bindings become empty objects and named bindings become
    /// `undefined`. A statement without bindings is removed.
    #[must_use]
    pub fn empty_bindings(&self) -> Edit {
        let declarations: Vec<String> = self
            .bindings
            .iter()
            .map(|binding| match binding {
                ImportBinding::Named { local, .. } => format!("const {local} = undefined;"),
                other => format!("const {} = {{}};", other.local()),
            })
            .collect();
        self.replace_with(declarations.join(" "))
    }
}

/// Finds every supported import and re-export in `source`, in source order.
///
/// Returns nothing when `source` does not parse.
///
/// # Examples
///
/// ```
/// use uigen_preview::imports::{ImportBinding, ImportKind, parse_imports};
///
/// let source = "import React, { useState as useS } from 'react';\nimport './index.css';\n";
/// let imports = parse_imports(source);
///
/// assert_eq!(imports.len(), 2);
/// assert_eq!(imports[0].specifier, "react");
/// assert_eq!(
///     imports[0].bindings,
///     vec![
///         ImportBinding::Default("React".to_string()),
///         ImportBinding::Named { imported: "useState".to_string(), local: "useS".to_string() },
///     ]
/// );
/// assert_eq!(imports[1].kind, ImportKind::SideEffect);
/// ```
#[must_use]
pub fn parse_imports(source: &str) -> Vec<ImportStatement> {
    let allocator = Allocator::default();
    let source_type = SourceType::default()
        .with_module(true)
        .with_typescript(true);

    let parsed = Parser::new(&allocator, source, source_type).parse();
    if !parsed.errors.is_empty() {
        tracing::debug!("Import scan skipped: module does not parse");
        return Vec::new();
    }

    let mut found = Vec::new();
    for stmt in &parsed.program.body {
        match stmt {
            Statement::ImportDeclaration(decl) => {
                let (kind, bindings) = decl.specifiers.as_ref().map_or_else(
                    || (ImportKind::SideEffect, Vec::new()),
                    |specifiers| (ImportKind::Static, import_bindings(specifiers)),
                );
                found.push(ImportStatement {
                    kind,
                    specifier: decl.source.value.to_string(),
                    bindings,
                    type_only: decl.import_kind.is_type(),
                    span: range(decl.span),
                    specifier_span: inner_range(&decl.source),
                });
            }
            Statement::ExportNamedDeclaration(decl) => {
                if let Some(source) = &decl.source {
                    found.push(re_export(decl.span, source, decl.export_kind.is_type()));
                }
            }
            Statement::ExportAllDeclaration(decl) => {
                found.push(re_export(decl.span, &decl.source, decl.export_kind.is_type()));
            }
            _ => {}
        }
    }

    let mut dynamic = DynamicImports::default();
    dynamic.visit_program(&parsed.program);
    found.extend(dynamic.found);

    found.sort_by_key(|statement| statement.span.start);
    found
}

/// Collects `import("x")` expressions anywhere in a module.
#[derive(Default)]
struct DynamicImports {
    found: Vec<ImportStatement>,
}

impl<'a> Visit<'a> for DynamicImports {
    fn visit_import_expression(&mut self, it: &ImportExpression<'a>) {
        if let Expression::StringLiteral(source) = &it.source {
            self.found.push(ImportStatement {
                kind: ImportKind::Dynamic,
                specifier: source.value.to_string(),
                bindings: Vec::new(),
                type_only: false,
                span: range(it.span),
                specifier_span: inner_range(source),
            });
        }
        walk::walk_import_expression(self, it);
    }
}

fn re_export(span: Span, source: &StringLiteral<'_>, type_only: bool) -> ImportStatement {
    ImportStatement {
        kind: ImportKind::ReExport,
        specifier: source.value.to_string(),
        bindings: Vec::new(),
        type_only,
        span: range(span),
        specifier_span: inner_range(source),
    }
}

fn import_bindings(specifiers: &[ImportDeclarationSpecifier<'_>]) -> Vec<ImportBinding> {
    specifiers
        .iter()
        .filter_map(|specifier| match specifier {
            ImportDeclarationSpecifier::ImportSpecifier(s) if s.import_kind.is_type() => None,
            ImportDeclarationSpecifier::ImportSpecifier(s) => Some(ImportBinding::Named {
                imported: s.imported.name().to_string(),
                local: s.local.name.to_string(),
            }),
            ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                Some(ImportBinding::Default(s.local.name.to_string()))
            }
            ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                Some(ImportBinding::Namespace(s.local.name.to_string()))
            }
        })
        .collect()
}

const fn range(span: Span) -> Range<usize> {
    span.start as usize..span.end as usize
}

/// Source range of a string literal without its quotes.
const fn inner_range(literal: &StringLiteral<'_>) -> Range<usize> {
    literal.span.start as usize + 1..literal.span.end as usize - 1
}

/// Applies non-overlapping edits to `source`.
///
/// Overlapping edits after the first are ignored.
#[must_use]
pub fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|edit| edit.span.start);

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in edits {
        if edit.span.start < cursor || edit.span.end > source.len() {
            continue;
        }
        out.push_str(&source[cursor..edit.span.start]);
        out.push_str(&edit.replacement);
        cursor = edit.span.end;
    }
    out.push_str(&source[cursor..]);
    out
}
