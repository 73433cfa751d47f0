//! Whole-project preview compilation.
//!
//! Every call recompiles the full file map. There is no incremental state:
//! the result depends only on the files and the configuration.

use crate::config::PreviewConfig;
use crate::entry::{PreviewState, find_entry};
use crate::error::{PreviewError, Result};
use crate::imports::{Edit, ImportKind, ImportStatement, apply_edits, parse_imports};
use crate::resolver::{ModuleResolver, Resolution, local_specifier};
use crate::template_engine::{PREVIEW_TEMPLATE, STATUS_TEMPLATE, TemplateEngine};
use crate::transform::{json_module, throwing_module, transform_module};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use uigen_vfs::{FileMap, PathResolver, VfsPath};

const SCRIPT_EXTENSIONS: [&str; 4] = ["js", "jsx", "ts", "tsx"];
const DATA_URL_PREFIX: &str = "data:text/javascript;charset=utf-8,";

/// Everything the document is assembled from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewArtifact {
    /// Entry module path, once one is found
    pub entry: Option<String>,
    /// Bare specifier to URL, libraries and project modules alike
    pub import_map: BTreeMap<String, String>,
    /// Transformed module source keyed by absolute path
    pub modules: BTreeMap<String, String>,
    /// All `.css` files, concatenated in path order
    pub styles: String,
    /// Non-fatal per-file errors, in discovery order
    pub errors: Vec<String>,
}

/// Result of one compile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewOutcome {
    /// What the preview surface should show
    pub state: PreviewState,
    /// Compiled pieces; empty for `welcome` and `no-entry`
    pub artifact: PreviewArtifact,
}

impl PreviewOutcome {
    const fn new(state: PreviewState, artifact: PreviewArtifact) -> Self {
        Self { state, artifact }
    }

    /// Entry module path, if one was found.
    #[must_use]
    pub fn entry(&self) -> Option<&str> {
        self.artifact.entry.as_deref()
    }

    /// Per-file errors collected during the compile.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.artifact.errors
    }
}

/// Compiles a project's files into a self-contained HTML document.
///
/// # Examples
///
/// ```
/// use uigen_preview::{PreviewCompiler, PreviewConfig, PreviewState};
/// use uigen_vfs::FileMap;
///
/// let compiler = PreviewCompiler::new(PreviewConfig::default())?;
///
/// let mut files = FileMap::new();
/// assert_eq!(compiler.compile(&files).state, PreviewState::Welcome);
///
/// files.insert(
///     "/App.jsx".to_string(),
///     "export default function App() { return <h1>Hello</h1>; }".to_string(),
/// );
/// let outcome = compiler.compile(&files);
/// assert_eq!(outcome.state, PreviewState::Compiled);
/// assert_eq!(outcome.entry(), Some("/App.jsx"));
///
/// let html = compiler.render(&outcome)?;
/// assert!(html.contains("@vfs/App.jsx"));
/// # Ok::<(), uigen_preview::PreviewError>(())
/// ```
#[derive(Debug)]
pub struct PreviewCompiler {
    config: PreviewConfig,
    paths: PathResolver,
    templates: TemplateEngine<'static>,
}

impl PreviewCompiler {
    /// Creates a compiler for the given settings.
    ///
    /// # Errors
    ///
    /// Returns `PreviewError::Config` if the settings fail validation, or
    /// `PreviewError::Template` if the built-in templates do not load.
    pub fn new(config: PreviewConfig) -> Result<Self> {
        config.validate()?;
        let paths = PathResolver::with_alias(config.alias_prefix.clone());
        let templates = TemplateEngine::new()?;
        Ok(Self {
            config,
            paths,
            templates,
        })
    }

    /// Active settings.
    #[must_use]
    pub const fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Compiles `files`.
    ///
    /// Never fails: unresolved imports, syntax errors and invalid JSON are
    /// collected in the artifact's error list. Only a failing entry module
    /// turns the outcome into [`PreviewState::CompileError`].
    #[must_use]
    pub fn compile(&self, files: &FileMap) -> PreviewOutcome {
        let mut artifact = PreviewArtifact {
            import_map: self.config.libraries.clone(),
            ..PreviewArtifact::default()
        };

        if files.is_empty() {
            return PreviewOutcome::new(PreviewState::Welcome, artifact);
        }
        let Some(entry) = find_entry(files) else {
            tracing::debug!("No entry point among {} files", files.len());
            return PreviewOutcome::new(PreviewState::NoEntry, artifact);
        };
        artifact.entry = Some(entry.to_string());

        let resolver = ModuleResolver::new(self.paths.clone(), &self.config.libraries, files);
        let mut linker = Linker::default();
        let mut entry_failed = false;

        for (path, source) in files {
            let module_path = VfsPath::new(path);
            match module_path.extension() {
                Some(ext) if SCRIPT_EXTENSIONS.contains(&ext) => {
                    let module = match transform_module(path, source) {
                        Ok(code) => linker.link(&resolver, &module_path, &code),
                        Err(error) => {
                            entry_failed |= path == entry;
                            linker.fail(&error)
                        }
                    };
                    publish(&mut artifact, &module_path, module);
                }
                Some("css") => {
                    artifact.styles.push_str(&format!("/* {path} */\n{source}\n"));
                }
                _ => {}
            }
        }

        for json_path in std::mem::take(&mut linker.json_modules) {
            let Some(source) = files.get(json_path.as_str()) else {
                continue;
            };
            let module = json_module(json_path.as_str(), source)
                .unwrap_or_else(|error| linker.fail(&error));
            publish(&mut artifact, &json_path, module);
        }

        artifact.errors = linker.errors;
        let state = if entry_failed {
            PreviewState::CompileError
        } else {
            PreviewState::Compiled
        };
        tracing::debug!(
            "Compiled preview for {}: {} modules, {} errors ({})",
            entry,
            artifact.modules.len(),
            artifact.errors.len(),
            state
        );
        PreviewOutcome::new(state, artifact)
    }

    /// Renders `outcome` as an HTML document.
    ///
    /// `compiled` outcomes produce the runnable document; every other state
    /// produces a static status page.
    ///
    /// # Errors
    ///
    /// Returns `PreviewError::Template` if rendering fails.
    pub fn render(&self, outcome: &PreviewOutcome) -> Result<String> {
        let artifact = &outcome.artifact;
        let title = &self.config.title;
        match outcome.state {
            PreviewState::Compiled => {
                let entry = artifact.entry.as_deref().unwrap_or_default();
                let import_map = json!({ "imports": artifact.import_map }).to_string();
                let entry_specifier =
                    serde_json::Value::String(local_specifier(&VfsPath::new(entry))).to_string();
                self.templates.render(
                    PREVIEW_TEMPLATE,
                    &json!({
                        "title": title,
                        "tailwind_cdn": self.config.tailwind_cdn,
                        "styles": script_safe(&artifact.styles),
                        "import_map": script_safe(&import_map),
                        "entry": script_safe(&entry_specifier),
                        "errors": artifact.errors,
                    }),
                )
            }
            PreviewState::Welcome => self.templates.render(
                STATUS_TEMPLATE,
                &json!({
                    "title": title,
                    "heading": "Welcome to UI Generator",
                    "message": "Start building React components with AI assistance",
                    "detail": "Ask the AI to create your first component to see it live here",
                    "errors": [],
                }),
            ),
            PreviewState::NoEntry => self.templates.render(
                STATUS_TEMPLATE,
                &json!({
                    "title": title,
                    "heading": "No Preview Available",
                    "message": "Start by creating a React component using the AI assistant",
                    "detail": "Create /App.jsx as the entry point of your app",
                    "errors": [],
                }),
            ),
            PreviewState::CompileError => self.templates.render(
                STATUS_TEMPLATE,
                &json!({
                    "title": title,
                    "heading": "Compilation Error",
                    "message": format!(
                        "{} could not be compiled",
                        artifact.entry.as_deref().unwrap_or("The entry point")
                    ),
                    "detail": "",
                    "errors": artifact.errors,
                }),
            ),
        }
    }
}

/// Rewrites imports in transformed modules and collects per-file errors.
#[derive(Debug, Default)]
struct Linker {
    errors: Vec<String>,
    json_modules: BTreeSet<VfsPath>,
}

impl Linker {
    fn link(&mut self, resolver: &ModuleResolver<'_>, importer: &VfsPath, code: &str) -> String {
        let edits: Vec<Edit> = parse_imports(code)
            .iter()
            .filter_map(|statement| self.rewrite(resolver, importer, statement))
            .collect();
        apply_edits(code, edits)
    }

    fn rewrite(
        &mut self,
        resolver: &ModuleResolver<'_>,
        importer: &VfsPath,
        statement: &ImportStatement,
    ) -> Option<Edit> {
        if statement.type_only {
            return Some(statement.remove());
        }

        match resolver.resolve(&statement.specifier, importer) {
            Resolution::External(_) => None,
            Resolution::Local(target) => match target.extension() {
                Some("css") => Some(match statement.kind {
                    ImportKind::Dynamic => statement.replace_with("Promise.resolve({})"),
                    ImportKind::Static => statement.empty_bindings(),
                    ImportKind::SideEffect | ImportKind::ReExport => statement.remove(),
                }),
                Some("json") => {
                    let edit = statement.replace_specifier(&local_specifier(&target));
                    self.json_modules.insert(target);
                    Some(edit)
                }
                Some(ext) if SCRIPT_EXTENSIONS.contains(&ext) => {
                    Some(statement.replace_specifier(&local_specifier(&target)))
                }
                _ => {
                    let error = PreviewError::UnsupportedModule {
                        path: target.to_string(),
                        importer: importer.to_string(),
                    };
                    Some(self.unavailable(statement, &error))
                }
            },
            Resolution::Unresolved => {
                let error = PreviewError::Resolution {
                    specifier: statement.specifier.clone(),
                    importer: importer.to_string(),
                };
                Some(self.unavailable(statement, &error))
            }
        }
    }

    /// Records `error` and neutralizes the statement so the module still links.
    fn unavailable(&mut self, statement: &ImportStatement, error: &PreviewError) -> Edit {
        tracing::debug!("{}", error);
        let message = error.to_string();
        let edit = match statement.kind {
            ImportKind::Static => statement.stub_bindings(),
            ImportKind::SideEffect | ImportKind::ReExport => statement.remove(),
            ImportKind::Dynamic => statement.replace_with(format!(
                "Promise.reject(new Error({}))",
                serde_json::Value::String(message.clone())
            )),
        };
        self.record(message);
        edit
    }

    /// Records `error` and returns a module that throws it.
    fn fail(&mut self, error: &PreviewError) -> String {
        tracing::warn!("{}", error);
        let message = error.to_string();
        let module = throwing_module(&message);
        self.record(message);
        module
    }

    fn record(&mut self, message: String) {
        if !self.errors.contains(&message) {
            self.errors.push(message);
        }
    }
}

fn publish(artifact: &mut PreviewArtifact, path: &VfsPath, module: String) {
    artifact.import_map.insert(
        local_specifier(path),
        format!(
            "{DATA_URL_PREFIX}{}",
            utf8_percent_encode(&module, NON_ALPHANUMERIC)
        ),
    );
    artifact.modules.insert(path.to_string(), module);
}

/// Keeps embedded text from closing the surrounding `<script>` or `<style>`.
fn script_safe(text: &str) -> String {
    text.replace("</", "<\\/")
}
