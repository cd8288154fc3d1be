//! Source parser wrapper using OXC
//!
//! The walker and the classifier never see the AST. Parsing produces a
//! `SourceSummary`: raw text, import specifiers in source order and the names
//! of exported top-level functions.

use crate::error::{RegifyError, Result, ResultExt};
use crate::parsers::import_collector::ImportCollector;
use oxc_allocator::Allocator;
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::fs;
use std::path::Path;

/// Extensions handed to the JS/TS parser; anything else is read verbatim
pub const PARSEABLE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs", "mts", "cts"];

/// How a module specifier appeared in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import x from "..."`, `import "..."`
    Import,
    /// `import type { X } from "..."`
    TypeOnly,
    /// `export { x } from "..."`, `export * from "..."`
    ReExport,
}

impl ImportKind {
    /// Whether this reference is an `import` declaration
    ///
    /// Re-exports forward names to consumers; the module itself does not
    /// depend on their source.
    pub fn is_import_statement(self) -> bool {
        !matches!(self, ImportKind::ReExport)
    }
}

/// One static module reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedModule {
    pub specifier: String,
    pub kind: ImportKind,
}

/// Parser-independent view of a source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSummary {
    pub text: String,
    pub imports: Vec<ImportedModule>,
    pub exported_functions: Vec<String>,
    /// False for files that were read but not parsed (stylesheets, JSON, ...)
    pub parsed: bool,
}

impl SourceSummary {
    /// Summary for a file that is inlined verbatim without parsing
    pub fn verbatim(text: String) -> Self {
        Self {
            text,
            imports: Vec::new(),
            exported_functions: Vec::new(),
            parsed: false,
        }
    }

    /// `import` declarations in source order, without re-exports
    pub fn import_statements(&self) -> impl Iterator<Item = &ImportedModule> {
        self.imports.iter().filter(|import| import.kind.is_import_statement())
    }
}

/// Source parser using OXC
///
/// Each parse gets a fresh arena, so one parser can be reused across a whole
/// walk without sharing any AST state between files.
#[derive(Debug, Default)]
pub struct SourceParser;

impl SourceParser {
    pub fn new() -> Self {
        Self
    }

    /// Whether files with this path are run through the JS/TS parser
    pub fn is_parseable(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| PARSEABLE_EXTENSIONS.contains(&ext))
    }

    /// Read a file from disk and summarize it
    pub fn parse_file(&self, path: &Path) -> Result<SourceSummary> {
        let text = fs::read_to_string(path).with_file_context(path)?;
        self.parse_source(path, text)
    }

    /// Summarize already-loaded source text
    pub fn parse_source(&self, path: &Path, text: String) -> Result<SourceSummary> {
        if !Self::is_parseable(path) {
            return Ok(SourceSummary::verbatim(text));
        }

        let source_type = SourceType::from_path(path).map_err(|e| RegifyError::Parse {
            path: path.to_path_buf(),
            message: format!("unsupported source type: {:?}", e),
        })?;

        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, &text, source_type).parse();

        if ret.panicked || !ret.errors.is_empty() {
            return Err(RegifyError::Parse {
                path: path.to_path_buf(),
                message: render_diagnostics(&ret.errors),
            });
        }

        let collected = ImportCollector::collect(&ret.program);
        drop(ret);

        Ok(SourceSummary {
            text,
            imports: collected.imports,
            exported_functions: collected.exported_functions,
            parsed: true,
        })
    }
}

fn render_diagnostics(errors: &[OxcDiagnostic]) -> String {
    if errors.is_empty() {
        return "parser aborted".to_string();
    }
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
