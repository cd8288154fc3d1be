//! Static import collection using an AST visitor over top-level statements

use crate::parsers::source::{ImportKind, ImportedModule};
use oxc_ast::ast::*;
use std::collections::HashSet;

/// What the collector extracted from one program
#[derive(Debug, Default)]
pub struct CollectedModule {
    pub imports: Vec<ImportedModule>,
    pub exported_functions: Vec<String>,
}

/// Visitor over a program's top-level statements
///
/// Only module-level syntax matters here, so nested statements are never
/// entered.
pub struct ImportCollector<'a> {
    imports: Vec<ImportedModule>,
    exported_functions: Vec<String>,
    /// Top-level `function` declarations that are not exported inline
    local_functions: Vec<String>,
    /// Local names listed in `export { ... }` without a source
    exported_locals: HashSet<String>,
    _phantom: std::marker::PhantomData<&'a ()>,
}

impl<'a> ImportCollector<'a> {
    /// Walk a program and collect its static imports and exported functions
    pub fn collect(program: &Program<'a>) -> CollectedModule {
        let mut collector = Self {
            imports: Vec::new(),
            exported_functions: Vec::new(),
            local_functions: Vec::new(),
            exported_locals: HashSet::new(),
            _phantom: std::marker::PhantomData,
        };

        collector.visit_program(program);
        collector.finish()
    }

    fn visit_program(&mut self, program: &Program<'a>) {
        for stmt in &program.body {
            self.visit_statement(stmt);
        }
    }

    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        match stmt {
            Statement::ImportDeclaration(decl) => self.visit_import_declaration(decl),
            Statement::ExportNamedDeclaration(decl) => self.visit_export_named_declaration(decl),
            Statement::ExportDefaultDeclaration(decl) => self.visit_export_default_declaration(decl),
            Statement::ExportAllDeclaration(decl) => self.visit_export_all_declaration(decl),
            Statement::FunctionDeclaration(func) => {
                if let Some(id) = &func.id {
                    self.local_functions.push(id.name.to_string());
                }
            }
            _ => {}
        }
    }

    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        let kind = if decl.import_kind.is_type() {
            ImportKind::TypeOnly
        } else {
            ImportKind::Import
        };

        self.imports.push(ImportedModule {
            specifier: decl.source.value.to_string(),
            kind,
        });
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &decl.source {
            self.imports.push(ImportedModule {
                specifier: source.value.to_string(),
                kind: ImportKind::ReExport,
            });
            return;
        }

        for specifier in &decl.specifiers {
            self.exported_locals.insert(specifier.local.name().to_string());
        }

        if let Some(Declaration::FunctionDeclaration(func)) = &decl.declaration {
            if let Some(id) = &func.id {
                self.exported_functions.push(id.name.to_string());
            }
        }
    }

    fn visit_export_default_declaration(&mut self, decl: &ExportDefaultDeclaration<'a>) {
        match &decl.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                if let Some(id) = &func.id {
                    self.exported_functions.push(id.name.to_string());
                }
            }
            ExportDefaultDeclarationKind::Identifier(ident) => {
                self.exported_locals.insert(ident.name.to_string());
            }
            _ => {}
        }
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        self.imports.push(ImportedModule {
            specifier: decl.source.value.to_string(),
            kind: ImportKind::ReExport,
        });
    }

    fn finish(mut self) -> CollectedModule {
        // `function useX() {}` followed by `export { useX }` counts as exported
        for name in self.local_functions.drain(..) {
            if self.exported_locals.contains(&name) && !self.exported_functions.contains(&name) {
                self.exported_functions.push(name);
            }
        }

        CollectedModule {
            imports: self.imports,
            exported_functions: self.exported_functions,
        }
    }
}
