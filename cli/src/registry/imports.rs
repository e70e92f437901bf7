//! # blocks Import Declaration Parser
//!
//! File: cli/src/registry/imports.rs
//!
//! ## Overview
//!
//! Parses a TypeScript/JavaScript module with `swc_ecma_parser` and returns
//! its top-level `import` declarations. Only `ModuleDecl::Import` items of the
//! module body count: dynamic `import()`, `import.meta`, `export … from`
//! re-exports and `import x = require(…)` are not declarations.
//!
//! `.ts`, `.mts` and `.cts` sources are parsed as plain TypeScript, so that
//! `<T>value` casts stay valid; everything else is parsed as TSX, which also
//! accepts plain JavaScript and JSX.
//!
//! Any syntax error, including the ones the parser can recover from, fails
//! the file.
//!
use crate::core::error::BlocksError;
use std::path::Path;
use swc_common::{sync::Lrc, BytePos, FileName, SourceFile, SourceMap, Spanned};
use swc_ecma_ast::{EsVersion, ModuleDecl, ModuleItem};
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax, TsConfig};
use tracing::debug;

/// One `import` statement found at module level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    /// The module specifier, with quotes removed and escapes resolved.
    pub specifier: String,
    /// `import type ...` (TypeScript type-only import).
    pub type_only: bool,
    /// 1-based line of the `import` keyword.
    pub line: usize,
}

/// Grammar a source file is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Tsx,
    TypeScript,
}

impl Dialect {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ts" | "mts" | "cts") => Dialect::TypeScript,
            _ => Dialect::Tsx,
        }
    }

    fn syntax(self) -> Syntax {
        Syntax::Typescript(TsConfig {
            tsx: self == Dialect::Tsx,
            decorators: true,
            ..Default::default()
        })
    }
}

/// Parses `source` and returns its top-level import declarations in source
/// order.
///
/// # Errors
///
/// `BlocksError::Parse` with the 1-based line of the first syntax error.
pub fn parse_imports(
    source: &str,
    dialect: Dialect,
) -> Result<Vec<ImportDeclaration>, BlocksError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let cm: Lrc<SourceMap> = Default::default();
    let file = cm.new_source_file(FileName::Anon, source.to_string());

    let lexer = Lexer::new(
        dialect.syntax(),
        EsVersion::EsNext,
        StringInput::from(&*file),
        None,
    );
    let mut parser = Parser::new_from(lexer);
    let parsed = parser.parse_module();
    let recovered = parser.take_errors();
    let syntax_error = |e: swc_ecma_parser::error::Error| BlocksError::Parse {
        line: line_of(source, &file, e.span().lo),
        message: e.kind().msg().into_owned(),
    };
    let module = parsed.map_err(syntax_error)?;
    if let Some(first) = recovered.into_iter().next() {
        return Err(syntax_error(first));
    }
    debug!("Parsed module with {} top-level items", module.body.len());

    Ok(module
        .body
        .iter()
        .filter_map(|item| match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) => Some(ImportDeclaration {
                specifier: decl.src.value.to_string(),
                type_only: decl.type_only,
                line: line_of(source, &file, decl.span.lo),
            }),
            _ => None,
        })
        .collect())
}

/// Line of `pos` within `file`; positions outside it (dummy spans) map to the
/// last line.
fn line_of(source: &str, file: &SourceFile, pos: BytePos) -> usize {
    let offset = pos
        .0
        .checked_sub(file.start_pos.0)
        .map_or(source.len(), |offset| offset as usize);
    let prefix = source.get(..offset).unwrap_or(source);
    prefix.matches('\n').count() + 1
}
