//! Legacy namespace deps file parsing
//!
//! A deps file consists of top-level `goog.addDependency(relPath, [ns, …], …)`
//! call expressions. Each provided namespace maps to the path obtained by
//! joining the configured base directory with the relative path. Statements
//! of any other shape are silently ignored.

use crate::error::{ChunkerError, Result};
use crate::utils::paths;
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Parser for legacy deps files
pub struct GoogDepsParser;

impl GoogDepsParser {
    /// Parse a deps file into a namespace-to-path mapping
    pub fn parse_file(path: &Path, base_dir: &Path) -> Result<HashMap<String, PathBuf>> {
        let source_text = fs::read_to_string(path)
            .map_err(|e| ChunkerError::invalid_deps_file(path, e.to_string()))?;
        Self::parse(&source_text, path, base_dir)
    }

    /// Parse deps file content into a namespace-to-path mapping
    pub fn parse(source_text: &str, path: &Path, base_dir: &Path) -> Result<HashMap<String, PathBuf>> {
        let allocator = Allocator::default();
        let source_type = SourceType::from_path(path).unwrap_or_default();

        let ret = Parser::new(&allocator, source_text, source_type).parse();

        if !ret.errors.is_empty() {
            let message = ret
                .errors
                .first()
                .map(|e| format!("{}", e))
                .unwrap_or_else(|| "parse error".to_string());
            return Err(ChunkerError::invalid_deps_file(path, message));
        }

        let mut mapping = HashMap::new();

        for stmt in &ret.program.body {
            if let Statement::ExpressionStatement(expr_stmt) = stmt {
                if let Expression::CallExpression(call) = &expr_stmt.expression {
                    Self::collect_add_dependency(call, base_dir, &mut mapping);
                }
            }
        }

        Ok(mapping)
    }

    /// Record the namespaces of one `goog.addDependency` call, if it is one
    fn collect_add_dependency(
        call: &CallExpression<'_>,
        base_dir: &Path,
        mapping: &mut HashMap<String, PathBuf>,
    ) {
        let Some(MemberExpression::StaticMemberExpression(member)) =
            call.callee.as_member_expression()
        else {
            return;
        };

        let is_add_dependency = matches!(&member.object, Expression::Identifier(obj)
            if obj.name == "goog" && member.property.name == "addDependency");
        if !is_add_dependency {
            return;
        }

        let Some(Argument::StringLiteral(rel_path)) = call.arguments.first() else {
            return;
        };
        let Some(Argument::ArrayExpression(namespaces)) = call.arguments.get(1) else {
            return;
        };

        let absolute = paths::normalize(&base_dir.join(rel_path.value.as_str()));

        for element in &namespaces.elements {
            if let Some(Expression::StringLiteral(ns)) = element.as_expression() {
                mapping.insert(ns.value.as_str().to_string(), absolute.clone());
            }
        }
    }
}
