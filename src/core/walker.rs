//! Transitive static dependency walking
//!
//! For a single file, the walker computes the flattened closure of static
//! dependencies in a dependencies-first order, plus the set of dynamic-import
//! targets observed along the way. Direct per-file results are cached in the
//! build context; the flatten itself is recomputed per walk so that hoists
//! injected by normalization take effect.

use crate::core::context::{BuildContext, FileRecord};
use crate::error::{ChunkerError, Result};
use crate::models::chunk::FileDepInfo;
use crate::models::output::Diagnostic;
use crate::parsers::ast_parser::StaticRef;
use crate::utils::paths;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Sources to inject into a chunk's entry file on the next build, keyed by
/// chunk name
pub type HoistMap = BTreeMap<PathBuf, Vec<PathBuf>>;

/// Compute the transitive static dependency closure rooted at `file`.
///
/// The resulting `deps` list contains every file exactly once, dependencies
/// before dependents, with `file` itself as the last element.
pub fn walk(ctx: &mut BuildContext, file: &Path, hoist_map: &HoistMap) -> Result<FileDepInfo> {
    let mut visited = HashSet::new();
    let mut deps = Vec::new();
    let mut deps_seen = HashSet::new();
    let mut child_chunks = Vec::new();

    visit(ctx, file, hoist_map, &mut visited, &mut deps, &mut deps_seen, &mut child_chunks)?;

    Ok(FileDepInfo {
        file: file.to_path_buf(),
        deps,
        child_chunks,
    })
}

fn visit(
    ctx: &mut BuildContext,
    file: &Path,
    hoist_map: &HoistMap,
    visited: &mut HashSet<PathBuf>,
    deps: &mut Vec<PathBuf>,
    deps_seen: &mut HashSet<PathBuf>,
    child_chunks: &mut Vec<PathBuf>,
) -> Result<()> {
    if !visited.insert(file.to_path_buf()) {
        return Ok(());
    }

    let record = direct_record(ctx, file)?;

    let mut statics = record.static_deps;
    if let Some(hoists) = hoist_map.get(file) {
        for hoist in hoists {
            if !statics.contains(hoist) {
                statics.push(hoist.clone());
            }
        }
    }

    for child in record.child_chunks {
        if !child_chunks.contains(&child) {
            child_chunks.push(child);
        }
    }

    for dep in statics {
        visit(ctx, &dep, hoist_map, visited, deps, deps_seen, child_chunks)?;
    }

    if deps_seen.insert(file.to_path_buf()) {
        deps.push(file.to_path_buf());
    }

    Ok(())
}

/// Scan a single file and resolve its direct references, caching the result
fn direct_record(ctx: &mut BuildContext, file: &Path) -> Result<FileRecord> {
    if let Some(record) = ctx.cached_record(file) {
        return Ok(record.clone());
    }

    // Package metadata files carry no dependencies of their own
    if paths::is_metadata_file(file) {
        let record = FileRecord::default();
        ctx.file_cache.insert(file.to_path_buf(), record.clone());
        return Ok(record);
    }

    let scan = ctx.parser.parse_and_scan(file)?;

    if scan.has_errors {
        ctx.diagnostics.push(Diagnostic::warning(format!(
            "Failed to parse {}: {}; file recorded with no dependencies",
            file.display(),
            scan.parse_errors.join("; ")
        )));
        let record = FileRecord::default();
        ctx.file_cache.insert(file.to_path_buf(), record.clone());
        return Ok(record);
    }

    if scan.ignored_dynamic_imports > 0 {
        ctx.diagnostics.push(Diagnostic::warning(format!(
            "{}: {} dynamic import(s) with non-literal arguments were ignored",
            file.display(),
            scan.ignored_dynamic_imports
        )));
    }

    let mut static_deps: Vec<PathBuf> = Vec::new();
    let mut push_static = |list: &mut Vec<PathBuf>, path: PathBuf| {
        if !list.contains(&path) {
            list.push(path);
        }
    };

    // Any use of the legacy runtime pulls in its base file first
    if scan.uses_goog_base {
        if let Some(base) = ctx.goog_base.clone() {
            if base.as_path() != file {
                push_static(&mut static_deps, base);
            }
        }
    }

    for reference in &scan.static_refs {
        match reference {
            StaticRef::Specifier(specifier) => {
                let resolution = ctx.resolver.resolve(specifier, file)?;
                if let Some(package_json) = resolution.package_json {
                    push_static(&mut static_deps, package_json);
                }
                push_static(&mut static_deps, resolution.path);
            }
            StaticRef::Namespace(namespace) => {
                let path = ctx
                    .goog_deps
                    .get(namespace)
                    .cloned()
                    .ok_or_else(|| ChunkerError::unknown_namespace(namespace.clone(), file))?;
                push_static(&mut static_deps, path);
            }
        }
    }

    let mut child_chunks: Vec<PathBuf> = Vec::new();
    for specifier in &scan.dynamic_imports {
        let resolution = ctx.resolver.resolve(specifier, file)?;
        if !child_chunks.contains(&resolution.path) {
            child_chunks.push(resolution.path);
        }
    }

    let record = FileRecord {
        static_deps,
        child_chunks,
    };
    ctx.file_cache.insert(file.to_path_buf(), record.clone());
    Ok(record)
}
