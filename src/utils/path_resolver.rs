//! Module specifier resolution
//!
//! Implements Node-style resolution: relative specifiers resolve against the
//! referring file's directory, bare specifiers climb parent directories
//! through `node_modules`. Package entry selection consults a configurable
//! ordered list of package.json field names. Symbolic links are preserved:
//! resolved paths are normalized lexically, never canonicalized.

use crate::error::{ChunkerError, Result};
use crate::parsers::package_json::{PackageDetails, PackageJsonParser};
use crate::utils::paths;
use dashmap::DashMap;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File extensions probed when a specifier has none
const EXTENSIONS: [&str; 4] = ["js", "mjs", "cjs", "json"];

/// Index files probed when a specifier names a directory
const INDEX_FILES: [&str; 3] = ["index.js", "index.mjs", "index.cjs"];

/// A successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Absolute, lexically normalized path of the resolved file
    pub path: PathBuf,
    /// Absolute path of the package metadata file, present when the
    /// specifier named a package root. The metadata file becomes a source
    /// of the referring chunk.
    pub package_json: Option<PathBuf>,
}

/// Module resolver with caching
pub struct PathResolver {
    entry_names: Vec<String>,
    node_modules_cache: Arc<DashMap<String, PathBuf>>,
    file_exists_cache: Arc<DashMap<PathBuf, bool>>,
    package_json_cache: Arc<Mutex<LruCache<PathBuf, PackageDetails>>>,
}

impl PathResolver {
    /// Create a new resolver with the given ordered package entry field names
    pub fn new(entry_names: Vec<String>) -> Self {
        Self {
            entry_names,
            node_modules_cache: Arc::new(DashMap::new()),
            file_exists_cache: Arc::new(DashMap::new()),
            package_json_cache: Arc::new(Mutex::new(LruCache::new(
                NonZeroUsize::new(100).unwrap_or(NonZeroUsize::MIN),
            ))),
        }
    }

    /// Resolve a module specifier relative to the referring file
    pub fn resolve(&self, specifier: &str, from: &Path) -> Result<Resolution> {
        let resolved = match specifier.chars().next() {
            Some('.') | Some('/') => self.resolve_relative(specifier, from).map(|path| Resolution {
                path,
                package_json: None,
            }),
            Some(_) => self.resolve_package(specifier, from),
            None => None,
        };

        resolved.ok_or_else(|| ChunkerError::unresolved_module(specifier, from))
    }

    /// Resolve relative and absolute specifiers against the referring file's directory
    fn resolve_relative(&self, specifier: &str, from: &Path) -> Option<PathBuf> {
        let base = from.parent().unwrap_or(from);
        let candidate = paths::normalize(&base.join(specifier));
        self.probe(&candidate)
    }

    /// Probe a candidate path: exact, with extensions, then as a directory
    fn probe(&self, candidate: &Path) -> Option<PathBuf> {
        if self.check_file(candidate) {
            return Some(candidate.to_path_buf());
        }

        if candidate.extension().is_none() {
            for ext in &EXTENSIONS {
                let with_ext = candidate.with_extension(ext);
                if self.check_file(&with_ext) {
                    return Some(with_ext);
                }
            }
        }

        if candidate.is_dir() {
            for index_file in &INDEX_FILES {
                let index_path = candidate.join(index_file);
                if self.check_file(&index_path) {
                    return Some(index_path);
                }
            }
        }

        None
    }

    /// Resolve bare specifiers by climbing parent directories looking for node_modules
    fn resolve_package(&self, specifier: &str, from: &Path) -> Option<Resolution> {
        let (package_name, subpath) = split_package_specifier(specifier);

        let package_dir = if let Some(cached) = self.node_modules_cache.get(&package_name) {
            cached.clone()
        } else {
            let mut found = None;
            let mut current = from.parent();
            while let Some(dir) = current {
                let candidate = dir.join("node_modules").join(&package_name);
                if candidate.is_dir() {
                    self.node_modules_cache.insert(package_name.clone(), candidate.clone());
                    found = Some(candidate);
                    break;
                }
                current = dir.parent();
            }
            found?
        };

        match subpath {
            Some(sub) => {
                let path = self.probe(&paths::normalize(&package_dir.join(sub)))?;
                Some(Resolution {
                    path,
                    package_json: None,
                })
            }
            None => {
                // Package-root reference: the metadata file itself becomes a
                // dependency of the referring file.
                let package_json_path = package_dir.join("package.json");
                let path = self.resolve_package_main(&package_dir, &package_json_path)?;
                let package_json = self.check_file(&package_json_path).then_some(package_json_path);
                Some(Resolution { path, package_json })
            }
        }
    }

    /// Resolve a package's main entry via the ordered entry field list
    fn resolve_package_main(&self, package_dir: &Path, package_json_path: &Path) -> Option<PathBuf> {
        if self.check_file(package_json_path) {
            let details = {
                let mut cache = self.package_json_cache.lock();
                if let Some(cached) = cache.get(package_json_path) {
                    cached.clone()
                } else {
                    let details = PackageJsonParser::parse_file(package_json_path).ok()?;
                    cache.put(package_json_path.to_path_buf(), details.clone());
                    details
                }
            };

            // The first present field replaces the canonical main entry.
            if let Some(entry) = details.entry_field(&self.entry_names) {
                if let Some(path) = self.probe(&paths::normalize(&package_dir.join(entry))) {
                    return Some(path);
                }
            }
        }

        // Default main entry
        self.probe(&package_dir.join("index"))
    }

    /// Check whether a path is an existing file, with caching
    fn check_file(&self, path: &Path) -> bool {
        if let Some(cached) = self.file_exists_cache.get(path) {
            return *cached;
        }

        let exists = path.is_file();
        self.file_exists_cache.insert(path.to_path_buf(), exists);
        exists
    }
}

/// Split a bare specifier into package name and subpath
fn split_package_specifier(specifier: &str) -> (String, Option<String>) {
    if specifier.starts_with('@') {
        // Scoped package
        let parts: Vec<&str> = specifier.splitn(3, '/').collect();
        if parts.len() >= 2 {
            let package_name = format!("{}/{}", parts[0], parts[1]);
            let subpath = parts.get(2).map(|s| (*s).to_string());
            (package_name, subpath)
        } else {
            (specifier.to_string(), None)
        }
    } else {
        let parts: Vec<&str> = specifier.splitn(2, '/').collect();
        if parts.len() == 2 {
            (parts[0].to_string(), Some(parts[1].to_string()))
        } else {
            (specifier.to_string(), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn default_resolver() -> PathResolver {
        PathResolver::new(vec![
            "browser".to_string(),
            "module".to_string(),
            "main".to_string(),
        ])
    }

    #[test]
    fn test_resolve_relative_exact() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.js"), "").unwrap();
        let from = dir.path().join("a.js");
        fs::write(&from, "import './b.js';").unwrap();

        let resolver = default_resolver();
        let resolution = resolver.resolve("./b.js", &from).unwrap();
        assert_eq!(resolution.path, dir.path().join("b.js"));
        assert!(resolution.package_json.is_none());
    }

    #[test]
    fn test_resolve_relative_with_extension_probe() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.js"), "").unwrap();
        let from = dir.path().join("a.js");
        fs::write(&from, "").unwrap();

        let resolver = default_resolver();
        let resolution = resolver.resolve("./b", &from).unwrap();
        assert_eq!(resolution.path, dir.path().join("b.js"));
    }

    #[test]
    fn test_resolve_directory_index() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("lib")).unwrap();
        fs::write(dir.path().join("lib").join("index.js"), "").unwrap();
        let from = dir.path().join("a.js");
        fs::write(&from, "").unwrap();

        let resolver = default_resolver();
        let resolution = resolver.resolve("./lib", &from).unwrap();
        assert_eq!(resolution.path, dir.path().join("lib").join("index.js"));
    }

    #[test]
    fn test_resolve_bare_package_with_main() {
        let dir = TempDir::new().unwrap();
        let pkg_dir = dir.path().join("node_modules").join("leftpad");
        fs::create_dir_all(&pkg_dir).unwrap();
        fs::write(pkg_dir.join("package.json"), r#"{"main": "lib/pad.js"}"#).unwrap();
        fs::create_dir(pkg_dir.join("lib")).unwrap();
        fs::write(pkg_dir.join("lib").join("pad.js"), "").unwrap();
        let from = dir.path().join("a.js");
        fs::write(&from, "").unwrap();

        let resolver = default_resolver();
        let resolution = resolver.resolve("leftpad", &from).unwrap();
        assert_eq!(resolution.path, pkg_dir.join("lib").join("pad.js"));
        assert_eq!(resolution.package_json, Some(pkg_dir.join("package.json")));
    }

    #[test]
    fn test_entry_field_order_preference() {
        let dir = TempDir::new().unwrap();
        let pkg_dir = dir.path().join("node_modules").join("dualpkg");
        fs::create_dir_all(&pkg_dir).unwrap();
        fs::write(
            pkg_dir.join("package.json"),
            r#"{"main": "main.js", "browser": "browser.js"}"#,
        )
        .unwrap();
        fs::write(pkg_dir.join("main.js"), "").unwrap();
        fs::write(pkg_dir.join("browser.js"), "").unwrap();
        let from = dir.path().join("a.js");
        fs::write(&from, "").unwrap();

        let resolver = default_resolver();
        let resolution = resolver.resolve("dualpkg", &from).unwrap();
        assert_eq!(resolution.path, pkg_dir.join("browser.js"));

        let main_first = PathResolver::new(vec!["main".to_string()]);
        let resolution = main_first.resolve("dualpkg", &from).unwrap();
        assert_eq!(resolution.path, pkg_dir.join("main.js"));
    }

    #[test]
    fn test_resolve_package_subpath_has_no_metadata_dep() {
        let dir = TempDir::new().unwrap();
        let pkg_dir = dir.path().join("node_modules").join("toolkit");
        fs::create_dir_all(&pkg_dir).unwrap();
        fs::write(pkg_dir.join("package.json"), r#"{"main": "index.js"}"#).unwrap();
        fs::write(pkg_dir.join("extra.js"), "").unwrap();
        let from = dir.path().join("a.js");
        fs::write(&from, "").unwrap();

        let resolver = default_resolver();
        let resolution = resolver.resolve("toolkit/extra.js", &from).unwrap();
        assert_eq!(resolution.path, pkg_dir.join("extra.js"));
        assert!(resolution.package_json.is_none());
    }

    #[test]
    fn test_core_module_is_unresolved() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.js");
        fs::write(&from, "").unwrap();

        let resolver = default_resolver();
        let err = resolver.resolve("fs", &from).unwrap_err();
        assert!(matches!(err, ChunkerError::UnresolvedModule { .. }));
    }

    #[test]
    fn test_unresolved_relative() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.js");
        fs::write(&from, "").unwrap();

        let resolver = default_resolver();
        let err = resolver.resolve("./missing.js", &from).unwrap_err();
        assert!(matches!(err, ChunkerError::UnresolvedModule { .. }));
    }

    #[test]
    fn test_split_package_specifier() {
        assert_eq!(split_package_specifier("lodash"), ("lodash".to_string(), None));
        assert_eq!(
            split_package_specifier("lodash/fp"),
            ("lodash".to_string(), Some("fp".to_string()))
        );
        assert_eq!(
            split_package_specifier("@scope/pkg"),
            ("@scope/pkg".to_string(), None)
        );
        assert_eq!(
            split_package_specifier("@scope/pkg/sub/mod.js"),
            ("@scope/pkg".to_string(), Some("sub/mod.js".to_string()))
        );
    }
}
