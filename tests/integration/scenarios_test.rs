//! End-to-end scenarios driving the full pipeline over fixture trees

use chunker::models::config::{ExtraDep, ManualEntrySpec, Settings};
use chunker::ChunkCalculator;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn settings_for(dir: &Path, entry_files: &[&str]) -> Settings {
    Settings {
        entrypoints: entry_files.iter().map(|name| dir.join(name)).collect(),
        base_directory: dir.to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn static_import_yields_one_chunk() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.js"), r#"import "./b.js";"#).unwrap();
    fs::write(dir.path().join("b.js"), "").unwrap();

    let outcome = ChunkCalculator::new(settings_for(dir.path(), &["a.js"]))
        .calculate()
        .unwrap();

    assert_eq!(outcome.spec.chunk_flags, vec!["a:2"]);
    assert_eq!(
        outcome.spec.sources,
        vec![dir.path().join("b.js"), dir.path().join("a.js")]
    );
    assert!(!outcome.entrypoint_missing);
}

#[test]
fn dynamic_import_yields_child_chunk() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.js"), r#"import("./b.js");"#).unwrap();
    fs::write(dir.path().join("b.js"), "").unwrap();

    let outcome = ChunkCalculator::new(settings_for(dir.path(), &["a.js"]))
        .calculate()
        .unwrap();

    assert_eq!(outcome.spec.chunk_flags, vec!["a:1", "b:1:a"]);
    assert_eq!(
        outcome.spec.sources,
        vec![dir.path().join("a.js"), dir.path().join("b.js")]
    );
}

#[test]
fn shared_source_hoists_to_common_ancestor() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("a.js"),
        r#"import("./b.js"); import("./c.js");"#,
    )
    .unwrap();
    fs::write(dir.path().join("b.js"), r#"import "./shared.js";"#).unwrap();
    fs::write(dir.path().join("c.js"), r#"import "./shared.js";"#).unwrap();
    fs::write(dir.path().join("shared.js"), "").unwrap();

    let outcome = ChunkCalculator::new(settings_for(dir.path(), &["a.js"]))
        .calculate()
        .unwrap();

    assert_eq!(outcome.spec.chunk_flags, vec!["a:2", "b:1:a", "c:1:a"]);
    assert_eq!(
        outcome.spec.sources,
        vec![
            dir.path().join("shared.js"),
            dir.path().join("a.js"),
            dir.path().join("b.js"),
            dir.path().join("c.js")
        ]
    );
}

#[test]
fn legacy_namespaces_resolve_through_deps_mapping() {
    let dir = TempDir::new().unwrap();
    let lib = dir.path().join("lib");
    fs::create_dir(&lib).unwrap();
    fs::write(lib.join("base.js"), "var COMPILED = false;").unwrap();
    fs::write(lib.join("x.js"), "").unwrap();
    fs::write(
        dir.path().join("a.js"),
        r#"goog.require("ns.X"); goog.global.run();"#,
    )
    .unwrap();

    let mut settings = settings_for(dir.path(), &["a.js"]);
    settings.goog_base_path = Some(lib.join("base.js"));
    settings.extra_deps = vec![ExtraDep {
        namespace: "ns.X".to_string(),
        path: lib.join("x.js"),
    }];

    let outcome = ChunkCalculator::new(settings).calculate().unwrap();

    assert_eq!(outcome.spec.chunk_flags, vec!["a:3"]);
    assert_eq!(
        outcome.spec.sources,
        vec![lib.join("base.js"), lib.join("x.js"), dir.path().join("a.js")]
    );
}

#[test]
fn legacy_namespaces_resolve_through_deps_file() {
    let dir = TempDir::new().unwrap();
    let lib = dir.path().join("lib");
    fs::create_dir(&lib).unwrap();
    fs::write(lib.join("base.js"), "var COMPILED = false;").unwrap();
    fs::write(lib.join("widget.js"), "").unwrap();
    fs::write(
        lib.join("deps.js"),
        r#"goog.addDependency('lib/widget.js', ['ns.widget'], [], {});"#,
    )
    .unwrap();
    fs::write(dir.path().join("a.js"), r#"goog.require("ns.widget");"#).unwrap();

    let mut settings = settings_for(dir.path(), &["a.js"]);
    settings.goog_base_path = Some(lib.join("base.js"));
    settings.deps_files = vec![lib.join("deps.js")];

    let outcome = ChunkCalculator::new(settings).calculate().unwrap();

    assert_eq!(outcome.spec.chunk_flags, vec!["a:3"]);
    assert_eq!(
        outcome.spec.sources,
        vec![lib.join("base.js"), lib.join("widget.js"), dir.path().join("a.js")]
    );
}

#[test]
fn manual_entrypoint_attaches_alongside_dynamic_children() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.js"), r#"import("./b.js");"#).unwrap();
    fs::write(dir.path().join("b.js"), "").unwrap();
    fs::write(dir.path().join("c.js"), "").unwrap();

    let mut settings = settings_for(dir.path(), &["a.js"]);
    settings.manual_entrypoints = vec![ManualEntrySpec {
        parent: dir.path().join("a.js"),
        name: dir.path().join("c.js"),
    }];

    let outcome = ChunkCalculator::new(settings).calculate().unwrap();

    assert_eq!(outcome.spec.chunk_flags, vec!["a:1", "b:1:a", "c:1:a"]);
}

#[test]
fn dynamic_back_reference_does_not_create_a_cycle() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.js"), r#"import "./b.js";"#).unwrap();
    fs::write(dir.path().join("b.js"), r#"import("./a.js");"#).unwrap();

    let outcome = ChunkCalculator::new(settings_for(dir.path(), &["a.js"]))
        .calculate()
        .unwrap();

    // The attempted back-edge is refused; a single chunk remains.
    assert_eq!(outcome.spec.chunk_flags, vec!["a:2"]);
    assert_eq!(
        outcome.spec.sources,
        vec![dir.path().join("b.js"), dir.path().join("a.js")]
    );
}

#[test]
fn file_without_imports_is_its_own_chunk() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.js"), "const answer = 42;").unwrap();

    let outcome = ChunkCalculator::new(settings_for(dir.path(), &["a.js"]))
        .calculate()
        .unwrap();

    assert_eq!(outcome.spec.chunk_flags, vec!["a:1"]);
    assert_eq!(outcome.spec.sources, vec![dir.path().join("a.js")]);
}

#[test]
fn non_literal_dynamic_import_is_ignored_with_diagnostic() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("a.js"),
        "const name = './other.js';\nimport(name);",
    )
    .unwrap();

    let outcome = ChunkCalculator::new(settings_for(dir.path(), &["a.js"]))
        .calculate()
        .unwrap();

    assert_eq!(outcome.spec.chunk_flags, vec!["a:1"]);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert!(outcome.diagnostics[0].message.contains("non-literal"));
}

#[test]
fn entrypoint_hoisted_out_of_its_chunk_is_diagnosed() {
    // a both statically imports b and dynamically imports it; b's entry file
    // is hoisted into a and chunk b is left without its own entry.
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("a.js"),
        r#"import "./b.js"; import("./b.js");"#,
    )
    .unwrap();
    fs::write(dir.path().join("b.js"), "").unwrap();

    let outcome = ChunkCalculator::new(settings_for(dir.path(), &["a.js"]))
        .calculate()
        .unwrap();

    assert!(outcome.entrypoint_missing);
    assert!(outcome
        .diagnostics
        .iter()
        .any(|diagnostic| diagnostic.message.contains("b.js")));
    assert_eq!(outcome.spec.chunk_flags, vec!["a:2", "b:0:a"]);
}

#[test]
fn multiple_entrypoints_hang_off_primary() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.js"), "").unwrap();
    fs::write(dir.path().join("second.js"), "").unwrap();

    let outcome = ChunkCalculator::new(settings_for(dir.path(), &["a.js", "second.js"]))
        .calculate()
        .unwrap();

    assert_eq!(outcome.spec.chunk_flags, vec!["a:1", "second:1:a"]);
}
