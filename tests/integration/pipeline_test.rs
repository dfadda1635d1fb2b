//! Pipeline-level properties: hoist depth, determinism, naming styles

use chunker::models::config::{NameStyle, Settings};
use chunker::output::formatters::format_spec_json;
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
fn shared_source_hoists_to_deepest_common_ancestor() {
    // a -> m (dynamic); m -> x, y (dynamic); x and y share s. The hoist
    // target is m, not the primary entry.
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.js"), r#"import("./m.js");"#).unwrap();
    fs::write(dir.path().join("m.js"), r#"import("./x.js"); import("./y.js");"#).unwrap();
    fs::write(dir.path().join("x.js"), r#"import "./s.js";"#).unwrap();
    fs::write(dir.path().join("y.js"), r#"import "./s.js";"#).unwrap();
    fs::write(dir.path().join("s.js"), "").unwrap();

    let outcome = ChunkCalculator::new(settings_for(dir.path(), &["a.js"]))
        .calculate()
        .unwrap();

    assert_eq!(
        outcome.spec.chunk_flags,
        vec!["a:1", "m:2:a", "x:1:m", "y:1:m"]
    );
    assert_eq!(
        outcome.spec.sources,
        vec![
            dir.path().join("a.js"),
            dir.path().join("s.js"),
            dir.path().join("m.js"),
            dir.path().join("x.js"),
            dir.path().join("y.js")
        ]
    );
}

#[test]
fn transitive_static_deps_order_dependencies_first() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.js"), r#"import "./b.js"; import "./c.js";"#).unwrap();
    fs::write(dir.path().join("b.js"), r#"import "./d.js";"#).unwrap();
    fs::write(dir.path().join("c.js"), r#"import "./d.js";"#).unwrap();
    fs::write(dir.path().join("d.js"), "").unwrap();

    let outcome = ChunkCalculator::new(settings_for(dir.path(), &["a.js"]))
        .calculate()
        .unwrap();

    assert_eq!(outcome.spec.chunk_flags, vec!["a:4"]);
    assert_eq!(
        outcome.spec.sources,
        vec![
            dir.path().join("d.js"),
            dir.path().join("b.js"),
            dir.path().join("c.js"),
            dir.path().join("a.js")
        ]
    );
}

#[test]
fn running_the_pipeline_twice_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("a.js"),
        r#"import "./util.js"; import("./b.js"); import("./c.js");"#,
    )
    .unwrap();
    fs::write(dir.path().join("b.js"), r#"import "./shared.js";"#).unwrap();
    fs::write(dir.path().join("c.js"), r#"import "./shared.js"; import "./util.js";"#).unwrap();
    fs::write(dir.path().join("shared.js"), "").unwrap();
    fs::write(dir.path().join("util.js"), "").unwrap();

    let settings = settings_for(dir.path(), &["a.js"]);

    let first = ChunkCalculator::new(settings.clone()).calculate().unwrap();
    let second = ChunkCalculator::new(settings).calculate().unwrap();

    let first_json = format_spec_json(&first.spec, false).unwrap();
    let second_json = format_spec_json(&second.spec, false).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn numbered_name_style_with_prefix() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.js"), r#"import("./b.js"); import("./c.js");"#).unwrap();
    fs::write(dir.path().join("b.js"), "").unwrap();
    fs::write(dir.path().join("c.js"), "").unwrap();

    let mut settings = settings_for(dir.path(), &["a.js"]);
    settings.name_style = NameStyle::Numbered;
    settings.chunk_prefix = Some("app_".to_string());

    let outcome = ChunkCalculator::new(settings).calculate().unwrap();

    assert_eq!(
        outcome.spec.chunk_flags,
        vec!["app_main:1", "app_0:1:app_main", "app_1:1:app_main"]
    );
}

#[test]
fn entrypoint_names_collide_with_numeric_suffix() {
    let dir = TempDir::new().unwrap();
    let pages = dir.path().join("pages");
    let admin = dir.path().join("admin");
    fs::create_dir(&pages).unwrap();
    fs::create_dir(&admin).unwrap();
    fs::write(
        dir.path().join("a.js"),
        r#"import("./pages/home.js"); import("./admin/home.js");"#,
    )
    .unwrap();
    fs::write(pages.join("home.js"), "").unwrap();
    fs::write(admin.join("home.js"), "").unwrap();

    let outcome = ChunkCalculator::new(settings_for(dir.path(), &["a.js"]))
        .calculate()
        .unwrap();

    assert_eq!(
        outcome.spec.chunk_flags,
        vec!["a:1", "home:1:a", "home1:1:a"]
    );
}

#[test]
fn bare_package_pulls_in_its_metadata_file() {
    let dir = TempDir::new().unwrap();
    let pkg_dir = dir.path().join("node_modules").join("widget");
    fs::create_dir_all(&pkg_dir).unwrap();
    fs::write(pkg_dir.join("package.json"), r#"{"main": "index.js"}"#).unwrap();
    fs::write(pkg_dir.join("index.js"), "").unwrap();
    fs::write(dir.path().join("a.js"), r#"import "widget";"#).unwrap();

    let outcome = ChunkCalculator::new(settings_for(dir.path(), &["a.js"]))
        .calculate()
        .unwrap();

    assert_eq!(outcome.spec.chunk_flags, vec!["a:3"]);
    assert_eq!(
        outcome.spec.sources,
        vec![
            pkg_dir.join("package.json"),
            pkg_dir.join("index.js"),
            dir.path().join("a.js")
        ]
    );
}

#[test]
fn unresolved_import_fails_the_run() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.js"), r#"import "./missing.js";"#).unwrap();

    let result = ChunkCalculator::new(settings_for(dir.path(), &["a.js"])).calculate();
    assert!(matches!(
        result,
        Err(chunker::ChunkerError::UnresolvedModule { .. })
    ));
}

#[test]
fn parse_failure_is_survivable() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.js"), "function ( {{{").unwrap();
    fs::write(dir.path().join("a.js"), r#"import "./broken.js";"#).unwrap();

    let outcome = ChunkCalculator::new(settings_for(dir.path(), &["a.js"]))
        .calculate()
        .unwrap();

    assert_eq!(outcome.spec.chunk_flags, vec!["a:2"]);
    assert!(outcome
        .diagnostics
        .iter()
        .any(|diagnostic| diagnostic.message.contains("broken.js")));
}
