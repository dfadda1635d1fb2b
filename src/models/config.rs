//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default ordered list of package.json entry field names
pub const DEFAULT_PACKAGE_JSON_ENTRY_NAMES: [&str; 3] = ["browser", "module", "main"];

/// A manually attached chunk, written as `parent:child` on the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualEntrySpec {
    /// Chunk name the child attaches beneath
    pub parent: PathBuf,
    /// Entry file of the chunk to create
    pub name: PathBuf,
}

/// An externally supplied namespace mapping, written as `namespace=path`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraDep {
    /// The provided namespace
    pub namespace: String,
    /// The file providing it
    pub path: PathBuf,
}

/// Main configuration settings for the chunk calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Entry point files; the first is the primary entry point
    pub entrypoints: Vec<PathBuf>,

    /// Manually attached chunks
    pub manual_entrypoints: Vec<ManualEntrySpec>,

    /// Directory that anchors relative paths and project-relative chunk names
    pub base_directory: PathBuf,

    /// Path to the legacy runtime base file, when legacy namespaces are used
    pub goog_base_path: Option<PathBuf>,

    /// Legacy deps files to parse for namespace mappings
    pub deps_files: Vec<PathBuf>,

    /// Extra namespace mappings merged over the parsed deps files
    pub extra_deps: Vec<ExtraDep>,

    /// Ordered package.json field names consulted for a package's entry
    pub package_json_entry_names: Vec<String>,

    /// How chunk names are derived
    pub name_style: NameStyle,

    /// Prefix applied to every chunk name
    pub chunk_prefix: Option<String>,

    /// Emit the flat source list under the legacy `sources` key instead of `js`
    pub legacy_sources_key: bool,

    /// Output format (json, text)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress information
    pub verbose: bool,

    /// Whether to use colors in diagnostics and text output
    pub use_colors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            entrypoints: Vec::new(),
            manual_entrypoints: Vec::new(),
            base_directory: PathBuf::from("."),
            goog_base_path: None,
            deps_files: Vec::new(),
            extra_deps: Vec::new(),
            package_json_entry_names: DEFAULT_PACKAGE_JSON_ENTRY_NAMES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            name_style: NameStyle::Entrypoint,
            chunk_prefix: None,
            legacy_sources_key: false,
            output_format: OutputFormat::Json,
            output_file: None,
            quiet: false,
            verbose: false,
            use_colors: true,
        }
    }
}

impl Settings {
    /// Make every configured path absolute against `cwd`, lexically
    pub fn absolutize_paths(&mut self, cwd: &std::path::Path) {
        use crate::utils::paths::absolutize;

        self.base_directory = absolutize(&self.base_directory, cwd);
        let base = self.base_directory.clone();

        for entry in &mut self.entrypoints {
            *entry = absolutize(entry, &base);
        }
        for manual in &mut self.manual_entrypoints {
            manual.parent = absolutize(&manual.parent, &base);
            manual.name = absolutize(&manual.name, &base);
        }
        if let Some(goog_base) = &mut self.goog_base_path {
            *goog_base = absolutize(goog_base, &base);
        }
        for deps_file in &mut self.deps_files {
            *deps_file = absolutize(deps_file, &base);
        }
        for extra in &mut self.extra_deps {
            extra.path = absolutize(&extra.path, &base);
        }
    }
}

/// Chunk naming styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameStyle {
    /// Chunk names derive from entry file paths, made project-relative
    Entrypoint,
    /// The primary entry is `main`; all others are numbered in emission order
    Numbered,
}

impl std::str::FromStr for NameStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "entrypoint" => Ok(NameStyle::Entrypoint),
            "numbered" => Ok(NameStyle::Numbered),
            _ => Err(format!("Invalid name style: {}", s)),
        }
    }
}

impl std::fmt::Display for NameStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameStyle::Entrypoint => write!(f, "entrypoint"),
            NameStyle::Numbered => write!(f, "numbered"),
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output for the downstream optimizer
    Json,
    /// Human-readable chunk table
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialSettings {
    pub entrypoints: Option<Vec<PathBuf>>,
    pub manual_entrypoints: Option<Vec<ManualEntrySpec>>,
    pub base_directory: Option<PathBuf>,
    pub goog_base_path: Option<PathBuf>,
    pub deps_files: Option<Vec<PathBuf>>,
    pub extra_deps: Option<Vec<ExtraDep>>,
    pub package_json_entry_names: Option<Vec<String>>,
    pub name_style: Option<NameStyle>,
    pub chunk_prefix: Option<String>,
    pub legacy_sources_key: Option<bool>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.entrypoints.is_some() {
            self.entrypoints = other.entrypoints;
        }
        if other.manual_entrypoints.is_some() {
            self.manual_entrypoints = other.manual_entrypoints;
        }
        if other.base_directory.is_some() {
            self.base_directory = other.base_directory;
        }
        if other.goog_base_path.is_some() {
            self.goog_base_path = other.goog_base_path;
        }
        if other.deps_files.is_some() {
            self.deps_files = other.deps_files;
        }
        if other.extra_deps.is_some() {
            self.extra_deps = other.extra_deps;
        }
        if other.package_json_entry_names.is_some() {
            self.package_json_entry_names = other.package_json_entry_names;
        }
        if other.name_style.is_some() {
            self.name_style = other.name_style;
        }
        if other.chunk_prefix.is_some() {
            self.chunk_prefix = other.chunk_prefix;
        }
        if other.legacy_sources_key.is_some() {
            self.legacy_sources_key = other.legacy_sources_key;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(entrypoints) = &self.entrypoints {
            settings.entrypoints = entrypoints.clone();
        }
        if let Some(manual_entrypoints) = &self.manual_entrypoints {
            settings.manual_entrypoints = manual_entrypoints.clone();
        }
        if let Some(base_directory) = &self.base_directory {
            settings.base_directory = base_directory.clone();
        }
        if let Some(goog_base_path) = &self.goog_base_path {
            settings.goog_base_path = Some(goog_base_path.clone());
        }
        if let Some(deps_files) = &self.deps_files {
            settings.deps_files = deps_files.clone();
        }
        if let Some(extra_deps) = &self.extra_deps {
            settings.extra_deps = extra_deps.clone();
        }
        if let Some(package_json_entry_names) = &self.package_json_entry_names {
            settings.package_json_entry_names = package_json_entry_names.clone();
        }
        if let Some(name_style) = self.name_style {
            settings.name_style = name_style;
        }
        if let Some(chunk_prefix) = &self.chunk_prefix {
            settings.chunk_prefix = Some(chunk_prefix.clone());
        }
        if let Some(legacy_sources_key) = self.legacy_sources_key {
            settings.legacy_sources_key = legacy_sources_key;
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }

        settings
    }
}
