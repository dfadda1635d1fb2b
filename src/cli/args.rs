//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Chunker - calculate output chunks for a whole-program JavaScript optimizer
#[derive(Parser, Debug, Clone)]
#[command(name = "chunker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Calculate output chunks and a load-ordered source list from entry points")]
#[command(long_about = "Chunker discovers the transitive set of source files reachable from one or \
more entry points, splits them into chunks at dynamic-import boundaries, hoists sources shared by \
several chunks into their lowest common ancestor, and emits chunk definitions suitable for a \
whole-program optimizer together with the flat list of sources in load order.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Single entry point, JSON result on stdout
    chunker --entrypoint ./src/main.js

    # Several entry points; the first one is the primary
    chunker --entrypoint ./src/main.js --entrypoint ./src/worker.js

    # Attach a chunk manually under a parent
    chunker --entrypoint ./src/main.js --manual-entrypoint ./src/main.js:./src/admin.js

Legacy Namespaces:
    # Resolve goog.require() namespaces through a deps file
    chunker --entrypoint ./src/main.js \\
        --goog-base-path ./lib/base.js --deps-file ./lib/deps.js

    # Supply an extra namespace mapping directly
    chunker --entrypoint ./src/main.js \\
        --goog-base-path ./lib/base.js --extra-deps ns.widget=./lib/widget.js

Output Options:
    # Numbered chunk names (main, 0, 1, ...) with a prefix
    chunker --entrypoint ./src/main.js --name-style numbered --chunk-prefix app_

    # Human-readable chunk table instead of JSON
    chunker --entrypoint ./src/main.js --output text

    # Write the result to a file
    chunker --entrypoint ./src/main.js --output-file chunks.json

Configuration:
    # Use a specific configuration file
    chunker --config ./chunker.toml

    # Create a default configuration file
    chunker --init
")]
pub struct Args {
    /// Entry point source files; the first is the primary entry point
    #[arg(short, long = "entrypoint", value_name = "FILE", help = "Entry point source file (repeat for several; the first one becomes the primary entry point)")]
    pub entrypoints: Vec<PathBuf>,

    /// Manually attached chunks, written as parent:child
    #[arg(long = "manual-entrypoint", value_name = "PARENT:CHILD", help = "Attach CHILD as a chunk under PARENT even when no dynamic import references it (can be specified multiple times)")]
    pub manual_entrypoints: Vec<String>,

    /// Directory anchoring relative paths and project-relative chunk names
    #[arg(long, value_name = "DIR", help = "Base directory for resolving relative paths and deriving chunk names (defaults to the current directory)")]
    pub base_directory: Option<PathBuf>,

    /// Path to the legacy runtime base file
    #[arg(long, value_name = "FILE", help = "Legacy runtime base file; prepended to any file that references the goog object")]
    pub goog_base_path: Option<PathBuf>,

    /// Legacy deps files providing namespace mappings
    #[arg(long = "deps-file", value_name = "FILE", help = "Legacy deps file of goog.addDependency() calls (can be specified multiple times; later files win)")]
    pub deps_files: Vec<PathBuf>,

    /// Extra namespace mappings, written as namespace=path
    #[arg(long = "extra-deps", value_name = "NAMESPACE=PATH", help = "Extra namespace-to-file mapping merged over the parsed deps files (can be specified multiple times)")]
    pub extra_deps: Vec<String>,

    /// Ordered package.json fields consulted for a package's entry
    #[arg(long, value_name = "NAMES", value_delimiter = ',', help = "Comma-separated package.json field names tried in order for a package's entry point (default: browser,module,main)")]
    pub package_json_entry_names: Option<Vec<String>>,

    /// Chunk naming style
    #[arg(long, value_enum, value_name = "STYLE", help = "How chunk names are derived: 'entrypoint' uses project-relative entry file names, 'numbered' uses main, 0, 1, ...")]
    pub name_style: Option<NameStyle>,

    /// Prefix applied to every chunk name
    #[arg(long, value_name = "PREFIX", help = "Prefix prepended to every chunk name")]
    pub chunk_prefix: Option<String>,

    /// Emit the source list under the legacy `sources` key
    #[arg(long, help = "Use the legacy 'sources' key instead of 'js' for the flat source list in JSON output")]
    pub legacy_sources_key: bool,

    /// Output format (json, text)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json, help = "Output format: 'json' for the optimizer-facing result object, 'text' for a human-readable chunk table")]
    pub output: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write output to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .chunker.toml in the current directory if present)")]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, help = "Suppress non-essential output (only the result is printed)")]
    pub quiet: bool,

    /// Show detailed progress information
    #[arg(short, long, help = "Show per-stage progress information on stderr")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output (useful for terminals without ANSI support or when piping)")]
    pub no_colors: bool,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.chunker.toml) in the current directory")]
    pub init: bool,
}

/// Chunk naming style options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum NameStyle {
    /// Project-relative entry file names
    Entrypoint,
    /// main, 0, 1, ... in emission order
    Numbered,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON result object for the optimizer driver
    Json,
    /// Human-readable chunk table
    Text,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
