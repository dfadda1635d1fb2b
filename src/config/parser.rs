//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChunkerError, Result};
use crate::models::config::PartialSettings;

/// Default configuration file content written by `--init`
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# chunker configuration file
#
# Every value can also be supplied on the command line; command-line
# arguments take precedence over this file.

# Entry point source files; the first one is the primary entry point.
# entrypoints = ["./src/main.js"]

# Manually attached chunks.
# [[manual_entrypoints]]
# parent = "./src/main.js"
# name = "./src/admin.js"

# Directory anchoring relative paths and chunk names.
# base_directory = "."

# Legacy namespace support.
# goog_base_path = "./lib/base.js"
# deps_files = ["./lib/deps.js"]
# [[extra_deps]]
# namespace = "ns.widget"
# path = "./lib/widget.js"

# Package.json fields consulted, in order, for a package's entry point.
# package_json_entry_names = ["browser", "module", "main"]

# Chunk naming: "entrypoint" or "numbered".
# name_style = "entrypoint"
# chunk_prefix = ""

# Output options.
# output_format = "json"
# legacy_sources_key = false
# output_file = "chunks.json"
# quiet = false
# verbose = false
# use_colors = true
"#;

/// Parse a configuration file into partial settings
pub fn parse_config_file(path: &Path) -> Result<PartialSettings> {
    let content = fs::read_to_string(path).map_err(|e| ChunkerError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace::capture(),
    })?;

    parse_config_content(&content).map_err(|e| match e {
        ChunkerError::TomlParse { source, .. } => ChunkerError::ConfigParse {
            path: path.to_path_buf(),
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        },
        other => other,
    })
}

/// Parse configuration content into partial settings
pub fn parse_config_content(content: &str) -> Result<PartialSettings> {
    let settings: PartialSettings = toml::from_str(content)?;
    Ok(settings)
}

/// Find and parse the default configuration file, if one exists
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    let path = PathBuf::from(super::file::DEFAULT_CONFIG_FILE);
    if path.is_file() {
        parse_config_file(&path).map(Some)
    } else {
        Ok(None)
    }
}

/// Write a commented default configuration file
pub fn create_default_config(path: &Path) -> Result<()> {
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| ChunkerError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace::capture(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::{NameStyle, OutputFormat};

    #[test]
    fn test_parse_config_content() {
        let content = r#"
            entrypoints = ["/p/a.js"]
            name_style = "numbered"
            chunk_prefix = "app_"
            output_format = "text"
            legacy_sources_key = true

            [[manual_entrypoints]]
            parent = "/p/a.js"
            name = "/p/c.js"

            [[extra_deps]]
            namespace = "ns.widget"
            path = "/lib/widget.js"
        "#;

        let settings = parse_config_content(content).unwrap();
        assert_eq!(settings.entrypoints.as_ref().unwrap().len(), 1);
        assert_eq!(settings.name_style, Some(NameStyle::Numbered));
        assert_eq!(settings.chunk_prefix.as_deref(), Some("app_"));
        assert_eq!(settings.output_format, Some(OutputFormat::Text));
        assert_eq!(settings.legacy_sources_key, Some(true));

        let manuals = settings.manual_entrypoints.unwrap();
        assert_eq!(manuals[0].parent, PathBuf::from("/p/a.js"));
        assert_eq!(manuals[0].name, PathBuf::from("/p/c.js"));

        let extra = settings.extra_deps.unwrap();
        assert_eq!(extra[0].namespace, "ns.widget");
    }

    #[test]
    fn test_parse_invalid_content_fails() {
        assert!(parse_config_content("entrypoints = 42").is_err());
        assert!(parse_config_content("not valid toml [").is_err());
    }

    #[test]
    fn test_default_template_is_valid_toml() {
        let settings = parse_config_content(DEFAULT_CONFIG_TEMPLATE).unwrap();
        // Everything is commented out, so nothing is set.
        assert!(settings.entrypoints.is_none());
        assert!(settings.output_format.is_none());
    }

    #[test]
    fn test_create_default_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(".chunker.toml");
        create_default_config(&path).unwrap();
        let parsed = parse_config_file(&path).unwrap();
        assert!(parsed.entrypoints.is_none());
    }
}
