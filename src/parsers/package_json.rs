//! Package.json parsing functionality
//!
//! This module provides the minimal package.json parsing the module resolver
//! needs: the package name and the top-level string fields that can act as
//! entry points.

use crate::error::{ChunkerError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Parsed package metadata
#[derive(Debug, Clone, Default)]
pub struct PackageDetails {
    /// Package name, when present
    pub name: Option<String>,

    /// All top-level fields whose values are strings
    fields: HashMap<String, String>,
}

impl PackageDetails {
    /// The value of the first present field out of an ordered name list
    pub fn entry_field(&self, names: &[String]) -> Option<&str> {
        names
            .iter()
            .find_map(|name| self.fields.get(name))
            .map(String::as_str)
    }

    /// Look up any top-level string field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Parser for package.json files
pub struct PackageJsonParser;

impl PackageJsonParser {
    /// Parse package.json content into PackageDetails
    pub fn parse(content: &str) -> Result<PackageDetails> {
        let json_value: Value = serde_json::from_str(content)
            .map_err(|e| ChunkerError::json_parse_error("package.json", e))?;

        let obj = match json_value {
            Value::Object(obj) => obj,
            _ => {
                let err = <serde_json::Error as serde::de::Error>::custom("root value is not an object");
                return Err(ChunkerError::json_parse_error("package.json", err));
            }
        };

        let mut details = PackageDetails::default();
        for (key, value) in obj {
            if let Value::String(s) = value {
                if key == "name" {
                    details.name = Some(s.clone());
                }
                details.fields.insert(key, s);
            }
        }

        Ok(details)
    }

    /// Parse a package.json file from a path
    pub fn parse_file(path: &Path) -> Result<PackageDetails> {
        let content = std::fs::read_to_string(path).map_err(ChunkerError::io_error)?;

        Self::parse(&content).map_err(|e| match e {
            ChunkerError::JsonParse { source, .. } => ChunkerError::json_parse_error(path, source),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_fields() {
        let details = PackageJsonParser::parse(
            r#"{"name": "pkg", "main": "lib/index.js", "module": "es/index.js", "version": "1.0.0"}"#,
        )
        .unwrap();

        assert_eq!(details.name.as_deref(), Some("pkg"));
        assert_eq!(details.field("main"), Some("lib/index.js"));

        let names: Vec<String> = vec!["browser".into(), "module".into(), "main".into()];
        assert_eq!(details.entry_field(&names), Some("es/index.js"));
    }

    #[test]
    fn test_non_string_fields_are_skipped() {
        let details = PackageJsonParser::parse(
            r#"{"name": "pkg", "browser": {"./a.js": "./b.js"}, "main": "index.js"}"#,
        )
        .unwrap();

        // An object-valued browser field does not act as an entry point.
        let names: Vec<String> = vec!["browser".into(), "main".into()];
        assert_eq!(details.entry_field(&names), Some("index.js"));
    }

    #[test]
    fn test_invalid_json_fails() {
        assert!(PackageJsonParser::parse("not json").is_err());
        assert!(PackageJsonParser::parse("[1, 2]").is_err());
    }
}
