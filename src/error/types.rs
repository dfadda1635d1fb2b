//! Error types and definitions for the chunk calculator
//!
//! This module provides the error handling system for the whole pipeline,
//! including error types, result aliases, and severity classification.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but output may still be emitted
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for chunk calculation
#[derive(Debug, Error)]
pub enum ChunkerError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// JSON parsing errors with file context
    #[error("JSON parsing error in {file}: {source}")]
    JsonParse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// A module specifier could not be resolved to a file
    #[error("Unable to resolve module \"{specifier}\" referenced from {from}")]
    UnresolvedModule {
        specifier: String,
        from: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// A legacy namespace reference with no mapping
    #[error("Unknown namespace \"{namespace}\" referenced from {file}")]
    UnknownNamespace {
        namespace: String,
        file: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// The legacy deps file could not be parsed
    #[error("Invalid deps file {path}: {message}")]
    InvalidDepsFile {
        path: PathBuf,
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// A source file failed to parse (the file is skipped with empty deps)
    #[error("Failed to parse {file}: {message}")]
    FileParseFailure {
        file: PathBuf,
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// A chunk's own entry file is not among its sources after normalization
    #[error("Chunk entry file {chunk} is not among its own sources")]
    ChunkEntrypointMissing {
        chunk: PathBuf,
        referencing: Vec<PathBuf>,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// The projected dependency graph has a cycle
    #[error("Cyclic chunk dependency graph detected at chunk {chunk}")]
    CyclicChunkGraph {
        chunk: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Topological sorting of chunks stalled
    #[error("Unable to topologically sort chunks")]
    UnsortableChunks {
        remaining: Vec<PathBuf>,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },
}

impl ChunkerError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - the offending file is skipped
            ChunkerError::FileParseFailure { .. } => ErrorSeverity::Warning,

            // Regular errors - the run fails but partial output may exist
            ChunkerError::ChunkEntrypointMissing { .. } => ErrorSeverity::Error,
            ChunkerError::UnresolvedModule { .. } => ErrorSeverity::Error,
            ChunkerError::UnknownNamespace { .. } => ErrorSeverity::Error,

            // Everything else terminates the process
            _ => ErrorSeverity::Critical,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ChunkerError::UnresolvedModule { specifier, from, .. } => {
                format!(
                    "Cannot resolve module \"{}\" imported from '{}'. Check that the file exists or that the package is installed.",
                    specifier,
                    from.display()
                )
            }
            ChunkerError::UnknownNamespace { namespace, file, .. } => {
                format!(
                    "Namespace \"{}\" required from '{}' has no entry in the deps mapping. Pass a deps file or an extra-deps pair that provides it.",
                    namespace,
                    file.display()
                )
            }
            ChunkerError::InvalidDepsFile { path, message, .. } => {
                format!("Deps file '{}' could not be parsed: {}.", path.display(), message)
            }
            ChunkerError::ChunkEntrypointMissing { chunk, referencing, .. } => {
                let referrers = referencing
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "Chunk entry file '{}' was hoisted out of its own chunk because it is synchronously referenced by: {}.",
                    chunk.display(),
                    referrers
                )
            }
            ChunkerError::CyclicChunkGraph { chunk, .. } => {
                format!(
                    "The chunk dependency graph contains a cycle through '{}'. Break the cycle by removing one of the cross-chunk imports.",
                    chunk.display()
                )
            }
            ChunkerError::UnsortableChunks { remaining, .. } => {
                let names = remaining
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Chunks never became emittable during topological sorting: {}.", names)
            }
            ChunkerError::Io { source, .. } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            ChunkerError::InvalidPath { path, .. } => {
                format!("Invalid path: '{}'. Please provide a valid file path.", path.display())
            }
            ChunkerError::ConfigNotFound { path, .. } => {
                format!(
                    "Configuration file not found at '{}'. Create a config file or use command line options.",
                    path.display()
                )
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        ChunkerError::Io {
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a JSON parse error with file context
    pub fn json_parse_error(file: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ChunkerError::JsonParse {
            file: file.into(),
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        ChunkerError::Config {
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create an unresolved-module error
    pub fn unresolved_module(specifier: impl Into<String>, from: impl Into<PathBuf>) -> Self {
        ChunkerError::UnresolvedModule {
            specifier: specifier.into(),
            from: from.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create an unknown-namespace error
    pub fn unknown_namespace(namespace: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        ChunkerError::UnknownNamespace {
            namespace: namespace.into(),
            file: file.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create an invalid-deps-file error
    pub fn invalid_deps_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ChunkerError::InvalidDepsFile {
            path: path.into(),
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a file-parse-failure error
    pub fn file_parse_failure(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ChunkerError::FileParseFailure {
            file: file.into(),
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a chunk-entrypoint-missing error
    pub fn chunk_entrypoint_missing(chunk: impl Into<PathBuf>, referencing: Vec<PathBuf>) -> Self {
        ChunkerError::ChunkEntrypointMissing {
            chunk: chunk.into(),
            referencing,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a cyclic-chunk-graph error
    pub fn cyclic_chunk_graph(chunk: impl Into<PathBuf>) -> Self {
        ChunkerError::CyclicChunkGraph {
            chunk: chunk.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create an unsortable-chunks error
    pub fn unsortable_chunks(remaining: Vec<PathBuf>) -> Self {
        ChunkerError::UnsortableChunks {
            remaining,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for ChunkerError {
    fn from(err: std::io::Error) -> Self {
        ChunkerError::io_error(err)
    }
}

impl From<toml::de::Error> for ChunkerError {
    fn from(err: toml::de::Error) -> Self {
        ChunkerError::TomlParse {
            source: err,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl From<serde_json::Error> for ChunkerError {
    fn from(err: serde_json::Error) -> Self {
        ChunkerError::JsonSerialize {
            source: err,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

/// Result type alias for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;
