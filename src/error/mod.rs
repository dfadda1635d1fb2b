//! Error handling for the chunk calculator
//!
//! This module provides the error handling system for the application,
//! including error types, result aliases, and error context utilities.

pub mod context;
pub mod types;

pub use context::{OptionExt, ResultExt};
pub use types::{ChunkerError, ErrorSeverity, Result};
