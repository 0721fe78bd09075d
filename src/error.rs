//! Error types for the Tikzcirc schematic core.
//!
//! This module provides a unified error type [`TikzcircError`] that covers
//! all error conditions that can occur while constructing components,
//! decoding saved schematics, and reading or writing files.

use thiserror::Error;

/// Result type alias using [`TikzcircError`].
pub type Result<T> = std::result::Result<T, TikzcircError>;

/// Unified error type for all Tikzcirc operations.
#[derive(Error, Debug)]
pub enum TikzcircError {
    // ============ Component Construction Errors ============
    /// A kind was passed to the constructor for the other geometry shape,
    /// or a command code was used as if it were a drawable kind
    #[error("Invalid kind '{kind}': expected a {expected} kind")]
    InvalidKind { kind: String, expected: &'static str },

    /// A geometry accessor was called on an instance of the other shape
    #[error("Invalid state: '{operation}' is not available on a {shape} component")]
    InvalidState {
        operation: &'static str,
        shape: &'static str,
    },

    /// A numeric kind code that is not in the catalog
    #[error("Unknown component kind code {code}")]
    UnknownKindCode { code: u32 },

    // ============ Markup Errors ============
    /// A saved record that cannot be turned back into a component
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    // ============ I/O Errors ============
    /// Error reading a schematic or preferences file
    #[error("Failed to read file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing an output file
    #[error("Failed to write file '{path}': {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Preferences file that is not valid TOML for [`crate::config::Preferences`]
    #[error("Invalid preferences in '{path}': {message}")]
    ConfigError { path: String, message: String },
}

impl TikzcircError {
    /// Create an invalid kind error
    pub fn invalid_kind(kind: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidKind {
            kind: kind.into(),
            expected,
        }
    }

    /// Create an invalid state error
    pub fn invalid_state(operation: &'static str, shape: &'static str) -> Self {
        Self::InvalidState { operation, shape }
    }

    /// Create a malformed record error
    pub fn malformed_record(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: message.into(),
        }
    }
}
