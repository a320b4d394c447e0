//! Error handling for the splitspec core library.
//!
//! This module defines the main error type `Error` used throughout the
//! library, along with a convenient `Result` type alias. It uses `thiserror`
//! for easy error handling and implements conversions from common error
//! types.
//!
//! # Examples
//!
//! ```
//! use splitspec_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     // Operations that might fail...
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type for splitspec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for splitspec operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The workspace root cannot be determined or is not usable
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A root, path-item or schema document that was the primary target of a
    /// call could not be located
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// The requested HTTP method has no operation block in the target file
    #[error("method '{method}' not found in {file}")]
    MethodNotFound {
        /// HTTP method that was requested
        method: String,
        /// File that was searched
        file: String,
    },

    /// Content does not parse as a structured mapping where one is required
    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

impl Error {
    /// Create a new storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::StorageUnavailable(msg.into())
    }

    /// Create a new document-not-found error
    pub fn document_not_found<S: Into<String>>(path: S) -> Self {
        Self::DocumentNotFound(path.into())
    }

    /// Create a new method-not-found error
    pub fn method_not_found<M: Into<String>, F: Into<String>>(method: M, file: F) -> Self {
        Self::MethodNotFound {
            method: method.into(),
            file: file.into(),
        }
    }

    /// Create a new malformed-document error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedDocument(msg.into())
    }
}
