// src/error.rs

use thiserror::Error;

/// Core error types for the update reporter
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Release descriptor unreadable
    #[error("Failed to read release file {path}: {source}")]
    Configuration {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// OS id maps to no known package manager family
    #[error("Unsupported platform: no update backend for OS id '{0}'")]
    UnsupportedPlatform(String),

    /// Host identity (hostname, platform) could not be determined
    #[error("Host discovery error: {0}")]
    HostDiscovery(String),

    /// Update collection failed: subprocess or output parse
    #[error("Collection error: {0}")]
    Collection(String),

    /// A required report field was never supplied
    #[error("Report build error: missing field '{0}'")]
    Build(&'static str),

    /// Report serialization errors
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias using the reporter's Error type
pub type Result<T> = std::result::Result<T, Error>;
