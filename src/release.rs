// src/release.rs

//! OS release descriptor parsing
//!
//! Reads the `/etc/os-release` key=value file and extracts the
//! distribution id and version that later pick the update backend.

use crate::error::{Error, Result};
use std::fs;
use tracing::debug;

/// Conventional location of the OS release descriptor
pub const DEFAULT_RELEASE_FILE: &str = "/etc/os-release";

/// Distribution identity extracted from the release descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsIdentity {
    /// Distribution id (`ID=` assignment), e.g. "opensuse-leap"
    pub id: String,

    /// Distribution version (`VERSION_ID=` assignment), e.g. "15.5"
    pub version: String,
}

impl OsIdentity {
    /// Parse release descriptor content.
    ///
    /// Values may be wrapped in double quotes, which are trimmed. A key
    /// that never appears leaves its field empty; a repeated key keeps
    /// the last assignment.
    pub fn parse(content: &str) -> Self {
        let mut id = String::new();
        let mut version = String::new();

        for line in content.lines() {
            if let Some(value) = line.strip_prefix("ID=") {
                id = unquote(value).to_string();
            } else if let Some(value) = line.strip_prefix("VERSION_ID=") {
                version = unquote(value).to_string();
            }
        }

        OsIdentity { id, version }
    }
}

/// Read and parse the release descriptor at `path`.
///
/// An unreadable file is a configuration error; a readable file with
/// missing keys is not (the classifier rejects unknown ids later).
pub fn read_from(path: &str) -> Result<OsIdentity> {
    let content = fs::read_to_string(path).map_err(|source| Error::Configuration {
        path: path.to_string(),
        source,
    })?;

    let identity = OsIdentity::parse(&content);
    debug!(
        "Release descriptor {}: id={:?} version={:?}",
        path, identity.id, identity.version
    );

    Ok(identity)
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}
