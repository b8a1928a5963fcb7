// src/family.rs

//! OS family classification
//!
//! Maps a distribution id to the package manager family that serves it.
//! The mapping is a closed table: entries are added deliberately, never
//! inferred from unrelated signals.

use std::fmt;

/// Package manager family a host belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageFamily {
    /// SUSE family, served by zypper
    Suse,

    /// Debian family, served by apt
    Debian,

    /// No known update backend
    Unknown,
}

impl PackageFamily {
    /// Classify a distribution id.
    pub fn from_os_id(os_id: &str) -> Self {
        match os_id {
            "opensuse-leap" => PackageFamily::Suse,
            "ubuntu" => PackageFamily::Debian,
            _ => PackageFamily::Unknown,
        }
    }

    /// Lowercase family name for diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageFamily::Suse => "suse",
            PackageFamily::Debian => "debian",
            PackageFamily::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PackageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
