// src/backend/mod.rs

//! Update backends for the supported package manager families
//!
//! One backend per family: zypper for SUSE hosts, apt for Debian hosts.
//! Each invokes its tool's native upgrade listing and maps the output
//! onto the shared [`PendingUpdate`] record.

pub mod apt;
pub mod zypper;

use crate::error::Result;
use crate::family::PackageFamily;
use serde::Serialize;
use std::time::Duration;

/// One pending package upgrade, normalized across backends
///
/// Fields are opaque strings passed through from the backend; a backend
/// that does not report a field leaves it empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingUpdate {
    /// Update kind as reported by the backend (e.g. "package", "patch")
    pub kind: String,

    /// Package name
    pub name: String,

    /// Version the update would install
    pub version: String,

    /// Package architecture
    pub arch: String,

    /// Currently installed version
    pub old_version: String,

    /// Short human-readable summary
    pub summary: String,
}

/// A family's "list pending upgrades" implementation
pub trait UpdateBackend {
    /// Backend name for diagnostics
    fn name(&self) -> &'static str;

    /// Invoke the native package manager and normalize its output.
    ///
    /// Any subprocess or parse failure aborts the whole run; there is
    /// no partial result.
    fn list_pending(&self) -> Result<Vec<PendingUpdate>>;
}

/// Select the backend serving `family`.
///
/// Returns `None` when no backend serves the family; the caller decides
/// how to surface that.
pub fn backend_for(family: PackageFamily, timeout: Duration) -> Option<Box<dyn UpdateBackend>> {
    match family {
        PackageFamily::Suse => Some(Box::new(zypper::ZypperBackend::new(timeout))),
        PackageFamily::Debian => Some(Box::new(apt::AptBackend::new(timeout))),
        PackageFamily::Unknown => None,
    }
}
