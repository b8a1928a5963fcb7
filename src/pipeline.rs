// src/pipeline.rs

//! End-to-end report collection
//!
//! One strict linear sequence: read the release descriptor, classify
//! the family, collect pending updates through the family's backend,
//! gather host facts, assemble the report. Any step's failure aborts
//! the run; there is no partial result.

use crate::backend::{self, PendingUpdate};
use crate::error::{Error, Result};
use crate::family::PackageFamily;
use crate::host::HostFacts;
use crate::release::{self, OsIdentity};
use crate::report::Report;
use std::time::Duration;
use tracing::info;

/// Collect a full report for the host described by `release_file`.
pub fn collect_report(
    release_file: &str,
    timeout: Duration,
    host: &dyn HostFacts,
) -> Result<Report> {
    let identity = release::read_from(release_file)?;
    let family = PackageFamily::from_os_id(&identity.id);
    info!(
        "OS id {:?} version {:?} classified as {} family",
        identity.id, identity.version, family
    );

    let backend = backend::backend_for(family, timeout)
        .ok_or_else(|| Error::UnsupportedPlatform(identity.id.clone()))?;

    info!("Collecting pending updates via {}", backend.name());
    let updates = backend.list_pending()?;
    info!("Found {} pending update(s)", updates.len());

    assemble_report(updates, identity, host)
}

/// Assemble the report from collected updates, the OS identity, and
/// the host's own facts. Pure aggregation; the only lookup is through
/// `host`.
pub fn assemble_report(
    updates: Vec<PendingUpdate>,
    identity: OsIdentity,
    host: &dyn HostFacts,
) -> Result<Report> {
    Report::builder()
        .updates(updates)
        .fqdn(host.fqdn()?)
        .os_family(host.os_family())
        .os_id(identity.id)
        .os_version(identity.version)
        .host_architecture(host.architecture())
        .build()
}
