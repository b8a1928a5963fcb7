// src/report.rs

//! Report assembly and JSON emission
//!
//! The report is the single JSON document a run produces. Field names
//! and their order are a wire contract consumed downstream; both come
//! from the struct declaration here.

use crate::backend::PendingUpdate;
use crate::error::{Error, Result};
use serde::Serialize;
use std::io::Write;

/// One host's pending updates plus the identity of the host itself
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub updates: Vec<PendingUpdate>,

    /// Always `updates.len()`; derived by the builder, never supplied
    pub update_count: usize,

    pub fqdn: String,

    /// Host OS family (e.g. "linux"), not the package manager family
    pub os_family: String,

    pub os_id: String,

    pub os_version: String,

    pub host_architecture: String,
}

impl Report {
    pub fn builder() -> ReportBuilder {
        ReportBuilder::default()
    }

    /// Serialize to the canonical compact JSON encoding.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write the JSON document to `out`. Exactly one document, no
    /// trailing newline.
    pub fn write_to(&self, mut out: impl Write) -> Result<()> {
        let json = self.to_json()?;
        out.write_all(json.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Builder for [`Report`]; every field is required.
///
/// An empty string is a supplied value (a host without `VERSION_ID`
/// reports an empty `osVersion`); only a field never set at all fails
/// the build.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    updates: Option<Vec<PendingUpdate>>,
    fqdn: Option<String>,
    os_family: Option<String>,
    os_id: Option<String>,
    os_version: Option<String>,
    host_architecture: Option<String>,
}

impl ReportBuilder {
    pub fn updates(mut self, updates: Vec<PendingUpdate>) -> Self {
        self.updates = Some(updates);
        self
    }

    pub fn fqdn(mut self, fqdn: String) -> Self {
        self.fqdn = Some(fqdn);
        self
    }

    pub fn os_family(mut self, os_family: String) -> Self {
        self.os_family = Some(os_family);
        self
    }

    pub fn os_id(mut self, os_id: String) -> Self {
        self.os_id = Some(os_id);
        self
    }

    pub fn os_version(mut self, os_version: String) -> Self {
        self.os_version = Some(os_version);
        self
    }

    pub fn host_architecture(mut self, host_architecture: String) -> Self {
        self.host_architecture = Some(host_architecture);
        self
    }

    /// Assemble the report, failing on the first missing field.
    pub fn build(self) -> Result<Report> {
        let updates = self.updates.ok_or(Error::Build("updates"))?;
        let fqdn = self.fqdn.ok_or(Error::Build("fqdn"))?;
        let os_family = self.os_family.ok_or(Error::Build("osFamily"))?;
        let os_id = self.os_id.ok_or(Error::Build("osId"))?;
        let os_version = self.os_version.ok_or(Error::Build("osVersion"))?;
        let host_architecture = self
            .host_architecture
            .ok_or(Error::Build("hostArchitecture"))?;

        let update_count = updates.len();

        Ok(Report {
            updates,
            update_count,
            fqdn,
            os_family,
            os_id,
            os_version,
            host_architecture,
        })
    }
}
