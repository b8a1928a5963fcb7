// src/host.rs

//! Host identity lookup
//!
//! The report describes the machine it was produced on: fully-qualified
//! hostname, host OS family, and CPU architecture. The [`HostFacts`]
//! trait keeps that lookup substitutable in tests.

use crate::error::{Error, Result};
use crate::process;
use std::env;
use std::time::Duration;

/// Bound on the hostname lookup; generous for a local command
const FQDN_TIMEOUT: Duration = Duration::from_secs(5);

/// Identity facts about the machine a report describes
pub trait HostFacts {
    /// Fully-qualified domain name of the host
    fn fqdn(&self) -> Result<String>;

    /// Host operating system family, e.g. "linux"
    fn os_family(&self) -> String;

    /// Host CPU architecture, e.g. "x86_64"
    fn architecture(&self) -> String;
}

/// Host facts read from the running system
pub struct SystemHost;

impl HostFacts for SystemHost {
    /// FQDN via the `hostname` command.
    fn fqdn(&self) -> Result<String> {
        let output = process::run_command("hostname", &["-f"], &[], FQDN_TIMEOUT)
            .map_err(|e| Error::HostDiscovery(e.to_string()))?;

        let fqdn = output.trim().to_string();
        if fqdn.is_empty() {
            return Err(Error::HostDiscovery(
                "hostname -f produced no output".to_string(),
            ));
        }

        Ok(fqdn)
    }

    fn os_family(&self) -> String {
        env::consts::OS.to_string()
    }

    fn architecture(&self) -> String {
        env::consts::ARCH.to_string()
    }
}
