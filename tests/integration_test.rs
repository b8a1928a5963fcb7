// tests/integration_test.rs

//! Integration tests for the update reporter
//!
//! These tests drive the pipeline with on-disk release descriptors and
//! canned package manager output, so no package manager binaries are
//! needed.

use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use update_reporter::backend::{apt, zypper};
use update_reporter::host::HostFacts;
use update_reporter::pipeline;
use update_reporter::release::OsIdentity;
use update_reporter::{Error, Result};

/// Deterministic host facts for test reports
struct FixedHost;

impl HostFacts for FixedHost {
    fn fqdn(&self) -> Result<String> {
        Ok("host01.example.com".to_string())
    }

    fn os_family(&self) -> String {
        "linux".to_string()
    }

    fn architecture(&self) -> String {
        "x86_64".to_string()
    }
}

/// Host whose FQDN lookup fails
struct UnresolvableHost;

impl HostFacts for UnresolvableHost {
    fn fqdn(&self) -> Result<String> {
        Err(Error::HostDiscovery("no hostname configured".to_string()))
    }

    fn os_family(&self) -> String {
        "linux".to_string()
    }

    fn architecture(&self) -> String {
        "x86_64".to_string()
    }
}

const ZYPPER_FIXTURE: &str = r#"<?xml version='1.0'?>
<stream>
<message type="info">Loading repository data...</message>
<update-status version="0.6">
<update-list>
<update kind="package" name="libzypp" edition="17.31.8-150400.3.12.1" arch="x86_64" edition-old="17.31.6-150400.3.9.1">
<summary>Package, Patch, Pattern, and Product Management</summary>
</update>
<update kind="package" name="zypper" edition="1.14.59-150400.3.12.3" arch="x86_64" edition-old="1.14.57-150400.3.9.1">
<summary>Command line software manager using libzypp</summary>
</update>
<update kind="package" name="vim" edition="9.0.1443-150000.5.43.1" arch="x86_64" edition-old="9.0.1234-150000.5.40.1">
<summary>Vi IMproved</summary>
</update>
</update-list>
</update-status>
</stream>
"#;

const APT_FIXTURE: &str = "Listing...\n\
    bash/stable 5.1-2+deb11u1 amd64 [upgradable from: 5.1-2]\n\
    openssl/stable-security 1.1.1d-0+deb10u6 amd64 [upgradable from: 1.1.1d-0+deb10u1]\n";

fn write_descriptor(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_unsupported_platform_aborts_run() {
    let descriptor = write_descriptor("ID=fedora\nVERSION_ID=38\n");

    let result = pipeline::collect_report(
        descriptor.path().to_str().unwrap(),
        Duration::from_secs(5),
        &FixedHost,
    );

    match result {
        Err(Error::UnsupportedPlatform(id)) => assert_eq!(id, "fedora"),
        other => panic!("Expected unsupported platform error, got {:?}", other),
    }
}

#[test]
fn test_descriptor_without_id_aborts_run() {
    // Missing keys are not a read error; the classifier rejects them
    let descriptor = write_descriptor("NAME=\"Mystery OS\"\n");

    let result = pipeline::collect_report(
        descriptor.path().to_str().unwrap(),
        Duration::from_secs(5),
        &FixedHost,
    );

    match result {
        Err(Error::UnsupportedPlatform(id)) => assert_eq!(id, ""),
        other => panic!("Expected unsupported platform error, got {:?}", other),
    }
}

#[test]
fn test_unreadable_descriptor_aborts_run() {
    let result = pipeline::collect_report(
        "/nonexistent/os-release",
        Duration::from_secs(5),
        &FixedHost,
    );

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_zypper_fixture_produces_full_report() {
    let updates = zypper::parse_update_list(ZYPPER_FIXTURE).unwrap();
    let identity = OsIdentity {
        id: "opensuse-leap".to_string(),
        version: "15.5".to_string(),
    };

    let report = pipeline::assemble_report(updates, identity, &FixedHost).unwrap();
    assert_eq!(report.update_count, 3);

    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["updateCount"], 3);
    assert_eq!(value["fqdn"], "host01.example.com");
    assert_eq!(value["osFamily"], "linux");
    assert_eq!(value["osId"], "opensuse-leap");
    assert_eq!(value["osVersion"], "15.5");
    assert_eq!(value["hostArchitecture"], "x86_64");

    assert_eq!(value["updates"][0]["kind"], "package");
    assert_eq!(value["updates"][0]["name"], "libzypp");
    assert_eq!(value["updates"][0]["version"], "17.31.8-150400.3.12.1");
    assert_eq!(value["updates"][0]["arch"], "x86_64");
    assert_eq!(value["updates"][0]["oldVersion"], "17.31.6-150400.3.9.1");
    assert_eq!(
        value["updates"][0]["summary"],
        "Package, Patch, Pattern, and Product Management"
    );
    assert_eq!(value["updates"][2]["name"], "vim");
}

#[test]
fn test_apt_fixture_produces_full_report() {
    let updates = apt::parse_list_output(APT_FIXTURE).unwrap();
    let identity = OsIdentity {
        id: "ubuntu".to_string(),
        version: "22.04".to_string(),
    };

    let report = pipeline::assemble_report(updates, identity, &FixedHost).unwrap();
    assert_eq!(report.update_count, 2);

    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["osId"], "ubuntu");
    assert_eq!(value["updates"][0]["name"], "bash");
    assert_eq!(value["updates"][0]["version"], "5.1-2+deb11u1");
    assert_eq!(value["updates"][0]["oldVersion"], "5.1-2");
    assert_eq!(value["updates"][0]["kind"], "package");
    assert_eq!(value["updates"][0]["summary"], "");
    assert_eq!(value["updates"][1]["name"], "openssl");
}

#[test]
fn test_identical_inputs_produce_identical_reports() {
    let report_bytes = || {
        let updates = zypper::parse_update_list(ZYPPER_FIXTURE).unwrap();
        let identity = OsIdentity {
            id: "opensuse-leap".to_string(),
            version: "15.5".to_string(),
        };
        let report = pipeline::assemble_report(updates, identity, &FixedHost).unwrap();

        let mut out = Vec::new();
        report.write_to(&mut out).unwrap();
        out
    };

    let first = report_bytes();
    let second = report_bytes();
    assert_eq!(first, second);
}

#[test]
fn test_host_discovery_failure_aborts_build() {
    let updates = apt::parse_list_output(APT_FIXTURE).unwrap();
    let identity = OsIdentity {
        id: "ubuntu".to_string(),
        version: "22.04".to_string(),
    };

    let result = pipeline::assemble_report(updates, identity, &UnresolvableHost);
    assert!(matches!(result, Err(Error::HostDiscovery(_))));
}
