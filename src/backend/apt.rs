// src/backend/apt.rs

//! Debian update backend
//!
//! Runs `apt list --upgradeable` and parses its line-oriented output
//! into pending update records.

use super::{PendingUpdate, UpdateBackend};
use crate::error::{Error, Result};
use crate::process;
use std::time::Duration;
use tracing::debug;

const APT_PROGRAM: &str = "apt";

const APT_ARGS: &[&str] = &["list", "--upgradeable"];

/// Pin the locale so the output grammar is stable across hosts
const APT_ENVS: &[(&str, &str)] = &[("LANG", "C")];

/// apt's listing reports plain packages only
const APT_UPDATE_KIND: &str = "package";

/// Backend for apt-managed (Debian family) hosts
pub struct AptBackend {
    program: String,
    timeout: Duration,
}

impl AptBackend {
    pub fn new(timeout: Duration) -> Self {
        Self {
            program: APT_PROGRAM.to_string(),
            timeout,
        }
    }

    #[cfg(test)]
    fn with_program(program: &str, timeout: Duration) -> Self {
        Self {
            program: program.to_string(),
            timeout,
        }
    }
}

impl UpdateBackend for AptBackend {
    fn name(&self) -> &'static str {
        "apt"
    }

    fn list_pending(&self) -> Result<Vec<PendingUpdate>> {
        let stdout = process::run_command(&self.program, APT_ARGS, APT_ENVS, self.timeout)
            .map_err(|e| Error::Collection(e.to_string()))?;

        let updates = parse_list_output(&stdout)?;
        debug!("apt reported {} pending update(s)", updates.len());
        Ok(updates)
    }
}

/// Parse `apt list --upgradeable` output.
///
/// Expected line shape:
///
/// ```text
/// bash/stable 5.1-2+deb11u1 amd64 [upgradable from: 5.1-2]
/// ```
///
/// The leading `Listing...` banner and blank lines are skipped. Any
/// other line that does not match the shape fails the whole parse: no
/// partial result is produced.
pub fn parse_list_output(output: &str) -> Result<Vec<PendingUpdate>> {
    let mut updates = Vec::new();

    for (index, line) in output.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if index == 0 && line.starts_with("Listing") {
            continue;
        }
        updates.push(parse_line(line)?);
    }

    Ok(updates)
}

/// Parse one `name/source version arch [upgradable from: old]` line.
///
/// The `[upgradable from: ...]` annotation is optional; without it the
/// old version stays empty. apt's listing carries no summary text.
fn parse_line(line: &str) -> Result<PendingUpdate> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(malformed_line(line));
    }

    let (name, _source) = fields[0].split_once('/').ok_or_else(|| malformed_line(line))?;
    if name.is_empty() {
        return Err(malformed_line(line));
    }

    let old_version = match fields.iter().position(|f| *f == "from:") {
        Some(idx) => fields
            .get(idx + 1)
            .map(|f| f.trim_end_matches(']').to_string())
            .unwrap_or_default(),
        None => String::new(),
    };

    Ok(PendingUpdate {
        kind: APT_UPDATE_KIND.to_string(),
        name: name.to_string(),
        version: fields[1].to_string(),
        arch: fields[2].to_string(),
        old_version,
        summary: String::new(),
    })
}

fn malformed_line(line: &str) -> Error {
    Error::Collection(format!("unrecognized apt list line: {:?}", line))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "Listing...\n\
        bash/stable 5.1-2+deb11u1 amd64 [upgradable from: 5.1-2]\n\
        openssl/stable-security 1.1.1d-0+deb10u6 amd64 [upgradable from: 1.1.1d-0+deb10u1]\n";

    #[test]
    fn test_parse_listing_fields() {
        let updates = parse_list_output(LISTING).unwrap();
        assert_eq!(updates.len(), 2);

        assert_eq!(updates[0].kind, "package");
        assert_eq!(updates[0].name, "bash");
        assert_eq!(updates[0].version, "5.1-2+deb11u1");
        assert_eq!(updates[0].arch, "amd64");
        assert_eq!(updates[0].old_version, "5.1-2");
        assert_eq!(updates[0].summary, "");

        assert_eq!(updates[1].name, "openssl");
        assert_eq!(updates[1].version, "1.1.1d-0+deb10u6");
        assert_eq!(updates[1].old_version, "1.1.1d-0+deb10u1");
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let output = "Listing...\n\nbash/stable 5.1-2 amd64 [upgradable from: 5.1-1]\n\n";
        let updates = parse_list_output(output).unwrap();

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].name, "bash");
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_list_output("").unwrap().is_empty());
        assert!(parse_list_output("Listing...\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_line_without_annotation() {
        let output = "Listing...\nhello/jammy 2.10-2ubuntu4 amd64\n";
        let updates = parse_list_output(output).unwrap();

        assert_eq!(updates[0].name, "hello");
        assert_eq!(updates[0].version, "2.10-2ubuntu4");
        assert_eq!(updates[0].old_version, "");
    }

    #[test]
    fn test_parse_rejects_line_without_source_separator() {
        let output = "Listing...\nbash 5.1-2 amd64 [upgradable from: 5.1-1]\n";
        let result = parse_list_output(output);

        assert!(matches!(result, Err(Error::Collection(_))));
    }

    #[test]
    fn test_parse_rejects_short_line() {
        let output = "Listing...\nwarning: something unexpected\n";
        let result = parse_list_output(output);

        assert!(matches!(result, Err(Error::Collection(_))));
    }

    #[test]
    fn test_parse_banner_only_skipped_on_first_line() {
        // A package named "Listing" past line one must not be dropped
        let output = "Listing...\nListing/stable 1.0 amd64 [upgradable from: 0.9]\n";
        let updates = parse_list_output(output).unwrap();

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].name, "Listing");
    }

    #[test]
    fn test_list_pending_missing_binary_is_collection_error() {
        let backend =
            AptBackend::with_program("/nonexistent/apt-test-binary", Duration::from_secs(5));
        let result = backend.list_pending();

        assert!(matches!(result, Err(Error::Collection(_))));
    }
}
