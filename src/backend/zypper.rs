// src/backend/zypper.rs

//! SUSE update backend
//!
//! Runs zypper's upgrade listing in XML mode and parses the resulting
//! `<update-list>` into pending update records.

use super::{PendingUpdate, UpdateBackend};
use crate::error::{Error, Result};
use crate::process;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::time::Duration;
use tracing::debug;

const ZYPPER_PROGRAM: &str = "zypper";

/// XML output, no ANSI color, no repository refresh before listing
const ZYPPER_ARGS: &[&str] = &["--no-color", "--no-refresh", "-x", "lu"];

/// Backend for zypper-managed (SUSE family) hosts
pub struct ZypperBackend {
    program: String,
    timeout: Duration,
}

impl ZypperBackend {
    pub fn new(timeout: Duration) -> Self {
        Self {
            program: ZYPPER_PROGRAM.to_string(),
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

impl UpdateBackend for ZypperBackend {
    fn name(&self) -> &'static str {
        "zypper"
    }

    fn list_pending(&self) -> Result<Vec<PendingUpdate>> {
        let stdout = process::run_command(&self.program, ZYPPER_ARGS, &[], self.timeout)
            .map_err(|e| Error::Collection(e.to_string()))?;

        let updates = parse_update_list(&stdout)?;
        debug!("zypper reported {} pending update(s)", updates.len());
        Ok(updates)
    }
}

/// Parse the XML document `zypper -x lu` writes to stdout.
///
/// The relevant shape is `<update-status><update-list>` holding one
/// `<update>` element per pending upgrade, with the package fields as
/// attributes and a `<summary>` child. zypper wraps the document in a
/// `<stream>` element and interleaves `<message>` siblings; those are
/// skipped. Malformed or truncated XML fails the whole parse.
pub fn parse_update_list(xml: &str) -> Result<Vec<PendingUpdate>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut updates = Vec::new();
    let mut buf = Vec::new();

    let mut current_update: Option<PendingUpdate> = None;
    let mut in_summary = false;
    let mut depth: i32 = 0;
    let mut saw_element = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                depth += 1;
                saw_element = true;
                match e.name().as_ref() {
                    b"update" => current_update = Some(update_from_attributes(&e)),
                    b"summary" if current_update.is_some() => in_summary = true,
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                saw_element = true;
                if e.name().as_ref() == b"update" {
                    updates.push(update_from_attributes(&e));
                }
            }
            Ok(Event::Text(e)) => {
                if in_summary {
                    if let Some(ref mut update) = current_update {
                        update.summary = e.unescape().unwrap_or_default().to_string();
                    }
                }
            }
            Ok(Event::End(e)) => {
                depth -= 1;
                match e.name().as_ref() {
                    b"update" => {
                        if let Some(update) = current_update.take() {
                            updates.push(update);
                        }
                    }
                    b"summary" => in_summary = false,
                    _ => {}
                }
            }
            Ok(Event::Eof) => {
                // The reader reports plain Eof for input cut off
                // mid-document instead of an error. Elements still open
                // at that point, or input with no elements at all, mean
                // the document never completed.
                if depth != 0 || !saw_element {
                    return Err(Error::Collection(
                        "unexpected end of zypper XML output".to_string(),
                    ));
                }
                break;
            }
            Err(e) => {
                return Err(Error::Collection(format!(
                    "failed to parse zypper update list: {}",
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(updates)
}

/// Map one `<update>` element's attributes onto a record.
///
/// zypper names the new version `edition` and the installed one
/// `edition-old`. Absent attributes stay empty strings.
fn update_from_attributes(element: &BytesStart<'_>) -> PendingUpdate {
    let mut update = PendingUpdate::default();

    for attr in element.attributes().filter_map(|a| a.ok()) {
        let value = String::from_utf8_lossy(&attr.value).to_string();
        match attr.key.as_ref() {
            b"kind" => update.kind = value,
            b"name" => update.name = value,
            b"edition" => update.version = value,
            b"arch" => update.arch = value,
            b"edition-old" => update.old_version = value,
            _ => {}
        }
    }

    update
}
