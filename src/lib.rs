// src/lib.rs

//! Host update reporter
//!
//! Collects a host's pending package updates through its native
//! package manager and emits one normalized JSON report on stdout.
//!
//! # Architecture
//!
//! - Release descriptor first: the OS id in `/etc/os-release` decides
//!   which package manager family serves the host
//! - One backend per family: zypper (SUSE), apt (Debian), each mapped
//!   onto the shared `PendingUpdate` record
//! - Single pass: read, classify, collect, build, emit. Any step's
//!   failure aborts the run with no partial report
//! - stdout carries only the report; diagnostics go to stderr

pub mod backend;
mod error;
pub mod family;
pub mod host;
pub mod pipeline;
pub mod process;
pub mod release;
pub mod report;

pub use error::{Error, Result};
