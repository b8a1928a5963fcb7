// src/process.rs

//! Blocking subprocess execution with captured output and a deadline
//!
//! Both update backends and the hostname lookup go through
//! [`run_command`]: spawn, drain stdout/stderr, wait for exit, kill the
//! child if it outlives its deadline. Package manager queries can hang
//! on repository metadata refresh, so every invocation is bounded.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Default bound on a package manager invocation, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// How often the parent polls the child for exit
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long readers may keep draining output after the child is gone
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Failures of a single command invocation
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to start {0}: {1}")]
    Spawn(String, std::io::Error),

    #[error("failed to wait for {0}: {1}")]
    Wait(String, std::io::Error),

    #[error("{0} failed ({1}): {2}")]
    Failed(String, ExitStatus, String),

    #[error("{0} timed out after {}s", .1.as_secs())]
    Timeout(String, Duration),

    #[error("{0} exited but its output pipe stayed open")]
    StuckPipe(String),
}

enum WaitOutcome {
    Exited(ExitStatus),
    TimedOut,
    WaitFailed(std::io::Error),
}

/// Run `program` with `args` and `envs` to completion, returning its
/// captured standard output.
///
/// stdin is closed and stdout/stderr are piped. The pipes are drained
/// on reader threads so a chatty child can never block on a full pipe
/// while the parent polls for exit. On deadline expiry the child is
/// killed and reaped. A reader still blocked after that gets a short
/// grace period and is then abandoned, since a process the child left
/// behind can hold the write end open indefinitely.
pub fn run_command(
    program: &str,
    args: &[&str],
    envs: &[(&str, &str)],
    timeout: Duration,
) -> Result<String, CommandError> {
    let cmdline = display_name(program, args);
    debug!("Running `{}` with {}s timeout", cmdline, timeout.as_secs());

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        command.env(key, value);
    }

    let mut child = command
        .spawn()
        .map_err(|e| CommandError::Spawn(cmdline.clone(), e))?;

    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();
    let deadline = Instant::now() + timeout;

    let stdout_reader = thread::spawn(move || drain(stdout_pipe));
    let stderr_reader = thread::spawn(move || drain(stderr_pipe));

    let outcome = wait_with_deadline(&mut child, deadline);

    let drain_deadline = Instant::now() + DRAIN_GRACE;
    let stdout = join_reader(stdout_reader, drain_deadline);
    let stderr = join_reader(stderr_reader, drain_deadline).unwrap_or_default();

    match outcome {
        WaitOutcome::Exited(status) if status.success() => {
            if !stderr.trim().is_empty() {
                debug!("`{}` stderr: {}", cmdline, stderr.trim());
            }
            // A truncated capture is not distinguishable from complete
            // output, so a reader that never reached end-of-file makes
            // the whole invocation an error.
            match stdout {
                Some(stdout) => Ok(stdout),
                None => Err(CommandError::StuckPipe(cmdline)),
            }
        }
        WaitOutcome::Exited(status) => {
            let detail = if stderr.trim().is_empty() {
                "no error output".to_string()
            } else {
                stderr.trim().to_string()
            };
            Err(CommandError::Failed(cmdline, status, detail))
        }
        WaitOutcome::TimedOut => Err(CommandError::Timeout(cmdline, timeout)),
        WaitOutcome::WaitFailed(e) => Err(CommandError::Wait(cmdline, e)),
    }
}

/// Poll the child for exit; kill and reap it once the deadline passes.
fn wait_with_deadline(child: &mut Child, deadline: Instant) -> WaitOutcome {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return WaitOutcome::Exited(status),
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return WaitOutcome::TimedOut;
                }
                thread::sleep(WAIT_POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return WaitOutcome::WaitFailed(e);
            }
        }
    }
}

/// Join a pipe reader, giving up once the deadline passes.
///
/// The child exiting normally closes its end of the pipe and the read
/// finishes at once. A leftover grandchild can inherit the write end
/// and keep the pipe open long after the child is reaped; the stuck
/// reader is then left detached and its capture is reported lost.
fn join_reader(reader: thread::JoinHandle<String>, deadline: Instant) -> Option<String> {
    while !reader.is_finished() {
        if Instant::now() >= deadline {
            return None;
        }
        thread::sleep(WAIT_POLL_INTERVAL);
    }
    Some(reader.join().unwrap_or_default())
}

fn drain<R: Read>(pipe: Option<R>) -> String {
    let mut bytes = Vec::new();
    if let Some(mut pipe) = pipe {
        if pipe.read_to_end(&mut bytes).is_err() {
            return String::new();
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn display_name(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}
