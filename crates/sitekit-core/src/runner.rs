//! Compose binary detection and external process invocation.
//!
//! Bootstrap steps shell out to git, the Compose stack, Drush (inside the
//! php service) and make. The runner surfaces each exit status to the
//! caller and logs it at debug level; apart from the proxy-port query,
//! callers treat the invocations as fire-and-forget.
//!
//! # Compose priority
//! 1. docker-compose (standalone binary)
//! 2. docker compose (CLI plugin fallback)

use std::path::Path;
use std::process::Command;
use std::time::Duration;
use tracing::debug;

/// The available Compose entry points, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeBin {
    Standalone,
    Plugin,
}

impl ComposeBin {
    pub fn name(&self) -> &'static str {
        match self {
            ComposeBin::Standalone => "docker-compose",
            ComposeBin::Plugin => "docker compose",
        }
    }

    /// Program and leading arguments for an invocation of this entry point.
    pub fn command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            ComposeBin::Standalone => ("docker-compose", &[]),
            ComposeBin::Plugin => ("docker", &["compose"]),
        }
    }
}

/// Detect the best available Compose entry point.
/// Returns None if neither is on PATH.
pub fn detect_compose() -> Option<ComposeBin> {
    if which::which("docker-compose").is_ok() {
        return Some(ComposeBin::Standalone);
    }
    if which::which("docker").is_ok() {
        return Some(ComposeBin::Plugin);
    }
    None
}

/// External command invocation as the bootstrap assistant sees it: run to
/// completion, report success, optionally capture stdout. A test double
/// stands in for the whole toolchain.
pub trait CommandRunner {
    /// Run a command in `dir`, waiting for it to exit. Returns whether the
    /// command ran and exited successfully.
    fn run(&mut self, dir: &Path, program: &str, args: &[&str]) -> bool;

    /// Run a command in `dir` and capture stdout. `None` when the command
    /// cannot be spawned or exits non-zero.
    fn capture(&mut self, dir: &Path, program: &str, args: &[&str]) -> Option<String>;

    /// Block for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Real subprocess runner. stdout/stderr flow through to the terminal so
/// the operator sees tool output as it happens.
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&mut self, dir: &Path, program: &str, args: &[&str]) -> bool {
        debug!(program, ?args, "running external command");
        match Command::new(program).args(args).current_dir(dir).status() {
            Ok(status) => {
                if !status.success() {
                    debug!(program, %status, "external command exited non-zero");
                }
                status.success()
            }
            Err(e) => {
                debug!(program, error = %e, "external command could not be spawned");
                false
            }
        }
    }

    fn capture(&mut self, dir: &Path, program: &str, args: &[&str]) -> Option<String> {
        debug!(program, ?args, "capturing external command output");
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .ok()?;
        if !output.status.success() {
            debug!(program, status = %output.status, "external command exited non-zero");
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
