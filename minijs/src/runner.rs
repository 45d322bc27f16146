//! Runs source text under an external JavaScript engine.
//!
//! The source is piped to the engine's stdin. The child is polled against a
//! wall-clock deadline and killed when it overruns.

use log::{debug, warn};
use miette::Diagnostic;
use std::io::{self, Read, Write};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Executable to launch
    pub program: String,
    pub timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: "node".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// What the engine printed and how it exited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, absent when the process was ended by a signal
    pub code: Option<i32>,
    pub success: bool,
}

#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    #[error("'{program}' is not installed or not on PATH")]
    #[diagnostic(
        code(minijs::run::not_installed),
        help("install Node.js or point --engine at a JavaScript runtime")
    )]
    NotInstalled { program: String },

    #[error("'{program}' did not finish within {millis} ms and was stopped")]
    #[diagnostic(code(minijs::run::timeout), help("raise the limit with --timeout"))]
    Timeout { program: String, millis: u128 },

    #[error("failed to run '{program}': {source}")]
    #[diagnostic(code(minijs::run::io))]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

pub fn run(source: &str, config: &RunnerConfig) -> Result<RunOutput, RunnerError> {
    let io_error = |source: io::Error| RunnerError::Io {
        program: config.program.clone(),
        source,
    };

    debug!("spawning {}", config.program);
    let mut child = Command::new(&config.program)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => RunnerError::NotInstalled {
                program: config.program.clone(),
            },
            _ => io_error(err),
        })?;

    let stdout = child.stdout.take().map(spawn_reader);
    let stderr = child.stderr.take().map(spawn_reader);
    // A child that never drains stdin must not hold us past the deadline
    let stdin = child.stdin.take().map(|pipe| spawn_writer(pipe, source.to_string()));

    let status = match wait_with_deadline(&mut child, config.timeout).map_err(io_error)? {
        Some(status) => status,
        None => {
            warn!(
                "{} exceeded {} ms, killing it",
                config.program,
                config.timeout.as_millis()
            );
            let _ = child.kill();
            let _ = child.wait();
            // The writer may still be blocked on a pipe held open by a
            // grandchild, so it is left detached.
            drop(stdin);
            return Err(RunnerError::Timeout {
                program: config.program.clone(),
                millis: config.timeout.as_millis(),
            });
        }
    };

    if let Some(Ok(Err(err))) = stdin.map(JoinHandle::join) {
        if err.kind() != io::ErrorKind::BrokenPipe {
            return Err(io_error(err));
        }
    }

    Ok(RunOutput {
        stdout: collect(stdout),
        stderr: collect(stderr),
        code: status.code(),
        success: status.success(),
    })
}

/// `None` when the deadline passed first
fn wait_with_deadline(
    child: &mut Child,
    timeout: Duration,
) -> io::Result<Option<std::process::ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buffer = String::new();
        let _ = pipe.read_to_string(&mut buffer);
        buffer
    })
}

fn spawn_writer<W: Write + Send + 'static>(
    mut pipe: W,
    source: String,
) -> JoinHandle<io::Result<()>> {
    thread::spawn(move || pipe.write_all(source.as_bytes()))
}

fn collect(reader: Option<JoinHandle<String>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
