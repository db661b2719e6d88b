//! Subprocess execution.
//!
//! Every external tool foodtruck touches (python, uv, git, docker) goes
//! through the [`CommandRunner`] trait so that probes and installers can be
//! driven by a scripted runner in tests.

use crate::error::{FoodtruckError, Result};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often a running child is polled while waiting for its deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty when not captured).
    pub stdout: String,

    /// Standard error (empty when not captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// stdout followed by stderr, trimmed.
    pub fn combined_output(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (false, false) => format!("{}\n{}", stdout, stderr),
            (false, true) => stdout.to_string(),
            (true, false) => stderr.to_string(),
            (true, true) => String::new(),
        }
    }

    /// Turn a failed run into [`FoodtruckError::CommandFailed`].
    pub fn into_checked(self, program: &str) -> Result<Self> {
        if self.success {
            return Ok(self);
        }
        Err(FoodtruckError::CommandFailed {
            program: program.to_string(),
            code: self.exit_code,
            reason: self.failure_reason(),
        })
    }

    /// A one-line explanation of why the command failed.
    ///
    /// Prefers the first non-empty stderr line, then stdout.
    pub fn failure_reason(&self) -> String {
        let code = match self.exit_code {
            Some(code) => format!("exited with code {}", code),
            None => "terminated by signal".to_string(),
        };
        let detail = first_line(&self.stderr).or_else(|| first_line(&self.stdout));
        match detail {
            Some(line) => format!("{}: {}", code, line),
            None => code,
        }
    }
}

fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|l| !l.is_empty())
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,

    /// Deadline after which the child is killed (None = wait forever).
    pub timeout: Option<Duration>,
}

impl CommandOptions {
    /// Capture both streams and kill the child after `timeout`.
    pub fn captured(timeout: Duration) -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
            timeout: Some(timeout),
            ..Default::default()
        }
    }

    /// Inherit the terminal; no deadline.
    pub fn inherited() -> Self {
        Self::default()
    }

    /// Run in the given working directory.
    pub fn in_dir(mut self, cwd: &Path) -> Self {
        self.cwd = Some(cwd.to_path_buf());
        self
    }
}

/// Runs external programs.
///
/// Implementations must not panic on missing executables: absence is
/// reported as [`FoodtruckError::ToolNotFound`] and an expired deadline as
/// [`FoodtruckError::ToolTimedOut`].
pub trait CommandRunner {
    /// Run `program` with `args`.
    fn run(&self, program: &str, args: &[String], options: &CommandOptions)
        -> Result<CommandResult>;
}

/// Render a program and its arguments for messages.
pub fn display_command(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// [`CommandRunner`] backed by real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a system runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult> {
        let start = Instant::now();
        tracing::debug!("Running: {}", display_command(program, args));

        let mut cmd = Command::new(program);
        cmd.args(args);

        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }

        for (key, value) in &options.env {
            cmd.env(key, value);
        }

        if options.capture_stdout || options.capture_stderr {
            cmd.stdin(Stdio::null());
        }

        cmd.stdout(if options.capture_stdout {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });
        cmd.stderr(if options.capture_stderr {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });

        let mut child = cmd.spawn().map_err(|e| spawn_error(program, args, e))?;

        // Drain pipes on their own threads so a chatty child can't block on a full pipe.
        let stdout_reader = child.stdout.take().map(spawn_reader);
        let stderr_reader = child.stderr.take().map(spawn_reader);

        let status = match wait_with_deadline(&mut child, options.timeout)? {
            Some(status) => status,
            None => {
                let timeout = options.timeout.unwrap_or_default();
                tracing::debug!(
                    "Killing '{}' after {}s",
                    display_command(program, args),
                    timeout.as_secs()
                );
                let _ = child.kill();
                let _ = child.wait();
                // Readers are left detached: grandchildren may still hold the pipes.
                return Err(FoodtruckError::ToolTimedOut {
                    tool: program.to_string(),
                    timeout,
                });
            }
        };

        let stdout = join_reader(stdout_reader);
        let stderr = join_reader(stderr_reader);
        let duration = start.elapsed();

        tracing::debug!(
            "'{}' exited with {:?} in {}ms",
            program,
            status.code(),
            duration.as_millis()
        );

        if status.success() {
            Ok(CommandResult::success(stdout, stderr, duration))
        } else {
            Ok(CommandResult::failure(status.code(), stdout, stderr, duration))
        }
    }
}

fn spawn_error(program: &str, args: &[String], err: std::io::Error) -> FoodtruckError {
    if err.kind() == std::io::ErrorKind::NotFound {
        FoodtruckError::ToolNotFound {
            tool: program.to_string(),
        }
    } else {
        tracing::debug!("Failed to spawn '{}': {}", program, err);
        FoodtruckError::Other(anyhow::anyhow!(
            "Failed to run '{}': {}",
            display_command(program, args),
            err
        ))
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle
        .map(|h| h.join().unwrap_or_default())
        .unwrap_or_default()
}

/// Wait for the child, returning `None` if the deadline passes first.
fn wait_with_deadline(
    child: &mut Child,
    timeout: Option<Duration>,
) -> std::io::Result<Option<ExitStatus>> {
    let Some(timeout) = timeout else {
        return child.wait().map(Some);
    };

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
