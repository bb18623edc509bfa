use super::{validate_shell_command, ActionDescriptor, ActionKind};
use std::io::{BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const SHELL_TIMEOUT: Duration = Duration::from_secs(30);

/// External binaries the dispatcher shells out to. Overridable so tests can
/// substitute stubs.
#[derive(Debug, Clone)]
pub struct DispatchBinaries {
    pub opener: String,
    pub shortcuts: String,
    pub shell: String,
}

impl Default for DispatchBinaries {
    fn default() -> Self {
        Self {
            opener: default_opener().to_string(),
            shortcuts: "shortcuts".to_string(),
            shell: "sh".to_string(),
        }
    }
}

#[cfg(target_os = "macos")]
fn default_opener() -> &'static str {
    "open"
}

#[cfg(not(target_os = "macos"))]
fn default_opener() -> &'static str {
    "xdg-open"
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Fire-and-forget request handed to the OS (launch/open/shortcut).
    Requested,
    /// Shell command ran to completion; stdout captured for notifications.
    ShellCompleted { stdout: String },
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("invalid action descriptor: {0}")]
    InvalidDescriptor(String),
    #[error("dynamic actions resolve to submenus and cannot be dispatched")]
    NotDispatchable,
    #[error("application path does not exist: {path}")]
    AppNotFound { path: String },
    #[error("invalid url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsafe shell command: {0}")]
    UnsafeCommand(String),
    #[error("binary `{binary}` is not installed")]
    MissingBinary { binary: String },
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with status {exit_code}: {stderr}")]
    NonZeroExit {
        command: String,
        exit_code: i32,
        stderr: String,
    },
    #[error("`{command}` timed out after {timeout_ms}ms")]
    Timeout { command: String, timeout_ms: u64 },
    #[error("io failure while running `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve a leaf action descriptor into exactly one side-effecting
/// operation. `dynamic://` never reaches this point in normal navigation;
/// calling it directly is an error by contract.
pub fn run_action(raw: &str, binaries: &DispatchBinaries) -> Result<ActionOutcome, DispatchError> {
    let descriptor = ActionDescriptor::parse(raw).map_err(DispatchError::InvalidDescriptor)?;
    match descriptor.kind {
        ActionKind::Launch => run_launch(&descriptor.payload, binaries),
        ActionKind::Open => run_open(&descriptor.payload, binaries),
        ActionKind::Shortcut => run_shortcut(&descriptor.payload, binaries),
        ActionKind::Shell => run_shell(&descriptor.payload, binaries),
        ActionKind::Dynamic => Err(DispatchError::NotDispatchable),
    }
}

fn run_launch(payload: &str, binaries: &DispatchBinaries) -> Result<ActionOutcome, DispatchError> {
    let path_like = payload.starts_with('/') || payload.starts_with('~');
    if path_like && !Path::new(payload).exists() {
        return Err(DispatchError::AppNotFound {
            path: payload.to_string(),
        });
    }
    let mut command = Command::new(&binaries.opener);
    if cfg!(target_os = "macos") && !path_like {
        command.arg("-a");
    }
    spawn_detached(command.arg(payload), &binaries.opener)?;
    Ok(ActionOutcome::Requested)
}

fn run_open(payload: &str, binaries: &DispatchBinaries) -> Result<ActionOutcome, DispatchError> {
    url::Url::parse(payload).map_err(|source| DispatchError::InvalidUrl {
        url: payload.to_string(),
        source,
    })?;
    spawn_detached(
        Command::new(&binaries.opener).arg(payload),
        &binaries.opener,
    )?;
    Ok(ActionOutcome::Requested)
}

fn run_shortcut(payload: &str, binaries: &DispatchBinaries) -> Result<ActionOutcome, DispatchError> {
    spawn_detached(
        Command::new(&binaries.shortcuts).args(["run", payload]),
        &binaries.shortcuts,
    )?;
    Ok(ActionOutcome::Requested)
}

fn spawn_detached(command: &mut Command, binary: &str) -> Result<(), DispatchError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                DispatchError::MissingBinary {
                    binary: binary.to_string(),
                }
            } else {
                DispatchError::Spawn {
                    command: binary.to_string(),
                    source: err,
                }
            }
        })
}

fn run_shell(payload: &str, binaries: &DispatchBinaries) -> Result<ActionOutcome, DispatchError> {
    // Validated at config time too; the pre-execution check is deliberate.
    validate_shell_command(payload).map_err(DispatchError::UnsafeCommand)?;
    let output = run_shell_command(payload, binaries)?;
    Ok(ActionOutcome::ShellCompleted {
        stdout: output.stdout,
    })
}

pub(crate) struct ShellOutput {
    pub stdout: String,
    #[allow(dead_code)]
    pub stderr: String,
}

/// Run a command through the shell in a non-interactive subprocess with
/// captured output and a hard timeout.
pub(crate) fn run_shell_command(
    payload: &str,
    binaries: &DispatchBinaries,
) -> Result<ShellOutput, DispatchError> {
    let io_err = |source| DispatchError::Io {
        command: payload.to_string(),
        source,
    };

    let mut child = Command::new(&binaries.shell)
        .arg("-c")
        .arg(payload)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                DispatchError::MissingBinary {
                    binary: binaries.shell.clone(),
                }
            } else {
                DispatchError::Spawn {
                    command: payload.to_string(),
                    source: err,
                }
            }
        })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io_err(std::io::Error::other("missing stdout pipe")))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| io_err(std::io::Error::other("missing stderr pipe")))?;

    let stdout_reader = thread::spawn(move || {
        let mut buf = String::new();
        let _ = BufReader::new(stdout).read_to_string(&mut buf);
        buf
    });
    let stderr_reader = thread::spawn(move || {
        let mut buf = String::new();
        let _ = BufReader::new(stderr).read_to_string(&mut buf);
        buf
    });

    let start = Instant::now();
    let exit_status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > SHELL_TIMEOUT {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = stdout_reader.join();
                    let _ = stderr_reader.join();
                    return Err(DispatchError::Timeout {
                        command: payload.to_string(),
                        timeout_ms: SHELL_TIMEOUT.as_millis() as u64,
                    });
                }
                thread::sleep(Duration::from_millis(10));
            }
            Err(err) => return Err(io_err(err)),
        }
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();

    if !exit_status.success() {
        return Err(DispatchError::NonZeroExit {
            command: payload.to_string(),
            exit_code: exit_status.code().unwrap_or(-1),
            stderr,
        });
    }

    Ok(ShellOutput { stdout, stderr })
}
