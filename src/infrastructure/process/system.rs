//! System Process Runner
//!
//! Launches real subprocesses with `std::process::Command`.
//! Timeouts poll `try_wait` and kill the child once the deadline passes.
//! On Unix a child with a timeout gets its own process group, so the kill
//! also reaches anything it spawned (`sh -c` wrappers, compiler drivers).

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::domain::ports::{
    ProcessError, ProcessOutput, ProcessRequest, ProcessRunner, StdoutTarget,
};
use crate::domain::value_objects::ToolCommand;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How long to wait for pipe readers after a timeout kill
const DRAIN_GRACE: Duration = Duration::from_millis(200);

/// Process runner backed by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Check if a program can be launched (`<program> --version` succeeds)
    pub fn check_available(program: &str) -> bool {
        Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

fn spawn_error(program: &str, err: std::io::Error) -> ProcessError {
    if err.kind() == std::io::ErrorKind::NotFound {
        ProcessError::NotFound {
            program: program.to_string(),
        }
    } else {
        ProcessError::Spawn {
            program: program.to_string(),
            source: err,
        }
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

/// Like [`collect`], but gives up once `deadline` passes.
///
/// A process that escaped the kill may still hold the pipe open; its reader
/// thread is then left behind instead of blocking the caller.
fn collect_until(handle: Option<JoinHandle<Vec<u8>>>, deadline: Instant) -> String {
    let Some(handle) = handle else {
        return String::new();
    };
    while !handle.is_finished() {
        if Instant::now() >= deadline {
            return String::new();
        }
        thread::sleep(POLL_INTERVAL);
    }
    collect(Some(handle))
}

/// Put the child in a fresh process group so a timeout can kill its descendants.
#[cfg(unix)]
fn isolate_process_group(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(not(unix))]
fn isolate_process_group(_cmd: &mut Command) {}

#[cfg(unix)]
fn kill_tree(child: &mut Child) -> std::io::Result<()> {
    let pgid = child.id() as libc::pid_t;
    // SAFETY: kill(2) with a negative pid signals the group created by
    // isolate_process_group; it touches no memory.
    if unsafe { libc::kill(-pgid, libc::SIGKILL) } == 0 {
        return Ok(());
    }
    child.kill()
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) -> std::io::Result<()> {
    child.kill()
}

/// Wait for the child, killing it if `timeout` elapses first.
///
/// Returns `None` when the child was killed.
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
            kill_tree(child)?;
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, request: ProcessRequest<'_>) -> Result<ProcessOutput, ProcessError> {
        let program = request.command.program();

        let mut cmd = Command::new(program);
        cmd.args(request.command.args())
            .current_dir(request.cwd)
            .stdin(Stdio::null())
            .stderr(Stdio::piped());
        if request.timeout.is_some() {
            isolate_process_group(&mut cmd);
        }

        let capture_stdout = match request.stdout {
            StdoutTarget::Capture => {
                cmd.stdout(Stdio::piped());
                true
            }
            StdoutTarget::File(file) => {
                cmd.stdout(Stdio::from(file));
                false
            }
        };

        let mut child = cmd.spawn().map_err(|e| spawn_error(program, e))?;

        // Drain both pipes concurrently so a chatty tool cannot fill a pipe
        // buffer and block while we wait on it.
        let stdout_reader = if capture_stdout {
            child.stdout.take().map(drain)
        } else {
            None
        };
        let stderr_reader = child.stderr.take().map(drain);

        let status =
            wait_with_deadline(&mut child, request.timeout).map_err(|e| ProcessError::Io {
                program: program.to_string(),
                source: e,
            })?;

        let (stdout, stderr) = if status.is_some() {
            (collect(stdout_reader), collect(stderr_reader))
        } else {
            let deadline = Instant::now() + DRAIN_GRACE;
            (
                collect_until(stdout_reader, deadline),
                collect_until(stderr_reader, deadline),
            )
        };

        Ok(match status {
            Some(status) => ProcessOutput {
                code: status.code(),
                success: status.success(),
                stdout,
                stderr,
                timed_out: false,
            },
            None => ProcessOutput {
                code: None,
                success: false,
                stdout,
                stderr,
                timed_out: true,
            },
        })
    }

    fn spawn_detached(&self, command: &ToolCommand, cwd: &Path) -> Result<(), ProcessError> {
        let program = command.program();
        Command::new(program)
            .args(command.args())
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_child| ())
            .map_err(|e| spawn_error(program, e))
    }
}
