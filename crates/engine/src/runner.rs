use std::ffi::{OsStr, OsString};
use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, ChildStdout, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::exit::check_exit_status;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Spawn `argv` with stdin closed and stdout/stderr piped.
///
/// A program that is missing or not executable becomes
/// [`Error::ExecutableUnavailable`]; any other spawn failure is passed through.
pub fn launch(argv: &[OsString]) -> Result<Child> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command line"))?;

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    hide_console_window(&mut cmd);

    debug!("spawning {}", display_command(argv));

    cmd.spawn().map_err(|e| map_launch_error(program, e))
}

/// Launch `argv` and stream its stdout line by line.
pub fn execute(argv: &[OsString]) -> Result<OutputLines> {
    let mut child = launch(argv)?;
    let stdout = child.stdout.take().map(BufReader::new);

    Ok(OutputLines {
        program: argv[0].to_string_lossy().into_owned(),
        child: Some(child),
        stdout,
        buf: Vec::new(),
    })
}

/// Run `argv` to completion and throw its output away.
pub fn drain(argv: &[OsString]) -> Result<()> {
    for line in execute(argv)? {
        let line = line?;
        trace!("{line}");
    }
    Ok(())
}

/// Run `argv` with output discarded, killing it once `timeout` has passed.
///
/// Expiry is reported as an `io::ErrorKind::TimedOut` error. The child is
/// always reaped before returning.
pub fn run_with_timeout(argv: &[OsString], timeout: Duration) -> Result<ExitStatus> {
    let mut child = launch(argv)?;
    let started = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                discard_output(&mut child);
                return Ok(status);
            }
            Ok(None) => {}
            Err(e) => {
                kill_and_reap(&mut child);
                return Err(e.into());
            }
        }

        let elapsed = started.elapsed();
        if elapsed >= timeout {
            kill_and_reap(&mut child);
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!(
                    "{} did not finish within {}ms",
                    argv[0].to_string_lossy(),
                    timeout.as_millis()
                ),
            )
            .into());
        }

        thread::sleep(POLL_INTERVAL.min(timeout - elapsed));
    }
}

/// Lazy stdout lines of a running child.
///
/// After the last line the child is waited for and its exit status checked:
/// a failure is yielded as one final `Err` item. Dropping the iterator early
/// kills and reaps the child.
pub struct OutputLines {
    program: String,
    child: Option<Child>,
    stdout: Option<BufReader<ChildStdout>>,
    buf: Vec<u8>,
}

impl OutputLines {
    fn finish(&mut self) -> Result<()> {
        self.stdout = None;

        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        let mut stderr = Vec::new();
        if let Some(mut pipe) = child.stderr.take()
            && let Err(e) = pipe.read_to_end(&mut stderr)
        {
            debug!("failed to read stderr of {}: {e}", self.program);
        }
        let stderr = String::from_utf8_lossy(&stderr);

        let status = child.wait()?;
        debug!("{} finished with {status}", self.program);

        check_exit_status(status, stderr.trim().to_owned())
    }
}

impl Iterator for OutputLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let stdout = self.stdout.as_mut()?;

        self.buf.clear();
        match stdout.read_until(b'\n', &mut self.buf) {
            Ok(0) => self.finish().err().map(Err),
            Ok(_) => Some(Ok(decode_line(&self.buf))),
            Err(e) => {
                self.stdout = None;
                if let Some(mut child) = self.child.take() {
                    kill_and_reap(&mut child);
                }
                Some(Err(e.into()))
            }
        }
    }
}

impl Drop for OutputLines {
    fn drop(&mut self) {
        self.stdout = None;
        if let Some(mut child) = self.child.take() {
            debug!("{} abandoned before completion, killing it", self.program);
            kill_and_reap(&mut child);
        }
    }
}

fn decode_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_end_matches(['\n', '\r'])
        .to_owned()
}

fn map_launch_error(program: &OsStr, err: io::Error) -> Error {
    let program = program.to_string_lossy();
    match err.kind() {
        io::ErrorKind::NotFound => {
            Error::ExecutableUnavailable(format!("{program}: 7-zip not installed?"))
        }
        io::ErrorKind::PermissionDenied => {
            Error::ExecutableUnavailable(format!("{program}: cannot execute 7-zip"))
        }
        _ => Error::Io(err),
    }
}

// Close failures are not actionable once the child has exited.
fn discard_output(child: &mut Child) {
    let mut sink = Vec::new();
    if let Some(mut out) = child.stdout.take()
        && let Err(e) = out.read_to_end(&mut sink)
    {
        debug!("failed to drain stdout: {e}");
    }
    sink.clear();
    if let Some(mut err) = child.stderr.take()
        && let Err(e) = err.read_to_end(&mut sink)
    {
        debug!("failed to drain stderr: {e}");
    }
}

fn kill_and_reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!("kill failed: {e}");
    }
    if let Err(e) = child.wait() {
        debug!("wait failed: {e}");
    }
}

/// Render a command line for logs with the password switch masked.
pub(crate) fn display_command(argv: &[OsString]) -> String {
    argv.iter()
        .map(|arg| {
            let arg = arg.to_string_lossy();
            if arg.len() > 2 && arg.starts_with("-p") {
                "-p***".to_owned()
            } else {
                arg.into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(windows)]
fn hide_console_window(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;

    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console_window(_cmd: &mut Command) {}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
