//! Captured subprocess execution
//!
//! Every external command pyskel runs gets a null stdin and captured
//! stdout/stderr. Probing an interpreter is bounded by a timeout; the
//! post-render tools (git, venv) are trusted and waited on without one.

use anyhow::{Context, Result};
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Result of a finished command
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Trimmed stdout, falling back to stderr when stdout is empty.
    ///
    /// Old interpreters print `--version` on stderr.
    pub fn first_nonempty_stream(&self) -> &str {
        let stdout = self.stdout.trim();
        if stdout.is_empty() {
            self.stderr.trim()
        } else {
            stdout
        }
    }
}

/// Run to completion with captured output
pub fn output(cmd: &mut Command) -> Result<ProcessOutput> {
    tracing::debug!(command = ?cmd, "running");
    let output = cmd
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to run {:?}", cmd.get_program()))?;

    let result = ProcessOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    tracing::debug!(status = %result.status, "finished");
    Ok(result)
}

/// Run with a deadline. Returns `Ok(None)` if the child had to be killed.
pub fn output_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<Option<ProcessOutput>> {
    tracing::debug!(command = ?cmd, ?timeout, "running with timeout");
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to run {:?}", cmd.get_program()))?;

    // Drain pipes on their own threads so a chatty child cannot block on a full pipe
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());
    let deadline = Instant::now() + timeout;

    let Some(status) = wait_until(&mut child, deadline)? else {
        let _ = child.kill();
        let _ = child.wait();
        tracing::debug!(command = ?cmd, "timed out, killed");
        return Ok(None);
    };

    // A grandchild that inherited the pipes can hold them open after the
    // child exits; the deadline covers the streams too
    let (Some(stdout), Some(stderr)) = (collect(&stdout, deadline), collect(&stderr, deadline))
    else {
        tracing::debug!(command = ?cmd, "output still open at deadline");
        return Ok(None);
    };

    Ok(Some(ProcessOutput {
        status,
        stdout,
        stderr,
    }))
}

fn wait_until(child: &mut Child, deadline: Instant) -> Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait().context("Failed to poll child process")? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// Stream contents, or `None` if the pipe is still open at `deadline`
fn collect(rx: &mpsc::Receiver<String>, deadline: Instant) -> Option<String> {
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(text) => Some(text),
        Err(mpsc::RecvTimeoutError::Timeout) => None,
        Err(mpsc::RecvTimeoutError::Disconnected) => Some(String::new()),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_output_captures_both_streams() -> Result<()> {
        let out = output(Command::new("sh").args(["-c", "echo out; echo err >&2"]))?;
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "out");
        assert_eq!(out.stderr.trim(), "err");
        Ok(())
    }

    #[test]
    fn test_stderr_fallback() -> Result<()> {
        let out = output(Command::new("sh").args(["-c", "echo 'Python 2.7.18' >&2"]))?;
        assert_eq!(out.first_nonempty_stream(), "Python 2.7.18");
        Ok(())
    }

    #[test]
    fn test_timeout_kills_child() -> Result<()> {
        let started = Instant::now();
        let out = output_with_timeout(
            Command::new("sh").args(["-c", "sleep 5"]),
            Duration::from_millis(100),
        )?;
        assert!(out.is_none());
        assert!(started.elapsed() < Duration::from_secs(4));
        Ok(())
    }

    #[test]
    fn test_timeout_not_hit() -> Result<()> {
        let out = output_with_timeout(
            Command::new("sh").args(["-c", "echo fast; exit 3"]),
            Duration::from_secs(5),
        )?
        .expect("command finishes well before the deadline");
        assert!(!out.success());
        assert_eq!(out.stdout.trim(), "fast");
        Ok(())
    }

    #[test]
    fn test_background_grandchild_counts_as_timeout() -> Result<()> {
        let started = Instant::now();
        let out = output_with_timeout(
            Command::new("sh").args(["-c", "echo 'Python 3.9'; sleep 6 &"]),
            Duration::from_millis(200),
        )?;
        assert!(out.is_none());
        assert!(started.elapsed() < Duration::from_secs(2));
        Ok(())
    }

    #[test]
    fn test_missing_program_is_error() {
        assert!(output(&mut Command::new("/definitely/not/here")).is_err());
    }
}
