//! Child-process transport for line-oriented engine protocols.
//!
//! The transport owns the engine subprocess and its pipes. It knows nothing
//! about the protocol spoken over them: it writes single lines and hands
//! back single lines, with end-of-stream and timeout reported as values
//! rather than errors.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::error::SessionError;

/// Outcome of a single line read.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadLine {
    /// A complete line, trimmed of surrounding whitespace.
    Line(String),
    /// The engine closed its output streams (typically: the process exited).
    Eof,
    /// No line arrived within the requested timeout.
    TimedOut,
}

/// Owns the engine subprocess and its byte streams.
///
/// stdout and stderr are merged: lines from either stream arrive through
/// [`read_line`](Transport::read_line) in arrival order. Two reader threads
/// forward lines over a channel, which is what makes a bounded-time read
/// possible on top of blocking pipes.
pub struct Transport {
    child: Child,
    stdin: ChildStdin,
    lines: Receiver<io::Result<String>>,
    closed: bool,
}

impl Transport {
    /// Spawns the engine from a whitespace-separated command string
    /// (program followed by arguments).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Launch`] if the command is empty or the
    /// executable is missing or not runnable.
    pub fn spawn(command: &str) -> Result<Self, SessionError> {
        let launch_error = |source: io::Error| SessionError::Launch {
            command: command.to_string(),
            source,
        };

        let mut words = command.split_whitespace();
        let program = words.next().ok_or_else(|| {
            launch_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty engine command",
            ))
        })?;

        tracing::debug!(command, "spawning engine");
        let mut child = Command::new(program)
            .args(words)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(launch_error)?;

        let stdin = child.stdin.take().ok_or_else(|| {
            launch_error(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "child stdin unavailable",
            ))
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            launch_error(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "child stdout unavailable",
            ))
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            launch_error(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "child stderr unavailable",
            ))
        })?;

        let (tx, lines) = mpsc::channel();
        let stderr_tx = tx.clone();
        thread::spawn(move || forward_lines(stdout, tx));
        thread::spawn(move || forward_lines(stderr, stderr_tx));

        Ok(Self {
            child,
            stdin,
            lines,
            closed: false,
        })
    }

    /// Writes one command line, newline-terminated, and flushes.
    ///
    /// Fails if the pipe is closed or the process has exited.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.stdin, "{}", line)?;
        self.stdin.flush()
    }

    /// Reads the next line from the merged output streams.
    ///
    /// Blocks until a line is available, the streams close, or `timeout`
    /// (when given) expires. End-of-stream is a value, not an error, so
    /// callers can distinguish a peer that exited from an I/O fault.
    pub fn read_line(&mut self, timeout: Option<Duration>) -> io::Result<ReadLine> {
        let received = match timeout {
            Some(limit) => match self.lines.recv_timeout(limit) {
                Ok(item) => item,
                Err(RecvTimeoutError::Timeout) => return Ok(ReadLine::TimedOut),
                Err(RecvTimeoutError::Disconnected) => return Ok(ReadLine::Eof),
            },
            None => match self.lines.recv() {
                Ok(item) => item,
                Err(_) => return Ok(ReadLine::Eof),
            },
        };
        received.map(ReadLine::Line)
    }

    /// Terminates the child if it has not already exited, then reaps it.
    ///
    /// The child is given a short grace period to exit on its own (it may
    /// just have been sent a quit command) before being killed. Idempotent:
    /// the termination signal is sent at most once.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        for _ in 0..10 {
            match self.child.try_wait() {
                Ok(Some(_)) => return,
                Ok(None) => thread::sleep(Duration::from_millis(10)),
                Err(_) => break,
            }
        }
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.close();
    }
}

/// Forwards lines from one child stream into the shared channel.
///
/// Ends at end-of-stream or on the first read error; the channel reports
/// end-of-stream to the receiver once both forwarders have ended.
fn forward_lines<R: Read>(stream: R, tx: Sender<io::Result<String>>) {
    let mut reader = BufReader::new(stream);
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                if tx.send(Ok(line.trim().to_string())).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = tx.send(Err(e));
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_nonexistent_executable_returns_launch_error() {
        let result = Transport::spawn("/nonexistent/path/to/engine");
        match result {
            Err(SessionError::Launch { command, .. }) => {
                assert_eq!(command, "/nonexistent/path/to/engine");
            }
            _ => panic!("Expected Launch error"),
        }
    }

    #[test]
    fn test_spawn_empty_command_returns_launch_error() {
        let result = Transport::spawn("   ");
        match result {
            Err(SessionError::Launch { source, .. }) => {
                assert_eq!(source.kind(), io::ErrorKind::InvalidInput);
            }
            _ => panic!("Expected Launch error"),
        }
    }

    #[test]
    fn test_read_line_outcome_equality() {
        assert_eq!(
            ReadLine::Line("readyok".to_string()),
            ReadLine::Line("readyok".to_string())
        );
        assert_ne!(ReadLine::Eof, ReadLine::TimedOut);
    }
}
