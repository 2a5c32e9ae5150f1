//! Synchronous request/response session over a [`Transport`].
//!
//! The protocol has no request identifiers: responses are matched to
//! commands purely by ordering, and a response is a variable-length run of
//! lines ended by a sentinel whose shape depends on the command. The
//! session therefore supports exactly one outstanding command at a time;
//! `send` takes `&mut self`, which makes the serialization
//! compiler-enforced, and callers that share a session across threads put
//! it behind a `Mutex`.

use std::time::Duration;

use serde::Serialize;

use crate::dialect::EngineDialect;
use crate::error::SessionError;
use crate::transport::{ReadLine, Transport};

/// Line predicate that ends collection of a response frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminator {
    /// The line must equal the given text exactly.
    Exact(String),
    /// The line must start with the given text.
    Prefix(String),
}

impl Terminator {
    /// Returns true if `line` ends collection.
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Terminator::Exact(text) => line == text,
            Terminator::Prefix(text) => line.starts_with(text.as_str()),
        }
    }
}

/// The ordered lines collected for one command's response.
///
/// Frames handed back by [`EngineSession::send`] always end with the line
/// that matched a terminator; a frame cut short by end-of-stream is never
/// returned, it surfaces as [`SessionError::StreamClosed`] instead.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponseFrame {
    /// Every line received for the command, in arrival order.
    pub lines: Vec<String>,
}

impl ResponseFrame {
    /// The line that ended collection.
    pub fn sentinel(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    /// All collected lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    /// Process spawned, startup handshake not yet performed.
    Unstarted,
    /// Handshake complete, commands accepted.
    Ready,
    /// Torn down; no further commands may be sent.
    Closed,
}

/// One conversation with an engine subprocess.
///
/// # Lifecycle
///
/// 1. Spawn the engine with [`EngineSession::spawn`]
/// 2. Complete the handshake with [`EngineSession::initialize`]
/// 3. Exchange commands with [`EngineSession::send`] / [`EngineSession::post`]
/// 4. Tear down with [`EngineSession::shutdown`] (or rely on [`Drop`])
///
/// Any end-of-stream, timeout or I/O failure mid-command closes the session
/// after terminating the engine process; subsequent commands fail with
/// [`SessionError::Closed`].
pub struct EngineSession {
    transport: Transport,
    dialect: EngineDialect,
    state: SessionState,
    read_timeout: Option<Duration>,
}

impl EngineSession {
    /// Spawns the engine process.
    ///
    /// The session accepts no commands until
    /// [`initialize`](Self::initialize) has completed the handshake.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Launch`] if the executable is missing or not
    /// runnable.
    pub fn spawn(command: &str, dialect: EngineDialect) -> Result<Self, SessionError> {
        let transport = Transport::spawn(command)?;
        Ok(Self {
            transport,
            dialect,
            state: SessionState::Unstarted,
            read_timeout: None,
        })
    }

    /// Fails reads that produce no line within `timeout`.
    ///
    /// Expiry is treated like end-of-stream: fatal for the session. With
    /// `None` (the default) a read blocks indefinitely.
    pub fn set_read_timeout(&mut self, timeout: Option<Duration>) {
        self.read_timeout = timeout;
    }

    /// The command vocabulary this session speaks.
    pub fn dialect(&self) -> &EngineDialect {
        &self.dialect
    }

    /// Returns true once the session has been shut down or has failed.
    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Performs the startup handshake: sends the dialect's hello command
    /// and waits for its acknowledgement line.
    ///
    /// Calling again after a successful handshake is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] on a closed session, or the fatal
    /// error that ended the handshake exchange.
    pub fn initialize(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Closed => return Err(SessionError::Closed),
            SessionState::Ready => return Ok(()),
            SessionState::Unstarted => {}
        }
        let hello = self.dialect.hello.clone();
        let terminator = self.dialect.hello_terminator();
        let frame = self.exchange(&hello, &[terminator])?;
        tracing::debug!(lines = frame.lines.len(), "engine handshake complete");
        self.state = SessionState::Ready;
        Ok(())
    }

    /// Sends a command and collects its response frame.
    ///
    /// Lines are appended to the frame until one satisfies any of
    /// `terminators`; that line is included and ends collection.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotReady`] / [`SessionError::Closed`] when the
    ///   session cannot accept commands.
    /// - [`SessionError::StreamClosed`] when the engine's output ends
    ///   before a terminator matches; a partial frame is never returned.
    /// - [`SessionError::Timeout`] when a configured read timeout expires.
    ///
    /// The fatal variants name the in-flight command and leave the session
    /// closed with the engine process terminated.
    pub fn send(
        &mut self,
        command: &str,
        terminators: &[Terminator],
    ) -> Result<ResponseFrame, SessionError> {
        self.check_ready()?;
        self.exchange(command, terminators)
    }

    /// Writes a command that produces no response (fire-and-forget).
    pub fn post(&mut self, command: &str) -> Result<(), SessionError> {
        self.check_ready()?;
        self.write(command)
    }

    /// Sends the dialect's quit command (ignoring its response) and tears
    /// down the transport.
    ///
    /// Idempotent: once the session is closed, later calls do nothing and
    /// no second termination signal is sent.
    pub fn shutdown(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.state = SessionState::Closed;
        let quit = self.dialect.quit.clone();
        tracing::debug!(command = quit.as_str(), "shutting session down");
        let _ = self.transport.write_line(&quit);
        self.transport.close();
    }

    fn check_ready(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Ready => Ok(()),
            SessionState::Unstarted => Err(SessionError::NotReady),
            SessionState::Closed => Err(SessionError::Closed),
        }
    }

    fn write(&mut self, command: &str) -> Result<(), SessionError> {
        tracing::debug!(command, "-> engine");
        if let Err(source) = self.transport.write_line(command) {
            self.abort();
            return Err(SessionError::Io(source));
        }
        Ok(())
    }

    /// One request/response exchange: write the command, then collect lines
    /// until a terminator matches. End-of-stream or timeout mid-frame tears
    /// the session down before the error is returned, so a misbehaving peer
    /// can never leave the caller blocked on a sentinel that will not come.
    fn exchange(
        &mut self,
        command: &str,
        terminators: &[Terminator],
    ) -> Result<ResponseFrame, SessionError> {
        self.write(command)?;
        let mut frame = ResponseFrame::default();
        loop {
            let outcome = match self.transport.read_line(self.read_timeout) {
                Ok(outcome) => outcome,
                Err(source) => {
                    self.abort();
                    return Err(SessionError::Io(source));
                }
            };
            match outcome {
                ReadLine::Line(line) => {
                    tracing::trace!(line = line.as_str(), "<- engine");
                    let matched = terminators.iter().any(|t| t.matches(&line));
                    frame.lines.push(line);
                    if matched {
                        return Ok(frame);
                    }
                }
                ReadLine::Eof => {
                    self.abort();
                    return Err(SessionError::StreamClosed {
                        command: command.to_string(),
                    });
                }
                ReadLine::TimedOut => {
                    let timeout_ms = self
                        .read_timeout
                        .map(|t| t.as_millis() as u64)
                        .unwrap_or_default();
                    self.abort();
                    return Err(SessionError::Timeout {
                        command: command.to_string(),
                        timeout_ms,
                    });
                }
            }
        }
    }

    /// Terminates the engine and marks the session closed. Used on every
    /// unrecoverable error so the process never outlives the session.
    fn abort(&mut self) {
        self.state = SessionState::Closed;
        self.transport.close();
    }
}

impl Drop for EngineSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_terminator_requires_full_match() {
        let terminator = Terminator::Exact("readyok".to_string());
        assert!(terminator.matches("readyok"));
        assert!(!terminator.matches("readyok "));
        assert!(!terminator.matches("notreadyok"));
    }

    #[test]
    fn test_prefix_terminator_matches_leading_text() {
        let terminator = Terminator::Prefix("bestmove".to_string());
        assert!(terminator.matches("bestmove e2e4"));
        assert!(terminator.matches("bestmove"));
        assert!(!terminator.matches("info bestmove e2e4"));
    }

    #[test]
    fn test_frame_sentinel_is_last_line() {
        let frame = ResponseFrame {
            lines: vec![
                "info depth 15".to_string(),
                "bestmove e2e4 score 120".to_string(),
            ],
        };
        assert_eq!(frame.sentinel(), Some("bestmove e2e4 score 120"));
    }

    #[test]
    fn test_empty_frame_has_no_sentinel() {
        let frame = ResponseFrame::default();
        assert_eq!(frame.sentinel(), None);
        assert_eq!(frame.text(), "");
    }

    #[test]
    fn test_frame_text_joins_lines() {
        let frame = ResponseFrame {
            lines: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(frame.text(), "a\nb");
    }

    #[test]
    fn test_frame_serializes_to_json() {
        let frame = ResponseFrame {
            lines: vec!["bestmove e2e4".to_string()],
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert_eq!(json, r#"{"lines":["bestmove e2e4"]}"#);
    }
}
