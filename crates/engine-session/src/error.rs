//! Error taxonomy for the session layer.

use std::io;
use thiserror::Error;

/// Errors surfaced when launching or talking to an engine.
///
/// Launch, I/O, stream-closed and timeout failures are fatal for the
/// session that raised them; the caller may construct a fresh session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The engine executable could not be started.
    #[error("failed to launch engine \"{command}\": {source}")]
    Launch {
        /// The command line that was being launched.
        command: String,
        /// The underlying OS error.
        source: io::Error,
    },
    /// A pipe read or write failed at the OS level.
    #[error("engine I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The engine closed its output stream before any expected terminator
    /// matched. The protocol has no recovery point mid-frame.
    #[error("engine stream closed while \"{command}\" was in flight")]
    StreamClosed {
        /// The command whose response was being collected.
        command: String,
    },
    /// No response line arrived within the configured read timeout.
    #[error("engine produced no line within {timeout_ms}ms while \"{command}\" was in flight")]
    Timeout {
        /// The command whose response was being collected.
        command: String,
        /// The configured timeout, in milliseconds.
        timeout_ms: u64,
    },
    /// A command was issued before the startup handshake completed.
    #[error("session handshake has not been performed")]
    NotReady,
    /// A command was issued after the session was closed.
    #[error("session is closed")]
    Closed,
}
