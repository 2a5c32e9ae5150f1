//! Session layer for line-oriented, synchronous engine protocols.
//!
//! This crate manages an external move-evaluation engine (Stockfish or any
//! UCI-style program) as a subprocess and drives its request/response
//! protocol: one command line out, a multi-line response frame back, with
//! collection ended by per-command sentinel patterns (`readyok`,
//! `bestmove ...`).
//!
//! # Overview
//!
//! - [`Transport`] - subprocess ownership and raw line I/O
//! - [`EngineSession`] - framed request/response with lifecycle tracking
//! - [`EngineDialect`] - configurable command vocabulary
//! - [`Terminator`] / [`ResponseFrame`] - framing primitives
//!
//! # Example
//!
//! ```no_run
//! use engine_session::{EngineDialect, EngineSession, Terminator};
//!
//! let mut session = EngineSession::spawn("stockfish", EngineDialect::default())?;
//! session.initialize()?;
//! session.post("position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")?;
//! let frame = session.send("go depth 15", &[Terminator::Prefix("bestmove".into())])?;
//! println!("{}", frame.text());
//! session.shutdown();
//! # Ok::<(), engine_session::SessionError>(())
//! ```

pub mod dialect;
pub mod error;
pub mod session;
pub mod transport;

pub use dialect::EngineDialect;
pub use error::SessionError;
pub use session::{EngineSession, ResponseFrame, Terminator};
pub use transport::{ReadLine, Transport};
