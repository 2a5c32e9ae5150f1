//! Game review against an external analysis engine.
//!
//! This crate extracts coordinate-notation move tokens from a game record,
//! replays them against a UCI-style engine session and grades each move
//! from the score in the engine's response.
//!
//! # Overview
//!
//! - [`pgn::extract_moves`] - move-token extraction from raw movetext
//! - [`GameReviewer`] - the replay/evaluation pipeline
//! - [`MoveQuality`] - score-based quality labels
//!
//! # Example
//!
//! ```ignore
//! use game_review::{GameReviewer, ReviewConfig};
//! use engine_session::EngineDialect;
//!
//! let config = ReviewConfig::default();
//! let mut reviewer = GameReviewer::launch("stockfish", EngineDialect::default(), config)?;
//! for eval in reviewer.review("1. e2e4 e7e5 2. g1f3 b8c6 1-0")? {
//!     println!("{}: {}", eval.played, eval.quality);
//! }
//! ```

pub mod pgn;
pub mod quality;
pub mod review;

pub use quality::MoveQuality;
pub use review::{GameReviewer, MoveEvaluation, ReviewConfig, STARTPOS_FEN};
