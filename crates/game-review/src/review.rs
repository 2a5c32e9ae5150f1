//! Game replay and per-move evaluation.
//!
//! The reviewer replays every extracted move against a fixed starting
//! position and asks the engine for a fixed-depth search after each one.
//! By default each move is evaluated in isolation: the position command
//! carries the starting position plus only the current move, not the game
//! prefix, so evaluations are disconnected from the actual game
//! continuation. The `cumulative` flag opts into replaying the full
//! prefix instead.

use engine_session::{EngineDialect, EngineSession, ResponseFrame, SessionError};
use serde::Serialize;

use crate::pgn;
use crate::quality::MoveQuality;

/// FEN of the standard starting position.
pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Configuration for a review run.
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    /// Search depth requested per move.
    pub depth: u32,
    /// Board description every replay starts from.
    pub starting_fen: String,
    /// Replay the full move prefix instead of each move in isolation.
    pub cumulative: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            depth: 15,
            starting_fen: STARTPOS_FEN.to_string(),
            cumulative: false,
        }
    }
}

/// Evaluation of one played move.
#[derive(Debug, Clone, Serialize)]
pub struct MoveEvaluation {
    /// The move token as it appeared in the record.
    pub played: String,
    /// The engine's full response to the analysis request.
    pub response: ResponseFrame,
    /// Raw score parsed from the response, if present and numeric.
    pub score: Option<i32>,
    /// Quality label; [`MoveQuality::Good`] when no score could be parsed.
    pub quality: MoveQuality,
}

/// Replays a game record against an engine session, move by move.
pub struct GameReviewer {
    session: EngineSession,
    config: ReviewConfig,
}

impl GameReviewer {
    /// Spawns and initializes an engine, then builds a reviewer on top.
    ///
    /// # Errors
    ///
    /// Returns the launch or handshake failure from the session layer.
    pub fn launch(
        engine_command: &str,
        dialect: EngineDialect,
        config: ReviewConfig,
    ) -> Result<Self, SessionError> {
        let mut session = EngineSession::spawn(engine_command, dialect)?;
        session.initialize()?;
        Ok(Self::new(session, config))
    }

    /// Builds a reviewer over an already-initialized session.
    pub fn new(session: EngineSession, config: ReviewConfig) -> Self {
        Self { session, config }
    }

    /// Evaluates every move token in `record`, in input order.
    ///
    /// For each move the reviewer posts a position command (no response
    /// expected), requests a fixed-depth search terminated by the
    /// dialect's bestmove line, and grades the score found on that line.
    /// A response whose score is absent or unparsable degrades that one
    /// move to [`MoveQuality::Good`] with no score recorded; it never
    /// aborts the batch.
    ///
    /// # Errors
    ///
    /// Session-level failures (stream closed, timeout, I/O) are fatal and
    /// abort the remaining moves; the error names the in-flight command.
    pub fn review(&mut self, record: &str) -> Result<Vec<MoveEvaluation>, SessionError> {
        let analyze = self.session.dialect().analyze_command(self.config.depth);
        let terminator = self.session.dialect().analysis_terminator();

        let mut evaluations = Vec::new();
        let mut prefix: Vec<&str> = Vec::new();
        for played in pgn::extract_moves(record) {
            let position = if self.config.cumulative {
                prefix.push(played);
                self.session
                    .dialect()
                    .position_command(&self.config.starting_fen, &prefix)
            } else {
                self.session
                    .dialect()
                    .position_command(&self.config.starting_fen, &[played])
            };
            self.session.post(&position)?;

            let response = self
                .session
                .send(&analyze, std::slice::from_ref(&terminator))?;
            let score = parse_score(&response);
            let quality = score.map_or(MoveQuality::Good, MoveQuality::from_score);
            tracing::debug!(played, score, %quality, "move evaluated");

            evaluations.push(MoveEvaluation {
                played: played.to_string(),
                response,
                score,
                quality,
            });
        }
        Ok(evaluations)
    }

    /// Shuts the underlying session down. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        self.session.shutdown();
    }
}

/// Scans the frame's terminal line for the literal `score` field and parses
/// the token that follows as a signed integer.
///
/// Tolerant by design: a missing field, a missing value or a non-numeric
/// value (such as the `cp`/`mate` qualifiers some engines emit) yields
/// `None` rather than an error, so one odd response line never halts a
/// batch.
fn parse_score(frame: &ResponseFrame) -> Option<i32> {
    let line = frame.sentinel()?;
    let mut tokens = line.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == "score" {
            return tokens.next()?.parse().ok();
        }
    }
    None
}
