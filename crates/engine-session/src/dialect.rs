//! Engine command vocabulary.
//!
//! The protocol's command words and terminator patterns are configuration,
//! not fixed literals, so an engine with a different line vocabulary can be
//! driven by substituting templates. The defaults speak standard UCI.

use serde::{Deserialize, Serialize};

use crate::session::Terminator;

/// Command templates and terminator patterns for one engine family.
///
/// Loadable from a configuration file; every field has a UCI default, so a
/// partial override table is enough to adapt a single command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineDialect {
    /// Startup/sync handshake command.
    #[serde(default = "default_hello")]
    pub hello: String,
    /// Exact line acknowledging the handshake.
    #[serde(default = "default_hello_ack")]
    pub hello_ack: String,
    /// Prefix of the position-set command; the board description follows.
    #[serde(default = "default_position")]
    pub position: String,
    /// Keyword introducing the move-list suffix of a position command.
    #[serde(default = "default_moves_keyword")]
    pub moves_keyword: String,
    /// Prefix of the analysis command; the search depth follows.
    #[serde(default = "default_analyze")]
    pub analyze: String,
    /// Prefix of the line that terminates an analysis response.
    #[serde(default = "default_bestmove")]
    pub bestmove: String,
    /// Command requesting engine exit.
    #[serde(default = "default_quit")]
    pub quit: String,
}

fn default_hello() -> String {
    "isready".to_string()
}

fn default_hello_ack() -> String {
    "readyok".to_string()
}

fn default_position() -> String {
    "position fen".to_string()
}

fn default_moves_keyword() -> String {
    "moves".to_string()
}

fn default_analyze() -> String {
    "go depth".to_string()
}

fn default_bestmove() -> String {
    "bestmove".to_string()
}

fn default_quit() -> String {
    "quit".to_string()
}

impl Default for EngineDialect {
    fn default() -> Self {
        Self {
            hello: default_hello(),
            hello_ack: default_hello_ack(),
            position: default_position(),
            moves_keyword: default_moves_keyword(),
            analyze: default_analyze(),
            bestmove: default_bestmove(),
            quit: default_quit(),
        }
    }
}

impl EngineDialect {
    /// Formats a position-set command for a board description plus moves.
    pub fn position_command(&self, fen: &str, moves: &[&str]) -> String {
        if moves.is_empty() {
            format!("{} {}", self.position, fen)
        } else {
            format!(
                "{} {} {} {}",
                self.position,
                fen,
                self.moves_keyword,
                moves.join(" ")
            )
        }
    }

    /// Formats an analysis command at the given search depth.
    pub fn analyze_command(&self, depth: u32) -> String {
        format!("{} {}", self.analyze, depth)
    }

    /// Terminator acknowledging the startup handshake.
    pub fn hello_terminator(&self) -> Terminator {
        Terminator::Exact(self.hello_ack.clone())
    }

    /// Terminator ending an analysis response.
    pub fn analysis_terminator(&self) -> Terminator {
        Terminator::Prefix(self.bestmove.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dialect_speaks_uci() {
        let dialect = EngineDialect::default();
        assert_eq!(dialect.hello, "isready");
        assert_eq!(dialect.hello_ack, "readyok");
        assert_eq!(dialect.analyze_command(15), "go depth 15");
        assert_eq!(dialect.quit, "quit");
    }

    #[test]
    fn test_position_command_without_moves() {
        let dialect = EngineDialect::default();
        assert_eq!(
            dialect.position_command("8/8/8/8/8/8/8/8 w - - 0 1", &[]),
            "position fen 8/8/8/8/8/8/8/8 w - - 0 1"
        );
    }

    #[test]
    fn test_position_command_with_moves() {
        let dialect = EngineDialect::default();
        assert_eq!(
            dialect.position_command("8/8/8/8/8/8/8/8 w - - 0 1", &["e2e4", "e7e5"]),
            "position fen 8/8/8/8/8/8/8/8 w - - 0 1 moves e2e4 e7e5"
        );
    }

    #[test]
    fn test_terminators_use_configured_patterns() {
        let dialect = EngineDialect::default();
        assert!(dialect.hello_terminator().matches("readyok"));
        assert!(!dialect.hello_terminator().matches("readyok now"));
        assert!(dialect
            .analysis_terminator()
            .matches("bestmove e2e4 ponder e7e5"));
    }

    #[test]
    fn test_partial_override_keeps_remaining_defaults() {
        let dialect: EngineDialect =
            serde_json::from_str(r#"{"hello": "usi", "hello_ack": "usiok"}"#).unwrap();
        assert_eq!(dialect.hello, "usi");
        assert_eq!(dialect.hello_ack, "usiok");
        assert_eq!(dialect.position, "position fen");
        assert_eq!(dialect.bestmove, "bestmove");
    }

    #[test]
    fn test_empty_override_equals_default() {
        let dialect: EngineDialect = serde_json::from_str("{}").unwrap();
        assert_eq!(dialect, EngineDialect::default());
    }
}
