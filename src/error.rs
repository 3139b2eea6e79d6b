use thiserror::Error;

/// Failures reported by the rules engine.
///
/// A failed operation never changes the game, so every variant is
/// recoverable by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// The move text does not follow standard algebraic notation.
    #[error("cannot read move `{0}`")]
    Parse(String),

    /// The move text is well formed but no chessman can make that move.
    #[error("no legal move matches `{0}`")]
    NoLegalMove(String),

    /// The move text fits more than one chessman.
    #[error("move `{0}` is ambiguous")]
    AmbiguousMove(String),

    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },

    /// The replay log is not well-formed TOML of the expected shape.
    #[error("unreadable replay log: {0}")]
    ReplayLog(String),

    /// Replaying a log arrived at a different position than recorded.
    #[error("replay diverged at ply {ply}: expected `{expected}`, found `{found}`")]
    ReplayMismatch {
        ply: usize,
        expected: String,
        found: String,
    },
}
