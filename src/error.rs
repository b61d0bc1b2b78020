//! Error types for position and move parsing

use crate::board::Color;

/// Failure to parse a position string. Always fatal; nothing is partially applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("expected 4 to 6 fields, found {0}")]
    FieldCount(usize),

    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 8 files: {text:?}")]
    RankWidth { rank: usize, text: String },

    #[error("unknown piece letter {0:?}")]
    UnknownPiece(char),

    #[error("invalid side to move {0:?}")]
    InvalidSide(String),

    #[error("invalid castling letter {0:?}")]
    InvalidCastling(char),

    #[error("invalid en-passant square {0:?}")]
    InvalidEnPassant(String),

    #[error("invalid move counter {0:?}")]
    InvalidCounter(String),

    #[error("{color:?} has {count} kings, expected exactly one")]
    KingCount { color: Color, count: usize },
}

/// Failure to resolve long-algebraic move text against the legal moves.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    #[error("malformed move text {0:?}")]
    Malformed(String),

    #[error("{0} is not a legal move here")]
    Illegal(String),
}
