pub mod attacks;
pub mod board;
pub mod error;
pub mod eval;
pub mod movegen;
pub mod moves;
pub mod row;
pub mod search;
pub mod utils;

pub use board::{Color, DrawReason, GameStatus, Piece, PieceKind, Position, START_FEN};
pub use error::{FenError, MoveParseError};
pub use eval::{Evaluator, MaterialEvaluator};
pub use movegen::{perft, perft_divide};
pub use moves::{CastleSide, Move, MoveKind};
pub use search::{Search, SearchOutcome, SearchParams};
