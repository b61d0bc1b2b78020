//! Search engine for the arrocco chess engine
//!
//! Depth-limited alpha-beta over a single in-place position, backed by a
//! transposition table keyed by the canonical position string.

pub mod params;
pub mod search;
pub mod stats;
pub mod tt;

pub use self::params::SearchParams;
pub use self::search::{Search, SearchOutcome};
pub use self::stats::SearchStats;
pub use self::tt::{NodeType, TTEntry, TranspositionTable};
