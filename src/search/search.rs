//! Main search engine implementation for arrocco
//!
//! Depth-limited alpha-beta over one shared position mutated in place.
//! Scores are absolute (White-positive); a mated side to move scores
//! -inf for White and +inf for Black.

use std::cmp::Ordering;

use log::{debug, trace};

use super::params::SearchParams;
use super::stats::SearchStats;
use super::tt::{NodeType, TTEntry, TranspositionTable};
use crate::board::{Color, Position};
use crate::eval::Evaluator;
use crate::moves::{Move, MoveKind};

/// Result of one top-level search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub score: f64,
    /// Annotated best move; None when the root had no legal move or was a draw
    pub best_move: Option<Move>,
    pub depth: i32,
    pub stats: SearchStats,
}

/// Main search engine
#[derive(Debug, Default)]
pub struct Search {
    /// Transposition table for caching, kept across searches of the same game
    tt: TranspositionTable,

    /// Search statistics
    stats: SearchStats,
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Forget every stored position
    pub fn clear(&mut self) {
        self.tt.clear();
        self.stats.reset();
    }

    /// Alpha-beta value of `pos` searched `depth` plies deep.
    ///
    /// `maximizing` tells whether this node picks the largest child value;
    /// callers pass `true` exactly when White is to move. The position is
    /// restored before returning.
    pub fn alpha_beta<E: Evaluator + ?Sized>(
        &mut self,
        pos: &mut Position,
        depth: i32,
        evaluator: &E,
        maximizing: bool,
        mut alpha: f64,
        mut beta: f64,
    ) -> f64 {
        self.stats.inc_node();
        let key = pos.fen();

        let tt_move = match self.tt.probe(&key) {
            Some(entry) => {
                if entry.depth >= depth {
                    if let Some(score) = entry.cutoff(alpha, beta) {
                        self.stats.inc_tt_hit();
                        return score;
                    }
                }
                entry.best_move
            }
            None => None,
        };

        // Draw overrides the remaining depth
        if pos.is_draw() {
            self.stats.inc_terminal();
            return 0.0;
        }

        if depth <= 0 {
            self.stats.inc_leaf_eval();
            return evaluator.evaluate(&key);
        }

        let mut moves = pos.all_legal_moves();
        if moves.is_empty() {
            self.stats.inc_terminal();
            return if !pos.is_king_in_check(pos.side_to_move()) {
                0.0
            } else if pos.side_to_move() == Color::White {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
        }

        order_moves(&mut moves, tt_move);

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut best_value = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_move: Option<Move> = None;

        for &mv in &moves {
            let value = {
                let mut child = pos.play(mv);
                self.alpha_beta(&mut child, depth - 1, evaluator, !maximizing, alpha, beta)
            };

            if maximizing {
                if value > best_value {
                    best_value = value;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best_value);
            } else {
                if value < best_value {
                    best_value = value;
                    best_move = Some(mv);
                }
                beta = beta.min(best_value);
            }

            if beta <= alpha {
                self.stats.inc_cutoff();
                best_move.get_or_insert(mv);
                break;
            }
        }

        // Every move lost to mate: keep the first one so a best move exists
        let best_move = best_move.or_else(|| moves.first().copied());

        self.tt.store(
            key,
            TTEntry {
                score: best_value,
                depth,
                node_type: NodeType::classify(best_value, alpha_orig, beta_orig),
                best_move,
            },
        );

        best_value
    }

    /// Best move stored for the current position.
    ///
    /// Only meaningful right after a search of this exact position; None if
    /// the position was never searched.
    pub fn best_move(&self, pos: &Position) -> Option<Move> {
        self.tt.probe(&pos.fen()).and_then(|entry| entry.best_move)
    }

    /// Full-window search from the side to move at the depth chosen by `params`.
    pub fn think<E: Evaluator + ?Sized>(
        &mut self,
        pos: &mut Position,
        params: &SearchParams,
        evaluator: &E,
    ) -> SearchOutcome {
        self.stats.reset();
        self.stats.start_timing();

        let depth = params.depth_for(pos);
        let maximizing = pos.side_to_move() == Color::White;
        let root_key = pos.fen();

        let score = self.alpha_beta(
            pos,
            depth,
            evaluator,
            maximizing,
            f64::NEG_INFINITY,
            f64::INFINITY,
        );
        debug_assert_eq!(pos.fen(), root_key, "search did not restore the position");
        self.stats.update_timing();

        if let Some(entry) = self.tt.probe(&root_key) {
            trace!("root entry {}: {:?}", root_key, entry);
        }

        // Root draws are not stored, so a stale entry must not leak through
        let best_move = if pos.is_draw() {
            None
        } else {
            self.best_move(pos).map(|mv| pos.annotate(mv))
        };

        debug!(
            "depth {} score {} best {} nodes {} tt_hits {} cutoffs {} time {}ms",
            depth,
            score,
            best_move.map_or_else(|| "-".to_string(), |mv| mv.to_string()),
            self.stats.nodes,
            self.stats.tt_hits,
            self.stats.cutoffs,
            self.stats.search_time.as_millis()
        );

        SearchOutcome {
            score,
            best_move,
            depth,
            stats: self.stats.clone(),
        }
    }
}

/// Sort key: captures, then checks, promotions, en passant, castling and
/// heavier sliding pieces. Larger sorts first.
fn priority(mv: &Move) -> (bool, bool, bool, bool, bool, i32) {
    let sliding_value = match mv.kind() {
        MoveKind::Sliding => mv.piece().value(),
        _ => 0,
    };
    (
        mv.is_capture(),
        mv.gives_check(),
        mv.is_promotion(),
        mv.is_en_passant(),
        mv.is_castle(),
        sliding_value,
    )
}

/// Stable: equal moves keep generator order.
fn order_moves(moves: &mut [Move], tt_move: Option<Move>) {
    moves.sort_by(|a, b| {
        // TT move first
        if let Some(tt_mv) = tt_move {
            match (*a == tt_mv, *b == tt_mv) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => {}
            }
        }
        priority(b).cmp(&priority(a))
    });
}
