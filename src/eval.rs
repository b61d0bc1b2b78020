//! Modulo di valutazione
//!
//! The search consumes the evaluator only through [`Evaluator`]: a
//! deterministic, side-effect-free function of the canonical position
//! string returning a White-positive score in centipawns.

use crate::board::{Color, PieceKind};

pub trait Evaluator {
    fn evaluate(&self, fen: &str) -> f64;
}

/// Any plain scoring function is an evaluator.
impl<F> Evaluator for F
where
    F: Fn(&str) -> f64,
{
    fn evaluate(&self, fen: &str) -> f64 {
        self(fen)
    }
}

/// Material balance from the board field, White minus Black.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, fen: &str) -> f64 {
        let board = fen.split(' ').next().unwrap_or("");
        let score: i32 = board
            .chars()
            .filter_map(|ch| {
                let kind = PieceKind::from_letter(ch)?;
                let sign = match color_of_letter(ch) {
                    Color::White => 1,
                    Color::Black => -1,
                };
                Some(sign * kind.value())
            })
            .sum();
        f64::from(score)
    }
}

fn color_of_letter(ch: char) -> Color {
    if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    }
}
