//! Move generation.
//!
//! Pseudo-legal generation per piece, then a legality filter that tries each
//! candidate on the packed rows, rejects the ones that leave the mover's king
//! attacked and tags the survivors that attack the opponent's king.

use crate::board::{Color, PieceKind, Position};
use crate::error::MoveParseError;
use crate::moves::{CastleSide, Move};
use crate::utils::{
    file_of, offset_square, parse_square, rank_of, ray, Offset, BISHOP_DIRECTIONS,
    KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS,
};

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

impl Position {
    /// Pseudo-legal moves of the piece on `from`; nothing if the square is empty.
    pub fn pseudo_moves_from(&self, from: usize, out: &mut Vec<Move>) {
        let Some(piece) = self.piece_at(from) else {
            return;
        };
        let color = piece.color;
        match piece.kind {
            PieceKind::Pawn => self.generate_pawn_pseudos(from, color, out),
            PieceKind::Knight => self.generate_knight_pseudos(from, color, out),
            PieceKind::Bishop => {
                self.generate_sliding_pseudos(from, color, PieceKind::Bishop, &BISHOP_DIRECTIONS, out)
            }
            PieceKind::Rook => {
                self.generate_sliding_pseudos(from, color, PieceKind::Rook, &ROOK_DIRECTIONS, out)
            }
            PieceKind::Queen => {
                self.generate_sliding_pseudos(from, color, PieceKind::Queen, &QUEEN_DIRECTIONS, out)
            }
            PieceKind::King => self.generate_king_pseudos(from, color, out),
        }
    }

    fn generate_pawn_pseudos(&self, from: usize, color: Color, out: &mut Vec<Move>) {
        let forward = color.forward();
        let last_rank = color.promotion_rank();

        let push = |to: usize, capture: bool, out: &mut Vec<Move>| {
            if rank_of(to) == last_rank {
                for promoted in PROMOTIONS {
                    out.push(Move::pawn(color, from, to, capture, Some(promoted), false));
                }
            } else {
                out.push(Move::pawn(color, from, to, capture, None, false));
            }
        };

        // Single and double pushes
        if let Some(one) = offset_square(from, (forward, 0)) {
            if self.piece_at(one).is_none() {
                push(one, false, out);
                if rank_of(from) == color.pawn_rank() {
                    if let Some(two) = offset_square(one, (forward, 0)) {
                        if self.piece_at(two).is_none() {
                            push(two, false, out);
                        }
                    }
                }
            }
        }

        // Diagonal captures
        for df in [-1, 1] {
            if let Some(to) = offset_square(from, (forward, df)) {
                if matches!(self.piece_at(to), Some(p) if p.color != color) {
                    push(to, true, out);
                }
            }
        }

        // En passant: the victim sits beside the capturing pawn on its own rank
        if color == self.side {
            if let Some(target) = self.en_passant_target() {
                let beside = rank_of(from) * 8 + file_of(target);
                let adjacent = file_of(from).abs_diff(file_of(target)) == 1
                    && offset_square(from, (forward, 0)).map(rank_of) == Some(rank_of(target));
                if adjacent && self.is_piece(beside, PieceKind::Pawn, color.opposite()) {
                    out.push(Move::pawn(color, from, target, true, None, true));
                }
            }
        }
    }

    fn generate_knight_pseudos(&self, from: usize, color: Color, out: &mut Vec<Move>) {
        for to in self.offset_targets(from, color, &KNIGHT_OFFSETS) {
            let capture = self.piece_at(to).is_some();
            out.push(Move::knight(color, from, to, capture));
        }
    }

    fn generate_sliding_pseudos(
        &self,
        from: usize,
        color: Color,
        piece: PieceKind,
        directions: &[Offset],
        out: &mut Vec<Move>,
    ) {
        for &dir in directions {
            for to in ray(from, dir) {
                match self.piece_at(to) {
                    None => out.push(Move::sliding(color, piece, from, to, false)),
                    Some(p) => {
                        if p.color != color {
                            out.push(Move::sliding(color, piece, from, to, true));
                        }
                        break;
                    }
                }
            }
        }
    }

    fn generate_king_pseudos(&self, from: usize, color: Color, out: &mut Vec<Move>) {
        for to in self.offset_targets(from, color, &KING_OFFSETS) {
            let capture = self.piece_at(to).is_some();
            out.push(Move::king(color, from, to, capture));
        }

        // Arrocco: solo dalla casa d'origine, eleggibilita' decisa dalla posizione
        if from == color.back_rank() * 8 + 4 {
            for side in [CastleSide::KingSide, CastleSide::QueenSide] {
                if self.is_castle_available(color, side) {
                    out.push(Move::castle(color, side));
                }
            }
        }
    }

    /// On-board offset targets not occupied by `color`
    fn offset_targets<'a>(
        &'a self,
        from: usize,
        color: Color,
        offsets: &'a [Offset],
    ) -> impl Iterator<Item = usize> + 'a {
        offsets
            .iter()
            .filter_map(move |&o| offset_square(from, o))
            .filter(move |&to| !matches!(self.piece_at(to), Some(p) if p.color == color))
    }

    /// Try `mv` on the rows: None if it leaves the mover's king attacked,
    /// otherwise the move tagged with whether it checks the opponent.
    fn filter_legal(&mut self, mut mv: Move) -> Option<Move> {
        let color = mv.color();
        let captured = mv.apply(&mut self.rows);
        let legal = !self.is_king_in_check(color);
        if legal {
            mv.set_gives_check(self.is_king_in_check(color.opposite()));
        }
        mv.revert(&mut self.rows, captured);
        legal.then_some(mv)
    }

    /// Legal moves of the piece on `sq`, if it belongs to the side to move
    pub fn legal_moves_from(&mut self, sq: usize) -> Vec<Move> {
        let mut pseudo = Vec::with_capacity(32);
        if matches!(self.piece_at(sq), Some(p) if p.color == self.side) {
            self.pseudo_moves_from(sq, &mut pseudo);
        }
        pseudo
            .into_iter()
            .filter_map(|mv| self.filter_legal(mv))
            .collect()
    }

    /// Every legal move for the side to move, in square order
    pub fn all_legal_moves(&mut self) -> Vec<Move> {
        let mut legal = Vec::with_capacity(64);
        for sq in 0..64 {
            legal.extend(self.legal_moves_from(sq));
        }
        legal
    }

    /// Stops at the first legal move found
    pub fn has_legal_move(&mut self) -> bool {
        let mut pseudo = Vec::with_capacity(32);
        for sq in 0..64 {
            if !matches!(self.piece_at(sq), Some(p) if p.color == self.side) {
                continue;
            }
            pseudo.clear();
            self.pseudo_moves_from(sq, &mut pseudo);
            if pseudo.iter().any(|&mv| self.filter_legal(mv).is_some()) {
                return true;
            }
        }
        false
    }

    /// Fill in both notation tags of a legal move by playing it.
    pub fn annotate(&mut self, mut mv: Move) -> Move {
        let opponent = mv.color().opposite();
        let mut after = self.play(mv);
        let check = after.is_king_in_check(opponent);
        mv.set_gives_check(check);
        mv.set_checkmate(check && !after.has_legal_move());
        mv
    }

    /// Resolve long-algebraic text ("e2e4", "e7e8q") against the legal moves.
    pub fn parse_move(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let malformed = || MoveParseError::Malformed(text.to_string());
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(malformed());
        }
        let from = parse_square(&text[0..2]).ok_or_else(malformed)?;
        let to = parse_square(&text[2..4]).ok_or_else(malformed)?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(ch @ ('q' | 'r' | 'b' | 'n')) => PieceKind::from_letter(ch),
            Some(_) => return Err(malformed()),
        };

        self.legal_moves_from(from)
            .into_iter()
            .find(|mv| mv.to() == to && mv.promotion() == promotion)
            .ok_or_else(|| MoveParseError::Illegal(text.to_string()))
    }
}

/// Count leaf nodes of the legal move tree to `depth`
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = pos.all_legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        let mut child = pos.play(mv);
        nodes += perft(&mut child, depth - 1);
    }
    nodes
}

/// Per-root-move perft counts, in generation order
pub fn perft_divide(pos: &mut Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    pos.all_legal_moves()
        .into_iter()
        .map(|mv| {
            let mut child = pos.play(mv);
            (mv, perft(&mut child, depth - 1))
        })
        .collect()
}
