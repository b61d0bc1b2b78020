// Attack oracle: rescans from the target square on every query,
// no attack maps are kept between calls.

use crate::board::{Color, PieceKind, Position};
use crate::utils::{
    offset_square, ray, Offset, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS,
};

impl Position {
    /// True if any piece of `by` attacks `sq`
    pub fn is_square_attacked(&self, sq: usize, by: Color) -> bool {
        // Pawn attacks: look one rank back from the attacker's point of view
        let pawn_offsets: [Offset; 2] = [(-by.forward(), -1), (-by.forward(), 1)];
        if self.any_at_offsets(sq, &pawn_offsets, PieceKind::Pawn, by) {
            return true;
        }
        if self.any_at_offsets(sq, &KNIGHT_OFFSETS, PieceKind::Knight, by) {
            return true;
        }
        if self.any_at_offsets(sq, &KING_OFFSETS, PieceKind::King, by) {
            return true;
        }
        // Bishop/Queen (diagonal sliding)
        if self.any_on_rays(sq, &BISHOP_DIRECTIONS, PieceKind::Bishop, by) {
            return true;
        }
        // Rook/Queen (orthogonal sliding)
        self.any_on_rays(sq, &ROOK_DIRECTIONS, PieceKind::Rook, by)
    }

    fn any_at_offsets(&self, sq: usize, offsets: &[Offset], kind: PieceKind, by: Color) -> bool {
        offsets
            .iter()
            .filter_map(|&o| offset_square(sq, o))
            .any(|s| self.is_piece(s, kind, by))
    }

    /// Scan each ray up to the first occupied square; queens count on both ray sets.
    fn any_on_rays(&self, sq: usize, directions: &[Offset], slider: PieceKind, by: Color) -> bool {
        directions.iter().any(|&dir| {
            ray(sq, dir)
                .find_map(|s| self.piece_at(s))
                .map_or(false, |p| {
                    p.color == by && (p.kind == slider || p.kind == PieceKind::Queen)
                })
        })
    }

    /// Square of `color`'s king
    ///
    /// # Panics
    /// If `color` has no king on the board, which well-formed positions exclude.
    pub fn king_square(&self, color: Color) -> usize {
        (0..64)
            .find(|&sq| self.is_piece(sq, PieceKind::King, color))
            .unwrap_or_else(|| panic!("no {:?} king on the board", color))
    }

    pub fn is_king_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opposite())
    }
}
