//! Move model: a closed set of move variants that apply and revert themselves
//! against the packed rows of a position.

use std::fmt;

use crate::board::{Color, Piece, PieceKind};
use crate::row::Row;
use crate::utils::{file_of, rank_of, square_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// File the king lands on
    pub fn king_to_file(self) -> usize {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }

    pub fn rook_from_file(self) -> usize {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    pub fn rook_to_file(self) -> usize {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }
}

/// Variant data beyond the from/to relocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Knight moves
    Normal,
    /// Bishop, rook and queen moves
    Sliding,
    Pawn {
        promotion: Option<PieceKind>,
        en_passant: bool,
    },
    King {
        castle: Option<CastleSide>,
    },
}

/// A move as produced by the generator.
///
/// The relocation data is fixed at construction. The two annotations
/// (`gives_check`, `is_checkmate`) are filled in by the legality filter and
/// by [`crate::board::Position::annotate`]; they only affect notation and
/// move ordering, never legality. Equality ignores them.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    from: usize,
    to: usize,
    color: Color,
    piece: PieceKind,
    capture: bool,
    kind: MoveKind,
    gives_check: bool,
    checkmate: bool,
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.color == other.color
            && self.piece == other.piece
            && self.capture == other.capture
            && self.kind == other.kind
    }
}

impl Eq for Move {}

impl Move {
    fn new(
        color: Color,
        piece: PieceKind,
        from: usize,
        to: usize,
        capture: bool,
        kind: MoveKind,
    ) -> Self {
        Self {
            from,
            to,
            color,
            piece,
            capture,
            kind,
            gives_check: false,
            checkmate: false,
        }
    }

    pub fn knight(color: Color, from: usize, to: usize, capture: bool) -> Self {
        Self::new(color, PieceKind::Knight, from, to, capture, MoveKind::Normal)
    }

    pub fn sliding(color: Color, piece: PieceKind, from: usize, to: usize, capture: bool) -> Self {
        debug_assert!(matches!(
            piece,
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        ));
        Self::new(color, piece, from, to, capture, MoveKind::Sliding)
    }

    pub fn pawn(
        color: Color,
        from: usize,
        to: usize,
        capture: bool,
        promotion: Option<PieceKind>,
        en_passant: bool,
    ) -> Self {
        Self::new(
            color,
            PieceKind::Pawn,
            from,
            to,
            capture,
            MoveKind::Pawn {
                promotion,
                en_passant,
            },
        )
    }

    pub fn king(color: Color, from: usize, to: usize, capture: bool) -> Self {
        Self::new(
            color,
            PieceKind::King,
            from,
            to,
            capture,
            MoveKind::King { castle: None },
        )
    }

    /// Castling move; the king starts on the e-file of its back rank.
    pub fn castle(color: Color, side: CastleSide) -> Self {
        let rank = color.back_rank();
        Self::new(
            color,
            PieceKind::King,
            rank * 8 + 4,
            rank * 8 + side.king_to_file(),
            false,
            MoveKind::King { castle: Some(side) },
        )
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn piece(&self) -> PieceKind {
        self.piece
    }

    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    pub fn is_capture(&self) -> bool {
        self.capture
    }

    pub fn gives_check(&self) -> bool {
        self.gives_check
    }

    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    pub fn promotion(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Pawn { promotion, .. } => promotion,
            _ => None,
        }
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion().is_some()
    }

    pub fn is_en_passant(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::Pawn {
                en_passant: true,
                ..
            }
        )
    }

    pub fn castle_side(&self) -> Option<CastleSide> {
        match self.kind {
            MoveKind::King { castle } => castle,
            _ => None,
        }
    }

    pub fn is_castle(&self) -> bool {
        self.castle_side().is_some()
    }

    /// Pawn pushes from the second to the fourth rank of the mover
    pub fn is_double_push(&self) -> bool {
        self.piece == PieceKind::Pawn && rank_of(self.from).abs_diff(rank_of(self.to)) == 2
    }

    pub(crate) fn set_gives_check(&mut self, gives_check: bool) {
        self.gives_check = gives_check;
    }

    pub(crate) fn set_checkmate(&mut self, checkmate: bool) {
        self.checkmate = checkmate;
    }

    /// Relocate the moving piece plus any variant side effect. Returns the
    /// previous content of the destination square, to hand back to `revert`.
    pub fn apply(&self, rows: &mut [Row; 8]) -> Option<Piece> {
        let (from_rank, from_file) = (rank_of(self.from), file_of(self.from));
        let (to_rank, to_file) = (rank_of(self.to), file_of(self.to));

        let captured = rows[to_rank].get(to_file);
        let moving = rows[from_rank].get(from_file);
        rows[to_rank].put(to_file, moving);
        rows[from_rank].clear(from_file);

        match self.kind {
            MoveKind::King { castle: Some(side) } => {
                let rook = rows[from_rank].get(side.rook_from_file());
                rows[from_rank].put(side.rook_to_file(), rook);
                rows[from_rank].clear(side.rook_from_file());
            }
            MoveKind::Pawn {
                en_passant: true, ..
            } => {
                // il pedone catturato sta accanto, sulla traversa di partenza
                rows[from_rank].clear(to_file);
            }
            MoveKind::Pawn {
                promotion: Some(promoted),
                ..
            } => {
                rows[to_rank].set(to_file, promoted, self.color);
            }
            _ => {}
        }

        captured
    }

    /// Exact inverse of [`Move::apply`]; `captured` must be its return value.
    pub fn revert(&self, rows: &mut [Row; 8], captured: Option<Piece>) {
        let (from_rank, from_file) = (rank_of(self.from), file_of(self.from));
        let (to_rank, to_file) = (rank_of(self.to), file_of(self.to));

        let moved = rows[to_rank].get(to_file);
        rows[from_rank].put(from_file, moved);
        rows[to_rank].put(to_file, captured);

        match self.kind {
            MoveKind::King { castle: Some(side) } => {
                let rook = rows[from_rank].get(side.rook_to_file());
                rows[from_rank].put(side.rook_from_file(), rook);
                rows[from_rank].clear(side.rook_to_file());
            }
            MoveKind::Pawn {
                en_passant: true, ..
            } => {
                rows[from_rank].set(to_file, PieceKind::Pawn, self.color.opposite());
            }
            MoveKind::Pawn {
                promotion: Some(_),
                ..
            } => {
                rows[from_rank].set(from_file, PieceKind::Pawn, self.color);
            }
            _ => {}
        }
    }

    /// Long algebraic text ("e2e4", "e7e8q")
    pub fn to_long_algebraic(&self) -> String {
        let mut text = format!("{}{}", square_name(self.from), square_name(self.to));
        if let Some(promoted) = self.promotion() {
            text.push(promoted.letter().to_ascii_lowercase());
        }
        text
    }

    fn suffix(&self) -> &'static str {
        if self.checkmate {
            "#"
        } else if self.gives_check {
            "+"
        } else {
            ""
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::King {
                castle: Some(CastleSide::KingSide),
            } => write!(f, "O-O")?,
            MoveKind::King {
                castle: Some(CastleSide::QueenSide),
            } => write!(f, "O-O-O")?,
            MoveKind::Pawn { promotion, .. } => {
                if self.capture {
                    let file = (b'a' + file_of(self.from) as u8) as char;
                    write!(f, "{}x", file)?;
                }
                write!(f, "{}", square_name(self.to))?;
                if let Some(promoted) = promotion {
                    write!(f, "={}", promoted.letter())?;
                }
            }
            _ => {
                write!(
                    f,
                    "{}{}{}{}",
                    self.piece.letter(),
                    square_name(self.from),
                    if self.capture { "x" } else { "" },
                    square_name(self.to)
                )?;
            }
        }
        write!(f, "{}", self.suffix())
    }
}
