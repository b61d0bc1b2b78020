// Posizione: 8 traverse impacchettate, lato al tratto, marcatori di arrocco,
// storico mosse e conteggio ripetizioni. Mapping caselle: A1=0 ... H8=63.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use crate::error::FenError;
use crate::moves::{CastleSide, Move};
use crate::row::Row;
use crate::utils::{file_of, parse_square, rank_of, square, square_name};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank direction pawns of this color advance in
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn back_rank(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn pawn_rank(self) -> usize {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub fn promotion_rank(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// Upper-case letter (P, N, B, R, Q, K)
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Inverse of [`PieceKind::letter`], case-insensitive
    pub fn from_letter(letter: char) -> Option<PieceKind> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Material value in centipawns; the king has none
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// White upper case, black lower case
    pub fn letter(self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

/// Rollback record returned by [`Position::make_move`]
#[derive(Debug, Clone, Copy)]
pub struct Undo {
    pub mv: Move,
    /// Previous content of the destination square
    pub captured: Option<Piece>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub(crate) rows: [Row; 8],
    pub(crate) side: Color,
    /// History length at which each king first moved
    pub(crate) king_moved: [Option<usize>; 2],
    /// Same for the corner rooks, indexed [color][castle side]
    pub(crate) rook_moved: [[Option<usize>; 2]; 2],
    pub(crate) history: Vec<Move>,
    repetitions: HashMap<String, u32>,
    /// En-passant target from a parsed position string, valid while history is empty
    initial_ep: Option<usize>,
    /// Half-move clock from a parsed position string
    initial_quiet_plies: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Standard opening layout, white to move
    pub fn new() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut rows = [Row::EMPTY; 8];
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            rows[0].set(file, kind, Color::White);
            rows[1].set(file, PieceKind::Pawn, Color::White);
            rows[6].set(file, PieceKind::Pawn, Color::Black);
            rows[7].set(file, kind, Color::Black);
        }

        Self::from_parts(rows, Color::White, [None; 2], [[None; 2]; 2], None, 0)
    }

    fn from_parts(
        rows: [Row; 8],
        side: Color,
        king_moved: [Option<usize>; 2],
        rook_moved: [[Option<usize>; 2]; 2],
        initial_ep: Option<usize>,
        initial_quiet_plies: u32,
    ) -> Self {
        let mut position = Self {
            rows,
            side,
            king_moved,
            rook_moved,
            history: Vec::with_capacity(256),
            repetitions: HashMap::new(),
            initial_ep,
            initial_quiet_plies,
        };
        let key = position.fen();
        position.repetitions.insert(key, 1);
        position
    }

    /// Parse a position string: board, side to move, castling letters,
    /// en-passant square, and optionally the half-move and full-move counters.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::FieldCount(fields.len()));
        }

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut rows = [Row::EMPTY; 8];
        let mut kings = [0usize; 2];
        for (i, text) in ranks.iter().enumerate() {
            let rank = 7 - i;
            let width_error = || FenError::RankWidth {
                rank: rank + 1,
                text: text.to_string(),
            };
            let mut file = 0usize;
            for ch in text.chars() {
                if let Some(run) = ch.to_digit(10) {
                    if run == 0 || file + run as usize > 8 {
                        return Err(width_error());
                    }
                    file += run as usize;
                } else {
                    let kind = PieceKind::from_letter(ch).ok_or(FenError::UnknownPiece(ch))?;
                    if file >= 8 {
                        return Err(width_error());
                    }
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if kind == PieceKind::King {
                        kings[color as usize] += 1;
                    }
                    rows[rank].set(file, kind, color);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(width_error());
            }
        }

        for color in [Color::White, Color::Black] {
            if kings[color as usize] != 1 {
                return Err(FenError::KingCount {
                    color,
                    count: kings[color as usize],
                });
            }
        }

        let side = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSide(other.to_string())),
        };

        // Una lettera mancante equivale a una torre gia' mossa prima dello storico
        let mut rook_moved = [[Some(0); 2]; 2];
        if fields[2] != "-" {
            for ch in fields[2].chars() {
                let (color, castle) = match ch {
                    'K' => (Color::White, CastleSide::KingSide),
                    'Q' => (Color::White, CastleSide::QueenSide),
                    'k' => (Color::Black, CastleSide::KingSide),
                    'q' => (Color::Black, CastleSide::QueenSide),
                    _ => return Err(FenError::InvalidCastling(ch)),
                };
                rook_moved[color as usize][castle as usize] = None;
            }
        }
        // Re o torre fuori posto: il diritto non puo' tornare piu' tardi
        let mut king_moved = [None; 2];
        for color in [Color::White, Color::Black] {
            let home = &rows[color.back_rank()];
            if home.get(4) != Some(Piece::new(PieceKind::King, color)) {
                king_moved[color as usize] = Some(0);
            }
            for castle in [CastleSide::KingSide, CastleSide::QueenSide] {
                if home.get(castle.rook_from_file()) != Some(Piece::new(PieceKind::Rook, color)) {
                    rook_moved[color as usize][castle as usize] = Some(0);
                }
            }
        }

        let initial_ep = match fields[3] {
            "-" => None,
            text => {
                let expected_rank = match side {
                    Color::White => 5,
                    Color::Black => 2,
                };
                match parse_square(text) {
                    Some(sq) if rank_of(sq) == expected_rank => Some(sq),
                    _ => return Err(FenError::InvalidEnPassant(text.to_string())),
                }
            }
        };

        let counter = |text: &str| {
            text.parse::<u32>()
                .map_err(|_| FenError::InvalidCounter(text.to_string()))
        };
        let initial_quiet_plies = match fields.get(4).copied() {
            Some(text) => counter(text)?,
            None => 0,
        };
        if let Some(text) = fields.get(5).copied() {
            counter(text)?;
        }

        Ok(Self::from_parts(
            rows,
            side,
            king_moved,
            rook_moved,
            initial_ep,
            initial_quiet_plies,
        ))
    }

    /// Canonical position string: board, side to move, castling rights and
    /// en-passant target. Used as the repetition key, the transposition key
    /// and the evaluator input.
    pub fn fen(&self) -> String {
        let mut out = String::with_capacity(72);
        for rank in (0..8).rev() {
            out.push_str(&self.rows[rank].fen());
            if rank != 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let rights = [
            (Color::White, CastleSide::KingSide, 'K'),
            (Color::White, CastleSide::QueenSide, 'Q'),
            (Color::Black, CastleSide::KingSide, 'k'),
            (Color::Black, CastleSide::QueenSide, 'q'),
        ];
        let mut any = false;
        for (color, castle, letter) in rights {
            if self.has_castling_right(color, castle) {
                out.push(letter);
                any = true;
            }
        }
        if !any {
            out.push('-');
        }

        out.push(' ');
        match self.en_passant_target() {
            Some(sq) => out.push_str(&square_name(sq)),
            None => out.push('-'),
        }
        out
    }

    pub fn rows(&self) -> &[Row; 8] {
        &self.rows
    }

    #[inline]
    pub fn piece_at(&self, sq: usize) -> Option<Piece> {
        self.rows[rank_of(sq)].get(file_of(sq))
    }

    #[inline]
    pub(crate) fn is_piece(&self, sq: usize, kind: PieceKind, color: Color) -> bool {
        self.piece_at(sq) == Some(Piece { kind, color })
    }

    pub fn side_to_move(&self) -> Color {
        self.side
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of times `fen` has been reached in this game
    pub fn repetition_count(&self, fen: &str) -> u32 {
        self.repetitions.get(fen).copied().unwrap_or(0)
    }

    /// Square behind a pawn that just advanced two ranks
    pub fn en_passant_target(&self) -> Option<usize> {
        match self.history.last() {
            Some(last) if last.is_double_push() => {
                let rank = (rank_of(last.from()) + rank_of(last.to())) / 2;
                Some(square(rank, file_of(last.from())))
            }
            Some(_) => None,
            None => self.initial_ep,
        }
    }

    /// King and rook unmoved and both still on their original squares
    pub fn has_castling_right(&self, color: Color, castle: CastleSide) -> bool {
        let rank = color.back_rank();
        self.king_moved[color as usize].is_none()
            && self.rook_moved[color as usize][castle as usize].is_none()
            && self.is_piece(square(rank, 4), PieceKind::King, color)
            && self.is_piece(square(rank, castle.rook_from_file()), PieceKind::Rook, color)
    }

    /// Castling right plus empty squares between king and rook, and no
    /// attacked square on the king's path (origin, transit, destination).
    pub fn is_castle_available(&self, color: Color, castle: CastleSide) -> bool {
        if !self.has_castling_right(color, castle) {
            return false;
        }
        let rank = color.back_rank();
        let (between, path): (&[usize], [usize; 3]) = match castle {
            CastleSide::KingSide => (&[5, 6][..], [4, 5, 6]),
            CastleSide::QueenSide => (&[1, 2, 3][..], [4, 3, 2]),
        };
        if between.iter().any(|&file| !self.rows[rank].is_empty(file)) {
            return false;
        }
        let enemy = color.opposite();
        !path
            .iter()
            .any(|&file| self.is_square_attacked(square(rank, file), enemy))
    }

    pub fn is_king_side_castle_available(&self, color: Color) -> bool {
        self.is_castle_available(color, CastleSide::KingSide)
    }

    pub fn is_queen_side_castle_available(&self, color: Color) -> bool {
        self.is_castle_available(color, CastleSide::QueenSide)
    }

    /// Apply a move generated for this position. The returned [`Undo`] must be
    /// handed back to [`Position::undo_move`] in strict LIFO order.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        debug_assert_eq!(mv.color(), self.side, "move for the wrong side");
        let captured = mv.apply(&mut self.rows);
        self.history.push(mv);
        let ply = self.history.len();
        let color = mv.color();

        match mv.piece() {
            PieceKind::King => {
                self.king_moved[color as usize].get_or_insert(ply);
            }
            PieceKind::Rook => {
                if let Some(castle) = corner_side(mv.from(), color) {
                    self.rook_moved[color as usize][castle as usize].get_or_insert(ply);
                }
            }
            _ => {}
        }
        // Presa su una casella d'angolo: la torre avversaria non e' piu' li'
        if captured.is_some() {
            let enemy = color.opposite();
            if let Some(castle) = corner_side(mv.to(), enemy) {
                self.rook_moved[enemy as usize][castle as usize].get_or_insert(ply);
            }
        }

        self.side = self.side.opposite();
        let key = self.fen();
        *self.repetitions.entry(key).or_insert(0) += 1;

        Undo { mv, captured }
    }

    /// Exact inverse of the matching [`Position::make_move`].
    ///
    /// # Panics
    /// In debug builds, when `undo` does not belong to the most recent move.
    pub fn undo_move(&mut self, undo: Undo) {
        let Undo { mv, captured } = undo;
        debug_assert!(
            self.history.last() == Some(&mv),
            "undo_move called out of make/undo order"
        );

        let key = self.fen();
        if let Some(count) = self.repetitions.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.repetitions.remove(&key);
            }
        } else {
            debug_assert!(false, "position {} was never counted", key);
        }

        let ply = self.history.len();
        for marker in self
            .king_moved
            .iter_mut()
            .chain(self.rook_moved.iter_mut().flatten())
        {
            if *marker == Some(ply) {
                *marker = None;
            }
        }

        self.side = mv.color();
        mv.revert(&mut self.rows, captured);
        self.history.pop();
    }

    /// Make `mv` for the lifetime of the returned guard; dropping it undoes the move.
    pub fn play(&mut self, mv: Move) -> MoveGuard<'_> {
        let undo = self.make_move(mv);
        MoveGuard {
            position: self,
            undo: Some(undo),
        }
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetitions.values().any(|&count| count >= 3)
    }

    pub fn only_kings_left(&self) -> bool {
        (0..64).all(|sq| match self.piece_at(sq) {
            None => true,
            Some(piece) => piece.kind == PieceKind::King,
        })
    }

    /// True once 100 consecutive half-moves passed without a capture or a pawn move
    pub fn fifty_move_rule(&self) -> bool {
        let quiet_tail = self
            .history
            .iter()
            .rev()
            .take_while(|mv| !mv.is_capture() && mv.piece() != PieceKind::Pawn)
            .count();
        let quiet = if quiet_tail == self.history.len() {
            quiet_tail + self.initial_quiet_plies as usize
        } else {
            quiet_tail
        };
        quiet >= 100
    }

    /// Draw by insufficient material, fifty-move rule or threefold repetition
    pub fn is_draw(&self) -> bool {
        self.draw_reason().is_some()
    }

    pub fn draw_reason(&self) -> Option<DrawReason> {
        if self.only_kings_left() {
            Some(DrawReason::InsufficientMaterial)
        } else if self.fifty_move_rule() {
            Some(DrawReason::FiftyMoveRule)
        } else if self.is_threefold_repetition() {
            Some(DrawReason::ThreefoldRepetition)
        } else {
            None
        }
    }

    pub fn status(&mut self) -> GameStatus {
        if !self.has_legal_move() {
            if self.is_king_in_check(self.side) {
                GameStatus::Checkmate {
                    winner: self.side.opposite(),
                }
            } else {
                GameStatus::Stalemate
            }
        } else if let Some(reason) = self.draw_reason() {
            GameStatus::Draw(reason)
        } else {
            GameStatus::Ongoing
        }
    }

    pub fn count_pieces(&self, kind: PieceKind) -> usize {
        (0..64)
            .filter(|&sq| matches!(self.piece_at(sq), Some(p) if p.kind == kind))
            .count()
    }

    /// Base depth extended by up to 3 plies as minor and major pieces leave
    /// the board (knight/bishop 1, rook 2, queen 4, out of a full phase of 24).
    pub fn depth_with_phase(&self, base: i32) -> i32 {
        const MAX_PHASE: i32 = 24;
        let material = self.count_pieces(PieceKind::Knight)
            + self.count_pieces(PieceKind::Bishop)
            + 2 * self.count_pieces(PieceKind::Rook)
            + 4 * self.count_pieces(PieceKind::Queen);
        let phase = (MAX_PHASE - material as i32).clamp(0, MAX_PHASE);
        base + 3 * phase / MAX_PHASE
    }
}

/// Which castling rook starts on `sq` for `color`, if any
fn corner_side(sq: usize, color: Color) -> Option<CastleSide> {
    let rank = color.back_rank();
    if sq == square(rank, 7) {
        Some(CastleSide::KingSide)
    } else if sq == square(rank, 0) {
        Some(CastleSide::QueenSide)
    } else {
        None
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

/// Scoped make/undo: derefs to the position with the move applied and
/// undoes it when dropped, on every exit path.
pub struct MoveGuard<'a> {
    position: &'a mut Position,
    undo: Option<Undo>,
}

impl Deref for MoveGuard<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        &*self.position
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        &mut *self.position
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.position.undo_move(undo);
        }
    }
}

// Simple display (rank 8 first)
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                match self.rows[rank].get(file) {
                    Some(piece) => write!(f, "{} ", piece.letter())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
