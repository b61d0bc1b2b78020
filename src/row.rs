//! Packed rank codec.
//!
//! A rank is eight 4-bit squares in one `u32`, file a in the highest nibble.
//! Each nibble is `color << 3 | code`, where code 0 is an empty square and
//! codes 1..=6 are pawn..king. The color bit of an empty square is always 0.

use crate::board::{Color, Piece, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Row(u32);

#[inline]
fn shift(file: usize) -> u32 {
    debug_assert!(file < 8, "file {} out of range", file);
    4 * (7 - file as u32)
}

fn encode(piece: Option<Piece>) -> u32 {
    match piece {
        None => 0,
        Some(p) => ((p.color as u32) << 3) | (p.kind as u32 + 1),
    }
}

fn decode(nibble: u32) -> Option<Piece> {
    let kind = match nibble & 7 {
        0 => return None,
        1 => PieceKind::Pawn,
        2 => PieceKind::Knight,
        3 => PieceKind::Bishop,
        4 => PieceKind::Rook,
        5 => PieceKind::Queen,
        6 => PieceKind::King,
        other => unreachable!("invalid piece code {}", other),
    };
    let color = if nibble & 8 != 0 {
        Color::Black
    } else {
        Color::White
    };
    Some(Piece { kind, color })
}

impl Row {
    pub const EMPTY: Row = Row(0);

    #[inline]
    pub fn get(self, file: usize) -> Option<Piece> {
        decode((self.0 >> shift(file)) & 0xF)
    }

    #[inline]
    pub fn put(&mut self, file: usize, piece: Option<Piece>) {
        let s = shift(file);
        self.0 = (self.0 & !(0xF << s)) | (encode(piece) << s);
    }

    #[inline]
    pub fn set(&mut self, file: usize, kind: PieceKind, color: Color) {
        self.put(file, Some(Piece { kind, color }));
    }

    #[inline]
    pub fn clear(&mut self, file: usize) {
        self.put(file, None);
    }

    #[inline]
    pub fn is_empty(self, file: usize) -> bool {
        (self.0 >> shift(file)) & 7 == 0
    }

    /// FEN text for this rank: empty runs as digits, white upper case, black lower case.
    pub fn fen(self) -> String {
        let mut out = String::with_capacity(8);
        let mut empty = 0;
        for file in 0..8 {
            match self.get(file) {
                None => empty += 1,
                Some(piece) => {
                    if empty > 0 {
                        out.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    out.push(piece.letter());
                }
            }
        }
        if empty > 0 {
            out.push(char::from(b'0' + empty));
        }
        out
    }
}
