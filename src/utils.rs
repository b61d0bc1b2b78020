// Offset tables and square helpers for move generation and attack scanning
// Mapping: A1=0, B1=1, ..., H8=63 (rank * 8 + file)

/// (rank delta, file delta)
pub type Offset = (i8, i8);

pub const KNIGHT_OFFSETS: [Offset; 8] = [
    (2, 1),
    (2, -1),
    (1, 2),
    (1, -2),
    (-2, 1),
    (-2, -1),
    (-1, 2),
    (-1, -2),
];

pub const KING_OFFSETS: [Offset; 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const BISHOP_DIRECTIONS: [Offset; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ROOK_DIRECTIONS: [Offset; 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
pub const QUEEN_DIRECTIONS: [Offset; 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

#[inline]
pub fn square(rank: usize, file: usize) -> usize {
    rank * 8 + file
}

#[inline]
pub fn rank_of(sq: usize) -> usize {
    sq / 8
}

#[inline]
pub fn file_of(sq: usize) -> usize {
    sq % 8
}

/// Step from `sq` by `offset`, or None when the step leaves the board.
#[inline]
pub fn offset_square(sq: usize, offset: Offset) -> Option<usize> {
    let rank = rank_of(sq) as i8 + offset.0;
    let file = file_of(sq) as i8 + offset.1;
    if (0..8).contains(&rank) && (0..8).contains(&file) {
        Some(square(rank as usize, file as usize))
    } else {
        None
    }
}

/// Iterator over the squares of a ray, nearest first, stopping at the board edge.
pub struct Ray {
    current: usize,
    direction: Offset,
}

impl Iterator for Ray {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        let next = offset_square(self.current, self.direction)?;
        self.current = next;
        Some(next)
    }
}

#[inline]
pub fn ray(from: usize, direction: Offset) -> Ray {
    Ray {
        current: from,
        direction,
    }
}

/// Convert a square index to its name (0 -> "a1", 63 -> "h8")
pub fn square_name(sq: usize) -> String {
    let file = (b'a' + file_of(sq) as u8) as char;
    let rank = (b'1' + rank_of(sq) as u8) as char;
    format!("{}{}", file, rank)
}

/// Parse a square name ("e2" -> 12)
pub fn parse_square(name: &str) -> Option<usize> {
    let bytes = name.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Some(square((rank - b'1') as usize, (file - b'a') as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_names_round_trip() {
        for sq in 0..64 {
            assert_eq!(parse_square(&square_name(sq)), Some(sq));
        }
        assert_eq!(square_name(0), "a1");
        assert_eq!(square_name(63), "h8");
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
    }

    #[test]
    fn rays_stop_at_the_edge() {
        let north_east: Vec<usize> = ray(square(5, 5), (1, 1)).collect();
        assert_eq!(north_east, vec![square(6, 6), square(7, 7)]);
        assert_eq!(ray(square(0, 0), (-1, 0)).count(), 0);
        assert_eq!(ray(square(0, 0), (0, 1)).count(), 7);
    }

    #[test]
    fn knight_offsets_from_corner() {
        let targets: Vec<usize> = KNIGHT_OFFSETS
            .iter()
            .filter_map(|&o| offset_square(0, o))
            .collect();
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&square(2, 1)));
        assert!(targets.contains(&square(1, 2)));
    }
}
