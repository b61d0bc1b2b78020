use arrocco::{CastleSide, Color, Position, START_FEN};

const POSITIONS: [&str; 5] = [
    START_FEN,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/8/8/k1pP4/8/8/8/4K3 w - c6 0 1",
    "n1n5/P5P1/8/2k5/8/8/8/4K3 w - - 0 1",
    "r3k2r/8/8/8/8/8/6b1/R3K2R b KQkq - 0 1",
];

#[test]
fn undo_restores_every_field() {
    for fen in POSITIONS {
        let mut pos = Position::from_fen(fen).unwrap();
        let before = pos.clone();
        for mv in pos.all_legal_moves() {
            let undo = pos.make_move(mv);
            assert_ne!(pos.side_to_move(), before.side_to_move());
            assert_eq!(pos.history().len(), 1);
            pos.undo_move(undo);
            assert_eq!(pos, before, "make/undo of {} changed {}", mv, fen);
        }
    }
}

#[test]
fn nested_undo_restores_every_field() {
    for fen in POSITIONS {
        let mut pos = Position::from_fen(fen).unwrap();
        let before = pos.clone();
        for first in pos.all_legal_moves() {
            let outer = pos.make_move(first);
            let middle = pos.clone();
            for second in pos.all_legal_moves() {
                let inner = pos.make_move(second);
                pos.undo_move(inner);
                assert_eq!(pos, middle);
            }
            pos.undo_move(outer);
        }
        assert_eq!(pos, before);
    }
}

#[test]
fn guard_undoes_on_drop() {
    let mut pos = Position::new();
    let before = pos.clone();
    let mv = pos.parse_move("g1f3").unwrap();
    {
        let guard = pos.play(mv);
        assert_eq!(guard.side_to_move(), Color::Black);
        assert_eq!(guard.history().len(), 1);
    }
    assert_eq!(pos, before);
}

#[test]
fn castling_markers_record_and_revert() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let rook = pos.parse_move("h1g1").unwrap();
    let undo = pos.make_move(rook);
    assert!(!pos.has_castling_right(Color::White, CastleSide::KingSide));
    assert!(pos.has_castling_right(Color::White, CastleSide::QueenSide));
    pos.undo_move(undo);
    assert!(pos.has_castling_right(Color::White, CastleSide::KingSide));

    let castle = pos.parse_move("e1g1").unwrap();
    assert!(castle.is_castle());
    let undo = pos.make_move(castle);
    assert_eq!(pos.fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq -");
    pos.undo_move(undo);
    assert_eq!(pos.fen(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq -");
}

#[test]
fn capturing_a_corner_rook_removes_the_right() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/6b1/R3K2R b KQkq - 0 1").unwrap();
    let capture = pos.parse_move("g2h1").unwrap();
    let undo = pos.make_move(capture);
    assert!(!pos.has_castling_right(Color::White, CastleSide::KingSide));
    assert_eq!(pos.fen(), "r3k2r/8/8/8/8/8/8/R3K2b w Qkq -");
    pos.undo_move(undo);
    assert!(pos.has_castling_right(Color::White, CastleSide::KingSide));
}

#[test]
fn rook_returning_to_its_corner_does_not_regain_the_right() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    for text in ["a1b1", "a8b8", "b1a1", "b8a8"] {
        let mv = pos.parse_move(text).unwrap();
        pos.make_move(mv);
    }
    assert_eq!(pos.fen(), "r3k2r/8/8/8/8/8/8/R3K2R w Kk -");
    assert!(!pos.is_queen_side_castle_available(Color::White));
    assert!(pos.is_king_side_castle_available(Color::White));
}
