use arrocco::{DrawReason, GameStatus, Position};

fn play(pos: &mut Position, uci: &str) {
    let mv = pos
        .parse_move(uci)
        .unwrap_or_else(|e| panic!("Move {} not playable: {}", uci, e));
    pos.make_move(mv);
}

#[test]
fn test_threefold_repetition_simple() {
    let mut board = Position::new();
    let start_key = board.fen();

    // 1. Nf3 Nf6 2. Ng1 Ng8 3. Nf3 Nf6 4. Ng1 Ng8 -> third occurrence of the start
    let moves = [
        "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8",
    ];

    for (i, m_str) in moves.iter().enumerate() {
        play(&mut board, m_str);
        if i < 7 {
            assert!(!board.is_draw(), "no draw expected after move {}", i + 1);
        }
    }

    assert_eq!(board.repetition_count(&start_key), 3);
    assert!(board.is_threefold_repetition());
    assert_eq!(board.draw_reason(), Some(DrawReason::ThreefoldRepetition));
    assert_eq!(
        board.status(),
        GameStatus::Draw(DrawReason::ThreefoldRepetition)
    );
}

#[test]
fn undo_takes_back_a_repetition() {
    let mut board = Position::new();
    let mut undos = Vec::new();
    for m_str in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
        let mv = board.parse_move(m_str).unwrap();
        undos.push(board.make_move(mv));
    }
    assert!(board.is_threefold_repetition());

    let last = undos.pop().unwrap();
    board.undo_move(last);
    assert!(!board.is_threefold_repetition());
    assert_eq!(board.repetition_count(&Position::new().fen()), 2);
}

#[test]
fn test_50_move_rule() {
    let mut board = Position::from_fen("8/8/8/8/8/8/1R6/k6K w - - 99 1").unwrap();
    assert!(!board.is_draw(), "99 halfmoves is not yet draw");

    play(&mut board, "b2b3");

    assert!(board.fifty_move_rule());
    assert!(
        board.is_draw(),
        "100 halfmoves should be draw (50 move rule)"
    );
    assert_eq!(board.status(), GameStatus::Draw(DrawReason::FiftyMoveRule));
}

#[test]
fn fifty_move_rule_counts_the_history_window() {
    let mut board = Position::from_fen("7k/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    let cycle = ["a1a2", "h8g8", "a2a1", "g8h8"];
    for ply in 0..100 {
        assert!(!board.fifty_move_rule(), "early fifty-move draw at ply {}", ply);
        play(&mut board, cycle[ply % 4]);
    }
    assert!(board.fifty_move_rule());
}

#[test]
fn pawn_move_resets_the_count() {
    let mut board = Position::from_fen("7k/8/8/8/8/8/P7/4K2N w - - 98 1").unwrap();
    play(&mut board, "a2a3");
    play(&mut board, "h8g8");
    assert!(!board.fifty_move_rule());
}

#[test]
fn test_insufficient_material() {
    // K vs K
    let board = Position::from_fen("8/8/8/8/8/8/8/k6K w - - 0 1").unwrap();
    assert!(board.only_kings_left(), "K vs K");
    assert!(board.is_draw(), "K vs K is draw");

    // Any other piece keeps the game going
    let board = Position::from_fen("8/8/8/8/8/8/5N2/k6K w - - 0 1").unwrap();
    assert!(!board.only_kings_left(), "K+N vs K");
    assert!(!board.is_draw());
}

#[test]
fn capturing_the_last_piece_is_a_material_draw() {
    let mut board = Position::from_fen("8/8/8/8/8/8/1r6/K6k w - - 0 1").unwrap();
    play(&mut board, "a1b2");
    assert_eq!(
        board.status(),
        GameStatus::Draw(DrawReason::InsufficientMaterial)
    );
}
