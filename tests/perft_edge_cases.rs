use arrocco::{perft, Position};
use shakmaty::fen::Fen;
use shakmaty::{Chess, Position as _};

fn run_perft_check(fen_str: &str, depth: u32, name: &str) {
    let mut board = Position::from_fen(fen_str).expect("Valid FEN");

    // arrocco moves count
    let arrocco_cnt = perft(&mut board, depth);

    // Shakmaty moves count
    let fen: Fen = fen_str.parse().unwrap();
    let pos: Chess = fen
        .into_position(shakmaty::CastlingMode::Standard)
        .expect("Shakmaty should accept FEN");
    let shakmaty_cnt = shakmaty_perft(&pos, depth);

    assert_eq!(
        arrocco_cnt, shakmaty_cnt,
        "Mismatch in {name} at depth {depth}"
    );
}

fn shakmaty_perft(pos: &Chess, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for m in pos.legal_moves() {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += shakmaty_perft(&new_pos, depth - 1);
    }
    nodes
}

#[test]
fn perft_en_passant_discovered_check() {
    // White pawn on d5, black just moved c7->c5; the black king on a5 is
    // on the same rank, so the capture is still legal for white.
    let fen = "8/8/8/k1pP4/8/8/8/4K3 w - c6 0 1";
    run_perft_check(fen, 3, "En Passant Discovered Check");
}

#[test]
fn perft_en_passant_pinned_pawn() {
    // Capturing en passant would expose the white king on the fifth rank
    let fen = "8/8/8/K1pP3r/8/8/8/7k w - c6 0 1";
    run_perft_check(fen, 3, "En Passant Pinned Pawn");
}

#[test]
fn perft_castling_prevented_by_attack() {
    // King is in check from the rook on h1, cannot castle
    let fen = "4k3/8/8/8/8/8/8/R3K2r w Q - 0 1";
    run_perft_check(fen, 2, "Castling in Check (Illegal)");
}

#[test]
fn perft_castling_through_check() {
    // f1 is attacked by black rook
    let fen = "4k3/8/8/8/8/5r2/8/R3K2R w KQ - 0 1";
    run_perft_check(fen, 2, "Castling Through Check");
}

#[test]
fn perft_castling_rook_captured() {
    // Bishop can take the h1 rook; castling rights must follow
    let fen = "r3k2r/8/8/8/8/8/6b1/R3K2R b KQkq - 0 1";
    run_perft_check(fen, 3, "Castling Rook Captured");
}

#[test]
fn perft_promotion_capture() {
    // Promote and capture at the same time
    let fen = "n1n5/P5P1/8/2k5/8/8/8/4K3 w - - 0 1";
    run_perft_check(fen, 2, "Promotion Capture");
}

#[test]
fn perft_black_promotions() {
    let fen = "4k3/8/8/8/8/8/1p4p1/R3K2N b Q - 0 1";
    run_perft_check(fen, 3, "Black Promotions");
}

#[test]
fn perft_double_check_response() {
    let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    run_perft_check(fen, 3, "Complex Check Response");
}

#[test]
fn perft_kiwipete() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut board = Position::from_fen(fen).unwrap();
    assert_eq!(perft(&mut board, 1), 48);
    assert_eq!(perft(&mut board, 2), 2_039);
    run_perft_check(fen, 3, "Kiwipete");
}

#[test]
fn perft_rook_endgame() {
    let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    let mut board = Position::from_fen(fen).unwrap();
    assert_eq!(perft(&mut board, 4), 43_238);
}

#[test]
fn perft_promotion_tangle() {
    let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
    let mut board = Position::from_fen(fen).unwrap();
    assert_eq!(perft(&mut board, 1), 44);
    assert_eq!(perft(&mut board, 2), 1_486);
    assert_eq!(perft(&mut board, 3), 62_379);
}
