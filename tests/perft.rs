use arrocco::{perft, Position};
use shakmaty::{Chess, Position as _};

fn perft_shakmaty(pos: &Chess, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0u64;
    for m in pos.legal_moves() {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += perft_shakmaty(&new_pos, depth - 1);
    }
    nodes
}

#[test]
fn perft_regression_starting_pos() {
    let pos = Chess::default();
    let mut board = Position::new();

    for depth in 1..=3 {
        let expected = perft_shakmaty(&pos, depth);
        let got = perft(&mut board, depth);
        assert_eq!(
            got, expected,
            "perft mismatch at depth {}: got {} expected {}",
            depth, got, expected
        );
    }
}

#[test]
fn perft_known_counts_shallow() {
    let mut board = Position::new();
    assert_eq!(perft(&mut board, 1), 20);
    assert_eq!(perft(&mut board, 2), 400);
    assert_eq!(perft(&mut board, 3), 8_902);
    assert_eq!(perft(&mut board, 4), 197_281);
}

#[test]
#[ignore = "slow: run with --ignored --release"]
fn perft_known_counts_depth_5() {
    let mut board = Position::new();
    assert_eq!(perft(&mut board, 5), 4_865_609);
}

#[test]
#[ignore = "slow: run with --ignored --release"]
fn perft_known_counts_depth_6() {
    let mut board = Position::new();
    assert_eq!(perft(&mut board, 6), 119_060_324);
}

#[test]
fn perft_leaves_the_position_untouched() {
    let mut board = Position::new();
    let before = board.clone();
    perft(&mut board, 3);
    assert_eq!(board, before);
}
