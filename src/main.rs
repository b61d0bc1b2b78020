//! arrocco analysis entry point: plays the given moves from a position and
//! reports the engine's choice.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use arrocco::{GameStatus, MaterialEvaluator, Position, Search, SearchParams, START_FEN};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Starting position
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    /// Base search depth in plies
    #[arg(short, long, default_value_t = 4)]
    depth: i32,

    /// Search exactly --depth plies regardless of material left
    #[arg(long)]
    no_phase_extension: bool,

    /// Long-algebraic moves to play before searching (e2e4 e7e5 ...)
    #[arg(short, long, num_args = 0.., value_delimiter = ' ')]
    moves: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();

    let mut pos = Position::from_fen(&args.fen)
        .with_context(|| format!("invalid starting position '{}'", args.fen))?;
    for text in &args.moves {
        let mv = pos
            .parse_move(text)
            .with_context(|| format!("cannot play '{}' in {}", text, pos.fen()))?;
        pos.make_move(mv);
    }

    println!("{}", pos);
    println!("{}", pos.fen());

    match pos.status() {
        GameStatus::Ongoing => {}
        status => {
            println!("Game over: {:?}", status);
            return Ok(());
        }
    }

    let params = SearchParams::new()
        .depth(args.depth)
        .phase_extension(!args.no_phase_extension);
    info!("searching depth {}", params.depth_for(&pos));

    let mut search = Search::new();
    let outcome = search.think(&mut pos, &params, &MaterialEvaluator);

    match outcome.best_move {
        Some(mv) => println!("bestmove {} ({})", mv, mv.to_long_algebraic()),
        None => println!("bestmove none"),
    }
    println!("score {}", outcome.score);
    println!("{}", outcome.stats);

    Ok(())
}
