use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use shakmaty::fen::Fen;
use shakmaty::{Chess, Position as _};

use arrocco::{perft, perft_divide, Position, START_FEN};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 4)]
    depth: u32,

    /// Print the count below each root move
    #[arg(long)]
    divide: bool,

    /// Cross-check the total against shakmaty
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    info!("Running perft on FEN: '{}' at depth {}", args.fen, args.depth);

    let mut pos = Position::from_fen(&args.fen)
        .with_context(|| format!("invalid position '{}'", args.fen))?;

    let start = std::time::Instant::now();
    let nodes = if args.divide {
        let mut total = 0;
        for (mv, count) in perft_divide(&mut pos, args.depth) {
            println!("{}: {}", mv.to_long_algebraic(), count);
            total += count;
        }
        total
    } else {
        perft(&mut pos, args.depth)
    };
    let duration = start.elapsed();

    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        duration.as_millis(),
        nodes as f64 / (duration.as_micros().max(1) as f64)
    );

    if args.verify {
        let reference: Chess = if args.fen != START_FEN {
            let fen: Fen = args.fen.parse().context("shakmaty rejected the FEN")?;
            fen.into_position(shakmaty::CastlingMode::Standard)
                .context("shakmaty rejected the position")?
        } else {
            Chess::default()
        };
        let expected = perft_shakmaty(&reference, args.depth);
        if expected != nodes {
            bail!("mismatch: shakmaty counts {} nodes, arrocco {}", expected, nodes);
        }
        println!("verified against shakmaty");
    }

    Ok(())
}

fn perft_shakmaty(pos: &Chess, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for m in pos.legal_moves() {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += perft_shakmaty(&new_pos, depth - 1);
    }
    nodes
}
