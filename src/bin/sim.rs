use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;
use sweeper::{CellProbe, GameLevel, Outcome, PooledSource, Session, SessionConfig, SimulatedBoard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed> <games>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let games: u32 = args[2].parse()?;

    let mut results = Vec::new();
    for level in GameLevel::ALL {
        let config = SessionConfig::for_level(level);
        let source = PooledSource::new(SimulatedBoard::new(config.board, seed));
        let mut session = Session::new(source, config, SmallRng::seed_from_u64(seed));

        let (mut wins, mut losses, mut guesses) = (0u32, 0u32, 0usize);
        for _ in 0..games {
            session.source().probe().restart().await?;
            let report = session.play_round().await?;
            guesses += report.guesses;
            match report.outcome {
                Outcome::Win => wins += 1,
                _ => losses += 1,
            }
        }
        results.push(json!({
            "level": level,
            "games": games,
            "wins": wins,
            "losses": losses,
            "guesses": guesses,
        }));
    }

    let total_wins: u32 = results.iter().filter_map(|r| r["wins"].as_u64()).map(|w| w as u32).sum();
    let result = json!({
        "seed": seed,
        "levels": results,
        "total_wins": total_wins,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
