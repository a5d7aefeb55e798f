#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::path::PathBuf;
#[cfg(feature = "std")]
use std::time::Duration;

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::{Rng, SeedableRng};
#[cfg(feature = "std")]
use sweeper::{
    estimate, init_logging, print_board, print_probability_board, BoardConfig, GameLevel,
    PooledSource, Session, SessionConfig, SimulatedBoard, DEFAULT_WORKERS,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone, Debug)]
#[cfg(feature = "std")]
struct BoardArgs {
    #[arg(long, value_enum, default_value_t = GameLevel::Beginner)]
    level: GameLevel,
    #[arg(long, help = "Custom board: rows (requires --cols and --mines)", requires_all = ["cols", "mines"])]
    rows: Option<usize>,
    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<usize>,
    #[arg(long, requires_all = ["rows", "cols"])]
    mines: Option<usize>,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = DEFAULT_WORKERS, help = "Concurrent cell reads per refresh")]
    workers: usize,
}

#[cfg(feature = "std")]
impl BoardArgs {
    fn board_config(&self) -> anyhow::Result<BoardConfig> {
        match (self.rows, self.cols, self.mines) {
            (Some(r), Some(c), Some(m)) => Ok(BoardConfig::new(r, c, m)?),
            _ => Ok(self.level.board_config()),
        }
    }

    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play simulated games until enough fast wins are collected.
    Play {
        #[command(flatten)]
        board: BoardArgs,
        #[arg(long, default_value_t = 5, help = "Fast wins required before stopping")]
        wins: u32,
        #[arg(long, help = "Stop after this many rounds regardless of wins")]
        max_rounds: Option<u32>,
        #[arg(long, default_value_t = 70.0, help = "Seconds under which a win counts")]
        threshold: f64,
        #[arg(long, default_value_t = 2.0, help = "Minimum seconds survived before a loss is snapshotted")]
        min_loss: f64,
        #[arg(long, help = "Directory for lose_N.txt board snapshots")]
        snapshot_dir: Option<PathBuf>,
        #[arg(long, default_value_t = 3)]
        opening_moves: usize,
    },
    /// Play a single simulated round and print the final board.
    Show {
        #[command(flatten)]
        board: BoardArgs,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(log::LevelFilter::Info);
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            board,
            wins,
            max_rounds,
            threshold,
            min_loss,
            snapshot_dir,
            opening_moves,
        } => {
            let seed = board.seed();
            log::info!("seed {}", seed);
            let config = SessionConfig {
                board: board.board_config()?,
                opening_moves,
                win_threshold: Duration::try_from_secs_f64(threshold)?,
                min_loss_elapsed: Duration::try_from_secs_f64(min_loss)?,
                wins,
                max_rounds,
                snapshot_dir,
                ..SessionConfig::default()
            };
            let source = PooledSource::with_workers(
                SimulatedBoard::new(config.board, seed),
                board.workers,
            );
            let mut session = Session::new(source, config, SmallRng::seed_from_u64(seed.wrapping_add(1)));
            let summary = session.run().await?;
            println!(
                "rounds: {}  wins: {} ({} fast)  losses: {}  failures: {}",
                summary.rounds, summary.wins, summary.fast_wins, summary.losses, summary.failures
            );
            for path in &summary.snapshots {
                println!("snapshot: {}", path.display());
            }
        }
        Commands::Show { board } => {
            let seed = board.seed();
            let config = SessionConfig {
                board: board.board_config()?,
                ..SessionConfig::default()
            };
            let source = PooledSource::with_workers(
                SimulatedBoard::new(config.board, seed),
                board.workers,
            );
            let mut session = Session::new(source, config, SmallRng::seed_from_u64(seed.wrapping_add(1)));
            let report = session.play_round().await?;
            print_board(session.board());
            print_probability_board(&estimate(session.board()));
            println!(
                "\n{:?} after {:.2}s: {} safe reveals, {} guesses (seed {})",
                report.outcome,
                report.elapsed.as_secs_f64(),
                report.safe_reveals,
                report.guesses,
                seed
            );
        }
    }
    Ok(())
}
