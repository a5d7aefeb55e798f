#![cfg(feature = "std")]

//! Game loop driving a [`BoardSource`] with the deduction and probability engines.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use crate::board::BoardState;
use crate::common::{Coord, Outcome};
use crate::config::SessionConfig;
use crate::deduce::deduce;
use crate::probability::estimate_and_choose;
use crate::source::BoardSource;

/// How one round went.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RoundReport {
    pub outcome: Outcome,
    pub elapsed: Duration,
    /// Reveals proven safe by deduction.
    pub safe_reveals: usize,
    /// Reveals chosen by the probability estimate or the opening.
    pub guesses: usize,
    pub mines_flagged: usize,
}

/// Totals over a whole session.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct CampaignSummary {
    pub rounds: u32,
    pub wins: u32,
    /// Wins under the configured time threshold.
    pub fast_wins: u32,
    pub losses: u32,
    /// Rounds aborted by an adapter error.
    pub failures: u32,
    pub snapshots: Vec<PathBuf>,
}

/// Owns the board of the current round and drives the source.
pub struct Session<S: BoardSource> {
    source: S,
    config: SessionConfig,
    rng: SmallRng,
    board: BoardState,
}

impl<S: BoardSource> Session<S> {
    pub fn new(source: S, config: SessionConfig, rng: SmallRng) -> Self {
        let board = BoardState::new(config.board);
        Self {
            source,
            config,
            rng,
            board,
        }
    }

    /// Board of the current (or last finished) round.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Refresh with retries. Exhausted retries abandon the round as lost.
    async fn refresh(&mut self) -> anyhow::Result<Outcome> {
        let mut attempt = 0;
        loop {
            let pending: Vec<Coord> = self.board.unknown_cells().into_iter().collect();
            let err = match self.source.refresh(&pending).await {
                Ok(observations) => match self.board.apply_refresh(&observations) {
                    Ok(outcome) => return Ok(outcome),
                    Err(e) => anyhow::Error::new(e),
                },
                Err(e) => e,
            };
            if attempt >= self.config.refresh_retries {
                log::warn!("refresh failed {} times, abandoning round: {:#}", attempt + 1, err);
                return Ok(Outcome::Loss);
            }
            attempt += 1;
            log::debug!("refresh attempt {} failed: {:#}", attempt, err);
        }
    }

    async fn reveal(&mut self, coord: Coord) -> anyhow::Result<()> {
        self.source
            .reveal(coord)
            .await
            .with_context(|| format!("revealing ({}, {})", coord.0, coord.1))
    }

    /// Opening cell plus a few random reveals, before anything is known.
    async fn open(&mut self) -> anyhow::Result<usize> {
        let first = self.config.board.opening_cell();
        self.reveal(first).await?;
        let unknown: Vec<Coord> = self
            .board
            .unknown_cells()
            .into_iter()
            .filter(|&c| c != first)
            .collect();
        let count = if unknown.len() < self.config.opening_moves {
            1
        } else {
            self.config.opening_moves
        };
        let picks: Vec<Coord> = unknown
            .choose_multiple(&mut self.rng, count)
            .copied()
            .collect();
        for &coord in &picks {
            self.reveal(coord).await?;
        }
        Ok(1 + picks.len())
    }

    /// Play one round on a fresh board until the source reports an outcome.
    pub async fn play_round(&mut self) -> anyhow::Result<RoundReport> {
        self.board = BoardState::new(self.config.board);
        let mut safe_reveals = 0;
        let mut guesses = self.open().await?;

        let outcome = loop {
            let outcome = self.refresh().await?;
            if outcome.is_terminal() {
                break outcome;
            }

            let mut found = deduce(&mut self.board);
            if found.safe.is_empty() {
                // flags placed by the first pass may settle other clues
                found.safe = deduce(&mut self.board).safe;
            }

            if !found.safe.is_empty() {
                for &coord in &found.safe {
                    self.reveal(coord).await?;
                }
                safe_reveals += found.safe.len();
                continue;
            }

            match estimate_and_choose(&self.board, &mut self.rng) {
                Some((coord, _risk)) => {
                    self.reveal(coord).await?;
                    guesses += 1;
                }
                None => break Outcome::Win,
            }
        };

        let elapsed = self.source.elapsed().await?;
        Ok(RoundReport {
            outcome,
            elapsed,
            safe_reveals,
            guesses,
            mines_flagged: self.board.flagged(),
        })
    }

    fn write_snapshot(&self, index: usize) -> anyhow::Result<Option<PathBuf>> {
        let Some(dir) = &self.config.snapshot_dir else {
            return Ok(None);
        };
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating snapshot directory {}", dir.display()))?;
        let path = dir.join(format!("lose_{}.txt", index));
        std::fs::write(&path, self.board.to_string())
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        Ok(Some(path))
    }

    /// Play rounds until the wins budget or the round cap runs out.
    pub async fn run(&mut self) -> anyhow::Result<CampaignSummary> {
        let mut summary = CampaignSummary::default();
        let mut wins_left = self.config.wins;
        let mut consecutive_failures = 0;

        while wins_left > 0 {
            if self
                .config
                .max_rounds
                .is_some_and(|max| summary.rounds >= max)
            {
                break;
            }
            summary.rounds += 1;

            let round = match self.source.new_game().await {
                Ok(()) => self.play_round().await,
                Err(e) => Err(e.context("starting a new game")),
            };
            let report = match round {
                Ok(report) => {
                    consecutive_failures = 0;
                    report
                }
                Err(e) => {
                    summary.failures += 1;
                    consecutive_failures += 1;
                    log::error!("round {} failed: {:#}", summary.rounds, e);
                    if consecutive_failures >= self.config.max_consecutive_failures {
                        return Err(e.context(format!(
                            "giving up after {} consecutive failures",
                            consecutive_failures
                        )));
                    }
                    continue;
                }
            };

            let secs = report.elapsed.as_secs_f64();
            match report.outcome {
                Outcome::Win => {
                    summary.wins += 1;
                    if report.elapsed < self.config.win_threshold {
                        summary.fast_wins += 1;
                        wins_left -= 1;
                    }
                    log::info!(
                        "round {}: won in {:.2}s ({} safe, {} guesses), {} wins to go",
                        summary.rounds,
                        secs,
                        report.safe_reveals,
                        report.guesses,
                        wins_left
                    );
                }
                Outcome::Loss => {
                    log::info!("round {}: lost after {:.2}s", summary.rounds, secs);
                    if report.elapsed > self.config.min_loss_elapsed {
                        match self.write_snapshot(summary.snapshots.len()) {
                            Ok(Some(path)) => summary.snapshots.push(path),
                            Ok(None) => {}
                            Err(e) => log::warn!("{:#}", e),
                        }
                    }
                    summary.losses += 1;
                }
                Outcome::Continue => {}
            }
        }
        Ok(summary)
    }
}
