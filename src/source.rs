#![cfg(feature = "std")]

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::board::Observations;
use crate::common::{Coord, ObservedValue};
use crate::config::BoardConfig;
use crate::minefield::Minefield;

/// Default ceiling on concurrent cell reads during one refresh.
pub const DEFAULT_WORKERS: usize = 20;

/// External game the solver plays against.
#[async_trait::async_trait]
pub trait BoardSource: Send {
    /// Read every cell in `pending`. Cells still hidden are left out of the
    /// result. Either all reads succeed or the refresh fails as a whole.
    async fn refresh(&mut self, pending: &[Coord]) -> anyhow::Result<Observations>;
    /// Ask the source to reveal one cell.
    async fn reveal(&mut self, coord: Coord) -> anyhow::Result<()>;
    /// Game clock as displayed by the source.
    async fn elapsed(&mut self) -> anyhow::Result<Duration>;
    /// Start a fresh game with the same dimensions.
    async fn new_game(&mut self) -> anyhow::Result<()>;
}

/// Reader for a single cell, shared by the workers of a [`PooledSource`].
#[async_trait::async_trait]
pub trait CellProbe: Send + Sync + 'static {
    async fn probe(&self, coord: Coord) -> anyhow::Result<Option<ObservedValue>>;
    async fn click(&self, coord: Coord) -> anyhow::Result<()>;
    async fn elapsed(&self) -> anyhow::Result<Duration>;
    async fn restart(&self) -> anyhow::Result<()>;
}

/// [`BoardSource`] fanning each refresh out over a bounded set of tasks.
pub struct PooledSource<P: CellProbe> {
    probe: Arc<P>,
    limit: Arc<Semaphore>,
}

impl<P: CellProbe> PooledSource<P> {
    pub fn new(probe: P) -> Self {
        Self::with_workers(probe, DEFAULT_WORKERS)
    }

    pub fn with_workers(probe: P, workers: usize) -> Self {
        Self {
            probe: Arc::new(probe),
            limit: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }
}

#[async_trait::async_trait]
impl<P: CellProbe> BoardSource for PooledSource<P> {
    async fn refresh(&mut self, pending: &[Coord]) -> anyhow::Result<Observations> {
        let mut tasks = JoinSet::new();
        for &coord in pending {
            let probe = Arc::clone(&self.probe);
            let limit = Arc::clone(&self.limit);
            tasks.spawn(async move {
                let _permit = limit.acquire_owned().await?;
                let value = probe
                    .probe(coord)
                    .await
                    .with_context(|| format!("reading cell ({}, {})", coord.0, coord.1))?;
                Ok::<_, anyhow::Error>((coord, value))
            });
        }

        let mut observations = Observations::new();
        while let Some(joined) = tasks.join_next().await {
            let read = joined
                .map_err(|e| anyhow!("refresh worker failed: {}", e))
                .and_then(|r| r);
            match read {
                Ok((coord, Some(value))) => {
                    observations.insert(coord, value);
                }
                Ok((_, None)) => {}
                Err(e) => {
                    tasks.abort_all();
                    return Err(e.context("refresh discarded"));
                }
            }
        }
        Ok(observations)
    }

    async fn reveal(&mut self, coord: Coord) -> anyhow::Result<()> {
        self.probe.click(coord).await
    }

    async fn elapsed(&mut self) -> anyhow::Result<Duration> {
        self.probe.elapsed().await
    }

    async fn new_game(&mut self) -> anyhow::Result<()> {
        self.probe.restart().await
    }
}

struct SimState {
    field: Minefield,
    rng: SmallRng,
    started: Option<Instant>,
}

/// [`CellProbe`] over an in-memory [`Minefield`].
pub struct SimulatedBoard {
    state: Mutex<SimState>,
}

impl SimulatedBoard {
    pub fn new(config: BoardConfig, seed: u64) -> Self {
        Self::from_field(Minefield::new(config), SmallRng::seed_from_u64(seed))
    }

    /// Probe over a prepared field, e.g. one with a fixed layout.
    pub fn from_field(field: Minefield, rng: SmallRng) -> Self {
        Self {
            state: Mutex::new(SimState {
                field,
                rng,
                started: None,
            }),
        }
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut SimState) -> T) -> anyhow::Result<T> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("simulated board lock poisoned"))?;
        Ok(f(&mut state))
    }

    /// Copy of the underlying field.
    pub fn field(&self) -> anyhow::Result<Minefield> {
        self.with_state(|s| s.field.clone())
    }
}

#[async_trait::async_trait]
impl CellProbe for SimulatedBoard {
    async fn probe(&self, coord: Coord) -> anyhow::Result<Option<ObservedValue>> {
        let value = self.with_state(|s| s.field.observe(coord.0, coord.1))??;
        Ok(value)
    }

    async fn click(&self, coord: Coord) -> anyhow::Result<()> {
        let result = self.with_state(|s| {
            s.started.get_or_insert_with(Instant::now);
            let SimState { field, rng, .. } = s;
            field.reveal(coord.0, coord.1, rng)
        })??;
        log::trace!("reveal ({}, {}) -> {:?}", coord.0, coord.1, result);
        Ok(())
    }

    async fn elapsed(&self) -> anyhow::Result<Duration> {
        self.with_state(|s| s.started.map(|t| t.elapsed()).unwrap_or_default())
    }

    async fn restart(&self) -> anyhow::Result<()> {
        self.with_state(|s| {
            s.field = Minefield::new(s.field.config());
            s.started = None;
        })
    }
}
