#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod board;
mod common;
mod config;
pub mod deduce;
#[cfg(feature = "std")]
mod logging;
pub mod minefield;
pub mod probability;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod source;
#[cfg(feature = "std")]
mod ui;

pub use board::{BoardState, Observations};
pub use common::*;
pub use config::*;
pub use deduce::{deduce, surrounding, Deduction, Surrounding};
pub use minefield::{Minefield, RevealResult};
pub use probability::{choose_move, estimate, estimate_and_choose, ProbabilityGrid};
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use session::{CampaignSummary, RoundReport, Session};
#[cfg(feature = "std")]
pub use source::{BoardSource, CellProbe, PooledSource, SimulatedBoard, DEFAULT_WORKERS};
#[cfg(feature = "std")]
pub use ui::*;
