//! Snake Duel - a two-snake food race for comparing navigation heuristics
//!
//! This library provides:
//! - Core game logic: board, movement and collision resolution (game module)
//! - Random, fully greedy and partially greedy policies (agents module)
//! - Episode loop and parallel team comparison (runner module)
//! - Per-team statistics with confidence intervals (metrics module)

pub mod agents;
pub mod error;
pub mod game;
pub mod metrics;
pub mod runner;

pub use error::{Result, SimError};
