//! Board model and tick engine
//!
//! This module holds the two-snake world and the rules that advance it. It has
//! no I/O or rendering dependencies and never consults a policy directly.

pub mod action;
pub mod config;
pub mod engine;
pub mod index;
pub mod state;

// Re-export commonly used types
pub use action::{Axis, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use index::{BoardIndex, Occupant};
pub use state::{Cell, DeathCause, Food, FoodId, GameState, Snake, SnakeId};
