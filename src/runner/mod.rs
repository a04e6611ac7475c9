//! Episode orchestration and batch comparison

pub mod compare;
pub mod episode;

pub use compare::{compare_teams, run_episode, run_team, CompareConfig, TeamReport};
pub use episode::{Episode, EpisodeResult, Phase, TickObserver};
