//! Batch runner: plays N independent episodes per team and aggregates them

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

use super::episode::{Episode, EpisodeResult};
use crate::agents::AgentKind;
use crate::game::{GameConfig, SnakeId};
use crate::metrics::TeamStats;

pub struct CompareConfig {
    pub game: GameConfig,
    pub episodes: usize,
    /// Base seed; every episode derives its own streams from it
    pub seed: u64,
    /// Worker threads; `None` uses the global rayon pool
    pub jobs: Option<usize>,
}

impl CompareConfig {
    pub fn new(game: GameConfig, episodes: usize, seed: u64) -> Self {
        Self {
            game,
            episodes,
            seed,
            jobs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamReport {
    pub team: String,
    pub kind: AgentKind,
    pub runs: Vec<EpisodeResult>,
    pub stats: TeamStats,
}

/// splitmix64 finalizer
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed for one random stream of one episode
///
/// Stream 0 drives the engine, streams 1 and 2 the two policies.
pub fn episode_seed(base: u64, kind: AgentKind, episode: usize, stream: u64) -> u64 {
    let team = kind as u64;
    mix(mix(mix(base ^ team.wrapping_mul(0xA24B_AED4_963E_E407)) ^ episode as u64) ^ stream)
}

/// Play one seeded episode with both snakes driven by `kind`
pub fn run_episode(kind: AgentKind, game: &GameConfig, seeds: [u64; 3]) -> Result<EpisodeResult> {
    let policies = [
        kind.build_seeded(SnakeId::First, seeds[1]),
        kind.build_seeded(SnakeId::Second, seeds[2]),
    ];
    let mut episode = Episode::seeded(game.clone(), seeds[0], policies)?;
    Ok(episode.run()?)
}

/// Play `config.episodes` episodes for one team, in parallel
pub fn run_team(kind: AgentKind, config: &CompareConfig) -> Result<TeamReport> {
    if config.episodes == 0 {
        return Err(anyhow!("comparison requires at least one episode"));
    }

    let started = Instant::now();
    let indices: Vec<usize> = (0..config.episodes).collect();
    let run_one = |episode: &usize| -> Result<EpisodeResult> {
        let seeds = [0, 1, 2].map(|stream| episode_seed(config.seed, kind, *episode, stream));
        run_episode(kind, &config.game, seeds)
            .with_context(|| format!("{} episode {} failed", kind.team_name(), episode))
    };

    let results: Vec<Result<EpisodeResult>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| indices.par_iter().map(run_one).collect())
    } else {
        indices.par_iter().map(run_one).collect()
    };

    let runs = results.into_iter().collect::<Result<Vec<_>>>()?;
    let stats = TeamStats::from_results(kind.team_name(), runs.iter());

    info!(
        team = kind.team_name(),
        episodes = runs.len(),
        mean_steps = stats.steps().mean,
        mean_score = stats.score().mean,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "team finished"
    );

    Ok(TeamReport {
        team: kind.team_name().to_string(),
        kind,
        runs,
        stats,
    })
}

/// Run every team in `kinds`, one after another
pub fn compare_teams(kinds: &[AgentKind], config: &CompareConfig) -> Result<Vec<TeamReport>> {
    kinds.iter().map(|&kind| run_team(kind, config)).collect()
}
