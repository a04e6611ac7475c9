//! Per-team aggregation of episode results
//!
//! Collects the steps, score, efficiency (score per step) and cause of death
//! of every episode a team plays, and summarizes them for reporting.

use serde::Serialize;

use super::confidence::{Confidence, MetricSummary};
use crate::game::DeathCause;
use crate::runner::EpisodeResult;

/// Episode tallies for one team
///
/// # Example
///
/// ```rust
/// use snake_duel::metrics::{Confidence, TeamStats};
/// use snake_duel::game::DeathCause;
/// use snake_duel::runner::EpisodeResult;
///
/// let mut stats = TeamStats::new("Fully Greedy team");
/// stats.record_episode(&EpisodeResult {
///     steps: 50,
///     score: 5,
///     death: Some(DeathCause::Wall),
///     deaths: [Some(DeathCause::Wall), None],
/// });
///
/// assert_eq!(stats.episodes(), 1);
/// println!("{}", stats.format_summary(Confidence::P95));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct TeamStats {
    team: String,
    steps: Vec<f64>,
    scores: Vec<f64>,
    efficiencies: Vec<f64>,
    /// Counts indexed like [`DeathCause::ALL`]
    death_counts: [usize; 4],
    high_score: u32,
}

impl TeamStats {
    pub fn new(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            steps: Vec::new(),
            scores: Vec::new(),
            efficiencies: Vec::new(),
            death_counts: [0; 4],
            high_score: 0,
        }
    }

    /// Build stats from a batch of results
    pub fn from_results<'a>(
        team: impl Into<String>,
        results: impl IntoIterator<Item = &'a EpisodeResult>,
    ) -> Self {
        let mut stats = Self::new(team);
        for result in results {
            stats.record_episode(result);
        }
        stats
    }

    pub fn record_episode(&mut self, result: &EpisodeResult) {
        self.steps.push(result.steps as f64);
        self.scores.push(result.score as f64);
        self.efficiencies.push(if result.steps == 0 {
            0.0
        } else {
            result.score as f64 / result.steps as f64
        });

        if let Some(cause) = result.death {
            self.death_counts[Self::slot(cause)] += 1;
        }
        self.high_score = self.high_score.max(result.score);
    }

    fn slot(cause: DeathCause) -> usize {
        DeathCause::ALL
            .iter()
            .position(|&c| c == cause)
            .unwrap_or_default()
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn episodes(&self) -> usize {
        self.steps.len()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn steps(&self) -> MetricSummary {
        MetricSummary::from_samples(&self.steps)
    }

    pub fn score(&self) -> MetricSummary {
        MetricSummary::from_samples(&self.scores)
    }

    pub fn efficiency(&self) -> MetricSummary {
        MetricSummary::from_samples(&self.efficiencies)
    }

    /// Number of episodes that ended with `cause`
    pub fn deaths(&self, cause: DeathCause) -> usize {
        self.death_counts[Self::slot(cause)]
    }

    /// Multi-line report: one line per metric, then the causes of loss
    pub fn format_summary(&self, confidence: Confidence) -> String {
        let line = |label: &str, summary: MetricSummary, precision: usize| {
            format!(
                "  {:<18} {:>10.*} ± {:.*} (std {:.*})",
                label,
                precision,
                summary.mean,
                precision,
                summary.error(confidence),
                precision,
                summary.std_dev,
            )
        };

        let causes = DeathCause::ALL
            .iter()
            .map(|&cause| format!("{}: {}", cause, self.deaths(cause)))
            .collect::<Vec<_>>()
            .join(" | ");

        [
            format!(
                "{} ({} episodes, {} CI, high score {})",
                self.team,
                self.episodes(),
                confidence,
                self.high_score
            ),
            line("Steps/episode", self.steps(), 1),
            line("Score/episode", self.score(), 2),
            line("Score/steps", self.efficiency(), 4),
            format!("  Causes of loss     {}", causes),
        ]
        .join("\n")
    }
}
