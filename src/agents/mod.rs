//! Navigation policies
//!
//! Every snake is driven by a [`Policy`]: it is shown the latest
//! [`Observation`] through [`Policy::see`] and answers with a [`Direction`]
//! from [`Policy::decide`]. Policies never touch the world state.
//!
//! Provides:
//! - Random baseline
//! - Fully greedy distance closing
//! - Partially greedy closing with neck, wall and opponent avoidance

pub mod fully_greedy;
pub mod observation;
pub mod partially_greedy;
pub mod random;
pub mod random_source;

pub use fully_greedy::FullyGreedyAgent;
pub use observation::{create_observation, Observation};
pub use partially_greedy::{PartiallyGreedyAgent, Stage};
pub use random::RandomAgent;
pub use random_source::{RandomSource, RngSource, ScriptedSource};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SimError};
use crate::game::{Direction, SnakeId};

/// A decision rule for one snake
pub trait Policy: Send {
    /// Human-readable policy name
    fn name(&self) -> &str;

    /// Store the latest observation
    fn see(&mut self, observation: &Observation);

    /// Pick the next move from the stored observation
    ///
    /// Fails with [`SimError::NoObservation`] if [`Policy::see`] was never called.
    fn decide(&mut self) -> Result<Direction>;
}

/// Borrow the stored observation or report that none was seen yet
pub(crate) fn latest<'a>(
    observation: &'a Option<Observation>,
    policy: &str,
) -> Result<&'a Observation> {
    observation.as_ref().ok_or_else(|| SimError::NoObservation {
        policy: policy.to_string(),
    })
}

/// The built-in policy families; a team is two snakes of the same kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    Random,
    FullyGreedy,
    PartiallyGreedy,
}

impl AgentKind {
    pub const ALL: [AgentKind; 3] = [
        AgentKind::Random,
        AgentKind::FullyGreedy,
        AgentKind::PartiallyGreedy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::FullyGreedy => "fully-greedy",
            AgentKind::PartiallyGreedy => "partially-greedy",
        }
    }

    /// Display name used in reports
    pub fn team_name(&self) -> &'static str {
        match self {
            AgentKind::Random => "Random team",
            AgentKind::FullyGreedy => "Fully Greedy team",
            AgentKind::PartiallyGreedy => "Partially Greedy team",
        }
    }

    /// Build the policy for snake `id`, drawing tie-breaks from `random`
    pub fn build(&self, id: SnakeId, random: Box<dyn RandomSource>) -> Box<dyn Policy> {
        match self {
            AgentKind::Random => Box::new(RandomAgent::new(random)),
            AgentKind::FullyGreedy => Box::new(FullyGreedyAgent::new(id, random)),
            AgentKind::PartiallyGreedy => Box::new(PartiallyGreedyAgent::new(id, random)),
        }
    }

    /// Build a seeded policy for snake `id`
    pub fn build_seeded(&self, id: SnakeId, seed: u64) -> Box<dyn Policy> {
        self.build(id, Box::new(RngSource::seeded(seed)))
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = SimError;

    /// Accepts the kebab-case names as well as the legacy underscore spellings
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(AgentKind::Random),
            "fully-greedy" | "fully_greedy" => Ok(AgentKind::FullyGreedy),
            "partially-greedy" | "partially_greedy" | "part_greedy" => {
                Ok(AgentKind::PartiallyGreedy)
            }
            other => Err(SimError::UnknownAgent(other.to_string())),
        }
    }
}
