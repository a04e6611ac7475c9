//! Tick loop for one two-snake episode
//!
//! The episode moves through `Init → Running → Over`. Each tick it shows the
//! latest observation to both policies, collects their moves and hands both to
//! the engine at once, so neither snake moves first.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agents::{create_observation, Observation, Policy};
use crate::error::{Result, SimError};
use crate::game::{DeathCause, Direction, GameConfig, GameEngine, GameState};

/// Lifecycle of an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Running,
    Over,
}

/// What the statistics side gets once an episode ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeResult {
    pub steps: u32,
    pub score: u32,
    /// First snake's cause of death, or the second's if the first survived
    pub death: Option<DeathCause>,
    /// Cause of death per snake
    pub deaths: [Option<DeathCause>; 2],
}

/// Callback fed every observation, e.g. by a renderer
pub type TickObserver = Box<dyn FnMut(&Observation) + Send>;

/// Drives two policies against one engine until the episode ends
pub struct Episode {
    engine: GameEngine,
    state: Option<GameState>,
    policies: [Box<dyn Policy>; 2],
    observation: Option<Observation>,
    phase: Phase,
    on_tick: Option<TickObserver>,
}

impl Episode {
    /// Create an episode; the board is laid out by [`Episode::reset`]
    pub fn new(engine: GameEngine, policies: [Box<dyn Policy>; 2]) -> Result<Self> {
        engine.config().validate()?;
        Ok(Self {
            engine,
            state: None,
            policies,
            observation: None,
            phase: Phase::Init,
            on_tick: None,
        })
    }

    /// Create an episode with a seeded engine
    pub fn seeded(config: GameConfig, seed: u64, policies: [Box<dyn Policy>; 2]) -> Result<Self> {
        Self::new(GameEngine::with_seed(config, seed), policies)
    }

    /// Register a callback that receives every observation, starting with the initial one
    pub fn with_observer(mut self, observer: impl FnMut(&Observation) + Send + 'static) -> Self {
        self.on_tick = Some(Box::new(observer));
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current world state, once the episode has been reset
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Place both snakes and both foods; returns the initial observation
    pub fn reset(&mut self) -> Observation {
        let state = self.engine.reset();
        let observation = create_observation(&state);

        self.state = Some(state);
        self.phase = Phase::Running;
        self.publish(&observation);
        self.observation = Some(observation.clone());
        observation
    }

    /// Advance one tick
    ///
    /// Returns the new observation, the per-snake rewards (always zero) and
    /// whether the episode is over. Stepping a finished episode changes nothing.
    pub fn step(&mut self) -> Result<(Observation, [f32; 2], bool)> {
        let (state, observation) = match (self.state.as_mut(), self.observation.as_ref()) {
            (Some(state), Some(observation)) => (state, observation),
            _ => return Err(SimError::NotStarted),
        };
        if self.phase == Phase::Over {
            return Ok((observation.clone(), [0.0; 2], true));
        }

        let mut directions = [Direction::Up; 2];
        for (policy, direction) in self.policies.iter_mut().zip(directions.iter_mut()) {
            policy.see(observation);
            *direction = policy.decide()?;
        }

        let result = self.engine.step(state, directions);
        let observation = create_observation(state);

        if result.terminated {
            self.phase = Phase::Over;
            debug!(
                steps = state.steps,
                score = state.score,
                first = ?state.snakes[0].death,
                second = ?state.snakes[1].death,
                "episode over"
            );
        }

        self.publish(&observation);
        self.observation = Some(observation.clone());
        Ok((observation, result.rewards, result.terminated))
    }

    /// Reset, then step until the episode ends
    pub fn run(&mut self) -> Result<EpisodeResult> {
        self.reset();
        let mut done = false;
        while !done {
            let (_, _, terminated) = self.step()?;
            done = terminated;
        }
        self.result().ok_or(SimError::NotStarted)
    }

    /// Summary of the episode so far; `None` before the first reset
    pub fn result(&self) -> Option<EpisodeResult> {
        let state = self.state.as_ref()?;
        let deaths = [state.snakes[0].death, state.snakes[1].death];
        Some(EpisodeResult {
            steps: state.steps,
            score: state.score,
            death: deaths[0].or(deaths[1]),
            deaths,
        })
    }

    fn publish(&mut self, observation: &Observation) {
        if let Some(observer) = self.on_tick.as_mut() {
            observer(observation);
        }
    }
}
