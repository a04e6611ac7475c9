//! Greedy closing with neck, wall and opponent avoidance
//!
//! Axis resolution runs as a small state machine instead of two mutually
//! recursive resolvers:
//!
//! - `Unforced(axis)` closes the gap on `axis`. If that axis is already
//!   aligned it hands over to the other axis; the second hand-over escalates
//!   to `Forced`.
//! - `Forced(axis)` must answer on `axis`. It may redirect once to
//!   `Forced(other)` to avoid stepping into a wall, and otherwise breaks a
//!   zero-gap tie with a coin.
//!
//! At most three transitions happen before a direction is returned.

use tracing::debug;

use super::random_source::RandomSource;
use super::{latest, Observation, Policy};
use crate::error::Result;
use crate::game::{Axis, Direction, SnakeId};

/// Resolution stage of the axis state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Unforced(Axis),
    Forced(Axis),
}

enum Transition {
    Done(Direction),
    Next(Stage),
}

/// Outcome of one resolution, with the stages visited
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub direction: Direction,
    pub stages: Vec<Stage>,
}

/// Greedy food chaser that keeps its heading near walls and dodges an
/// adjacent opponent
pub struct PartiallyGreedyAgent {
    id: SnakeId,
    observation: Option<Observation>,
    random: Box<dyn RandomSource>,
}

impl PartiallyGreedyAgent {
    pub fn new(id: SnakeId, random: Box<dyn RandomSource>) -> Self {
        Self {
            id,
            observation: None,
            random,
        }
    }

    /// Pick the starting stage, then run the resolver to completion
    pub fn direction_to_go(&mut self, obs: &Observation) -> Resolution {
        let opponent = self.id.opponent();
        let start = if obs.is_adjacent(self.id, opponent, Axis::Horizontal) {
            Axis::Vertical
        } else if obs.is_adjacent(self.id, opponent, Axis::Vertical) {
            Axis::Horizontal
        } else if self.random.coin_flip() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };

        Resolver::new(self.id, obs, self.random.as_mut()).run(Stage::Unforced(start))
    }
}

impl Policy for PartiallyGreedyAgent {
    fn name(&self) -> &str {
        "partially-greedy"
    }

    fn see(&mut self, observation: &Observation) {
        self.observation = Some(observation.clone());
    }

    fn decide(&mut self) -> Result<Direction> {
        let obs = latest(&self.observation, "partially-greedy")?.clone();
        let resolution = self.direction_to_go(&obs);

        debug!(
            agent = %self.id,
            head = ?obs.head(self.id),
            food = ?obs.food(self.id),
            stages = ?resolution.stages,
            direction = ?resolution.direction,
            "partially greedy move"
        );
        Ok(resolution.direction)
    }
}

struct Resolver<'a> {
    id: SnakeId,
    obs: &'a Observation,
    random: &'a mut dyn RandomSource,
    gap: (i32, i32),
    bounced: bool,
    redirected: bool,
}

impl<'a> Resolver<'a> {
    fn new(id: SnakeId, obs: &'a Observation, random: &'a mut dyn RandomSource) -> Self {
        Self {
            id,
            obs,
            random,
            gap: obs.head(id).delta_to(obs.food(id)),
            bounced: false,
            redirected: false,
        }
    }

    fn run(mut self, start: Stage) -> Resolution {
        let mut stages = vec![start];
        let mut stage = start;

        loop {
            match self.advance(stage) {
                Transition::Done(direction) => return Resolution { direction, stages },
                Transition::Next(next) => {
                    stages.push(next);
                    stage = next;
                }
            }
        }
    }

    fn gap_on(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.gap.0,
            Axis::Vertical => self.gap.1,
        }
    }

    fn advance(&mut self, stage: Stage) -> Transition {
        match stage {
            Stage::Unforced(axis) if self.gap_on(axis) == 0 => {
                if self.bounced {
                    Transition::Next(Stage::Forced(axis))
                } else {
                    self.bounced = true;
                    Transition::Next(Stage::Unforced(axis.other()))
                }
            }
            Stage::Unforced(axis) | Stage::Forced(axis) => self.commit(axis),
        }
    }

    /// Answer on `axis`: keep the current heading, chase the food, or flip a coin
    fn commit(&mut self, axis: Axis) -> Transition {
        if let Some(heading) = self.obs.heading_along(self.id, axis) {
            // Keeping the heading avoids reversing into the neck, unless the
            // next cell would touch the wall.
            let next = self.obs.head(self.id).stepped(heading, self.obs.cell_size);
            let boxed_in = self
                .obs
                .is_adjacent(self.id, self.id.opponent(), axis.other());
            if !self.obs.in_bounds(next) && !boxed_in && !self.redirected {
                self.redirected = true;
                return Transition::Next(Stage::Forced(axis.other()));
            }
            return Transition::Done(heading);
        }

        let gap = self.gap_on(axis);
        if gap > 0 {
            Transition::Done(axis.positive())
        } else if gap < 0 {
            Transition::Done(axis.negative())
        } else if self.random.coin_flip() {
            Transition::Done(axis.negative())
        } else {
            Transition::Done(axis.positive())
        }
    }
}
