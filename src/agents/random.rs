use tracing::debug;

use super::random_source::{choose, RandomSource};
use super::{latest, Observation, Policy};
use crate::error::Result;
use crate::game::Direction;

/// Picks one of the four directions uniformly, ignoring the board
pub struct RandomAgent {
    observation: Option<Observation>,
    random: Box<dyn RandomSource>,
}

impl RandomAgent {
    pub fn new(random: Box<dyn RandomSource>) -> Self {
        Self {
            observation: None,
            random,
        }
    }
}

impl Policy for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn see(&mut self, observation: &Observation) {
        self.observation = Some(observation.clone());
    }

    fn decide(&mut self) -> Result<Direction> {
        latest(&self.observation, self.name())?;
        let direction = choose(self.random.as_mut(), &Direction::ALL);
        debug!(?direction, "random move");
        Ok(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{RngSource, ScriptedSource};
    use crate::game::Cell;
    use std::collections::HashSet;

    fn observation() -> Observation {
        Observation {
            snakes: [vec![Cell::new(100, 100)], vec![Cell::new(300, 300)]],
            foods: [Cell::new(200, 200), Cell::new(400, 400)],
            cell_size: 20,
            board_width: 600,
            board_height: 600,
        }
    }

    #[test]
    fn test_scripted_picks_map_to_directions() {
        let mut agent = RandomAgent::new(Box::new(ScriptedSource::new().with_picks([0, 1, 2, 3])));
        agent.see(&observation());

        let picked: Vec<Direction> = (0..4).map(|_| agent.decide().unwrap()).collect();
        assert_eq!(picked, Direction::ALL.to_vec());
    }

    #[test]
    fn test_covers_all_directions() {
        let mut agent = RandomAgent::new(Box::new(RngSource::seeded(21)));
        agent.see(&observation());

        let seen: HashSet<Direction> = (0..200).map(|_| agent.decide().unwrap()).collect();
        assert_eq!(seen.len(), 4);
    }
}
