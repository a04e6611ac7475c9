use tracing::debug;

use super::random_source::{choose, RandomSource};
use super::{latest, Observation, Policy};
use crate::error::Result;
use crate::game::{Axis, Cell, Direction, SnakeId};

/// Closes the distance to its own food, one axis at a time
///
/// Each tick a coin picks which axis to close first; an axis that is already
/// aligned hands over to the other one. There is no collision avoidance.
pub struct FullyGreedyAgent {
    id: SnakeId,
    observation: Option<Observation>,
    random: Box<dyn RandomSource>,
}

impl FullyGreedyAgent {
    pub fn new(id: SnakeId, random: Box<dyn RandomSource>) -> Self {
        Self {
            id,
            observation: None,
            random,
        }
    }

    /// Move that reduces the gap from `head` to `food`, trying `first` axis first
    ///
    /// With the head already on the food no move can close the gap; a random
    /// direction is returned instead.
    pub fn direction_to_go(&mut self, head: Cell, food: Cell, first: Axis) -> Direction {
        let (dx, dy) = head.delta_to(food);

        for axis in [first, first.other()] {
            let delta = match axis {
                Axis::Horizontal => dx,
                Axis::Vertical => dy,
            };
            if delta > 0 {
                return axis.positive();
            }
            if delta < 0 {
                return axis.negative();
            }
        }

        choose(self.random.as_mut(), &Direction::ALL)
    }
}

impl Policy for FullyGreedyAgent {
    fn name(&self) -> &str {
        "fully-greedy"
    }

    fn see(&mut self, observation: &Observation) {
        self.observation = Some(observation.clone());
    }

    fn decide(&mut self) -> Result<Direction> {
        let obs = latest(&self.observation, "fully-greedy")?;
        let (head, food) = (obs.head(self.id), obs.food(self.id));

        let first = if self.random.coin_flip() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };
        let direction = self.direction_to_go(head, food, first);

        debug!(agent = %self.id, ?head, ?food, ?first, ?direction, "fully greedy move");
        Ok(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{RngSource, ScriptedSource};

    fn agent(flips: impl IntoIterator<Item = bool>) -> FullyGreedyAgent {
        FullyGreedyAgent::new(SnakeId::First, Box::new(ScriptedSource::with_flips(flips)))
    }

    fn observation(head: Cell, food: Cell) -> Observation {
        Observation {
            snakes: [
                vec![head, head.moved_by(-20, 0)],
                vec![Cell::new(300, 500), Cell::new(280, 500)],
            ],
            foods: [food, Cell::new(400, 400)],
            cell_size: 20,
            board_width: 600,
            board_height: 600,
        }
    }

    #[test]
    fn test_closes_horizontally() {
        let mut agent = agent([true]);
        agent.see(&observation(Cell::new(100, 100), Cell::new(140, 100)));

        assert_eq!(agent.decide().unwrap(), Direction::Right);
    }

    #[test]
    fn test_vertical_sign_convention() {
        // UP iff food.y - head.y > 0
        let mut agent = agent([false, false]);
        agent.see(&observation(Cell::new(100, 100), Cell::new(100, 60)));
        assert_eq!(agent.decide().unwrap(), Direction::Down);

        agent.see(&observation(Cell::new(100, 100), Cell::new(100, 160)));
        assert_eq!(agent.decide().unwrap(), Direction::Up);
    }

    #[test]
    fn test_aligned_axis_falls_through() {
        // coin says horizontal, but x is already aligned
        let mut agent = agent([true]);
        agent.see(&observation(Cell::new(100, 100), Cell::new(100, 40)));
        assert_eq!(agent.decide().unwrap(), Direction::Down);

        // coin says vertical, but y is already aligned
        let mut agent = self::agent([false]);
        agent.see(&observation(Cell::new(100, 100), Cell::new(40, 100)));
        assert_eq!(agent.decide().unwrap(), Direction::Left);
    }

    #[test]
    fn test_head_on_food_still_answers() {
        let mut agent = FullyGreedyAgent::new(
            SnakeId::First,
            Box::new(ScriptedSource::with_flips([true]).with_picks([2])),
        );
        agent.see(&observation(Cell::new(100, 100), Cell::new(100, 100)));

        assert_eq!(agent.decide().unwrap(), Direction::ALL[2]);
    }

    #[test]
    fn test_always_reduces_distance_on_chosen_axis() {
        let mut agent = FullyGreedyAgent::new(SnakeId::First, Box::new(RngSource::seeded(4)));
        let head = Cell::new(300, 300);

        for fx in (40..=560).step_by(20) {
            for fy in (40..=560).step_by(20) {
                let food = Cell::new(fx, fy);
                if food == head {
                    continue;
                }
                agent.see(&observation(head, food));
                let direction = agent.decide().unwrap();
                let gap = |cell: Cell| {
                    let (dx, dy) = cell.delta_to(food);
                    dx.abs() + dy.abs()
                };
                assert!(
                    gap(head.stepped(direction, 20)) < gap(head),
                    "{:?} from {:?} towards {:?}",
                    direction,
                    head,
                    food
                );
            }
        }
    }

    #[test]
    fn test_uses_own_food() {
        let mut agent = FullyGreedyAgent::new(
            SnakeId::Second,
            Box::new(ScriptedSource::with_flips([true])),
        );
        agent.see(&observation(Cell::new(100, 100), Cell::new(140, 100)));

        // second snake at (300, 500) chases (400, 400)
        assert_eq!(agent.decide().unwrap(), Direction::Right);
    }
}
