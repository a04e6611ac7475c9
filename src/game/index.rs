//! Cell → occupant lookup used for collision resolution

use std::collections::HashMap;

use super::state::{Cell, FoodId, GameState, SnakeId};

/// What sits on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    /// Body segment `index` of `owner` (0 is the head)
    Segment { owner: SnakeId, index: usize },
    /// Food item owned by `owner`
    Food { owner: SnakeId, id: FoodId },
}

/// Snapshot of every occupied cell on the board
///
/// Several occupants may share a cell after a tick (a head on food, two heads
/// meeting), so each cell maps to a list.
#[derive(Debug, Default)]
pub struct BoardIndex {
    cells: HashMap<Cell, Vec<Occupant>>,
}

impl BoardIndex {
    pub fn build(state: &GameState) -> Self {
        let mut index = Self::default();

        for snake in &state.snakes {
            for (i, &cell) in snake.body.iter().enumerate() {
                index.insert(
                    cell,
                    Occupant::Segment {
                        owner: snake.id,
                        index: i,
                    },
                );
            }
        }
        for food in &state.foods {
            index.insert(
                food.cell,
                Occupant::Food {
                    owner: food.owner,
                    id: food.id,
                },
            );
        }

        index
    }

    fn insert(&mut self, cell: Cell, occupant: Occupant) {
        self.cells.entry(cell).or_default().push(occupant);
    }

    /// Everything on `cell`, in insertion order (segments, then food)
    pub fn at(&self, cell: Cell) -> &[Occupant] {
        self.cells.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Food, Snake};

    #[test]
    fn test_index_lists_all_occupants() {
        let first = Snake::new(SnakeId::First, Cell::new(100, 100), Direction::Right, 3, 20);
        let second = Snake::new(SnakeId::Second, Cell::new(60, 140), Direction::Down, 3, 20);
        let foods = [
            Food {
                id: FoodId(1),
                owner: SnakeId::First,
                cell: Cell::new(100, 100),
            },
            Food {
                id: FoodId(2),
                owner: SnakeId::Second,
                cell: Cell::new(300, 300),
            },
        ];
        let state = GameState::new([first, second], foods, 600, 600, 20);
        let index = BoardIndex::build(&state);

        assert_eq!(
            index.at(Cell::new(100, 100)),
            &[
                Occupant::Segment {
                    owner: SnakeId::First,
                    index: 0
                },
                Occupant::Food {
                    owner: SnakeId::First,
                    id: FoodId(1)
                },
            ]
        );
        // second snake trails upward from (60, 140): (60, 160), (60, 180)
        assert_eq!(
            index.at(Cell::new(60, 180)),
            &[Occupant::Segment {
                owner: SnakeId::Second,
                index: 2
            }]
        );
        assert!(index.at(Cell::new(500, 500)).is_empty());
    }
}
