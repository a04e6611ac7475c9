use serde::Serialize;

use crate::game::{Axis, Cell, Direction, GameState, SnakeId};

/// Read-only snapshot handed to policies each tick
///
/// Holds both bodies (head first), both food cells and the board geometry.
/// Policies never see the live [`GameState`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub snakes: [Vec<Cell>; 2],
    pub foods: [Cell; 2],
    pub cell_size: i32,
    pub board_width: i32,
    pub board_height: i32,
}

/// Capture the positions a policy is allowed to see
pub fn create_observation(state: &GameState) -> Observation {
    Observation {
        snakes: [
            state.snakes[0].body_position().to_vec(),
            state.snakes[1].body_position().to_vec(),
        ],
        foods: [state.foods[0].cell, state.foods[1].cell],
        cell_size: state.cell_size,
        board_width: state.board_width,
        board_height: state.board_height,
    }
}

impl Observation {
    pub fn body(&self, id: SnakeId) -> &[Cell] {
        &self.snakes[id.index()]
    }

    pub fn head(&self, id: SnakeId) -> Cell {
        self.snakes[id.index()][0]
    }

    pub fn neck(&self, id: SnakeId) -> Option<Cell> {
        self.snakes[id.index()].get(1).copied()
    }

    pub fn food(&self, id: SnakeId) -> Cell {
        self.foods[id.index()]
    }

    /// Whether a head on `cell` would stay clear of the walls
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.is_clear_of_walls(self.cell_size, self.board_width, self.board_height)
    }

    /// Whether any segment of `other` sits one cell from `id`'s head along `axis`
    pub fn is_adjacent(&self, id: SnakeId, other: SnakeId, axis: Axis) -> bool {
        let head = self.head(id);
        let (plus, minus) = (
            head.stepped(axis.positive(), self.cell_size),
            head.stepped(axis.negative(), self.cell_size),
        );
        self.body(other)
            .iter()
            .any(|&segment| segment == plus || segment == minus)
    }

    /// Direction `id` moved last tick along `axis`, read from head and neck
    pub fn heading_along(&self, id: SnakeId, axis: Axis) -> Option<Direction> {
        let neck = self.neck(id)?;
        let head = self.head(id);
        [axis.positive(), axis.negative()]
            .into_iter()
            .find(|&direction| neck.stepped(direction, self.cell_size) == head)
    }
}
