use serde::{Deserialize, Serialize};
use std::fmt;

use super::action::Direction;

/// A grid-aligned cell on the board, addressed by its lower-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move cell one step of `cell_size` in a direction
    pub fn stepped(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * cell_size, dy * cell_size)
    }

    /// Signed offset `other - self` on each axis
    pub fn delta_to(&self, other: Cell) -> (i32, i32) {
        (other.x - self.x, other.y - self.y)
    }

    /// Whether the cell lies strictly inside a `board_width` × `board_height`
    /// board, clear of every border
    ///
    /// A cell flush against an edge counts as touching the wall.
    pub fn is_clear_of_walls(&self, cell_size: i32, board_width: i32, board_height: i32) -> bool {
        self.x > 0
            && self.y > 0
            && self.x + cell_size < board_width
            && self.y + cell_size < board_height
    }
}

/// Which of the two snakes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnakeId {
    First,
    Second,
}

impl SnakeId {
    pub const BOTH: [SnakeId; 2] = [SnakeId::First, SnakeId::Second];

    pub fn index(self) -> usize {
        match self {
            SnakeId::First => 0,
            SnakeId::Second => 1,
        }
    }

    pub fn opponent(self) -> SnakeId {
        match self {
            SnakeId::First => SnakeId::Second,
            SnakeId::Second => SnakeId::First,
        }
    }

    /// 1-based lane number, also used for the starting row
    pub fn number(self) -> i32 {
        self.index() as i32 + 1
    }
}

impl fmt::Display for SnakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "snake {}", self.number())
    }
}

/// Identity of a food item; a fresh id is issued every time food is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoodId(pub u64);

/// A food item targeted exclusively by its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub id: FoodId,
    pub owner: SnakeId,
    pub cell: Cell,
}

/// Terminal reason for a snake's elimination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeathCause {
    /// Head touched or crossed the board edge
    Wall,
    /// Head ran into its own body
    #[serde(rename = "SELF")]
    SelfCollision,
    /// Head ran into the other snake
    Snake,
    /// Episode hit the step cap
    MaxSteps,
}

impl DeathCause {
    pub const ALL: [DeathCause; 4] = [
        DeathCause::Wall,
        DeathCause::SelfCollision,
        DeathCause::Snake,
        DeathCause::MaxSteps,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DeathCause::Wall => "WALL",
            DeathCause::SelfCollision => "SELF",
            DeathCause::Snake => "SNAKE",
            DeathCause::MaxSteps => "MAX_STEPS",
        }
    }
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One snake on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub id: SnakeId,
    /// Body segments, with head at index 0
    pub body: Vec<Cell>,
    /// Direction of the most recent move
    pub direction: Direction,
    /// Set once the snake is eliminated
    pub death: Option<DeathCause>,
    /// Food this snake is currently chasing
    pub target: Option<FoodId>,
    /// Cell given up by the tail on the last move
    vacated: Option<Cell>,
}

impl Snake {
    /// Create a snake whose body trails behind `head`, opposite to `direction`
    pub fn new(
        id: SnakeId,
        head: Cell,
        direction: Direction,
        length: usize,
        cell_size: i32,
    ) -> Self {
        let mut body = vec![head];
        let back = direction.opposite();

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.stepped(back, cell_size));
        }

        Self {
            id,
            body,
            direction,
            death: None,
            target: None,
            vacated: None,
        }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_cells(id: SnakeId, body: Vec<Cell>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "a snake needs at least a head");
        Self {
            id,
            body,
            direction,
            death: None,
            target: None,
            vacated: None,
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Second segment, if the snake has one
    pub fn neck(&self) -> Option<Cell> {
        self.body.get(1).copied()
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Ordered body cells, head first
    pub fn body_position(&self) -> &[Cell] {
        &self.body
    }

    /// Shift every segment into the one ahead of it, then step the head
    ///
    /// No reversal check is made; turning back into the neck is allowed and
    /// is caught later as a self-collision.
    pub fn apply_move(&mut self, direction: Direction, cell_size: i32) {
        self.vacated = Some(self.tail());
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }
        self.body[0] = self.body[0].stepped(direction, cell_size);
        self.direction = direction;
    }

    /// Append a tail segment where the tail was before the last move
    pub fn grow(&mut self) {
        let cell = self.vacated.take().unwrap_or_else(|| self.tail());
        self.body.push(cell);
    }

    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }
}

/// Complete state of one episode
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snakes: [Snake; 2],
    pub foods: [Food; 2],
    pub board_width: i32,
    pub board_height: i32,
    pub cell_size: i32,
    /// Food eaten by either snake
    pub score: u32,
    pub steps: u32,
    pub game_over: bool,
}

impl GameState {
    /// Create a state where each snake targets the food it owns
    pub fn new(
        mut snakes: [Snake; 2],
        foods: [Food; 2],
        board_width: i32,
        board_height: i32,
        cell_size: i32,
    ) -> Self {
        for (snake, food) in snakes.iter_mut().zip(foods.iter()) {
            debug_assert_eq!(snake.id, food.owner);
            snake.target = Some(food.id);
        }

        Self {
            snakes,
            foods,
            board_width,
            board_height,
            cell_size,
            score: 0,
            steps: 0,
            game_over: false,
        }
    }

    pub fn snake(&self, id: SnakeId) -> &Snake {
        &self.snakes[id.index()]
    }

    pub fn snake_mut(&mut self, id: SnakeId) -> &mut Snake {
        &mut self.snakes[id.index()]
    }

    pub fn food(&self, id: SnakeId) -> &Food {
        &self.foods[id.index()]
    }

    /// Whether a head on `cell` survives the walls
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.is_clear_of_walls(self.cell_size, self.board_width, self.board_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: i32 = 20;

    fn snake_at(x: i32, y: i32, direction: Direction, length: usize) -> Snake {
        Snake::new(SnakeId::First, Cell::new(x, y), direction, length, C)
    }

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(100, 100);
        assert_eq!(cell.stepped(Direction::Right, C), Cell::new(120, 100));
        assert_eq!(cell.stepped(Direction::Left, C), Cell::new(80, 100));
        assert_eq!(cell.stepped(Direction::Up, C), Cell::new(100, 120));
        assert_eq!(cell.stepped(Direction::Down, C), Cell::new(100, 80));
        assert_eq!(cell.delta_to(Cell::new(140, 60)), (40, -40));
    }

    #[test]
    fn test_snake_creation() {
        let snake = snake_at(120, 180, Direction::Right, 7);
        assert_eq!(snake.body.len(), 7);
        assert_eq!(snake.head(), Cell::new(120, 180));
        assert_eq!(snake.neck(), Some(Cell::new(100, 180)));
        assert_eq!(snake.tail(), Cell::new(0, 180));
        assert!(snake.is_alive());
    }

    #[test]
    fn test_apply_move_cascades_segments() {
        let mut snake = snake_at(100, 100, Direction::Right, 3);

        snake.apply_move(Direction::Up, C);
        assert_eq!(
            snake.body,
            vec![Cell::new(100, 120), Cell::new(100, 100), Cell::new(80, 100)]
        );
        assert_eq!(snake.direction, Direction::Up);
        assert_eq!(snake.body.len(), 3);
    }

    #[test]
    fn test_grow_reuses_vacated_tail() {
        let mut snake = snake_at(100, 100, Direction::Right, 3);
        snake.apply_move(Direction::Right, C);
        snake.grow();

        assert_eq!(snake.body.len(), 4);
        assert_eq!(snake.tail(), Cell::new(60, 100));
    }

    #[test]
    fn test_reversal_lands_on_body() {
        let mut snake = snake_at(100, 100, Direction::Right, 3);
        snake.apply_move(Direction::Left, C);

        assert_eq!(snake.head(), Cell::new(80, 100));
        assert_eq!(snake.body[2], Cell::new(80, 100));
        assert_ne!(snake.neck(), Some(snake.head()));
        assert!(snake.body[1..].contains(&snake.head()));
    }

    #[test]
    fn test_single_segment_snake_has_no_neck() {
        let mut snake = snake_at(100, 100, Direction::Right, 1);
        assert_eq!(snake.neck(), None);
        snake.apply_move(Direction::Left, C);
        assert_eq!(snake.head(), Cell::new(80, 100));
        assert_eq!(snake.body, vec![Cell::new(80, 100)]);
    }

    #[test]
    fn test_death_cause_labels() {
        assert_eq!(DeathCause::SelfCollision.to_string(), "SELF");
        assert_eq!(
            serde_json::to_string(&DeathCause::MaxSteps).unwrap(),
            "\"MAX_STEPS\""
        );
        assert_eq!(
            serde_json::to_string(&DeathCause::SelfCollision).unwrap(),
            "\"SELF\""
        );
    }

    #[test]
    fn test_bounds_checking() {
        let snakes = [
            snake_at(100, 100, Direction::Right, 3),
            Snake::new(SnakeId::Second, Cell::new(100, 300), Direction::Right, 3, C),
        ];
        let foods = [
            Food {
                id: FoodId(0),
                owner: SnakeId::First,
                cell: Cell::new(200, 200),
            },
            Food {
                id: FoodId(1),
                owner: SnakeId::Second,
                cell: Cell::new(300, 300),
            },
        ];
        let state = GameState::new(snakes, foods, 600, 600, C);

        // one cell in from every edge is the outermost safe ring
        assert!(state.is_in_bounds(Cell::new(20, 20)));
        assert!(state.is_in_bounds(Cell::new(560, 560)));
        assert!(state.is_in_bounds(Cell::new(20, 560)));
        assert!(state.is_in_bounds(Cell::new(560, 20)));

        // touching an edge
        assert!(!state.is_in_bounds(Cell::new(0, 300)));
        assert!(!state.is_in_bounds(Cell::new(580, 300)));
        assert!(!state.is_in_bounds(Cell::new(300, 0)));
        assert!(!state.is_in_bounds(Cell::new(300, 580)));

        // past an edge
        assert!(!state.is_in_bounds(Cell::new(-20, 300)));
        assert!(!state.is_in_bounds(Cell::new(300, 600)));
    }
}
