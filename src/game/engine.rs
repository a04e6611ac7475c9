use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{
    action::Direction,
    config::GameConfig,
    index::{BoardIndex, Occupant},
    state::{Cell, DeathCause, Food, FoodId, GameState, Snake, SnakeId},
};

/// Information about a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether each snake ate its own food this tick
    pub ate_food: [bool; 2],
    /// Death recorded for each snake this tick
    pub deaths: [Option<DeathCause>; 2],
}

/// Result of a game tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Per-snake reward; the simulation does not shape rewards, so these stay zero
    pub rewards: [f32; 2],
    /// Whether the episode has terminated
    pub terminated: bool,
    /// Additional information about the tick
    pub info: StepInfo,
}

impl StepResult {
    fn finished(info: StepInfo) -> Self {
        Self {
            rewards: [0.0; 2],
            terminated: true,
            info,
        }
    }
}

/// What a snake's head touched after both snakes moved
#[derive(Debug, Clone, Copy, Default)]
struct Contacts {
    ate_food: bool,
    death: Option<DeathCause>,
}

/// Applies moves, resolves contacts and places food
///
/// The engine owns the board's randomness; seeding it makes an episode
/// reproducible.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    next_food_id: u64,
}

impl GameEngine {
    /// Create an engine with a fixed seed
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            next_food_id: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Lay out both snakes in their starting lanes and give each a food target
    pub fn reset(&mut self) -> GameState {
        let c = self.config.cell_size;
        let head_x = (self.config.initial_snake_length as i32 - 1) * c;

        let snakes = SnakeId::BOTH.map(|id| {
            Snake::new(
                id,
                Cell::new(head_x, self.config.lane_y(id.number())),
                Direction::Right,
                self.config.initial_snake_length,
                c,
            )
        });
        let foods = SnakeId::BOTH.map(|id| self.place_food(id));

        GameState::new(
            snakes,
            foods,
            self.config.board_width,
            self.config.board_height,
            c,
        )
    }

    /// Pick a random interior cell for a new food owned by `owner`
    ///
    /// Cells are drawn from `[2c, extent - c)` on each axis. The draw is not
    /// retried, so food may land on a snake or on the other food.
    pub fn place_food(&mut self, owner: SnakeId) -> Food {
        let x = self.random_interior(self.config.board_width);
        let y = self.random_interior(self.config.board_height);
        let id = FoodId(self.next_food_id);
        self.next_food_id += 1;

        debug!(%owner, x, y, food = id.0, "placed food");
        Food {
            id,
            owner,
            cell: Cell::new(x, y),
        }
    }

    fn random_interior(&mut self, extent: i32) -> i32 {
        let c = self.config.cell_size;
        let slots = (extent - 3 * c + c - 1) / c;
        2 * c + self.rng.gen_range(0..slots.max(1)) * c
    }

    /// Execute one tick: move both snakes, then resolve contacts
    pub fn step(&mut self, state: &mut GameState, directions: [Direction; 2]) -> StepResult {
        if state.game_over {
            return StepResult::finished(StepInfo::default());
        }

        for (snake, direction) in state.snakes.iter_mut().zip(directions) {
            snake.apply_move(direction, self.config.cell_size);
        }
        state.steps += 1;

        let info = self.resolve_collisions(state);

        if state.snakes.iter().any(|snake| !snake.is_alive()) {
            state.game_over = true;
        } else if state.steps >= self.config.max_steps {
            for snake in state.snakes.iter_mut() {
                snake.death = Some(DeathCause::MaxSteps);
            }
            state.game_over = true;
        }

        StepResult {
            rewards: [0.0; 2],
            terminated: state.game_over,
            info,
        }
    }

    /// Check both heads against the post-move board and apply the outcomes
    ///
    /// Both snakes are judged on the same snapshot. Eating is applied before
    /// deaths, and a snake can do both in one tick.
    pub fn resolve_collisions(&mut self, state: &mut GameState) -> StepInfo {
        let index = BoardIndex::build(state);
        let contacts = SnakeId::BOTH.map(|id| Self::inspect(state, &index, id));

        let mut info = StepInfo::default();
        for id in SnakeId::BOTH {
            let found = contacts[id.index()];

            if found.ate_food {
                self.consume_food(state, id);
                info.ate_food[id.index()] = true;
            }

            if let Some(cause) = found.death {
                let snake = state.snake_mut(id);
                if snake.is_alive() {
                    debug!(%id, %cause, head = ?snake.head(), "snake died");
                    snake.death = Some(cause);
                    info.deaths[id.index()] = Some(cause);
                }
            }
        }

        info
    }

    fn inspect(state: &GameState, index: &BoardIndex, id: SnakeId) -> Contacts {
        let snake = state.snake(id);
        let head = snake.head();
        let mut contacts = Contacts::default();

        if !state.is_in_bounds(head) {
            contacts.death = Some(DeathCause::Wall);
        }

        for occupant in index.at(head) {
            match *occupant {
                Occupant::Food { owner, id: food } if owner == id => {
                    contacts.ate_food = snake.target == Some(food);
                }
                Occupant::Food { .. } => {}
                Occupant::Segment { owner, index } if owner == id => {
                    if index > 0 && contacts.death != Some(DeathCause::Snake) {
                        contacts.death = Some(DeathCause::SelfCollision);
                    }
                }
                Occupant::Segment { .. } => {
                    contacts.death = Some(DeathCause::Snake);
                }
            }
        }

        contacts
    }

    fn consume_food(&mut self, state: &mut GameState, id: SnakeId) {
        let replacement = self.place_food(id);
        state.foods[id.index()] = replacement;
        state.score += 1;

        let snake = state.snake_mut(id);
        snake.grow();
        snake.target = Some(replacement.id);
        debug!(%id, score = state.score, "ate food");
    }
}
