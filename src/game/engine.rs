use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::Direction,
    config::GameConfig,
    food::place_food,
    grid::Grid,
    state::{Cell, ResetReason, Session, Snake},
};

/// Direction every fresh session starts with
pub const START_DIRECTION: Direction = Direction::Right;

/// What a single tick did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session is paused; nothing changed
    Paused,
    /// Snake moved one tile
    Moved,
    /// Snake moved onto the food and ate it
    Ate { tick: u64, score: u32 },
    /// Session was rebuilt from scratch
    Reset(ResetReason),
}

/// The game engine that handles all game logic
///
/// The engine owns the configuration and the random source; every call
/// takes the [`Session`] it acts on explicitly.
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create an engine seeded from `config.seed`, or from the OS if unset
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine with an explicit random source
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh session on a grid sized to the viewport
    pub fn boot(&mut self, width_px: u32, height_px: u32) -> Session {
        let grid = Grid::from_viewport(width_px, height_px, &self.config);
        self.new_session(grid)
    }

    /// Build the canonical initial session for `grid`
    pub fn new_session(&mut self, grid: Grid) -> Session {
        let snake = Snake::new(grid.center());
        // A one-segment snake leaves a free cell on any grid of two or more
        // cells, and the centre is never (0, 0) on such a grid.
        let food = self.spawn_food(&grid, &snake).unwrap_or(Cell::new(0, 0));
        Session::new(grid, snake, START_DIRECTION, food)
    }

    /// Throw the session away and start over on the same grid
    pub fn reset(&mut self, session: &mut Session, reason: ResetReason) {
        tracing::debug!(?reason, score = session.score, ticks = session.ticks, "session reset");
        *session = self.new_session(session.grid);
    }

    /// Player-requested new game
    pub fn restart(&mut self, session: &mut Session) {
        self.reset(session, ResetReason::Restart);
    }

    /// Refit the grid to a new viewport; always starts a new session
    pub fn resize(&mut self, session: &mut Session, width_px: u32, height_px: u32) {
        let grid = Grid::from_viewport(width_px, height_px, &self.config);
        tracing::debug!(cols = grid.cols, rows = grid.rows, "grid resized");
        session.grid = grid;
        self.reset(session, ResetReason::Resize);
    }

    /// Ask for a turn before the next tick
    ///
    /// Rejected when `direction` reverses the current one, and while paused.
    /// The latest accepted request governs the next tick.
    pub fn request_turn(&self, session: &mut Session, direction: Direction) -> bool {
        if session.paused || session.direction.is_opposite(direction) {
            return false;
        }
        session.direction = direction;
        true
    }

    pub fn toggle_pause(&self, session: &mut Session) {
        self.set_paused(session, !session.paused);
    }

    pub fn set_paused(&self, session: &mut Session, paused: bool) {
        session.paused = paused;
    }

    /// Advance the session by one discrete step
    pub fn tick(&mut self, session: &mut Session) -> TickOutcome {
        if session.paused {
            return TickOutcome::Paused;
        }

        let new_head = session.snake.head().moved_in_direction(session.direction);

        let grow = session.growth_pending > 0;
        if grow {
            session.growth_pending -= 1;
        }
        session.snake.advance(new_head, grow);

        if let Some(reason) = self.check_collision(session, new_head) {
            self.reset(session, reason);
            return TickOutcome::Reset(reason);
        }

        session.ticks += 1;

        if new_head != session.food {
            return TickOutcome::Moved;
        }

        session.score += 1;
        session.growth_pending += 1;
        session.last_meal_tick = Some(session.ticks);
        tracing::trace!(score = session.score, tick = session.ticks, "food eaten");

        match self.spawn_food(&session.grid, &session.snake) {
            Some(food) => {
                session.food = food;
                TickOutcome::Ate {
                    tick: session.ticks,
                    score: session.score,
                }
            }
            None => {
                self.reset(session, ResetReason::BoardFull);
                TickOutcome::Reset(ResetReason::BoardFull)
            }
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, session: &Session, head: Cell) -> Option<ResetReason> {
        if !session.is_in_bounds(head) {
            return Some(ResetReason::Wall);
        }

        if session.snake.collides_with_body(head) {
            return Some(ResetReason::SelfCollision);
        }

        None
    }

    fn spawn_food(&mut self, grid: &Grid, snake: &Snake) -> Option<Cell> {
        place_food(grid, self.config.food_margin, snake, &mut self.rng)
    }
}
