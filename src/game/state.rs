use std::collections::VecDeque;

use super::action::Direction;
use super::grid::Grid;

/// A tile on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }

    /// Move cell one tile in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dcol, drow) = direction.delta();
        self.moved_by(dcol, drow)
    }

    /// Top-left pixel corner of this cell
    pub fn to_pixels(&self, tile_size: u32) -> (i32, i32) {
        let tile = tile_size as i32;
        (self.col * tile, self.row * tile)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Cell>,
}

impl Snake {
    /// A one-segment snake
    pub fn new(head: Cell) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build a snake from explicit segments, head first
    ///
    /// Returns `None` for an empty list since a snake always has a head.
    pub fn from_segments(segments: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = segments.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail cell (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Check if cell collides with snake body (excluding head)
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == cell)
    }

    /// Check if any segment, head included, sits on cell
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Push a new head and trim the tail unless `grow` is set
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);

        if !grow {
            self.body.pop_back();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept for the `len` convention
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a session was thrown away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// No free cell was left for food
    BoardFull,
    /// The viewport changed size
    Resize,
    /// The player asked for a new game
    Restart,
}

/// One complete round of play
///
/// Created on boot and rebuilt from scratch on every reset. Only
/// [`GameEngine`](super::GameEngine) mutates it; renderers read it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub grid: Grid,
    pub snake: Snake,
    pub direction: Direction,
    pub food: Cell,
    pub score: u32,
    /// Ticks for which the tail is kept instead of trimmed
    pub growth_pending: u32,
    pub paused: bool,
    /// Ticks advanced since this session started
    pub ticks: u64,
    /// Tick on which food was last eaten
    pub last_meal_tick: Option<u64>,
}

impl Session {
    pub fn new(grid: Grid, snake: Snake, direction: Direction, food: Cell) -> Self {
        Self {
            grid,
            snake,
            direction,
            food,
            score: 0,
            growth_pending: 0,
            paused: false,
            ticks: 0,
            last_meal_tick: None,
        }
    }

    /// Check if a cell is within the grid bounds
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        self.grid.contains(cell)
    }

    /// True when the meal happened on the latest tick
    pub fn just_ate(&self) -> bool {
        self.ticks > 0 && self.last_meal_tick == Some(self.ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_by(-1, 0), Cell::new(4, 5));
        assert_eq!(cell.moved_in_direction(Direction::Down), Cell::new(5, 6));
        assert_eq!(cell.moved_in_direction(Direction::Up), Cell::new(5, 4));
    }

    #[test]
    fn test_cell_to_pixels() {
        assert_eq!(Cell::new(3, 2).to_pixels(20), (60, 40));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Cell::new(5, 4));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell::new(5, 4));
        assert_eq!(snake.tail(), Cell::new(5, 4));
        assert!(Snake::from_segments(Vec::new()).is_none());
    }

    #[test]
    fn test_snake_advance() {
        let mut snake =
            Snake::from_segments([Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]).unwrap();

        snake.advance(Cell::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.tail(), Cell::new(4, 5));

        snake.advance(Cell::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Cell::new(4, 5));
    }

    #[test]
    fn test_collision_detection() {
        let snake =
            Snake::from_segments([Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]).unwrap();
        assert!(!snake.collides_with_body(Cell::new(5, 5))); // head
        assert!(snake.collides_with_body(Cell::new(4, 5)));
        assert!(!snake.collides_with_body(Cell::new(10, 10)));
        assert!(snake.occupies(Cell::new(5, 5)));
    }

    #[test]
    fn test_just_ate() {
        let grid = Grid::new(10, 8, 20);
        let mut session = Session::new(grid, Snake::new(grid.center()), Direction::Right, Cell::new(3, 3));
        assert!(!session.just_ate());

        session.ticks = 4;
        session.last_meal_tick = Some(4);
        assert!(session.just_ate());

        session.ticks = 5;
        assert!(!session.just_ate());
    }
}
