//! Food placement
//!
//! Food is drawn uniformly from the margin rectangle and redrawn while it
//! lands on the snake. Sampling is capped so a nearly full board falls back
//! to choosing among the cells that are actually free. When the rectangle
//! has no free cell at all, the margin shrinks one tile at a time down to
//! the whole grid.

use rand::Rng;

use super::grid::Grid;
use super::state::{Cell, Snake};

/// Random draws per cell of the margin rectangle before enumerating
const SAMPLES_PER_CELL: u64 = 4;

/// Pick a food cell off the snake, as far inside the margin as possible
///
/// Returns `None` only when the snake covers every cell of the grid.
pub fn place_food<R: Rng + ?Sized>(
    grid: &Grid,
    margin: u32,
    snake: &Snake,
    rng: &mut R,
) -> Option<Cell> {
    let margin = grid.clamp_margin(margin);
    (0..=margin)
        .rev()
        .find_map(|m| place_in_rect(grid.food_bounds(m), snake, &mut *rng))
}

fn place_in_rect<R: Rng + ?Sized>(
    (min, max): (Cell, Cell),
    snake: &Snake,
    rng: &mut R,
) -> Option<Cell> {
    for _ in 0..sample_budget(min, max) {
        let cell = Cell::new(
            rng.gen_range(min.col..=max.col),
            rng.gen_range(min.row..=max.row),
        );
        if !snake.occupies(cell) {
            return Some(cell);
        }
    }

    let free: Vec<Cell> = (min.row..=max.row)
        .flat_map(|row| (min.col..=max.col).map(move |col| Cell::new(col, row)))
        .filter(|&cell| !snake.occupies(cell))
        .collect();

    if free.is_empty() {
        None
    } else {
        Some(free[rng.gen_range(0..free.len())])
    }
}

/// Number of random draws allowed for the inclusive rectangle
fn sample_budget(min: Cell, max: Cell) -> u64 {
    let width = (i64::from(max.col) - i64::from(min.col) + 1).max(0) as u64;
    let height = (i64::from(max.row) - i64::from(min.row) + 1).max(0) as u64;
    width
        .saturating_mul(height)
        .saturating_mul(SAMPLES_PER_CELL)
}
