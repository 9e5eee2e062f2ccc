use super::config::GameConfig;
use super::state::Cell;

/// Playable area measured in whole tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub cols: u32,
    pub rows: u32,
    /// Side of one tile in pixels
    pub tile_size: u32,
}

impl Grid {
    pub fn new(cols: u32, rows: u32, tile_size: u32) -> Self {
        Self {
            cols,
            rows,
            tile_size,
        }
    }

    /// Fit the grid to a pixel viewport
    ///
    /// Keeps the largest whole number of tiles that fits on each axis, but
    /// never less than the configured minimum.
    pub fn from_viewport(width_px: u32, height_px: u32, config: &GameConfig) -> Self {
        let tile = config.tile_size.max(1);
        Self {
            cols: (width_px / tile).max(config.min_cols),
            rows: (height_px / tile).max(config.min_rows),
            tile_size: tile,
        }
    }

    pub fn width_px(&self) -> u32 {
        self.cols.saturating_mul(self.tile_size)
    }

    pub fn height_px(&self) -> u32 {
        self.rows.saturating_mul(self.tile_size)
    }

    /// Number of cells on the board
    pub fn area(&self) -> u64 {
        u64::from(self.cols) * u64::from(self.rows)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.col >= 0
            && cell.col < self.cols as i32
            && cell.row >= 0
            && cell.row < self.rows as i32
    }

    /// The cell a fresh snake starts on
    pub fn center(&self) -> Cell {
        Cell::new((self.cols / 2) as i32, (self.rows / 2) as i32)
    }

    /// Food margin reduced until at least one column and one row remain
    pub fn clamp_margin(&self, margin: u32) -> u32 {
        let max_x = self.cols.saturating_sub(1) / 2;
        let max_y = self.rows.saturating_sub(1) / 2;
        margin.min(max_x).min(max_y)
    }

    /// Inclusive (min, max) corners of the area food may occupy
    pub fn food_bounds(&self, margin: u32) -> (Cell, Cell) {
        let m = self.clamp_margin(margin) as i32;
        (
            Cell::new(m, m),
            Cell::new(self.cols as i32 - 1 - m, self.rows as i32 - 1 - m),
        )
    }
}
