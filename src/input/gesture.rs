use crate::game::Direction;

/// Smallest drag, in terminal columns, that counts as a swipe
pub const SWIPE_MIN: i32 = 2;

/// Terminal rows are roughly twice as tall as columns are wide
const ROW_ASPECT: i32 = 2;

/// Direction of a drag along its dominant axis
///
/// Drags shorter than `threshold` on both axes are taps and yield `None`.
/// Ties go to the vertical axis.
pub fn swipe_direction(dx: i32, dy: i32, threshold: i32) -> Option<Direction> {
    if dx.abs() < threshold && dy.abs() < threshold {
        return None;
    }

    if dx.abs() > dy.abs() {
        Some(if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        Some(if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

/// Turns mouse press/release pairs into swipe directions
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, column: u16, row: u16) {
        self.start = Some((column, row));
    }

    pub fn release(&mut self, column: u16, row: u16) -> Option<Direction> {
        let (start_col, start_row) = self.start.take()?;
        let dx = i32::from(column) - i32::from(start_col);
        let dy = (i32::from(row) - i32::from(start_row)) * ROW_ASPECT;
        swipe_direction(dx, dy, SWIPE_MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_axis() {
        assert_eq!(swipe_direction(10, 3, 2), Some(Direction::Right));
        assert_eq!(swipe_direction(-10, 3, 2), Some(Direction::Left));
        assert_eq!(swipe_direction(1, 8, 2), Some(Direction::Down));
        assert_eq!(swipe_direction(1, -8, 2), Some(Direction::Up));
    }

    #[test]
    fn test_short_drag_is_tap() {
        assert_eq!(swipe_direction(1, -1, 2), None);
        assert_eq!(swipe_direction(0, 0, 2), None);
    }

    #[test]
    fn test_tracker_pairs_press_and_release() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(tracker.release(10, 10), None);

        tracker.press(10, 10);
        assert_eq!(tracker.release(20, 11), Some(Direction::Right));
        assert_eq!(tracker.release(20, 11), None);

        // Two rows up outweighs three columns across.
        tracker.press(10, 10);
        assert_eq!(tracker.release(13, 8), Some(Direction::Up));
    }
}
