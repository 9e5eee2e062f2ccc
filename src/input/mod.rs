pub mod gesture;
pub mod handler;

pub use gesture::{SwipeTracker, swipe_direction};
pub use handler::{InputHandler, KeyAction};
