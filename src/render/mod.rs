pub mod renderer;

pub use renderer::{Renderer, viewport_for_area};
