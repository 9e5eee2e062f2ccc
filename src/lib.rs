//! Grid Snake - a fixed-timestep Snake simulation with a terminal host
//!
//! This library provides:
//! - Core simulation: grid, step clock, snake state machine, food placement (game module)
//! - Input mapping from keys and mouse drags to game commands (input module)
//! - TUI rendering of session snapshots (render module)
//! - In-process session stats (metrics module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
