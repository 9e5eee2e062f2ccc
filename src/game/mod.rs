//! Core simulation for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Hosts feed it frame timestamps and input commands and read [`Session`] back.

pub mod action;
pub mod clock;
pub mod config;
pub mod engine;
pub mod food;
pub mod frame;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use clock::StepClock;
pub use config::{GameConfig, SpeedLevel};
pub use engine::{GameEngine, TickOutcome, START_DIRECTION};
pub use food::place_food;
pub use frame::{FrameLoop, FrameReport};
pub use grid::Grid;
pub use state::{Cell, ResetReason, Session, Snake};
