use rand::rngs::StdRng;
use rand::Rng;

use super::{
    action::Command,
    clock::StepClock,
    config::GameConfig,
    engine::{GameEngine, TickOutcome},
    state::{ResetReason, Session},
};

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Ticks the clock fired, paused ones included
    pub ticks: u32,
    /// Scores reached by meals this frame
    pub meals: Vec<u32>,
    /// Resets triggered by ticks this frame
    pub resets: Vec<ResetReason>,
}

impl FrameReport {
    pub fn ate(&self) -> bool {
        !self.meals.is_empty()
    }
}

/// Per-frame entry point tying the clock, engine and session together
pub struct FrameLoop<R: Rng = StdRng> {
    engine: GameEngine<R>,
    session: Session,
    clock: StepClock,
}

impl FrameLoop<StdRng> {
    pub fn new(config: GameConfig, width_px: u32, height_px: u32) -> Self {
        Self::with_engine(GameEngine::new(config), width_px, height_px)
    }
}

impl<R: Rng> FrameLoop<R> {
    pub fn with_engine(mut engine: GameEngine<R>, width_px: u32, height_px: u32) -> Self {
        let config = engine.config();
        let clock = StepClock::new(config.speeds.clone(), config.default_speed);
        let session = engine.boot(width_px, height_px);
        Self {
            engine,
            session,
            clock,
        }
    }

    /// Run every tick due at `now_ms`, then render exactly once
    pub fn frame<F>(&mut self, now_ms: f64, render: F) -> FrameReport
    where
        F: FnOnce(&Session, &StepClock, &FrameReport),
    {
        let mut report = FrameReport::default();
        let engine = &mut self.engine;
        let session = &mut self.session;

        let ticks = self.clock.advance(now_ms, || match engine.tick(session) {
            TickOutcome::Ate { score, .. } => report.meals.push(score),
            TickOutcome::Reset(reason) => report.resets.push(reason),
            TickOutcome::Moved | TickOutcome::Paused => {}
        });
        report.ticks = ticks;

        render(&self.session, &self.clock, &report);
        report
    }

    /// Apply an input command between frames
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Turn(direction) => {
                self.engine.request_turn(&mut self.session, direction);
            }
            Command::TogglePause => self.engine.toggle_pause(&mut self.session),
            Command::SelectSpeed(index) => {
                self.clock.select_speed(index);
            }
            Command::Restart => self.engine.restart(&mut self.session),
        }
    }

    /// The viewport changed size
    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        self.engine.resize(&mut self.session, width_px, height_px);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn clock(&self) -> &StepClock {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, SpeedLevel};

    /// 10x8 grid, one tick every 100 ms
    fn frame_loop() -> FrameLoop {
        let config = GameConfig {
            seed: Some(99),
            speeds: vec![SpeedLevel::new("Ten", 10.0), SpeedLevel::new("Twenty", 20.0)],
            default_speed: 0,
            ..Default::default()
        };
        FrameLoop::new(config, 200, 160)
    }

    #[test]
    fn test_render_once_per_frame() {
        let mut game = frame_loop();
        let mut renders = 0;

        let report = game.frame(0.0, |_, _, _| renders += 1);
        assert_eq!(report.ticks, 0);

        let report = game.frame(350.0, |_, _, report| {
            renders += 1;
            assert_eq!(report.ticks, 3);
        });
        assert_eq!(report.ticks, 3);

        let report = game.frame(360.0, |_, _, _| renders += 1);
        assert_eq!(report.ticks, 0);
        assert_eq!(renders, 3);
    }

    #[test]
    fn test_ticks_move_snake() {
        let mut game = frame_loop();
        game.session.food = Cell::new(3, 3);
        game.frame(0.0, |_, _, _| {});
        game.frame(200.0, |session, _, _| {
            assert_eq!(session.snake.head(), Cell::new(7, 4));
        });
    }

    #[test]
    fn test_paused_frames_still_accumulate() {
        let mut game = frame_loop();
        game.frame(0.0, |_, _, _| {});
        game.apply(Command::TogglePause);

        let head = game.session().snake.head();
        let report = game.frame(250.0, |_, _, _| {});
        assert_eq!(report.ticks, 2);
        assert_eq!(game.session().snake.head(), head);
        assert!((game.clock().pending_ms() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_commands_route_through_guards() {
        let mut game = frame_loop();
        game.apply(Command::Turn(Direction::Left));
        assert_eq!(game.session().direction, Direction::Right);

        game.apply(Command::Turn(Direction::Down));
        assert_eq!(game.session().direction, Direction::Down);

        game.apply(Command::SelectSpeed(1));
        assert_eq!(game.clock().speed().label, "Twenty");

        game.apply(Command::SelectSpeed(5));
        assert_eq!(game.clock().speed().label, "Twenty");
    }

    #[test]
    fn test_meal_and_reset_reported() {
        let mut game = frame_loop();
        game.session.food = Cell::new(6, 4);
        game.frame(0.0, |_, _, _| {});

        // Meal on the first tick, then Right runs into the wall at col 10.
        let report = game.frame(500.0, |_, _, _| {});
        assert_eq!(report.meals, vec![1]);
        assert!(report.ate());
        assert_eq!(report.resets, vec![ResetReason::Wall]);
        assert_eq!(game.session().score, 0);
    }

    #[test]
    fn test_resize_and_restart() {
        let mut game = frame_loop();
        game.resize(1000, 600);
        assert_eq!(game.session().grid.cols, 50);
        assert_eq!(game.session().snake.head(), Cell::new(25, 15));

        game.session.score = 4;
        game.apply(Command::Restart);
        assert_eq!(game.session().score, 0);
        assert_eq!(game.session().grid.rows, 30);
    }
}
