use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{Command, FrameLoop, GameConfig};
use crate::input::{InputHandler, KeyAction, SwipeTracker};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, viewport_for_area};

/// How long the tongue stays out after a meal
const TONGUE_MS: f64 = 140.0;

/// Frame driver period, roughly 60 FPS
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct HumanMode {
    game: FrameLoop,
    tile_size: u32,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    swipe: SwipeTracker,
    started: Instant,
    tongue_until_ms: f64,
    should_quit: bool,
}

impl HumanMode {
    /// Create the mode for a terminal of `columns` x `rows`
    pub fn new(config: GameConfig, columns: u16, rows: u16) -> Self {
        let tile_size = config.tile_size;
        let (width_px, height_px) = viewport_for_area(Rect::new(0, 0, columns, rows), tile_size);

        Self {
            game: FrameLoop::new(config, width_px, height_px),
            tile_size,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            swipe: SwipeTracker::new(),
            started: Instant::now(),
            tongue_until_ms: 0.0,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let grid = self.game.session().grid;
        tracing::info!(cols = grid.cols, rows = grid.rows, "game started");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The frame timer is the frame driver; the step clock decides
        // how many ticks each frame runs.
        let mut frame_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Simulate and render one frame
                _ = frame_timer.tick() => {
                    self.draw_frame(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn draw_frame(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let now = self.now_ms();
        let score_before = self.game.session().score;
        let Self {
            game,
            metrics,
            renderer,
            tongue_until_ms,
            ..
        } = self;

        let mut drawn = Ok(());
        game.frame(now, |session, clock, report| {
            if report.ate() {
                *tongue_until_ms = now + TONGUE_MS;
            }
            let final_score = report.meals.iter().copied().fold(score_before, u32::max);
            for _ in &report.resets {
                metrics.on_reset(final_score);
                *tongue_until_ms = 0.0;
            }
            metrics.update(session.score);
            let metrics: &GameMetrics = metrics;

            let tongue_out = now < *tongue_until_ms;
            drawn = terminal
                .draw(|frame| renderer.render(frame, session, clock, metrics, tongue_out))
                .map(|_| ());
        });

        drawn.context("Failed to draw frame")
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Game(command) => self.apply(command),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => self.swipe.press(mouse.column, mouse.row),
                MouseEventKind::Up(MouseButton::Left) => {
                    if let Some(direction) = self.swipe.release(mouse.column, mouse.row) {
                        self.apply(Command::Turn(direction));
                    }
                }
                _ => {}
            },
            Event::Resize(columns, rows) => {
                let (width_px, height_px) =
                    viewport_for_area(Rect::new(0, 0, columns, rows), self.tile_size);
                let before = self.game.session().grid;
                let score = self.game.session().score;
                self.game.resize(width_px, height_px);
                // Dragging a window edge sends many events for one new board.
                if self.game.session().grid != before {
                    self.metrics.on_reset(score);
                }
            }
            _ => {}
        }
    }

    fn apply(&mut self, command: Command) {
        let paused = self.game.session().paused;
        match command {
            // Speed keys are ignored while paused, like movement
            Command::SelectSpeed(_) if paused => {}
            Command::Restart => {
                self.metrics.on_reset(self.game.session().score);
                self.game.apply(command);
            }
            _ => self.game.apply(command),
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
