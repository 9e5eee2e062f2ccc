use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Cell, Direction, Session, StepClock};
use crate::metrics::GameMetrics;

/// Snake colors, advancing every few points
const PALETTE: [(u8, u8, u8); 6] = [
    (0, 200, 80),
    (0, 180, 220),
    (255, 180, 0),
    (180, 80, 200),
    (200, 70, 70),
    (80, 200, 160),
];

const POINTS_PER_COLOR: u32 = 3;

const HEADER_ROWS: u16 = 3;
const FOOTER_ROWS: u16 = 3;
/// Terminal columns per tile
const TILE_COLUMNS: u16 = 2;

/// Palette slot for a score
pub fn palette_index(score: u32) -> usize {
    (score / POINTS_PER_COLOR) as usize % PALETTE.len()
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

fn darker((r, g, b): (u8, u8, u8)) -> Color {
    let scale = |c: u8| (f32::from(c) * 0.8).round() as u8;
    Color::Rgb(scale(r), scale(g), scale(b))
}

/// Pixel viewport the grid may fill inside a terminal of size `area`
///
/// One tile is drawn as two columns by one row.
pub fn viewport_for_area(area: Rect, tile_size: u32) -> (u32, u32) {
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(HEADER_ROWS + FOOTER_ROWS + 2);
    let cols = u32::from(inner_width / TILE_COLUMNS);
    let rows = u32::from(inner_height);
    (cols * tile_size, rows * tile_size)
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame; `tongue_out` is set shortly after a meal
    pub fn render(
        &self,
        frame: &mut Frame,
        session: &Session,
        clock: &StepClock,
        metrics: &GameMetrics,
        tongue_out: bool,
    ) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(HEADER_ROWS), // Header
                Constraint::Min(0),              // Game area
                Constraint::Length(FOOTER_ROWS), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(session, clock, metrics);
        frame.render_widget(stats, chunks[0]);

        let board = Rect {
            width: (session.grid.cols as u16)
                .saturating_mul(TILE_COLUMNS)
                .saturating_add(2)
                .min(chunks[1].width),
            height: (session.grid.rows as u16)
                .saturating_add(2)
                .min(chunks[1].height),
            ..chunks[1]
        };
        let board = Rect {
            x: chunks[1].x + (chunks[1].width - board.width) / 2,
            ..board
        };

        let grid = self.render_grid(session, tongue_out);
        frame.render_widget(grid, board);

        if session.paused {
            let overlay = centered(board, 24, 5);
            frame.render_widget(Clear, overlay);
            frame.render_widget(self.render_pause(), overlay);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, session: &Session, tongue_out: bool) -> Paragraph<'_> {
        let color = PALETTE[palette_index(session.score)];
        let head_style = Style::default()
            .fg(rgb(color))
            .add_modifier(Modifier::BOLD);
        let body_style = Style::default().fg(darker(color));
        let head = session.snake.head();

        let mut lines = Vec::with_capacity(session.grid.rows as usize);
        for row in 0..session.grid.rows as i32 {
            let mut spans = Vec::with_capacity(session.grid.cols as usize);

            for col in 0..session.grid.cols as i32 {
                let cell = Cell::new(col, row);

                if cell == head {
                    spans.push(Span::styled("■", head_style));
                    if tongue_out {
                        spans.push(Span::styled(
                            tongue_glyph(session.direction),
                            Style::default().fg(Color::Rgb(255, 77, 109)),
                        ));
                    } else {
                        spans.push(Span::raw(" "));
                    }
                } else if session.snake.collides_with_body(cell) {
                    spans.push(Span::styled("□ ", body_style));
                } else if cell == session.food {
                    spans.push(Span::styled(
                        "● ",
                        Style::default()
                            .fg(Color::Rgb(220, 60, 60))
                            .add_modifier(Modifier::BOLD),
                    ));
                } else {
                    spans.push(Span::styled(". ", Style::default().fg(Color::DarkGray)));
                }
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(Color::Rgb(224, 0, 0)))
                .title(" Snake "),
        )
    }

    fn render_stats(
        &self,
        session: &Session,
        clock: &StepClock,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);
        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(session.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(clock.speed().label.clone(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_pause(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Space", Style::default().fg(Color::Green)),
                Span::raw(" resume  "),
                Span::styled("R", Style::default().fg(Color::Red)),
                Span::raw(" restart"),
            ]),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" / drag to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("1-4", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

fn tongue_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "^",
        Direction::Down => "v",
        Direction::Left => "<",
        Direction::Right => ">",
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(session: &Session, tongue_out: bool) -> String {
        let config = GameConfig::default();
        let clock = StepClock::new(config.speeds, config.default_speed);
        let metrics = GameMetrics::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, session, &clock, &metrics, tongue_out))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn session() -> Session {
        let mut engine = GameEngine::new(GameConfig {
            seed: Some(5),
            ..Default::default()
        });
        engine.boot(200, 160)
    }

    #[test]
    fn test_palette_advances_every_three_points() {
        assert_eq!(palette_index(0), 0);
        assert_eq!(palette_index(2), 0);
        assert_eq!(palette_index(3), 1);
        assert_eq!(palette_index(17), 5);
        assert_eq!(palette_index(18), 0);
    }

    #[test]
    fn test_viewport_for_area() {
        // 80x24 terminal: 78 inner columns = 39 tiles, 24 - 8 = 16 rows.
        assert_eq!(viewport_for_area(Rect::new(0, 0, 80, 24), 20), (780, 320));
        assert_eq!(viewport_for_area(Rect::new(0, 0, 4, 4), 20), (20, 0));
    }

    #[test]
    fn test_render_board() {
        let screen = draw(&session(), false);
        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("Speed: Normal"));
        assert!(screen.contains('■'));
        assert!(screen.contains('●'));
        assert!(!screen.contains("PAUSED"));
    }

    #[test]
    fn test_render_tongue_after_meal() {
        let screen = draw(&session(), true);
        assert!(screen.contains("■>"));
    }

    #[test]
    fn test_render_pause_overlay() {
        let mut session = session();
        session.paused = true;
        let screen = draw(&session, false);
        assert!(screen.contains("PAUSED"));
    }
}
