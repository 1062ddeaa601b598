//! Watch command implementation - Interactive TUI viewer.

// CLI watch uses intentional casts for display and timing
#![allow(clippy::needless_pass_by_value, clippy::cast_possible_truncation)]

use super::{CliError, load_config};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tridi::board::{BoardState, EntityId, SquareId};
use tridi::render::{BoardLine, board_lines, square_glyph};
use tridi::sim::DioramaConfig;
use tridi::{ClockPlayback, Diorama, TickOutcome};

/// Execute the watch command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the TUI fails.
pub(crate) fn execute(seed: Option<u64>, speed: u64, config: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(config.as_deref(), seed)?;
    run_tui(config, speed)
}

/// App state for the TUI.
struct App {
    diorama: Diorama<ClockPlayback>,
    paused: bool,
    speed_ms: u64,
    cursor: usize,
    last_tick: Instant,
    last_frame: Instant,
    last_outcome: String,
}

impl App {
    fn new(config: DioramaConfig, speed_ms: u64) -> Self {
        Self {
            diorama: Diorama::new(config, ClockPlayback::new()),
            paused: true, // Start paused
            speed_ms,
            cursor: 0,
            last_tick: Instant::now(),
            last_frame: Instant::now(),
            last_outcome: "-".to_string(),
        }
    }

    /// Advance animations by the real time since the last frame.
    fn advance_clock(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;
        self.diorama.playback_mut().advance(dt);
    }

    fn tick(&mut self) {
        let outcome = self.diorama.tick();
        self.last_tick = Instant::now();
        if outcome != TickOutcome::Busy {
            self.last_outcome = describe(&outcome);
        }
    }

    fn step(&mut self) {
        self.paused = true;
        self.diorama.playback_mut().finish_all();
        self.tick();
    }

    fn reset(&mut self) {
        self.diorama.reset();
        self.last_outcome = "reset".to_string();
    }

    fn tap(&mut self) {
        if let Ok(square) = SquareId::try_from(self.cursor) {
            let entity = match self.diorama.state().occupant(square) {
                Some(piece) => EntityId::Piece(piece),
                None => EntityId::Square(square),
            };
            self.diorama.tapped_entity(entity);
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        self.cursor = self.cursor.wrapping_add_signed(delta).rem_euclid(SquareId::COUNT);
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    fn increase_speed(&mut self) {
        self.speed_ms = self.speed_ms.saturating_sub(50).max(10);
    }

    fn decrease_speed(&mut self) {
        self.speed_ms = self.speed_ms.saturating_add(50).min(2000);
    }

    fn should_auto_tick(&self) -> bool {
        !self.paused && self.last_tick.elapsed() >= Duration::from_millis(self.speed_ms)
    }
}

fn describe(outcome: &TickOutcome) -> String {
    match outcome {
        TickOutcome::Busy => "busy".to_string(),
        TickOutcome::BoardRelocated(r) => {
            format!("board {} station {} -> {}", r.board.index(), r.from.index(), r.to.index())
        }
        TickOutcome::PieceMoved(m) => match m.displaced {
            Some(other) => format!("{} {} -> {} (over {other})", m.piece, m.from, m.to),
            None => format!("{} {} -> {}", m.piece, m.from, m.to),
        },
        TickOutcome::Starved => "starved".to_string(),
        TickOutcome::Unchanged => "unchanged".to_string(),
    }
}

fn run_tui(config: DioramaConfig, speed: u64) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut app = App::new(config, speed);

    loop {
        app.advance_clock();

        // Draw
        terminal.draw(|f| ui(f, &app)).map_err(|e| CliError::new(e.to_string()))?;

        if app.should_auto_tick() {
            app.tick();
        }

        // Handle input with timeout
        if event::poll(Duration::from_millis(16)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char(' ') => app.toggle_pause(),
                KeyCode::Char('s') => app.step(),
                KeyCode::Char('r') => app.reset(),
                KeyCode::Char('+' | '=') => app.increase_speed(),
                KeyCode::Char('-') => app.decrease_speed(),
                KeyCode::Left | KeyCode::Char('h') => app.move_cursor(-1),
                KeyCode::Right | KeyCode::Char('l') => app.move_cursor(1),
                KeyCode::Up | KeyCode::Char('k') => app.move_cursor(4),
                KeyCode::Down | KeyCode::Char('j') => app.move_cursor(-4),
                KeyCode::Enter => app.tap(),
                _ => {}
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_board(f, main_chunks[0], app);
    render_stats(f, main_chunks[1], app);

    render_footer(f, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let status = if app.paused { "PAUSED" } else { "RUNNING" };
    let seed = app.diorama.config().seed.unwrap_or_default();

    let title = format!(
        " Tridi Diorama | Seed {seed} | {status} | Tick every {}ms | In flight: {} ",
        app.speed_ms,
        app.diorama.choreographer().in_flight().count()
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, app: &App) {
    let state = app.diorama.state();
    let cursor = SquareId::try_from(app.cursor).ok();

    let lines: Vec<Line> = board_lines(state)
        .into_iter()
        .map(|line| match line {
            BoardLine::Heading { level, boards } => {
                let names: Vec<String> = boards.iter().map(|b| b.index().to_string()).collect();
                let text = if names.is_empty() {
                    format!("Level {}", level.index() + 1)
                } else {
                    format!("Level {}  [boards: {}]", level.index() + 1, names.join(" "))
                };
                Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
            }
            BoardLine::Cells(cells) => Line::from(
                cells
                    .into_iter()
                    .map(|cell| match cell {
                        Some(square) => cell_span(state, square, cursor == Some(square)),
                        None => Span::raw("  "),
                    })
                    .collect::<Vec<_>>(),
            ),
            BoardLine::Blank => Line::from(""),
        })
        .collect();

    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Board "));
    f.render_widget(board, area);
}

fn cell_span(state: &BoardState, square: SquareId, under_cursor: bool) -> Span<'static> {
    let sq = state.square(square);
    let mut style = match sq.occupant {
        Some(piece) if state.is_white(piece) => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        Some(_) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::DarkGray),
    };
    let highlighted = sq.highlighted || sq.occupant.is_some_and(|p| state.piece(p).highlighted);
    if highlighted {
        style = style.bg(Color::Yellow);
    }
    if under_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(format!("{} ", square_glyph(state, square)), style)
}

fn render_stats(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.diorama.stats();
    let state = app.diorama.state();
    let cursor = SquareId::try_from(app.cursor).ok();

    let mut lines = vec![
        Line::from(""),
        Line::from(format!("Ticks: {}", stats.ticks)),
        Line::from(format!("Piece moves: {}", stats.piece_moves)),
        Line::from(format!("Board relocations: {}", stats.relocations)),
        Line::from(format!("Busy ticks: {}", stats.busy_ticks)),
        Line::from(format!("Starved ticks: {}", stats.starved_ticks)),
        Line::from(format!("Resets: {}", stats.resets)),
        Line::from(""),
        Line::from(format!("Last: {}", app.last_outcome)),
        Line::from(""),
    ];

    if let Some(square) = cursor {
        let occupant = state
            .occupant(square)
            .map_or_else(|| "empty".to_string(), |p| format!("{p} (#{})", p.index()));
        lines.push(Line::from(format!("Cursor: {square} {occupant}")));
    }

    let stats_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Stats "))
        .wrap(Wrap { trim: false });

    f.render_widget(stats_widget, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let controls = " [q] Quit  [Space] Pause  [s] Step  [r] Reset  [+/-] Speed  [arrows] Cursor  [Enter] Highlight ";

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(speed_ms: u64) -> App {
        let config = DioramaConfig {
            seed: Some(1),
            ..DioramaConfig::default()
        };
        App::new(config, speed_ms)
    }

    #[test]
    fn test_speed_stays_in_range() {
        let mut slow = app(u64::MAX);
        slow.decrease_speed();
        assert_eq!(slow.speed_ms, 2000);

        let mut fast = app(20);
        fast.increase_speed();
        assert_eq!(fast.speed_ms, 10);
    }

    #[test]
    fn test_cursor_wraps_around_the_board() {
        let mut app = app(250);
        app.move_cursor(-1);
        assert_eq!(app.cursor, SquareId::COUNT - 1);
        app.move_cursor(4);
        assert_eq!(app.cursor, 3);
    }
}
