//! ASCII renderer for terminal viewing, with optional ANSI colors.
//!
//! [`board_lines`] lays the stack out as rows of cells so the plain text
//! renderer here and the TUI can share one picture of the board.

use std::fmt::Write;

use crate::board::{AttackBoardId, BoardState, Color, SquareId};
use crate::geometry::{Corner, Level, Station};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GRAY: &str = "\x1b[90m";
const REVERSE: &str = "\x1b[7m";

/// One line of the laid-out board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardLine {
    /// Start of a level, with the attack boards docked on it.
    Heading {
        /// The main board level.
        level: Level,
        /// Attack boards docked at this level's stations.
        boards: Vec<AttackBoardId>,
    },
    /// A row of cells; `None` is open space.
    Cells(Vec<Option<SquareId>>),
    /// Gap between levels.
    Blank,
}

/// Lay the board out top level first.
///
/// Each level shows its back attack boards, the main board (back row
/// first) and its front attack boards. Rows are eight cells wide: two for
/// a left attack board, four for the main board, two for a right one.
#[must_use]
pub fn board_lines(state: &BoardState) -> Vec<BoardLine> {
    let mut lines = Vec::new();

    for level in (0..3u8).rev().map(Level::new) {
        lines.push(BoardLine::Heading {
            level,
            boards: AttackBoardId::all()
                .filter(|&b| state.station_of(b).level() == level)
                .collect(),
        });

        push_attack_pair(&mut lines, state, level, Corner::BackLeft, Corner::BackRight);

        for row in (0..4u8).rev() {
            let mut cells = vec![None, None];
            cells.extend((0..4u8).map(|col| Some(SquareId::on_level(level, row, col))));
            cells.extend([None, None]);
            lines.push(BoardLine::Cells(trimmed(cells)));
        }

        push_attack_pair(&mut lines, state, level, Corner::FrontLeft, Corner::FrontRight);
        lines.push(BoardLine::Blank);
    }

    lines
}

fn push_attack_pair(lines: &mut Vec<BoardLine>, state: &BoardState, level: Level, left: Corner, right: Corner) {
    let left = state.board_at(Station::at(level, left));
    let right = state.board_at(Station::at(level, right));
    if left.is_none() && right.is_none() {
        return;
    }

    for row in (0..2).rev() {
        let mut cells = block_row(left, row).to_vec();
        cells.extend([None; 4]);
        cells.extend(block_row(right, row));
        lines.push(BoardLine::Cells(trimmed(cells)));
    }
}

fn block_row(board: Option<AttackBoardId>, row: usize) -> [Option<SquareId>; 2] {
    match board {
        Some(board) => {
            let squares = board.squares();
            [Some(squares[row * 2]), Some(squares[row * 2 + 1])]
        }
        None => [None, None],
    }
}

fn trimmed(mut cells: Vec<Option<SquareId>>) -> Vec<Option<SquareId>> {
    while cells.last() == Some(&None) {
        cells.pop();
    }
    cells
}

/// Glyph for a square: the occupant's letter (upper case White, lower case
/// Black), or `.` / `:` by parity when empty.
#[must_use]
pub fn square_glyph(state: &BoardState, square: SquareId) -> String {
    match state.occupant(square) {
        Some(piece) => piece.to_string(),
        None if square.parity() == 0 => ".".to_string(),
        None => ":".to_string(),
    }
}

/// Render the board to text.
///
/// Output format:
/// ```text
/// Level 3  [boards: 2 3]
/// r k         q r
/// p p         p p
///     n b b n
///     p p p p
///     : . : .
///     . : . :
///
/// Level 2
/// ...
/// Displaced: p
/// ```
///
/// With `ansi`, Black is red, empty squares are dim and highlights are
/// reversed; without it a highlighted square or piece is followed by `*`.
#[must_use]
pub fn render_ascii(state: &BoardState, ansi: bool) -> String {
    let mut output = String::new();

    for line in board_lines(state) {
        match line {
            BoardLine::Heading { level, boards } => {
                let _ = write!(output, "Level {}", level.index() + 1);
                if !boards.is_empty() {
                    let names: Vec<String> = boards.iter().map(|b| b.index().to_string()).collect();
                    let _ = write!(output, "  [boards: {}]", names.join(" "));
                }
            }
            BoardLine::Cells(cells) => {
                for cell in cells {
                    match cell {
                        Some(square) => render_cell(&mut output, state, square, ansi),
                        None => output.push_str("  "),
                    }
                }
                let trimmed = output.trim_end_matches(' ').len();
                output.truncate(trimmed);
            }
            BoardLine::Blank => {}
        }
        output.push('\n');
    }

    let displaced: Vec<String> = state
        .pieces()
        .iter()
        .filter(|p| state.location(p.id).is_none())
        .map(|p| p.id.to_string())
        .collect();
    if !displaced.is_empty() {
        let _ = writeln!(output, "Displaced: {}", displaced.join(" "));
    }

    output
}

/// Render one square as a glyph and a separator.
fn render_cell(output: &mut String, state: &BoardState, square: SquareId, ansi: bool) {
    let sq = state.square(square);
    let glyph = square_glyph(state, square);
    let highlighted = sq.highlighted || sq.occupant.is_some_and(|p| state.piece(p).highlighted);

    if ansi {
        let style = match sq.occupant {
            Some(piece) if state.color(piece) == Color::Black => RED,
            Some(_) => BOLD,
            None => GRAY,
        };
        let mark = if highlighted { REVERSE } else { "" };
        let _ = write!(output, "{style}{mark}{glyph}{RESET} ");
    } else if highlighted {
        let _ = write!(output, "{glyph}*");
    } else {
        let _ = write!(output, "{glyph} ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::EntityId;

    #[test]
    fn test_layout_covers_every_square_once() {
        let state = BoardState::new();
        let mut seen: Vec<SquareId> = board_lines(&state)
            .into_iter()
            .filter_map(|line| match line {
                BoardLine::Cells(cells) => Some(cells),
                _ => None,
            })
            .flatten()
            .flatten()
            .collect();
        assert_eq!(seen.len(), SquareId::COUNT);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), SquareId::COUNT);
    }

    #[test]
    fn test_layout_follows_relocated_boards() {
        let mut state = BoardState::new();
        assert!(
            state
                .try_relocate_board(AttackBoardId::new(0), Station::new(6))
                .is_applied()
        );
        let lines = board_lines(&state);
        assert!(lines.contains(&BoardLine::Heading {
            level: Level::new(1),
            boards: vec![AttackBoardId::new(0)],
        }));
    }

    #[test]
    fn test_render_starting_board() {
        let state = BoardState::new();
        let output = render_ascii(&state, false);

        assert!(output.contains("Level 1  [boards: 0 1]"));
        assert!(output.contains("Level 3  [boards: 2 3]"));
        assert!(output.contains("Level 2\n"));
        assert!(!output.contains("Displaced"));

        let lines: Vec<&str> = output.lines().collect();
        // top level opens with its back attack boards
        assert_eq!(lines[1].chars().filter(char::is_ascii_alphabetic).count(), 4);
        assert!(lines.iter().all(|l| !l.ends_with(' ')));
    }

    #[test]
    fn test_render_counts_every_piece() {
        let state = BoardState::new();
        let output = render_ascii(&state, false);
        let letters = output
            .lines()
            .filter(|l| !l.starts_with("Level"))
            .flat_map(str::chars)
            .filter(char::is_ascii_alphabetic)
            .count();
        assert_eq!(letters, 32);
    }

    #[test]
    fn test_render_marks_highlight() {
        let mut state = BoardState::new();
        state.toggle_highlight(EntityId::Square(SquareId::new(16)));
        let output = render_ascii(&state, false);
        assert!(output.contains(".*") || output.contains(":*"));

        let ansi = render_ascii(&state, true);
        assert!(ansi.contains(REVERSE));
    }

    #[test]
    fn test_render_marks_highlighted_piece() {
        let mut state = BoardState::new();
        let pawn = state.occupant(SquareId::new(4)).unwrap();
        assert!(state.toggle_highlight(EntityId::Piece(pawn)));

        let output = render_ascii(&state, false);
        assert!(output.contains("P*"));
        assert_eq!(output.matches('*').count(), 1);

        let ansi = render_ascii(&state, true);
        assert!(ansi.contains(REVERSE));
    }

    #[test]
    fn test_render_lists_displaced_pieces() {
        let mut state = BoardState::new();
        // white pawn onto a black pawn
        assert!(state.try_move(SquareId::new(4), SquareId::new(40)).is_applied());
        let output = render_ascii(&state, false);
        assert!(output.contains("Displaced: p"));
    }
}
