//! Terminal frame formatting for a generation and its predecessor

use super::ansi::{self, Color};
use crate::engine::{GenerationState, GridModel};

/// Render one playback frame: the boxed board plus a status line.
///
/// Cells are drawn relative to the previous generation — a surviving cell as
/// a filled green dot, a newborn as a hollow green dot, a cell that just
/// died as a hollow gray dot, and long-dead cells as blank space. The first
/// frame has no predecessor, so every live cell reads as newly born.
pub fn render_frame(
    grid: &GridModel,
    state: &GenerationState,
    previous: Option<&GenerationState>,
    index: usize,
    state_count: usize,
) -> String {
    let board = render_board(grid, state, previous);
    let status = status_line(grid, state, index, state_count);
    format!("{}\n{}", boxed(&board, grid.num_columns()), status)
}

fn render_board(
    grid: &GridModel,
    state: &GenerationState,
    previous: Option<&GenerationState>,
) -> String {
    let mut output = String::new();

    for index in 0..grid.total_cells() {
        if index > 0 && grid.column_of(index) == 0 {
            output.push('\n');
        }

        let is_alive = state.is_alive(index);
        let was_alive = previous.map(|prev| prev.is_alive(index)).unwrap_or(false);

        match (is_alive, was_alive) {
            (true, true) => output.push_str(&ansi::paint("◍", Color::Green)),
            (true, false) => output.push_str(&ansi::paint("◌", Color::Green)),
            (false, true) => output.push_str(&ansi::paint("◌", Color::Gray)),
            (false, false) => output.push(' '),
        }
    }

    output
}

fn boxed(board: &str, width: usize) -> String {
    let horizontal = "─".repeat(width);
    let mut output = String::new();

    output.push_str(&ansi::paint(&format!("┌{}┐", horizontal), Color::Gray));
    output.push('\n');
    for line in board.split('\n') {
        let padding = width.saturating_sub(ansi::visible_width(line));
        output.push_str(&ansi::paint("│", Color::Gray));
        output.push_str(line);
        output.push_str(&" ".repeat(padding));
        output.push_str(&ansi::paint("│", Color::Gray));
        output.push('\n');
    }
    output.push_str(&ansi::paint(&format!("└{}┘", horizontal), Color::Gray));

    output
}

fn status_line(grid: &GridModel, state: &GenerationState, index: usize, state_count: usize) -> String {
    let loop_label = format!(
        "{} {}",
        ansi::paint(&format!("{}", index + 1), Color::Yellow),
        ansi::paint(&format!("of {}", state_count), Color::Gray),
    );
    let living_label = format!(
        "{} {}",
        ansi::paint("◍", Color::Green),
        state.living_cell_count
    );
    let dying_label = format!(
        "{} {}",
        ansi::paint("◌", Color::Gray),
        state.dying_cell_count
    );

    // Box width including its two border characters.
    space_between(
        grid.num_columns() + 2,
        &[&loop_label, &living_label, &dying_label],
    )
}

/// Spread labels across a fixed character width, at least one space apart
fn space_between(width: usize, texts: &[&str]) -> String {
    let last = match texts.last() {
        Some(last) if texts.len() > 1 => last,
        _ => return texts.concat(),
    };

    let available = width.saturating_sub(ansi::visible_width(last));
    let column_width = available / (texts.len() - 1);

    texts
        .iter()
        .map(|text| {
            let trailing = column_width.saturating_sub(ansi::visible_width(text)).max(1);
            format!("{}{}", text, " ".repeat(trailing))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_from_rows(rows: &[&str]) -> GenerationState {
        let cells = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|ch| ch == '1')
            .collect();
        GenerationState::initial(cells)
    }

    #[test]
    fn test_frame_marks_survivors_births_and_deaths() {
        let grid = GridModel::new(3, 1).unwrap();
        let previous = state_from_rows(&["110"]);
        let current = state_from_rows(&["011"]);

        let frame = render_frame(&grid, &current, Some(&previous), 1, 4);
        let plain = ansi::strip(&frame);

        // Cell 0 just died, cell 1 survived, cell 2 was born.
        assert!(plain.contains("│◌◍◌│"));
        assert!(plain.contains("2 of 4"));
    }

    #[test]
    fn test_first_frame_has_no_predecessor() {
        let grid = GridModel::new(2, 2).unwrap();
        let current = state_from_rows(&["10", "01"]);

        let frame = render_frame(&grid, &current, None, 0, 1);
        let plain = ansi::strip(&frame);

        // Without a predecessor all live cells render as newborns.
        assert!(plain.contains("│◌ │"));
        assert!(plain.contains("│ ◌│"));
        assert!(!plain.contains('◍'));
    }

    #[test]
    fn test_box_matches_grid_width() {
        let grid = GridModel::new(5, 2).unwrap();
        let current = state_from_rows(&["00000", "00000"]);

        let frame = render_frame(&grid, &current, None, 0, 1);
        let plain = ansi::strip(&frame);
        let lines: Vec<&str> = plain.lines().collect();

        assert_eq!(lines[0], format!("┌{}┐", "─".repeat(5)));
        assert_eq!(lines[3], format!("└{}┘", "─".repeat(5)));
        assert!(lines[1].chars().count() == 7 && lines[2].chars().count() == 7);
    }

    #[test]
    fn test_status_line_reports_counts() {
        let grid = GridModel::new(10, 1).unwrap();
        let state = GenerationState::from_transition(vec![false; 10], 0, 3);

        let status = status_line(&grid, &state, 4, 9);
        let plain = ansi::strip(&status);
        assert!(plain.contains("5 of 9"));
        assert!(plain.contains("◌ 3"));
    }
}
