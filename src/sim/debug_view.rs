/// Fixed-width text rendering of a maze for debugging.

use crate::domain::grid::{Grid, Pos};

pub const WALL_GLYPH: char = '#';
pub const EMPTY_GLYPH: char = ' ';
pub const PLAYER_GLYPH: char = 'P';
pub const GOAL_GLYPH: char = 'G';

/// One string per grid row. The player marker wins over the goal marker.
pub fn render_rows(grid: &Grid, player: Pos, goal: Pos) -> Vec<String> {
    (0..grid.height())
        .map(|y| {
            (0..grid.width())
                .map(|x| {
                    let p = Pos::new(x, y);
                    if p == player {
                        PLAYER_GLYPH
                    } else if p == goal {
                        GOAL_GLYPH
                    } else if grid.is_open(p) {
                        EMPTY_GLYPH
                    } else {
                        WALL_GLYPH
                    }
                })
                .collect()
        })
        .collect()
}

/// Rows joined with newlines.
pub fn render(grid: &Grid, player: Pos, goal: Pos) -> String {
    render_rows(grid, player, goal).join("\n")
}
