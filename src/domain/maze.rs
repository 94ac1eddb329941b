/// Maze generation strategies.
///
/// Every strategy produces a grid whose dimensions are odd and between 5 and
/// `MAX_DIMENSION`, with the start `(1,1)` and goal `(w-2, h-2)` open and
/// connected.
///
///   - `Backtracker`: randomized depth-first carve on the odd sub-lattice.
///     Yields a spanning tree: one simple path between any two open cells.
///   - `CorridorCross`: fixed outer corridor ring with a centre cross and two
///     blocking walls. No randomness; used for the easy difficulty.

use rand::seq::SliceRandom;
use rand::Rng;

use super::cell::Cell;
use super::grid::{coerce_dimension, Direction, Grid, Pos};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MazeStyle {
    Backtracker,
    CorridorCross,
}

impl MazeStyle {
    /// Generate a grid. Requested dimensions are coerced to odd values in
    /// `[5, MAX_DIMENSION]`.
    pub fn generate<R: Rng + ?Sized>(self, width: usize, height: usize, rng: &mut R) -> Grid {
        let width = coerce_dimension(width);
        let height = coerce_dimension(height);
        let grid = match self {
            MazeStyle::Backtracker => carve_backtracker(width, height, rng),
            MazeStyle::CorridorCross => carve_corridor_cross(width, height),
        };
        tracing::debug!(style = ?self, width, height, open = grid.open_cell_count(), "maze generated");
        grid
    }
}

/// Randomized recursive backtracker over cells at odd coordinates.
fn carve_backtracker<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Grid {
    let mut grid = Grid::filled(width, height);
    let start = grid.start();
    grid.set(start, Cell::Empty);

    let mut stack: Vec<Pos> = Vec::with_capacity(width * height / 4);
    stack.push(start);
    let mut dirs = Direction::ALL;

    while let Some(&cur) = stack.last() {
        dirs.shuffle(rng);
        let next = dirs.iter().find_map(|&d| {
            let target = jump(cur, d, width, height)?;
            grid.cell(target).is_wall().then_some((target, d))
        });

        match next {
            Some((target, d)) => {
                if let Some(between) = cur.step(d) {
                    grid.set(between, Cell::Empty);
                }
                grid.set(target, Cell::Empty);
                stack.push(target);
            }
            None => {
                stack.pop();
            }
        }
    }

    grid
}

/// Two cells away in `dir`, if that stays strictly inside the outer wall ring.
fn jump(p: Pos, dir: Direction, width: usize, height: usize) -> Option<Pos> {
    let target = p.step(dir)?.step(dir)?;
    let inside = target.x >= 1 && target.x <= width - 2 && target.y >= 1 && target.y <= height - 2;
    inside.then_some(target)
}

/// Outer corridor ring plus a centre cross, with the ring cut at the middle
/// of its top and bottom edges so the cross is the only way across.
fn carve_corridor_cross(width: usize, height: usize) -> Grid {
    let mut grid = Grid::filled(width, height);
    let (right, bottom) = (width - 2, height - 2);
    let (mid_x, mid_y) = (width / 2, height / 2);

    for x in 1..=right {
        grid.set(Pos::new(x, 1), Cell::Empty);
        grid.set(Pos::new(x, bottom), Cell::Empty);
        grid.set(Pos::new(x, mid_y), Cell::Empty);
    }
    for y in 1..=bottom {
        grid.set(Pos::new(1, y), Cell::Empty);
        grid.set(Pos::new(right, y), Cell::Empty);
        grid.set(Pos::new(mid_x, y), Cell::Empty);
    }

    // Strategic walls
    grid.set(Pos::new(mid_x, 1), Cell::Wall);
    grid.set(Pos::new(mid_x, bottom), Cell::Wall);

    grid
}
