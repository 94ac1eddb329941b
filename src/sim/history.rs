/// Move history kept by the front-end for presentation only:
/// exploration percentage and recency. The engines never read it.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::domain::grid::{Grid, Pos};

#[derive(Clone, Copy, Debug)]
pub struct Visit {
    pub x: usize,
    pub y: usize,
    pub at: Instant,
}

#[derive(Clone, Debug, Default)]
pub struct MoveHistory {
    visits: Vec<Visit>,
}

impl MoveHistory {
    pub fn new() -> Self {
        MoveHistory::default()
    }

    /// Record an advanced move. Append-only.
    pub fn record(&mut self, p: Pos) {
        self.visits.push(Visit { x: p.x, y: p.y, at: Instant::now() });
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// The last `n` visits, oldest first.
    pub fn recent(&self, n: usize) -> &[Visit] {
        let start = self.visits.len().saturating_sub(n);
        &self.visits[start..]
    }

    /// Time since the most recent recorded move.
    pub fn since_last_move(&self) -> Option<Duration> {
        self.visits.last().map(|v| v.at.elapsed())
    }

    /// Percentage of the grid's open cells seen so far, counting the start.
    pub fn exploration_percent(&self, grid: &Grid) -> f32 {
        let open = grid.open_cell_count();
        if open == 0 {
            return 0.0;
        }
        let mut seen: HashSet<Pos> = self.visits.iter().map(|v| Pos::new(v.x, v.y)).collect();
        seen.insert(grid.start());
        let seen = seen.into_iter().filter(|&p| grid.is_open(p)).count();
        seen as f32 * 100.0 / open as f32
    }
}
