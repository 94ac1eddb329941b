/// Breadth-first shortest-path distance over passable cells.
///
/// This distance is the ground truth for every "warmer / colder" cue, so it
/// is always computed from scratch; a single step into a dead end can change
/// it by more than one hop.

use std::collections::VecDeque;

use super::grid::{Grid, Pos};

/// Returned when `to` cannot be reached. Larger than any proximity band.
pub const UNREACHABLE: u32 = 9999;

/// Hop count from `from` to `to` through 4-connected passable cells.
///
/// Cells are marked visited when enqueued, and the distance is reported when
/// `to` is dequeued.
pub fn shortest_distance(grid: &Grid, from: Pos, to: Pos) -> u32 {
    if !grid.in_bounds(from) || !grid.in_bounds(to) {
        return UNREACHABLE;
    }

    let w = grid.width();
    let mut visited = vec![false; w * grid.height()];
    let mut queue: VecDeque<(Pos, u32)> = VecDeque::with_capacity(64);

    visited[from.y * w + from.x] = true;
    queue.push_back((from, 0));

    while let Some((p, dist)) = queue.pop_front() {
        if p == to {
            return dist;
        }
        for n in grid.open_neighbors(p) {
            let idx = n.y * w + n.x;
            if !visited[idx] {
                visited[idx] = true;
                queue.push_back((n, dist + 1));
            }
        }
    }

    UNREACHABLE
}
