/// The maze lattice: positions, directions and the occupancy grid.
///
/// Coordinates are `(x, y)` with `x` the column and `y` the row; row 0 is
/// the top edge. Cells are stored row-major, so `cells[y * width + x]`.

use super::cell::Cell;

/// Smallest legal dimension. Anything below is coerced up to this.
pub const MIN_DIMENSION: usize = 5;

/// Largest legal dimension. Anything above is clamped down to this.
pub const MAX_DIMENSION: usize = 255;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Pos { x, y }
    }

    /// The neighbouring position one step in `dir`, or `None` when that
    /// would leave the non-negative quadrant.
    pub fn step(self, dir: Direction) -> Option<Pos> {
        let (dx, dy) = dir.offset();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Pos { x, y })
    }
}

/// The four cardinal directions. North is towards row 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit offset `(dx, dy)`.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

/// Clamp a requested dimension to `[MIN_DIMENSION, MAX_DIMENSION]`, then
/// round it up to the next odd value.
pub fn coerce_dimension(n: usize) -> usize {
    let n = n.clamp(MIN_DIMENSION, MAX_DIMENSION);
    if n % 2 == 0 { n + 1 } else { n }
}

/// Occupancy grid. Built by a maze strategy and read-only afterwards.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid of the given size filled with walls. Dimensions are taken as
    /// given; callers that need the odd/≥5 guarantee coerce first.
    pub fn filled(width: usize, height: usize) -> Self {
        Grid { width, height, cells: vec![Cell::Wall; width * height] }
    }

    /// Build a grid from text rows: `#` is a wall, anything else is empty.
    /// Rows shorter than the first are padded with walls.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut grid = Grid::filled(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().take(width).enumerate() {
                if ch != '#' {
                    grid.set(Pos::new(x, y), Cell::Empty);
                }
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Fixed start corner.
    pub fn start(&self) -> Pos {
        Pos::new(1, 1)
    }

    /// Fixed goal corner, diagonally opposite the start.
    pub fn goal(&self) -> Pos {
        Pos::new(self.width.saturating_sub(2), self.height.saturating_sub(2))
    }

    #[inline]
    pub fn in_bounds(&self, p: Pos) -> bool {
        p.x < self.width && p.y < self.height
    }

    /// Cell at `p`. Out of bounds reads as wall.
    #[inline]
    pub fn cell(&self, p: Pos) -> Cell {
        if self.in_bounds(p) {
            self.cells[p.y * self.width + p.x]
        } else {
            Cell::Wall
        }
    }

    #[inline]
    pub fn is_open(&self, p: Pos) -> bool {
        self.cell(p).is_passable()
    }

    /// Writes are ignored out of bounds.
    #[inline]
    pub(crate) fn set(&mut self, p: Pos, cell: Cell) {
        if self.in_bounds(p) {
            self.cells[p.y * self.width + p.x] = cell;
        }
    }

    /// Passable 4-neighbours of `p`.
    pub fn open_neighbors(&self, p: Pos) -> impl Iterator<Item = Pos> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| p.step(d))
            .filter(|&n| self.is_open(n))
    }

    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_passable()).count()
    }

    /// All passable positions in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Pos::new(x, y)))
            .filter(|&p| self.is_open(p))
    }
}
