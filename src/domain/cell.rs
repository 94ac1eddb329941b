/// Cell states of the maze lattice.
/// Properties are queried via methods so cell semantics live in one place.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    Empty,
    #[default]
    Wall,
}

impl Cell {
    /// Can the player occupy this cell?
    pub fn is_passable(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }
}
