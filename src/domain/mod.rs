pub mod cell;
pub mod grid;
pub mod maze;
pub mod path;
