//! Echo Maze: find the exit of a maze you cannot see.
//!
//! Two engines do the work. `sim::navigation` owns the maze and the player
//! and reports, for each move, whether it got closer to the goal.
//! `audio` synthesizes every cue from scratch and plays it panned through
//! the output device. The terminal front-end in `ui` wires them together.

pub mod app;
pub mod audio;
pub mod config;
pub mod domain;
pub mod sim;
pub mod ui;
