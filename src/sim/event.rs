/// Sound cues derived from a move outcome.
/// The presentation layer turns these into `SoundStage` calls.

use crate::domain::grid::Direction;
use super::navigation::MoveOutcome;

/// Proximity chimes start once the goal is this many hops away or closer.
pub const PROXIMITY_RANGE: u32 = 6;

/// A cell with at least this many open neighbours sounds like open space.
pub const JUNCTION_OPENINGS: usize = 3;

/// Stereo placement for sounds caused by moving in `dir`.
pub fn pan_for(dir: Direction) -> f32 {
    match dir {
        Direction::West => -0.8,
        Direction::East => 0.8,
        Direction::North | Direction::South => 0.0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SoundCue {
    Footstep { correct: bool, pan: f32 },
    WallBump { pan: f32 },
    Echo,
    Proximity { distance: u32 },
    Victory,
}

/// Cues to play, in order, for one move attempt.
///
/// `open_neighbors` is the number of open cells around the player after the
/// move; `won` is the engine's state after the move.
pub fn cues_for(dir: Direction, outcome: &MoveOutcome, open_neighbors: usize, won: bool) -> Vec<SoundCue> {
    let pan = pan_for(dir);

    if outcome.blocked {
        return vec![SoundCue::WallBump { pan }];
    }

    let mut cues = vec![SoundCue::Footstep { correct: outcome.was_correct_direction, pan }];
    if won {
        cues.push(SoundCue::Victory);
        return cues;
    }
    if open_neighbors >= JUNCTION_OPENINGS {
        cues.push(SoundCue::Echo);
    }
    if outcome.distance_to_goal <= PROXIMITY_RANGE {
        cues.push(SoundCue::Proximity { distance: outcome.distance_to_goal });
    }
    cues
}
