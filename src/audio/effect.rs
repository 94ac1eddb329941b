/// Closed set of sound effects and their string names.

/// Intensity variant of the goal-proximity chime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ProximityTier {
    Near,
    Mid,
    Far,
}

impl ProximityTier {
    /// ≤ 2 hops is near, ≤ 4 is mid, anything else far.
    pub fn for_distance(distance: u32) -> Self {
        match distance {
            0..=2 => ProximityTier::Near,
            3..=4 => ProximityTier::Mid,
            _ => ProximityTier::Far,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Effect {
    Footstep,
    FootstepCorrect,
    WallCollision,
    AmbientEcho,
    Proximity(ProximityTier),
    Victory,
}

impl Effect {
    pub const ALL: [Effect; 8] = [
        Effect::Footstep,
        Effect::FootstepCorrect,
        Effect::WallCollision,
        Effect::AmbientEcho,
        Effect::Proximity(ProximityTier::Near),
        Effect::Proximity(ProximityTier::Mid),
        Effect::Proximity(ProximityTier::Far),
        Effect::Victory,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Effect::Footstep => "footstep-normal",
            Effect::FootstepCorrect => "footstep-correct",
            Effect::WallCollision => "wall-collision",
            Effect::AmbientEcho => "ambient-echo",
            Effect::Proximity(ProximityTier::Near) => "proximity-near",
            Effect::Proximity(ProximityTier::Mid) => "proximity-mid",
            Effect::Proximity(ProximityTier::Far) => "proximity-far",
            Effect::Victory => "victory",
        }
    }

    pub fn from_name(name: &str) -> Option<Effect> {
        Effect::ALL.into_iter().find(|e| e.name() == name)
    }

    /// Per-effect level applied by the gain stage before the master gain.
    pub fn base_gain(self) -> f32 {
        match self {
            Effect::Footstep | Effect::FootstepCorrect => 0.8,
            Effect::WallCollision => 0.9,
            Effect::AmbientEcho => 0.5,
            Effect::Proximity(_) => 1.0,
            Effect::Victory => 0.9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_and_are_unique() {
        for e in Effect::ALL {
            assert_eq!(Effect::from_name(e.name()), Some(e));
        }
        let mut names: Vec<&str> = Effect::ALL.iter().map(|e| e.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Effect::ALL.len());
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(Effect::from_name("nonexistent-effect"), None);
        assert_eq!(Effect::from_name(""), None);
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(ProximityTier::for_distance(0), ProximityTier::Near);
        assert_eq!(ProximityTier::for_distance(2), ProximityTier::Near);
        assert_eq!(ProximityTier::for_distance(3), ProximityTier::Mid);
        assert_eq!(ProximityTier::for_distance(4), ProximityTier::Mid);
        assert_eq!(ProximityTier::for_distance(5), ProximityTier::Far);
        assert_eq!(ProximityTier::for_distance(9999), ProximityTier::Far);
    }
}
