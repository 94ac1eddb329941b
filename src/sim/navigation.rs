/// NavigationEngine: the sole owner and writer of a game's state.
///
/// Two phases: `InProgress` and `Won`. `Won` is terminal: every later move
/// is a blocked no-op until `reset()` builds a fresh maze.
///
/// Distance-to-goal is recomputed with a full BFS before and after every
/// successful move and never cached across moves.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::grid::{Direction, Grid, Pos};
use crate::domain::maze::MazeStyle;
use crate::domain::path::shortest_distance;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    InProgress,
    Won,
}

/// Complete state of one game. `snapshot()` hands out copies of this.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub player: Pos,
    pub goal: Pos,
    pub grid: Grid,
    pub won: bool,
    pub move_count: u32,
}

/// Result of a single move attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub advanced: bool,
    pub blocked: bool,
    pub was_correct_direction: bool,
    pub distance_to_goal: u32,
}

impl MoveOutcome {
    fn blocked(distance_to_goal: u32) -> Self {
        MoveOutcome {
            advanced: false,
            blocked: true,
            was_correct_direction: false,
            distance_to_goal,
        }
    }
}

pub struct NavigationEngine {
    state: GameState,
    phase: Phase,
    style: MazeStyle,
    rng: ChaCha8Rng,
}

impl NavigationEngine {
    /// Generate a fresh maze with `style`, seeding all randomness from `seed`.
    pub fn new(width: usize, height: usize, style: MazeStyle, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = style.generate(width, height, &mut rng);
        let (start, goal) = (grid.start(), grid.goal());
        NavigationEngine {
            state: GameState::fresh(grid, start, goal),
            phase: Phase::InProgress,
            style,
            rng,
        }
    }

    /// Play on a prebuilt grid with explicit start and goal.
    /// `reset()` on such an engine generates backtracker mazes from `seed`.
    pub fn from_grid(grid: Grid, start: Pos, goal: Pos, seed: u64) -> Self {
        let won = start == goal;
        let mut state = GameState::fresh(grid, start, goal);
        state.won = won;
        NavigationEngine {
            state,
            phase: if won { Phase::Won } else { Phase::InProgress },
            style: MazeStyle::Backtracker,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn style(&self) -> MazeStyle {
        self.style
    }

    /// Read-only view for presentation code that renders every frame.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Current shortest-path distance from player to goal.
    pub fn distance_to_goal(&self) -> u32 {
        shortest_distance(&self.state.grid, self.state.player, self.state.goal)
    }

    /// Is the neighbouring cell in `dir` in bounds and open?
    pub fn can_move(&self, dir: Direction) -> bool {
        self.target(dir).is_some()
    }

    pub fn move_player(&mut self, dir: Direction) -> MoveOutcome {
        if self.phase == Phase::Won {
            return MoveOutcome::blocked(0);
        }

        let Some(next) = self.target(dir) else {
            return MoveOutcome::blocked(self.distance_to_goal());
        };

        let before = self.distance_to_goal();
        self.state.player = next;
        self.state.move_count += 1;
        let after = self.distance_to_goal();

        if next == self.state.goal {
            self.state.won = true;
            self.phase = Phase::Won;
            tracing::info!(moves = self.state.move_count, "goal reached");
        }

        MoveOutcome {
            advanced: true,
            blocked: false,
            was_correct_direction: after < before,
            distance_to_goal: after,
        }
    }

    /// New random maze, same strategy. `None` keeps the previous dimensions.
    pub fn reset(&mut self, dimensions: Option<(usize, usize)>) {
        let (w, h) = dimensions.unwrap_or((self.state.grid.width(), self.state.grid.height()));
        let grid = self.style.generate(w, h, &mut self.rng);
        let (start, goal) = (grid.start(), grid.goal());
        self.state = GameState::fresh(grid, start, goal);
        self.phase = Phase::InProgress;
        tracing::info!(width = self.state.grid.width(), height = self.state.grid.height(), "maze reset");
    }

    // ── Internal ──

    fn target(&self, dir: Direction) -> Option<Pos> {
        let next = self.state.player.step(dir)?;
        self.state.grid.is_open(next).then_some(next)
    }
}

impl GameState {
    fn fresh(grid: Grid, start: Pos, goal: Pos) -> Self {
        GameState { player: start, goal, grid, won: false, move_count: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::path::UNREACHABLE;
    use proptest::prelude::*;

    fn column_maze() -> NavigationEngine {
        let grid = Grid::from_rows(&[
            "#####",
            "# ###",
            "# ###",
            "# ###",
            "#####",
        ]);
        NavigationEngine::from_grid(grid, Pos::new(1, 1), Pos::new(1, 3), 0)
    }

    fn dir_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::North),
            Just(Direction::South),
            Just(Direction::East),
            Just(Direction::West),
        ]
    }

    #[test]
    fn walking_down_the_column_wins() {
        let mut nav = column_maze();
        let first = nav.move_player(Direction::South);
        assert!(first.advanced && !first.blocked);
        assert!(first.was_correct_direction);
        assert_eq!(first.distance_to_goal, 1);
        assert!(!nav.snapshot().won);

        let second = nav.move_player(Direction::South);
        assert_eq!(second.distance_to_goal, 0);
        assert!(nav.snapshot().won);
        assert_eq!(nav.phase(), Phase::Won);
        assert_eq!(nav.snapshot().move_count, 2);
    }

    #[test]
    fn wall_bump_changes_nothing() {
        let mut nav = column_maze();
        let before = nav.snapshot();
        let out = nav.move_player(Direction::East);
        assert_eq!(out, MoveOutcome {
            advanced: false,
            blocked: true,
            was_correct_direction: false,
            distance_to_goal: 2,
        });
        assert_eq!(nav.snapshot(), before);
    }

    #[test]
    fn out_of_bounds_is_blocked() {
        let grid = Grid::from_rows(&["   ", "   "]);
        let mut nav = NavigationEngine::from_grid(grid, Pos::new(0, 0), Pos::new(2, 1), 0);
        assert!(!nav.can_move(Direction::North));
        assert!(!nav.can_move(Direction::West));
        let out = nav.move_player(Direction::West);
        assert!(out.blocked);
        assert_eq!(nav.snapshot().player, Pos::new(0, 0));
        assert_eq!(nav.snapshot().move_count, 0);
    }

    #[test]
    fn moving_away_is_not_correct() {
        let mut nav = column_maze();
        nav.move_player(Direction::South);
        let back = nav.move_player(Direction::North);
        assert!(back.advanced);
        assert!(!back.was_correct_direction);
        assert_eq!(back.distance_to_goal, 2);
    }

    #[test]
    fn moves_after_win_are_blocked() {
        let mut nav = column_maze();
        nav.move_player(Direction::South);
        nav.move_player(Direction::South);
        let after = nav.move_player(Direction::North);
        assert!(after.blocked && !after.advanced);
        let s = nav.snapshot();
        assert_eq!(s.player, Pos::new(1, 3));
        assert_eq!(s.move_count, 2);
        assert!(s.won);
    }

    #[test]
    fn can_move_is_pure() {
        let nav = column_maze();
        let before = nav.snapshot();
        assert!(nav.can_move(Direction::South));
        assert!(!nav.can_move(Direction::North));
        assert_eq!(nav.snapshot(), before);
    }

    #[test]
    fn snapshot_is_detached() {
        let nav = column_maze();
        let mut snap = nav.snapshot();
        snap.player = Pos::new(3, 3);
        snap.move_count = 99;
        snap.won = true;
        assert_eq!(nav.snapshot().player, Pos::new(1, 1));
        assert_eq!(nav.snapshot().move_count, 0);
        assert!(!nav.snapshot().won);
    }

    #[test]
    fn reset_restores_in_progress() {
        let mut nav = NavigationEngine::new(9, 9, MazeStyle::Backtracker, 5);
        while nav.phase() == Phase::InProgress {
            // Walk greedily along decreasing distance until the goal.
            let d = Direction::ALL
                .into_iter()
                .find(|&d| {
                    let mut trial = NavigationEngine::from_grid(
                        nav.state().grid.clone(),
                        nav.state().player,
                        nav.state().goal,
                        0,
                    );
                    trial.move_player(d).was_correct_direction
                });
            match d {
                Some(d) => { nav.move_player(d); }
                None => panic!("no step reduces distance"),
            }
        }
        nav.reset(None);
        let s = nav.snapshot();
        assert_eq!(nav.phase(), Phase::InProgress);
        assert!(!s.won);
        assert_eq!(s.move_count, 0);
        assert_eq!(s.player, Pos::new(1, 1));
        assert_eq!((s.grid.width(), s.grid.height()), (9, 9));
    }

    #[test]
    fn prebuilt_grid_resets_follow_the_seed() {
        let reset_grid = |seed| {
            let grid = Grid::from_rows(&["#####", "#   #", "#####"]);
            let mut nav = NavigationEngine::from_grid(grid, Pos::new(1, 1), Pos::new(3, 1), seed);
            nav.reset(Some((15, 15)));
            nav.snapshot().grid
        };
        assert_eq!(reset_grid(4), reset_grid(4));
        assert_ne!(reset_grid(4), reset_grid(5));
    }

    #[test]
    fn reset_with_new_dimensions() {
        let mut nav = NavigationEngine::new(9, 9, MazeStyle::CorridorCross, 1);
        nav.reset(Some((12, 6)));
        let s = nav.snapshot();
        assert_eq!((s.grid.width(), s.grid.height()), (13, 7));
        assert_eq!(s.goal, Pos::new(11, 5));
        assert_eq!(nav.style(), MazeStyle::CorridorCross);
    }

    #[test]
    fn new_engine_goal_reachable() {
        let nav = NavigationEngine::new(4, 4, MazeStyle::Backtracker, 9);
        let s = nav.snapshot();
        assert_eq!(s.goal, Pos::new(3, 3));
        assert!(nav.distance_to_goal() < UNREACHABLE);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn random_walk_respects_move_contract(
            seed in any::<u64>(),
            dirs in prop::collection::vec(dir_strategy(), 1..120),
        ) {
            let mut nav = NavigationEngine::new(11, 11, MazeStyle::Backtracker, seed);
            let mut wins = 0;
            for d in dirs {
                let before = nav.snapshot();
                let dist_before = shortest_distance(&before.grid, before.player, before.goal);
                let out = nav.move_player(d);
                let after = nav.snapshot();

                if out.blocked {
                    prop_assert!(!out.advanced);
                    prop_assert!(!out.was_correct_direction);
                    prop_assert_eq!(after.player, before.player);
                    prop_assert_eq!(after.move_count, before.move_count);
                } else {
                    prop_assert!(out.advanced);
                    prop_assert_eq!(after.move_count, before.move_count + 1);
                    let fresh = shortest_distance(&after.grid, after.player, after.goal);
                    prop_assert_eq!(out.distance_to_goal, fresh);
                    prop_assert_eq!(out.was_correct_direction, fresh < dist_before);
                }
                if after.won && !before.won {
                    wins += 1;
                }
                prop_assert_eq!(after.won, after.player == after.goal);
            }
            prop_assert!(wins <= 1);
        }
    }
}
