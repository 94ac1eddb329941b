/// Game orchestration: turns commands into engine moves and engine outcomes
/// into sound cues, and keeps the presentation-only state (history, toast
/// message, debug toggle) that the renderer draws.

use crate::audio::effect::Effect;
use crate::audio::stage::SoundStage;
use crate::config::{Difficulty, GameConfig};
use crate::sim::event::{cues_for, SoundCue};
use crate::sim::history::MoveHistory;
use crate::sim::navigation::{NavigationEngine, Phase};
use crate::ui::input::Command;

/// Frames a toast message stays visible.
const MESSAGE_FRAMES: u32 = 240;

pub struct App {
    pub nav: NavigationEngine,
    pub sound: SoundStage,
    pub history: MoveHistory,
    pub difficulty: Difficulty,
    pub show_debug: bool,
    pub message: String,
    pub gamepad_connected: bool,
    message_timer: u32,
    quit: bool,
}

impl App {
    pub fn new(config: &GameConfig, sound: SoundStage, seed: u64) -> Self {
        let difficulty = config.maze.difficulty;
        let (w, h) = config.maze.size();
        let nav = NavigationEngine::new(w, h, difficulty.style(), seed);
        let mut app = App {
            nav,
            sound,
            history: MoveHistory::new(),
            difficulty,
            show_debug: false,
            message: String::new(),
            gamepad_connected: false,
            message_timer: 0,
            quit: false,
        };
        app.set_message("Find the exit. Listen closely.");
        app
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn set_message(&mut self, msg: &str) {
        self.message = msg.to_string();
        self.message_timer = MESSAGE_FRAMES;
    }

    /// Track the gamepad link; a change is announced in the toast line.
    pub fn set_gamepad_connected(&mut self, connected: bool) {
        if connected == self.gamepad_connected {
            return;
        }
        self.gamepad_connected = connected;
        tracing::info!(connected, "gamepad");
        self.set_message(if connected { "Gamepad connected." } else { "Gamepad disconnected." });
    }

    /// Count down the toast message. Call once per frame.
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message.clear();
            }
        }
    }

    pub fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => self.quit = true,
            Command::ToggleDebug => self.show_debug = !self.show_debug,
            Command::NewMaze => self.new_maze(),
            Command::Confirm => {
                if self.nav.phase() == Phase::Won {
                    self.new_maze();
                }
            }
            Command::Move(dir) => {
                if self.nav.phase() == Phase::Won {
                    return;
                }
                let outcome = self.nav.move_player(dir);
                let state = self.nav.state();
                let openings = state.grid.open_neighbors(state.player).count();
                if outcome.advanced {
                    self.history.record(state.player);
                }
                tracing::debug!(?dir, ?outcome, "move");

                for cue in cues_for(dir, &outcome, openings, state.won) {
                    self.play_cue(cue);
                }
                if self.nav.phase() == Phase::Won {
                    let moves = self.nav.state().move_count;
                    self.set_message(&format!("You escaped in {moves} moves! [Enter] new maze"));
                }
            }
        }
    }

    fn new_maze(&mut self) {
        self.nav.reset(None);
        self.history = MoveHistory::new();
        self.set_message("New maze. Find the exit.");
    }

    fn play_cue(&self, cue: SoundCue) {
        match cue {
            SoundCue::Footstep { correct, pan } => self.sound.play_directional_footstep(correct, pan),
            SoundCue::WallBump { pan } => self.sound.play(Effect::WallCollision, pan),
            SoundCue::Echo => self.sound.play(Effect::AmbientEcho, 0.0),
            SoundCue::Proximity { distance } => self.sound.play_goal_proximity(distance),
            SoundCue::Victory => self.sound.play(Effect::Victory, 0.0),
        }
    }

    /// Exploration of the current maze, in percent.
    pub fn exploration(&self) -> f32 {
        self.history.exploration_percent(&self.nav.state().grid)
    }
}
