/// External configuration loader.
///
/// Reads the first `config.toml` found in the executable's directory, the
/// CWD, `~/.local/share/echomaze` or `/usr/share/echomaze`. Missing keys
/// take their defaults; a bad value for a single key falls back for that
/// key only, while a file that is not valid TOML falls back entirely.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::grid::coerce_dimension;
use crate::domain::maze::MazeStyle;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub maze: MazeConfig,
    pub audio: AudioConfig,
    pub gamepad: GamepadConfig,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Generation strategy for this difficulty.
    pub fn style(self) -> MazeStyle {
        match self {
            Difficulty::Easy => MazeStyle::CorridorCross,
            Difficulty::Medium | Difficulty::Hard => MazeStyle::Backtracker,
        }
    }

    pub fn parse(s: &str) -> Option<Difficulty> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MazeConfig {
    pub difficulty: Difficulty,
    /// Fixed seed for reproducible mazes and noise; random when `None`.
    pub seed: Option<u64>,
    pub easy_size: (usize, usize),
    pub medium_size: (usize, usize),
    pub hard_size: (usize, usize),
}

impl MazeConfig {
    /// Requested `(width, height)` for the configured difficulty.
    pub fn size(&self) -> (usize, usize) {
        self.size_for(self.difficulty)
    }

    pub fn size_for(&self, difficulty: Difficulty) -> (usize, usize) {
        match difficulty {
            Difficulty::Easy => self.easy_size,
            Difficulty::Medium => self.medium_size,
            Difficulty::Hard => self.hard_size,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AudioConfig {
    pub enabled: bool,
    pub sample_rate: u32,
    pub master_gain: f32,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub confirm: Vec<String>,
    pub restart: Vec<String>,
    pub quit: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    maze: TomlMaze,
    #[serde(default)]
    audio: TomlAudio,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlMaze {
    #[serde(default = "default_difficulty")]
    difficulty: String,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default = "default_easy_size")]
    easy_size: [usize; 2],
    #[serde(default = "default_medium_size")]
    medium_size: [usize; 2],
    #[serde(default = "default_hard_size")]
    hard_size: [usize; 2],
}

#[derive(Deserialize, Debug)]
struct TomlAudio {
    #[serde(default = "default_audio_enabled")]
    enabled: bool,
    #[serde(default = "default_sample_rate")]
    sample_rate: u32,
    #[serde(default = "default_master_gain")]
    master_gain: f32,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_restart")]
    restart: Vec<String>,
    #[serde(default = "default_quit")]
    quit: Vec<String>,
}

// ── Defaults ──

fn default_difficulty() -> String { "medium".into() }
fn default_easy_size() -> [usize; 2] { [7, 7] }
fn default_medium_size() -> [usize; 2] { [11, 11] }
fn default_hard_size() -> [usize; 2] { [17, 17] }

fn default_audio_enabled() -> bool { true }
fn default_sample_rate() -> u32 { 44100 }
fn default_master_gain() -> f32 { 0.8 }

fn default_confirm() -> Vec<String> { vec!["A".into(), "Start".into()] }
fn default_restart() -> Vec<String> { vec!["Y".into()] }
fn default_quit() -> Vec<String> { vec!["Select".into()] }

impl Default for TomlMaze {
    fn default() -> Self {
        TomlMaze {
            difficulty: default_difficulty(),
            seed: None,
            easy_size: default_easy_size(),
            medium_size: default_medium_size(),
            hard_size: default_hard_size(),
        }
    }
}

impl Default for TomlAudio {
    fn default() -> Self {
        TomlAudio {
            enabled: default_audio_enabled(),
            sample_rate: default_sample_rate(),
            master_gain: default_master_gain(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            confirm: default_confirm(),
            restart: default_restart(),
            quit: default_quit(),
        }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(t: TomlConfig) -> Self {
        let size = |[w, h]: [usize; 2]| (coerce_dimension(w), coerce_dimension(h));
        GameConfig {
            maze: MazeConfig {
                difficulty: difficulty_or_default(&t.maze.difficulty),
                seed: t.maze.seed,
                easy_size: size(t.maze.easy_size),
                medium_size: size(t.maze.medium_size),
                hard_size: size(t.maze.hard_size),
            },
            audio: AudioConfig {
                enabled: t.audio.enabled,
                // Keep the rate in a range every output device accepts.
                sample_rate: t.audio.sample_rate.clamp(8000, 96000),
                master_gain: t.audio.master_gain.clamp(0.0, 1.0),
            },
            gamepad: GamepadConfig {
                confirm: t.gamepad.confirm,
                restart: t.gamepad.restart,
                quit: t.gamepad.quit,
            },
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

/// Case-insensitive difficulty name; unknown names warn and use medium.
fn difficulty_or_default(name: &str) -> Difficulty {
    Difficulty::parse(name).unwrap_or_else(|| {
        tracing::warn!(difficulty = name, "unknown difficulty; using medium");
        Difficulty::Medium
    })
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) `~/.local/share/echomaze`, (4) `/usr/share/echomaze`.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        load_toml(&candidate_dirs()).into()
    }

    /// Parse config text. Errors fall back to defaults with a warning.
    pub fn from_toml_str(text: &str) -> Self {
        parse_toml(text, Path::new("<inline>")).into()
    }
}

/// Candidate directories to search: exe dir + CWD + data paths (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/echomaze");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    let sys = PathBuf::from("/usr/share/echomaze");
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    tracing::info!(path = %path.display(), "loading config");
                    return parse_toml(&text, &path);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "could not read config");
                }
            }
        }
    }
    TomlConfig::default()
}

fn parse_toml(text: &str, path: &Path) -> TomlConfig {
    match toml::from_str::<TomlConfig>(text) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "config parse error; using defaults");
            TomlConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::MAX_DIMENSION;

    #[test]
    fn empty_text_gives_defaults() {
        let cfg = GameConfig::from_toml_str("");
        assert_eq!(cfg.maze.difficulty, Difficulty::Medium);
        assert_eq!(cfg.maze.size(), (11, 11));
        assert_eq!(cfg.maze.seed, None);
        assert!(cfg.audio.enabled);
        assert_eq!(cfg.audio.sample_rate, 44100);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = GameConfig::from_toml_str(
            "[maze]\ndifficulty = \"hard\"\nseed = 42\nhard_size = [21, 15]\n\n[audio]\nenabled = false\n",
        );
        assert_eq!(cfg.maze.difficulty, Difficulty::Hard);
        assert_eq!(cfg.maze.seed, Some(42));
        assert_eq!(cfg.maze.size(), (21, 15));
        assert_eq!(cfg.maze.size_for(Difficulty::Easy), (7, 7));
        assert!(!cfg.audio.enabled);
        assert_eq!(cfg.audio.master_gain, 0.8);
        assert_eq!(cfg.gamepad.quit, vec!["Select".to_string()]);
    }

    #[test]
    fn capitalised_difficulty_keeps_other_keys() {
        let cfg = GameConfig::from_toml_str(
            "[maze]\ndifficulty = \"Hard\"\nseed = 42\n\n[audio]\nenabled = false\n",
        );
        assert_eq!(cfg.maze.difficulty, Difficulty::Hard);
        assert_eq!(cfg.maze.seed, Some(42));
        assert!(!cfg.audio.enabled);
    }

    #[test]
    fn unknown_difficulty_only_resets_that_key() {
        let cfg = GameConfig::from_toml_str("[maze]\ndifficulty = \"nightmare\"\nseed = 9\n");
        assert_eq!(cfg.maze.difficulty, Difficulty::Medium);
        assert_eq!(cfg.maze.seed, Some(9));
    }

    #[test]
    fn maze_sizes_are_bounded() {
        let cfg = GameConfig::from_toml_str(
            "[maze]\neasy_size = [0, 4]\nhard_size = [100000, 9]\n",
        );
        assert_eq!(cfg.maze.size_for(Difficulty::Easy), (5, 5));
        assert_eq!(cfg.maze.size_for(Difficulty::Hard), (MAX_DIMENSION, 9));
    }

    #[test]
    fn malformed_text_falls_back() {
        let cfg = GameConfig::from_toml_str("[maze\ndifficulty = ");
        assert_eq!(cfg.maze.difficulty, Difficulty::Medium);
    }

    #[test]
    fn audio_values_are_clamped() {
        let cfg = GameConfig::from_toml_str("[audio]\nsample_rate = 10\nmaster_gain = 3.0\n");
        assert_eq!(cfg.audio.sample_rate, 8000);
        assert_eq!(cfg.audio.master_gain, 1.0);
    }

    #[test]
    fn difficulty_selects_strategy() {
        assert_eq!(Difficulty::Easy.style(), MazeStyle::CorridorCross);
        assert_eq!(Difficulty::Hard.style(), MazeStyle::Backtracker);
        assert_eq!(Difficulty::parse("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("x"), None);
    }
}
