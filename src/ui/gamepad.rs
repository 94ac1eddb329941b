/// Gamepad input tracker using gilrs.
///
/// Button mapping is loaded from config.toml via `load_button_config()`.
/// Default mapping:
///   D-pad / Left Stick    →  Move (one step per press)
///   A / Start             →  Confirm
///   Y                     →  New maze
///   Select                →  Quit

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::domain::grid::Direction;
use super::input::Command;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.5;

/// Logical button identifiers (one per physical face/shoulder button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,
    R1,
    Start,
    Select,
}

const BTN_COUNT: usize = 8;

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH" => Some(Btn::A),
            "B" | "EAST" => Some(Btn::B),
            "X" | "WEST" => Some(Btn::X),
            "Y" | "NORTH" => Some(Btn::Y),
            "L1" | "LB" => Some(Btn::L1),
            "R1" | "RB" => Some(Btn::R1),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South => Some(Btn::A),
            Button::East => Some(Btn::B),
            Button::West => Some(Btn::X),
            Button::North => Some(Btn::Y),
            Button::LeftTrigger => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::Start => Some(Btn::Start),
            Button::Select => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Action-to-button mapping (loaded from config).
struct ActionMap {
    confirm: Vec<Btn>,
    restart: Vec<Btn>,
    quit: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap {
            confirm: vec![Btn::A, Btn::Start],
            restart: vec![Btn::Y],
            quit: vec![Btn::Select],
        }
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    /// Buttons that went down since the last `update()`, indexed by `Btn`.
    just_pressed: [bool; BTN_COUNT],
    /// Directions that went down since the last `update()`, in order.
    moves: Vec<Direction>,

    /// Stick direction currently held past the deadzone.
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_dir: Option<Direction>,
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_x: f32,
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_y: f32,

    action_map: ActionMap,

    pub connected: bool,
}

impl GamepadState {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs_opt, connected) = match Gilrs::new() {
            Ok(g) => {
                let has_pad = g.gamepads().next().is_some();
                (Some(g), has_pad)
            }
            Err(e) => {
                tracing::info!(error = %e, "gamepad support unavailable");
                (None, false)
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            just_pressed: [false; BTN_COUNT],
            moves: Vec::with_capacity(4),
            stick_dir: None,
            stick_x: 0.0,
            stick_y: 0.0,
            action_map: ActionMap::default(),
            connected,
        }
    }

    /// Load button mapping from config. Empty or unrecognised lists keep
    /// the defaults.
    pub fn load_button_config(&mut self, cfg: &GamepadConfig) {
        fn parse_list(names: &[String]) -> Vec<Btn> {
            names.iter().filter_map(|s| Btn::from_name(s)).collect()
        }
        let map = &mut self.action_map;
        let cf = parse_list(&cfg.confirm);
        if !cf.is_empty() { map.confirm = cf; }
        let rs = parse_list(&cfg.restart);
        if !rs.is_empty() { map.restart = rs; }
        let qt = parse_list(&cfg.quit);
        if !qt.is_empty() { map.quit = qt; }
    }

    pub fn update(&mut self) {
        self.just_pressed = [false; BTN_COUNT];
        self.moves.clear();

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    /// Commands produced since the last `update()`. Moves come first.
    pub fn commands(&self) -> Vec<Command> {
        let mut out: Vec<Command> = self.moves.iter().map(|&d| Command::Move(d)).collect();
        if self.any_just_pressed(&self.action_map.confirm) {
            out.push(Command::Confirm);
        }
        if self.any_just_pressed(&self.action_map.restart) {
            out.push(Command::NewMaze);
        }
        if self.any_just_pressed(&self.action_map.quit) {
            out.push(Command::Quit);
        }
        out
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let Some(gilrs) = &mut self.gilrs else { return };
        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.connected = true;
                    self.press_button(btn);
                }
                EventType::AxisChanged(axis, value, _) => {
                    self.connected = true;
                    match axis {
                        Axis::LeftStickX => self.stick_x = value,
                        Axis::LeftStickY => self.stick_y = value,
                        _ => {}
                    }
                    self.update_stick();
                }
                EventType::Connected => self.connected = true,
                EventType::Disconnected => {
                    self.connected = false;
                    self.stick_x = 0.0;
                    self.stick_y = 0.0;
                    self.stick_dir = None;
                }
                _ => {}
            }
        }
    }

    #[cfg(feature = "gamepad")]
    fn press_button(&mut self, gilrs_btn: Button) {
        let dpad = match gilrs_btn {
            Button::DPadUp => Some(Direction::North),
            Button::DPadDown => Some(Direction::South),
            Button::DPadLeft => Some(Direction::West),
            Button::DPadRight => Some(Direction::East),
            _ => None,
        };
        if let Some(d) = dpad {
            self.moves.push(d);
        } else if let Some(btn) = Btn::from_gilrs(gilrs_btn) {
            self.just_pressed[btn as usize] = true;
        }
    }

    /// A stick push counts as one move when it first crosses the deadzone.
    #[cfg(feature = "gamepad")]
    fn update_stick(&mut self) {
        let dir = stick_direction(self.stick_x, self.stick_y);
        if dir != self.stick_dir {
            if let Some(d) = dir {
                self.moves.push(d);
            }
            self.stick_dir = dir;
        }
    }

    fn any_just_pressed(&self, btns: &[Btn]) -> bool {
        btns.iter().any(|&b| self.just_pressed[b as usize])
    }
}

impl Default for GamepadState {
    fn default() -> Self {
        GamepadState::new()
    }
}

/// Dominant stick axis past the deadzone. gilrs reports +y as up.
#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
fn stick_direction(x: f32, y: f32) -> Option<Direction> {
    if x.abs() < STICK_DEADZONE && y.abs() < STICK_DEADZONE {
        return None;
    }
    Some(if x.abs() >= y.abs() {
        if x > 0.0 { Direction::East } else { Direction::West }
    } else if y > 0.0 {
        Direction::North
    } else {
        Direction::South
    })
}
