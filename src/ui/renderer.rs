/// Presentation layer: a plain status screen for observers.
///
/// The player is not meant to look at it. It shows difficulty, move count,
/// exploration and the toast message, and the debug text view of the maze
/// when toggled. Frames are built into a line buffer and only written when
/// they differ from the last one, batched with `queue!` and flushed once.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::app::App;
use crate::config::Difficulty;
use crate::domain::maze::MazeStyle;
use crate::sim::debug_view;
use crate::sim::navigation::Phase;

pub struct Renderer {
    writer: BufWriter<Stdout>,
    last_frame: Vec<String>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::new(io::stdout()),
            last_frame: Vec::new(),
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, app: &App) -> io::Result<()> {
        let frame = compose(app);
        if frame == self.last_frame {
            return Ok(());
        }

        queue!(self.writer, Clear(ClearType::All))?;
        for (row, line) in frame.iter().enumerate() {
            let color = if row == 0 { Color::Cyan } else { Color::White };
            queue!(
                self.writer,
                MoveTo(0, row as u16),
                SetForegroundColor(color),
                Print(line)
            )?;
        }
        queue!(self.writer, ResetColor)?;
        self.writer.flush()?;

        self.last_frame = frame;
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new()
    }
}

/// Trail entries shown in the debug view.
const TRAIL_LEN: usize = 5;

fn style_label(s: MazeStyle) -> &'static str {
    match s {
        MazeStyle::Backtracker => "backtracker",
        MazeStyle::CorridorCross => "corridors",
    }
}

fn difficulty_label(d: Difficulty) -> &'static str {
    match d {
        Difficulty::Easy => "Easy",
        Difficulty::Medium => "Medium",
        Difficulty::Hard => "Hard",
    }
}

/// Lines of the status screen.
pub fn compose(app: &App) -> Vec<String> {
    let state = app.nav.state();
    let mut lines = vec![
        "ECHO MAZE".to_string(),
        String::new(),
        format!(
            "Difficulty: {}   Maze: {}x{} {}",
            difficulty_label(app.difficulty),
            state.grid.width(),
            state.grid.height(),
            style_label(app.nav.style())
        ),
        format!(
            "Moves: {}   Explored: {:.0}%",
            state.move_count,
            app.exploration()
        ),
        format!(
            "Sound: {}   Gamepad: {}",
            if app.sound.is_initialized() { "on" } else { "off (silent)" },
            if app.gamepad_connected { "connected" } else { "none" }
        ),
    ];

    if app.nav.phase() == Phase::Won {
        lines.push("*** EXIT FOUND ***".to_string());
    }

    lines.push(String::new());
    lines.push(app.message.clone());
    lines.push(String::new());
    lines.push("[Arrows/WASD] move  [F2] debug view  [R] new maze  [Esc/Q] quit".to_string());

    if app.show_debug {
        lines.push(String::new());
        let maze = debug_view::render(&state.grid, state.player, state.goal);
        lines.extend(maze.lines().map(str::to_string));
        lines.push(format!("Distance to goal: {}", app.nav.distance_to_goal()));

        let trail: Vec<String> = app
            .history
            .recent(TRAIL_LEN)
            .iter()
            .map(|v| format!("({},{})", v.x, v.y))
            .collect();
        let idle = app
            .history
            .since_last_move()
            .map_or_else(|| "-".to_string(), |d| format!("{}s", d.as_secs()));
        lines.push(format!("Trail: {}   Idle: {}", trail.join(" "), idle));
    }

    lines
}
