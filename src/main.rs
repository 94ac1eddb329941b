/// Entry point and game loop.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use echomaze::app::App;
use echomaze::audio::stage::{AudioOutput, NullOutput, SoundStage};
use echomaze::config::{Difficulty, GameConfig};
use echomaze::ui::gamepad::GamepadState;
use echomaze::ui::input::InputState;
use echomaze::ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

/// Find the exit of a maze you can only hear.
#[derive(Parser, Debug)]
#[command(name = "echomaze", version, about)]
struct Args {
    /// Maze difficulty: easy, medium or hard. Overrides config.toml.
    #[arg(value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Seed for maze layout and noise. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Run without opening an audio device.
    #[arg(long)]
    mute: bool,

    /// Log file (the terminal belongs to the game while it runs).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::parse(s).ok_or_else(|| format!("unknown difficulty '{s}' (easy, medium, hard)"))
}

fn init_logging(path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let path = path.unwrap_or_else(|| std::env::temp_dir().join("echomaze.log"));
    let file = File::create(&path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(path)
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn open_output(config: &GameConfig, mute: bool) -> Box<dyn AudioOutput> {
    if mute || !config.audio.enabled {
        return Box::new(NullOutput);
    }
    #[cfg(feature = "sound")]
    {
        Box::new(echomaze::audio::device::RodioOutput::new())
    }
    #[cfg(not(feature = "sound"))]
    {
        Box::new(NullOutput)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_path = init_logging(args.log_file.clone())?;

    let mut config = GameConfig::load();
    if let Some(d) = args.difficulty {
        config.maze.difficulty = d;
    }
    let seed = args.seed.or(config.maze.seed).unwrap_or_else(time_seed);
    tracing::info!(
        difficulty = ?config.maze.difficulty,
        seed,
        log = %log_path.display(),
        "starting echomaze"
    );

    let mut sound = SoundStage::new(
        open_output(&config, args.mute),
        config.audio.sample_rate,
        config.audio.master_gain,
        seed,
    );
    // Before the first frame: no cue may play until the output is resumed.
    sound.initialize();

    let mut app = App::new(&config, sound, seed);
    let mut renderer = Renderer::new();
    renderer.init().context("terminal init failed")?;

    let result = game_loop(&mut app, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    result?;

    let state = app.nav.state();
    println!("Thanks for playing Echo Maze!");
    if state.won {
        println!("Last maze escaped in {} moves.", state.move_count);
    }
    Ok(())
}

fn game_loop(app: &mut App, renderer: &mut Renderer, config: &GameConfig) -> anyhow::Result<()> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    app.set_gamepad_connected(gp.connected);

    while !app.should_quit() {
        kb.drain_events();
        gp.update();
        app.set_gamepad_connected(gp.connected);

        for &cmd in kb.commands() {
            app.handle(cmd);
        }
        for cmd in gp.commands() {
            app.handle(cmd);
        }

        app.tick();
        renderer.render(app)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    tracing::info!("quit");
    Ok(())
}
