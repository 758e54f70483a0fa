use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use retro_snake::config::PALETTE_RETRO;
use retro_snake::error::AppError;
use retro_snake::game::{GamePhase, GameState};
use retro_snake::input::{GameInput, InputHandler};
use retro_snake::logging;
use retro_snake::session::GameSession;
use retro_snake::settings::{Settings, SettingsOverrides};
use retro_snake::terminal_runtime::{GameScreen, install_panic_hook};
use simplelog::LevelFilter;

/// How long one input poll may block before the frame is redrawn.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about = "Retro Snake in your terminal")]
struct Cli {
    /// Board side length in cells.
    #[arg(long)]
    grid_size: Option<u16>,

    /// Milliseconds between ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the log file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(logging::default_log_path);
    logging::init(&log_path, cli.log_level.into())?;
    log::info!(
        "starting retro-snake: {}x{} board, {} ms ticks",
        settings.grid_size,
        settings.grid_size,
        settings.tick_interval_ms
    );

    install_panic_hook();
    run(settings)
}

fn resolve_settings(cli: &Cli) -> Result<Settings, AppError> {
    let overrides = SettingsOverrides {
        grid_size: cli.grid_size,
        tick_interval_ms: cli.tick_ms,
        seed: cli.seed,
    };

    Ok(Settings::load(cli.config.as_deref())?.resolve(overrides)?)
}

fn run(settings: Settings) -> Result<(), AppError> {
    let mut screen = GameScreen::enter(PALETTE_RETRO)?;
    let state = match settings.seed {
        Some(seed) => GameState::new_with_seed(settings.grid(), seed),
        None => GameState::new(settings.grid()),
    };
    let mut session = GameSession::with_interval(state, settings.tick_interval());
    let updates = session.subscribe();
    let mut input = InputHandler::new();
    let mut snapshot = session.snapshot();

    loop {
        screen.present(&snapshot)?;

        if let Some(game_input) = input.poll_input(INPUT_POLL_INTERVAL)? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Start if snapshot.phase != GamePhase::Running => session.start(),
                GameInput::Start => {}
                GameInput::Direction(direction) => {
                    let _ = session.set_pending_direction(direction);
                }
            }
        }

        while let Ok(next) = updates.try_recv() {
            snapshot = next;
        }
    }

    session.stop();
    log::info!("quit with high score {}", snapshot.high_score);
    Ok(())
}
