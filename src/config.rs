use std::path::PathBuf;
use std::time::Duration;

use crate::error::{FlappyError, Result};
use crate::level::SpeedLevel;

/// Game tuning parameters, in board units and frames.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Board
    pub const BOARD_WIDTH: f64 = 360.0;
    pub const BOARD_HEIGHT: f64 = 640.0;

    // Bird
    pub const BIRD_WIDTH: f64 = 34.0;
    pub const BIRD_HEIGHT: f64 = 24.0;
    pub const GRAVITY: f64 = 0.4;
    pub const JUMP_VELOCITY: f64 = -6.0;

    // Pipes
    pub const PIPE_WIDTH: f64 = 64.0;
    pub const PIPE_HEIGHT: f64 = 512.0;
    pub const COLLISION_SKIP_MARGIN: f64 = 10.0;

    // Timers
    pub const SPAWN_INTERVAL: Duration = Duration::from_millis(1500);
    pub const RESTART_DELAY: Duration = Duration::from_millis(500);
    pub const SOUND_TOGGLE_DEBOUNCE: Duration = Duration::from_millis(300);

    // Loop
    pub const DEFAULT_FPS: u32 = 60;
}

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub board_width: f64,
    pub board_height: f64,
    pub bird_width: f64,
    pub bird_height: f64,
    pub gravity: f64,
    pub jump_velocity: f64,
    pub pipe_width: f64,
    pub pipe_height: f64,
    pub collision_skip_margin: f64,
    pub spawn_interval: Duration,
    pub restart_delay: Duration,
    pub sound_toggle_debounce: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_width: Params::BOARD_WIDTH,
            board_height: Params::BOARD_HEIGHT,
            bird_width: Params::BIRD_WIDTH,
            bird_height: Params::BIRD_HEIGHT,
            gravity: Params::GRAVITY,
            jump_velocity: Params::JUMP_VELOCITY,
            pipe_width: Params::PIPE_WIDTH,
            pipe_height: Params::PIPE_HEIGHT,
            collision_skip_margin: Params::COLLISION_SKIP_MARGIN,
            spawn_interval: Params::SPAWN_INTERVAL,
            restart_delay: Params::RESTART_DELAY,
            sound_toggle_debounce: Params::SOUND_TOGGLE_DEBOUNCE,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed horizontal position of the bird.
    pub fn bird_x(&self) -> f64 {
        self.board_width / 8.0
    }

    pub fn bird_start_y(&self) -> f64 {
        self.board_height / 2.0
    }

    /// Vertical opening between the top and bottom pipe of a pair.
    pub fn gap_height(&self) -> f64 {
        self.board_height / 4.0
    }

    /// Where new pipe pairs appear: just past the right edge.
    pub fn spawn_x(&self) -> f64 {
        self.board_width
    }
}

/// Runtime options taken from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub level: SpeedLevel,
    pub sound: bool,
    pub seed: Option<u64>,
    pub fps: u32,
    pub log_file: Option<PathBuf>,
    pub show_help: bool,
    pub show_version: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            level: SpeedLevel::default(),
            sound: true,
            seed: None,
            fps: Params::DEFAULT_FPS,
            log_file: None,
            show_help: false,
            show_version: false,
        }
    }
}

pub const USAGE: &str = "\
flappy-arcade - Flappy Bird in your terminal

USAGE:
    flappy-arcade [OPTIONS]

OPTIONS:
    --level <LEVEL>   Starting speed level: soft, normal, medium, hard [default: normal]
    --mute            Start with sound off
    --seed <N>        Seed for the pipe generator
    --fps <N>         Frames per second [default: 60]
    --log <PATH>      Write a log to PATH (filter with RUST_LOG)
    -h, --help        Print this help
    -v, --version     Print the version

KEYS:
    Space / Up / x    Jump, or restart after a crash
    p                 Pause
    Esc / Backspace   Back to the menu
    Enter, s, h       Play, Settings, Help (menu)
    m, 1-4            Sound, level (settings)
    q                 Quit
";

impl Options {
    /// Parses arguments, not including the program name.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut opts = Options::default();
        let mut args = args.into_iter().map(Into::<String>::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--level" => {
                    let value = args.next().ok_or(FlappyError::MissingValue("--level"))?;
                    opts.level = value.parse()?;
                }
                "--mute" => opts.sound = false,
                "--seed" => opts.seed = Some(parse_number(&mut args, "--seed")?),
                "--fps" => {
                    let fps: u32 = parse_number(&mut args, "--fps")?;
                    opts.fps = fps.clamp(1, 240);
                }
                "--log" => {
                    let value = args.next().ok_or(FlappyError::MissingValue("--log"))?;
                    opts.log_file = Some(PathBuf::from(value));
                }
                "--help" | "-h" => opts.show_help = true,
                "--version" | "-v" => opts.show_version = true,
                _ => return Err(FlappyError::UnknownArgument(arg)),
            }
        }
        Ok(opts)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

fn parse_number<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T> {
    let value = args.next().ok_or(FlappyError::MissingValue(flag))?;
    value
        .parse()
        .map_err(|_| FlappyError::InvalidNumber { flag, value })
}
