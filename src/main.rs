use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute, terminal,
};
use flappy_arcade::audio::AudioManager;
use flappy_arcade::config::{Config, Options, USAGE};
use flappy_arcade::game::{Game, Settings};
use flappy_arcade::input::{self, Command};
use flappy_arcade::render::{self, Canvas, LETTERBOX, Viewport};
use log::info;
use std::fs::File;
use std::io::{self, Stdout, stdout};
use std::path::Path;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    let opts = match Options::from_args(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    if opts.show_help {
        print!("{USAGE}");
        return Ok(());
    }
    if opts.show_version {
        println!("flappy-arcade {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logging(opts.log_file.as_deref())?;

    let seed = opts.seed.unwrap_or_else(rand::random);
    info!("starting with seed {seed}, level {}, {} fps", opts.level, opts.fps);

    let settings = Settings {
        level: opts.level,
        sound: opts.sound,
    };
    let mut game = Game::new(Config::new(), settings, seed);
    let mut audio = AudioManager::open(opts.sound);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        EnableMouseCapture,
    )?;

    let result = run(&mut out, &mut game, &mut audio, opts.frame_duration());
    let restored = cleanup(&mut out);
    result?;
    restored.context("restoring the terminal")?;
    info!("quit after {} rounds", game.rounds());
    Ok(())
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    // The terminal belongs to the game, so only log when asked to a file.
    let Some(path) = path else { return Ok(()) };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn cleanup(out: &mut Stdout) -> io::Result<()> {
    execute!(
        out,
        DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()
}

fn run(out: &mut Stdout, game: &mut Game, audio: &mut AudioManager, frame_dur: Duration) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols as usize, rows as usize * 2, LETTERBOX);
    let fit = |canvas: &Canvas, game: &Game| {
        Viewport::fit(
            canvas.width(),
            canvas.height(),
            game.config.board_width,
            game.config.board_height,
        )
    };
    let mut viewport = fit(&canvas, &*game);
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match input::translate(&event::read()?, &viewport) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::Resize { cols, rows }) => {
                    canvas.resize(cols as usize, rows as usize * 2, LETTERBOX);
                    viewport = fit(&canvas, &*game);
                }
                Some(Command::Game(action)) => game.handle(action),
                None => {}
            }
        }

        // Update
        let now = Instant::now();
        game.tick(now - last);
        last = now;

        // Sound
        audio.set_enabled(game.settings.sound);
        audio.play_events(&game.take_events());

        // Render
        render::draw(game, &mut canvas);
        canvas.present(out)?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}
