use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chicken_shooter::audio::TracedAudio;
use chicken_shooter::display::terminal::{CellMapping, TerminalSurface};
use chicken_shooter::input::{Flow, InputTracker};
use chicken_shooter::{Game, GameConfig};

/// Logical units per terminal cell when the viewport follows the terminal.
/// Cells are roughly twice as tall as they are wide.
const UNITS_PER_COL: f32 = 10.0;
const UNITS_PER_ROW: f32 = 20.0;

/// Longest stretch of time handed to the timers in one step, so a stalled
/// terminal does not come back to a burst of spawns.
const MAX_CATCH_UP: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "chicken_shooter", about = "Shoot the falling chickens before they reach your ship")]
struct Cli {
    /// Logical viewport width (defaults to the terminal width scaled).
    #[arg(long)]
    width: Option<f32>,

    /// Logical viewport height (defaults to the terminal height scaled).
    #[arg(long)]
    height: Option<f32>,

    /// Frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for target placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (filtered by RUST_LOG, default `info`).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs only go to a file when asked.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Fixed-rate loop: drain input, apply held keys, advance the timers by the
/// real time that passed, run the render tick if one is requested, present.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game<TracedAudio>,
    surface: &mut TerminalSurface,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let frame_budget = game.config().frame_duration();
    let mut input = InputTracker::new();
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        input.begin_frame();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match input.handle_event(ev, game, surface.mapping()) {
                Flow::Quit => return Ok(()),
                Flow::Resize(cols, rows) => {
                    surface.resize(cols, rows);
                    out.execute(terminal::Clear(terminal::ClearType::All))?;
                    game.render(surface);
                    surface.present(out)?;
                }
                Flow::Continue => {}
            }
        }
        input.apply_held(game);

        let now = Instant::now();
        game.advance((now - last).min(MAX_CATCH_UP), rng);
        last = now;

        if game.frame(surface) {
            surface.present(out)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let (cols, rows) = terminal::size().context("cannot read terminal size")?;
    let config = GameConfig {
        frame_rate: cli.fps,
        ..GameConfig::default()
    }
    .with_viewport(
        cli.width.unwrap_or(cols as f32 * UNITS_PER_COL),
        cli.height.unwrap_or(rows as f32 * UNITS_PER_ROW),
    );
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = Game::new(config, TracedAudio::new()).context("invalid game configuration")?;
    let mut surface = TerminalSurface::new(CellMapping::new(
        cols,
        rows,
        game.config().viewport_width,
        game.config().viewport_height,
    ));
    info!(cols, rows, seed = ?cli.seed, "starting");

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut game, &mut surface, &rx, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(score = game.score(), "exiting");
    result.context("terminal I/O failed")
}
