//! Terminal runner (default binary).
//!
//! Reads keys with crossterm, feeds them to the game as commands, ticks
//! gravity from a monotonic clock and redraws through the framebuffer
//! renderer.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::LevelFilter;

use cubetris::core::{GameConfig, GameSnapshot, GameState, SimpleRng};
use cubetris::input::{handle_key_event, should_quit};
use cubetris::logger;
use cubetris::term::{restore_terminal, FrameBuffer, GameView, TerminalRenderer, Viewport};
use cubetris::types::{FIELD_DEPTH, FIELD_HEIGHT, FIELD_WIDTH, TICK_MS};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the piece sequence. The same seed replays the same pieces.
    /// Defaults to one taken from the system clock.
    #[arg(short, long)]
    seed: Option<u32>,
    /// Field width (x).
    #[arg(long, default_value_t = FIELD_WIDTH)]
    width: usize,
    /// Field height (y).
    #[arg(long, default_value_t = FIELD_HEIGHT)]
    height: usize,
    /// Field depth (z).
    #[arg(long, default_value_t = FIELD_DEPTH)]
    depth: usize,
    /// Append log records to this file. Logging is off without it.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Most verbose level written to the log file.
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.log_file.as_deref(), args.log_level)?;

    let config = GameConfig::default().with_dimensions(args.width, args.height, args.depth);
    let seed = args.seed.unwrap_or_else(clock_seed);
    let game = GameState::with_source(config, SimpleRng::new(seed))?;
    log::info!(
        "cubetris starting: seed {} field {}x{}x{}",
        seed,
        args.width,
        args.height,
        args.depth
    );

    // The renderer restores the terminal on the normal path; a panic skips it.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    let _ = term.exit();
    log::logger().flush();
    result
}

fn run(term: &mut TerminalRenderer, mut game: GameState) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::for_config(game.config());
    let mut fb = FrameBuffer::new(0, 0);

    let clock = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let viewport = term.viewport().unwrap_or(Viewport::new(80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        log::info!("quit at score {}", game.score());
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        game.apply_command(command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(clock.elapsed().as_millis() as u64);
        }

        if let Some(ev) = game.take_last_event() {
            if ev.cleared > 0 {
                log::info!(
                    "cleared {} layer(s) for {} (ren {}, b2b {}, perfect {})",
                    ev.cleared,
                    ev.score_gained,
                    ev.ren,
                    ev.back_to_back,
                    ev.perfect_clear
                );
            } else {
                log::debug!("locked {} cells", ev.cells_merged);
            }
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
