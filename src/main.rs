//! Terminal runner (default binary).
//!
//! One cooperative loop: poll at most one command without blocking, advance
//! gravity, repaint the whole frame, sleep for the frame interval.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tui_undo_tetris::core::{Board, GameConfig};
use tui_undo_tetris::input::{CommandSource, CrosstermInput};
use tui_undo_tetris::term::{FrameBuffer, GameView, Palette, TerminalRenderer, Viewport};
use tui_undo_tetris::types::{
    Command, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_DROP_MS, DEFAULT_FRAME_MS,
};

#[derive(Debug, Parser)]
#[command(name = "tui-undo-tetris", version, about)]
struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = DEFAULT_BOARD_WIDTH)]
    width: u16,

    /// Board height in cells
    #[arg(long, default_value_t = DEFAULT_BOARD_HEIGHT)]
    height: u16,

    /// Gravity interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_DROP_MS)]
    drop_ms: u32,

    /// Sleep between frames in milliseconds
    #[arg(long, default_value_t = DEFAULT_FRAME_MS)]
    frame_ms: u32,

    /// Piece sequence seed (defaults to one derived from the clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Draw pieces as letters instead of coloured blocks
    #[arg(long)]
    ascii: bool,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = GameConfig {
        width: args.width,
        height: args.height,
        drop_interval_ms: args.drop_ms,
        seed: args.seed.unwrap_or_else(clock_seed),
    };
    config.validate()?;
    info!("starting game with {:?}", config);

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, &args, config));

    // Always try to restore terminal state.
    let restored = term.exit();
    result.and(restored)
}

fn run(term: &mut TerminalRenderer, args: &Args, config: GameConfig) -> Result<()> {
    let mut board = Board::new(config);
    let palette = if args.ascii {
        Palette::ascii()
    } else {
        Palette::colored()
    };
    let view = GameView::new(palette);
    let mut input = CrosstermInput::new();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(args.frame_ms as u64);
    let mut last_update = Instant::now();

    loop {
        if let Some(command) = input.poll_command()? {
            if command == Command::Quit {
                info!(
                    "quit with score {}, lines {}, {} undo steps",
                    board.score(),
                    board.lines(),
                    board.history_len()
                );
                return Ok(());
            }
            // A finished game only waits for quit.
            if !board.game_over() {
                board.apply(command);
            }
        }

        // Advance by whole milliseconds and keep the remainder for later.
        let elapsed_ms = last_update.elapsed().as_millis().min(u32::MAX as u128) as u32;
        last_update += Duration::from_millis(elapsed_ms as u64);
        board.update(elapsed_ms);

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&board.view(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        thread::sleep(frame);
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    // The terminal belongs to the renderer, so logs only ever go to a file.
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
