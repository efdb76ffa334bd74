//! lyricbar demo entrypoint: plays lyric lines into a terminal status bar.
//!
//! # Architecture
//!
//! - Player thread: publishes the lyrics once, then advances the line index on a timer
//! - Coalescing thread: owned by `LyricsDisplay`, turns signals into screen text
//! - Main thread: the UI context; runs the fitter against the terminal bar

mod player;

use std::panic;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::terminal::size as terminal_size;
use lyricbar::surface::TerminalSurface;
use lyricbar::{
    init_logging, init_tracing, log_debug, log_file_path, log_panic, AppConfig, LyricsDisplay,
    LyricsSnapshot, PlaybackFlag, SharedSettings,
};

use crate::player::spawn_player;

/// How often the UI loop checks for terminal resizes while idle.
const UI_TICK_MS: u64 = 100;

fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        log_panic(info);
        previous(info);
    }));
}

fn main() -> Result<()> {
    let config = AppConfig::parse_args()?;
    if config.lines.is_empty() {
        bail!("nothing to play: pass at least one --line");
    }
    init_logging(&config);
    init_tracing(&config);
    install_panic_hook();
    log_debug("=== lyricbar started ===");
    log_debug(&format!("Log file: {:?}", log_file_path()));

    let settings = SharedSettings::new(config.display_settings());
    let playback = PlaybackFlag::new(!config.paused);
    let (display, mut driver) =
        LyricsDisplay::spawn(settings.clone(), Arc::new(playback.clone()), None)?;
    let mut surface = TerminalSurface::stdout(config.bar_width, config.reserved_cols)?;
    log_debug(&format!(
        "render mode: {}, bar width: {}, reserved: {}",
        settings.get().render_mode().label(),
        config.bar_width,
        config.reserved_cols
    ));

    let lyrics = Arc::new(LyricsSnapshot::new(
        config.lines.iter().cloned(),
        config.language.as_deref(),
    ));
    let player = spawn_player(display, lyrics, Duration::from_millis(config.interval_ms))?;

    let mut last_size = terminal_size().ok();
    driver.refresh(&mut surface);
    while driver.pump_timeout(&mut surface, Duration::from_millis(UI_TICK_MS)) {
        let size = terminal_size().ok();
        if size != last_size {
            if let Some((cols, rows)) = size {
                surface.resize(cols, rows);
                driver.refresh(&mut surface);
            }
            last_size = size;
        }
    }
    surface.clear();

    if player.join().is_err() {
        log_debug("player thread panicked");
    }
    log_debug("=== lyricbar stopped ===");
    Ok(())
}
