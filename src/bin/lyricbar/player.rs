//! Stand-in for a music player: walks the lyric lines on a fixed cadence.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use lyricbar::{log_debug, LyricsDisplay, LyricsSnapshot};

/// Publish `lyrics`, step through every line, then clear and shut the display down.
pub(crate) fn spawn_player(
    display: LyricsDisplay,
    lyrics: Arc<LyricsSnapshot>,
    interval: Duration,
) -> Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("lyricbar-player".to_string())
        .spawn(move || {
            let mut display = display;
            let line_count = lyrics.lines.len();
            display.lyrics_changed(Some(lyrics));
            for index in 0..line_count {
                display.line_index_changed(Some(index));
                thread::sleep(interval);
            }
            display.line_index_changed(None);
            log_debug(&format!("played {line_count} line(s)"));
            display.shutdown();
        })
        .context("failed to spawn player thread")
}
