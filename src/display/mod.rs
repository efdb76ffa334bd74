//! Long-lived controller that wires the signals, the coalescing thread, and the UI.
//!
//! # Threads
//!
//! - Coalescing thread: merges signals in arrival order and owns the screen text
//! - UI thread: whoever runs [`UiDriver`]; the only caller of the surface
//!
//! Changed text crosses from the first to the second over an unbounded channel,
//! so the coalescing thread never waits on a slow fit.

mod ui;

use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

pub use ui::{UiDriver, UiMessage};

use crate::coalescer::{EventCoalescer, LatestPair};
use crate::config::{PlaybackStatus, SettingsSnapshot, SharedSettings};
use crate::convert::ScriptConverter;
use crate::model::LyricsSnapshot;
use crate::{log_debug, log_debug_content};

/// Max pending upstream signals before producers block.
const SIGNAL_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug)]
enum Signal {
    Lyrics(Option<Arc<LyricsSnapshot>>),
    LineIndex(Option<usize>),
    Shutdown,
}

pub struct LyricsDisplay {
    signal_tx: Sender<Signal>,
    ui_tx: Sender<UiMessage>,
    worker: Option<thread::JoinHandle<()>>,
}

impl LyricsDisplay {
    /// Start the coalescing thread. The returned driver must run on the UI thread.
    pub fn spawn(
        settings: SharedSettings,
        playback: Arc<dyn PlaybackStatus>,
        converter: Option<Arc<dyn ScriptConverter>>,
    ) -> Result<(Self, UiDriver)> {
        let (signal_tx, signal_rx) = bounded(SIGNAL_CHANNEL_CAPACITY);
        let (ui_tx, ui_rx) = unbounded();
        let worker_settings = settings.clone();
        let worker_ui_tx = ui_tx.clone();
        let worker = thread::Builder::new()
            .name("lyricbar-coalescer".to_string())
            .spawn(move || {
                run_coalescer(signal_rx, worker_ui_tx, worker_settings, playback, converter)
            })
            .context("failed to spawn coalescing thread")?;
        let display = Self {
            signal_tx,
            ui_tx,
            worker: Some(worker),
        };
        Ok((display, UiDriver::new(ui_rx, settings)))
    }

    pub fn lyrics_changed(&self, lyrics: Option<Arc<LyricsSnapshot>>) {
        let _ = self.signal_tx.send(Signal::Lyrics(lyrics));
    }

    pub fn line_index_changed(&self, line_index: Option<usize>) {
        let _ = self.signal_tx.send(Signal::LineIndex(line_index));
    }

    /// Render mode or enable toggle changed.
    pub fn settings_changed(&self) {
        let _ = self.ui_tx.send(UiMessage::Refresh);
    }

    /// Another application came to the front; the space left for the bar may have changed.
    pub fn application_activated(&self) {
        let _ = self.ui_tx.send(UiMessage::Refresh);
    }

    /// Stop the coalescing thread after it drains queued signals, then stop the UI loop.
    pub fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = self.signal_tx.send(Signal::Shutdown);
        if worker.join().is_err() {
            log_debug("coalescing thread panicked");
        }
        let _ = self.ui_tx.send(UiMessage::Shutdown);
        tracing::debug!("lyrics display shut down");
    }
}

impl Drop for LyricsDisplay {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_coalescer(
    rx: Receiver<Signal>,
    ui_tx: Sender<UiMessage>,
    settings: SharedSettings,
    playback: Arc<dyn PlaybackStatus>,
    converter: Option<Arc<dyn ScriptConverter>>,
) {
    let mut pair = LatestPair::new();
    let mut coalescer = EventCoalescer::new(converter);
    for signal in rx.iter() {
        let event = match signal {
            Signal::Lyrics(lyrics) => pair.push_lyrics(lyrics),
            Signal::LineIndex(line_index) => pair.push_line_index(line_index),
            Signal::Shutdown => break,
        };
        let Some(event) = event else {
            continue;
        };
        let snapshot = SettingsSnapshot::capture(&settings, playback.as_ref());
        if let Some(text) = coalescer.process(&event, &snapshot) {
            log_debug_content(&format!("screen text -> {text:?}"));
            let _ = ui_tx.send(UiMessage::ScreenText(text));
        }
    }
}
