//! Live display settings, read fresh on every event so toggles apply immediately.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::lock_or_recover;
use crate::model::RenderMode;

/// User-facing toggles that shape what the status bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySettings {
    pub menu_bar_lyrics_enabled: bool,
    pub combined_menubar_lyrics: bool,
    pub disable_lyrics_when_paused: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            menu_bar_lyrics_enabled: true,
            combined_menubar_lyrics: false,
            disable_lyrics_when_paused: false,
        }
    }
}

impl DisplaySettings {
    pub fn render_mode(&self) -> RenderMode {
        if !self.menu_bar_lyrics_enabled {
            RenderMode::IconOnly
        } else if self.combined_menubar_lyrics {
            RenderMode::CombinedText
        } else {
            RenderMode::SeparateText
        }
    }
}

/// Anything that knows whether the player is currently playing.
pub trait PlaybackStatus: Send + Sync {
    fn is_playing(&self) -> bool;
}

/// Atomic playback flag the host flips from its player callbacks.
#[derive(Debug, Clone, Default)]
pub struct PlaybackFlag(Arc<AtomicBool>);

impl PlaybackFlag {
    pub fn new(playing: bool) -> Self {
        Self(Arc::new(AtomicBool::new(playing)))
    }

    pub fn set_playing(&self, playing: bool) {
        self.0.store(playing, Ordering::Relaxed);
    }
}

impl PlaybackStatus for PlaybackFlag {
    fn is_playing(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Shared handle to the display settings. Cloning shares the same storage.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<Mutex<DisplaySettings>>,
}

impl SharedSettings {
    pub fn new(settings: DisplaySettings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(settings)),
        }
    }

    pub fn get(&self) -> DisplaySettings {
        *lock_or_recover(&self.inner, "SharedSettings::get")
    }

    pub fn update(&self, apply: impl FnOnce(&mut DisplaySettings)) {
        let mut guard = lock_or_recover(&self.inner, "SharedSettings::update");
        apply(&mut guard);
    }
}

/// Read-only view of every input the coalescer consults besides the signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsSnapshot {
    pub settings: DisplaySettings,
    pub is_playing: bool,
}

impl SettingsSnapshot {
    pub fn capture(settings: &SharedSettings, playback: &dyn PlaybackStatus) -> Self {
        Self {
            settings: settings.get(),
            is_playing: playback.is_playing(),
        }
    }

    /// Lyrics are hidden while paused only when the user asked for it.
    pub fn suppressed(&self) -> bool {
        self.settings.disable_lyrics_when_paused && !self.is_playing
    }
}
