//! Command-line parsing, validation, and the live display settings.

mod settings;
mod validation;

use clap::{ArgAction, Parser};

pub use settings::{DisplaySettings, PlaybackFlag, PlaybackStatus, SettingsSnapshot, SharedSettings};

pub const DEFAULT_BAR_WIDTH: u16 = 24;
pub const DEFAULT_INTERVAL_MS: u64 = 2_000;
pub const MAX_BAR_WIDTH: u16 = 512;
pub const MIN_INTERVAL_MS: u64 = 100;
pub const MAX_INTERVAL_MS: u64 = 60_000;
pub const MAX_LYRIC_LINES: usize = 1_024;
pub const MAX_LYRIC_LINE_CHARS: usize = 512;

/// CLI options for the lyricbar demo. Validated values keep the status row sane.
#[derive(Debug, Parser, Clone)]
#[command(about = "lyricbar - synchronized lyrics in a status bar", author, version)]
pub struct AppConfig {
    /// Lyric line to play (repeatable, in playback order)
    #[arg(long = "line", action = ArgAction::Append, value_name = "TEXT")]
    pub lines: Vec<String>,

    /// Language tag recorded in the lyrics metadata
    #[arg(long, env = "LYRICBAR_LANGUAGE")]
    pub language: Option<String>,

    /// Keep lyrics out of the status bar (icon only)
    #[arg(long = "no-menu-bar-lyrics", default_value_t = false)]
    pub no_menu_bar_lyrics: bool,

    /// Render lyrics in the status item itself instead of a separate item
    #[arg(long = "combined", env = "LYRICBAR_COMBINED", default_value_t = false)]
    pub combined: bool,

    /// Hide lyrics while playback is paused
    #[arg(long = "disable-when-paused", default_value_t = false)]
    pub disable_when_paused: bool,

    /// Start in the paused state
    #[arg(long = "paused", default_value_t = false)]
    pub paused: bool,

    /// Width of the status-bar region (columns)
    #[arg(long = "bar-width", default_value_t = DEFAULT_BAR_WIDTH)]
    pub bar_width: u16,

    /// Columns taken by neighbouring status items
    #[arg(long = "reserved-cols", default_value_t = 0)]
    pub reserved_cols: u16,

    /// Delay between lyric lines (milliseconds)
    #[arg(long = "interval-ms", default_value_t = DEFAULT_INTERVAL_MS)]
    pub interval_ms: u64,

    /// Enable file logging (debug)
    #[arg(long = "logs", env = "LYRICBAR_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "LYRICBAR_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Allow logging lyric text (debug log only)
    #[arg(
        long = "log-content",
        env = "LYRICBAR_LOG_CONTENT",
        default_value_t = false
    )]
    pub log_content: bool,
}

impl AppConfig {
    /// Initial display settings derived from the command line.
    pub fn display_settings(&self) -> DisplaySettings {
        DisplaySettings {
            menu_bar_lyrics_enabled: !self.no_menu_bar_lyrics,
            combined_menubar_lyrics: self.combined,
            disable_lyrics_when_paused: self.disable_when_paused,
        }
    }
}
