pub mod coalescer;
pub mod config;
pub mod convert;
pub mod display;
pub mod fitter;
mod lock;
pub mod model;
pub mod surface;
mod telemetry;
pub mod text;

mod app;

pub(crate) use lock::lock_or_recover;
pub use app::*;
pub use coalescer::{EventCoalescer, LatestPair};
pub use config::{AppConfig, DisplaySettings, PlaybackFlag, PlaybackStatus, SettingsSnapshot, SharedSettings};
pub use convert::ScriptConverter;
pub use display::{LyricsDisplay, UiDriver, UiMessage};
pub use fitter::{AdaptiveFitter, FitProbe};
pub use model::{DisplayEvent, FitResult, LyricLine, LyricsMetadata, LyricsSnapshot, RenderMode};
pub use surface::DisplaySurface;
pub use telemetry::init_tracing;
