//! Data passed between the signal sources, the coalescer, and the fitter.

use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    pub content: String,
}

impl LyricLine {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricsMetadata {
    /// Language tag as reported by the lyrics provider (e.g. `zh-Hant`).
    pub language: Option<String>,
}

/// One immutable set of synchronized lyrics. Shared, never copied, by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricsSnapshot {
    pub lines: Vec<LyricLine>,
    pub metadata: LyricsMetadata,
}

impl LyricsSnapshot {
    pub fn new<I, S>(lines: I, language: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(LyricLine::new).collect(),
            metadata: LyricsMetadata {
                language: language.map(str::to_string),
            },
        }
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|line| line.content.as_str())
    }
}

/// Latest values of both upstream signals at one merge tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayEvent {
    pub lyrics: Option<Arc<LyricsSnapshot>>,
    pub line_index: Option<usize>,
}

/// How the status bar presents lyrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Icon only, no lyric text.
    #[default]
    IconOnly,
    /// Icon in the primary item, full lyric in a second item that sizes to content.
    SeparateText,
    /// Lyric text replaces the icon in the primary item and is shrunk to fit.
    CombinedText,
}

impl RenderMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::IconOnly => "icon",
            Self::SeparateText => "separate",
            Self::CombinedText => "combined",
        }
    }
}

/// Outcome of one fitting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitResult {
    /// Text left on the primary surface; empty when it shows the icon.
    pub final_text: String,
    pub fits: bool,
    /// Number of text renders issued on the primary surface.
    pub trials: usize,
}

impl FitResult {
    pub(crate) fn icon() -> Self {
        Self {
            final_text: String::new(),
            fits: true,
            trials: 0,
        }
    }
}
