//! Merges the lyrics and line-index signals into one deduplicated screen text.

use std::sync::Arc;

use crate::config::SettingsSnapshot;
use crate::convert::{is_convertible_language, ScriptConverter};
use crate::log_debug_content;
use crate::model::{DisplayEvent, LyricsSnapshot};

/// Latest value seen from each signal. A slot stays `None` until its source
/// fires once; a source that fires "absent" fills its slot with `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct LatestPair {
    lyrics: Option<Option<Arc<LyricsSnapshot>>>,
    line_index: Option<Option<usize>>,
}

impl LatestPair {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_lyrics(&mut self, lyrics: Option<Arc<LyricsSnapshot>>) -> Option<DisplayEvent> {
        self.lyrics = Some(lyrics);
        self.pair()
    }

    pub fn push_line_index(&mut self, line_index: Option<usize>) -> Option<DisplayEvent> {
        self.line_index = Some(line_index);
        self.pair()
    }

    /// Both slots filled.
    #[cfg(test)]
    fn is_primed(&self) -> bool {
        self.lyrics.is_some() && self.line_index.is_some()
    }

    fn pair(&self) -> Option<DisplayEvent> {
        let (Some(lyrics), Some(line_index)) = (&self.lyrics, self.line_index) else {
            return None;
        };
        Some(DisplayEvent {
            lyrics: lyrics.clone(),
            line_index,
        })
    }
}

/// What the status bar should show, before any fitting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub screen_text: String,
}

pub struct EventCoalescer {
    state: DisplayState,
    converter: Option<Arc<dyn ScriptConverter>>,
}

impl EventCoalescer {
    pub fn new(converter: Option<Arc<dyn ScriptConverter>>) -> Self {
        Self {
            state: DisplayState::default(),
            converter,
        }
    }

    pub fn screen_text(&self) -> &str {
        &self.state.screen_text
    }

    /// Text the event maps to, ignoring what is currently shown.
    pub fn candidate_text(&self, event: &DisplayEvent, snapshot: &SettingsSnapshot) -> String {
        if snapshot.suppressed() {
            return String::new();
        }
        let (Some(lyrics), Some(index)) = (event.lyrics.as_deref(), event.line_index) else {
            return String::new();
        };
        let Some(line) = lyrics.line(index) else {
            log_debug_content(&format!(
                "line index {index} outside {} lyric lines",
                lyrics.lines.len()
            ));
            return String::new();
        };
        match &self.converter {
            Some(converter) if is_convertible_language(lyrics.metadata.language.as_deref()) => {
                converter.convert(line)
            }
            _ => line.to_string(),
        }
    }

    /// Update the screen text from one merged event.
    ///
    /// Returns the new text when it differs from the current one; repeated
    /// text yields `None` so downstream sees each distinct value once.
    pub fn process(&mut self, event: &DisplayEvent, snapshot: &SettingsSnapshot) -> Option<String> {
        let candidate = self.candidate_text(event, snapshot);
        if candidate == self.state.screen_text {
            return None;
        }
        self.state.screen_text.clone_from(&candidate);
        Some(candidate)
    }
}

impl std::fmt::Debug for EventCoalescer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventCoalescer")
            .field("state", &self.state)
            .field("converter", &self.converter.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplaySettings;

    fn playing() -> SettingsSnapshot {
        SettingsSnapshot {
            settings: DisplaySettings::default(),
            is_playing: true,
        }
    }

    fn paused_with_suppression() -> SettingsSnapshot {
        SettingsSnapshot {
            settings: DisplaySettings {
                disable_lyrics_when_paused: true,
                ..DisplaySettings::default()
            },
            is_playing: false,
        }
    }

    fn snapshot(language: Option<&str>) -> Arc<LyricsSnapshot> {
        Arc::new(LyricsSnapshot::new(
            ["Here comes the sun", "and I say", "它回来了"],
            language,
        ))
    }

    fn event(lyrics: Option<Arc<LyricsSnapshot>>, line_index: Option<usize>) -> DisplayEvent {
        DisplayEvent { lyrics, line_index }
    }

    #[test]
    fn pair_waits_for_both_sources() {
        let mut pair = LatestPair::new();
        assert!(pair.push_lyrics(Some(snapshot(None))).is_none());
        assert!(pair.push_lyrics(None).is_none());
        assert!(!pair.is_primed());

        let mut pair = LatestPair::new();
        assert!(pair.push_line_index(Some(0)).is_none());
        assert!(pair.push_line_index(Some(1)).is_none());
    }

    #[test]
    fn pair_reemits_with_latest_other_value() {
        let lyrics = snapshot(None);
        let mut pair = LatestPair::new();
        pair.push_line_index(Some(0));
        let first = pair.push_lyrics(Some(lyrics.clone())).expect("primed");
        assert_eq!(first.line_index, Some(0));

        let second = pair.push_line_index(Some(1)).expect("re-emits");
        assert!(Arc::ptr_eq(second.lyrics.as_ref().expect("lyrics"), &lyrics));
        assert_eq!(second.line_index, Some(1));

        let third = pair.push_lyrics(None).expect("re-emits");
        assert!(third.lyrics.is_none());
        assert_eq!(third.line_index, Some(1));
    }

    #[test]
    fn absent_index_counts_as_a_value() {
        let mut pair = LatestPair::new();
        pair.push_lyrics(Some(snapshot(None)));
        let merged = pair.push_line_index(None).expect("absent fills the slot");
        assert!(merged.line_index.is_none());
    }

    #[test]
    fn same_pair_twice_notifies_once() {
        let mut coalescer = EventCoalescer::new(None);
        let ev = event(Some(snapshot(None)), Some(0));
        assert_eq!(
            coalescer.process(&ev, &playing()),
            Some("Here comes the sun".to_string())
        );
        assert_eq!(coalescer.process(&ev, &playing()), None);
        assert_eq!(coalescer.screen_text(), "Here comes the sun");
    }

    #[test]
    fn different_lines_with_same_text_are_deduplicated() {
        let lyrics = Arc::new(LyricsSnapshot::new(["la la", "la la"], None));
        let mut coalescer = EventCoalescer::new(None);
        assert!(coalescer.process(&event(Some(lyrics.clone()), Some(0)), &playing()).is_some());
        assert!(coalescer.process(&event(Some(lyrics), Some(1)), &playing()).is_none());
    }

    #[test]
    fn missing_inputs_map_to_empty_text() {
        let mut coalescer = EventCoalescer::new(None);
        coalescer.process(&event(Some(snapshot(None)), Some(1)), &playing());
        assert_eq!(
            coalescer.process(&event(None, Some(1)), &playing()),
            Some(String::new())
        );
        assert_eq!(coalescer.process(&event(Some(snapshot(None)), None), &playing()), None);
        assert_eq!(coalescer.screen_text(), "");
    }

    #[test]
    fn out_of_range_index_maps_to_empty_text() {
        let coalescer = EventCoalescer::new(None);
        let text = coalescer.candidate_text(&event(Some(snapshot(None)), Some(99)), &playing());
        assert_eq!(text, "");
    }

    #[test]
    fn initial_empty_text_is_not_announced() {
        let mut coalescer = EventCoalescer::new(None);
        assert_eq!(coalescer.process(&event(None, None), &playing()), None);
    }

    #[test]
    fn pause_suppression_blanks_every_line() {
        let mut coalescer = EventCoalescer::new(None);
        for index in 0..3 {
            coalescer.process(&event(Some(snapshot(None)), Some(index)), &paused_with_suppression());
            assert_eq!(coalescer.screen_text(), "");
        }
    }

    #[test]
    fn pause_without_suppression_keeps_lyrics() {
        let mut coalescer = EventCoalescer::new(None);
        let paused = SettingsSnapshot {
            settings: DisplaySettings::default(),
            is_playing: false,
        };
        coalescer.process(&event(Some(snapshot(None)), Some(1)), &paused);
        assert_eq!(coalescer.screen_text(), "and I say");
    }

    #[test]
    fn converter_applies_only_to_chinese_lyrics() {
        let converter: Arc<dyn ScriptConverter> = Arc::new(|text: &str| text.replace('来', "來"));
        let mut coalescer = EventCoalescer::new(Some(converter));

        coalescer.process(&event(Some(snapshot(Some("zh-Hans"))), Some(2)), &playing());
        assert_eq!(coalescer.screen_text(), "它回來了");

        coalescer.process(&event(Some(snapshot(Some("ja"))), Some(2)), &playing());
        assert_eq!(coalescer.screen_text(), "它回来了");

        coalescer.process(&event(Some(snapshot(None)), Some(2)), &playing());
        assert_eq!(coalescer.screen_text(), "它回来了");
    }

    #[test]
    fn missing_converter_leaves_text_unchanged() {
        let mut coalescer = EventCoalescer::new(None);
        coalescer.process(&event(Some(snapshot(Some("zh"))), Some(2)), &playing());
        assert_eq!(coalescer.screen_text(), "它回来了");
    }
}
