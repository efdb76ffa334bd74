use super::{
    AppConfig, MAX_BAR_WIDTH, MAX_INTERVAL_MS, MAX_LYRIC_LINES, MAX_LYRIC_LINE_CHARS,
    MIN_INTERVAL_MS,
};
use anyhow::{bail, Result};
use clap::Parser;

const MAX_LANGUAGE_TAG_LEN: usize = 35;

impl AppConfig {
    /// Parse CLI arguments and validate them right away.
    pub fn parse_args() -> Result<Self> {
        let mut config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Check CLI values and normalize the language tag.
    pub fn validate(&mut self) -> Result<()> {
        if self.bar_width == 0 || self.bar_width > MAX_BAR_WIDTH {
            bail!(
                "--bar-width must be between 1 and {MAX_BAR_WIDTH}, got {}",
                self.bar_width
            );
        }
        if self.reserved_cols >= self.bar_width {
            bail!(
                "--reserved-cols ({}) must be smaller than --bar-width ({})",
                self.reserved_cols,
                self.bar_width
            );
        }
        if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&self.interval_ms) {
            bail!(
                "--interval-ms must be between {MIN_INTERVAL_MS} and {MAX_INTERVAL_MS}, got {}",
                self.interval_ms
            );
        }
        if self.lines.len() > MAX_LYRIC_LINES {
            bail!(
                "at most {MAX_LYRIC_LINES} --line values are supported, got {}",
                self.lines.len()
            );
        }
        if let Some(idx) = self
            .lines
            .iter()
            .position(|line| line.chars().count() > MAX_LYRIC_LINE_CHARS)
        {
            bail!("--line #{} exceeds {MAX_LYRIC_LINE_CHARS} characters", idx + 1);
        }
        if let Some(language) = self.language.take() {
            let trimmed = language.trim();
            if trimmed.is_empty() {
                self.language = None;
            } else {
                if !is_valid_language_tag(trimmed) {
                    bail!("--language must be a BCP-47 style tag (e.g. en, zh-Hant), got '{trimmed}'");
                }
                self.language = Some(trimmed.to_string());
            }
        }
        Ok(())
    }
}

/// Loose BCP-47 shape check: 2-3 letter primary subtag, then alphanumeric subtags.
pub(super) fn is_valid_language_tag(tag: &str) -> bool {
    if tag.len() > MAX_LANGUAGE_TAG_LEN {
        return false;
    }
    let mut parts = tag.split(['-', '_']);
    let Some(primary) = parts.next() else {
        return false;
    };
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    parts.all(|part| (1..=8).contains(&part.len()) && part.chars().all(|c| c.is_ascii_alphanumeric()))
}
