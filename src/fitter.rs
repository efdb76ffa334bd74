//! Fits lyric text into the status bar by trial rendering.
//!
//! The space left for a status item depends on its neighbours and is only
//! known after layout, so the fitter renders a candidate, asks the surface
//! whether it ended up visible, and drops trailing words until it does.

use crate::log_debug_content;
use crate::model::{FitResult, RenderMode};
use crate::surface::DisplaySurface;
use crate::text::{shortened, word_tokens};

/// Render-then-measure capability the shrink loop drives.
pub trait FitProbe {
    fn render(&mut self, text: &str);
    fn fits(&mut self) -> bool;
}

/// Probe over the primary item of a [`DisplaySurface`].
pub struct SurfaceProbe<'a, S: DisplaySurface + ?Sized>(pub &'a mut S);

impl<S: DisplaySurface + ?Sized> FitProbe for SurfaceProbe<'_, S> {
    fn render(&mut self, text: &str) {
        self.0.set_text(text);
    }

    fn fits(&mut self) -> bool {
        self.0.query_visible()
    }
}

/// Render `text`, then drop trailing words until the probe reports a fit.
///
/// Issues at most `token_count + 1` renders, each followed by one query.
/// Returns an empty, non-fitting result when even one word is too wide; the
/// caller decides what to show instead.
pub fn shrink_to_fit(probe: &mut dyn FitProbe, text: &str) -> FitResult {
    probe.render(text);
    let mut trials = 1;
    if probe.fits() {
        return FitResult {
            final_text: text.to_string(),
            fits: true,
            trials,
        };
    }

    let tokens = word_tokens(text);
    let mut keep = tokens.len();
    while keep > 0 {
        keep -= 1;
        if keep == 0 {
            break;
        }
        let candidate = shortened(&tokens, keep);
        probe.render(&candidate);
        trials += 1;
        if probe.fits() {
            return FitResult {
                final_text: candidate,
                fits: true,
                trials,
            };
        }
    }
    FitResult {
        final_text: String::new(),
        fits: false,
        trials,
    }
}

/// Drives a surface for one screen text under one render mode.
#[derive(Debug, Default)]
pub struct AdaptiveFitter {
    last_mode: Option<RenderMode>,
}

impl AdaptiveFitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(
        &mut self,
        surface: &mut dyn DisplaySurface,
        screen_text: &str,
        mode: RenderMode,
    ) -> FitResult {
        if self.last_mode != Some(mode) {
            tracing::debug!(mode = mode.label(), "render mode changed");
            self.last_mode = Some(mode);
        }
        if screen_text.is_empty() {
            return show_icon(surface);
        }
        match mode {
            RenderMode::IconOnly => show_icon(surface),
            RenderMode::SeparateText => {
                surface.set_icon();
                surface.show_secondary(screen_text);
                FitResult {
                    final_text: String::new(),
                    fits: true,
                    trials: 0,
                }
            }
            RenderMode::CombinedText => {
                surface.release_secondary();
                let result = shrink_to_fit(&mut SurfaceProbe(&mut *surface), screen_text);
                tracing::debug!(trials = result.trials, fits = result.fits, "combined fit");
                if result.fits {
                    log_debug_content(&format!(
                        "status text fitted after {} trial(s): {:?}",
                        result.trials, result.final_text
                    ));
                } else {
                    surface.set_icon();
                }
                result
            }
        }
    }
}

fn show_icon(surface: &mut dyn DisplaySurface) -> FitResult {
    surface.set_icon();
    surface.release_secondary();
    FitResult::icon()
}
