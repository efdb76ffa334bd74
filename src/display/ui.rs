//! UI-thread side of the pipeline: owns the fitter and talks to the surface.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};

use crate::config::SharedSettings;
use crate::fitter::AdaptiveFitter;
use crate::log_debug;
use crate::model::FitResult;
use crate::surface::DisplaySurface;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMessage {
    /// The screen text changed.
    ScreenText(String),
    /// Re-fit the current text, e.g. after a settings change or app activation.
    Refresh,
    Shutdown,
}

/// Runs on the thread that owns the status bar. Never shared across threads.
pub struct UiDriver {
    pub(super) rx: Receiver<UiMessage>,
    settings: SharedSettings,
    fitter: AdaptiveFitter,
    screen_text: String,
    last_fit: Option<FitResult>,
}

impl UiDriver {
    pub(crate) fn new(rx: Receiver<UiMessage>, settings: SharedSettings) -> Self {
        Self {
            rx,
            settings,
            fitter: AdaptiveFitter::new(),
            screen_text: String::new(),
            last_fit: None,
        }
    }

    pub fn screen_text(&self) -> &str {
        &self.screen_text
    }

    pub fn last_fit(&self) -> Option<&FitResult> {
        self.last_fit.as_ref()
    }

    /// Re-fit the current text under the current render mode.
    pub fn refresh(&mut self, surface: &mut dyn DisplaySurface) -> &FitResult {
        let mode = self.settings.get().render_mode();
        let result = self.fitter.apply(surface, &self.screen_text, mode);
        self.last_fit.insert(result)
    }

    /// Apply one message. Returns `false` once the pipeline has shut down.
    pub fn handle(&mut self, surface: &mut dyn DisplaySurface, message: UiMessage) -> bool {
        match message {
            UiMessage::ScreenText(text) => {
                self.screen_text = text;
                self.refresh(surface);
                true
            }
            UiMessage::Refresh => {
                self.refresh(surface);
                true
            }
            UiMessage::Shutdown => false,
        }
    }

    /// Apply every queued message without blocking. Returns `false` after shutdown.
    pub fn pump(&mut self, surface: &mut dyn DisplaySurface) -> bool {
        loop {
            match self.rx.try_recv() {
                Ok(message) => {
                    if !self.handle(surface, message) {
                        return false;
                    }
                }
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => return false,
            }
        }
    }

    /// Wait up to `timeout` for a message, then apply everything queued.
    /// Returns `false` after shutdown; a quiet timeout returns `true`.
    pub fn pump_timeout(&mut self, surface: &mut dyn DisplaySurface, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(message) => self.handle(surface, message) && self.pump(surface),
            Err(RecvTimeoutError::Timeout) => true,
            Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Draw the initial state, then block applying messages until shutdown.
    pub fn run(&mut self, surface: &mut dyn DisplaySurface) {
        self.refresh(surface);
        while let Ok(message) = self.rx.recv() {
            if !self.handle(surface, message) {
                break;
            }
        }
        log_debug("status bar UI loop stopped");
    }
}
