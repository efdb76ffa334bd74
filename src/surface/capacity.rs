//! In-memory surface with a fixed column budget that records every call.

use std::collections::VecDeque;

use super::{DisplaySurface, ICON_WIDTH};
use crate::text::display_width;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    SetIcon,
    SetText(String),
    ShowSecondary(String),
    ReleaseSecondary,
    QueryVisible(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PrimaryContent {
    #[default]
    Icon,
    Text(String),
}

#[derive(Debug, Clone)]
enum Oracle {
    Capacity(usize),
    /// Preset answers, consumed in order; `false` once exhausted.
    Scripted(VecDeque<bool>),
}

#[derive(Debug, Clone)]
pub struct CapacitySurface {
    oracle: Oracle,
    primary: PrimaryContent,
    secondary: Option<String>,
    secondary_created: usize,
    calls: Vec<SurfaceCall>,
}

impl CapacitySurface {
    /// Surface whose primary item is visible while its text is at most `columns` wide.
    pub fn new(columns: usize) -> Self {
        Self::with_oracle(Oracle::Capacity(columns))
    }

    /// Surface that answers visibility queries from `answers`, in order.
    pub fn scripted(answers: impl IntoIterator<Item = bool>) -> Self {
        Self::with_oracle(Oracle::Scripted(answers.into_iter().collect()))
    }

    fn with_oracle(oracle: Oracle) -> Self {
        Self {
            oracle,
            primary: PrimaryContent::Icon,
            secondary: None,
            secondary_created: 0,
            calls: Vec::new(),
        }
    }

    /// Neighbouring items moved; the budget changes without any call from us.
    pub fn set_capacity(&mut self, columns: usize) {
        self.oracle = Oracle::Capacity(columns);
    }

    pub fn primary(&self) -> &PrimaryContent {
        &self.primary
    }

    pub fn secondary(&self) -> Option<&str> {
        self.secondary.as_deref()
    }

    /// How many times the secondary item has been created.
    pub fn secondary_created(&self) -> usize {
        self.secondary_created
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    /// Texts rendered on the primary item, in order.
    pub fn rendered_texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::SetText(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn primary_width(&self) -> usize {
        match &self.primary {
            PrimaryContent::Icon => ICON_WIDTH,
            PrimaryContent::Text(text) => display_width(text),
        }
    }
}

impl DisplaySurface for CapacitySurface {
    fn set_icon(&mut self) {
        self.primary = PrimaryContent::Icon;
        self.calls.push(SurfaceCall::SetIcon);
    }

    fn set_text(&mut self, text: &str) {
        self.primary = PrimaryContent::Text(text.to_string());
        self.calls.push(SurfaceCall::SetText(text.to_string()));
    }

    fn show_secondary(&mut self, text: &str) {
        if self.secondary.is_none() {
            self.secondary_created += 1;
        }
        self.secondary = Some(text.to_string());
        self.calls.push(SurfaceCall::ShowSecondary(text.to_string()));
    }

    fn release_secondary(&mut self) {
        self.secondary = None;
        self.calls.push(SurfaceCall::ReleaseSecondary);
    }

    fn query_visible(&mut self) -> bool {
        let width = self.primary_width();
        let visible = match &mut self.oracle {
            Oracle::Capacity(columns) => width <= *columns,
            Oracle::Scripted(answers) => answers.pop_front().unwrap_or(false),
        };
        self.calls.push(SurfaceCall::QueryVisible(visible));
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_oracle_measures_display_width() {
        let mut surface = CapacitySurface::new(5);
        surface.set_text("hello");
        assert!(surface.query_visible());
        surface.set_text("hello!");
        assert!(!surface.query_visible());
        surface.set_text("日出東");
        assert!(!surface.query_visible());
    }

    #[test]
    fn scripted_oracle_defaults_to_hidden() {
        let mut surface = CapacitySurface::scripted([true]);
        assert!(surface.query_visible());
        assert!(!surface.query_visible());
    }

    #[test]
    fn secondary_creation_is_counted_once_per_lifetime() {
        let mut surface = CapacitySurface::new(10);
        surface.show_secondary("a");
        surface.show_secondary("b");
        assert_eq!(surface.secondary_created(), 1);
        surface.release_secondary();
        surface.show_secondary("c");
        assert_eq!(surface.secondary_created(), 2);
        assert_eq!(surface.secondary(), Some("c"));
    }
}
