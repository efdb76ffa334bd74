//! Status-bar surfaces the fitter draws on.
//!
//! A surface owns the primary status item (icon or text) and an optional
//! secondary text item. Every call happens on the UI thread that owns the
//! surface; implementations are not expected to be `Sync`.

mod capacity;
mod terminal;
pub mod visibility;

pub use capacity::{CapacitySurface, PrimaryContent, SurfaceCall};
pub use terminal::TerminalSurface;

/// Width of the status icon in columns.
pub const ICON_WIDTH: usize = 2;

pub trait DisplaySurface {
    /// Show the status icon on the primary item, clearing any text.
    fn set_icon(&mut self);
    /// Show `text` on the primary item in place of the icon.
    fn set_text(&mut self, text: &str);
    /// Create the secondary item if needed and show `text` on it.
    fn show_secondary(&mut self, text: &str);
    /// Remove the secondary item if it exists.
    fn release_secondary(&mut self);
    /// Whether the primary item is fully on screen. Unknown means `false`.
    fn query_visible(&mut self) -> bool;
}
