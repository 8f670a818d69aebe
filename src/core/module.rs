//! Module trait for page-level UI components

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

use super::Action;

/// Trait for UI modules that can handle input and render themselves
pub trait Module {
    /// Module identifier
    fn id(&self) -> &'static str;

    /// Handle keyboard input
    /// Returns an Action describing what should happen
    fn handle_key(&mut self, key: KeyEvent) -> Action;

    /// Render the module into the given area
    fn render(&self, frame: &mut Frame, area: Rect);
}
