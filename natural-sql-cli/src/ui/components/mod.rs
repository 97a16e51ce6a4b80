//! Reusable UI components for the TUI

use ratatui::{layout::Rect, widgets::ScrollbarState, Frame};

use crate::action::Action;

pub mod error_panel;
pub mod help_overlay;
pub mod info_panel;
pub mod query_input;
pub mod results_viewer;
pub mod sql_viewer;
pub mod status_bar;

/// Component trait for UI elements
pub trait Component {
    /// Handle an action and optionally return a new action
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        let _ = action;
        None
    }

    /// Render the component
    fn render(&mut self, f: &mut Frame, area: Rect);
}

/// Vertical scroll position over `len` lines
#[derive(Debug, Default)]
pub struct Scroll {
    offset: usize,
    len: usize,
    state: ScrollbarState,
}

impl Scroll {
    /// Reset to the top of `len` lines
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.offset = 0;
        self.sync();
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn state_mut(&mut self) -> &mut ScrollbarState {
        &mut self.state
    }

    /// Apply a scroll action; returns false for non-scroll actions
    pub fn apply(&mut self, action: &Action, page_size: usize) -> bool {
        let max = self.len.saturating_sub(1);
        self.offset = match action {
            Action::ScrollUp => self.offset.saturating_sub(1),
            Action::ScrollDown => (self.offset + 1).min(max),
            Action::ScrollPageUp => self.offset.saturating_sub(page_size),
            Action::ScrollPageDown => (self.offset + page_size).min(max),
            Action::ScrollToTop => 0,
            Action::ScrollToBottom => max,
            _ => return false,
        };
        self.sync();
        true
    }

    fn sync(&mut self) {
        self.state = self.state.content_length(self.len).position(self.offset);
    }
}

/// Render `component` into an in-memory terminal and return its rows as text
#[cfg(test)]
pub(crate) fn render_to_string(component: &mut dyn Component, width: u16, height: u16) -> String {
    use ratatui::{backend::TestBackend, Terminal};

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| component.render(f, f.area()))
        .unwrap();

    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_is_clamped() {
        let mut scroll = Scroll::default();
        scroll.reset(5);

        assert!(scroll.apply(&Action::ScrollUp, 10));
        assert_eq!(scroll.offset(), 0);

        scroll.apply(&Action::ScrollPageDown, 10);
        assert_eq!(scroll.offset(), 4);

        scroll.apply(&Action::ScrollDown, 10);
        assert_eq!(scroll.offset(), 4);

        scroll.apply(&Action::ScrollToTop, 10);
        scroll.apply(&Action::ScrollDown, 10);
        assert_eq!(scroll.offset(), 1);
    }

    #[test]
    fn test_non_scroll_action_is_ignored() {
        let mut scroll = Scroll::default();
        scroll.reset(3);
        scroll.apply(&Action::ScrollToBottom, 1);
        assert!(!scroll.apply(&Action::Quit, 1));
        assert_eq!(scroll.offset(), 2);
    }
}
