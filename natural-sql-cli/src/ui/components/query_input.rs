//! Query input component
//!
//! Single-line question box. Input starting with `/` is run as a slash
//! command instead of being sent to the service; `//` escapes the slash.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use tui_textarea::TextArea;

use crate::{
    action::Action,
    commands::{is_slash_command, question_text},
    theme::Theme,
};

const PLACEHOLDER: &str = "Write your request ...";

/// Question input widget
pub struct QueryInput {
    textarea: TextArea<'static>,
    focused: bool,
    /// False while a question is in flight
    enabled: bool,
    theme: Theme,
}

impl QueryInput {
    pub fn new() -> Self {
        Self {
            textarea: Self::empty_textarea(),
            focused: true,
            enabled: true,
            theme: Theme::default(),
        }
    }

    fn empty_textarea() -> TextArea<'static> {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text(PLACEHOLDER);
        textarea
    }

    /// Current text
    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Handle a key press while focused
    ///
    /// Returns `None` when the key is not for this widget, so the caller can
    /// use it for scrolling.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if !self.focused {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => {
                let content = self.text();

                if is_slash_command(&content) {
                    self.textarea = Self::empty_textarea();
                    return Some(Action::ExecuteSlashCommand(content));
                }

                // The status bar already shows the loading indicator
                if !self.enabled {
                    return Some(Action::Noop);
                }

                // The question stays in the box after submitting
                Some(Action::SubmitQuery)
            },
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                self.textarea = Self::empty_textarea();
                Some(Action::InputChanged(String::new()))
            },
            _ => {
                if self.textarea.input(key) {
                    Some(Action::InputChanged(question_text(&self.text()).to_string()))
                } else {
                    Some(Action::Noop)
                }
            },
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

impl super::Component for QueryInput {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::FocusQueryInput => self.set_focused(true),
            Action::FocusResultsViewer | Action::FocusSqlViewer => self.set_focused(false),
            Action::QueryStarted { .. } => self.enabled = false,
            Action::QuerySucceeded(_) | Action::QueryFailed(_) | Action::QueryCancelled => {
                self.enabled = true
            },
            _ => {},
        }
        None
    }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        let border_style = if !self.focused {
            self.theme.border()
        } else if self.enabled {
            Style::default()
                .fg(self.theme.input_active)
                .add_modifier(Modifier::BOLD)
        } else {
            self.theme.progress()
        };

        let title = match (self.focused, self.enabled) {
            (false, _) => " Question (Esc to focus) ",
            (true, true) => " Question (Enter to submit | Ctrl+D to clear) ",
            (true, false) => " Question (waiting for answer | Ctrl+X to cancel) ",
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        self.textarea.set_block(block);
        self.textarea.set_cursor_style(if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        });

        f.render_widget(&self.textarea, area);
    }
}

impl Default for QueryInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use natural_sql_core::QueryAnswer;

    use super::*;
    use crate::ui::components::{render_to_string, Component};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(input: &mut QueryInput, text: &str) -> Option<Action> {
        let mut last = None;
        for c in text.chars() {
            last = input.handle_key(key(KeyCode::Char(c)));
        }
        last
    }

    #[test]
    fn test_typing_reports_changes() {
        let mut input = QueryInput::new();
        let action = type_text(&mut input, "Show all movies");

        assert!(matches!(action, Some(Action::InputChanged(ref s)) if s == "Show all movies"));
        assert_eq!(input.text(), "Show all movies");
    }

    #[test]
    fn test_enter_submits_and_keeps_text() {
        let mut input = QueryInput::new();
        type_text(&mut input, "Show actors in Titanic");

        let action = input.handle_key(key(KeyCode::Enter));
        assert!(matches!(action, Some(Action::SubmitQuery)));
        assert_eq!(input.text(), "Show actors in Titanic");
    }

    #[test]
    fn test_empty_input_is_still_submitted() {
        let mut input = QueryInput::new();
        assert!(matches!(
            input.handle_key(key(KeyCode::Enter)),
            Some(Action::SubmitQuery)
        ));
    }

    #[test]
    fn test_enter_while_waiting_is_refused() {
        let mut input = QueryInput::new();
        input.handle_action(&Action::QueryStarted {
            seq: 1,
            question: "q".to_string(),
        });

        assert!(matches!(
            input.handle_key(key(KeyCode::Enter)),
            Some(Action::Noop)
        ));

        input.handle_action(&Action::QuerySucceeded(QueryAnswer::default()));
        assert!(matches!(
            input.handle_key(key(KeyCode::Enter)),
            Some(Action::SubmitQuery)
        ));
    }

    #[test]
    fn test_slash_command_clears_input() {
        let mut input = QueryInput::new();
        type_text(&mut input, "/clear");

        let action = input.handle_key(key(KeyCode::Enter));
        assert!(matches!(action, Some(Action::ExecuteSlashCommand(ref s)) if s == "/clear"));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_double_slash_is_asked_as_question() {
        let mut input = QueryInput::new();
        let action = type_text(&mut input, "//clear");

        assert!(matches!(action, Some(Action::InputChanged(ref s)) if s == "/clear"));
        assert!(matches!(
            input.handle_key(key(KeyCode::Enter)),
            Some(Action::SubmitQuery)
        ));
        assert_eq!(input.text(), "//clear");
    }

    #[test]
    fn test_ctrl_d_clears() {
        let mut input = QueryInput::new();
        type_text(&mut input, "abc");

        let action = input.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert!(matches!(action, Some(Action::InputChanged(ref s)) if s.is_empty()));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut input = QueryInput::new();
        input.handle_action(&Action::FocusResultsViewer);
        assert!(input.handle_key(key(KeyCode::Char('j'))).is_none());
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_placeholder_is_rendered() {
        let mut input = QueryInput::new();
        let screen = render_to_string(&mut input, 70, 3);
        assert!(screen.contains("Write your request ..."));
    }
}
