//! Error line shown above the results when the last question failed

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::{action::Action, theme::Theme};

#[derive(Default)]
pub struct ErrorPanel {
    message: Option<String>,
    theme: Theme,
}

impl ErrorPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }
}

impl super::Component for ErrorPanel {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::QueryFailed(message) => {
                self.message = (!message.is_empty()).then(|| message.clone())
            },
            Action::QueryStarted { .. } | Action::QuerySucceeded(_) | Action::ResultsCleared => {
                self.message = None
            },
            _ => {},
        }
        None
    }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        let Some(message) = &self.message else {
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.warning());

        let line = Line::from(vec![
            Span::styled("Error: ", self.theme.error()),
            Span::styled(message.clone(), self.theme.error()),
        ]);

        f.render_widget(
            Paragraph::new(line).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }
}
