//! Status bar component with color-coded indicators

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    action::{Action, StatusType},
    theme::Theme,
    ui::Spinner,
};

/// Bottom line: last status message, or a spinner while waiting
pub struct StatusBar {
    /// Current status message
    message: String,
    /// Status type (determines icon and color)
    status_type: StatusType,
    /// Is a question waiting for its answer?
    progress_active: bool,
    /// Text shown next to the spinner
    progress_message: String,
    /// Animated spinner
    spinner: Spinner,
    /// Theme
    theme: Theme,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            message: "Ready".to_string(),
            status_type: StatusType::Info,
            progress_active: false,
            progress_message: String::new(),
            spinner: Spinner::new(),
            theme: Theme::default(),
        }
    }

    pub fn set_status(&mut self, status_type: StatusType, message: String) {
        self.status_type = status_type;
        self.message = message;
        self.progress_active = false;
    }

    pub fn start_progress(&mut self, message: String) {
        self.progress_active = true;
        self.progress_message = message;
        self.status_type = StatusType::Progress;
        self.spinner.reset();
    }

    pub fn stop_progress(&mut self) {
        self.progress_active = false;
        self.progress_message.clear();
    }
}

impl super::Component for StatusBar {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::SetStatus(status_type, message) => {
                self.set_status(*status_type, message.clone())
            },
            Action::StartProgress(message) => self.start_progress(message.clone()),
            Action::StopProgress => self.stop_progress(),
            _ => {},
        }
        None
    }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border());

        let display_message = if self.progress_active {
            format!(
                "{} {} {}",
                self.spinner.tick(),
                self.status_type.icon(),
                self.progress_message
            )
        } else {
            format!("{} {}", self.status_type.icon(), self.message)
        };

        let style = Style::default().fg(self.status_type.color()).add_modifier(
            if matches!(self.status_type, StatusType::Error | StatusType::Warning) {
                Modifier::BOLD
            } else {
                Modifier::empty()
            },
        );

        let help_hint = Span::styled(
            " | F1/F2 panes | Esc input | Ctrl+X cancel | Ctrl+C quit",
            self.theme.dimmed(),
        );

        let line = Line::from(vec![Span::styled(display_message, style), help_hint]);

        let paragraph = Paragraph::new(line).block(block).alignment(Alignment::Left);

        f.render_widget(paragraph, area);
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::{render_to_string, Component};

    #[test]
    fn test_progress_shows_loading_text() {
        let mut bar = StatusBar::new();
        bar.handle_action(&Action::StartProgress("Wait, please...".to_string()));
        assert!(bar.progress_active);

        let screen = render_to_string(&mut bar, 90, 3);
        assert!(screen.contains("Wait, please..."));

        bar.handle_action(&Action::StopProgress);
        assert!(!bar.progress_active);
        assert!(!render_to_string(&mut bar, 90, 3).contains("Wait, please..."));
    }

    #[test]
    fn test_set_status_ends_progress() {
        let mut bar = StatusBar::new();
        bar.handle_action(&Action::StartProgress("Wait, please...".to_string()));
        bar.handle_action(&Action::SetStatus(
            StatusType::Success,
            "2 rows in 12ms".to_string(),
        ));

        assert!(!bar.progress_active);
        assert!(render_to_string(&mut bar, 90, 3).contains("2 rows in 12ms"));
    }
}
