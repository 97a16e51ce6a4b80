//! Help overlay component showing keybindings

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::{action::Action, theme::Theme};

/// Popup listing keys and slash commands
pub struct HelpOverlay {
    visible: bool,
    theme: Theme,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self {
            visible: false,
            theme: Theme::default(),
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl super::Component for HelpOverlay {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        if let Action::ToggleHelp = action {
            self.toggle();
        }
        None
    }

    fn render(&mut self, f: &mut Frame, _area: Rect) {
        if !self.visible {
            return;
        }

        let area = centered_rect(60, 80, f.area());
        f.render_widget(Clear, area);

        let block = Block::default()
            .title(" natural-sql - Help ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focused());

        let rule = || Line::from("━".repeat(50));
        let theme = &self.theme;

        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled("Global Shortcuts", theme.title())),
            rule(),
            keybinding_line("?", "Toggle this help (outside the input)", theme),
            keybinding_line("Ctrl+C / Ctrl+Q", "Quit", theme),
            keybinding_line("F1", "Focus the results pane", theme),
            keybinding_line("F2", "Focus the SQL pane", theme),
            keybinding_line("Esc", "Focus the input box", theme),
            keybinding_line("Ctrl+X", "Cancel the running question", theme),
            Line::from(""),
            Line::from(Span::styled("Input Box", theme.title())),
            rule(),
            keybinding_line("Enter", "Ask the question or run /command", theme),
            keybinding_line("Ctrl+D", "Clear input", theme),
            Line::from(""),
            Line::from(Span::styled("SQL and Results Panes", theme.title())),
            rule(),
            keybinding_line("j / ↓", "Scroll down one line", theme),
            keybinding_line("k / ↑", "Scroll up one line", theme),
            keybinding_line("Ctrl+D / PgDn", "Scroll down one page", theme),
            keybinding_line("Ctrl+U / PgUp", "Scroll up one page", theme),
            keybinding_line("Home / End", "Jump to top / bottom", theme),
            Line::from(""),
            Line::from(Span::styled("Slash Commands", theme.title())),
            rule(),
            keybinding_line("/endpoint [url]", "Show or change the endpoint", theme),
            keybinding_line("/clear", "Clear SQL and results", theme),
            keybinding_line("/history", "List questions asked this session", theme),
            keybinding_line("/help", "List slash commands", theme),
            keybinding_line("//text", "Ask \"/text\" as a question", theme),
            Line::from(""),
            Line::from(Span::styled("Press ? or Esc to close", theme.dimmed())),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(block)
            .alignment(Alignment::Left);

        f.render_widget(paragraph, area);
    }
}

fn keybinding_line<'a>(key: &'a str, description: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:17} ", key), theme.highlight()),
        Span::styled(description, theme.text()),
    ])
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::{render_to_string, Component};

    #[test]
    fn test_toggle_and_render() {
        let mut help = HelpOverlay::new();
        assert!(!render_to_string(&mut help, 100, 50).contains("Slash Commands"));

        help.handle_action(&Action::ToggleHelp);
        assert!(help.is_visible());
        let screen = render_to_string(&mut help, 100, 50);
        assert!(screen.contains("Slash Commands"));
        assert!(screen.contains("/endpoint [url]"));
        assert!(screen.contains("//text"));

        help.handle_action(&Action::ToggleHelp);
        assert!(!help.is_visible());
    }
}
