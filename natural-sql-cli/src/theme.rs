//! Color theme and style helpers shared by all components

use ratatui::style::{Color, Modifier, Style};

/// Application color theme
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent used for titles and highlights
    pub primary: Color,
    /// Answered questions and row counts
    pub success: Color,
    /// Error panel and failed status
    pub error: Color,
    /// Error panel border and failed history entries
    pub warning: Color,
    /// Endpoint and informational status
    pub info: Color,
    /// Spinner and the question in flight
    pub progress: Color,
    /// Plain text
    pub foreground: Color,
    /// Border of unfocused panes
    pub border: Color,
    /// Border of the focused pane
    pub border_focused: Color,
    /// Input border while typing is enabled
    pub input_active: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Teal accents (#0e6655)
        Self {
            primary: Color::Rgb(0x0e, 0x66, 0x55),
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Blue,
            progress: Color::Cyan,
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            input_active: Color::Green,
        }
    }
}

impl Theme {
    /// Normal text
    pub fn text(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    /// Titles and section headings
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn info(&self) -> Style {
        Style::default().fg(self.info)
    }

    pub fn progress(&self) -> Style {
        Style::default().fg(self.progress)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    /// Secondary text such as hints and placeholders
    pub fn dimmed(&self) -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    }

    /// Example questions
    pub fn example(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .add_modifier(Modifier::ITALIC)
    }
}
