//! Results viewer: the rows of the last answer, or command output

use natural_sql_core::ResultSet;
use ratatui::{
    layout::{Margin, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation},
    Frame,
};

use super::Scroll;
use crate::{action::Action, theme::Theme};

const RESULTS_TITLE: &str = "Results";

/// Scrollable pane showing the result table
pub struct ResultsViewer {
    title: String,
    /// Header row count, rendered highlighted
    header_lines: usize,
    content: Vec<String>,
    scroll: Scroll,
    focused: bool,
    theme: Theme,
}

impl ResultsViewer {
    pub fn new() -> Self {
        Self {
            title: RESULTS_TITLE.to_string(),
            header_lines: 0,
            content: Vec::new(),
            scroll: Scroll::default(),
            focused: false,
            theme: Theme::default(),
        }
    }

    /// Show a result set; an empty set shows nothing
    pub fn set_results(&mut self, results: &ResultSet) {
        self.title = if results.is_empty() {
            RESULTS_TITLE.to_string()
        } else {
            format!("{RESULTS_TITLE} ({} rows)", results.len())
        };
        self.header_lines = if results.is_empty() { 0 } else { 2 };
        self.set_lines(results.to_table_lines());
    }

    /// Show free text under a custom title
    pub fn set_text(&mut self, title: String, lines: Vec<String>) {
        self.title = title;
        self.header_lines = 0;
        self.set_lines(lines);
    }

    /// Show nothing
    pub fn clear(&mut self) {
        self.title = RESULTS_TITLE.to_string();
        self.header_lines = 0;
        self.set_lines(Vec::new());
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn set_lines(&mut self, lines: Vec<String>) {
        self.scroll.reset(lines.len());
        self.content = lines;
    }
}

impl super::Component for ResultsViewer {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::FocusResultsViewer => self.set_focused(true),
            Action::FocusQueryInput | Action::FocusSqlViewer => self.set_focused(false),
            Action::QuerySucceeded(answer) => self.set_results(&answer.results),
            Action::ResultsCleared => self.clear(),
            Action::ShowText { title, lines } => self.set_text(title.clone(), lines.clone()),
            _ if self.focused => {
                self.scroll.apply(action, 10);
            },
            _ => {},
        }
        None
    }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        let (border_style, title) = if self.focused {
            (
                self.theme.border_focused(),
                format!(" {} (j/k to scroll) ", self.title),
            )
        } else {
            (self.theme.border(), format!(" {} ", self.title))
        };

        let block = Block::default()
            .title(Span::styled(title, self.theme.title()))
            .borders(Borders::ALL)
            .border_style(border_style);

        let lines: Vec<Line> = self
            .content
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let style = if i < self.header_lines {
                    self.theme.highlight()
                } else {
                    self.theme.text()
                };
                Line::styled(line.as_str(), style)
            })
            .collect();

        // No wrapping: table rows must stay aligned
        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll.offset() as u16, 0));

        f.render_widget(paragraph, area);

        if self.content.len() > area.height.saturating_sub(2) as usize {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let scrollbar_area = area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            });

            f.render_stateful_widget(scrollbar, scrollbar_area, self.scroll.state_mut());
        }
    }
}

impl Default for ResultsViewer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use natural_sql_core::QueryAnswer;
    use serde_json::json;

    use super::*;
    use crate::ui::components::{render_to_string, Component};

    fn answer() -> QueryAnswer {
        QueryAnswer {
            generated_sql: "SELECT * FROM Movies".to_string(),
            results: serde_json::from_value(json!([
                [1, "The Shawshank Redemption"],
                [2, "The Godfather"]
            ]))
            .unwrap(),
        }
    }

    #[test]
    fn test_success_lists_both_rows() {
        let mut viewer = ResultsViewer::new();
        viewer.handle_action(&Action::QuerySucceeded(answer()));

        let screen = render_to_string(&mut viewer, 60, 8);
        assert!(screen.contains("Results (2 rows)"));
        assert!(screen.contains("The Shawshank Redemption"));
        assert!(screen.contains("The Godfather"));
    }

    #[test]
    fn test_empty_results_render_nothing() {
        let mut viewer = ResultsViewer::new();
        viewer.handle_action(&Action::QuerySucceeded(QueryAnswer {
            generated_sql: "SELECT * FROM Movies WHERE 0".to_string(),
            results: ResultSet::default(),
        }));

        let screen = render_to_string(&mut viewer, 40, 5);
        assert!(screen.contains(" Results "));
        assert!(!screen.contains('#'));
    }

    #[test]
    fn test_failure_does_not_touch_rows() {
        let mut viewer = ResultsViewer::new();
        viewer.handle_action(&Action::QuerySucceeded(answer()));
        viewer.handle_action(&Action::QueryFailed("Invalid SQL query".to_string()));

        let screen = render_to_string(&mut viewer, 60, 8);
        assert!(screen.contains("The Godfather"));
    }

    #[test]
    fn test_clear_and_command_text() {
        let mut viewer = ResultsViewer::new();
        viewer.handle_action(&Action::QuerySucceeded(answer()));
        viewer.handle_action(&Action::ResultsCleared);
        assert!(!render_to_string(&mut viewer, 60, 8).contains("Godfather"));

        viewer.handle_action(&Action::ShowText {
            title: "History".to_string(),
            lines: vec!["1. Show all movies".to_string()],
        });
        let screen = render_to_string(&mut viewer, 60, 8);
        assert!(screen.contains("History"));
        assert!(screen.contains("1. Show all movies"));
    }

    #[test]
    fn test_scroll_only_when_focused() {
        let mut viewer = ResultsViewer::new();
        viewer.set_text("t".to_string(), (0..30).map(|i| i.to_string()).collect());

        viewer.handle_action(&Action::ScrollDown);
        assert_eq!(viewer.scroll.offset(), 0);

        viewer.handle_action(&Action::FocusResultsViewer);
        viewer.handle_action(&Action::ScrollDown);
        assert_eq!(viewer.scroll.offset(), 1);
    }
}
