//! Generated SQL pane

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::Scroll;
use crate::{action::Action, theme::Theme};

/// Shows the SQL statement of the last successful answer
pub struct SqlViewer {
    sql: Option<String>,
    scroll: Scroll,
    focused: bool,
    theme: Theme,
}

impl SqlViewer {
    pub fn new() -> Self {
        Self {
            sql: None,
            scroll: Scroll::default(),
            focused: false,
            theme: Theme::default(),
        }
    }

    /// Show `sql`; empty text hides the statement
    pub fn set_sql(&mut self, sql: &str) {
        self.sql = (!sql.is_empty()).then(|| sql.to_string());
        self.scroll.reset(sql.lines().count());
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

impl super::Component for SqlViewer {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::FocusSqlViewer => self.set_focused(true),
            Action::FocusQueryInput | Action::FocusResultsViewer => self.set_focused(false),
            Action::QuerySucceeded(answer) => self.set_sql(&answer.generated_sql),
            Action::ResultsCleared => self.set_sql(""),
            _ if self.focused => {
                self.scroll.apply(action, 5);
            },
            _ => {},
        }
        None
    }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            self.theme.border_focused()
        } else {
            self.theme.border()
        };

        let block = Block::default()
            .title(Span::styled(" Generated SQL ", self.theme.title()))
            .borders(Borders::ALL)
            .border_style(border_style);

        let lines: Vec<Line> = match &self.sql {
            Some(sql) => sql
                .lines()
                .map(|line| Line::styled(line.to_string(), self.theme.highlight()))
                .collect(),
            None => Vec::new(),
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll.offset() as u16, 0));

        f.render_widget(paragraph, area);
    }
}

impl Default for SqlViewer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use natural_sql_core::{QueryAnswer, ResultSet};

    use super::*;
    use crate::ui::components::{render_to_string, Component};

    #[test]
    fn test_shows_generated_sql() {
        let mut viewer = SqlViewer::new();
        viewer.handle_action(&Action::QuerySucceeded(QueryAnswer {
            generated_sql: "SELECT * FROM Movies".to_string(),
            results: ResultSet::default(),
        }));

        let screen = render_to_string(&mut viewer, 40, 4);
        assert!(screen.contains("Generated SQL"));
        assert!(screen.contains("SELECT * FROM Movies"));
    }

    #[test]
    fn test_failure_keeps_previous_sql_and_clear_drops_it() {
        let mut viewer = SqlViewer::new();
        viewer.set_sql("SELECT 1");
        viewer.handle_action(&Action::QueryFailed("boom".to_string()));
        assert!(render_to_string(&mut viewer, 40, 4).contains("SELECT 1"));

        viewer.handle_action(&Action::ResultsCleared);
        assert!(!render_to_string(&mut viewer, 40, 4).contains("SELECT 1"));
    }

    #[test]
    fn test_multiline_sql_scrolls_when_focused() {
        let mut viewer = SqlViewer::new();
        viewer.set_sql("SELECT title\nFROM Movies\nWHERE year > 2000");
        viewer.handle_action(&Action::FocusSqlViewer);
        viewer.handle_action(&Action::ScrollToBottom);
        assert_eq!(viewer.scroll.offset(), 2);
    }
}
