//! Info panel: prompt with example questions, endpoint and recent history

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::Action,
    query_history::{QueryEntry, QueryOutcome},
    theme::Theme,
};

/// Questions offered as a starting point
pub const EXAMPLE_QUESTIONS: [&str; 2] = ["Show movies with Robert Downey Jr.", "Show actors in Titanic"];

const RECENT_LIMIT: usize = 5;

pub struct InfoPanel {
    endpoint: String,
    /// Question awaiting an answer, with its sequence number
    asking: Option<(u64, String)>,
    recent: Vec<QueryEntry>,
    total_queries: usize,
    theme: Theme,
}

impl InfoPanel {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            asking: None,
            recent: Vec::new(),
            total_queries: 0,
            theme: Theme::default(),
        }
    }

    /// Replace the recent-history list (newest first)
    pub fn set_history(&mut self, recent: &[QueryEntry], total_queries: usize) {
        self.recent = recent.iter().take(RECENT_LIMIT).cloned().collect();
        self.total_queries = total_queries;
    }
}

impl super::Component for InfoPanel {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::EndpointChanged(endpoint) => self.endpoint = endpoint.clone(),
            Action::QueryStarted { seq, question } => {
                self.asking = Some((*seq, question.clone()))
            },
            Action::QuerySucceeded(_) | Action::QueryFailed(_) | Action::QueryCancelled => {
                self.asking = None
            },
            _ => {},
        }
        None
    }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(9), Constraint::Percentage(50)])
            .split(area);

        self.render_prompt(f, chunks[0]);
        self.render_history(f, chunks[1]);
    }
}

impl InfoPanel {
    fn render_prompt(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Ask me about movies and actors ", self.theme.title()))
            .borders(Borders::ALL)
            .border_style(self.theme.border());

        let mut content = vec![Line::from(Span::styled(
            "You can ask me smth like:",
            self.theme.text(),
        ))];
        content.extend(
            EXAMPLE_QUESTIONS
                .iter()
                .map(|q| Line::from(Span::styled(format!("  \"{q}\""), self.theme.example()))),
        );
        content.push(Line::from(""));
        content.push(Line::from(vec![
            Span::styled("Endpoint: ", self.theme.dimmed()),
            Span::styled(self.endpoint.clone(), self.theme.info()),
        ]));
        if let Some((seq, question)) = &self.asking {
            content.push(Line::from(vec![
                Span::styled(format!("Asking #{seq}: "), self.theme.dimmed()),
                Span::styled(format!("\"{question}\""), self.theme.progress()),
            ]));
        }

        let paragraph = Paragraph::new(content)
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_history(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Recent questions ({}) ", self.total_queries))
            .borders(Borders::ALL)
            .border_style(self.theme.border());

        if self.recent.is_empty() {
            let paragraph =
                Paragraph::new(Span::styled("No questions yet", self.theme.dimmed())).block(block);
            f.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = self
            .recent
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let question = if entry.question.chars().count() > 30 {
                    format!("{}...", entry.question.chars().take(27).collect::<String>())
                } else {
                    entry.question.clone()
                };

                let summary_style = match entry.outcome {
                    QueryOutcome::Rows(_) => self.theme.success(),
                    QueryOutcome::Failed(_) => self.theme.warning(),
                };

                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("{}. ", i + 1), self.theme.dimmed()),
                        Span::styled(question, self.theme.text()),
                    ]),
                    Line::from(vec![
                        Span::styled("   ", Style::default()),
                        Span::styled(entry.summary(), summary_style),
                    ]),
                ])
            })
            .collect();

        f.render_widget(List::new(items).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::{render_to_string, Component};

    #[test]
    fn test_prompt_and_examples() {
        let mut panel = InfoPanel::new("http://127.0.0.1:5000/post_movies");
        let screen = render_to_string(&mut panel, 50, 20);

        assert!(screen.contains("Ask me about movies and actors"));
        assert!(screen.contains("Show actors in Titanic"));
        assert!(screen.contains("No questions yet"));
    }

    #[test]
    fn test_endpoint_and_history_update() {
        let mut panel = InfoPanel::new("http://127.0.0.1:5000/post_movies");
        panel.handle_action(&Action::EndpointChanged("http://db.local/q".to_string()));

        let entries: Vec<QueryEntry> = (0..7)
            .map(|i| QueryEntry::new(format!("question {i}"), 5, QueryOutcome::Rows(i)))
            .collect();
        panel.set_history(&entries, 7);

        assert_eq!(panel.recent.len(), 5);
        let screen = render_to_string(&mut panel, 50, 30);
        assert!(screen.contains("http://db.local/q"));
        assert!(screen.contains("Recent questions (7)"));
        assert!(screen.contains("question 0"));
    }

    #[test]
    fn test_question_in_flight_is_listed() {
        let mut panel = InfoPanel::new("http://127.0.0.1:5000/post_movies");
        panel.handle_action(&Action::QueryStarted {
            seq: 3,
            question: "Show actors in Titanic".to_string(),
        });
        assert!(render_to_string(&mut panel, 60, 20).contains("Asking #3"));

        panel.handle_action(&Action::QueryCancelled);
        assert!(!render_to_string(&mut panel, 60, 20).contains("Asking #3"));
    }
}
