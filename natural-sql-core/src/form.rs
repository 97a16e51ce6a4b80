//! Query form controller
//!
//! [`QueryForm`] owns everything the form displays: the input text, the last
//! successful answer and the status of the current submission. It never does
//! I/O itself. A submission hands the caller a [`Submission`] ticket; the
//! caller performs the request however it likes and reports the outcome back
//! through [`QueryForm::resolve`]. Outcomes whose ticket is no longer the
//! one in flight are discarded, so a late reply can never overwrite a newer
//! one.

use crate::{
    client::QueryService,
    error::{QueryError, Result},
    protocol::QueryAnswer,
    results::ResultSet,
};

/// Lifecycle of the current submission
#[derive(Debug, Clone, PartialEq)]
pub enum FormStatus {
    /// Nothing submitted yet, or the last submission was cancelled
    Idle,
    /// Waiting for the reply to submission `seq`
    Loading {
        /// Sequence number of the in-flight submission
        seq: u64,
    },
    /// Last submission produced an answer
    Succeeded,
    /// Last submission failed
    Failed(QueryError),
}

impl FormStatus {
    /// Short name, for logs and the status line
    pub fn label(&self) -> &'static str {
        match self {
            FormStatus::Idle => "idle",
            FormStatus::Loading { .. } => "loading",
            FormStatus::Succeeded => "succeeded",
            FormStatus::Failed(_) => "failed",
        }
    }
}

/// Ticket for one accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Strictly increasing per form
    pub seq: u64,
    /// Input text at the moment of submission
    pub question: String,
}

/// Why a submission was not started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Another submission is still in flight
    InFlight {
        /// Sequence number of that submission
        seq: u64,
    },
}

impl std::fmt::Display for SubmitRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitRejected::InFlight { seq } => {
                write!(f, "A query is already running (#{seq})")
            },
        }
    }
}

/// What [`QueryForm::resolve`] did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The outcome updated the form
    Applied,
    /// The outcome belonged to a cancelled or superseded submission
    Stale,
}

/// State behind the question form
#[derive(Debug, Clone)]
pub struct QueryForm {
    input: String,
    status: FormStatus,
    answer: Option<QueryAnswer>,
    last_seq: u64,
}

impl QueryForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self {
            input: String::new(),
            status: FormStatus::Idle,
            answer: None,
            last_seq: 0,
        }
    }

    /// Replace the input text
    pub fn update_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Current input text
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current status
    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// True while a submission is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self.status, FormStatus::Loading { .. })
    }

    /// Sequence number of the in-flight submission
    pub fn in_flight(&self) -> Option<u64> {
        match self.status {
            FormStatus::Loading { seq } => Some(seq),
            _ => None,
        }
    }

    /// Error of the last submission, if it failed
    pub fn error(&self) -> Option<&QueryError> {
        match &self.status {
            FormStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Message for the error panel; `None` when there is nothing to show
    pub fn error_message(&self) -> Option<String> {
        self.error()
            .map(ToString::to_string)
            .filter(|message| !message.is_empty())
    }

    /// Last successful answer (possibly stale while loading or after a failure)
    pub fn answer(&self) -> Option<&QueryAnswer> {
        self.answer.as_ref()
    }

    /// Generated SQL to display, if any
    pub fn generated_sql(&self) -> Option<&str> {
        self.answer
            .as_ref()
            .map(|a| a.generated_sql.as_str())
            .filter(|sql| !sql.is_empty())
    }

    /// Rows to display; empty before the first answer
    pub fn results(&self) -> &ResultSet {
        static EMPTY: ResultSet = ResultSet::EMPTY;
        self.answer.as_ref().map(|a| &a.results).unwrap_or(&EMPTY)
    }

    /// Start a submission of the current input
    ///
    /// Empty input is accepted and sent. The previous answer stays visible
    /// until a new one replaces it; any previous error is cleared.
    pub fn submit(&mut self) -> std::result::Result<Submission, SubmitRejected> {
        if let Some(seq) = self.in_flight() {
            return Err(SubmitRejected::InFlight { seq });
        }

        self.last_seq += 1;
        let seq = self.last_seq;
        self.status = FormStatus::Loading { seq };
        tracing::debug!("Submission #{seq} started: {:?}", self.input);

        Ok(Submission {
            seq,
            question: self.input.clone(),
        })
    }

    /// Apply the outcome of submission `seq`
    pub fn resolve(&mut self, seq: u64, outcome: Result<QueryAnswer>) -> Resolution {
        if self.in_flight() != Some(seq) {
            tracing::debug!("Discarding stale outcome of submission #{seq}");
            return Resolution::Stale;
        }

        match outcome {
            Ok(answer) => {
                tracing::debug!(
                    "Submission #{seq} succeeded with {} rows",
                    answer.results.len()
                );
                self.answer = Some(answer);
                self.status = FormStatus::Succeeded;
            },
            Err(err) => {
                tracing::debug!("Submission #{seq} failed: {err}");
                self.status = FormStatus::Failed(err);
            },
        }
        Resolution::Applied
    }

    /// Abandon the in-flight submission, returning its sequence number
    pub fn cancel(&mut self) -> Option<u64> {
        let seq = self.in_flight()?;
        self.status = FormStatus::Idle;
        tracing::debug!("Submission #{seq} cancelled");
        Some(seq)
    }

    /// Drop the displayed answer; leaves the input and any in-flight request alone
    pub fn clear_results(&mut self) {
        self.answer = None;
        if !self.is_loading() {
            self.status = FormStatus::Idle;
        }
    }

    /// Submit, await `service`, and resolve in one step
    pub async fn submit_with<S>(&mut self, service: &S) -> std::result::Result<Resolution, SubmitRejected>
    where
        S: QueryService + ?Sized,
    {
        let submission = self.submit()?;
        let outcome = service.ask(&submission.question).await;
        Ok(self.resolve(submission.seq, outcome))
    }
}

impl Default for QueryForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    fn movies_answer() -> QueryAnswer {
        QueryAnswer {
            generated_sql: "SELECT * FROM Movies".to_string(),
            results: serde_json::from_value(json!([
                [1, "The Shawshank Redemption"],
                [2, "The Godfather"]
            ]))
            .unwrap(),
        }
    }

    /// Replays canned outcomes and records every question it was asked
    struct ScriptedService {
        outcomes: Mutex<Vec<Result<QueryAnswer>>>,
        asked: Mutex<Vec<String>>,
    }

    impl ScriptedService {
        fn new(outcomes: Vec<Result<QueryAnswer>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                asked: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl QueryService for ScriptedService {
        async fn ask(&self, question: &str) -> Result<QueryAnswer> {
            self.asked.lock().unwrap().push(question.to_string());
            self.outcomes.lock().unwrap().remove(0)
        }

        fn endpoint(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn test_new_form_is_idle_and_empty() {
        let form = QueryForm::new();
        assert_eq!(form.status(), &FormStatus::Idle);
        assert_eq!(form.input(), "");
        assert!(form.generated_sql().is_none());
        assert!(form.results().is_empty());
        assert!(form.error_message().is_none());
    }

    #[test]
    fn test_input_reflects_latest_text() {
        let mut form = QueryForm::new();
        for text in ["S", "Sh", "Show all movies", "  spaced  ", "ünïcödé ✓", ""] {
            form.update_input(text);
            assert_eq!(form.input(), text);
        }
    }

    #[test]
    fn test_submit_enters_loading_and_rejects_second_submit() {
        let mut form = QueryForm::new();
        form.update_input("Show all movies");

        let submission = form.submit().unwrap();
        assert_eq!(submission.question, "Show all movies");
        assert!(form.is_loading());
        assert_eq!(form.submit(), Err(SubmitRejected::InFlight { seq: submission.seq }));
    }

    #[test]
    fn test_empty_input_is_submitted() {
        let mut form = QueryForm::new();
        let submission = form.submit().unwrap();
        assert_eq!(submission.question, "");
    }

    #[test]
    fn test_success_populates_panels() {
        let mut form = QueryForm::new();
        let submission = form.submit().unwrap();

        assert_eq!(form.resolve(submission.seq, Ok(movies_answer())), Resolution::Applied);
        assert_eq!(form.status(), &FormStatus::Succeeded);
        assert!(!form.is_loading());
        assert_eq!(form.generated_sql(), Some("SELECT * FROM Movies"));
        assert_eq!(form.results().len(), 2);
    }

    #[test]
    fn test_service_error_keeps_previous_answer() {
        let mut form = QueryForm::new();
        let first = form.submit().unwrap();
        form.resolve(first.seq, Ok(movies_answer()));

        let second = form.submit().unwrap();
        form.resolve(second.seq, Err(QueryError::service("Invalid SQL query")));

        assert!(!form.is_loading());
        assert_eq!(form.error_message().as_deref(), Some("Invalid SQL query"));
        assert_eq!(form.answer(), Some(&movies_answer()));
    }

    #[test]
    fn test_error_is_cleared_on_next_submit() {
        let mut form = QueryForm::new();
        let first = form.submit().unwrap();
        form.resolve(first.seq, Err(QueryError::transport("Network error")));
        assert_eq!(form.error_message().as_deref(), Some("Network error"));

        form.submit().unwrap();
        assert!(form.error_message().is_none());
        assert!(form.is_loading());
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut form = QueryForm::new();
        let first = form.submit().unwrap();
        assert_eq!(form.cancel(), Some(first.seq));
        assert_eq!(form.status(), &FormStatus::Idle);

        let second = form.submit().unwrap();
        assert!(second.seq > first.seq);

        assert_eq!(form.resolve(first.seq, Ok(movies_answer())), Resolution::Stale);
        assert!(form.is_loading());
        assert!(form.answer().is_none());

        assert_eq!(
            form.resolve(second.seq, Err(QueryError::service("boom"))),
            Resolution::Applied
        );
        assert_eq!(form.resolve(second.seq, Ok(movies_answer())), Resolution::Stale);
        assert_eq!(form.error_message().as_deref(), Some("boom"));
    }

    #[test]
    fn test_cancel_when_idle_is_noop() {
        let mut form = QueryForm::new();
        assert_eq!(form.cancel(), None);
        assert_eq!(form.status(), &FormStatus::Idle);
    }

    #[test]
    fn test_clear_results_does_not_disturb_loading() {
        let mut form = QueryForm::new();
        let first = form.submit().unwrap();
        form.resolve(first.seq, Ok(movies_answer()));

        let second = form.submit().unwrap();
        form.clear_results();
        assert!(form.answer().is_none());
        assert_eq!(form.in_flight(), Some(second.seq));

        form.resolve(second.seq, Ok(movies_answer()));
        form.clear_results();
        assert_eq!(form.status(), &FormStatus::Idle);
    }

    #[test]
    fn test_input_survives_submission() {
        let mut form = QueryForm::new();
        form.update_input("Show actors in Titanic");
        let submission = form.submit().unwrap();
        form.resolve(submission.seq, Ok(movies_answer()));
        assert_eq!(form.input(), "Show actors in Titanic");
    }

    #[tokio::test]
    async fn test_submit_with_sends_exactly_one_request() {
        let service = ScriptedService::new(vec![Ok(movies_answer())]);
        let mut form = QueryForm::new();
        form.update_input("Show all movies");

        let resolution = form.submit_with(&service).await.unwrap();

        assert_eq!(resolution, Resolution::Applied);
        assert_eq!(*service.asked.lock().unwrap(), vec!["Show all movies".to_string()]);
    }

    #[tokio::test]
    async fn test_repeated_submission_is_idempotent() {
        let service = ScriptedService::new(vec![Ok(movies_answer()), Ok(movies_answer())]);
        let mut form = QueryForm::new();
        form.update_input("Show all movies");

        form.submit_with(&service).await.unwrap();
        let sql_once = form.generated_sql().map(str::to_string);
        let rows_once = form.results().clone();

        form.submit_with(&service).await.unwrap();
        assert_eq!(form.generated_sql().map(str::to_string), sql_once);
        assert_eq!(form.results(), &rows_once);
        assert_eq!(service.asked.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_network_error_message_is_surfaced() {
        let service = ScriptedService::new(vec![Err(QueryError::transport("Network error"))]);
        let mut form = QueryForm::new();

        form.submit_with(&service).await.unwrap();

        assert!(!form.is_loading());
        assert_eq!(form.error_message().as_deref(), Some("Network error"));
        assert_eq!(form.status().label(), "failed");
    }
}
