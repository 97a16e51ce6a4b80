//! Messages passed between the event loop, the query task and UI components

use natural_sql_core::{QueryAnswer, QueryError};
use ratatui::style::Color;

/// Severity of a status-bar message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    Info,
    Success,
    Warning,
    Error,
    Progress,
}

impl StatusType {
    /// Icon shown before the message
    pub fn icon(&self) -> &'static str {
        match self {
            StatusType::Info => "ℹ",
            StatusType::Success => "✓",
            StatusType::Warning => "⚠",
            StatusType::Error => "✗",
            StatusType::Progress => "⟳",
        }
    }

    /// Foreground color of the message
    pub fn color(&self) -> Color {
        match self {
            StatusType::Info => Color::Blue,
            StatusType::Success => Color::Green,
            StatusType::Warning => Color::Yellow,
            StatusType::Error => Color::Red,
            StatusType::Progress => Color::Cyan,
        }
    }
}

/// Application action
#[derive(Debug, Clone)]
pub enum Action {
    /// Key was consumed, nothing else to do
    Noop,
    Quit,
    ToggleHelp,

    // Status bar
    SetStatus(StatusType, String),
    StartProgress(String),
    StopProgress,

    // Scrolling and focus
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToTop,
    ScrollToBottom,
    FocusQueryInput,
    FocusResultsViewer,
    FocusSqlViewer,

    // Query form
    /// Input text changed to the given value
    InputChanged(String),
    /// Submit the current input as a question
    SubmitQuery,
    /// Abandon the in-flight question
    CancelQuery,
    /// Input started with `/`
    ExecuteSlashCommand(String),
    /// A submission was accepted and is now in flight
    QueryStarted { seq: u64, question: String },
    /// The background request for `seq` finished
    QueryFinished {
        seq: u64,
        outcome: Result<QueryAnswer, QueryError>,
        duration_ms: u128,
    },
    /// The form accepted a successful answer
    QuerySucceeded(QueryAnswer),
    /// The form accepted a failure; carries the error panel message
    QueryFailed(String),
    /// The in-flight question was abandoned
    QueryCancelled,
    /// Displayed SQL and rows were dropped
    ResultsCleared,
    /// Command output to show in the results viewer
    ShowText { title: String, lines: Vec<String> },
    /// The endpoint in use changed
    EndpointChanged(String),
}
