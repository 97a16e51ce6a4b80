//! Main application logic and event loop

use std::{sync::Arc, time::Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use natural_sql_core::{
    ClientConfig, FormStatus, HttpQueryClient, QueryAnswer, QueryError, QueryForm, QueryService,
    Resolution, Submission,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};

use crate::{
    action::{Action, StatusType},
    commands::SlashCommand,
    query_history::{QueryEntry, QueryHistory, QueryOutcome},
    tui::{Event, Tui},
    ui::{
        Component, ErrorPanel, HelpOverlay, InfoPanel, QueryInput, ResultsViewer, SqlViewer,
        StatusBar,
    },
};

const LOADING_MESSAGE: &str = "Wait, please...";
const RECENT_HISTORY: usize = 5;

/// Main application state
pub struct App {
    should_quit: bool,
    action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
    /// Status, input and last answer
    form: QueryForm,
    config: ClientConfig,
    service: Arc<dyn QueryService>,
    /// Submission being awaited and the task awaiting it
    in_flight: Option<(Submission, JoinHandle<()>)>,
    query_input: QueryInput,
    sql_viewer: SqlViewer,
    results_viewer: ResultsViewer,
    error_panel: ErrorPanel,
    info_panel: InfoPanel,
    status_bar: StatusBar,
    help_overlay: HelpOverlay,
    query_history: QueryHistory,
}

impl App {
    /// App talking HTTP to the configured endpoint
    pub fn new(config: ClientConfig) -> Self {
        let service = Arc::new(HttpQueryClient::new(config.clone()));
        Self::with_service(config, service)
    }

    /// App talking to an arbitrary service
    pub fn with_service(config: ClientConfig, service: Arc<dyn QueryService>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            should_quit: false,
            action_tx,
            action_rx,
            form: QueryForm::new(),
            info_panel: InfoPanel::new(service.endpoint()),
            config,
            service,
            in_flight: None,
            query_input: QueryInput::new(),
            sql_viewer: SqlViewer::new(),
            results_viewer: ResultsViewer::new(),
            error_panel: ErrorPanel::new(),
            status_bar: StatusBar::new(),
            help_overlay: HelpOverlay::new(),
            query_history: QueryHistory::new(),
        }
    }

    /// Run the application until the user quits
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(4.0, 30.0)?;
        tui.enter()?;

        self.action_tx.send(Action::SetStatus(
            StatusType::Info,
            format!("Ready. Questions go to {}", self.service.endpoint()),
        ))?;

        while !self.should_quit {
            match tui.next().await {
                Some(event) => self.handle_event(event)?,
                None => break,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.update(action)?;

                if self.should_quit {
                    break;
                }
            }

            tui.terminal.draw(|f| self.draw(f))?;
        }

        self.abort_in_flight();
        tui.exit()?;

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => self.handle_key_event(key)?,
            // The next draw picks up the new size
            Event::Resize(w, h) => tracing::debug!("Terminal resized to {w}x{h}"),
            // Tick and Render just wake the loop so it redraws
            Event::Tick | Event::Render => {},
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.help_overlay.is_visible() {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.action_tx.send(Action::ToggleHelp)?;
            }
            return Ok(());
        }

        let global = match (key.code, key.modifiers) {
            (KeyCode::Char('c') | KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(Action::Quit),
            (KeyCode::Char('x'), KeyModifiers::CONTROL) => Some(Action::CancelQuery),
            (KeyCode::F(1), _) => Some(Action::FocusResultsViewer),
            (KeyCode::F(2), _) => Some(Action::FocusSqlViewer),
            (KeyCode::Esc, _) => Some(Action::FocusQueryInput),
            _ => None,
        };
        if let Some(action) = global {
            self.action_tx.send(action)?;
            return Ok(());
        }

        if let Some(action) = self.query_input.handle_key(key) {
            if !matches!(action, Action::Noop) {
                self.action_tx.send(action)?;
            }
            return Ok(());
        }

        // Input is not focused: keys drive the focused pane
        let action = match (key.code, key.modifiers) {
            (KeyCode::Char('?'), _) => Action::ToggleHelp,
            (KeyCode::Char('j') | KeyCode::Down, _) => Action::ScrollDown,
            (KeyCode::Char('k') | KeyCode::Up, _) => Action::ScrollUp,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => {
                Action::ScrollPageDown
            },
            (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => {
                Action::ScrollPageUp
            },
            (KeyCode::Home, _) => Action::ScrollToTop,
            (KeyCode::End, _) => Action::ScrollToBottom,
            _ => return Ok(()),
        };
        self.action_tx.send(action)?;

        Ok(())
    }

    /// Update application state based on action
    fn update(&mut self, action: Action) -> Result<()> {
        let components: [&mut dyn Component; 7] = [
            &mut self.query_input,
            &mut self.sql_viewer,
            &mut self.results_viewer,
            &mut self.error_panel,
            &mut self.info_panel,
            &mut self.status_bar,
            &mut self.help_overlay,
        ];
        for component in components {
            if let Some(follow_up) = component.handle_action(&action) {
                self.action_tx.send(follow_up)?;
            }
        }

        match action {
            Action::Quit => {
                self.abort_in_flight();
                self.should_quit = true;
            },
            Action::InputChanged(text) => self.form.update_input(text),
            Action::SubmitQuery => self.handle_submit()?,
            Action::CancelQuery => self.handle_cancel()?,
            Action::QueryFinished {
                seq,
                outcome,
                duration_ms,
            } => self.handle_finished(seq, outcome, duration_ms)?,
            Action::ExecuteSlashCommand(cmd) => {
                // The input box was emptied when the command was taken
                self.form.update_input(String::new());
                self.handle_slash_command(&cmd)?
            },
            _ => {},
        }

        Ok(())
    }

    /// Start a request for the current input on a background task
    fn handle_submit(&mut self) -> Result<()> {
        let submission = match self.form.submit() {
            Ok(submission) => submission,
            Err(rejected) => {
                tracing::debug!("{rejected}");
                return Ok(());
            },
        };

        tracing::info!(
            "Asking #{} at {}: {:?}",
            submission.seq,
            self.service.endpoint(),
            submission.question
        );

        self.action_tx.send(Action::QueryStarted {
            seq: submission.seq,
            question: submission.question.clone(),
        })?;
        self.action_tx
            .send(Action::StartProgress(LOADING_MESSAGE.to_string()))?;

        let service = Arc::clone(&self.service);
        let tx = self.action_tx.clone();
        let seq = submission.seq;
        let question = submission.question.clone();

        let handle = tokio::spawn(async move {
            let start = Instant::now();
            let outcome = service.ask(&question).await;
            // The receiver is gone only when the app has quit
            let _ = tx.send(Action::QueryFinished {
                seq,
                outcome,
                duration_ms: start.elapsed().as_millis(),
            });
        });

        self.in_flight = Some((submission, handle));
        Ok(())
    }

    fn handle_cancel(&mut self) -> Result<()> {
        let Some(seq) = self.form.cancel() else {
            self.action_tx.send(Action::SetStatus(
                StatusType::Info,
                "Nothing to cancel".to_string(),
            ))?;
            return Ok(());
        };

        self.abort_in_flight();
        tracing::info!("Question #{seq} cancelled");

        self.action_tx.send(Action::StopProgress)?;
        self.action_tx.send(Action::QueryCancelled)?;
        self.action_tx.send(Action::SetStatus(
            StatusType::Warning,
            format!("Question #{seq} cancelled"),
        ))?;
        Ok(())
    }

    fn handle_finished(
        &mut self,
        seq: u64,
        outcome: Result<QueryAnswer, QueryError>,
        duration_ms: u128,
    ) -> Result<()> {
        let history_outcome = match &outcome {
            Ok(answer) => QueryOutcome::Rows(answer.results.len()),
            Err(err) => QueryOutcome::Failed(err.to_string()),
        };

        if self.form.resolve(seq, outcome) == Resolution::Stale {
            return Ok(());
        }

        let question = match self.in_flight.take() {
            Some((submission, _)) => submission.question,
            None => self.form.input().to_string(),
        };
        self.query_history
            .add_entry(QueryEntry::new(question, duration_ms, history_outcome));
        self.info_panel.set_history(
            self.query_history.last_n(RECENT_HISTORY),
            self.query_history.total_queries(),
        );

        self.action_tx.send(Action::StopProgress)?;

        match self.form.status() {
            FormStatus::Succeeded => {
                let answer = self.form.answer().cloned().unwrap_or_default();
                let status = format!("{} rows in {}ms", answer.results.len(), duration_ms);
                tracing::info!("Question #{seq} answered: {status}");

                self.action_tx.send(Action::QuerySucceeded(answer))?;
                self.action_tx
                    .send(Action::SetStatus(StatusType::Success, status))?;
            },
            FormStatus::Failed(err) => {
                tracing::warn!("Question #{seq} failed ({}): {err}", err.kind().label());

                let status = format!("{} after {}ms", err.kind().label(), duration_ms);
                self.action_tx.send(Action::QueryFailed(
                    self.form.error_message().unwrap_or_default(),
                ))?;
                self.action_tx
                    .send(Action::SetStatus(StatusType::Error, status))?;
            },
            FormStatus::Idle | FormStatus::Loading { .. } => {},
        }

        Ok(())
    }

    fn handle_slash_command(&mut self, input: &str) -> Result<()> {
        let cmd = match SlashCommand::parse(input) {
            Ok(cmd) => cmd,
            Err(e) => {
                self.action_tx.send(Action::SetStatus(
                    StatusType::Error,
                    format!("Command error: {e}"),
                ))?;
                return Ok(());
            },
        };

        match cmd {
            SlashCommand::Endpoint(None) => {
                self.action_tx.send(Action::SetStatus(
                    StatusType::Info,
                    format!("Endpoint: {}", self.service.endpoint()),
                ))?;
            },
            SlashCommand::Endpoint(Some(url)) => {
                match self.config.clone().apply_overrides(Some(url), None) {
                    Ok(config) => {
                        tracing::info!("Endpoint changed to {}", config.endpoint);
                        self.service = Arc::new(HttpQueryClient::new(config.clone()));
                        self.action_tx
                            .send(Action::EndpointChanged(config.endpoint.clone()))?;
                        self.action_tx.send(Action::SetStatus(
                            StatusType::Success,
                            format!("Questions now go to {}", config.endpoint),
                        ))?;
                        self.config = config;
                    },
                    Err(e) => {
                        self.action_tx
                            .send(Action::SetStatus(StatusType::Error, e.to_string()))?;
                    },
                }
            },
            SlashCommand::Clear => {
                self.form.clear_results();
                self.action_tx.send(Action::ResultsCleared)?;
                self.action_tx.send(Action::SetStatus(
                    StatusType::Info,
                    "Results cleared".to_string(),
                ))?;
            },
            SlashCommand::History => {
                self.action_tx.send(Action::ShowText {
                    title: format!("History ({})", self.query_history.total_queries()),
                    lines: self.query_history.to_lines(),
                })?;
            },
            SlashCommand::Help => {
                self.action_tx.send(Action::ShowText {
                    title: "Help".to_string(),
                    lines: SlashCommand::help_text()
                        .lines()
                        .map(str::to_string)
                        .collect(),
                })?;
            },
        }

        Ok(())
    }

    fn abort_in_flight(&mut self) {
        if let Some((submission, handle)) = self.in_flight.take() {
            tracing::debug!("Aborting request task for #{}", submission.seq);
            handle.abort();
        }
    }

    /// Lay out and render every component
    fn draw(&mut self, f: &mut Frame) {
        let error_height = if self.error_panel.is_visible() { 3 } else { 0 };

        // Input + Error + Content + Status
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(error_height),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(f.area());

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(main_chunks[2]);

        // SQL above results
        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(content_chunks[0]);

        self.query_input.render(f, main_chunks[0]);
        self.error_panel.render(f, main_chunks[1]);
        self.sql_viewer.render(f, left_chunks[0]);
        self.results_viewer.render(f, left_chunks[1]);
        self.info_panel.render(f, content_chunks[1]);
        self.status_bar.render(f, main_chunks[3]);

        if self.help_overlay.is_visible() {
            self.help_overlay.render(f, f.area());
        }
    }
}
