//! Terminal setup, teardown and the event stream feeding the app loop

use std::io::{self, Stdout};

use color_eyre::eyre::Result;
use crossterm::{
    event::{Event as CrosstermEvent, EventStream, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
    time::{self, Duration},
};
use tokio_util::sync::CancellationToken;

/// Events produced by the background reader
#[derive(Debug, Clone)]
pub enum Event {
    /// Key press from the terminal
    Key(crossterm::event::KeyEvent),
    /// Periodic tick, drives the spinner
    Tick,
    /// Time to redraw
    Render,
    /// Terminal was resized
    Resize(u16, u16),
}

/// Terminal plus the task that turns crossterm input into [`Event`]s
pub struct Tui {
    pub terminal: Terminal<CrosstermBackend<Stdout>>,
    task: JoinHandle<()>,
    cancellation_token: CancellationToken,
    event_rx: UnboundedReceiver<Event>,
}

impl Tui {
    /// Create a TUI emitting `tick_rate` ticks and `frame_rate` renders per second
    pub fn new(tick_rate: f64, frame_rate: f64) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let cancellation_token = CancellationToken::new();

        let task = tokio::spawn(Self::event_loop(
            event_tx,
            cancellation_token.clone(),
            Duration::from_secs_f64(1.0 / tick_rate),
            Duration::from_secs_f64(1.0 / frame_rate),
        ));

        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        Ok(Self {
            terminal,
            task,
            cancellation_token,
            event_rx,
        })
    }

    async fn event_loop(
        event_tx: UnboundedSender<Event>,
        cancellation_token: CancellationToken,
        tick_duration: Duration,
        render_duration: Duration,
    ) {
        let mut reader = EventStream::new();
        let mut tick_interval = time::interval(tick_duration);
        let mut render_interval = time::interval(render_duration);

        loop {
            let event = tokio::select! {
                biased;

                _ = cancellation_token.cancelled() => break,
                maybe_event = reader.next() => match maybe_event {
                    // Windows reports releases as well; only presses edit the input
                    Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        Event::Key(key)
                    },
                    Some(Ok(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                    Some(Ok(_)) | Some(Err(_)) => continue,
                    None => break,
                },
                _ = tick_interval.tick() => Event::Tick,
                _ = render_interval.tick() => Event::Render,
            };

            if event_tx.send(event).is_err() {
                break;
            }
        }
    }

    /// Enter the alternate screen and enable raw mode
    pub fn enter(&mut self) -> Result<()> {
        enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Leave the alternate screen and disable raw mode
    pub fn exit(&mut self) -> Result<()> {
        self.terminal.show_cursor()?;
        io::stdout().execute(LeaveAlternateScreen)?;
        disable_raw_mode()?;
        Ok(())
    }

    /// Next event, or `None` once the reader has stopped
    pub async fn next(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        self.cancellation_token.cancel();
        let _ = self.exit();
        self.task.abort();
    }
}
