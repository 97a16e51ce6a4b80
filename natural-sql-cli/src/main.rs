//! natural-sql - terminal front end for a natural-language SQL service
//!
//! Type a question about movies and actors, see the SQL the service generated
//! and the rows it returned.

use std::{
    future::Future,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use natural_sql_core::{ClientConfig, FormStatus, HttpQueryClient, QueryAnswer, QueryForm};
use tokio::runtime::Runtime;

mod action;
mod app;
mod commands;
mod query_history;
mod theme;
mod tui;
mod ui;

use app::App;

#[derive(Parser)]
#[command(name = "natural-sql")]
#[command(version, about = "Ask a natural-language SQL service about movies and actors", long_about = None)]
struct Cli {
    /// Configuration file path (TOML or JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Service endpoint, overrides the configuration file
    #[arg(short, long, value_name = "URL", env = "NATURAL_SQL_ENDPOINT")]
    endpoint: Option<String>,

    /// Request timeout in seconds (none by default)
    #[arg(short, long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive TUI (default)
    Tui,

    /// Ask one question and print the answer
    Ask {
        /// Question text, sent as-is
        question: String,

        /// Print the raw answer as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved configuration as TOML
    ShowConfig,
}

fn main() -> Result<()> {
    install_panic_hook();

    let cli = Cli::parse();

    color_eyre::install()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    block_on_detached(runtime, run(cli))
}

/// Drive `future` to completion, then drop the runtime without waiting for
/// blocking tasks
///
/// An aborted request keeps its `spawn_blocking` thread until ureq returns,
/// which with no timeout may be never. Those threads are left behind so that
/// quitting is never held up by the network.
fn block_on_detached<F: Future>(runtime: Runtime, future: F) -> F::Output {
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    output
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref(), cli.endpoint, cli.timeout)?;

    match cli.command {
        Some(Commands::Tui) | None => {
            setup_tui_logging(cli.debug)?;
            App::new(config).run().await?;
        },
        Some(Commands::Ask { question, json }) => {
            setup_logging(cli.debug)?;
            ask_once(config, question, json).await?;
        },
        Some(Commands::ShowConfig) => {
            setup_logging(cli.debug)?;
            print!("{}", config.to_toml()?);
        },
    }

    Ok(())
}

/// File values (or defaults), then command-line and environment overrides
fn resolve_config(
    path: Option<&Path>,
    endpoint: Option<String>,
    timeout: Option<u64>,
) -> Result<ClientConfig> {
    let base = match path {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    Ok(base.apply_overrides(endpoint, timeout)?)
}

async fn ask_once(config: ClientConfig, question: String, json: bool) -> Result<()> {
    let client = HttpQueryClient::new(config);
    let mut form = QueryForm::new();
    form.update_input(question);

    // A fresh form has nothing in flight
    form.submit_with(&client).await.map_err(|e| eyre!("{e}"))?;

    match form.status() {
        FormStatus::Succeeded => {
            let answer = form.answer().cloned().unwrap_or_default();
            if json {
                println!("{}", serde_json::to_string_pretty(&answer)?);
            } else {
                print!("{}", render_answer(&answer));
            }
            Ok(())
        },
        FormStatus::Failed(err) => Err(eyre!("{err}")),
        other => Err(eyre!("Unexpected form state: {}", other.label())),
    }
}

/// Plain-text answer: SQL, then the result table; empty sections are left out
fn render_answer(answer: &QueryAnswer) -> String {
    let mut out = String::new();

    if !answer.generated_sql.is_empty() {
        out.push_str("Generated SQL:\n");
        out.push_str(&answer.generated_sql);
        out.push_str("\n\n");
    }

    if !answer.results.is_empty() {
        out.push_str(&format!("Results ({} rows):\n", answer.results.len()));
        for line in answer.results.to_table_lines() {
            out.push_str(&line);
            out.push('\n');
        }
    }

    out
}

/// Install panic hook to restore terminal on panic
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::execute!(std::io::stderr(), crossterm::terminal::LeaveAlternateScreen);
        let _ = crossterm::terminal::disable_raw_mode();

        original_hook(panic_info);
    }));
}

/// Setup tracing for one-shot commands; logs go to stderr so stdout stays clean
fn setup_logging(debug: bool) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = if debug {
        EnvFilter::new("natural_sql_cli=debug,natural_sql_core=debug")
    } else {
        EnvFilter::new("natural_sql_cli=info,natural_sql_core=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    Ok(())
}

/// Setup tracing for TUI mode (logs to file)
fn setup_tui_logging(debug: bool) -> Result<()> {
    use std::{fs::OpenOptions, sync::Arc};
    use tracing_subscriber::EnvFilter;

    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("natural-sql")
        .join("logs");

    std::fs::create_dir_all(&log_dir)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("natural-sql.log"))?;

    let filter = if debug {
        EnvFilter::new("natural_sql_cli=debug,natural_sql_core=debug")
    } else {
        EnvFilter::new("natural_sql_cli=info,natural_sql_core=warn")
    };

    // Never write to the terminal while the TUI owns it
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_target(false)
        .with_ansi(false)
        .init();

    Ok(())
}
