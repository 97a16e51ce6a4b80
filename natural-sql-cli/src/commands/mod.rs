//! Slash commands typed into the question box
//!
//! - /endpoint [url]
//! - /clear
//! - /history
//! - /help
//!
//! Start the input with `//` to ask a question beginning with `/`.

use color_eyre::eyre::{eyre, Result};

/// Leading `//` asks a question that starts with `/`
const ESCAPED_SLASH: &str = "//";

/// True when `input` should be run as a command rather than asked
pub fn is_slash_command(input: &str) -> bool {
    let trimmed = input.trim_start();
    trimmed.starts_with('/') && !trimmed.starts_with(ESCAPED_SLASH)
}

/// The question to send for `input`: one leading `/` is dropped from `//text`
pub fn question_text(input: &str) -> &str {
    let trimmed = input.trim_start();
    if trimmed.starts_with(ESCAPED_SLASH) {
        &trimmed[1..]
    } else {
        input
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// Show the endpoint, or switch to a new one
    Endpoint(Option<String>),
    /// Drop the displayed SQL and results
    Clear,
    /// List questions asked in this session
    History,
    Help,
}

impl SlashCommand {
    /// Parse a slash command from input string
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        let Some(body) = trimmed.strip_prefix('/') else {
            return Err(eyre!("Not a slash command (must start with /)"));
        };

        let parts: Vec<&str> = body.split_whitespace().collect();
        let Some(first) = parts.first() else {
            return Err(eyre!("Empty command"));
        };

        let command = first.to_lowercase();
        let args = &parts[1..];

        let no_args = |cmd: SlashCommand, name: &str| {
            if args.is_empty() {
                Ok(cmd)
            } else {
                Err(eyre!("/{name} takes no arguments"))
            }
        };

        match command.as_str() {
            "endpoint" | "ep" => match args {
                [] => Ok(SlashCommand::Endpoint(None)),
                [url] => Ok(SlashCommand::Endpoint(Some(url.to_string()))),
                _ => Err(eyre!("Usage: /endpoint [url]")),
            },
            "clear" => no_args(SlashCommand::Clear, "clear"),
            "history" => no_args(SlashCommand::History, "history"),
            "help" | "h" | "?" => Ok(SlashCommand::Help),
            other => Err(eyre!(
                "Unknown command: /{other}. Type /help for available commands"
            )),
        }
    }

    /// Help text for all slash commands
    pub fn help_text() -> String {
        r#"
Available Slash Commands:
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/endpoint               Show the endpoint questions are sent to
/endpoint <url>         Send questions to <url> from now on
                        Example: /endpoint http://127.0.0.1:5000/post_movies

/clear                  Clear the generated SQL and the results

/history                List questions asked in this session

/help                   Show this help message

//text                  Ask "/text" as a question instead of running a command

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

Keyboard Shortcuts:
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

F1                      Focus Results
F2                      Focus Generated SQL
Esc                     Return focus to the question box
j / k                   Scroll down / up one line
Ctrl+D / Ctrl+U         Scroll down / up one page
Home / End              Scroll to top / bottom
Ctrl+X                  Cancel the running question
Ctrl+C / Ctrl+Q         Quit
?                       Toggle help (when the question box is not focused)
"#
        .trim()
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_command_detection() {
        assert!(is_slash_command("/clear"));
        assert!(is_slash_command("  /endpoint http://x"));
        assert!(!is_slash_command("Show actors in Titanic"));
        assert!(!is_slash_command(""));
        assert!(!is_slash_command("//etc/passwd contents"));
        assert!(!is_slash_command("  //clear"));
    }

    #[test]
    fn test_double_slash_asks_question() {
        assert_eq!(question_text("//clear"), "/clear");
        assert_eq!(question_text("  //etc"), "/etc");
        assert_eq!(question_text("///"), "//");
        assert_eq!(question_text("Show actors in Titanic"), "Show actors in Titanic");
        assert_eq!(question_text("  padded "), "  padded ");
        assert_eq!(question_text("/clear"), "/clear");
    }

    #[test]
    fn test_parse_endpoint() {
        assert_eq!(
            SlashCommand::parse("/endpoint").unwrap(),
            SlashCommand::Endpoint(None)
        );
        assert_eq!(
            SlashCommand::parse("/endpoint http://localhost:8000/q").unwrap(),
            SlashCommand::Endpoint(Some("http://localhost:8000/q".to_string()))
        );
        assert_eq!(
            SlashCommand::parse("/EP http://a/b").unwrap(),
            SlashCommand::Endpoint(Some("http://a/b".to_string()))
        );
        assert!(SlashCommand::parse("/endpoint a b").is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(SlashCommand::parse("/clear").unwrap(), SlashCommand::Clear);
        assert_eq!(SlashCommand::parse("/history").unwrap(), SlashCommand::History);
        assert_eq!(SlashCommand::parse(" /help ").unwrap(), SlashCommand::Help);
    }

    #[test]
    fn test_parse_errors() {
        assert!(SlashCommand::parse("/clear now").is_err());
        assert!(SlashCommand::parse("/").is_err());
        assert!(SlashCommand::parse("clear").is_err());

        let err = SlashCommand::parse("/stats").unwrap_err();
        assert!(err.to_string().contains("Unknown command: /stats"));
    }

    #[test]
    fn test_help_mentions_every_command() {
        let help = SlashCommand::help_text();
        for cmd in ["/endpoint", "/clear", "/history", "/help"] {
            assert!(help.contains(cmd), "missing {cmd}");
        }
        assert!(help.contains("//text"));
    }
}
