use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

use folio_api::ChatMode;

/// CLI arguments for folio
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Folio - portfolio chatbot in the terminal")]
#[command(version)]
pub struct Cli {
    /// Answer from the local knowledge base or forward to the chat server (local, remote)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<ChatMode>,

    /// Base URL the chat endpoint is resolved against (e.g., http://localhost:5000)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Chat endpoint path or absolute URL (default: /api/chat)
    #[arg(long, value_name = "PATH")]
    pub endpoint: Option<String>,

    /// Knowledge base location: http(s) URL or file path
    #[arg(long, value_name = "LOCATION")]
    pub knowledge: Option<String>,

    /// Pause before each local reply, in milliseconds
    #[arg(long, value_name = "MS")]
    pub thinking_delay_ms: Option<u64>,

    /// Path to config file (default: folio.toml in the current directory, if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ask a single question, print the answer and exit
    #[arg(long, value_name = "QUESTION")]
    pub ask: Option<String>,

    /// Enable verbose output (info-level logging)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Do not write a JSONL transcript of the session
    #[arg(long)]
    pub no_transcript: bool,

    /// Directory transcripts are written to
    #[arg(long, value_name = "DIR", default_value = "logs", env = "FOLIO_LOG_DIR")]
    pub log_dir: PathBuf,

    /// Generate shell completions
    #[arg(long, value_enum)]
    pub generate: Option<Shell>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "folio",
            "--mode",
            "remote",
            "--base-url",
            "http://example.test",
            "--thinking-delay-ms",
            "0",
            "--ask",
            "Who are you?",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.mode, Some(ChatMode::Remote));
        assert_eq!(cli.base_url.as_deref(), Some("http://example.test"));
        assert_eq!(cli.thinking_delay_ms, Some(0));
        assert_eq!(cli.ask.as_deref(), Some("Who are you?"));
        assert!(cli.verbose);
        assert!(!cli.no_transcript);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["folio", "--mode", "telepathy"]).is_err());
    }
}
