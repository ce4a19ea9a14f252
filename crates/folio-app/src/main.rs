use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::io;

use folio::app::init_logging;
use folio::{run_ask_mode, run_repl_mode, setup_from_cli, Cli, TerminalSurface, TranscriptLogger};
use folio_chat::create_chatbot;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(shell) = cli.generate {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "folio", &mut io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose);

    let app_config = setup_from_cli(&cli)?;
    if let Some(path) = &app_config.config_file {
        log::info!("Using config file {}", path.display());
    }

    let transcript = match &app_config.transcript_dir {
        Some(dir) => match TranscriptLogger::new(dir, app_config.chat.mode).await {
            Ok(logger) => Some(logger),
            Err(e) => {
                eprintln!("{} Transcript disabled: {}", "!".yellow(), e);
                None
            }
        },
        None => None,
    };

    match cli.ask.as_deref() {
        Some(question) => {
            let bot = create_chatbot(&app_config.chat, TerminalSurface::stdout())?;
            run_ask_mode(&bot, question, transcript).await
        }
        None => {
            let surface = TerminalSurface::stdout().with_user_echo(false);
            let bot = create_chatbot(&app_config.chat, surface)?;
            run_repl_mode(&bot, transcript).await
        }
    }
}
