use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use folio_chat::{Chatbot, ChatSurface, SubmitOutcome};
use folio_types::Role;

use crate::surface::TerminalSurface;
use crate::transcript::TranscriptLogger;

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Empty,
    Exit,
    Help,
    /// List the suggested questions
    Suggest,
    /// Send the suggestion at this zero-based index
    Suggestion(usize),
    Reload,
    History,
    Open,
    Close,
    Unknown(String),
    Message(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => Self::Empty,
            "exit" | "quit" | "/exit" | "/quit" => Self::Exit,
            "/help" | "/?" => Self::Help,
            "/suggest" => Self::Suggest,
            "/reload" => Self::Reload,
            "/history" => Self::History,
            "/open" => Self::Open,
            "/close" => Self::Close,
            _ => match line.strip_prefix('/') {
                Some(rest) => match rest.parse::<usize>() {
                    Ok(n) if n >= 1 => Self::Suggestion(n - 1),
                    _ => Self::Unknown(line.to_string()),
                },
                None => Self::Message(line.to_string()),
            },
        }
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_cyan());
    println!("  /suggest     - List suggested questions");
    println!("  /<n>         - Ask suggested question number n");
    println!("  /history     - Show the conversation so far");
    println!("  /reload      - Reload the knowledge base");
    println!("  /open        - Open the chat");
    println!("  /close       - Close the chat");
    println!("  exit, quit   - Leave");
}

/// Record the exchange for `outcome` in the transcript
async fn log_exchange(
    transcript: &mut Option<TranscriptLogger>,
    question: &str,
    outcome: &SubmitOutcome,
) {
    let Some(logger) = transcript else {
        return;
    };
    let reply = match outcome {
        SubmitOutcome::Replied(reply) => reply.clone(),
        SubmitOutcome::Failed(e) => e.user_message(),
        SubmitOutcome::Empty | SubmitOutcome::Busy => return,
    };
    logger.log(Role::User, question.trim()).await;
    logger.log(Role::Assistant, &reply).await;
}

/// Ask one question and exit; a failed reply becomes the returned error
pub async fn run_ask_mode<S: ChatSurface>(
    bot: &Chatbot<S>,
    question: &str,
    mut transcript: Option<TranscriptLogger>,
) -> Result<()> {
    bot.init().await;
    let outcome = bot.send_message(question).await;
    log_exchange(&mut transcript, question, &outcome).await;

    match outcome {
        SubmitOutcome::Failed(e) => Err(e.into()),
        SubmitOutcome::Empty => anyhow::bail!("Nothing to ask: the question is empty"),
        SubmitOutcome::Replied(_) | SubmitOutcome::Busy => Ok(()),
    }
}

/// Run interactive REPL mode
pub async fn run_repl_mode(
    bot: &Chatbot<TerminalSurface>,
    mut transcript: Option<TranscriptLogger>,
) -> Result<()> {
    println!("{}", "Folio - portfolio chatbot".bright_cyan().bold());
    println!("{}", format!("Answering with the {} backend", bot.backend_name()).bright_black());
    if let Some(logger) = &transcript {
        println!("{}", format!("Transcript: {}", logger.file_path().display()).bright_black());
    }
    println!("{}", "Type 'exit' or 'quit' to exit, or '/help' for commands\n".bright_black());

    bot.init().await;
    bot.open();

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", ">".bright_green().bold()));

        match readline {
            Ok(line) => {
                let command = ReplCommand::parse(&line);
                if !matches!(command, ReplCommand::Empty) {
                    let _ = rl.add_history_entry(line.trim());
                }

                match command {
                    ReplCommand::Empty => continue,
                    ReplCommand::Exit => {
                        println!("{}", "Goodbye!".bright_cyan());
                        break;
                    }
                    ReplCommand::Help => print_help(),
                    ReplCommand::Suggest => bot.surface().show_suggestions(bot.suggestions()),
                    ReplCommand::Reload => {
                        bot.reload_knowledge().await;
                        println!("{}", "Knowledge base reloaded".green());
                    }
                    ReplCommand::History => {
                        let history = bot.history();
                        if history.is_empty() {
                            println!("{}", "No messages yet".bright_black());
                        }
                        for turn in history {
                            println!("{} {}", format!("{}:", turn.role).bright_black(), turn.text);
                        }
                    }
                    ReplCommand::Open => bot.open(),
                    ReplCommand::Close => bot.close(),
                    ReplCommand::Unknown(cmd) => {
                        eprintln!("{} Unknown command '{}', try /help", "?".bright_yellow(), cmd);
                    }
                    ReplCommand::Suggestion(index) => {
                        if !bot.is_open() {
                            println!("{}", "The chat is closed, type /open first".bright_black());
                            continue;
                        }
                        let Some(question) = bot.suggestions().get(index).cloned() else {
                            eprintln!("{} No suggestion number {}", "?".bright_yellow(), index + 1);
                            continue;
                        };
                        bot.surface().echo_question(&question);
                        if let Some(outcome) = bot.choose_suggestion(index).await {
                            log_exchange(&mut transcript, &question, &outcome).await;
                        }
                    }
                    ReplCommand::Message(text) => {
                        if !bot.is_open() {
                            println!("{}", "The chat is closed, type /open first".bright_black());
                            continue;
                        }
                        bot.surface().set_input(&text);
                        let outcome = bot.submit_input().await;
                        log_exchange(&mut transcript, &text, &outcome).await;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        }
    }

    Ok(())
}
