//! Folio terminal application
//!
//! Command-line front end for the folio chatbot: configuration layering,
//! a terminal [`ChatSurface`](folio_chat::ChatSurface), the interactive REPL
//! and JSONL transcripts.

pub mod app;
pub mod cli;
pub mod surface;
pub mod transcript;

pub use app::{run_ask_mode, run_repl_mode, setup_from_cli, AppConfig};
pub use cli::Cli;
pub use surface::TerminalSurface;
pub use transcript::TranscriptLogger;
