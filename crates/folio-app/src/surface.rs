use chrono::Local;
use colored::Colorize;
use std::cell::{Cell, RefCell};
use std::io::{self, Stdout, Write};

use folio_chat::ChatSurface;
use folio_types::Role;

const ASSISTANT_LABEL: &str = "Folio";

/// [`ChatSurface`] that prints the conversation to a terminal
///
/// The REPL fills the input buffer with [`TerminalSurface::set_input`] before
/// submitting it. Output errors are logged and otherwise ignored.
pub struct TerminalSurface<W: Write = Stdout> {
    out: RefCell<W>,
    input: RefCell<String>,
    controls_enabled: Cell<bool>,
    typing: Cell<bool>,
    open: Cell<bool>,
    echo_user: bool,
}

impl TerminalSurface<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
            input: RefCell::new(String::new()),
            controls_enabled: Cell::new(true),
            typing: Cell::new(false),
            open: Cell::new(false),
            echo_user: true,
        }
    }

    /// Whether user messages are printed again after being typed
    pub fn with_user_echo(mut self, echo: bool) -> Self {
        self.echo_user = echo;
        self
    }

    /// Print a question the user did not type, such as a picked suggestion
    ///
    /// With user echo on the engine prints it already, so this does nothing.
    pub fn echo_question(&self, text: &str) {
        if !self.echo_user {
            self.write_user_line(text);
        }
    }

    pub fn set_input(&self, text: &str) {
        *self.input.borrow_mut() = text.to_string();
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled.get()
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    fn write(&self, text: &str) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            log::warn!("Terminal write failed: {}", e);
        }
    }

    fn writeln(&self, text: &str) {
        self.write(&format!("{}\n", text));
    }

    fn write_user_line(&self, text: &str) {
        self.writeln(&format!("{} {} {}", timestamp(), "You:".bright_green().bold(), text));
    }
}

fn timestamp() -> String {
    format!("{}", format!("[{}]", Local::now().format("%H:%M:%S")).bright_black())
}

impl<W: Write> ChatSurface for TerminalSurface<W> {
    fn input_value(&self) -> String {
        self.input.borrow().clone()
    }

    fn clear_input(&self) {
        self.input.borrow_mut().clear();
    }

    fn focus_input(&self) {}

    fn set_controls_enabled(&self, enabled: bool) {
        self.controls_enabled.set(enabled);
    }

    fn append_message(&self, role: Role, text: &str) {
        match role {
            Role::User if self.echo_user => self.write_user_line(text),
            Role::User => {}
            Role::Assistant => self.writeln(&format!(
                "{} {} {}",
                timestamp(),
                format!("{}:", ASSISTANT_LABEL).bright_cyan().bold(),
                text
            )),
        }
    }

    fn show_typing_indicator(&self) {
        if !self.typing.replace(true) {
            self.write(&format!("{}", format!("{} is typing...", ASSISTANT_LABEL).bright_black()));
        }
    }

    fn hide_typing_indicator(&self) {
        if self.typing.replace(false) {
            // Erase the indicator line
            self.write("\r\x1b[2K");
        }
    }

    fn set_panel_open(&self, open: bool) {
        if self.open.replace(open) == open {
            return;
        }
        let notice = if open { "Chat opened" } else { "Chat closed (type /open to resume)" };
        self.writeln(&format!("{}", notice.bright_black()));
    }

    fn show_suggestions(&self, suggestions: &[String]) {
        self.writeln(&format!("{}", "Try asking:".bright_yellow()));
        for (i, suggestion) in suggestions.iter().enumerate() {
            self.writeln(&format!("  {} {}", format!("/{}", i + 1).bright_magenta(), suggestion));
        }
    }
}
