use std::cell::{Cell, RefCell};
use std::sync::Arc;

use folio_api::{BackendFactory, ChatBackend, ChatConfig};
use folio_types::{ChatError, ConversationTurn, Role};

use crate::surface::ChatSurface;

/// Result of one submission attempt
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank after trimming; nothing happened
    Empty,
    /// A reply is still pending; the message was dropped
    Busy,
    /// The backend answered
    Replied(String),
    /// The backend failed; the rendered error was shown instead
    Failed(ChatError),
}

impl SubmitOutcome {
    /// Whether the message was accepted and a turn was added
    pub fn was_sent(&self) -> bool {
        matches!(self, SubmitOutcome::Replied(_) | SubmitOutcome::Failed(_))
    }
}

#[derive(Debug, Default)]
struct WidgetState {
    open: bool,
    has_greeted: bool,
    suggestions_visible: bool,
    history: Vec<ConversationTurn>,
}

/// The chatbot widget engine
///
/// Single-threaded: state lives in `Cell`/`RefCell` and the futures returned
/// by [`Chatbot::send_message`] are not `Send`. Only one message is in flight
/// at a time; submissions made meanwhile are dropped.
pub struct Chatbot<S: ChatSurface> {
    backend: Arc<dyn ChatBackend>,
    surface: S,
    welcome_message: String,
    suggestions: Vec<String>,
    sending: Cell<bool>,
    state: RefCell<WidgetState>,
}

/// Build a chatbot for `config`, choosing its backend from `config.mode`
pub fn create_chatbot<S: ChatSurface>(
    config: &ChatConfig,
    surface: S,
) -> Result<Chatbot<S>, ChatError> {
    let backend = BackendFactory::create(config)?;
    Ok(Chatbot::with_config(backend, surface, config))
}

impl<S: ChatSurface> Chatbot<S> {
    pub fn new(backend: Arc<dyn ChatBackend>, surface: S) -> Self {
        Self::with_config(backend, surface, &ChatConfig::default())
    }

    pub fn with_config(backend: Arc<dyn ChatBackend>, surface: S, config: &ChatConfig) -> Self {
        Self {
            backend,
            surface,
            welcome_message: config.welcome_message.clone(),
            suggestions: config.suggestions.clone(),
            sending: Cell::new(false),
            state: RefCell::new(WidgetState::default()),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn is_sending(&self) -> bool {
        self.sending.get()
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn suggestions_visible(&self) -> bool {
        self.state.borrow().suggestions_visible
    }

    /// Conversation turns sent so far, oldest first
    pub fn history(&self) -> Vec<ConversationTurn> {
        self.state.borrow().history.clone()
    }

    /// Warm the backend up; failures are handled inside the backend
    pub async fn init(&self) {
        log::debug!("Initializing chatbot with {} backend", self.backend.name());
        self.backend.prepare().await;
    }

    /// Force the backend to refetch its knowledge
    pub async fn reload_knowledge(&self) {
        self.backend.reload().await;
    }

    /// Flip the panel; returns the new open state
    pub fn toggle(&self) -> bool {
        let open = !self.is_open();
        self.set_open(open);
        open
    }

    pub fn open(&self) {
        self.set_open(true);
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    fn set_open(&self, open: bool) {
        let (first_open, show_suggestions) = {
            let mut state = self.state.borrow_mut();
            state.open = open;
            let first_open = open && !state.has_greeted;
            let show_suggestions =
                first_open && state.history.is_empty() && !self.suggestions.is_empty();
            if first_open {
                state.has_greeted = true;
            }
            if show_suggestions {
                state.suggestions_visible = true;
            }
            (first_open, show_suggestions)
        };

        self.surface.set_panel_open(open);
        if first_open {
            self.surface.append_message(Role::Assistant, &self.welcome_message);
        }
        if show_suggestions {
            self.surface.show_suggestions(&self.suggestions);
        }
        if open {
            self.surface.focus_input();
        }
    }

    /// Send whatever is in the surface's input field
    pub async fn submit_input(&self) -> SubmitOutcome {
        let value = self.surface.input_value();
        self.send_message(&value).await
    }

    /// Send the suggested question at `index`; `None` if there is none
    pub async fn choose_suggestion(&self, index: usize) -> Option<SubmitOutcome> {
        let Some(question) = self.suggestions.get(index).cloned() else {
            log::debug!("No suggestion at index {}", index);
            return None;
        };
        Some(self.send_message(&question).await)
    }

    /// Submit one message and append exactly one assistant line for it
    pub async fn send_message(&self, message: &str) -> SubmitOutcome {
        if self.sending.get() {
            log::debug!("Reply still pending, dropping message");
            return SubmitOutcome::Busy;
        }
        let msg = message.trim();
        if msg.is_empty() {
            return SubmitOutcome::Empty;
        }

        let _guard = SendGuard::engage(self);
        self.surface.append_message(Role::User, msg);
        self.surface.clear_input();
        self.hide_suggestions();
        self.surface.show_typing_indicator();

        let history = {
            let mut state = self.state.borrow_mut();
            let prior = state.history.clone();
            state.history.push(ConversationTurn::user(msg));
            prior
        };

        let result = self.backend.reply(msg, &history).await;
        self.surface.hide_typing_indicator();

        match result {
            Ok(reply) => {
                self.surface.append_message(Role::Assistant, &reply);
                self.state
                    .borrow_mut()
                    .history
                    .push(ConversationTurn::assistant(reply.clone()));
                SubmitOutcome::Replied(reply)
            }
            Err(e) => {
                log::error!("{} backend failed to answer: {}", self.backend.name(), e);
                self.surface.append_message(Role::Assistant, &e.user_message());
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn hide_suggestions(&self) {
        let was_visible =
            std::mem::replace(&mut self.state.borrow_mut().suggestions_visible, false);
        if was_visible {
            self.surface.hide_suggestions();
        }
    }
}

/// Holds the `sending` flag for one submission
///
/// Dropping it, on any exit path including a cancelled future, releases the
/// flag and restores the controls.
struct SendGuard<'a, S: ChatSurface> {
    bot: &'a Chatbot<S>,
}

impl<'a, S: ChatSurface> SendGuard<'a, S> {
    fn engage(bot: &'a Chatbot<S>) -> Self {
        bot.sending.set(true);
        bot.surface.set_controls_enabled(false);
        Self { bot }
    }
}

impl<S: ChatSurface> Drop for SendGuard<'_, S> {
    fn drop(&mut self) {
        let surface = &self.bot.surface;
        surface.hide_typing_indicator();
        self.bot.sending.set(false);
        surface.set_controls_enabled(true);
        surface.clear_input();
        surface.focus_input();
    }
}
