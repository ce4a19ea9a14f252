use folio_types::Role;

/// The UI the engine drives
///
/// Methods take `&self`; implementations keep their own interior state.
/// `hide_typing_indicator` may be called when no indicator is shown and must
/// then do nothing.
pub trait ChatSurface {
    /// Current text of the input field
    fn input_value(&self) -> String;

    fn clear_input(&self);

    fn focus_input(&self);

    /// Enable or disable the input field and the send control together
    fn set_controls_enabled(&self, enabled: bool);

    /// Add one message line to the conversation view
    fn append_message(&self, role: Role, text: &str);

    fn show_typing_indicator(&self);

    fn hide_typing_indicator(&self);

    /// Open or close the chat panel
    fn set_panel_open(&self, open: bool);

    fn show_suggestions(&self, _suggestions: &[String]) {}

    fn hide_suggestions(&self) {}
}
