//! Chatbot widget engine for folio
//!
//! This crate provides the message submission state machine, the
//! [`ChatSurface`] seam the UI implements, and the [`Chatbot`] that ties a
//! surface to a [`folio_api::ChatBackend`].

pub mod engine;
pub mod surface;


pub use engine::{create_chatbot, Chatbot, SubmitOutcome};
pub use surface::ChatSurface;
