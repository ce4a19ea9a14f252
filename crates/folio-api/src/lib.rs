//! # folio-api
//!
//! Backends that answer chatbot questions:
//!
//! - **Local**: keyword matching against the static knowledge base
//! - **Remote**: `POST {question, history}` to the site's chat endpoint
//!
//! Both sit behind the [`ChatBackend`] trait; [`BackendFactory`] picks one
//! from a [`ChatConfig`].

pub mod client;
pub mod config;

pub use client::{local::LocalResponder, remote::RemoteChatClient, ChatBackend};
pub use config::{BackendFactory, ChatConfig, ChatMode};
