//! # folio-knowledge
//!
//! Static knowledge base used by the chatbot's local mode:
//!
//! - **Model**: ordered keyword categories plus the reserved `greeting` and
//!   `default` entries
//! - **Loader**: fetch once (HTTP or file), cache, fall back on failure
//! - **Matcher**: greeting short-circuit, then keyword scoring
//!
//! ## Example
//!
//! ```rust
//! use folio_knowledge::{Category, KnowledgeBase};
//!
//! let base = KnowledgeBase::new()
//!     .with_greeting("^(hi|hello)", "Hi!")
//!     .with_category(Category::new("experience", ["work", "meta"], "7 years..."))
//!     .with_default("Ask me anything");
//!
//! assert_eq!(base.respond("hello, tell me about your work"), "Hi!");
//! assert_eq!(base.respond("what about your work at meta"), "7 years...");
//! assert_eq!(base.respond("what's the weather"), "Ask me anything");
//! ```

pub mod base;
pub mod loader;
pub mod matcher;

pub use base::{Category, Greeting, KnowledgeBase, DEFAULT_KEY, GREETING_KEY};
pub use loader::{KnowledgeLoader, KnowledgeSource};
pub use matcher::Match;
