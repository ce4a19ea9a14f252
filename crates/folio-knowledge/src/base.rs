use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use serde_json::{Map, Value};

use folio_types::KNOWLEDGE_UNAVAILABLE_RESPONSE;

/// Reserved entry name for the greeting rule
pub const GREETING_KEY: &str = "greeting";

/// Reserved entry name for the default response
pub const DEFAULT_KEY: &str = "default";

/// A keyword category of the knowledge base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    /// Lower-cased, non-empty keywords
    pub keywords: Vec<String>,
    pub response: String,
}

impl Category {
    pub fn new<I, K>(name: impl Into<String>, keywords: I, response: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        Self {
            name: name.into(),
            keywords: normalize_keywords(keywords),
            response: response.into(),
        }
    }
}

/// The greeting rule: a case-insensitive pattern that short-circuits scoring
#[derive(Debug, Clone)]
pub struct Greeting {
    pattern: String,
    regex: Option<Regex>,
    response: String,
}

impl Greeting {
    /// Build a greeting rule; an invalid or blank pattern leaves the rule inert
    pub fn new(pattern: impl Into<String>, response: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let regex = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            // A blank pattern would match every message
            Ok(_) if pattern.trim().is_empty() => {
                log::warn!("Greeting pattern is blank, greeting disabled");
                None
            }
            Ok(regex) => Some(regex),
            Err(e) => {
                log::warn!("Greeting pattern {:?} is invalid, greeting disabled: {}", pattern, e);
                None
            }
        };
        Self {
            pattern,
            regex,
            response: response.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn is_match(&self, message: &str) -> bool {
        self.regex
            .as_ref()
            .map(|regex| regex.is_match(message))
            .unwrap_or(false)
    }
}

/// Categorized keyword -> response table used for local replies
///
/// Categories are kept in insertion order, which is the tie-break order of
/// the matcher.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    categories: Vec<Category>,
    greeting: Option<Greeting>,
    default_response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    response: Option<String>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// The base substituted when the real one cannot be loaded
    pub fn fallback() -> Self {
        Self::new().with_default(KNOWLEDGE_UNAVAILABLE_RESPONSE)
    }

    /// Parse the JSON document form: an object keyed by category name
    ///
    /// Object key order becomes category order. Entries without a string
    /// `response` are skipped.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let document: Map<String, Value> = serde_json::from_str(text)?;
        let mut base = Self::new();

        for (name, value) in document {
            let entry: RawEntry = match serde_json::from_value(value) {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping knowledge base entry {:?}: {}", name, e);
                    continue;
                }
            };
            let Some(response) = entry.response else {
                log::warn!("Skipping knowledge base entry {:?}: missing response", name);
                continue;
            };

            match name.as_str() {
                GREETING_KEY => match entry.pattern.filter(|p| !p.trim().is_empty()) {
                    Some(pattern) => base.greeting = Some(Greeting::new(pattern, response)),
                    None => log::warn!("Greeting entry has no pattern, ignoring it"),
                },
                DEFAULT_KEY => base.default_response = Some(response),
                _ => base.push_category(Category::new(name, entry.keywords, response)),
            }
        }

        log::debug!(
            "Parsed knowledge base: {} categories, greeting: {}, default: {}",
            base.categories.len(),
            base.greeting.is_some(),
            base.default_response.is_some()
        );
        Ok(base)
    }

    /// Append a category, replacing an existing one of the same name in place
    pub fn push_category(&mut self, category: Category) {
        if let Some(existing) = self.categories.iter_mut().find(|c| c.name == category.name) {
            *existing = category;
        } else {
            self.categories.push(category);
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.push_category(category);
        self
    }

    pub fn with_greeting(
        mut self,
        pattern: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.greeting = Some(Greeting::new(pattern, response));
        self
    }

    pub fn with_default(mut self, response: impl Into<String>) -> Self {
        self.default_response = Some(response.into());
        self
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn greeting(&self) -> Option<&Greeting> {
        self.greeting.as_ref()
    }

    pub fn default_response(&self) -> Option<&str> {
        self.default_response.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.greeting.is_none() && self.default_response.is_none()
    }
}

fn normalize_keywords<I, K>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_json_keeps_document_order() {
        let base = KnowledgeBase::from_json(
            r#"{
                "skills": {"keywords": ["Rust", "python"], "response": "Rust and Python"},
                "greeting": {"pattern": "^(hi|hello)", "response": "Hi!"},
                "experience": {"keywords": ["work"], "response": "7 years"},
                "default": {"response": "Ask me anything"}
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = base.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["skills", "experience"]);
        assert_eq!(base.categories()[0].keywords, vec!["rust", "python"]);
        assert_eq!(base.greeting().map(|g| g.pattern()), Some("^(hi|hello)"));
        assert_eq!(base.default_response(), Some("Ask me anything"));
    }

    #[test]
    fn test_from_json_skips_malformed_entries() {
        let base = KnowledgeBase::from_json(
            r#"{
                "no_response": {"keywords": ["a"]},
                "bad_keywords": {"keywords": [1, 2], "response": "x"},
                "no_keywords": {"response": "never scores"},
                "blank": {"keywords": ["", "ok"], "response": "y"}
            }"#,
        )
        .unwrap();

        assert_eq!(base.categories().len(), 2);
        assert_eq!(base.categories()[0].name, "no_keywords");
        assert!(base.categories()[0].keywords.is_empty());
        assert_eq!(base.categories()[1].keywords, vec!["ok"]);
        assert!(base.default_response().is_none());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(KnowledgeBase::from_json("[1, 2, 3]").is_err());
        assert!(KnowledgeBase::from_json("not json").is_err());
    }

    #[test]
    fn test_invalid_greeting_pattern_is_inert() {
        let greeting = Greeting::new("(unclosed", "Hi!");
        assert!(!greeting.is_match("(unclosed"));
    }

    #[test]
    fn test_blank_greeting_pattern_is_ignored() {
        let base = KnowledgeBase::from_json(
            r#"{
                "greeting": {"pattern": "", "response": "Hi!"},
                "experience": {"keywords": ["work"], "response": "7 years..."}
            }"#,
        )
        .unwrap();

        assert!(base.greeting().is_none());
        assert_eq!(base.respond("tell me about your work"), "7 years...");

        let greeting = Greeting::new("  ", "Hi!");
        assert!(!greeting.is_match("anything"));
    }

    #[test]
    fn test_push_category_keeps_names_unique() {
        let base = KnowledgeBase::new()
            .with_category(Category::new("projects", ["app"], "first"))
            .with_category(Category::new("skills", ["rust"], "skills"))
            .with_category(Category::new("projects", ["site"], "second"));

        assert_eq!(base.categories().len(), 2);
        assert_eq!(base.categories()[0].name, "projects");
        assert_eq!(base.categories()[0].response, "second");
    }

    #[test]
    fn test_fallback_has_only_default() {
        let base = KnowledgeBase::fallback();
        assert!(base.categories().is_empty());
        assert!(base.greeting().is_none());
        assert_eq!(base.default_response(), Some(KNOWLEDGE_UNAVAILABLE_RESPONSE));
    }
}
