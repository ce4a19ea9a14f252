//! Local response selection against a knowledge base.

use folio_types::GENERIC_FALLBACK_RESPONSE;

use crate::base::KnowledgeBase;

/// Outcome of matching one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match<'a> {
    /// The greeting pattern matched
    Greeting { response: &'a str },
    /// The best scoring category
    Category {
        name: &'a str,
        score: usize,
        response: &'a str,
    },
    /// No keyword matched, the `default` entry answers
    Default { response: &'a str },
    /// No keyword matched and there is no `default` entry
    Fallback,
}

impl<'a> Match<'a> {
    pub fn response(&self) -> &'a str {
        match self {
            Match::Greeting { response }
            | Match::Category { response, .. }
            | Match::Default { response } => *response,
            Match::Fallback => GENERIC_FALLBACK_RESPONSE,
        }
    }
}

impl KnowledgeBase {
    /// Pick the reply for `message`
    ///
    /// A greeting match wins outright. Otherwise each category scores the
    /// number of its keywords contained in the lower-cased message; the first
    /// category reaching the highest score wins.
    pub fn evaluate(&self, message: &str) -> Match<'_> {
        if let Some(greeting) = self.greeting() {
            if greeting.is_match(message) {
                return Match::Greeting {
                    response: greeting.response(),
                };
            }
        }

        let lowered = message.to_lowercase();
        let mut best: Option<(&str, usize, &str)> = None;
        for category in self.categories() {
            let score = keyword_score(&category.keywords, &lowered);
            // Strictly greater keeps the earlier category on ties
            if score > best.map(|(_, s, _)| s).unwrap_or(0) {
                best = Some((category.name.as_str(), score, category.response.as_str()));
            }
        }

        match (best, self.default_response()) {
            (Some((name, score, response)), _) => Match::Category {
                name,
                score,
                response,
            },
            (None, Some(response)) => Match::Default { response },
            (None, None) => Match::Fallback,
        }
    }

    /// Reply text for `message`
    pub fn respond(&self, message: &str) -> &str {
        self.evaluate(message).response()
    }
}

/// Count keywords appearing as substrings; overlapping keywords each count
fn keyword_score(keywords: &[String], lowered_message: &str) -> usize {
    keywords
        .iter()
        .filter(|keyword| lowered_message.contains(keyword.as_str()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Category;
    use pretty_assertions::assert_eq;

    fn portfolio_base() -> KnowledgeBase {
        KnowledgeBase::from_json(
            r#"{
                "greeting": {"pattern": "^(hi|hello)", "response": "Hi!"},
                "experience": {"keywords": ["work", "meta"], "response": "7 years..."},
                "default": {"response": "Ask me anything"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_greeting_short_circuits_keywords() {
        let base = portfolio_base();
        assert_eq!(base.respond("hello, tell me about your work"), "Hi!");
        assert_eq!(base.respond("HI there, meta work?"), "Hi!");
        assert_eq!(
            base.evaluate("Hello"),
            Match::Greeting { response: "Hi!" }
        );
    }

    #[test]
    fn test_single_category_match() {
        let base = portfolio_base();
        assert_eq!(
            base.evaluate("what about your work at meta"),
            Match::Category {
                name: "experience",
                score: 2,
                response: "7 years...",
            }
        );
    }

    #[test]
    fn test_no_keywords_uses_default() {
        let base = portfolio_base();
        assert_eq!(base.respond("what's the weather"), "Ask me anything");
    }

    #[test]
    fn test_missing_default_uses_generic_fallback() {
        let base = KnowledgeBase::new().with_category(Category::new("skills", ["rust"], "Rust"));
        assert_eq!(base.evaluate("gardening"), Match::Fallback);
        assert_eq!(base.respond("gardening"), GENERIC_FALLBACK_RESPONSE);
    }

    #[test]
    fn test_highest_score_wins_across_categories() {
        let base = KnowledgeBase::new()
            .with_category(Category::new("skills", ["rust", "python"], "skills"))
            .with_category(Category::new("projects", ["project", "built", "github"], "projects"))
            .with_default("default");

        assert_eq!(
            base.respond("which project did you build in rust and put on github"),
            "projects"
        );
    }

    #[test]
    fn test_ties_keep_first_category() {
        let base = KnowledgeBase::new()
            .with_category(Category::new("education", ["degree"], "education"))
            .with_category(Category::new("contact", ["email"], "contact"))
            .with_default("default");

        assert_eq!(base.respond("email me about your degree"), "education");
    }

    #[test]
    fn test_keywords_match_case_insensitively_as_substrings() {
        let base = KnowledgeBase::new()
            .with_category(Category::new("data", ["Data", "database"], "data"))
            .with_default("default");

        // "data" also counts inside "database"
        assert_eq!(
            base.evaluate("Tell me about DATABASE work"),
            Match::Category {
                name: "data",
                score: 2,
                response: "data",
            }
        );
    }

    #[test]
    fn test_greeting_pattern_does_not_match_mid_sentence_when_anchored() {
        let base = portfolio_base();
        assert_eq!(base.respond("say hello to meta"), "7 years...");
    }
}
