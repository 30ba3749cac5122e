//! Wikitext word extraction
//!
//! Reduces raw wikitext to the lowercase word sequence the external
//! trainer's datasources expect under the revision-text cache key. This is
//! markup stripping and tokenization only; feature values are computed by
//! the external tool.

use std::sync::LazyLock;

use regex::Regex;

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("Invalid comment regex"));
static TEMPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^{}]*\}\}").expect("Invalid template regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^<>]+>").expect("Invalid tag regex"));
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\[\]|]+)(?:\|([^\[\]]*))?\]\]").expect("Invalid link regex")
});
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}][\p{L}\p{N}']*").expect("Invalid word regex"));

/// Link namespaces that never contribute article words.
pub const FORBIDDEN_LINK_PREFIXES: &[&str] = &["category", "image", "file"];

/// Observation cache key the external trainer reads word sequences from.
pub const REVISION_TEXT_KEY: &str = "revision.text";

/// Wikitext-to-words transformer.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    forbidden_prefixes: Vec<String>,
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new(FORBIDDEN_LINK_PREFIXES.iter().map(|p| p.to_string()))
    }
}

impl WordTokenizer {
    pub fn new(forbidden_prefixes: impl IntoIterator<Item = String>) -> Self {
        Self {
            forbidden_prefixes: forbidden_prefixes
                .into_iter()
                .map(|p| p.to_lowercase())
                .collect(),
        }
    }

    /// Extract the lowercase word sequence from wikitext.
    pub fn transform(&self, text: &str) -> Vec<String> {
        let text = COMMENT_RE.replace_all(text, " ");

        // Templates nest; peel inner-most first until none remain.
        let mut text = text.into_owned();
        loop {
            let stripped = TEMPLATE_RE.replace_all(&text, " ");
            if stripped == text {
                break;
            }
            text = stripped.into_owned();
        }

        let text = LINK_RE.replace_all(&text, |caps: &regex::Captures<'_>| {
            let target = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            if self.is_forbidden(target) {
                return String::new();
            }
            caps.get(2)
                .map(|m| m.as_str())
                .filter(|label| !label.is_empty())
                .unwrap_or(target)
                .to_string()
        });
        let text = TAG_RE.replace_all(&text, " ");

        WORD_RE
            .find_iter(&text)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }

    fn is_forbidden(&self, link_target: &str) -> bool {
        let Some((namespace, _)) = link_target.split_once(':') else {
            return false;
        };
        let namespace = namespace.trim().to_lowercase();
        self.forbidden_prefixes.contains(&namespace)
    }
}
