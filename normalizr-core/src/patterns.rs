//! Matchers for emails, URLs and emojis.
//!
//! The normalizer treats these as opaque resources: anything that matches is
//! replaced. A shared built-in set is provided; callers with stricter needs
//! compile their own with [`PatternSet::new`].

use normalizr_types::{NormalizrError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Built-in email pattern.
pub const EMAIL: &str = r"(?i)\b[a-z0-9._%+\-]+@[a-z0-9\-]+(?:\.[a-z0-9\-]+)*\.[a-z]{2,}\b";

/// Built-in URL pattern: scheme URLs and bare `www.` hosts up to the next
/// whitespace or quote.
pub const URL: &str = r#"(?i)\b(?:(?:https?|ftp)://|www\.)[^\s<>"']+"#;

/// Built-in emoji pattern: pictographic blocks, flags and dingbats, with
/// trailing variation selectors and zero-width joiners.
pub const EMOJI: &str = "(?:[\u{1F600}-\u{1F64F}\u{1F300}-\u{1F5FF}\u{1F680}-\u{1F6FF}\
    \u{1F1E0}-\u{1F1FF}\u{2702}-\u{27B0}\u{1F900}-\u{1F9FF}\
    \u{1FA00}-\u{1FA6F}\u{1FA70}-\u{1FAFF}\u{2600}-\u{26FF}\
    \u{1F3FB}-\u{1F3FF}][\u{FE0F}\u{200D}]*)+";

static BUILTIN: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(EMAIL, URL, EMOJI).expect("built-in patterns are valid")
});

/// Compiled email, URL and emoji matchers.
#[derive(Debug, Clone)]
pub struct PatternSet {
    email: Regex,
    url: Regex,
    emoji: Regex,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl PatternSet {
    /// Compiles a custom pattern set.
    ///
    /// # Errors
    /// [`NormalizrError::InvalidPattern`] naming the first pattern that fails.
    pub fn new(email: &str, url: &str, emoji: &str) -> Result<Self> {
        Ok(Self {
            email: compile("email", email)?,
            url: compile("url", url)?,
            emoji: compile("emoji", emoji)?,
        })
    }

    /// The shared built-in set.
    pub fn builtin() -> &'static PatternSet {
        &BUILTIN
    }

    /// Email matcher.
    pub fn email(&self) -> &Regex {
        &self.email
    }

    /// URL matcher.
    pub fn url(&self) -> &Regex {
        &self.url
    }

    /// Emoji matcher.
    pub fn emoji(&self) -> &Regex {
        &self.emoji
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|err| NormalizrError::InvalidPattern {
        name: name.to_owned(),
        reason: err.to_string(),
    })
}
