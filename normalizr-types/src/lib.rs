//! Core types shared by the normalizr crates.
//!
//! This crate holds the vocabulary of the normalization pipeline so that
//! callers can describe pipelines without pulling in the engine:
//!
//! - **Operations**: the closed set of named transformations
//! - **Steps**: an operation name plus its per-step options
//! - **Errors**: the single error type every fallible call returns

#![warn(missing_docs)]

use core::fmt;
use core::str::FromStr;
use std::io;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use thiserror::Error;

/// Set of characters used by the `excluded` and `characters` options.
pub type CharSet = FxHashSet<char>;

/// Convenience alias for results produced by normalizr.
pub type Result<T, E = NormalizrError> = core::result::Result<T, E>;

/// Errors raised while configuring or running a normalization pipeline.
#[derive(Debug, Error)]
pub enum NormalizrError {
    /// No stop-word resource exists for the requested language code.
    #[error("no stop-word resource for language `{language}`")]
    ResourceNotFound {
        /// The language code that was requested.
        language: String,
    },
    /// The stop-word resource exists but could not be read.
    #[error("failed to read stop-word resource for language `{language}`: {source}")]
    ResourceRead {
        /// The language code that was requested.
        language: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A pipeline step names an operation that does not exist.
    #[error("unknown normalization `{name}`")]
    UnknownOperation {
        /// The name as it appeared in the step.
        name: String,
    },
    /// An operation received an option it cannot interpret.
    #[error("invalid option `{option}` for `{operation}`: {reason}")]
    InvalidOption {
        /// Operation the option was passed to.
        operation: Operation,
        /// Option key.
        option: String,
        /// What was wrong with it.
        reason: String,
    },
    /// A matcher could not be compiled.
    #[error("invalid pattern `{name}`: {reason}")]
    InvalidPattern {
        /// Which pattern failed (e.g. `email`, or the character class).
        name: String,
        /// Compiler message.
        reason: String,
    },
}

impl NormalizrError {
    /// Shorthand for an [`NormalizrError::InvalidOption`].
    pub fn invalid_option(
        operation: Operation,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        NormalizrError::InvalidOption {
            operation,
            option: option.into(),
            reason: reason.into(),
        }
    }
}

/// A named transformation the pipeline knows how to apply.
///
/// This is the closed mapping from step names to behavior. Names are the
/// snake_case identifiers used in step lists, e.g. `"replace_hyphens"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Drop combining accent marks.
    RemoveAccentMarks,
    /// Collapse whitespace runs into single spaces.
    RemoveExtraWhitespaces,
    /// Drop words found in the stop-word list.
    RemoveStopWords,
    /// Replace a custom set of characters.
    ReplaceCharacters,
    /// Replace email addresses.
    ReplaceEmails,
    /// Replace emojis.
    ReplaceEmojis,
    /// Replace `-`.
    ReplaceHyphens,
    /// Replace ASCII punctuation.
    ReplacePunctuation,
    /// Replace unicode symbols and nonspacing marks.
    ReplaceSymbols,
    /// Replace URLs.
    ReplaceUrls,
}

impl Operation {
    /// Every operation, in name order.
    pub const ALL: [Operation; 10] = [
        Operation::RemoveAccentMarks,
        Operation::RemoveExtraWhitespaces,
        Operation::RemoveStopWords,
        Operation::ReplaceCharacters,
        Operation::ReplaceEmails,
        Operation::ReplaceEmojis,
        Operation::ReplaceHyphens,
        Operation::ReplacePunctuation,
        Operation::ReplaceSymbols,
        Operation::ReplaceUrls,
    ];

    /// Steps applied when a caller does not provide a pipeline.
    pub const DEFAULT_PIPELINE: [Operation; 4] = [
        Operation::RemoveExtraWhitespaces,
        Operation::ReplacePunctuation,
        Operation::ReplaceSymbols,
        Operation::RemoveStopWords,
    ];

    /// The step name of this operation.
    pub const fn name(self) -> &'static str {
        match self {
            Operation::RemoveAccentMarks => "remove_accent_marks",
            Operation::RemoveExtraWhitespaces => "remove_extra_whitespaces",
            Operation::RemoveStopWords => "remove_stop_words",
            Operation::ReplaceCharacters => "replace_characters",
            Operation::ReplaceEmails => "replace_emails",
            Operation::ReplaceEmojis => "replace_emojis",
            Operation::ReplaceHyphens => "replace_hyphens",
            Operation::ReplacePunctuation => "replace_punctuation",
            Operation::ReplaceSymbols => "replace_symbols",
            Operation::ReplaceUrls => "replace_urls",
        }
    }

    /// Option keys this operation accepts.
    pub const fn option_names(self) -> &'static [&'static str] {
        match self {
            Operation::RemoveAccentMarks => &["excluded"],
            Operation::RemoveExtraWhitespaces => &[],
            Operation::RemoveStopWords => &["ignore_case"],
            Operation::ReplaceCharacters => &["characters", "replacement"],
            Operation::ReplaceEmails
            | Operation::ReplaceEmojis
            | Operation::ReplaceHyphens
            | Operation::ReplaceUrls => &["replacement"],
            Operation::ReplacePunctuation => &["excluded", "replacement"],
            Operation::ReplaceSymbols => &["format", "excluded", "replacement"],
        }
    }

    /// Resolves a step name.
    ///
    /// # Errors
    /// Returns [`NormalizrError::UnknownOperation`] if no operation has that name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| NormalizrError::UnknownOperation {
                name: name.to_owned(),
            })
    }
}

impl FromStr for Operation {
    type Err = NormalizrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unicode normalization form used by `replace_symbols`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnicodeForm {
    /// Canonical composition.
    Nfc,
    /// Canonical decomposition.
    Nfd,
    /// Compatibility composition.
    Nfkc,
    /// Compatibility decomposition.
    #[default]
    Nfkd,
}

impl UnicodeForm {
    /// Parses `NFC`, `NFD`, `NFKC` or `NFKD` (ASCII case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Nfc, Self::Nfd, Self::Nfkc, Self::Nfkd]
            .into_iter()
            .find(|form| form.name().eq_ignore_ascii_case(name))
    }

    /// Canonical upper-case name.
    pub const fn name(self) -> &'static str {
        match self {
            UnicodeForm::Nfc => "NFC",
            UnicodeForm::Nfd => "NFD",
            UnicodeForm::Nfkc => "NFKC",
            UnicodeForm::Nfkd => "NFKD",
        }
    }
}

impl fmt::Display for UnicodeForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of a single step option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// A flag such as `ignore_case`.
    Bool(bool),
    /// A string such as `replacement` or `format`.
    ///
    /// Character-set options also accept text; each char becomes a member.
    Text(String),
    /// An explicit character set.
    Chars(CharSet),
}

impl OptionValue {
    /// Human-readable type name, used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "boolean",
            OptionValue::Text(_) => "text",
            OptionValue::Chars(_) => "character set",
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<CharSet> for OptionValue {
    fn from(value: CharSet) -> Self {
        OptionValue::Chars(value)
    }
}

/// Options attached to one step.
///
/// Keys are unique; setting an existing key replaces its value. Most steps
/// carry zero to three options, so entries live inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOptions {
    entries: SmallVec<[(String, OptionValue); 4]>,
}

impl StepOptions {
    /// Creates an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`StepOptions::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Looks up a key.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no options are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for StepOptions
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = StepOptions::new();
        for (k, v) in iter {
            options.insert(k, v);
        }
        options
    }
}

/// One entry of a pipeline: an operation name and its options.
///
/// The name is kept as written so that unknown names are reported when the
/// pipeline runs, not when it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Operation name, e.g. `"replace_urls"`.
    pub name: String,
    /// Per-step options.
    pub options: StepOptions,
}

impl Step {
    /// Creates a step without options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: StepOptions::new(),
        }
    }

    /// Adds an option to this step.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key, value);
        self
    }

    /// Resolves the step name.
    ///
    /// # Errors
    /// Returns [`NormalizrError::UnknownOperation`] for an unknown name.
    pub fn operation(&self) -> Result<Operation> {
        Operation::from_name(&self.name)
    }
}

impl From<&str> for Step {
    fn from(name: &str) -> Self {
        Step::new(name)
    }
}

impl From<String> for Step {
    fn from(name: String) -> Self {
        Step::new(name)
    }
}

impl From<Operation> for Step {
    fn from(op: Operation) -> Self {
        Step::new(op.name())
    }
}

impl From<&Step> for Step {
    fn from(step: &Step) -> Self {
        step.clone()
    }
}

impl<S: Into<String>> From<(S, StepOptions)> for Step {
    fn from((name, options): (S, StepOptions)) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.options.is_empty() {
            f.write_str("(")?;
            for (i, (key, value)) in self.options.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match value {
                    OptionValue::Bool(b) => write!(f, "{key}={b}")?,
                    OptionValue::Text(s) => write!(f, "{key}={s:?}")?,
                    OptionValue::Chars(set) => write!(f, "{key}=<{} chars>", set.len())?,
                }
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}
