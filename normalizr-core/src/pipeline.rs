//! Step resolution.
//!
//! A [`Step`] is loosely typed: a name and a bag of options. Before anything
//! runs, every step of a pipeline is resolved into a [`Normalization`], which
//! names the operation and carries its options with defaults filled in. A bad
//! name or option therefore fails the whole call up front, before any text is
//! touched or any lazy state is initialized.

use normalizr_types::{
    CharSet, NormalizrError, Operation, OptionValue, Result, Step, StepOptions, UnicodeForm,
};
use smallvec::{smallvec, SmallVec};

/// A resolved pipeline.
pub type Plan = SmallVec<[Normalization; 8]>;

/// One fully-typed normalization step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalization {
    /// See [`Operation::RemoveAccentMarks`].
    RemoveAccentMarks { excluded: CharSet },
    /// See [`Operation::RemoveExtraWhitespaces`].
    RemoveExtraWhitespaces,
    /// See [`Operation::RemoveStopWords`].
    RemoveStopWords { ignore_case: bool },
    /// See [`Operation::ReplaceCharacters`].
    ReplaceCharacters {
        characters: String,
        replacement: String,
    },
    /// See [`Operation::ReplaceEmails`].
    ReplaceEmails { replacement: String },
    /// See [`Operation::ReplaceEmojis`].
    ReplaceEmojis { replacement: String },
    /// See [`Operation::ReplaceHyphens`].
    ReplaceHyphens { replacement: String },
    /// See [`Operation::ReplacePunctuation`].
    ReplacePunctuation {
        excluded: CharSet,
        replacement: String,
    },
    /// See [`Operation::ReplaceSymbols`].
    ReplaceSymbols {
        form: UnicodeForm,
        excluded: CharSet,
        replacement: String,
    },
    /// See [`Operation::ReplaceUrls`].
    ReplaceUrls { replacement: String },
}

impl Normalization {
    /// The operation this step runs.
    pub fn operation(&self) -> Operation {
        match self {
            Normalization::RemoveAccentMarks { .. } => Operation::RemoveAccentMarks,
            Normalization::RemoveExtraWhitespaces => Operation::RemoveExtraWhitespaces,
            Normalization::RemoveStopWords { .. } => Operation::RemoveStopWords,
            Normalization::ReplaceCharacters { .. } => Operation::ReplaceCharacters,
            Normalization::ReplaceEmails { .. } => Operation::ReplaceEmails,
            Normalization::ReplaceEmojis { .. } => Operation::ReplaceEmojis,
            Normalization::ReplaceHyphens { .. } => Operation::ReplaceHyphens,
            Normalization::ReplacePunctuation { .. } => Operation::ReplacePunctuation,
            Normalization::ReplaceSymbols { .. } => Operation::ReplaceSymbols,
            Normalization::ReplaceUrls { .. } => Operation::ReplaceUrls,
        }
    }

    /// The pipeline used when the caller gives none.
    pub fn default_pipeline() -> Plan {
        smallvec![
            Normalization::RemoveExtraWhitespaces,
            Normalization::ReplacePunctuation {
                excluded: CharSet::default(),
                replacement: String::new(),
            },
            Normalization::ReplaceSymbols {
                form: UnicodeForm::Nfkd,
                excluded: CharSet::default(),
                replacement: String::new(),
            },
            Normalization::RemoveStopWords { ignore_case: true },
        ]
    }

    /// Resolves a step.
    ///
    /// # Errors
    /// - [`NormalizrError::UnknownOperation`] if the name is not an operation.
    /// - [`NormalizrError::InvalidOption`] for an option the operation does
    ///   not take, a value of the wrong type, or a missing required option.
    pub fn from_step(step: &Step) -> Result<Self> {
        let op = step.operation()?;
        let opts = OptionReader::new(op, &step.options)?;

        let resolved = match op {
            Operation::RemoveAccentMarks => Normalization::RemoveAccentMarks {
                excluded: opts.chars("excluded")?,
            },
            Operation::RemoveExtraWhitespaces => Normalization::RemoveExtraWhitespaces,
            Operation::RemoveStopWords => Normalization::RemoveStopWords {
                ignore_case: opts.flag("ignore_case", true)?,
            },
            Operation::ReplaceCharacters => Normalization::ReplaceCharacters {
                characters: opts.required_characters("characters")?,
                replacement: opts.text("replacement", "")?,
            },
            Operation::ReplaceEmails => Normalization::ReplaceEmails {
                replacement: opts.text("replacement", "")?,
            },
            Operation::ReplaceEmojis => Normalization::ReplaceEmojis {
                replacement: opts.text("replacement", "")?,
            },
            Operation::ReplaceHyphens => Normalization::ReplaceHyphens {
                replacement: opts.text("replacement", " ")?,
            },
            Operation::ReplacePunctuation => Normalization::ReplacePunctuation {
                excluded: opts.chars("excluded")?,
                replacement: opts.text("replacement", "")?,
            },
            Operation::ReplaceSymbols => Normalization::ReplaceSymbols {
                form: opts.form("format", UnicodeForm::Nfkd)?,
                excluded: opts.chars("excluded")?,
                replacement: opts.text("replacement", "")?,
            },
            Operation::ReplaceUrls => Normalization::ReplaceUrls {
                replacement: opts.text("replacement", "")?,
            },
        };

        Ok(resolved)
    }
}

impl TryFrom<&Step> for Normalization {
    type Error = NormalizrError;

    fn try_from(step: &Step) -> Result<Self> {
        Normalization::from_step(step)
    }
}

/// Resolves every step, stopping at the first error.
pub fn resolve<I>(steps: I) -> Result<Plan>
where
    I: IntoIterator,
    I::Item: Into<Step>,
{
    steps
        .into_iter()
        .map(|step| {
            let step: Step = step.into();
            Normalization::from_step(&step)
        })
        .collect()
}

struct OptionReader<'a> {
    operation: Operation,
    options: &'a StepOptions,
}

impl<'a> OptionReader<'a> {
    fn new(operation: Operation, options: &'a StepOptions) -> Result<Self> {
        let accepted = operation.option_names();
        if let Some((key, _)) = options
            .iter()
            .find(|(key, _)| accepted.iter().all(|name| name != key))
        {
            return Err(NormalizrError::invalid_option(
                operation,
                key,
                "not accepted by this operation",
            ));
        }

        Ok(Self { operation, options })
    }

    fn wrong_type(&self, key: &str, expected: &str, got: &OptionValue) -> NormalizrError {
        NormalizrError::invalid_option(
            self.operation,
            key,
            format!("expected {expected}, got {}", got.kind()),
        )
    }

    fn text(&self, key: &str, default: &str) -> Result<String> {
        match self.options.get(key) {
            None => Ok(default.to_owned()),
            Some(OptionValue::Text(s)) => Ok(s.clone()),
            Some(other) => Err(self.wrong_type(key, "text", other)),
        }
    }

    fn flag(&self, key: &str, default: bool) -> Result<bool> {
        match self.options.get(key) {
            None => Ok(default),
            Some(OptionValue::Bool(b)) => Ok(*b),
            Some(other) => Err(self.wrong_type(key, "boolean", other)),
        }
    }

    fn chars(&self, key: &str) -> Result<CharSet> {
        match self.options.get(key) {
            None => Ok(CharSet::default()),
            Some(OptionValue::Text(s)) => Ok(s.chars().collect()),
            Some(OptionValue::Chars(set)) => Ok(set.clone()),
            Some(other) => Err(self.wrong_type(key, "text or character set", other)),
        }
    }

    fn required_characters(&self, key: &str) -> Result<String> {
        match self.options.get(key) {
            None => Err(NormalizrError::invalid_option(
                self.operation,
                key,
                "missing required option",
            )),
            Some(OptionValue::Text(s)) => Ok(s.clone()),
            Some(OptionValue::Chars(set)) => Ok(set.iter().collect()),
            Some(other) => Err(self.wrong_type(key, "text or character set", other)),
        }
    }

    fn form(&self, key: &str, default: UnicodeForm) -> Result<UnicodeForm> {
        match self.options.get(key) {
            None => Ok(default),
            Some(OptionValue::Text(name)) => UnicodeForm::from_name(name).ok_or_else(|| {
                NormalizrError::invalid_option(
                    self.operation,
                    key,
                    format!("unknown unicode form `{name}`"),
                )
            }),
            Some(other) => Err(self.wrong_type(key, "text", other)),
        }
    }
}
