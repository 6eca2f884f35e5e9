//! Configurable text normalization.
//!
//! A [`Normalizr`] applies an ordered list of named steps to a piece of text.
//! Each step is one of a closed set of operations:
//!
//! | step | effect |
//! |---|---|
//! | `remove_extra_whitespaces` | collapse whitespace runs, trim both ends |
//! | `remove_accent_marks` | drop nonspacing marks after NFKD |
//! | `remove_stop_words` | drop words from the language's stop-word list |
//! | `replace_characters` | replace a custom set of characters |
//! | `replace_punctuation` | replace ASCII punctuation |
//! | `replace_symbols` | replace symbols (Sc, Sk, Sm, So) and nonspacing marks |
//! | `replace_hyphens` | replace `-` |
//! | `replace_urls`, `replace_emails`, `replace_emojis` | replace pattern matches |
//!
//! Without an explicit list, [`Normalizr::normalize`] runs
//! `remove_extra_whitespaces`, `replace_punctuation`, `replace_symbols` and
//! `remove_stop_words`, in that order.

pub mod analyzer;
pub mod charclass;
pub mod config;
pub mod normalizr;
pub mod patterns;
pub mod pipeline;
pub mod stopwords;

pub use config::NormalizrConfig;
pub use normalizr::Normalizr;
pub use normalizr_types::{
    CharSet, NormalizrError, Operation, OptionValue, Result, Step, StepOptions, UnicodeForm,
};
pub use patterns::PatternSet;
pub use pipeline::{Normalization, Plan};
pub use stopwords::{DirectoryStopWords, EmbeddedStopWords, StopWordSource, StopWordStore};
