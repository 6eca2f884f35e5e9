//! Cache of compiled character-class matchers.
//!
//! `replace_characters` and `replace_punctuation` turn a set of characters
//! into a `[...]` regex. Compiling is the expensive part, so matchers are kept
//! per normalizer, keyed by the set in canonical form: sorted by code point
//! with duplicates removed. Two inputs with the same members always share one
//! matcher regardless of the order they were given in.

use std::sync::Arc;

use normalizr_types::{NormalizrError, Result};
use parking_lot::Mutex;
use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::level_filters::LevelFilter;
use tracing::{debug, Level};

/// Canonical cache key for a character set.
pub fn canonical_key<I: IntoIterator<Item = char>>(characters: I) -> String {
    let mut chars: Vec<char> = characters.into_iter().collect();
    chars.sort_unstable();
    chars.dedup();
    chars.into_iter().collect()
}

/// Grow-only map from canonical character sets to compiled matchers.
#[derive(Debug)]
pub struct CharClassCache {
    entries: Mutex<FxHashMap<String, Arc<Regex>>>,
    log_level: LevelFilter,
}

impl Default for CharClassCache {
    fn default() -> Self {
        Self::new(LevelFilter::INFO)
    }
}

impl CharClassCache {
    /// Creates an empty cache.
    pub fn new(log_level: LevelFilter) -> Self {
        Self {
            entries: Mutex::new(FxHashMap::default()),
            log_level,
        }
    }

    /// Returns the matcher for exactly these characters, compiling it on first
    /// request.
    ///
    /// # Errors
    /// [`NormalizrError::InvalidPattern`] for an empty set, which has no
    /// matcher.
    pub fn get_or_build<I: IntoIterator<Item = char>>(&self, characters: I) -> Result<Arc<Regex>> {
        let key = canonical_key(characters);
        if key.is_empty() {
            return Err(NormalizrError::InvalidPattern {
                name: "character class".to_owned(),
                reason: "empty character set".to_owned(),
            });
        }

        let mut entries = self.entries.lock();
        if let Some(matcher) = entries.get(&key) {
            return Ok(Arc::clone(matcher));
        }

        let matcher = Regex::new(&format!("[{}]", regex::escape(&key))).map_err(|err| {
            NormalizrError::InvalidPattern {
                name: format!("character class {key:?}"),
                reason: err.to_string(),
            }
        })?;
        let matcher = Arc::new(matcher);

        if self.log_level >= Level::DEBUG {
            debug!(characters = %key, cached = entries.len() + 1, "compiled character class");
        }
        entries.insert(key, Arc::clone(&matcher));
        Ok(matcher)
    }

    /// Number of cached matchers.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
