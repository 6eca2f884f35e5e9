//! Stop-word lists and the per-normalizer store.
//!
//! A stop-word resource is plain text, one entry per line:
//!
//! ```text
//! word1 word2 ... wordN | optional comment
//! ```
//!
//! Only the part before the first `|` matters; it is split on whitespace and
//! every piece becomes a stop word. Lines that start with `|` are comments.
//!
//! Resources are looked up by language code through a [`StopWordSource`].
//! The store keeps the loaded set behind a lock so one normalizer can be
//! shared across threads; the first lazy load happens exactly once.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use normalizr_types::{NormalizrError, Result};
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashSet;
use tracing::level_filters::LevelFilter;
use tracing::{debug, Level};

/// Supplies stop-word resources by language code.
pub trait StopWordSource: fmt::Debug + Send + Sync {
    /// Returns the raw resource text for `language`.
    ///
    /// Must fail with [`NormalizrError::ResourceNotFound`] when there is no
    /// resource for that code.
    fn read(&self, language: &str) -> Result<Cow<'static, str>>;
}

const EMBEDDED: [(&str, &str); 4] = [
    ("de", include_str!("../data/stop-de")),
    ("en", include_str!("../data/stop-en")),
    ("es", include_str!("../data/stop-es")),
    ("fr", include_str!("../data/stop-fr")),
];

/// Word lists compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedStopWords;

impl EmbeddedStopWords {
    /// Language codes with a built-in list.
    pub fn languages() -> impl Iterator<Item = &'static str> {
        EMBEDDED.iter().map(|(code, _)| *code)
    }
}

impl StopWordSource for EmbeddedStopWords {
    fn read(&self, language: &str) -> Result<Cow<'static, str>> {
        EMBEDDED
            .iter()
            .find(|(code, _)| *code == language)
            .map(|(_, content)| Cow::Borrowed(*content))
            .ok_or_else(|| not_found(language))
    }
}

/// Reads `<root>/stop-<language>` files.
#[derive(Debug, Clone)]
pub struct DirectoryStopWords {
    root: PathBuf,
}

impl DirectoryStopWords {
    /// Source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl StopWordSource for DirectoryStopWords {
    fn read(&self, language: &str) -> Result<Cow<'static, str>> {
        // Codes are file name suffixes; anything that could leave the root is not a language.
        if language.is_empty()
            || language.contains(|c| c == '/' || c == '\\')
            || language.contains("..")
        {
            return Err(not_found(language));
        }

        let path = self.root.join(format!("stop-{language}"));
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Cow::Owned(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(not_found(language)),
            Err(source) => Err(NormalizrError::ResourceRead {
                language: language.to_owned(),
                source,
            }),
        }
    }
}

fn not_found(language: &str) -> NormalizrError {
    NormalizrError::ResourceNotFound {
        language: language.to_owned(),
    }
}

/// Extracts the stop words of a resource, in file order.
pub fn parse_stop_words(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .filter_map(|line| line.split('|').next())
        .flat_map(str::split_whitespace)
}

/// Lazily populated set of stop words.
///
/// `None` means nothing has been loaded yet. Loads are additive and the set
/// never shrinks except through [`StopWordStore::clear`].
#[derive(Debug)]
pub struct StopWordStore {
    source: Arc<dyn StopWordSource>,
    words: RwLock<Option<FxHashSet<String>>>,
    log_level: LevelFilter,
}

impl StopWordStore {
    /// Creates an empty, unloaded store.
    pub fn new(source: Arc<dyn StopWordSource>, log_level: LevelFilter) -> Self {
        Self {
            source,
            words: RwLock::new(None),
            log_level,
        }
    }

    /// Reads the resource for `language` and adds its words to the set.
    ///
    /// Returns the number of words in the set afterwards.
    ///
    /// # Errors
    /// [`NormalizrError::ResourceNotFound`] if the source has no resource for
    /// `language`; the set is left untouched.
    pub fn load(&self, language: &str) -> Result<usize> {
        let content = self.source.read(language)?;
        let mut words = self.words.write();
        Ok(self.fill(&mut words, language, &content))
    }

    /// Loads `language` unless something is already loaded.
    ///
    /// Concurrent callers block on the write lock; only the first one reads
    /// the resource.
    pub fn ensure_loaded(&self, language: &str) -> Result<()> {
        if self.words.read().is_some() {
            return Ok(());
        }

        let mut words = self.words.write();
        if words.is_none() {
            let content = self.source.read(language)?;
            self.fill(&mut words, language, &content);
        }
        Ok(())
    }

    /// Runs `f` over the loaded set, loading `language` first if nothing is
    /// loaded.
    ///
    /// The set `f` sees is never empty because of a concurrent
    /// [`StopWordStore::clear`]: the lock taken for the load is held until
    /// `f` returns.
    pub fn with_loaded<R>(
        &self,
        language: &str,
        f: impl FnOnce(&FxHashSet<String>) -> R,
    ) -> Result<R> {
        {
            let words = self.words.read();
            if let Some(set) = words.as_ref() {
                return Ok(f(set));
            }
        }

        let mut words = self.words.write();
        if words.is_none() {
            let content = self.source.read(language)?;
            self.fill(&mut words, language, &content);
        }
        let words = RwLockWriteGuard::downgrade(words);
        match words.as_ref() {
            Some(set) => Ok(f(set)),
            None => Ok(f(&FxHashSet::default())),
        }
    }

    fn fill(&self,words: &mut Option<FxHashSet<String>>, language: &str, content: &str) -> usize {
        let set = words.get_or_insert_with(FxHashSet::default);
        set.extend(parse_stop_words(content).map(str::to_owned));

        if self.log_level >= Level::DEBUG {
            debug!(language, words = set.len(), "loaded stop words");
        }
        set.len()
    }

    /// Read access to the loaded set, or `None` before the first load.
    pub fn words(&self) -> Option<MappedRwLockReadGuard<'_, FxHashSet<String>>> {
        RwLockReadGuard::try_map(self.words.read(), Option::as_ref).ok()
    }

    /// Returns true if `word` is a stop word. Matching is exact.
    pub fn contains(&self, word: &str) -> bool {
        self.words
            .read()
            .as_ref()
            .is_some_and(|set| set.contains(word))
    }

    /// Returns true once any resource has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.words.read().is_some()
    }

    /// Number of stop words currently loaded.
    pub fn len(&self) -> usize {
        self.words.read().as_ref().map_or(0, FxHashSet::len)
    }

    /// Returns true if no stop words are loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every word and returns to the unloaded state.
    pub fn clear(&self) {
        *self.words.write() = None;
    }
}
