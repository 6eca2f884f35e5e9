//! Normalizer configuration.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::level_filters::LevelFilter;

use crate::stopwords::{DirectoryStopWords, EmbeddedStopWords, StopWordSource};

/// Configuration options for a [`Normalizr`](crate::Normalizr).
///
/// ```
/// use normalizr_core::NormalizrConfig;
/// use tracing::level_filters::LevelFilter;
///
/// let config = NormalizrConfig::new("es")
///     .with_lazy_load(true)
///     .with_log_level(LevelFilter::DEBUG);
/// assert_eq!(config.language, "es");
/// ```
#[derive(Debug, Clone)]
pub struct NormalizrConfig {
    /// Language code used to pick the stop-word list, e.g. `"en"`.
    pub language: String,
    /// When enabled, stop words are read on first use instead of at
    /// construction.
    pub lazy_load: bool,
    /// Diagnostic verbosity. Events more verbose than this are not emitted.
    pub log_level: LevelFilter,
    /// Where stop-word lists are read from.
    pub stop_words: Arc<dyn StopWordSource>,
}

impl Default for NormalizrConfig {
    fn default() -> Self {
        Self {
            language: "en".to_owned(),
            lazy_load: false,
            log_level: LevelFilter::INFO,
            stop_words: Arc::new(EmbeddedStopWords),
        }
    }
}

impl NormalizrConfig {
    /// Default configuration for `language`.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    /// Defer stop-word loading until the first `remove_stop_words` call.
    #[must_use]
    pub fn with_lazy_load(mut self, lazy_load: bool) -> Self {
        self.lazy_load = lazy_load;
        self
    }

    /// Set the diagnostic verbosity.
    #[must_use]
    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    /// Read stop words from a custom source.
    #[must_use]
    pub fn with_stop_word_source(mut self, source: impl StopWordSource + 'static) -> Self {
        self.stop_words = Arc::new(source);
        self
    }

    /// Read stop words from `<dir>/stop-<language>` files.
    #[must_use]
    pub fn with_data_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.with_stop_word_source(DirectoryStopWords::new(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = NormalizrConfig::default();
        assert_eq!(config.language, "en");
        assert!(!config.lazy_load);
        assert_eq!(config.log_level, LevelFilter::INFO);
    }

    #[test]
    fn builder_overrides() {
        let config = NormalizrConfig::new("fr")
            .with_lazy_load(true)
            .with_log_level(LevelFilter::OFF);
        assert_eq!(config.language, "fr");
        assert!(config.lazy_load);
        assert_eq!(config.log_level, LevelFilter::OFF);
    }

    #[test]
    fn data_dir_source() {
        let config = NormalizrConfig::default().with_data_dir("/nonexistent");
        assert!(format!("{:?}", config.stop_words).contains("nonexistent"));
    }
}
