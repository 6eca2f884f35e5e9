//! The normalizer: configuration, shared state and the pipeline dispatcher.

use normalizr_types::{CharSet, Result, Step, UnicodeForm};
use tracing::{debug, trace, Level};

use crate::analyzer::{filter, marks, replace, whitespace};
use crate::charclass::CharClassCache;
use crate::config::NormalizrConfig;
use crate::patterns::PatternSet;
use crate::pipeline::{self, Normalization};
use crate::stopwords::StopWordStore;

/// Text normalizer.
///
/// Owns the stop-word store and the character-class cache, both filled on
/// demand. Every other operation is a pure function of its input. A
/// `Normalizr` is `Send + Sync`; concurrent callers share one stop-word load
/// and one cache.
///
/// # Examples
///
/// ```
/// use normalizr_core::{Normalizr, NormalizrConfig, Step};
///
/// let normalizr = Normalizr::new(NormalizrConfig::new("en"))?;
/// assert_eq!(normalizr.normalize("  Hello   World!  ")?, "Hello World");
///
/// let text = normalizr.normalize_with(
///     "well-known   fact",
///     [
///         Step::from("replace_hyphens"),
///         Step::from("remove_extra_whitespaces"),
///     ],
/// )?;
/// assert_eq!(text, "well known fact");
/// # Ok::<(), normalizr_core::NormalizrError>(())
/// ```
#[derive(Debug)]
pub struct Normalizr {
    config: NormalizrConfig,
    patterns: PatternSet,
    stop_words: StopWordStore,
    char_classes: CharClassCache,
}

impl Normalizr {
    /// Creates a normalizer with the built-in email, URL and emoji patterns.
    ///
    /// # Errors
    /// Unless `lazy_load` is set, the stop words for `config.language` are
    /// loaded here and a missing resource fails with
    /// [`NormalizrError::ResourceNotFound`](crate::NormalizrError::ResourceNotFound).
    pub fn new(config: NormalizrConfig) -> Result<Self> {
        Self::with_patterns(config, PatternSet::builtin().clone())
    }

    /// Creates a normalizer with caller-supplied patterns.
    pub fn with_patterns(config: NormalizrConfig, patterns: PatternSet) -> Result<Self> {
        let stop_words = StopWordStore::new(config.stop_words.clone(), config.log_level);
        let char_classes = CharClassCache::new(config.log_level);

        if !config.lazy_load {
            stop_words.load(&config.language)?;
        }

        if config.log_level >= Level::DEBUG {
            debug!(
                language = %config.language,
                lazy_load = config.lazy_load,
                "normalizer ready"
            );
        }

        Ok(Self {
            config,
            patterns,
            stop_words,
            char_classes,
        })
    }

    /// The configuration this normalizer was built with.
    pub fn config(&self) -> &NormalizrConfig {
        &self.config
    }

    /// Language code used for stop words.
    pub fn language(&self) -> &str {
        &self.config.language
    }

    /// The stop-word store.
    pub fn stop_words(&self) -> &StopWordStore {
        &self.stop_words
    }

    /// The character-class cache.
    pub fn char_classes(&self) -> &CharClassCache {
        &self.char_classes
    }

    /// The email, URL and emoji patterns.
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Runs the default pipeline: `remove_extra_whitespaces`,
    /// `replace_punctuation`, `replace_symbols`, `remove_stop_words`.
    pub fn normalize(&self, text: &str) -> Result<String> {
        self.run(text, &Normalization::default_pipeline())
    }

    /// Runs `steps` in order.
    ///
    /// Steps may be bare operation names or [`Step`] values with options.
    /// All steps are resolved first; an unknown name or bad option fails the
    /// call before any step runs. An empty list runs the default pipeline.
    pub fn normalize_with<I>(&self, text: &str, steps: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: Into<Step>,
    {
        let plan = pipeline::resolve(steps)?;
        if plan.is_empty() {
            return self.normalize(text);
        }
        self.run(text, &plan)
    }

    /// Runs already-resolved steps in order.
    pub fn run(&self, text: &str, plan: &[Normalization]) -> Result<String> {
        let mut current = text.to_owned();
        for normalization in plan {
            current = self.apply(&current, normalization)?;
        }
        Ok(current)
    }

    /// Applies a single resolved step.
    pub fn apply(&self, text: &str, normalization: &Normalization) -> Result<String> {
        if self.config.log_level >= Level::TRACE {
            trace!(step = %normalization.operation(), len = text.len(), "applying normalization");
        }

        match normalization {
            Normalization::RemoveAccentMarks { excluded } => {
                Ok(self.remove_accent_marks(text, excluded))
            }
            Normalization::RemoveExtraWhitespaces => Ok(self.remove_extra_whitespaces(text)),
            Normalization::RemoveStopWords { ignore_case } => {
                self.remove_stop_words(text, *ignore_case)
            }
            Normalization::ReplaceCharacters {
                characters,
                replacement,
            } => self.replace_characters(text, characters, replacement),
            Normalization::ReplaceEmails { replacement } => {
                Ok(self.replace_emails(text, replacement))
            }
            Normalization::ReplaceEmojis { replacement } => {
                Ok(self.replace_emojis(text, replacement))
            }
            Normalization::ReplaceHyphens { replacement } => {
                Ok(self.replace_hyphens(text, replacement))
            }
            Normalization::ReplacePunctuation {
                excluded,
                replacement,
            } => self.replace_punctuation(text, excluded, replacement),
            Normalization::ReplaceSymbols {
                form,
                excluded,
                replacement,
            } => Ok(self.replace_symbols(text, *form, excluded, replacement)),
            Normalization::ReplaceUrls { replacement } => {
                Ok(self.replace_urls(text, replacement))
            }
        }
    }

    /// Removes accent marks, keeping any nonspacing mark in `excluded`.
    pub fn remove_accent_marks(&self, text: &str, excluded: &CharSet) -> String {
        marks::remove_accent_marks(text, excluded)
    }

    /// Collapses whitespace runs and trims both ends.
    pub fn remove_extra_whitespaces(&self, text: &str) -> String {
        whitespace::collapse(text)
    }

    /// Removes stop words, loading the list first if nothing is loaded yet.
    ///
    /// # Errors
    /// [`NormalizrError::ResourceNotFound`](crate::NormalizrError::ResourceNotFound)
    /// if the lazy load fails.
    pub fn remove_stop_words(&self, text: &str, ignore_case: bool) -> Result<String> {
        self.stop_words.with_loaded(&self.config.language, |words| {
            filter::remove_stop_words(text, words, ignore_case)
        })
    }

    /// Replaces email addresses.
    pub fn replace_emails(&self, text: &str, replacement: &str) -> String {
        replace::replace_matches(self.patterns.email(), text, replacement)
    }

    /// Replaces emojis.
    pub fn replace_emojis(&self, text: &str, replacement: &str) -> String {
        replace::replace_matches(self.patterns.emoji(), text, replacement)
    }

    /// Replaces every character of `characters`. Empty `characters` is a no-op.
    pub fn replace_characters(
        &self,
        text: &str,
        characters: &str,
        replacement: &str,
    ) -> Result<String> {
        replace::replace_characters(&self.char_classes, text, characters, replacement)
    }

    /// Replaces `-`.
    pub fn replace_hyphens(&self, text: &str, replacement: &str) -> String {
        replace::replace_hyphens(text, replacement)
    }

    /// Replaces ASCII punctuation except `excluded`.
    pub fn replace_punctuation(
        &self,
        text: &str,
        excluded: &CharSet,
        replacement: &str,
    ) -> Result<String> {
        replace::replace_punctuation(&self.char_classes, text, excluded, replacement)
    }

    /// Replaces symbols and nonspacing marks after normalizing to `form`.
    pub fn replace_symbols(
        &self,
        text: &str,
        form: UnicodeForm,
        excluded: &CharSet,
        replacement: &str,
    ) -> String {
        marks::replace_symbols(text, form, excluded, replacement)
    }

    /// Replaces URLs.
    pub fn replace_urls(&self, text: &str, replacement: &str) -> String {
        replace::replace_matches(self.patterns.url(), text, replacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NormalizrError;
    use normalizr_types::StepOptions;

    fn eager() -> Normalizr {
        Normalizr::new(NormalizrConfig::default()).unwrap()
    }

    fn lazy() -> Normalizr {
        Normalizr::new(NormalizrConfig::default().with_lazy_load(true)).unwrap()
    }

    #[test]
    fn eager_construction_loads_stop_words() {
        assert!(eager().stop_words().is_loaded());
        assert!(!lazy().stop_words().is_loaded());
    }

    #[test]
    fn eager_construction_fails_for_unknown_language() {
        let err = Normalizr::new(NormalizrConfig::new("zz")).unwrap_err();
        assert!(matches!(err, NormalizrError::ResourceNotFound { ref language } if language == "zz"));
    }

    #[test]
    fn lazy_construction_defers_the_failure() {
        let n = Normalizr::new(NormalizrConfig::new("zz").with_lazy_load(true)).unwrap();
        assert_eq!(n.remove_extra_whitespaces(" a  b "), "a b");
        assert!(matches!(
            n.remove_stop_words("a b", true),
            Err(NormalizrError::ResourceNotFound { .. })
        ));
    }

    #[test]
    fn default_pipeline() {
        assert_eq!(eager().normalize("  Hello   World!  ").unwrap(), "Hello World");
    }

    #[test]
    fn default_pipeline_drops_stop_words() {
        let n = eager();
        assert_eq!(
            n.normalize("The quick, brown fox jumps over the lazy dog.").unwrap(),
            "quick brown fox jumps lazy dog"
        );
    }

    #[test]
    fn default_pipeline_strips_symbols_and_accents() {
        assert_eq!(eager().normalize("Café costs 5€ + tip").unwrap(), "Cafe costs 5  tip");
    }

    #[test]
    fn lazy_load_happens_on_first_stop_word_removal() {
        let n = lazy();
        assert_eq!(n.remove_stop_words("this is it", true).unwrap(), "");
        assert!(n.stop_words().is_loaded());
    }

    #[test]
    fn stop_words_filtered_while_store_is_cleared() {
        let n = lazy();
        std::thread::scope(|s| {
            s.spawn(|| {
                for _ in 0..500 {
                    n.stop_words().clear();
                }
            });
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..500 {
                        assert_eq!(n.remove_stop_words("the cat on the mat", true).unwrap(), "cat mat");
                    }
                });
            }
        });
    }

    #[test]
    fn stop_words_case_sensitivity() {
        let n = eager();
        assert_eq!(n.remove_stop_words("The end", true).unwrap(), "end");
        assert_eq!(n.remove_stop_words("The end", false).unwrap(), "The end");
    }

    #[test]
    fn custom_steps_in_order() {
        let n = eager();
        let out = n
            .normalize_with(
                "Mail me at a@b.com -- now!",
                [
                    Step::new("replace_emails").with("replacement", "EMAIL"),
                    Step::from("replace_hyphens"),
                    Step::from("remove_extra_whitespaces"),
                ],
            )
            .unwrap();
        assert_eq!(out, "Mail me at EMAIL now!");
    }

    #[test]
    fn bare_names_accepted() {
        let n = eager();
        let out = n
            .normalize_with("a - b", ["replace_hyphens", "remove_extra_whitespaces"])
            .unwrap();
        assert_eq!(out, "a b");
    }

    #[test]
    fn name_option_pairs_accepted() {
        let n = eager();
        let steps = vec![(
            "replace_characters",
            StepOptions::new()
                .with("characters", "xy")
                .with("replacement", "_"),
        )];
        assert_eq!(n.normalize_with("axbyc", steps).unwrap(), "a_b_c");
    }

    #[test]
    fn empty_step_list_runs_default_pipeline() {
        let n = eager();
        let steps: [Step; 0] = [];
        assert_eq!(n.normalize_with("  Hello   World!  ", steps).unwrap(), "Hello World");
        assert_eq!(n.normalize_with("  Hello   World!  ", Vec::<&str>::new()).unwrap(), "Hello World");
    }

    #[test]
    fn run_with_empty_plan_returns_input() {
        assert_eq!(eager().run("  as is  ", &[]).unwrap(), "  as is  ");
    }

    #[test]
    fn same_operation_twice() {
        let n = eager();
        let out = n
            .normalize_with(
                "a-b c",
                [
                    Step::new("replace_hyphens").with("replacement", "+"),
                    Step::new("replace_characters")
                        .with("characters", "+")
                        .with("replacement", "-"),
                    Step::new("replace_characters")
                        .with("characters", " ")
                        .with("replacement", "-"),
                ],
            )
            .unwrap();
        assert_eq!(out, "a-b-c");
    }

    #[test]
    fn unknown_step_leaves_state_untouched() {
        let n = lazy();
        let err = n
            .normalize_with(
                "a, b",
                ["replace_punctuation", "remove_stop_words", "frobnicate"],
            )
            .unwrap_err();

        assert!(matches!(err, NormalizrError::UnknownOperation { ref name } if name == "frobnicate"));
        assert!(!n.stop_words().is_loaded());
        assert!(n.char_classes().is_empty());
    }

    #[test]
    fn invalid_option_leaves_state_untouched() {
        let n = lazy();
        let err = n
            .normalize_with(
                "a, b",
                [
                    Step::from("replace_punctuation"),
                    Step::new("remove_stop_words").with("ignore_case", "no"),
                ],
            )
            .unwrap_err();

        assert!(matches!(err, NormalizrError::InvalidOption { .. }));
        assert!(!n.stop_words().is_loaded());
        assert!(n.char_classes().is_empty());
    }

    #[test]
    fn direct_calls() {
        let n = eager();
        assert_eq!(n.replace_urls("visit https://example.com now", ""), "visit  now");
        assert_eq!(n.replace_hyphens("well-known fact", " "), "well known fact");
        assert_eq!(n.remove_accent_marks("café", &CharSet::default()), "cafe");
        assert_eq!(n.replace_characters("a,b;c", ",;", "-").unwrap(), "a-b-c");
        assert_eq!(n.replace_emails("x@y.org wrote", "<email>"), "<email> wrote");
        assert_eq!(n.replace_emojis("ok 👌", ""), "ok ");
        assert_eq!(
            n.replace_symbols("1 + 1", UnicodeForm::Nfkd, &CharSet::default(), "plus"),
            "1 plus 1"
        );
    }

    #[test]
    fn replace_characters_empty_is_noop() {
        let n = eager();
        assert_eq!(n.replace_characters("a,b", "", "-").unwrap(), "a,b");
        assert!(n.char_classes().is_empty());
    }

    #[test]
    fn punctuation_and_characters_share_the_cache() {
        let n = eager();
        n.replace_punctuation("x!", &CharSet::default(), "").unwrap();
        n.replace_characters("y", replace::PUNCTUATION, "").unwrap();
        assert_eq!(n.char_classes().len(), 1);
    }

    #[test]
    fn custom_patterns() {
        let patterns = PatternSet::new(r"\S+@\S+", r"<url>", r":\)").unwrap();
        let n = Normalizr::with_patterns(NormalizrConfig::default(), patterns).unwrap();
        assert_eq!(n.replace_urls("see <url>", "link"), "see link");
        assert_eq!(n.replace_emojis("hi :)", ""), "hi ");
        assert_eq!(n.replace_emails("me@local", "x"), "x");
    }

    #[test]
    fn normalizer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Normalizr>();
    }

    #[test]
    fn shared_across_threads() {
        let n = lazy();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    assert_eq!(n.normalize("the cat, the hat").unwrap(), "cat hat");
                });
            }
        });
        assert_eq!(n.char_classes().len(), 1);
    }
}
