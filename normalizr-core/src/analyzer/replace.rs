//! Substring and character replacement.
//!
//! Replacement text is always inserted literally; `$1` in a replacement is
//! just the two characters `$` and `1`.

use memchr::memchr_iter;
use normalizr_types::{CharSet, Result};
use regex::{NoExpand, Regex};

use crate::charclass::CharClassCache;

/// ASCII punctuation, the set `replace_punctuation` works from.
pub const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Punctuation characters that are not in `excluded`.
pub fn punctuation_except(excluded: &CharSet) -> String {
    PUNCTUATION.chars().filter(|c| !excluded.contains(c)).collect()
}

/// Replaces every match of `pattern`.
pub fn replace_matches(pattern: &Regex, text: &str, replacement: &str) -> String {
    pattern.replace_all(text, NoExpand(replacement)).into_owned()
}

/// Replaces every character of `characters` with `replacement`.
///
/// An empty `characters` returns the text unchanged without touching the
/// cache.
pub fn replace_characters(
    cache: &CharClassCache,
    text: &str,
    characters: &str,
    replacement: &str,
) -> Result<String> {
    if characters.is_empty() {
        return Ok(text.to_owned());
    }

    let matcher = cache.get_or_build(characters.chars())?;
    Ok(replace_matches(&matcher, text, replacement))
}

/// Replaces ASCII punctuation not in `excluded`.
pub fn replace_punctuation(
    cache: &CharClassCache,
    text: &str,
    excluded: &CharSet,
    replacement: &str,
) -> Result<String> {
    replace_characters(cache, text, &punctuation_except(excluded), replacement)
}

/// Replaces every `-` with `replacement`.
pub fn replace_hyphens(text: &str, replacement: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut start = 0usize;

    for pos in memchr_iter(b'-', bytes) {
        out.push_str(&text[start..pos]);
        out.push_str(replacement);
        start = pos + 1;
    }

    out.push_str(&text[start..]);
    out
}
