//! Stop-word filtering.

use rustc_hash::FxHashSet;

use super::tokenizer::for_each_token;

/// Drops every space-delimited token found in `stop_words`.
///
/// With `ignore_case` the token is lowercased before the lookup; the token
/// itself is kept as written. Survivors keep their order and are rejoined
/// with single spaces. Empty tokens from adjacent spaces are never stop words,
/// so runs of spaces survive.
pub fn remove_stop_words(text: &str, stop_words: &FxHashSet<String>, ignore_case: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut first = true;

    for_each_token(text, |token| {
        let needs_fold = !token.is_ascii() || token.bytes().any(|b| b.is_ascii_uppercase());
        let is_stop = if ignore_case && needs_fold {
            stop_words.contains(&token.to_lowercase())
        } else {
            stop_words.contains(token)
        };

        if !is_stop {
            if !first {
                out.push(' ');
            }
            out.push_str(token);
            first = false;
        }
    });

    out
}
