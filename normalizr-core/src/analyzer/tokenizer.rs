//! Space tokenizer used by stop-word removal.
//!
//! Splits on the literal ASCII space (0x20) only. Adjacent spaces produce
//! empty tokens, and leading or trailing spaces produce an empty first or last
//! token, so joining the tokens back with `' '` reproduces the input exactly.
//! Tokens are slices of the input; nothing is allocated.

use memchr::memchr_iter;

/// Emits every space-delimited token of `text`, in order.
#[inline]
pub fn for_each_token<'n, F>(text: &'n str, mut emit: F)
where
    F: FnMut(&'n str),
{
    let mut start = 0usize;

    for end in memchr_iter(b' ', text.as_bytes()) {
        emit(&text[start..end]);
        start = end + 1;
    }

    emit(&text[start..]);
}
