//! Whitespace collapsing.
//!
//! Runs of whitespace become a single ASCII space; leading and trailing
//! whitespace is dropped entirely. Whitespace is anything with the Unicode
//! `White_Space` property, so tabs, newlines, no-break spaces and ideographic
//! spaces all count. The ASCII information separators U+001C to U+001F are
//! treated as whitespace as well.
//!
//! ASCII input is scanned byte by byte; the first non-ASCII byte switches to
//! char decoding until the next ASCII run.

#[inline(always)]
const fn is_ascii_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r' | b'\x1c'..=b'\x1f')
}

/// Collapses whitespace into an existing buffer.
///
/// The buffer is cleared first; its capacity is reused.
pub fn collapse_into(input: &str, out: &mut String) {
    out.clear();
    out.reserve(input.len());

    let bytes = input.as_bytes();
    let mut i = 0usize;
    let mut pending_space = false;

    while i < bytes.len() {
        let b = bytes[i];

        if b < 128 {
            if is_ascii_ws(b) {
                pending_space = !out.is_empty();
            } else {
                if pending_space {
                    out.push(' ');
                    pending_space = false;
                }
                out.push(b as char);
            }
            i += 1;
            continue;
        }

        // `i` only ever advances by whole chars, so it sits on a boundary.
        let Some(ch) = input[i..].chars().next() else {
            break;
        };
        i += ch.len_utf8();

        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }
}

/// Collapses whitespace and returns a new String.
#[inline]
pub fn collapse(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    collapse_into(input, &mut out);
    out
}
