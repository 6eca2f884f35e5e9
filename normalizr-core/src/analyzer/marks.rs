//! Unicode-category based filters: accent marks and symbols.

use normalizr_types::{CharSet, UnicodeForm};
use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

/// Brings `text` into the given normalization form.
pub fn to_form(text: &str, form: UnicodeForm) -> String {
    match form {
        UnicodeForm::Nfc => text.nfc().collect(),
        UnicodeForm::Nfd => text.nfd().collect(),
        UnicodeForm::Nfkc => text.nfkc().collect(),
        UnicodeForm::Nfkd => text.nfkd().collect(),
    }
}

#[inline]
fn is_nonspacing_mark(c: char) -> bool {
    matches!(get_general_category(c), GeneralCategory::NonspacingMark)
}

/// True for categories Mn, Sc, Sk, Sm and So.
#[inline]
pub fn is_symbol_or_mark(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::NonspacingMark
            | GeneralCategory::CurrencySymbol
            | GeneralCategory::ModifierSymbol
            | GeneralCategory::MathSymbol
            | GeneralCategory::OtherSymbol
    )
}

/// Strips accents: NFKD, drop nonspacing marks not in `excluded`, NFKC.
///
/// Compatibility characters are folded along the way, so `ﬁ` becomes `fi`.
pub fn remove_accent_marks(text: &str, excluded: &CharSet) -> String {
    text.nfkd()
        .filter(|c| !is_nonspacing_mark(*c) || excluded.contains(c))
        .nfkc()
        .collect()
}

/// Brings `text` into `form`, then replaces every symbol or nonspacing mark
/// not in `excluded` with `replacement`.
///
/// Under the decomposed forms accents split off as nonspacing marks and are
/// replaced too; under the composed forms precomposed letters survive.
pub fn replace_symbols(
    text: &str,
    form: UnicodeForm,
    excluded: &CharSet,
    replacement: &str,
) -> String {
    let normalized = to_form(text, form);
    let mut out = String::with_capacity(normalized.len());

    for c in normalized.chars() {
        if is_symbol_or_mark(c) && !excluded.contains(&c) {
            out.push_str(replacement);
        } else {
            out.push(c);
        }
    }

    out
}
