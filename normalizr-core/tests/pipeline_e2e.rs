use std::fs;
use std::sync::Arc;

use normalizr_core::{
    CharSet, DirectoryStopWords, Normalizr, NormalizrConfig, NormalizrError, Step, StepOptions,
};

fn english() -> Normalizr {
    Normalizr::new(NormalizrConfig::new("en")).unwrap()
}

#[test]
fn default_pipeline_cleans_greeting() {
    assert_eq!(english().normalize("  Hello   World!  ").unwrap(), "Hello World");
}

#[test]
fn urls_removed_leave_both_spaces() {
    let out = english()
        .normalize_with("visit https://example.com now", ["replace_urls"])
        .unwrap();
    assert_eq!(out, "visit  now");
}

#[test]
fn hyphens_become_spaces() {
    let out = english()
        .normalize_with("well-known fact", ["replace_hyphens"])
        .unwrap();
    assert_eq!(out, "well known fact");
}

#[test]
fn accents_removed() {
    let out = english()
        .normalize_with("café crème brûlée", ["remove_accent_marks"])
        .unwrap();
    assert_eq!(out, "cafe creme brulee");
}

#[test]
fn accent_exclusion_keeps_selected_marks() {
    // U+0303 combining tilde survives, the acute accent does not.
    let excluded: CharSet = ['\u{0303}'].into_iter().collect();
    let out = english()
        .normalize_with(
            "año café",
            [Step::new("remove_accent_marks").with("excluded", excluded)],
        )
        .unwrap();
    assert_eq!(out, "año cafe");
}

#[test]
fn custom_characters_replaced() {
    let out = english()
        .normalize_with(
            "a,b;c",
            [Step::new("replace_characters")
                .with("characters", ",;")
                .with("replacement", "-")],
        )
        .unwrap();
    assert_eq!(out, "a-b-c");
}

#[test]
fn unsupported_language_fails_eagerly() {
    let err = Normalizr::new(NormalizrConfig::new("xx")).unwrap_err();
    assert!(matches!(err, NormalizrError::ResourceNotFound { ref language } if language == "xx"));
    assert!(err.to_string().contains("xx"));
}

#[test]
fn whitespace_collapse_is_idempotent() {
    let n = english();
    let inputs = ["", "   ", "a", " \t a \n\n b\u{3000}c ", "x\u{a0}\u{a0}y  "];
    for input in inputs {
        let once = n.normalize_with(input, ["remove_extra_whitespaces"]).unwrap();
        let twice = n.normalize_with(&once, ["remove_extra_whitespaces"]).unwrap();
        assert_eq!(once, twice, "input {input:?}");
        assert!(!once.starts_with(' ') && !once.ends_with(' '));
        assert!(!once.contains("  "));
    }
}

#[test]
fn stop_word_filter_keeps_order_of_survivors() {
    let out = english()
        .normalize_with(
            "zebra the apple on mango a kiwi",
            ["remove_stop_words"],
        )
        .unwrap();
    assert_eq!(out, "zebra apple mango kiwi");
}

#[test]
fn stop_word_filter_keeps_empty_tokens() {
    let out = english()
        .normalize_with("alpha  the beta", ["remove_stop_words"])
        .unwrap();
    assert_eq!(out, "alpha  beta");
}

#[test]
fn repeated_character_sets_share_one_regex() {
    let n = english();
    let a = n.char_classes().get_or_build(";,.".chars()).unwrap();
    let b = n.char_classes().get_or_build(".;,".chars()).unwrap();
    let c = n.char_classes().get_or_build(",,;.".chars()).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&a, &c));
    assert_eq!(n.char_classes().len(), 1);
}

#[test]
fn unknown_operation_mutates_nothing() {
    let n = Normalizr::new(NormalizrConfig::new("en").with_lazy_load(true)).unwrap();
    let err = n
        .normalize_with(
            "some text",
            ["remove_stop_words", "replace_punctuation", "make_it_pretty"],
        )
        .unwrap_err();

    assert!(matches!(err, NormalizrError::UnknownOperation { ref name } if name == "make_it_pretty"));
    assert!(!n.stop_words().is_loaded());
    assert!(n.char_classes().is_empty());
}

#[test]
fn spanish_stop_words() {
    let n = Normalizr::new(NormalizrConfig::new("es")).unwrap();
    assert_eq!(n.language(), "es");
    assert_eq!(
        n.normalize("La casa de  Pedro y el perro.").unwrap(),
        "casa Pedro perro"
    );
}

#[test]
fn stop_words_from_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("stop-xx"),
        "| custom list\nfoo   | first\nbar\n\n  baz qux | two on one line\n",
    )
    .unwrap();

    let n = Normalizr::new(NormalizrConfig::new("xx").with_data_dir(dir.path())).unwrap();
    assert_eq!(n.stop_words().len(), 4);
    assert_eq!(
        n.normalize_with("foo keep bar this baz qux", ["remove_stop_words"])
            .unwrap(),
        "keep this"
    );
}

#[test]
fn directory_source_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = NormalizrConfig::new("en").with_stop_word_source(DirectoryStopWords::new(dir.path()));
    assert!(matches!(
        Normalizr::new(config),
        Err(NormalizrError::ResourceNotFound { .. })
    ));
}

#[test]
fn full_pipeline_with_options() {
    let n = english();
    let steps = vec![
        Step::new("replace_urls").with("replacement", "URL"),
        Step::new("replace_emails").with("replacement", "EMAIL"),
        Step::from("replace_emojis"),
        Step::from("replace_hyphens"),
        Step::from("remove_accent_marks"),
        Step::new("replace_punctuation").with("excluded", "."),
        Step::from("remove_extra_whitespaces"),
    ];

    let out = n
        .normalize_with(
            "Écrivez à jo@mail.com — or see www.site.org/about 😀 (well-known).",
            steps,
        )
        .unwrap();
    assert_eq!(out, "Ecrivez a EMAIL — or see URL well known.");
}

#[test]
fn options_given_as_pairs() {
    let n = english();
    let out = n
        .normalize_with(
            "1+1=2",
            [(
                "replace_symbols",
                StepOptions::new().with("replacement", " ").with("format", "nfc"),
            )],
        )
        .unwrap();
    assert_eq!(out, "1 1 2");
}

#[test]
fn empty_step_list_falls_back_to_default_pipeline() {
    let n = english();
    let steps: Vec<Step> = Vec::new();
    assert_eq!(n.normalize_with("  Hello   World!  ", steps).unwrap(), "Hello World");
}
