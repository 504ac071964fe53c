#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property tests for the HTML filter.

use proptest::prelude::*;
use vellum_vault::sanitize_content;

fn benign() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("<p>ok</p>"),
        Just("plain text"),
        Just(r#"<a href="/about">about</a>"#),
        Just("<em>button</em>"),
        Just("\n"),
    ]
}

fn hostile() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("<script>alert(1)</script>"),
        Just("<SCRIPT src=x></SCRIPT>"),
        Just(r#"<iframe src="https://evil"></iframe>"#),
        Just("javascript:"),
        Just(" onclick="),
        Just(" ONLOAD ="),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn benign_markup_is_untouched(parts in prop::collection::vec(benign(), 0..12)) {
        let html = parts.concat();
        prop_assert_eq!(sanitize_content(&html), html);
    }

    #[test]
    fn hostile_fragments_never_survive(
        parts in prop::collection::vec(prop_oneof![benign(), hostile()], 0..12)
    ) {
        let out = sanitize_content(&parts.concat()).to_lowercase();
        prop_assert!(!out.contains("<script"));
        prop_assert!(!out.contains("<iframe"));
        prop_assert!(!out.contains("javascript:"));
        prop_assert!(!out.contains("onclick="));
        prop_assert!(!out.contains("onload ="));
    }

    #[test]
    fn hostile_fragment_split_by_another_is_still_removed(
        outer in hostile(),
        inner in hostile(),
        at in any::<prop::sample::Index>(),
        before in benign(),
        after in benign(),
    ) {
        let cut = at.index(outer.len() + 1);
        let html = format!("{before}{}{inner}{}{after}", &outer[..cut], &outer[cut..]);
        let out = sanitize_content(&html).to_lowercase();
        prop_assert!(!out.contains("<script"), "{html} -> {out}");
        prop_assert!(!out.contains("<iframe"), "{html} -> {out}");
        prop_assert!(!out.contains("javascript:"), "{html} -> {out}");
        prop_assert!(!out.contains("onclick="), "{html} -> {out}");
        prop_assert!(!out.contains("onload ="), "{html} -> {out}");
        prop_assert_eq!(sanitize_content(&out), out);
    }

    #[test]
    fn benign_parts_are_kept_in_order(
        parts in prop::collection::vec(prop_oneof![benign(), hostile()], 0..12)
    ) {
        let expected: String = parts
            .iter()
            .filter(|p| !hostile_set().contains(*p))
            .copied()
            .collect::<Vec<_>>()
            .concat();
        let stripped: String = sanitize_content(&parts.concat())
            .chars()
            .filter(|c| *c != ' ')
            .collect();
        prop_assert_eq!(stripped, expected.replace(' ', ""));
    }
}

fn hostile_set() -> [&'static str; 6] {
    [
        "<script>alert(1)</script>",
        "<SCRIPT src=x></SCRIPT>",
        r#"<iframe src="https://evil"></iframe>"#,
        "javascript:",
        " onclick=",
        " ONLOAD =",
    ]
}
