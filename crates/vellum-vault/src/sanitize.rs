//! Best-effort removal of active content from rendered HTML.
//!
//! Strips `<script>` and `<iframe>` elements, `javascript:` schemes and
//! inline `on*=` handlers. This is a regex filter, not an HTML parser: run
//! it after a real sanitizer, never instead of one.

use std::sync::OnceLock;

use regex::Regex;

/// Applied in order; each match is replaced with nothing.
const PATTERNS: [&str; 5] = [
    r"(?is)<script\b[^>]*>.*?</script\s*>",
    r"(?is)<iframe\b[^>]*>.*?</iframe\s*>",
    // Unpaired opening or closing tags left over from the passes above.
    r"(?i)</?(?:script|iframe)\b[^>]*>",
    r"(?i)javascript\s*:",
    r"(?i)\bon\w+\s*=",
];

static COMPILED: OnceLock<Box<[Regex]>> = OnceLock::new();

fn compiled() -> &'static [Regex] {
    COMPILED.get_or_init(|| PATTERNS.iter().filter_map(|p| Regex::new(p).ok()).collect())
}

/// Remove script/iframe elements, `javascript:` URIs and `on*=` handlers.
///
/// Passes repeat until nothing matches, so a removal cannot splice its
/// neighbours into a new match. Every pass either shrinks the text or is the
/// last one.
#[must_use]
pub fn sanitize_content(html: &str) -> String {
    let mut current = html.to_owned();
    loop {
        let next = strip_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn strip_once(html: &str) -> String {
    compiled().iter().fold(html.to_owned(), |acc, re| {
        re.replace_all(&acc, "").into_owned()
    })
}
