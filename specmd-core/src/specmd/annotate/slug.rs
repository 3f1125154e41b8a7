//! Anchor slugs

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ANCHOR_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").expect("anchor pattern is valid"));

/// Replace every run of characters outside `[A-Za-z0-9_-]` with a single `-`
///
/// Case is preserved, so `Type System` becomes `Type-System`.
pub fn anchorize(text: &str) -> String {
    NON_ANCHOR_CHARS.replace_all(text, "-").into_owned()
}
