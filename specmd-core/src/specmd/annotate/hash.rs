//! Stable content hashes
//!
//!     Example and note anchors are derived from their content, so they survive edits elsewhere
//!     in the document. Whitespace at the ends of lines and the kind of line break do not
//!     affect the hash: code lines are trimmed and rejoined with `\n`, prose lines with a space.
//!     The digest is SHA-256, as lowercase hex.

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest
pub(crate) const DIGEST_HEX_LEN: usize = 64;

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\n|\r").expect("line break pattern is valid"));

fn normalize(text: &str, joiner: &str) -> String {
    LINE_BREAK
        .split(text)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(joiner)
}

/// Normalized form of a code block, the input of [stable_code_hash]
pub fn normalize_code(code: &str) -> String {
    normalize(code, "\n")
}

/// Normalized form of prose, the input of [stable_content_hash]
pub fn normalize_content(text: &str) -> String {
    normalize(text, " ")
}

pub fn stable_code_hash(code: &str) -> String {
    sha256_hex(&normalize_code(code))
}

pub fn stable_content_hash(text: &str) -> String {
    sha256_hex(&normalize_content(text))
}

/// Derive a new digest from a previous one, used when two nodes hash identically
pub(crate) fn rehash(previous: &str, normalized: &str) -> String {
    sha256_hex(&format!("{}{}", previous, normalized))
}

fn sha256_hex(input: &str) -> String {
    let hash = Sha256::digest(input.as_bytes());
    format!("{hash:x}")
}
