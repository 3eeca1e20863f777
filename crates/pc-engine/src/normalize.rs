//! Text normalization applied before scoring.

use regex::Regex;
use std::sync::LazyLock;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Lower-case, collapse whitespace runs to one space, remove everything that is
/// neither a word character nor whitespace, trim. Idempotent.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let lowered = text.to_lowercase();
    let collapsed = RE_WHITESPACE.replace_all(&lowered, " ");
    let stripped = RE_NON_WORD.replace_all(&collapsed, "");
    // "a - b" leaves two spaces behind once the dash is gone.
    let recollapsed = RE_WHITESPACE.replace_all(&stripped, " ");
    recollapsed.trim().to_string()
}
