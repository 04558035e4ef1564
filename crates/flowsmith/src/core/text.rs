//! Shared text utilities
//!
//! Identifier slugs for nodes created from free text, and label quoting for
//! text placed inside Mermaid brackets.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Characters that end a bracketed label early if left unquoted
const LABEL_SPECIALS: &[char] = &['[', ']', '(', ')', '{', '}', '<', '>', '|', '"'];

fn non_word_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w]+").expect("static pattern is valid"))
}

/// Turn free text into a node identifier
///
/// Lower-cases, strips accents, and collapses every run of whitespace or
/// non-word characters into a single hyphen. Never yields leading, trailing
/// or doubled hyphens.
///
/// # Example
/// ```
/// use flowsmith::core::slugify;
///
/// assert_eq!(slugify("Café  au Lait!"), "cafe-au-lait");
/// assert_eq!(slugify(&slugify("Home Page")), "home-page");
/// ```
pub fn slugify(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    non_word_runs()
        .replace_all(&folded, "-")
        .trim_matches('-')
        .to_string()
}

/// Make text safe to place between shape brackets or edge label pipes
///
/// Text without special characters is returned unchanged. Otherwise it is
/// wrapped in double quotes, with inner quotes written as `#quot;`.
pub fn quote_label(text: &str) -> String {
    if text.contains(LABEL_SPECIALS) {
        format!("\"{}\"", text.replace('"', "#quot;"))
    } else {
        text.to_string()
    }
}
