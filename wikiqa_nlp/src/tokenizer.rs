//! Treebank-style word tokenization.

use std::sync::OnceLock;

use regex::Regex;

static NEGATION: OnceLock<Regex> = OnceLock::new();
static CLITIC: OnceLock<Regex> = OnceLock::new();
static TOKEN: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn negation() -> &'static Regex {
    NEGATION.get_or_init(|| {
        Regex::new(r"(?i)([\p{L}])(n['’]t)\b")
            .expect("Static regex pattern is guaranteed to be valid")
    })
}

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn clitic() -> &'static Regex {
    CLITIC.get_or_init(|| {
        Regex::new(r"(?i)([\p{L}\p{N}])(['’](?:s|m|d|ll|re|ve))\b")
            .expect("Static regex pattern is guaranteed to be valid")
    })
}

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn token() -> &'static Regex {
    TOKEN.get_or_init(|| {
        Regex::new(
            r"(?xi)
              n['’]t\b
            | ['’](?:s|m|d|ll|re|ve)\b
            | \d+(?:[.,]\d+)+
            | [\p{L}\p{N}]+(?:[-'’][\p{L}\p{N}]+)*
            | \.\.\.
            | \S",
        )
        .expect("Static regex pattern is guaranteed to be valid")
    })
}

/// Split `text` into words and punctuation.
///
/// Clitics and negations become their own tokens (`John's` gives `John`,
/// `'s`; `can't` gives `ca`, `n't`). Hyphenated words and numbers with inner
/// separators stay whole. Line breaks are ordinary whitespace here.
#[must_use]
pub fn word_tokenize(text: &str) -> Vec<String> {
    let text = negation().replace_all(text, "$1 $2");
    let text = clitic().replace_all(&text, "$1 $2");
    token()
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect()
}
